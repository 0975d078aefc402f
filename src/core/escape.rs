//! Escape Codec - decoding and encoding of delimiter escape sequences
//!
//! Handles the standard escape sequences, using the active delimiter set
//! for both the introducer byte and the decoded values:
//! - `\F\` field delimiter
//! - `\S\` component delimiter
//! - `\T\` subcomponent delimiter
//! - `\R\` repetition delimiter
//! - `\E\` escape character itself
//!
//! Any other body passes through literally, introducer included - unknown
//! escapes never fail a parse. Uses Cow for zero-copy when no escape byte
//! is present.

use std::borrow::Cow;

use memchr::memchr;

use super::delimiters::Delimiters;

/// Decode escape sequences in a raw subcomponent span.
///
/// Returns Borrowed if the span contains no escape byte (zero-copy),
/// Owned if any sequence was decoded. A dangling escape byte at the end
/// of the span is dropped.
pub fn decode<'a>(input: &'a [u8], delims: &Delimiters) -> Cow<'a, [u8]> {
    // Fast path: no escape byte at all
    if memchr(delims.escape, input).is_none() {
        return Cow::Borrowed(input);
    }

    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let c = input[pos];
        if c != delims.escape {
            out.push(c);
            pos += 1;
            continue;
        }

        // Escape introducer; the code letter decides how much is consumed.
        let Some(&code) = input.get(pos + 1) else {
            // Dangling introducer at end of span
            break;
        };

        match code {
            b'F' => {
                out.push(delims.field);
                pos += 3;
            }
            b'S' => {
                out.push(delims.component);
                pos += 3;
            }
            b'T' => {
                out.push(delims.subcomponent);
                pos += 3;
            }
            b'R' => {
                out.push(delims.repetition);
                pos += 3;
            }
            b'E' => {
                out.push(delims.escape);
                pos += 3;
            }
            _ => {
                // Unknown body: keep the introducer and the byte literally
                out.push(delims.escape);
                out.push(code);
                pos += 2;
            }
        }
    }

    Cow::Owned(out)
}

/// Decode a raw span straight to a String (lossy for non-UTF-8 content).
pub fn decode_to_string(input: &[u8], delims: &Delimiters) -> String {
    match decode(input, delims) {
        Cow::Borrowed(b) => String::from_utf8_lossy(b).into_owned(),
        Cow::Owned(v) => match String::from_utf8(v) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        },
    }
}

/// Encode decoded text back to wire form, replacing literal delimiter
/// bytes with their escape sequences.
///
/// Inverse of [`decode`] for well-formed text; used when rendering a
/// segment back to its source shape.
pub fn encode<'a>(input: &'a str, delims: &Delimiters) -> Cow<'a, str> {
    if !input.bytes().any(|b| delims.is_delimiter(b)) {
        return Cow::Borrowed(input);
    }

    let mut out = Vec::with_capacity(input.len() + 8);
    for &b in input.as_bytes() {
        let code = if b == delims.field {
            b'F'
        } else if b == delims.component {
            b'S'
        } else if b == delims.subcomponent {
            b'T'
        } else if b == delims.repetition {
            b'R'
        } else if b == delims.escape {
            b'E'
        } else {
            out.push(b);
            continue;
        };
        out.extend_from_slice(&[delims.escape, code, delims.escape]);
    }

    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}
