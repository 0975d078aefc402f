//! Delimiter Set - the five structural bytes a message declares about itself
//!
//! Every HL7 v2 message carries its own delimiter alphabet at fixed header
//! offsets. The set is discovered once per document and then passed
//! explicitly into tokenizing and decoding functions, so documents with
//! different delimiters can be parsed concurrently without interference.

use crate::error::ParseError;

/// The literal tag every valid message begins with.
pub const HEADER_TAG: &[u8; 3] = b"MSH";

/// Minimum buffer length: the tag plus five delimiter-definition bytes.
pub const MIN_MESSAGE_LEN: usize = 8;

/// The five structural delimiter bytes of one message.
///
/// Immutable after discovery; scoped to one parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    /// Separates fields within a segment (classically `|`).
    pub field: u8,
    /// Separates components within a repetition (classically `^`).
    pub component: u8,
    /// Separates repetitions within a field (classically `~`).
    pub repetition: u8,
    /// Introduces and closes escape sequences (classically `\`).
    pub escape: u8,
    /// Separates subcomponents within a component (classically `&`).
    pub subcomponent: u8,
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters {
            field: b'|',
            component: b'^',
            repetition: b'~',
            escape: b'\\',
            subcomponent: b'&',
        }
    }
}

impl Delimiters {
    /// Discover the delimiter set from a message header.
    ///
    /// Checks, in order: the buffer holds at least [`MIN_MESSAGE_LEN`]
    /// bytes, and begins with the literal [`HEADER_TAG`]. The five bytes
    /// at offsets 3..8 are then taken as-is.
    pub fn from_header(buf: &[u8]) -> Result<Self, ParseError> {
        if buf.len() < MIN_MESSAGE_LEN {
            return Err(ParseError::TooShort(buf.len()));
        }

        if &buf[..3] != HEADER_TAG {
            return Err(ParseError::InvalidHeader {
                found: String::from_utf8_lossy(&buf[..3]).into_owned(),
            });
        }

        Ok(Delimiters {
            field: buf[3],
            component: buf[4],
            repetition: buf[5],
            escape: buf[6],
            subcomponent: buf[7],
        })
    }

    /// True if `byte` is one of the five structural delimiters.
    pub fn is_delimiter(&self, byte: u8) -> bool {
        byte == self.field
            || byte == self.component
            || byte == self.repetition
            || byte == self.escape
            || byte == self.subcomponent
    }
}
