//! Message Tokenizer - state machine for the self-delimiting HL7 grammar
//!
//! Consumes the raw buffer once, left to right, producing the five-level
//! document tree. The grammar is self-describing: the delimiter alphabet
//! is discovered from the header before the scan begins.
//!
//! Boundary handling is a cascading commit: a field delimiter seals any
//! pending repetition, which seals any pending component, which seals any
//! pending text. A forced commit always produces a slot, even an empty
//! one; a non-forced commit (the cascade prelude, and end of input) only
//! seals levels that accumulated something.

use tracing::debug;

use super::delimiters::{Delimiters, HEADER_TAG};
use super::escape;
use crate::error::ParseError;
use crate::message::{Component, Field, Message, Repetition, Segment};

/// Parse a raw message buffer into a document tree plus its delimiter set.
///
/// The only hard failures are a buffer below the minimum header length and
/// a missing `MSH` tag. Bad content inside the message - unknown escape
/// bodies included - never aborts the parse.
pub fn parse_message(buf: &[u8]) -> Result<(Message, Delimiters), ParseError> {
    let delims = Delimiters::from_header(buf)?;

    let mut tokenizer = Tokenizer::new(delims);
    tokenizer.seed_header(buf);

    // Offset 8 is the field delimiter immediately following the delimiter
    // definitions; it is consumed implicitly by the header seeding.
    for &byte in buf.get(9..).unwrap_or_default() {
        tokenizer.push(byte);
    }

    let message = tokenizer.finish();
    debug!(
        segments = message.segments().len(),
        len = buf.len(),
        "parsed message"
    );
    Ok((message, delims))
}

/// Builder-stack state machine: one pending container per tree level plus
/// the raw text buffer at the bottom.
struct Tokenizer {
    delims: Delimiters,
    segments: Vec<Segment>,
    segment: Vec<Field>,
    field: Vec<Repetition>,
    repetition: Vec<Component>,
    component: Vec<String>,
    text: Vec<u8>,
    /// Inside an escape run: structural delimiters are inert until the
    /// closing escape byte or a segment boundary.
    in_escape: bool,
    /// The previous byte already committed a segment boundary, so the
    /// second half of a CRLF pair must not commit another.
    saw_newline: bool,
}

impl Tokenizer {
    fn new(delims: Delimiters) -> Self {
        Tokenizer {
            delims,
            segments: Vec::new(),
            segment: Vec::new(),
            field: Vec::new(),
            repetition: Vec::new(),
            component: Vec::new(),
            text: Vec::new(),
            in_escape: false,
            saw_newline: false,
        }
    }

    /// Reconstruct the first segment's synthetic fields: the literal tag,
    /// the field delimiter byte, and the remaining four delimiter bytes.
    /// These bypass the tokenizer - the delimiter definitions must not be
    /// re-tokenized or escape-decoded.
    fn seed_header(&mut self, buf: &[u8]) {
        let literal =
            |text: String| Field(vec![Repetition(vec![Component(vec![text])])]);

        self.segment
            .push(literal(String::from_utf8_lossy(HEADER_TAG).into_owned()));
        self.segment
            .push(literal((self.delims.field as char).to_string()));
        self.segment
            .push(literal(String::from_utf8_lossy(&buf[4..8]).into_owned()));
    }

    fn push(&mut self, byte: u8) {
        // Segment boundaries win over everything, escape runs included;
        // a CRLF pair commits once.
        if byte == b'\r' || byte == b'\n' {
            self.in_escape = false;
            if !self.saw_newline {
                self.commit_segment(true);
            }
            self.saw_newline = true;
            return;
        }
        self.saw_newline = false;

        if self.in_escape {
            self.text.push(byte);
            if byte == self.delims.escape {
                self.in_escape = false;
            }
            return;
        }

        let d = self.delims;
        if byte == d.field {
            self.commit_field(true);
        } else if byte == d.repetition {
            self.commit_repetition(true);
        } else if byte == d.component {
            self.commit_component(true);
        } else if byte == d.subcomponent {
            self.commit_text(true);
        } else if byte == d.escape {
            self.text.push(byte);
            self.in_escape = true;
        } else {
            self.text.push(byte);
        }
    }

    /// Final non-forced cascade: trailing content that never saw a boundary
    /// is captured, but a wholly-empty trailing segment is not materialized.
    fn finish(mut self) -> Message {
        self.commit_segment(false);
        Message::new(self.segments, self.delims)
    }

    fn commit_text(&mut self, force: bool) {
        if !self.text.is_empty() || force {
            self.component
                .push(escape::decode_to_string(&self.text, &self.delims));
            self.text.clear();
        }
        self.in_escape = false;
    }

    fn commit_component(&mut self, force: bool) {
        self.commit_text(false);
        if !self.component.is_empty() || force {
            self.repetition
                .push(Component(std::mem::take(&mut self.component)));
        }
    }

    fn commit_repetition(&mut self, force: bool) {
        self.commit_component(false);
        if !self.repetition.is_empty() || force {
            self.field
                .push(Repetition(std::mem::take(&mut self.repetition)));
        }
    }

    fn commit_field(&mut self, force: bool) {
        self.commit_repetition(false);
        if !self.field.is_empty() || force {
            self.segment.push(Field(std::mem::take(&mut self.field)));
        }
    }

    fn commit_segment(&mut self, force: bool) {
        self.commit_field(false);
        if !self.segment.is_empty() || force {
            self.segments
                .push(Segment(std::mem::take(&mut self.segment)));
        }
    }
}
