//! Error types for message parsing and query parsing.
//!
//! Evaluation itself never errors: a missing address is `None` from `get`
//! or `0` from `count`.

use thiserror::Error;

/// Errors raised while parsing a raw message buffer.
///
/// These are the only hard failures the tokenizer produces. Malformed
/// escape sequences inside a message degrade to literal pass-through
/// instead of aborting the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The buffer is too small to contain the header tag plus the five
    /// delimiter-definition bytes.
    #[error("message must be at least eight bytes long; instead was {0}")]
    TooShort(usize),

    /// The buffer does not begin with the literal `MSH` tag.
    #[error("expected message to begin with MSH; instead found {found:?}")]
    InvalidHeader {
        /// The first bytes actually present, rendered lossily.
        found: String,
    },
}

/// Errors raised while parsing a terser query string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Segment names are `[A-Z][A-Z0-9]+`, at least two characters.
    #[error("invalid segment name at position {0}")]
    InvalidSegment(usize),

    /// A numeric element was introduced but no ASCII digit followed.
    #[error("expected number at position {0}")]
    ExpectedNumber(usize),

    /// Numeric elements are limited to three digits.
    #[error("number too long at position {0}")]
    NumberTooLong(usize),

    /// A parenthesized occurrence index was never closed.
    #[error("unterminated '(' at position {0}")]
    UnterminatedGroup(usize),

    /// Input remained after the last grammar element.
    #[error("junk data at position {0}")]
    TrailingJunk(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            ParseError::TooShort(3).to_string(),
            "message must be at least eight bytes long; instead was 3"
        );
    }

    #[test]
    fn test_query_error_display() {
        assert_eq!(
            QueryError::TrailingJunk(7).to_string(),
            "junk data at position 7"
        );
    }
}
