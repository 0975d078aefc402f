//! Terser Query Parser
//!
//! Cursor-based scan of the surface syntax:
//!
//! ```text
//! query      := segmentTok ('(' uint ')')? ( '-' uint ('(' uint ')')?
//!                 ( '-' uint ( '-' uint )? )? )?
//! segmentTok := UPPER (UPPER | DIGIT)+
//! uint       := DIGIT{1,3}
//! ```
//!
//! Every element either advances the cursor and sets its field, or is
//! absent without error; anything left over after the last matched
//! element is a hard failure carrying the byte position.

use super::query::Query;
use crate::error::QueryError;

/// Parse a terser path string into a [`Query`].
pub fn parse_query(input: &str) -> Result<Query, QueryError> {
    let mut cursor = Cursor::new(input);

    let segment = cursor.read_segment_name()?;
    let mut query = Query::new(segment);

    query.segment_repeat = cursor.read_group()?;

    if let Some(field) = cursor.read_dashed()? {
        query.field = Some(field);
        query.field_repeat = cursor.read_group()?;

        if let Some(component) = cursor.read_dashed()? {
            query.component = Some(component);
            query.subcomponent = cursor.read_dashed()?;
        }
    }

    if !cursor.at_end() {
        return Err(QueryError::TrailingJunk(cursor.pos));
    }

    Ok(query)
}

struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Segment names are an uppercase letter followed by at least one
    /// more uppercase letter or digit.
    fn read_segment_name(&mut self) -> Result<String, QueryError> {
        let start = self.pos;

        if !matches!(self.peek(), Some(b'A'..=b'Z')) {
            return Err(QueryError::InvalidSegment(self.pos));
        }
        self.pos += 1;

        while matches!(self.peek(), Some(b'A'..=b'Z' | b'0'..=b'9')) {
            self.pos += 1;
        }

        if self.pos - start < 2 {
            return Err(QueryError::InvalidSegment(start));
        }

        // Names are ASCII by construction
        Ok(String::from_utf8_lossy(&self.input[start..self.pos]).into_owned())
    }

    /// A parenthesized occurrence index: `(` uint `)`. Returns the
    /// converted 0-based value, or None if no group is present.
    fn read_group(&mut self) -> Result<Option<usize>, QueryError> {
        if self.peek() != Some(b'(') {
            return Ok(None);
        }
        let open = self.pos;
        self.pos += 1;

        let value = self.read_uint()?;

        if self.peek() != Some(b')') {
            return Err(QueryError::UnterminatedGroup(open));
        }
        self.pos += 1;

        Ok(Some(value))
    }

    /// A dash-prefixed numeric element. Returns the converted 0-based
    /// value, or None if no dash is present.
    fn read_dashed(&mut self) -> Result<Option<usize>, QueryError> {
        if self.peek() != Some(b'-') {
            return Ok(None);
        }
        self.pos += 1;
        self.read_uint().map(Some)
    }

    /// One to three ASCII digits, converted via `max(written - 1, 0)`.
    fn read_uint(&mut self) -> Result<usize, QueryError> {
        let start = self.pos;
        let mut value: usize = 0;

        while let Some(b @ b'0'..=b'9') = self.peek() {
            if self.pos - start == 3 {
                return Err(QueryError::NumberTooLong(start));
            }
            value = value * 10 + usize::from(b - b'0');
            self.pos += 1;
        }

        if self.pos == start {
            return Err(QueryError::ExpectedNumber(self.pos));
        }

        Ok(value.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_only() {
        assert_eq!(parse_query("MSH").unwrap(), Query::new("MSH"));
        assert_eq!(parse_query("ZA1").unwrap(), Query::new("ZA1"));
    }

    #[test]
    fn test_all_grammar_shapes() {
        // Mirrors the canonical addressing scheme element by element
        let cases: [(&str, Query); 9] = [
            ("MSH(1)", Query::new("MSH").with_segment_repeat(1)),
            ("MSH(1)-2", Query::new("MSH").with_segment_repeat(1).with_field(2)),
            (
                "MSH(1)-2(3)",
                Query::new("MSH")
                    .with_segment_repeat(1)
                    .with_field(2)
                    .with_field_repeat(3),
            ),
            (
                "MSH(1)-2(3)-4",
                Query::new("MSH")
                    .with_segment_repeat(1)
                    .with_field(2)
                    .with_field_repeat(3)
                    .with_component(4),
            ),
            ("MSH-2", Query::new("MSH").with_field(2)),
            ("MSH-2(3)", Query::new("MSH").with_field(2).with_field_repeat(3)),
            (
                "MSH-2(3)-4",
                Query::new("MSH")
                    .with_field(2)
                    .with_field_repeat(3)
                    .with_component(4),
            ),
            ("MSH-2-4", Query::new("MSH").with_field(2).with_component(4)),
            (
                "MSH-2-4-6",
                Query::new("MSH")
                    .with_field(2)
                    .with_component(4)
                    .with_subcomponent(6),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_query(input).unwrap(), expected, "parsing {input}");
        }
    }

    #[test]
    fn test_written_values_convert_to_offsets() {
        let q = parse_query("PID-5(1)-2").unwrap();
        assert_eq!(q.segment, "PID");
        assert_eq!(q.field, Some(4));
        assert_eq!(q.field_repeat, Some(0));
        assert_eq!(q.component, Some(1));
        assert_eq!(q.subcomponent, None);

        // Written 0 clamps rather than underflowing
        assert_eq!(parse_query("MSH(0)").unwrap().segment_repeat, Some(0));
    }

    #[test]
    fn test_three_digit_limit() {
        assert_eq!(parse_query("OBX-999").unwrap().field, Some(998));
        assert_eq!(
            parse_query("OBX-1234"),
            Err(QueryError::NumberTooLong(4))
        );
        assert_eq!(
            parse_query("OBX(1000)"),
            Err(QueryError::NumberTooLong(4))
        );
    }

    #[test]
    fn test_short_or_malformed_segment() {
        assert_eq!(parse_query(""), Err(QueryError::InvalidSegment(0)));
        assert_eq!(parse_query("M"), Err(QueryError::InvalidSegment(0)));
        assert_eq!(parse_query("M-1"), Err(QueryError::InvalidSegment(0)));
        assert_eq!(parse_query("msh"), Err(QueryError::InvalidSegment(0)));
        assert_eq!(parse_query("1AB"), Err(QueryError::InvalidSegment(0)));
    }

    #[test]
    fn test_missing_number() {
        assert_eq!(parse_query("MSH-"), Err(QueryError::ExpectedNumber(4)));
        assert_eq!(parse_query("MSH()"), Err(QueryError::ExpectedNumber(4)));
        assert_eq!(parse_query("MSH-2-"), Err(QueryError::ExpectedNumber(6)));
    }

    #[test]
    fn test_unterminated_group() {
        assert_eq!(
            parse_query("MSH(1"),
            Err(QueryError::UnterminatedGroup(3))
        );
        assert_eq!(
            parse_query("MSH-2(3x)"),
            Err(QueryError::UnterminatedGroup(5))
        );
    }

    #[test]
    fn test_trailing_junk() {
        assert_eq!(parse_query("MSH-2x"), Err(QueryError::TrailingJunk(5)));
        assert_eq!(parse_query("MSHx"), Err(QueryError::TrailingJunk(3)));
        // A component repeat is not part of the canonical grammar
        assert_eq!(
            parse_query("PID-5-1(2)"),
            Err(QueryError::TrailingJunk(7))
        );
        // More than four addressable depth levels
        assert_eq!(
            parse_query("MSH-1-2-3-4"),
            Err(QueryError::TrailingJunk(9))
        );
    }
}
