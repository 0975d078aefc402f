//! Terser Query value
//!
//! A structured address into the document tree: segment name plus up to
//! four optional numeric elements. Each numeric element carries its own
//! presence flag (`Option`) - a query that never mentions a component is
//! distinct from one addressing component 1 - and stored values are
//! 0-based. Surface syntax is 1-based; conversion is
//! `max(written - 1, 0)`.

use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

/// A parsed terser path:
/// `SEG[(segRepeat)][-field[(fieldRepeat)][-component[-subcomponent]]]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    /// Segment name, e.g. `PID`.
    pub segment: String,
    /// 0-based segment occurrence.
    pub segment_repeat: Option<usize>,
    /// 0-based field number (before the synthetic-name adjustment the
    /// evaluator applies).
    pub field: Option<usize>,
    /// 0-based repetition within the field.
    pub field_repeat: Option<usize>,
    /// 0-based component; defaults to 0 at evaluation time.
    pub component: Option<usize>,
    /// 0-based subcomponent; defaults to 0 at evaluation time.
    pub subcomponent: Option<usize>,
}

impl Query {
    /// Start a query for the given segment name.
    pub fn new(segment: impl Into<String>) -> Self {
        Query {
            segment: segment.into(),
            ..Query::default()
        }
    }

    /// Address a 1-based segment occurrence.
    pub fn with_segment_repeat(mut self, written: usize) -> Self {
        self.segment_repeat = Some(written.saturating_sub(1));
        self
    }

    /// Address a 1-based field number.
    pub fn with_field(mut self, written: usize) -> Self {
        self.field = Some(written.saturating_sub(1));
        self
    }

    /// Address a 1-based repetition within the field.
    pub fn with_field_repeat(mut self, written: usize) -> Self {
        self.field_repeat = Some(written.saturating_sub(1));
        self
    }

    /// Address a 1-based component.
    pub fn with_component(mut self, written: usize) -> Self {
        self.component = Some(written.saturating_sub(1));
        self
    }

    /// Address a 1-based subcomponent.
    pub fn with_subcomponent(mut self, written: usize) -> Self {
        self.subcomponent = Some(written.saturating_sub(1));
        self
    }
}

impl fmt::Display for Query {
    /// Renders canonical surface syntax; round-trips through the parser.
    /// Elements below the first unspecified level are not rendered, since
    /// the grammar cannot express them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segment)?;

        if let Some(r) = self.segment_repeat {
            write!(f, "({})", r + 1)?;
        }

        let Some(field) = self.field else {
            return Ok(());
        };
        write!(f, "-{}", field + 1)?;

        if let Some(r) = self.field_repeat {
            write!(f, "({})", r + 1)?;
        }

        let Some(component) = self.component else {
            return Ok(());
        };
        write!(f, "-{}", component + 1)?;

        let Some(subcomponent) = self.subcomponent else {
            return Ok(());
        };
        write!(f, "-{}", subcomponent + 1)
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parser::parse_query(s)
    }
}
