//! Document tree - the immutable result of a parse
//!
//! Five ordered levels: Message > Segment > Field > Repetition >
//! Component, with decoded text strings at the leaves. The tree has
//! uniform arity: a field without the repetition delimiter still holds
//! exactly one repetition, so the evaluator never needs a "maybe
//! repeated" branch.
//!
//! Built once by the tokenizer, never mutated afterwards; safe to share
//! across threads for read-only queries.

use crate::core::escape;
use crate::core::Delimiters;

/// A parsed message: ordered segments plus the delimiter set it declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    segments: Vec<Segment>,
    delimiters: Delimiters,
}

/// A named record within a message. The name is the first field's text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment(pub Vec<Field>);

/// One value slot within a segment; holds one repetition per value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Field(pub Vec<Repetition>);

/// One of potentially several values sharing a field slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Repetition(pub Vec<Component>);

/// A subdivision of a repetition; leaves are decoded subcomponent text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Component(pub Vec<String>);

impl Message {
    pub(crate) fn new(segments: Vec<Segment>, delimiters: Delimiters) -> Self {
        Message {
            segments,
            delimiters,
        }
    }

    /// All segments in appearance order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The delimiter set discovered from this message's header.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Segments with the given name, in appearance order.
    pub fn segments_named<'a: 'b, 'b>(
        &'a self,
        name: &'b str,
    ) -> impl Iterator<Item = &'a Segment> + 'b {
        self.segments.iter().filter(move |s| s.name() == name)
    }

    /// The `occurrence`-th (0-based) segment with the given name.
    pub fn segment(&self, name: &str, occurrence: usize) -> Option<&Segment> {
        self.segments_named(name).nth(occurrence)
    }
}

impl Segment {
    /// The segment's name: the text of its first field, empty if absent.
    pub fn name(&self) -> &str {
        self.0
            .first()
            .and_then(|f| f.0.first())
            .and_then(|r| r.0.first())
            .and_then(|c| c.0.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn fields(&self) -> &[Field] {
        &self.0
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.0.get(index)
    }

    /// Render the segment back to wire form with the given delimiters,
    /// escape-encoding leaf text so decoded delimiters survive a reparse.
    pub fn render(&self, delims: &Delimiters) -> String {
        let mut out = String::new();
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(delims.field as char);
            }
            field.render_into(&mut out, delims);
        }
        out
    }
}

impl Field {
    pub fn repetitions(&self) -> &[Repetition] {
        &self.0
    }

    pub fn repetition(&self, index: usize) -> Option<&Repetition> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if every leaf under this field is the empty string. A field
    /// that is structurally present but textually empty counts as absent
    /// for cardinality purposes.
    pub fn is_empty_text(&self) -> bool {
        self.0
            .iter()
            .flat_map(|r| r.0.iter())
            .flat_map(|c| c.0.iter())
            .all(String::is_empty)
    }

    fn render_into(&self, out: &mut String, delims: &Delimiters) {
        for (i, rep) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(delims.repetition as char);
            }
            rep.render_into(out, delims);
        }
    }
}

impl Repetition {
    pub fn components(&self) -> &[Component] {
        &self.0
    }

    pub fn component(&self, index: usize) -> Option<&Component> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn render_into(&self, out: &mut String, delims: &Delimiters) {
        for (i, comp) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(delims.component as char);
            }
            comp.render_into(out, delims);
        }
    }
}

impl Component {
    pub fn subcomponents(&self) -> &[String] {
        &self.0
    }

    pub fn subcomponent(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn render_into(&self, out: &mut String, delims: &Delimiters) {
        for (i, sub) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(delims.subcomponent as char);
            }
            out.push_str(&escape::encode(sub, delims));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_message;

    fn sample() -> Message {
        let raw = [
            r"MSH|^~\&|LAB|FAC|EHR|FAC|20200101010101||ORU^R01|MSG0001|P|2.4",
            r"OBX|1|TX|FIND^Findings||Result A~Result B",
            r"NK1|1|DUCK^DAISY|SPO",
            r"NK1|2|DUCK^HUEY|CHD",
        ]
        .join("\r");
        parse_message(raw.as_bytes()).unwrap().0
    }

    #[test]
    fn test_segment_names() {
        let msg = sample();
        let names: Vec<&str> = msg.segments().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["MSH", "OBX", "NK1", "NK1"]);
    }

    #[test]
    fn test_segment_lookup_by_occurrence() {
        let msg = sample();
        assert_eq!(msg.segments_named("NK1").count(), 2);

        let second = msg.segment("NK1", 1).unwrap();
        assert_eq!(second.field(1).unwrap().0[0].0[0].0[0], "2");

        assert!(msg.segment("NK1", 2).is_none());
        assert!(msg.segment("ZZZ", 0).is_none());
    }

    #[test]
    fn test_empty_text_field() {
        let msg = sample();
        let obx = msg.segment("OBX", 0).unwrap();
        assert!(obx.field(4).unwrap().is_empty_text());
        assert!(!obx.field(3).unwrap().is_empty_text());
    }

    #[test]
    fn test_render_reproduces_source_line() {
        let msg = sample();
        let delims = *msg.delimiters();
        assert_eq!(
            msg.segment("OBX", 0).unwrap().render(&delims),
            r"OBX|1|TX|FIND^Findings||Result A~Result B"
        );
        assert_eq!(
            msg.segment("NK1", 1).unwrap().render(&delims),
            r"NK1|2|DUCK^HUEY|CHD"
        );
    }

    #[test]
    fn test_render_escapes_literal_delimiters() {
        let (msg, delims) = parse_message(br"MSH|^~\&|a\F\b").unwrap();
        let rendered = msg.segments()[0].render(&delims);
        assert!(rendered.ends_with(r"|a\F\b"));

        // The rendered form reparses to the same decoded text
        let again = format!("MSH|^~\\&|{}", r"a\F\b");
        let (reparsed, _) = parse_message(again.as_bytes()).unwrap();
        assert_eq!(reparsed.segments()[0].fields()[3].0[0].0[0].0[0], "a|b");
    }
}
