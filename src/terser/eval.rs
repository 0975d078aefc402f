//! Terser Query Evaluator
//!
//! Read-only traversals of the document tree guided by a [`Query`]:
//! `get` resolves a single value, `count` answers "how many items exist
//! at the deepest level the query actually specifies". Neither ever
//! errors - absence is `None` or `0`.

use std::borrow::Cow;

use super::query::Query;
use crate::message::Message;

impl Query {
    /// Resolve the query to a single value.
    ///
    /// Unspecified occurrence indexes default to the first item;
    /// component and subcomponent default to 1 (written). A query with
    /// no field addresses the whole segment, rendered back to wire form.
    /// Any out-of-range index yields `None`.
    pub fn get<'m>(&self, message: &'m Message) -> Option<Cow<'m, str>> {
        let segment = message.segment(&self.segment, self.segment_repeat.unwrap_or(0))?;

        let Some(field) = self.field else {
            return Some(Cow::Owned(segment.render(message.delimiters())));
        };

        // +1: index 0 holds the segment name, so written field N lands
        // on index N for every segment, the header included.
        let field = segment.field(field + 1)?;
        let repetition = field.repetition(self.field_repeat.unwrap_or(0))?;
        let component = repetition.component(self.component.unwrap_or(0))?;
        let subcomponent = component.subcomponent(self.subcomponent.unwrap_or(0))?;

        Some(Cow::Borrowed(subcomponent))
    }

    /// [`get`](Query::get) with absence collapsed to the empty string.
    pub fn get_string(&self, message: &Message) -> String {
        self.get(message).map(Cow::into_owned).unwrap_or_default()
    }

    /// Count the items at the deepest level the query specifies,
    /// stopping as soon as the query stops naming deeper levels. An
    /// out-of-range index at any resolution step yields 0 immediately.
    pub fn count(&self, message: &Message) -> usize {
        if self.segment_repeat.is_none() && self.field.is_none() {
            return message.segments_named(&self.segment).count();
        }

        let Some(segment) = message.segment(&self.segment, self.segment_repeat.unwrap_or(0))
        else {
            return 0;
        };

        let Some(field_index) = self.field else {
            return segment.fields().len();
        };

        let Some(field) = segment.field(field_index + 1) else {
            return 0;
        };

        if self.field_repeat.is_none() && self.component.is_none() {
            // A structurally present but textually empty field counts as
            // absent.
            if field.is_empty_text() {
                return 0;
            }
            return field.len();
        }

        let Some(repetition) = field.repetition(self.field_repeat.unwrap_or(0)) else {
            return 0;
        };

        let Some(component_index) = self.component else {
            return repetition.len();
        };

        let Some(component) = repetition.component(component_index) else {
            return 0;
        };

        let Some(subcomponent_index) = self.subcomponent else {
            return component.len();
        };

        usize::from(component.subcomponent(subcomponent_index).is_some())
    }
}
