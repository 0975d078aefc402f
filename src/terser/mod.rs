//! Terser query engine:
//! - query: the structured address value + surface-syntax rendering
//! - parser: cursor-based scan of the path grammar
//! - eval: get / get_string / count traversals
//! - cache: process-wide LRU of parsed queries
//! - parallel: rayon batch evaluation

pub mod cache;
mod eval;
pub mod parallel;
pub mod parser;
pub mod query;

pub use parser::parse_query;
pub use query::Query;

use std::borrow::Cow;

use crate::error::QueryError;
use crate::message::Message;

impl Message {
    /// Parse (with caching) and evaluate a terser path against this
    /// message.
    pub fn query(&self, path: &str) -> Result<Option<Cow<'_, str>>, QueryError> {
        let query = cache::parse_cached(path)?;
        Ok(query.get(self))
    }

    /// Like [`query`](Message::query), with absence collapsed to the
    /// empty string.
    pub fn query_string(&self, path: &str) -> Result<String, QueryError> {
        Ok(cache::parse_cached(path)?.get_string(self))
    }

    /// Parse (with caching) and count a terser path against this message.
    pub fn query_count(&self, path: &str) -> Result<usize, QueryError> {
        Ok(cache::parse_cached(path)?.count(self))
    }
}
