//! Parallel batch evaluation
//!
//! Uses Rayon to evaluate many terser paths against one document. Sound
//! because the tree is immutable after construction - queries share it
//! read-only with no synchronization.

use rayon::prelude::*;

use super::cache::parse_cached;
use crate::error::QueryError;
use crate::message::Message;

/// Evaluate a batch of terser paths, returning each path's value
/// (empty string when the address is absent, per `get_string`).
pub fn get_parallel(message: &Message, paths: &[&str]) -> Vec<Result<String, QueryError>> {
    paths
        .par_iter()
        .map(|path| parse_cached(path).map(|q| q.get_string(message)))
        .collect()
}

/// Count a batch of terser paths against one document.
pub fn count_parallel(message: &Message, paths: &[&str]) -> Vec<Result<usize, QueryError>> {
    paths
        .par_iter()
        .map(|path| parse_cached(path).map(|q| q.count(message)))
        .collect()
}
