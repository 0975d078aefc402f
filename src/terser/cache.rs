//! LRU cache of parsed queries
//!
//! Terser paths tend to be string literals evaluated over and over
//! against many messages; parsing them once and caching by surface
//! syntax keeps the hot path allocation-free. The cache is process-wide
//! and bounded.

use std::num::NonZeroUsize;
use std::sync::{Mutex, OnceLock};

use lru::LruCache;
use tracing::trace;

use super::parser::parse_query;
use super::query::Query;
use crate::error::QueryError;

/// Entries kept in the process-wide cache.
const CACHE_CAPACITY: usize = 256;

static CACHE: OnceLock<Mutex<LruCache<String, Query>>> = OnceLock::new();

fn cache() -> &'static Mutex<LruCache<String, Query>> {
    CACHE.get_or_init(|| {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY)
            .unwrap_or(NonZeroUsize::MIN);
        Mutex::new(LruCache::new(capacity))
    })
}

/// Parse a terser path, consulting the process-wide cache first.
///
/// Only successful parses are cached; errors are cheap to reproduce and
/// should stay visible to the caller every time.
pub fn parse_cached(path: &str) -> Result<Query, QueryError> {
    let mut guard = match cache().lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    };

    if let Some(query) = guard.get(path) {
        trace!(path, "query cache hit");
        return Ok(query.clone());
    }

    let query = parse_query(path)?;
    guard.put(path.to_string(), query.clone());
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_matches_direct_parse() {
        let direct = parse_query("PID-5(1)-2").unwrap();
        let cached = parse_cached("PID-5(1)-2").unwrap();
        assert_eq!(direct, cached);

        // Second hit comes from the cache
        assert_eq!(parse_cached("PID-5(1)-2").unwrap(), direct);
    }

    #[test]
    fn test_errors_are_not_cached() {
        assert!(parse_cached("bad query").is_err());
        assert!(parse_cached("bad query").is_err());
    }
}
