//! Compiled pattern caching with LRU eviction.

use lru::LruCache;
use regex::{Regex, RegexBuilder};
use std::num::NonZeroUsize;

use crate::error::FindError;

/// Default pattern cache capacity (number of compiled patterns)
const DEFAULT_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct PatternKey {
    pattern: String,
    case_insensitive: bool,
}

/// Cache of compiled match patterns.
///
/// Re-showing the find bar re-runs the previous term, and debounced
/// typing retries prefixes; both hit here instead of recompiling.
pub struct PatternCache {
    cache: LruCache<PatternKey, Regex>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or_else(|| NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap());
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Fetch a compiled pattern, compiling and inserting on miss.
    ///
    /// Compilation failures are not cached; an invalid pattern costs a
    /// compile attempt each time it is submitted.
    pub fn get_or_compile(
        &mut self,
        pattern: &str,
        case_insensitive: bool,
    ) -> Result<Regex, FindError> {
        let key = PatternKey {
            pattern: pattern.to_string(),
            case_insensitive,
        };
        if let Some(regex) = self.cache.get(&key) {
            return Ok(regex.clone());
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| FindError::InvalidPattern(e.to_string()))?;
        self.cache.put(key, regex.clone());
        Ok(regex)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_and_reuse() {
        let mut cache = PatternCache::new();
        let re = cache.get_or_compile("p[rṛ]e", true).unwrap();
        assert!(re.is_match("PṚE"));

        cache.get_or_compile("p[rṛ]e", true).unwrap();
        assert_eq!(cache.len(), 1);

        // Case sensitivity is part of the key.
        cache.get_or_compile("p[rṛ]e", false).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalid_pattern_not_cached() {
        let mut cache = PatternCache::new();
        assert!(cache.get_or_compile("((", true).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_eviction_respects_capacity() {
        let mut cache = PatternCache::with_capacity(2);
        cache.get_or_compile("a", true).unwrap();
        cache.get_or_compile("b", true).unwrap();
        cache.get_or_compile("c", true).unwrap();
        assert_eq!(cache.len(), 2);
    }
}
