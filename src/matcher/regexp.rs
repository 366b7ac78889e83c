//! Anchored regular-expression matcher with an optional result cache.

use crate::config::RegexOptions;
use crate::error::{FilterError, Result};
use crate::matcher::cache::MatchResultCache;
use crate::matcher::PatternMatcher;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Matches a candidate iff it fully matches at least one of the configured
/// regex patterns.
///
/// Every pattern is wrapped as `^pattern$` before compilation, regardless
/// of the `full_match_required` option, so identical full-match semantics
/// hold across all configuration paths: pattern `apple` matches `apple`
/// but neither `apples` nor `sapple`.
///
/// With caching enabled, match results are memoized per candidate string
/// in a bounded LRU. The cache sits behind a single mutex so the
/// lookup-and-insert sequence is atomic when a shared matcher is queried
/// from several pipeline workers at once.
#[derive(Debug)]
pub struct RegexMatcher {
    /// Compiled patterns keyed by their original (unanchored) source.
    regexes: HashMap<String, Regex>,

    /// Optional memoization of match results, LRU-bounded.
    cache: Option<Mutex<MatchResultCache>>,
}

impl RegexMatcher {
    /// Compile a list of patterns into a matcher.
    ///
    /// Duplicate patterns are deduplicated silently. If any pattern fails
    /// to compile, construction aborts with the first offending pattern's
    /// syntax error and no matcher is returned.
    pub fn new<I, S>(patterns: I, options: &RegexOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut regexes = HashMap::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if regexes.contains_key(pattern) {
                continue;
            }

            // Anchor unconditionally to enforce full-string matches.
            let anchored = format!("^{pattern}$");
            let regex = Regex::new(&anchored).map_err(|e| FilterError::InvalidRegex {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
            regexes.insert(pattern.to_string(), regex);
        }

        let cache = options
            .cache_enabled
            .then(|| Mutex::new(MatchResultCache::new(options.cache_max_num_entries)));

        debug!(
            patterns = regexes.len(),
            cache_enabled = options.cache_enabled,
            cache_capacity = options.cache_max_num_entries,
            "compiled regexp matcher"
        );

        Ok(Self { regexes, cache })
    }

    /// Number of distinct compiled patterns.
    pub fn len(&self) -> usize {
        self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }

    /// Whether result caching is enabled.
    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Current number of cached results; 0 when caching is disabled.
    pub fn cached_results(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.lock().unwrap().len(),
            None => 0,
        }
    }

    fn compute(&self, candidate: &str) -> bool {
        // Iteration order is unspecified; any hit short-circuits.
        self.regexes.values().any(|r| r.is_match(candidate))
    }
}

impl PatternMatcher for RegexMatcher {
    fn matches(&self, candidate: &str) -> bool {
        let Some(cache) = &self.cache else {
            return self.compute(candidate);
        };

        let mut cache = cache.lock().unwrap();
        if let Some(cached) = cache.get(candidate) {
            return cached;
        }

        let matched = self.compute(candidate);
        cache.insert(candidate, matched);
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_patterns() -> Vec<&'static str> {
        vec![
            "exact_string_match",
            ".*contains.*",
            ".*/suffix",
            "prefix/.*",
            "(a|b)",
        ]
    }

    #[test]
    fn test_construction_success() {
        let matcher = RegexMatcher::new(valid_patterns(), &RegexOptions::default()).unwrap();
        assert_eq!(matcher.len(), 5);
        assert!(!matcher.cache_enabled());
    }

    #[test]
    fn test_construction_empty_pattern_list() {
        let matcher =
            RegexMatcher::new(Vec::<&str>::new(), &RegexOptions::default()).unwrap();
        assert!(matcher.is_empty());
        assert!(!matcher.matches("test"));
    }

    #[test]
    fn test_construction_invalid_pattern_aborts() {
        let result = RegexMatcher::new(
            ["exact_string_match", "(a|b))"],
            &RegexOptions::default(),
        );

        match result.unwrap_err() {
            FilterError::InvalidRegex { pattern, .. } => assert_eq!(pattern, "(a|b))"),
            other => panic!("expected InvalidRegex, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_patterns_deduplicated() {
        let matcher =
            RegexMatcher::new(["(a|b)", "(a|b)"], &RegexOptions::default()).unwrap();
        assert_eq!(matcher.len(), 1);
    }

    #[test]
    fn test_full_match_anchoring() {
        let matcher = RegexMatcher::new(["apple"], &RegexOptions::default()).unwrap();
        assert!(matcher.matches("apple"));
        assert!(!matcher.matches("apples"));
        assert!(!matcher.matches("sapple"));
    }

    #[test]
    fn test_anchoring_applied_without_full_match_flag() {
        // The flag documents behavior; anchoring happens either way.
        let flagged = RegexOptions {
            full_match_required: true,
            ..RegexOptions::default()
        };
        let with_flag = RegexMatcher::new(["app.*"], &flagged).unwrap();
        let without_flag = RegexMatcher::new(["app.*"], &RegexOptions::default()).unwrap();

        for candidate in ["apple", "app", "sapple", "apples!"] {
            assert_eq!(with_flag.matches(candidate), without_flag.matches(candidate));
        }
        assert!(!with_flag.matches("xapple"));
    }

    #[test]
    fn test_matches_and_mismatches() {
        let matcher = RegexMatcher::new(valid_patterns(), &RegexOptions::default()).unwrap();

        for candidate in [
            "exact_string_match",
            "test_contains_match",
            "contains",
            "test/match/suffix",
            "prefix/two/a",
            "prefix/one",
            "a",
            "b",
        ] {
            assert!(matcher.matches(candidate), "expected match for {candidate}");
        }

        for candidate in [
            "not_exact_string_match",
            "random",
            "test/match/suffixwrong",
            "wrongprefix/metric/one",
            "c",
        ] {
            assert!(!matcher.matches(candidate), "expected mismatch for {candidate}");
        }
    }

    #[test]
    fn test_cache_transparency() {
        let cached_options = RegexOptions {
            cache_enabled: true,
            cache_max_num_entries: 0,
            ..RegexOptions::default()
        };
        let cached = RegexMatcher::new(valid_patterns(), &cached_options).unwrap();
        let uncached =
            RegexMatcher::new(valid_patterns(), &RegexOptions::default()).unwrap();

        let candidates = [
            "exact_string_match",
            "random",
            "contains",
            "prefix/one",
            "c",
            "",
        ];

        // Two passes so the second pass answers from the cache.
        for _ in 0..2 {
            for candidate in candidates {
                assert_eq!(cached.matches(candidate), uncached.matches(candidate));
            }
        }
        assert_eq!(cached.cached_results(), candidates.len());
    }

    #[test]
    fn test_cache_stores_negative_results() {
        let options = RegexOptions {
            cache_enabled: true,
            ..RegexOptions::default()
        };
        let matcher = RegexMatcher::new(["onlythis"], &options).unwrap();

        assert!(!matcher.matches("something_else"));
        assert_eq!(matcher.cached_results(), 1);
        assert!(!matcher.matches("something_else"));
    }

    #[test]
    fn test_shared_cached_matcher_concurrent_queries() {
        use std::sync::Arc;
        use std::thread;

        // Bounded cache so concurrent queries race over eviction, not just
        // lookups; every thread must still see the uncached answers.
        let options = RegexOptions {
            cache_enabled: true,
            cache_max_num_entries: 3,
            ..RegexOptions::default()
        };
        let matcher = Arc::new(RegexMatcher::new(valid_patterns(), &options).unwrap());
        let reference =
            RegexMatcher::new(valid_patterns(), &RegexOptions::default()).unwrap();

        let candidates: Vec<String> = (0..32)
            .flat_map(|i| {
                [
                    "exact_string_match".to_string(),
                    format!("test_contains_{i}"),
                    format!("prefix/{i}"),
                    format!("no_match_{i}"),
                ]
            })
            .collect();
        let expected: Vec<bool> = candidates.iter().map(|c| reference.matches(c)).collect();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let matcher = Arc::clone(&matcher);
                let candidates = candidates.clone();
                thread::spawn(move || {
                    candidates
                        .iter()
                        .map(|c| matcher.matches(c))
                        .collect::<Vec<bool>>()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
        assert!(matcher.cached_results() <= 3);
    }

    #[test]
    fn test_bounded_cache_evicts_lru() {
        let options = RegexOptions {
            cache_enabled: true,
            cache_max_num_entries: 2,
            ..RegexOptions::default()
        };
        let matcher = RegexMatcher::new(["x.*"], &options).unwrap();

        assert!(matcher.matches("x1"));
        assert!(matcher.matches("x2"));
        assert!(matcher.matches("x3"));

        // Capacity 2 with three distinct keys; "x1" was evicted but still
        // computes the correct answer on recomputation.
        assert_eq!(matcher.cached_results(), 2);
        assert!(matcher.matches("x1"));
    }
}
