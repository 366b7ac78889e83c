//! Exact string-set matcher.

use crate::matcher::PatternMatcher;
use std::collections::HashSet;

/// Matches a candidate iff it is exactly equal to one of the configured
/// literals. Set membership, O(1) amortized, infallible to build and to
/// query. No caching is needed; the lookup already is the cache.
#[derive(Debug, Clone, Default)]
pub struct StrictMatcher {
    literals: HashSet<String>,
}

impl StrictMatcher {
    /// Build a matcher from a list of literal strings. Duplicates collapse
    /// into the set; an empty list matches nothing.
    pub fn new<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            literals: literals.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of distinct literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

impl PatternMatcher for StrictMatcher {
    fn matches(&self, candidate: &str) -> bool {
        self.literals.contains(candidate)
    }
}
