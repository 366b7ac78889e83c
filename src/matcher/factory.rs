//! Matcher selection and construction from configuration.

use crate::config::{MatchConfig, MatchType};
use crate::error::Result;
use crate::matcher::regexp::RegexMatcher;
use crate::matcher::strict::StrictMatcher;
use crate::matcher::PatternMatcher;
use tracing::debug;

/// Builds the right [`PatternMatcher`] variant for a pattern list.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatcherFactory;

impl MatcherFactory {
    /// Construct a matcher over `patterns` according to `config`.
    ///
    /// An unspecified match type defaults to strict. The regexp path
    /// forwards the nested cache and full-match options; the strict path
    /// ignores them. Fails only when a regexp pattern does not compile.
    pub fn create<I, S>(patterns: I, config: &MatchConfig) -> Result<Box<dyn PatternMatcher>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let match_type = config.effective_match_type();
        debug!(%match_type, "building pattern matcher");

        match match_type {
            MatchType::Strict => Ok(Box::new(StrictMatcher::new(
                patterns.into_iter().map(|p| p.as_ref().to_string()),
            ))),
            MatchType::Regexp => {
                let options = config.regex.unwrap_or_default();
                Ok(Box::new(RegexMatcher::new(patterns, &options)?))
            }
        }
    }
}
