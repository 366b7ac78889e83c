//! Pattern matching engine for telemetry record filtering.
//!
//! The matcher system separates compilation from evaluation:
//! - **Compilation phase**: pattern lists are validated and compiled once,
//!   at configuration time, into an immutable matcher.
//! - **Evaluation phase**: `matches` is an infallible boolean test, cheap
//!   enough to sit on the per-record hot path.
//!
//! ## Core components
//!
//! - [`PatternMatcher`] - the boolean match contract over candidate strings
//! - [`StrictMatcher`] - exact string-set membership
//! - [`RegexMatcher`] - anchored regex set with an optional LRU result cache
//! - [`MatcherFactory`] - selects and builds the variant a config asks for
//! - [`RecordPropertiesMatcher`] - composes name/service/attribute criteria
//!   into one record-level predicate

pub mod cache;
pub mod factory;
pub mod properties;
pub mod regexp;
pub mod strict;

pub use cache::MatchResultCache;
pub use factory::MatcherFactory;
pub use properties::RecordPropertiesMatcher;
pub use regexp::RegexMatcher;
pub use strict::StrictMatcher;

use std::fmt;

/// Boolean match test over a candidate string.
///
/// Implementations are built once at configuration time and are immutable
/// afterwards apart from internal cache bookkeeping, so a matcher can be
/// shared across pipeline workers. `matches` never fails; all failure modes
/// are construction-time.
pub trait PatternMatcher: Send + Sync + fmt::Debug {
    /// Returns true if the candidate matches any configured pattern.
    fn matches(&self, candidate: &str) -> bool;
}
