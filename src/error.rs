//! Error types for the filter engine crate.
//!
//! Every error in this crate is a construction-time configuration error.
//! Once a matcher or stage has been built, the match and batch-filtering
//! paths are infallible: a record that cannot be evaluated meaningfully
//! (missing attributes, type-mismatched value) is a non-match, not an error.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FilterError>;

/// Configuration errors surfaced while building matchers and stages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// A regex pattern failed to compile. Carries the offending pattern and
    /// the underlying regex syntax error.
    #[error("invalid regex pattern '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },

    /// The configured match_type is not a recognized enumeration value.
    #[error("unsupported match_type '{0}', valid match types are [strict, regexp]")]
    UnsupportedMatchType(String),

    /// A properties matcher was configured with no criteria at all.
    #[error("at least one of \"services\", \"names\" or \"attributes\" must be specified")]
    MissingMatchCriteria,

    /// Attribute constraints were combined with a non-strict match mode.
    /// Regex semantics for non-string attribute values are not defined.
    #[error("match_type={0} is not supported for \"attributes\"")]
    AttributesRequireStrictMatching(String),

    /// An attribute constraint was configured with an empty key.
    #[error("attribute match entries cannot have an empty key")]
    EmptyAttributeKey,

    /// A configuration document failed to deserialize.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FilterError {
    fn from(err: std::io::Error) -> Self {
        FilterError::Io(err.to_string())
    }
}
