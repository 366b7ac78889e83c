//! Configuration surface for the filter engine.
//!
//! Every option is an explicit struct field with its default stated; there
//! are no process-wide mutable defaults. Field names follow the declarative
//! pipeline configuration wire format (`match_type`, `regex.cacheenabled`,
//! `action`, ...), so a stage can be built straight from a YAML document.
//!
//! ```rust,ignore
//! use filter_engine::FilterConfig;
//!
//! let config = FilterConfig::from_yaml_str(r#"
//! action: include
//! match_type: regexp
//! regex:
//!     cacheenabled: true
//!     cachemaxnumentries: 10
//! spans:
//!     names: ["auth/.*", "checkout"]
//! "#)?;
//! ```

use crate::error::{FilterError, Result};
use crate::telemetry::AttributeValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Selects which [`PatternMatcher`](crate::matcher::PatternMatcher)
/// variant is compiled from a pattern list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Exact string-set membership. The default.
    #[default]
    Strict,
    /// RE2-compatible regular expressions, always full-match anchored.
    Regexp,
}

impl MatchType {
    /// The accepted `match_type` configuration values.
    pub const VALID_TYPES: [&'static str; 2] = ["strict", "regexp"];

    /// Parse a raw configuration string into a match type.
    ///
    /// Anything outside [`MatchType::VALID_TYPES`] is rejected with an
    /// error naming the bad value and listing the valid ones.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "strict" => Ok(MatchType::Strict),
            "regexp" => Ok(MatchType::Regexp),
            other => Err(FilterError::UnsupportedMatchType(other.to_string())),
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Strict => write!(f, "strict"),
            MatchType::Regexp => write!(f, "regexp"),
        }
    }
}

// Deserialization goes through `parse` so a bad wire value is rejected
// with the same error text everywhere.
impl<'de> Deserialize<'de> for MatchType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        MatchType::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Options consulted when building a regexp matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegexOptions {
    /// Cache match results in an LRU keyed by the matched string.
    ///
    /// **Default**: false
    #[serde(default, rename = "cacheenabled")]
    pub cache_enabled: bool,

    /// Maximum number of LRU cache entries; 0 means unbounded.
    /// Ignored unless `cacheenabled` is set.
    ///
    /// **Default**: 0 (unbounded)
    #[serde(default, rename = "cachemaxnumentries")]
    pub cache_max_num_entries: usize,

    /// Require the full string to match one of the patterns.
    ///
    /// Anchoring is applied unconditionally during compilation; this flag
    /// only documents that behavior so configuration reads unambiguously.
    ///
    /// **Default**: false
    #[serde(default, rename = "fullmatchrequired")]
    pub full_match_required: bool,
}

/// Matcher-variant selection shared by every pattern list in a config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Which matcher variant to build. Unspecified defaults to strict.
    #[serde(default)]
    pub match_type: Option<MatchType>,

    /// Regexp matcher options; ignored for strict matchers.
    #[serde(default)]
    pub regex: Option<RegexOptions>,
}

impl MatchConfig {
    /// The effective match type, applying the strict default.
    pub fn effective_match_type(&self) -> MatchType {
        self.match_type.unwrap_or_default()
    }
}

/// One attribute constraint: a key, and optionally a typed value.
///
/// A missing value means "key must exist, value irrelevant".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeConfig {
    pub key: String,

    #[serde(default)]
    pub value: Option<AttributeValue>,
}

/// Criteria for matching a record against its name, origin service and
/// attributes. Consumed by
/// [`RecordPropertiesMatcher`](crate::matcher::RecordPropertiesMatcher).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchProperties {
    /// Which matcher variant to build. Unspecified defaults to strict.
    #[serde(default)]
    pub match_type: Option<MatchType>,

    /// Regexp matcher options; ignored for strict matchers.
    #[serde(default)]
    pub regex: Option<RegexOptions>,

    /// Origin/service name patterns.
    #[serde(default)]
    pub services: Vec<String>,

    /// Record name patterns.
    #[serde(default, alias = "matches")]
    pub names: Vec<String>,

    /// Attribute constraints; only valid with strict matching.
    #[serde(default)]
    pub attributes: Vec<AttributeConfig>,
}

impl MatchProperties {
    /// The matcher-variant selection carried by these properties.
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            match_type: self.match_type,
            regex: self.regex,
        }
    }

    /// The effective match type, applying the strict default.
    pub fn effective_match_type(&self) -> MatchType {
        self.match_type.unwrap_or_default()
    }
}

/// Whether records matching the filter are kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterAction {
    /// Only matching records survive; everything else is dropped.
    #[default]
    Include,
    /// Matching records are dropped; everything else survives.
    Exclude,
}

impl fmt::Display for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterAction::Include => write!(f, "include"),
            FilterAction::Exclude => write!(f, "exclude"),
        }
    }
}

/// Per-signal name filter section of a stage config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalFilter {
    /// Name patterns for this signal. An empty list matches nothing.
    #[serde(default)]
    pub names: Vec<String>,
}

/// Top-level configuration for a filter stage.
///
/// One config carries the shared action and matcher options plus separate
/// name-filter sections for spans and metrics, so a pipeline can build one
/// stage per signal from the same document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Keep-or-drop policy for matching records.
    ///
    /// **Default**: include
    #[serde(default)]
    pub action: FilterAction,

    #[serde(flatten)]
    pub match_config: MatchConfig,

    /// Span name filters.
    #[serde(default)]
    pub spans: SignalFilter,

    /// Metric name filters.
    #[serde(default)]
    pub metrics: SignalFilter,
}

impl FilterConfig {
    /// Deserialize a stage config from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| FilterError::ConfigParse(e.to_string()))
    }

    /// Read and deserialize a stage config from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}
