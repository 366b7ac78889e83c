//! Multi-criterion record matcher.
//!
//! Composes optional service-name and record-name pattern matchers with a
//! list of attribute constraints into a single boolean predicate over a
//! record. Checks run cheapest-first with short-circuit AND: service name,
//! then record name, then attributes.

use crate::config::{MatchProperties, MatchType};
use crate::error::{FilterError, Result};
use crate::matcher::factory::MatcherFactory;
use crate::matcher::PatternMatcher;
use crate::telemetry::{AttributeValue, Record};
use tracing::debug;

/// One attribute constraint in compiled form: a key, and optionally the
/// typed value the record must carry under that key. No value means the
/// key's presence alone satisfies the constraint.
#[derive(Debug, Clone, PartialEq)]
struct AttributeMatcher {
    key: String,
    value: Option<AttributeValue>,
}

/// Predicate over a record and its origin/service name.
///
/// At least one of the three criterion groups must be configured; a matcher
/// with nothing to check is a construction error rather than a permissive
/// match-everything state.
#[derive(Debug)]
pub struct RecordPropertiesMatcher {
    /// Origin/service name patterns, if configured.
    service_matcher: Option<Box<dyn PatternMatcher>>,

    /// Record name patterns, if configured.
    name_matcher: Option<Box<dyn PatternMatcher>>,

    /// Attribute constraints; all must hold.
    attributes: Vec<AttributeMatcher>,
}

impl RecordPropertiesMatcher {
    /// Compile match properties into a predicate.
    ///
    /// Validation rules:
    /// - at least one of services, names or attributes must be non-empty;
    /// - attribute constraints require strict matching (regex semantics for
    ///   non-string values are not defined);
    /// - attribute keys must be non-empty.
    pub fn new(properties: &MatchProperties) -> Result<Self> {
        if properties.services.is_empty()
            && properties.names.is_empty()
            && properties.attributes.is_empty()
        {
            return Err(FilterError::MissingMatchCriteria);
        }

        let attributes = if properties.attributes.is_empty() {
            Vec::new()
        } else {
            Self::compile_attributes(properties)?
        };

        let service_matcher = if properties.services.is_empty() {
            None
        } else {
            Some(MatcherFactory::create(&properties.services, &properties.match_config())?)
        };

        let name_matcher = if properties.names.is_empty() {
            None
        } else {
            Some(MatcherFactory::create(&properties.names, &properties.match_config())?)
        };

        debug!(
            services = properties.services.len(),
            names = properties.names.len(),
            attributes = attributes.len(),
            "built record properties matcher"
        );

        Ok(Self {
            service_matcher,
            name_matcher,
            attributes,
        })
    }

    fn compile_attributes(properties: &MatchProperties) -> Result<Vec<AttributeMatcher>> {
        let match_type = properties.effective_match_type();
        if match_type != MatchType::Strict {
            return Err(FilterError::AttributesRequireStrictMatching(
                match_type.to_string(),
            ));
        }

        properties
            .attributes
            .iter()
            .map(|attribute| {
                if attribute.key.is_empty() {
                    return Err(FilterError::EmptyAttributeKey);
                }
                Ok(AttributeMatcher {
                    key: attribute.key.clone(),
                    value: attribute.value.clone(),
                })
            })
            .collect()
    }

    /// Test a record and its origin/service name against all configured
    /// criteria. Unconfigured criterion groups are vacuously true.
    pub fn matches(&self, record: &Record, service_name: &str) -> bool {
        if let Some(matcher) = &self.service_matcher {
            if !matcher.matches(service_name) {
                return false;
            }
        }

        if let Some(matcher) = &self.name_matcher {
            if !matcher.matches(&record.name) {
                return false;
            }
        }

        self.match_attributes(record)
    }

    /// Evaluate the attribute constraints against a record.
    fn match_attributes(&self, record: &Record) -> bool {
        if self.attributes.is_empty() {
            return true;
        }

        // Non-empty constraints can never hold on a record with no attributes.
        if record.attributes.is_empty() {
            return false;
        }

        for constraint in &self.attributes {
            let Some(actual) = record.attributes.get(&constraint.key) else {
                return false;
            };

            match &constraint.value {
                // Key existence alone satisfies a valueless constraint.
                None => {}
                // PartialEq on AttributeValue compares tag and payload;
                // cross-tag comparison is false, not an error.
                Some(expected) if expected == actual => {}
                Some(_) => return false,
            }
        }

        true
    }
}
