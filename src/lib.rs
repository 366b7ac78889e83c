//! # Telemetry Record Filter Engine
//!
//! A Rust library for filtering streams of telemetry records (spans and
//! metric data points) inside a pipeline. Each record is tested against
//! configurable match criteria (name patterns and/or attribute
//! constraints) and kept or dropped according to an include/exclude
//! policy. The engine is a pure per-record predicate evaluator and batch
//! partitioner: no sampling, aggregation or enrichment.
//!
//! ## Quick Start
//!
//! ### Filtering by name patterns
//!
//! ```rust,ignore
//! use filter_engine::{FilterConfig, FilterStage, Record, RecordBatch};
//!
//! let config = FilterConfig::from_yaml_str(r#"
//! action: exclude
//! match_type: regexp
//! regex:
//!     cacheenabled: true
//!     cachemaxnumentries: 128
//! spans:
//!     names: ["health/.*", "ping"]
//! "#)?;
//!
//! let stage = FilterStage::spans_from_config(&config)?;
//!
//! let batch = RecordBatch::with_records("checkout-service", vec![
//!     Record::new("health/live"),
//!     Record::new("db.query"),
//! ]);
//!
//! // Health-check spans are dropped, everything else passes through.
//! let filtered = stage.process_batch(batch);
//! assert_eq!(filtered.record_names(), vec!["db.query"]);
//! # Ok::<(), filter_engine::FilterError>(())
//! ```
//!
//! ### Filtering by record properties
//!
//! ```rust,ignore
//! use filter_engine::{
//!     AttributeConfig, AttributeValue, FilterAction, FilterStage, MatchProperties,
//! };
//!
//! let properties = MatchProperties {
//!     attributes: vec![AttributeConfig {
//!         key: "error".to_string(),
//!         value: Some(AttributeValue::Bool(true)),
//!     }],
//!     ..MatchProperties::default()
//! };
//!
//! // Keep only records flagged as errors.
//! let stage = FilterStage::from_properties(&properties, FilterAction::Include)?;
//! # Ok::<(), filter_engine::FilterError>(())
//! ```
//!
//! ## Design notes
//!
//! Matchers are compiled once at configuration time; all configuration
//! errors (bad regex syntax, unknown match types, missing criteria) are
//! surfaced then, and the per-record decision path is infallible. The only
//! mutable state is cache bookkeeping, guarded by single locks, so stages
//! and matchers tolerate concurrent callers from fanned-in pipelines.

pub mod config;
pub mod error;
pub mod matcher;
pub mod stage;
pub mod telemetry;

// Configuration surface
pub use config::{
    AttributeConfig, FilterAction, FilterConfig, MatchConfig, MatchProperties, MatchType,
    RegexOptions, SignalFilter,
};

// Core types and errors
pub use error::{FilterError, Result};
pub use telemetry::{AttributeValue, Record, RecordBatch};

// Matcher system
pub use matcher::{
    MatcherFactory, PatternMatcher, RecordPropertiesMatcher, RegexMatcher, StrictMatcher,
};

// Pipeline stage
pub use stage::{FilterStage, StageState};
