//! In-memory telemetry data model consumed by the filtering engine.
//!
//! A [`Record`] is a span or metric data point; a [`RecordBatch`] is an
//! ordered group of records sharing one origin/service context. The engine
//! never creates records, it only drops them, so the model stays minimal:
//! a name plus a typed attribute map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Typed attribute value carried by records and resources.
///
/// Modeled as an explicit tagged union with one variant per supported
/// primitive. Equality is defined only between identical variants;
/// comparing across variants is a non-match, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
}

impl AttributeValue {
    /// Convert a JSON scalar into a typed attribute value.
    ///
    /// Non-scalar values (arrays, objects, null) have no attribute
    /// representation and yield `None`. Whole numbers map to `Int`,
    /// everything else numeric maps to `Double`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(AttributeValue::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(AttributeValue::Int)
                .or_else(|| n.as_f64().map(AttributeValue::Double)),
            serde_json::Value::String(s) => Some(AttributeValue::String(s.clone())),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// A single span or metric data point flowing through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Span name or metric name.
    pub name: String,

    /// Typed key/value attributes attached to the record.
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
}

impl Record {
    /// Create a record with the given name and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
        }
    }

    /// Builder-style attribute attachment.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// An ordered group of records sharing one origin/service context.
///
/// Batch-level metadata (service name, resource attributes) passes through
/// a filter stage unmodified; only the record list shrinks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordBatch {
    /// Origin/service identifier shared by every record in the batch.
    pub service_name: String,

    /// Resource-level attributes describing the origin.
    #[serde(default)]
    pub resource: HashMap<String, AttributeValue>,

    /// The records, in arrival order.
    #[serde(default)]
    pub records: Vec<Record>,
}

impl RecordBatch {
    /// Create an empty batch for the given service.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            resource: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Create a batch from a list of records.
    pub fn with_records(service_name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            service_name: service_name.into(),
            resource: HashMap::new(),
            records,
        }
    }

    /// Append a record, preserving arrival order.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record names in batch order, mainly useful in tests.
    pub fn record_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }
}
