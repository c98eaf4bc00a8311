//! Record-at-a-time ingestion.
//!
//! [`Ingest`] feeds parsed records to a handler that turns each one into
//! model objects and emits them. Per-record failures (`ModelError`) are
//! logged and counted, never fatal: one bad row must not abort a source.
//! An optional record limit stops the run early for sampling and tests.
//!
//! Before the first record, an ingest declares the vocabulary's properties
//! and describes its source with a [`Dataset`] node. These header triples
//! are counted apart from the triples records add.
//!
//! ## Example
//!
//! ```rust
//! use bioforge::graph::MemoryGraph;
//! use bioforge::ingest::{emit_feature_record, Ingest, IngestOptions};
//! use bioforge::parsing::records::parse_feature_text;
//!
//! let records = parse_feature_text("NCBIGene:1\tA1BG\tSO:0000704\n", '\t').unwrap();
//!
//! let mut graph = MemoryGraph::new();
//! let mut ingest = Ingest::new(&mut graph, IngestOptions::new("ncbigene"));
//! ingest.process(records, |g, record| emit_feature_record(g, &record, None));
//! let summary = ingest.finish();
//!
//! assert_eq!(summary.records_emitted, 1);
//! ```

pub mod handlers;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::dataset::Dataset;
use crate::core::types::ModelError;
use crate::core::vocab;
use crate::graph::{Graph, Triple};

pub use handlers::{emit_association_record, emit_feature_record, resolve_relation};

/// What happened to a record that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Emitted,
    /// Record carried nothing worth emitting
    Ignored,
}

#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Tag identifying this ingest; part of every association's identity
    pub source: String,
    /// Stop after this many records
    pub limit: Option<usize>,
    /// Provenance node emitted before any record; `None` emits none
    pub dataset: Option<Dataset>,
    /// Declare relationship and model properties before any record
    pub declare_properties: bool,
}

impl IngestOptions {
    /// Options for `source`, with a default dataset named after it
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            dataset: Some(Dataset::new(&source)),
            source,
            limit: None,
            declare_properties: true,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: Option<Dataset>) -> Self {
        self.dataset = dataset;
        self
    }

    #[must_use]
    pub fn with_property_declarations(mut self, declare: bool) -> Self {
        self.declare_properties = declare;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub source: String,
    /// Records handed to the handler (or rejected before it)
    pub records_read: usize,
    pub records_emitted: usize,
    pub records_ignored: usize,
    /// Records skipped for invalid input or ambiguous mappings
    pub records_skipped: usize,
    /// Associations dropped for lack of a predicate
    pub associations_dropped: usize,
    /// True if the run stopped at the record limit
    pub limit_reached: bool,
    /// Property declarations and dataset triples that were new to the graph
    pub header_triples: usize,
    /// Triples from records that were new to the graph
    pub triples_added: usize,
}

/// Counts additions that were new to the wrapped graph
struct CountingGraph<'a, G: Graph + ?Sized> {
    inner: &'a mut G,
    added: usize,
}

impl<G: Graph + ?Sized> Graph for CountingGraph<'_, G> {
    fn add(&mut self, triple: Triple) -> bool {
        let added = self.inner.add(triple);
        if added {
            self.added += 1;
        }
        added
    }
}

pub struct Ingest<'g, G: Graph + ?Sized> {
    graph: &'g mut G,
    options: IngestOptions,
    summary: IngestSummary,
}

impl<'g, G: Graph + ?Sized> Ingest<'g, G> {
    /// Start an ingest, emitting its header triples into `graph`
    pub fn new(graph: &'g mut G, options: IngestOptions) -> Self {
        let mut counting = CountingGraph {
            inner: &mut *graph,
            added: 0,
        };
        if options.declare_properties {
            vocab::declare_properties(&mut counting);
        }
        if let Some(dataset) = &options.dataset {
            dataset.emit(&mut counting);
        }
        let summary = IngestSummary {
            source: options.source.clone(),
            header_triples: counting.added,
            ..IngestSummary::default()
        };
        Self {
            graph,
            options,
            summary,
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.options.source
    }

    #[must_use]
    pub fn summary(&self) -> &IngestSummary {
        &self.summary
    }

    /// Process records in order until they run out or the limit is hit.
    ///
    /// Records may already be errors (rows that failed to parse); those are
    /// logged and skipped like handler failures. Can be called several times
    /// (e.g. once per input file); the limit applies across calls.
    pub fn process<I, R, F>(&mut self, records: I, mut handler: F)
    where
        I: IntoIterator<Item = Result<R, ModelError>>,
        F: FnMut(&mut dyn Graph, R) -> Result<RecordOutcome, ModelError>,
    {
        for record in records {
            if self.limit_hit() {
                self.summary.limit_reached = true;
                info!(
                    "Reached record limit of {} for {}; stopping",
                    self.summary.records_read, self.options.source
                );
                break;
            }
            self.summary.records_read += 1;

            let mut counting = CountingGraph {
                inner: &mut *self.graph,
                added: 0,
            };
            let result = record.and_then(|r| handler(&mut counting, r));
            self.summary.triples_added += counting.added;

            match result {
                Ok(RecordOutcome::Emitted) => self.summary.records_emitted += 1,
                Ok(RecordOutcome::Ignored) => self.summary.records_ignored += 1,
                Err(e) => self.record_failure(&e),
            }
        }
    }

    fn limit_hit(&self) -> bool {
        self.options
            .limit
            .is_some_and(|limit| self.summary.records_read >= limit)
    }

    fn record_failure(&mut self, error: &ModelError) {
        match error {
            ModelError::UnresolvedPredicate { .. } => {
                self.summary.associations_dropped += 1;
                warn!("[{}] Dropping association: {error}", self.options.source);
            }
            ModelError::AmbiguousMapping { .. } | ModelError::InvalidInput(_) => {
                self.summary.records_skipped += 1;
                warn!("[{}] Skipping record: {error}", self.options.source);
            }
        }
    }

    /// Finish the run and return its summary
    pub fn finish(self) -> IngestSummary {
        debug!(
            "[{}] {} records read, {} emitted, {} skipped, {} associations dropped, {} triples added",
            self.summary.source,
            self.summary.records_read,
            self.summary.records_emitted,
            self.summary.records_skipped,
            self.summary.associations_dropped,
            self.summary.triples_added
        );
        self.summary
    }
}
