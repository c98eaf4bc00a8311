use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::core::types::Identifier;
use crate::graph::{Graph, Term, Triple};

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to read graph: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse graph: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Serializable snapshot of a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub triples: Vec<Triple>,
}

/// In-memory graph that keeps triples in first-insertion order.
///
/// Insertion order makes serialized output diffable between runs; the
/// semantics are still those of a set.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    triples: Vec<Triple>,

    /// Membership index for duplicate detection
    seen: HashSet<Triple>,

    /// Index: subject -> positions in `triples`
    by_subject: HashMap<Identifier, Vec<usize>>,
}

impl MemoryGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    #[must_use]
    pub fn contains(&self, triple: &Triple) -> bool {
        self.seen.contains(triple)
    }

    /// True if a node-object triple `(subject, predicate, object)` is present
    #[must_use]
    pub fn contains_node(
        &self,
        subject: &Identifier,
        predicate: &Identifier,
        object: &Identifier,
    ) -> bool {
        self.contains(&Triple::new(
            subject.clone(),
            predicate.clone(),
            object.clone(),
        ))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All triples with the given subject, in insertion order
    #[must_use]
    pub fn triples_about(&self, subject: &Identifier) -> Vec<&Triple> {
        self.by_subject
            .get(subject)
            .map(|indices| indices.iter().map(|&i| &self.triples[i]).collect())
            .unwrap_or_default()
    }

    /// Objects of `(subject, predicate, ?)`, in insertion order
    #[must_use]
    pub fn objects(&self, subject: &Identifier, predicate: &Identifier) -> Vec<&Term> {
        self.triples_about(subject)
            .into_iter()
            .filter(|t| &t.predicate == predicate)
            .map(|t| &t.object)
            .collect()
    }

    #[must_use]
    pub fn distinct_subjects(&self) -> usize {
        self.by_subject.len()
    }

    /// Add every triple of `other`; duplicates are skipped.
    /// Returns the number of triples that were new.
    pub fn merge(&mut self, other: MemoryGraph) -> usize {
        other
            .into_triples()
            .into_iter()
            .filter(|t| self.add(t.clone()))
            .count()
    }

    #[must_use]
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }

    /// Export to JSON
    ///
    /// # Errors
    ///
    /// Returns `GraphError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, GraphError> {
        let data = GraphData {
            triples: self.triples.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Rebuild a graph from its JSON export
    ///
    /// # Errors
    ///
    /// Returns `GraphError::ParseError` if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let data: GraphData = serde_json::from_str(json)?;
        let mut graph = Self::new();
        for triple in data.triples {
            graph.add(triple);
        }
        Ok(graph)
    }
}

impl Graph for MemoryGraph {
    fn add(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }
        let index = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(index);
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }
}

impl<'a> IntoIterator for &'a MemoryGraph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
