//! The emission layer: triples and the graphs that accumulate them.
//!
//! Model objects never write anywhere but a [`Graph`]. The only operation a
//! graph must support is a duplicate-tolerant `add`; adding a triple that is
//! already present is a no-op, so emitting the same entity twice is harmless.
//!
//! ## Example
//!
//! ```rust
//! use bioforge::graph::{Graph, MemoryGraph};
//! use bioforge::core::types::Identifier;
//!
//! let mut graph = MemoryGraph::new();
//! let gene = Identifier::new("NCBIGene:1234");
//! let taxon = Identifier::new("NCBITaxon:9606");
//! let in_taxon = Identifier::new("RO:0002162");
//!
//! assert!(graph.add_node(&gene, &in_taxon, &taxon));
//! assert!(!graph.add_node(&gene, &in_taxon, &taxon));
//! assert_eq!(graph.len(), 1);
//! ```

pub mod store;

use serde::{Deserialize, Serialize};

use crate::core::types::Identifier;
use crate::core::vocab;

pub use store::MemoryGraph;

/// A literal value with an optional datatype
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Identifier>,
}

impl Literal {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
        }
    }

    #[must_use]
    pub fn integer(value: u64) -> Self {
        Self {
            value: value.to_string(),
            datatype: Some(vocab::term(vocab::XSD_INTEGER)),
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.datatype {
            Some(datatype) => write!(f, "\"{}\"^^{datatype}", self.value),
            None => write!(f, "\"{}\"", self.value),
        }
    }
}

/// Object position of a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    Node { id: Identifier },
    Literal(Literal),
}

impl Term {
    #[must_use]
    pub fn as_node(&self) -> Option<&Identifier> {
        match self {
            Self::Node { id } => Some(id),
            Self::Literal(_) => None,
        }
    }

    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Node { .. } => None,
            Self::Literal(lit) => Some(lit),
        }
    }
}

impl From<Identifier> for Term {
    fn from(id: Identifier) -> Self {
        Self::Node { id }
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node { id } => write!(f, "{id}"),
            Self::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

/// A single subject-predicate-object statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Identifier,
    pub predicate: Identifier,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Identifier, predicate: Identifier, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// An append-only, duplicate-tolerant collection of triples.
///
/// Writers need `&mut self`; graphs are not shared between threads by this
/// crate. Parallel record processing must funnel its `add` calls through a
/// single owner.
pub trait Graph {
    /// Add a triple. Returns `false` if it was already present.
    fn add(&mut self, triple: Triple) -> bool;

    /// Add a triple whose object is a node
    fn add_node(&mut self, subject: &Identifier, predicate: &Identifier, object: &Identifier) -> bool {
        self.add(Triple::new(subject.clone(), predicate.clone(), object.clone()))
    }

    /// Add a triple whose object is a plain literal
    fn add_literal(&mut self, subject: &Identifier, predicate: &Identifier, value: &str) -> bool {
        self.add(Triple::new(
            subject.clone(),
            predicate.clone(),
            Literal::plain(value),
        ))
    }

    /// Add a triple whose object is a typed literal
    fn add_typed_literal(
        &mut self,
        subject: &Identifier,
        predicate: &Identifier,
        literal: Literal,
    ) -> bool {
        self.add(Triple::new(subject.clone(), predicate.clone(), literal))
    }
}
