//! Evidence-backed associations between two entities.
//!
//! Every association is emitted twice over: once as the direct statement
//! `subject predicate object`, and once as a reified OBAN association node
//! carrying the evidence codes and source citations:
//!
//! ```text
//! subject  predicate  object
//! assoc    a OBAN:association
//!          OBAN:association_has_subject   subject
//!          OBAN:association_has_predicate predicate
//!          OBAN:association_has_object    object
//!          RO:0002558                     evidence (each)
//!          dcterms:source                 source (each)
//! ```
//!
//! The association node's identifier is minted from the claim plus the tag
//! of the ingest that asserted it, so the same claim from two sources yields
//! two association nodes.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::types::{Identifier, ModelError};
use crate::core::vocab;
use crate::graph::Graph;
use crate::utils::digest::mint;

/// Namespace for minted association identifiers
pub const ASSOCIATION_NAMESPACE: &str = "association";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    /// Tag of the ingest asserting this association
    pub source_tag: String,

    pub subject: Identifier,

    pub object: Identifier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Identifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    evidence: Vec<Identifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sources: Vec<Identifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Association {
    /// Create an association with no predicate yet
    pub fn new(source_tag: impl Into<String>, subject: Identifier, object: Identifier) -> Self {
        Self {
            source_tag: source_tag.into(),
            subject,
            object,
            predicate: None,
            evidence: Vec::new(),
            sources: Vec::new(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: Identifier) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn set_relationship(&mut self, predicate: Identifier) {
        self.predicate = Some(predicate);
    }

    /// Add an evidence code. Repeats are ignored.
    pub fn add_evidence(&mut self, evidence: Identifier) {
        if !self.evidence.contains(&evidence) {
            self.evidence.push(evidence);
        }
    }

    /// Add a source citation. Repeats are ignored.
    pub fn add_source(&mut self, source: Identifier) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Evidence codes in insertion order
    #[must_use]
    pub fn evidence(&self) -> &[Identifier] {
        &self.evidence
    }

    /// Source citations in insertion order
    #[must_use]
    pub fn sources(&self) -> &[Identifier] {
        &self.sources
    }

    /// The association's own identifier.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnresolvedPredicate` if no predicate is set.
    pub fn id(&self) -> Result<Identifier, ModelError> {
        let Some(predicate) = &self.predicate else {
            return Err(self.unresolved());
        };
        mint(
            &[
                self.subject.as_str(),
                predicate.as_str(),
                self.object.as_str(),
                self.source_tag.as_str(),
            ],
            ASSOCIATION_NAMESPACE,
        )
    }

    fn unresolved(&self) -> ModelError {
        ModelError::UnresolvedPredicate {
            subject: self.subject.to_string(),
            object: self.object.to_string(),
            relation: String::new(),
        }
    }

    /// Add the association's triples to `graph`.
    ///
    /// An association without a predicate says nothing usable: it adds no
    /// triples, logs one warning and returns `None`.
    pub fn emit<G: Graph + ?Sized>(&self, graph: &mut G) -> Option<Identifier> {
        let Some(predicate) = &self.predicate else {
            warn!(
                "Dropping association {} -> {} from {}: no predicate ({} evidence, {} sources)",
                self.subject,
                self.object,
                self.source_tag,
                self.evidence.len(),
                self.sources.len()
            );
            return None;
        };
        let id = match self.id() {
            Ok(id) => id,
            Err(e) => {
                warn!("Dropping association {} -> {}: {e}", self.subject, self.object);
                return None;
            }
        };

        graph.add_node(&self.subject, predicate, &self.object);

        graph.add_node(
            &id,
            &vocab::term(vocab::RDF_TYPE),
            &vocab::term(vocab::OBAN_ASSOCIATION),
        );
        graph.add_node(&id, &vocab::term(vocab::OBAN_HAS_SUBJECT), &self.subject);
        graph.add_node(&id, &vocab::term(vocab::OBAN_HAS_PREDICATE), predicate);
        graph.add_node(&id, &vocab::term(vocab::OBAN_HAS_OBJECT), &self.object);

        for evidence in &self.evidence {
            graph.add_node(&id, &vocab::term(vocab::HAS_EVIDENCE), evidence);
        }
        for source in &self.sources {
            graph.add_node(&id, &vocab::term(vocab::DC_SOURCE), source);
        }
        if let Some(description) = &self.description {
            graph.add_literal(&id, &vocab::term(vocab::DC_DESCRIPTION), description);
        }

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{MemoryGraph, Term};
    use tracing_test::traced_test;

    fn id(s: &str) -> Identifier {
        Identifier::new(s)
    }

    fn gene_phenotype(source: &str) -> Association {
        Association::new(source, id("NCBIGene:3630"), id("HP:0000819"))
            .with_predicate(id("RO:0002200"))
    }

    #[test]
    fn test_emit_full_association() {
        let mut assoc = gene_phenotype("ctd");
        assoc.add_evidence(id("ECO:0000033"));
        assoc.add_source(id("PMID:12345"));
        assoc.set_description("seen in two cohorts");

        let mut graph = MemoryGraph::new();
        let node = assoc.emit(&mut graph).unwrap();

        assert!(graph.contains_node(&id("NCBIGene:3630"), &id("RO:0002200"), &id("HP:0000819")));
        assert!(graph.contains_node(
            &node,
            &vocab::term(vocab::RDF_TYPE),
            &vocab::term(vocab::OBAN_ASSOCIATION)
        ));
        assert!(graph.contains_node(&node, &vocab::term(vocab::HAS_EVIDENCE), &id("ECO:0000033")));
        assert!(graph.contains_node(&node, &vocab::term(vocab::DC_SOURCE), &id("PMID:12345")));
        // direct + type + subject/predicate/object + evidence + source + description
        assert_eq!(graph.len(), 8);
    }

    #[test]
    #[traced_test]
    fn test_emit_without_predicate_is_dropped() {
        let mut assoc = Association::new("ctd", id("NCBIGene:3630"), id("HP:0000819"));
        assoc.add_evidence(id("ECO:0000033"));
        assoc.add_source(id("PMID:12345"));

        let mut graph = MemoryGraph::new();
        assert!(assoc.emit(&mut graph).is_none());
        assert!(graph.is_empty());

        logs_assert(|lines: &[&str]| {
            let warnings = lines.iter().filter(|line| line.contains("WARN")).count();
            if warnings == 1 {
                Ok(())
            } else {
                Err(format!("expected exactly one warning, found {warnings}"))
            }
        });
        assert!(logs_contain("NCBIGene:3630 -> HP:0000819"));
    }

    #[test]
    fn test_id_requires_predicate() {
        let assoc = Association::new("ctd", id("a:1"), id("b:1"));
        assert!(matches!(
            assoc.id(),
            Err(ModelError::UnresolvedPredicate { .. })
        ));
    }

    #[test]
    fn test_same_claim_same_source_same_id() {
        assert_eq!(
            gene_phenotype("ctd").id().unwrap(),
            gene_phenotype("ctd").id().unwrap()
        );
    }

    #[test]
    fn test_provenance_is_part_of_identity() {
        assert_ne!(
            gene_phenotype("ctd").id().unwrap(),
            gene_phenotype("hpoa").id().unwrap()
        );
    }

    #[test]
    fn test_subject_object_order_matters() {
        let forward = Association::new("ctd", id("a:1"), id("b:1")).with_predicate(id("RO:1"));
        let reverse = Association::new("ctd", id("b:1"), id("a:1")).with_predicate(id("RO:1"));
        assert_ne!(forward.id().unwrap(), reverse.id().unwrap());
    }

    #[test]
    fn test_evidence_and_sources_deduplicated_in_order() {
        let mut assoc = gene_phenotype("ctd");
        assoc.add_evidence(id("ECO:2"));
        assoc.add_evidence(id("ECO:1"));
        assoc.add_evidence(id("ECO:2"));
        assoc.add_source(id("PMID:1"));
        assoc.add_source(id("PMID:1"));

        assert_eq!(assoc.evidence(), &[id("ECO:2"), id("ECO:1")]);
        assert_eq!(assoc.sources(), &[id("PMID:1")]);

        let mut graph = MemoryGraph::new();
        let node = assoc.emit(&mut graph).unwrap();
        let emitted = graph.objects(&node, &vocab::term(vocab::HAS_EVIDENCE));
        assert_eq!(
            emitted,
            vec![&Term::from(id("ECO:2")), &Term::from(id("ECO:1"))]
        );
    }

    #[test]
    fn test_set_relationship_after_creation() {
        let mut assoc = Association::new("ctd", id("a:1"), id("b:1"));
        assoc.set_relationship(id("RO:0002200"));
        let mut graph = MemoryGraph::new();
        assert!(assoc.emit(&mut graph).is_some());
    }

    #[test]
    fn test_two_sources_two_association_nodes() {
        let mut graph = MemoryGraph::new();
        let a = gene_phenotype("ctd").emit(&mut graph).unwrap();
        let b = gene_phenotype("hpoa").emit(&mut graph).unwrap();
        assert_ne!(a, b);
        // the direct statement is shared
        assert_eq!(graph.len(), 1 + 4 + 4);
    }
}
