//! Genomic features (genes, variants, chromosome bands, ...).
//!
//! A [`Feature`] is a transient builder: a record handler creates one, sets
//! whatever coordinates the source provides, emits it, and drops it. All
//! features are modeled as individuals typed with a Sequence Ontology class.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::position::{
    make_chrom_id, normalize_chrom_label, shares_reference, Position, Region, Strand,
};
use crate::core::types::{Identifier, ModelError};
use crate::core::vocab;
use crate::graph::Graph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: Identifier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Ontology class (usually SO)
    pub feature_type: Identifier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<Position>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<Position>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    taxon: Option<Identifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<Identifier>,
}

impl Feature {
    pub fn new(id: Identifier, label: Option<String>, feature_type: Identifier) -> Self {
        Self {
            id,
            label,
            feature_type,
            description: None,
            start: None,
            end: None,
            taxon: None,
            parent: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the start position of this feature.
    ///
    /// Returns the stored position so callers can read back the strand type
    /// it was classified with.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidInput` if `reference` is empty.
    pub fn set_start(
        &mut self,
        coordinate: u64,
        reference: Identifier,
        strand: Strand,
        position_types: impl IntoIterator<Item = Identifier>,
    ) -> Result<&Position, ModelError> {
        let position = Position::new(reference, coordinate, strand, position_types)?;
        self.check_references(Some(&position), self.end.as_ref());
        Ok(self.start.insert(position))
    }

    /// Set the end position of this feature.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidInput` if `reference` is empty.
    pub fn set_end(
        &mut self,
        coordinate: u64,
        reference: Identifier,
        strand: Strand,
        position_types: impl IntoIterator<Item = Identifier>,
    ) -> Result<&Position, ModelError> {
        let position = Position::new(reference, coordinate, strand, position_types)?;
        self.check_references(self.start.as_ref(), Some(&position));
        Ok(self.end.insert(position))
    }

    // Start and end keep their own references; a mismatch is reported, not corrected.
    fn check_references(&self, start: Option<&Position>, end: Option<&Position>) {
        if shares_reference(start, end) {
            return;
        }
        if let (Some(s), Some(e)) = (start, end) {
            warn!(
                "Feature {} starts on {} but ends on {}",
                self.id,
                s.reference(),
                e.reference()
            );
        }
    }

    #[must_use]
    pub fn start(&self) -> Option<&Position> {
        self.start.as_ref()
    }

    #[must_use]
    pub fn end(&self) -> Option<&Position> {
        self.end.as_ref()
    }

    #[must_use]
    pub fn taxon(&self) -> Option<&Identifier> {
        self.taxon.as_ref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Identifier> {
        self.parent.as_ref()
    }

    /// The region spanned by this feature, if any coordinate is known
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidInput` if the feature identifier is empty.
    pub fn region(&self) -> Result<Option<Region>, ModelError> {
        if self.start.is_none() && self.end.is_none() {
            return Ok(None);
        }
        Region::new(&self.id, self.start.clone(), self.end.clone()).map(Some)
    }

    /// Add this feature's triples to `graph`:
    ///
    /// ```text
    /// feature  a <type> ; rdfs:label "..." ; dcterms:description "..."
    /// feature  faldo:location region            (only when a coordinate is set)
    /// region   a faldo:Region ; faldo:begin ... ; faldo:end ...
    /// ```
    ///
    /// Type and label are emitted even when no coordinates are set. Any taxon
    /// or parent already recorded is emitted again; the graph ignores repeats.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidInput` if the feature identifier is empty.
    pub fn emit<G: Graph + ?Sized>(&self, graph: &mut G) -> Result<Identifier, ModelError> {
        if self.id.is_empty() {
            return Err(ModelError::invalid("feature has no identifier"));
        }

        graph.add_node(&self.id, &vocab::term(vocab::RDF_TYPE), &self.feature_type);
        if let Some(label) = &self.label {
            graph.add_literal(&self.id, &vocab::term(vocab::RDFS_LABEL), label);
        }
        if let Some(description) = &self.description {
            graph.add_literal(&self.id, &vocab::term(vocab::DC_DESCRIPTION), description);
        }

        if let Some(region) = self.region()? {
            let region_id = region.emit(graph);
            graph.add_node(&self.id, &vocab::term(vocab::FALDO_LOCATION), &region_id);
        }

        if let Some(taxon) = &self.taxon {
            graph.add_node(&self.id, &vocab::term(vocab::IN_TAXON), taxon);
        }
        if let Some(parent) = &self.parent {
            graph.add_node(&self.id, &vocab::term(vocab::IS_SUBSEQUENCE_OF), parent);
        }

        debug!("Emitted feature {}", self.id);
        Ok(self.id.clone())
    }

    /// `feature is_subsequence_of parent`. No cycle detection is done.
    pub fn add_subsequence_of<G: Graph + ?Sized>(&mut self, graph: &mut G, parent: Identifier) {
        graph.add_node(&self.id, &vocab::term(vocab::IS_SUBSEQUENCE_OF), &parent);
        self.parent = Some(parent);
    }

    /// `feature in_taxon taxon`
    pub fn add_taxon<G: Graph + ?Sized>(&mut self, graph: &mut G, taxon: Identifier) {
        if let Some(existing) = &self.taxon {
            if existing != &taxon {
                warn!(
                    "Feature {} already asserted in taxon {existing}; adding {taxon}",
                    self.id
                );
            }
        }
        graph.add_node(&self.id, &vocab::term(vocab::IN_TAXON), &taxon);
        self.taxon = Some(taxon);
    }
}

/// Build a chromosome feature scoped to a taxon.
///
/// ```text
/// :9606chr1  a SO:0000340 ; rdfs:label "chr1" ; RO:0002162 NCBITaxon:9606
/// ```
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if the label is empty once
/// chromosome-name prefixes are removed.
pub fn chromosome_feature(chrom: &str, taxon: Option<&str>) -> Result<Feature, ModelError> {
    let id = make_chrom_id(chrom, taxon)?;
    let label = format!("chr{}", normalize_chrom_label(chrom));
    let mut feature = Feature::new(id, Some(label), vocab::term(vocab::SO_CHROMOSOME));
    if let Some(t) = taxon.map(str::trim).filter(|t| !t.is_empty()) {
        feature.taxon = Some(taxon_curie(t));
    }
    Ok(feature)
}

/// Taxon as a node: bare numbers are NCBI taxa, anything with a prefix is
/// kept as written
#[must_use]
pub fn taxon_curie(taxon: &str) -> Identifier {
    let taxon = taxon.trim();
    if taxon.contains(':') {
        Identifier::new(taxon)
    } else {
        Identifier::new(format!("NCBITaxon:{taxon}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;
    use tracing_test::traced_test;

    fn gene() -> Feature {
        Feature::new(
            Identifier::new("NCBIGene:3630"),
            Some("INS".to_string()),
            Identifier::new("SO:0000704"),
        )
    }

    fn chr(s: &str) -> Identifier {
        Identifier::new(s)
    }

    #[test]
    fn test_emit_without_coordinates() {
        let mut graph = MemoryGraph::new();
        let id = gene().emit(&mut graph).unwrap();

        assert_eq!(graph.len(), 2);
        assert!(graph.contains_node(&id, &vocab::term(vocab::RDF_TYPE), &chr("SO:0000704")));
        assert!(graph
            .objects(&id, &vocab::term(vocab::FALDO_LOCATION))
            .is_empty());
        assert!(graph.iter().all(|t| !t.subject.is_anonymous()));
    }

    #[test]
    fn test_emit_with_start_only() {
        let mut feature = gene();
        feature
            .set_start(2_159_779, chr(":9606chr11"), Strand::Minus, [])
            .unwrap();

        let mut graph = MemoryGraph::new();
        let id = feature.emit(&mut graph).unwrap();

        let regions = graph.objects(&id, &vocab::term(vocab::FALDO_LOCATION));
        assert_eq!(regions.len(), 1);
        let region = regions[0].as_node().unwrap().clone();

        assert_eq!(graph.objects(&region, &vocab::term(vocab::FALDO_BEGIN)).len(), 1);
        assert!(graph.objects(&region, &vocab::term(vocab::FALDO_END)).is_empty());
    }

    #[test]
    fn test_emit_with_start_and_end() {
        let mut feature = gene();
        feature.set_start(100, chr(":9606chr11"), Strand::Plus, []).unwrap();
        feature.set_end(200, chr(":9606chr11"), Strand::Plus, []).unwrap();

        let mut graph = MemoryGraph::new();
        feature.emit(&mut graph).unwrap();

        // type, label, location, region type, begin, end, 2 x (strand, position, reference)
        assert_eq!(graph.len(), 12);
    }

    #[test]
    fn test_emit_is_idempotent() {
        let mut feature = gene();
        feature.set_start(100, chr(":9606chr11"), Strand::Plus, []).unwrap();

        let mut graph = MemoryGraph::new();
        feature.emit(&mut graph).unwrap();
        let before = graph.len();
        feature.emit(&mut graph).unwrap();
        assert_eq!(graph.len(), before);
    }

    #[test]
    fn test_set_start_returns_strand_type() {
        let mut feature = gene();
        let position = feature.set_start(5, chr("chr1"), Strand::Unspecified, []).unwrap();
        assert_eq!(position.strand_type(), vocab::term(vocab::FALDO_BOTH_STRAND));
    }

    #[test]
    #[traced_test]
    fn test_end_uses_its_own_reference() {
        let mut feature = gene();
        feature.set_start(100, chr("chrA"), Strand::Plus, []).unwrap();
        feature.set_end(200, chr("chrB"), Strand::Plus, []).unwrap();

        let mut graph = MemoryGraph::new();
        let id = feature.emit(&mut graph).unwrap();
        let region = graph.objects(&id, &vocab::term(vocab::FALDO_LOCATION))[0]
            .as_node()
            .unwrap()
            .clone();
        let end = graph.objects(&region, &vocab::term(vocab::FALDO_END))[0]
            .as_node()
            .unwrap()
            .clone();

        assert!(graph.contains_node(&end, &vocab::term(vocab::FALDO_REFERENCE), &chr("chrB")));
        assert_eq!(feature.end().unwrap().id(), &end);
        assert!(logs_contain("starts on chrA but ends on chrB"));
    }

    #[test]
    fn test_two_features_share_position_nodes_not_regions() {
        let mut a = gene();
        let mut b = Feature::new(chr("NCBIGene:1"), None, chr("SO:0000704"));
        a.set_start(100, chr("chr1"), Strand::Plus, []).unwrap();
        b.set_start(100, chr("chr1"), Strand::Plus, []).unwrap();

        assert_eq!(a.start().unwrap().id(), b.start().unwrap().id());
        assert_ne!(
            a.region().unwrap().unwrap().id(),
            b.region().unwrap().unwrap().id()
        );
    }

    #[test]
    fn test_add_subsequence_of() {
        let mut graph = MemoryGraph::new();
        let mut feature = gene();
        feature.add_subsequence_of(&mut graph, chr(":9606chr11p15.5"));
        assert!(graph.contains_node(
            &feature.id,
            &vocab::term(vocab::IS_SUBSEQUENCE_OF),
            &chr(":9606chr11p15.5")
        ));
        assert_eq!(feature.parent(), Some(&chr(":9606chr11p15.5")));
    }

    #[test]
    #[traced_test]
    fn test_add_taxon_twice_adds_second_triple() {
        let mut graph = MemoryGraph::new();
        let mut feature = gene();
        feature.add_taxon(&mut graph, chr("NCBITaxon:9606"));
        feature.add_taxon(&mut graph, chr("NCBITaxon:9606"));
        assert_eq!(graph.len(), 1);

        feature.add_taxon(&mut graph, chr("NCBITaxon:10090"));
        assert_eq!(graph.len(), 2);
        assert!(logs_contain("already asserted in taxon NCBITaxon:9606"));
    }

    #[test]
    fn test_emit_requires_identifier() {
        let feature = Feature::new(chr(""), None, chr("SO:0000704"));
        let mut graph = MemoryGraph::new();
        assert!(feature.emit(&mut graph).is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_chromosome_feature() {
        let feature = chromosome_feature("chromosome_X", Some("10090")).unwrap();
        assert_eq!(feature.id.as_str(), ":10090chrX");
        assert_eq!(feature.label.as_deref(), Some("chrX"));
        assert_eq!(feature.taxon(), Some(&chr("NCBITaxon:10090")));

        let mut graph = MemoryGraph::new();
        feature.emit(&mut graph).unwrap();
        assert!(graph.contains_node(
            &feature.id,
            &vocab::term(vocab::IN_TAXON),
            &chr("NCBITaxon:10090")
        ));
    }

    #[test]
    fn test_taxon_curie() {
        assert_eq!(taxon_curie("9606"), chr("NCBITaxon:9606"));
        assert_eq!(taxon_curie(" NCBITaxon:10090 "), chr("NCBITaxon:10090"));
        assert_eq!(taxon_curie("taxon:9606"), chr("taxon:9606"));
    }

    #[test]
    #[traced_test]
    fn test_matching_references_do_not_warn() {
        let mut feature = gene();
        feature.set_start(100, chr("chrA"), Strand::Plus, []).unwrap();
        feature.set_end(200, chr("chrA"), Strand::Plus, []).unwrap();
        assert!(feature.region().unwrap().unwrap().shares_reference());
        assert!(!logs_contain("starts on"));
    }
}
