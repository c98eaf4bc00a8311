//! Strand-aware genomic coordinates following the FALDO model.
//!
//! A feature is located on a [`Region`], which begins and/or ends at a
//! [`Position`]. Each position carries a coordinate, the reference sequence it
//! lies on, and a strand classification expressed as its `rdf:type`:
//!
//! ```text
//! feature  faldo:location  region
//! region   a faldo:Region ; faldo:begin pos1 ; faldo:end pos2
//! pos1     a faldo:BothStrandPosition ; faldo:position 100 ; faldo:reference chr
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::warn;

use crate::core::types::{Identifier, ModelError};
use crate::core::vocab;
use crate::graph::{Graph, Literal};
use crate::utils::digest::mint;

/// Namespace for minted position identifiers
pub const POSITION_NAMESPACE: &str = "position";

/// Namespace for minted region identifiers
pub const REGION_NAMESPACE: &str = "region";

/// Leading chromosome-name prefixes: chr, chrom, chromosome, ...
static CHROM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:chromosome|chrom|chr)[_ ]*").expect("valid regex"));

/// Strand of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strand {
    Plus,
    Minus,
    Both,
    /// Not stated in the source; modeled as both strands
    #[default]
    Unspecified,
}

impl Strand {
    /// Parse a strand token as found in tabular sources.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidInput` for tokens other than `+`, `-`,
    /// `.`, `?` or empty.
    pub fn parse(token: Option<&str>) -> Result<Self, ModelError> {
        match token.map(str::trim) {
            None | Some("" | "?") => Ok(Self::Unspecified),
            Some("+" | "plus") => Ok(Self::Plus),
            Some("-" | "minus") => Ok(Self::Minus),
            Some("." | "both") => Ok(Self::Both),
            Some(other) => Err(ModelError::invalid(format!(
                "unresolvable strand token '{other}'"
            ))),
        }
    }

    /// The FALDO position class for this strand.
    /// An unspecified strand is the union type, not an absence.
    #[must_use]
    pub fn position_type(self) -> Identifier {
        match self {
            Self::Plus => vocab::term(vocab::FALDO_PLUS_STRAND),
            Self::Minus => vocab::term(vocab::FALDO_MINUS_STRAND),
            Self::Both | Self::Unspecified => vocab::term(vocab::FALDO_BOTH_STRAND),
        }
    }
}

/// A single coordinate on a reference sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    id: Identifier,
    reference: Identifier,
    coordinate: u64,
    strand: Strand,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extra_types: Vec<Identifier>,
}

impl Position {
    /// Build a position. Its identifier is minted from `(reference, coordinate)`,
    /// so positions at the same place on the same reference share a node.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidInput` if `reference` is empty.
    pub fn new(
        reference: Identifier,
        coordinate: u64,
        strand: Strand,
        extra_types: impl IntoIterator<Item = Identifier>,
    ) -> Result<Self, ModelError> {
        if reference.is_empty() {
            return Err(ModelError::invalid(format!(
                "position at {coordinate} has no reference"
            )));
        }
        let id = mint(
            &[reference.as_str(), coordinate.to_string().as_str()],
            POSITION_NAMESPACE,
        )?;

        let mut types: Vec<Identifier> = Vec::new();
        for t in extra_types {
            if !types.contains(&t) {
                types.push(t);
            }
        }

        Ok(Self {
            id,
            reference,
            coordinate,
            strand,
            extra_types: types,
        })
    }

    #[must_use]
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    #[must_use]
    pub fn reference(&self) -> &Identifier {
        &self.reference
    }

    #[must_use]
    pub fn coordinate(&self) -> u64 {
        self.coordinate
    }

    #[must_use]
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// The FALDO strand class this position is typed with
    #[must_use]
    pub fn strand_type(&self) -> Identifier {
        self.strand.position_type()
    }

    #[must_use]
    pub fn extra_types(&self) -> &[Identifier] {
        &self.extra_types
    }

    /// Add this position's triples to `graph` and return its identifier
    pub fn emit<G: Graph + ?Sized>(&self, graph: &mut G) -> Identifier {
        let rdf_type = vocab::term(vocab::RDF_TYPE);
        graph.add_node(&self.id, &rdf_type, &self.strand_type());
        for t in &self.extra_types {
            graph.add_node(&self.id, &rdf_type, t);
        }
        graph.add_typed_literal(
            &self.id,
            &vocab::term(vocab::FALDO_POSITION),
            Literal::integer(self.coordinate),
        );
        graph.add_node(&self.id, &vocab::term(vocab::FALDO_REFERENCE), &self.reference);
        self.id.clone()
    }
}

/// A region bounded by optional begin and end positions.
///
/// A region belongs to exactly one feature: its identifier is minted from
/// the owning feature's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    id: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    begin: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<Position>,
}

impl Region {
    /// # Errors
    ///
    /// Returns `ModelError::InvalidInput` if `owner` is empty.
    pub fn new(
        owner: &Identifier,
        begin: Option<Position>,
        end: Option<Position>,
    ) -> Result<Self, ModelError> {
        let id = mint(&[owner.as_str()], REGION_NAMESPACE)?;
        Ok(Self { id, begin, end })
    }

    #[must_use]
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    #[must_use]
    pub fn begin(&self) -> Option<&Position> {
        self.begin.as_ref()
    }

    #[must_use]
    pub fn end(&self) -> Option<&Position> {
        self.end.as_ref()
    }

    /// False only when both ends are present and lie on different references
    #[must_use]
    pub fn shares_reference(&self) -> bool {
        shares_reference(self.begin.as_ref(), self.end.as_ref())
    }

    /// Add the region and its positions. Absent ends emit nothing.
    pub fn emit<G: Graph + ?Sized>(&self, graph: &mut G) -> Identifier {
        graph.add_node(
            &self.id,
            &vocab::term(vocab::RDF_TYPE),
            &vocab::term(vocab::FALDO_REGION),
        );
        if let Some(begin) = &self.begin {
            let pos = begin.emit(graph);
            graph.add_node(&self.id, &vocab::term(vocab::FALDO_BEGIN), &pos);
        }
        if let Some(end) = &self.end {
            let pos = end.emit(graph);
            graph.add_node(&self.id, &vocab::term(vocab::FALDO_END), &pos);
        }
        self.id.clone()
    }
}

/// False only when both positions are present and lie on different references
#[must_use]
pub fn shares_reference(begin: Option<&Position>, end: Option<&Position>) -> bool {
    match (begin, end) {
        (Some(b), Some(e)) => b.reference == e.reference,
        _ => true,
    }
}

/// Make a taxon-scoped chromosome identifier in the base namespace.
///
/// This is a plain string transform, not a digest, so identifiers stay
/// legible: `Homo sapiens (9606) chr1 ==> :9606chr1`. Chromosome-name
/// prefixes are stripped first, so `chr1`, `chrom1` and `1` agree.
///
/// # Examples
///
/// ```
/// use bioforge::core::position::make_chrom_id;
///
/// let human = make_chrom_id("chr1", Some("9606")).unwrap();
/// assert_eq!(human.as_str(), ":9606chr1");
/// assert_eq!(make_chrom_id("1", Some("NCBITaxon:9606")).unwrap(), human);
/// assert_ne!(make_chrom_id("chr1", Some("10090")).unwrap(), human);
/// ```
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if nothing is left of the label once
/// the prefix is removed.
pub fn make_chrom_id(chrom: &str, taxon: Option<&str>) -> Result<Identifier, ModelError> {
    let label = normalize_chrom_label(chrom);
    if label.is_empty() {
        return Err(ModelError::invalid(format!(
            "chromosome label '{chrom}' is empty after normalization"
        )));
    }

    let taxon = match taxon.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => taxon_number(t).to_string(),
        None => {
            warn!("No taxon for chromosome '{chrom}'; identifier is not taxon-scoped");
            String::new()
        }
    };

    Ok(Identifier::new(format!(":{taxon}chr{label}")))
}

// Any CURIE prefix or IRI path is dropped: `NCBITaxon:9606`, `taxon:9606`
// and `.../NCBITaxon_9606` all scope to `9606`.
fn taxon_number(taxon: &str) -> &str {
    let id = Identifier::new(taxon);
    if id.is_iri() {
        return taxon.rsplit(['/', '_', '#']).next().unwrap_or(taxon);
    }
    taxon.split_once(':').map_or(taxon, |(_, local)| local)
}

/// Strip chromosome-name prefixes (`chr`, `chrom`, `chromosome`, ...)
#[must_use]
pub fn normalize_chrom_label(chrom: &str) -> String {
    CHROM_PREFIX.replace(chrom.trim(), "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{MemoryGraph, Term};

    fn pos(reference: &str, coordinate: u64) -> Position {
        Position::new(
            Identifier::new(reference),
            coordinate,
            Strand::Unspecified,
            [],
        )
        .unwrap()
    }

    #[test]
    fn test_strand_parse() {
        assert_eq!(Strand::parse(Some("+")).unwrap(), Strand::Plus);
        assert_eq!(Strand::parse(Some("-")).unwrap(), Strand::Minus);
        assert_eq!(Strand::parse(Some(".")).unwrap(), Strand::Both);
        assert_eq!(Strand::parse(None).unwrap(), Strand::Unspecified);
        assert_eq!(Strand::parse(Some("")).unwrap(), Strand::Unspecified);
        assert!(matches!(
            Strand::parse(Some("x")),
            Err(ModelError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unspecified_strand_is_both() {
        assert_eq!(
            Strand::Unspecified.position_type(),
            vocab::term(vocab::FALDO_BOTH_STRAND)
        );
        assert_eq!(
            Strand::Plus.position_type(),
            vocab::term(vocab::FALDO_PLUS_STRAND)
        );
    }

    #[test]
    fn test_position_scenario_emits_three_triples() {
        let mut graph = MemoryGraph::new();
        let position = pos("5", 21_259_029);
        let id = position.emit(&mut graph);

        assert_eq!(graph.len(), 3);
        assert!(graph.contains_node(
            &id,
            &vocab::term(vocab::RDF_TYPE),
            &vocab::term(vocab::FALDO_BOTH_STRAND)
        ));
        assert_eq!(
            graph.objects(&id, &vocab::term(vocab::FALDO_POSITION)),
            vec![&Term::from(Literal::integer(21_259_029))]
        );
        assert!(graph.contains_node(
            &id,
            &vocab::term(vocab::FALDO_REFERENCE),
            &Identifier::new("5")
        ));

        // Same input, same node, nothing new
        let again = pos("5", 21_259_029);
        assert_eq!(again.emit(&mut graph), id);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_position_shared_between_features() {
        assert_eq!(pos("chr1", 100).id(), pos("chr1", 100).id());
        assert_ne!(pos("chr1", 100).id(), pos("chr2", 100).id());
        assert_ne!(pos("chr1", 100).id(), pos("chr1", 101).id());
    }

    #[test]
    fn test_position_extra_types_deduplicated() {
        let position = Position::new(
            Identifier::new("chr1"),
            1,
            Strand::Plus,
            [Identifier::new("faldo:ExactPosition"), Identifier::new("faldo:ExactPosition")],
        )
        .unwrap();
        assert_eq!(position.extra_types().len(), 1);

        let mut graph = MemoryGraph::new();
        position.emit(&mut graph);
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn test_position_requires_reference() {
        let result = Position::new(Identifier::new(""), 1, Strand::Plus, []);
        assert!(matches!(result, Err(ModelError::InvalidInput(_))));
    }

    #[test]
    fn test_region_partial() {
        let owner = Identifier::new("NCBIGene:1");
        let region = Region::new(&owner, Some(pos("chr1", 10)), None).unwrap();

        let mut graph = MemoryGraph::new();
        let id = region.emit(&mut graph);

        assert_eq!(graph.objects(&id, &vocab::term(vocab::FALDO_BEGIN)).len(), 1);
        assert!(graph.objects(&id, &vocab::term(vocab::FALDO_END)).is_empty());
    }

    #[test]
    fn test_region_all_absent_emits_only_type() {
        let region = Region::new(&Identifier::new("NCBIGene:1"), None, None).unwrap();
        let mut graph = MemoryGraph::new();
        region.emit(&mut graph);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_region_identity_follows_owner() {
        let a = Region::new(&Identifier::new("NCBIGene:1"), None, None).unwrap();
        let b = Region::new(&Identifier::new("NCBIGene:2"), None, None).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_region_shares_reference() {
        let owner = Identifier::new("NCBIGene:1");
        let same = Region::new(&owner, Some(pos("chr1", 1)), Some(pos("chr1", 9))).unwrap();
        let split = Region::new(&owner, Some(pos("chr1", 1)), Some(pos("chr2", 9))).unwrap();
        assert!(same.shares_reference());
        assert!(!split.shares_reference());
    }

    #[test]
    fn test_chrom_id_scoped_by_taxon() {
        let human = make_chrom_id("chr1", Some("9606")).unwrap();
        let mouse = make_chrom_id("chr1", Some("10090")).unwrap();
        assert_ne!(human, mouse);
        assert_eq!(human.as_str(), ":9606chr1");
        assert_eq!(mouse.as_str(), ":10090chr1");
    }

    #[test]
    fn test_chrom_id_prefix_stripping() {
        let expected = make_chrom_id("1", Some("9606")).unwrap();
        for label in ["chr1", "Chr1", "chrom1", "chromosome1", "chromosome_1", "CHR1"] {
            assert_eq!(make_chrom_id(label, Some("9606")).unwrap(), expected, "{label}");
        }
        assert_eq!(
            make_chrom_id("chrX", Some("NCBITaxon:10090")).unwrap().as_str(),
            ":10090chrX"
        );
    }

    #[test]
    fn test_chrom_id_keeps_mitochondrial_label() {
        assert_eq!(make_chrom_id("chrM", Some("9606")).unwrap().as_str(), ":9606chrM");
        assert_eq!(make_chrom_id("MT", Some("9606")).unwrap().as_str(), ":9606chrMT");
    }

    #[test]
    fn test_chrom_id_ignores_taxon_prefix() {
        let expected = make_chrom_id("chr1", Some("9606")).unwrap();
        for taxon in [
            "NCBITaxon:9606",
            "taxon:9606",
            " NCBITaxon:9606 ",
            "http://purl.obolibrary.org/obo/NCBITaxon_9606",
        ] {
            assert_eq!(make_chrom_id("chr1", Some(taxon)).unwrap(), expected, "{taxon}");
        }
    }

    #[test]
    fn test_shares_reference_free_function() {
        let a = pos("chr1", 1);
        let b = pos("chr2", 9);
        assert!(shares_reference(Some(&a), None));
        assert!(shares_reference(None, None));
        assert!(shares_reference(Some(&a), Some(&pos("chr1", 5))));
        assert!(!shares_reference(Some(&a), Some(&b)));
    }

    #[test]
    fn test_chrom_id_without_taxon() {
        assert_eq!(make_chrom_id("chr2", None).unwrap().as_str(), ":chr2");
    }

    #[test]
    fn test_chrom_id_empty_label() {
        assert!(make_chrom_id("chr", Some("9606")).is_err());
        assert!(make_chrom_id("", Some("9606")).is_err());
    }
}
