//! Fixed vocabulary terms used when emitting triples.
//!
//! All terms are compact URIs. Expansion to full IRIs is the concern of
//! whatever serializes the graph.

use crate::core::types::Identifier;
use crate::graph::Graph;

// RDF / RDFS / Dublin Core
pub const RDF_TYPE: &str = "rdf:type";
pub const RDFS_LABEL: &str = "rdfs:label";
pub const DC_DESCRIPTION: &str = "dcterms:description";
pub const DC_SOURCE: &str = "dcterms:source";
pub const XSD_INTEGER: &str = "xsd:integer";
pub const XSD_DATE: &str = "xsd:date";

// OWL property kinds
pub const OWL_OBJECT_PROPERTY: &str = "owl:ObjectProperty";
pub const OWL_DATATYPE_PROPERTY: &str = "owl:DatatypeProperty";
pub const OWL_ANNOTATION_PROPERTY: &str = "owl:AnnotationProperty";

// Dataset provenance
pub const DCTYPES_DATASET: &str = "dctypes:Dataset";
pub const DC_TITLE: &str = "dcterms:title";
pub const DC_IDENTIFIER: &str = "dcterms:identifier";
pub const DC_LICENSE: &str = "dcterms:license";
pub const DC_RIGHTS: &str = "dcterms:rights";
pub const DC_ISSUED: &str = "dcterms:issued";
pub const DC_IS_VERSION_OF: &str = "dcterms:isVersionOf";
pub const PAV_VERSION: &str = "pav:version";
pub const FOAF_PAGE: &str = "foaf:page";
pub const CITO_CITES_AS_AUTHORITY: &str = "cito:citesAsAuthority";

// FALDO location model
pub const FALDO_LOCATION: &str = "faldo:location";
pub const FALDO_BEGIN: &str = "faldo:begin";
pub const FALDO_END: &str = "faldo:end";
pub const FALDO_POSITION: &str = "faldo:position";
pub const FALDO_REFERENCE: &str = "faldo:reference";
pub const FALDO_REGION: &str = "faldo:Region";
pub const FALDO_PLUS_STRAND: &str = "faldo:PlusStrandPosition";
pub const FALDO_MINUS_STRAND: &str = "faldo:MinusStrandPosition";
pub const FALDO_BOTH_STRAND: &str = "faldo:BothStrandPosition";

// Relation ontology
pub const IS_SUBSEQUENCE_OF: &str = "RO:0002525";
pub const HAS_SUBSEQUENCE: &str = "RO:0002524";
pub const IN_TAXON: &str = "RO:0002162";
pub const HAS_EVIDENCE: &str = "RO:0002558";

// OBAN association reification
pub const OBAN_ASSOCIATION: &str = "OBAN:association";
pub const OBAN_HAS_SUBJECT: &str = "OBAN:association_has_subject";
pub const OBAN_HAS_PREDICATE: &str = "OBAN:association_has_predicate";
pub const OBAN_HAS_OBJECT: &str = "OBAN:association_has_object";

// Sequence ontology classes for chromosome-level features
pub const SO_CHROMOSOME: &str = "SO:0000340";
pub const SO_CHROMOSOME_ARM: &str = "SO:0000105";
pub const SO_CHROMOSOME_BAND: &str = "SO:0000341";
pub const SO_CHROMOSOME_PART: &str = "SO:0000830";
pub const SO_REFERENCE_GENOME: &str = "SO:0001505";

// Genotype partonomy
pub const GENO_INTRINSIC_GENOTYPE: &str = "GENO:0000000";
pub const GENO_ALLELE: &str = "GENO:0000008";
pub const GENO_GENOMIC_BACKGROUND: &str = "GENO:0000010";
pub const GENO_VSLC: &str = "GENO:0000030";
pub const GENO_ALTERNATE_LOCUS: &str = "GENO:0000512";
pub const SO_GENE: &str = "SO:0000704";
pub const SO_SEQUENCE_ALTERATION: &str = "SO:0001059";
pub const HAS_PART: &str = "BFO:0000051";
pub const HAS_ALTERNATE_PART: &str = "GENO:0000382";
pub const HAS_REFERENCE_PART: &str = "GENO:0000385";
pub const HAS_ZYGOSITY: &str = "GENO:0000608";
pub const IS_SEQUENCE_VARIANT_INSTANCE_OF: &str = "GENO:0000408";

/// How a property is declared in the output graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Object,
    Datatype,
    Annotation,
}

impl PropertyKind {
    #[must_use]
    pub fn owl_type(self) -> &'static str {
        match self {
            PropertyKind::Object => OWL_OBJECT_PROPERTY,
            PropertyKind::Datatype => OWL_DATATYPE_PROPERTY,
            PropertyKind::Annotation => OWL_ANNOTATION_PROPERTY,
        }
    }
}

/// Controlled relationship vocabulary: (name, term, kind)
const RELATIONSHIPS: &[(&str, &str, PropertyKind)] = &[
    ("has_disposition", "GENO:0000208", PropertyKind::Object),
    ("has_phenotype", "RO:0002200", PropertyKind::Object),
    ("replaced_by", "IAO:0100001", PropertyKind::Annotation),
    ("consider", "OIO:consider", PropertyKind::Annotation),
    ("has_exact_synonym", "OIO:hasExactSynonym", PropertyKind::Annotation),
    ("has_related_synonym", "OIO:hasRelatedSynonym", PropertyKind::Annotation),
    ("definition", "IAO:0000115", PropertyKind::Annotation),
    ("in_taxon", IN_TAXON, PropertyKind::Object),
    ("has_quality", "RO:0000086", PropertyKind::Object),
    ("towards", "RO:0002503", PropertyKind::Object),
    ("is_subsequence_of", IS_SUBSEQUENCE_OF, PropertyKind::Object),
    ("has_subsequence", HAS_SUBSEQUENCE, PropertyKind::Object),
    ("gene_product_of", "RO:0002204", PropertyKind::Object),
    ("has_gene_product", "RO:0002205", PropertyKind::Object),
    ("is_marker_for", "RO:0002607", PropertyKind::Object),
    ("contributes_to", "RO:0002326", PropertyKind::Object),
    ("causes_condition", "RO:0003303", PropertyKind::Object),
    ("interacts_with", "RO:0002434", PropertyKind::Object),
    ("is_mutant_of", "GENO:0000440", PropertyKind::Object),
    ("derives_from", "RO:0001000", PropertyKind::Object),
    ("has_affected_locus", "GENO:0000418", PropertyKind::Object),
    ("has_part", HAS_PART, PropertyKind::Object),
    ("has_alternate_part", HAS_ALTERNATE_PART, PropertyKind::Object),
    ("has_reference_part", HAS_REFERENCE_PART, PropertyKind::Object),
    ("has_zygosity", HAS_ZYGOSITY, PropertyKind::Object),
    (
        "is_sequence_variant_instance_of",
        IS_SEQUENCE_VARIANT_INSTANCE_OF,
        PropertyKind::Object,
    ),
];

/// Properties the model emits that are not relationships a source can name
const MODEL_PROPERTIES: &[(&str, PropertyKind)] = &[
    (FALDO_LOCATION, PropertyKind::Object),
    (FALDO_BEGIN, PropertyKind::Object),
    (FALDO_END, PropertyKind::Object),
    (FALDO_REFERENCE, PropertyKind::Object),
    (FALDO_POSITION, PropertyKind::Datatype),
    (OBAN_HAS_SUBJECT, PropertyKind::Object),
    (OBAN_HAS_PREDICATE, PropertyKind::Object),
    (OBAN_HAS_OBJECT, PropertyKind::Object),
    (HAS_EVIDENCE, PropertyKind::Object),
    (DC_DESCRIPTION, PropertyKind::Annotation),
    (DC_SOURCE, PropertyKind::Annotation),
];

/// Look up a relationship term by its vocabulary name
#[must_use]
pub fn relationship(name: &str) -> Option<Identifier> {
    let key = name.trim().to_lowercase().replace([' ', '-'], "_");
    RELATIONSHIPS
        .iter()
        .find(|(n, _, _)| *n == key)
        .map(|(_, term, _)| Identifier::new(*term))
}

/// True if `term` is one of the controlled relationship terms
#[must_use]
pub fn is_known_relationship(term: &str) -> bool {
    RELATIONSHIPS.iter().any(|(_, t, _)| *t == term)
}

/// Declare every relationship and model property with its OWL kind:
///
/// ```text
/// RO:0002200      a owl:ObjectProperty
/// faldo:position  a owl:DatatypeProperty
/// IAO:0000115     a owl:AnnotationProperty
/// ```
///
/// Returns the number of declarations that were new to the graph.
pub fn declare_properties<G: Graph + ?Sized>(graph: &mut G) -> usize {
    let rdf_type = term(RDF_TYPE);
    let properties = RELATIONSHIPS
        .iter()
        .map(|&(_, t, kind)| (t, kind))
        .chain(MODEL_PROPERTIES.iter().copied());

    let mut added = 0;
    for (property, kind) in properties {
        if graph.add_node(&term(property), &rdf_type, &term(kind.owl_type())) {
            added += 1;
        }
    }
    added
}

/// Shorthand for building an identifier from one of the constants above
#[inline]
#[must_use]
pub fn term(curie: &str) -> Identifier {
    Identifier::new(curie)
}
