//! Genotype partonomy: genotypes, their genomic backgrounds, variant single
//! locus complements (VSLCs), alleles and the sequence alterations they carry.
//!
//! A genotype is assembled from parts, each linked to its parent with a
//! GENO partonomy relation:
//!
//! ```text
//! genotype  has_reference_part  background
//! genotype  has_alternate_part  vslc
//! vslc      has_part            allele ; has_zygosity GENO:0000135
//! gene      has_alternate_part  allele
//! allele    has_alternate_part  sequence alteration
//! ```
//!
//! Variant loci and VSLCs seldom have public identifiers, so theirs are
//! minted from the identifiers they are built from.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{Identifier, ModelError};
use crate::core::vocab;
use crate::graph::Graph;
use crate::utils::digest::mint;

/// Namespace for minted variant-locus identifiers
pub const VARIANT_LOCUS_NAMESPACE: &str = "variant-locus";

/// Namespace for minted VSLC identifiers
pub const VSLC_NAMESPACE: &str = "vslc";

/// Zygosity of a variant single locus complement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zygosity {
    Homozygous,
    Heterozygous,
    Hemizygous,
    HemizygousX,
    HemizygousY,
    Homoplasmic,
    Heteroplasmic,
    Indeterminate,
}

impl Zygosity {
    /// Parse a zygosity name (`homozygous`, `het`, `hemizygous-x`, ...)
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidInput` for unknown names.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        let key = s.trim().to_lowercase().replace([' ', '_'], "-");
        match key.as_str() {
            "homozygous" | "hom" => Ok(Self::Homozygous),
            "heterozygous" | "het" => Ok(Self::Heterozygous),
            "hemizygous" | "hemi" => Ok(Self::Hemizygous),
            "hemizygous-x" => Ok(Self::HemizygousX),
            "hemizygous-y" => Ok(Self::HemizygousY),
            "homoplasmic" => Ok(Self::Homoplasmic),
            "heteroplasmic" => Ok(Self::Heteroplasmic),
            "indeterminate" | "unknown" => Ok(Self::Indeterminate),
            _ => Err(ModelError::invalid(format!("unknown zygosity '{s}'"))),
        }
    }

    #[must_use]
    pub fn term(self) -> Identifier {
        vocab::term(match self {
            Self::Homozygous => "GENO:0000136",
            Self::Heterozygous => "GENO:0000135",
            Self::Hemizygous => "GENO:0000606",
            Self::HemizygousX => "GENO:0000605",
            Self::HemizygousY => "GENO:0000604",
            Self::Homoplasmic => "GENO:0000602",
            Self::Heteroplasmic => "GENO:0000603",
            Self::Indeterminate => "GENO:0000137",
        })
    }

    /// Zygosity implied by a locus's alleles: the same allele twice is
    /// homozygous, two different ones heterozygous. A lone allele says
    /// nothing about its partner.
    #[must_use]
    pub fn infer(allele1: &Identifier, allele2: Option<&Identifier>) -> Self {
        match allele2 {
            Some(a2) if a2 == allele1 => Self::Homozygous,
            Some(_) => Self::Heterozygous,
            None => Self::Indeterminate,
        }
    }
}

fn require_id(id: &Identifier, role: &str) -> Result<(), ModelError> {
    if id.is_empty() {
        Err(ModelError::invalid(format!("{role} has no identifier")))
    } else {
        Ok(())
    }
}

fn add_individual<G: Graph + ?Sized>(
    graph: &mut G,
    id: &Identifier,
    label: Option<&str>,
    class: &Identifier,
    role: &str,
) -> Result<(), ModelError> {
    require_id(id, role)?;
    graph.add_node(id, &vocab::term(vocab::RDF_TYPE), class);
    if let Some(label) = label {
        graph.add_literal(id, &vocab::term(vocab::RDFS_LABEL), label);
    }
    debug!("Emitted {role} {id}");
    Ok(())
}

/// Mint the anonymous identifier for "some variant of `gene` associated
/// with `disease`"
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if both identifiers are empty.
pub fn make_variant_locus_id(
    gene: &Identifier,
    disease: &Identifier,
) -> Result<Identifier, ModelError> {
    mint(&[gene.as_str(), disease.as_str()], VARIANT_LOCUS_NAMESPACE)
}

/// Mint a VSLC identifier from its alleles. The pair is unordered, so
/// `(a, b)` and `(b, a)` name the same complement.
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if `allele1` is empty.
pub fn make_vslc_id(
    allele1: &Identifier,
    allele2: Option<&Identifier>,
) -> Result<Identifier, ModelError> {
    require_id(allele1, "allele")?;
    match allele2 {
        Some(a2) => {
            let (first, second) = if allele1 <= a2 {
                (allele1, a2)
            } else {
                (a2, allele1)
            };
            mint(&[first.as_str(), second.as_str()], VSLC_NAMESPACE)
        }
        None => mint(&[allele1.as_str()], VSLC_NAMESPACE),
    }
}

/// `genotype a <type>`; the type defaults to intrinsic genotype
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if `id` is empty.
pub fn add_genotype<G: Graph + ?Sized>(
    graph: &mut G,
    id: &Identifier,
    label: Option<&str>,
    genotype_type: Option<&Identifier>,
) -> Result<(), ModelError> {
    let class = genotype_type
        .cloned()
        .unwrap_or_else(|| vocab::term(vocab::GENO_INTRINSIC_GENOTYPE));
    add_individual(graph, id, label, &class, "genotype")
}

/// `allele a <type>`; the type defaults to GENO allele
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if `id` is empty.
pub fn add_allele<G: Graph + ?Sized>(
    graph: &mut G,
    id: &Identifier,
    label: Option<&str>,
    allele_type: Option<&Identifier>,
) -> Result<(), ModelError> {
    let class = allele_type
        .cloned()
        .unwrap_or_else(|| vocab::term(vocab::GENO_ALLELE));
    add_individual(graph, id, label, &class, "allele")
}

/// `alteration a <type>`; the type defaults to SO sequence_alteration
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if `id` is empty.
pub fn add_sequence_alteration<G: Graph + ?Sized>(
    graph: &mut G,
    id: &Identifier,
    label: Option<&str>,
    alteration_type: Option<&Identifier>,
) -> Result<(), ModelError> {
    let class = alteration_type
        .cloned()
        .unwrap_or_else(|| vocab::term(vocab::SO_SEQUENCE_ALTERATION));
    add_individual(graph, id, label, &class, "sequence alteration")
}

/// `parent <relation> part`; the relation defaults to has_part
pub fn add_parts<G: Graph + ?Sized>(
    graph: &mut G,
    part: &Identifier,
    parent: &Identifier,
    relation: Option<&Identifier>,
) {
    let relation = relation
        .cloned()
        .unwrap_or_else(|| vocab::term(vocab::HAS_PART));
    graph.add_node(parent, &relation, part);
}

/// `gene <relation> allele`; the relation defaults to has_alternate_part
pub fn add_allele_of_gene<G: Graph + ?Sized>(
    graph: &mut G,
    allele: &Identifier,
    gene: &Identifier,
    relation: Option<&Identifier>,
) {
    let relation = relation
        .cloned()
        .unwrap_or_else(|| vocab::term(vocab::HAS_ALTERNATE_PART));
    add_parts(graph, allele, gene, Some(&relation));
}

/// `variant_locus has_alternate_part alteration`
pub fn add_sequence_alteration_to_variant_locus<G: Graph + ?Sized>(
    graph: &mut G,
    alteration: &Identifier,
    variant_locus: &Identifier,
) {
    add_parts(
        graph,
        alteration,
        variant_locus,
        Some(&vocab::term(vocab::HAS_ALTERNATE_PART)),
    );
}

/// Emit a VSLC with its alleles as parts and its zygosity:
///
/// ```text
/// vslc  a GENO:0000030 ; has_part allele1, allele2 ; has_zygosity <zygosity>
/// ```
///
/// When `zygosity` is `None` it is inferred from the alleles. Returns the
/// zygosity that was asserted.
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if `vslc` or `allele1` is empty.
pub fn add_parts_to_vslc<G: Graph + ?Sized>(
    graph: &mut G,
    vslc: &Identifier,
    allele1: &Identifier,
    allele2: Option<&Identifier>,
    zygosity: Option<Zygosity>,
) -> Result<Zygosity, ModelError> {
    require_id(allele1, "allele")?;
    if let Some(allele2) = allele2 {
        require_id(allele2, "allele")?;
    }
    add_individual(graph, vslc, None, &vocab::term(vocab::GENO_VSLC), "vslc")?;

    add_parts(graph, allele1, vslc, None);
    if let Some(allele2) = allele2 {
        add_parts(graph, allele2, vslc, None);
    }

    let zygosity = zygosity.unwrap_or_else(|| Zygosity::infer(allele1, allele2));
    graph.add_node(vslc, &vocab::term(vocab::HAS_ZYGOSITY), &zygosity.term());
    Ok(zygosity)
}

/// `parent has_alternate_part vslc`
pub fn add_vslc_to_parent<G: Graph + ?Sized>(
    graph: &mut G,
    vslc: &Identifier,
    parent: &Identifier,
) {
    add_parts(graph, vslc, parent, Some(&vocab::term(vocab::HAS_ALTERNATE_PART)));
}

/// `background a GENO:0000010` and `genotype has_reference_part background`
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if `background` is empty.
pub fn add_genomic_background_to_genotype<G: Graph + ?Sized>(
    graph: &mut G,
    background: &Identifier,
    genotype: &Identifier,
) -> Result<(), ModelError> {
    add_individual(
        graph,
        background,
        None,
        &vocab::term(vocab::GENO_GENOMIC_BACKGROUND),
        "genomic background",
    )?;
    add_parts(
        graph,
        background,
        genotype,
        Some(&vocab::term(vocab::HAS_REFERENCE_PART)),
    );
    Ok(())
}

/// Emit "some variant of `gene` associated with `disease`" as an alternate
/// locus of the gene:
///
/// ```text
/// _:variant-locus-...  a GENO:0000512 ; rdfs:label "..."
/// gene                 has_alternate_part _:variant-locus-...
/// ```
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if `gene` is empty.
pub fn add_variant_locus<G: Graph + ?Sized>(
    graph: &mut G,
    gene: &Identifier,
    disease: &Identifier,
    label: Option<&str>,
) -> Result<Identifier, ModelError> {
    require_id(gene, "gene")?;
    let id = make_variant_locus_id(gene, disease)?;
    add_allele(
        graph,
        &id,
        label,
        Some(&vocab::term(vocab::GENO_ALTERNATE_LOCUS)),
    )?;
    add_allele_of_gene(graph, &id, gene, None);
    Ok(id)
}
