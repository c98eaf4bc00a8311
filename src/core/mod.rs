//! Modeling core: identifiers, coordinates, features and associations.
//!
//! This module provides the types record handlers build and emit:
//!
//! - [`Identifier`]: a compact URI, full IRI, or minted anonymous node id
//! - [`Position`], [`Region`], [`Strand`]: FALDO coordinates on a reference
//! - [`Feature`]: a typed genomic feature with an optional location
//! - [`Association`]: an evidence-backed subject/predicate/object claim
//! - [`genotype`]: alleles, variant loci and the genotypes they make up
//! - [`Dataset`]: provenance for everything one ingest emits
//!
//! ## Identity
//!
//! Nodes with no public identifier (positions, regions, associations) are
//! named by hashing the values that define them, so the same input always
//! produces the same graph:
//!
//! | Node | Minted from |
//! |------|-------------|
//! | Position | reference, coordinate |
//! | Region | owning feature |
//! | Association | subject, predicate, object, ingest source |
//! | Variant locus | gene, disease |
//! | VSLC | its alleles, unordered |
//!
//! Chromosomes are not minted; they get a readable id scoped by taxon,
//! e.g. `:9606chr1`.
//!
//! [`Identifier`]: types::Identifier
//! [`Position`]: position::Position
//! [`Region`]: position::Region
//! [`Strand`]: position::Strand
//! [`Feature`]: feature::Feature
//! [`Association`]: association::Association
//! [`Dataset`]: dataset::Dataset

pub mod association;
pub mod dataset;
pub mod feature;
pub mod genotype;
pub mod position;
pub mod types;
pub mod vocab;
