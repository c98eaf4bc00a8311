//! # bioforge
//!
//! A library for turning biological source data into a deterministic
//! knowledge graph.
//!
//! Each source (a gene table, a phenotype annotation file, ...) is read one
//! record at a time. A handler turns every record into model objects (genomic
//! features with FALDO coordinates, evidence-backed associations) which emit
//! themselves as triples. Nodes without a public identifier are named by a
//! content digest, so re-running an ingest on the same input yields exactly
//! the same graph.
//!
//! ## Features
//!
//! - **Digest identifiers**: stable anonymous ids for positions, regions and associations
//! - **FALDO coordinates**: stranded positions on taxon-scoped chromosomes
//! - **OBAN associations**: reified claims carrying evidence codes and citations
//! - **Genotypes**: alleles, variant loci and zygosity-typed locus complements
//! - **Provenance**: a dataset node and property declarations with every ingest
//! - **Translation tables**: map a source's local vocabulary to canonical terms
//! - **Fault-tolerant ingest**: bad records are logged and skipped, never fatal
//!
//! ## Example
//!
//! ```rust
//! use bioforge::core::feature::Feature;
//! use bioforge::core::position::{make_chrom_id, Strand};
//! use bioforge::{Identifier, MemoryGraph};
//!
//! let chrom = make_chrom_id("chr11", Some("9606")).unwrap();
//!
//! let mut gene = Feature::new(
//!     Identifier::new("NCBIGene:3630"),
//!     Some("INS".to_string()),
//!     Identifier::new("SO:0000704"),
//! );
//! gene.set_start(2_159_779, chrom.clone(), Strand::Minus, []).unwrap();
//! gene.set_end(2_161_209, chrom, Strand::Minus, []).unwrap();
//!
//! let mut graph = MemoryGraph::new();
//! gene.emit(&mut graph).unwrap();
//!
//! for triple in &graph {
//!     println!("{triple}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Identifiers, coordinates, features and associations
//! - [`graph`]: Triples and the in-memory graph they are emitted into
//! - [`parsing`]: Readers for feature, association and translation tables
//! - [`ingest`]: Record-at-a-time ingestion with per-record error handling
//! - [`utils`]: Identifier minting and input validation
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod graph;
pub mod ingest;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::association::Association;
pub use core::dataset::Dataset;
pub use core::feature::Feature;
pub use core::genotype::Zygosity;
pub use core::position::{Position, Region, Strand};
pub use core::types::*;
pub use graph::{Graph, MemoryGraph, Term, Triple};
pub use ingest::{Ingest, IngestOptions, IngestSummary};
pub use utils::digest::mint;
