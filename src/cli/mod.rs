//! Command-line interface for bioforge.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **mint**: Mint a digest identifier from one or more parts
//! - **chrom**: Build a taxon-scoped chromosome identifier
//! - **position**: Show the triples for a single FALDO position
//! - **features**: Ingest a feature table and print the resulting triples
//! - **associations**: Ingest an association table and print the resulting triples
//!
//! ## Usage
//!
//! ```text
//! # Mint an identifier
//! bioforge mint NCBIGene:3630 OMIM:125852 --namespace variant-locus
//!
//! # Chromosome identifier for human chr1
//! bioforge chrom chr1 --taxon 9606
//!
//! # Ingest a gzipped gene table as JSON
//! bioforge features genes.tsv.gz --source ncbigene --format json
//!
//! # Ingest associations, translating the source's relation names
//! bioforge associations ctd.tsv --source ctd --relations ctd_relations.tsv -v
//!
//! # Describe the release the table came from
//! bioforge associations ctd.tsv --source ctd --dataset-version 2024-06 --issued 2024-06-01
//! ```

use clap::{Parser, Subcommand};

pub mod associations;
pub mod features;
pub mod metadata;
pub mod mint;
pub mod output;
pub mod position;

#[derive(Parser)]
#[command(name = "bioforge")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Turn biological source tables into a deterministic knowledge graph")]
#[command(
    long_about = "bioforge reads genomic feature and association tables and emits them as triples.\n\nAnonymous nodes (positions, regions, associations) get identifiers minted from their content, so the same input always produces the same graph:\n- FALDO coordinates on taxon-scoped chromosomes\n- OBAN-reified associations with evidence and citations\n- Translation tables for source-specific vocabularies"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mint a deterministic identifier
    Mint(mint::MintArgs),

    /// Build a chromosome identifier
    Chrom(mint::ChromArgs),

    /// Show the triples for a position
    Position(position::PositionArgs),

    /// Ingest a feature table
    Features(features::FeaturesArgs),

    /// Ingest an association table
    Associations(associations::AssociationsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
