use std::path::PathBuf;

use clap::Args;

use crate::cli::metadata::MetadataArgs;
use crate::cli::output::{print_graph, print_summary};
use crate::cli::OutputFormat;
use crate::graph::MemoryGraph;
use crate::ingest::{emit_association_record, Ingest, IngestOptions};
use crate::parsing::records::read_association_file;
use crate::parsing::translation::TranslationTable;

#[derive(Args)]
pub struct AssociationsArgs {
    /// Association table (TSV, optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Tag for this ingest; becomes part of every association's identity
    #[arg(short, long)]
    pub source: String,

    /// Translation table for relations (local term -> predicate)
    #[arg(short, long)]
    pub relations: Option<PathBuf>,

    /// Stop after this many records
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub metadata: MetadataArgs,
}

pub fn run(args: AssociationsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let relations = args
        .relations
        .as_deref()
        .map(TranslationTable::load)
        .transpose()?;
    let mut records = read_association_file(&args.input)?;

    if verbose {
        if let Some(table) = &relations {
            eprintln!("Loaded {} relation translations", table.len());
        }
    }

    let mut graph = MemoryGraph::new();
    let options = args
        .metadata
        .apply(IngestOptions::new(args.source.clone()).with_limit(args.limit));
    let mut ingest = Ingest::new(&mut graph, options);
    ingest.process(&mut records, |g, record| {
        emit_association_record(g, &args.source, &record, relations.as_ref())
    });
    let summary = ingest.finish();

    if verbose {
        eprintln!(
            "Read {} rows from {}",
            records.rows_read(),
            args.input.display()
        );
    }
    records.finish()?;

    if verbose {
        print_summary(&summary);
    }

    print_graph(&graph, &summary, format)
}
