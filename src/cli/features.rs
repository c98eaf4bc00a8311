use std::path::PathBuf;

use clap::Args;

use crate::cli::metadata::MetadataArgs;
use crate::cli::output::{print_graph, print_summary};
use crate::cli::OutputFormat;
use crate::graph::MemoryGraph;
use crate::ingest::{emit_feature_record, Ingest, IngestOptions};
use crate::parsing::records::read_feature_file;
use crate::parsing::translation::TranslationTable;

#[derive(Args)]
pub struct FeaturesArgs {
    /// Feature table (TSV, optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Tag for this ingest
    #[arg(short, long, default_value = "features")]
    pub source: String,

    /// Translation table for feature types (local term -> SO class)
    #[arg(short, long)]
    pub types: Option<PathBuf>,

    /// Stop after this many records
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub metadata: MetadataArgs,
}

pub fn run(args: FeaturesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let types = args
        .types
        .as_deref()
        .map(TranslationTable::load)
        .transpose()?;
    let mut records = read_feature_file(&args.input)?;

    let mut graph = MemoryGraph::new();
    let options = args
        .metadata
        .apply(IngestOptions::new(args.source).with_limit(args.limit));
    let mut ingest = Ingest::new(&mut graph, options);
    ingest.process(&mut records, |g, record| {
        emit_feature_record(g, &record, types.as_ref())
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
