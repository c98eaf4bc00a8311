//! Printing triples and ingest summaries in the supported output formats.

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::graph::{MemoryGraph, Triple};
use crate::ingest::IngestSummary;

#[derive(Serialize)]
struct JsonOutput<'a, S: Serialize> {
    summary: &'a S,
    triples: Vec<&'a Triple>,
}

/// Print every triple in `graph` to stdout.
///
/// JSON output wraps the triples together with `summary`; text and TSV
/// print only the triples.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_graph<S: Serialize>(
    graph: &MemoryGraph,
    summary: &S,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for triple in graph {
                println!("{triple}");
            }
        }
        OutputFormat::Json => {
            let output = JsonOutput {
                summary,
                triples: graph.iter().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("subject\tpredicate\tobject");
            for triple in graph {
                println!(
                    "{}\t{}\t{}",
                    triple.subject, triple.predicate, triple.object
                );
            }
        }
    }
    Ok(())
}

/// Print an ingest summary to stderr
pub fn print_summary(summary: &IngestSummary) {
    eprintln!("Source: {}", summary.source);
    eprintln!("  Records read: {}", summary.records_read);
    eprintln!("  Records emitted: {}", summary.records_emitted);
    if summary.records_ignored > 0 {
        eprintln!("  Records ignored: {}", summary.records_ignored);
    }
    eprintln!("  Records skipped: {}", summary.records_skipped);
    eprintln!("  Associations dropped: {}", summary.associations_dropped);
    eprintln!("  Header triples: {}", summary.header_triples);
    eprintln!("  Triples added: {}", summary.triples_added);
    if summary.limit_reached {
        eprintln!("  Stopped at record limit");
    }
}
