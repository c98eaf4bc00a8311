use clap::Args;

use crate::cli::OutputFormat;
use crate::core::position::{make_chrom_id, normalize_chrom_label};
use crate::core::types::Identifier;
use crate::utils::digest::mint;

#[derive(Args)]
pub struct MintArgs {
    /// Values that define the node, in order
    #[arg(required = true)]
    pub parts: Vec<String>,

    /// Namespace for the identifier (e.g. position, region, association)
    #[arg(short, long)]
    pub namespace: String,
}

#[derive(Args)]
pub struct ChromArgs {
    /// Chromosome label as written by the source (chr1, 1, chromosome_X, ...)
    pub label: String,

    /// NCBI taxon (9606 or NCBITaxon:9606)
    #[arg(short, long)]
    pub taxon: Option<String>,
}

pub fn run(args: MintArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.parts.iter().map(String::as_str).collect();
    let id = mint(&parts, &args.namespace)?;

    if verbose {
        eprintln!(
            "Minted from {} part(s) in namespace '{}'",
            parts.len(),
            args.namespace
        );
    }

    let details = serde_json::json!({
        "id": id,
        "namespace": args.namespace,
        "parts": parts,
    });
    print_identifier(&id, format, &details)
}

pub fn run_chrom(args: ChromArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let id = make_chrom_id(&args.label, args.taxon.as_deref())?;
    let label = format!("chr{}", normalize_chrom_label(&args.label));

    if verbose {
        eprintln!("Normalized '{}' to {label}", args.label);
    }

    let details = serde_json::json!({
        "id": id,
        "label": label,
        "taxon": args.taxon,
    });
    print_identifier(&id, format, &details)
}

fn print_identifier(
    id: &Identifier,
    format: OutputFormat,
    details: &serde_json::Value,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text | OutputFormat::Tsv => println!("{id}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(details)?),
    }
    Ok(())
}
