use clap::Args;

use crate::cli::output::print_graph;
use crate::cli::OutputFormat;
use crate::core::position::{Position, Strand};
use crate::core::types::Identifier;
use crate::graph::MemoryGraph;

#[derive(Args)]
pub struct PositionArgs {
    /// Reference the coordinate is on (e.g. :9606chr5)
    pub reference: String,

    /// 1-based coordinate
    pub coordinate: u64,

    /// Strand: +, -, . or ? (unspecified)
    #[arg(short, long, allow_hyphen_values = true)]
    pub strand: Option<String>,

    /// Extra rdf:type for the position (repeatable)
    #[arg(long = "type")]
    pub types: Vec<String>,
}

pub fn run(args: PositionArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let strand = Strand::parse(args.strand.as_deref())?;
    let position = Position::new(
        Identifier::new(args.reference),
        args.coordinate,
        strand,
        args.types.into_iter().map(Identifier::new),
    )?;

    let mut graph = MemoryGraph::new();
    position.emit(&mut graph);

    if verbose {
        eprintln!(
            "Position {} ({} triples, {:?} strand)",
            position.id(),
            graph.len(),
            position.strand()
        );
    }

    print_graph(&graph, &position, format)
}
