use bioforge::cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("bioforge=debug,info")
    } else {
        EnvFilter::new("bioforge=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Mint(args) => {
            cli::mint::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Chrom(args) => {
            cli::mint::run_chrom(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Position(args) => {
            cli::position::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Features(args) => {
            cli::features::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Associations(args) => {
            cli::associations::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
