use clap::Parser;
use epitome_cli::Commands;

/// Extractive summarization of Greek text
#[derive(Debug, Parser)]
#[command(name = "epitome", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}
