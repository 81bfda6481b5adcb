mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lyra", about = "Star-tracker pipeline debug tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a frame sequence across an orientation range
    Sweep(commands::sweep::SweepArgs),
    /// Inspect a star-name lookup table
    Names(commands::names::NamesArgs),
    /// Print or save the default engine configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Sweep(args) => commands::sweep::run(args),
        Commands::Names(args) => commands::names::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
