//! trackdiff CLI
//!
//! Command-line interface for comparing documents with change tracking

use clap::{Parser, Subcommand};
use trackdiff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "trackdiff")]
#[command(about = "trackdiff - Compare documents into a change-tracked result", long_about = None)]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two documents and print the tracked result
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        init(Profile::Development);
    }

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
