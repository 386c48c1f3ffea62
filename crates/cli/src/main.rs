use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{generate_command, list_command, show_command};

/// Generate mock implementations for Rust traits
#[derive(Parser)]
#[command(name = "cargo-mocker")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
struct Mocker {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all traits resolvable from a file's directory
    #[command(visible_alias = "ls")]
    List {
        /// Path to a Rust source file; its siblings form the unit
        filepath: String,

        /// Emit the trait records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the flattened method set of one trait
    Show {
        /// Path to a Rust source file; its siblings form the unit
        filepath: String,

        /// Name of the trait to resolve
        name: String,

        /// Emit the trait record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a mock implementation skeleton for one trait
    #[command(visible_alias = "gen")]
    Generate {
        /// Path to a Rust source file; its siblings form the unit
        filepath: String,

        /// Name of the trait to mock
        name: String,

        /// Write the generated source here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    fn execute(self) -> Result<()> {
        match self {
            Commands::List { filepath, json } => list_command(&filepath, json),
            Commands::Show {
                filepath,
                name,
                json,
            } => show_command(&filepath, &name, json),
            Commands::Generate {
                filepath,
                name,
                output,
            } => generate_command(&filepath, &name, output.as_deref()),
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args: Vec<String> = env::args().collect();
    // Invoked as `cargo mocker ...`: cargo inserts the subcommand name
    if args.get(1).map(String::as_str) == Some("mocker") {
        args.remove(1);
    }

    let cli = Mocker::parse_from(args);
    cli.command.execute()
}
