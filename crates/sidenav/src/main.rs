//! Sidenav CLI - sidebar navigation builder.
//!
//! Provides commands for:
//! - `check`: Validate the sidebar against the content directory
//! - `tree`: Print the navigation tree as JSON
//! - `pages`: Print pages in reading order with breadcrumbs

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, PagesArgs, TreeArgs};
use output::Output;

/// Sidenav - sidebar navigation builder.
#[derive(Parser)]
#[command(name = "sidenav", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover sidenav.toml).
    #[arg(short, long, global = true, env = "SIDENAV_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (content scan and build logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the sidebar and cross-check it against content.
    Check(CheckArgs),
    /// Print the navigation tree as JSON.
    Tree(TreeArgs),
    /// Print pages in reading order.
    Pages(PagesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Check(args) => args.execute(config),
        Commands::Tree(args) => args.execute(config),
        Commands::Pages(args) => args.execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
