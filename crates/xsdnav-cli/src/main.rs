//! # xsdnav CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xsdnav_cli::compare::{run_compare, CompareArgs};
use xsdnav_cli::resolve::{run_resolve, ResolveArgs};
use xsdnav_cli::summary::{run_summary, SummaryArgs};
use xsdnav_cli::tree::{run_tree, TreeArgs};
use xsdnav_cli::validate::{run_validate, ValidateArgs};
use xsdnav_cli::Backend;

/// xsdnav — navigate XSD schema trees and jump from validation errors to
/// the schema nodes they refer to.
#[derive(Parser, Debug)]
#[command(name = "xsdnav", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend base URL. Overrides XSDNAV_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Read the schema from this XSD file instead of the backend.
    #[arg(long, global = true)]
    xsd: Option<PathBuf>,

    /// Root element to use for a local XSD.
    #[arg(long, global = true, requires = "xsd")]
    root: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the schema summary.
    Summary(SummaryArgs),

    /// Render the schema tree.
    Tree(TreeArgs),

    /// Resolve a validator location to its node chain.
    Resolve(ResolveArgs),

    /// Validate a document against the backend.
    Validate(ValidateArgs),

    /// Compare two documents.
    Compare(CompareArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let backend = Backend {
        xsd: cli.xsd,
        root: cli.root,
        api_url: cli.api_url,
    };
    tracing::debug!(?backend, "xsdnav starting");

    let result = match &cli.command {
        Commands::Summary(args) => run_summary(args, &backend).await,
        Commands::Tree(args) => run_tree(args, &backend).await,
        Commands::Resolve(args) => run_resolve(args, &backend).await,
        Commands::Validate(args) => run_validate(args, &backend).await,
        Commands::Compare(args) => run_compare(args, &backend).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
