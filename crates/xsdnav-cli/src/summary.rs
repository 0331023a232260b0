//! # Summary Subcommand
//!
//! Prints the schema summary: version, target namespace, location, root
//! elements and top-level types.

use anyhow::{Context, Result};
use clap::Args;

use xsdnav_core::SchemaSummary;

use crate::Backend;

/// Arguments for the `xsdnav summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the summary subcommand.
///
/// Returns exit code: 0 on success, 2 on operational error.
pub async fn run_summary(args: &SummaryArgs, backend: &Backend) -> Result<u8> {
    let source = backend.schema_source()?;
    let summary = source
        .fetch_summary()
        .await
        .context("failed to fetch schema summary")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }
    Ok(0)
}

/// Human-readable summary block.
pub fn render_summary(summary: &SchemaSummary) -> String {
    let list = |items: &[String]| {
        if items.is_empty() {
            "(none)".to_string()
        } else {
            items.join(", ")
        }
    };
    format!(
        "Schema version:   {}\nTarget namespace: {}\nLocation:         {}\nRoot elements:    {}\nTop-level types:  {}\n",
        summary.schema_version,
        summary.target_namespace,
        summary.schema_location,
        list(&summary.root_elements),
        list(&summary.top_level_types),
    )
}
