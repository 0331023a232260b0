//! # Compare Subcommand
//!
//! Uploads two documents to the backend and prints their validity and the
//! structural diff summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use xsdnav_core::{CompareResponse, ValidationService};

use crate::{read_document, Backend};

/// Arguments for the `xsdnav compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First XML document.
    #[arg(value_name = "A")]
    pub first: PathBuf,

    /// Second XML document.
    #[arg(value_name = "B")]
    pub second: PathBuf,

    /// Print the comparison as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the compare subcommand.
///
/// Returns exit code: 0 if both documents are valid, 1 if either is not,
/// 2 on operational error.
pub async fn run_compare(args: &CompareArgs, backend: &Backend) -> Result<u8> {
    let first = read_document(&args.first)?;
    let second = read_document(&args.second)?;
    let client = backend.client()?;

    let response = client
        .compare(&first, &second)
        .await
        .context("comparison request failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!(
            "{}",
            render_comparison(&first.file_name, &second.file_name, &response)
        );
    }
    Ok(if response.xml1_valid && response.xml2_valid { 0 } else { 1 })
}

/// Human-readable comparison.
pub fn render_comparison(first: &str, second: &str, response: &CompareResponse) -> String {
    let verdict = |valid: bool| if valid { "valid" } else { "invalid" };
    let mut out = format!(
        "{first}: {}\n{second}: {}\n",
        verdict(response.xml1_valid),
        verdict(response.xml2_valid)
    );
    match &response.diff_summary {
        Some(diff) => out.push_str(&format!(
            "Changed values: {}\nAdded nodes:    {}\nRemoved nodes:  {}\n",
            diff.changed_values, diff.added_nodes, diff.removed_nodes
        )),
        None => out.push_str("No diff summary available.\n"),
    }
    out
}
