//! # Validate Subcommand
//!
//! Sends a document to the backend for XSD validation and prints each error,
//! marking the ones whose location exists in the schema tree with `→`.
//!
//! With `--jump N` the N-th jumpable error is clicked: its path goes through
//! the jump coordinator to an explorer session listening for requests, and
//! the resulting selection and tree rows are printed.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use tokio::task::JoinHandle;

use xsdnav_core::{IndexPath, SchemaSource, ValidateResponse, ValidationService, XmlDocument};
use xsdnav_state::{
    ExplorerSession, JumpCoordinator, NodeDetails, SessionTree, ValidateOutcome,
    ValidationController, ValidationErrorView, VisibleRow, VALIDATION_FAILED,
};

use crate::{read_document, render_rows, Backend};

/// How long `--jump` waits for the explorer to apply the jump.
const JUMP_TIMEOUT: Duration = Duration::from_secs(10);

/// Arguments for the `xsdnav validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// XML document to validate.
    #[arg(value_name = "DOC")]
    pub document: PathBuf,

    /// Jump to the N-th jumpable error (1-based) and print the explorer state.
    #[arg(long, value_name = "N")]
    pub jump: Option<usize>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Explorer state after a jump.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpReport {
    /// The clicked location.
    pub path: String,
    /// Address of the selected node.
    pub selected: Option<IndexPath>,
    /// Details of the selected node.
    pub details: Option<NodeDetails>,
    /// Visible rows after the jump.
    pub rows: Vec<VisibleRow>,
}

/// Everything the subcommand prints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// The backend's answer.
    pub response: ValidateResponse,
    /// Per-error views with resolved jump flags.
    pub errors: Vec<ValidationErrorView>,
    /// Present when `--jump` was given.
    pub jump: Option<JumpReport>,
}

/// Validate `document` and, if `jump_to` is set, jump to that error.
pub async fn validate_document(
    service: Arc<dyn ValidationService>,
    source: Arc<dyn SchemaSource>,
    document: &XmlDocument,
    jump_to: Option<usize>,
) -> Result<ValidationReport> {
    let tree = Arc::new(SessionTree::new(source));
    let jumps = Arc::new(JumpCoordinator::new());
    let controller = ValidationController::new(service, Arc::clone(&tree), Arc::clone(&jumps));

    let lookups = match controller.validate(document).await {
        ValidateOutcome::Completed { lookups } => lookups,
        ValidateOutcome::Failed => {
            bail!(controller.error().unwrap_or_else(|| VALIDATION_FAILED.to_string()))
        }
        ValidateOutcome::Ignored => bail!("a validation is already running"),
    };
    for lookup in lookups {
        lookup.await.context("path lookup task failed")?;
    }

    let response = controller.result().context("validation returned no result")?;
    let errors = controller.errors();

    let jump = match jump_to {
        Some(n) => Some(jump_to_error(&controller, tree, jumps, &errors, n).await?),
        None => None,
    };

    Ok(ValidationReport {
        response,
        errors,
        jump,
    })
}

async fn jump_to_error(
    controller: &ValidationController,
    tree: Arc<SessionTree>,
    jumps: Arc<JumpCoordinator>,
    errors: &[ValidationErrorView],
    n: usize,
) -> Result<JumpReport> {
    let jumpable = errors.iter().filter(|e| e.can_jump).count();
    let path = n
        .checked_sub(1)
        .and_then(|index| errors.iter().filter(|e| e.can_jump).nth(index))
        .and_then(|e| e.path.clone())
        .with_context(|| format!("--jump {n}: there are {jumpable} jumpable errors"))?;

    let explorer = Arc::new(ExplorerSession::new(tree, Arc::clone(&jumps)));
    let listener = explorer.spawn_jump_listener();
    explorer.load().await;

    if !controller.click(&path) {
        bail!("another jump is in flight");
    }
    let settled = tokio::time::timeout(JUMP_TIMEOUT, async {
        while controller.is_busy(&path) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;

    jumps.clear_subscriptions();
    join_listener(listener).await?;
    settled.with_context(|| format!("explorer did not apply jump to {path}"))?;

    Ok(JumpReport {
        path,
        selected: explorer.selected(),
        details: explorer.details(),
        rows: explorer.visible_rows(),
    })
}

/// Wait for the listener, which exits once its channel closes. A panic in
/// the listener surfaces as an error.
async fn join_listener(listener: JoinHandle<()>) -> Result<()> {
    listener.await.map_err(|e| {
        tracing::warn!(error = %e, "jump listener did not finish cleanly");
        anyhow::Error::new(e).context("jump listener task failed")
    })
}

/// Human-readable report.
pub fn render_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    let verdict = if report.response.xsd_valid { "VALID" } else { "INVALID" };
    out.push_str(&format!("XSD: {verdict} ({} errors)\n", report.errors.len()));

    for (i, error) in report.errors.iter().enumerate() {
        let marker = if error.can_jump { '→' } else { ' ' };
        match &error.path {
            Some(path) => out.push_str(&format!("{marker} {:>3}. {path}: {}\n", i + 1, error.message)),
            None => out.push_str(&format!("{marker} {:>3}. {}\n", i + 1, error.message)),
        }
    }

    if !report.response.namespaces.is_empty() {
        out.push_str("Namespaces:\n");
        for ns in &report.response.namespaces {
            out.push_str(&format!("  {} = {}\n", ns.prefix, ns.uri));
        }
    }

    if let Some(analysis) = &report.response.analysis {
        let phase = serde_json::to_value(analysis.phase_detected)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        out.push_str(&format!("Phase: {phase}\n"));
        if !analysis.tax_procedures_found.is_empty() {
            out.push_str(&format!("Tax procedures: {}\n", analysis.tax_procedures_found.join(", ")));
        }
        if analysis.snapshot_warning {
            out.push_str("WARN: document looks like a snapshot\n");
        }
    }

    if let Some(jump) = &report.jump {
        out.push_str(&format!("\nJumped to {}\n", jump.path));
        if let Some(details) = &jump.details {
            out.push_str(&format!(
                "Selected: {} [{}] {}",
                details.name, details.index_path, details.kind
            ));
            if let Some(type_name) = &details.type_name {
                out.push_str(&format!(" type={type_name}"));
            }
            if let Some(cardinality) = &details.cardinality {
                out.push_str(&format!(" occurs={cardinality}"));
            }
            out.push('\n');
        }
        out.push_str(&render_rows(&jump.rows));
    }
    out
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if the document is valid, 1 if it is not, 2 on
/// operational error.
pub async fn run_validate(args: &ValidateArgs, backend: &Backend) -> Result<u8> {
    let document = read_document(&args.document)?;
    let service: Arc<dyn ValidationService> = Arc::new(backend.client()?);
    let source = backend.schema_source()?;

    let report = validate_document(service, source, &document, args.jump).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(if report.response.xsd_valid { 0 } else { 1 })
}
