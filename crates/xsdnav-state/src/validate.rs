//! # Validation Controller
//!
//! Drives the validation view: runs a document through the
//! [`ValidationService`], rebuilds the error list under a new generation and
//! starts one path lookup per error that carries a location. Lookups run as
//! independent tasks against the shared [`SessionTree`]; their results go
//! through [`ErrorListState::apply`], which discards anything from an older
//! generation.
//!
//! Clicking a resolvable error hands its path to the [`JumpCoordinator`].

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use xsdnav_core::{ValidateResponse, ValidationService, XmlDocument};

use crate::errors::{ErrorListState, LookupOutcome, LookupTicket, ValidationErrorView};
use crate::jump::JumpCoordinator;
use crate::session::SessionTree;

/// Shown when the validation request itself fails.
pub const VALIDATION_FAILED: &str =
    "Validation request failed. Please check connectivity and backend availability.";

/// What a call to [`ValidationController::validate`] did.
#[derive(Debug)]
pub enum ValidateOutcome {
    /// Another validation was still loading; nothing happened.
    Ignored,
    /// The service failed; the failure message is set.
    Failed,
    /// A new result is in place and its path lookups are running.
    Completed {
        /// One task per error with a location.
        lookups: Vec<JoinHandle<LookupOutcome>>,
    },
}

#[derive(Debug, Default)]
struct ValidationState {
    loading: bool,
    result: Option<ValidateResponse>,
    error: Option<String>,
    errors: ErrorListState,
}

/// State behind the validation view.
#[derive(Clone)]
pub struct ValidationController {
    service: Arc<dyn ValidationService>,
    tree: Arc<SessionTree>,
    jumps: Arc<JumpCoordinator>,
    state: Arc<Mutex<ValidationState>>,
}

impl std::fmt::Debug for ValidationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ValidationController {
    /// A controller with no result yet.
    pub fn new(
        service: Arc<dyn ValidationService>,
        tree: Arc<SessionTree>,
        jumps: Arc<JumpCoordinator>,
    ) -> Self {
        Self {
            service,
            tree,
            jumps,
            state: Arc::new(Mutex::new(ValidationState::default())),
        }
    }

    /// Validate `document`. Ignored while a previous call is still loading.
    pub async fn validate(&self, document: &XmlDocument) -> ValidateOutcome {
        {
            let mut state = self.state.lock();
            if state.loading {
                tracing::debug!(file = %document.file_name, "validation already running; ignored");
                return ValidateOutcome::Ignored;
            }
            state.loading = true;
            state.error = None;
        }

        let response = self.service.run_validation(document).await;

        let mut state = self.state.lock();
        state.loading = false;
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(file = %document.file_name, error = %e, "validation request failed");
                state.error = Some(VALIDATION_FAILED.to_string());
                return ValidateOutcome::Failed;
            }
        };

        tracing::info!(
            file = %document.file_name,
            xsd_valid = response.xsd_valid,
            errors = response.errors.len(),
            "validation finished"
        );
        let tickets = state.errors.begin(response.errors.as_slice());
        state.result = Some(response);
        drop(state);

        let lookups = tickets.into_iter().map(|ticket| self.spawn_lookup(ticket)).collect();
        ValidateOutcome::Completed { lookups }
    }

    fn spawn_lookup(&self, ticket: LookupTicket) -> JoinHandle<LookupOutcome> {
        let tree = Arc::clone(&self.tree);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let resolved = tree.resolve_path(&ticket.path).await.is_some();
            state.lock().errors.apply(&ticket, resolved)
        })
    }

    /// Ask the explorer to jump to `path`. `false` if another jump is in
    /// flight.
    pub fn click(&self, path: &str) -> bool {
        self.jumps.request(path)
    }

    /// Whether a jump to exactly `path` is in flight.
    pub fn is_busy(&self, path: &str) -> bool {
        self.jumps.is_in_flight(path)
    }

    /// Whether a validation is running.
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// The last successful response.
    pub fn result(&self) -> Option<ValidateResponse> {
        self.state.lock().result.clone()
    }

    /// User-facing failure message of the last call.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// The current error list.
    pub fn errors(&self) -> Vec<ValidationErrorView> {
        self.state.lock().errors.entries().to_vec()
    }
}
