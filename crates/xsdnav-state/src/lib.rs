#![deny(missing_docs)]

//! # xsdnav-state — Navigation State
//!
//! Holds every piece of mutable state involved in jumping from a validation
//! error to the schema node it refers to.
//!
//! ## Components
//!
//! - **Jump coordinator** (`jump.rs`): one process-wide slot, `Idle` or
//!   `InFlight(path)`. A second request while one is in flight is rejected,
//!   never queued; stale completions are ignored.
//!
//! - **Tree navigator** (`navigator.rs`): expand state keyed by node identity,
//!   dotted index paths for external addressing, name lookup.
//!
//! - **Error list** (`errors.rs`): per-error views rebuilt on every validation
//!   result, with a generation counter that discards lookups started for an
//!   older result.
//!
//! - **Session tree** (`session.rs`): the schema tree fetched once and shared.
//!
//! - **Explorer session** (`explorer.rs`) and **validation controller**
//!   (`validate.rs`): the two views wired to the components above.
//!
//! ## Concurrency
//!
//! Shared state sits behind `parking_lot` locks that are never held across an
//! `.await`. The only async lock is the session tree's load gate, which must
//! span the fetch.

pub mod errors;
pub mod explorer;
pub mod jump;
pub mod navigator;
pub mod session;
pub mod validate;

pub use errors::{ErrorListState, Generation, LookupOutcome, LookupTicket, ValidationErrorView};
pub use explorer::{
    AttributeDetails, ExplorerSession, JumpOutcome, NodeDetails, SUMMARY_LOAD_FAILED,
    TREE_LOAD_FAILED,
};
pub use jump::{JumpCoordinator, JumpState, JumpSubscription};
pub use navigator::{NodeKey, TreeNavigator, VisibleRow};
pub use session::SessionTree;
pub use validate::{ValidateOutcome, ValidationController, VALIDATION_FAILED};
