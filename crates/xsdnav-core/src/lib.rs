#![deny(missing_docs)]

//! # xsdnav-core — Foundational Types for xsdnav
//!
//! This crate defines the types and pure functions every other crate in the
//! workspace depends on. It has no internal crate dependencies.
//!
//! ## Contents
//!
//! 1. **Tree model** ([`SchemaNode`], [`SchemaSummary`]). Loaded once per
//!    session, read-only afterwards; a reload replaces the whole tree.
//!
//! 2. **Path normalization** ([`normalize`]). Validator location strings such
//!    as `/ns:root/ns:child` become bare segment lists. The result type
//!    [`NormalizedPath`] is non-empty by construction.
//!
//! 3. **Path resolution** ([`resolve`], [`resolve_path`]). A normalized path
//!    is walked against a tree, producing the [`NodeChain`] from root to
//!    target, or `None`.
//!
//! 4. **Addressing** ([`IndexPath`], [`ChainRoute`]). Owned node addresses
//!    that outlive borrows of the tree.
//!
//! 5. **Collaborator traits** ([`SchemaSource`], [`ValidationService`]).
//!
//! 6. **Errors** ([`PathRejection`], [`SourceError`]). Structured errors
//!    with `thiserror`.

pub mod address;
pub mod error;
pub mod model;
pub mod path;
pub mod resolve;
pub mod source;
pub mod validation;

// Re-export primary types at crate root for ergonomic imports.
pub use address::{ChainRoute, IndexPath, InvalidIndexPath, DOM_ID_PREFIX};
pub use error::{PathRejection, SourceError};
pub use model::{
    Cardinality, MaxOccurs, SchemaAttribute, SchemaNode, SchemaNodeKind, SchemaSummary,
    SchemaTreeResponse, HIGHLIGHTED_ATTRIBUTE_GROUPS,
};
pub use path::{normalize, NormalizedPath};
pub use resolve::{resolve, resolve_path, NodeChain};
pub use source::{SchemaSource, StaticSchemaSource, ValidationService};
pub use validation::{
    parse_validation_error, CompareDiffSummary, CompareResponse, NamespaceInfo,
    ParsedValidationError, PhaseDetected, ValidateResponse, ValidationAnalysis, XmlDocument,
};
