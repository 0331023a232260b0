//! # xsdnav-schema — Local XSD Loading
//!
//! Turns an XML Schema document into the navigable tree model defined in
//! `xsdnav-core`.
//!
//! ## Tree Building (`xsd`)
//!
//! [`XsdSchema::from_file`] parses the document with `roxmltree`, indexes the
//! top-level declarations and expands the tree from the root element. Named
//! complex types are expanded in place, attribute groups are flattened with
//! their group name recorded as the attribute source, and recursive type
//! references stop at the first repetition on a branch.
//!
//! ## Local Source (`source`)
//!
//! [`LocalSchemaSource`] serves a loaded schema through the
//! [`SchemaSource`](xsdnav_core::SchemaSource) trait, so sessions can run
//! against a file on disk exactly as they run against the HTTP backend.
//!
//! ## Crate Policy
//!
//! - Depends only on `xsdnav-core` internally.
//! - Loading is eager and synchronous; the produced tree borrows nothing
//!   from the source text.

pub mod source;
pub mod xsd;

pub use source::LocalSchemaSource;
pub use xsd::{local_name, SchemaLoadError, XsdLoadOptions, XsdSchema, XS_NS};
