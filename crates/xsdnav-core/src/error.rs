//! # Error Hierarchy
//!
//! Structured error types for xsdnav, built with `thiserror`.
//!
//! Most outcomes in the navigation engine are not errors at all: a malformed
//! or unresolvable path simply means "no jump for this item". The types here
//! cover the two things that genuinely fail: path rejection (carried as a
//! typed reason for diagnostics) and collaborator transport failures.

use thiserror::Error;

/// Why a raw location string produced no segments.
///
/// Every variant is handled identically by callers ("no resolution
/// possible"); the distinction only feeds logs and CLI output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathRejection {
    /// The trimmed input does not start with `/`.
    #[error("\"{0}\" is not an absolute path")]
    NotAbsolute(String),

    /// Splitting on `/` left no non-empty pieces.
    #[error("\"{0}\" contains no path segments")]
    NoSegments(String),

    /// Every segment was empty once its namespace prefix was stripped.
    #[error("\"{0}\" has no segments left after stripping namespace prefixes")]
    EmptyAfterPrefixStrip(String),
}

/// Failure reported by an external collaborator.
///
/// The core never retries; retry policy belongs to the collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The collaborator could not be reached or answered with an error.
    #[error("transport failure during {operation}: {reason}")]
    Transport {
        /// The collaborator operation that failed.
        operation: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The collaborator answered, but the payload was unusable.
    #[error("invalid payload from {operation}: {reason}")]
    InvalidPayload {
        /// The collaborator operation that failed.
        operation: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl SourceError {
    /// Shorthand for [`SourceError::Transport`].
    pub fn transport(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`SourceError::InvalidPayload`].
    pub fn invalid_payload(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_rejection_display_carries_input() {
        let err = PathRejection::NotAbsolute("not-absolute".to_string());
        assert!(format!("{err}").contains("not-absolute"));
        let err = PathRejection::EmptyAfterPrefixStrip("/ns:".to_string());
        assert!(format!("{err}").contains("/ns:"));
    }

    #[test]
    fn source_error_transport_display() {
        let err = SourceError::transport("fetch_tree", "connection refused");
        let msg = format!("{err}");
        assert!(msg.contains("fetch_tree"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn source_error_invalid_payload_display() {
        let err = SourceError::invalid_payload("fetch_summary", "missing field");
        assert!(format!("{err}").contains("missing field"));
    }
}
