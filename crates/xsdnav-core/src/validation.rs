//! # Validation Report Types
//!
//! Payloads exchanged with the validation backend, plus the parser that
//! splits a raw validator message into an optional location path and the
//! human-readable text.

use serde::{Deserialize, Serialize};

/// A document to validate or compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// File name reported to the backend.
    pub file_name: String,
    /// Raw document bytes.
    pub bytes: Vec<u8>,
}

impl XmlDocument {
    /// Wrap bytes under a file name.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Namespace declaration found in a validated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    /// Declared prefix; empty for the default namespace.
    pub prefix: String,
    /// Namespace URI.
    pub uri: String,
}

/// Filing phase inferred by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseDetected {
    /// Declaration phase.
    Declaration,
    /// Taxation phase.
    Taxation,
    /// Both phases present.
    Mixed,
    /// Not determinable, or a value this client does not know.
    #[serde(other)]
    Unknown,
}

/// Optional domain analysis attached to a validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationAnalysis {
    /// Tax procedures referenced by the document.
    #[serde(default)]
    pub tax_procedures_found: Vec<String>,
    /// Detected phase.
    pub phase_detected: PhaseDetected,
    /// Whether the backend flagged the document as a snapshot.
    #[serde(default)]
    pub snapshot_warning: bool,
}

/// Result of validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    /// Whether the document is schema-valid.
    pub xsd_valid: bool,
    /// Raw error strings, `<absolute-path>: <message>` or a plain message.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Namespace declarations of the document.
    #[serde(default)]
    pub namespaces: Vec<NamespaceInfo>,
    /// Optional domain analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ValidationAnalysis>,
}

/// Leaf-value differences between two documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareDiffSummary {
    /// Leaves present in both with different values.
    pub changed_values: u64,
    /// Leaves only in the second document.
    pub added_nodes: u64,
    /// Leaves only in the first document.
    pub removed_nodes: u64,
}

/// Result of comparing two documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    /// Schema validity of the first document.
    pub xml1_valid: bool,
    /// Schema validity of the second document.
    pub xml2_valid: bool,
    /// Diff summary, when both documents parsed.
    #[serde(default)]
    pub diff_summary: Option<CompareDiffSummary>,
}

/// A raw validator message split into location and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedValidationError {
    /// Absolute location path, if the message carried one.
    pub path: Option<String>,
    /// Human-readable text.
    pub message: String,
}

/// Split a raw validator message at its first `": "`.
///
/// The prefix counts as a path only when, trimmed, it starts with `/` and the
/// trimmed remainder is non-empty. Otherwise the whole raw string is the
/// message and there is no path.
pub fn parse_validation_error(raw: &str) -> ParsedValidationError {
    let plain = || ParsedValidationError {
        path: None,
        message: raw.to_string(),
    };

    let Some((candidate, detail)) = raw.split_once(": ") else {
        return plain();
    };

    let candidate = candidate.trim();
    let detail = detail.trim();
    if !candidate.starts_with('/') || detail.is_empty() {
        return plain();
    }

    ParsedValidationError {
        path: Some(candidate.to_string()),
        message: detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_path_and_message() {
        let parsed = parse_validation_error("/Schema/A/B: missing value");
        assert_eq!(parsed.path.as_deref(), Some("/Schema/A/B"));
        assert_eq!(parsed.message, "missing value");
    }

    #[test]
    fn plain_message_has_no_path() {
        let parsed = parse_validation_error("unrelated message");
        assert_eq!(parsed.path, None);
        assert_eq!(parsed.message, "unrelated message");
    }

    #[test]
    fn splits_at_first_separator_only() {
        let parsed = parse_validation_error("/a/b: value 'x: y' is not allowed");
        assert_eq!(parsed.path.as_deref(), Some("/a/b"));
        assert_eq!(parsed.message, "value 'x: y' is not allowed");
    }

    #[test]
    fn relative_prefix_keeps_whole_message() {
        let raw = "XML parse error: syntax error: line 1, column 0";
        let parsed = parse_validation_error(raw);
        assert_eq!(parsed.path, None);
        assert_eq!(parsed.message, raw);
    }

    #[test]
    fn empty_detail_keeps_whole_message() {
        let raw = "/a/b:  ";
        let parsed = parse_validation_error(raw);
        assert_eq!(parsed.path, None);
        assert_eq!(parsed.message, raw);
    }

    #[test]
    fn namespaced_path_is_kept_verbatim() {
        let parsed = parse_validation_error("/ns:root/ns:child: bad");
        assert_eq!(parsed.path.as_deref(), Some("/ns:root/ns:child"));
        assert_eq!(parsed.message, "bad");
    }

    #[test]
    fn validate_response_deserializes_backend_json() {
        let json = serde_json::json!({
            "xsdValid": false,
            "errors": ["/root/a: missing"],
            "namespaces": [{"prefix": "", "uri": "urn:x"}],
            "analysis": {
                "taxProceduresFound": ["declaration"],
                "phaseDetected": "somethingNew",
                "snapshotWarning": true
            }
        });
        let response: ValidateResponse = serde_json::from_value(json).unwrap();
        assert!(!response.xsd_valid);
        assert_eq!(response.errors.len(), 1);
        let analysis = response.analysis.unwrap();
        assert_eq!(analysis.phase_detected, PhaseDetected::Unknown);
        assert!(analysis.snapshot_warning);
    }

    #[test]
    fn validate_response_tolerates_missing_optionals() {
        let response: ValidateResponse =
            serde_json::from_value(serde_json::json!({"xsdValid": true})).unwrap();
        assert!(response.errors.is_empty());
        assert!(response.analysis.is_none());
    }

    #[test]
    fn compare_response_deserializes_null_summary() {
        let response: CompareResponse = serde_json::from_value(serde_json::json!({
            "xml1Valid": true, "xml2Valid": false, "diffSummary": null
        }))
        .unwrap();
        assert!(response.diff_summary.is_none());
    }
}
