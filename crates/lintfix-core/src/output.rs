//! JSON output types for the CLI.
//!
//! Every `fix` run produces one [`FixResponse`] listing a [`FileReport`] per
//! input compilation unit. Files are reported independently: one file failing
//! never hides the results of the others.

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{LintError, OutputErrorCode};

/// Schema version of the JSON output.
pub const SCHEMA_VERSION: &str = "1";

/// Hash type for printed output (SHA-256, stored as hex string for JSON compatibility).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
    /// Compute SHA-256 hash of the given bytes, returning hex-encoded string.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        ContentHash(hex::encode(hasher.finalize()))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error information embedded in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
}

impl ErrorInfo {
    /// Create from a LintError.
    pub fn from_error(err: &LintError) -> Self {
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
        }
    }
}

/// A node replaced by a rule, as reported in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRecord {
    /// Name of the rule that replaced the node.
    pub rule: String,
    /// Identifier of the replaced node.
    pub node: u32,
}

/// Outcome of processing one compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// At least one rule changed the tree.
    Fixed,
    /// No rule applied.
    Unchanged,
    /// Processing aborted; see `error`.
    Failed,
}

/// Report for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// Input path as given on the command line.
    pub path: String,
    /// Processing outcome.
    pub status: FileStatus,
    /// Replaced nodes, in application order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<TransformRecord>,
    /// Hash of the printed output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<ContentHash>,
    /// Where the fixed source was written, if an output directory was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// The fixed source, when it was not written to a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Failure details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl FileReport {
    /// Report for a file whose pipeline completed.
    pub fn completed(
        path: impl Into<String>,
        transforms: Vec<TransformRecord>,
        printed: &str,
    ) -> Self {
        let status = if transforms.is_empty() {
            FileStatus::Unchanged
        } else {
            FileStatus::Fixed
        };
        FileReport {
            path: path.into(),
            status,
            transforms,
            content_hash: Some(ContentHash::compute(printed.as_bytes())),
            output: None,
            source: None,
            error: None,
        }
    }

    /// Report for a file whose processing aborted.
    pub fn failed(path: impl Into<String>, err: &LintError) -> Self {
        FileReport {
            path: path.into(),
            status: FileStatus::Failed,
            transforms: Vec::new(),
            content_hash: None,
            output: None,
            source: None,
            error: Some(ErrorInfo::from_error(err)),
        }
    }
}

/// Response of a `fix` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixResponse {
    /// "ok" when every file completed, "error" otherwise.
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// One report per input file, in input order.
    pub files: Vec<FileReport>,
}

impl FixResponse {
    /// Build a response from per-file reports.
    pub fn new(files: Vec<FileReport>) -> Self {
        let status = if files.iter().any(|f| f.status == FileStatus::Failed) {
            "error"
        } else {
            "ok"
        };
        FixResponse {
            status: status.to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            files,
        }
    }

    /// The error code of the first failed file, if any.
    pub fn first_error_code(&self) -> Option<u8> {
        self.files
            .iter()
            .find_map(|f| f.error.as_ref().map(|e| e.code))
    }
}

/// Response for a command that failed as a whole (bad arguments or
/// configuration), before any file was processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always "error".
    pub status: String,
    pub schema_version: String,
    pub error: ErrorInfo,
}

impl ErrorResponse {
    pub fn new(err: &LintError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

/// Response of the `rules` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesResponse {
    pub status: String,
    pub schema_version: String,
    /// Registered rule names in lexical order.
    pub rules: Vec<String>,
}

impl RulesResponse {
    pub fn new(rules: Vec<String>) -> Self {
        RulesResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            rules,
        }
    }
}

/// Emit a response as pretty-printed JSON to a writer.
///
/// The output is deterministic: same input produces identical bytes.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{json}")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_hex_sha256() {
        let hash = ContentHash::compute(b"class A {}");
        assert_eq!(hash.0.len(), 64);
        assert!(hash.0.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, ContentHash::compute(b"class A {}"));
        assert_ne!(hash, ContentHash::compute(b"class B {}"));
    }

    #[test]
    fn completed_without_transforms_is_unchanged() {
        let report = FileReport::completed("A.json", Vec::new(), "class A {}");
        assert_eq!(report.status, FileStatus::Unchanged);
        assert!(report.content_hash.is_some());
    }

    #[test]
    fn completed_with_transforms_is_fixed() {
        let transforms = vec![TransformRecord {
            rule: "RenameShadowedName".to_string(),
            node: 7,
        }];
        let report = FileReport::completed("A.json", transforms, "class A {}");
        assert_eq!(report.status, FileStatus::Fixed);
    }

    #[test]
    fn response_status_reflects_failures() {
        let ok = FileReport::completed("A.json", Vec::new(), "");
        let failed = FileReport::failed("B.json", &LintError::internal("boom"));

        let response = FixResponse::new(vec![ok.clone()]);
        assert_eq!(response.status, "ok");
        assert_eq!(response.first_error_code(), None);

        let response = FixResponse::new(vec![ok, failed]);
        assert_eq!(response.status, "error");
        assert_eq!(response.first_error_code(), Some(10));
    }

    #[test]
    fn error_response_carries_code() {
        let response = ErrorResponse::new(&LintError::configuration("unknown rule: Foo"));
        assert_eq!(response.status, "error");
        assert_eq!(response.error.code, 2);
        assert!(response.error.message.contains("Foo"));
    }

    #[test]
    fn emit_response_is_deterministic() {
        let response = FixResponse::new(vec![FileReport::completed("A.json", Vec::new(), "x")]);
        let mut first = Vec::new();
        let mut second = Vec::new();
        emit_response(&response, &mut first).unwrap();
        emit_response(&response, &mut second).unwrap();
        assert_eq!(first, second);

        let json = String::from_utf8(first).unwrap();
        assert!(json.contains("\"schema_version\": \"1\""));
        assert!(json.contains("\"status\": \"unchanged\""));
        // Empty transform lists and absent errors are omitted.
        assert!(!json.contains("transforms"));
        assert!(!json.contains("\"error\""));
    }
}
