//! Error types and error code constants for lintfix.
//!
//! This module provides a unified error type (`LintError`) that bridges
//! domain-specific errors from the different layers (tree queries, rule
//! configuration, rule application) into a common format suitable for JSON
//! output and process exit codes.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments or configuration (bad input from caller)
//! - `3`: Input errors (unreadable file, malformed tree)
//! - `4`: A rule failed while processing a compilation unit
//! - `10`: Internal errors (bugs, unexpected state)
//!
//! ## Design
//!
//! - **Unified type**: `LintError` is the single error type for CLI output
//! - **Bridging**: `impl From<X> for LintError` lives next to each domain error
//! - **Code mapping**: `OutputErrorCode` provides stable integer codes for JSON

use std::fmt;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output and process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments or configuration from caller.
    InvalidArguments = 2,
    /// The input compilation unit could not be read or decoded.
    InputError = 3,
    /// A rule aborted processing of a compilation unit.
    RuleFailed = 4,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
///
/// All layer errors are converted to this type before being rendered. Each
/// variant carries enough context to tell the user which file or rule failed.
#[derive(Debug, Error)]
pub enum LintError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Malformed or unknown rule configuration.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or written.
    #[error("i/o error on {path}: {message}")]
    Io { path: String, message: String },

    /// The input did not decode into a syntax tree.
    #[error("invalid input {path}: {message}")]
    InvalidInput { path: String, message: String },

    /// A rule failed while processing a compilation unit.
    #[error("rule {rule} failed on {file}: {message}")]
    RuleFailed {
        rule: String,
        file: String,
        message: String,
    },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    Internal { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&LintError> for OutputErrorCode {
    fn from(err: &LintError) -> Self {
        match err {
            LintError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            LintError::Configuration { .. } => OutputErrorCode::InvalidArguments,
            LintError::Io { .. } => OutputErrorCode::InputError,
            LintError::InvalidInput { .. } => OutputErrorCode::InputError,
            LintError::RuleFailed { .. } => OutputErrorCode::RuleFailed,
            LintError::Internal { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<LintError> for OutputErrorCode {
    fn from(err: LintError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl LintError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        LintError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        LintError::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error for a path.
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        LintError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create an invalid input error for a path.
    pub fn invalid_input(path: impl Into<String>, message: impl Into<String>) -> Self {
        LintError::InvalidInput {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a rule failure for a file.
    pub fn rule_failed(
        rule: impl Into<String>,
        file: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintError::RuleFailed {
            rule: rule.into(),
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        LintError::Internal {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
