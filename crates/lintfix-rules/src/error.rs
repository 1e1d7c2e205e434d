//! Error types for rule construction and rule application.

use thiserror::Error;

use lintfix_core::error::LintError;
use lintfix_cst::{CstError, NodeId};

/// Errors raised while configuring or applying a rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// `ignoreFormat` is not a valid regular expression.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A rule's properties did not match its configuration schema.
    #[error("invalid configuration for {rule}: {message}")]
    InvalidConfig { rule: String, message: String },

    /// No rule is registered under this name.
    #[error("unknown rule: {name}")]
    UnknownRule { name: String },

    /// No collision-free name was found within the attempt limit.
    #[error("no free name for {name} (declaration {node}) after {attempts} attempts")]
    RenameBoundExceeded {
        name: String,
        node: NodeId,
        attempts: usize,
    },

    /// Follow-up rules kept scheduling further follow-ups.
    #[error("{rule} scheduled more than {limit} follow-up rules")]
    FollowUpBoundExceeded { rule: String, limit: usize },

    /// The tree did not have the shape a rule required.
    #[error(transparent)]
    Cst(#[from] CstError),
}

impl RuleError {
    /// True for errors caused by configuration rather than by the tree.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RuleError::InvalidPattern { .. }
                | RuleError::InvalidConfig { .. }
                | RuleError::UnknownRule { .. }
        )
    }
}

/// A rule failed while the pipeline was running.
#[derive(Debug, Error)]
#[error("rule {rule} failed: {source}")]
pub struct PipelineError {
    /// Name of the rule (or follow-up rule) that failed.
    pub rule: String,
    #[source]
    pub source: RuleError,
}

impl PipelineError {
    /// Convert into the unified error for the compilation unit `file`.
    pub fn into_lint_error(self, file: &str) -> LintError {
        LintError::rule_failed(self.rule, file, self.source.to_string())
    }
}

impl From<RuleError> for LintError {
    fn from(err: RuleError) -> Self {
        if err.is_configuration() {
            LintError::configuration(err.to_string())
        } else {
            LintError::internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintfix_core::error::OutputErrorCode;

    #[test]
    fn test_configuration_errors_map_to_invalid_arguments() {
        let err = RuleError::UnknownRule {
            name: "NoSuchRule".to_string(),
        };
        let lint: LintError = err.into();
        assert_eq!(lint.error_code(), OutputErrorCode::InvalidArguments);
    }

    #[test]
    fn test_invariant_errors_map_to_internal() {
        let err = RuleError::RenameBoundExceeded {
            name: "n".to_string(),
            node: NodeId(4),
            attempts: 10_000,
        };
        let lint: LintError = err.into();
        assert_eq!(lint.error_code(), OutputErrorCode::InternalError);
    }

    #[test]
    fn test_pipeline_error_names_rule_and_file() {
        let err = PipelineError {
            rule: "GenericWhitespace".to_string(),
            source: RuleError::Cst(CstError::MissingAncestor {
                expected: "parent",
                node: NodeId(1),
            }),
        };
        let lint = err.into_lint_error("A.json");
        assert_eq!(lint.error_code(), OutputErrorCode::RuleFailed);
        let message = lint.to_string();
        assert!(message.contains("GenericWhitespace"));
        assert!(message.contains("A.json"));
    }
}
