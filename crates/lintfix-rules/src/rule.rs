//! The rule abstraction.
//!
//! A rule is a pure function from tree to tree. Besides the new tree it may
//! return follow-up rules, which the [`Pipeline`](crate::pipeline::Pipeline)
//! runs against its output before moving on to the next configured rule.

use std::fmt;

use lintfix_cst::visitor::{AstTransform, TransformOutcome};
use lintfix_cst::NodeRef;

use crate::error::RuleError;

/// A named, independently configured lint rule.
pub trait Rule: Send + Sync {
    /// Stable unique name, used in logs, transform units and the registry.
    fn name(&self) -> &str;

    /// Apply the rule to one compilation unit.
    fn apply(&self, tree: &NodeRef) -> Result<RuleOutput, RuleError>;
}

impl fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name()).finish()
    }
}

/// What one application of a rule produced.
#[derive(Debug)]
pub struct RuleOutput {
    /// The resulting tree; the input `Arc` itself when nothing changed.
    pub tree: NodeRef,
    /// Nodes this rule replaced.
    pub transforms: Vec<AstTransform>,
    /// Rules to run on `tree` once this rule has finished.
    pub and_then: Vec<Box<dyn Rule>>,
}

impl RuleOutput {
    /// Output of a rule that neither changed the tree nor scheduled anything.
    pub fn unchanged(tree: &NodeRef) -> Self {
        RuleOutput {
            tree: NodeRef::clone(tree),
            transforms: Vec::new(),
            and_then: Vec::new(),
        }
    }

    /// Schedule follow-up rules.
    pub fn and_then(mut self, rules: Vec<Box<dyn Rule>>) -> Self {
        self.and_then.extend(rules);
        self
    }
}

impl From<TransformOutcome> for RuleOutput {
    fn from(outcome: TransformOutcome) -> Self {
        RuleOutput {
            tree: outcome.tree,
            transforms: outcome.transforms,
            and_then: Vec::new(),
        }
    }
}
