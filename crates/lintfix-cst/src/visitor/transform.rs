// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Conditional rewrites and the record of what a pass changed.
//!
//! Every rewrite goes through [`maybe_transform`]: a rule computes the
//! ordinary recursive result for a node first, then decides whether its own
//! edit applies. Deeper edits are therefore never lost, and an edit on a
//! node wraps whatever its descendants already became.

use std::sync::Arc;

use super::traits::Transformer;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::nodes::{Node, NodeId, NodeRef};

/// Record that a rule replaced a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AstTransform {
    /// Name of the rule that made the change.
    pub rule: String,
    /// Id of the replaced node.
    pub node: NodeId,
}

/// The transform units of one pass of one rule.
#[derive(Debug, Clone, Default)]
pub struct TransformLog {
    rule: String,
    transforms: Vec<AstTransform>,
}

impl TransformLog {
    pub fn new(rule: impl Into<String>) -> Self {
        TransformLog {
            rule: rule.into(),
            transforms: Vec::new(),
        }
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn record(&mut self, node: NodeId) {
        self.transforms.push(AstTransform {
            rule: self.rule.clone(),
            node,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Drain the recorded units, leaving the log empty for the next pass.
    pub fn take(&mut self) -> Vec<AstTransform> {
        std::mem::take(&mut self.transforms)
    }
}

/// Apply `rewrite` to `visited` when `should_apply` holds.
///
/// `original` is the node as it was before the pass and `visited` is the
/// result of transforming its children. When `should_apply` is false,
/// `visited` is returned untouched, so changes deeper in the tree survive.
/// Otherwise the rewrite is applied to `visited` and a unit is recorded
/// against `original.id`.
pub fn maybe_transform<F>(
    log: &mut TransformLog,
    original: &NodeRef,
    should_apply: bool,
    visited: NodeRef,
    rewrite: F,
) -> NodeRef
where
    F: FnOnce(&Node) -> Node,
{
    if !should_apply {
        return visited;
    }
    log.record(original.id);
    Arc::new(rewrite(&visited))
}

/// Result of running one transformer over a tree.
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    pub tree: NodeRef,
    pub transforms: Vec<AstTransform>,
}

impl TransformOutcome {
    /// Outcome of a pass that changed nothing.
    pub fn unchanged(tree: NodeRef) -> Self {
        TransformOutcome {
            tree,
            transforms: Vec::new(),
        }
    }

    pub fn is_changed(&self) -> bool {
        !self.transforms.is_empty()
    }
}

/// Run `transformer` over the tree under `root`.
///
/// When no unit is recorded the returned tree is `root` itself.
pub fn run_transformer<T: Transformer + ?Sized>(
    transformer: &mut T,
    root: &NodeRef,
) -> Result<TransformOutcome> {
    let tree = transformer.transform(&Cursor::root(root))?;
    let transforms = transformer.log().take();
    Ok(TransformOutcome { tree, transforms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use crate::codegen::print;
    use crate::nodes::{Binary, Ident, NodeKind};
    use crate::visitor::walk_children;

    /// Renames `from` to `to` and tightens the operator of any binary
    /// expression that contains a renamed operand.
    struct RenameAndTighten {
        log: TransformLog,
        from: &'static str,
        to: &'static str,
    }

    impl RenameAndTighten {
        fn new() -> Self {
            RenameAndTighten {
                log: TransformLog::new("RenameAndTighten"),
                from: "x",
                to: "y",
            }
        }
    }

    impl Transformer for RenameAndTighten {
        fn log(&mut self) -> &mut TransformLog {
            &mut self.log
        }

        fn visit_ident(&mut self, cursor: &Cursor<'_>, node: &Ident) -> Result<NodeRef> {
            let visited = walk_children(self, cursor)?;
            let to = self.to;
            Ok(self.maybe_transform(cursor.node(), node.name == self.from, visited, |n| {
                n.with_kind(NodeKind::Ident(Ident {
                    name: to.to_string(),
                    ..node.clone()
                }))
            }))
        }

        fn visit_binary(&mut self, cursor: &Cursor<'_>, node: &Binary) -> Result<NodeRef> {
            let visited = walk_children(self, cursor)?;
            let mentions = [&node.left, &node.right]
                .iter()
                .any(|side| side.simple_name() == Some(self.from));
            let spaced = !node.operator.before.is_empty() || !node.right.prefix().is_empty();
            Ok(self.maybe_transform(cursor.node(), mentions && spaced, visited, |n| {
                let Some(binary) = n.as_binary() else {
                    return n.clone();
                };
                let right = Arc::new(binary.right.with_prefix(""));
                let mut operator = binary.operator.clone();
                operator.before.clear();
                n.with_kind(NodeKind::Binary(Binary {
                    left: binary.left.clone(),
                    operator,
                    right,
                }))
            }))
        }
    }

    fn sample() -> NodeRef {
        // x + z
        let mut b = TreeBuilder::new();
        let x = b.ident("", "x");
        let z = b.ident(" ", "z");
        b.binary("", x, " ", "+", z)
    }

    #[test]
    fn test_deep_edit_composes_with_outer_rewrite() {
        let root = sample();
        let outcome = run_transformer(&mut RenameAndTighten::new(), &root).unwrap();
        assert_eq!(print(&outcome.tree), "y+z");
        // Inner rename first, then the binary rewrite that wraps it.
        let changed: Vec<NodeId> = outcome.transforms.iter().map(|t| t.node).collect();
        let binary = root.as_binary().unwrap();
        assert_eq!(changed, vec![binary.left.id, root.id]);
        assert!(outcome.transforms.iter().all(|t| t.rule == "RenameAndTighten"));
        assert_eq!(outcome.tree.id, root.id);
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let root = sample();
        let first = run_transformer(&mut RenameAndTighten::new(), &root).unwrap();
        let second = run_transformer(&mut RenameAndTighten::new(), &first.tree).unwrap();
        assert!(!second.is_changed());
        assert!(Arc::ptr_eq(&second.tree, &first.tree));
    }

    #[test]
    fn test_false_predicate_returns_visited() {
        let mut b = TreeBuilder::new();
        let original = b.ident(" ", "a");
        let visited = Arc::new(original.with_prefix(""));
        let mut log = TransformLog::new("Test");
        let result = maybe_transform(&mut log, &original, false, visited.clone(), |n| {
            n.with_prefix("  ")
        });
        assert!(Arc::ptr_eq(&result, &visited));
        assert!(log.is_empty());
    }

    #[test]
    fn test_true_predicate_records_original_id() {
        let mut b = TreeBuilder::new();
        let original = b.ident(" ", "a");
        let mut log = TransformLog::new("Test");
        let result = maybe_transform(&mut log, &original, true, original.clone(), |n| {
            n.with_prefix("")
        });
        assert_eq!(result.prefix(), "");
        assert_eq!(result.id, original.id);
        assert_eq!(log.len(), 1);
        assert_eq!(
            log.take(),
            vec![AstTransform {
                rule: "Test".to_string(),
                node: original.id
            }]
        );
        assert!(log.is_empty());
    }
}
