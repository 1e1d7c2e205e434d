//! `FinalLocalVariable`: declare locals that are never reassigned `final`.
//!
//! A local qualifies when nothing in its scope writes to it again: no
//! assignment or increment when it has an initializer, at most one write
//! outside any loop when it does not. Writes are matched by the
//! declaration id their target resolves to, never by name. Fields,
//! parameters and lambda parameters are left alone, and a declaration of
//! several variables changes only when every one of them qualifies.

use std::sync::Arc;

use lintfix_cst::builder::TreeBuilder;
use lintfix_cst::nodes::{Assign, Node, NodeId, NodeKind, Unary, VariableDecls};
use lintfix_cst::visitor::{
    run_transformer, walk, walk_children, TransformLog, Transformer, VisitResult, Visitor,
};
use lintfix_cst::{Cursor, NodeRef};

use crate::error::RuleError;
use crate::rule::{Rule, RuleOutput};

#[derive(Debug, Clone, Copy, Default)]
pub struct FinalLocalVariable;

impl FinalLocalVariable {
    pub const NAME: &'static str = "FinalLocalVariable";
}

impl Rule for FinalLocalVariable {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, tree: &NodeRef) -> Result<RuleOutput, RuleError> {
        let mut add_final = AddFinal {
            log: TransformLog::new(Self::NAME),
            ids: TreeBuilder::starting_at(max_id(tree) + 1),
        };
        Ok(run_transformer(&mut add_final, tree)?.into())
    }
}

struct AddFinal {
    log: TransformLog,
    /// Allocates ids for inserted modifiers.
    ids: TreeBuilder,
}

impl Transformer for AddFinal {
    fn log(&mut self) -> &mut TransformLog {
        &mut self.log
    }

    fn visit_variable_decls(
        &mut self,
        cursor: &Cursor<'_>,
        node: &VariableDecls,
    ) -> lintfix_cst::Result<NodeRef> {
        let visited = walk_children(self, cursor)?;
        let should_apply = is_local(cursor)
            && node.type_expr.is_some()
            && !node.vars.is_empty()
            && !node.modifiers.iter().any(|m| m.is_modifier("final"))
            && cursor
                .scope()
                .is_some_and(|scope| node.vars.iter().all(|var| is_effectively_final(scope, var)));
        let modifier = should_apply.then(|| self.ids.modifier("", "final"));
        Ok(self.maybe_transform(cursor.node(), should_apply, visited, |decls| match modifier {
            Some(modifier) => with_final(decls, &modifier),
            None => decls.clone(),
        }))
    }
}

/// A statement in a method body or a `for` initializer.
fn is_local(cursor: &Cursor<'_>) -> bool {
    let Some(owner) = cursor.parent() else {
        return false;
    };
    match &owner.node().kind {
        NodeKind::Block(_) => !owner
            .parent_node()
            .is_some_and(|n| matches!(n.kind, NodeKind::ClassDecl(_))),
        NodeKind::ForControl(_) => true,
        _ => false,
    }
}

fn is_effectively_final(scope: &NodeRef, var: &NodeRef) -> bool {
    let mut writes = CountWrites {
        target: var.id,
        writes: 0,
    };
    walk(&mut writes, &Cursor::root(scope));
    let initialized = var.as_named_var().is_some_and(|v| v.initializer.is_some());
    if initialized {
        writes.writes == 0
    } else {
        writes.writes <= 1
    }
}

/// `final` first, taking over the leading whitespace of the declaration.
fn with_final(node: &Node, modifier: &NodeRef) -> Node {
    let Some(decls) = node.as_variable_decls() else {
        return node.clone();
    };
    let leading = decls
        .modifiers
        .first()
        .or(decls.type_expr.as_ref())
        .map_or("", |first| first.prefix());

    let mut modifiers = vec![Arc::new(modifier.with_prefix(leading))];
    modifiers.extend(decls.modifiers.iter().enumerate().map(|(i, m)| {
        if i == 0 {
            Arc::new(m.with_prefix(" "))
        } else {
            Arc::clone(m)
        }
    }));
    let type_expr = decls.type_expr.as_ref().map(|t| {
        if decls.modifiers.is_empty() {
            Arc::new(t.with_prefix(" "))
        } else {
            Arc::clone(t)
        }
    });
    node.with_kind(NodeKind::VariableDecls(VariableDecls {
        modifiers,
        type_expr,
        vars: decls.vars.clone(),
    }))
}

// ============================================================================
// Queries
// ============================================================================

/// Counts writes to one variable. A write inside a loop counts twice.
struct CountWrites {
    target: NodeId,
    writes: usize,
}

impl CountWrites {
    fn record(&mut self, cursor: &Cursor<'_>, written: &NodeRef) {
        let resolved = written
            .as_ident()
            .is_some_and(|ident| ident.declaration == Some(self.target));
        if resolved {
            let in_loop = cursor
                .ancestors()
                .any(|n| matches!(n.kind, NodeKind::ForLoop(_)));
            self.writes += if in_loop { 2 } else { 1 };
        }
    }
}

impl Visitor for CountWrites {
    fn visit_assign(&mut self, cursor: &Cursor<'_>, node: &Assign) -> VisitResult {
        self.record(cursor, &node.target);
        VisitResult::Continue
    }

    fn visit_unary(&mut self, cursor: &Cursor<'_>, node: &Unary) -> VisitResult {
        if node.operator == "++" || node.operator == "--" {
            self.record(cursor, &node.operand);
        }
        VisitResult::Continue
    }
}

fn max_id(node: &Node) -> u32 {
    node.children()
        .into_iter()
        .map(|child| max_id(child))
        .fold(node.id.as_u32(), u32::max)
}
