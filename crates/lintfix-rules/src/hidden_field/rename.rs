//! Capture-avoiding renaming of one declaration and its references.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use lintfix_cst::nodes::{Ident, NamedVar, Node, NodeKind, Var};
use lintfix_cst::visitor::{
    run_transformer, walk_children, walk_tree, TransformLog, Transformer, VisitResult, Visitor,
};
use lintfix_cst::{Cursor, NodeId, NodeRef};

use crate::error::RuleError;
use crate::rule::{Rule, RuleOutput};

use super::shadows::is_isolated;

/// Candidate names tried before a rename gives up.
pub const MAX_RENAME_ATTEMPTS: usize = 10_000;

/// The successor of a name: `n` becomes `n1`, `n1` becomes `n2`, `n09`
/// becomes `n10`. A trailing run of digits too large to increment gets a
/// `1` appended instead.
pub fn next_name(name: &str) -> String {
    let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &name[stem.len()..];
    if !stem.is_empty() {
        if let Some(next) = digits.parse::<u64>().ok().and_then(|n| n.checked_add(1)) {
            return format!("{stem}{next}");
        }
    }
    format!("{name}1")
}

/// Renames the variable declared by `target` to the first successor name
/// that neither matches an inherited member nor collides with another
/// binding in an overlapping scope. Every reference resolved to `target`
/// follows the declaration.
///
/// Inherited members are `supertype_members` plus those visible at the
/// declaration through each enclosing class, walking outward until a class
/// that does not see its enclosing class.
#[derive(Debug, Clone)]
pub struct RenameShadowedName {
    target: NodeId,
    supertype_members: Vec<Var>,
}

impl RenameShadowedName {
    pub const NAME: &'static str = "RenameShadowedName";

    pub fn new(target: NodeId, supertype_members: Vec<Var>) -> Self {
        RenameShadowedName {
            target,
            supertype_members,
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    fn fresh_name(&self, target: &Binding, found: &CollectBindings) -> Result<String, RuleError> {
        let mut candidate = next_name(&target.name);
        for _ in 0..MAX_RENAME_ATTEMPTS {
            if !self.collides(&candidate, target, found) {
                return Ok(candidate);
            }
            candidate = next_name(&candidate);
        }
        Err(RuleError::RenameBoundExceeded {
            name: target.name.clone(),
            node: target.id,
            attempts: MAX_RENAME_ATTEMPTS,
        })
    }

    fn collides(&self, candidate: &str, target: &Binding, found: &CollectBindings) -> bool {
        self.supertype_members.iter().any(|m| m.name == candidate)
            || found.inherited_in_view.iter().any(|name| name == candidate)
            || found.bindings.iter().any(|other| {
                other.id != target.id
                    && other.name == candidate
                    && (other.encloses(target) || target.encloses(other))
            })
    }
}

impl Rule for RenameShadowedName {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, tree: &NodeRef) -> Result<RuleOutput, RuleError> {
        let found = collect_bindings(tree, self.target);
        let Some(target) = found.bindings.iter().find(|b| b.id == self.target) else {
            debug!(target = %self.target, "declaration no longer present");
            return Ok(RuleOutput::unchanged(tree));
        };
        let new_name = self.fresh_name(target, &found)?;
        debug!(from = %target.name, to = %new_name, target = %self.target, "renaming");

        let mut rename = ApplyRename {
            log: TransformLog::new(Self::NAME),
            target: self.target,
            new_name,
        };
        Ok(run_transformer(&mut rename, tree)?.into())
    }
}

// ============================================================================
// Bindings
// ============================================================================

/// A named variable together with where it lives.
#[derive(Debug)]
struct Binding {
    id: NodeId,
    name: String,
    /// Innermost scope; `None` at top level.
    scope: Option<NodeId>,
    ancestors: HashSet<NodeId>,
}

impl Binding {
    /// True when `other` is declared somewhere inside this binding's scope.
    fn encloses(&self, other: &Binding) -> bool {
        match self.scope {
            Some(scope) => other.ancestors.contains(&scope),
            None => true,
        }
    }
}

struct CollectBindings {
    target: NodeId,
    bindings: Vec<Binding>,
    /// Names of the inherited members visible at `target`.
    inherited_in_view: Vec<String>,
}

impl Visitor for CollectBindings {
    fn visit_named_var(&mut self, cursor: &Cursor<'_>, node: &NamedVar) -> VisitResult {
        if cursor.node().id == self.target {
            self.inherited_in_view = inherited_in_view(cursor);
        }
        if let Some(name) = node.name.simple_name() {
            self.bindings.push(Binding {
                id: cursor.node().id,
                name: name.to_string(),
                scope: cursor.scope().map(|s| s.id),
                ancestors: cursor.ancestors().map(|n| n.id).collect(),
            });
        }
        VisitResult::Continue
    }
}

fn collect_bindings(tree: &NodeRef, target: NodeId) -> CollectBindings {
    let mut collector = CollectBindings {
        target,
        bindings: Vec::new(),
        inherited_in_view: Vec::new(),
    };
    walk_tree(&mut collector, tree);
    collector
}

/// Inherited member names of each class enclosing `cursor`, innermost
/// first, up to and including the first isolated class.
fn inherited_in_view(cursor: &Cursor<'_>) -> Vec<String> {
    let mut names = Vec::new();
    for class in cursor.ancestors().filter_map(|n| n.as_class_decl()) {
        names.extend(class.ty.visible_supertype_members().into_iter().map(|m| m.name));
        if is_isolated(class) {
            break;
        }
    }
    names
}

// ============================================================================
// Rewrite
// ============================================================================

struct ApplyRename {
    log: TransformLog,
    target: NodeId,
    new_name: String,
}

impl Transformer for ApplyRename {
    fn log(&mut self) -> &mut TransformLog {
        &mut self.log
    }

    fn visit_named_var(&mut self, cursor: &Cursor<'_>, _node: &NamedVar) -> lintfix_cst::Result<NodeRef> {
        let visited = walk_children(self, cursor)?;
        let original = cursor.node();
        let new_name = self.new_name.clone();
        Ok(self.maybe_transform(original, original.id == self.target, visited, |node| {
            renamed_declaration(node, &new_name)
        }))
    }

    fn visit_ident(&mut self, cursor: &Cursor<'_>, node: &Ident) -> lintfix_cst::Result<NodeRef> {
        let visited = walk_children(self, cursor)?;
        let should_apply = node.declaration == Some(self.target) && node.name != self.new_name;
        let new_name = self.new_name.clone();
        Ok(self.maybe_transform(cursor.node(), should_apply, visited, |ident| {
            renamed_ident(ident, &new_name)
        }))
    }
}

fn renamed_declaration(node: &Node, new_name: &str) -> Node {
    match node.as_named_var() {
        Some(var) => node.with_kind(NodeKind::NamedVar(NamedVar {
            name: Arc::new(renamed_ident(&var.name, new_name)),
            initializer: var.initializer.clone(),
        })),
        None => node.clone(),
    }
}

fn renamed_ident(node: &Node, new_name: &str) -> Node {
    match node.as_ident() {
        Some(ident) => node.with_kind(NodeKind::Ident(Ident {
            name: new_name.to_string(),
            ..ident.clone()
        })),
        None => node.clone(),
    }
}
