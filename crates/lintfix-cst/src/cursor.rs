// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Upward navigation from the node being visited.
//!
//! A [`Cursor`] pairs a node with the cursor of its parent. Walks build the
//! chain on the stack as they descend, one link per level, so a visitor can
//! ask for the nearest enclosing class or scope without nodes storing parent
//! pointers. A cursor borrows the tree version it was built from and cannot
//! outlive the walk that created it.

use crate::error::{CstError, Result};
use crate::nodes::{Node, NodeKind, NodeRef};

/// A node and the chain of its ancestors up to the root.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    node: &'a NodeRef,
    parent: Option<&'a Cursor<'a>>,
}

impl<'a> Cursor<'a> {
    /// A cursor at the root of a tree.
    pub fn root(node: &'a NodeRef) -> Self {
        Cursor { node, parent: None }
    }

    /// A cursor at `node`, a child of this cursor's node.
    pub fn child<'b>(&'b self, node: &'b NodeRef) -> Cursor<'b> {
        Cursor {
            node,
            parent: Some(self),
        }
    }

    pub fn node(&self) -> &'a NodeRef {
        self.node
    }

    pub fn parent(&self) -> Option<&'a Cursor<'a>> {
        self.parent
    }

    pub fn parent_node(&self) -> Option<&'a NodeRef> {
        self.parent.map(|p| p.node)
    }

    /// The parent node; the root has none.
    pub fn parent_or_err(&self) -> Result<&'a NodeRef> {
        self.parent_node().ok_or(CstError::MissingAncestor {
            expected: "parent",
            node: self.node.id,
        })
    }

    /// Ancestor nodes, nearest first, excluding this node.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors { next: self.parent }
    }

    /// This node followed by its ancestors.
    pub fn path(&self) -> impl Iterator<Item = &'a NodeRef> {
        std::iter::once(self.node).chain(self.ancestors())
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    pub fn first_ancestor(&self, predicate: impl Fn(&Node) -> bool) -> Option<&'a NodeRef> {
        self.ancestors().find(|n| predicate(n))
    }

    /// Like [`Cursor::first_ancestor`], failing with the name of the kind
    /// that was expected.
    pub fn first_ancestor_or_err(
        &self,
        expected: &'static str,
        predicate: impl Fn(&Node) -> bool,
    ) -> Result<&'a NodeRef> {
        self.first_ancestor(predicate)
            .ok_or(CstError::MissingAncestor {
                expected,
                node: self.node.id,
            })
    }

    pub fn enclosing_class(&self) -> Option<&'a NodeRef> {
        self.first_ancestor(|n| matches!(n.kind, NodeKind::ClassDecl(_)))
    }

    pub fn enclosing_method(&self) -> Option<&'a NodeRef> {
        self.first_ancestor(|n| matches!(n.kind, NodeKind::MethodDecl(_)))
    }

    /// The innermost scope-introducing ancestor.
    pub fn scope(&self) -> Option<&'a NodeRef> {
        self.first_ancestor(|n| n.kind.introduces_scope())
    }
}

/// Iterator over a cursor's ancestor nodes.
pub struct Ancestors<'a> {
    next: Option<&'a Cursor<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.next?;
        self.next = cursor.parent;
        Some(cursor.node)
    }
}

// ============================================================================
// Declaration kinds
// ============================================================================

/// Where a [`NamedVar`](crate::nodes::NamedVar) is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// A field of a class body.
    Field,
    /// A local variable in a block or a `for` initializer.
    LocalVariable,
    /// A method or constructor parameter.
    Parameter,
    /// A lambda parameter.
    LambdaParameter,
}

impl DeclarationKind {
    /// Classify the named variable at `cursor`.
    pub fn of(cursor: &Cursor<'_>) -> Result<DeclarationKind> {
        let decls = cursor.parent().ok_or(CstError::MissingAncestor {
            expected: "VariableDecls",
            node: cursor.node().id,
        })?;
        if !matches!(decls.node().kind, NodeKind::VariableDecls(_)) {
            return Err(CstError::UnexpectedParent {
                expected: "VariableDecls",
                found: decls.node().kind.name(),
                node: cursor.node().id,
            });
        }
        let Some(owner) = decls.parent() else {
            return Ok(DeclarationKind::LocalVariable);
        };
        Ok(match &owner.node().kind {
            NodeKind::MethodDecl(_) => DeclarationKind::Parameter,
            NodeKind::Lambda(_) => DeclarationKind::LambdaParameter,
            NodeKind::Block(_)
                if owner
                    .parent_node()
                    .is_some_and(|n| matches!(n.kind, NodeKind::ClassDecl(_))) =>
            {
                DeclarationKind::Field
            }
            _ => DeclarationKind::LocalVariable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use crate::nodes::{ClassType, JavaType, NamedVar};
    use crate::visitor::{walk_tree, VisitResult, Visitor};

    /// Records the declaration kind and scope kind of every named variable.
    #[derive(Default)]
    struct Declarations {
        found: Vec<(String, DeclarationKind, &'static str)>,
    }

    impl Visitor for Declarations {
        fn visit_named_var(&mut self, cursor: &Cursor<'_>, node: &NamedVar) -> VisitResult {
            let name = node.name.simple_name().unwrap_or_default().to_string();
            let kind = DeclarationKind::of(cursor).unwrap();
            let scope = cursor.scope().unwrap().kind.name();
            self.found.push((name, kind, scope));
            VisitResult::Continue
        }
    }

    #[test]
    fn test_declaration_kinds_and_scopes() {
        let mut b = TreeBuilder::new();
        // class A { int f; void m(int p) { int l; for (int i;;) {} Runnable r = x -> {}; } }
        let (field, _) = b.local("\n    ", "int", "f", None);
        let (param, _) = b.param("", "int", "p");
        let (local, _) = b.local("\n        ", "int", "l", None);
        let (init, _) = b.local("", "int", "i", None);
        let empty_cond = b.empty("");
        let empty_update = b.empty("");
        let control = b.for_control(" ", vec![init], empty_cond, vec![empty_update]);
        let loop_body = b.block(" ", vec![], "");
        let for_loop = b.for_loop("\n        ", control, loop_body);
        let lambda_param = b.lambda_param("", "x");
        let lambda_body = b.block(" ", vec![], "");
        let lambda = b.lambda(" ", vec![lambda_param], false, " ", lambda_body);
        let (holder, _) = b.local("\n        ", "Runnable", "r", Some(lambda));
        let body = b.block(" ", vec![local, for_loop, holder], "\n    ");
        let void = b.ident("", "void");
        let method = b.method("\n    ", vec![], Some(void), "m", vec![param], Some(body));
        let class_body = b.block(" ", vec![field, method], "\n");
        let class = b.class("", vec![], "A", None, class_body, JavaType::class(ClassType::new("A")));
        let root = b.compilation_unit(vec![class], "");

        let mut visitor = Declarations::default();
        walk_tree(&mut visitor, &root);
        assert_eq!(
            visitor.found,
            vec![
                ("f".to_string(), DeclarationKind::Field, "Block"),
                ("p".to_string(), DeclarationKind::Parameter, "MethodDecl"),
                ("l".to_string(), DeclarationKind::LocalVariable, "Block"),
                ("i".to_string(), DeclarationKind::LocalVariable, "ForLoop"),
                ("r".to_string(), DeclarationKind::LocalVariable, "Block"),
                ("x".to_string(), DeclarationKind::LambdaParameter, "Lambda"),
            ]
        );
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let mut b = TreeBuilder::new();
        let leaf = b.ident("", "x");
        let block = b.block("", vec![leaf.clone()], "");
        let root = b.compilation_unit(vec![block.clone()], "");

        let root_cursor = Cursor::root(&root);
        let block_cursor = root_cursor.child(&block);
        let leaf_cursor = block_cursor.child(&leaf);

        let ids: Vec<_> = leaf_cursor.ancestors().map(|n| n.id).collect();
        assert_eq!(ids, vec![block.id, root.id]);
        let path: Vec<_> = leaf_cursor.path().map(|n| n.id).collect();
        assert_eq!(path, vec![leaf.id, block.id, root.id]);
        assert_eq!(leaf_cursor.depth(), 2);
        assert_eq!(leaf_cursor.scope().map(|n| n.id), Some(block.id));
    }

    #[test]
    fn test_missing_ancestor_errors() {
        let mut b = TreeBuilder::new();
        let root = b.ident("", "x");
        let cursor = Cursor::root(&root);
        assert_eq!(
            cursor.parent_or_err().unwrap_err(),
            CstError::MissingAncestor {
                expected: "parent",
                node: root.id
            }
        );
        let err = cursor
            .first_ancestor_or_err("ClassDecl", |n| matches!(n.kind, NodeKind::ClassDecl(_)))
            .unwrap_err();
        assert!(err.to_string().contains("ClassDecl"));
    }

    #[test]
    fn test_named_var_outside_declarations_is_rejected() {
        let mut b = TreeBuilder::new();
        let var = b.named_var("", "x", None);
        let block = b.block("", vec![var.clone()], "");
        let root_cursor = Cursor::root(&block);
        let cursor = root_cursor.child(&var);
        assert_eq!(
            DeclarationKind::of(&cursor).unwrap_err(),
            CstError::UnexpectedParent {
                expected: "VariableDecls",
                found: "Block",
                node: var.id
            }
        );
    }
}
