// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk and dispatch functions for tree traversal.
//!
//! Both traversals dispatch with an exhaustive `match` over [`NodeKind`]:
//! adding a node kind fails to compile until every walker handles it, while
//! adding a visitor never touches this module.
//!
//! - **Pre-order**: `visit_*` is called before descending into children
//! - **Post-order**: `leave_*` is called after all children have been visited
//! - **Source order**: Children are visited left-to-right, top-to-bottom
//!
//! # Control Flow
//!
//! - `VisitResult::Continue` - traverse into children
//! - `VisitResult::SkipChildren` - skip children but still call `leave_*`
//! - `VisitResult::Stop` - halt traversal immediately (no `leave_*` called)

use super::traits::{Transformer, VisitResult, Visitor};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::nodes::{map_children, NodeKind, NodeRef};

// ============================================================================
// Visitor walks
// ============================================================================

/// Walk the whole tree under `root` with `visitor`.
pub fn walk_tree<V: Visitor + ?Sized>(visitor: &mut V, root: &NodeRef) -> VisitResult {
    walk(visitor, &Cursor::root(root))
}

/// Walk the node at `cursor` and its descendants.
///
/// Traversal order:
/// 1. `visit_*` for the node
/// 2. Walk each child (in source order) unless skipped
/// 3. `leave_*` for the node
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, cursor: &Cursor<'_>) -> VisitResult {
    let node = cursor.node();
    match visit_node(visitor, cursor) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for child in node.children() {
                if walk(visitor, &cursor.child(child)) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    leave_node(visitor, cursor);
    VisitResult::Continue
}

fn visit_node<V: Visitor + ?Sized>(visitor: &mut V, cursor: &Cursor<'_>) -> VisitResult {
    match &cursor.node().kind {
        NodeKind::CompilationUnit(n) => visitor.visit_compilation_unit(cursor, n),
        NodeKind::ClassDecl(n) => visitor.visit_class_decl(cursor, n),
        NodeKind::Block(n) => visitor.visit_block(cursor, n),
        NodeKind::MethodDecl(n) => visitor.visit_method_decl(cursor, n),
        NodeKind::VariableDecls(n) => visitor.visit_variable_decls(cursor, n),
        NodeKind::NamedVar(n) => visitor.visit_named_var(cursor, n),
        NodeKind::Lambda(n) => visitor.visit_lambda(cursor, n),
        NodeKind::ForLoop(n) => visitor.visit_for_loop(cursor, n),
        NodeKind::ForControl(n) => visitor.visit_for_control(cursor, n),
        NodeKind::TypeParameters(n) => visitor.visit_type_parameters(cursor, n),
        NodeKind::TypeParameter(n) => visitor.visit_type_parameter(cursor, n),
        NodeKind::Modifier(n) => visitor.visit_modifier(cursor, n),
        NodeKind::Ident(n) => visitor.visit_ident(cursor, n),
        NodeKind::FieldAccess(n) => visitor.visit_field_access(cursor, n),
        NodeKind::MethodInvocation(n) => visitor.visit_method_invocation(cursor, n),
        NodeKind::Assign(n) => visitor.visit_assign(cursor, n),
        NodeKind::Binary(n) => visitor.visit_binary(cursor, n),
        NodeKind::Unary(n) => visitor.visit_unary(cursor, n),
        NodeKind::Literal(n) => visitor.visit_literal(cursor, n),
        NodeKind::Return(n) => visitor.visit_return_stmt(cursor, n),
        NodeKind::Empty(n) => visitor.visit_empty(cursor, n),
    }
}

fn leave_node<V: Visitor + ?Sized>(visitor: &mut V, cursor: &Cursor<'_>) {
    match &cursor.node().kind {
        NodeKind::CompilationUnit(n) => visitor.leave_compilation_unit(cursor, n),
        NodeKind::ClassDecl(n) => visitor.leave_class_decl(cursor, n),
        NodeKind::Block(n) => visitor.leave_block(cursor, n),
        NodeKind::MethodDecl(n) => visitor.leave_method_decl(cursor, n),
        NodeKind::VariableDecls(n) => visitor.leave_variable_decls(cursor, n),
        NodeKind::NamedVar(n) => visitor.leave_named_var(cursor, n),
        NodeKind::Lambda(n) => visitor.leave_lambda(cursor, n),
        NodeKind::ForLoop(n) => visitor.leave_for_loop(cursor, n),
        NodeKind::ForControl(n) => visitor.leave_for_control(cursor, n),
        NodeKind::TypeParameters(n) => visitor.leave_type_parameters(cursor, n),
        NodeKind::TypeParameter(n) => visitor.leave_type_parameter(cursor, n),
        NodeKind::Modifier(n) => visitor.leave_modifier(cursor, n),
        NodeKind::Ident(n) => visitor.leave_ident(cursor, n),
        NodeKind::FieldAccess(n) => visitor.leave_field_access(cursor, n),
        NodeKind::MethodInvocation(n) => visitor.leave_method_invocation(cursor, n),
        NodeKind::Assign(n) => visitor.leave_assign(cursor, n),
        NodeKind::Binary(n) => visitor.leave_binary(cursor, n),
        NodeKind::Unary(n) => visitor.leave_unary(cursor, n),
        NodeKind::Literal(n) => visitor.leave_literal(cursor, n),
        NodeKind::Return(n) => visitor.leave_return_stmt(cursor, n),
        NodeKind::Empty(n) => visitor.leave_empty(cursor, n),
    }
}

// ============================================================================
// Transformer dispatch
// ============================================================================

/// Dispatch the node at `cursor` to the transformer's `visit_*` method.
pub fn transform_node<T: Transformer + ?Sized>(
    transformer: &mut T,
    cursor: &Cursor<'_>,
) -> Result<NodeRef> {
    match &cursor.node().kind {
        NodeKind::CompilationUnit(n) => transformer.visit_compilation_unit(cursor, n),
        NodeKind::ClassDecl(n) => transformer.visit_class_decl(cursor, n),
        NodeKind::Block(n) => transformer.visit_block(cursor, n),
        NodeKind::MethodDecl(n) => transformer.visit_method_decl(cursor, n),
        NodeKind::VariableDecls(n) => transformer.visit_variable_decls(cursor, n),
        NodeKind::NamedVar(n) => transformer.visit_named_var(cursor, n),
        NodeKind::Lambda(n) => transformer.visit_lambda(cursor, n),
        NodeKind::ForLoop(n) => transformer.visit_for_loop(cursor, n),
        NodeKind::ForControl(n) => transformer.visit_for_control(cursor, n),
        NodeKind::TypeParameters(n) => transformer.visit_type_parameters(cursor, n),
        NodeKind::TypeParameter(n) => transformer.visit_type_parameter(cursor, n),
        NodeKind::Modifier(n) => transformer.visit_modifier(cursor, n),
        NodeKind::Ident(n) => transformer.visit_ident(cursor, n),
        NodeKind::FieldAccess(n) => transformer.visit_field_access(cursor, n),
        NodeKind::MethodInvocation(n) => transformer.visit_method_invocation(cursor, n),
        NodeKind::Assign(n) => transformer.visit_assign(cursor, n),
        NodeKind::Binary(n) => transformer.visit_binary(cursor, n),
        NodeKind::Unary(n) => transformer.visit_unary(cursor, n),
        NodeKind::Literal(n) => transformer.visit_literal(cursor, n),
        NodeKind::Return(n) => transformer.visit_return_stmt(cursor, n),
        NodeKind::Empty(n) => transformer.visit_empty(cursor, n),
    }
}

/// Transform every child of the node at `cursor`.
///
/// Returns the original node when no child changed identity, otherwise a
/// rebuilt node with the same id and formatting.
pub fn walk_children<T: Transformer + ?Sized>(
    transformer: &mut T,
    cursor: &Cursor<'_>,
) -> Result<NodeRef> {
    map_children(cursor.node(), |child| {
        transformer.transform(&cursor.child(child))
    })
}
