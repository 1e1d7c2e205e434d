// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and transformer trait definitions for tree traversal.

use super::dispatch::{transform_node, walk_children};
use super::transform::{maybe_transform, TransformLog};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::nodes::{
    Assign, Binary, Block, ClassDecl, CompilationUnit, Empty, FieldAccess, ForControl, ForLoop,
    Ident, Lambda, Literal, MethodDecl, MethodInvocation, Modifier, NamedVar, Node, NodeRef,
    Return, TypeParameter, TypeParameters, Unary, VariableDecls,
};

/// Result of visiting a node - controls traversal behavior.
///
/// When a visitor method returns a `VisitResult`, it controls how the walker
/// proceeds with traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// The walker will not descend into this node's children, but `leave_*`
    /// will still be called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called. The walk
    /// function will return immediately.
    Stop,
}

/// Macro to generate visitor trait method signatures.
///
/// This macro generates pairs of `visit_*` and `leave_*` methods with default
/// implementations that return `VisitResult::Continue` and do nothing, respectively.
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, cursor: &Cursor<'_>, node: &$node_type) -> VisitResult {
                    VisitResult::Continue
                }

                $(#[$meta])*
                #[doc = concat!("Leave a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called after all children have been visited. Called even if `SkipChildren` was returned."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, cursor: &Cursor<'_>, node: &$node_type) {}
            )*
        }
    };
}

/// Macro to generate transformer trait method signatures.
///
/// Each generated `visit_*` method defaults to transforming the node's
/// children and rebuilding the node only if one of them changed.
macro_rules! transformer_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Transform a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "`cursor` is positioned at the node. Return the original `Arc` to leave it unchanged."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, cursor: &Cursor<'_>, node: &$node_type) -> Result<NodeRef> {
                    walk_children(self, cursor)
                }
            )*
        }
    };
}

/// Immutable visitor for tree traversal.
///
/// Implement this trait to query a tree without modifying it. Each node kind
/// has a corresponding `visit_*` and `leave_*` method pair; both receive the
/// cursor at the node, so ancestors are always reachable.
///
/// # Traversal Order
///
/// - `visit_*` is called in **pre-order** (before children)
/// - `leave_*` is called in **post-order** (after children)
/// - Children are visited in source order
///
/// # Control Flow
///
/// - Return `VisitResult::Continue` to traverse into children
/// - Return `VisitResult::SkipChildren` to skip children (but `leave_*` still called)
/// - Return `VisitResult::Stop` to halt traversal immediately
///
/// # Example
///
/// ```
/// use lintfix_cst::cursor::Cursor;
/// use lintfix_cst::nodes::Ident;
/// use lintfix_cst::visitor::{VisitResult, Visitor};
///
/// struct NameCollector {
///     names: Vec<String>,
/// }
///
/// impl Visitor for NameCollector {
///     fn visit_ident(&mut self, _cursor: &Cursor<'_>, node: &Ident) -> VisitResult {
///         self.names.push(node.name.clone());
///         VisitResult::Continue
///     }
/// }
/// ```
pub trait Visitor {
    // Declarations
    visitor_methods! {
        compilation_unit: CompilationUnit,
        class_decl: ClassDecl,
        method_decl: MethodDecl,
        variable_decls: VariableDecls,
        named_var: NamedVar,
        type_parameters: TypeParameters,
        type_parameter: TypeParameter,
        modifier: Modifier,
    }

    // Statements
    visitor_methods! {
        block: Block,
        for_loop: ForLoop,
        for_control: ForControl,
        return_stmt: Return,
        empty: Empty,
    }

    // Expressions
    visitor_methods! {
        lambda: Lambda,
        ident: Ident,
        field_access: FieldAccess,
        method_invocation: MethodInvocation,
        assign: Assign,
        binary: Binary,
        unary: Unary,
        literal: Literal,
    }
}

/// Rebuilding visitor for tree rewrites.
///
/// Every `visit_*` method returns the node to put in place of the visited
/// one. The defaults recurse into children and keep the original `Arc` when
/// nothing below changed, so a pass that rewrites nothing returns the
/// identical root. Overrides normally call [`walk_children`] first and then
/// decide through [`Transformer::maybe_transform`] whether to rewrite the
/// visited result.
pub trait Transformer {
    /// Log receiving one unit per rewritten node.
    fn log(&mut self) -> &mut TransformLog;

    // Declarations
    transformer_methods! {
        compilation_unit: CompilationUnit,
        class_decl: ClassDecl,
        method_decl: MethodDecl,
        variable_decls: VariableDecls,
        named_var: NamedVar,
        type_parameters: TypeParameters,
        type_parameter: TypeParameter,
        modifier: Modifier,
    }

    // Statements
    transformer_methods! {
        block: Block,
        for_loop: ForLoop,
        for_control: ForControl,
        return_stmt: Return,
        empty: Empty,
    }

    // Expressions
    transformer_methods! {
        lambda: Lambda,
        ident: Ident,
        field_access: FieldAccess,
        method_invocation: MethodInvocation,
        assign: Assign,
        binary: Binary,
        unary: Unary,
        literal: Literal,
    }

    /// Dispatch the node at `cursor` to its `visit_*` method.
    fn transform(&mut self, cursor: &Cursor<'_>) -> Result<NodeRef> {
        transform_node(self, cursor)
    }

    /// Rewrite `visited` when `should_apply` holds, recording the change
    /// against `original`. See [`maybe_transform`].
    fn maybe_transform<F>(
        &mut self,
        original: &NodeRef,
        should_apply: bool,
        visited: NodeRef,
        rewrite: F,
    ) -> NodeRef
    where
        F: FnOnce(&Node) -> Node,
    {
        maybe_transform(self.log(), original, should_apply, visited, rewrite)
    }
}
