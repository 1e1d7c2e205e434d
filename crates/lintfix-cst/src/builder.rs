// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Id-allocating node constructors.
//!
//! [`TreeBuilder`] is the interface a parser targets: it hands out fresh,
//! increasing [`NodeId`]s in construction order and fills in the formatting
//! conventions of the printer (a keyword is separated from the name that
//! follows it by that name's prefix, and so on). The `prefix` argument of
//! every constructor is the whitespace printed before the node.

use std::sync::Arc;

use crate::nodes::{
    Assign, Binary, Block, ClassDecl, ClassKind, CompilationUnit, Empty, FieldAccess, ForControl,
    ForLoop, Formatting, Ident, JavaType, Lambda, Literal, MethodDecl, MethodInvocation, Modifier,
    NamedVar, Node, NodeId, NodeKind, NodeRef, Padded, Return, TypeParameter, TypeParameters,
    Unary, VariableDecls,
};

/// Builds nodes with sequential ids.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    next_id: u32,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        TreeBuilder::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder { next_id: 1 }
    }

    /// A builder whose first id is `first`, for extending an existing tree.
    pub fn starting_at(first: u32) -> Self {
        TreeBuilder { next_id: first }
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn node_with(&mut self, formatting: Formatting, kind: NodeKind) -> NodeRef {
        Arc::new(Node::new(self.next_id(), formatting, kind))
    }

    pub fn node(&mut self, prefix: &str, kind: NodeKind) -> NodeRef {
        self.node_with(Formatting::prefixed(prefix), kind)
    }

    // ------------------------------------------------------------------------
    // Names and leaves
    // ------------------------------------------------------------------------

    pub fn ident(&mut self, prefix: &str, name: &str) -> NodeRef {
        self.typed_ident(prefix, name, JavaType::Unknown)
    }

    pub fn typed_ident(&mut self, prefix: &str, name: &str, ty: JavaType) -> NodeRef {
        self.node(
            prefix,
            NodeKind::Ident(Ident {
                name: name.to_string(),
                ty,
                declaration: None,
            }),
        )
    }

    /// A name resolved to the named variable `var`.
    pub fn reference(&mut self, prefix: &str, var: &NodeRef) -> NodeRef {
        let name = var.simple_name().unwrap_or_default().to_string();
        self.node(
            prefix,
            NodeKind::Ident(Ident {
                name,
                ty: JavaType::Unknown,
                declaration: Some(var.id),
            }),
        )
    }

    pub fn modifier(&mut self, prefix: &str, keyword: &str) -> NodeRef {
        self.node(
            prefix,
            NodeKind::Modifier(Modifier {
                keyword: keyword.to_string(),
            }),
        )
    }

    pub fn literal(&mut self, prefix: &str, text: &str, ty: JavaType) -> NodeRef {
        self.node(
            prefix,
            NodeKind::Literal(Literal {
                text: text.to_string(),
                ty,
            }),
        )
    }

    pub fn empty(&mut self, prefix: &str) -> NodeRef {
        self.node(prefix, NodeKind::Empty(Empty {}))
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    /// `name` or `name = initializer`, with one space around `=`'s left side.
    pub fn named_var(
        &mut self,
        prefix: &str,
        name: &str,
        initializer: Option<NodeRef>,
    ) -> NodeRef {
        let name = self.ident("", name);
        self.node(
            prefix,
            NodeKind::NamedVar(NamedVar {
                name,
                initializer: initializer.map(|init| Padded::new(" ", init)),
            }),
        )
    }

    pub fn var_decls(
        &mut self,
        prefix: &str,
        modifiers: Vec<NodeRef>,
        type_expr: Option<NodeRef>,
        vars: Vec<NodeRef>,
    ) -> NodeRef {
        self.node(
            prefix,
            NodeKind::VariableDecls(VariableDecls {
                modifiers,
                type_expr,
                vars,
            }),
        )
    }

    /// `type name [= initializer]`; returns the declaration and its variable.
    pub fn local(
        &mut self,
        prefix: &str,
        type_name: &str,
        name: &str,
        initializer: Option<NodeRef>,
    ) -> (NodeRef, NodeRef) {
        let type_expr = self.ident("", type_name);
        let var = self.named_var(" ", name, initializer);
        let decls = self.var_decls(prefix, Vec::new(), Some(type_expr), vec![var.clone()]);
        (decls, var)
    }

    /// A method parameter `type name`; returns the declaration and its variable.
    pub fn param(&mut self, prefix: &str, type_name: &str, name: &str) -> (NodeRef, NodeRef) {
        self.local(prefix, type_name, name, None)
    }

    /// An untyped lambda parameter.
    pub fn lambda_param(&mut self, prefix: &str, name: &str) -> NodeRef {
        let var = self.named_var("", name, None);
        self.var_decls(prefix, Vec::new(), None, vec![var])
    }

    /// A method, or a constructor when `return_type` is `None`.
    ///
    /// The name is separated from a preceding modifier or return type by
    /// one space.
    pub fn method(
        &mut self,
        prefix: &str,
        modifiers: Vec<NodeRef>,
        return_type: Option<NodeRef>,
        name: &str,
        params: Vec<NodeRef>,
        body: Option<NodeRef>,
    ) -> NodeRef {
        let name_prefix = if modifiers.is_empty() && return_type.is_none() {
            ""
        } else {
            " "
        };
        let name = self.ident(name_prefix, name);
        self.node(
            prefix,
            NodeKind::MethodDecl(MethodDecl {
                modifiers,
                type_parameters: None,
                return_type,
                name,
                params: Padded::bare(params),
                body,
            }),
        )
    }

    /// `modifiers class Name [extends Super] body`.
    ///
    /// `extends` is printed with one space before the keyword; the supertype
    /// node carries its own prefix.
    pub fn class(
        &mut self,
        prefix: &str,
        modifiers: Vec<NodeRef>,
        name: &str,
        extends: Option<NodeRef>,
        body: NodeRef,
        ty: JavaType,
    ) -> NodeRef {
        self.class_decl(prefix, ClassKind::Class, modifiers, name, extends, body, ty)
    }

    /// Like [`TreeBuilder::class`] for any declaration keyword.
    #[allow(clippy::too_many_arguments)]
    pub fn class_decl(
        &mut self,
        prefix: &str,
        kind: ClassKind,
        modifiers: Vec<NodeRef>,
        name: &str,
        extends: Option<NodeRef>,
        body: NodeRef,
        ty: JavaType,
    ) -> NodeRef {
        let keyword_before = if modifiers.is_empty() { "" } else { " " };
        let name = self.ident(" ", name);
        self.node(
            prefix,
            NodeKind::ClassDecl(ClassDecl {
                modifiers,
                kind: Padded::new(keyword_before, kind),
                name,
                type_parameters: None,
                extends: extends.map(|e| Padded::new(" ", e)),
                body,
                ty,
            }),
        )
    }

    /// A class declaring type parameters and no supertype.
    pub fn class_with_type_parameters(
        &mut self,
        prefix: &str,
        modifiers: Vec<NodeRef>,
        name: &str,
        type_parameters: NodeRef,
        body: NodeRef,
        ty: JavaType,
    ) -> NodeRef {
        let keyword_before = if modifiers.is_empty() { "" } else { " " };
        let name = self.ident(" ", name);
        self.node(
            prefix,
            NodeKind::ClassDecl(ClassDecl {
                modifiers,
                kind: Padded::new(keyword_before, ClassKind::Class),
                name,
                type_parameters: Some(type_parameters),
                extends: None,
                body,
                ty,
            }),
        )
    }

    pub fn type_parameters(&mut self, prefix: &str, params: Vec<NodeRef>) -> NodeRef {
        self.node(prefix, NodeKind::TypeParameters(TypeParameters { params }))
    }

    pub fn type_parameter(&mut self, prefix: &str, name: &str) -> NodeRef {
        let name = self.ident("", name);
        self.type_parameter_of(prefix, name, None)
    }

    pub fn type_parameter_of(
        &mut self,
        prefix: &str,
        name: NodeRef,
        bounds: Option<Padded<Vec<NodeRef>>>,
    ) -> NodeRef {
        self.node(prefix, NodeKind::TypeParameter(TypeParameter { name, bounds }))
    }

    pub fn compilation_unit(&mut self, classes: Vec<NodeRef>, eof: &str) -> NodeRef {
        self.node(
            "",
            NodeKind::CompilationUnit(CompilationUnit {
                classes,
                eof: eof.to_string(),
            }),
        )
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    /// `{ statements end}`; `end` is the whitespace before `}`.
    pub fn block(&mut self, prefix: &str, statements: Vec<NodeRef>, end: &str) -> NodeRef {
        self.node(
            prefix,
            NodeKind::Block(Block {
                statements,
                end: end.to_string(),
            }),
        )
    }

    pub fn for_loop(&mut self, prefix: &str, control: NodeRef, body: NodeRef) -> NodeRef {
        self.node(prefix, NodeKind::ForLoop(ForLoop { control, body }))
    }

    /// `(init; condition; update)`; `prefix` is the whitespace after `for`.
    pub fn for_control(
        &mut self,
        prefix: &str,
        init: Vec<NodeRef>,
        condition: NodeRef,
        update: Vec<NodeRef>,
    ) -> NodeRef {
        self.node(
            prefix,
            NodeKind::ForControl(ForControl {
                init,
                condition,
                update,
            }),
        )
    }

    pub fn return_stmt(&mut self, prefix: &str, expression: Option<NodeRef>) -> NodeRef {
        self.node(prefix, NodeKind::Return(Return { expression }))
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    pub fn field_access(&mut self, prefix: &str, target: NodeRef, name: NodeRef) -> NodeRef {
        self.node(prefix, NodeKind::FieldAccess(FieldAccess { target, name }))
    }

    pub fn method_invocation(
        &mut self,
        prefix: &str,
        select: Option<NodeRef>,
        name: NodeRef,
        args_before: &str,
        args: Vec<NodeRef>,
    ) -> NodeRef {
        self.node(
            prefix,
            NodeKind::MethodInvocation(MethodInvocation {
                select,
                name,
                args: Padded::new(args_before, args),
            }),
        )
    }

    /// `target before= value`.
    pub fn assign(&mut self, prefix: &str, target: NodeRef, before: &str, value: NodeRef) -> NodeRef {
        self.node(
            prefix,
            NodeKind::Assign(Assign {
                target,
                value: Padded::new(before, value),
            }),
        )
    }

    /// `left before operator right`.
    pub fn binary(
        &mut self,
        prefix: &str,
        left: NodeRef,
        before: &str,
        operator: &str,
        right: NodeRef,
    ) -> NodeRef {
        self.node(
            prefix,
            NodeKind::Binary(Binary {
                left,
                operator: Padded::new(before, operator.to_string()),
                right,
            }),
        )
    }

    pub fn unary(&mut self, prefix: &str, operator: &str, operand: NodeRef, postfix: bool) -> NodeRef {
        self.node(
            prefix,
            NodeKind::Unary(Unary {
                operator: operator.to_string(),
                operand,
                postfix,
            }),
        )
    }

    /// `params before-> body`.
    pub fn lambda(
        &mut self,
        prefix: &str,
        params: Vec<NodeRef>,
        parenthesized: bool,
        before: &str,
        body: NodeRef,
    ) -> NodeRef {
        self.node(
            prefix,
            NodeKind::Lambda(Lambda {
                params,
                parenthesized,
                body: Padded::new(before, body),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut b = TreeBuilder::starting_at(10);
        let a = b.ident("", "a");
        let c = b.ident("", "c");
        assert_eq!(a.id, NodeId(10));
        assert_eq!(c.id, NodeId(11));
    }

    #[test]
    fn test_reference_points_at_declaration() {
        let mut b = TreeBuilder::new();
        let (_, var) = b.local("", "int", "count", None);
        let reference = b.reference(" ", &var);
        let ident = reference.as_ident().unwrap();
        assert_eq!(ident.name, "count");
        assert_eq!(ident.declaration, Some(var.id));
    }

    #[test]
    fn test_class_with_type_parameters_keeps_id() {
        let mut b = TreeBuilder::new();
        let t = b.type_parameter("", "T");
        let params = b.type_parameters("", vec![t]);
        let body = b.block(" ", vec![], "");
        let class = b.class_with_type_parameters("", vec![], "A", params.clone(), body, JavaType::Unknown);
        let decl = class.as_class_decl().unwrap();
        assert_eq!(decl.type_parameters.as_ref().map(|p| p.id), Some(params.id));
    }
}
