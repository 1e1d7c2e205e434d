// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Identity-preserving reconstruction of a node from its mapped children.

use std::sync::Arc;

use super::formatting::Padded;
use super::kinds::{
    Assign, Binary, Block, ClassDecl, CompilationUnit, FieldAccess, ForControl, ForLoop, Lambda,
    MethodDecl, MethodInvocation, NamedVar, Return, TypeParameter, TypeParameters, Unary,
    VariableDecls,
};
use super::{NodeKind, NodeRef};

/// Tracks whether any mapped child came back as a different node.
struct ChildMapper<'f, E> {
    f: &'f mut dyn FnMut(&NodeRef) -> Result<NodeRef, E>,
    changed: bool,
}

impl<E> ChildMapper<'_, E> {
    fn one(&mut self, child: &NodeRef) -> Result<NodeRef, E> {
        let mapped = (self.f)(child)?;
        if !Arc::ptr_eq(&mapped, child) {
            self.changed = true;
        }
        Ok(mapped)
    }

    fn opt(&mut self, child: &Option<NodeRef>) -> Result<Option<NodeRef>, E> {
        child.as_ref().map(|c| self.one(c)).transpose()
    }

    fn many(&mut self, children: &[NodeRef]) -> Result<Vec<NodeRef>, E> {
        children.iter().map(|c| self.one(c)).collect()
    }

    fn padded(&mut self, child: &Padded<NodeRef>) -> Result<Padded<NodeRef>, E> {
        Ok(Padded::new(child.before.clone(), self.one(&child.elem)?))
    }

    fn padded_many(&mut self, children: &Padded<Vec<NodeRef>>) -> Result<Padded<Vec<NodeRef>>, E> {
        Ok(Padded::new(children.before.clone(), self.many(&children.elem)?))
    }
}

/// Apply `f` to every direct child of `node`, in source order.
///
/// If every child maps to the identical `Arc`, `node` itself is returned.
/// Otherwise a new node with the same id and formatting is built around the
/// mapped children. Errors from `f` abort the mapping.
pub fn map_children<E, F>(node: &NodeRef, mut f: F) -> Result<NodeRef, E>
where
    F: FnMut(&NodeRef) -> Result<NodeRef, E>,
{
    let mut m = ChildMapper {
        f: &mut f,
        changed: false,
    };
    let kind = match &node.kind {
        NodeKind::CompilationUnit(n) => NodeKind::CompilationUnit(CompilationUnit {
            classes: m.many(&n.classes)?,
            eof: n.eof.clone(),
        }),
        NodeKind::ClassDecl(n) => NodeKind::ClassDecl(ClassDecl {
            modifiers: m.many(&n.modifiers)?,
            kind: n.kind.clone(),
            name: m.one(&n.name)?,
            type_parameters: m.opt(&n.type_parameters)?,
            extends: n.extends.as_ref().map(|e| m.padded(e)).transpose()?,
            body: m.one(&n.body)?,
            ty: n.ty.clone(),
        }),
        NodeKind::Block(n) => NodeKind::Block(Block {
            statements: m.many(&n.statements)?,
            end: n.end.clone(),
        }),
        NodeKind::MethodDecl(n) => NodeKind::MethodDecl(MethodDecl {
            modifiers: m.many(&n.modifiers)?,
            type_parameters: m.opt(&n.type_parameters)?,
            return_type: m.opt(&n.return_type)?,
            name: m.one(&n.name)?,
            params: m.padded_many(&n.params)?,
            body: m.opt(&n.body)?,
        }),
        NodeKind::VariableDecls(n) => NodeKind::VariableDecls(VariableDecls {
            modifiers: m.many(&n.modifiers)?,
            type_expr: m.opt(&n.type_expr)?,
            vars: m.many(&n.vars)?,
        }),
        NodeKind::NamedVar(n) => NodeKind::NamedVar(NamedVar {
            name: m.one(&n.name)?,
            initializer: n.initializer.as_ref().map(|i| m.padded(i)).transpose()?,
        }),
        NodeKind::Lambda(n) => NodeKind::Lambda(Lambda {
            params: m.many(&n.params)?,
            parenthesized: n.parenthesized,
            body: m.padded(&n.body)?,
        }),
        NodeKind::ForLoop(n) => NodeKind::ForLoop(ForLoop {
            control: m.one(&n.control)?,
            body: m.one(&n.body)?,
        }),
        NodeKind::ForControl(n) => NodeKind::ForControl(ForControl {
            init: m.many(&n.init)?,
            condition: m.one(&n.condition)?,
            update: m.many(&n.update)?,
        }),
        NodeKind::TypeParameters(n) => NodeKind::TypeParameters(TypeParameters {
            params: m.many(&n.params)?,
        }),
        NodeKind::TypeParameter(n) => NodeKind::TypeParameter(TypeParameter {
            name: m.one(&n.name)?,
            bounds: n.bounds.as_ref().map(|b| m.padded_many(b)).transpose()?,
        }),
        NodeKind::FieldAccess(n) => NodeKind::FieldAccess(FieldAccess {
            target: m.one(&n.target)?,
            name: m.one(&n.name)?,
        }),
        NodeKind::MethodInvocation(n) => NodeKind::MethodInvocation(MethodInvocation {
            select: m.opt(&n.select)?,
            name: m.one(&n.name)?,
            args: m.padded_many(&n.args)?,
        }),
        NodeKind::Assign(n) => NodeKind::Assign(Assign {
            target: m.one(&n.target)?,
            value: m.padded(&n.value)?,
        }),
        NodeKind::Binary(n) => NodeKind::Binary(Binary {
            left: m.one(&n.left)?,
            operator: n.operator.clone(),
            right: m.one(&n.right)?,
        }),
        NodeKind::Unary(n) => NodeKind::Unary(Unary {
            operator: n.operator.clone(),
            operand: m.one(&n.operand)?,
            postfix: n.postfix,
        }),
        NodeKind::Return(n) => NodeKind::Return(Return {
            expression: m.opt(&n.expression)?,
        }),
        NodeKind::Modifier(_) | NodeKind::Ident(_) | NodeKind::Literal(_) | NodeKind::Empty(_) => {
            return Ok(Arc::clone(node));
        }
    };
    if m.changed {
        Ok(Arc::new(node.with_kind(kind)))
    } else {
        Ok(Arc::clone(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use crate::nodes::{JavaType, Primitive};

    #[test]
    fn test_identity_when_nothing_changes() {
        let mut b = TreeBuilder::new();
        let x = b.ident("", "x");
        let one = b.literal(" ", "1", JavaType::Primitive(Primitive::Int));
        let stmt = b.assign(" ", x, " ", one);
        let block = b.block("", vec![stmt], "\n");
        let mapped = map_children(&block, |c| Ok::<_, ()>(Arc::clone(c))).unwrap();
        assert!(Arc::ptr_eq(&mapped, &block));
    }

    #[test]
    fn test_changed_child_rebuilds_parent_only() {
        let mut b = TreeBuilder::new();
        let first = b.empty(" ");
        let second = b.empty("  ");
        let block = b.block(" ", vec![first.clone(), second.clone()], "");
        let first_id = first.id;
        let mapped = map_children(&block, |c| {
            if c.id == first_id {
                Ok::<_, ()>(Arc::new(c.with_prefix("")))
            } else {
                Ok(Arc::clone(c))
            }
        })
        .unwrap();
        assert!(!Arc::ptr_eq(&mapped, &block));
        assert_eq!(mapped.id, block.id);
        assert_eq!(mapped.formatting, block.formatting);
        let statements = &mapped.as_block().unwrap().statements;
        assert_eq!(statements[0].prefix(), "");
        assert!(Arc::ptr_eq(&statements[1], &second));
    }

    #[test]
    fn test_error_aborts_mapping() {
        let mut b = TreeBuilder::new();
        let inner = b.empty("");
        let block = b.block("", vec![inner], "");
        let result = map_children(&block, |_| Err::<NodeRef, _>("boom"));
        assert_eq!(result.unwrap_err(), "boom");
    }
}
