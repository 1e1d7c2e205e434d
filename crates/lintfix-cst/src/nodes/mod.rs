// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Syntax tree nodes.
//!
//! A tree is a hierarchy of immutable [`Node`]s shared through [`NodeRef`]
//! (`Arc<Node>`). Editing a tree never mutates a node: the edited node and
//! its ancestors are rebuilt and every untouched subtree is shared with the
//! previous version. [`map_children`] implements that rebuild step.

mod children;
mod formatting;
mod kinds;
mod types;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use children::map_children;
pub use formatting::{Formatting, Padded};
pub use kinds::{
    Assign, Binary, Block, ClassDecl, CompilationUnit, Empty, FieldAccess, ForControl, ForLoop,
    Ident, Lambda, Literal, MethodDecl, MethodInvocation, Modifier, NamedVar, Return,
    TypeParameter, TypeParameters, Unary, VariableDecls,
};
pub use types::{ClassKind, ClassType, Flag, JavaType, Primitive, Var};

// ============================================================================
// Node Identity
// ============================================================================

/// A stable identifier for a syntax node.
///
/// Ids are assigned by whoever builds the tree and are carried over when a
/// node is rebuilt, so a declaration keeps its id across every version of
/// the tree. References name their declaration by id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(value: u32) -> Self {
        NodeId(value)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared handle to an immutable node.
pub type NodeRef = Arc<Node>;

// ============================================================================
// Node
// ============================================================================

/// A syntax node: identity, surrounding formatting, and kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Formatting::is_empty")]
    pub formatting: Formatting,
    pub kind: NodeKind,
}

/// The closed set of syntax kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    CompilationUnit(CompilationUnit),
    ClassDecl(ClassDecl),
    Block(Block),
    MethodDecl(MethodDecl),
    VariableDecls(VariableDecls),
    NamedVar(NamedVar),
    Lambda(Lambda),
    ForLoop(ForLoop),
    ForControl(ForControl),
    TypeParameters(TypeParameters),
    TypeParameter(TypeParameter),
    Modifier(Modifier),
    Ident(Ident),
    FieldAccess(FieldAccess),
    MethodInvocation(MethodInvocation),
    Assign(Assign),
    Binary(Binary),
    Unary(Unary),
    Literal(Literal),
    Return(Return),
    Empty(Empty),
}

impl NodeKind {
    /// The kind's name, as used in diagnostics and in the JSON `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::CompilationUnit(_) => "CompilationUnit",
            NodeKind::ClassDecl(_) => "ClassDecl",
            NodeKind::Block(_) => "Block",
            NodeKind::MethodDecl(_) => "MethodDecl",
            NodeKind::VariableDecls(_) => "VariableDecls",
            NodeKind::NamedVar(_) => "NamedVar",
            NodeKind::Lambda(_) => "Lambda",
            NodeKind::ForLoop(_) => "ForLoop",
            NodeKind::ForControl(_) => "ForControl",
            NodeKind::TypeParameters(_) => "TypeParameters",
            NodeKind::TypeParameter(_) => "TypeParameter",
            NodeKind::Modifier(_) => "Modifier",
            NodeKind::Ident(_) => "Ident",
            NodeKind::FieldAccess(_) => "FieldAccess",
            NodeKind::MethodInvocation(_) => "MethodInvocation",
            NodeKind::Assign(_) => "Assign",
            NodeKind::Binary(_) => "Binary",
            NodeKind::Unary(_) => "Unary",
            NodeKind::Literal(_) => "Literal",
            NodeKind::Return(_) => "Return",
            NodeKind::Empty(_) => "Empty",
        }
    }

    /// True for kinds that open a name scope: variables declared directly
    /// beneath them are visible only within them.
    pub fn introduces_scope(&self) -> bool {
        matches!(
            self,
            NodeKind::ClassDecl(_)
                | NodeKind::Block(_)
                | NodeKind::MethodDecl(_)
                | NodeKind::Lambda(_)
                | NodeKind::ForLoop(_)
        )
    }

    /// The type attributed to this node, if the kind carries one.
    pub fn resolved_type(&self) -> Option<&JavaType> {
        match self {
            NodeKind::Ident(ident) => Some(&ident.ty),
            NodeKind::Literal(literal) => Some(&literal.ty),
            NodeKind::ClassDecl(class) => Some(&class.ty),
            _ => None,
        }
    }
}

macro_rules! node_accessors {
    ($($base_name:ident : $variant:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("The [`", stringify!($variant), "`] payload, if this node is one.")]
                pub fn [<as_ $base_name>](&self) -> Option<&$variant> {
                    match &self.kind {
                        NodeKind::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            )*
        }
    };
}

impl Node {
    pub fn new(id: NodeId, formatting: Formatting, kind: NodeKind) -> Self {
        Node {
            id,
            formatting,
            kind,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.formatting.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.formatting.suffix
    }

    /// Same id and formatting, new payload.
    pub fn with_kind(&self, kind: NodeKind) -> Node {
        Node {
            id: self.id,
            formatting: self.formatting.clone(),
            kind,
        }
    }

    pub fn with_formatting(&self, formatting: Formatting) -> Node {
        Node {
            id: self.id,
            formatting,
            kind: self.kind.clone(),
        }
    }

    pub fn with_prefix(&self, prefix: impl Into<String>) -> Node {
        self.with_formatting(self.formatting.with_prefix(prefix))
    }

    pub fn with_suffix(&self, suffix: impl Into<String>) -> Node {
        self.with_formatting(self.formatting.with_suffix(suffix))
    }

    /// The simple name of an identifier, named variable, method or class.
    pub fn simple_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Ident(ident) => Some(&ident.name),
            NodeKind::NamedVar(var) => var.name.simple_name(),
            NodeKind::MethodDecl(method) => method.name.simple_name(),
            NodeKind::ClassDecl(class) => class.name.simple_name(),
            NodeKind::TypeParameter(param) => param.name.simple_name(),
            _ => None,
        }
    }

    /// True for a modifier node with the given keyword.
    pub fn is_modifier(&self, keyword: &str) -> bool {
        matches!(&self.kind, NodeKind::Modifier(m) if m.keyword == keyword)
    }

    node_accessors! {
        compilation_unit: CompilationUnit,
        class_decl: ClassDecl,
        block: Block,
        method_decl: MethodDecl,
        variable_decls: VariableDecls,
        named_var: NamedVar,
        lambda: Lambda,
        for_loop: ForLoop,
        for_control: ForControl,
        type_parameters: TypeParameters,
        type_parameter: TypeParameter,
        modifier: Modifier,
        ident: Ident,
        field_access: FieldAccess,
        method_invocation: MethodInvocation,
        assign: Assign,
        binary: Binary,
        unary: Unary,
        literal: Literal,
        return_stmt: Return,
        empty: Empty,
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&NodeRef> {
        let mut out: Vec<&NodeRef> = Vec::new();
        match &self.kind {
            NodeKind::CompilationUnit(n) => out.extend(&n.classes),
            NodeKind::ClassDecl(n) => {
                out.extend(&n.modifiers);
                out.push(&n.name);
                out.extend(&n.type_parameters);
                out.extend(n.extends.as_ref().map(|e| &e.elem));
                out.push(&n.body);
            }
            NodeKind::Block(n) => out.extend(&n.statements),
            NodeKind::MethodDecl(n) => {
                out.extend(&n.modifiers);
                out.extend(&n.type_parameters);
                out.extend(&n.return_type);
                out.push(&n.name);
                out.extend(&n.params.elem);
                out.extend(&n.body);
            }
            NodeKind::VariableDecls(n) => {
                out.extend(&n.modifiers);
                out.extend(&n.type_expr);
                out.extend(&n.vars);
            }
            NodeKind::NamedVar(n) => {
                out.push(&n.name);
                out.extend(n.initializer.as_ref().map(|i| &i.elem));
            }
            NodeKind::Lambda(n) => {
                out.extend(&n.params);
                out.push(&n.body.elem);
            }
            NodeKind::ForLoop(n) => {
                out.push(&n.control);
                out.push(&n.body);
            }
            NodeKind::ForControl(n) => {
                out.extend(&n.init);
                out.push(&n.condition);
                out.extend(&n.update);
            }
            NodeKind::TypeParameters(n) => out.extend(&n.params),
            NodeKind::TypeParameter(n) => {
                out.push(&n.name);
                if let Some(bounds) = &n.bounds {
                    out.extend(&bounds.elem);
                }
            }
            NodeKind::FieldAccess(n) => {
                out.push(&n.target);
                out.push(&n.name);
            }
            NodeKind::MethodInvocation(n) => {
                out.extend(&n.select);
                out.push(&n.name);
                out.extend(&n.args.elem);
            }
            NodeKind::Assign(n) => {
                out.push(&n.target);
                out.push(&n.value.elem);
            }
            NodeKind::Binary(n) => {
                out.push(&n.left);
                out.push(&n.right);
            }
            NodeKind::Unary(n) => out.push(&n.operand),
            NodeKind::Return(n) => out.extend(&n.expression),
            NodeKind::Modifier(_) | NodeKind::Ident(_) | NodeKind::Literal(_) | NodeKind::Empty(_) => {}
        }
        out
    }
}
