// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Payloads of the syntax node kinds.
//!
//! Each struct holds the children of one kind of node plus any text that is
//! part of the syntax rather than formatting (names, operators, literals).
//! Whitespace after a keyword or operator lives in the prefix of the child
//! that follows it; whitespace before one lives in a [`Padded`] wrapper.

use serde::{Deserialize, Serialize};

use super::formatting::Padded;
use super::types::{ClassKind, JavaType};
use super::{NodeId, NodeRef};

/// A source file: top-level type declarations and the trailing bytes of the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub classes: Vec<NodeRef>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub eof: String,
}

/// A class, interface, enum or annotation type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    #[serde(default)]
    pub modifiers: Vec<NodeRef>,
    /// The declaration keyword, with the whitespace before it.
    pub kind: Padded<ClassKind>,
    pub name: NodeRef,
    #[serde(default)]
    pub type_parameters: Option<NodeRef>,
    #[serde(default)]
    pub extends: Option<Padded<NodeRef>>,
    pub body: NodeRef,
    #[serde(default)]
    pub ty: JavaType,
}

/// `{ ... }`: a class body or a statement block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<NodeRef>,
    /// Whitespace before the closing brace.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub end: String,
}

/// A method or constructor. Constructors have no return type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    #[serde(default)]
    pub modifiers: Vec<NodeRef>,
    #[serde(default)]
    pub type_parameters: Option<NodeRef>,
    #[serde(default)]
    pub return_type: Option<NodeRef>,
    pub name: NodeRef,
    /// Parameter declarations, with the whitespace before `(`.
    pub params: Padded<Vec<NodeRef>>,
    #[serde(default)]
    pub body: Option<NodeRef>,
}

impl MethodDecl {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    /// True when declared `abstract` or when there is no body.
    pub fn is_abstract(&self) -> bool {
        self.body.is_none() || self.modifiers.iter().any(|m| m.is_modifier("abstract"))
    }
}

/// `final int a = 1, b` as a statement, field, or parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecls {
    #[serde(default)]
    pub modifiers: Vec<NodeRef>,
    /// Absent for untyped lambda parameters.
    #[serde(default)]
    pub type_expr: Option<NodeRef>,
    pub vars: Vec<NodeRef>,
}

/// One declared variable within a [`VariableDecls`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedVar {
    pub name: NodeRef,
    #[serde(default)]
    pub initializer: Option<Padded<NodeRef>>,
}

/// `(a, b) -> body` or `a -> body`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub params: Vec<NodeRef>,
    #[serde(default)]
    pub parenthesized: bool,
    /// The body, with the whitespace before `->`.
    pub body: Padded<NodeRef>,
}

/// A classic `for (init; condition; update) body` loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForLoop {
    pub control: NodeRef,
    pub body: NodeRef,
}

/// The parenthesized header of a [`ForLoop`].
///
/// An empty clause is a single [`Empty`] node whose prefix holds the
/// whitespace before the following `;` or `)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForControl {
    pub init: Vec<NodeRef>,
    pub condition: NodeRef,
    pub update: Vec<NodeRef>,
}

/// `<T, U extends Comparable<U>>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameters {
    pub params: Vec<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: NodeRef,
    /// Bound types joined by `&`, with the whitespace before `extends`.
    #[serde(default)]
    pub bounds: Option<Padded<Vec<NodeRef>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub keyword: String,
}

/// A simple name: a reference, a declared name, or a type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    #[serde(default)]
    pub ty: JavaType,
    /// The [`NamedVar`] this name refers to, when resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<NodeId>,
}

/// `target.name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAccess {
    pub target: NodeRef,
    pub name: NodeRef,
}

/// `select.name(args)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodInvocation {
    #[serde(default)]
    pub select: Option<NodeRef>,
    pub name: NodeRef,
    /// Arguments, with the whitespace before `(`.
    pub args: Padded<Vec<NodeRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    pub target: NodeRef,
    /// Assigned value, with the whitespace before `=`.
    pub value: Padded<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binary {
    pub left: NodeRef,
    pub operator: Padded<String>,
    pub right: NodeRef,
}

/// `-x`, `!x`, `i++`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unary {
    pub operator: String,
    pub operand: NodeRef,
    #[serde(default)]
    pub postfix: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub text: String,
    #[serde(default)]
    pub ty: JavaType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Return {
    #[serde(default)]
    pub expression: Option<NodeRef>,
}

/// An absent statement or clause; prints only its formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}
