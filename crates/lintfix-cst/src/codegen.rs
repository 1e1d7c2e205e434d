// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Printing a tree back to source text.
//!
//! The printer performs no layout. Every node prints its prefix, its own
//! tokens with the formatting of its children interleaved, then its suffix.
//! A tree that no rule touched prints back byte for byte.

use std::fmt;

use crate::nodes::{Node, NodeKind, NodeRef};

/// Accumulated output of a print.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CodegenState {
    pub tokens: String,
}

impl CodegenState {
    pub fn add_token(&mut self, tok: &str) {
        self.tokens.push_str(tok);
    }
}

impl fmt::Display for CodegenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens)
    }
}

/// Nodes that can print themselves.
pub trait Codegen {
    fn codegen(&self, state: &mut CodegenState);
}

/// Print a tree to a string.
pub fn print(node: &Node) -> String {
    let mut state = CodegenState::default();
    node.codegen(&mut state);
    state.tokens
}

impl Codegen for Node {
    fn codegen(&self, state: &mut CodegenState) {
        state.add_token(&self.formatting.prefix);
        self.kind.codegen(state);
        state.add_token(&self.formatting.suffix);
    }
}

fn join(state: &mut CodegenState, nodes: &[NodeRef], separator: &str) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            state.add_token(separator);
        }
        node.codegen(state);
    }
}

/// Statements printed inside a block are followed by `;` unless they end
/// in a body of their own.
fn terminated_by_semicolon(node: &Node) -> bool {
    !matches!(
        node.kind,
        NodeKind::ClassDecl(_)
            | NodeKind::Block(_)
            | NodeKind::MethodDecl(_)
            | NodeKind::ForLoop(_)
            | NodeKind::CompilationUnit(_)
    )
}

fn statement(state: &mut CodegenState, node: &Node) {
    node.codegen(state);
    if terminated_by_semicolon(node) {
        state.add_token(";");
    }
}

impl Codegen for NodeKind {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            NodeKind::CompilationUnit(n) => {
                for class in &n.classes {
                    class.codegen(state);
                }
                state.add_token(&n.eof);
            }
            NodeKind::ClassDecl(n) => {
                for modifier in &n.modifiers {
                    modifier.codegen(state);
                }
                state.add_token(&n.kind.before);
                state.add_token(n.kind.elem.keyword());
                n.name.codegen(state);
                if let Some(type_parameters) = &n.type_parameters {
                    type_parameters.codegen(state);
                }
                if let Some(extends) = &n.extends {
                    state.add_token(&extends.before);
                    state.add_token("extends");
                    extends.elem.codegen(state);
                }
                n.body.codegen(state);
            }
            NodeKind::Block(n) => {
                state.add_token("{");
                for stmt in &n.statements {
                    statement(state, stmt);
                }
                state.add_token(&n.end);
                state.add_token("}");
            }
            NodeKind::MethodDecl(n) => {
                for modifier in &n.modifiers {
                    modifier.codegen(state);
                }
                if let Some(type_parameters) = &n.type_parameters {
                    type_parameters.codegen(state);
                }
                if let Some(return_type) = &n.return_type {
                    return_type.codegen(state);
                }
                n.name.codegen(state);
                state.add_token(&n.params.before);
                state.add_token("(");
                join(state, &n.params.elem, ",");
                state.add_token(")");
                match &n.body {
                    Some(body) => body.codegen(state),
                    None => state.add_token(";"),
                }
            }
            NodeKind::VariableDecls(n) => {
                for modifier in &n.modifiers {
                    modifier.codegen(state);
                }
                if let Some(type_expr) = &n.type_expr {
                    type_expr.codegen(state);
                }
                join(state, &n.vars, ",");
            }
            NodeKind::NamedVar(n) => {
                n.name.codegen(state);
                if let Some(init) = &n.initializer {
                    state.add_token(&init.before);
                    state.add_token("=");
                    init.elem.codegen(state);
                }
            }
            NodeKind::Lambda(n) => {
                if n.parenthesized {
                    state.add_token("(");
                    join(state, &n.params, ",");
                    state.add_token(")");
                } else {
                    join(state, &n.params, ",");
                }
                state.add_token(&n.body.before);
                state.add_token("->");
                n.body.elem.codegen(state);
            }
            NodeKind::ForLoop(n) => {
                state.add_token("for");
                n.control.codegen(state);
                statement(state, &n.body);
            }
            NodeKind::ForControl(n) => {
                state.add_token("(");
                join(state, &n.init, ",");
                state.add_token(";");
                n.condition.codegen(state);
                state.add_token(";");
                join(state, &n.update, ",");
                state.add_token(")");
            }
            NodeKind::TypeParameters(n) => {
                state.add_token("<");
                join(state, &n.params, ",");
                state.add_token(">");
            }
            NodeKind::TypeParameter(n) => {
                n.name.codegen(state);
                if let Some(bounds) = &n.bounds {
                    state.add_token(&bounds.before);
                    state.add_token("extends");
                    join(state, &bounds.elem, "&");
                }
            }
            NodeKind::Modifier(n) => state.add_token(&n.keyword),
            NodeKind::Ident(n) => state.add_token(&n.name),
            NodeKind::FieldAccess(n) => {
                n.target.codegen(state);
                state.add_token(".");
                n.name.codegen(state);
            }
            NodeKind::MethodInvocation(n) => {
                if let Some(select) = &n.select {
                    select.codegen(state);
                    state.add_token(".");
                }
                n.name.codegen(state);
                state.add_token(&n.args.before);
                state.add_token("(");
                join(state, &n.args.elem, ",");
                state.add_token(")");
            }
            NodeKind::Assign(n) => {
                n.target.codegen(state);
                state.add_token(&n.value.before);
                state.add_token("=");
                n.value.elem.codegen(state);
            }
            NodeKind::Binary(n) => {
                n.left.codegen(state);
                state.add_token(&n.operator.before);
                state.add_token(&n.operator.elem);
                n.right.codegen(state);
            }
            NodeKind::Unary(n) => {
                if n.postfix {
                    n.operand.codegen(state);
                    state.add_token(&n.operator);
                } else {
                    state.add_token(&n.operator);
                    n.operand.codegen(state);
                }
            }
            NodeKind::Literal(n) => state.add_token(&n.text),
            NodeKind::Return(n) => {
                state.add_token("return");
                if let Some(expression) = &n.expression {
                    expression.codegen(state);
                }
            }
            NodeKind::Empty(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use crate::nodes::{ClassType, Formatting, JavaType, Primitive};

    fn int() -> JavaType {
        JavaType::Primitive(Primitive::Int)
    }

    #[test]
    fn test_print_for_loop_with_empty_initializer() {
        let mut b = TreeBuilder::new();
        let init = b.empty(" ");
        let i = b.ident("", "i");
        let n = b.ident("", "n");
        let condition = b.binary("", i, "", "<", n);
        let counter = b.ident("", "i");
        let update = b.unary("", "++", counter, true);
        let control = b.for_control("", vec![init], condition, vec![update]);
        let body = b.block(" ", vec![], "");
        let for_loop = b.for_loop("", control, body);
        assert_eq!(print(&for_loop), "for( ;i<n;i++) {}");
    }

    #[test]
    fn test_print_class_with_type_parameters_and_members() {
        let mut b = TreeBuilder::new();
        let t = b.type_parameter("", "T");
        let u = b.type_parameter(" ", "U");
        let params = b.type_parameters(" ", vec![t, u]);
        let one = b.literal(" ", "1", int());
        let (field, _) = b.local("\n    ", "int", "count", Some(one));
        let (param, n) = b.param("", "int", "n");
        let this = b.ident("", "this");
        let count = b.ident("", "count");
        let target = b.field_access("\n        ", this, count);
        let value = b.reference(" ", &n);
        let assign = b.assign("", target, " ", value);
        let body = b.block(" ", vec![assign], "\n    ");
        let void = b.ident("", "void");
        let method = b.method("\n\n    ", vec![], Some(void), "set", vec![param], Some(body));
        let class_body = b.block(" ", vec![field, method], "\n");
        let public = b.modifier("", "public");
        let class = b.class_with_type_parameters(
            "",
            vec![public],
            "Box",
            params,
            class_body,
            JavaType::class(ClassType::new("Box")),
        );
        let unit = b.compilation_unit(vec![class], "\n");
        assert_eq!(
            print(&unit),
            "public class Box <T, U> {\n    int count = 1;\n\n    void set(int n) {\n        this.count = n;\n    }\n}\n"
        );
    }

    #[test]
    fn test_print_lambda_and_invocation() {
        let mut b = TreeBuilder::new();
        let x = b.lambda_param("", "x");
        let x_ref = b.ident(" ", "x");
        let lambda = b.lambda(" ", vec![x], false, " ", x_ref);
        let list = b.ident("", "list");
        let name = b.ident("", "forEach");
        let call = b.method_invocation("", Some(list), name, "", vec![lambda]);
        assert_eq!(print(&call), "list.forEach( x -> x)");
    }

    #[test]
    fn test_abstract_method_prints_semicolon() {
        let mut b = TreeBuilder::new();
        let abstract_ = b.modifier("", "abstract");
        let void = b.ident(" ", "void");
        let (param, _) = b.param("", "int", "n");
        let method = b.method("", vec![abstract_], Some(void), "foo", vec![param], None);
        assert_eq!(print(&method), "abstract void foo(int n);");
    }

    #[test]
    fn test_suffix_is_printed_after_node() {
        let mut b = TreeBuilder::new();
        let t = b.node_with(
            Formatting::new(" ", " "),
            crate::nodes::NodeKind::Ident(crate::nodes::Ident {
                name: "T".to_string(),
                ty: JavaType::Unknown,
                declaration: None,
            }),
        );
        let param = b.type_parameter_of("", t, None);
        let list = b.type_parameters("", vec![param]);
        assert_eq!(print(&list), "< T >");
    }

    #[test]
    fn test_display_state() {
        let mut state = CodegenState::default();
        state.add_token("class");
        state.add_token(" A");
        assert_eq!(state.to_string(), "class A");
    }
}
