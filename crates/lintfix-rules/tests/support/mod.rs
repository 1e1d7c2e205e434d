//! Shared fixtures for rule integration tests.
//!
//! Trees are built with [`TreeBuilder`] the way a parser would produce
//! them for the Java source shown in each fixture's doc comment, with
//! four-space indentation.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;

use lintfix_cst::builder::TreeBuilder;
use lintfix_cst::nodes::{ClassType, Flag, JavaType, Primitive, Var};
use lintfix_cst::{print, NodeRef};
use lintfix_rules::{LintConfig, PipelineOutcome, RuleEntry, RuleRegistry};

pub fn int() -> JavaType {
    JavaType::Primitive(Primitive::Int)
}

pub fn void(b: &mut TreeBuilder, prefix: &str) -> NodeRef {
    b.typed_ident(prefix, "void", JavaType::Primitive(Primitive::Void))
}

pub fn int_field(name: &str, flags: Vec<Flag>) -> Var {
    Var::new(name, int(), flags)
}

/// `class B { protected int n2; int n3; private int n4; }`
pub fn base_b() -> Arc<ClassType> {
    Arc::new(ClassType::new("B").with_members(vec![
        int_field("n2", vec![Flag::Protected]),
        int_field("n3", vec![]),
        int_field("n4", vec![Flag::Private]),
    ]))
}

/// `class Base { protected int count; }`
pub fn base_count() -> Arc<ClassType> {
    Arc::new(ClassType::new("Base").with_members(vec![int_field("count", vec![Flag::Protected])]))
}

/// Type of a class `name` whose own fields are `fields`.
pub fn class_type(name: &str, supertype: Option<Arc<ClassType>>, fields: &[&str]) -> JavaType {
    let mut class = ClassType::new(name)
        .with_members(fields.iter().map(|f| int_field(f, vec![])).collect());
    if let Some(supertype) = supertype {
        class = class.with_supertype(supertype);
    }
    JavaType::class(class)
}

/// `\n<indent>int name;`
pub fn field(b: &mut TreeBuilder, indent: &str, name: &str) -> NodeRef {
    b.local(&format!("\n{indent}"), "int", name, None).0
}

/// `int name` as the `i`th parameter of a list.
pub fn int_param(b: &mut TreeBuilder, i: usize, name: &str) -> (NodeRef, NodeRef) {
    b.param(if i == 0 { "" } else { " " }, "int", name)
}

/// `{ statements \n<indent>}` opening on the current line.
pub fn body(b: &mut TreeBuilder, statements: Vec<NodeRef>, indent: &str) -> NodeRef {
    b.block(" ", statements, &format!("\n{indent}"))
}

/// The named variable of a lambda parameter declaration.
pub fn lambda_var(decls: &NodeRef) -> NodeRef {
    decls.as_variable_decls().expect("lambda parameter").vars[0].clone()
}

/// Wrap classes into a compilation unit ending in a newline.
pub fn unit(b: &mut TreeBuilder, classes: Vec<NodeRef>) -> NodeRef {
    b.compilation_unit(classes, "\n")
}

// ============================================================================
// Running rules
// ============================================================================

/// Run one configured rule over `tree`.
pub fn run_rule(name: &str, properties: Value, tree: &NodeRef) -> PipelineOutcome {
    let config = LintConfig {
        rules: vec![RuleEntry {
            name: name.to_string(),
            properties,
        }],
    };
    run_config(&config, tree)
}

pub fn run_config(config: &LintConfig, tree: &NodeRef) -> PipelineOutcome {
    RuleRegistry::with_builtin_rules()
        .build_pipeline(config)
        .expect("valid configuration")
        .run(tree)
        .expect("pipeline succeeds")
}

/// Run `HiddenField` and print the result.
pub fn fix_hidden_fields(properties: Value, tree: &NodeRef) -> String {
    print(&run_rule("HiddenField", properties, tree).tree)
}

/// Assert printed source, ignoring one leading newline in `expected`.
pub fn assert_source(actual: &str, expected: &str) {
    let expected = expected.strip_prefix('\n').unwrap_or(expected);
    assert_eq!(actual, expected, "\n--- actual ---\n{actual}\n--- expected ---\n{expected}");
}
