//! `GenericWhitespace`: no whitespace inside or before a type parameter list.
//!
//! `class Box < T, U >` becomes `class Box<T, U>`. Spacing between
//! parameters is kept. The list of a generic method is left alone, since its
//! leading whitespace separates it from the modifiers.

use std::sync::Arc;

use lintfix_cst::nodes::{Formatting, NodeKind, TypeParameter, TypeParameters};
use lintfix_cst::visitor::{run_transformer, walk_children, TransformLog, Transformer};
use lintfix_cst::{CstError, Cursor, NodeRef};

use crate::error::RuleError;
use crate::rule::{Rule, RuleOutput};

#[derive(Debug, Clone, Copy, Default)]
pub struct GenericWhitespace;

impl GenericWhitespace {
    pub const NAME: &'static str = "GenericWhitespace";
}

impl Rule for GenericWhitespace {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, tree: &NodeRef) -> Result<RuleOutput, RuleError> {
        let mut tighten = TightenTypeParameters {
            log: TransformLog::new(Self::NAME),
        };
        Ok(run_transformer(&mut tighten, tree)?.into())
    }
}

struct TightenTypeParameters {
    log: TransformLog,
}

/// Where a parameter sits in its list.
enum Position {
    Only,
    First,
    Last,
    Interior,
}

impl Transformer for TightenTypeParameters {
    fn log(&mut self) -> &mut TransformLog {
        &mut self.log
    }

    fn visit_type_parameters(
        &mut self,
        cursor: &Cursor<'_>,
        _node: &TypeParameters,
    ) -> lintfix_cst::Result<NodeRef> {
        let visited = walk_children(self, cursor)?;
        let original = cursor.node();
        let on_method = cursor
            .parent_node()
            .is_some_and(|parent| matches!(parent.kind, NodeKind::MethodDecl(_)));
        let should_apply = !on_method && !original.formatting.is_empty();
        Ok(self.maybe_transform(original, should_apply, visited, |list| {
            list.with_formatting(Formatting::EMPTY)
        }))
    }

    fn visit_type_parameter(
        &mut self,
        cursor: &Cursor<'_>,
        _node: &TypeParameter,
    ) -> lintfix_cst::Result<NodeRef> {
        let visited = walk_children(self, cursor)?;
        let original = cursor.node();
        let parent = cursor.parent_or_err()?;
        let list = parent.as_type_parameters().ok_or(CstError::UnexpectedParent {
            expected: "TypeParameters",
            found: parent.kind.name(),
            node: original.id,
        })?;

        let first = list.params.first().is_some_and(|p| Arc::ptr_eq(p, original));
        let last = list.params.last().is_some_and(|p| Arc::ptr_eq(p, original));
        let position = match (first, last) {
            (true, true) => Position::Only,
            (true, false) => Position::First,
            (false, true) => Position::Last,
            (false, false) => Position::Interior,
        };

        let formatting = &original.formatting;
        let should_apply = match position {
            Position::Only => !formatting.is_empty(),
            Position::First => !formatting.prefix.is_empty(),
            Position::Last => !formatting.suffix.is_empty(),
            Position::Interior => false,
        };
        Ok(self.maybe_transform(original, should_apply, visited, |param| {
            let formatting = match position {
                Position::Only => Formatting::EMPTY,
                Position::First => param.formatting.strip_prefix(),
                Position::Last => param.formatting.strip_suffix(),
                Position::Interior => param.formatting.clone(),
            };
            param.with_formatting(formatting)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintfix_cst::builder::TreeBuilder;
    use lintfix_cst::nodes::JavaType;
    use lintfix_cst::print;

    /// `class Box<list> {}` with the given parameters.
    fn class_with(b: &mut TreeBuilder, list_prefix: &str, params: Vec<NodeRef>) -> NodeRef {
        let list = b.type_parameters(list_prefix, params);
        let body = b.block(" ", vec![], "");
        b.class_with_type_parameters("", vec![], "Box", list, body, JavaType::Unknown)
    }

    #[test]
    fn test_strips_outer_whitespace() {
        let mut b = TreeBuilder::new();
        let t = b.type_parameter(" ", "T");
        let u = b.type_parameter(" ", "U");
        let u = Arc::new(u.with_suffix(" "));
        let tree = class_with(&mut b, " ", vec![t, u]);
        assert_eq!(print(&tree), "class Box < T, U > {}");

        let output = GenericWhitespace.apply(&tree).unwrap();
        assert_eq!(print(&output.tree), "class Box<T, U> {}");
        assert_eq!(output.transforms.len(), 3);
    }

    #[test]
    fn test_single_parameter() {
        let mut b = TreeBuilder::new();
        let t = b.type_parameter(" ", "T");
        let t = Arc::new(t.with_suffix(" "));
        let tree = class_with(&mut b, "", vec![t]);

        let output = GenericWhitespace.apply(&tree).unwrap();
        assert_eq!(print(&output.tree), "class Box<T> {}");
    }

    #[test]
    fn test_interior_spacing_is_kept() {
        let mut b = TreeBuilder::new();
        let t = b.type_parameter("", "T");
        let u = b.type_parameter(" ", "U");
        let v = b.type_parameter("  ", "V");
        let tree = class_with(&mut b, "", vec![t, u, v]);

        let output = GenericWhitespace.apply(&tree).unwrap();
        assert!(Arc::ptr_eq(&output.tree, &tree));
        assert_eq!(print(&output.tree), "class Box<T, U,  V> {}");
    }

    #[test]
    fn test_method_type_parameters_keep_leading_space() {
        let mut b = TreeBuilder::new();
        let t = b.type_parameter("", "T");
        let list = b.type_parameters(" ", vec![t]);
        let public = b.modifier("", "public");
        let void = b.ident(" ", "void");
        let body = b.block(" ", vec![], "");
        let method = b.method("\n    ", vec![public], Some(void), "m", vec![], Some(body));
        let method = match &method.kind {
            NodeKind::MethodDecl(m) => {
                let mut m = m.clone();
                m.type_parameters = Some(list);
                Arc::new(method.with_kind(NodeKind::MethodDecl(m)))
            }
            _ => unreachable!(),
        };
        let before = print(&method);
        assert!(before.contains("public <T> void m()"), "{before}");

        let output = GenericWhitespace.apply(&method).unwrap();
        assert_eq!(print(&output.tree), before);
        assert!(output.transforms.is_empty());
    }

    #[test]
    fn test_detached_list_is_tightened() {
        let mut b = TreeBuilder::new();
        let t = b.type_parameter(" ", "T");
        let t = Arc::new(t.with_suffix(" "));
        let list = b.type_parameters(" ", vec![t]);
        assert_eq!(print(&list), " < T >");

        let output = GenericWhitespace.apply(&list).unwrap();
        assert_eq!(print(&output.tree), "<T>");
        assert_eq!(output.transforms.len(), 2);
    }

    #[test]
    fn test_parameter_outside_list_is_rejected() {
        let mut b = TreeBuilder::new();
        let t = b.type_parameter("", "T");
        let tree = b.block("", vec![t], "");

        let err = GenericWhitespace.apply(&tree).unwrap_err();
        assert!(matches!(
            err,
            RuleError::Cst(CstError::UnexpectedParent { expected: "TypeParameters", .. })
        ));
    }
}
