//! Finding local declarations that hide a class member.

use lintfix_cst::nodes::{ClassDecl, ClassKind, JavaType, MethodDecl, NamedVar};
use lintfix_cst::visitor::{walk, VisitResult, Visitor};
use lintfix_cst::{CstError, Cursor, DeclarationKind, NodeId};

use crate::config::{HiddenFieldConfig, Token};

/// Searches one class body for declarations named like a member.
///
/// Nested interfaces, enums, annotations and static classes have their own
/// view of inherited members and are not searched. Fields never count:
/// only local variables, parameters and lambda parameters whose kind is
/// enabled in `tokens` and which no configured exemption covers.
pub struct FindNameShadows<'r> {
    name: &'r str,
    exclude: Option<NodeId>,
    class_type: &'r JavaType,
    config: &'r HiddenFieldConfig,
    shadows: Vec<NodeId>,
    error: Option<CstError>,
}

impl<'r> FindNameShadows<'r> {
    /// Search for declarations named `name` in a class of type `class_type`.
    pub fn new(name: &'r str, class_type: &'r JavaType, config: &'r HiddenFieldConfig) -> Self {
        FindNameShadows {
            name,
            exclude: None,
            class_type,
            config,
            shadows: Vec::new(),
            error: None,
        }
    }

    /// Never report the declaration `id` (the member itself).
    pub fn excluding(mut self, id: NodeId) -> Self {
        self.exclude = Some(id);
        self
    }

    /// Search the body of the class declared at `class_cursor`.
    ///
    /// Returns the shadowing named variables in traversal order.
    pub fn find(mut self, class_cursor: &Cursor<'_>, class: &ClassDecl) -> Result<Vec<NodeId>, CstError> {
        walk(&mut self, &class_cursor.child(&class.body));
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.shadows),
        }
    }

    fn is_shadow(&self, cursor: &Cursor<'_>, var_name: &str) -> Result<bool, CstError> {
        let kind = DeclarationKind::of(cursor)?;
        let enabled = Token::for_declaration(kind).is_some_and(|t| self.config.tokens.contains(&t));
        if !enabled {
            return Ok(false);
        }
        let method = cursor
            .parent()
            .and_then(|decls| decls.parent_node())
            .and_then(|owner| owner.as_method_decl());
        Ok(!method.is_some_and(|m| self.is_exempt(var_name, m)))
    }

    fn is_exempt(&self, var_name: &str, method: &MethodDecl) -> bool {
        (self.config.ignore_constructor_parameter && method.is_constructor())
            || (self.config.ignore_setter && self.is_setter_for(var_name, method))
            || (self.config.ignore_abstract_methods && method.is_abstract())
    }

    /// `set<Name>(name)` returning void or, optionally, the class itself.
    fn is_setter_for(&self, var_name: &str, method: &MethodDecl) -> bool {
        let Some(property) = method.name.simple_name().and_then(|n| n.strip_prefix("set")) else {
            return false;
        };
        if property.is_empty() || property.to_lowercase() != var_name.to_lowercase() {
            return false;
        }
        let Some(return_type) = &method.return_type else {
            return false;
        };
        let returns_void = match return_type.kind.resolved_type() {
            Some(JavaType::Unknown) | None => return_type.simple_name() == Some("void"),
            Some(ty) => ty.is_void(),
        };
        let returns_class = self.config.setter_can_return_its_class
            && self.class_type.as_class().is_some()
            && return_type.kind.resolved_type() == Some(self.class_type);
        returns_void || returns_class
    }
}

/// Interfaces, enums, annotations and static classes do not see the
/// members of the class enclosing them.
pub(crate) fn is_isolated(class: &ClassDecl) -> bool {
    class.kind.elem != ClassKind::Class || class.modifiers.iter().any(|m| m.is_modifier("static"))
}

impl Visitor for FindNameShadows<'_> {
    fn visit_class_decl(&mut self, _cursor: &Cursor<'_>, node: &ClassDecl) -> VisitResult {
        if is_isolated(node) {
            VisitResult::SkipChildren
        } else {
            VisitResult::Continue
        }
    }

    fn visit_named_var(&mut self, cursor: &Cursor<'_>, node: &NamedVar) -> VisitResult {
        let Some(var_name) = node.name.simple_name() else {
            return VisitResult::Continue;
        };
        if var_name != self.name || self.exclude == Some(cursor.node().id) {
            return VisitResult::Continue;
        }
        match self.is_shadow(cursor, var_name) {
            Ok(true) => self.shadows.push(cursor.node().id),
            Ok(false) => {}
            Err(err) => {
                self.error = Some(err);
                return VisitResult::Stop;
            }
        }
        VisitResult::Continue
    }
}
