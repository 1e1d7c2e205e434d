//! `HiddenField`: rename local declarations that hide a class member.
//!
//! For every class, the rule collects the names a local declaration must not
//! reuse: the visible members inherited from supertypes and the class's own
//! fields. Each shadowing declaration found by [`FindNameShadows`] is renamed
//! by a scheduled [`RenameShadowedName`] follow-up, so the tree returned by
//! the rule itself is always the input tree.

mod rename;
mod shadows;

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use lintfix_cst::nodes::{ClassDecl, Var};
use lintfix_cst::visitor::{walk_tree, VisitResult, Visitor};
use lintfix_cst::{CstError, Cursor, NodeId, NodeRef};

use crate::config::HiddenFieldConfig;
use crate::error::RuleError;
use crate::rule::{Rule, RuleOutput};

pub use rename::{next_name, RenameShadowedName, MAX_RENAME_ATTEMPTS};
pub use shadows::FindNameShadows;

/// The `HiddenField` rule.
#[derive(Debug, Clone)]
pub struct HiddenField {
    config: HiddenFieldConfig,
    ignore: Option<Regex>,
}

impl HiddenField {
    pub const NAME: &'static str = "HiddenField";

    /// Build the rule, compiling `ignoreFormat`.
    pub fn new(config: HiddenFieldConfig) -> Result<Self, RuleError> {
        let ignore = config.ignore_pattern()?;
        Ok(HiddenField { config, ignore })
    }

    pub fn config(&self) -> &HiddenFieldConfig {
        &self.config
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore.as_ref().is_some_and(|re| re.is_match(name))
    }
}

impl Rule for HiddenField {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, tree: &NodeRef) -> Result<RuleOutput, RuleError> {
        let mut scan = ShadowScan {
            rule: self,
            scheduled: Vec::new(),
            seen: HashSet::new(),
            error: None,
        };
        walk_tree(&mut scan, tree);
        if let Some(err) = scan.error {
            return Err(err.into());
        }
        let follow_ups = scan
            .scheduled
            .into_iter()
            .map(|rename| Box::new(rename) as Box<dyn Rule>)
            .collect();
        Ok(RuleOutput::unchanged(tree).and_then(follow_ups))
    }
}

/// Visits every class and schedules one rename per shadowing declaration.
struct ShadowScan<'r> {
    rule: &'r HiddenField,
    scheduled: Vec<RenameShadowedName>,
    seen: HashSet<NodeId>,
    error: Option<CstError>,
}

impl ShadowScan<'_> {
    /// Names protected in `class`, with the field declaring each own member.
    fn protected_names(&self, class: &ClassDecl, inherited: &[Var]) -> Vec<(String, Option<NodeId>)> {
        let inherited = inherited.iter().map(|m| (m.name.clone(), None));
        let own_fields = class
            .body
            .as_block()
            .into_iter()
            .flat_map(|body| body.statements.iter())
            .filter_map(|stmt| stmt.as_variable_decls())
            .flat_map(|decls| decls.vars.iter())
            .filter_map(|var| var.simple_name().map(|name| (name.to_string(), Some(var.id))));
        inherited
            .chain(own_fields)
            .filter(|(name, _)| !self.rule.is_ignored(name))
            .collect()
    }
}

impl Visitor for ShadowScan<'_> {
    fn visit_class_decl(&mut self, cursor: &Cursor<'_>, node: &ClassDecl) -> VisitResult {
        let inherited = node.ty.visible_supertype_members();
        for (name, field) in self.protected_names(node, &inherited) {
            let mut finder = FindNameShadows::new(&name, &node.ty, &self.rule.config);
            if let Some(field) = field {
                finder = finder.excluding(field);
            }
            let shadows = match finder.find(cursor, node) {
                Ok(shadows) => shadows,
                Err(err) => {
                    self.error = Some(err);
                    return VisitResult::Stop;
                }
            };
            for shadow in shadows {
                if self.seen.insert(shadow) {
                    debug!(member = %name, declaration = %shadow, "hidden field");
                    self.scheduled
                        .push(RenameShadowedName::new(shadow, inherited.clone()));
                }
            }
        }
        VisitResult::Continue
    }
}
