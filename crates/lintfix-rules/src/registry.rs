//! Name-to-factory table of the built-in rules.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::{parse_properties, LintConfig, NoOptions, PadConfig, RuleEntry};
use crate::empty_for_initializer_pad::EmptyForInitializerPad;
use crate::error::RuleError;
use crate::final_local_variable::FinalLocalVariable;
use crate::generic_whitespace::GenericWhitespace;
use crate::hidden_field::HiddenField;
use crate::pipeline::Pipeline;
use crate::rule::Rule;

/// Builds a rule from its configured properties.
pub type RuleFactory = fn(&Value) -> Result<Box<dyn Rule>, RuleError>;

/// Rules that can be named in a configuration file.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    factories: BTreeMap<&'static str, RuleFactory>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every rule shipped with lintfix.
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        registry.register(HiddenField::NAME, hidden_field);
        registry.register(EmptyForInitializerPad::NAME, empty_for_initializer_pad);
        registry.register(GenericWhitespace::NAME, generic_whitespace);
        registry.register(FinalLocalVariable::NAME, final_local_variable);
        registry
    }

    /// Register `factory` under `name`, replacing any earlier registration.
    pub fn register(&mut self, name: &'static str, factory: RuleFactory) {
        self.factories.insert(name, factory);
    }

    /// Registered names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build the rule one configuration entry names.
    pub fn build(&self, entry: &RuleEntry) -> Result<Box<dyn Rule>, RuleError> {
        let factory = self
            .factories
            .get(entry.name.as_str())
            .ok_or_else(|| RuleError::UnknownRule {
                name: entry.name.clone(),
            })?;
        factory(&entry.properties)
    }

    /// Build every configured rule, in configuration order.
    pub fn build_pipeline(&self, config: &LintConfig) -> Result<Pipeline, RuleError> {
        let rules = config
            .rules
            .iter()
            .map(|entry| self.build(entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pipeline::new(rules))
    }
}

fn hidden_field(properties: &Value) -> Result<Box<dyn Rule>, RuleError> {
    let config = parse_properties(HiddenField::NAME, properties)?;
    Ok(Box::new(HiddenField::new(config)?))
}

fn empty_for_initializer_pad(properties: &Value) -> Result<Box<dyn Rule>, RuleError> {
    let config: PadConfig = parse_properties(EmptyForInitializerPad::NAME, properties)?;
    Ok(Box::new(EmptyForInitializerPad::new(config)))
}

fn generic_whitespace(properties: &Value) -> Result<Box<dyn Rule>, RuleError> {
    let NoOptions {} = parse_properties(GenericWhitespace::NAME, properties)?;
    Ok(Box::new(GenericWhitespace))
}

fn final_local_variable(properties: &Value) -> Result<Box<dyn Rule>, RuleError> {
    let NoOptions {} = parse_properties(FinalLocalVariable::NAME, properties)?;
    Ok(Box::new(FinalLocalVariable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(name: &str, properties: Value) -> RuleEntry {
        RuleEntry {
            name: name.to_string(),
            properties,
        }
    }

    #[test]
    fn test_builtin_names() {
        let registry = RuleRegistry::with_builtin_rules();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "EmptyForInitializerPad",
                "FinalLocalVariable",
                "GenericWhitespace",
                "HiddenField"
            ]
        );
        assert!(!registry.contains("RenameShadowedName"));
    }

    #[test]
    fn test_build_with_properties() {
        let registry = RuleRegistry::with_builtin_rules();
        let rule = registry
            .build(&entry("HiddenField", json!({ "ignoreSetter": true })))
            .unwrap();
        assert_eq!(rule.name(), "HiddenField");
    }

    #[test]
    fn test_unknown_rule() {
        let registry = RuleRegistry::with_builtin_rules();
        let err = registry.build(&entry("NoSuchRule", Value::Null)).unwrap_err();
        assert!(matches!(err, RuleError::UnknownRule { ref name } if name == "NoSuchRule"));
    }

    #[test]
    fn test_bad_pattern_fails_at_build_time() {
        let registry = RuleRegistry::with_builtin_rules();
        let err = registry
            .build(&entry("HiddenField", json!({ "ignoreFormat": "[" })))
            .unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn test_options_on_optionless_rule_are_rejected() {
        let registry = RuleRegistry::with_builtin_rules();
        let err = registry
            .build(&entry("GenericWhitespace", json!({ "option": "SPACE" })))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_pipeline_keeps_configured_order() {
        let config = LintConfig::from_json(
            r#"{"rules": [
                {"name": "GenericWhitespace"},
                {"name": "EmptyForInitializerPad", "properties": {"option": "SPACE"}},
                {"name": "HiddenField"}
            ]}"#,
        )
        .unwrap();
        let pipeline = RuleRegistry::with_builtin_rules().build_pipeline(&config).unwrap();
        let names: Vec<_> = pipeline.rule_names().collect();
        assert_eq!(
            names,
            vec!["GenericWhitespace", "EmptyForInitializerPad", "HiddenField"]
        );
    }
}
