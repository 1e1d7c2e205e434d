//! Typed rule configuration.
//!
//! Each rule is built from a serde struct rather than by reflective property
//! binding. Keys are camelCase, every option has a default, and unknown keys
//! or values are rejected when the configuration is loaded.

use std::collections::BTreeSet;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use lintfix_cst::DeclarationKind;

use crate::error::RuleError;

// ============================================================================
// HiddenField
// ============================================================================

/// Declaration kinds `HiddenField` may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Token {
    /// Local variables.
    VariableDef,
    /// Method and constructor parameters.
    ParameterDef,
    /// Lambda parameters.
    Lambda,
}

impl Token {
    /// The token governing a declaration kind; fields have none.
    pub fn for_declaration(kind: DeclarationKind) -> Option<Token> {
        match kind {
            DeclarationKind::LocalVariable => Some(Token::VariableDef),
            DeclarationKind::Parameter => Some(Token::ParameterDef),
            DeclarationKind::LambdaParameter => Some(Token::Lambda),
            DeclarationKind::Field => None,
        }
    }
}

/// Options of the `HiddenField` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct HiddenFieldConfig {
    /// Member names fully matching this pattern are never protected.
    pub ignore_format: Option<String>,
    pub ignore_constructor_parameter: bool,
    pub ignore_setter: bool,
    pub setter_can_return_its_class: bool,
    pub ignore_abstract_methods: bool,
    pub tokens: BTreeSet<Token>,
}

impl Default for HiddenFieldConfig {
    fn default() -> Self {
        HiddenFieldConfig {
            ignore_format: None,
            ignore_constructor_parameter: false,
            ignore_setter: false,
            setter_can_return_its_class: false,
            ignore_abstract_methods: false,
            tokens: [Token::VariableDef, Token::ParameterDef, Token::Lambda]
                .into_iter()
                .collect(),
        }
    }
}

impl HiddenFieldConfig {
    /// Compile `ignore_format` into a whole-name matcher.
    pub fn ignore_pattern(&self) -> Result<Option<Regex>, RuleError> {
        let Some(pattern) = &self.ignore_format else {
            return Ok(None);
        };
        Regex::new(&format!("^(?:{pattern})$"))
            .map(Some)
            .map_err(|e| RuleError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })
    }
}

// ============================================================================
// Padding
// ============================================================================

/// Whitespace policy of a padding rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PadPolicy {
    /// No whitespace.
    #[default]
    Nospace,
    /// Exactly one space.
    Space,
}

impl PadPolicy {
    /// The padding this policy requires.
    pub fn padding(&self) -> &'static str {
        match self {
            PadPolicy::Nospace => "",
            PadPolicy::Space => " ",
        }
    }
}

/// Options of a padding rule such as `EmptyForInitializerPad`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PadConfig {
    pub option: PadPolicy,
}

/// Options of a rule that takes none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoOptions {}

// ============================================================================
// Config file
// ============================================================================

/// One configured rule: a registered name and its properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    pub name: String,
    #[serde(default)]
    pub properties: Value,
}

/// A lint configuration file.
///
/// ```json
/// { "rules": [ { "name": "HiddenField", "properties": { "ignoreSetter": true } } ] }
/// ```
///
/// Rules run in the order listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    pub rules: Vec<RuleEntry>,
}

impl LintConfig {
    pub fn from_json(text: &str) -> Result<Self, RuleError> {
        serde_json::from_str(text).map_err(|e| RuleError::InvalidConfig {
            rule: "<config>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Bind a rule's properties to its typed configuration.
///
/// Absent properties (`null`) mean "all defaults".
pub fn parse_properties<T: DeserializeOwned>(rule: &str, properties: &Value) -> Result<T, RuleError> {
    let properties = match properties {
        Value::Null => Value::Object(Default::default()),
        other => other.clone(),
    };
    serde_json::from_value(properties).map_err(|e| RuleError::InvalidConfig {
        rule: rule.to_string(),
        message: e.to_string(),
    })
}
