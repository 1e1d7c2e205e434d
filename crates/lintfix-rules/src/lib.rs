//! Lint rules for lintfix and the machinery that runs them.
//!
//! A [`Rule`] maps a compilation unit to a new one and may schedule
//! follow-up rules. The [`RuleRegistry`] builds rules from a JSON
//! [`LintConfig`], and a [`Pipeline`] runs them in order over each tree.
//!
//! Built-in rules:
//! - [`HiddenField`]: renames locals, parameters and lambda parameters that
//!   hide a field or an inherited member, avoiding every name already bound
//!   in an overlapping scope.
//! - [`EmptyForInitializerPad`]: padding before an empty `for` initializer.
//! - [`GenericWhitespace`]: whitespace around type parameter lists.
//! - [`FinalLocalVariable`]: `final` on locals that are never reassigned.

pub mod config;
pub mod empty_for_initializer_pad;
pub mod error;
pub mod final_local_variable;
pub mod generic_whitespace;
pub mod hidden_field;
pub mod pipeline;
pub mod registry;
pub mod rule;

pub use config::{HiddenFieldConfig, LintConfig, PadConfig, PadPolicy, RuleEntry, Token};
pub use empty_for_initializer_pad::EmptyForInitializerPad;
pub use error::{PipelineError, RuleError};
pub use final_local_variable::FinalLocalVariable;
pub use generic_whitespace::GenericWhitespace;
pub use hidden_field::{HiddenField, RenameShadowedName};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use registry::RuleRegistry;
pub use rule::{Rule, RuleOutput};
