//! lintfix: apply style rules to type-attributed syntax trees.
//!
//! The binary is a thin front door over [`cli`]: it reads each compilation
//! unit from its JSON interchange form, runs the configured rule pipeline,
//! prints the fixed source and reports per file.

pub mod cli;
