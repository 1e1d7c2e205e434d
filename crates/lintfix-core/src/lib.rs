//! Core infrastructure for lintfix.
//!
//! This crate provides the layer-independent pieces shared by the rule engine
//! and the CLI front door:
//! - Unified error type and stable error codes
//! - JSON output types for per-file fix reports

pub mod error;
pub mod output;
