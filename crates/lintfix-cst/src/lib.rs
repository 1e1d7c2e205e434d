// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Full-fidelity syntax tree for lintfix.
//!
//! This crate provides the tree that lint rules read and rewrite:
//!
//! - **Nodes**: immutable, `Arc`-shared [`nodes::Node`]s that keep every
//!   whitespace and comment byte as [`nodes::Formatting`].
//! - **Cursor**: upward navigation from the node being visited.
//! - **Visitors**: read-only [`visitor::Visitor`] and rebuilding
//!   [`visitor::Transformer`] traversals with exhaustive dispatch.
//! - **Transforms**: conditional rewrites with a per-pass change log.
//! - **Code Generation**: print a tree back to source with [`Codegen`].
//! - **Builder**: id-allocating constructors for parsers and tests.
//!
//! # Example
//!
//! ```
//! use lintfix_cst::builder::TreeBuilder;
//! use lintfix_cst::print;
//!
//! let mut b = TreeBuilder::new();
//! let body = b.block(" ", vec![], "\n");
//! let class = b.class("", vec![], "A", None, body, Default::default());
//! assert_eq!(print(&class), "class A {\n}");
//! ```

pub mod builder;
pub mod codegen;
pub mod cursor;
pub mod error;
pub mod nodes;
pub mod visitor;

pub use codegen::{print, Codegen, CodegenState};
pub use cursor::{Cursor, DeclarationKind};
pub use error::{CstError, Result};
pub use nodes::{Node, NodeId, NodeKind, NodeRef};
