// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and transformer infrastructure for tree traversal.
//!
//! Two traversals share one dispatch scheme: macro-generated per-kind trait
//! methods with default behaviour, driven by exhaustive walk functions.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order** for `visit_*` methods
//! - **Post-order** for `leave_*` methods
//! - Children are visited in source order
//!
//! # Visitor Pattern
//!
//! The [`Visitor`] trait provides read-only traversal with a [`Cursor`] at
//! every node, for queries that need ancestors.
//!
//! # Transformer Pattern
//!
//! The [`Transformer`] trait rebuilds the tree. A rule overrides the kinds it
//! rewrites, recurses with [`walk_children`], and applies its edit through
//! [`Transformer::maybe_transform`]:
//!
//! ```ignore
//! fn visit_for_loop(&mut self, cursor: &Cursor<'_>, node: &ForLoop) -> Result<NodeRef> {
//!     let visited = walk_children(self, cursor)?;
//!     let applies = needs_fix(node);
//!     Ok(self.maybe_transform(cursor.node(), applies, visited, |n| fix(n)))
//! }
//! ```
//!
//! [`Cursor`]: crate::cursor::Cursor

mod dispatch;
mod traits;
mod transform;

pub use dispatch::{transform_node, walk, walk_children, walk_tree};
pub use traits::{Transformer, VisitResult, Visitor};
pub use transform::{maybe_transform, run_transformer, AstTransform, TransformLog, TransformOutcome};
