// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised by structural queries over the tree.

use thiserror::Error;

use crate::nodes::NodeId;

/// A structural query found the tree in a shape it requires not to be.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CstError {
    /// No ancestor of the expected kind encloses the node.
    #[error("node {node} has no enclosing {expected}")]
    MissingAncestor { expected: &'static str, node: NodeId },

    /// The node's parent is not of the kind the query requires.
    #[error("node {node}: expected parent {expected}, found {found}")]
    UnexpectedParent {
        expected: &'static str,
        found: &'static str,
        node: NodeId,
    },
}

/// Result type for tree queries and transformations.
pub type Result<T, E = CstError> = std::result::Result<T, E>;
