// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Whitespace and comment bytes attached to node boundaries.

use serde::{Deserialize, Serialize};

/// Literal text printed before and after a node.
///
/// Both strings are preserved verbatim: they may hold spaces, tabs, newlines
/// and comments. Rules that rebuild a node without meaning to change its
/// appearance copy the original `Formatting` onto the replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formatting {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suffix: String,
}

impl Formatting {
    /// Formatting with no bytes on either side.
    pub const EMPTY: Formatting = Formatting {
        prefix: String::new(),
        suffix: String::new(),
    };

    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Formatting {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Formatting with only a prefix.
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Formatting::new(prefix, "")
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }

    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        Formatting {
            prefix: prefix.into(),
            suffix: self.suffix.clone(),
        }
    }

    pub fn with_suffix(&self, suffix: impl Into<String>) -> Self {
        Formatting {
            prefix: self.prefix.clone(),
            suffix: suffix.into(),
        }
    }

    /// Drop the prefix, keeping the suffix.
    pub fn strip_prefix(&self) -> Self {
        self.with_prefix("")
    }

    /// Drop the suffix, keeping the prefix.
    pub fn strip_suffix(&self) -> Self {
        self.with_suffix("")
    }
}

/// An element introduced by a keyword or operator token.
///
/// `before` holds the whitespace between the preceding element and the token
/// (`extends`, `=`, `->`, a binary operator, an opening parenthesis); the
/// element itself carries the whitespace after the token in its own prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Padded<T> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub before: String,
    pub elem: T,
}

impl<T> Padded<T> {
    pub fn new(before: impl Into<String>, elem: T) -> Self {
        Padded {
            before: before.into(),
            elem,
        }
    }

    /// Element with no whitespace before its token.
    pub fn bare(elem: T) -> Self {
        Padded::new("", elem)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Padded<U> {
        Padded {
            before: self.before,
            elem: f(self.elem),
        }
    }
}
