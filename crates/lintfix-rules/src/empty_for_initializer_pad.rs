//! `EmptyForInitializerPad`: padding of an empty `for` initializer.
//!
//! `for (; i < n; i++)` and `for ( ; i < n; i++)` differ only in the prefix
//! of the empty initializer. The rule rewrites that prefix to the configured
//! padding. Initializers that wrap onto a new line are left alone.

use std::sync::Arc;

use lintfix_cst::nodes::{ForControl, ForLoop, Node, NodeKind};
use lintfix_cst::visitor::{run_transformer, walk_children, TransformLog, Transformer};
use lintfix_cst::{Cursor, NodeRef};

use crate::config::{PadConfig, PadPolicy};
use crate::error::RuleError;
use crate::rule::{Rule, RuleOutput};

#[derive(Debug, Clone, Default)]
pub struct EmptyForInitializerPad {
    option: PadPolicy,
}

impl EmptyForInitializerPad {
    pub const NAME: &'static str = "EmptyForInitializerPad";

    pub fn new(config: PadConfig) -> Self {
        EmptyForInitializerPad {
            option: config.option,
        }
    }
}

impl Rule for EmptyForInitializerPad {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, tree: &NodeRef) -> Result<RuleOutput, RuleError> {
        let mut pad = PadEmptyInitializer {
            log: TransformLog::new(Self::NAME),
            padding: self.option.padding(),
        };
        Ok(run_transformer(&mut pad, tree)?.into())
    }
}

struct PadEmptyInitializer {
    log: TransformLog,
    padding: &'static str,
}

impl PadEmptyInitializer {
    fn needs_padding(&self, for_loop: &ForLoop) -> bool {
        empty_initializer(for_loop).is_some_and(|init| {
            let prefix = init.prefix();
            prefix != self.padding && prefix.chars().all(|c| c == ' ' || c == '\t')
        })
    }
}

impl Transformer for PadEmptyInitializer {
    fn log(&mut self) -> &mut TransformLog {
        &mut self.log
    }

    fn visit_for_loop(&mut self, cursor: &Cursor<'_>, node: &ForLoop) -> lintfix_cst::Result<NodeRef> {
        let visited = walk_children(self, cursor)?;
        let should_apply = self.needs_padding(node);
        let padding = self.padding;
        Ok(self.maybe_transform(cursor.node(), should_apply, visited, |for_loop| {
            with_initializer_prefix(for_loop, padding)
        }))
    }
}

/// The initializer of `for_loop` when it is a lone empty statement.
fn empty_initializer(for_loop: &ForLoop) -> Option<&NodeRef> {
    match for_loop.control.as_for_control()?.init.as_slice() {
        [init] if init.as_empty().is_some() => Some(init),
        _ => None,
    }
}

fn with_initializer_prefix(node: &Node, padding: &str) -> Node {
    let Some(for_loop) = node.as_for_loop() else {
        return node.clone();
    };
    let Some(control) = for_loop.control.as_for_control() else {
        return node.clone();
    };
    let init = control
        .init
        .iter()
        .enumerate()
        .map(|(i, init)| if i == 0 { Arc::new(init.with_prefix(padding)) } else { Arc::clone(init) })
        .collect();
    let control = for_loop.control.with_kind(NodeKind::ForControl(ForControl {
        init,
        ..control.clone()
    }));
    node.with_kind(NodeKind::ForLoop(ForLoop {
        control: Arc::new(control),
        body: Arc::clone(&for_loop.body),
    }))
}
