//! Running configured rules, and the follow-ups they schedule, in order.

use std::collections::VecDeque;

use tracing::{debug, debug_span};

use lintfix_cst::visitor::AstTransform;
use lintfix_cst::NodeRef;

use crate::error::{PipelineError, RuleError};
use crate::rule::Rule;

/// Follow-up rules one configured rule may cause before the pipeline gives up.
pub const MAX_FOLLOW_UPS: usize = 100_000;

/// Result of running a pipeline over one compilation unit.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub tree: NodeRef,
    /// Every replaced node, in application order.
    pub transforms: Vec<AstTransform>,
}

impl PipelineOutcome {
    pub fn is_changed(&self) -> bool {
        !self.transforms.is_empty()
    }
}

/// An ordered list of rules.
///
/// Each rule sees the output of the previous one. Follow-ups returned by a
/// rule run first-in first-out on the latest tree before the next configured
/// rule starts; a follow-up may schedule further follow-ups, which join the
/// back of the same queue.
#[derive(Debug, Default)]
pub struct Pipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl Pipeline {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Pipeline { rules }
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule over `tree`.
    ///
    /// The first failing rule aborts the run; nothing is returned for the
    /// compilation unit in that case.
    pub fn run(&self, tree: &NodeRef) -> Result<PipelineOutcome, PipelineError> {
        let mut tree = NodeRef::clone(tree);
        let mut transforms = Vec::new();

        for rule in &self.rules {
            let _span = debug_span!("rule", name = rule.name()).entered();
            let output = rule.apply(&tree).map_err(|source| failed(&**rule, source))?;
            tree = output.tree;
            transforms.extend(output.transforms);

            let mut queue: VecDeque<Box<dyn Rule>> = output.and_then.into();
            let mut follow_ups = 0;
            while let Some(follow_up) = queue.pop_front() {
                follow_ups += 1;
                if follow_ups > MAX_FOLLOW_UPS {
                    return Err(failed(
                        &**rule,
                        RuleError::FollowUpBoundExceeded {
                            rule: rule.name().to_string(),
                            limit: MAX_FOLLOW_UPS,
                        },
                    ));
                }
                let output = follow_up
                    .apply(&tree)
                    .map_err(|source| failed(&*follow_up, source))?;
                tree = output.tree;
                transforms.extend(output.transforms);
                queue.extend(output.and_then);
            }
            debug!(follow_ups, transforms = transforms.len(), "rule finished");
        }

        Ok(PipelineOutcome { tree, transforms })
    }
}

fn failed(rule: &dyn Rule, source: RuleError) -> PipelineError {
    PipelineError {
        rule: rule.name().to_string(),
        source,
    }
}
