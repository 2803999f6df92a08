//! Pure transformations over an execution's result tree
//!
//! The service reports results as a forest whose top level is usually a
//! single engine node ("JUnit Jupiter") wrapping the test classes. The
//! detail view wants the classes at the top, per-subtree counts, and a way
//! to tell nested test classes apart from plain containers.

use std::sync::LazyLock;

use regex::Regex;

use crate::execution::{ResultNode, ResultStatus, ResultSummary};

/// Display name of the engine node that wraps every test class
pub const ENGINE_DISPLAY_NAME: &str = "JUnit Jupiter";

/// Unique-id suffix of a nested test class, e.g. `.../[nested-class:WhenEmpty]`
static NESTED_CLASS_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[nested-class:[^\]]+\]$").expect("valid nested-class regex")
});

/// Leaf outcome counts of a subtree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub success: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total: u32,
}

impl Counts {
    /// A leaf without outcome (still running) only counts toward `total`.
    fn record(&mut self, status: Option<ResultStatus>) {
        self.total += 1;
        match status {
            Some(ResultStatus::Success) => self.success += 1,
            Some(ResultStatus::Failed) => self.failed += 1,
            Some(ResultStatus::Skipped) => self.skipped += 1,
            None => {}
        }
    }

    /// Leaves still waiting for an outcome
    pub fn pending(&self) -> u32 {
        self.total - self.success - self.failed - self.skipped
    }
}

/// Replace top-level engine nodes by their children.
///
/// Only the top level is inspected; any other node passes through unchanged
/// and order is preserved. Applying it twice yields the same forest as
/// applying it once, as long as no class is itself named like the engine.
pub fn group_by_test_class(nodes: &[ResultNode]) -> Vec<ResultNode> {
    let mut grouped = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            ResultNode::Container(engine) if engine.display_name == ENGINE_DISPLAY_NAME => {
                grouped.extend(engine.children.iter().cloned());
            }
            other => grouped.push(other.clone()),
        }
    }
    grouped
}

/// Sum the leaf outcomes of a subtree. Containers contribute nothing.
pub fn aggregate(node: &ResultNode) -> Counts {
    let mut counts = Counts::default();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        match current {
            ResultNode::Test(leaf) => counts.record(leaf.status),
            ResultNode::Container(container) => stack.extend(container.children.iter()),
        }
    }
    counts
}

/// Whether the node's id ends with a nested-class marker segment
pub fn is_nested_class_node(node: &ResultNode) -> bool {
    NESTED_CLASS_MARKER.is_match(node.id())
}

/// Summary of a whole forest; durations are summed over leaves only.
pub fn summarize(nodes: &[ResultNode]) -> ResultSummary {
    let mut summary = ResultSummary::default();
    let mut stack: Vec<&ResultNode> = nodes.iter().collect();
    while let Some(current) = stack.pop() {
        match current {
            ResultNode::Test(leaf) => {
                summary.total += 1;
                summary.total_duration_millis += leaf.duration_millis;
                match leaf.status {
                    Some(ResultStatus::Success) => summary.success += 1,
                    Some(ResultStatus::Failed) => summary.failed += 1,
                    Some(ResultStatus::Skipped) => summary.skipped += 1,
                    None => {}
                }
            }
            ResultNode::Container(container) => stack.extend(container.children.iter()),
        }
    }
    summary
}
