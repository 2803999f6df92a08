//! Execution history and per-execution result types

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::result_tree;

/// Lifecycle status of a triggered run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionStatus {
    Running,
    Completed,
    /// The runner process itself failed (no results were recorded)
    Failed,
}

impl ExecutionStatus {
    pub fn is_running(self) -> bool {
        self == ExecutionStatus::Running
    }

    pub fn label(self) -> &'static str {
        match self {
            ExecutionStatus::Running => "RUNNING",
            ExecutionStatus::Completed => "COMPLETED",
            ExecutionStatus::Failed => "FAILED",
        }
    }
}

/// One row of the execution history.
///
/// `execution_id` is the stable identity; every other field is a snapshot
/// that becomes more accurate while the run progresses and freezes once the
/// status leaves RUNNING.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSummary {
    pub execution_id: String,
    pub started_at: NaiveDateTime,
    #[serde(default)]
    pub finished_at: Option<NaiveDateTime>,
    pub status: ExecutionStatus,
    /// Comma-joined fully qualified class names
    #[serde(default, deserialize_with = "null_as_default")]
    pub class_names: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requester_ip: String,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub total_tests: u32,
    #[serde(default)]
    pub success_count: u32,
    #[serde(default)]
    pub failed_count: u32,
    #[serde(default)]
    pub skipped_count: u32,
    #[serde(default)]
    pub total_duration_millis: u64,
}

impl ExecutionSummary {
    /// Placeholder row for a run the service has just accepted.
    pub fn optimistic(
        execution_id: impl Into<String>,
        class_names: &[String],
        started_at: NaiveDateTime,
    ) -> Self {
        Self {
            execution_id: execution_id.into(),
            started_at,
            finished_at: None,
            status: ExecutionStatus::Running,
            class_names: class_names.join(","),
            requester_ip: String::new(),
            requester_name: None,
            total_tests: 0,
            success_count: 0,
            failed_count: 0,
            skipped_count: 0,
            total_duration_millis: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// The recorded class names, split and trimmed. Empty entries are dropped.
    pub fn class_list(&self) -> Vec<String> {
        self.class_names
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Who triggered the run: the requester name when known, otherwise the IP.
    pub fn requester_label(&self) -> &str {
        match self.requester_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.requester_ip,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Result tree
// ─────────────────────────────────────────────────────────────────────────────

/// Final outcome of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultStatus {
    Success,
    Failed,
    Skipped,
}

impl ResultStatus {
    pub fn icon(self) -> &'static str {
        match self {
            ResultStatus::Success => "✓",
            ResultStatus::Failed => "✗",
            ResultStatus::Skipped => "⊘",
        }
    }
}

/// A leaf test outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLeaf {
    pub id: String,
    pub display_name: String,
    /// `None` while the test is still executing
    pub status: Option<ResultStatus>,
    pub duration_millis: u64,
    pub error_message: Option<String>,
    pub stack_trace: Option<String>,
    pub stdout: Option<String>,
}

/// An intermediate node: test engine, class or nested class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultContainer {
    pub id: String,
    pub display_name: String,
    /// Containers still executing have no final status
    pub status: Option<ResultStatus>,
    pub duration_millis: u64,
    pub error_message: Option<String>,
    pub children: Vec<ResultNode>,
}

/// Node of an execution's result tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawResultNode")]
pub enum ResultNode {
    Test(ResultLeaf),
    Container(ResultContainer),
}

impl ResultNode {
    /// Convenience constructor for a passing/failing/skipped leaf.
    pub fn leaf(id: impl Into<String>, display_name: impl Into<String>, status: ResultStatus) -> Self {
        ResultNode::Test(ResultLeaf {
            id: id.into(),
            display_name: display_name.into(),
            status: Some(status),
            duration_millis: 0,
            error_message: None,
            stack_trace: None,
            stdout: None,
        })
    }

    /// Convenience constructor for a container without status of its own.
    pub fn container(
        id: impl Into<String>,
        display_name: impl Into<String>,
        children: Vec<ResultNode>,
    ) -> Self {
        ResultNode::Container(ResultContainer {
            id: id.into(),
            display_name: display_name.into(),
            status: None,
            duration_millis: 0,
            error_message: None,
            children,
        })
    }

    pub fn id(&self) -> &str {
        match self {
            ResultNode::Test(leaf) => &leaf.id,
            ResultNode::Container(c) => &c.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ResultNode::Test(leaf) => &leaf.display_name,
            ResultNode::Container(c) => &c.display_name,
        }
    }

    pub fn duration_millis(&self) -> u64 {
        match self {
            ResultNode::Test(leaf) => leaf.duration_millis,
            ResultNode::Container(c) => c.duration_millis,
        }
    }

    pub fn status(&self) -> Option<ResultStatus> {
        match self {
            ResultNode::Test(leaf) => leaf.status,
            ResultNode::Container(c) => c.status,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResultNode::Test(leaf) => leaf.error_message.as_deref(),
            ResultNode::Container(c) => c.error_message.as_deref(),
        }
    }

    /// Children of a container; empty for a leaf.
    pub fn children(&self) -> &[ResultNode] {
        match self {
            ResultNode::Test(_) => &[],
            ResultNode::Container(c) => &c.children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ResultNode::Test(_))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum RawStatus {
    Running,
    Success,
    Failed,
    Skipped,
}

impl RawStatus {
    fn outcome(self) -> Option<ResultStatus> {
        match self {
            RawStatus::Running => None,
            RawStatus::Success => Some(ResultStatus::Success),
            RawStatus::Failed => Some(ResultStatus::Failed),
            RawStatus::Skipped => Some(ResultStatus::Skipped),
        }
    }
}

/// Wire shape: `children` absent or empty means leaf; a `RUNNING` or
/// missing status means no outcome yet.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResultNode {
    id: String,
    display_name: String,
    #[serde(default)]
    status: Option<RawStatus>,
    #[serde(default)]
    duration_millis: u64,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    stack_trace: Option<String>,
    #[serde(default)]
    stdout: Option<String>,
    #[serde(default)]
    children: Option<Vec<ResultNode>>,
}

impl From<RawResultNode> for ResultNode {
    fn from(raw: RawResultNode) -> Self {
        let status = raw.status.and_then(RawStatus::outcome);
        match raw.children {
            Some(children) if !children.is_empty() => ResultNode::Container(ResultContainer {
                id: raw.id,
                display_name: raw.display_name,
                status,
                duration_millis: raw.duration_millis,
                error_message: raw.error_message,
                children,
            }),
            _ => ResultNode::Test(ResultLeaf {
                id: raw.id,
                display_name: raw.display_name,
                status,
                duration_millis: raw.duration_millis,
                error_message: raw.error_message,
                stack_trace: raw.stack_trace,
                stdout: raw.stdout,
            }),
        }
    }
}

/// Total/success/failed/skipped counts plus summed leaf duration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultSummary {
    pub total: u32,
    pub success: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total_duration_millis: u64,
}

/// Detail payload for one execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExecutionResults {
    #[serde(default)]
    pub summary: Option<ResultSummary>,
    #[serde(default)]
    pub results: Vec<ResultNode>,
}

impl ExecutionResults {
    pub fn new(results: Vec<ResultNode>) -> Self {
        Self {
            summary: None,
            results,
        }
    }

    /// The server's summary, or one computed from the tree when absent.
    pub fn summary(&self) -> ResultSummary {
        self.summary
            .unwrap_or_else(|| result_tree::summarize(&self.results))
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
