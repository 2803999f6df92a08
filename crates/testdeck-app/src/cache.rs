//! Client-side caches of server data
//!
//! Both caches distinguish "not loaded" (`None`) from "loaded but empty".
//! They are only written by the update loop.

use testdeck_core::{DashboardData, ExecutionResults, ExecutionSummary};

/// Execution history plus the most recently loaded result tree
#[derive(Debug, Clone, Default)]
pub struct ExecutionCache {
    executions: Option<Vec<ExecutionSummary>>,
    detail: Option<(String, ExecutionResults)>,
}

impl ExecutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.executions.is_some()
    }

    /// The cached list, if loaded
    pub fn executions(&self) -> Option<&[ExecutionSummary]> {
        self.executions.as_deref()
    }

    /// Prepend a placeholder for a just-submitted run, creating the list if
    /// it was never loaded.
    pub fn insert_optimistic(&mut self, exec: ExecutionSummary) {
        self.executions.get_or_insert_with(Vec::new).insert(0, exec);
    }

    /// Replace the list wholesale with the server's view.
    pub fn replace_all(&mut self, executions: Vec<ExecutionSummary>) {
        self.executions = Some(executions);
    }

    /// Forget the list; the next visit to the results view fetches it again.
    pub fn invalidate(&mut self) {
        self.executions = None;
    }

    pub fn find(&self, execution_id: &str) -> Option<&ExecutionSummary> {
        self.executions
            .as_ref()?
            .iter()
            .find(|e| e.execution_id == execution_id)
    }

    pub fn running_count(&self) -> usize {
        self.executions
            .as_ref()
            .map(|list| list.iter().filter(|e| e.is_running()).count())
            .unwrap_or(0)
    }

    /// Keep the result tree of one execution, evicting any previous one.
    pub fn store_detail(&mut self, execution_id: impl Into<String>, results: ExecutionResults) {
        self.detail = Some((execution_id.into(), results));
    }

    pub fn detail_for(&self, execution_id: &str) -> Option<&ExecutionResults> {
        match &self.detail {
            Some((id, results)) if id == execution_id => Some(results),
            _ => None,
        }
    }

    pub fn clear_detail(&mut self) {
        self.detail = None;
    }
}

/// Last dashboard payload
#[derive(Debug, Clone, Default)]
pub struct DashboardCache {
    data: Option<DashboardData>,
}

impl DashboardCache {
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn get(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    pub fn populate(&mut self, data: DashboardData) {
        self.data = Some(data);
    }

    pub fn invalidate(&mut self) {
        self.data = None;
    }
}
