//! In-memory [`TestService`] for engine and handler tests
//!
//! Canned responses are configured with the `with_*` builders; every call is
//! recorded so tests can assert on what was (or was not) requested.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use testdeck_core::prelude::*;
use testdeck_core::{
    CatalogNode, ClassDetail, DashboardData, ExecutionResults, ExecutionStatus, ExecutionSummary,
};

use crate::protocol::{RefreshResponse, RunResponse};
use crate::service::TestService;

/// A request observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CatalogTree,
    ClassDetail(String),
    MethodCode(String),
    SubmitRun(Vec<String>),
    Executions(usize),
    ExecutionResults(String),
    Dashboard,
    RefreshCatalog,
    ServerToday,
}

impl Call {
    /// Endpoint name used with [`FakeTestService::failing`]
    pub fn endpoint(&self) -> &'static str {
        match self {
            Call::CatalogTree => "catalog_tree",
            Call::ClassDetail(_) => "class_detail",
            Call::MethodCode(_) => "method_code",
            Call::SubmitRun(_) => "submit_run",
            Call::Executions(_) => "executions",
            Call::ExecutionResults(_) => "execution_results",
            Call::Dashboard => "dashboard",
            Call::RefreshCatalog => "refresh_catalog",
            Call::ServerToday => "server_today",
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    catalog: Vec<CatalogNode>,
    class_details: HashMap<String, ClassDetail>,
    method_codes: HashMap<String, String>,
    run_responses: VecDeque<RunResponse>,
    executions: Vec<ExecutionSummary>,
    results: HashMap<String, ExecutionResults>,
    /// Consumed front to back; the last entry keeps being served.
    dashboards: VecDeque<DashboardData>,
    refresh: Option<RefreshResponse>,
    today: Option<NaiveDate>,
    failing: HashSet<&'static str>,
    calls: Vec<Call>,
}

/// Shared, cloneable fake service
#[derive(Debug, Clone, Default)]
pub struct FakeTestService {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTestService {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        // A panicking test thread must not hide the original failure.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with_catalog(self, catalog: Vec<CatalogNode>) -> Self {
        self.lock().catalog = catalog;
        self
    }

    pub fn with_class_detail(self, detail: ClassDetail) -> Self {
        self.lock()
            .class_details
            .insert(detail.full_class_name.clone(), detail);
        self
    }

    pub fn with_method_code(self, unique_id: &str, code: &str) -> Self {
        self.lock()
            .method_codes
            .insert(unique_id.to_string(), code.to_string());
        self
    }

    /// Queue a reply for the next `submit_run`
    pub fn with_run_response(self, response: RunResponse) -> Self {
        self.lock().run_responses.push_back(response);
        self
    }

    pub fn with_executions(self, executions: Vec<ExecutionSummary>) -> Self {
        self.set_executions(executions);
        self
    }

    pub fn with_results(self, execution_id: &str, results: ExecutionResults) -> Self {
        self.lock()
            .results
            .insert(execution_id.to_string(), results);
        self
    }

    /// Queue a dashboard reply
    pub fn with_dashboard(self, data: DashboardData) -> Self {
        self.push_dashboard(data);
        self
    }

    pub fn with_refresh(self, response: RefreshResponse) -> Self {
        self.lock().refresh = Some(response);
        self
    }

    pub fn with_server_today(self, today: NaiveDate) -> Self {
        self.lock().today = Some(today);
        self
    }

    /// Make every call to `endpoint` (see [`Call::endpoint`]) fail with a
    /// transport error.
    pub fn failing(self, endpoint: &'static str) -> Self {
        self.lock().failing.insert(endpoint);
        self
    }

    pub fn set_executions(&self, executions: Vec<ExecutionSummary>) {
        self.lock().executions = executions;
    }

    pub fn push_dashboard(&self, data: DashboardData) {
        self.lock().dashboards.push_back(data);
    }

    /// Every call observed so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of calls made to `endpoint`
    pub fn call_count(&self, endpoint: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.endpoint() == endpoint)
            .count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn record(&self, call: Call) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.lock();
        let endpoint = call.endpoint();
        state.calls.push(call);
        if state.failing.contains(endpoint) {
            return Err(Error::transport(format!("{endpoint}: connection refused")));
        }
        Ok(state)
    }
}

impl TestService for FakeTestService {
    async fn catalog_tree(&self) -> Result<Vec<CatalogNode>> {
        Ok(self.record(Call::CatalogTree)?.catalog.clone())
    }

    async fn class_detail(&self, class_name: &str) -> Result<ClassDetail> {
        let state = self.record(Call::ClassDetail(class_name.to_string()))?;
        state
            .class_details
            .get(class_name)
            .cloned()
            .ok_or_else(|| Error::http(400, format!("Class not found: {class_name}")))
    }

    async fn method_code(&self, unique_id: &str) -> Result<String> {
        let state = self.record(Call::MethodCode(unique_id.to_string()))?;
        state
            .method_codes
            .get(unique_id)
            .cloned()
            .ok_or_else(|| Error::http(400, format!("Method not found: {unique_id}")))
    }

    async fn submit_run(&self, class_names: &[String]) -> Result<RunResponse> {
        let mut state = self.record(Call::SubmitRun(class_names.to_vec()))?;
        Ok(state
            .run_responses
            .pop_front()
            .unwrap_or_else(|| RunResponse::rejected("no canned run response")))
    }

    async fn executions(&self, limit: usize) -> Result<Vec<ExecutionSummary>> {
        let state = self.record(Call::Executions(limit))?;
        Ok(state.executions.iter().take(limit).cloned().collect())
    }

    async fn execution_results(&self, execution_id: &str) -> Result<ExecutionResults> {
        let state = self.record(Call::ExecutionResults(execution_id.to_string()))?;
        Ok(state.results.get(execution_id).cloned().unwrap_or_default())
    }

    async fn dashboard(&self) -> Result<DashboardData> {
        let mut state = self.record(Call::Dashboard)?;
        if state.dashboards.len() > 1 {
            Ok(state.dashboards.pop_front().unwrap_or_default())
        } else {
            Ok(state.dashboards.front().cloned().unwrap_or_default())
        }
    }

    async fn refresh_catalog(&self) -> Result<RefreshResponse> {
        let state = self.record(Call::RefreshCatalog)?;
        Ok(state.refresh.clone().unwrap_or_else(RefreshResponse::success))
    }

    async fn server_today(&self) -> Result<NaiveDate> {
        let state = self.record(Call::ServerToday)?;
        state
            .today
            .ok_or_else(|| Error::http(404, "server time unavailable"))
    }
}

/// A completed or running execution row for tests.
pub fn test_execution(id: &str, status: ExecutionStatus, failed: u32) -> ExecutionSummary {
    let started = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap_or_default();
    let mut exec = ExecutionSummary::optimistic(id, &["com.acme.FooTest".to_string()], started);
    exec.status = status;
    exec.failed_count = failed;
    exec.requester_ip = "127.0.0.1".to_string();
    if status != ExecutionStatus::Running {
        exec.total_tests = 3;
        exec.success_count = 3u32.saturating_sub(failed);
    }
    exec
}

/// Dashboard data whose recent executions have the given statuses.
pub fn test_dashboard(statuses: &[ExecutionStatus]) -> DashboardData {
    DashboardData {
        recent_executions: statuses
            .iter()
            .enumerate()
            .map(|(i, status)| test_execution(&format!("d{i}"), *status, 0))
            .collect(),
        ..Default::default()
    }
}
