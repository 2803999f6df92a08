//! The test execution service as seen by the client
//!
//! The application engine is generic over [`TestService`] so that the HTTP
//! implementation can be swapped for an in-memory fake in tests.

use chrono::NaiveDate;
use testdeck_core::prelude::*;
use testdeck_core::{CatalogNode, ClassDetail, DashboardData, ExecutionResults, ExecutionSummary};

use crate::protocol::{RefreshResponse, RunResponse};

/// Operations offered by the backend test execution service
#[trait_variant::make(TestService: Send)]
pub trait LocalTestService {
    /// Package/class tree for the sidebar
    async fn catalog_tree(&self) -> Result<Vec<CatalogNode>>;

    /// Method tree of one class
    async fn class_detail(&self, class_name: &str) -> Result<ClassDetail>;

    /// Source code of one test method
    async fn method_code(&self, unique_id: &str) -> Result<String>;

    /// Submit a run. Rejections reported in the body are returned as `Ok`;
    /// only transport and HTTP failures are errors.
    async fn submit_run(&self, class_names: &[String]) -> Result<RunResponse>;

    /// Most recent executions, newest first
    async fn executions(&self, limit: usize) -> Result<Vec<ExecutionSummary>>;

    /// Result tree of one execution
    async fn execution_results(&self, execution_id: &str) -> Result<ExecutionResults>;

    async fn dashboard(&self) -> Result<DashboardData>;

    /// Rescan the test catalog on the server
    async fn refresh_catalog(&self) -> Result<RefreshResponse>;

    /// The server's current date
    async fn server_today(&self) -> Result<NaiveDate>;
}
