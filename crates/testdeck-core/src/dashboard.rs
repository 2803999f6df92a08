//! Dashboard payload
//!
//! Every field is optional on the wire; a missing section decodes to its
//! empty value so a partial response still renders.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::execution::ExecutionSummary;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TodayStats {
    #[serde(alias = "totalExecutions")]
    pub total_executions: u32,
    #[serde(alias = "totalTests")]
    pub total_tests: u32,
    #[serde(alias = "successCount")]
    pub success_count: u32,
    #[serde(alias = "failedCount")]
    pub failed_count: u32,
    #[serde(alias = "skippedCount")]
    pub skipped_count: u32,
}

impl TodayStats {
    /// Share of today's tests that passed, in percent
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_tests == 0 {
            None
        } else {
            Some(f64::from(self.success_count) * 100.0 / f64::from(self.total_tests))
        }
    }
}

/// One day of the weekly trend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub executions: u32,
    #[serde(default, alias = "successCount")]
    pub success_count: u32,
    #[serde(default, alias = "failedCount")]
    pub failed_count: u32,
}

/// A recently failed test
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FailureEntry {
    #[serde(alias = "displayName")]
    pub display_name: String,
    #[serde(default, alias = "errorMessage")]
    pub error_message: Option<String>,
    #[serde(default, alias = "startedAt")]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default, alias = "executionId")]
    pub execution_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    pub today_stats: TodayStats,
    pub recent_executions: Vec<ExecutionSummary>,
    pub weekly_trend: Vec<TrendPoint>,
    pub recent_failures: Vec<FailureEntry>,
    pub total_test_classes: u32,
}

impl DashboardData {
    /// Number of recent executions still RUNNING
    pub fn running_count(&self) -> usize {
        self.recent_executions
            .iter()
            .filter(|e| e.is_running())
            .count()
    }

    pub fn has_running(&self) -> bool {
        self.running_count() > 0
    }
}
