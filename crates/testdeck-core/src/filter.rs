//! Execution list filtering

use chrono::NaiveDate;

use crate::execution::ExecutionSummary;

/// Status predicate of the execution filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    Any,
    Running,
    /// Finished without failures
    Success,
    /// Finished with at least one failure
    Failed,
}

impl StatusFilter {
    /// Cycle Any -> Running -> Success -> Failed -> Any
    pub fn next(self) -> Self {
        match self {
            StatusFilter::Any => StatusFilter::Running,
            StatusFilter::Running => StatusFilter::Success,
            StatusFilter::Success => StatusFilter::Failed,
            StatusFilter::Failed => StatusFilter::Any,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::Any => "All",
            StatusFilter::Running => "RUNNING",
            StatusFilter::Success => "SUCCESS",
            StatusFilter::Failed => "FAILED",
        }
    }

    fn matches(self, exec: &ExecutionSummary) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Running => exec.is_running(),
            StatusFilter::Success => !exec.is_running() && exec.failed_count == 0,
            StatusFilter::Failed => !exec.is_running() && exec.failed_count > 0,
        }
    }
}

/// Filter applied to the execution history. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub date: Option<NaiveDate>,
    pub requester_ip: String,
    pub class_name: String,
    pub status: StatusFilter,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.requester_ip.trim().is_empty()
            && self.class_name.trim().is_empty()
            && self.status == StatusFilter::Any
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a single execution satisfies every non-empty predicate
    pub fn matches(&self, exec: &ExecutionSummary) -> bool {
        if let Some(date) = self.date {
            if exec.started_at.date() != date {
                return false;
            }
        }
        contains_ignore_case(&exec.requester_ip, &self.requester_ip)
            && contains_ignore_case(&exec.class_names, &self.class_name)
            && self.status.matches(exec)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// The stable subsequence of `executions` matching `filter`
pub fn apply_filter<'a>(
    executions: &'a [ExecutionSummary],
    filter: &FilterState,
) -> Vec<&'a ExecutionSummary> {
    executions.iter().filter(|e| filter.matches(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::ExecutionStatus;
    use chrono::NaiveDateTime;

    fn exec(id: &str, started: &str, status: ExecutionStatus, failed: u32) -> ExecutionSummary {
        let mut e = ExecutionSummary::optimistic(
            id,
            &["com.acme.FooTest".to_string()],
            NaiveDateTime::parse_from_str(started, "%Y-%m-%d %H:%M:%S").unwrap(),
        );
        e.status = status;
        e.failed_count = failed;
        e.requester_ip = "192.168.1.20".to_string();
        e
    }

    fn history() -> Vec<ExecutionSummary> {
        let mut other = exec("e4", "2024-05-02 08:00:00", ExecutionStatus::Completed, 0);
        other.class_names = "com.acme.billing.InvoiceTest".to_string();
        other.requester_ip = "10.0.0.5".to_string();
        vec![
            exec("e1", "2024-05-01 10:00:00", ExecutionStatus::Completed, 0),
            exec("e2", "2024-05-01 11:00:00", ExecutionStatus::Completed, 2),
            exec("e3", "2024-05-01 12:00:00", ExecutionStatus::Running, 0),
            other,
        ]
    }

    fn ids(list: &[&ExecutionSummary]) -> Vec<String> {
        list.iter().map(|e| e.execution_id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let all = history();
        let filter = FilterState::default();
        assert!(filter.is_empty());
        assert_eq!(apply_filter(&all, &filter).len(), all.len());
    }

    #[test]
    fn test_failed_status_excludes_running_and_passing() {
        let all = history();
        let filter = FilterState {
            status: StatusFilter::Failed,
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&all, &filter)), vec!["e2"]);
    }

    #[test]
    fn test_success_status_excludes_running() {
        let all = history();
        let filter = FilterState {
            status: StatusFilter::Success,
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&all, &filter)), vec!["e1", "e4"]);
    }

    #[test]
    fn test_running_status() {
        let all = history();
        let filter = FilterState {
            status: StatusFilter::Running,
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&all, &filter)), vec!["e3"]);
    }

    #[test]
    fn test_failed_runner_counts_as_finished() {
        let all = vec![exec("e9", "2024-05-01 10:00:00", ExecutionStatus::Failed, 0)];
        let success = FilterState {
            status: StatusFilter::Success,
            ..Default::default()
        };
        let running = FilterState {
            status: StatusFilter::Running,
            ..Default::default()
        };
        assert_eq!(apply_filter(&all, &success).len(), 1);
        assert!(apply_filter(&all, &running).is_empty());
    }

    #[test]
    fn test_date_predicate_uses_date_portion() {
        let all = history();
        let filter = FilterState {
            date: NaiveDate::from_ymd_opt(2024, 5, 2),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&all, &filter)), vec!["e4"]);
    }

    #[test]
    fn test_text_predicates_are_case_insensitive_substrings() {
        let all = history();
        let filter = FilterState {
            class_name: "INVOICE".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&all, &filter)), vec!["e4"]);

        let filter = FilterState {
            requester_ip: "192.168".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&all, &filter)), vec!["e1", "e2", "e3"]);
    }

    #[test]
    fn test_predicates_combine() {
        let all = history();
        let filter = FilterState {
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
            class_name: "foo".to_string(),
            status: StatusFilter::Success,
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&all, &filter)), vec!["e1"]);
    }

    #[test]
    fn test_result_is_ordered_subset() {
        let all = history();
        let filter = FilterState {
            requester_ip: "1".to_string(),
            ..Default::default()
        };
        let filtered = apply_filter(&all, &filter);
        let mut cursor = all.iter();
        for kept in filtered {
            assert!(cursor.any(|e| e == kept), "filter output must keep input order");
        }
    }

    #[test]
    fn test_reset_clears_all_predicates() {
        let mut filter = FilterState {
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
            requester_ip: "10.".to_string(),
            class_name: "Foo".to_string(),
            status: StatusFilter::Failed,
        };
        filter.reset();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_status_cycle_returns_to_any() {
        let mut status = StatusFilter::Any;
        for _ in 0..4 {
            status = status.next();
        }
        assert_eq!(status, StatusFilter::Any);
    }
}
