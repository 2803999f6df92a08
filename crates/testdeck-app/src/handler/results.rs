//! Execution list, selection and filter handlers

use chrono::{Local, NaiveDate};
use testdeck_core::{ExecutionResults, ExecutionSummary};
use tracing::{debug, warn};

use crate::state::{AppState, FilterField, Focus, UiMode, View};

use super::{navigation, UpdateAction, UpdateResult};

/// Request the execution list. Rows already shown stay visible.
pub(crate) fn fetch_executions(state: &mut AppState) -> UpdateAction {
    UpdateAction::FetchExecutions {
        generation: state.results.list.begin_refresh(),
        limit: state.settings.server.execution_limit,
    }
}

pub fn handle_load_executions(state: &mut AppState) -> UpdateResult {
    UpdateResult::action(fetch_executions(state))
}

pub fn handle_executions_loaded(
    state: &mut AppState,
    generation: u64,
    result: Result<Vec<ExecutionSummary>, String>,
) -> UpdateResult {
    if !state.results.list.is_current(generation) {
        debug!("Dropping stale execution list (generation {})", generation);
        return UpdateResult::none();
    }

    match result {
        Ok(executions) => {
            debug!("Loaded {} executions", executions.len());
            state.executions.replace_all(executions);
            state.results.list.ready();
            state.clamp_results_cursor();
        }
        Err(e) => {
            warn!("Failed to load executions: {}", e);
            state.results.list.fail("Failed to load executions");
        }
    }
    UpdateResult::none()
}

/// Select an execution and fetch its result tree.
pub(crate) fn select_execution(state: &mut AppState, execution_id: String) -> Vec<UpdateAction> {
    if let Some(pos) = state
        .filtered_executions()
        .iter()
        .position(|e| e.execution_id == execution_id)
    {
        state.results.cursor = pos;
    }

    let reselect = state.results.selected.as_deref() == Some(execution_id.as_str());
    let generation = if reselect {
        state.results.detail.begin_refresh()
    } else {
        state.results.node_cursor = 0;
        state.results.detail.begin_load()
    };
    state.results.selected = Some(execution_id.clone());

    vec![UpdateAction::FetchExecutionResults {
        generation,
        execution_id,
    }]
}

pub fn handle_open_execution(state: &mut AppState, execution_id: String) -> UpdateResult {
    let mut actions = navigation::switch_view(state, View::TestResults);
    state.focus = Focus::Main;
    actions.extend(select_execution(state, execution_id));
    UpdateResult::actions(actions)
}

pub fn handle_execution_results_loaded(
    state: &mut AppState,
    generation: u64,
    execution_id: &str,
    result: Result<ExecutionResults, String>,
) -> UpdateResult {
    let selected = state.results.selected.as_deref() == Some(execution_id);
    if !state.results.detail.is_current(generation) || !selected {
        debug!("Dropping stale results for execution {}", execution_id);
        return UpdateResult::none();
    }

    match result {
        Ok(results) => {
            state.executions.store_detail(execution_id, results);
            state.results.detail.ready();
            let len = state.result_rows().len();
            state.results.node_cursor = state.results.node_cursor.min(len.saturating_sub(1));
        }
        Err(e) => {
            warn!("Failed to load results for {}: {}", execution_id, e);
            state.results.detail.fail("Failed to load test results");
        }
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_cycle_status(state: &mut AppState) -> UpdateResult {
    state.filter.status = state.filter.status.next();
    state.clamp_results_cursor();
    UpdateResult::none()
}

pub fn handle_enter_filter_input(state: &mut AppState, field: FilterField) -> UpdateResult {
    state.input_buffer = match field {
        FilterField::RequesterIp => state.filter.requester_ip.clone(),
        FilterField::ClassName => state.filter.class_name.clone(),
        FilterField::Date => state
            .filter
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    };
    state.ui_mode = UiMode::FilterInput(field);
    UpdateResult::none()
}

pub fn handle_commit_filter_input(state: &mut AppState) -> UpdateResult {
    let UiMode::FilterInput(field) = state.ui_mode else {
        return UpdateResult::none();
    };
    state.ui_mode = UiMode::Normal;
    let value = std::mem::take(&mut state.input_buffer).trim().to_string();

    match field {
        FilterField::RequesterIp => state.filter.requester_ip = value,
        FilterField::ClassName => state.filter.class_name = value,
        FilterField::Date if value.is_empty() => state.filter.date = None,
        FilterField::Date => match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
            Ok(date) => state.filter.date = Some(date),
            Err(_) => {
                state.show_alert(format!("Invalid date '{value}' (expected YYYY-MM-DD)"));
                return UpdateResult::none();
            }
        },
    }
    state.clamp_results_cursor();
    UpdateResult::none()
}

pub fn handle_clear_filters(state: &mut AppState) -> UpdateResult {
    state.filter.reset();
    state.clamp_results_cursor();
    UpdateResult::none()
}

pub fn handle_use_server_today() -> UpdateResult {
    UpdateResult::action(UpdateAction::FetchServerToday)
}

/// Server date, or the local date when the server could not be asked
pub fn handle_server_today_loaded(
    state: &mut AppState,
    result: Result<NaiveDate, String>,
) -> UpdateResult {
    let today = match result {
        Ok(date) => date,
        Err(e) => {
            warn!("Failed to fetch server date, using local date: {}", e);
            Local::now().date_naive()
        }
    };
    state.filter.date = Some(today);
    state.clamp_results_cursor();
    UpdateResult::none()
}
