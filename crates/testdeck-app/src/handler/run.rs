//! Run submission and its outcome

use chrono::Local;
use testdeck_client::RunResponse;
use testdeck_core::ExecutionSummary;
use tracing::{debug, info, warn};

use crate::state::{AppState, View};

use super::{navigation, results, UpdateAction, UpdateResult};

/// Submit every checked class. The checkboxes are cleared once the request
/// goes out; while another run is pending they stay as they are.
pub fn handle_run_selected(state: &mut AppState) -> UpdateResult {
    let class_names = state.catalog.checked_classes();
    if class_names.is_empty() {
        return UpdateResult::none();
    }
    if state.run_in_flight {
        state.show_alert("A run is already being submitted, try again in a moment");
        return UpdateResult::none();
    }
    state.catalog.clear_checked();
    dispatch_run(state, class_names)
}

/// Run the classes of a past execution again.
pub fn handle_rerun(state: &mut AppState, execution_id: &str) -> UpdateResult {
    let cached = state.executions.find(execution_id).or_else(|| {
        state
            .dashboard_executions()
            .iter()
            .find(|e| e.execution_id == execution_id)
    });
    let class_names = match cached {
        Some(exec) => exec.class_list(),
        None => {
            state.show_alert(format!("Execution {execution_id} not found"));
            return UpdateResult::none();
        }
    };
    if class_names.is_empty() {
        state.show_alert(format!(
            "Execution {execution_id} has no test classes to re-run"
        ));
        return UpdateResult::none();
    }
    dispatch_run(state, class_names)
}

fn dispatch_run(state: &mut AppState, class_names: Vec<String>) -> UpdateResult {
    if state.run_in_flight {
        debug!("Run already in flight, ignoring request");
        return UpdateResult::none();
    }
    info!("Submitting run for {} class(es)", class_names.len());
    state.run_in_flight = true;
    UpdateResult::action(UpdateAction::SubmitRun { class_names })
}

/// Outcome of a run request.
///
/// Accepted runs get an optimistic RUNNING row, the results view with the
/// new execution selected, and a background reload of the list. Rejected
/// runs leave the caches untouched and raise an alert.
pub fn handle_run_submitted(
    state: &mut AppState,
    class_names: Vec<String>,
    result: Result<RunResponse, String>,
) -> UpdateResult {
    state.run_in_flight = false;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            warn!("Run request failed: {}", e);
            state.show_alert(format!("Failed to run tests: {e}"));
            return UpdateResult::none();
        }
    };

    let Some(execution_id) = response.accepted_id().map(str::to_string) else {
        state.show_alert(response.rejection_message());
        return UpdateResult::none();
    };

    info!("Run accepted as {}", execution_id);
    state.executions.insert_optimistic(ExecutionSummary::optimistic(
        execution_id.clone(),
        &class_names,
        Local::now().naive_local(),
    ));
    state.dashboard.invalidate();
    state.dashboard_panel.reset();

    let mut actions = navigation::switch_view(state, View::TestResults);
    actions.extend(results::select_execution(state, execution_id));
    actions.push(results::fetch_executions(state));
    UpdateResult::actions(actions)
}
