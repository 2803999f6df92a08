//! View switching, focus and cursor movement

use tracing::debug;

use crate::state::{AppState, CursorMove, Focus, UiMode, View};

use super::{catalog, dashboard, results, UpdateAction, UpdateResult};

/// Activate a view and schedule whatever it needs to show current data.
///
/// - Test Results fetches the execution list if the cache is unloaded.
/// - Dashboard fetches if its cache is unloaded.
/// - Test Info and Dashboard refresh the opened class, if any.
///
/// Caches are never cleared here.
pub(crate) fn switch_view(state: &mut AppState, target: View) -> Vec<UpdateAction> {
    if state.active_view != target {
        debug!("Switching view {:?} -> {:?}", state.active_view, target);
    }
    state.active_view = target;
    if target != View::TestResults && state.focus == Focus::Detail {
        state.focus = Focus::Main;
    }

    let mut actions = Vec::new();
    match target {
        View::TestResults if !state.executions.is_loaded() => {
            actions.push(results::fetch_executions(state));
        }
        View::Dashboard => actions.extend(dashboard::on_enter(state)),
        _ => {}
    }

    if matches!(target, View::TestInfo | View::Dashboard) {
        actions.extend(catalog::refresh_class_detail(state));
    }
    actions
}

pub fn handle_switch_view(state: &mut AppState, target: View) -> UpdateResult {
    UpdateResult::actions(switch_view(state, target))
}

pub fn handle_set_focus(state: &mut AppState, focus: Focus) -> UpdateResult {
    state.focus = match focus {
        Focus::Detail if state.active_view != View::TestResults => Focus::Main,
        other => other,
    };
    UpdateResult::none()
}

pub fn handle_move_cursor(state: &mut AppState, movement: CursorMove) -> UpdateResult {
    match (state.focus, state.active_view) {
        (Focus::Sidebar, _) => state.catalog.move_cursor(movement),
        (Focus::Main, View::Dashboard) => {
            let len = state.dashboard_executions().len();
            state.dashboard_cursor = movement.apply(state.dashboard_cursor, len);
        }
        (Focus::Main, View::TestInfo) => state.class_panel.move_cursor(movement),
        (Focus::Main, View::TestResults) => {
            let len = state.filtered_executions().len();
            state.results.cursor = movement.apply(state.results.cursor, len);
        }
        (Focus::Detail, _) => {
            let len = state.result_rows().len();
            state.results.node_cursor = movement.apply(state.results.node_cursor, len);
        }
    }
    UpdateResult::none()
}

/// Esc in an input mode: drop the edit
pub fn handle_cancel_input(state: &mut AppState) -> UpdateResult {
    match state.ui_mode {
        UiMode::Search => {
            state.catalog.search.clear();
            state.catalog.clamp_cursor();
        }
        UiMode::FilterInput(_) => state.input_buffer.clear(),
        UiMode::Normal => {}
    }
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

pub fn handle_exit_input_mode(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}
