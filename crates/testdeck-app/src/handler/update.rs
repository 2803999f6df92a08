//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::AppState;

use super::{catalog, dashboard, keys::handle_key, navigation, results, run, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and the actions to perform
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::SwitchView(view) => navigation::handle_switch_view(state, view),
        Message::SetFocus(focus) => navigation::handle_set_focus(state, focus),
        Message::MoveCursor(movement) => navigation::handle_move_cursor(state, movement),

        // ─────────────────────────────────────────────────────────
        // Catalog
        // ─────────────────────────────────────────────────────────
        Message::LoadCatalog => catalog::handle_load_catalog(state),
        Message::CatalogLoaded { generation, result } => {
            catalog::handle_catalog_loaded(state, generation, result)
        }
        Message::TogglePackage(path) => catalog::handle_toggle_package(state, &path),
        Message::ToggleClassChecked(class_name) => {
            catalog::handle_toggle_checked(state, &class_name)
        }
        Message::EnterSearchMode => catalog::handle_enter_search(state),
        Message::SetSearch(text) => catalog::handle_set_search(state, text),
        Message::RefreshCatalog => catalog::handle_refresh_catalog(state),
        Message::CatalogRefreshed { result } => catalog::handle_catalog_refreshed(state, result),

        Message::OpenClass(class_name) => catalog::handle_open_class(state, class_name),
        Message::ClassDetailLoaded {
            generation,
            class_name,
            result,
        } => catalog::handle_class_detail_loaded(state, generation, &class_name, result),
        Message::ToggleMethodCode(unique_id) => {
            catalog::handle_toggle_method_code(state, unique_id)
        }
        Message::MethodCodeLoaded { unique_id, result } => {
            catalog::handle_method_code_loaded(state, unique_id, result)
        }

        // ─────────────────────────────────────────────────────────
        // Runs
        // ─────────────────────────────────────────────────────────
        Message::RunSelected => run::handle_run_selected(state),
        Message::RerunExecution(execution_id) => run::handle_rerun(state, &execution_id),
        Message::RunSubmitted {
            class_names,
            result,
        } => run::handle_run_submitted(state, class_names, result),

        // ─────────────────────────────────────────────────────────
        // Test Results
        // ─────────────────────────────────────────────────────────
        Message::LoadExecutions => results::handle_load_executions(state),
        Message::ExecutionsLoaded { generation, result } => {
            results::handle_executions_loaded(state, generation, result)
        }
        Message::SelectExecution(execution_id) => {
            UpdateResult::actions(results::select_execution(state, execution_id))
        }
        Message::OpenExecution(execution_id) => results::handle_open_execution(state, execution_id),
        Message::ExecutionResultsLoaded {
            generation,
            execution_id,
            result,
        } => results::handle_execution_results_loaded(state, generation, &execution_id, result),

        Message::CycleStatusFilter => results::handle_cycle_status(state),
        Message::EnterFilterInput(field) => results::handle_enter_filter_input(state, field),
        Message::SetInputBuffer(text) => {
            state.input_buffer = text;
            UpdateResult::none()
        }
        Message::CommitFilterInput => results::handle_commit_filter_input(state),
        Message::ClearFilters => results::handle_clear_filters(state),
        Message::UseServerToday => results::handle_use_server_today(),
        Message::ServerTodayLoaded { result } => results::handle_server_today_loaded(state, result),

        Message::CancelInput => navigation::handle_cancel_input(state),
        Message::ExitInputMode => navigation::handle_exit_input_mode(state),

        // ─────────────────────────────────────────────────────────
        // Dashboard
        // ─────────────────────────────────────────────────────────
        Message::LoadDashboard => dashboard::handle_load_dashboard(state),
        Message::DashboardLoaded {
            generation,
            origin,
            result,
        } => dashboard::handle_dashboard_loaded(state, generation, origin, result),
        Message::DashboardPollTick { generation } => dashboard::handle_poll_tick(state, generation),

        // ─────────────────────────────────────────────────────────
        // Alerts
        // ─────────────────────────────────────────────────────────
        Message::ShowAlert(text) => {
            state.show_alert(text);
            UpdateResult::none()
        }
        Message::DismissAlert => {
            state.alert = None;
            UpdateResult::none()
        }
    }
}
