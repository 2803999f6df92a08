//! Dashboard loads and the auto-refresh poller

use testdeck_core::DashboardData;
use tracing::{debug, info, warn};

use crate::message::FetchOrigin;
use crate::state::{AppState, View};

use super::{UpdateAction, UpdateResult};

pub(crate) fn fetch_dashboard(state: &mut AppState, origin: FetchOrigin) -> UpdateAction {
    UpdateAction::FetchDashboard {
        generation: state.dashboard_panel.begin_refresh(),
        origin,
    }
}

/// Entering the dashboard fetches when the cache is unloaded, or when it
/// shows running executions that nothing is polling for.
pub(crate) fn on_enter(state: &mut AppState) -> Option<UpdateAction> {
    let stale_running = state.dashboard.get().is_some_and(DashboardData::has_running)
        && !state.poller.is_polling();
    if !state.dashboard.is_loaded() || stale_running {
        Some(fetch_dashboard(state, FetchOrigin::View))
    } else {
        None
    }
}

pub fn handle_load_dashboard(state: &mut AppState) -> UpdateResult {
    UpdateResult::action(fetch_dashboard(state, FetchOrigin::View))
}

pub fn handle_dashboard_loaded(
    state: &mut AppState,
    generation: u64,
    origin: FetchOrigin,
    result: Result<DashboardData, String>,
) -> UpdateResult {
    if !state.dashboard_panel.is_current(generation) {
        debug!("Dropping stale dashboard (generation {})", generation);
        return UpdateResult::none();
    }

    match result {
        Ok(data) => {
            let running = data.running_count();
            state.dashboard.populate(data);
            state.dashboard_panel.ready();
            let len = state.dashboard_executions().len();
            state.dashboard_cursor = state.dashboard_cursor.min(len.saturating_sub(1));
            UpdateResult::actions(next_poll(state, running))
        }
        Err(e) if origin == FetchOrigin::Poll && state.poller.is_polling() => {
            warn!("Dashboard poll failed, retrying: {}", e);
            UpdateResult::action(schedule_poll(state))
        }
        Err(e) => {
            warn!("Failed to load dashboard: {}", e);
            state.dashboard_panel.fail("Failed to load dashboard");
            UpdateResult::none()
        }
    }
}

/// Poller transition after fresh dashboard data
fn next_poll(state: &mut AppState, running: usize) -> Vec<UpdateAction> {
    if running > 0 && state.active_view == View::Dashboard {
        if !state.poller.is_polling() {
            info!("{} execution(s) running, polling dashboard", running);
        }
        vec![schedule_poll(state)]
    } else if state.poller.stop() {
        info!("Dashboard polling stopped");
        vec![UpdateAction::StopDashboardPolling]
    } else {
        Vec::new()
    }
}

fn schedule_poll(state: &mut AppState) -> UpdateAction {
    UpdateAction::ScheduleDashboardPoll {
        generation: state.poller.start(),
        interval: state.settings.polling.dashboard_interval(),
    }
}

pub fn handle_poll_tick(state: &mut AppState, generation: u64) -> UpdateResult {
    if !state.poller.accepts_tick(generation) {
        debug!("Ignoring superseded poll tick {}", generation);
        return UpdateResult::none();
    }

    if state.active_view != View::Dashboard {
        state.poller.stop();
        info!("Dashboard hidden, polling stopped");
        return UpdateResult::action(UpdateAction::StopDashboardPolling);
    }

    UpdateResult::action(fetch_dashboard(state, FetchOrigin::Poll))
}
