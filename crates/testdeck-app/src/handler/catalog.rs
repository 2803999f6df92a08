//! Sidebar catalog, class detail and method source handlers

use testdeck_client::RefreshResponse;
use testdeck_core::{CatalogNode, ClassDetail};
use tracing::{debug, info, trace, warn};

use crate::state::{AppState, Focus, MethodCode, UiMode, View, METHOD_CODE_FALLBACK};

use super::{navigation, UpdateAction, UpdateResult};

pub fn handle_load_catalog(state: &mut AppState) -> UpdateResult {
    let generation = if state.catalog.tree.is_some() {
        state.catalog.panel.begin_refresh()
    } else {
        state.catalog.panel.begin_load()
    };
    UpdateResult::action(UpdateAction::FetchCatalog { generation })
}

pub fn handle_catalog_loaded(
    state: &mut AppState,
    generation: u64,
    result: Result<Vec<CatalogNode>, String>,
) -> UpdateResult {
    if !state.catalog.panel.is_current(generation) {
        debug!("Dropping stale catalog response (generation {})", generation);
        return UpdateResult::none();
    }

    match result {
        Ok(nodes) => {
            state.catalog.set_tree(nodes);
            state.catalog.panel.ready();
            info!("Loaded test catalog: {} classes", state.catalog.class_count());
        }
        Err(e) => {
            warn!("Failed to load test catalog: {}", e);
            state.catalog.panel.fail("Failed to load test catalog");
        }
    }
    UpdateResult::none()
}

pub fn handle_toggle_package(state: &mut AppState, path: &str) -> UpdateResult {
    state.catalog.toggle_expanded(path);
    UpdateResult::none()
}

pub fn handle_toggle_checked(state: &mut AppState, class_name: &str) -> UpdateResult {
    let checked = state.catalog.toggle_checked(class_name);
    trace!("{} {}", if checked { "Checked" } else { "Unchecked" }, class_name);
    UpdateResult::none()
}

pub fn handle_enter_search(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::Search;
    state.focus = Focus::Sidebar;
    UpdateResult::none()
}

pub fn handle_set_search(state: &mut AppState, text: String) -> UpdateResult {
    state.catalog.search = text;
    state.catalog.cursor = 0;
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Class detail
// ─────────────────────────────────────────────────────────────────────────────

/// Re-fetch the opened class, keeping the current detail visible meanwhile.
pub(crate) fn refresh_class_detail(state: &mut AppState) -> Option<UpdateAction> {
    let class_name = state.class_panel.opened.clone()?;
    let generation = state.class_panel.panel.begin_refresh();
    Some(UpdateAction::FetchClassDetail {
        generation,
        class_name,
    })
}

/// Open a class in Test Info, or close it when it is already open.
pub fn handle_open_class(state: &mut AppState, class_name: String) -> UpdateResult {
    if state.class_panel.is_open(&class_name) {
        debug!("Closing class {}", class_name);
        state.class_panel.close();
        return UpdateResult::none();
    }

    debug!("Opening class {}", class_name);
    state.class_panel.open(class_name);
    // Entering Test Info loads the opened class
    navigation::handle_switch_view(state, View::TestInfo)
}

pub fn handle_class_detail_loaded(
    state: &mut AppState,
    generation: u64,
    class_name: &str,
    result: Result<ClassDetail, String>,
) -> UpdateResult {
    let panel = &mut state.class_panel;
    if !panel.panel.is_current(generation) || !panel.is_open(class_name) {
        debug!("Dropping stale class detail for {}", class_name);
        return UpdateResult::none();
    }

    match result {
        Ok(detail) => {
            panel.detail = Some(detail);
            panel.panel.ready();
            let len = panel.method_rows().len();
            panel.cursor = panel.cursor.min(len.saturating_sub(1));
        }
        Err(e) => {
            warn!("Failed to load class detail for {}: {}", class_name, e);
            panel.detail = None;
            panel.panel.fail("Failed to load class details");
        }
    }
    UpdateResult::none()
}

/// Show or hide a method's source. The source is fetched at most once.
pub fn handle_toggle_method_code(state: &mut AppState, unique_id: String) -> UpdateResult {
    let panel = &mut state.class_panel;
    if panel.shown_code.remove(&unique_id) {
        return UpdateResult::none();
    }
    panel.shown_code.insert(unique_id.clone());

    if panel.code.contains_key(&unique_id) {
        return UpdateResult::none();
    }
    panel.code.insert(unique_id.clone(), MethodCode::Loading);
    UpdateResult::action(UpdateAction::FetchMethodCode { unique_id })
}

/// Completions only fill a slot still waiting for them; a catalog refresh
/// in between empties the cache and the late source is dropped.
pub fn handle_method_code_loaded(
    state: &mut AppState,
    unique_id: String,
    result: Result<String, String>,
) -> UpdateResult {
    if state.class_panel.code.get(&unique_id) != Some(&MethodCode::Loading) {
        debug!("Dropping stale method code for {}", unique_id);
        return UpdateResult::none();
    }
    let code = match result {
        Ok(code) => code,
        Err(e) => {
            warn!("Failed to load method code for {}: {}", unique_id, e);
            METHOD_CODE_FALLBACK.to_string()
        }
    };
    state.class_panel.code.insert(unique_id, MethodCode::Loaded(code));
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog refresh
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_refresh_catalog(state: &mut AppState) -> UpdateResult {
    if state.refresh_in_flight {
        debug!("Catalog refresh already in progress");
        return UpdateResult::none();
    }
    state.refresh_in_flight = true;
    state.status_message = Some("Refreshing test catalog...".to_string());
    UpdateResult::action(UpdateAction::RefreshCatalog)
}

/// A successful refresh drops every cache and selection, then reloads the
/// tree and whatever the active view shows.
pub fn handle_catalog_refreshed(
    state: &mut AppState,
    result: Result<RefreshResponse, String>,
) -> UpdateResult {
    state.refresh_in_flight = false;
    state.status_message = None;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            state.show_alert(format!("Failed to refresh test catalog: {e}"));
            return UpdateResult::none();
        }
    };
    if !response.is_success() {
        let reason = response.message.unwrap_or(response.status);
        state.show_alert(format!("Catalog refresh failed: {reason}"));
        return UpdateResult::none();
    }

    info!("Test catalog refreshed on server");
    state.executions.invalidate();
    state.executions.clear_detail();
    state.dashboard.invalidate();
    state.dashboard_panel.reset();
    state.catalog.clear_checked();
    state.class_panel.close();
    state.class_panel.code.clear();
    state.results.selected = None;
    state.results.list.reset();
    state.results.detail.reset();
    state.results.cursor = 0;
    state.results.node_cursor = 0;
    state.dashboard_cursor = 0;
    state.status_message = Some(
        response
            .message
            .unwrap_or_else(|| "Test catalog refreshed".to_string()),
    );

    let mut actions = Vec::new();
    match response.tree {
        Some(tree) => {
            state.catalog.panel.reset();
            state.catalog.set_tree(tree.into_nodes());
            state.catalog.panel.ready();
        }
        None => actions.push(UpdateAction::FetchCatalog {
            generation: state.catalog.panel.begin_load(),
        }),
    }

    let view = state.active_view;
    actions.extend(navigation::switch_view(state, view));
    UpdateResult::actions(actions)
}
