//! Full-frame rendering tests

use super::view;
use crate::test_utils::{state_with_catalog, test_class_detail, test_results, TestTerminal};
use testdeck_app::state::{AppState, Focus, View};
use testdeck_client::test_utils::{test_dashboard, test_execution};
use testdeck_core::ExecutionStatus;

fn draw(state: &AppState) -> TestTerminal {
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, state));
    term
}

#[test]
fn test_dashboard_frame() {
    let mut state = state_with_catalog();
    state.dashboard_panel.begin_load();
    state
        .dashboard
        .populate(test_dashboard(&[ExecutionStatus::Running, ExecutionStatus::Completed]));
    state.dashboard_panel.ready();
    state.poller.start();

    let term = draw(&state);

    assert!(term.line_contains(1, "testdeck ●"));
    assert!(term.line_contains(1, "1 Dashboard"));
    assert!(term.buffer_contains("Test Catalog (3)"));
    assert!(term.buffer_contains("Recent Executions (1 running)"));
    assert!(term.buffer_contains("● live"));
    assert_eq!(term.find_line("q quit"), Some(31));
}

#[test]
fn test_server_url_in_header() {
    let mut state = AppState::new();
    state.settings.server.base_url = "http://ci.internal:9000/api".to_string();
    let term = draw(&state);
    assert!(term.line_contains(1, "http://ci.internal:9000/api"));
}

#[test]
fn test_test_info_frame() {
    let mut state = state_with_catalog();
    state.active_view = View::TestInfo;
    state.focus = Focus::Main;
    state.class_panel.open("com.acme.FooTest");
    state.class_panel.panel.begin_load();
    state.class_panel.detail = Some(test_class_detail());
    state.class_panel.panel.ready();

    let term = draw(&state);

    assert!(term.buffer_contains("com.acme.FooTest"));
    assert!(term.buffer_contains("2 test methods"));
    assert!(term.buffer_contains("+ shouldAdd()"));
}

#[test]
fn test_test_results_frame() {
    let mut state = state_with_catalog();
    state.active_view = View::TestResults;
    state.results.list.begin_load();
    state
        .executions
        .replace_all(vec![test_execution("e1", ExecutionStatus::Failed, 1)]);
    state.results.list.ready();
    state.results.selected = Some("e1".to_string());
    state.results.detail.begin_load();
    state.executions.store_detail("e1", test_results());
    state.results.detail.ready();

    let term = draw(&state);

    assert!(term.buffer_contains("s Status: *"));
    assert!(term.buffer_contains("Executions (1/1)"));
    assert!(term.buffer_contains("Execution e1"));
    assert!(term.buffer_contains("shouldReject()"));
    assert!(term.buffer_contains("n class"));
}

#[test]
fn test_alert_covers_frame() {
    let mut state = state_with_catalog();
    state.show_alert("Execution ghost not found");

    let term = draw(&state);

    assert!(term.buffer_contains("Alert"));
    assert!(term.buffer_contains("Execution ghost not found"));
    assert!(term.buffer_contains("Enter dismiss"));
}

#[test]
fn test_narrow_terminal_does_not_panic() {
    let state = state_with_catalog();
    let mut term = TestTerminal::with_size(40, 8);
    term.draw_with(|frame| view(frame, &state));
    assert!(term.buffer_contains("testdeck"));
}
