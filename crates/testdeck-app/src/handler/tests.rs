//! Tests for handler module

use std::time::Duration;

use super::*;
use crate::input_key::InputKey;
use crate::message::{FetchOrigin, Message};
use crate::poller::PollerState;
use crate::state::{AppState, FilterField, Focus, MethodCode, PanelStatus, UiMode, View};
use testdeck_client::test_utils::{test_dashboard, test_execution};
use testdeck_client::{RefreshResponse, RunResponse};
use testdeck_core::{
    CatalogNode, ClassDetail, ExecutionResults, ExecutionStatus, ResultNode, ResultStatus,
    StatusFilter,
};

fn catalog() -> Vec<CatalogNode> {
    vec![CatalogNode::package(
        "com",
        vec![CatalogNode::package(
            "acme",
            vec![
                CatalogNode::class("com.acme.FooTest"),
                CatalogNode::class("com.acme.BarTest"),
            ],
        )],
    )]
}

fn class_detail(full_name: &str) -> ClassDetail {
    ClassDetail {
        class_name: full_name.rsplit('.').next().unwrap_or(full_name).to_string(),
        full_class_name: full_name.to_string(),
        methods: Vec::new(),
    }
}

/// State with a loaded catalog, like after startup
fn loaded_state() -> AppState {
    let mut state = AppState::new();
    let result = update(&mut state, Message::LoadCatalog);
    let UpdateAction::FetchCatalog { generation } = result.actions[0] else {
        panic!("expected FetchCatalog, got {:?}", result.actions);
    };
    update(
        &mut state,
        Message::CatalogLoaded {
            generation,
            result: Ok(catalog()),
        },
    );
    state
}

fn poll_generation(result: &UpdateResult) -> Option<u64> {
    result.actions.iter().find_map(|a| match a {
        UpdateAction::ScheduleDashboardPoll { generation, .. } => Some(*generation),
        _ => None,
    })
}

fn dashboard_generation(result: &UpdateResult) -> Option<u64> {
    result.actions.iter().find_map(|a| match a {
        UpdateAction::FetchDashboard { generation, .. } => Some(*generation),
        _ => None,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Basics and keys
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_quit_message_sets_quit_flag() {
    let mut state = AppState::new();
    assert!(!state.should_quit());
    update(&mut state, Message::Quit);
    assert!(state.should_quit());
}

#[test]
fn test_q_and_ctrl_c_quit() {
    let state = AppState::new();
    assert!(matches!(handle_key(&state, InputKey::Char('q')), Some(Message::Quit)));
    assert!(matches!(
        handle_key(&state, InputKey::CharCtrl('c')),
        Some(Message::Quit)
    ));
}

#[test]
fn test_digit_keys_switch_view() {
    let state = AppState::new();
    assert!(matches!(
        handle_key(&state, InputKey::Char('3')),
        Some(Message::SwitchView(View::TestResults))
    ));
    assert!(handle_key(&state, InputKey::Char('4')).is_none());
}

#[test]
fn test_alert_swallows_keys_until_dismissed() {
    let mut state = AppState::new();
    state.show_alert("boom");
    assert!(handle_key(&state, InputKey::Char('r')).is_none());
    assert!(matches!(
        handle_key(&state, InputKey::Esc),
        Some(Message::DismissAlert)
    ));

    update(&mut state, Message::Key(InputKey::Enter));
    assert!(state.alert.is_none());
}

#[test]
fn test_search_mode_edits_keyword() {
    let mut state = loaded_state();
    update(&mut state, Message::Key(InputKey::Char('/')));
    assert_eq!(state.ui_mode, UiMode::Search);

    for c in "bar".chars() {
        update(&mut state, Message::Key(InputKey::Char(c)));
    }
    assert_eq!(state.catalog.search, "bar");
    let names: Vec<String> = state
        .catalog
        .visible_rows()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["com", "acme", "BarTest"]);

    update(&mut state, Message::Key(InputKey::Esc));
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(state.catalog.search.is_empty());
}

#[test]
fn test_enter_on_package_toggles_and_on_class_opens() {
    let mut state = loaded_state();
    // cursor on "com"
    let msg = handle_key(&state, InputKey::Enter);
    assert!(matches!(msg, Some(Message::TogglePackage(ref p)) if p == "com"));

    state.catalog.cursor = 2;
    let msg = handle_key(&state, InputKey::Enter);
    assert!(matches!(msg, Some(Message::OpenClass(ref c)) if c == "com.acme.FooTest"));

    let msg = handle_key(&state, InputKey::Char(' '));
    assert!(matches!(msg, Some(Message::ToggleClassChecked(ref c)) if c == "com.acme.FooTest"));
}

// ─────────────────────────────────────────────────────────────────────────────
// View controller
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_switch_to_results_fetches_unloaded_executions() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::SwitchView(View::TestResults));

    assert_eq!(state.active_view, View::TestResults);
    assert!(matches!(
        result.actions.as_slice(),
        [UpdateAction::FetchExecutions { limit: 20, .. }]
    ));
    assert!(state.results.list.is_loading());
}

#[test]
fn test_switch_to_results_uses_loaded_cache() {
    let mut state = AppState::new();
    state
        .executions
        .replace_all(vec![test_execution("e1", ExecutionStatus::Completed, 0)]);

    let result = update(&mut state, Message::SwitchView(View::TestResults));
    assert!(result.actions.is_empty());
}

#[test]
fn test_switch_to_dashboard_fetches_unloaded_dashboard() {
    let mut state = AppState::new();
    state.active_view = View::TestInfo;
    let result = update(&mut state, Message::SwitchView(View::Dashboard));
    assert!(matches!(
        result.actions.as_slice(),
        [UpdateAction::FetchDashboard {
            origin: FetchOrigin::View,
            ..
        }]
    ));
}

#[test]
fn test_switching_views_never_clears_caches() {
    let mut state = AppState::new();
    state
        .executions
        .replace_all(vec![test_execution("e1", ExecutionStatus::Completed, 0)]);
    state.dashboard.populate(test_dashboard(&[]));

    for view in [View::TestInfo, View::TestResults, View::Dashboard, View::TestInfo] {
        update(&mut state, Message::SwitchView(view));
    }
    assert!(state.executions.is_loaded());
    assert!(state.dashboard.is_loaded());
}

#[test]
fn test_opened_class_refreshes_on_test_info_and_dashboard() {
    let mut state = loaded_state();
    state.dashboard.populate(test_dashboard(&[]));
    update(&mut state, Message::OpenClass("com.acme.FooTest".into()));

    for view in [View::Dashboard, View::TestInfo] {
        let result = update(&mut state, Message::SwitchView(view));
        assert!(
            result.actions.iter().any(|a| matches!(
                a,
                UpdateAction::FetchClassDetail { class_name, .. } if class_name == "com.acme.FooTest"
            )),
            "no class refresh on {view:?}"
        );
    }

    state
        .executions
        .replace_all(vec![test_execution("e1", ExecutionStatus::Completed, 0)]);
    let result = update(&mut state, Message::SwitchView(View::TestResults));
    assert!(result.actions.is_empty());
}

#[test]
fn test_focus_detail_only_in_results() {
    let mut state = AppState::new();
    state.active_view = View::TestInfo;
    update(&mut state, Message::SetFocus(Focus::Detail));
    assert_eq!(state.focus, Focus::Main);

    state.active_view = View::TestResults;
    update(&mut state, Message::SetFocus(Focus::Detail));
    update(&mut state, Message::SwitchView(View::Dashboard));
    assert_eq!(state.focus, Focus::Main);
}

// ─────────────────────────────────────────────────────────────────────────────
// Class selection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_open_class_switches_to_test_info_and_loads() {
    let mut state = loaded_state();
    let result = update(&mut state, Message::OpenClass("com.acme.FooTest".into()));

    assert_eq!(state.active_view, View::TestInfo);
    assert_eq!(state.class_panel.opened.as_deref(), Some("com.acme.FooTest"));
    assert_eq!(state.class_panel.panel.status, PanelStatus::Loading);
    assert_eq!(result.actions.len(), 1);
}

#[test]
fn test_open_same_class_twice_closes_it() {
    let mut state = loaded_state();
    let result = update(&mut state, Message::OpenClass("com.acme.FooTest".into()));
    let UpdateAction::FetchClassDetail { generation, .. } = result.actions[0].clone() else {
        panic!("expected FetchClassDetail");
    };
    update(
        &mut state,
        Message::ClassDetailLoaded {
            generation,
            class_name: "com.acme.FooTest".into(),
            result: Ok(class_detail("com.acme.FooTest")),
        },
    );
    assert!(state.class_panel.detail.is_some());

    let result = update(&mut state, Message::OpenClass("com.acme.FooTest".into()));
    assert!(result.actions.is_empty());
    assert!(state.class_panel.opened.is_none());
    assert!(state.class_panel.detail.is_none());
}

#[test]
fn test_stale_class_detail_is_dropped() {
    let mut state = loaded_state();
    let first = update(&mut state, Message::OpenClass("com.acme.FooTest".into()));
    let UpdateAction::FetchClassDetail { generation: old, .. } = first.actions[0].clone() else {
        panic!("expected FetchClassDetail");
    };
    update(&mut state, Message::OpenClass("com.acme.BarTest".into()));

    // Foo's response arrives after Bar was opened
    update(
        &mut state,
        Message::ClassDetailLoaded {
            generation: old,
            class_name: "com.acme.FooTest".into(),
            result: Ok(class_detail("com.acme.FooTest")),
        },
    );
    assert!(state.class_panel.detail.is_none());
    assert_eq!(state.class_panel.panel.status, PanelStatus::Loading);
}

#[test]
fn test_class_detail_failure_shows_placeholder() {
    let mut state = loaded_state();
    let result = update(&mut state, Message::OpenClass("com.acme.FooTest".into()));
    let UpdateAction::FetchClassDetail { generation, .. } = result.actions[0].clone() else {
        panic!("expected FetchClassDetail");
    };
    update(
        &mut state,
        Message::ClassDetailLoaded {
            generation,
            class_name: "com.acme.FooTest".into(),
            result: Err("connection refused".into()),
        },
    );
    assert_eq!(
        state.class_panel.panel.status,
        PanelStatus::Failed("Failed to load class details".into())
    );
    assert_eq!(state.active_view, View::TestInfo);
}

#[test]
fn test_method_code_fetched_once() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::ToggleMethodCode("m1".into()));
    assert_eq!(
        result.actions,
        vec![UpdateAction::FetchMethodCode {
            unique_id: "m1".into()
        }]
    );
    update(
        &mut state,
        Message::MethodCodeLoaded {
            unique_id: "m1".into(),
            result: Ok("void adds() {}".into()),
        },
    );

    // collapse, then expand again: served from cache
    update(&mut state, Message::ToggleMethodCode("m1".into()));
    assert!(!state.class_panel.shown_code.contains("m1"));
    let result = update(&mut state, Message::ToggleMethodCode("m1".into()));
    assert!(result.actions.is_empty());
    assert!(state.class_panel.shown_code.contains("m1"));
}

#[test]
fn test_method_code_failure_uses_fallback_text() {
    let mut state = AppState::new();
    update(&mut state, Message::ToggleMethodCode("m1".into()));
    update(
        &mut state,
        Message::MethodCodeLoaded {
            unique_id: "m1".into(),
            result: Err("404".into()),
        },
    );
    assert_eq!(
        state.class_panel.code.get("m1"),
        Some(&MethodCode::Loaded("// Failed to load method code".into()))
    );
}

#[test]
fn test_method_code_arriving_after_refresh_is_dropped() {
    let mut state = loaded_state();
    update(&mut state, Message::ToggleMethodCode("m1".into()));
    update(&mut state, Message::RefreshCatalog);
    update(
        &mut state,
        Message::CatalogRefreshed {
            result: Ok(RefreshResponse::success()),
        },
    );
    assert!(state.class_panel.code.is_empty());

    update(
        &mut state,
        Message::MethodCodeLoaded {
            unique_id: "m1".into(),
            result: Ok("void old() {}".into()),
        },
    );
    assert!(state.class_panel.code.get("m1").is_none());

    // a fresh expand fetches again
    let result = update(&mut state, Message::ToggleMethodCode("m1".into()));
    assert_eq!(
        result.actions,
        vec![UpdateAction::FetchMethodCode {
            unique_id: "m1".into()
        }]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Run submission
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_run_submission_scenario() {
    let mut state = loaded_state();
    update(&mut state, Message::ToggleClassChecked("com.acme.FooTest".into()));

    let result = update(&mut state, Message::RunSelected);
    assert_eq!(
        result.actions,
        vec![UpdateAction::SubmitRun {
            class_names: vec!["com.acme.FooTest".into()]
        }]
    );
    assert!(state.catalog.checked.is_empty());
    assert!(state.run_in_flight);
    assert_eq!(state.catalog.run_button_label(state.run_in_flight), "Running...");

    state.dashboard.populate(test_dashboard(&[]));
    let result = update(
        &mut state,
        Message::RunSubmitted {
            class_names: vec!["com.acme.FooTest".into()],
            result: Ok(RunResponse::accepted("e1")),
        },
    );

    assert!(!state.run_in_flight);
    let first = &state.executions.executions().unwrap()[0];
    assert_eq!(first.execution_id, "e1");
    assert_eq!(first.status, ExecutionStatus::Running);
    assert_eq!(first.class_names, "com.acme.FooTest");
    assert_eq!(first.total_tests, 0);

    assert_eq!(state.active_view, View::TestResults);
    assert_eq!(state.results.selected.as_deref(), Some("e1"));
    assert!(!state.dashboard.is_loaded());
    assert!(result.actions.iter().any(|a| matches!(
        a,
        UpdateAction::FetchExecutionResults { execution_id, .. } if execution_id == "e1"
    )));
    assert!(result
        .actions
        .iter()
        .any(|a| matches!(a, UpdateAction::FetchExecutions { .. })));
}

#[test]
fn test_run_with_nothing_checked_makes_no_request() {
    let mut state = loaded_state();
    let result = update(&mut state, Message::RunSelected);
    assert!(result.actions.is_empty());
    assert!(!state.run_in_flight);
    assert!(state.alert.is_none());
}

#[test]
fn test_run_while_pending_keeps_new_selection() {
    let mut state = loaded_state();
    update(&mut state, Message::ToggleClassChecked("com.acme.FooTest".into()));
    let result = update(&mut state, Message::RunSelected);
    assert_eq!(result.actions.len(), 1);

    update(&mut state, Message::ToggleClassChecked("com.acme.BarTest".into()));
    let result = update(&mut state, Message::RunSelected);

    assert!(result.actions.is_empty());
    assert_eq!(state.catalog.checked_classes(), vec!["com.acme.BarTest".to_string()]);
    assert!(state.alert.is_some());
}

#[test]
fn test_accepted_run_puts_dashboard_back_to_loading() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::LoadDashboard);
    let generation = dashboard_generation(&result).unwrap();
    update(
        &mut state,
        Message::DashboardLoaded {
            generation,
            origin: FetchOrigin::View,
            result: Ok(test_dashboard(&[])),
        },
    );
    assert_eq!(state.dashboard_panel.status, PanelStatus::Ready);

    state.run_in_flight = true;
    update(
        &mut state,
        Message::RunSubmitted {
            class_names: vec!["com.acme.FooTest".into()],
            result: Ok(RunResponse::accepted("e1")),
        },
    );
    assert_eq!(state.dashboard_panel.status, PanelStatus::Idle);

    // the next visit shows the spinner, not an empty dashboard
    let result = update(&mut state, Message::SwitchView(View::Dashboard));
    assert!(dashboard_generation(&result).is_some());
    assert_eq!(state.dashboard_panel.status, PanelStatus::Loading);
}

#[test]
fn test_rejected_run_alerts_and_leaves_cache() {
    let mut state = AppState::new();
    state
        .executions
        .replace_all(vec![test_execution("old", ExecutionStatus::Completed, 0)]);
    state.run_in_flight = true;

    update(
        &mut state,
        Message::RunSubmitted {
            class_names: vec!["com.acme.FooTest".into()],
            result: Ok(RunResponse::rejected("no such class")),
        },
    );
    assert_eq!(
        state.alert.as_deref(),
        Some("Test execution failed: no such class")
    );
    assert_eq!(state.executions.executions().map(|l| l.len()), Some(1));
    assert!(!state.run_in_flight);
}

#[test]
fn test_transport_failure_on_run_alerts() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::RunSubmitted {
            class_names: vec!["com.acme.FooTest".into()],
            result: Err("connection refused".into()),
        },
    );
    assert_eq!(
        state.alert.as_deref(),
        Some("Failed to run tests: connection refused")
    );
    assert!(!state.executions.is_loaded());
}

#[test]
fn test_rerun_unknown_execution_alerts_without_request() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::RerunExecution("missing".into()));
    assert!(result.actions.is_empty());
    assert!(state.alert.is_some());
    assert!(!state.run_in_flight);
}

#[test]
fn test_rerun_without_classes_alerts() {
    let mut state = AppState::new();
    let mut exec = test_execution("e1", ExecutionStatus::Completed, 0);
    exec.class_names = " , ".into();
    state.executions.replace_all(vec![exec]);

    let result = update(&mut state, Message::RerunExecution("e1".into()));
    assert!(result.actions.is_empty());
    assert!(state.alert.is_some());
}

#[test]
fn test_rerun_submits_recorded_classes_and_keeps_checkboxes() {
    let mut state = loaded_state();
    state.catalog.toggle_checked("com.acme.BarTest");
    let mut exec = test_execution("e1", ExecutionStatus::Completed, 1);
    exec.class_names = "com.acme.FooTest, com.acme.BarTest".into();
    state.executions.replace_all(vec![exec]);

    let result = update(&mut state, Message::RerunExecution("e1".into()));
    assert_eq!(
        result.actions,
        vec![UpdateAction::SubmitRun {
            class_names: vec!["com.acme.FooTest".into(), "com.acme.BarTest".into()]
        }]
    );
    assert_eq!(state.catalog.checked.len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Execution list and results
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_stale_execution_list_dropped() {
    let mut state = AppState::new();
    let first = results::fetch_executions(&mut state);
    let UpdateAction::FetchExecutions { generation, .. } = first else {
        panic!("expected FetchExecutions");
    };
    results::fetch_executions(&mut state);

    update(
        &mut state,
        Message::ExecutionsLoaded {
            generation,
            result: Ok(vec![test_execution("e1", ExecutionStatus::Completed, 0)]),
        },
    );
    assert!(!state.executions.is_loaded());
}

#[test]
fn test_results_for_deselected_execution_dropped() {
    let mut state = AppState::new();
    let first = update(&mut state, Message::SelectExecution("e1".into()));
    let UpdateAction::FetchExecutionResults { generation, .. } = first.actions[0].clone() else {
        panic!("expected FetchExecutionResults");
    };
    update(&mut state, Message::SelectExecution("e2".into()));

    update(
        &mut state,
        Message::ExecutionResultsLoaded {
            generation,
            execution_id: "e1".into(),
            result: Ok(ExecutionResults::default()),
        },
    );
    assert!(state.executions.detail_for("e1").is_none());
}

#[test]
fn test_results_loaded_for_selected_execution() {
    let mut state = AppState::new();
    let first = update(&mut state, Message::SelectExecution("e1".into()));
    let UpdateAction::FetchExecutionResults { generation, .. } = first.actions[0].clone() else {
        panic!("expected FetchExecutionResults");
    };
    update(
        &mut state,
        Message::ExecutionResultsLoaded {
            generation,
            execution_id: "e1".into(),
            result: Ok(ExecutionResults::new(vec![ResultNode::leaf(
                "t",
                "t()",
                ResultStatus::Success,
            )])),
        },
    );
    assert_eq!(state.results.detail.status, PanelStatus::Ready);
    assert_eq!(state.result_rows().len(), 1);
}

#[test]
fn test_results_failure_shows_placeholder() {
    let mut state = AppState::new();
    let first = update(&mut state, Message::SelectExecution("e1".into()));
    let UpdateAction::FetchExecutionResults { generation, .. } = first.actions[0].clone() else {
        panic!("expected FetchExecutionResults");
    };
    update(
        &mut state,
        Message::ExecutionResultsLoaded {
            generation,
            execution_id: "e1".into(),
            result: Err("timeout".into()),
        },
    );
    assert_eq!(
        state.results.detail.status,
        PanelStatus::Failed("Failed to load test results".into())
    );
}

#[test]
fn test_status_filter_failed_scenario() {
    let mut state = AppState::new();
    state.executions.replace_all(vec![
        test_execution("a", ExecutionStatus::Running, 0),
        test_execution("b", ExecutionStatus::Completed, 0),
        test_execution("c", ExecutionStatus::Completed, 2),
    ]);

    for _ in 0..3 {
        update(&mut state, Message::CycleStatusFilter);
    }
    assert_eq!(state.filter.status, StatusFilter::Failed);

    let ids: Vec<&str> = state
        .filtered_executions()
        .iter()
        .map(|e| e.execution_id.as_str())
        .collect();
    assert_eq!(ids, vec!["c"]);
}

#[test]
fn test_filter_text_input_commit_and_cancel() {
    let mut state = AppState::new();
    state.active_view = View::TestResults;
    update(&mut state, Message::Key(InputKey::Char('n')));
    assert_eq!(state.ui_mode, UiMode::FilterInput(FilterField::ClassName));

    for c in "Foo".chars() {
        update(&mut state, Message::Key(InputKey::Char(c)));
    }
    update(&mut state, Message::Key(InputKey::Enter));
    assert_eq!(state.filter.class_name, "Foo");
    assert_eq!(state.ui_mode, UiMode::Normal);

    update(&mut state, Message::Key(InputKey::Char('i')));
    update(&mut state, Message::Key(InputKey::Char('1')));
    update(&mut state, Message::Key(InputKey::Esc));
    assert!(state.filter.requester_ip.is_empty());
}

#[test]
fn test_invalid_date_filter_alerts() {
    let mut state = AppState::new();
    update(&mut state, Message::EnterFilterInput(FilterField::Date));
    update(&mut state, Message::SetInputBuffer("yesterday".into()));
    update(&mut state, Message::CommitFilterInput);
    assert!(state.filter.date.is_none());
    assert!(state.alert.is_some());
}

#[test]
fn test_server_today_sets_date_filter() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::UseServerToday);
    assert_eq!(result.actions, vec![UpdateAction::FetchServerToday]);

    let today = chrono::NaiveDate::from_ymd_opt(2024, 5, 1);
    update(
        &mut state,
        Message::ServerTodayLoaded {
            result: today.ok_or_else(|| "bad date".to_string()),
        },
    );
    assert_eq!(state.filter.date, today);

    update(
        &mut state,
        Message::ServerTodayLoaded {
            result: Err("down".into()),
        },
    );
    assert_eq!(state.filter.date, Some(chrono::Local::now().date_naive()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard poller
// ─────────────────────────────────────────────────────────────────────────────

/// Dashboard view with polling started by a RUNNING execution
fn polling_state() -> (AppState, u64) {
    let mut state = AppState::new();
    let result = update(&mut state, Message::SwitchView(View::Dashboard));
    let generation = dashboard_generation(&result).unwrap();
    let result = update(
        &mut state,
        Message::DashboardLoaded {
            generation,
            origin: FetchOrigin::View,
            result: Ok(test_dashboard(&[ExecutionStatus::Running])),
        },
    );
    let poll = poll_generation(&result).unwrap();
    (state, poll)
}

#[test]
fn test_running_execution_starts_polling() {
    let (state, _) = polling_state();
    assert_eq!(state.poller.state(), PollerState::Polling);
}

#[test]
fn test_poll_interval_comes_from_settings() {
    let mut state = AppState::new();
    state.settings.polling.dashboard_interval_ms = 1200;
    let generation = dashboard::fetch_dashboard(&mut state, FetchOrigin::View);
    let UpdateAction::FetchDashboard { generation, .. } = generation else {
        panic!("expected FetchDashboard");
    };
    let result = update(
        &mut state,
        Message::DashboardLoaded {
            generation,
            origin: FetchOrigin::View,
            result: Ok(test_dashboard(&[ExecutionStatus::Running])),
        },
    );
    assert!(matches!(
        result.actions.as_slice(),
        [UpdateAction::ScheduleDashboardPoll { interval, .. }] if *interval == Duration::from_millis(1200)
    ));
}

#[test]
fn test_no_running_executions_does_not_poll() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::SwitchView(View::Dashboard));
    let generation = dashboard_generation(&result).unwrap();
    let result = update(
        &mut state,
        Message::DashboardLoaded {
            generation,
            origin: FetchOrigin::View,
            result: Ok(test_dashboard(&[ExecutionStatus::Completed])),
        },
    );
    assert!(result.actions.is_empty());
    assert_eq!(state.poller.state(), PollerState::Stopped);
}

#[test]
fn test_poll_tick_fetches_and_zero_running_stops() {
    let (mut state, poll) = polling_state();

    let result = update(&mut state, Message::DashboardPollTick { generation: poll });
    assert!(matches!(
        result.actions.as_slice(),
        [UpdateAction::FetchDashboard {
            origin: FetchOrigin::Poll,
            ..
        }]
    ));
    let generation = dashboard_generation(&result).unwrap();

    let result = update(
        &mut state,
        Message::DashboardLoaded {
            generation,
            origin: FetchOrigin::Poll,
            result: Ok(test_dashboard(&[ExecutionStatus::Completed])),
        },
    );
    assert_eq!(result.actions, vec![UpdateAction::StopDashboardPolling]);
    assert_eq!(state.poller.state(), PollerState::Stopped);

    // a late tick from the old timer does nothing
    let result = update(&mut state, Message::DashboardPollTick { generation: poll });
    assert!(result.actions.is_empty());
}

#[test]
fn test_tick_outside_dashboard_stops_polling() {
    let (mut state, poll) = polling_state();
    update(&mut state, Message::SwitchView(View::TestInfo));
    assert!(state.poller.is_polling());

    let result = update(&mut state, Message::DashboardPollTick { generation: poll });
    assert_eq!(result.actions, vec![UpdateAction::StopDashboardPolling]);
    assert_eq!(state.poller.state(), PollerState::Stopped);
}

#[test]
fn test_superseded_tick_is_ignored() {
    let (mut state, old) = polling_state();
    // manual reload while polling restarts the timer
    let result = update(&mut state, Message::LoadDashboard);
    let generation = dashboard_generation(&result).unwrap();
    let result = update(
        &mut state,
        Message::DashboardLoaded {
            generation,
            origin: FetchOrigin::View,
            result: Ok(test_dashboard(&[ExecutionStatus::Running])),
        },
    );
    let new = poll_generation(&result).unwrap();
    assert_ne!(old, new);

    let result = update(&mut state, Message::DashboardPollTick { generation: old });
    assert!(result.actions.is_empty());
    let result = update(&mut state, Message::DashboardPollTick { generation: new });
    assert_eq!(result.actions.len(), 1);
}

#[test]
fn test_failed_poll_keeps_polling() {
    let (mut state, poll) = polling_state();
    let result = update(&mut state, Message::DashboardPollTick { generation: poll });
    let generation = dashboard_generation(&result).unwrap();

    let result = update(
        &mut state,
        Message::DashboardLoaded {
            generation,
            origin: FetchOrigin::Poll,
            result: Err("timeout".into()),
        },
    );
    assert!(poll_generation(&result).is_some());
    assert!(state.poller.is_polling());
    assert_eq!(state.dashboard_panel.status, PanelStatus::Ready);
}

#[test]
fn test_dashboard_failure_shows_placeholder() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::SwitchView(View::Dashboard));
    let generation = dashboard_generation(&result).unwrap();
    update(
        &mut state,
        Message::DashboardLoaded {
            generation,
            origin: FetchOrigin::View,
            result: Err("connection refused".into()),
        },
    );
    assert_eq!(
        state.dashboard_panel.status,
        PanelStatus::Failed("Failed to load dashboard".into())
    );
    assert_eq!(state.active_view, View::Dashboard);
}

#[test]
fn test_returning_to_dashboard_with_stale_running_rows_refetches() {
    let (mut state, poll) = polling_state();
    update(&mut state, Message::SwitchView(View::TestInfo));
    update(&mut state, Message::DashboardPollTick { generation: poll });
    assert!(!state.poller.is_polling());

    let result = update(&mut state, Message::SwitchView(View::Dashboard));
    assert!(dashboard_generation(&result).is_some());
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog refresh
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_catalog_refresh_clears_caches_and_selections() {
    let mut state = loaded_state();
    state.catalog.toggle_checked("com.acme.FooTest");
    state
        .executions
        .replace_all(vec![test_execution("e1", ExecutionStatus::Completed, 0)]);
    state.dashboard.populate(test_dashboard(&[]));
    update(&mut state, Message::OpenClass("com.acme.FooTest".into()));
    state.active_view = View::TestResults;

    let result = update(&mut state, Message::RefreshCatalog);
    assert_eq!(result.actions, vec![UpdateAction::RefreshCatalog]);
    // second request while in flight is ignored
    assert!(update(&mut state, Message::RefreshCatalog).actions.is_empty());

    let result = update(
        &mut state,
        Message::CatalogRefreshed {
            result: Ok(RefreshResponse::success()),
        },
    );
    assert!(!state.refresh_in_flight);
    assert!(state.catalog.checked.is_empty());
    assert!(state.class_panel.opened.is_none());
    assert!(!state.executions.is_loaded());
    assert!(!state.dashboard.is_loaded());
    assert_eq!(state.dashboard_panel.status, PanelStatus::Idle);
    assert!(result
        .actions
        .iter()
        .any(|a| matches!(a, UpdateAction::FetchCatalog { .. })));
    assert!(result
        .actions
        .iter()
        .any(|a| matches!(a, UpdateAction::FetchExecutions { .. })));
}

#[test]
fn test_catalog_refresh_failure_status_alerts() {
    let mut state = loaded_state();
    state.catalog.toggle_checked("com.acme.FooTest");
    update(&mut state, Message::RefreshCatalog);

    let response = RefreshResponse {
        status: "ERROR".into(),
        message: Some("scan failed".into()),
        tree: None,
    };
    update(
        &mut state,
        Message::CatalogRefreshed {
            result: Ok(response),
        },
    );
    assert_eq!(state.alert.as_deref(), Some("Catalog refresh failed: scan failed"));
    assert_eq!(state.catalog.checked.len(), 1);
}

#[test]
fn test_catalog_load_failure_shows_placeholder() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::LoadCatalog);
    let UpdateAction::FetchCatalog { generation } = result.actions[0] else {
        panic!("expected FetchCatalog");
    };
    update(
        &mut state,
        Message::CatalogLoaded {
            generation,
            result: Err("refused".into()),
        },
    );
    assert_eq!(
        state.catalog.panel.status,
        PanelStatus::Failed("Failed to load test catalog".into())
    );
}
