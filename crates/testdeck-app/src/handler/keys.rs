//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, CursorMove, FilterField, Focus, UiMode, View};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if state.alert.is_some() {
        return handle_key_alert(key);
    }
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::Search => handle_key_search(state, key),
        UiMode::FilterInput(_) => handle_key_filter_input(state, key),
    }
}

/// An open alert swallows everything but its dismissal
fn handle_key_alert(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc => Some(Message::DismissAlert),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_search(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CancelInput),
        // Keep the keyword, leave input mode
        InputKey::Enter => Some(Message::ExitInputMode),
        InputKey::Backspace => {
            let mut text = state.catalog.search.clone();
            text.pop();
            Some(Message::SetSearch(text))
        }
        InputKey::CharCtrl('u') => Some(Message::SetSearch(String::new())),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char(c) => Some(Message::SetSearch(format!("{}{c}", state.catalog.search))),
        InputKey::Up => Some(Message::MoveCursor(CursorMove::Up)),
        InputKey::Down => Some(Message::MoveCursor(CursorMove::Down)),
        _ => None,
    }
}

fn handle_key_filter_input(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CancelInput),
        InputKey::Enter => Some(Message::CommitFilterInput),
        InputKey::Backspace => {
            let mut text = state.input_buffer.clone();
            text.pop();
            Some(Message::SetInputBuffer(text))
        }
        InputKey::CharCtrl('u') => Some(Message::SetInputBuffer(String::new())),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char(c) => Some(Message::SetInputBuffer(format!("{}{c}", state.input_buffer))),
        _ => None,
    }
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        // View switching
        InputKey::Char('1'..='3') => key
            .digit_index()
            .and_then(View::from_index)
            .map(Message::SwitchView),
        InputKey::Tab => Some(Message::SwitchView(state.active_view.next())),
        InputKey::BackTab => Some(Message::SwitchView(state.active_view.prev())),

        // Focus
        InputKey::Left | InputKey::Char('h') => match state.focus {
            Focus::Detail => Some(Message::SetFocus(Focus::Main)),
            Focus::Main => Some(Message::SetFocus(Focus::Sidebar)),
            Focus::Sidebar => None,
        },
        InputKey::Right | InputKey::Char('l') => match state.focus {
            Focus::Sidebar => Some(Message::SetFocus(Focus::Main)),
            Focus::Main if state.active_view == View::TestResults => {
                Some(Message::SetFocus(Focus::Detail))
            }
            _ => None,
        },

        // Cursor
        InputKey::Up | InputKey::Char('k') => Some(Message::MoveCursor(CursorMove::Up)),
        InputKey::Down | InputKey::Char('j') => Some(Message::MoveCursor(CursorMove::Down)),
        InputKey::PageUp => Some(Message::MoveCursor(CursorMove::PageUp)),
        InputKey::PageDown => Some(Message::MoveCursor(CursorMove::PageDown)),
        InputKey::Home | InputKey::Char('g') => Some(Message::MoveCursor(CursorMove::Top)),
        InputKey::End | InputKey::Char('G') => Some(Message::MoveCursor(CursorMove::Bottom)),

        InputKey::Enter => activate(state),
        InputKey::Char(' ') => toggle(state),

        InputKey::Char('/') => Some(Message::EnterSearchMode),
        InputKey::Char('r') => Some(Message::RunSelected),
        InputKey::Char('R') => rerun_target(state).map(Message::RerunExecution),
        InputKey::F(5) | InputKey::CharCtrl('r') => Some(Message::RefreshCatalog),
        InputKey::Char('u') => Some(match state.active_view {
            View::Dashboard => Message::LoadDashboard,
            View::TestInfo => Message::LoadCatalog,
            View::TestResults => Message::LoadExecutions,
        }),

        _ if state.active_view == View::TestResults => handle_key_results(key),
        _ => None,
    }
}

/// Filter keys, only meaningful in the Test Results view
fn handle_key_results(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('s') => Some(Message::CycleStatusFilter),
        InputKey::Char('t') => Some(Message::UseServerToday),
        InputKey::Char('c') => Some(Message::ClearFilters),
        InputKey::Char('i') => Some(Message::EnterFilterInput(FilterField::RequesterIp)),
        InputKey::Char('n') => Some(Message::EnterFilterInput(FilterField::ClassName)),
        InputKey::Char('d') => Some(Message::EnterFilterInput(FilterField::Date)),
        _ => None,
    }
}

/// Enter on the focused row
fn activate(state: &AppState) -> Option<Message> {
    match state.focus {
        Focus::Sidebar => {
            let row = state.catalog.selected_row()?;
            match row.class_name {
                Some(class_name) => Some(Message::OpenClass(class_name)),
                None if row.has_children => Some(Message::TogglePackage(row.path)),
                None => None,
            }
        }
        Focus::Main => match state.active_view {
            View::Dashboard => state
                .dashboard_executions()
                .get(state.dashboard_cursor)
                .map(|e| Message::OpenExecution(e.execution_id.clone())),
            View::TestInfo => state
                .class_panel
                .selected_method()
                .and_then(|row| row.unique_id)
                .map(Message::ToggleMethodCode),
            View::TestResults => state
                .execution_under_cursor()
                .map(|e| Message::SelectExecution(e.execution_id.clone())),
        },
        Focus::Detail => None,
    }
}

/// Space: tick a class, or fold a package
fn toggle(state: &AppState) -> Option<Message> {
    if state.focus != Focus::Sidebar {
        return activate(state);
    }
    let row = state.catalog.selected_row()?;
    match row.class_name {
        Some(class_name) => Some(Message::ToggleClassChecked(class_name)),
        None if row.has_children => Some(Message::TogglePackage(row.path)),
        None => None,
    }
}

/// Execution the user is pointing at, for re-runs
fn rerun_target(state: &AppState) -> Option<String> {
    match (state.active_view, state.focus) {
        (View::TestResults, Focus::Detail) => state.results.selected.clone(),
        (View::TestResults, _) => state
            .execution_under_cursor()
            .map(|e| e.execution_id.clone()),
        (View::Dashboard, Focus::Main) => state
            .dashboard_executions()
            .get(state.dashboard_cursor)
            .map(|e| e.execution_id.clone()),
        _ => None,
    }
}
