//! Screen layout definitions for the TUI
//!
//! The screen is a bordered header holding the view tabs, a body split into
//! the catalog sidebar and the active view, and a one-line status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Sidebar width on wide terminals
const SIDEBAR_WIDTH: u16 = 40;
/// Below this width the sidebar shrinks to a share of the screen
const NARROW_WIDTH: u16 = 100;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and view tabs
    pub header: Rect,
    /// Catalog tree, search box and run button
    pub sidebar: Rect,
    /// Active view
    pub main: Rect,
    /// Key hints and transient messages
    pub status: Rect,
}

/// Split the terminal into the main screen areas
pub fn create(area: Rect) -> ScreenAreas {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let sidebar_constraint = if area.width < NARROW_WIDTH {
        Constraint::Percentage(35)
    } else {
        Constraint::Length(SIDEBAR_WIDTH)
    };
    let [sidebar, main] = Layout::horizontal([sidebar_constraint, Constraint::Min(20)]).areas(body);

    ScreenAreas {
        header,
        sidebar,
        main,
        status,
    }
}

/// Areas of the Test Results view
#[derive(Debug, Clone, Copy)]
pub struct ResultsAreas {
    pub filter_bar: Rect,
    pub list: Rect,
    pub detail: Rect,
}

/// Split the main area for Test Results: filter bar on top, execution list
/// on the left, selected execution on the right.
pub fn results(main: Rect) -> ResultsAreas {
    let [filter_bar, body] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(main);
    let [list, detail] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(body);
    ResultsAreas {
        filter_bar,
        list,
        detail,
    }
}
