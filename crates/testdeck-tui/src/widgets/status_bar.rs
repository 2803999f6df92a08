//! Bottom status line: key hints or the latest status message, plus activity

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use testdeck_app::state::{AppState, UiMode, View};

use super::truncate;
use crate::theme::styles;

const NORMAL_HINTS: &[(&str, &str)] = &[
    ("q", "quit"),
    ("1-3", "views"),
    ("/", "search"),
    ("r", "run"),
    ("R", "rerun"),
    ("F5", "refresh"),
    ("u", "reload"),
];

const RESULTS_HINTS: &[(&str, &str)] = &[
    ("s", "status"),
    ("i", "ip"),
    ("n", "class"),
    ("d", "date"),
    ("t", "today"),
    ("c", "clear"),
];

const INPUT_HINTS: &[(&str, &str)] = &[("Esc", "cancel"), ("Enter", "done")];

const ALERT_HINTS: &[(&str, &str)] = &[("Enter", "dismiss")];

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.state.alert.is_some() {
            return ALERT_HINTS.to_vec();
        }
        match self.state.ui_mode {
            UiMode::Search | UiMode::FilterInput(_) => INPUT_HINTS.to_vec(),
            UiMode::Normal => {
                let mut hints = NORMAL_HINTS.to_vec();
                if self.state.active_view == View::TestResults {
                    hints.extend_from_slice(RESULTS_HINTS);
                }
                hints
            }
        }
    }

    fn left(&self, width: usize) -> Line<'static> {
        if let Some(message) = &self.state.status_message {
            return Line::from(Span::styled(
                format!(" {}", truncate(message, width.saturating_sub(1))),
                styles::text_primary(),
            ));
        }

        let mut spans = vec![Span::raw(" ")];
        for (i, (key, action)) in self.hints().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", styles::text_muted()));
            }
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {action}"), styles::text_muted()));
        }
        Line::from(spans)
    }

    fn right(&self) -> Line<'static> {
        let mut spans = Vec::new();
        if self.state.refresh_in_flight {
            let spinner = styles::spinner_frame(self.state.tick_count);
            spans.push(Span::styled(
                format!("{spinner} refreshing "),
                styles::status_yellow(),
            ));
        }
        if self.state.run_in_flight {
            spans.push(Span::styled("Running... ", styles::status_yellow()));
        }
        if self.state.poller.is_polling() {
            spans.push(Span::styled("● live ", styles::status_green()));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let right = self.right();
        let right_width = right.width() as u16;
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

        Paragraph::new(self.left(left_area.width as usize)).render(left_area, buf);
        Paragraph::new(right).render(right_area, buf);
    }
}
