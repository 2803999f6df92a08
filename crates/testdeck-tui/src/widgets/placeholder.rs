//! Loading / failed / empty placeholder shown inside a panel

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use testdeck_app::state::{Panel, PanelStatus};

use crate::theme::styles;

/// Text rendered in place of a panel's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder<'a> {
    Loading { tick: u64 },
    Failed(&'a str),
    Empty(&'a str),
}

/// Decide whether a panel shows its data or a placeholder.
///
/// A failure always wins. While loading, data that is already on screen
/// stays visible and only an empty panel shows the spinner.
pub fn placeholder<'a>(
    panel: &'a Panel,
    has_data: bool,
    tick: u64,
    empty: &'a str,
) -> Option<Placeholder<'a>> {
    match &panel.status {
        PanelStatus::Failed(message) => Some(Placeholder::Failed(message)),
        _ if has_data => None,
        PanelStatus::Loading => Some(Placeholder::Loading { tick }),
        PanelStatus::Idle | PanelStatus::Ready => Some(Placeholder::Empty(empty)),
    }
}

impl Widget for Placeholder<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let line = match self {
            Placeholder::Loading { tick } => Line::from(vec![
                Span::styled(styles::spinner_frame(tick), styles::accent()),
                Span::styled(" Loading...", styles::text_secondary()),
            ]),
            Placeholder::Failed(message) => {
                Line::from(Span::styled(format!("✗ {message}"), styles::status_red()))
            }
            Placeholder::Empty(text) => Line::from(Span::styled(text, styles::text_muted())),
        };

        // Vertically centered
        let y = area.y + area.height.saturating_sub(1) / 2;
        let row = Rect::new(area.x, y, area.width, area.height - (y - area.y));
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(row, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_failure_wins_over_data() {
        let mut panel = Panel::default();
        panel.begin_load();
        panel.fail("Failed to load executions");
        assert_eq!(
            placeholder(&panel, true, 0, ""),
            Some(Placeholder::Failed("Failed to load executions"))
        );
    }

    #[test]
    fn test_refresh_keeps_data_visible() {
        let mut panel = Panel::default();
        panel.begin_load();
        panel.ready();
        panel.begin_refresh();
        assert_eq!(placeholder(&panel, true, 0, ""), None);
    }

    #[test]
    fn test_loading_without_data_spins() {
        let mut panel = Panel::default();
        panel.begin_load();
        assert_eq!(
            placeholder(&panel, false, 3, ""),
            Some(Placeholder::Loading { tick: 3 })
        );
    }

    #[test]
    fn test_idle_without_data_is_empty() {
        let panel = Panel::default();
        assert_eq!(
            placeholder(&panel, false, 0, "Nothing here"),
            Some(Placeholder::Empty("Nothing here"))
        );
    }

    #[test]
    fn test_failed_placeholder_renders_message() {
        let mut term = TestTerminal::with_size(50, 5);
        term.render_widget(Placeholder::Failed("Failed to load dashboard"), term.area());
        assert!(term.buffer_contains("Failed to load dashboard"));
    }

    #[test]
    fn test_loading_placeholder_renders_spinner_text() {
        let mut term = TestTerminal::with_size(30, 3);
        term.render_widget(Placeholder::Loading { tick: 0 }, term.area());
        assert!(term.buffer_contains("Loading..."));
    }
}
