//! Main header: title, server and the view tabs

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Widget},
};
use testdeck_app::View;

use super::truncate;
use crate::theme::styles;

/// Narrowest title column kept next to the tabs
const MIN_TITLE_WIDTH: u16 = 12;

pub struct MainHeader<'a> {
    active: View,
    server: &'a str,
    live: bool,
}

impl<'a> MainHeader<'a> {
    pub fn new(active: View, server: &'a str) -> Self {
        Self {
            active,
            server,
            live: false,
        }
    }

    /// Show the live indicator while the dashboard is polling
    pub fn live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }

    fn tab_titles() -> Vec<Line<'static>> {
        View::ALL
            .iter()
            .map(|view| {
                Line::from(vec![
                    Span::styled(format!("{} ", view.index() + 1), styles::keybinding()),
                    Span::raw(view.label()),
                ])
            })
            .collect()
    }

    fn tabs_width() -> u16 {
        // " n Label " per tab plus one divider between tabs
        let labels: usize = View::ALL.iter().map(|v| v.label().len() + 4).sum();
        (labels + View::ALL.len() - 1) as u16
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // Drop the tabs when the title would not fit beside them
        let show_tabs = inner.width >= Self::tabs_width() + MIN_TITLE_WIDTH;
        let tabs_width = if show_tabs { Self::tabs_width() } else { 0 };
        let title_width = inner.width.saturating_sub(tabs_width + 1);

        let mut spans = vec![
            Span::raw(" "),
            Span::styled("testdeck", styles::accent_bold()),
        ];
        if self.live {
            spans.push(Span::styled(" ●", styles::status_yellow()));
        }
        spans.push(Span::styled(" / ", styles::text_muted()));
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let room = (title_width as usize).saturating_sub(used);
        spans.push(Span::styled(truncate(self.server, room), styles::text_secondary()));

        Paragraph::new(Line::from(spans)).render(
            Rect::new(inner.x, inner.y, title_width, 1),
            buf,
        );

        if !show_tabs {
            return;
        }
        let tabs = Tabs::new(Self::tab_titles())
            .select(self.active.index())
            .highlight_style(styles::focused_selected())
            .divider("│");
        tabs.render(
            Rect::new(inner.right() - tabs_width, inner.y, tabs_width, 1),
            buf,
        );
    }
}
