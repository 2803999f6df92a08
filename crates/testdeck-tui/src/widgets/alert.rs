//! Blocking alert dialog

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::modal_overlay;
use crate::theme::styles;

const MIN_WIDTH: u16 = 30;
const MAX_WIDTH: u16 = 70;

pub struct AlertDialog<'a> {
    message: &'a str,
}

impl<'a> AlertDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Dialog size for the message: wide enough for the longest line up to
    /// [`MAX_WIDTH`], tall enough for the wrapped text plus border and hint.
    fn size(&self) -> (u16, u16) {
        let longest = self
            .message
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0) as u16;
        let width = (longest + 4).clamp(MIN_WIDTH, MAX_WIDTH);
        let text_width = (width - 4).max(1) as usize;
        let wrapped: usize = self
            .message
            .lines()
            .map(|l| l.width().div_ceil(text_width).max(1))
            .sum();
        (width, wrapped.max(1) as u16 + 4)
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        modal_overlay::dim_background(buf, area);

        let (width, height) = self.size();
        let rect = modal_overlay::centered_rect(width, height, area);
        Clear.render(rect, buf);
        modal_overlay::render_shadow(buf, rect);

        let block = styles::modal_block("Alert");
        let inner = block.inner(rect);
        block.render(rect, buf);

        let [text_area, hint_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner.inner(
                ratatui::layout::Margin {
                    horizontal: 1,
                    vertical: 0,
                },
            ));
        Paragraph::new(self.message)
            .style(styles::text_primary())
            .wrap(Wrap { trim: false })
            .render(text_area, buf);
        Paragraph::new(Line::from(vec![
            Span::styled("Enter", styles::keybinding()),
            Span::styled(" OK", styles::text_secondary()),
        ]))
        .alignment(Alignment::Right)
        .render(hint_area, buf);
    }
}
