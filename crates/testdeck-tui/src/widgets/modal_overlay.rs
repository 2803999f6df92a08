//! Modal overlay helpers: centering, background dimming and drop shadow.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::theme::palette;

/// Center a fixed-size rect within an area, clamped to the area.
///
/// ```
/// use ratatui::layout::Rect;
/// use testdeck_tui::widgets::modal_overlay::centered_rect;
///
/// let modal = centered_rect(40, 10, Rect::new(0, 0, 80, 24));
/// assert_eq!(modal, Rect::new(20, 7, 40, 10));
/// ```
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Dim every cell of `area` so the modal stands out.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// One-cell shadow along the right and bottom edges of `modal`.
pub fn render_shadow(buf: &mut Buffer, modal: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);
    let right_x = modal.right();
    let bottom_y = modal.bottom();

    let right_edge = (modal.y + 1..=bottom_y).map(|y| (right_x, y));
    let bottom_edge = (modal.x + 1..=right_x).map(|x| (x, bottom_y));
    for pos in right_edge.chain(bottom_edge) {
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_within_area() {
        let result = centered_rect(40, 10, Rect::new(0, 0, 80, 24));
        assert_eq!(result, Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(5, 5, 30, 8);
        assert_eq!(centered_rect(100, 50, area), area);
    }

    #[test]
    fn test_dim_background_restyles_cells() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        dim_background(&mut buf, area);
        assert_eq!(buf[(3, 1)].fg, palette::TEXT_MUTED);
        assert_eq!(buf[(0, 0)].bg, palette::DEEPEST_BG);
    }

    #[test]
    fn test_shadow_edges() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 10));
        let modal = Rect::new(5, 2, 10, 6);
        render_shadow(&mut buf, modal);

        assert_eq!(buf[(15, 3)].bg, palette::SHADOW);
        assert_eq!(buf[(15, 8)].bg, palette::SHADOW);
        assert_eq!(buf[(6, 8)].bg, palette::SHADOW);
        // Top-right and bottom-left corners stay untouched
        assert_ne!(buf[(15, 2)].bg, palette::SHADOW);
        assert_ne!(buf[(5, 8)].bg, palette::SHADOW);
    }

    #[test]
    fn test_shadow_outside_buffer_is_ignored() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        render_shadow(&mut buf, area);
        assert_ne!(buf[(9, 4)].bg, palette::SHADOW);
    }
}
