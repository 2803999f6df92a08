//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use testdeck_app::state::{AppState, View};

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Pure with respect to `state`: everything shown is derived from it, and
/// nothing is written back.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Fill entire terminal with deepest background color
    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    let header = widgets::MainHeader::new(state.active_view, &state.settings.server.base_url)
        .live(state.poller.is_polling());
    frame.render_widget(header, areas.header);

    frame.render_widget(widgets::CatalogSidebar::new(state), areas.sidebar);

    match state.active_view {
        View::Dashboard => frame.render_widget(widgets::DashboardView::new(state), areas.main),
        View::TestInfo => frame.render_widget(widgets::ClassInfoView::new(state), areas.main),
        View::TestResults => {
            let results = layout::results(areas.main);
            frame.render_widget(widgets::FilterBar::new(state), results.filter_bar);
            frame.render_widget(widgets::ExecutionList::new(state), results.list);
            frame.render_widget(widgets::ExecutionDetail::new(state), results.detail);
        }
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    // Alerts are modal and cover everything
    if let Some(message) = &state.alert {
        frame.render_widget(widgets::AlertDialog::new(message), area);
    }
}
