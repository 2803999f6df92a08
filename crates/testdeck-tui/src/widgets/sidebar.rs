//! Sidebar: search box, catalog tree with checkboxes, run button

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use testdeck_app::state::{AppState, CatalogRow, Focus, UiMode};

use super::{indent, placeholder, truncate};
use crate::theme::styles;

pub struct CatalogSidebar<'a> {
    state: &'a AppState,
}

impl<'a> CatalogSidebar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn search_line(&self) -> Line<'a> {
        let catalog = &self.state.catalog;
        let editing = self.state.ui_mode == UiMode::Search;
        let prompt_style = if editing {
            styles::accent_bold()
        } else {
            styles::text_muted()
        };

        let mut spans = vec![Span::styled("/ ", prompt_style)];
        if catalog.search.is_empty() && !editing {
            spans.push(Span::styled("search classes", styles::text_muted()));
        } else {
            spans.push(Span::styled(catalog.search.as_str(), styles::text_primary()));
        }
        if editing {
            spans.push(Span::styled("▏", styles::accent()));
        }
        Line::from(spans)
    }

    fn row_item(&self, row: &CatalogRow, width: usize) -> ListItem<'static> {
        let mut spans = vec![Span::raw(indent(row.depth))];
        let name_style;
        if let Some(class_name) = &row.class_name {
            let (mark, mark_style) = if row.checked {
                ("[x] ", styles::status_green())
            } else {
                ("[ ] ", styles::text_muted())
            };
            spans.push(Span::styled(mark, mark_style));
            name_style = if self.state.class_panel.is_open(class_name) {
                styles::accent_bold()
            } else {
                styles::text_primary()
            };
        } else {
            let arrow = if row.expanded { "▾ " } else { "▸ " };
            spans.push(Span::styled(arrow, styles::text_secondary()));
            name_style = styles::text_secondary().add_modifier(Modifier::BOLD);
        }

        let used: usize = spans.iter().map(|s| s.width()).sum();
        spans.push(Span::styled(
            truncate(&row.name, width.saturating_sub(used)),
            name_style,
        ));
        ListItem::new(Line::from(spans))
    }

    fn run_button(&self) -> Line<'static> {
        let label = self
            .state
            .catalog
            .run_button_label(self.state.run_in_flight);
        let style = if self.state.run_in_flight {
            styles::status_yellow()
        } else if self.state.catalog.checked.is_empty() {
            styles::text_muted()
        } else {
            styles::focused_selected()
        };
        Line::from(vec![
            Span::styled(" ▶ ", style),
            Span::styled(format!("{label} "), style),
            Span::styled(" r", styles::keybinding()),
        ])
    }
}

impl Widget for CatalogSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let catalog = &self.state.catalog;
        let focused = self.state.focus == Focus::Sidebar;
        let title = format!("Test Catalog ({})", catalog.class_count());
        let block = styles::titled_block(&title, focused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 3 {
            return;
        }

        let [search_area, tree_area, button_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.search_line()).render(search_area, buf);
        Paragraph::new(self.run_button()).render(button_area, buf);

        let has_data = catalog.tree.is_some();
        if let Some(placeholder) = placeholder(
            &catalog.panel,
            has_data,
            self.state.tick_count,
            "No test classes",
        ) {
            placeholder.render(tree_area, buf);
            return;
        }

        let rows = catalog.visible_rows();
        if rows.is_empty() {
            Paragraph::new(Span::styled("No matching classes", styles::text_muted()))
                .render(tree_area, buf);
            return;
        }

        let width = tree_area.width as usize;
        let items: Vec<ListItem> = rows.iter().map(|row| self.row_item(row, width)).collect();
        let list = List::new(items).highlight_style(styles::selection(focused));
        let mut list_state = ListState::default().with_selected(Some(catalog.cursor));
        StatefulWidget::render(list, tree_area, buf, &mut list_state);
    }
}
