//! Test Info: the opened class with its method tree and inline source

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use testdeck_app::state::{AppState, ClassPanel, Focus, MethodCode, MethodRow};

use super::{indent, placeholder, Placeholder};
use crate::theme::styles;

pub struct ClassInfoView<'a> {
    state: &'a AppState,
}

impl<'a> ClassInfoView<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

fn method_item<'a>(panel: &'a ClassPanel, row: &MethodRow) -> ListItem<'a> {
    let pad = indent(row.depth);
    let Some(unique_id) = &row.unique_id else {
        return ListItem::new(Line::from(vec![
            Span::raw(pad),
            Span::styled("▾ ", styles::text_secondary()),
            Span::styled(row.label.clone(), styles::heading()),
            Span::raw(" "),
            Span::styled("Nested", styles::nested_badge()),
        ]));
    };

    let shown = panel.shown_code.contains(unique_id);
    let marker = if shown { "− " } else { "+ " };
    let mut lines = vec![Line::from(vec![
        Span::raw(pad.clone()),
        Span::styled(marker, styles::accent()),
        Span::styled(row.label.clone(), styles::text_primary()),
    ])];

    if shown {
        let code_pad = format!("{pad}    ");
        match panel.code.get(unique_id) {
            Some(MethodCode::Loaded(code)) => {
                lines.extend(code.lines().map(|line| {
                    Line::from(vec![
                        Span::styled(format!("{code_pad}│ "), styles::text_muted()),
                        Span::styled(line, styles::code()),
                    ])
                }));
            }
            Some(MethodCode::Loading) | None => lines.push(Line::from(Span::styled(
                format!("{code_pad}Loading source..."),
                styles::text_muted(),
            ))),
        }
    }
    ListItem::new(Text::from(lines))
}

impl Widget for ClassInfoView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let panel = &state.class_panel;
        let focused = state.focus == Focus::Main;

        let Some(opened) = panel.opened.as_deref() else {
            let block = styles::titled_block("Test Info", focused);
            let inner = block.inner(area);
            block.render(area, buf);
            Placeholder::Empty("Select a class in the sidebar and press Enter")
                .render(inner, buf);
            return;
        };

        let title = panel
            .detail
            .as_ref()
            .map(|d| d.class_name.as_str())
            .unwrap_or(opened);
        let block = styles::titled_block(title, focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(p) = placeholder(
            &panel.panel,
            panel.detail.is_some(),
            state.tick_count,
            "Class not loaded",
        ) {
            p.render(inner, buf);
            return;
        }
        let Some(detail) = &panel.detail else {
            return;
        };

        let [info_area, methods_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);
        Paragraph::new(vec![
            Line::from(Span::styled(
                detail.full_class_name.as_str(),
                styles::text_secondary(),
            )),
            Line::from(Span::styled(
                format!("{} test methods", detail.method_count()),
                styles::text_muted(),
            )),
        ])
        .render(info_area, buf);

        let rows = panel.method_rows();
        if rows.is_empty() {
            Paragraph::new(Span::styled("No test methods", styles::text_muted()))
                .render(methods_area, buf);
            return;
        }

        let items: Vec<ListItem> = rows.iter().map(|row| method_item(panel, row)).collect();
        let list = List::new(items).highlight_style(styles::selection(focused));
        let mut list_state = ListState::default().with_selected(Some(panel.cursor));
        StatefulWidget::render(list, methods_area, buf, &mut list_state);
    }
}
