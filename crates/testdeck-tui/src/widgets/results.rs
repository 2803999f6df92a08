//! Test Results: filter bar, execution list and the selected execution

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};
use testdeck_app::state::{AppState, Focus, ResultRow, UiMode};
use testdeck_core::{ResultSummary, StatusFilter};

use super::dashboard::execution_line;
use super::{format_duration, indent, placeholder, truncate, Placeholder};
use crate::theme::styles;

/// Height of the failure/output pane under the result tree
const NODE_DETAIL_HEIGHT: u16 = 9;

// ─────────────────────────────────────────────────────────────────────────────
// Filter bar
// ─────────────────────────────────────────────────────────────────────────────

pub struct FilterBar<'a> {
    state: &'a AppState,
}

impl<'a> FilterBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn field(&self, key: &'static str, name: &'static str, value: String) -> Vec<Span<'static>> {
        let value_style = if value == "*" {
            styles::text_muted()
        } else {
            styles::accent()
        };
        vec![
            Span::styled(key, styles::keybinding()),
            Span::styled(format!(" {name}: "), styles::text_secondary()),
            Span::styled(value, value_style),
            Span::raw("  "),
        ]
    }
}

fn or_any(value: &str) -> String {
    if value.is_empty() {
        "*".to_string()
    } else {
        value.to_string()
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let block = styles::titled_block("Filters", false);
        let inner = block.inner(area);
        block.render(area, buf);

        if let UiMode::FilterInput(field) = state.ui_mode {
            let line = Line::from(vec![
                Span::styled(format!("{}: ", field.label()), styles::accent_bold()),
                Span::styled(state.input_buffer.as_str(), styles::text_primary()),
                Span::styled("▏", styles::accent()),
                Span::styled("   Enter apply · Esc cancel", styles::text_muted()),
            ]);
            Paragraph::new(line).render(inner, buf);
            return;
        }

        let filter = &state.filter;
        let status = match filter.status {
            StatusFilter::Any => "*".to_string(),
            other => other.label().to_string(),
        };
        let date = filter
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "*".to_string());

        let mut spans = Vec::new();
        spans.extend(self.field("s", "Status", status));
        spans.extend(self.field("i", "IP", or_any(&filter.requester_ip)));
        spans.extend(self.field("n", "Class", or_any(&filter.class_name)));
        spans.extend(self.field("d", "Date", date));
        spans.push(Span::styled("t", styles::keybinding()));
        spans.push(Span::styled(" today  ", styles::text_secondary()));
        if !filter.is_empty() {
            spans.push(Span::styled("c", styles::keybinding()));
            spans.push(Span::styled(" clear", styles::text_secondary()));
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Execution list
// ─────────────────────────────────────────────────────────────────────────────

pub struct ExecutionList<'a> {
    state: &'a AppState,
}

impl<'a> ExecutionList<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for ExecutionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let focused = state.focus == Focus::Main;
        let shown = state.filtered_executions();
        let total = state.executions.executions().map_or(0, <[_]>::len);

        let title = if state.executions.is_loaded() {
            format!("Executions ({}/{})", shown.len(), total)
        } else {
            "Executions".to_string()
        };
        let block = styles::titled_block(&title, focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(p) = placeholder(
            &state.results.list,
            state.executions.is_loaded(),
            state.tick_count,
            "No executions loaded",
        ) {
            p.render(inner, buf);
            return;
        }
        if shown.is_empty() {
            let text = if total == 0 {
                "No executions yet"
            } else {
                "No executions match the filter"
            };
            Placeholder::Empty(text).render(inner, buf);
            return;
        }

        let show_time = state.settings.ui.show_timestamps;
        let width = (inner.width as usize).saturating_sub(2);
        let selected = state.results.selected.as_deref();
        let items: Vec<ListItem> = shown
            .iter()
            .map(|exec| {
                let mut line = execution_line(exec, show_time, width);
                let marker = if selected == Some(exec.execution_id.as_str()) {
                    Span::styled("▶ ", styles::accent())
                } else {
                    Span::raw("  ")
                };
                line.spans.insert(0, marker);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).highlight_style(styles::selection(focused));
        let mut list_state = ListState::default().with_selected(Some(state.results.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Execution detail
// ─────────────────────────────────────────────────────────────────────────────

pub struct ExecutionDetail<'a> {
    state: &'a AppState,
}

impl<'a> ExecutionDetail<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

fn summary_line(summary: &ResultSummary) -> Line<'static> {
    Line::from(vec![
        Span::styled("Total ", styles::text_muted()),
        Span::styled(summary.total.to_string(), styles::heading()),
        Span::styled("  ✓ ", styles::status_green()),
        Span::styled(summary.success.to_string(), styles::status_green()),
        Span::styled("  ✗ ", styles::status_red()),
        Span::styled(summary.failed.to_string(), styles::status_red()),
        Span::styled("  ⊘ ", styles::status_yellow()),
        Span::styled(summary.skipped.to_string(), styles::status_yellow()),
        Span::styled("  ⏱ ", styles::text_muted()),
        Span::styled(
            format_duration(summary.total_duration_millis),
            styles::text_secondary(),
        ),
    ])
}

fn result_line(row: &ResultRow, width: usize) -> Line<'static> {
    let style = styles::result_status(row.status);
    let icon = match (row.status, row.counts) {
        (Some(status), _) => status.icon(),
        (None, Some(_)) => "▾",
        // leaf still executing
        (None, None) => "…",
    };

    let mut tail = Vec::new();
    if row.nested {
        tail.push(Span::raw(" "));
        tail.push(Span::styled("Nested", styles::nested_badge()));
    }
    if let Some(counts) = row.counts {
        tail.push(Span::styled(
            format!(
                " ({} ✓{} ✗{} ⊘{})",
                counts.total, counts.success, counts.failed, counts.skipped
            ),
            styles::text_muted(),
        ));
    }
    if row.duration_millis > 0 {
        tail.push(Span::styled(
            format!(" {}", format_duration(row.duration_millis)),
            styles::text_muted(),
        ));
    }

    let head = format!("{}{icon} ", indent(row.depth));
    let used = head.chars().count() + tail.iter().map(|s| s.width()).sum::<usize>();
    let name_style = if row.counts.is_some() {
        styles::heading()
    } else {
        styles::text_primary()
    };

    let mut spans = vec![
        Span::styled(head, style),
        Span::styled(
            truncate(&row.display_name, width.saturating_sub(used)),
            name_style,
        ),
    ];
    spans.extend(tail);
    Line::from(spans)
}

/// Failure message, stack trace and captured output of the focused node
fn node_detail_lines(row: &ResultRow) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut section = |title: &'static str, body: &str, style: Style| {
        lines.push(Line::from(Span::styled(title, styles::heading())));
        lines.extend(
            body.lines()
                .map(|l| Line::from(Span::styled(l.to_string(), style))),
        );
    };

    if let Some(message) = &row.error_message {
        section("Error", message, styles::status_red());
    }
    if let Some(trace) = &row.stack_trace {
        section("Stack trace", trace, styles::text_secondary());
    }
    if let Some(stdout) = &row.stdout {
        section("Output", stdout, styles::text_primary());
    }
    lines
}

impl Widget for ExecutionDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let focused = state.focus == Focus::Detail;

        let Some(execution_id) = state.results.selected.as_deref() else {
            let block = styles::titled_block("Execution", focused);
            let inner = block.inner(area);
            block.render(area, buf);
            Placeholder::Empty("Select an execution and press Enter").render(inner, buf);
            return;
        };

        let title = format!("Execution {execution_id}");
        let block = styles::titled_block(&title, focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let results = state.executions.detail_for(execution_id);
        if let Some(p) = placeholder(
            &state.results.detail,
            results.is_some(),
            state.tick_count,
            "No results",
        ) {
            p.render(inner, buf);
            return;
        }
        let Some(results) = results else {
            return;
        };

        let rows = state.result_rows();
        let selected = rows.get(state.results.node_cursor);
        let detail_lines = selected.map(node_detail_lines).unwrap_or_default();
        let detail_height = if detail_lines.is_empty() {
            0
        } else {
            NODE_DETAIL_HEIGHT.min(inner.height / 2)
        };

        let [summary_area, tree_area, node_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(detail_height),
        ])
        .areas(inner);

        Paragraph::new(summary_line(&results.summary())).render(summary_area, buf);

        if rows.is_empty() {
            let text = if state.executions.find(execution_id).is_some_and(|e| e.is_running()) {
                "Execution is still running"
            } else {
                "No test results recorded"
            };
            Placeholder::Empty(text).render(tree_area, buf);
            return;
        }

        let width = tree_area.width as usize;
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| ListItem::new(result_line(row, width)))
            .collect();
        let list = List::new(items).highlight_style(styles::selection(focused));
        let mut list_state = ListState::default().with_selected(Some(state.results.node_cursor));
        StatefulWidget::render(list, tree_area, buf, &mut list_state);

        if detail_height > 0 {
            let block = styles::glass_block(false).title(Span::styled(
                " Details ",
                styles::text_secondary(),
            ));
            let node_inner = block.inner(node_area);
            block.render(node_area, buf);
            Paragraph::new(detail_lines)
                .wrap(Wrap { trim: false })
                .render(node_inner, buf);
        }
    }
}
