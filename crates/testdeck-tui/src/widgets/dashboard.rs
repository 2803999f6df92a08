//! Dashboard: today's stats, recent executions, weekly trend, recent failures

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use testdeck_app::state::{AppState, Focus};
use testdeck_core::{DashboardData, ExecutionSummary, FailureEntry, TrendPoint};

use super::{placeholder, truncate};
use crate::theme::styles;

/// Width of the longest trend bar
const TREND_BAR_WIDTH: usize = 20;

pub struct DashboardView<'a> {
    state: &'a AppState,
}

impl<'a> DashboardView<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for DashboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let focused = state.focus == Focus::Main;

        let pending = placeholder(
            &state.dashboard_panel,
            state.dashboard.is_loaded(),
            state.tick_count,
            "No dashboard data",
        );
        let data = match (state.dashboard.get(), pending) {
            (Some(data), None) => data,
            (_, pending) => {
                let block = styles::titled_block("Dashboard", focused);
                let inner = block.inner(area);
                block.render(area, buf);
                if let Some(p) = pending {
                    p.render(inner, buf);
                }
                return;
            }
        };

        let [stats_area, recent_area, bottom_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(10),
        ])
        .areas(area);
        let [trend_area, failures_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(bottom_area);

        render_stats(data, stats_area, buf);
        render_recent(
            &data.recent_executions,
            state.dashboard_cursor,
            focused,
            recent_area,
            buf,
        );
        render_trend(&data.weekly_trend, trend_area, buf);
        render_failures(&data.recent_failures, failures_area, buf);
    }
}

fn render_stats(data: &DashboardData, area: Rect, buf: &mut Buffer) {
    let block = styles::titled_block("Today", false);
    let inner = block.inner(area);
    block.render(area, buf);

    let stats = &data.today_stats;
    let rate = match stats.success_rate() {
        Some(rate) => Span::styled(format!("{rate:.1}%"), styles::success_rate(rate)),
        None => Span::styled("-", styles::text_muted()),
    };

    let cards: [(&str, Span); 5] = [
        (
            "Executions",
            Span::styled(stats.total_executions.to_string(), styles::heading()),
        ),
        (
            "Tests",
            Span::styled(stats.total_tests.to_string(), styles::heading()),
        ),
        ("Success rate", rate),
        (
            "Failed",
            Span::styled(stats.failed_count.to_string(), styles::status_red()),
        ),
        (
            "Test classes",
            Span::styled(data.total_test_classes.to_string(), styles::heading()),
        ),
    ];

    let columns = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(inner);
    for ((label, value), column) in cards.into_iter().zip(columns.iter()) {
        let text = vec![
            Line::from(Span::styled(label, styles::text_muted())),
            Line::from(value),
        ];
        Paragraph::new(text).render(*column, buf);
    }
}

/// One execution row, shared with the Test Results list
pub(crate) fn execution_line(
    exec: &ExecutionSummary,
    show_time: bool,
    width: usize,
) -> Line<'static> {
    let (icon, label, style) = styles::execution_indicator(exec.status);
    let mut spans = vec![
        Span::styled(format!("{icon} "), style),
        Span::styled(format!("{label:<9} "), style),
    ];
    if show_time {
        spans.push(Span::styled(
            format!("{} ", exec.started_at.format("%m-%d %H:%M:%S")),
            styles::text_secondary(),
        ));
    }

    let counts = if exec.is_running() {
        String::new()
    } else {
        format!(" {}/{}", exec.success_count, exec.total_tests)
    };
    let used: usize = spans.iter().map(|s| s.width()).sum::<usize>() + counts.len();
    let classes = exec.class_list().join(", ");
    spans.push(Span::styled(
        truncate(&classes, width.saturating_sub(used + 1)),
        styles::text_primary(),
    ));
    if !counts.is_empty() {
        let counts_style = if exec.failed_count > 0 {
            styles::status_red()
        } else {
            styles::status_green()
        };
        spans.push(Span::styled(counts, counts_style));
    }
    Line::from(spans)
}

fn render_recent(
    executions: &[ExecutionSummary],
    cursor: usize,
    focused: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let running = executions.iter().filter(|e| e.is_running()).count();
    let title = if running > 0 {
        format!("Recent Executions ({running} running)")
    } else {
        "Recent Executions".to_string()
    };
    let block = styles::titled_block(&title, focused);
    let inner = block.inner(area);
    block.render(area, buf);

    if executions.is_empty() {
        Paragraph::new(Span::styled("No executions yet", styles::text_muted())).render(inner, buf);
        return;
    }

    let width = inner.width as usize;
    let items: Vec<ListItem> = executions
        .iter()
        .map(|exec| ListItem::new(execution_line(exec, true, width)))
        .collect();
    let list = List::new(items).highlight_style(styles::selection(focused));
    let mut list_state = ListState::default().with_selected(Some(cursor));
    StatefulWidget::render(list, inner, buf, &mut list_state);
}

fn render_trend(trend: &[TrendPoint], area: Rect, buf: &mut Buffer) {
    let block = styles::titled_block("Last 7 Days", false);
    let inner = block.inner(area);
    block.render(area, buf);

    if trend.is_empty() {
        Paragraph::new(Span::styled("No history", styles::text_muted())).render(inner, buf);
        return;
    }

    let max = trend.iter().map(|p| p.executions).max().unwrap_or(0).max(1);
    let lines: Vec<Line> = trend
        .iter()
        .map(|point| {
            let filled = (point.executions as usize * TREND_BAR_WIDTH).div_ceil(max as usize);
            let failed_part = if point.executions == 0 {
                0
            } else {
                (point.failed_count as usize * filled / point.executions as usize).min(filled)
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", point.date.format("%m-%d")),
                    styles::text_secondary(),
                ),
                Span::styled("█".repeat(filled - failed_part), styles::status_green()),
                Span::styled("█".repeat(failed_part), styles::status_red()),
                Span::styled(
                    format!(" {}", point.executions),
                    styles::text_primary(),
                ),
            ])
        })
        .collect();
    Paragraph::new(lines).render(inner, buf);
}

fn render_failures(failures: &[FailureEntry], area: Rect, buf: &mut Buffer) {
    let block = styles::titled_block("Recent Failures", false);
    let inner = block.inner(area);
    block.render(area, buf);

    if failures.is_empty() {
        Paragraph::new(Span::styled("No recent failures", styles::status_green()))
            .render(inner, buf);
        return;
    }

    let width = inner.width as usize;
    let lines: Vec<Line> = failures
        .iter()
        .map(|failure| {
            let name = truncate(&failure.display_name, width.saturating_sub(2));
            let message = failure
                .error_message
                .as_deref()
                .and_then(|m| m.lines().next())
                .unwrap_or("");
            Line::from(vec![
                Span::styled("✗ ", styles::status_red()),
                Span::styled(name, styles::text_primary()),
                Span::styled(
                    format!(" {}", truncate(message, width / 2)),
                    styles::text_muted(),
                ),
            ])
        })
        .collect();
    Paragraph::new(lines).render(inner, buf);
}
