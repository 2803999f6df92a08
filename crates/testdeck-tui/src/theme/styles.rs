//! Semantic style builders.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};
use testdeck_core::{ExecutionStatus, ResultStatus};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn heading() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - the row under the cursor of the focused pane
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Cursor row of a pane that does not have focus
pub fn unfocused_selected() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .add_modifier(Modifier::REVERSED)
}

pub fn selection(focused: bool) -> Style {
    if focused {
        focused_selected()
    } else {
        unfocused_selected()
    }
}

pub fn nested_badge() -> Style {
    Style::default()
        .fg(palette::BADGE_NESTED)
        .add_modifier(Modifier::BOLD)
}

pub fn code() -> Style {
    Style::default().fg(palette::CODE_FG)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

/// Bordered panel with a title
pub fn titled_block(title: &str, focused: bool) -> Block<'_> {
    let title_style = if focused { accent_bold() } else { text_secondary() };
    glass_block(focused).title(ratatui::text::Span::styled(
        format!(" {title} "),
        title_style,
    ))
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(status_red())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Status mapping ---

/// Indicator for an execution's lifecycle status.
///
/// Returns `(icon, label, Style)`.
pub fn execution_indicator(status: ExecutionStatus) -> (&'static str, &'static str, Style) {
    match status {
        ExecutionStatus::Running => (
            "●",
            status.label(),
            Style::default()
                .fg(palette::STATUS_YELLOW)
                .add_modifier(Modifier::BOLD),
        ),
        ExecutionStatus::Completed => ("✓", status.label(), status_green()),
        ExecutionStatus::Failed => ("✗", status.label(), status_red()),
    }
}

/// Style for a result tree row; containers without a status stay neutral
pub fn result_status(status: Option<ResultStatus>) -> Style {
    match status {
        Some(ResultStatus::Success) => status_green(),
        Some(ResultStatus::Failed) => status_red(),
        Some(ResultStatus::Skipped) => status_yellow(),
        None => text_secondary(),
    }
}

/// Success rate coloring: green from 90%, yellow from 70%, red below
pub fn success_rate(rate: f64) -> Style {
    if rate >= 90.0 {
        status_green()
    } else if rate >= 70.0 {
        status_yellow()
    } else {
        status_red()
    }
}

/// Braille spinner frame for the given tick
pub fn spinner_frame(tick: u64) -> &'static str {
    const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
    FRAMES[(tick % FRAMES.len() as u64) as usize]
}
