//! Custom widget components

mod alert;
mod class_info;
mod dashboard;
mod header;
pub mod modal_overlay;
mod placeholder;
mod results;
mod sidebar;
mod status_bar;

pub use alert::AlertDialog;
pub use class_info::ClassInfoView;
pub use dashboard::DashboardView;
pub use header::MainHeader;
pub use placeholder::{placeholder, Placeholder};
pub use results::{ExecutionDetail, ExecutionList, FilterBar};
pub use sidebar::CatalogSidebar;
pub use status_bar::StatusBar;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to a display width, ending with an ellipsis when cut
pub(crate) fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Human readable duration: `850ms`, `1.25s`, `2m 05s`
pub(crate) fn format_duration(millis: u64) -> String {
    if millis < 1_000 {
        format!("{millis}ms")
    } else if millis < 60_000 {
        format!("{:.2}s", millis as f64 / 1_000.0)
    } else {
        let secs = millis / 1_000;
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

/// Two spaces per tree level
pub(crate) fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("Short", 10), "Short");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("com.example.OrderServiceTest", 12), "com.example…");
    }

    #[test]
    fn test_truncate_zero_width() {
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn test_truncate_counts_display_width() {
        // Each CJK character is two columns wide
        assert_eq!(truncate("テストクラス", 5), "テス…");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0ms");
        assert_eq!(format_duration(850), "850ms");
        assert_eq!(format_duration(1_250), "1.25s");
        assert_eq!(format_duration(125_000), "2m 05s");
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "    ");
    }
}
