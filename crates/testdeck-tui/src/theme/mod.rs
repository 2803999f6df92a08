//! Theme for the testdeck TUI.
//!
//! - `palette` holds the raw colors
//! - `styles` builds semantic styles and blocks from them

pub mod palette;
pub mod styles;
