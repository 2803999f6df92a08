//! Terminal-independent key events.
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary,
//! so the app crate and its tests never depend on a terminal library.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character pressed together with Ctrl
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,

    /// Function key (F1-F12)
    F(u8),
}

impl InputKey {
    /// Digit keys 1-9 as a zero-based index
    pub fn digit_index(self) -> Option<usize> {
        match self {
            InputKey::Char(c @ '1'..='9') => Some(c as usize - '1' as usize),
            _ => None,
        }
    }
}
