//! Logical key events.

/// One decoded key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A literal byte, including control codes (`Enter` is `\r`,
    /// backspace is 127, control chords are `byte & 0x1f`).
    Char(u8),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Escape,
}

/// The byte a Ctrl chord produces for `c`.
pub const fn ctrl(c: u8) -> u8 {
    c & 0x1f
}

pub const ENTER: u8 = b'\r';
pub const BACKSPACE: u8 = 127;
pub const ESC: u8 = 0x1b;
