//! Input model: modifier keys and keyboard keys as reported by the host.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the press extends the selection instead of replacing it.
    /// Ctrl and Cmd are interchangeable across platforms.
    #[must_use]
    pub fn additive(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key. The inner string holds the key name as reported by the
/// browser (e.g. `"Escape"`, `"a"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);
