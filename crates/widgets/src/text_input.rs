//! Single-line text input with a character-indexed cursor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Text input state.
///
/// The cursor is tracked in characters, not bytes, so multi-byte input
/// (Hangul, Cyrillic) edits correctly.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    input: String,
    cursor_pos: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial text, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let input = text.into();
        let cursor_pos = input.chars().count();
        Self { input, cursor_pos }
    }

    pub fn text(&self) -> &str {
        &self.input
    }

    /// Cursor position in characters
    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Replace the text and move the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor_pos = self.input.chars().count();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_index();
        self.input.insert(byte_idx, c);
        self.cursor_pos += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        self.cursor_pos -= 1;
        let byte_idx = self.byte_index();
        self.input.remove(byte_idx);
        true
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor_pos >= self.input.chars().count() {
            return false;
        }
        let byte_idx = self.byte_index();
        self.input.remove(byte_idx);
        true
    }

    /// Text split around the cursor, for rendering.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.input.split_at(self.byte_index())
    }

    /// Apply an editing key.
    ///
    /// Returns `true` if the text changed. Navigation keys move the cursor
    /// and return `false`; keys that are not editing keys are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let len = self.input.chars().count();
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor_pos = (self.cursor_pos + 1).min(len);
                false
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                false
            }
            KeyCode::End => {
                self.cursor_pos = len;
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_unicode_insert_and_backspace() {
        let mut input = TextInput::new();
        for c in "옵션".chars() {
            input.insert(c);
        }
        assert_eq!(input.cursor_pos(), 2);
        assert!(input.backspace());
        assert_eq!(input.text(), "옵");
    }

    #[test]
    fn test_navigation_and_delete() {
        let mut input = TextInput::with_text("abc");
        assert!(!input.handle_key(key(KeyCode::Home)));
        assert!(input.handle_key(key(KeyCode::Delete)));
        assert_eq!(input.text(), "bc");
        assert!(!input.handle_key(key(KeyCode::Right)));
        assert_eq!(input.split_at_cursor(), ("b", "c"));
        assert!(!input.handle_key(key(KeyCode::End)));
        assert!(!input.delete());
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut input = TextInput::new();
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(!input.handle_key(ctrl_a));
        assert!(input.is_empty());
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = TextInput::with_text("x");
        input.handle_key(key(KeyCode::Home));
        assert!(!input.backspace());
        assert_eq!(input.text(), "x");
    }
}
