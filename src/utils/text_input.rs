use crate::keymap::Action;
use crossterm::event::{KeyCode, KeyModifiers};

/// Predicate deciding whether `c` may be inserted into `current`
pub type CharFilter = fn(char, &str) -> bool;

/// A single-line text field with a cursor.
///
/// Optional limits restrict what can be typed: a maximum character count
/// and a per-character filter (digits only, amount characters, ...).
/// Setting text programmatically bypasses both.
///
/// # Example
/// ```
/// use bidmart::utils::text_input::TextInput;
///
/// let mut input = TextInput::new().with_max_len(2);
/// input.insert_char('h');
/// input.insert_char('i');
/// input.insert_char('!');
/// assert_eq!(input.text(), "hi");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor: usize,
    max_len: Option<usize>,
    filter: Option<CharFilter>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text input with initial text, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            ..Self::default()
        }
    }

    /// Limit the number of characters that can be typed
    #[must_use]
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Only accept characters for which `filter` returns true
    #[must_use]
    pub fn with_filter(mut self, filter: CharFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the text is empty (ignoring whitespace).
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Set the text and move cursor to end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor. Returns false if it was refused.
    pub fn insert_char(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        if self.max_len.is_some_and(|max| self.char_count() >= max) {
            return false;
        }
        if self.filter.is_some_and(|accept| !accept(c, &self.text)) {
            return false;
        }

        let byte_index = self
            .text
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.text.len());
        self.text.insert(byte_index, c);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.remove_at(self.cursor - 1);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            self.remove_at(self.cursor);
        }
    }

    fn remove_at(&mut self, index: usize) {
        if let Some((byte_index, _)) = self.text.char_indices().nth(index) {
            self.text.remove(byte_index);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Handle a raw key code.
    ///
    /// Returns true if the key belongs to text editing, even when a typed
    /// character was refused by the field's limits.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            KeyCode::Home => {
                self.move_home();
                true
            }
            KeyCode::End => {
                self.move_end();
                true
            }
            _ => false,
        }
    }

    /// Handle an action from the keymap.
    ///
    /// Returns true if the action was handled.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::Home => self.move_home(),
            Action::End => self.move_end(),
            Action::Backspace => self.backspace(),
            Action::DeleteChar => self.delete(),
            _ => return false,
        }
        true
    }

    /// Handle a key event, preferring the mapped action over the raw key.
    pub fn handle_key_with_action(
        &mut self,
        key_code: KeyCode,
        modifiers: KeyModifiers,
        action: Option<Action>,
    ) -> bool {
        if let Some(action) = action {
            if self.handle_action(action) {
                return true;
            }
        }

        // Ctrl/Alt chords are shortcuts, not text
        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }

        self.handle_key(key_code)
    }

    /// Check if an action should still fire while a text field has focus.
    ///
    /// Field navigation, text editing and the chord-bound form actions pass
    /// through; everything else (e.g. `Quit` bound to `q`) is suppressed so
    /// the key is typed.
    pub fn is_action_allowed_when_focused(action: &Action) -> bool {
        matches!(
            action,
            Action::Cancel
                | Action::Confirm
                | Action::NextField
                | Action::PrevField
                | Action::MoveUp
                | Action::MoveDown
                | Action::MoveLeft
                | Action::MoveRight
                | Action::Home
                | Action::End
                | Action::Backspace
                | Action::DeleteChar
                | Action::Submit
                | Action::SwitchRole
                | Action::PickPhotos
                | Action::TakePhoto
                | Action::RemovePhoto
        )
    }
}
