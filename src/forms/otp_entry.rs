//! Six-slot OTP entry with focus that follows typing.

use crate::utils::validation::OTP_LENGTH;

/// One digit per slot; focus moves forward on entry and back on an empty
/// backspace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpEntry {
    slots: [Option<char>; OTP_LENGTH],
    focus: usize,
}

impl OtpEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn slots(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.slots
    }

    pub fn set_focus(&mut self, index: usize) {
        self.focus = index.min(OTP_LENGTH - 1);
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus + 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    /// Put `c` in the focused slot and advance. Non-digits are ignored.
    pub fn input(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        self.slots[self.focus] = Some(c);
        if self.focus < OTP_LENGTH - 1 {
            self.focus += 1;
        }
        true
    }

    /// Clear the focused slot if it holds a digit, otherwise step back
    pub fn backspace(&mut self) {
        if self.slots[self.focus].is_some() {
            self.slots[self.focus] = None;
        } else {
            self.focus_prev();
        }
    }

    /// The entered digits in slot order; empty slots contribute nothing
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == OTP_LENGTH
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
