//! Keymap configuration module
//!
//! Customizable keyboard shortcuts with preset keymaps (standard, vim, emacs)
//! and per-action overrides from the config file.

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{format_key_display, KeyBinding, ParsedKey};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Keymap configuration with preset and optional overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keymap {
    #[serde(default)]
    pub preset: KeymapPreset,

    /// User-defined overrides (checked before preset)
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    /// Get the action for a key event, checking overrides first then preset.
    ///
    /// If an action is overridden, preset bindings for that action are ignored.
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.all_bindings()
            .into_iter()
            .find(|binding| binding.matches(code, modifiers))
            .map(|binding| binding.action)
    }

    /// Like [`Keymap::get_action`], but plain printable keys always type.
    ///
    /// Used while a text field has focus: `?` or `q` are text there, and
    /// only actions allowed inside a field are returned.
    pub fn get_field_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        if ParsedKey::normalized(code, modifiers).is_text() {
            return None;
        }
        self.get_action(code, modifiers)
            .filter(crate::utils::TextInput::is_action_allowed_when_focused)
    }

    /// Get all bindings (overrides + preset); overrides shadow the preset
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.overrides.clone();
        bindings.extend(
            self.preset
                .bindings()
                .into_iter()
                .filter(|preset| !self.overrides.iter().any(|o| o.action == preset.action)),
        );
        bindings
    }

    /// Overrides whose key string does not parse
    pub fn invalid_overrides(&self) -> Vec<&KeyBinding> {
        self.overrides.iter().filter(|b| b.parse().is_err()).collect()
    }

    /// Display string for an action (e.g., `Action::Submit` -> "Ctrl+S")
    pub fn get_key_display_for_action(&self, action: Action) -> String {
        self.all_bindings()
            .into_iter()
            .find(|b| b.action == action)
            .map_or_else(|| format!("{action:?}"), |b| b.display())
    }

    /// Footer hint fragment like "Ctrl+S: Submit form"
    pub fn hint(&self, action: Action, label: &str) -> String {
        format!("{}: {}", self.get_key_display_for_action(action), label)
    }

    /// Footer text shared by the form screens
    pub fn footer_form(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.hint(Action::NextField, "Next field"),
            self.hint(Action::Confirm, "Submit"),
            self.hint(Action::Cancel, "Back"),
            self.hint(Action::Quit, "Quit"),
        )
    }
}
