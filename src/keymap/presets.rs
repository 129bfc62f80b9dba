//! Preset keymaps: Standard, Vim, Emacs
//!
//! Every screen is a form, so plain letters always type text. Presets
//! differ only in their chord and navigation keys; marketplace actions use
//! the same chords everywhere.

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

/// Available keymap presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Arrows, Enter, Esc
    #[default]
    Standard,
    /// Ctrl+J/K field movement
    Vim,
    /// Ctrl+N/P field movement, C-g cancel
    Emacs,
}

impl KeymapPreset {
    pub fn bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = match self {
            KeymapPreset::Standard => standard_bindings(),
            KeymapPreset::Vim => vim_bindings(),
            KeymapPreset::Emacs => emacs_bindings(),
        };
        bindings.extend(common_bindings());
        bindings
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Vim => "Vim",
            KeymapPreset::Emacs => "Emacs",
        }
    }
}

/// Bindings shared by every preset
fn common_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("home", Action::Home),
        KeyBinding::new("end", Action::End),
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("tab", Action::NextField),
        KeyBinding::new("shift+tab", Action::PrevField),
        KeyBinding::new("backspace", Action::Backspace),
        KeyBinding::new("delete", Action::DeleteChar),
        KeyBinding::new("ctrl+c", Action::Quit),
        KeyBinding::new("f1", Action::Help),
        KeyBinding::new("ctrl+s", Action::Submit),
        KeyBinding::new("ctrl+r", Action::SwitchRole),
        KeyBinding::new("ctrl+o", Action::PickPhotos),
        KeyBinding::new("ctrl+t", Action::TakePhoto),
        KeyBinding::new("ctrl+x", Action::RemovePhoto),
    ]
}

fn standard_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("ctrl+q", Action::Quit),
        KeyBinding::new("?", Action::Help),
    ]
}

fn vim_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("ctrl+k", Action::MoveUp),
        KeyBinding::new("ctrl+j", Action::MoveDown),
        KeyBinding::new("ctrl+h", Action::MoveLeft),
        KeyBinding::new("ctrl+l", Action::MoveRight),
        KeyBinding::new("ctrl+q", Action::Quit),
        KeyBinding::new("?", Action::Help),
    ]
}

fn emacs_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("ctrl+p", Action::MoveUp),
        KeyBinding::new("ctrl+n", Action::MoveDown),
        KeyBinding::new("ctrl+b", Action::MoveLeft),
        KeyBinding::new("ctrl+f", Action::MoveRight),
        KeyBinding::new("ctrl+a", Action::Home),
        KeyBinding::new("ctrl+e", Action::End),
        KeyBinding::new("ctrl+d", Action::DeleteChar),
        KeyBinding::new("ctrl+g", Action::Cancel),
        KeyBinding::new("ctrl+h", Action::Help),
    ]
}
