//! Semantic actions triggered by keyboard shortcuts

use serde::{Deserialize, Serialize};

/// All possible user actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ Navigation ============
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Jump to start of input
    Home,
    /// Jump to end of input
    End,

    // ============ Form fields ============
    NextField,
    PrevField,

    // ============ Confirmation ============
    /// Confirm / submit the focused form (Enter)
    Confirm,
    /// Cancel / go back (Esc)
    Cancel,
    /// Submit the whole form from any field
    Submit,

    // ============ Global ============
    Quit,
    Help,

    // ============ Text editing ============
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    DeleteChar,

    // ============ Marketplace ============
    /// Toggle between the buyer and seller panes
    SwitchRole,
    /// Add photos from the library
    PickPhotos,
    /// Capture a photo with the camera
    TakePhoto,
    /// Remove the last added photo
    RemovePhoto,
}

impl Action {
    /// Get a human-readable description of this action
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::Home => "Home",
            Action::End => "End",
            Action::NextField => "Next field",
            Action::PrevField => "Previous field",
            Action::Confirm => "Confirm",
            Action::Cancel => "Cancel / Go back",
            Action::Submit => "Submit form",
            Action::Quit => "Quit",
            Action::Help => "Show help",
            Action::Backspace => "Backspace",
            Action::DeleteChar => "Delete character",
            Action::SwitchRole => "Switch buyer/seller",
            Action::PickPhotos => "Pick photos",
            Action::TakePhoto => "Take photo",
            Action::RemovePhoto => "Remove last photo",
        }
    }

    /// Get action category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::Home
            | Action::End => "Navigation",

            Action::NextField | Action::PrevField => "Field Navigation",

            Action::Confirm | Action::Cancel | Action::Submit => "Forms",

            Action::Quit | Action::Help => "Global",

            Action::Backspace | Action::DeleteChar => "Text Editing",

            Action::SwitchRole | Action::PickPhotos | Action::TakePhoto | Action::RemovePhoto => {
                "Marketplace"
            }
        }
    }
}
