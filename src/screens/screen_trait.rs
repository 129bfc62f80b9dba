//! Screen trait and associated types.
//!
//! Screens own their form state, turn key events into [`ScreenAction`]s
//! and never touch the network themselves: slow work is handed to the app
//! as a [`Task`] and its [`TaskOutcome`] is fed back through
//! [`Screen::on_outcome`].

use crate::config::Config;
use crate::flow::{Navigation, Notice};
use crate::keymap::Keymap;
use crate::media::MediaSource;
use crate::services::{Task, TaskOutcome};
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only state for rendering.
pub struct RenderContext<'a> {
    pub config: &'a Config,
    /// A task is in flight; submit controls render disabled
    pub busy: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, busy: bool) -> Self {
        Self { config, busy }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.config.keymap
    }
}

/// Shared resources for event handling.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
    /// Photo sources for the seller form
    pub media: &'a dyn MediaSource,
    /// A task is in flight; screens must not ask for another
    pub busy: bool,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config, media: &'a dyn MediaSource, busy: bool) -> Self {
        Self {
            config,
            media,
            busy,
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.config.keymap
    }
}

/// What a screen asks the app to do after an event.
#[derive(Debug, Clone, Default)]
pub enum ScreenAction {
    /// Nothing to do
    #[default]
    None,
    /// Run work in the background
    Spawn(Task),
    /// Show a blocking notice
    Notify(Notice),
    /// Move to another route, optionally with a notice
    Navigate(Navigation),
    /// Open the keybinding overlay
    ShowHelp,
    Quit,
}

impl ScreenAction {
    /// The default handling of a finished task: sign-in steps navigate,
    /// everything else becomes a notice.
    pub fn from_outcome(outcome: TaskOutcome) -> Self {
        match outcome {
            TaskOutcome::Navigated(Ok(navigation)) => ScreenAction::Navigate(navigation),
            TaskOutcome::Posted(Ok(notice)) => ScreenAction::Notify(notice),
            TaskOutcome::Navigated(Err(e))
            | TaskOutcome::Posted(Err(e))
            | TaskOutcome::Captured(Err(e)) => ScreenAction::Notify(e.notice()),
            TaskOutcome::Captured(Ok(_)) => ScreenAction::None,
            TaskOutcome::Interrupted => ScreenAction::Notify(Notice::error(
                "Error",
                "The request was interrupted. Please try again.",
            )),
        }
    }
}

/// Trait for screen controllers.
///
/// # Example
///
/// ```rust,ignore
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
///         Ok(ScreenAction::Spawn(Task::RequestOtp { phone: self.phone() }))
///     }
/// }
/// ```
pub trait Screen {
    /// Render the screen within `area`.
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle an input event and say what should happen next.
    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Handle the result of a task this screen spawned.
    fn on_outcome(&mut self, outcome: TaskOutcome) -> ScreenAction {
        ScreenAction::from_outcome(outcome)
    }

    /// Check if a text input is currently focused.
    ///
    /// When true, plain keys are typed instead of triggering actions.
    fn is_input_focused(&self) -> bool {
        true
    }

    /// Footer hints for the current state
    fn footer(&self, keymap: &Keymap) -> String {
        keymap.footer_form()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TransportError;
    use crate::flow::{after_verified, FlowError, NoticeKind};

    #[test]
    fn test_navigation_outcome_navigates() {
        let outcome = TaskOutcome::Navigated(Ok(Navigation::to(after_verified())));
        assert!(matches!(
            ScreenAction::from_outcome(outcome),
            ScreenAction::Navigate(_)
        ));
    }

    #[test]
    fn test_failures_become_error_notices() {
        let outcome = TaskOutcome::Posted(Err(FlowError::transport(
            TransportError::NoData,
            "Something went wrong",
        )));
        match ScreenAction::from_outcome(outcome) {
            ScreenAction::Notify(notice) => {
                assert_eq!(notice.kind, NoticeKind::Error);
                assert_eq!(notice.message, "Something went wrong");
            }
            other => panic!("expected a notice, got {other:?}"),
        }
    }

    #[test]
    fn test_cancelled_capture_is_silent() {
        let outcome = TaskOutcome::Captured(Ok(None));
        assert!(matches!(
            ScreenAction::from_outcome(outcome),
            ScreenAction::None
        ));
    }
}
