//! Six-box OTP entry for returning users.

use crate::components::{Footer, Header};
use crate::flow::{Navigation, Transition};
use crate::forms::OtpEntry;
use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::Task;
use crate::styles::theme;
use crate::utils::{center_area, create_standard_layout};
use crate::widgets::OtpBoxes;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub struct OtpScreen {
    phone: String,
    entry: OtpEntry,
}

impl OtpScreen {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            entry: OtpEntry::new(),
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn entry(&self) -> &OtpEntry {
        &self.entry
    }

    fn submit(&self, ctx: &ScreenContext) -> ScreenAction {
        if ctx.busy {
            return ScreenAction::None;
        }
        ScreenAction::Spawn(Task::VerifyOtp {
            phone: self.phone.clone(),
            code: self.entry.code(),
        })
    }
}

impl Screen for OtpScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header, content, footer) = create_standard_layout(area, 3, 2);
        let description = format!("Enter the code sent to {}", self.phone);
        Header::render(frame, header, "Verify OTP", &description)?;

        let boxes = OtpBoxes::new(&self.entry).focused(!ctx.busy);
        let body = center_area(content, boxes.width(), OtpBoxes::height() + 2);
        let [boxes_area, _, status_area] = Layout::vertical([
            Constraint::Length(OtpBoxes::height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(body);
        frame.render_widget(boxes, boxes_area);

        let status = if ctx.busy { "Verifying..." } else { "" };
        frame.render_widget(
            Paragraph::new(status)
                .alignment(Alignment::Center)
                .style(theme().muted_style()),
            status_area,
        );

        Footer::render(frame, footer, &self.footer(ctx.keymap()))?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        let action = ctx.keymap().get_field_action(key.code, key.modifiers);
        match action {
            // The pending verification answers for this screen
            _ if ctx.busy => {}
            Some(Action::Cancel) => {
                return Ok(ScreenAction::Navigate(Navigation::to(Transition::Back)))
            }
            Some(Action::Confirm | Action::Submit) => return Ok(self.submit(ctx)),
            Some(Action::Backspace) => self.entry.backspace(),
            Some(Action::MoveLeft | Action::PrevField) => self.entry.focus_prev(),
            Some(Action::MoveRight | Action::NextField) => self.entry.focus_next(),
            Some(Action::Home) => self.entry.set_focus(0),
            Some(Action::End) => self.entry.set_focus(usize::MAX),
            Some(_) => {}
            None => {
                if let KeyCode::Char(c) = key.code {
                    if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                        self.entry.input(c);
                    }
                }
            }
        }
        Ok(ScreenAction::None)
    }

    fn footer(&self, keymap: &Keymap) -> String {
        format!(
            "{} | {} | {}",
            keymap.hint(Action::Confirm, "Verify"),
            keymap.hint(Action::Cancel, "Back"),
            keymap.hint(Action::Quit, "Quit"),
        )
    }
}
