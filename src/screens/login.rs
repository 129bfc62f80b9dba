//! Phone number entry, the first screen.

use crate::components::{Footer, Header};
use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::Task;
use crate::styles::theme;
use crate::utils::text_input::TextInput;
use crate::utils::validation::{is_phone_char, MAX_PHONE_LENGTH};
use crate::utils::{center_area, create_standard_layout};
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub struct LoginScreen {
    phone: TextInput,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            phone: TextInput::new()
                .with_max_len(MAX_PHONE_LENGTH)
                .with_filter(|c, _| is_phone_char(c)),
        }
    }

    pub fn phone(&self) -> &str {
        self.phone.text()
    }

    fn submit(&self, ctx: &ScreenContext) -> ScreenAction {
        if ctx.busy {
            return ScreenAction::None;
        }
        ScreenAction::Spawn(Task::RequestOtp {
            phone: self.phone.text_trimmed().to_string(),
        })
    }
}

impl Screen for LoginScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header, content, footer) = create_standard_layout(area, 3, 2);
        Header::render(frame, header, "Login", "Sign in with your phone number")?;

        let body = center_area(content, 50, 7);
        let [input_area, _, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(body);

        let placeholder = format!("10-digit number ({} added)", ctx.config.country_code);
        let widget = TextInputWidget::new(&self.phone)
            .title("Phone number")
            .placeholder(&placeholder)
            .focused(!ctx.busy)
            .disabled(ctx.busy);
        frame.render_text_input_widget(widget, input_area);

        let status = if ctx.busy { "Sending OTP..." } else { "" };
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
            Some(Action::Confirm | Action::Submit) => Ok(self.submit(ctx)),
            _ => {
                if !ctx.busy {
                    self.phone
                        .handle_key_with_action(key.code, key.modifiers, action);
                }
                Ok(ScreenAction::None)
            }
        }
    }

    fn footer(&self, keymap: &Keymap) -> String {
        format!(
            "{} | {} | {}",
            keymap.hint(Action::Confirm, "Send OTP"),
            keymap.hint(Action::Help, "Help"),
            keymap.hint(Action::Quit, "Quit"),
        )
    }
}
