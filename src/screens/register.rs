//! New-user registration: name, optional email and the OTP in one form.

use crate::components::{Footer, Header};
use crate::flow::{Navigation, Transition};
use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{Registration, Task};
use crate::styles::theme;
use crate::utils::text_input::TextInput;
use crate::utils::validation::OTP_LENGTH;
use crate::utils::{center_area, create_standard_layout};
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    Name,
    Email,
    Otp,
}

impl RegisterField {
    pub fn next(self) -> Self {
        match self {
            RegisterField::Name => RegisterField::Email,
            RegisterField::Email => RegisterField::Otp,
            RegisterField::Otp => RegisterField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            RegisterField::Name => RegisterField::Otp,
            RegisterField::Email => RegisterField::Name,
            RegisterField::Otp => RegisterField::Email,
        }
    }
}

pub struct RegisterScreen {
    phone: String,
    name: TextInput,
    email: TextInput,
    otp: TextInput,
    focus: RegisterField,
}

impl RegisterScreen {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            name: TextInput::new(),
            email: TextInput::new(),
            otp: TextInput::new()
                .with_max_len(OTP_LENGTH)
                .with_filter(|c, _| c.is_ascii_digit()),
            focus: RegisterField::Name,
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn focus(&self) -> RegisterField {
        self.focus
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            RegisterField::Name => &mut self.name,
            RegisterField::Email => &mut self.email,
            RegisterField::Otp => &mut self.otp,
        }
    }

    pub fn registration(&self) -> Registration {
        Registration {
            first_name: self.name.text_trimmed().to_string(),
            email: self.email.text_trimmed().to_string(),
            otp: self.otp.text().to_string(),
        }
    }

    fn submit(&self, ctx: &ScreenContext) -> ScreenAction {
        if ctx.busy {
            return ScreenAction::None;
        }
        ScreenAction::Spawn(Task::RegisterAndVerify {
            phone: self.phone.clone(),
            registration: self.registration(),
        })
    }
}

impl Screen for RegisterScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header, content, footer) = create_standard_layout(area, 3, 2);
        let description = format!("Create your account. OTP sent to {}", self.phone);
        Header::render(frame, header, "Register", &description)?;

        let body = center_area(content, 56, 11);
        let [name_area, email_area, otp_area, _, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(body);

        let fields = [
            (RegisterField::Name, &self.name, "Name", "Your first name", name_area),
            (RegisterField::Email, &self.email, "Email (optional)", "you@example.com", email_area),
            (RegisterField::Otp, &self.otp, "OTP", "6-digit code", otp_area),
        ];
        for (field, input, title, placeholder, field_area) in fields {
            let widget = TextInputWidget::new(input)
                .title(title)
                .placeholder(placeholder)
                .focused(self.focus == field)
                .disabled(ctx.busy);
            frame.render_text_input_widget(widget, field_area);
        }

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
            Some(Action::Cancel) if ctx.busy => {}
            Some(Action::Cancel) => {
                return Ok(ScreenAction::Navigate(Navigation::to(Transition::Back)))
            }
            Some(Action::Submit) => return Ok(self.submit(ctx)),
            // Enter moves through the fields and submits from the last one
            Some(Action::Confirm) => {
                if self.focus == RegisterField::Otp {
                    return Ok(self.submit(ctx));
                }
                self.focus = self.focus.next();
            }
            Some(Action::NextField | Action::MoveDown) => self.focus = self.focus.next(),
            Some(Action::PrevField | Action::MoveUp) => self.focus = self.focus.prev(),
            _ => {
                if !ctx.busy {
                    self.focused_input()
                        .handle_key_with_action(key.code, key.modifiers, action);
                }
            }
        }
        Ok(ScreenAction::None)
    }

    fn footer(&self, keymap: &Keymap) -> String {
        format!(
            "{} | {} | {} | {}",
            keymap.hint(Action::NextField, "Next field"),
            keymap.hint(Action::Submit, "Verify"),
            keymap.hint(Action::Cancel, "Back"),
            keymap.hint(Action::Quit, "Quit"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::media::FsMediaSource;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(screen: &mut RegisterScreen, ctx: &ScreenContext, text: &str) {
        for c in text.chars() {
            screen.handle_event(key(KeyCode::Char(c)), ctx).unwrap();
        }
    }

    #[test]
    fn test_enter_walks_fields_then_submits() {
        let config = Config::default();
        let media = FsMediaSource::new("/nonexistent", &[]);
        let ctx = ScreenContext::new(&config, &media, false);
        let mut screen = RegisterScreen::new("+919876543210");

        type_text(&mut screen, &ctx, "Asha");
        screen.handle_event(key(KeyCode::Enter), &ctx).unwrap();
        type_text(&mut screen, &ctx, "asha@example.com");
        screen.handle_event(key(KeyCode::Enter), &ctx).unwrap();
        assert_eq!(screen.focus(), RegisterField::Otp);
        type_text(&mut screen, &ctx, "12a34567");

        match screen.handle_event(key(KeyCode::Enter), &ctx).unwrap() {
            ScreenAction::Spawn(Task::RegisterAndVerify {
                phone,
                registration,
            }) => {
                assert_eq!(phone, "+919876543210");
                assert_eq!(registration.first_name, "Asha");
                assert_eq!(registration.email, "asha@example.com");
                // Digits only, six at most
                assert_eq!(registration.otp, "123456");
            }
            other => panic!("expected registration, got {other:?}"),
        }
    }

    #[test]
    fn test_escape_goes_back() {
        let config = Config::default();
        let media = FsMediaSource::new("/nonexistent", &[]);
        let ctx = ScreenContext::new(&config, &media, false);
        let mut screen = RegisterScreen::new("+1");

        match screen.handle_event(key(KeyCode::Esc), &ctx).unwrap() {
            ScreenAction::Navigate(nav) => assert_eq!(nav.transition, Transition::Back),
            other => panic!("expected back, got {other:?}"),
        }
    }

    #[test]
    fn test_escape_is_ignored_while_registering() {
        let config = Config::default();
        let media = FsMediaSource::new("/nonexistent", &[]);
        let ctx = ScreenContext::new(&config, &media, true);
        let mut screen = RegisterScreen::new("+1");

        let action = screen.handle_event(key(KeyCode::Esc), &ctx).unwrap();
        assert!(matches!(action, ScreenAction::None));
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(RegisterField::Otp.next(), RegisterField::Name);
        assert_eq!(RegisterField::Name.prev(), RegisterField::Otp);
    }
}
