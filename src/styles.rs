//! Theme and style system
//!
//! One palette per theme, read through [`theme()`]. Widgets only use the
//! style helpers so the no-color theme can fall back to modifiers.

use crate::flow::NoticeKind;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use std::str::FromStr;
use std::sync::RwLock;

/// Global theme instance
static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Set the global theme (at startup, or when the user switches)
pub fn init_theme(theme_type: ThemeType) {
    let mut theme = THEME.write().unwrap_or_else(std::sync::PoisonError::into_inner);
    *theme = Theme::new(theme_type);
}

/// Get the current theme
pub fn theme() -> Theme {
    THEME
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Disable all UI colors (`NO_COLOR=1`)
    NoColor,
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

/// Color palette for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,

    /// Titles, focused borders
    pub primary: Color,
    /// Buyer pane accent
    pub buyer: Color,
    /// Seller pane accent
    pub seller: Color,

    pub success: Color,
    pub error: Color,

    pub text: Color,
    pub text_muted: Color,
    pub text_emphasis: Color,

    pub border: Color,
    pub border_focused: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    pub const fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            primary: Color::Cyan,
            buyer: Color::Green,
            seller: Color::Rgb(255, 140, 0),
            success: Color::Green,
            error: Color::Red,
            text: Color::White,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Yellow,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            highlight_bg: Color::DarkGray,
        }
    }

    pub const fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            primary: Color::Blue,
            buyer: Color::Rgb(0, 130, 60),
            seller: Color::Rgb(200, 90, 0),
            success: Color::Green,
            error: Color::Red,
            text: Color::Black,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Blue,
            border: Color::DarkGray,
            border_focused: Color::Blue,
            highlight_bg: Color::Gray,
        }
    }

    /// Palette values are unused here; the helpers use modifiers instead
    pub const fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            primary: Color::Reset,
            buyer: Color::Reset,
            seller: Color::Reset,
            success: Color::Reset,
            error: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            text_emphasis: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
            highlight_bg: Color::Reset,
        }
    }

    fn is_plain(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    fn colored(&self, color: Color, fallback: Modifier) -> Style {
        if self.is_plain() {
            Style::default().add_modifier(fallback)
        } else {
            Style::default().fg(color)
        }
    }

    pub fn title_style(&self) -> Style {
        self.colored(self.primary, Modifier::BOLD)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        self.colored(self.text, Modifier::empty())
    }

    pub fn muted_style(&self) -> Style {
        self.colored(self.text_muted, Modifier::DIM)
    }

    /// Same look as muted text; used for placeholders and disabled fields
    pub fn dim_style(&self) -> Style {
        self.muted_style()
    }

    pub fn emphasis_style(&self) -> Style {
        self.colored(self.text_emphasis, Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        self.colored(self.success, Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        self.colored(self.error, Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        self.colored(self.border, Modifier::empty())
    }

    pub fn border_focused_style(&self) -> Style {
        self.colored(self.border_focused, Modifier::BOLD)
    }

    /// Border style for a field depending on focus
    pub fn field_border_style(&self, focused: bool) -> Style {
        if focused {
            self.border_focused_style()
        } else {
            self.border_style()
        }
    }

    pub fn highlight_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Style::default()
            .fg(self.text_emphasis)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Accent for the buyer or seller pane
    pub fn role_style(&self, seller: bool) -> Style {
        let color = if seller { self.seller } else { self.buyer };
        self.colored(color, Modifier::BOLD)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for a notice of the given kind
    pub fn notice_style(&self, kind: NoticeKind) -> Style {
        match kind {
            NoticeKind::Info => self.border_focused_style(),
            NoticeKind::Success => self.success_style(),
            NoticeKind::Error => self.error_style(),
        }
    }

    pub fn dialog_border_type(&self) -> BorderType {
        BorderType::Rounded
    }
}
