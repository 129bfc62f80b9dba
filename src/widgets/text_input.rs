//! Text input widget for rendering [`TextInput`] fields.
//!
//! Bordered single-line field with a title, a placeholder, a right-aligned
//! hint on the bottom border and horizontal scrolling that keeps the cursor
//! in view.

use crate::styles::theme;
use crate::utils::text_input::TextInput;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// A widget for rendering a [`TextInput`] with the theme's field styling.
///
/// # Example
/// ```
/// use bidmart::utils::TextInput;
/// use bidmart::widgets::TextInputWidget;
///
/// let input = TextInput::with_text("9876543210");
/// let widget = TextInputWidget::new(&input)
///     .title("Phone number")
///     .placeholder("10-digit mobile number")
///     .focused(true);
/// // frame.render_text_input_widget(widget, area);
/// ```
pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    title: Option<&'a str>,
    placeholder: Option<&'a str>,
    /// Shown on the bottom border (e.g. a word counter)
    hint: Option<String>,
    focused: bool,
    disabled: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            title: None,
            placeholder: None,
            hint: None,
            focused: false,
            disabled: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Disabled fields render dimmed and never show a cursor
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// First visible character so the cursor fits in `width` columns
    fn scroll_offset(&self, width: u16) -> usize {
        let width = width as usize;
        if width == 0 {
            return 0;
        }
        (self.input.cursor() + 1).saturating_sub(width)
    }

    /// Visible text for an inner area `width` columns wide
    fn display_text(&self, width: u16) -> String {
        let text = self.input.text();
        if text.is_empty() {
            return self.placeholder.unwrap_or("").to_string();
        }
        text.chars()
            .skip(self.scroll_offset(width))
            .take(width as usize)
            .collect()
    }

    fn text_style(&self) -> Style {
        let t = theme();
        if self.disabled || self.input.is_empty() {
            t.dim_style()
        } else {
            t.text_style()
        }
    }

    fn border_style(&self) -> Style {
        let t = theme();
        if self.disabled {
            t.dim_style()
        } else {
            t.field_border_style(self.focused)
        }
    }

    fn create_block(&self) -> Block<'a> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());

        if let Some(title) = self.title {
            block = block.title(format!(" {title} "));
        }
        if let Some(hint) = &self.hint {
            block = block.title_bottom(Line::from(format!(" {hint} ")).right_aligned());
        }
        block
    }

    /// Screen position of the cursor inside `inner`
    fn cursor_position(&self, inner: Rect) -> (u16, u16) {
        let column = self.input.cursor() - self.scroll_offset(inner.width);
        let x = inner.x + (column as u16).min(inner.width.saturating_sub(1));
        (x, inner.y)
    }

    fn show_cursor(&self) -> bool {
        self.focused && !self.disabled
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.create_block();
        let inner = block.inner(area);

        Paragraph::new(self.display_text(inner.width))
            .block(block)
            .style(self.text_style())
            .render(area, buf);
    }
}

/// Frame extension that renders a [`TextInputWidget`] and places the
/// terminal cursor, which a plain `Widget` cannot do.
pub trait TextInputWidgetExt {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let inner = widget.create_block().inner(area);
        let cursor = widget.show_cursor().then(|| widget.cursor_position(inner));

        self.render_widget(widget, area);

        if let Some(position) = cursor {
            if inner.width > 0 && inner.height > 0 {
                self.set_cursor_position(position);
            }
        }
    }
}
