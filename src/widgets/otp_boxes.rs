//! Row of one-digit boxes for OTP entry.

use crate::forms::OtpEntry;
use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const BOX_WIDTH: u16 = 5;
const BOX_HEIGHT: u16 = 3;
const GAP: u16 = 1;

/// Renders an [`OtpEntry`] as a centered row of boxes, the focused one
/// highlighted
pub struct OtpBoxes<'a> {
    entry: &'a OtpEntry,
    focused: bool,
}

impl<'a> OtpBoxes<'a> {
    pub fn new(entry: &'a OtpEntry) -> Self {
        Self {
            entry,
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Total width of the row
    pub fn width(&self) -> u16 {
        let count = self.entry.slots().len() as u16;
        count * BOX_WIDTH + count.saturating_sub(1) * GAP
    }

    pub fn height() -> u16 {
        BOX_HEIGHT
    }

    /// Area of box `index` within `area`
    fn box_area(&self, area: Rect, index: usize) -> Rect {
        let left = area.x + area.width.saturating_sub(self.width()) / 2;
        let x = left + index as u16 * (BOX_WIDTH + GAP);
        Rect::new(x, area.y, BOX_WIDTH, BOX_HEIGHT).intersection(area)
    }
}

impl Widget for OtpBoxes<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();

        for (index, slot) in self.entry.slots().iter().enumerate() {
            let rect = self.box_area(area, index);
            if rect.is_empty() {
                continue;
            }
            let is_focused = self.focused && index == self.entry.focus();
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(t.field_border_style(is_focused));

            let (symbol, style) = match slot {
                Some(digit) => (digit.to_string(), t.emphasis_style()),
                None if is_focused => ("_".to_string(), t.muted_style()),
                None => (" ".to_string(), t.muted_style()),
            };

            Paragraph::new(symbol)
                .alignment(Alignment::Center)
                .style(style)
                .block(block)
                .render(rect, buf);
        }
    }
}
