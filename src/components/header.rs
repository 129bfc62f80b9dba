use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

/// Application name shown in every header
pub const APP_TITLE: &str = "bidmart";

/// Common header component for all screens
pub struct Header;

impl Header {
    /// Render a bordered header titled `"bidmart - {title}"` with a
    /// description inside. Returns the height used.
    pub fn render(frame: &mut Frame, area: Rect, title: &str, description: &str) -> Result<u16> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(format!(" {APP_TITLE} - {title} "))
            .title_style(t.title_style())
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let description = Paragraph::new(description)
            .style(t.text_style())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(description, inner);

        Ok(area.height)
    }
}
