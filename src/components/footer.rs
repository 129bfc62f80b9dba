use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Common footer component
pub struct Footer;

impl Footer {
    /// Render key hints like `"Tab: Next field | Esc: Back"`.
    ///
    /// Parts are split on `" | "`; each part's key (before `": "`) is
    /// emphasized. Returns the height used.
    pub fn render(frame: &mut Frame, area: Rect, text: &str) -> Result<u16> {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(theme().border_style())
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        let footer = Paragraph::new(Self::hint_line(text)).alignment(Alignment::Center);

        frame.render_widget(block, area);
        frame.render_widget(footer, inner);

        Ok(2)
    }

    fn hint_line(text: &str) -> Line<'_> {
        let t = theme();
        let mut spans = Vec::new();

        for (i, part) in text.split(" | ").enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", t.muted_style()));
            }
            if let Some((keys, label)) = part.split_once(": ") {
                spans.push(Span::styled(keys, t.emphasis_style()));
                spans.push(Span::styled(format!(": {label}"), t.text_style()));
            } else {
                spans.push(Span::styled(part, t.text_style()));
            }
        }

        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_line_splits_parts() {
        let line = Footer::hint_line("Tab: Next field | Esc: Back");
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Tab: Next field | Esc: Back");
        // key, label, separator, key, label
        assert_eq!(line.spans.len(), 5);
        assert_eq!(line.spans[0].content, "Tab");
    }

    #[test]
    fn test_plain_part_is_kept() {
        let line = Footer::hint_line("Sending OTP...");
        assert_eq!(line.spans.len(), 1);
    }
}
