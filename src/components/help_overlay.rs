//! Help Overlay Component
//!
//! Lists the active keybindings grouped by category.

use crate::keymap::Keymap;
use crate::styles::theme;
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Renders the help overlay showing current keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    /// Render the overlay centered in `area`
    pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap, config_path: &str) -> Result<()> {
        let t = theme();

        let popup_width = (area.width as f32 * 0.8).min(80.0) as u16;
        let popup_height = (area.height as f32 * 0.9).min(40.0) as u16;
        let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(t.dialog_border_type())
            .title(format!(" Keyboard Shortcuts - {} Preset ", keymap.preset.name()))
            .title_alignment(Alignment::Center)
            .border_style(t.border_focused_style());

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let [list_area, footer_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).areas(inner);

        let bindings = Paragraph::new(Self::binding_lines(keymap)).wrap(Wrap { trim: false });
        frame.render_widget(bindings, list_area);

        let footer = Paragraph::new(format!(
            "Edit keybindings in: {config_path}\nPress any key to close"
        ))
        .style(t.muted_style())
        .alignment(Alignment::Center);
        frame.render_widget(footer, footer_area);

        Ok(())
    }

    /// One heading per category, in first-seen order, then its bindings
    fn binding_lines(keymap: &Keymap) -> Vec<Line<'static>> {
        let t = theme();
        let bindings = keymap.all_bindings();

        let mut categories: Vec<&'static str> = Vec::new();
        for binding in &bindings {
            let category = binding.action.category();
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        let mut lines = Vec::new();
        for category in categories {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(format!("  {category}"), t.title_style())));

            for binding in bindings.iter().filter(|b| b.action.category() == category) {
                lines.push(Line::from(vec![
                    Span::styled(format!("    {:14}", binding.display()), t.emphasis_style()),
                    Span::styled(binding.get_description().to_string(), t.text_style()),
                ]));
            }
        }
        lines
    }
}
