//! Modal dialog for notices
//!
//! Self-contained widget: centers itself, dims the background and draws a
//! title block over the message, with an optional key hint underneath.

use crate::flow::{Notice, NoticeKind};
use crate::styles::theme;
use ratatui::layout::Spacing;
use ratatui::prelude::*;
use ratatui::symbols::merge::MergeStrategy;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Widget, Wrap};

/// Dialog widget showing one notice
pub struct Dialog<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub kind: NoticeKind,
    /// Minimum width in columns
    pub min_width: u16,
    /// Maximum width in columns
    pub max_width: u16,
    /// Whether to dim the background behind the dialog
    pub dim_background: bool,
    /// Key hint shown below the message
    pub footer: Option<&'a str>,
}

impl<'a> Dialog<'a> {
    /// Width is calculated from the content, clamped to 40-70 columns.
    pub fn new(title: &'a str, content: &'a str) -> Self {
        Self {
            title,
            content,
            kind: NoticeKind::Info,
            min_width: 40,
            max_width: 70,
            dim_background: true,
            footer: None,
        }
    }

    pub fn from_notice(notice: &'a Notice) -> Self {
        Self::new(&notice.title, &notice.message).kind(notice.kind)
    }

    pub fn kind(mut self, kind: NoticeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn min_width(mut self, columns: u16) -> Self {
        self.min_width = columns;
        self
    }

    pub fn max_width(mut self, columns: u16) -> Self {
        self.max_width = columns;
        self
    }

    pub fn dim_background(mut self, dim: bool) -> Self {
        self.dim_background = dim;
        self
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Width for `area`: content length plus padding and borders
    fn width_for(&self, area: Rect) -> u16 {
        let longest = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .chain([self.title.chars().count()])
            .max()
            .unwrap_or(0) as u16;
        longest
            .saturating_add(6)
            .clamp(self.min_width, self.max_width)
            .min(area.width.saturating_sub(4))
    }

    /// Height for `width`: wrapped content plus the title and footer blocks
    fn height_for(&self, width: u16, area: Rect) -> u16 {
        let text_width = width.saturating_sub(6).max(1) as usize;
        let content_lines: usize = self
            .content
            .lines()
            .map(|line| line.chars().count().div_ceil(text_width).max(1))
            .sum();
        let content_height = (content_lines.max(1) as u16) + 2;
        let title_height = 3u16;
        let footer_height = if self.footer.is_some() { 2 } else { 0 };

        // The title and content blocks share one border line
        (title_height + content_height + footer_height - 1).min(area.height.saturating_sub(2))
    }

    fn render_impl(&self, area: Rect, buf: &mut Buffer) {
        let t = theme();

        let width = self.width_for(area);
        let height = self.height_for(width, area);
        let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
        let popup_y = area.y + (area.height.saturating_sub(height)) / 2;
        let popup_area = Rect::new(popup_x, popup_y, width, height);

        if self.dim_background {
            let dim = Block::default().style(t.dim_style());
            Widget::render(dim, area, buf);
        }
        Widget::render(Clear, popup_area, buf);

        let border_style = t.notice_style(self.kind);
        let border_type = t.dialog_border_type();

        let footer_height = if self.footer.is_some() { 1 } else { 0 };
        let [boxes_area, footer_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(footer_height),
        ])
        .areas(popup_area);

        let layout = Layout::vertical([Constraint::Length(3), Constraint::Min(3)])
            .spacing(Spacing::Overlap(1))
            .split(boxes_area);

        let block = || {
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(border_style)
                .padding(Padding::horizontal(2))
                .merge_borders(MergeStrategy::Exact)
        };

        let title_block = block();
        let title_inner = title_block.inner(layout[0]);
        Widget::render(title_block, layout[0], buf);
        Paragraph::new(self.title)
            .alignment(Alignment::Center)
            .style(border_style.add_modifier(Modifier::BOLD))
            .render(title_inner, buf);

        let content_block = block();
        let content_inner = content_block.inner(layout[1]);
        Widget::render(content_block, layout[1], buf);
        Paragraph::new(self.content)
            .wrap(Wrap { trim: true })
            .style(t.text_style())
            .render(content_inner, buf);

        if let Some(footer) = self.footer {
            Paragraph::new(footer)
                .alignment(Alignment::Center)
                .style(t.muted_style())
                .render(footer_area, buf);
        }
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_impl(area, buf);
    }
}
