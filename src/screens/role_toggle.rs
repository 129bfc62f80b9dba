//! Signed-in home: a buyer/seller switch over the two forms.
//!
//! Both panes keep their state while the other one is shown. The seller
//! pane owns photo picking; camera capture runs as a background task.

use crate::components::{Footer, Header};
use crate::flow::Notice;
use crate::forms::{BuyerField, BuyerForm, PhotoError, SellerField, SellerForm};
use crate::keymap::{Action, Keymap};
use crate::media::{MediaAsset, MediaKind};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{Task, TaskOutcome};
use crate::styles::theme;
use crate::utils::create_standard_layout;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

/// Which form is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Buyer,
    Seller,
}

impl Role {
    pub fn toggled(self) -> Self {
        match self {
            Role::Buyer => Role::Seller,
            Role::Seller => Role::Buyer,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Role::Buyer => "Buyer",
            Role::Seller => "Seller",
        }
    }
}

pub struct RoleToggleScreen {
    role: Role,
    buyer: BuyerForm,
    seller: SellerForm,
}

impl Default for RoleToggleScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleToggleScreen {
    pub fn new() -> Self {
        Self {
            role: Role::Buyer,
            buyer: BuyerForm::new(),
            seller: SellerForm::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn buyer(&self) -> &BuyerForm {
        &self.buyer
    }

    pub fn seller(&self) -> &SellerForm {
        &self.seller
    }

    pub fn seller_mut(&mut self) -> &mut SellerForm {
        &mut self.seller
    }

    fn handle_buyer_key(&mut self, key: KeyEvent, action: Option<Action>) -> ScreenAction {
        match action {
            Some(Action::Submit) => return submit_buyer(&self.buyer),
            Some(Action::Confirm) => {
                if self.buyer.focus == BuyerField::Amount {
                    return submit_buyer(&self.buyer);
                }
                self.buyer.focus = self.buyer.focus.next();
            }
            Some(Action::NextField | Action::PrevField | Action::MoveDown | Action::MoveUp) => {
                self.buyer.focus = self.buyer.focus.next();
            }
            _ => {
                self.buyer
                    .focused_input()
                    .handle_key_with_action(key.code, key.modifiers, action);
            }
        }
        ScreenAction::None
    }

    fn handle_seller_key(
        &mut self,
        key: KeyEvent,
        action: Option<Action>,
        ctx: &ScreenContext,
    ) -> ScreenAction {
        match action {
            Some(Action::Submit) => return self.submit_seller(ctx),
            Some(Action::Confirm) => {
                if self.seller.focus == SellerField::BidEnd {
                    return self.submit_seller(ctx);
                }
                self.seller.focus = self.seller.focus.next();
            }
            Some(Action::NextField | Action::MoveDown) => {
                self.seller.focus = self.seller.focus.next();
            }
            Some(Action::PrevField | Action::MoveUp) => {
                self.seller.focus = self.seller.focus.prev();
            }
            Some(Action::PickPhotos) => return self.pick_photos(ctx),
            Some(Action::TakePhoto) => return self.take_photo(ctx),
            Some(Action::RemovePhoto) => {
                if let Some(asset) = self.seller.photos.remove_last() {
                    info!("Removed photo {}", asset.label());
                }
            }
            _ => {
                if !ctx.busy {
                    self.seller
                        .focused_input()
                        .handle_key_with_action(key.code, key.modifiers, action);
                }
            }
        }
        ScreenAction::None
    }

    fn submit_seller(&self, ctx: &ScreenContext) -> ScreenAction {
        if ctx.busy {
            return ScreenAction::None;
        }
        match self.seller.validate() {
            Ok(draft) => ScreenAction::Spawn(Task::SubmitListing { draft }),
            Err(e) => ScreenAction::Notify(e.notice()),
        }
    }

    /// Add the paths typed in the photo field
    fn pick_photos(&mut self, ctx: &ScreenContext) -> ScreenAction {
        let permission = ctx.media.request_permission(MediaKind::Library);
        if !permission.is_granted() {
            warn!("Library access refused: {:?}", permission);
            return ScreenAction::Notify(Notice::error(
                "Permission required",
                "Please allow photo library access.",
            ));
        }

        if self.seller.photo_paths.is_empty() {
            self.seller.focus = SellerField::Photos;
            return ScreenAction::None;
        }

        match ctx.media.pick_from_library(self.seller.photo_paths.text()) {
            Ok(assets) => {
                let refused = self.seller.photos.add_all(assets);
                self.seller.photo_paths.clear();
                if refused.is_empty() {
                    ScreenAction::None
                } else {
                    for PhotoError::TooLarge { uri, size } in &refused {
                        warn!("Refused {} ({} bytes)", uri, size);
                    }
                    ScreenAction::Notify(Notice::error(
                        "Photo too large",
                        "Each photo must be under 20 MB.",
                    ))
                }
            }
            Err(e) => {
                warn!("Photo pick failed: {:#}", e);
                let message = e.to_string();
                ScreenAction::Notify(Notice::error(
                    "Error",
                    if message.is_empty() {
                        "Could not pick media".to_string()
                    } else {
                        message
                    },
                ))
            }
        }
    }

    fn take_photo(&self, ctx: &ScreenContext) -> ScreenAction {
        if ctx.busy {
            return ScreenAction::None;
        }
        let permission = ctx.media.request_permission(MediaKind::Camera);
        if !permission.is_granted() {
            warn!("Camera access refused: {:?}", permission);
            return ScreenAction::Notify(Notice::error(
                "Permission required",
                "Please allow camera access.",
            ));
        }
        ScreenAction::Spawn(Task::CapturePhoto)
    }

    fn add_captured(&mut self, asset: MediaAsset) -> ScreenAction {
        match self.seller.photos.add(asset) {
            Ok(()) => ScreenAction::None,
            Err(e) => {
                warn!("{}", e);
                ScreenAction::Notify(Notice::error("Photo too large", "Photo must be under 20 MB."))
            }
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let selected = match self.role {
            Role::Buyer => 0,
            Role::Seller => 1,
        };
        let tabs = Tabs::new([Role::Buyer.title(), Role::Seller.title()])
            .select(selected)
            .style(t.muted_style())
            .highlight_style(t.role_style(self.role == Role::Seller))
            .divider(" | ")
            .padding("  ", "  ");

        let [tabs_area] = Layout::horizontal([Constraint::Length(24)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(tabs, tabs_area);
    }

    fn render_buyer(&self, frame: &mut Frame, area: Rect) {
        let [name_area, amount_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).areas(area);

        frame.render_text_input_widget(
            TextInputWidget::new(&self.buyer.name)
                .title("Your name")
                .placeholder("Name")
                .focused(self.buyer.focus == BuyerField::Name),
            name_area,
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.buyer.amount)
                .title("Your bid (₹)")
                .placeholder("Amount")
                .focused(self.buyer.focus == BuyerField::Amount),
            amount_area,
        );
    }

    fn render_seller(&self, frame: &mut Frame, area: Rect, busy: bool) {
        let [fields_area, photos_area] =
            Layout::vertical([Constraint::Length(12), Constraint::Min(3)]).areas(area);
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(fields_area);

        let rows = |column: Rect| -> [Rect; 4] {
            Layout::vertical([Constraint::Length(3); 4]).areas(column)
        };
        let slots = rows(left).into_iter().chain(rows(right));

        for (field, slot) in SellerField::ALL.into_iter().zip(slots) {
            let mut widget = TextInputWidget::new(self.seller.input(field))
                .title(field.label())
                .placeholder(placeholder(field))
                .focused(self.seller.focus == field)
                .disabled(busy);
            if field == SellerField::Description {
                widget = widget.hint(self.seller.word_count_label());
            }
            frame.render_text_input_widget(widget, slot);
        }

        self.render_photos(frame, photos_area, busy);
    }

    fn render_photos(&self, frame: &mut Frame, area: Rect, busy: bool) {
        let t = theme();
        let mut lines: Vec<Line> = self
            .seller
            .photos
            .iter()
            .enumerate()
            .map(|(i, asset)| {
                Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), t.muted_style()),
                    Span::styled(asset.label().to_string(), t.text_style()),
                ])
            })
            .collect();
        if lines.is_empty() {
            lines.push(Line::styled("No photos yet", t.muted_style()));
        }
        if busy {
            lines.push(Line::styled("Working...", t.emphasis_style()));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style())
            .title(format!(" Photos ({}) ", self.seller.photos.len()));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}

fn submit_buyer(form: &BuyerForm) -> ScreenAction {
    match form.submit() {
        Ok(notice) => ScreenAction::Notify(notice),
        Err(e) => ScreenAction::Notify(e.notice()),
    }
}

fn placeholder(field: SellerField) -> &'static str {
    match field {
        SellerField::Name => "What are you selling?",
        SellerField::Email => "Optional",
        SellerField::Photos => "a.jpg, trips/b.png",
        SellerField::Description => "Up to 100 words",
        SellerField::Location => "Unknown",
        SellerField::Price => "Starting bid",
        SellerField::BidStart | SellerField::BidEnd => "YYYY-MM-DD HH:MM",
    }
}

impl Screen for RoleToggleScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header, content, footer) = create_standard_layout(area, 3, 2);
        Header::render(frame, header, "Choose Role", "Bid on items or list your own")?;

        let [tabs_area, _, pane_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(content);
        self.render_tabs(frame, tabs_area);

        match self.role {
            Role::Buyer => self.render_buyer(frame, pane_area),
            Role::Seller => self.render_seller(frame, pane_area, ctx.busy),
        }

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
        if action == Some(Action::SwitchRole) {
            self.role = self.role.toggled();
            return Ok(ScreenAction::None);
        }

        Ok(match self.role {
            Role::Buyer => self.handle_buyer_key(key, action),
            Role::Seller => self.handle_seller_key(key, action, ctx),
        })
    }

    fn on_outcome(&mut self, outcome: TaskOutcome) -> ScreenAction {
        match outcome {
            TaskOutcome::Captured(Ok(Some(asset))) => self.add_captured(asset),
            other => ScreenAction::from_outcome(other),
        }
    }

    fn footer(&self, keymap: &Keymap) -> String {
        let switch = keymap.hint(Action::SwitchRole, &format!("{} view", self.role.toggled().title()));
        match self.role {
            Role::Buyer => format!(
                "{} | {} | {} | {}",
                switch,
                keymap.hint(Action::NextField, "Next field"),
                keymap.hint(Action::Submit, "Place bid"),
                keymap.hint(Action::Quit, "Quit"),
            ),
            Role::Seller => format!(
                "{} | {} | {} | {} | {} | {}",
                switch,
                keymap.hint(Action::PickPhotos, "Add photos"),
                keymap.hint(Action::TakePhoto, "Camera"),
                keymap.hint(Action::RemovePhoto, "Remove photo"),
                keymap.hint(Action::Submit, "Post"),
                keymap.hint(Action::Quit, "Quit"),
            ),
        }
    }
}
