// src/app/ui.rs — shared card painting for every grid-style view
use eframe::egui as eg;

use crate::app::imaging::ImageSettings;
use crate::app::types::Selection;

pub(crate) mod detail;
pub(crate) mod forms;
pub(crate) mod genres;
pub(crate) mod grid;
pub(crate) mod home;
pub(crate) mod topbar;

pub(crate) const CARD_W: f32 = 150.0;
pub(crate) const CARD_TEXT_H: f32 = 44.0;
pub(crate) const H_SPACING: f32 = 8.0;
pub(crate) const V_SPACING: f32 = 12.0;

/// Frame-local snapshot of one card. Views clone these out of the store
/// before painting so the paint loop can borrow the app mutably for texture
/// uploads.
#[derive(Clone)]
pub(crate) struct Card {
    pub selection: Selection,
    pub caption: String,
    pub image: Option<String>,
    pub is_favorite: bool,
    pub settings: ImageSettings,
}

pub(crate) enum CardAction {
    Select(Selection),
    ToggleFavorite(Selection),
}

impl crate::app::HubApp {
    /// Paint one poster card and return what the user did with it.
    pub(crate) fn ui_paint_card(
        &mut self,
        ui: &mut eg::Ui,
        ctx: &eg::Context,
        card: &Card,
    ) -> Option<CardAction> {
        let card_h = CARD_W * 1.5 + CARD_TEXT_H;
        let mut action = None;

        ui.allocate_ui_with_layout(
            eg::vec2(CARD_W, card_h),
            eg::Layout::top_down(eg::Align::Min),
            |ui| {
                ui.set_min_size(eg::vec2(CARD_W, card_h));
                let rect = ui.max_rect();

                let poster_rect = eg::Rect::from_min_max(
                    rect.min,
                    eg::pos2(rect.min.x + CARD_W, rect.min.y + CARD_W * 1.5),
                );
                let text_rect =
                    eg::Rect::from_min_max(eg::pos2(rect.min.x, poster_rect.max.y), rect.max);

                let id = eg::Id::new(("card", &card.selection));
                if ui.interact(rect, id, eg::Sense::click()).clicked() {
                    action = Some(CardAction::Select(card.selection.clone()));
                }

                let tex = card
                    .image
                    .as_deref()
                    .and_then(|url| self.poster_texture(ctx, url));
                match tex {
                    Some(tex) => {
                        let (u0, v0, u1, v1) = card.settings.uv_window();
                        ui.painter().image(
                            tex.id(),
                            poster_rect,
                            eg::Rect::from_min_max(eg::pos2(u0, v0), eg::pos2(u1, v1)),
                            eg::Color32::WHITE,
                        );
                    }
                    None => {
                        ui.painter()
                            .rect_filled(poster_rect, 6.0, eg::Color32::from_gray(40));
                    }
                }

                // Favorite heart, top-right of the poster.
                let heart = if card.is_favorite { "♥" } else { "♡" };
                let heart_rect = eg::Rect::from_min_size(
                    eg::pos2(poster_rect.right() - 28.0, poster_rect.top() + 4.0),
                    eg::vec2(24.0, 24.0),
                );
                let heart_resp = ui.put(
                    heart_rect,
                    eg::Button::new(eg::RichText::new(heart).size(16.0)).frame(false),
                );
                if heart_resp.clicked() {
                    action = Some(CardAction::ToggleFavorite(card.selection.clone()));
                }

                if self.selected.as_ref() == Some(&card.selection) {
                    ui.painter().rect_stroke(
                        rect.shrink(1.0),
                        6.0,
                        eg::Stroke::new(2.0, ui.visuals().selection.bg_fill),
                    );
                }

                ui.allocate_ui_at_rect(text_rect, |ui| {
                    ui.add(eg::Label::new(eg::RichText::new(&card.caption).size(13.0)).wrap());
                });
            },
        );

        action
    }

    /// Wrapped grid of cards, centered in the available width.
    pub(crate) fn ui_paint_card_grid(
        &mut self,
        ui: &mut eg::Ui,
        ctx: &eg::Context,
        cards: &[Card],
    ) -> Vec<CardAction> {
        let mut actions = Vec::new();

        let avail = ui.available_width();
        let cols = ((avail + H_SPACING) / (CARD_W + H_SPACING)).floor().max(1.0) as usize;
        let used = cols as f32 * CARD_W + cols.saturating_sub(1) as f32 * H_SPACING;
        let left_pad = ((avail - used) * 0.5).max(0.0);
        if left_pad > 0.0 {
            ui.add_space(left_pad);
        }

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = eg::vec2(H_SPACING, V_SPACING);
            for (col, card) in cards.iter().enumerate() {
                if col > 0 && col % cols == 0 {
                    ui.end_row();
                }
                if let Some(action) = self.ui_paint_card(ui, ctx, card) {
                    actions.push(action);
                }
            }
            ui.end_row();
        });

        actions
    }

    /// One horizontally scrolling row of cards (home view sections).
    pub(crate) fn ui_paint_card_row(
        &mut self,
        ui: &mut eg::Ui,
        ctx: &eg::Context,
        row_id: &str,
        cards: &[Card],
    ) -> Vec<CardAction> {
        let mut actions = Vec::new();
        eg::ScrollArea::horizontal()
            .id_source(row_id)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = eg::vec2(H_SPACING, V_SPACING);
                    for card in cards {
                        if let Some(action) = self.ui_paint_card(ui, ctx, card) {
                            actions.push(action);
                        }
                    }
                });
            });
        actions
    }

    pub(crate) fn apply_card_actions(&mut self, actions: Vec<CardAction>) {
        for action in actions {
            match action {
                CardAction::Select(sel) => self.selected = Some(sel),
                CardAction::ToggleFavorite(Selection::Movie(id)) => {
                    self.start_toggle_movie_favorite(id)
                }
                CardAction::ToggleFavorite(Selection::Actor(id)) => {
                    self.start_toggle_actor_favorite(id)
                }
            }
        }
    }

    pub(crate) fn movie_card(&self, movie: &crate::app::data::Movie) -> Card {
        Card {
            selection: Selection::Movie(movie.id.clone()),
            caption: crate::app::utils::movie_caption(movie),
            image: movie.image.clone(),
            is_favorite: movie.is_favorite,
            settings: self.movie_transforms.get(&movie.id),
        }
    }

    pub(crate) fn actor_card(&self, actor: &crate::app::data::Actor) -> Card {
        Card {
            selection: Selection::Actor(actor.id.clone()),
            caption: crate::app::utils::actor_caption(actor),
            image: actor.image.clone(),
            is_favorite: actor.is_favorite,
            settings: actor.image_settings.unwrap_or_default(),
        }
    }
}
