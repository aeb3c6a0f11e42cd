// src/app/ui/home.rs — landing view: featured banner + curated rows
use eframe::egui as eg;

use crate::app::types::Selection;
use crate::app::ui::Card;
use crate::app::utils;

impl crate::app::HubApp {
    pub(crate) fn ui_render_home(&mut self, ui: &mut eg::Ui, ctx: &eg::Context) {
        if self.home.is_none() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                if self.home_loading {
                    ui.add(eg::Spinner::new().size(24.0));
                    ui.label("Loading the home page…");
                } else {
                    ui.label("Home page not loaded.");
                    if ui.button("Retry").clicked() {
                        self.start_home_fetch();
                    }
                }
            });
            return;
        }
        let Some(home) = &self.home else {
            return;
        };

        let featured = home.featured.clone();
        let recent: Vec<Card> = home.recent.iter().map(|m| self.movie_card(m)).collect();
        let favorites: Vec<Card> = home.favorites.iter().map(|m| self.movie_card(m)).collect();
        let genre_rows: Vec<(String, Vec<Card>)> = home
            .genre_rows
            .iter()
            .map(|(genre, movies)| {
                (
                    genre.name.clone(),
                    movies.iter().map(|m| self.movie_card(m)).collect(),
                )
            })
            .collect();

        let mut actions = Vec::new();
        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                if let Some(movie) = &featured {
                    self.ui_render_featured_banner(ui, ctx, movie);
                    ui.add_space(12.0);
                }

                if !recent.is_empty() {
                    ui.heading("Recently added");
                    actions.extend(self.ui_paint_card_row(ui, ctx, "home_recent", &recent));
                    ui.add_space(12.0);
                }

                if !favorites.is_empty() {
                    ui.heading("Favorite movies");
                    actions.extend(self.ui_paint_card_row(ui, ctx, "home_favorites", &favorites));
                    ui.add_space(12.0);
                }

                for (name, cards) in &genre_rows {
                    if cards.is_empty() {
                        continue;
                    }
                    ui.heading(name);
                    actions.extend(self.ui_paint_card_row(
                        ui,
                        ctx,
                        &format!("home_genre_{name}"),
                        cards,
                    ));
                    ui.add_space(12.0);
                }
            });
        self.apply_card_actions(actions);
    }

    fn ui_render_featured_banner(
        &mut self,
        ui: &mut eg::Ui,
        ctx: &eg::Context,
        movie: &crate::app::data::Movie,
    ) {
        let mut watch = false;
        eg::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                let banner_w = 180.0;
                let banner_h = banner_w * 1.5;
                let (rect, _) =
                    ui.allocate_exact_size(eg::vec2(banner_w, banner_h), eg::Sense::hover());
                let tex = movie
                    .image
                    .as_deref()
                    .and_then(|url| self.poster_texture(ctx, url));
                match tex {
                    Some(tex) => {
                        let (u0, v0, u1, v1) = self.movie_transforms.get(&movie.id).uv_window();
                        ui.painter().image(
                            tex.id(),
                            rect,
                            eg::Rect::from_min_max(eg::pos2(u0, v0), eg::pos2(u1, v1)),
                            eg::Color32::WHITE,
                        );
                    }
                    None => {
                        ui.painter().rect_filled(rect, 6.0, eg::Color32::from_gray(40));
                    }
                }

                ui.vertical(|ui| {
                    ui.label(eg::RichText::new("Featured").small().weak());
                    ui.heading(&movie.title);
                    ui.label(utils::format_duration(movie.duration));
                    if let Some(desc) = &movie.description {
                        ui.add_space(4.0);
                        ui.label(utils::clip_label(desc, 280));
                    }
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Details").clicked() {
                            self.selected = Some(Selection::Movie(movie.id.clone()));
                        }
                        if ui.button("▶ Watch").clicked() {
                            watch = true;
                        }
                    });
                });
            });
        });
        if watch {
            self.watch_movie(movie);
        }
    }
}
