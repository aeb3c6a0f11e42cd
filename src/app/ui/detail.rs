// src/app/ui/detail.rs — right-hand detail panel for the selected entity
//
// Movie transforms are adjusted locally and immediately. Actor transforms go
// through the server first; the panel keeps showing the last confirmed state
// until the save lands.
use eframe::egui as eg;

use crate::app::imaging::{ImageSettings, Nudge};
use crate::app::lookup;
use crate::app::types::Selection;
use crate::app::ui::forms::{ActorForm, MovieForm};
use crate::app::utils;

const DETAIL_POSTER_W: f32 = 240.0;

enum TransformAction {
    Nudge(Nudge),
    Reset,
}

fn transform_controls(ui: &mut eg::Ui, settings: ImageSettings) -> Option<TransformAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        if ui.button("−").on_hover_text("Zoom out").clicked() {
            action = Some(TransformAction::Nudge(Nudge::ZoomOut));
        }
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            action = Some(TransformAction::Nudge(Nudge::ZoomIn));
        }
        ui.separator();
        if ui.button("←").clicked() {
            action = Some(TransformAction::Nudge(Nudge::PanLeft));
        }
        if ui.button("→").clicked() {
            action = Some(TransformAction::Nudge(Nudge::PanRight));
        }
        if ui.button("↑").clicked() {
            action = Some(TransformAction::Nudge(Nudge::PanUp));
        }
        if ui.button("↓").clicked() {
            action = Some(TransformAction::Nudge(Nudge::PanDown));
        }
        ui.separator();
        if settings != ImageSettings::default() && ui.small_button("Reset").clicked() {
            action = Some(TransformAction::Reset);
        }
    });
    ui.weak(format!(
        "Zoom {}%, position {}/{}",
        settings.scale, settings.position_x, settings.position_y
    ));
    action
}

impl crate::app::HubApp {
    pub(crate) fn ui_render_detail(&mut self, ui: &mut eg::Ui, ctx: &eg::Context) {
        let Some(selection) = self.selected.clone() else {
            return;
        };

        ui.horizontal(|ui| {
            if ui.button("✕ Close").clicked() {
                self.selected = None;
            }
        });
        ui.separator();
        if self.selected.is_none() {
            return;
        }

        match selection {
            Selection::Movie(id) => self.ui_render_movie_detail(ui, ctx, &id),
            Selection::Actor(id) => self.ui_render_actor_detail(ui, ctx, &id),
        }
    }

    fn ui_paint_detail_poster(
        &mut self,
        ui: &mut eg::Ui,
        ctx: &eg::Context,
        image: Option<&str>,
        settings: ImageSettings,
    ) {
        let (rect, _) = ui.allocate_exact_size(
            eg::vec2(DETAIL_POSTER_W, DETAIL_POSTER_W * 1.5),
            eg::Sense::hover(),
        );
        let tex = image.and_then(|url| self.poster_texture(ctx, url));
        match tex {
            Some(tex) => {
                let (u0, v0, u1, v1) = settings.uv_window();
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
    }

    fn ui_render_movie_detail(&mut self, ui: &mut eg::Ui, ctx: &eg::Context, id: &str) {
        let Some(movie) = self.store.movie_by_id(id).cloned() else {
            ui.weak("This movie is no longer in the catalog.");
            return;
        };

        eg::ScrollArea::vertical().show(ui, |ui| {
            let settings = self.movie_transforms.get(id);
            self.ui_paint_detail_poster(ui, ctx, movie.image.as_deref(), settings);
            match transform_controls(ui, settings) {
                Some(TransformAction::Nudge(n)) => {
                    self.movie_transforms.adjust(id, n);
                }
                Some(TransformAction::Reset) => self.movie_transforms.reset(id),
                None => {}
            }
            ui.separator();

            ui.heading(&movie.title);
            ui.label(format!("Duration: {}", utils::format_duration(movie.duration)));
            if !movie.genres.is_empty() {
                let names: Vec<String> = movie
                    .genres
                    .iter()
                    .map(|gid| {
                        lookup::genre_label(
                            &self.store.movie_genres,
                            &self.store.movie_genre_index,
                            gid,
                        )
                    })
                    .collect();
                ui.label(format!("Genres: {}", names.join(", ")));
            }
            if let Some(desc) = &movie.description {
                ui.add_space(4.0);
                ui.label(desc);
            }

            if !movie.actors.is_empty() {
                ui.add_space(6.0);
                ui.label(eg::RichText::new("Cast").strong());
                for actor_id in &movie.actors {
                    let name = lookup::actor_label(
                        &self.store.actors,
                        &self.store.actor_index,
                        actor_id,
                    );
                    // Dangling references stay visible but go nowhere.
                    if self.store.actor_index.contains(actor_id) {
                        if ui.link(&name).clicked() {
                            self.selected = Some(Selection::Actor(actor_id.clone()));
                        }
                    } else {
                        ui.weak(name);
                    }
                }
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let heart = if movie.is_favorite {
                    "♥ Unfavorite"
                } else {
                    "♡ Favorite"
                };
                if ui.button(heart).clicked() {
                    self.start_toggle_movie_favorite(movie.id.clone());
                }
                if ui.button("▶ Watch").clicked() {
                    self.watch_movie(&movie);
                }
            });

            if self.session.is_admin() {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Edit").clicked() {
                        self.movie_form = Some(MovieForm::from_movie(&movie));
                    }
                    if ui.button("Delete").clicked() {
                        self.selected = None;
                        self.start_delete_movie(movie.id.clone());
                    }
                });
            }
        });
    }

    fn ui_render_actor_detail(&mut self, ui: &mut eg::Ui, ctx: &eg::Context, id: &str) {
        let Some(actor) = self.store.actor_by_id(id).cloned() else {
            ui.weak("This actor is no longer in the catalog.");
            return;
        };

        eg::ScrollArea::vertical().show(ui, |ui| {
            let settings = actor.image_settings.unwrap_or_default();
            self.ui_paint_detail_poster(ui, ctx, actor.image.as_deref(), settings);
            if self.session.is_admin() {
                match transform_controls(ui, settings) {
                    Some(TransformAction::Nudge(n)) => {
                        self.start_actor_image_patch(actor.id.clone(), settings.nudged(n));
                    }
                    Some(TransformAction::Reset) => {
                        self.start_actor_image_patch(actor.id.clone(), ImageSettings::default());
                    }
                    None => {}
                }
            }
            ui.separator();

            ui.heading(&actor.name);
            ui.label(utils::format_age(actor.age));
            if !actor.genres.is_empty() {
                let names: Vec<String> = actor
                    .genres
                    .iter()
                    .map(|gid| {
                        lookup::genre_label(
                            &self.store.actor_genres,
                            &self.store.actor_genre_index,
                            gid,
                        )
                    })
                    .collect();
                ui.label(format!("Genres: {}", names.join(", ")));
            }
            if let Some(desc) = &actor.description {
                ui.add_space(4.0);
                ui.label(desc);
            }

            if !actor.movies.is_empty() {
                ui.add_space(6.0);
                ui.label(eg::RichText::new("Filmography").strong());
                for movie_id in &actor.movies {
                    let title = lookup::movie_label(
                        &self.store.movies,
                        &self.store.movie_index,
                        movie_id,
                    );
                    if self.store.movie_index.contains(movie_id) {
                        if ui.link(&title).clicked() {
                            self.selected = Some(Selection::Movie(movie_id.clone()));
                        }
                    } else {
                        ui.weak(title);
                    }
                }
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let heart = if actor.is_favorite {
                    "♥ Unfavorite"
                } else {
                    "♡ Favorite"
                };
                if ui.button(heart).clicked() {
                    self.start_toggle_actor_favorite(actor.id.clone());
                }
            });

            if self.session.is_admin() {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Edit").clicked() {
                        self.actor_form = Some(ActorForm::from_actor(&actor));
                    }
                    if ui.button("Delete").clicked() {
                        self.selected = None;
                        self.start_delete_actor(actor.id.clone());
                    }
                });
            }
        });
    }
}
