// src/app/ui/genres.rs — genre management view, split by namespace
use eframe::egui as eg;
use egui_extras::{Column, TableBuilder};

use crate::app::data::GenreKind;
use crate::app::types::Route;
use crate::app::ui::forms::GenreForm;

impl crate::app::HubApp {
    pub(crate) fn ui_render_genres(&mut self, ui: &mut eg::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Genres");
            if self.session.is_admin() && ui.button("Add genre").clicked() {
                self.genre_form = Some(GenreForm::new(self.genre_tab));
            }
        });

        ui.horizontal(|ui| {
            let mut changed = false;
            changed |= ui
                .selectable_value(&mut self.genre_tab, GenreKind::Movie, "Movie genres")
                .clicked();
            changed |= ui
                .selectable_value(&mut self.genre_tab, GenreKind::Actor, "Actor genres")
                .clicked();
            if changed {
                self.mark_dirty();
            }
        });
        ui.separator();

        let genres = match self.genre_tab {
            GenreKind::Movie => self.store.movie_genres.clone(),
            GenreKind::Actor => self.store.actor_genres.clone(),
        };
        if genres.is_empty() {
            ui.weak(if self.catalog_loaded {
                "No genres in this namespace yet."
            } else {
                "Loading genres…"
            });
            return;
        }

        let is_admin = self.session.is_admin();
        let mut open_movies_for: Option<String> = None;
        let mut edit: Option<GenreForm> = None;
        let mut delete: Option<String> = None;

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder())
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(if is_admin { 110.0 } else { 0.0 }))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.label(eg::RichText::new("Name").strong());
                });
                header.col(|ui| {
                    ui.label(eg::RichText::new("Used by").strong());
                });
                header.col(|_ui| {});
            })
            .body(|mut body| {
                for genre in &genres {
                    let count = match self.genre_tab {
                        GenreKind::Movie => self
                            .store
                            .movies
                            .iter()
                            .filter(|m| m.genres.iter().any(|g| g == &genre.id))
                            .count(),
                        GenreKind::Actor => self
                            .store
                            .actors
                            .iter()
                            .filter(|a| a.genres.iter().any(|g| g == &genre.id))
                            .count(),
                    };
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            // Movie genres double as a shortcut into the
                            // filtered movie list.
                            if self.genre_tab == GenreKind::Movie {
                                if ui.link(&genre.name).clicked() {
                                    open_movies_for = Some(genre.id.clone());
                                }
                            } else {
                                ui.label(&genre.name);
                            }
                        });
                        row.col(|ui| {
                            ui.label(count.to_string());
                        });
                        row.col(|ui| {
                            if is_admin {
                                if ui.small_button("Edit").clicked() {
                                    edit = Some(GenreForm::from_genre(genre));
                                }
                                if ui.small_button("Delete").clicked() {
                                    delete = Some(genre.id.clone());
                                }
                            }
                        });
                    });
                }
            });

        if let Some(genre_id) = open_movies_for {
            self.movie_filters.genre_id = Some(genre_id);
            self.navigate(Route::Movies);
            self.mark_dirty();
        }
        if let Some(form) = edit {
            self.genre_form = Some(form);
        }
        if let Some(id) = delete {
            self.start_delete_genre(id);
        }
    }
}
