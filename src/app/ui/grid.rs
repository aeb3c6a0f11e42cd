// src/app/ui/grid.rs — movies, actors and favorites list views
use eframe::egui as eg;
use itertools::Itertools;

use crate::app::filters::{
    filtered_actor_indices, filtered_movie_indices, AgeFilter, DurationFilter, FilmographyFilter,
};
use crate::app::ui::forms::{ActorForm, MovieForm};
use crate::app::ui::Card;

/// Placeholder for an empty grid: a reload in flight reads as loading, a
/// loaded catalog as an over-narrow filter, and anything else as a failed
/// load whose error sits in the status line.
fn empty_grid_message(
    loading: bool,
    loaded: bool,
    loading_msg: &'static str,
    filtered_msg: &'static str,
) -> &'static str {
    if loading {
        loading_msg
    } else if loaded {
        filtered_msg
    } else {
        "The catalog could not be loaded. See the status line below."
    }
}

impl crate::app::HubApp {
    pub(crate) fn ui_render_movies(&mut self, ui: &mut eg::Ui, ctx: &eg::Context) {
        ui.horizontal(|ui| {
            ui.heading("Movies");
            if self.session.is_admin() && ui.button("Add movie").clicked() {
                self.movie_form = Some(MovieForm::default());
            }
        });
        self.ui_render_movie_filter_bar(ui);
        ui.separator();

        let indices = filtered_movie_indices(
            &self.store.movies,
            &self.store.actors,
            &self.store.actor_index,
            &self.movie_filters,
        );
        if indices.is_empty() {
            ui.weak(empty_grid_message(
                self.catalog_loading,
                self.catalog_loaded,
                "Loading movies…",
                "No movies match the current filters.",
            ));
            return;
        }

        let cards: Vec<Card> = indices
            .iter()
            .map(|&i| self.movie_card(&self.store.movies[i]))
            .collect();
        let actions = eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| self.ui_paint_card_grid(ui, ctx, &cards))
            .inner;
        self.apply_card_actions(actions);
    }

    fn ui_render_movie_filter_bar(&mut self, ui: &mut eg::Ui) {
        ui.horizontal(|ui| {
            let resp = ui.add(
                eg::TextEdit::singleline(&mut self.movie_filters.query)
                    .hint_text("Filter by title, description or actor…")
                    .desired_width(220.0),
            );
            if resp.changed() {
                self.mark_dirty();
            }

            let mut changed = false;
            eg::ComboBox::from_id_source("movie_duration_combo")
                .selected_text(self.movie_filters.duration.label())
                .show_ui(ui, |ui| {
                    for d in DurationFilter::ALL {
                        if ui
                            .selectable_value(&mut self.movie_filters.duration, d, d.label())
                            .clicked()
                        {
                            changed = true;
                        }
                    }
                });

            // Reference combos sort by display name; ids stay the selection.
            let actor_options: Vec<(String, String)> = self
                .store
                .actors
                .iter()
                .map(|a| (a.id.clone(), a.name.clone()))
                .sorted_by(|a, b| a.1.cmp(&b.1))
                .collect();
            let selected_actor = self
                .movie_filters
                .actor_id
                .as_deref()
                .map(|id| {
                    crate::app::lookup::actor_label(
                        &self.store.actors,
                        &self.store.actor_index,
                        id,
                    )
                })
                .unwrap_or_else(|| "All actors".to_string());
            eg::ComboBox::from_id_source("movie_actor_combo")
                .selected_text(selected_actor)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_value(&mut self.movie_filters.actor_id, None, "All actors")
                        .clicked()
                    {
                        changed = true;
                    }
                    for (id, name) in &actor_options {
                        if ui
                            .selectable_value(
                                &mut self.movie_filters.actor_id,
                                Some(id.clone()),
                                name,
                            )
                            .clicked()
                        {
                            changed = true;
                        }
                    }
                });

            let genre_options: Vec<(String, String)> = self
                .store
                .movie_genres
                .iter()
                .map(|g| (g.id.clone(), g.name.clone()))
                .sorted_by(|a, b| a.1.cmp(&b.1))
                .collect();
            let selected_genre = self
                .movie_filters
                .genre_id
                .as_deref()
                .map(|id| {
                    crate::app::lookup::genre_label(
                        &self.store.movie_genres,
                        &self.store.movie_genre_index,
                        id,
                    )
                })
                .unwrap_or_else(|| "All genres".to_string());
            eg::ComboBox::from_id_source("movie_genre_combo")
                .selected_text(selected_genre)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_value(&mut self.movie_filters.genre_id, None, "All genres")
                        .clicked()
                    {
                        changed = true;
                    }
                    for (id, name) in &genre_options {
                        if ui
                            .selectable_value(
                                &mut self.movie_filters.genre_id,
                                Some(id.clone()),
                                name,
                            )
                            .clicked()
                        {
                            changed = true;
                        }
                    }
                });

            if !self.movie_filters.is_default() && ui.small_button("Clear filters").clicked() {
                self.movie_filters.clear();
                changed = true;
            }
            if changed {
                self.mark_dirty();
            }
        });
    }

    pub(crate) fn ui_render_actors(&mut self, ui: &mut eg::Ui, ctx: &eg::Context) {
        ui.horizontal(|ui| {
            ui.heading("Actors");
            if self.session.is_admin() && ui.button("Add actor").clicked() {
                self.actor_form = Some(ActorForm::default());
            }
        });
        ui.horizontal(|ui| {
            let resp = ui.add(
                eg::TextEdit::singleline(&mut self.actor_filters.query)
                    .hint_text("Filter by name, description or movie…")
                    .desired_width(220.0),
            );
            if resp.changed() {
                self.mark_dirty();
            }

            let mut changed = false;
            eg::ComboBox::from_id_source("actor_age_combo")
                .selected_text(self.actor_filters.age.label())
                .show_ui(ui, |ui| {
                    for a in AgeFilter::ALL {
                        if ui
                            .selectable_value(&mut self.actor_filters.age, a, a.label())
                            .clicked()
                        {
                            changed = true;
                        }
                    }
                });
            eg::ComboBox::from_id_source("actor_filmography_combo")
                .selected_text(self.actor_filters.filmography.label())
                .show_ui(ui, |ui| {
                    for f in FilmographyFilter::ALL {
                        if ui
                            .selectable_value(&mut self.actor_filters.filmography, f, f.label())
                            .clicked()
                        {
                            changed = true;
                        }
                    }
                });

            if !self.actor_filters.is_default() && ui.small_button("Clear filters").clicked() {
                self.actor_filters.clear();
                changed = true;
            }
            if changed {
                self.mark_dirty();
            }
        });
        ui.separator();

        let indices = filtered_actor_indices(
            &self.store.actors,
            &self.store.movies,
            &self.store.movie_index,
            &self.actor_filters,
        );
        if indices.is_empty() {
            ui.weak(empty_grid_message(
                self.catalog_loading,
                self.catalog_loaded,
                "Loading actors…",
                "No actors match the current filters.",
            ));
            return;
        }

        let cards: Vec<Card> = indices
            .iter()
            .map(|&i| self.actor_card(&self.store.actors[i]))
            .collect();
        let actions = eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| self.ui_paint_card_grid(ui, ctx, &cards))
            .inner;
        self.apply_card_actions(actions);
    }

    pub(crate) fn ui_render_favorites(&mut self, ui: &mut eg::Ui, ctx: &eg::Context) {
        ui.heading("Favorites");
        ui.separator();

        let Some(favorites) = self.favorites_view.clone() else {
            ui.weak(if self.favorites_loading {
                "Loading favorites…"
            } else {
                "Favorites not loaded yet."
            });
            return;
        };

        if favorites.movies.is_empty() && favorites.actors.is_empty() {
            ui.weak("Nothing favorited yet. Tap the heart on any card.");
            return;
        }

        let movie_cards: Vec<Card> = favorites.movies.iter().map(|m| self.movie_card(m)).collect();
        let actor_cards: Vec<Card> = favorites.actors.iter().map(|a| self.actor_card(a)).collect();

        let mut actions = Vec::new();
        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                if !movie_cards.is_empty() {
                    ui.label(eg::RichText::new("Movies").strong());
                    actions.extend(self.ui_paint_card_grid(ui, ctx, &movie_cards));
                    ui.add_space(8.0);
                }
                if !actor_cards.is_empty() {
                    ui.label(eg::RichText::new("Actors").strong());
                    actions.extend(self.ui_paint_card_grid(ui, ctx, &actor_cards));
                }
            });
        self.apply_card_actions(actions);
    }
}

#[cfg(test)]
mod tests {
    use super::empty_grid_message;

    #[test]
    fn empty_grid_distinguishes_loading_from_a_failed_load() {
        let msg = |loading, loaded| {
            empty_grid_message(loading, loaded, "Loading movies…", "No movies match.")
        };
        assert_eq!(msg(true, false), "Loading movies…");
        assert_eq!(msg(false, true), "No movies match.");
        // First load failed: nothing in flight, nothing ever committed.
        assert_eq!(
            msg(false, false),
            "The catalog could not be loaded. See the status line below."
        );
    }
}
