// src/app/ui/topbar.rs — nav, live search and the session corner
use eframe::egui as eg;

use crate::app::types::{Route, Selection};
use crate::app::ui::forms::LoginForm;

const SEARCH_DROPDOWN_PER_KIND: usize = 3;

impl crate::app::HubApp {
    pub(crate) fn ui_render_header(&mut self, ui: &mut eg::Ui) {
        ui.horizontal(|ui| {
            ui.heading("MovieHub");
            ui.separator();

            for route in Route::ALL {
                // Genre management is an admin-only destination.
                if route == Route::Genres && !self.session.is_admin() {
                    continue;
                }
                if ui
                    .selectable_label(self.route == route, route.label())
                    .clicked()
                {
                    self.navigate(route);
                }
            }

            ui.separator();
            self.ui_render_search_box(ui);

            ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                match self.session.user().cloned() {
                    Some(user) => {
                        if ui.button("Sign out").clicked() {
                            self.logout();
                        }
                        ui.label(format!("Admin: {}", user.username));
                    }
                    None => {
                        if self.session.is_authenticating() {
                            ui.add(eg::Spinner::new().size(12.0));
                        } else if ui.button("Sign in").clicked() {
                            self.login_form = Some(LoginForm::default());
                        }
                    }
                }
            });
        });
    }

    pub(crate) fn navigate(&mut self, route: Route) {
        if self.route == route {
            return;
        }
        self.route = route;
        self.mark_dirty();
        match route {
            Route::Home => self.start_home_fetch(),
            Route::Favorites => self.start_favorites_fetch(),
            _ => {}
        }
    }

    /// Header search fires on every keystroke; the dropdown shows the top
    /// matches of each kind and jumps straight to the detail panel.
    fn ui_render_search_box(&mut self, ui: &mut eg::Ui) {
        let resp = ui.add(
            eg::TextEdit::singleline(&mut self.search_query)
                .hint_text("Search movies and actors…")
                .desired_width(220.0),
        );

        if resp.changed() {
            let query = self.search_query.clone();
            if query.trim().is_empty() {
                // Nothing is wanted anymore; any in-flight response is stale.
                self.search_results = None;
                self.search_in_flight = false;
            } else {
                self.start_search(query);
            }
        }

        let Some(results) = self.search_results.clone() else {
            return;
        };
        if self.search_query.trim().is_empty() {
            return;
        }

        let mut picked: Option<Selection> = None;
        eg::Area::new(eg::Id::new("header_search_results"))
            .order(eg::Order::Foreground)
            .fixed_pos(resp.rect.left_bottom() + eg::vec2(0.0, 4.0))
            .show(ui.ctx(), |ui| {
                eg::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(220.0);
                    if results.movies.is_empty() && results.actors.is_empty() {
                        ui.weak("No results");
                        return;
                    }
                    if !results.movies.is_empty() {
                        ui.label(eg::RichText::new("Movies").strong());
                        for movie in results.movies.iter().take(SEARCH_DROPDOWN_PER_KIND) {
                            if ui.selectable_label(false, &movie.title).clicked() {
                                picked = Some(Selection::Movie(movie.id.clone()));
                            }
                        }
                    }
                    if !results.actors.is_empty() {
                        ui.label(eg::RichText::new("Actors").strong());
                        for actor in results.actors.iter().take(SEARCH_DROPDOWN_PER_KIND) {
                            if ui.selectable_label(false, &actor.name).clicked() {
                                picked = Some(Selection::Actor(actor.id.clone()));
                            }
                        }
                    }
                });
            });

        if let Some(sel) = picked {
            self.selected = Some(sel);
            self.search_query.clear();
            self.search_results = None;
        }
    }
}
