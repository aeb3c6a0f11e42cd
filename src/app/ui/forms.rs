// src/app/ui/forms.rs — modal windows for sign-in and admin editing
//
// Each form owns its draft text fields and validates on submit; validation
// errors render inline and nothing is sent until the draft parses.
use eframe::egui as eg;

use crate::app::data::{Actor, ActorDraft, Genre, GenreDraft, GenreKind, Movie, MovieDraft};

#[derive(Default)]
pub(crate) struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

pub(crate) struct MovieForm {
    pub id: Option<String>,
    pub title: String,
    pub url: String,
    pub image: String,
    pub description: String,
    pub duration_text: String,
    pub actor_ids: Vec<String>,
    pub genre_ids: Vec<String>,
    pub error: Option<String>,
}

impl Default for MovieForm {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            url: String::new(),
            image: String::new(),
            description: String::new(),
            duration_text: String::new(),
            actor_ids: Vec::new(),
            genre_ids: Vec::new(),
            error: None,
        }
    }
}

fn opt_text(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

fn parse_positive(field: &str, text: &str) -> Result<Option<i32>, String> {
    let t = text.trim();
    if t.is_empty() {
        return Ok(None);
    }
    match t.parse::<i32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(format!("{field} must be a positive whole number.")),
    }
}

impl MovieForm {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            id: Some(movie.id.clone()),
            title: movie.title.clone(),
            url: movie.url.clone().unwrap_or_default(),
            image: movie.image.clone().unwrap_or_default(),
            description: movie.description.clone().unwrap_or_default(),
            duration_text: movie.duration.map(|d| d.to_string()).unwrap_or_default(),
            actor_ids: movie.actors.clone(),
            genre_ids: movie.genres.clone(),
            error: None,
        }
    }

    pub fn to_draft(&self) -> Result<MovieDraft, String> {
        if self.title.trim().is_empty() {
            return Err("Title is required.".to_string());
        }
        Ok(MovieDraft {
            title: self.title.trim().to_string(),
            url: opt_text(&self.url),
            image: opt_text(&self.image),
            description: opt_text(&self.description),
            duration: parse_positive("Duration", &self.duration_text)?,
            actors: self.actor_ids.clone(),
            genres: self.genre_ids.clone(),
        })
    }
}

pub(crate) struct ActorForm {
    pub id: Option<String>,
    pub name: String,
    pub age_text: String,
    pub image: String,
    pub description: String,
    pub movie_ids: Vec<String>,
    pub genre_ids: Vec<String>,
    pub error: Option<String>,
}

impl Default for ActorForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            age_text: String::new(),
            image: String::new(),
            description: String::new(),
            movie_ids: Vec::new(),
            genre_ids: Vec::new(),
            error: None,
        }
    }
}

impl ActorForm {
    pub fn from_actor(actor: &Actor) -> Self {
        Self {
            id: Some(actor.id.clone()),
            name: actor.name.clone(),
            age_text: actor.age.map(|a| a.to_string()).unwrap_or_default(),
            image: actor.image.clone().unwrap_or_default(),
            description: actor.description.clone().unwrap_or_default(),
            movie_ids: actor.movies.clone(),
            genre_ids: actor.genres.clone(),
            error: None,
        }
    }

    pub fn to_draft(&self) -> Result<ActorDraft, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required.".to_string());
        }
        Ok(ActorDraft {
            name: self.name.trim().to_string(),
            age: parse_positive("Age", &self.age_text)?,
            image: opt_text(&self.image),
            description: opt_text(&self.description),
            movies: self.movie_ids.clone(),
            genres: self.genre_ids.clone(),
        })
    }
}

pub(crate) struct GenreForm {
    pub id: Option<String>,
    pub name: String,
    pub kind: GenreKind,
    pub error: Option<String>,
}

impl GenreForm {
    pub fn new(kind: GenreKind) -> Self {
        Self {
            id: None,
            name: String::new(),
            kind,
            error: None,
        }
    }

    pub fn from_genre(genre: &Genre) -> Self {
        Self {
            id: Some(genre.id.clone()),
            name: genre.name.clone(),
            kind: genre.kind,
            error: None,
        }
    }

    pub fn to_draft(&self) -> Result<GenreDraft, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required.".to_string());
        }
        Ok(GenreDraft {
            name: self.name.trim().to_string(),
            kind: self.kind,
        })
    }
}

fn toggle_membership(ids: &mut Vec<String>, id: &str, include: bool) {
    if include {
        if !ids.iter().any(|x| x == id) {
            ids.push(id.to_string());
        }
    } else {
        ids.retain(|x| x != id);
    }
}

impl crate::app::HubApp {
    pub(crate) fn ui_render_login_window(&mut self, ctx: &eg::Context) {
        let Some(mut form) = self.login_form.take() else {
            return;
        };
        let mut keep = true;
        let mut submit = false;

        eg::Window::new("Sign in")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add(
                    eg::TextEdit::singleline(&mut form.username)
                        .hint_text("Username")
                        .desired_width(200.0),
                );
                ui.add(
                    eg::TextEdit::singleline(&mut form.password)
                        .hint_text("Password")
                        .password(true)
                        .desired_width(200.0),
                );
                if let Some(err) = &form.error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                }
                ui.horizontal(|ui| {
                    let busy = self.session.is_authenticating();
                    if busy {
                        ui.add(eg::Spinner::new().size(12.0));
                    } else if ui.button("Sign in").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        keep = false;
                    }
                });
            });

        if submit {
            match self.session.begin_login(&form.username, &form.password) {
                Ok(()) => {
                    form.error = None;
                    self.start_login(form.username.clone(), form.password.clone());
                }
                Err(msg) => form.error = Some(msg),
            }
        }
        if keep {
            self.login_form = Some(form);
        }
    }

    pub(crate) fn ui_render_movie_form(&mut self, ctx: &eg::Context) {
        let Some(mut form) = self.movie_form.take() else {
            return;
        };
        let mut keep = true;
        let mut submit = false;
        let title = if form.id.is_some() {
            "Edit movie"
        } else {
            "New movie"
        };

        eg::Window::new(title)
            .collapsible(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                eg::Grid::new("movie_form_grid")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Title");
                        ui.text_edit_singleline(&mut form.title);
                        ui.end_row();
                        ui.label("Watch URL");
                        ui.text_edit_singleline(&mut form.url);
                        ui.end_row();
                        ui.label("Image URL");
                        ui.text_edit_singleline(&mut form.image);
                        ui.end_row();
                        ui.label("Duration (min)");
                        ui.text_edit_singleline(&mut form.duration_text);
                        ui.end_row();
                        ui.label("Description");
                        ui.text_edit_multiline(&mut form.description);
                        ui.end_row();
                    });

                ui.collapsing("Cast", |ui| {
                    for actor in &self.store.actors {
                        let mut included = form.actor_ids.iter().any(|id| id == &actor.id);
                        if ui.checkbox(&mut included, &actor.name).changed() {
                            toggle_membership(&mut form.actor_ids, &actor.id, included);
                        }
                    }
                });
                ui.collapsing("Genres", |ui| {
                    for genre in &self.store.movie_genres {
                        let mut included = form.genre_ids.iter().any(|id| id == &genre.id);
                        if ui.checkbox(&mut included, &genre.name).changed() {
                            toggle_membership(&mut form.genre_ids, &genre.id, included);
                        }
                    }
                });

                if let Some(err) = &form.error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                }
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        keep = false;
                    }
                });
            });

        if submit {
            match form.to_draft() {
                Ok(draft) => {
                    self.start_save_movie(form.id.clone(), draft);
                    keep = false;
                }
                Err(msg) => form.error = Some(msg),
            }
        }
        if keep {
            self.movie_form = Some(form);
        }
    }

    pub(crate) fn ui_render_actor_form(&mut self, ctx: &eg::Context) {
        let Some(mut form) = self.actor_form.take() else {
            return;
        };
        let mut keep = true;
        let mut submit = false;
        let title = if form.id.is_some() {
            "Edit actor"
        } else {
            "New actor"
        };

        eg::Window::new(title)
            .collapsible(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                eg::Grid::new("actor_form_grid")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut form.name);
                        ui.end_row();
                        ui.label("Age");
                        ui.text_edit_singleline(&mut form.age_text);
                        ui.end_row();
                        ui.label("Image URL");
                        ui.text_edit_singleline(&mut form.image);
                        ui.end_row();
                        ui.label("Description");
                        ui.text_edit_multiline(&mut form.description);
                        ui.end_row();
                    });

                ui.collapsing("Filmography", |ui| {
                    for movie in &self.store.movies {
                        let mut included = form.movie_ids.iter().any(|id| id == &movie.id);
                        if ui.checkbox(&mut included, &movie.title).changed() {
                            toggle_membership(&mut form.movie_ids, &movie.id, included);
                        }
                    }
                });
                ui.collapsing("Genres", |ui| {
                    for genre in &self.store.actor_genres {
                        let mut included = form.genre_ids.iter().any(|id| id == &genre.id);
                        if ui.checkbox(&mut included, &genre.name).changed() {
                            toggle_membership(&mut form.genre_ids, &genre.id, included);
                        }
                    }
                });

                if let Some(err) = &form.error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                }
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        keep = false;
                    }
                });
            });

        if submit {
            match form.to_draft() {
                Ok(draft) => {
                    self.start_save_actor(form.id.clone(), draft);
                    keep = false;
                }
                Err(msg) => form.error = Some(msg),
            }
        }
        if keep {
            self.actor_form = Some(form);
        }
    }

    pub(crate) fn ui_render_genre_form(&mut self, ctx: &eg::Context) {
        let Some(mut form) = self.genre_form.take() else {
            return;
        };
        let mut keep = true;
        let mut submit = false;
        let title = if form.id.is_some() {
            "Edit genre"
        } else {
            "New genre"
        };

        eg::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.text_edit_singleline(&mut form.name);
                if form.id.is_none() {
                    ui.horizontal(|ui| {
                        ui.selectable_value(&mut form.kind, GenreKind::Movie, "Movie genre");
                        ui.selectable_value(&mut form.kind, GenreKind::Actor, "Actor genre");
                    });
                }
                if let Some(err) = &form.error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                }
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        keep = false;
                    }
                });
            });

        if submit {
            match form.to_draft() {
                Ok(draft) => {
                    self.start_save_genre(form.id.clone(), draft);
                    keep = false;
                }
                Err(msg) => form.error = Some(msg),
            }
        }
        if keep {
            self.genre_form = Some(form);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_draft_requires_a_title() {
        let form = MovieForm::default();
        assert!(form.to_draft().is_err());

        let form = MovieForm {
            title: "  Inception  ".to_string(),
            ..Default::default()
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.title, "Inception");
        assert_eq!(draft.duration, None);
    }

    #[test]
    fn duration_must_be_a_positive_number() {
        let mut form = MovieForm {
            title: "Inception".to_string(),
            duration_text: "148".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_draft().unwrap().duration, Some(148));

        form.duration_text = "-3".to_string();
        assert!(form.to_draft().is_err());
        form.duration_text = "two hours".to_string();
        assert!(form.to_draft().is_err());
    }

    #[test]
    fn empty_optional_fields_become_none() {
        let form = ActorForm {
            name: "Leo".to_string(),
            image: "   ".to_string(),
            ..Default::default()
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.image, None);
        assert_eq!(draft.age, None);
    }

    #[test]
    fn membership_toggle_adds_once_and_removes() {
        let mut ids = vec!["a1".to_string()];
        toggle_membership(&mut ids, "a2", true);
        toggle_membership(&mut ids, "a2", true);
        assert_eq!(ids, vec!["a1".to_string(), "a2".to_string()]);
        toggle_membership(&mut ids, "a1", false);
        assert_eq!(ids, vec!["a2".to_string()]);
    }

    #[test]
    fn genre_form_keeps_its_namespace() {
        let form = GenreForm::new(GenreKind::Actor);
        let form = GenreForm {
            name: "Action".to_string(),
            ..form
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.kind, GenreKind::Actor);
    }
}
