// src/app/prefs.rs — UI preferences persisted as a key=value text file
//
// The active route, both filter sets and the genre tab survive restarts.
// Saves are debounced so typing in a filter box does not hit the disk every
// frame. Unknown keys and unparseable values are ignored on load.
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::app::data::GenreKind;
use crate::app::filters::{AgeFilter, DurationFilter, FilmographyFilter};
use crate::app::types::Route;

const SAVE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Snapshot of everything the prefs file stores. Parsing and rendering are
/// pure so they can be exercised without an app instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub route: Route,
    pub movie_query: String,
    pub movie_duration: DurationFilter,
    pub movie_actor: Option<String>,
    pub movie_genre: Option<String>,
    pub actor_query: String,
    pub actor_age: AgeFilter,
    pub actor_filmography: FilmographyFilter,
    pub genre_tab_is_actor: bool,
}

impl UiPrefs {
    pub fn parse(txt: &str) -> Self {
        let mut prefs = Self::default();
        for line in txt.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((k, v)) = line.split_once('=') else {
                continue;
            };
            let k = k.trim();
            let v = v.trim();
            match k {
                "route" => prefs.route = Route::from_str(v),
                "movie_query" => prefs.movie_query = v.to_string(),
                "movie_duration" => {
                    if let Some(d) = DurationFilter::from_str(v) {
                        prefs.movie_duration = d;
                    }
                }
                "movie_actor" => {
                    prefs.movie_actor = (!v.is_empty()).then(|| v.to_string());
                }
                "movie_genre" => {
                    prefs.movie_genre = (!v.is_empty()).then(|| v.to_string());
                }
                "actor_query" => prefs.actor_query = v.to_string(),
                "actor_age" => {
                    if let Some(a) = AgeFilter::from_str(v) {
                        prefs.actor_age = a;
                    }
                }
                "actor_filmography" => {
                    if let Some(f) = FilmographyFilter::from_str(v) {
                        prefs.actor_filmography = f;
                    }
                }
                "genre_tab" => prefs.genre_tab_is_actor = v == "actor",
                _ => {}
            }
        }
        prefs
    }

    pub fn render(&self) -> String {
        format!(
            "# moviehub ui prefs\n\
             route={}\n\
             movie_query={}\n\
             movie_duration={}\n\
             movie_actor={}\n\
             movie_genre={}\n\
             actor_query={}\n\
             actor_age={}\n\
             actor_filmography={}\n\
             genre_tab={}\n",
            self.route.as_str(),
            self.movie_query,
            self.movie_duration.as_str(),
            self.movie_actor.as_deref().unwrap_or(""),
            self.movie_genre.as_deref().unwrap_or(""),
            self.actor_query,
            self.actor_age.as_str(),
            self.actor_filmography.as_str(),
            if self.genre_tab_is_actor {
                "actor"
            } else {
                "movie"
            },
        )
    }
}

pub fn prefs_path() -> PathBuf {
    crate::app::cache::cache_dir().join("ui_prefs.txt")
}

impl crate::app::HubApp {
    pub(crate) fn mark_dirty(&mut self) {
        self.prefs_dirty = true;
    }

    /// Flush pending pref changes, debounced to avoid writing every frame.
    pub(crate) fn maybe_save_prefs(&mut self) {
        if self.prefs_dirty && self.prefs_last_write.elapsed() >= SAVE_DEBOUNCE {
            self.save_prefs();
            self.prefs_dirty = false;
            self.prefs_last_write = Instant::now();
        }
    }

    pub(crate) fn load_prefs(&mut self) {
        let Ok(txt) = fs::read_to_string(prefs_path()) else {
            return;
        };
        let prefs = UiPrefs::parse(&txt);
        // Genre management needs an admin session; the app starts anonymous.
        self.route = match prefs.route {
            Route::Genres => Route::Home,
            other => other,
        };
        self.movie_filters.query = prefs.movie_query;
        self.movie_filters.duration = prefs.movie_duration;
        self.movie_filters.actor_id = prefs.movie_actor;
        self.movie_filters.genre_id = prefs.movie_genre;
        self.actor_filters.query = prefs.actor_query;
        self.actor_filters.age = prefs.actor_age;
        self.actor_filters.filmography = prefs.actor_filmography;
        self.genre_tab = if prefs.genre_tab_is_actor {
            GenreKind::Actor
        } else {
            GenreKind::Movie
        };
    }

    pub(crate) fn save_prefs(&self) {
        let prefs = UiPrefs {
            route: self.route,
            movie_query: self.movie_filters.query.clone(),
            movie_duration: self.movie_filters.duration,
            movie_actor: self.movie_filters.actor_id.clone(),
            movie_genre: self.movie_filters.genre_id.clone(),
            actor_query: self.actor_filters.query.clone(),
            actor_age: self.actor_filters.age,
            actor_filmography: self.actor_filters.filmography,
            genre_tab_is_actor: self.genre_tab == GenreKind::Actor,
        };
        let path = prefs_path();
        let _ = fs::create_dir_all(path.parent().unwrap_or_else(|| std::path::Path::new(".")));
        let _ = fs::write(path, prefs.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefs_round_trip_through_text() {
        let prefs = UiPrefs {
            route: Route::Actors,
            movie_query: "leo".to_string(),
            movie_duration: DurationFilter::Long,
            movie_actor: Some("a1".to_string()),
            movie_genre: None,
            actor_query: String::new(),
            actor_age: AgeFilter::Mature,
            actor_filmography: FilmographyFilter::Many,
            genre_tab_is_actor: true,
        };
        assert_eq!(UiPrefs::parse(&prefs.render()), prefs);
    }

    #[test]
    fn unknown_keys_and_bad_values_are_ignored() {
        let txt = "# comment\n\
                   route=movies\n\
                   movie_duration=extra-long\n\
                   nonsense_key=42\n\
                   not a key value line\n";
        let prefs = UiPrefs::parse(txt);
        assert_eq!(prefs.route, Route::Movies);
        assert_eq!(prefs.movie_duration, DurationFilter::All);
    }

    #[test]
    fn empty_reference_selections_parse_as_none() {
        let txt = "movie_actor=\nmovie_genre=g1\n";
        let prefs = UiPrefs::parse(txt);
        assert_eq!(prefs.movie_actor, None);
        assert_eq!(prefs.movie_genre.as_deref(), Some("g1"));
    }

    #[test]
    fn missing_file_content_yields_defaults() {
        assert_eq!(UiPrefs::parse(""), UiPrefs::default());
    }
}
