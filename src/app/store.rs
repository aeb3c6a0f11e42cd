// src/app/store.rs — in-memory entity collections + reload protocol
//
// The catalog (movies, actors, both genre namespaces) reloads as a unit:
// four concurrent fetches feed one PendingReload, and the store commits only
// when every part resolved successfully. A failed part keeps the previous
// state intact and surfaces the error instead of leaving the view half
// initialized. Reloads carry a generation counter so a stale in-flight
// response can never overwrite a newer one.
use std::thread;

use tracing::{info, warn};

use crate::api::ApiError;
use crate::app::data::{Actor, Genre, GenreKind, Movie};
use crate::app::imaging::ImageSettings;
use crate::app::lookup::EntityIndex;
use crate::app::types::{CatalogPart, FetchMsg, MutKind, MutMsg};

pub const HOME_RECENT_LIMIT: usize = 8;
pub const HOME_FAVORITES_LIMIT: usize = 6;
pub const HOME_GENRE_ROWS: usize = 3;
pub const HOME_GENRE_ROW_LIMIT: usize = 6;

#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    pub movies: Vec<Movie>,
    pub actors: Vec<Actor>,
    pub movie_genres: Vec<Genre>,
    pub actor_genres: Vec<Genre>,
}

/// Collects the four concurrent catalog fetches for one reload generation.
#[derive(Debug)]
pub struct PendingReload {
    pub generation: u64,
    movies: Option<Result<Vec<Movie>, ApiError>>,
    actors: Option<Result<Vec<Actor>, ApiError>>,
    movie_genres: Option<Result<Vec<Genre>, ApiError>>,
    actor_genres: Option<Result<Vec<Genre>, ApiError>>,
}

impl PendingReload {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            movies: None,
            actors: None,
            movie_genres: None,
            actor_genres: None,
        }
    }

    /// Absorb one part if it belongs to this generation. Results from older
    /// generations are dropped: last write wins.
    pub fn accept(&mut self, generation: u64, part: CatalogPart) -> bool {
        if generation != self.generation {
            return false;
        }
        match part {
            CatalogPart::Movies(r) => self.movies = Some(r),
            CatalogPart::Actors(r) => self.actors = Some(r),
            CatalogPart::MovieGenres(r) => self.movie_genres = Some(r),
            CatalogPart::ActorGenres(r) => self.actor_genres = Some(r),
        }
        true
    }

    pub fn is_complete(&self) -> bool {
        self.movies.is_some()
            && self.actors.is_some()
            && self.movie_genres.is_some()
            && self.actor_genres.is_some()
    }

    /// All-or-nothing outcome; `None` while parts are still in flight.
    pub fn outcome(self) -> Option<Result<CatalogSnapshot, ApiError>> {
        let (Some(movies), Some(actors), Some(movie_genres), Some(actor_genres)) =
            (self.movies, self.actors, self.movie_genres, self.actor_genres)
        else {
            return None;
        };
        let build = || -> Result<CatalogSnapshot, ApiError> {
            Ok(CatalogSnapshot {
                movies: movies?,
                actors: actors?,
                movie_genres: movie_genres?,
                actor_genres: actor_genres?,
            })
        };
        Some(build())
    }
}

#[derive(Debug, Default)]
pub struct EntityStore {
    pub movies: Vec<Movie>,
    pub actors: Vec<Actor>,
    pub movie_genres: Vec<Genre>,
    pub actor_genres: Vec<Genre>,
    pub movie_index: EntityIndex,
    pub actor_index: EntityIndex,
    pub movie_genre_index: EntityIndex,
    pub actor_genre_index: EntityIndex,
}

impl EntityStore {
    /// Replace all collections and rebuild the id indexes.
    pub fn commit(&mut self, snap: CatalogSnapshot) {
        self.movies = snap.movies;
        self.actors = snap.actors;
        self.movie_genres = snap.movie_genres;
        self.actor_genres = snap.actor_genres;
        self.movie_index = EntityIndex::build(&self.movies);
        self.actor_index = EntityIndex::build(&self.actors);
        self.movie_genre_index = EntityIndex::build(&self.movie_genres);
        self.actor_genre_index = EntityIndex::build(&self.actor_genres);
    }

    pub fn movie_by_id(&self, id: &str) -> Option<&Movie> {
        self.movie_index.resolve(&self.movies, id)
    }

    pub fn actor_by_id(&self, id: &str) -> Option<&Actor> {
        self.actor_index.resolve(&self.actors, id)
    }

    /// Direct in-memory patch after a confirmed image-settings save; the
    /// server state already matches, so no reload follows.
    pub fn apply_actor_image_settings(&mut self, actor_id: &str, settings: ImageSettings) {
        if let Some(pos) = self.actors.iter().position(|a| a.id == actor_id) {
            self.actors[pos].image_settings = Some(settings);
        }
    }
}

/// Data backing the home view, fetched as one unit.
#[derive(Debug, Default)]
pub struct HomeData {
    pub featured: Option<Movie>,
    pub recent: Vec<Movie>,
    pub favorites: Vec<Movie>,
    pub genre_rows: Vec<(Genre, Vec<Movie>)>,
}

// ---- worker spawns & polling ----

impl crate::app::HubApp {
    /// Kick off a full catalog reload (movies + actors + both genre
    /// namespaces, concurrently). Any reload already in flight is superseded.
    pub(crate) fn start_catalog_reload(&mut self) {
        self.reload_generation += 1;
        let generation = self.reload_generation;
        self.pending = Some(PendingReload::new(generation));
        self.catalog_loading = true;

        let jobs: [(fn(&crate::api::ApiClient) -> CatalogPart, &str); 4] = [
            (|api| CatalogPart::Movies(api.movies()), "movies"),
            (|api| CatalogPart::Actors(api.actors()), "actors"),
            (
                |api| CatalogPart::MovieGenres(api.genres(GenreKind::Movie)),
                "movie genres",
            ),
            (
                |api| CatalogPart::ActorGenres(api.genres(GenreKind::Actor)),
                "actor genres",
            ),
        ];
        for (job, _label) in jobs {
            let api = self.api.clone();
            let tx = self.fetch_tx.clone();
            thread::spawn(move || {
                let part = job(&api);
                let _ = tx.send(FetchMsg::Catalog { generation, part });
            });
        }
    }

    pub(crate) fn start_home_fetch(&mut self) {
        if self.home_loading {
            return;
        }
        self.home_loading = true;
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        thread::spawn(move || {
            let _ = tx.send(FetchMsg::Home(fetch_home_data(&api)));
        });
    }

    pub(crate) fn start_favorites_fetch(&mut self) {
        if self.favorites_loading {
            return;
        }
        self.favorites_loading = true;
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        thread::spawn(move || {
            let _ = tx.send(FetchMsg::Favorites(api.favorites()));
        });
    }

    pub(crate) fn start_search(&mut self, query: String) {
        if query.trim().is_empty() {
            self.search_results = None;
            return;
        }
        self.search_in_flight = true;
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        thread::spawn(move || {
            let result = api.search(&query);
            let _ = tx.send(FetchMsg::Search { query, result });
        });
    }

    /// Reload everything the current view depends on. Called at startup and
    /// after every confirmed mutation; the server's state is authoritative.
    pub(crate) fn reload_current_view(&mut self) {
        self.start_catalog_reload();
        match self.route {
            crate::app::types::Route::Home => self.start_home_fetch(),
            crate::app::types::Route::Favorites => self.start_favorites_fetch(),
            _ => {}
        }
    }

    pub(crate) fn poll_fetch(&mut self, ctx: &eframe::egui::Context) {
        let mut seen_any = false;
        while let Ok(msg) = self.fetch_rx.try_recv() {
            seen_any = true;
            match msg {
                FetchMsg::Seeded => {
                    self.reload_current_view();
                }
                FetchMsg::Catalog { generation, part } => {
                    let Some(pending) = self.pending.as_mut() else {
                        continue; // stale: no reload in flight anymore
                    };
                    if !pending.accept(generation, part) {
                        continue; // stale generation
                    }
                    if !pending.is_complete() {
                        continue;
                    }
                    let pending = self.pending.take();
                    self.catalog_loading = false;
                    match pending.and_then(PendingReload::outcome) {
                        Some(Ok(snap)) => {
                            self.store.commit(snap);
                            self.catalog_loaded = true;
                            // Movie transforms are reload-scoped.
                            self.movie_transforms = Default::default();
                            self.set_status(format!(
                                "Catalog loaded: {} movies, {} actors.",
                                self.store.movies.len(),
                                self.store.actors.len()
                            ));
                            self.queue_catalog_posters(ctx);
                        }
                        Some(Err(e)) => {
                            warn!("catalog reload failed: {e}");
                            self.set_status(format!("Could not load the catalog: {e}"));
                        }
                        None => {}
                    }
                }
                FetchMsg::Home(result) => {
                    self.home_loading = false;
                    match result {
                        Ok(data) => {
                            self.home = Some(data);
                            self.queue_home_posters(ctx);
                        }
                        Err(e) => {
                            warn!("home fetch failed: {e}");
                            self.set_status(format!("Could not load the home page: {e}"));
                        }
                    }
                }
                FetchMsg::Favorites(result) => {
                    self.favorites_loading = false;
                    match result {
                        Ok(data) => self.favorites_view = Some(data),
                        Err(e) => {
                            warn!("favorites fetch failed: {e}");
                            self.set_status(format!("Could not load favorites: {e}"));
                        }
                    }
                }
                FetchMsg::Search { query, result } => {
                    self.apply_search_response(query, result);
                }
            }
        }
        if seen_any {
            ctx.request_repaint();
        }
    }

    /// Apply a search response. Only the answer for the query currently
    /// typed matters; older responses are dropped. A stale response for an
    /// emptied box still ends the in-flight state, since no newer request
    /// exists to do so.
    fn apply_search_response(
        &mut self,
        query: String,
        result: Result<crate::app::data::MixedResults, ApiError>,
    ) {
        if query != self.search_query {
            if self.search_query.trim().is_empty() {
                self.search_in_flight = false;
            }
            return;
        }
        self.search_in_flight = false;
        match result {
            Ok(results) => self.search_results = Some(results),
            Err(e) => warn!("search failed: {e}"),
        }
    }

    // ---- mutations ----

    fn spawn_mutation<F>(&self, kind: MutKind, job: F)
    where
        F: FnOnce(&crate::api::ApiClient) -> Result<String, ApiError> + Send + 'static,
    {
        let api = self.admin_api();
        let tx = self.mut_tx.clone();
        thread::spawn(move || {
            let outcome = job(&api);
            let _ = tx.send(MutMsg { kind, outcome });
        });
    }

    /// Favorite toggles never flip the flag locally; the reload after the
    /// confirmed PATCH is the single source of truth.
    pub(crate) fn start_toggle_movie_favorite(&mut self, id: String) {
        self.spawn_mutation(MutKind::Favorite, move |api| {
            let now_favorite = api.toggle_movie_favorite(&id)?;
            Ok(if now_favorite {
                "Movie added to favorites.".to_string()
            } else {
                "Movie removed from favorites.".to_string()
            })
        });
    }

    pub(crate) fn start_toggle_actor_favorite(&mut self, id: String) {
        self.spawn_mutation(MutKind::Favorite, move |api| {
            let now_favorite = api.toggle_actor_favorite(&id)?;
            Ok(if now_favorite {
                "Actor added to favorites.".to_string()
            } else {
                "Actor removed from favorites.".to_string()
            })
        });
    }

    pub(crate) fn start_save_movie(
        &mut self,
        id: Option<String>,
        draft: crate::app::data::MovieDraft,
    ) {
        self.spawn_mutation(MutKind::Crud, move |api| match id {
            Some(id) => {
                let movie = api.update_movie(&id, &draft)?;
                Ok(format!("Movie \"{}\" updated.", movie.title))
            }
            None => {
                let movie = api.create_movie(&draft)?;
                Ok(format!("Movie \"{}\" created.", movie.title))
            }
        });
    }

    pub(crate) fn start_delete_movie(&mut self, id: String) {
        self.spawn_mutation(MutKind::Crud, move |api| {
            api.delete_movie(&id)?;
            Ok("Movie deleted.".to_string())
        });
    }

    pub(crate) fn start_save_actor(
        &mut self,
        id: Option<String>,
        draft: crate::app::data::ActorDraft,
    ) {
        self.spawn_mutation(MutKind::Crud, move |api| match id {
            Some(id) => {
                let actor = api.update_actor(&id, &draft)?;
                Ok(format!("Actor \"{}\" updated.", actor.name))
            }
            None => {
                let actor = api.create_actor(&draft)?;
                Ok(format!("Actor \"{}\" created.", actor.name))
            }
        });
    }

    pub(crate) fn start_delete_actor(&mut self, id: String) {
        self.spawn_mutation(MutKind::Crud, move |api| {
            api.delete_actor(&id)?;
            Ok("Actor deleted.".to_string())
        });
    }

    pub(crate) fn start_save_genre(
        &mut self,
        id: Option<String>,
        draft: crate::app::data::GenreDraft,
    ) {
        self.spawn_mutation(MutKind::Crud, move |api| match id {
            // Editing a genre has no backend support; surface it rather than
            // pretending the change was saved.
            Some(id) => {
                let genre = api.update_genre(&id, &draft)?;
                Ok(format!("Genre \"{}\" updated.", genre.name))
            }
            None => {
                let genre = api.create_genre(&draft)?;
                Ok(format!("Genre \"{}\" created.", genre.name))
            }
        });
    }

    pub(crate) fn start_delete_genre(&mut self, id: String) {
        self.spawn_mutation(MutKind::Crud, move |api| {
            api.delete_genre(&id)?;
            Ok("Genre deleted.".to_string())
        });
    }

    /// Persist an actor transform. Local state is patched only after the
    /// server confirms; a failed request leaves the in-memory actor as-is.
    pub(crate) fn start_actor_image_patch(&mut self, actor_id: String, settings: ImageSettings) {
        let settings = settings.clamped();
        let kind = MutKind::ImagePatch {
            actor_id: actor_id.clone(),
            settings,
        };
        self.spawn_mutation(kind, move |api| {
            api.update_actor_image_settings(&actor_id, &settings)?;
            Ok("Image settings saved.".to_string())
        });
    }

    pub(crate) fn poll_mutations(&mut self, ctx: &eframe::egui::Context) {
        let mut seen_any = false;
        while let Ok(MutMsg { kind, outcome }) = self.mut_rx.try_recv() {
            seen_any = true;
            if self.apply_mutation_outcome(kind, outcome) {
                self.reload_current_view();
            }
        }
        if seen_any {
            ctx.request_repaint();
        }
    }

    /// Apply one mutation result to local state. Failures only reach the
    /// status line; the store is never touched on an error, and the favorite
    /// flag in particular is only ever changed by a reload. Returns true when
    /// a confirmed change requires reloading the current view.
    fn apply_mutation_outcome(&mut self, kind: MutKind, outcome: Result<String, ApiError>) -> bool {
        match (kind, outcome) {
            (MutKind::ImagePatch { actor_id, settings }, Ok(status)) => {
                self.store.apply_actor_image_settings(&actor_id, settings);
                self.set_status(status);
                false
            }
            (MutKind::ImagePatch { .. }, Err(e)) => {
                warn!("image settings save failed: {e}");
                self.set_status(format!("Image settings not saved: {e}"));
                false
            }
            (_, Ok(status)) => {
                info!("{status}");
                self.set_status(status);
                true
            }
            (_, Err(e)) => {
                warn!("mutation failed: {e}");
                self.set_status(format!("Action failed: {e}"));
                false
            }
        }
    }
}

/// Home sections fetched concurrently, then up to three by-genre rows.
/// A failing by-genre row is skipped; a failing core section fails the view.
fn fetch_home_data(api: &crate::api::ApiClient) -> Result<HomeData, ApiError> {
    let featured = {
        let api = api.clone();
        thread::spawn(move || api.featured_movie())
    };
    let recent = {
        let api = api.clone();
        thread::spawn(move || api.recent_movies(HOME_RECENT_LIMIT))
    };
    let favorites = {
        let api = api.clone();
        thread::spawn(move || api.favorite_movies(HOME_FAVORITES_LIMIT))
    };
    let genres = {
        let api = api.clone();
        thread::spawn(move || api.genres(GenreKind::Movie))
    };

    fn join<T>(h: thread::JoinHandle<Result<T, ApiError>>) -> Result<T, ApiError> {
        h.join()
            .map_err(|_| ApiError::Network("home fetch worker panicked".to_string()))?
    }

    let featured = join(featured)?;
    let recent = join(recent)?;
    let favorites = join(favorites)?;
    let genres: Vec<Genre> = join(genres)?;

    let mut genre_rows = Vec::new();
    for genre in genres.into_iter().take(HOME_GENRE_ROWS) {
        match api.movies_by_genre(&genre.id, HOME_GENRE_ROW_LIMIT) {
            Ok(movies) if !movies.is_empty() => genre_rows.push((genre, movies)),
            Ok(_) => {}
            Err(e) => warn!("by-genre row for {} skipped: {e}", genre.name),
        }
    }

    Ok(HomeData {
        featured,
        recent,
        favorites,
        genre_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::MixedResults;
    use crate::app::HubApp;

    fn test_app() -> HubApp {
        let api = crate::api::ApiClient::new(&crate::config::AppConfig::default()).unwrap();
        HubApp::new(api)
    }

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            url: None,
            image: None,
            description: None,
            duration: None,
            actors: Vec::new(),
            genres: Vec::new(),
            is_favorite: false,
            created_at: None,
        }
    }

    fn actor(id: &str, name: &str) -> Actor {
        Actor {
            id: id.to_string(),
            name: name.to_string(),
            age: None,
            image: None,
            description: None,
            movies: Vec::new(),
            genres: Vec::new(),
            is_favorite: false,
            image_settings: None,
            created_at: None,
        }
    }

    #[test]
    fn reload_commits_only_when_every_part_succeeded() {
        let mut pending = PendingReload::new(1);
        assert!(pending.accept(1, CatalogPart::Movies(Ok(vec![movie("m1", "Inception")]))));
        assert!(pending.accept(1, CatalogPart::Actors(Ok(vec![actor("a1", "Leo")]))));
        assert!(pending.accept(1, CatalogPart::MovieGenres(Ok(Vec::new()))));
        assert!(!pending.is_complete());
        assert!(pending.accept(1, CatalogPart::ActorGenres(Ok(Vec::new()))));
        assert!(pending.is_complete());

        let snap = pending.outcome().unwrap().unwrap();
        assert_eq!(snap.movies.len(), 1);
        assert_eq!(snap.actors.len(), 1);
    }

    #[test]
    fn one_failed_part_fails_the_whole_reload() {
        let mut pending = PendingReload::new(3);
        pending.accept(3, CatalogPart::Movies(Ok(vec![movie("m1", "Inception")])));
        pending.accept(
            3,
            CatalogPart::Actors(Err(ApiError::Network("refused".to_string()))),
        );
        pending.accept(3, CatalogPart::MovieGenres(Ok(Vec::new())));
        pending.accept(3, CatalogPart::ActorGenres(Ok(Vec::new())));

        let outcome = pending.outcome().unwrap();
        assert!(outcome.is_err());
    }

    #[test]
    fn stale_generation_results_are_dropped() {
        let mut pending = PendingReload::new(5);
        assert!(!pending.accept(4, CatalogPart::Movies(Ok(vec![movie("m1", "Old")]))));
        assert!(pending.accept(5, CatalogPart::Movies(Ok(vec![movie("m2", "New")]))));
    }

    #[test]
    fn incomplete_reload_has_no_outcome() {
        let mut pending = PendingReload::new(1);
        pending.accept(1, CatalogPart::Movies(Ok(Vec::new())));
        assert!(pending.outcome().is_none());
    }

    #[test]
    fn commit_rebuilds_indexes_for_resolution() {
        let mut store = EntityStore::default();
        store.commit(CatalogSnapshot {
            movies: vec![movie("m1", "Inception")],
            actors: vec![actor("a1", "Leo")],
            movie_genres: Vec::new(),
            actor_genres: Vec::new(),
        });
        assert_eq!(store.movie_by_id("m1").unwrap().title, "Inception");
        assert!(store.actor_by_id("a99").is_none());

        // Reload replaces the collections and the indexes together.
        store.commit(CatalogSnapshot::default());
        assert!(store.movie_by_id("m1").is_none());
    }

    #[test]
    fn image_patch_updates_only_the_named_actor() {
        let mut store = EntityStore::default();
        store.commit(CatalogSnapshot {
            movies: Vec::new(),
            actors: vec![actor("a1", "Leo"), actor("a2", "Scarlett")],
            movie_genres: Vec::new(),
            actor_genres: Vec::new(),
        });
        let settings = ImageSettings {
            scale: 120,
            position_x: 30,
            position_y: 70,
        };
        store.apply_actor_image_settings("a1", settings);
        assert_eq!(store.actor_by_id("a1").unwrap().image_settings, Some(settings));
        assert_eq!(store.actor_by_id("a2").unwrap().image_settings, None);
        // A dangling id is a no-op, not a panic.
        store.apply_actor_image_settings("a99", settings);
    }

    #[test]
    fn stale_search_for_an_emptied_box_ends_the_in_flight_state() {
        let mut app = test_app();
        app.search_query.clear();
        app.search_in_flight = true;

        app.apply_search_response("le".to_string(), Ok(MixedResults::default()));

        assert!(!app.search_in_flight);
        assert!(app.search_results.is_none());
    }

    #[test]
    fn stale_search_keeps_waiting_for_the_newer_query() {
        let mut app = test_app();
        app.search_query = "lex".to_string();
        app.search_in_flight = true;

        // The answer for "le" arrives after the box already says "lex".
        app.apply_search_response("le".to_string(), Ok(MixedResults::default()));
        assert!(app.search_in_flight);
        assert!(app.search_results.is_none());

        let results = MixedResults {
            movies: vec![movie("m1", "Lex")],
            actors: Vec::new(),
        };
        app.apply_search_response("lex".to_string(), Ok(results));
        assert!(!app.search_in_flight);
        assert_eq!(app.search_results.unwrap().movies.len(), 1);
    }

    #[test]
    fn failed_favorite_toggle_leaves_local_flags_untouched() {
        let mut app = test_app();
        let mut favorited = movie("m1", "Inception");
        favorited.is_favorite = true;
        app.store.commit(CatalogSnapshot {
            movies: vec![favorited, movie("m2", "Tenet")],
            actors: vec![actor("a1", "Leo")],
            movie_genres: Vec::new(),
            actor_genres: Vec::new(),
        });

        // The server says the movie is gone; nothing local may change.
        let reload = app.apply_mutation_outcome(MutKind::Favorite, Err(ApiError::NotFound));

        assert!(!reload);
        assert!(app.store.movie_by_id("m1").unwrap().is_favorite);
        assert!(!app.store.movie_by_id("m2").unwrap().is_favorite);
        assert!(!app.store.actor_by_id("a1").unwrap().is_favorite);
        assert!(app.status_line.contains("Action failed"));
    }

    #[test]
    fn confirmed_favorite_toggle_defers_the_flip_to_a_reload() {
        let mut app = test_app();
        app.store.commit(CatalogSnapshot {
            movies: vec![movie("m1", "Inception")],
            actors: Vec::new(),
            movie_genres: Vec::new(),
            actor_genres: Vec::new(),
        });

        let reload = app.apply_mutation_outcome(
            MutKind::Favorite,
            Ok("Movie added to favorites.".to_string()),
        );

        // The reload carries the flipped flag; the local copy stays as-is.
        assert!(reload);
        assert!(!app.store.movie_by_id("m1").unwrap().is_favorite);
        assert_eq!(app.status_line, "Movie added to favorites.");
    }
}
