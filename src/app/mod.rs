// src/app/mod.rs — MovieHub desktop client: catalog browsing + admin editing
//
// All network work runs on worker threads over blocking reqwest; results flow
// back through mpsc channels polled once per frame. The UI thread never
// blocks on the network.
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use eframe::egui as eg;
use egui::TextureHandle;
use tracing::warn;

pub mod cache;
pub mod data;
pub mod filters;
pub mod imaging;
pub mod lookup;
mod prefetch;
mod prefs;
pub mod session;
pub mod store;
pub mod types;
mod ui;
pub mod utils;

use crate::api::ApiClient;
use crate::app::data::GenreKind;
use crate::app::filters::{ActorFilters, MovieFilters};
use crate::app::imaging::MovieTransforms;
use crate::app::prefetch::{PrefetchDone, WorkItem};
use crate::app::session::{AuthMsg, SessionGate};
use crate::app::store::{EntityStore, HomeData, PendingReload};
use crate::app::types::{FetchMsg, MutMsg, Route, Selection};
use crate::app::ui::forms::{ActorForm, GenreForm, LoginForm, MovieForm};

pub struct HubApp {
    // services
    api: ApiClient,
    pub(crate) session: SessionGate,

    // catalog
    pub(crate) store: EntityStore,
    pub(crate) pending: Option<PendingReload>,
    pub(crate) reload_generation: u64,
    pub(crate) catalog_loading: bool,
    pub(crate) catalog_loaded: bool,

    // per-view data
    pub(crate) home: Option<HomeData>,
    pub(crate) home_loading: bool,
    pub(crate) favorites_view: Option<data::MixedResults>,
    pub(crate) favorites_loading: bool,

    // navigation & filters
    pub(crate) route: Route,
    pub(crate) movie_filters: MovieFilters,
    pub(crate) actor_filters: ActorFilters,
    pub(crate) genre_tab: GenreKind,

    // header search
    pub(crate) search_query: String,
    pub(crate) search_results: Option<data::MixedResults>,
    pub(crate) search_in_flight: bool,

    // detail panel
    pub(crate) selected: Option<Selection>,

    // image transforms (movies only; actor transforms live on the entity)
    pub(crate) movie_transforms: MovieTransforms,

    // worker channels
    pub(crate) fetch_tx: Sender<FetchMsg>,
    fetch_rx: Receiver<FetchMsg>,
    pub(crate) auth_tx: Sender<AuthMsg>,
    auth_rx: Receiver<AuthMsg>,
    pub(crate) mut_tx: Sender<MutMsg>,
    mut_rx: Receiver<MutMsg>,

    // poster plumbing
    pub(crate) textures: HashMap<String, TextureHandle>,
    pub(crate) poster_paths: HashMap<String, PathBuf>,
    pub(crate) poster_failed: HashSet<String>,
    pub(crate) queued_posters: HashSet<String>,
    pub(crate) work_tx: Option<Sender<WorkItem>>,
    pub(crate) done_rx: Option<Receiver<PrefetchDone>>,
    pub(crate) uploads_this_frame: usize,

    // modal forms
    pub(crate) login_form: Option<LoginForm>,
    pub(crate) movie_form: Option<MovieForm>,
    pub(crate) actor_form: Option<ActorForm>,
    pub(crate) genre_form: Option<GenreForm>,

    // status & lifecycle
    pub(crate) status_line: String,
    did_init: bool,
    pub(crate) prefs_dirty: bool,
    pub(crate) prefs_last_write: Instant,
}

impl HubApp {
    pub fn new(api: ApiClient) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::channel();
        let (auth_tx, auth_rx) = mpsc::channel();
        let (mut_tx, mut_rx) = mpsc::channel();

        Self {
            api,
            session: SessionGate::default(),

            store: EntityStore::default(),
            pending: None,
            reload_generation: 0,
            catalog_loading: false,
            catalog_loaded: false,

            home: None,
            home_loading: false,
            favorites_view: None,
            favorites_loading: false,

            route: Route::Home,
            movie_filters: MovieFilters::default(),
            actor_filters: ActorFilters::default(),
            genre_tab: GenreKind::Movie,

            search_query: String::new(),
            search_results: None,
            search_in_flight: false,

            selected: None,
            movie_transforms: MovieTransforms::default(),

            fetch_tx,
            fetch_rx,
            auth_tx,
            auth_rx,
            mut_tx,
            mut_rx,

            textures: HashMap::new(),
            poster_paths: HashMap::new(),
            poster_failed: HashSet::new(),
            queued_posters: HashSet::new(),
            work_tx: None,
            done_rx: None,
            uploads_this_frame: 0,

            login_form: None,
            movie_form: None,
            actor_form: None,
            genre_form: None,

            status_line: String::new(),
            did_init: false,
            prefs_dirty: false,
            prefs_last_write: Instant::now(),
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_line = msg.into();
    }

    /// Client used for mutations; carries the admin token when a session is
    /// open. Unauthenticated calls get a plain 401 from the server.
    pub(crate) fn admin_api(&self) -> ApiClient {
        match &self.session.token {
            Some(token) => self.api.with_token(token),
            None => self.api.clone(),
        }
    }

    // ---- auth workers ----

    pub(crate) fn start_login(&mut self, username: String, password: String) {
        let api = self.api.clone();
        let tx = self.auth_tx.clone();
        std::thread::spawn(move || {
            let outcome = api
                .login(&username, &password)
                .and_then(|token| api.with_token(&token).me().map(|user| (user, token)));
            let msg = match outcome {
                Ok((user, token)) => AuthMsg::LoggedIn { user, token },
                Err(e) => AuthMsg::Denied(e),
            };
            let _ = tx.send(msg);
        });
    }

    /// Validate a token persisted by a previous run.
    pub(crate) fn start_token_restore(&mut self, token: String) {
        self.session.begin_restore(token.clone());
        let api = self.api.clone();
        let tx = self.auth_tx.clone();
        std::thread::spawn(move || {
            let msg = match api.with_token(&token).me() {
                Ok(user) => AuthMsg::LoggedIn { user, token },
                Err(e) => AuthMsg::Denied(e),
            };
            let _ = tx.send(msg);
        });
    }

    pub(crate) fn poll_auth(&mut self, ctx: &eg::Context) {
        let mut seen_any = false;
        while let Ok(msg) = self.auth_rx.try_recv() {
            seen_any = true;
            match &msg {
                AuthMsg::LoggedIn { user, token } => {
                    if let Err(e) = session::store_token_at(&session::token_path(), token) {
                        warn!("could not persist session token: {e}");
                    }
                    self.set_status(format!("Signed in as {}.", user.username));
                    self.login_form = None;
                }
                AuthMsg::Denied(e) => {
                    session::clear_token_at(&session::token_path());
                    let text = match e {
                        crate::api::ApiError::Unauthorized => {
                            "Invalid username or password.".to_string()
                        }
                        other => format!("Sign-in failed: {other}"),
                    };
                    if let Some(form) = self.login_form.as_mut() {
                        form.error = Some(text);
                    } else {
                        self.set_status(text);
                    }
                }
            }
            self.session.apply(msg);
        }
        if seen_any {
            ctx.request_repaint();
        }
    }

    pub(crate) fn logout(&mut self) {
        self.session.logout();
        session::clear_token_at(&session::token_path());
        if self.route == Route::Genres {
            self.route = Route::Home;
        }
        self.set_status("Signed out.");
    }

    /// Open a movie's playback link; a movie without one gets a status note.
    pub(crate) fn watch_movie(&mut self, movie: &data::Movie) {
        match &movie.url {
            Some(url) => {
                if let Err(e) = utils::open_in_browser(url) {
                    self.set_status(e);
                }
            }
            None => self.set_status(format!("\"{}\" has no playback link.", movie.title)),
        }
    }

    fn init_once(&mut self) {
        self.load_prefs();
        self.set_status("Loading catalog…");

        if let Some(token) = session::load_token_from(&session::token_path()) {
            self.start_token_restore(token);
        }

        // Best-effort sample-data seeding, then the first full load.
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        std::thread::spawn(move || {
            api.init_sample_data();
            let _ = tx.send(FetchMsg::Seeded);
        });
    }
}

impl eframe::App for HubApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        self.uploads_this_frame = 0;

        if !self.did_init {
            self.did_init = true;
            self.init_once();
        }

        self.poll_auth(ctx);
        self.poll_fetch(ctx);
        self.poll_mutations(ctx);
        self.poll_prefetch_done(ctx);

        eg::TopBottomPanel::top("header").show(ctx, |ui| {
            self.ui_render_header(ui);
        });

        eg::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.catalog_loading
                    || self.home_loading
                    || self.favorites_loading
                    || self.search_in_flight
                {
                    ui.add(eg::Spinner::new().size(12.0));
                }
                ui.label(&self.status_line);
            });
        });

        if self.selected.is_some() {
            eg::SidePanel::right("detail_panel")
                .default_width(340.0)
                .show(ctx, |ui| {
                    self.ui_render_detail(ui, ctx);
                });
        }

        eg::CentralPanel::default().show(ctx, |ui| match self.route {
            Route::Home => self.ui_render_home(ui, ctx),
            Route::Movies => self.ui_render_movies(ui, ctx),
            Route::Actors => self.ui_render_actors(ui, ctx),
            Route::Genres => self.ui_render_genres(ui),
            Route::Favorites => self.ui_render_favorites(ui, ctx),
        });

        self.ui_render_login_window(ctx);
        self.ui_render_movie_form(ctx);
        self.ui_render_actor_form(ctx);
        self.ui_render_genre_form(ctx);

        self.maybe_save_prefs();

        // Keep polling while background work is outstanding.
        if self.catalog_loading || self.home_loading || self.favorites_loading {
            ctx.request_repaint();
        }
    }
}
