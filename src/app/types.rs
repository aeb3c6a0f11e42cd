// src/app/types.rs — routes, selections and worker messages
use crate::api::ApiError;
use crate::app::data::{Actor, Genre, MixedResults, Movie};
use crate::app::imaging::ImageSettings;
use crate::app::store::HomeData;

/// Top-level views, one visible at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Movies,
    Actors,
    Genres,
    Favorites,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Movies,
        Route::Actors,
        Route::Genres,
        Route::Favorites,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Movies => "Movies",
            Route::Actors => "Actors",
            Route::Genres => "Genres",
            Route::Favorites => "Favorites",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Movies => "movies",
            Route::Actors => "actors",
            Route::Genres => "genres",
            Route::Favorites => "favorites",
        }
    }

    pub fn from_str(s: &str) -> Route {
        match s {
            "movies" => Route::Movies,
            "actors" => Route::Actors,
            "genres" => Route::Genres,
            "favorites" => Route::Favorites,
            _ => Route::Home,
        }
    }
}

/// Entity highlighted in the detail side panel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selection {
    Movie(String),
    Actor(String),
}

/// One of the four concurrent fetches of a catalog reload.
#[derive(Debug)]
pub enum CatalogPart {
    Movies(Result<Vec<Movie>, ApiError>),
    Actors(Result<Vec<Actor>, ApiError>),
    MovieGenres(Result<Vec<Genre>, ApiError>),
    ActorGenres(Result<Vec<Genre>, ApiError>),
}

/// Read-path results flowing back from worker threads.
#[derive(Debug)]
pub enum FetchMsg {
    /// Startup sample-data seeding finished (success or not); load everything.
    Seeded,
    Catalog { generation: u64, part: CatalogPart },
    Home(Result<HomeData, ApiError>),
    Favorites(Result<MixedResults, ApiError>),
    Search {
        query: String,
        result: Result<MixedResults, ApiError>,
    },
}

/// What a confirmed mutation should do to local state.
#[derive(Debug)]
pub enum MutKind {
    /// Create/update/delete; a confirmed one triggers a catalog reload.
    Crud,
    /// Favorite flips reload too; the flag is never flipped locally.
    Favorite,
    /// Actor transform save; applied in place on success, no reload.
    ImagePatch {
        actor_id: String,
        settings: ImageSettings,
    },
}

#[derive(Debug)]
pub struct MutMsg {
    pub kind: MutKind,
    pub outcome: Result<String, ApiError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_round_trip_through_prefs_strings() {
        for route in Route::ALL {
            assert_eq!(Route::from_str(route.as_str()), route);
        }
    }

    #[test]
    fn unknown_route_string_falls_back_to_home() {
        assert_eq!(Route::from_str("detail"), Route::Home);
        assert_eq!(Route::from_str(""), Route::Home);
    }
}
