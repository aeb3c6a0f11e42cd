// src/app/data.rs — wire types for the MovieHub API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::imaging::ImageSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenreKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "actor")]
    Actor,
}

impl GenreKind {
    pub const fn as_query_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Actor => "actor",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>, // minutes
    #[serde(default)]
    pub actors: Vec<String>, // actor ids; may dangle
    #[serde(default)]
    pub genres: Vec<String>, // genre ids (type = movie)
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub age: Option<i32>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub movies: Vec<String>, // movie ids; may dangle
    #[serde(default)]
    pub genres: Vec<String>, // genre ids (type = actor)
    #[serde(default)]
    pub is_favorite: bool,
    pub image_settings: Option<ImageSettings>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GenreKind,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Shape shared by `GET /search` and `GET /favorites`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MixedResults {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub actors: Vec<Actor>,
}

// ---- request bodies ----

#[derive(Clone, Debug, Default, Serialize)]
pub struct MovieDraft {
    pub title: String,
    pub url: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ActorDraft {
    pub name: String,
    pub age: Option<i32>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub movies: Vec<String>,
    pub genres: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GenreDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GenreKind,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FavoriteFlip {
    pub is_favorite: bool,
}
