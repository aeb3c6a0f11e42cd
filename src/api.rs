// src/api.rs — blocking HTTP client for the MovieHub API
//
// One pooled reqwest client is built at startup and cloned into worker
// threads; mutation endpoints attach the admin bearer token when present.
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::app::data::{
    Actor, ActorDraft, FavoriteFlip, Genre, GenreDraft, GenreKind, MixedResults, Movie,
    MovieDraft, TokenResponse, User,
};
use crate::app::imaging::ImageSettings;
use crate::config::AppConfig;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never completed (DNS, refused connection, timeout...).
    #[error("connection error: {0}")]
    Network(String),
    /// 401 — bad credentials, or an invalid/expired admin token.
    #[error("unauthorized: invalid credentials or expired session")]
    Unauthorized,
    /// 404 from the server. Dangling ids during rendering are handled by the
    /// resolver placeholders instead and never reach this variant.
    #[error("not found on server")]
    NotFound,
    /// Operation the backend does not implement (genre update).
    #[error("not implemented by the server")]
    Unsupported,
    /// Any other non-success status.
    #[error("server error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent("moviehub-desktop")
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .pool_max_idle_per_host(8)
            .build()?;
        Ok(Self {
            http,
            base: cfg.api_base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Copy of this client that authenticates as admin.
    pub fn with_token(&self, token: &str) -> Self {
        let mut next = self.clone();
        next.token = Some(token.to_string());
        next
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base, path)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().unwrap_or_default();
        Err(ApiError::from_status(status, message))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.authed(self.http.get(self.url(path))).send()?;
        Ok(Self::check(resp)?.json::<T>()?)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .authed(self.http.post(self.url(path)).json(body))
            .send()?;
        Ok(Self::check(resp)?.json::<T>()?)
    }

    fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .authed(self.http.put(self.url(path)).json(body))
            .send()?;
        Ok(Self::check(resp)?.json::<T>()?)
    }

    fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.authed(self.http.delete(self.url(path))).send()?;
        Self::check(resp).map(|_| ())
    }

    // ---- collections ----

    pub fn movies(&self) -> Result<Vec<Movie>, ApiError> {
        self.get_json("/movies")
    }

    pub fn actors(&self) -> Result<Vec<Actor>, ApiError> {
        self.get_json("/actors")
    }

    pub fn genres(&self, kind: GenreKind) -> Result<Vec<Genre>, ApiError> {
        self.get_json(&format!("/genres?type={}", kind.as_query_str()))
    }

    // ---- home sections ----

    pub fn featured_movie(&self) -> Result<Option<Movie>, ApiError> {
        self.get_json("/movies/featured")
    }

    pub fn recent_movies(&self, limit: usize) -> Result<Vec<Movie>, ApiError> {
        self.get_json(&format!("/movies/recent?limit={limit}"))
    }

    pub fn favorite_movies(&self, limit: usize) -> Result<Vec<Movie>, ApiError> {
        self.get_json(&format!("/movies/favorites?limit={limit}"))
    }

    pub fn movies_by_genre(&self, genre_id: &str, limit: usize) -> Result<Vec<Movie>, ApiError> {
        self.get_json(&format!("/movies/by-genre/{genre_id}?limit={limit}"))
    }

    // ---- search & favorites ----

    pub fn search(&self, query: &str) -> Result<MixedResults, ApiError> {
        self.get_json(&format!("/search?q={}", urlencoding::encode(query)))
    }

    pub fn favorites(&self) -> Result<MixedResults, ApiError> {
        self.get_json("/favorites")
    }

    // ---- admin CRUD ----

    pub fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, ApiError> {
        self.post_json("/movies", draft)
    }

    pub fn update_movie(&self, id: &str, draft: &MovieDraft) -> Result<Movie, ApiError> {
        self.put_json(&format!("/movies/{id}"), draft)
    }

    pub fn delete_movie(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/movies/{id}"))
    }

    pub fn create_actor(&self, draft: &ActorDraft) -> Result<Actor, ApiError> {
        self.post_json("/actors", draft)
    }

    pub fn update_actor(&self, id: &str, draft: &ActorDraft) -> Result<Actor, ApiError> {
        self.put_json(&format!("/actors/{id}"), draft)
    }

    pub fn delete_actor(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/actors/{id}"))
    }

    pub fn create_genre(&self, draft: &GenreDraft) -> Result<Genre, ApiError> {
        self.post_json("/genres", draft)
    }

    /// Genre update has no backend endpoint. Kept explicit so the UI reports
    /// "not implemented" instead of pretending the edit was saved.
    pub fn update_genre(&self, _id: &str, _draft: &GenreDraft) -> Result<Genre, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub fn delete_genre(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/genres/{id}"))
    }

    // ---- favorites & image settings ----

    pub fn toggle_movie_favorite(&self, id: &str) -> Result<bool, ApiError> {
        let resp = self
            .authed(self.http.patch(self.url(&format!("/movies/{id}/favorite"))))
            .send()?;
        let flip: FavoriteFlip = Self::check(resp)?.json()?;
        Ok(flip.is_favorite)
    }

    pub fn toggle_actor_favorite(&self, id: &str) -> Result<bool, ApiError> {
        let resp = self
            .authed(self.http.patch(self.url(&format!("/actors/{id}/favorite"))))
            .send()?;
        let flip: FavoriteFlip = Self::check(resp)?.json()?;
        Ok(flip.is_favorite)
    }

    pub fn update_actor_image_settings(
        &self,
        id: &str,
        settings: &ImageSettings,
    ) -> Result<(), ApiError> {
        let resp = self
            .authed(
                self.http
                    .patch(self.url(&format!("/actors/{id}/image-settings")))
                    .json(settings),
            )
            .send()?;
        Self::check(resp).map(|_| ())
    }

    // ---- auth ----

    pub fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let token: TokenResponse = self.post_json("/auth/login", &body)?;
        Ok(token.access_token)
    }

    pub fn me(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me")
    }

    /// Asks the backend to seed sample data. Best-effort: failures are logged
    /// and ignored so a backend without the endpoint still works.
    pub fn init_sample_data(&self) {
        let resp = self
            .http
            .post(self.url("/init-data"))
            .send()
            .map_err(ApiError::from)
            .and_then(Self::check);
        if let Err(e) = resp {
            warn!("init-data skipped: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_taxonomy() {
        assert_eq!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Unauthorized
        );
        assert_eq!(
            ApiError::from_status(StatusCode::NOT_FOUND, String::new()),
            ApiError::NotFound
        );
        assert_eq!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
            ApiError::Api {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn genre_update_is_rejected_without_a_request() {
        let client = ApiClient::new(&AppConfig::default()).unwrap();
        let draft = GenreDraft {
            name: "Drame".to_string(),
            kind: GenreKind::Movie,
        };
        assert!(matches!(
            client.update_genre("g1", &draft),
            Err(ApiError::Unsupported)
        ));
    }

    #[test]
    fn unauthorized_reads_differently_from_connection_errors() {
        let auth = ApiError::Unauthorized.to_string();
        let net = ApiError::Network("connection refused".to_string()).to_string();
        assert!(auth.contains("credentials"));
        assert!(net.contains("connection"));
        assert_ne!(auth, net);
    }
}
