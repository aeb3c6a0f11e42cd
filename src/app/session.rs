// src/app/session.rs — admin session state machine
//
// Anonymous -> Authenticating -> Admin -> Anonymous. The gate itself is pure;
// network work happens on worker threads owned by the app, which feed
// `AuthMsg` results back through `apply`.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::api::ApiError;
use crate::app::data::User;

#[derive(Clone, Debug, PartialEq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Admin(User),
}

/// Worker-thread outcome for a login attempt or a startup token validation.
#[derive(Debug)]
pub enum AuthMsg {
    LoggedIn { user: User, token: String },
    Denied(ApiError),
}

#[derive(Debug)]
pub struct SessionGate {
    pub state: AuthState,
    pub token: Option<String>,
}

impl Default for SessionGate {
    fn default() -> Self {
        Self {
            state: AuthState::Anonymous,
            token: None,
        }
    }
}

impl SessionGate {
    pub fn is_admin(&self) -> bool {
        matches!(self.state, AuthState::Admin(_))
    }

    pub fn is_authenticating(&self) -> bool {
        matches!(self.state, AuthState::Authenticating)
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Admin(user) => Some(user),
            _ => None,
        }
    }

    /// Validate a login submission before any network call. On success the
    /// gate enters Authenticating and the caller spawns the exchange.
    pub fn begin_login(&mut self, username: &str, password: &str) -> Result<(), String> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err("Username and password are required".to_string());
        }
        self.state = AuthState::Authenticating;
        Ok(())
    }

    /// Re-validation of a persisted token at startup.
    pub fn begin_restore(&mut self, token: String) {
        self.token = Some(token);
        self.state = AuthState::Authenticating;
    }

    /// Apply a worker outcome. Any denial discards the held token and drops
    /// back to Anonymous.
    pub fn apply(&mut self, msg: AuthMsg) {
        match msg {
            AuthMsg::LoggedIn { user, token } => {
                info!("admin session opened for {}", user.username);
                self.token = Some(token);
                self.state = AuthState::Admin(user);
            }
            AuthMsg::Denied(err) => {
                warn!("authentication rejected: {err}");
                self.token = None;
                self.state = AuthState::Anonymous;
            }
        }
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.state = AuthState::Anonymous;
    }
}

// ---- token persistence (session survives app restarts) ----

pub fn token_path() -> PathBuf {
    crate::app::cache::cache_dir().join("session_token.txt")
}

pub fn load_token_from(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let token = raw.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

pub fn store_token_at(path: &Path, token: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, token)
}

pub fn clear_token_at(path: &Path) {
    if path.exists() {
        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            username: "admin".to_string(),
            is_admin: true,
        }
    }

    #[test]
    fn empty_credentials_never_reach_the_network() {
        let mut gate = SessionGate::default();
        assert!(gate.begin_login("", "admin123").is_err());
        assert!(gate.begin_login("admin", "   ").is_err());
        assert_eq!(gate.state, AuthState::Anonymous);
    }

    #[test]
    fn successful_login_opens_an_admin_session() {
        let mut gate = SessionGate::default();
        gate.begin_login("admin", "admin123").unwrap();
        assert!(gate.is_authenticating());

        gate.apply(AuthMsg::LoggedIn {
            user: user(),
            token: "jwt-token".to_string(),
        });
        assert!(gate.is_admin());
        assert_eq!(gate.token.as_deref(), Some("jwt-token"));
        assert_eq!(gate.user().unwrap().username, "admin");
    }

    #[test]
    fn rejected_login_discards_token_and_returns_to_anonymous() {
        let mut gate = SessionGate::default();
        gate.begin_login("admin", "wrong").unwrap();
        gate.apply(AuthMsg::Denied(ApiError::Unauthorized));
        assert_eq!(gate.state, AuthState::Anonymous);
        assert!(gate.token.is_none());
    }

    #[test]
    fn stale_persisted_token_is_dropped_on_failed_validation() {
        let mut gate = SessionGate::default();
        gate.begin_restore("old-token".to_string());
        assert!(gate.is_authenticating());
        gate.apply(AuthMsg::Denied(ApiError::Unauthorized));
        assert_eq!(gate.state, AuthState::Anonymous);
        assert!(gate.token.is_none());
    }

    #[test]
    fn logout_clears_the_session() {
        let mut gate = SessionGate::default();
        gate.apply(AuthMsg::LoggedIn {
            user: user(),
            token: "jwt-token".to_string(),
        });
        gate.logout();
        assert_eq!(gate.state, AuthState::Anonymous);
        assert!(gate.token.is_none());
    }

    #[test]
    fn token_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session_token.txt");

        assert!(load_token_from(&path).is_none());
        store_token_at(&path, "jwt-token").unwrap();
        assert_eq!(load_token_from(&path).as_deref(), Some("jwt-token"));

        clear_token_at(&path);
        assert!(load_token_from(&path).is_none());
    }
}
