//! In-memory session management for mediabin.
//!
//! Sessions are keyed by an opaque UUID v4 token and map to a username.
//! Lifetime is the browser session: tokens live until logout or process exit,
//! with no expiry or idle timeout.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

/// An established session for a logged-in user.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Unique session token (UUID v4).
    pub token: String,
    /// Username bound to this session.
    pub username: String,
}

/// In-memory session store: opaque token -> username.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<String, String>,
}

impl SessionManager {
    /// Create an empty session manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session bound to the given username.
    pub fn create(&mut self, username: &str) -> AuthSession {
        let session = AuthSession {
            token: Uuid::new_v4().to_string(),
            username: username.to_string(),
        };
        self.sessions
            .insert(session.token.clone(), session.username.clone());
        debug!(username, "session created");
        session
    }

    /// Resolve a session token to its username.
    pub fn username_for(&self, token: &str) -> Option<&str> {
        self.sessions.get(token).map(String::as_str)
    }

    /// Remove a session. Returns the username it was bound to, if any.
    pub fn remove(&mut self, token: &str) -> Option<String> {
        let username = self.sessions.remove(token);
        if let Some(ref username) = username {
            debug!(username, "session removed");
        }
        username
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether there are no active sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
