//! Session cookie middleware and extractor.
//!
//! The session gate: protected handlers take a [`SessionUser`] argument, and
//! requests without a valid session cookie are redirected to `/login` instead
//! of reaching the handler.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::LOCATION, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::auth::{AuthSession, SessionManager};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "mediabin_session";

/// Shared session state for the web layer.
#[derive(Debug, Default)]
pub struct SessionState {
    sessions: Mutex<SessionManager>,
}

impl SessionState {
    /// Create an empty session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish a session for a username.
    pub async fn establish(&self, username: &str) -> AuthSession {
        self.sessions.lock().await.create(username)
    }

    /// Resolve a session token to its username.
    pub async fn username_for(&self, token: &str) -> Option<String> {
        self.sessions
            .lock()
            .await
            .username_for(token)
            .map(String::from)
    }

    /// Drop a session. Returns the username it was bound to, if any.
    pub async fn revoke(&self, token: &str) -> Option<String> {
        self.sessions.lock().await.remove(token)
    }
}

/// A 302 redirect to the login page.
///
/// Used as the extractor rejection so unauthenticated callers land on
/// `/login` rather than receiving an error body.
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        found("/login")
    }
}

/// Build a 302 Found redirect response.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Extractor for authenticated users.
///
/// Resolves the session cookie against the session store and yields the
/// username. Rejects with a redirect to `/login`.
#[derive(Debug, Clone)]
pub struct SessionUser(pub String);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let jar = CookieJar::from_headers(&parts.headers);
            let token = jar.get(SESSION_COOKIE).ok_or(LoginRedirect)?.value().to_string();

            // Session state is injected into extensions by the middleware
            let sessions = parts
                .extensions
                .get::<Arc<SessionState>>()
                .ok_or(LoginRedirect)?;

            let username = sessions.username_for(&token).await.ok_or(LoginRedirect)?;
            Ok(SessionUser(username))
        })
    }
}

/// Middleware function to inject the session state into request extensions.
pub async fn session_context(
    sessions: Arc<SessionState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(sessions);
    next.run(request).await
}
