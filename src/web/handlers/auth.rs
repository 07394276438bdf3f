//! Authentication handlers: registration, login, and logout.

use axum::{extract::State, response::Response, Form};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{found, SessionUser, SESSION_COOKIE};
use crate::MediabinError;

/// Credentials submitted by the login and registration forms.
///
/// Missing fields default to empty strings so they surface as validation
/// errors rather than body-rejection errors.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Plaintext password (hashed before persisting, never stored).
    #[serde(default)]
    pub password: String,
}

/// POST /register - Create a new account.
///
/// Redirects to the login page on success; validation and duplicate-username
/// failures are 400s.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    state
        .auth
        .lock()
        .await
        .register(&form.username, &form.password)?;

    Ok(found("/login"))
}

/// POST /login - Authenticate and establish a session.
///
/// On success a session cookie is issued and the caller is redirected to the
/// upload page. Bad credentials redirect back to the login page.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Response), ApiError> {
    match state.auth.lock().await.login(&form.username, &form.password) {
        Ok(user) => {
            let session = state.sessions.establish(&user.username).await;
            let cookie = Cookie::build((SESSION_COOKIE, session.token))
                .path("/")
                .http_only(true)
                .build();

            Ok((jar.add(cookie), found("/upload")))
        }
        Err(MediabinError::Auth(_)) => {
            debug!(username = %form.username, "login failed");
            Ok((jar, found("/login")))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout - Drop the session and redirect home.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    SessionUser(_username): SessionUser,
    jar: CookieJar,
) -> (CookieJar, Response) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value()).await;
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");

    (jar.remove(removal), found("/"))
}
