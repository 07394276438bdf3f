//! Static page handlers.
//!
//! Pages are plain HTML files read from the configured static directory.
//! The upload and view pages sit behind the session gate.

use axum::{extract::State, response::Html};
use std::io;
use std::sync::Arc;

use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::SessionUser;

/// GET / - Landing page.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    serve_page(&state, "index.html").await
}

/// GET /login - Login form.
pub async fn login_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    serve_page(&state, "login.html").await
}

/// GET /register - Registration form.
pub async fn register_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    serve_page(&state, "register.html").await
}

/// GET /upload - Upload form. Requires a session.
pub async fn upload_page(
    State(state): State<Arc<AppState>>,
    SessionUser(_username): SessionUser,
) -> Result<Html<String>, ApiError> {
    serve_page(&state, "upload.html").await
}

/// GET /view - Media gallery. Requires a session.
pub async fn view_page(
    State(state): State<Arc<AppState>>,
    SessionUser(_username): SessionUser,
) -> Result<Html<String>, ApiError> {
    serve_page(&state, "view.html").await
}

async fn serve_page(state: &AppState, name: &str) -> Result<Html<String>, ApiError> {
    let path = state.static_path.join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Ok(Html(body)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ApiError::not_found("Page not found"))
        }
        Err(e) => {
            tracing::error!(page = name, error = %e, "failed to read static page");
            Err(ApiError::internal("An internal error occurred"))
        }
    }
}
