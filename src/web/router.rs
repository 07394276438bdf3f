//! Router configuration for the mediabin web layer.

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};
use super::middleware::session_context;

/// Create the application router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Unmatched routes fall through to the static asset directory, then 404
    let static_files = ServeDir::new(&app_state.static_path)
        .not_found_service(handle_404.into_service());

    let sessions = app_state.sessions.clone();

    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route(
            "/register",
            get(handlers::register_page).post(handlers::register),
        )
        .route("/logout", get(handlers::logout))
        .route(
            "/upload",
            get(handlers::upload_page).post(handlers::upload),
        )
        .route("/view", get(handlers::view_page))
        .route("/media", get(handlers::list_media))
        .route("/uploads/:filename", get(handlers::download))
        .fallback_service(static_files)
        // Uploads are not size-limited
        .layer(DefaultBodyLimit::disable())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(move |req, next| {
                    let sessions = sessions.clone();
                    session_context(sessions, req, next)
                })),
        )
        .with_state(app_state)
}

/// Fallback handler for unmatched routes.
async fn handle_404() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 Not Found")
}
