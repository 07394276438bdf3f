//! Middleware for the mediabin web layer.

pub mod session;

pub use session::{found, session_context, LoginRedirect, SessionState, SessionUser, SESSION_COOKIE};
