//! mediabin - a small media sharing web app.
//!
//! Authenticated users upload media files with a text comment and browse
//! previously uploaded media. Credentials and file metadata persist in flat
//! JSON files; uploaded binaries are served from disk.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod web;

pub use auth::{
    hash_password, verify_password, AuthService, AuthSession, CredentialStore, PasswordError,
    SessionManager, User,
};
pub use config::Config;
pub use error::{MediabinError, Result};
pub use media::{MediaListing, MediaRecord, MediaService, MediaStore};
pub use web::{ApiError, WebServer};
