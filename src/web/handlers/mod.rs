//! Request handlers for the mediabin web layer.

pub mod auth;
pub mod media;
pub mod pages;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::{AuthService, CredentialStore};
use crate::config::Config;
use crate::media::{MediaService, MediaStore};
use crate::web::middleware::SessionState;
use crate::Result;

pub use auth::{login, logout, register, CredentialsForm};
pub use media::{download, list_media, upload, UploadResponse};
pub use pages::{index, login_page, register_page, upload_page, view_page};

/// Application state shared across handlers.
///
/// The two services wrap the flat-file JSON stores; each sits behind a mutex
/// so a read-modify-write of its store cannot interleave with another writer
/// (single-writer lock).
pub struct AppState {
    /// Authentication service over the credential store.
    pub auth: Mutex<AuthService>,
    /// Media service over the upload directory and metadata store.
    pub media: Mutex<MediaService>,
    /// In-memory session store.
    pub sessions: Arc<SessionState>,
    /// Directory static pages are served from.
    pub static_path: PathBuf,
}

impl AppState {
    /// Create application state from already-opened services.
    pub fn new(auth: AuthService, media: MediaService, static_path: impl Into<PathBuf>) -> Self {
        Self {
            auth: Mutex::new(auth),
            media: Mutex::new(media),
            sessions: Arc::new(SessionState::new()),
            static_path: static_path.into(),
        }
    }

    /// Open stores and build application state from configuration.
    ///
    /// Pre-creates the two JSON store files and the upload directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = CredentialStore::open(&config.storage.users_file)?;
        let metadata = MediaStore::open(&config.storage.comments_file)?;
        let media = MediaService::new(&config.storage.upload_dir, metadata)?;

        Ok(Self::new(
            AuthService::new(credentials),
            media,
            &config.web.static_path,
        ))
    }
}
