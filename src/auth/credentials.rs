//! Flat-file JSON credential store.
//!
//! Persists a map of username to [`User`] as pretty-printed JSON. The whole
//! file is rewritten on every save (last-write-wins); callers serialize their
//! read-modify-write sequences behind a single lock.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique username.
    pub username: String,
    /// Argon2id password hash in PHC string format.
    #[serde(rename = "password")]
    pub password_hash: String,
}

/// Credential store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Open a credential store, pre-creating an empty file when absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            fs::write(&path, "{}")?;
        }
        Ok(Self { path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all users.
    ///
    /// A missing file is an empty map. A malformed file is also treated as an
    /// empty map; the parse failure is logged, not propagated.
    pub fn load(&self) -> Result<HashMap<String, User>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(users) => Ok(users),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed credential store, treating as empty");
                Ok(HashMap::new())
            }
        }
    }

    /// Save all users, overwriting the backing file.
    pub fn save(&self, users: &HashMap<String, User>) -> Result<()> {
        let content = serde_json::to_string_pretty(users)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
