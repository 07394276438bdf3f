//! Flat-file JSON metadata store for uploaded media.
//!
//! Persists a map of stored filename to [`MediaRecord`]. Same full-file
//! overwrite and silent-recovery semantics as the credential store.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;

/// Metadata for one uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaRecord {
    /// Stored filename (timestamp-derived, unique key).
    pub filename: String,
    /// Filename the client uploaded under.
    #[serde(rename = "originalname")]
    pub original_name: String,
    /// User-supplied comment, empty when omitted.
    #[serde(default)]
    pub comment: String,
}

/// Media metadata store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct MediaStore {
    path: PathBuf,
}

impl MediaStore {
    /// Open a metadata store, pre-creating an empty file when absent.
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

    /// Load all records. Missing or malformed files are empty maps.
    pub fn load(&self) -> Result<HashMap<String, MediaRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed metadata store, treating as empty");
                Ok(HashMap::new())
            }
        }
    }

    /// Save all records, overwriting the backing file.
    pub fn save(&self, records: &HashMap<String, MediaRecord>) -> Result<()> {
        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
