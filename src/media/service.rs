//! Upload storage and media listing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::metadata::{MediaRecord, MediaStore};
use crate::{MediabinError, Result};

/// One entry in the media listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MediaListing {
    /// Stored filename.
    pub name: String,
    /// URL the file is served from.
    pub url: String,
    /// File type, derived from the extension (empty when there is none).
    #[serde(rename = "type")]
    pub media_type: String,
    /// Stored comment, empty when no record exists for the file.
    pub comment: String,
}

/// Media service: writes uploads to disk and keeps their metadata.
///
/// Callers hold this behind a single lock so the metadata read-modify-write
/// on upload cannot interleave with another writer. The upload directory is
/// the source of truth for listing; records without a file are ignored and
/// files without a record get an empty comment.
#[derive(Debug)]
pub struct MediaService {
    upload_dir: PathBuf,
    metadata: MediaStore,
}

impl MediaService {
    /// Create a media service, creating the upload directory when absent.
    pub fn new(upload_dir: impl Into<PathBuf>, metadata: MediaStore) -> Result<Self> {
        let upload_dir = upload_dir.into();
        fs::create_dir_all(&upload_dir)?;
        Ok(Self {
            upload_dir,
            metadata,
        })
    }

    /// The upload directory.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// The metadata store.
    pub fn metadata(&self) -> &MediaStore {
        &self.metadata
    }

    /// Store an uploaded payload and record its metadata.
    ///
    /// The storage name is the current millisecond timestamp plus the
    /// original filename's extension. Two uploads within the same millisecond
    /// can collide and overwrite; that granularity is accepted.
    pub fn store_upload(
        &self,
        original_name: &str,
        content: &[u8],
        comment: &str,
    ) -> Result<MediaRecord> {
        let stored_name = storage_name(Utc::now().timestamp_millis(), original_name);
        fs::write(self.upload_dir.join(&stored_name), content)?;

        let record = MediaRecord {
            filename: stored_name.clone(),
            original_name: original_name.to_string(),
            comment: comment.to_string(),
        };

        let mut records = self.metadata.load()?;
        records.insert(stored_name.clone(), record.clone());
        self.metadata.save(&records)?;

        info!(
            %stored_name,
            original_name,
            size = content.len(),
            "stored upload"
        );
        Ok(record)
    }

    /// List all files in the upload directory joined with their comments.
    ///
    /// Non-recursive, directory enumeration order.
    pub fn list(&self) -> Result<Vec<MediaListing>> {
        let records = self.metadata.load()?;

        let mut listings = Vec::new();
        for entry in fs::read_dir(&self.upload_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let media_type = extension(&name).unwrap_or_default().to_string();
            let comment = records
                .get(&name)
                .map(|r| r.comment.clone())
                .unwrap_or_default();

            listings.push(MediaListing {
                url: format!("/uploads/{name}"),
                name,
                media_type,
                comment,
            });
        }

        Ok(listings)
    }

    /// Read back a stored file's bytes.
    pub fn open(&self, stored_name: &str) -> Result<Vec<u8>> {
        let path = self.file_path(stored_name)?;
        match fs::read(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(MediabinError::NotFound("File".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a stored name to its path inside the upload directory.
    ///
    /// Names carrying path separators or parent components cannot address a
    /// stored file and resolve to `NotFound`.
    fn file_path(&self, stored_name: &str) -> Result<PathBuf> {
        let valid = !stored_name.is_empty()
            && !stored_name.contains(['/', '\\'])
            && stored_name != "."
            && stored_name != "..";
        if !valid {
            return Err(MediabinError::NotFound("File".to_string()));
        }
        Ok(self.upload_dir.join(stored_name))
    }
}

/// Build a storage name from a millisecond timestamp and an original
/// filename, keeping only the extension.
fn storage_name(timestamp_millis: i64, original_name: &str) -> String {
    match extension(original_name) {
        Some(ext) => format!("{timestamp_millis}.{ext}"),
        None => timestamp_millis.to_string(),
    }
}

/// Extract the extension of a filename, without the dot.
fn extension(filename: &str) -> Option<&str> {
    Path::new(filename).extension().and_then(|s| s.to_str())
}
