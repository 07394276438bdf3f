//! Media handlers: upload, listing, and download.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::media::{MediaListing, MediaRecord};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::SessionUser;

/// Response body for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// The stored record.
    pub file: MediaRecord,
}

/// POST /upload - Store an uploaded file with an optional comment.
///
/// Expects multipart fields `media` (the binary) and `comment`. A request
/// without a `media` field is a 400.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    SessionUser(_username): SessionUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut comment = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed multipart body"))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("media") => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::bad_request("Malformed multipart body"))?;
                file = Some((original_name, data.to_vec()));
            }
            Some("comment") => {
                comment = field
                    .text()
                    .await
                    .map_err(|_| ApiError::bad_request("Malformed multipart body"))?;
            }
            _ => {}
        }
    }

    let (original_name, data) =
        file.ok_or_else(|| ApiError::bad_request("No file uploaded."))?;

    let record = state
        .media
        .lock()
        .await
        .store_upload(&original_name, &data, &comment)?;

    Ok(Json(UploadResponse { file: record }))
}

/// GET /media - List uploaded files joined with their comments.
pub async fn list_media(
    State(state): State<Arc<AppState>>,
    SessionUser(_username): SessionUser,
) -> Result<Json<Vec<MediaListing>>, ApiError> {
    let listings = state.media.lock().await.list()?;
    Ok(Json(listings))
}

/// GET /uploads/:filename - Stream a stored file back to the caller.
///
/// Unauthenticated by design; unknown names are 404s.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let content = state.media.lock().await.open(&filename)?;
    let mime = mime_guess::from_path(&filename).first_or_octet_stream();

    Ok(([(header::CONTENT_TYPE, mime.as_ref())], content).into_response())
}
