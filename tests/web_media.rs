//! Web media tests.
//!
//! Integration tests for upload, listing, and download endpoints.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use mediabin::auth::{AuthService, CredentialStore};
use mediabin::media::{MediaService, MediaStore};
use mediabin::web::handlers::AppState;
use mediabin::web::router::create_router;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a test server over a temporary data directory.
fn create_test_server() -> (TestServer, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let static_path = dir.path().join("public");
    fs::create_dir_all(&static_path).unwrap();
    fs::write(static_path.join("scripts.js"), "// client script").unwrap();

    let credentials = CredentialStore::open(dir.path().join("users.json")).unwrap();
    let metadata = MediaStore::open(dir.path().join("comments.json")).unwrap();
    let media = MediaService::new(dir.path().join("uploads"), metadata).unwrap();

    let state = Arc::new(AppState::new(
        AuthService::new(credentials),
        media,
        static_path,
    ));

    let mut server = TestServer::new(create_router(state)).expect("Failed to create test server");
    server.save_cookies();

    (server, dir)
}

fn upload_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("uploads")
}

/// Register and log in a test user; the server keeps the session cookie.
async fn authenticate(server: &TestServer) {
    let response = server
        .post("/register")
        .form(&json!({ "username": "alice", "password": "pw123" }))
        .await;
    response.assert_status(StatusCode::FOUND);

    let response = server
        .post("/login")
        .form(&json!({ "username": "alice", "password": "pw123" }))
        .await;
    response.assert_status(StatusCode::FOUND);
}

/// Upload a file and return the stored record.
async fn upload_file(server: &TestServer, name: &str, content: &[u8], comment: &str) -> Value {
    let form = MultipartForm::new()
        .add_part("media", Part::bytes(content.to_vec()).file_name(name))
        .add_text("comment", comment);

    let response = server.post("/upload").multipart(form).await;
    response.assert_status_ok();
    response.json::<Value>()
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn test_upload_returns_stored_record() {
    let (server, _dir) = create_test_server();
    authenticate(&server).await;

    let body = upload_file(&server, "cat.jpg", b"jpegbytes", "my cat").await;

    assert_eq!(body["file"]["originalname"], "cat.jpg");
    assert_eq!(body["file"]["comment"], "my cat");
    let filename = body["file"]["filename"].as_str().unwrap();
    assert!(filename.ends_with(".jpg"));
}

#[tokio::test]
async fn test_upload_persists_exactly_one_record() {
    let (server, dir) = create_test_server();
    authenticate(&server).await;

    let body = upload_file(&server, "cat.jpg", b"jpegbytes", "hi").await;
    let filename = body["file"]["filename"].as_str().unwrap();

    let raw = fs::read_to_string(dir.path().join("comments.json")).unwrap();
    let records: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(records.as_object().unwrap().len(), 1);
    assert_eq!(records[filename]["comment"], "hi");

    // The binary landed in the upload directory
    assert!(upload_dir(&dir).join(filename).exists());
}

#[tokio::test]
async fn test_upload_comment_defaults_to_empty() {
    let (server, _dir) = create_test_server();
    authenticate(&server).await;

    let form = MultipartForm::new()
        .add_part("media", Part::bytes(b"data".to_vec()).file_name("a.png"));

    let response = server.post("/upload").multipart(form).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["file"]["comment"], "");
}

#[tokio::test]
async fn test_upload_without_file_is_bad_request() {
    let (server, _dir) = create_test_server();
    authenticate(&server).await;

    let form = MultipartForm::new().add_text("comment", "no file here");

    let response = server.post("/upload").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "No file uploaded.");
}

#[tokio::test]
async fn test_upload_requires_session() {
    let (server, _dir) = create_test_server();

    let form = MultipartForm::new()
        .add_part("media", Part::bytes(b"data".to_vec()).file_name("a.png"));

    let response = server.post("/upload").multipart(form).await;
    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "/login");
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_media_list_joins_comments() {
    let (server, _dir) = create_test_server();
    authenticate(&server).await;

    let body = upload_file(&server, "cat.jpg", b"jpegbytes", "my cat").await;
    let filename = body["file"]["filename"].as_str().unwrap().to_string();

    let response = server.get("/media").await;
    response.assert_status_ok();
    let listings: Value = response.json();

    let listings = listings.as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["name"], filename.as_str());
    assert_eq!(listings[0]["url"], format!("/uploads/{filename}"));
    assert_eq!(listings[0]["type"], "jpg");
    assert_eq!(listings[0]["comment"], "my cat");
}

#[tokio::test]
async fn test_media_list_orphan_file_gets_empty_comment() {
    let (server, dir) = create_test_server();
    authenticate(&server).await;

    fs::write(upload_dir(&dir).join("stray.gif"), b"gif").unwrap();

    let response = server.get("/media").await;
    response.assert_status_ok();
    let listings: Value = response.json();

    let listings = listings.as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["name"], "stray.gif");
    assert_eq!(listings[0]["type"], "gif");
    assert_eq!(listings[0]["comment"], "");
}

// ============================================================================
// Download
// ============================================================================

#[tokio::test]
async fn test_download_roundtrip() {
    let (server, _dir) = create_test_server();
    authenticate(&server).await;

    let content = b"\x89PNG\r\n\x1a\nbinary-bytes";
    let body = upload_file(&server, "pixel.png", content, "").await;
    let filename = body["file"]["filename"].as_str().unwrap().to_string();

    let response = server.get(&format!("/uploads/{filename}")).await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), &content[..]);
    assert_eq!(response.header("content-type"), "image/png");
}

#[tokio::test]
async fn test_download_needs_no_session() {
    let (server, dir) = create_test_server();

    fs::write(upload_dir(&dir).join("1700000000000.txt"), b"hello").unwrap();

    let response = server.get("/uploads/1700000000000.txt").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "hello");
}

#[tokio::test]
async fn test_download_missing_file_is_404() {
    let (server, _dir) = create_test_server();

    let response = server.get("/uploads/1700000000000.jpg").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "File not found");
}

// ============================================================================
// Static assets and unmatched routes
// ============================================================================

#[tokio::test]
async fn test_static_asset_served_from_fallback() {
    let (server, _dir) = create_test_server();

    let response = server.get("/scripts.js").await;
    response.assert_status_ok();
    assert!(response.text().contains("client script"));
}

#[tokio::test]
async fn test_unmatched_route_is_404() {
    let (server, _dir) = create_test_server();

    let response = server.get("/no/such/route").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "404 Not Found");
}
