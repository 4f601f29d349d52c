//! Attachment download handlers for generated media.
//!
//! The plain `/media/...` routes serve files inline (tower-http
//! `ServeDir`); these variants add a content-disposition header so
//! browsers save instead of display. Public, like the serving routes.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/download/images/{filename}
pub async fn download_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    serve_attachment(state.media.images_dir(), &filename).await
}

/// GET /api/download/videos/{filename}
pub async fn download_video(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    serve_attachment(state.media.videos_dir(), &filename).await
}

async fn serve_attachment(dir: std::path::PathBuf, filename: &str) -> AppResult<Response> {
    // The filename is a single path segment; anything else is traversal.
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(AppError::BadRequest("Invalid filename".into()));
    }

    let path = dir.join(filename);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(_) => {
            let body = json!({ "error": "File not found", "code": "NOT_FOUND" });
            return Ok((StatusCode::NOT_FOUND, axum::Json(body)).into_response());
        }
    };

    let response = (
        [
            (CONTENT_TYPE, content_type_for(filename).to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    );
    Ok(response.into_response())
}

fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}
