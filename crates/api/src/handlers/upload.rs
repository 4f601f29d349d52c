//! Upload handlers and the shared multipart-saving helper.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use starlet_core::error::CoreError;
use starlet_core::media::{self, MediaRoot};
use starlet_core::upload::{validate_upload, UploadKind};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response for the upload endpoints: the local filesystem path (fed
/// back into generation requests) and the served web path.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub file_path: String,
    pub web_path: String,
}

/// A validated upload written to the media tree.
pub struct SavedUpload {
    pub local_path: std::path::PathBuf,
    pub web_path: String,
}

/// Validate one multipart file field and write it into the media tree
/// under `{prefix}_{hex}.{ext}`.
pub async fn save_upload_field(
    state: &AppState,
    kind: UploadKind,
    prefix: &str,
    field: axum::extract::multipart::Field<'_>,
) -> AppResult<SavedUpload> {
    let original_name = field
        .file_name()
        .map(str::to_string)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("No file selected".into())))?;

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let ext = validate_upload(kind, &original_name, data.len() as u64)?;

    let filename = media::upload_filename(prefix, &ext);
    let (local_path, web_path) = match kind {
        UploadKind::Image => (
            state.media.image_local_path(&filename),
            MediaRoot::image_web_path(&filename),
        ),
        UploadKind::Video => (
            state.media.video_local_path(&filename),
            MediaRoot::video_web_path(&filename),
        ),
    };

    tokio::fs::write(&local_path, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to save upload: {e}")))?;

    tracing::debug!(file = %local_path.display(), size = data.len(), "Upload saved");
    Ok(SavedUpload {
        local_path,
        web_path,
    })
}

/// Find the `file` field in a multipart body and save it.
async fn save_file_upload(
    state: &AppState,
    kind: UploadKind,
    prefix: &str,
    multipart: &mut Multipart,
) -> AppResult<SavedUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            return save_upload_field(state, kind, prefix, field).await;
        }
    }
    Err(AppError::Core(CoreError::Validation(
        "No file provided".into(),
    )))
}

/// POST /api/upload/image
///
/// Save a reference image (≤ 10MB, png/jpg/jpeg/webp).
pub async fn upload_image(
    State(state): State<AppState>,
    _user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResult>> {
    let saved = save_file_upload(&state, UploadKind::Image, "ref", &mut multipart).await?;
    Ok(Json(UploadResult {
        file_path: saved.local_path.display().to_string(),
        web_path: saved.web_path,
    }))
}

/// POST /api/media/upload-video
///
/// Save a driving video (≤ 100MB, mp4/mov/webm).
pub async fn upload_video(
    State(state): State<AppState>,
    _user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResult>> {
    let saved = save_file_upload(&state, UploadKind::Video, "upload", &mut multipart).await?;
    Ok(Json(UploadResult {
        file_path: saved.local_path.display().to_string(),
        web_path: saved.web_path,
    }))
}
