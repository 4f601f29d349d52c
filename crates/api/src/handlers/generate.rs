//! Handlers for the v2 `/generate` endpoints: direct image generation,
//! the two-phase video flow, and motion-control videos.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use starlet_core::error::CoreError;
use starlet_core::generation::GenerationMode;
use starlet_core::types::EntityId;
use starlet_db::models::character::Character;
use starlet_db::repositories::CharacterRepo;
use starlet_pipeline::PreparedVideo;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

async fn require_character(state: &AppState, id: Option<EntityId>) -> AppResult<Character> {
    let id = id.ok_or_else(|| {
        AppError::Core(CoreError::Validation("character_id is required".into()))
    })?;
    CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))
}

#[derive(Debug, Deserialize)]
pub struct GenerateImageBody {
    character_id: Option<EntityId>,
    prompt: Option<String>,
    option: Option<String>,
    reference_image_path: Option<String>,
}

/// POST /api/generate/image
pub async fn generate_image(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<GenerateImageBody>,
) -> AppResult<Json<Value>> {
    let prompt = body.prompt.filter(|p| !p.is_empty()).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "character_id and prompt are required".into(),
        ))
    })?;
    let character = require_character(&state, body.character_id).await?;
    let option = GenerationMode::parse(body.option.as_deref().unwrap_or("ref_image"))?;

    let media = state
        .generate
        .generate_image(
            &character,
            &prompt,
            option,
            body.reference_image_path.as_deref(),
        )
        .await?;

    Ok(Json(json!({
        "media_id": media.id,
        "file_path": media.file_path,
    })))
}

#[derive(Debug, Deserialize)]
pub struct PrepareVideoBody {
    character_id: Option<EntityId>,
    concept: Option<String>,
    option: Option<String>,
    reference_image_path: Option<String>,
}

/// POST /api/generate/video/prepare
///
/// Phase 1 of the video flow: returns a first-frame preview and an
/// editable video prompt. Persists nothing.
pub async fn prepare_video(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<PrepareVideoBody>,
) -> AppResult<Json<PreparedVideo>> {
    let concept = body.concept.filter(|c| !c.is_empty()).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "character_id and concept are required".into(),
        ))
    })?;
    let character = require_character(&state, body.character_id).await?;
    let option = GenerationMode::parse(body.option.as_deref().unwrap_or("text_only"))?;

    let prepared = state
        .generate
        .prepare_video(
            &character,
            &concept,
            option,
            body.reference_image_path.as_deref(),
        )
        .await?;

    Ok(Json(prepared))
}

#[derive(Debug, Deserialize)]
pub struct FinalizeVideoBody {
    character_id: Option<EntityId>,
    first_frame_path: Option<String>,
    video_prompt: Option<String>,
    concept: Option<String>,
}

/// POST /api/generate/video/final
///
/// Phase 2 of the video flow: commits the (possibly edited) prepare
/// result to a video and exactly one media row.
pub async fn finalize_video(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<FinalizeVideoBody>,
) -> AppResult<Json<Value>> {
    let (first_frame_path, video_prompt) = match (
        body.first_frame_path.filter(|p| !p.is_empty()),
        body.video_prompt.filter(|p| !p.is_empty()),
    ) {
        (Some(first_frame_path), Some(video_prompt)) => (first_frame_path, video_prompt),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "character_id, first_frame_path, and video_prompt are required".into(),
            )))
        }
    };
    let character = require_character(&state, body.character_id).await?;
    let concept = body.concept.unwrap_or_default();

    let media = state
        .generate
        .finalize_video(&character, &first_frame_path, &video_prompt, &concept)
        .await?;

    Ok(Json(json!({
        "media_id": media.id,
        "video_path": media.file_path,
        "first_frame_path": first_frame_path,
    })))
}

#[derive(Debug, Deserialize)]
pub struct MotionVideoBody {
    character_id: Option<EntityId>,
    prompt: Option<String>,
    driving_video_path: Option<String>,
}

/// POST /api/generate/video/motion
pub async fn generate_motion_video(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<MotionVideoBody>,
) -> AppResult<Json<Value>> {
    let (prompt, driving_video_path) = match (
        body.prompt.filter(|p| !p.is_empty()),
        body.driving_video_path.filter(|p| !p.is_empty()),
    ) {
        (Some(prompt), Some(path)) => (prompt, path),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "character_id, prompt, and driving_video_path are required".into(),
            )))
        }
    };
    let character = require_character(&state, body.character_id).await?;

    let media = state
        .generate
        .generate_motion_video(&character, &prompt, &driving_video_path)
        .await?;

    Ok(Json(json!({
        "media_id": media.id,
        "video_path": media.file_path,
    })))
}
