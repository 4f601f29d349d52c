//! Handlers for the legacy `/media` resource: plan-driven generation,
//! history, and motion-transfer videos.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use starlet_core::error::CoreError;
use starlet_core::generation::GenerationMode;
use starlet_core::types::EntityId;
use starlet_db::models::media::{Media, MediaWithDetails};
use starlet_db::repositories::{CharacterRepo, ContentPlanRepo, MediaRepo};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::content_plan::parse_optional_id;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateMediaBody {
    plan_id: Option<EntityId>,
    media_type: Option<String>,
    generation_option: Option<String>,
    reference_image_path: Option<String>,
    // Per-request overrides applied to the stored plan before generation.
    title: Option<String>,
    hook: Option<String>,
    first_frame_prompt: Option<String>,
    video_prompt: Option<String>,
    call_to_action: Option<String>,
}

/// POST /api/media/generate
///
/// Generate an image or video for a stored content plan. The request
/// may override the plan's text fields for this call only; the stored
/// plan is not modified.
pub async fn generate(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<GenerateMediaBody>,
) -> AppResult<Json<Value>> {
    let plan_id = body.plan_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation("Plan ID is required".into()))
    })?;

    let mut plan = ContentPlanRepo::find_by_id(&state.pool, plan_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentPlan",
            id: plan_id,
        }))?;

    if let Some(title) = body.title {
        plan.title = title;
    }
    if let Some(hook) = body.hook {
        plan.hook = hook;
    }
    if let Some(first_frame_prompt) = body.first_frame_prompt {
        plan.first_frame_prompt = first_frame_prompt;
    }
    if let Some(video_prompt) = body.video_prompt {
        plan.video_prompt = video_prompt;
    }
    if let Some(call_to_action) = body.call_to_action {
        plan.call_to_action = call_to_action;
    }

    let character = CharacterRepo::find_by_id(&state.pool, plan.character_id).await?;

    let media_type = body.media_type.as_deref().unwrap_or("image");
    let option = GenerationMode::parse(body.generation_option.as_deref().unwrap_or("ref_image"))?;
    let reference = body.reference_image_path.as_deref();

    if media_type == "video" {
        let outcome = state
            .legacy_media
            .generate_video(&plan, character.as_ref(), option, reference)
            .await?;
        Ok(Json(json!({
            "media_type": "video",
            "video_path": outcome.video_path,
            "first_frame_path": outcome.first_frame_path,
        })))
    } else {
        let file_path = state
            .legacy_media
            .generate_image(&plan, character.as_ref(), option, reference)
            .await?;
        Ok(Json(json!({
            "media_type": "image",
            "file_path": file_path,
        })))
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub character_id: Option<String>,
    pub media_type: Option<String>,
}

/// GET /api/media/history
pub async fn history(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<Vec<MediaWithDetails>>> {
    let character_id = parse_optional_id(params.character_id.as_deref())?;
    let media_type = params.media_type.filter(|t| !t.is_empty());
    let media = MediaRepo::history(&state.pool, character_id, media_type.as_deref()).await?;
    Ok(Json(media))
}

/// GET /api/media/{plan_id}
pub async fn list_by_plan(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(plan_id): Path<EntityId>,
) -> AppResult<Json<Vec<Media>>> {
    let media = MediaRepo::list_by_plan(&state.pool, plan_id).await?;
    Ok(Json(media))
}

#[derive(Debug, Deserialize)]
pub struct MotionTransferBody {
    character_id: Option<EntityId>,
    driving_video_path: Option<String>,
    plan_id: Option<EntityId>,
}

/// POST /api/media/generate-dreamactor
///
/// Legacy motion-transfer generation: the character's portrait driven
/// by an uploaded video.
pub async fn generate_motion_transfer(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<MotionTransferBody>,
) -> AppResult<Json<Value>> {
    let (character_id, driving_video_path) = match (
        body.character_id,
        body.driving_video_path.filter(|p| !p.is_empty()),
    ) {
        (Some(character_id), Some(path)) => (character_id, path),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "character_id and driving_video_path are required".into(),
            )))
        }
    };

    let character = CharacterRepo::find_by_id(&state.pool, character_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: character_id,
        }))?;

    let video_path = state
        .legacy_media
        .generate_motion_transfer(&character, &driving_video_path, body.plan_id)
        .await?;

    Ok(Json(json!({
        "media_type": "video",
        "video_path": video_path,
    })))
}
