//! Handlers for the `/characters` resource.

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use starlet_core::error::CoreError;
use starlet_core::generation::ImageMode;
use starlet_core::types::EntityId;
use starlet_core::upload::UploadKind;
use starlet_db::models::character::Character;
use starlet_db::repositories::CharacterRepo;
use starlet_pipeline::NewCharacterInput;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::upload::save_upload_field;
use crate::state::AppState;

/// JSON body for character creation (the multipart variant carries the
/// same fields as form parts, plus an optional `image` file).
#[derive(Debug, Deserialize)]
struct CreateCharacterBody {
    name: Option<String>,
    concept: Option<String>,
    audience: Option<String>,
}

/// GET /api/characters
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Character>>> {
    let characters = CharacterRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(characters))
}

/// POST /api/characters
///
/// Accepts JSON (`name`, `concept`, `audience`) or multipart form data
/// with the same fields plus an optional `image` upload and an
/// `image_mode` of `direct` (use the upload as the portrait) or
/// `generate` (use the upload as a generation reference).
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    request: Request,
) -> AppResult<Json<Character>> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let input = if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        parse_multipart_create(&state, user.user_id, multipart).await?
    } else {
        let Json(body) = Json::<CreateCharacterBody>::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        NewCharacterInput {
            user_id: user.user_id,
            name: body.name.unwrap_or_default(),
            concept: body.concept.unwrap_or_default(),
            audience: body
                .audience
                .unwrap_or_else(|| "General audience".to_string()),
            uploaded_image: None,
            image_mode: ImageMode::Direct,
        }
    };

    if input.name.is_empty() || input.concept.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name and concept are required".into(),
        )));
    }

    let character = state.characters.create(input).await?;
    Ok(Json(character))
}

/// Collect the creation fields out of a multipart body, saving the
/// optional image upload as it streams past.
async fn parse_multipart_create(
    state: &AppState,
    user_id: EntityId,
    mut multipart: Multipart,
) -> AppResult<NewCharacterInput> {
    let mut name = String::new();
    let mut concept = String::new();
    let mut audience = "General audience".to_string();
    let mut image_mode = ImageMode::Direct;
    let mut uploaded_image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => name = text_field(field).await?,
            Some("concept") => concept = text_field(field).await?,
            Some("audience") => audience = text_field(field).await?,
            Some("image_mode") => image_mode = ImageMode::parse(&text_field(field).await?)?,
            Some("image") => {
                // An empty filename means the form's file input was left
                // blank; treat it as no upload.
                if field.file_name().is_some_and(|n| !n.is_empty()) {
                    let saved = save_upload_field(state, UploadKind::Image, "char", field).await?;
                    uploaded_image = Some(saved.web_path);
                }
            }
            _ => {}
        }
    }

    Ok(NewCharacterInput {
        user_id,
        name,
        concept,
        audience,
        uploaded_image,
        image_mode,
    })
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// GET /api/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Character>> {
    let character = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(character))
}

/// DELETE /api/characters/{id}
///
/// Cascades: dependent media and plan rows go first, then the character
/// row, then a best-effort sweep of the files on disk.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    state.characters.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
