//! Handlers for the legacy `/content-plans` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use starlet_core::error::CoreError;
use starlet_core::types::EntityId;
use starlet_db::models::content_plan::ContentPlan;
use starlet_db::repositories::{CharacterRepo, ContentPlanRepo};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub character_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanBody {
    character_id: Option<EntityId>,
    theme: Option<String>,
}

/// Parse an optional uuid query value, treating an empty string as
/// absent (HTML forms submit empty fields).
pub fn parse_optional_id(value: Option<&str>) -> Result<Option<EntityId>, CoreError> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| CoreError::Validation(format!("Invalid id '{raw}'"))),
    }
}

/// GET /api/content-plans
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<ContentPlan>>> {
    let character_id = parse_optional_id(params.character_id.as_deref())?;
    let plans = ContentPlanRepo::list(&state.pool, character_id).await?;
    Ok(Json(plans))
}

/// POST /api/content-plans
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<CreatePlanBody>,
) -> AppResult<Json<ContentPlan>> {
    let (character_id, theme) = match (body.character_id, body.theme.filter(|t| !t.is_empty())) {
        (Some(character_id), Some(theme)) => (character_id, theme),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Character ID and theme are required".into(),
            )))
        }
    };

    let character = CharacterRepo::find_by_id(&state.pool, character_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: character_id,
        }))?;

    let plan = state.content.create_plan(&character, &theme).await?;
    Ok(Json(plan))
}

/// GET /api/content-plans/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<ContentPlan>> {
    let plan = ContentPlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentPlan",
            id,
        }))?;
    Ok(Json(plan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_id_treats_empty_as_absent() {
        assert_eq!(parse_optional_id(None).unwrap(), None);
        assert_eq!(parse_optional_id(Some("")).unwrap(), None);

        let id = uuid::Uuid::new_v4();
        assert_eq!(
            parse_optional_id(Some(&id.to_string())).unwrap(),
            Some(id)
        );
        assert!(parse_optional_id(Some("not-a-uuid")).is_err());
    }
}
