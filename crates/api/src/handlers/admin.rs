//! Admin user-management handlers. Account creation and deletion proxy
//! the identity provider's admin API and mirror into `profiles`.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use starlet_core::error::CoreError;
use starlet_core::types::EntityId;
use starlet_db::models::profile::Profile;
use starlet_db::repositories::ProfileRepo;

use crate::auth::AdminUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::supabase::SupabaseError;

impl From<SupabaseError> for AppError {
    fn from(err: SupabaseError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Profile>>> {
    let profiles = ProfileRepo::list(&state.pool).await?;
    Ok(Json(profiles))
}

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<CreateUserBody>,
) -> AppResult<Json<Value>> {
    let (email, password) = match (
        body.email.filter(|e| !e.is_empty()),
        body.password.filter(|p| !p.is_empty()),
    ) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Email and password are required".into(),
            )))
        }
    };
    let role = body.role.unwrap_or_else(|| "user".to_string());

    let created = state.supabase.create_user(&email, &password, &role).await?;
    let profile =
        ProfileRepo::upsert(&state.pool, created.id, created.email.as_deref(), &role).await?;

    Ok(Json(json!({
        "id": profile.id,
        "email": profile.email,
        "role": profile.role,
    })))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    if id == admin.user.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot delete yourself".into(),
        )));
    }

    state.supabase.delete_user(id).await?;
    ProfileRepo::delete(&state.pool, id).await?;

    Ok(Json(json!({ "success": true })))
}
