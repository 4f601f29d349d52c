//! Bearer-token authentication extractors.
//!
//! Access tokens are minted by the managed identity provider; we verify
//! them locally with the provider's HS256 signing secret instead of a
//! network round-trip per request. Role checks read the mirrored
//! `profiles` table.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use starlet_core::error::CoreError;
use starlet_core::types::EntityId;
use starlet_db::repositories::ProfileRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Claims the identity provider embeds in every access token.
#[derive(Debug, Deserialize)]
pub struct Claims {
    /// The provider-issued user id.
    pub sub: EntityId,
    pub email: Option<String>,
    /// Expiration (UTC Unix timestamp); validated by `jsonwebtoken`.
    #[allow(dead_code)]
    pub exp: i64,
}

/// Validate and decode an access token against the provider secret.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.set_audience(&["authenticated"]);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Authenticated user extracted from a Bearer token in the
/// `Authorization` header.
///
/// Use as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: EntityId,
    pub email: Option<String>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing or invalid authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.supabase_jwt_secret).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

/// Authenticated user whose profile carries the `admin` role.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user: AuthUser,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        let profile = ProfileRepo::find_by_id(&state.pool, user.user_id).await?;
        match profile {
            Some(profile) if profile.role == "admin" => Ok(AdminUser { user }),
            _ => Err(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use uuid::Uuid;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    fn issue(sub: Uuid, aud: &str, exp_offset: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = json!({
            "sub": sub,
            "email": "user@example.com",
            "aud": aud,
            "exp": now + exp_offset,
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn valid_token_decodes() {
        let sub = Uuid::new_v4();
        let claims = validate_token(&issue(sub, "authenticated", 3600), SECRET).unwrap();
        assert_eq!(claims.sub, sub);
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn expired_token_fails() {
        // Well past the default 60-second leeway.
        let token = issue(Uuid::new_v4(), "authenticated", -300);
        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_audience_fails() {
        let token = issue(Uuid::new_v4(), "anon", 3600);
        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_secret_fails() {
        let token = issue(Uuid::new_v4(), "authenticated", 3600);
        assert!(validate_token(&token, "a-different-secret").is_err());
    }
}
