//! Repository for the `profiles` table.

use sqlx::PgPool;
use starlet_core::types::EntityId;

use crate::models::profile::Profile;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, role, created_at";

/// Read operations over the identity-provider-mirrored profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by identity-provider user id.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles ORDER BY created_at DESC");
        sqlx::query_as::<_, Profile>(&query).fetch_all(pool).await
    }

    /// Insert or update a profile row, returning it. Last write wins on
    /// email/role, matching the provider's own upsert semantics.
    pub async fn upsert(
        pool: &PgPool,
        id: EntityId,
        email: Option<&str>,
        role: &str,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (id, email, role)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email, role = EXCLUDED.role
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(email)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Delete a profile row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
