//! Repository for the `content_plans` table (legacy single-video scripts).

use sqlx::PgPool;
use starlet_core::types::EntityId;

use crate::models::content_plan::{ContentPlan, CreateContentPlan};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, character_id, title, theme, platform, hook, duration_seconds, \
     first_frame_prompt, video_prompt, call_to_action, created_at";

/// Provides create/read operations for content plans. Plans are
/// read-only after creation; they are removed only by the character
/// cascade delete.
pub struct ContentPlanRepo;

impl ContentPlanRepo {
    /// Insert a new content plan, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContentPlan,
    ) -> Result<ContentPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_plans (id, character_id, title, theme, platform, hook,
                 duration_seconds, first_frame_prompt, video_prompt, call_to_action)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentPlan>(&query)
            .bind(input.id)
            .bind(input.character_id)
            .bind(&input.title)
            .bind(&input.theme)
            .bind(&input.platform)
            .bind(&input.hook)
            .bind(input.duration_seconds)
            .bind(&input.first_frame_prompt)
            .bind(&input.video_prompt)
            .bind(&input.call_to_action)
            .fetch_one(pool)
            .await
    }

    /// Find a content plan by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<ContentPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_plans WHERE id = $1");
        sqlx::query_as::<_, ContentPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List content plans, newest first, optionally filtered by character.
    pub async fn list(
        pool: &PgPool,
        character_id: Option<EntityId>,
    ) -> Result<Vec<ContentPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_plans
             WHERE ($1::uuid IS NULL OR character_id = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ContentPlan>(&query)
            .bind(character_id)
            .fetch_all(pool)
            .await
    }
}
