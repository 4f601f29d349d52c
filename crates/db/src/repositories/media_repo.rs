//! Repository for the `media` table.

use sqlx::PgPool;
use starlet_core::types::EntityId;

use crate::models::media::{CreateMedia, Media, MediaWithDetails};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, plan_id, character_id, media_type, file_path, generation_mode, \
     prompt, video_prompt, first_frame_path, reference_image_path, created_at";

/// Provides insert/read operations for media rows. Rows are written
/// exactly once per successful generation call and never mutated.
pub struct MediaRepo;

impl MediaRepo {
    /// Insert a media row, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMedia) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media (plan_id, character_id, media_type, file_path, generation_mode,
                 prompt, video_prompt, first_frame_path, reference_image_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(input.plan_id)
            .bind(input.character_id)
            .bind(&input.media_type)
            .bind(&input.file_path)
            .bind(&input.generation_mode)
            .bind(&input.prompt)
            .bind(&input.video_prompt)
            .bind(&input.first_frame_path)
            .bind(&input.reference_image_path)
            .fetch_one(pool)
            .await
    }

    /// List media rows for a legacy content plan, newest first.
    pub async fn list_by_plan(
        pool: &PgPool,
        plan_id: EntityId,
    ) -> Result<Vec<Media>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM media WHERE plan_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Media>(&query)
            .bind(plan_id)
            .fetch_all(pool)
            .await
    }

    /// Media history with character and plan details, newest first.
    ///
    /// Both filters are optional; a NULL bind disables the corresponding
    /// predicate so one static query covers every combination.
    pub async fn history(
        pool: &PgPool,
        character_id: Option<EntityId>,
        media_type: Option<&str>,
    ) -> Result<Vec<MediaWithDetails>, sqlx::Error> {
        sqlx::query_as::<_, MediaWithDetails>(
            "SELECT m.id, m.plan_id, m.character_id, m.media_type, m.file_path,
                    m.generation_mode, m.prompt, m.video_prompt, m.first_frame_path,
                    m.reference_image_path, m.created_at,
                    c.name AS character_name, c.image_path AS character_image_path,
                    p.title AS plan_title, p.theme AS plan_theme, p.hook,
                    p.first_frame_prompt AS plan_first_frame_prompt,
                    p.video_prompt AS plan_video_prompt,
                    p.call_to_action, p.duration_seconds
             FROM media m
             LEFT JOIN characters c ON c.id = m.character_id
             LEFT JOIN content_plans p ON p.id = m.plan_id
             WHERE ($1::uuid IS NULL OR m.character_id = $1)
               AND ($2::text IS NULL OR m.media_type = $2)
             ORDER BY m.created_at DESC",
        )
        .bind(character_id)
        .bind(media_type)
        .fetch_all(pool)
        .await
    }
}
