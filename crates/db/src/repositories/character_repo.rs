//! Repository for the `characters` table, including the cascading delete
//! that clears every dependent row before the character itself.

use sqlx::PgPool;
use starlet_core::types::EntityId;

use crate::models::character::{Character, CreateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, visual_description, personality_traits, \
     tone_of_voice, content_style, target_audience, content_themes, image_path, created_at";

/// Everything a cascade delete leaves for the caller to clean up:
/// the web paths of files that belonged to the deleted rows.
#[derive(Debug, Default)]
pub struct CharacterPurge {
    pub file_paths: Vec<String>,
}

/// Provides CRUD operations for characters plus the cascade delete.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (id, user_id, name, visual_description, personality_traits,
                 tone_of_voice, content_style, target_audience, content_themes, image_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(input.id)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.visual_description)
            .bind(&input.personality_traits)
            .bind(&input.tone_of_voice)
            .bind(&input.content_style)
            .bind(&input.target_audience)
            .bind(&input.content_themes)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    /// Find a character by id.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all characters owned by `user_id`, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: EntityId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Backfill the reference-portrait path. The only mutation a character
    /// row ever sees after creation.
    pub async fn update_image_path(
        pool: &PgPool,
        id: EntityId,
        image_path: &str,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET image_path = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(image_path)
            .fetch_optional(pool)
            .await
    }

    /// Delete a character and every dependent row.
    ///
    /// The remote store offers no cross-entity transaction, so this is
    /// transactional-in-intent: enumerate dependent media (direct and via
    /// content plans), collect every referenced file path, then delete
    /// rows child-first. Returns the collected paths so the caller can
    /// best-effort remove the files afterwards -- row deletion must never
    /// wait on disk cleanup.
    pub async fn delete_cascade(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<CharacterPurge, sqlx::Error> {
        let direct_media: Vec<(Option<String>, Option<String>)> = sqlx::query_as(
            "SELECT file_path, first_frame_path FROM media WHERE character_id = $1",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let plan_ids: Vec<EntityId> =
            sqlx::query_scalar("SELECT id FROM content_plans WHERE character_id = $1")
                .bind(id)
                .fetch_all(pool)
                .await?;

        let plan_media: Vec<(Option<String>, Option<String>)> = if plan_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as(
                "SELECT file_path, first_frame_path FROM media WHERE plan_id = ANY($1)",
            )
            .bind(&plan_ids)
            .fetch_all(pool)
            .await?
        };

        let image_path: Option<String> =
            sqlx::query_scalar("SELECT image_path FROM characters WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?
                .flatten();

        let file_paths = collect_cleanup_paths(
            direct_media.iter().chain(plan_media.iter()),
            image_path.as_deref(),
        );
        tracing::debug!(
            character_id = %id,
            media_rows = direct_media.len() + plan_media.len(),
            plans = plan_ids.len(),
            files = file_paths.len(),
            "Cascading character delete"
        );

        sqlx::query("DELETE FROM media WHERE character_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if !plan_ids.is_empty() {
            sqlx::query("DELETE FROM media WHERE plan_id = ANY($1)")
                .bind(&plan_ids)
                .execute(pool)
                .await?;
        }
        sqlx::query("DELETE FROM content_plans WHERE character_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(CharacterPurge { file_paths })
    }
}

/// Flatten media (file, first-frame) path pairs plus the character's
/// portrait into the list of files a cascade delete should remove.
fn collect_cleanup_paths<'a>(
    media_rows: impl Iterator<Item = &'a (Option<String>, Option<String>)>,
    character_image: Option<&str>,
) -> Vec<String> {
    let mut paths = Vec::new();
    for (file_path, first_frame_path) in media_rows {
        if let Some(p) = file_path.as_deref().filter(|p| !p.is_empty()) {
            paths.push(p.to_string());
        }
        if let Some(p) = first_frame_path.as_deref().filter(|p| !p.is_empty()) {
            paths.push(p.to_string());
        }
    }
    if let Some(p) = character_image.filter(|p| !p.is_empty()) {
        paths.push(p.to_string());
    }
    paths
}
