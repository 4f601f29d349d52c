//! Character entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use starlet_core::types::{EntityId, Timestamp};

/// A character row from the `characters` table.
///
/// Immutable after creation except for the `image_path` backfill done by
/// the character pipeline.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: EntityId,
    pub user_id: EntityId,
    pub name: String,
    /// Free text used as the seed for every image generation.
    pub visual_description: String,
    pub personality_traits: Vec<String>,
    pub tone_of_voice: String,
    pub content_style: String,
    pub target_audience: String,
    pub content_themes: Vec<String>,
    /// Web path of the canonical reference portrait, once resolved.
    pub image_path: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new character. Built by the character pipeline
/// after persona generation and image resolution succeed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub id: EntityId,
    pub user_id: EntityId,
    pub name: String,
    pub visual_description: String,
    pub personality_traits: Vec<String>,
    pub tone_of_voice: String,
    pub content_style: String,
    pub target_audience: String,
    pub content_themes: Vec<String>,
    pub image_path: Option<String>,
}
