//! Content-plan entity model and DTOs (legacy single-video scripts).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use starlet_core::types::{EntityId, Timestamp};

/// A content-plan row from the `content_plans` table. Read-only after
/// creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentPlan {
    pub id: EntityId,
    pub character_id: EntityId,
    pub title: String,
    pub theme: String,
    /// Platform tag; empty for plans created through the API.
    pub platform: String,
    pub hook: String,
    pub duration_seconds: i32,
    pub first_frame_prompt: String,
    pub video_prompt: String,
    pub call_to_action: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new content plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentPlan {
    pub id: EntityId,
    pub character_id: EntityId,
    pub title: String,
    pub theme: String,
    pub platform: String,
    pub hook: String,
    pub duration_seconds: i32,
    pub first_frame_prompt: String,
    pub video_prompt: String,
    pub call_to_action: String,
}
