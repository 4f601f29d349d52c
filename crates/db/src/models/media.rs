//! Media entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use starlet_core::types::{EntityId, Timestamp};

/// A media row from the `media` table: one generated artifact. Created
/// exactly once per successful generation call, never mutated, deleted
/// only by cascading character deletion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    pub id: EntityId,
    /// Legacy plan reference; v2 rows link the character directly.
    pub plan_id: Option<EntityId>,
    pub character_id: Option<EntityId>,
    /// `image` or `video`.
    pub media_type: String,
    /// Web path of the artifact.
    pub file_path: String,
    /// `ref_image`, `text_only`, `video`, or `motion_control`.
    pub generation_mode: Option<String>,
    pub prompt: Option<String>,
    pub video_prompt: Option<String>,
    /// Web path of the first-frame still, for videos.
    pub first_frame_path: Option<String>,
    /// Web path of the user-supplied reference image input, if any.
    pub reference_image_path: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a media row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMedia {
    pub plan_id: Option<EntityId>,
    pub character_id: Option<EntityId>,
    pub media_type: String,
    pub file_path: String,
    pub generation_mode: Option<String>,
    pub prompt: Option<String>,
    pub video_prompt: Option<String>,
    pub first_frame_path: Option<String>,
    pub reference_image_path: Option<String>,
}

/// A media row joined with the owning character's name/portrait and the
/// plan fields the history view shows. Produced by
/// [`MediaRepo::history`](crate::repositories::MediaRepo::history).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaWithDetails {
    pub id: EntityId,
    pub plan_id: Option<EntityId>,
    pub character_id: Option<EntityId>,
    pub media_type: String,
    pub file_path: String,
    pub generation_mode: Option<String>,
    pub prompt: Option<String>,
    pub video_prompt: Option<String>,
    pub first_frame_path: Option<String>,
    pub reference_image_path: Option<String>,
    pub created_at: Timestamp,
    pub character_name: Option<String>,
    pub character_image_path: Option<String>,
    pub plan_title: Option<String>,
    pub plan_theme: Option<String>,
    pub hook: Option<String>,
    pub plan_first_frame_prompt: Option<String>,
    pub plan_video_prompt: Option<String>,
    pub call_to_action: Option<String>,
    pub duration_seconds: Option<i32>,
}
