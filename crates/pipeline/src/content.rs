//! Legacy content-planning service: one LLM call, one persisted plan.

use std::sync::Arc;

use starlet_db::models::character::Character;
use starlet_db::models::content_plan::{ContentPlan, CreateContentPlan};
use starlet_db::repositories::ContentPlanRepo;
use starlet_db::DbPool;
use uuid::Uuid;

use crate::character::character_brief;
use crate::error::PipelineError;
use crate::seams::PromptAuthor;

/// Creates single-video content plans for a character.
pub struct ContentService {
    pool: DbPool,
    author: Arc<dyn PromptAuthor>,
}

impl ContentService {
    pub fn new(pool: DbPool, author: Arc<dyn PromptAuthor>) -> Self {
        Self { pool, author }
    }

    /// Generate and persist a single-video content plan. A malformed LLM
    /// reply fails the whole operation; nothing is stored.
    pub async fn create_plan(
        &self,
        character: &Character,
        theme: &str,
    ) -> Result<ContentPlan, PipelineError> {
        let brief = character_brief(character);
        let draft = self.author.content_plan(&brief, theme).await?;

        let plan = ContentPlanRepo::create(
            &self.pool,
            &CreateContentPlan {
                id: Uuid::new_v4(),
                character_id: character.id,
                title: draft.title,
                theme: theme.to_string(),
                platform: String::new(),
                hook: draft.hook,
                duration_seconds: draft.duration_seconds,
                first_frame_prompt: draft.first_frame_prompt,
                video_prompt: draft.video_prompt,
                call_to_action: draft.call_to_action,
            },
        )
        .await?;

        tracing::info!(plan_id = %plan.id, character_id = %character.id, "Content plan created");
        Ok(plan)
    }
}
