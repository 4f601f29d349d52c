//! Typed shapes for the structured prompt operations.

use serde::{Deserialize, Serialize};

use crate::error::OpenRouterError;

/// The character fields the prompt templates interpolate. Keeps this
/// crate independent of the persistence layer.
#[derive(Debug, Clone)]
pub struct CharacterBrief {
    pub name: String,
    pub personality_traits: Vec<String>,
    pub tone_of_voice: String,
    pub content_style: String,
}

/// A generated persona profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub archetype: String,
    /// 5-7 short trait strings.
    pub personality_traits: Vec<String>,
    pub tone_of_voice: String,
    pub content_style: String,
    /// 3-5 content topics.
    pub content_themes: Vec<String>,
    /// Front-facing ID-photo style portrait description; the seed for
    /// every downstream image generation.
    pub visual_description: String,
}

impl Persona {
    /// Reject personas that cannot drive the pipeline: without a visual
    /// description no image can ever be generated for the character, and
    /// without traits the content templates have nothing to work with.
    pub fn validate(&self) -> Result<(), OpenRouterError> {
        if self.visual_description.trim().is_empty() {
            return Err(OpenRouterError::MalformedResponse(
                "persona is missing a visual description".to_string(),
            ));
        }
        if self.personality_traits.is_empty() {
            return Err(OpenRouterError::MalformedResponse(
                "persona has no personality traits".to_string(),
            ));
        }
        Ok(())
    }
}

/// A generated single-video content plan (legacy flow).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDraft {
    pub title: String,
    pub hook: String,
    /// Target duration; the legacy pipeline clamps this to 5-10.
    pub duration_seconds: i32,
    pub first_frame_prompt: String,
    /// Time-ranged action segments, e.g. `0-2s: ..., 2-5s: ...`.
    pub video_prompt: String,
    pub call_to_action: String,
}
