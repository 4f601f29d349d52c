//! v2 generation service: direct image generation, the two-phase video
//! protocol, and motion-control videos. No content plan involved.
//!
//! The two-phase video flow is the one real multi-step protocol in the
//! system: *prepare* produces a first-frame still and an LLM-authored
//! video prompt without persisting anything, the caller may edit or
//! discard both, and *finalize* turns them into a video and exactly one
//! media row. Prepared state is caller-held; it does not survive a
//! restart.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use starlet_core::error::CoreError;
use starlet_core::generation::{GenerationMode, MediaKind};
use starlet_core::media::{self, MediaRoot};
use starlet_db::models::character::Character;
use starlet_db::models::media::{CreateMedia, Media};
use starlet_db::repositories::MediaRepo;
use starlet_db::DbPool;
use starlet_fal::ImageSource;

use crate::character::character_brief;
use crate::error::PipelineError;
use crate::seams::{MediaGenerator, PromptAuthor};

/// Caller-held result of the prepare phase. Nothing is persisted until
/// the caller commits via [`GenerateService::finalize_video`].
#[derive(Debug, Clone, Serialize)]
pub struct PreparedVideo {
    pub prepare_id: String,
    pub first_frame_path: String,
    pub video_prompt: String,
}

/// Direct generation against an existing character.
pub struct GenerateService {
    pool: DbPool,
    media: MediaRoot,
    generator: Arc<dyn MediaGenerator>,
    author: Arc<dyn PromptAuthor>,
}

impl GenerateService {
    pub fn new(
        pool: DbPool,
        media: MediaRoot,
        generator: Arc<dyn MediaGenerator>,
        author: Arc<dyn PromptAuthor>,
    ) -> Self {
        Self {
            pool,
            media,
            generator,
            author,
        }
    }

    /// Local path of the character's reference portrait.
    ///
    /// Every entry point requires the portrait; its absence is a
    /// precondition failure, not a generation failure.
    fn require_portrait(&self, character: &Character) -> Result<PathBuf, CoreError> {
        let web_path = character.image_path.as_deref().ok_or_else(|| {
            CoreError::Precondition("Character has no reference portrait".to_string())
        })?;
        Ok(self.media.to_local(web_path))
    }

    /// Generate an image for the character and persist one media row of
    /// kind `image`.
    ///
    /// The character portrait is always included as a reference for
    /// visual consistency; `ref_image` may add one user-supplied
    /// reference on top.
    pub async fn generate_image(
        &self,
        character: &Character,
        prompt: &str,
        option: GenerationMode,
        reference_image_path: Option<&str>,
    ) -> Result<Media, PipelineError> {
        let portrait = self.require_portrait(character)?;
        let filename = media::generated_image_filename();
        let dest = self.media.image_local_path(&filename);

        let mut references = vec![portrait];
        if option == GenerationMode::RefImage {
            if let Some(reference) = reference_image_path {
                references.push(self.media.to_local(reference));
            }
        }

        self.generator
            .image_from_references(prompt, &references, &dest)
            .await?;

        let row = MediaRepo::create(
            &self.pool,
            &CreateMedia {
                character_id: Some(character.id),
                media_type: MediaKind::Image.as_str().to_string(),
                file_path: MediaRoot::image_web_path(&filename),
                generation_mode: Some(option.as_str().to_string()),
                prompt: Some(prompt.to_string()),
                reference_image_path: reference_image_path.map(String::from),
                ..Default::default()
            },
        )
        .await?;

        tracing::info!(media_id = %row.id, character_id = %character.id, "Image generated");
        Ok(row)
    }

    /// Phase 1 of the video flow: generate a first-frame still and an
    /// LLM-authored video prompt. Persists nothing -- this is a preview
    /// the caller can re-run, edit, or discard.
    ///
    /// The two remote calls are sequential: image first, prompt second.
    pub async fn prepare_video(
        &self,
        character: &Character,
        concept: &str,
        option: GenerationMode,
        reference_image_path: Option<&str>,
    ) -> Result<PreparedVideo, PipelineError> {
        let portrait = self.require_portrait(character)?;

        let prepare_id = media::generation_id();
        let filename = media::first_frame_filename(&prepare_id);
        let dest = self.media.image_local_path(&filename);

        let mut references = vec![portrait];
        if option == GenerationMode::RefImage {
            if let Some(reference) = reference_image_path {
                references.push(self.media.to_local(reference));
            }
        }

        let first_frame_prompt =
            format!("A high-quality still frame of {}. {concept}", character.name);
        self.generator
            .image_from_references(&first_frame_prompt, &references, &dest)
            .await?;

        let brief = character_brief(character);
        let video_prompt = self.author.video_prompt(&brief, concept).await?;

        Ok(PreparedVideo {
            prepare_id,
            first_frame_path: MediaRoot::image_web_path(&filename),
            video_prompt,
        })
    }

    /// Phase 2 of the video flow: estimate a duration for the (possibly
    /// user-edited) prompt, synthesize the video from the first frame,
    /// and persist exactly one media row of kind `video`.
    pub async fn finalize_video(
        &self,
        character: &Character,
        first_frame_path: &str,
        video_prompt: &str,
        concept: &str,
    ) -> Result<Media, PipelineError> {
        self.require_portrait(character)?;

        let duration = self.author.video_duration(video_prompt).await?;
        let first_frame_local = self.media.to_local(first_frame_path);

        let filename = media::final_video_filename();
        let dest = self.media.video_local_path(&filename);

        self.generator
            .video(
                video_prompt,
                duration,
                &dest,
                Some(ImageSource::Local(first_frame_local)),
            )
            .await?;

        let row = MediaRepo::create(
            &self.pool,
            &CreateMedia {
                character_id: Some(character.id),
                media_type: MediaKind::Video.as_str().to_string(),
                file_path: MediaRoot::video_web_path(&filename),
                generation_mode: Some(GenerationMode::Video.as_str().to_string()),
                prompt: Some(concept.to_string()),
                video_prompt: Some(video_prompt.to_string()),
                first_frame_path: Some(first_frame_path.to_string()),
                ..Default::default()
            },
        )
        .await?;

        tracing::info!(media_id = %row.id, character_id = %character.id, duration, "Video finalized");
        Ok(row)
    }

    /// Generate a motion-controlled video from the character portrait, a
    /// driving video, and a prompt. Persists one media row tagged
    /// `motion_control`.
    pub async fn generate_motion_video(
        &self,
        character: &Character,
        prompt: &str,
        driving_video_path: &str,
    ) -> Result<Media, PipelineError> {
        let portrait = self.require_portrait(character)?;
        let driving_video = self.media.to_local(driving_video_path);

        let filename = media::motion_video_filename();
        let dest = self.media.video_local_path(&filename);

        self.generator
            .motion_control(&portrait, &driving_video, prompt, &dest)
            .await?;

        let row = MediaRepo::create(
            &self.pool,
            &CreateMedia {
                character_id: Some(character.id),
                media_type: MediaKind::Video.as_str().to_string(),
                file_path: MediaRoot::video_web_path(&filename),
                generation_mode: Some(GenerationMode::MotionControl.as_str().to_string()),
                prompt: Some(prompt.to_string()),
                ..Default::default()
            },
        )
        .await?;

        tracing::info!(media_id = %row.id, character_id = %character.id, "Motion video generated");
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seams::tests_support::{FakeAuthor, FakeGenerator};
    use assert_matches::assert_matches;
    use chrono::Utc;
    use uuid::Uuid;

    fn character(image_path: Option<&str>) -> Character {
        Character {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Nova".to_string(),
            visual_description: "short silver hair, studio portrait".to_string(),
            personality_traits: vec!["bold".to_string(), "curious".to_string()],
            tone_of_voice: "warm".to_string(),
            content_style: "vlog".to_string(),
            target_audience: "teens".to_string(),
            content_themes: vec!["games".to_string()],
            image_path: image_path.map(String::from),
            created_at: Utc::now(),
        }
    }

    fn service(generator: Arc<FakeGenerator>, author: Arc<FakeAuthor>) -> GenerateService {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        GenerateService::new(pool, MediaRoot::new("/data"), generator, author)
    }

    #[tokio::test]
    async fn prepare_generates_frame_and_prompt_without_persisting() {
        let generator = Arc::new(FakeGenerator::default());
        let author = Arc::new(FakeAuthor::default());
        // The lazy pool cannot reach a database, so any persistence
        // attempt would fail the call; prepare succeeding proves it
        // writes no rows.
        let svc = service(Arc::clone(&generator), Arc::clone(&author));

        let prepared = svc
            .prepare_video(
                &character(Some("/media/images/c.png")),
                "unboxing a retro console",
                GenerationMode::TextOnly,
                None,
            )
            .await
            .unwrap();

        assert_eq!(
            prepared.first_frame_path,
            format!("/media/images/ff_{}.png", prepared.prepare_id)
        );
        assert!(!prepared.video_prompt.is_empty());
        assert_eq!(generator.reference_calls(), 1);
        assert_eq!(author.video_prompt_calls(), 1);
        // The portrait is always the first (and here only) reference.
        assert_eq!(
            generator.last_references(),
            vec![std::path::PathBuf::from("/data/media/images/c.png")]
        );
    }

    #[tokio::test]
    async fn prepare_with_reference_adds_second_image() {
        let generator = Arc::new(FakeGenerator::default());
        let svc = service(Arc::clone(&generator), Arc::new(FakeAuthor::default()));

        svc.prepare_video(
            &character(Some("/media/images/c.png")),
            "dancing",
            GenerationMode::RefImage,
            Some("/media/images/ref_ab12cd34.png"),
        )
        .await
        .unwrap();

        assert_eq!(
            generator.last_references(),
            vec![
                std::path::PathBuf::from("/data/media/images/c.png"),
                std::path::PathBuf::from("/data/media/images/ref_ab12cd34.png"),
            ]
        );
    }

    #[tokio::test]
    async fn missing_portrait_is_a_precondition_failure() {
        let generator = Arc::new(FakeGenerator::default());
        let author = Arc::new(FakeAuthor::default());
        let svc = service(Arc::clone(&generator), Arc::clone(&author));
        let c = character(None);

        assert_matches!(
            svc.prepare_video(&c, "dancing", GenerationMode::TextOnly, None)
                .await,
            Err(PipelineError::Core(CoreError::Precondition(_)))
        );
        assert_matches!(
            svc.generate_image(&c, "posing", GenerationMode::RefImage, None)
                .await,
            Err(PipelineError::Core(CoreError::Precondition(_)))
        );
        assert_matches!(
            svc.generate_motion_video(&c, "waving", "/media/videos/drv.mp4")
                .await,
            Err(PipelineError::Core(CoreError::Precondition(_)))
        );

        // Precondition failures happen before any remote call.
        assert_eq!(generator.reference_calls(), 0);
        assert_eq!(generator.video_calls(), 0);
        assert_eq!(generator.motion_control_calls(), 0);
        assert_eq!(author.video_prompt_calls(), 0);
        assert_eq!(author.persona_calls(), 0);
        assert_eq!(author.duration_calls(), 0);
    }
}
