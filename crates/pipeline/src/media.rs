//! Legacy media service: plan-driven image/video generation and
//! motion-transfer videos.

use std::path::PathBuf;
use std::sync::Arc;

use starlet_core::error::CoreError;
use starlet_core::generation::{GenerationMode, MediaKind};
use starlet_core::media::{self, MediaRoot, MEDIA_WEB_PREFIX};
use starlet_core::types::EntityId;
use starlet_db::models::character::Character;
use starlet_db::models::content_plan::ContentPlan;
use starlet_db::models::media::CreateMedia;
use starlet_db::repositories::MediaRepo;
use starlet_db::DbPool;
use starlet_fal::ImageSource;

use crate::error::PipelineError;
use crate::seams::MediaGenerator;

/// Legacy duration band for plan-based videos.
const LEGACY_MIN_DURATION_SECS: i32 = 5;
const LEGACY_MAX_DURATION_SECS: i32 = 10;

/// Result of a legacy video generation: both artifacts' web paths.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LegacyVideoOutcome {
    pub first_frame_path: String,
    pub video_path: String,
}

/// Generates media for legacy content plans.
pub struct MediaService {
    pool: DbPool,
    media: MediaRoot,
    generator: Arc<dyn MediaGenerator>,
}

impl MediaService {
    pub fn new(pool: DbPool, media: MediaRoot, generator: Arc<dyn MediaGenerator>) -> Self {
        Self {
            pool,
            media,
            generator,
        }
    }

    /// Local path of the character's reference portrait, if it is a
    /// served media file.
    fn character_portrait_local(&self, character: Option<&Character>) -> Option<PathBuf> {
        let web_path = character?.image_path.as_deref()?;
        web_path
            .starts_with(MEDIA_WEB_PREFIX)
            .then(|| self.media.to_local(web_path))
    }

    /// First-frame prompt with the character's visual description
    /// prepended, for text-only generation.
    fn enhanced_prompt(plan_prompt: &str, character: Option<&Character>) -> String {
        match character.map(|c| c.visual_description.as_str()) {
            Some(description) if !description.is_empty() => {
                format!("{description}. {plan_prompt}")
            }
            _ => plan_prompt.to_string(),
        }
    }

    /// Generate the plan's first-frame image and persist one media row.
    /// Returns the image's web path.
    ///
    /// `ref_image` prefers an explicit reference image, then the
    /// character portrait; without either it degrades to text-only
    /// generation with the enhanced prompt.
    pub async fn generate_image(
        &self,
        plan: &ContentPlan,
        character: Option<&Character>,
        option: GenerationMode,
        reference_image_path: Option<&str>,
    ) -> Result<String, PipelineError> {
        let filename = media::plan_first_frame_filename(plan.id);
        let dest = self.media.image_local_path(&filename);

        let reference = match option {
            GenerationMode::RefImage => reference_image_path
                .filter(|p| p.starts_with(MEDIA_WEB_PREFIX))
                .map(|p| self.media.to_local(p))
                .or_else(|| self.character_portrait_local(character)),
            _ => None,
        };

        match reference {
            Some(reference) => {
                self.generator
                    .image_from_references(&plan.first_frame_prompt, &[reference], &dest)
                    .await?;
            }
            None => {
                let prompt = Self::enhanced_prompt(&plan.first_frame_prompt, character);
                self.generator.text_to_image(&prompt, &dest).await?;
            }
        }

        let file_path = MediaRoot::image_web_path(&filename);
        MediaRepo::create(
            &self.pool,
            &CreateMedia {
                plan_id: Some(plan.id),
                media_type: MediaKind::Image.as_str().to_string(),
                file_path: file_path.clone(),
                ..Default::default()
            },
        )
        .await?;

        Ok(file_path)
    }

    /// Generate the plan's first frame and then its video, persisting
    /// one media row per artifact.
    ///
    /// The plan's target duration is clamped into the legacy 5-10 band
    /// before the video call.
    pub async fn generate_video(
        &self,
        plan: &ContentPlan,
        character: Option<&Character>,
        option: GenerationMode,
        reference_image_path: Option<&str>,
    ) -> Result<LegacyVideoOutcome, PipelineError> {
        let first_frame_path = self
            .generate_image(plan, character, option, reference_image_path)
            .await?;
        let first_frame_local = self.media.to_local(&first_frame_path);

        let filename = media::plan_video_filename(plan.id);
        let dest = self.media.video_local_path(&filename);
        let duration = plan
            .duration_seconds
            .clamp(LEGACY_MIN_DURATION_SECS, LEGACY_MAX_DURATION_SECS);

        self.generator
            .video(
                &plan.video_prompt,
                duration,
                &dest,
                Some(ImageSource::Local(first_frame_local)),
            )
            .await?;

        let video_path = MediaRoot::video_web_path(&filename);
        MediaRepo::create(
            &self.pool,
            &CreateMedia {
                plan_id: Some(plan.id),
                media_type: MediaKind::Video.as_str().to_string(),
                file_path: video_path.clone(),
                ..Default::default()
            },
        )
        .await?;

        Ok(LegacyVideoOutcome {
            first_frame_path,
            video_path,
        })
    }

    /// Generate a motion-transfer video from the character portrait and
    /// a driving video. Returns the video's web path.
    ///
    /// The character must own a reference portrait; this is checked here
    /// because the generation client has no notion of characters.
    pub async fn generate_motion_transfer(
        &self,
        character: &Character,
        driving_video_path: &str,
        plan_id: Option<EntityId>,
    ) -> Result<String, PipelineError> {
        let face_image = self
            .character_portrait_local(Some(character))
            .ok_or_else(|| {
                CoreError::Precondition("Character has no reference portrait".to_string())
            })?;
        let driving_video = self.media.to_local(driving_video_path);

        let filename = media::motion_transfer_filename(plan_id);
        let dest = self.media.video_local_path(&filename);

        self.generator
            .motion_transfer(&face_image, &driving_video, &dest)
            .await?;

        let video_path = MediaRoot::video_web_path(&filename);
        if let Some(plan_id) = plan_id {
            MediaRepo::create(
                &self.pool,
                &CreateMedia {
                    plan_id: Some(plan_id),
                    media_type: MediaKind::Video.as_str().to_string(),
                    file_path: video_path.clone(),
                    ..Default::default()
                },
            )
            .await?;
        }

        Ok(video_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seams::tests_support::FakeGenerator;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use uuid::Uuid;

    fn character(image_path: Option<&str>) -> Character {
        Character {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Nova".to_string(),
            visual_description: "short silver hair, studio portrait".to_string(),
            personality_traits: vec!["bold".to_string()],
            tone_of_voice: "warm".to_string(),
            content_style: "vlog".to_string(),
            target_audience: "teens".to_string(),
            content_themes: vec!["games".to_string()],
            image_path: image_path.map(String::from),
            created_at: Utc::now(),
        }
    }

    fn service(generator: Arc<FakeGenerator>) -> MediaService {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        MediaService::new(pool, MediaRoot::new("/data"), generator)
    }

    #[tokio::test]
    async fn portrait_resolves_only_for_served_paths() {
        let svc = service(Arc::new(FakeGenerator::default()));

        let served = character(Some("/media/images/c.png"));
        assert_eq!(
            svc.character_portrait_local(Some(&served)),
            Some(PathBuf::from("/data/media/images/c.png"))
        );

        let foreign = character(Some("/tmp/elsewhere.png"));
        assert_eq!(svc.character_portrait_local(Some(&foreign)), None);
        assert_eq!(svc.character_portrait_local(Some(&character(None))), None);
        assert_eq!(svc.character_portrait_local(None), None);
    }

    #[test]
    fn enhanced_prompt_prepends_visual_description() {
        let c = character(None);
        assert_eq!(
            MediaService::enhanced_prompt("waving at the camera", Some(&c)),
            "short silver hair, studio portrait. waving at the camera"
        );
        assert_eq!(
            MediaService::enhanced_prompt("waving at the camera", None),
            "waving at the camera"
        );
    }

    #[tokio::test]
    async fn motion_transfer_requires_portrait() {
        let generator = Arc::new(FakeGenerator::default());
        let svc = service(Arc::clone(&generator));

        let result = svc
            .generate_motion_transfer(&character(None), "/media/videos/drv.mp4", None)
            .await;

        assert_matches!(
            result,
            Err(PipelineError::Core(CoreError::Precondition(_)))
        );
        assert_eq!(generator.motion_transfer_calls(), 0);
    }
}
