//! Character pipeline: persona generation, reference-image acquisition,
//! persistence, and cascading deletion.

use std::sync::Arc;

use starlet_core::error::CoreError;
use starlet_core::generation::ImageMode;
use starlet_core::media::{self, MediaRoot};
use starlet_core::types::EntityId;
use starlet_db::models::character::{Character, CreateCharacter};
use starlet_db::repositories::CharacterRepo;
use starlet_db::DbPool;
use starlet_openrouter::CharacterBrief;
use uuid::Uuid;

use crate::cleanup;
use crate::error::PipelineError;
use crate::seams::{MediaGenerator, PromptAuthor};

/// Request to create a character.
#[derive(Debug, Clone)]
pub struct NewCharacterInput {
    pub user_id: EntityId,
    pub name: String,
    pub concept: String,
    pub audience: String,
    /// Web path of an already-saved upload, if the user provided one.
    pub uploaded_image: Option<String>,
    pub image_mode: ImageMode,
}

/// Orchestrates character creation and deletion.
pub struct CharacterService {
    pool: DbPool,
    media: MediaRoot,
    generator: Arc<dyn MediaGenerator>,
    author: Arc<dyn PromptAuthor>,
}

impl CharacterService {
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

    /// Create a character: persona first, then the reference portrait,
    /// and only then the database row.
    ///
    /// Ordering is the invariant here -- a character is never persisted
    /// with a dangling image reference. If persona generation or image
    /// resolution fails, nothing is stored.
    pub async fn create(&self, input: NewCharacterInput) -> Result<Character, PipelineError> {
        let persona = self
            .author
            .persona(&input.concept, &input.audience)
            .await?;

        let character_id = Uuid::new_v4();
        let image_path = self
            .resolve_reference_image(
                character_id,
                &persona.visual_description,
                input.uploaded_image.as_deref(),
                input.image_mode,
            )
            .await?;

        let character = CharacterRepo::create(
            &self.pool,
            &CreateCharacter {
                id: character_id,
                user_id: input.user_id,
                name: input.name,
                visual_description: persona.visual_description,
                personality_traits: persona.personality_traits,
                tone_of_voice: persona.tone_of_voice,
                content_style: persona.content_style,
                target_audience: input.audience,
                content_themes: persona.content_themes,
                image_path: Some(image_path),
            },
        )
        .await?;

        tracing::info!(character_id = %character.id, name = %character.name, "Character created");
        Ok(character)
    }

    /// Resolve the reference portrait per the image mode, returning its
    /// web path.
    ///
    /// - `direct` with an upload: the upload is the portrait; no
    ///   generation call.
    /// - `generate` with an upload: reference-to-image using the upload
    ///   as sole reference and the visual description as prompt.
    /// - otherwise: text-to-image from the visual description.
    async fn resolve_reference_image(
        &self,
        character_id: EntityId,
        visual_description: &str,
        uploaded_image: Option<&str>,
        image_mode: ImageMode,
    ) -> Result<String, PipelineError> {
        match (uploaded_image, image_mode) {
            (Some(upload), ImageMode::Direct) => Ok(upload.to_string()),
            (Some(upload), ImageMode::Generate) => {
                let reference = self.media.to_local(upload);
                let filename = media::character_portrait_filename(character_id);
                let dest = self.media.image_local_path(&filename);
                self.generator
                    .image_from_references(visual_description, &[reference], &dest)
                    .await?;
                Ok(MediaRoot::image_web_path(&filename))
            }
            (None, _) => {
                let filename = media::character_portrait_filename(character_id);
                let dest = self.media.image_local_path(&filename);
                self.generator
                    .text_to_image(visual_description, &dest)
                    .await?;
                Ok(MediaRoot::image_web_path(&filename))
            }
        }
    }

    /// Delete a character, all dependent rows, and (best-effort) every
    /// file they referenced. Rows are removed before any disk cleanup is
    /// attempted, and cleanup failures never propagate.
    pub async fn delete(&self, id: EntityId) -> Result<(), PipelineError> {
        let character = CharacterRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Character",
                id,
            })?;

        let purge = CharacterRepo::delete_cascade(&self.pool, id).await?;
        cleanup::best_effort_remove(&self.media, &purge.file_paths);

        tracing::info!(
            character_id = %character.id,
            files = purge.file_paths.len(),
            "Character deleted"
        );
        Ok(())
    }
}

/// The character fields the prompt templates interpolate.
pub fn character_brief(character: &Character) -> CharacterBrief {
    CharacterBrief {
        name: character.name.clone(),
        personality_traits: character.personality_traits.clone(),
        tone_of_voice: character.tone_of_voice.clone(),
        content_style: character.content_style.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seams::tests_support::{FakeAuthor, FakeGenerator};

    fn service(generator: Arc<FakeGenerator>, author: Arc<FakeAuthor>) -> CharacterService {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        let media = MediaRoot::new("/data");
        CharacterService::new(pool, media, generator, author)
    }

    #[tokio::test]
    async fn direct_mode_uses_upload_verbatim_without_generation() {
        let generator = Arc::new(FakeGenerator::default());
        let svc = service(Arc::clone(&generator), Arc::new(FakeAuthor::default()));

        let path = svc
            .resolve_reference_image(
                Uuid::new_v4(),
                "portrait",
                Some("/media/images/char_ab12cd34.png"),
                ImageMode::Direct,
            )
            .await
            .unwrap();

        assert_eq!(path, "/media/images/char_ab12cd34.png");
        assert_eq!(generator.text_to_image_calls(), 0);
        assert_eq!(generator.reference_calls(), 0);
    }

    #[tokio::test]
    async fn generate_mode_uses_upload_as_sole_reference() {
        let generator = Arc::new(FakeGenerator::default());
        let svc = service(Arc::clone(&generator), Arc::new(FakeAuthor::default()));
        let id = Uuid::new_v4();

        let path = svc
            .resolve_reference_image(
                id,
                "portrait",
                Some("/media/images/char_ab12cd34.png"),
                ImageMode::Generate,
            )
            .await
            .unwrap();

        assert_eq!(path, format!("/media/images/{id}.png"));
        assert_eq!(generator.reference_calls(), 1);
        assert_eq!(generator.text_to_image_calls(), 0);
        assert_eq!(
            generator.last_references(),
            vec![std::path::PathBuf::from("/data/media/images/char_ab12cd34.png")]
        );
    }

    #[tokio::test]
    async fn no_upload_falls_back_to_text_to_image() {
        let generator = Arc::new(FakeGenerator::default());
        let svc = service(Arc::clone(&generator), Arc::new(FakeAuthor::default()));
        let id = Uuid::new_v4();

        let path = svc
            .resolve_reference_image(id, "portrait", None, ImageMode::Direct)
            .await
            .unwrap();

        assert_eq!(path, format!("/media/images/{id}.png"));
        assert_eq!(generator.text_to_image_calls(), 1);
        assert_eq!(generator.reference_calls(), 0);
    }
}
