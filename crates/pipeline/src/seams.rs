//! Trait seams in front of the generative clients.
//!
//! The services depend on these traits rather than the concrete clients
//! so tests can drive the pipelines with scripted fakes. The production
//! implementations delegate straight through.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use starlet_fal::{FalClient, FalError, ImageSource};
use starlet_openrouter::{CharacterBrief, OpenRouterClient, OpenRouterError, Persona, PlanDraft};

/// Image and video generation operations the pipelines consume.
#[async_trait]
pub trait MediaGenerator: Send + Sync {
    /// Text-to-image portrait generation.
    async fn text_to_image(&self, prompt: &str, dest: &Path) -> Result<PathBuf, FalError>;

    /// Reference-to-image scene generation (1-2 local references).
    async fn image_from_references(
        &self,
        prompt: &str,
        references: &[PathBuf],
        dest: &Path,
    ) -> Result<PathBuf, FalError>;

    /// Prompt/image-to-video generation.
    async fn video(
        &self,
        prompt: &str,
        duration_seconds: i32,
        dest: &Path,
        image: Option<ImageSource>,
    ) -> Result<PathBuf, FalError>;

    /// Motion transfer: driving video onto a face image.
    async fn motion_transfer(
        &self,
        face_image: &Path,
        driving_video: &Path,
        dest: &Path,
    ) -> Result<PathBuf, FalError>;

    /// Motion control: driving video + reference image + prompt.
    async fn motion_control(
        &self,
        image: &Path,
        video: &Path,
        prompt: &str,
        dest: &Path,
    ) -> Result<PathBuf, FalError>;
}

#[async_trait]
impl MediaGenerator for FalClient {
    async fn text_to_image(&self, prompt: &str, dest: &Path) -> Result<PathBuf, FalError> {
        self.generate_character_image(prompt, dest).await
    }

    async fn image_from_references(
        &self,
        prompt: &str,
        references: &[PathBuf],
        dest: &Path,
    ) -> Result<PathBuf, FalError> {
        self.generate_scene_image(prompt, references, dest).await
    }

    async fn video(
        &self,
        prompt: &str,
        duration_seconds: i32,
        dest: &Path,
        image: Option<ImageSource>,
    ) -> Result<PathBuf, FalError> {
        self.generate_video(prompt, duration_seconds, dest, image)
            .await
    }

    async fn motion_transfer(
        &self,
        face_image: &Path,
        driving_video: &Path,
        dest: &Path,
    ) -> Result<PathBuf, FalError> {
        self.generate_motion_transfer(face_image, driving_video, dest)
            .await
    }

    async fn motion_control(
        &self,
        image: &Path,
        video: &Path,
        prompt: &str,
        dest: &Path,
    ) -> Result<PathBuf, FalError> {
        self.generate_motion_control(image, video, prompt, dest)
            .await
    }
}

/// Prompt-authoring operations the pipelines consume.
#[async_trait]
pub trait PromptAuthor: Send + Sync {
    async fn persona(&self, concept: &str, audience: &str) -> Result<Persona, OpenRouterError>;

    async fn content_plan(
        &self,
        brief: &CharacterBrief,
        theme: &str,
    ) -> Result<PlanDraft, OpenRouterError>;

    async fn video_prompt(
        &self,
        brief: &CharacterBrief,
        concept: &str,
    ) -> Result<String, OpenRouterError>;

    async fn video_duration(&self, video_prompt: &str) -> Result<i32, OpenRouterError>;
}

#[async_trait]
impl PromptAuthor for OpenRouterClient {
    async fn persona(&self, concept: &str, audience: &str) -> Result<Persona, OpenRouterError> {
        self.generate_persona(concept, audience).await
    }

    async fn content_plan(
        &self,
        brief: &CharacterBrief,
        theme: &str,
    ) -> Result<PlanDraft, OpenRouterError> {
        self.generate_content_plan(brief, theme).await
    }

    async fn video_prompt(
        &self,
        brief: &CharacterBrief,
        concept: &str,
    ) -> Result<String, OpenRouterError> {
        self.generate_video_prompt(brief, concept).await
    }

    async fn video_duration(&self, video_prompt: &str) -> Result<i32, OpenRouterError> {
        self.determine_video_duration(video_prompt).await
    }
}

/// Scripted fakes for driving the services in unit tests.
#[cfg(test)]
pub(crate) mod tests_support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Counts calls and records the last reference list; "generates" by
    /// returning the destination untouched (no file is written).
    #[derive(Default)]
    pub struct FakeGenerator {
        text_to_image: AtomicUsize,
        from_references: AtomicUsize,
        video: AtomicUsize,
        motion_transfer: AtomicUsize,
        motion_control: AtomicUsize,
        last_references: Mutex<Vec<PathBuf>>,
    }

    impl FakeGenerator {
        pub fn text_to_image_calls(&self) -> usize {
            self.text_to_image.load(Ordering::SeqCst)
        }

        pub fn reference_calls(&self) -> usize {
            self.from_references.load(Ordering::SeqCst)
        }

        pub fn video_calls(&self) -> usize {
            self.video.load(Ordering::SeqCst)
        }

        pub fn motion_transfer_calls(&self) -> usize {
            self.motion_transfer.load(Ordering::SeqCst)
        }

        pub fn motion_control_calls(&self) -> usize {
            self.motion_control.load(Ordering::SeqCst)
        }

        pub fn last_references(&self) -> Vec<PathBuf> {
            self.last_references.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MediaGenerator for FakeGenerator {
        async fn text_to_image(&self, _prompt: &str, dest: &Path) -> Result<PathBuf, FalError> {
            self.text_to_image.fetch_add(1, Ordering::SeqCst);
            Ok(dest.to_path_buf())
        }

        async fn image_from_references(
            &self,
            _prompt: &str,
            references: &[PathBuf],
            dest: &Path,
        ) -> Result<PathBuf, FalError> {
            self.from_references.fetch_add(1, Ordering::SeqCst);
            *self.last_references.lock().unwrap() = references.to_vec();
            Ok(dest.to_path_buf())
        }

        async fn video(
            &self,
            _prompt: &str,
            _duration_seconds: i32,
            dest: &Path,
            _image: Option<ImageSource>,
        ) -> Result<PathBuf, FalError> {
            self.video.fetch_add(1, Ordering::SeqCst);
            Ok(dest.to_path_buf())
        }

        async fn motion_transfer(
            &self,
            _face_image: &Path,
            _driving_video: &Path,
            dest: &Path,
        ) -> Result<PathBuf, FalError> {
            self.motion_transfer.fetch_add(1, Ordering::SeqCst);
            Ok(dest.to_path_buf())
        }

        async fn motion_control(
            &self,
            _image: &Path,
            _video: &Path,
            _prompt: &str,
            dest: &Path,
        ) -> Result<PathBuf, FalError> {
            self.motion_control.fetch_add(1, Ordering::SeqCst);
            Ok(dest.to_path_buf())
        }
    }

    /// Returns canned persona/prompt/duration values and counts calls.
    #[derive(Default)]
    pub struct FakeAuthor {
        persona: AtomicUsize,
        video_prompt: AtomicUsize,
        duration: AtomicUsize,
    }

    impl FakeAuthor {
        pub fn persona_calls(&self) -> usize {
            self.persona.load(Ordering::SeqCst)
        }

        pub fn video_prompt_calls(&self) -> usize {
            self.video_prompt.load(Ordering::SeqCst)
        }

        pub fn duration_calls(&self) -> usize {
            self.duration.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PromptAuthor for FakeAuthor {
        async fn persona(
            &self,
            _concept: &str,
            _audience: &str,
        ) -> Result<Persona, OpenRouterError> {
            self.persona.fetch_add(1, Ordering::SeqCst);
            Ok(Persona {
                archetype: "upbeat guide".to_string(),
                personality_traits: vec![
                    "curious".to_string(),
                    "playful".to_string(),
                    "warm".to_string(),
                    "witty".to_string(),
                    "bold".to_string(),
                ],
                tone_of_voice: "energetic".to_string(),
                content_style: "educational".to_string(),
                content_themes: vec!["retro games".to_string(), "speedruns".to_string()],
                visual_description: "front-facing studio portrait, plain background".to_string(),
            })
        }

        async fn content_plan(
            &self,
            _brief: &CharacterBrief,
            theme: &str,
        ) -> Result<PlanDraft, OpenRouterError> {
            Ok(PlanDraft {
                title: format!("On {theme}"),
                hook: "Wait for it.".to_string(),
                duration_seconds: 8,
                first_frame_prompt: "standing at a desk, soft light".to_string(),
                video_prompt: "0-2s: waves, 2-5s: talks, 5-8s: smiles".to_string(),
                call_to_action: "Follow for more.".to_string(),
            })
        }

        async fn video_prompt(
            &self,
            _brief: &CharacterBrief,
            _concept: &str,
        ) -> Result<String, OpenRouterError> {
            self.video_prompt.fetch_add(1, Ordering::SeqCst);
            Ok("0-2s: waves at the camera, 2-5s: spins around".to_string())
        }

        async fn video_duration(&self, _video_prompt: &str) -> Result<i32, OpenRouterError> {
            self.duration.fetch_add(1, Ordering::SeqCst);
            Ok(10)
        }
    }
}
