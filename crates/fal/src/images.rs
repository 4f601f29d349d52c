//! Image generation operations.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::client::FalClient;
use crate::error::FalError;

/// Text-to-image model for character portraits.
const TEXT_TO_IMAGE_MODEL: &str = "fal-ai/nano-banana-pro";

/// Reference-to-image model for scene stills.
const EDIT_MODEL: &str = "fal-ai/nano-banana-pro/edit";

impl FalClient {
    /// Generate a portrait from a text prompt and save it to `dest`.
    ///
    /// Fixed square HD size, single image.
    pub async fn generate_character_image(
        &self,
        prompt: &str,
        dest: &Path,
    ) -> Result<PathBuf, FalError> {
        let payload = text_to_image_payload(prompt);
        let result = self.run(TEXT_TO_IMAGE_MODEL, &payload).await?;
        let url = first_image_url(&result)?;
        self.download_to(url, dest).await
    }

    /// Generate a scene image using 1-2 local reference images and save it
    /// to `dest`.
    ///
    /// Each reference is uploaded to obtain a public URL first. Fixed
    /// 9:16 aspect ratio at 2K, single image.
    pub async fn generate_scene_image(
        &self,
        prompt: &str,
        reference_paths: &[PathBuf],
        dest: &Path,
    ) -> Result<PathBuf, FalError> {
        let mut reference_urls = Vec::with_capacity(reference_paths.len());
        for path in reference_paths {
            reference_urls.push(self.upload_file(path).await?);
        }

        let payload = edit_payload(prompt, &reference_urls);
        let result = self.run(EDIT_MODEL, &payload).await?;
        let url = first_image_url(&result)?;
        self.download_to(url, dest).await
    }
}

/// Payload for the text-to-image model.
fn text_to_image_payload(prompt: &str) -> Value {
    json!({
        "prompt": prompt,
        "image_size": "square_hd",
        "num_images": 1,
    })
}

/// Payload for the reference-to-image model. 9:16 vertical for
/// social-media output.
fn edit_payload(prompt: &str, reference_urls: &[String]) -> Value {
    json!({
        "prompt": prompt,
        "image_urls": reference_urls,
        "num_images": 1,
        "aspect_ratio": "9:16",
        "resolution": "2K",
    })
}

/// URL of the first generated image in a model result.
fn first_image_url(result: &Value) -> Result<&str, FalError> {
    result
        .pointer("/images/0/url")
        .and_then(|v| v.as_str())
        .ok_or_else(|| FalError::Upstream("model returned no image".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_to_image_payload_shape() {
        let payload = text_to_image_payload("a portrait");
        assert_eq!(payload["prompt"], "a portrait");
        assert_eq!(payload["image_size"], "square_hd");
        assert_eq!(payload["num_images"], 1);
    }

    #[test]
    fn edit_payload_shape() {
        let urls = vec!["https://cdn.fal.ai/a.png".to_string()];
        let payload = edit_payload("on a beach", &urls);
        assert_eq!(payload["image_urls"][0], urls[0]);
        assert_eq!(payload["aspect_ratio"], "9:16");
        assert_eq!(payload["resolution"], "2K");
        assert_eq!(payload["num_images"], 1);
    }

    #[test]
    fn extracts_first_image_url() {
        let result = serde_json::json!({
            "images": [{"url": "https://cdn.fal.ai/out.png"}]
        });
        assert_eq!(first_image_url(&result).unwrap(), "https://cdn.fal.ai/out.png");
    }

    #[test]
    fn missing_image_is_upstream_error() {
        let result = serde_json::json!({ "images": [] });
        assert!(matches!(
            first_image_url(&result),
            Err(FalError::Upstream(_))
        ));
    }
}
