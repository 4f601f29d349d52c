//! Video generation operations: prompt/image-to-video, motion transfer,
//! and motion control. All run on the queue API and block until the
//! remote job completes.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::client::FalClient;
use crate::error::FalError;

/// Image-to-video model.
const IMAGE_TO_VIDEO_MODEL: &str = "xai/grok-imagine-video/image-to-video";

/// Text-to-video model.
const TEXT_TO_VIDEO_MODEL: &str = "xai/grok-imagine-video/text-to-video";

/// Motion-transfer model (driving video + face image).
const MOTION_TRANSFER_MODEL: &str = "fal-ai/bytedance/dreamactor/v2";

/// Motion-control model (driving video + reference image + prompt).
const MOTION_CONTROL_MODEL: &str = "fal-ai/kling-video/v2.6/standard/motion-control";

/// Hard upper bound the video models accept.
const MAX_DURATION_SECS: i32 = 15;

/// Source image for image-to-video generation: either already public or
/// a local file that must be uploaded first.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Url(String),
    Local(PathBuf),
}

impl FalClient {
    /// Generate a video and save it to `dest`.
    ///
    /// With an `image` source the image-to-video model is used (a local
    /// source is uploaded first); otherwise text-to-video. Duration is
    /// clamped to the model maximum of 15 seconds. Fixed 9:16 at 720p.
    pub async fn generate_video(
        &self,
        prompt: &str,
        duration_seconds: i32,
        dest: &Path,
        image: Option<ImageSource>,
    ) -> Result<PathBuf, FalError> {
        let image_url = match image {
            Some(ImageSource::Url(url)) => Some(url),
            Some(ImageSource::Local(path)) => Some(self.upload_file(&path).await?),
            None => None,
        };

        let payload = video_payload(prompt, duration_seconds, image_url.as_deref());
        let model = if image_url.is_some() {
            IMAGE_TO_VIDEO_MODEL
        } else {
            TEXT_TO_VIDEO_MODEL
        };

        let result = self.subscribe(model, &payload).await?;
        let url = video_url(&result)?;
        self.download_to(url, dest).await
    }

    /// Transfer motion from a driving video onto a face image and save
    /// the result to `dest`.
    pub async fn generate_motion_transfer(
        &self,
        face_image_path: &Path,
        driving_video_path: &Path,
        dest: &Path,
    ) -> Result<PathBuf, FalError> {
        let face_image_url = self.upload_file(face_image_path).await?;
        let driving_video_url = self.upload_file(driving_video_path).await?;

        let payload = json!({
            "face_image_url": face_image_url,
            "driving_video_url": driving_video_url,
        });

        let result = self.subscribe(MOTION_TRANSFER_MODEL, &payload).await?;
        let url = video_url(&result)?;
        self.download_to(url, dest).await
    }

    /// Generate a motion-controlled video from a reference image, a
    /// driving video, and a prompt, saving the result to `dest`.
    pub async fn generate_motion_control(
        &self,
        image_path: &Path,
        video_path: &Path,
        prompt: &str,
        dest: &Path,
    ) -> Result<PathBuf, FalError> {
        let image_url = self.upload_file(image_path).await?;
        let video_url_in = self.upload_file(video_path).await?;

        let payload = motion_control_payload(prompt, &image_url, &video_url_in);
        let result = self.subscribe(MOTION_CONTROL_MODEL, &payload).await?;
        let url = video_url(&result)?;
        self.download_to(url, dest).await
    }
}

/// Payload for the grok video models. 9:16 vertical at 720p.
fn video_payload(prompt: &str, duration_seconds: i32, image_url: Option<&str>) -> Value {
    let mut payload = json!({
        "prompt": prompt,
        "duration": duration_seconds.min(MAX_DURATION_SECS),
        "aspect_ratio": "9:16",
        "resolution": "720p",
    });
    if let Some(url) = image_url {
        payload["image_url"] = Value::String(url.to_string());
    }
    payload
}

/// Payload for the motion-control model. Orientation follows the
/// driving video.
fn motion_control_payload(prompt: &str, image_url: &str, video_url: &str) -> Value {
    json!({
        "image_url": image_url,
        "video_url": video_url,
        "prompt": prompt,
        "character_orientation": "video",
    })
}

/// URL of the generated video in a model result.
fn video_url(result: &Value) -> Result<&str, FalError> {
    result
        .pointer("/video/url")
        .and_then(|v| v.as_str())
        .ok_or_else(|| FalError::Upstream("model returned no video".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_clamped_to_model_maximum() {
        let payload = video_payload("dance", 30, None);
        assert_eq!(payload["duration"], 15);

        let payload = video_payload("dance", 8, None);
        assert_eq!(payload["duration"], 8);
    }

    #[test]
    fn image_url_selects_payload_field() {
        let with_image = video_payload("dance", 10, Some("https://cdn.fal.ai/ff.png"));
        assert_eq!(with_image["image_url"], "https://cdn.fal.ai/ff.png");

        let without_image = video_payload("dance", 10, None);
        assert!(without_image.get("image_url").is_none());
    }

    #[test]
    fn fixed_video_parameters() {
        let payload = video_payload("dance", 10, None);
        assert_eq!(payload["aspect_ratio"], "9:16");
        assert_eq!(payload["resolution"], "720p");
    }

    #[test]
    fn motion_control_payload_shape() {
        let payload = motion_control_payload("wave", "https://a/img.png", "https://a/drv.mp4");
        assert_eq!(payload["image_url"], "https://a/img.png");
        assert_eq!(payload["video_url"], "https://a/drv.mp4");
        assert_eq!(payload["character_orientation"], "video");
    }

    #[test]
    fn extracts_video_url() {
        let result = serde_json::json!({ "video": { "url": "https://cdn.fal.ai/out.mp4" } });
        assert_eq!(video_url(&result).unwrap(), "https://cdn.fal.ai/out.mp4");
    }

    #[test]
    fn missing_video_is_upstream_error() {
        let result = serde_json::json!({});
        assert!(matches!(video_url(&result), Err(FalError::Upstream(_))));
    }
}
