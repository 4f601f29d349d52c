//! Closed vocabularies used by the generation pipeline.
//!
//! Stored as plain text in the database; these enums are the canonical
//! spellings, parsed at the request boundary.

use crate::error::CoreError;

/// Kind of generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(CoreError::Validation(format!(
                "Unknown media type '{other}'. Must be one of: image, video"
            ))),
        }
    }
}

/// How a media row was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Reference-to-image with the character portrait (plus optional extra
    /// reference).
    RefImage,
    /// Prompt-only image generation.
    TextOnly,
    /// Two-phase first-frame + image-to-video flow.
    Video,
    /// Motion-control video from a driving video.
    MotionControl,
}

impl GenerationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RefImage => "ref_image",
            Self::TextOnly => "text_only",
            Self::Video => "video",
            Self::MotionControl => "motion_control",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "ref_image" => Ok(Self::RefImage),
            "text_only" => Ok(Self::TextOnly),
            "video" => Ok(Self::Video),
            "motion_control" => Ok(Self::MotionControl),
            other => Err(CoreError::Validation(format!(
                "Unknown generation option '{other}'"
            ))),
        }
    }
}

/// How an uploaded image is used during character creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMode {
    /// Use the uploaded image as the reference portrait as-is.
    #[default]
    Direct,
    /// Use the uploaded image as a reference for AI generation.
    Generate,
}

impl ImageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Generate => "generate",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "direct" => Ok(Self::Direct),
            "generate" => Ok(Self::Generate),
            other => Err(CoreError::Validation(format!(
                "Unknown image mode '{other}'. Must be one of: direct, generate"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_round_trip() {
        assert_eq!(MediaKind::parse("image").unwrap(), MediaKind::Image);
        assert_eq!(MediaKind::parse("video").unwrap(), MediaKind::Video);
        assert_eq!(MediaKind::Video.as_str(), "video");
        assert!(MediaKind::parse("audio").is_err());
    }

    #[test]
    fn generation_mode_round_trip() {
        for mode in [
            GenerationMode::RefImage,
            GenerationMode::TextOnly,
            GenerationMode::Video,
            GenerationMode::MotionControl,
        ] {
            assert_eq!(GenerationMode::parse(mode.as_str()).unwrap(), mode);
        }
        assert!(GenerationMode::parse("hologram").is_err());
    }

    #[test]
    fn image_mode_defaults_to_direct() {
        assert_eq!(ImageMode::default(), ImageMode::Direct);
        assert_eq!(ImageMode::parse("generate").unwrap(), ImageMode::Generate);
        assert!(ImageMode::parse("").is_err());
    }
}
