//! Upload validation: extension allow-lists and size caps.

use crate::error::CoreError;

/// Maximum accepted image upload size (10 MB).
pub const MAX_IMAGE_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum accepted video upload size (100 MB).
pub const MAX_VIDEO_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Image extensions accepted for upload.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Video extensions accepted for upload.
pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm"];

/// What is being uploaded, selecting the allow-list and size cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Video,
}

impl UploadKind {
    fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Image => ALLOWED_IMAGE_EXTENSIONS,
            Self::Video => ALLOWED_VIDEO_EXTENSIONS,
        }
    }

    fn max_bytes(self) -> u64 {
        match self {
            Self::Image => MAX_IMAGE_UPLOAD_BYTES,
            Self::Video => MAX_VIDEO_UPLOAD_BYTES,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    fn max_label(self) -> &'static str {
        match self {
            Self::Image => "10MB",
            Self::Video => "100MB",
        }
    }
}

/// Lowercased extension of `filename`, if any.
fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Validate an upload's filename and size, returning the normalized
/// (lowercased) extension on success.
pub fn validate_upload(kind: UploadKind, filename: &str, size: u64) -> Result<String, CoreError> {
    let ext = extension_of(filename).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid {} filename '{filename}': missing extension",
            kind.label()
        ))
    })?;

    if !kind.allowed_extensions().contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Invalid {} type '{ext}'. Allowed: {}",
            kind.label(),
            kind.allowed_extensions().join(", ")
        )));
    }

    if size > kind.max_bytes() {
        return Err(CoreError::Validation(format!(
            "File too large. Maximum {}.",
            kind.max_label()
        )));
    }

    Ok(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn accepts_small_webp() {
        assert_eq!(
            validate_upload(UploadKind::Image, "photo.webp", 5 * MB).unwrap(),
            "webp"
        );
    }

    #[test]
    fn rejects_oversized_image() {
        // 15MB png exceeds the 10MB image cap even though the extension is fine.
        assert!(validate_upload(UploadKind::Image, "big.png", 15 * MB).is_err());
    }

    #[test]
    fn rejects_disallowed_extension() {
        assert!(validate_upload(UploadKind::Image, "anim.gif", 5 * MB).is_err());
        assert!(validate_upload(UploadKind::Video, "clip.avi", 5 * MB).is_err());
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(
            validate_upload(UploadKind::Image, "PHOTO.JPG", MB).unwrap(),
            "jpg"
        );
    }

    #[test]
    fn rejects_missing_extension() {
        assert!(validate_upload(UploadKind::Image, "noext", MB).is_err());
        assert!(validate_upload(UploadKind::Image, "trailingdot.", MB).is_err());
    }

    #[test]
    fn accepts_video_at_cap() {
        assert!(validate_upload(UploadKind::Video, "clip.mp4", 100 * MB).is_ok());
        assert!(validate_upload(UploadKind::Video, "clip.mp4", 100 * MB + 1).is_err());
    }
}
