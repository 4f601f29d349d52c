//! Media path bookkeeping: the web/local path boundary and filename
//! conventions for generated artifacts.
//!
//! Every file the service produces lives under `{data_root}/media/images`
//! or `{data_root}/media/videos` and is addressed publicly as
//! `/media/images/<file>` or `/media/videos/<file>`. All web-to-local
//! translation goes through [`MediaRoot::to_local`] -- no other code is
//! allowed to splice path prefixes.

use std::path::{Path, PathBuf};

use crate::types::EntityId;

/// Prefix that marks a path as web-relative.
pub const MEDIA_WEB_PREFIX: &str = "/media/";

/// Root of the on-disk media tree, plus the path/filename conventions
/// hanging off it.
///
/// Cheap to clone; holds only the configured data root.
#[derive(Debug, Clone)]
pub struct MediaRoot {
    data_root: PathBuf,
}

impl MediaRoot {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    /// Map a path across the web/local boundary.
    ///
    /// A path beginning with [`MEDIA_WEB_PREFIX`] is web-relative and is
    /// resolved against the data root; any other path is assumed already
    /// local and returned unchanged. Total and idempotent: local paths
    /// never start with the web prefix, so mapping twice is a no-op.
    pub fn to_local(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix(MEDIA_WEB_PREFIX) {
            self.data_root.join("media").join(rest)
        } else {
            PathBuf::from(path)
        }
    }

    /// Local directory holding generated/uploaded images.
    pub fn images_dir(&self) -> PathBuf {
        self.data_root.join("media").join("images")
    }

    /// Local directory holding generated/uploaded videos.
    pub fn videos_dir(&self) -> PathBuf {
        self.data_root.join("media").join("videos")
    }

    /// Local path for an image filename.
    pub fn image_local_path(&self, filename: &str) -> PathBuf {
        self.images_dir().join(filename)
    }

    /// Local path for a video filename.
    pub fn video_local_path(&self, filename: &str) -> PathBuf {
        self.videos_dir().join(filename)
    }

    /// Served path for an image filename.
    pub fn image_web_path(filename: &str) -> String {
        format!("/media/images/{filename}")
    }

    /// Served path for a video filename.
    pub fn video_web_path(filename: &str) -> String {
        format!("/media/videos/{filename}")
    }

    /// Create the media directories if they do not exist yet.
    ///
    /// Called once at startup, before the first request can write a file.
    pub fn init_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.images_dir())?;
        std::fs::create_dir_all(self.videos_dir())?;
        Ok(())
    }

    /// Remove a file addressed by web or local path, swallowing every
    /// failure. Returns whether the unlink succeeded, for logging.
    pub fn remove_file_best_effort(&self, path: &str) -> bool {
        let local = self.to_local(path);
        std::fs::remove_file(&local).is_ok()
    }
}

/// First `len` hex characters of a fresh UUID v4.
///
/// Random filename components keep concurrent generation requests from
/// colliding on disk.
fn short_hex(len: usize) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    hex[..len].to_string()
}

/// A fresh 12-hex generation id, shared between a prepare result and
/// the first-frame filename it names.
pub fn generation_id() -> String {
    short_hex(12)
}

/// `{character_id}.png` -- the canonical reference portrait.
pub fn character_portrait_filename(character_id: EntityId) -> String {
    format!("{character_id}.png")
}

/// `gen_{12 hex}.png` -- a directly generated image (v2 flow).
pub fn generated_image_filename() -> String {
    format!("gen_{}.png", short_hex(12))
}

/// `ff_{generation_id}.png` -- a first-frame preview still (v2 prepare
/// phase). Takes the id so the caller can hand it back as the prepare id.
pub fn first_frame_filename(generation_id: &str) -> String {
    format!("ff_{generation_id}.png")
}

/// `vid_{12 hex}.mp4` -- a finalized video (v2 flow).
pub fn final_video_filename() -> String {
    format!("vid_{}.mp4", short_hex(12))
}

/// `motion_{12 hex}.mp4` -- a motion-control video.
pub fn motion_video_filename() -> String {
    format!("motion_{}.mp4", short_hex(12))
}

/// `{plan_id}_first_frame.png` -- legacy plan-based first frame.
pub fn plan_first_frame_filename(plan_id: EntityId) -> String {
    format!("{plan_id}_first_frame.png")
}

/// `{plan_id}_video.mp4` -- legacy plan-based video.
pub fn plan_video_filename(plan_id: EntityId) -> String {
    format!("{plan_id}_video.mp4")
}

/// `{plan_id|dreamactor}_{8 hex}_dreamactor.mp4` -- legacy motion transfer.
pub fn motion_transfer_filename(plan_id: Option<EntityId>) -> String {
    let stem = plan_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "dreamactor".to_string());
    format!("{stem}_{}_dreamactor.mp4", short_hex(8))
}

/// `{prefix}_{8 hex}.{ext}` -- an uploaded file. Prefixes in use:
/// `char` (character portraits), `ref` (reference images), `upload`
/// (driving videos).
pub fn upload_filename(prefix: &str, ext: &str) -> String {
    format!("{prefix}_{}.{ext}", short_hex(8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn root() -> MediaRoot {
        MediaRoot::new("/data")
    }

    #[test]
    fn web_path_maps_under_data_root() {
        assert_eq!(
            root().to_local("/media/images/x.png"),
            PathBuf::from("/data/media/images/x.png")
        );
        assert_eq!(
            root().to_local("/media/videos/y.mp4"),
            PathBuf::from("/data/media/videos/y.mp4")
        );
    }

    #[test]
    fn local_path_passes_through_unchanged() {
        assert_eq!(
            root().to_local("/tmp/upload.mp4"),
            PathBuf::from("/tmp/upload.mp4")
        );
        assert_eq!(
            root().to_local("relative/file.png"),
            PathBuf::from("relative/file.png")
        );
    }

    #[test]
    fn mapping_is_idempotent() {
        let once = root().to_local("/media/images/x.png");
        let twice = root().to_local(once.to_str().unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn web_and_local_paths_agree() {
        let filename = "gen_abc123.png";
        let web = MediaRoot::image_web_path(filename);
        assert_eq!(root().to_local(&web), root().image_local_path(filename));

        let filename = "vid_abc123.mp4";
        let web = MediaRoot::video_web_path(filename);
        assert_eq!(root().to_local(&web), root().video_local_path(filename));
    }

    #[test]
    fn filename_conventions() {
        let id = Uuid::new_v4();
        assert_eq!(character_portrait_filename(id), format!("{id}.png"));
        assert_eq!(plan_first_frame_filename(id), format!("{id}_first_frame.png"));
        assert_eq!(plan_video_filename(id), format!("{id}_video.mp4"));

        let gen = generated_image_filename();
        assert!(gen.starts_with("gen_") && gen.ends_with(".png"));
        assert_eq!(gen.len(), "gen_".len() + 12 + ".png".len());

        let gen_id = generation_id();
        assert_eq!(gen_id.len(), 12);
        assert_eq!(first_frame_filename(&gen_id), format!("ff_{gen_id}.png"));

        let vid = final_video_filename();
        assert!(vid.starts_with("vid_") && vid.ends_with(".mp4"));

        let motion = motion_video_filename();
        assert!(motion.starts_with("motion_") && motion.ends_with(".mp4"));
    }

    #[test]
    fn motion_transfer_filename_stems() {
        let id = Uuid::new_v4();
        assert!(motion_transfer_filename(Some(id)).starts_with(&id.to_string()));
        assert!(motion_transfer_filename(None).starts_with("dreamactor_"));
    }

    #[test]
    fn upload_filenames_are_unique() {
        let a = upload_filename("ref", "png");
        let b = upload_filename("ref", "png");
        assert!(a.starts_with("ref_") && a.ends_with(".png"));
        assert_ne!(a, b);
    }
}
