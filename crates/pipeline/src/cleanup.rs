//! Best-effort disk cleanup.

use starlet_core::media::MediaRoot;

/// Remove each file, logging failures and never propagating them.
///
/// Database consistency outranks disk cleanliness: by the time this
/// runs the rows are already gone, and a leftover file is a manual
/// cleanup problem, not a reason to fail the request.
pub fn best_effort_remove(media: &MediaRoot, web_paths: &[String]) {
    for path in web_paths {
        if media.remove_file_best_effort(path) {
            tracing::debug!(%path, "Removed media file");
        } else {
            tracing::warn!(%path, "Failed to remove media file; leaving for manual cleanup");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_do_not_panic_or_error() {
        let media = MediaRoot::new(std::env::temp_dir().join("starlet-cleanup-test"));
        best_effort_remove(
            &media,
            &[
                "/media/images/does-not-exist.png".to_string(),
                "/media/videos/also-missing.mp4".to_string(),
            ],
        );
    }

    #[test]
    fn removes_existing_files() {
        let root = std::env::temp_dir().join(format!("starlet-cleanup-{}", uuid::Uuid::new_v4()));
        let media = MediaRoot::new(&root);
        media.init_directories().unwrap();

        let local = media.image_local_path("x.png");
        std::fs::write(&local, b"png").unwrap();
        assert!(local.exists());

        best_effort_remove(&media, &["/media/images/x.png".to_string()]);
        assert!(!local.exists());

        std::fs::remove_dir_all(&root).ok();
    }
}
