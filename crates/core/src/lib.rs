//! Domain types shared across the starlet workspace.
//!
//! Pure logic only: error taxonomy, id/timestamp aliases, media path
//! bookkeeping, upload validation, and the closed generation vocabularies.
//! No I/O beyond directory creation in [`media::MediaRoot::init_directories`].

pub mod error;
pub mod generation;
pub mod media;
pub mod types;
pub mod upload;
