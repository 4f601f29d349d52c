//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod character_repo;
pub mod content_plan_repo;
pub mod media_repo;
pub mod profile_repo;

pub use character_repo::{CharacterPurge, CharacterRepo};
pub use content_plan_repo::ContentPlanRepo;
pub use media_repo::MediaRepo;
pub use profile_repo::ProfileRepo;
