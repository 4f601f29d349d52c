//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO consumed by the corresponding repository

pub mod character;
pub mod content_plan;
pub mod media;
pub mod profile;
