//! Profile entity model.
//!
//! Mirrors the identity provider's user table: one row per account,
//! carrying the role used for admin checks.

use serde::Serialize;
use sqlx::FromRow;
use starlet_core::types::{EntityId, Timestamp};

/// A profile row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    /// Identity-provider user id.
    pub id: EntityId,
    pub email: Option<String>,
    /// `user` or `admin`.
    pub role: String,
    pub created_at: Timestamp,
}
