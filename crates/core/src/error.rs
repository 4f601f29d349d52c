use crate::types::EntityId;

/// Domain-level error type shared by every crate in the workspace.
///
/// HTTP mapping lives in `starlet_api::error`; this enum only names the
/// failure classes the domain distinguishes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup came back empty.
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: EntityId,
    },

    /// A request carried bad or missing fields, or an invalid upload.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid credentials, insufficient role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An operation's domain precondition does not hold (e.g. a character
    /// without a reference image asked to generate media).
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
