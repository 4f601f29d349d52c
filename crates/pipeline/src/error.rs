use starlet_core::error::CoreError;
use starlet_fal::FalError;
use starlet_openrouter::OpenRouterError;

/// Failure of a pipeline operation.
///
/// Upstream failures are carried whole so the façade can surface the
/// remote error message to the caller. Nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A domain error (not-found, validation, precondition).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The image/video generation service failed.
    #[error(transparent)]
    Generation(#[from] FalError),

    /// The prompt-authoring service failed.
    #[error(transparent)]
    Prompt(#[from] OpenRouterError),

    /// The persistence store failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
