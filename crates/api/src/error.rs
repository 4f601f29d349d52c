use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use starlet_core::error::CoreError;
use starlet_fal::FalError;
use starlet_openrouter::OpenRouterError;
use starlet_pipeline::PipelineError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`PipelineError`] for domain failures and
/// adds HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent `{"error", "code"}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A pipeline failure (generation, prompting, persistence).
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An upstream service failed; the message is surfaced to the caller
    /// so a human can act on the remote error.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error; the message is logged, not surfaced.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = classify(&self);
        let body = json!({
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

fn classify(error: &AppError) -> (StatusCode, &'static str, String) {
    match error {
        AppError::Core(core) => classify_core(core),

        AppError::Pipeline(pipeline) => match pipeline {
            PipelineError::Core(core) => classify_core(core),
            // No retries anywhere: a failed generation call fails the
            // request, with the remote message preserved for the user.
            PipelineError::Generation(err) => classify_generation(err),
            PipelineError::Prompt(err) => classify_prompt(err),
            PipelineError::Database(err) => classify_sqlx_error(err),
        },

        AppError::Database(err) => classify_sqlx_error(err),

        AppError::Upstream(msg) => {
            tracing::error!(error = %msg, "Upstream error");
            (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR", msg.clone())
        }

        AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),

        AppError::InternalError(msg) => {
            tracing::error!(error = %msg, "Internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

fn classify_core(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Precondition(msg) => {
            (StatusCode::BAD_REQUEST, "PRECONDITION_FAILED", msg.clone())
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

fn classify_generation(err: &FalError) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Generation call failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "UPSTREAM_ERROR",
        err.to_string(),
    )
}

fn classify_prompt(err: &OpenRouterError) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Prompt-authoring call failed");
    // A malformed LLM reply is treated exactly like any other upstream
    // failure; only duration estimation absorbs it, inside the client.
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "UPSTREAM_ERROR",
        err.to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
