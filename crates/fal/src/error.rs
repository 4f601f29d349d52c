use serde_json::Value;

/// Errors produced by the fal.ai client.
#[derive(Debug, thiserror::Error)]
pub enum FalError {
    /// The remote generation job failed or returned an unexpected shape.
    /// Carries the remote error message for user-facing reporting.
    #[error("Upstream generation error: {0}")]
    Upstream(String),

    /// A local input could not be uploaded to obtain a public URL.
    #[error("Upload error: {0}")]
    Upload(String),

    /// The generated artifact could not be downloaded.
    #[error("Download error: {0}")]
    Download(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local filesystem failure while reading inputs or writing results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pull a human-readable message out of an upstream error body.
///
/// Tries the common shapes (`{"error": {"message": ...}}`, `{"message":
/// ...}`, `{"detail": ...}`) before falling back to the raw body,
/// truncated so a stack trace from the provider cannot flood our logs.
pub fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .or_else(|| value.get("message").and_then(|v| v.as_str()))
            .or_else(|| value.get("detail").and_then(|v| v.as_str()));
        if let Some(message) = message {
            return message.to_string();
        }
    }

    truncate(trimmed, 500)
}

fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_nested_error_message() {
        let body = r#"{"error": {"message": "model overloaded"}}"#;
        assert_eq!(summarize_error_body(body), "model overloaded");
    }

    #[test]
    fn falls_back_to_detail_field() {
        let body = r#"{"detail": "invalid api key"}"#;
        assert_eq!(summarize_error_body(body), "invalid api key");
    }

    #[test]
    fn raw_body_is_truncated() {
        let body = "x".repeat(600);
        let summary = summarize_error_body(&body);
        assert!(summary.ends_with("... (truncated)"));
        assert!(summary.chars().count() < 600);
    }

    #[test]
    fn empty_body_is_named() {
        assert_eq!(summarize_error_body("  "), "empty response body");
    }
}
