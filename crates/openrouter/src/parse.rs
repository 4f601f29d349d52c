//! Reply parsing: fence stripping, JSON extraction, integer replies.

use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;

use crate::error::OpenRouterError;

/// Matches an optional markdown code fence around the whole reply.
fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("valid fence regex"))
}

/// Strip an optional ``` / ```json fence from a model reply.
///
/// Models frequently wrap JSON in a fence despite being told not to;
/// the content inside the first fence wins, otherwise the trimmed reply
/// is returned as-is.
pub fn strip_code_fence(content: &str) -> &str {
    if let Some(captures) = fence_regex().captures(content) {
        if let Some(inner) = captures.get(1) {
            return inner.as_str();
        }
    }
    content.trim()
}

/// Parse a (possibly fenced) model reply as JSON into `T`.
///
/// A parse failure propagates as [`OpenRouterError::MalformedResponse`]
/// with the serde message attached -- no silent defaulting.
pub fn extract_json<T: DeserializeOwned>(content: &str) -> Result<T, OpenRouterError> {
    let stripped = strip_code_fence(content);
    serde_json::from_str(stripped)
        .map_err(|e| OpenRouterError::MalformedResponse(format!("expected JSON: {e}")))
}

/// Parse a reply that should be a bare integer.
pub fn parse_integer_reply(content: &str) -> Option<i32> {
    content.trim().parse().ok()
}
