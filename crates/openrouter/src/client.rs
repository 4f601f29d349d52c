//! Chat-completion transport.

use serde_json::{json, Value};

use crate::error::OpenRouterError;

/// Default API base URL.
const API_BASE: &str = "https://openrouter.ai/api/v1";

/// Client for one OpenRouter account and model. Constructed once at
/// process start and shared across requests.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Issue a single chat completion and return the assistant reply text.
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, OpenRouterError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": temperature,
        });

        tracing::debug!(model = %self.model, "Requesting chat completion");

        let response = self
            .http
            .post(format!("{API_BASE}/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OpenRouterError::Upstream(format!(
                "chat completion failed ({status}): {}",
                summarize_error_body(&body)
            )));
        }

        let body: Value = response.json().await?;
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                OpenRouterError::Upstream("chat completion returned no content".to_string())
            })?;

        Ok(content)
    }
}

/// Pull a human-readable message out of an upstream error body.
fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .or_else(|| value.get("message").and_then(|v| v.as_str()));
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let truncated: String = trimmed.chars().take(500).collect();
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_message_is_extracted() {
        assert_eq!(
            summarize_error_body(r#"{"error": {"message": "rate limited"}}"#),
            "rate limited"
        );
        assert_eq!(summarize_error_body(""), "empty response body");
        assert_eq!(summarize_error_body("plain text"), "plain text");
    }
}
