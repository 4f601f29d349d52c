/// Errors produced by the prompt-authoring client.
#[derive(Debug, thiserror::Error)]
pub enum OpenRouterError {
    /// The chat-completion call failed or returned an empty reply.
    #[error("Upstream LLM error: {0}")]
    Upstream(String),

    /// The model's reply could not be parsed into the expected shape.
    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
