use thiserror::Error;

/// Why a single URL produced no text. Scoped to that URL; a batch carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("could not read response body: {0}")]
    Body(String),

    #[error("page contained no text")]
    EmptyBody,
}

#[async_trait::async_trait]
pub trait TextExtractor: Send + Sync {
    /// Fetches `url` and returns its visible text with markup stripped.
    async fn extract(&self, url: &str) -> Result<String, ExtractionError>;
}
