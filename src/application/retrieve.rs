use crate::application::SharedSnapshot;
use crate::domain::entities::document::RetrievedDocument;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use std::sync::Arc;

/// Finds the single stored document closest to a question.
pub struct RetrieveUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    snapshot: SharedSnapshot,
}

impl RetrieveUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, snapshot: SharedSnapshot) -> Self {
        Self { embedder, snapshot }
    }

    pub async fn execute(&self, question: &str) -> Result<RetrievedDocument, DomainError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DomainError::InvalidInput("question is empty".into()));
        }
        // Skip the encoder round-trip when there is nothing to search.
        if !self.snapshot.read().await.is_ready() {
            return Err(DomainError::NotReady);
        }

        let query = self
            .embedder
            .embed(&[question.to_string()], InputType::Query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Embedding("encoder returned no vector".into()))?;

        self.snapshot.read().await.nearest(&query)
    }
}
