use crate::domain::error::DomainError;

/// Whether text is being indexed or used to query the index. Providers with
/// asymmetric models embed the two differently; symmetric ones ignore it.
#[derive(Debug, Clone, Copy)]
pub enum InputType {
    Document,
    Query,
}

/// Maps texts to fixed-dimension vectors. Output length equals input length.
/// Implementations load their model once and are shared for the process
/// lifetime.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, texts: &[String], input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError>;
    fn dimension(&self) -> usize;
    /// Identifies the model so persisted vectors from another model are not
    /// silently mixed with new ones.
    fn model_id(&self) -> &str;
}
