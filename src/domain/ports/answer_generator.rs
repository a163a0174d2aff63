use crate::domain::error::DomainError;

/// External language model that turns a retrieved document and a question
/// into a natural-language answer.
#[async_trait::async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, context: &str, question: &str) -> Result<String, DomainError>;

    /// Generator name for logging
    fn name(&self) -> &str;
}
