use crate::application::retrieve::RetrieveUseCase;
use crate::domain::entities::document::RetrievedDocument;
use crate::domain::error::DomainError;
use crate::domain::ports::answer_generator::AnswerGenerator;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub generator: String,
    pub document: RetrievedDocument,
}

/// Retrieval followed by the external language model.
pub struct AskUseCase {
    retrieve: Arc<RetrieveUseCase>,
    generator: Option<Arc<dyn AnswerGenerator>>,
}

impl AskUseCase {
    pub fn new(retrieve: Arc<RetrieveUseCase>, generator: Option<Arc<dyn AnswerGenerator>>) -> Self {
        Self { retrieve, generator }
    }

    pub async fn execute(&self, question: &str) -> Result<Answer, DomainError> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            DomainError::Config(
                "no LLM API key configured; set SCHEMEQA_GEMINI_API_KEY or [gemini] api_key".into(),
            )
        })?;

        let document = self.retrieve.execute(question).await?;
        let answer = generator.generate(&document.text, question.trim()).await?;

        Ok(Answer {
            question: question.trim().to_string(),
            answer,
            generator: generator.name().to_string(),
            document,
        })
    }
}
