use crate::domain::error::DomainError;
use crate::domain::ports::answer_generator::AnswerGenerator;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Answers questions with Google's Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiGenerator {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| DomainError::Config(format!("Gemini HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string()),
        })
    }
}

/// Prompt asking for an answer grounded in `context` plus a structured
/// summary of the scheme it describes.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a government schemes expert. Based on the content below, answer the user's question.

Content:
{context}

Question: {question}

Also summarize into:
1. Benefits
2. Eligibility
3. Application Process
4. Required Documents
5. Official Website or Contact
"
    )
}

fn first_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content
        .parts
        .into_iter()
        .find_map(|p| p.text)
}

#[async_trait::async_trait]
impl AnswerGenerator for GeminiGenerator {
    async fn generate(&self, context: &str, question: &str) -> Result<String, DomainError> {
        let prompt = build_prompt(context, question);
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let resp = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                contents: [Content {
                    parts: [Part { text: &prompt }],
                }],
            })
            .send()
            .await
            .map_err(|e| DomainError::Api {
                status: 0,
                body: format!("Gemini request failed: {}", e.without_url()),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await.map_err(|e| DomainError::Api {
            status: status.as_u16(),
            body: format!("Gemini response unreadable: {}", e.without_url()),
        })?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| DomainError::Api {
                status: status.as_u16(),
                body: format!("unexpected Gemini response ({e}): {body}"),
            })?;
        first_text(parsed).ok_or_else(|| DomainError::Api {
            status: status.as_u16(),
            body: "Gemini response contained no text".into(),
        })
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
