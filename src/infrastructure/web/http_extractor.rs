use crate::domain::error::DomainError;
use crate::domain::ports::text_extractor::{ExtractionError, TextExtractor};
use crate::infrastructure::web::html::visible_text;
use async_trait::async_trait;
use std::time::Duration;

const USER_AGENT: &str = concat!("schemeqa/", env!("CARGO_PKG_VERSION"));

/// Fetches pages over HTTP and returns their visible text.
pub struct HttpTextExtractor {
    client: reqwest::Client,
}

impl HttpTextExtractor {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_client(timeout, USER_AGENT)?,
        })
    }
}

fn build_client(timeout: Duration, user_agent: &str) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::Config(format!("HTTP client: {e}")))
}

#[async_trait]
impl TextExtractor for HttpTextExtractor {
    async fn extract(&self, url: &str) -> Result<String, ExtractionError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractionError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ExtractionError::Status {
                status: resp.status().as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ExtractionError::Body(e.to_string()))?;

        let text = visible_text(&body);
        if text.is_empty() {
            return Err(ExtractionError::EmptyBody);
        }
        Ok(text)
    }
}
