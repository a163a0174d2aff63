use crate::application::{persist, SharedSnapshot};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::snapshot_repository::SnapshotRepository;
use crate::domain::ports::text_extractor::TextExtractor;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlFailure {
    pub url: String,
    pub reason: String,
}

/// Outcome of one processing batch. Failures are listed in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingResult {
    pub succeeded: usize,
    pub failed: Vec<UrlFailure>,
    /// Store positions assigned to this batch's documents.
    pub added_positions: Vec<usize>,
    pub total_documents: usize,
}

impl ProcessingResult {
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

pub struct ProcessUrlsUseCase {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    repo: Arc<dyn SnapshotRepository>,
    snapshot: SharedSnapshot,
    concurrency: usize,
}

impl ProcessUrlsUseCase {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        repo: Arc<dyn SnapshotRepository>,
        snapshot: SharedSnapshot,
        concurrency: usize,
    ) -> Self {
        Self {
            extractor,
            embedder,
            repo,
            snapshot,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn execute(&self, urls: &[String]) -> Result<ProcessingResult, DomainError> {
        // Fetches run concurrently; `buffered` yields in input order.
        let outcomes: Vec<_> = stream::iter(urls)
            .map(|url| async move { (url, self.extractor.extract(url).await) })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut texts = Vec::new();
        let mut failed = Vec::new();
        for (url, outcome) in outcomes {
            match outcome {
                Ok(text) => texts.push(text),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "URL failed");
                    failed.push(UrlFailure {
                        url: url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if texts.is_empty() {
            return Ok(ProcessingResult {
                succeeded: 0,
                failed,
                added_positions: Vec::new(),
                total_documents: self.snapshot.read().await.len(),
            });
        }

        let vectors = self.embedder.embed(&texts, InputType::Document).await?;
        let succeeded = texts.len();

        let mut current = self.snapshot.write().await;
        let start = current.len();
        let candidate = current.with_appended(texts, vectors)?;
        *current = persist(&self.repo, candidate).await?;

        tracing::info!(
            added = succeeded,
            failed = failed.len(),
            total = current.len(),
            "Indexed new documents"
        );

        Ok(ProcessingResult {
            succeeded,
            failed,
            added_positions: (start..start + succeeded).collect(),
            total_documents: current.len(),
        })
    }
}
