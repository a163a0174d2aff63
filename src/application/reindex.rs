use crate::application::{persist, SharedSnapshot};
use crate::domain::entities::document_store::DocumentStore;
use crate::domain::entities::flat_index::FlatIndex;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::snapshot_repository::SnapshotRepository;
use std::sync::Arc;

const BATCH_SIZE: usize = 32;

/// Re-embeds every stored document with the current encoder.
///
/// When memory is empty (for instance because the cached index came from a
/// different model and was refused at startup) the texts are recovered from
/// the persisted document store.
pub struct ReindexUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    repo: Arc<dyn SnapshotRepository>,
    snapshot: SharedSnapshot,
}

impl ReindexUseCase {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        repo: Arc<dyn SnapshotRepository>,
        snapshot: SharedSnapshot,
    ) -> Self {
        Self { embedder, repo, snapshot }
    }

    pub async fn execute(&self) -> Result<usize, DomainError> {
        let mut current = self.snapshot.write().await;

        let documents = if current.is_empty() {
            match self.repo.load_documents() {
                Ok(documents) => documents,
                Err(DomainError::NotFound(_)) => DocumentStore::new(),
                Err(e) => return Err(e),
            }
        } else {
            current.documents().clone()
        };
        let total = documents.len();
        if total == 0 {
            return Ok(0);
        }

        let mut vectors = Vec::with_capacity(total);
        for chunk in documents.texts().chunks(BATCH_SIZE) {
            vectors.extend(self.embedder.embed(chunk, InputType::Document).await?);
        }

        let rebuilt = Snapshot::from_parts(documents, FlatIndex::build(&vectors)?)?;
        *current = persist(&self.repo, rebuilt).await?;

        tracing::info!(total, model = self.embedder.model_id(), "Reindexed documents");
        Ok(total)
    }
}
