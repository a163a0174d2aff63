use crate::application::SharedSnapshot;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_repository::SnapshotRepository;
use std::sync::Arc;

pub struct ClearCacheUseCase {
    repo: Arc<dyn SnapshotRepository>,
    snapshot: SharedSnapshot,
}

impl ClearCacheUseCase {
    pub fn new(repo: Arc<dyn SnapshotRepository>, snapshot: SharedSnapshot) -> Self {
        Self { repo, snapshot }
    }

    /// Deletes persisted state and empties memory. Returns how many documents
    /// were dropped.
    pub async fn execute(&self) -> Result<usize, DomainError> {
        let mut current = self.snapshot.write().await;
        self.repo.clear()?;
        let dropped = current.len();
        *current = Snapshot::empty();
        tracing::info!(dropped, "Cache cleared");
        Ok(dropped)
    }
}
