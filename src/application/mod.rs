pub mod ask;
pub mod clear_cache;
pub mod process_urls;
pub mod reindex;
pub mod retrieve;
pub mod stats;

use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_repository::SnapshotRepository;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The in-memory snapshot shared by every use case. Writers hold the write
/// lock across build, persist, and swap, so readers never see a store and
/// index of different sizes.
pub type SharedSnapshot = Arc<RwLock<Snapshot>>;

/// Writes `snapshot` on the blocking pool and hands it back once it is
/// durable.
pub(crate) async fn persist(
    repo: &Arc<dyn SnapshotRepository>,
    snapshot: Snapshot,
) -> Result<Snapshot, DomainError> {
    let repo = Arc::clone(repo);
    tokio::task::spawn_blocking(move || repo.save(&snapshot).map(|()| snapshot))
        .await
        .map_err(|e| DomainError::Io(std::io::Error::other(e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::document_store::DocumentStore;
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};

    #[derive(Default)]
    struct ThreadRecordingRepository {
        saved_on: Mutex<Option<ThreadId>>,
    }

    impl SnapshotRepository for ThreadRecordingRepository {
        fn save(&self, _snapshot: &Snapshot) -> Result<(), DomainError> {
            *self.saved_on.lock().unwrap() = Some(thread::current().id());
            Ok(())
        }

        fn load(&self) -> Result<Snapshot, DomainError> {
            Err(DomainError::NotFound("empty".into()))
        }

        fn load_documents(&self) -> Result<DocumentStore, DomainError> {
            Err(DomainError::NotFound("empty".into()))
        }

        fn clear(&self) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_persist_writes_off_the_runtime_thread() {
        let recorder = Arc::new(ThreadRecordingRepository::default());
        let repo: Arc<dyn SnapshotRepository> = recorder.clone();
        let snapshot = Snapshot::empty()
            .with_appended(vec!["text".into()], vec![vec![1.0, 0.0]])
            .unwrap();

        let returned = persist(&repo, snapshot.clone()).await.unwrap();
        assert_eq!(returned, snapshot);

        let saved_on = recorder.saved_on.lock().unwrap().expect("save was called");
        assert_ne!(saved_on, thread::current().id());
    }
}
