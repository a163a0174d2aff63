use crate::domain::entities::document_store::DocumentStore;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;

/// Durable storage for the paired document store and vector index.
pub trait SnapshotRepository: Send + Sync {
    /// Overwrites any stored snapshot with `snapshot`.
    fn save(&self, snapshot: &Snapshot) -> Result<(), DomainError>;

    /// `NotFound` when nothing is stored; `Deserialization` when what is
    /// stored is corrupt, partial, or from another encoder model.
    fn load(&self) -> Result<Snapshot, DomainError>;

    /// Loads only the texts, regardless of the index or which encoder
    /// wrote it. Lets vectors be rebuilt after an encoder change.
    fn load_documents(&self) -> Result<DocumentStore, DomainError>;

    /// Deletes stored state. Succeeds when nothing is stored.
    fn clear(&self) -> Result<(), DomainError>;
}
