use crate::domain::entities::document_store::DocumentStore;
use crate::domain::entities::flat_index::FlatIndex;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_repository::SnapshotRepository;
use crate::infrastructure::persistence::index_codec::{self, IndexHeader};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DOCUMENTS_FILE: &str = "documents.json";
pub const INDEX_FILE: &str = "index.bin";
const DOCUMENTS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct DocumentsFile {
    format_version: u32,
    generation: Uuid,
    model_id: String,
    saved_at: DateTime<Utc>,
    documents: DocumentStore,
}

/// Stores a snapshot as two files in one directory: the texts as JSON and
/// the vectors in a compact binary file.
///
/// Both files are stamped with the same generation id on every save. Each is
/// written to a temp file and renamed into place, so neither can be observed
/// half-written; a crash between the two renames leaves mismatched
/// generations, which `load` reports instead of pairing them up.
pub struct FileSnapshotRepository {
    dir: PathBuf,
    model_id: String,
}

impl FileSnapshotRepository {
    /// `model_id` is the current encoder's; snapshots written by another
    /// model are refused on load.
    pub fn new(dir: impl Into<PathBuf>, model_id: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            model_id: model_id.into(),
        }
    }

    fn documents_path(&self) -> PathBuf {
        self.dir.join(DOCUMENTS_FILE)
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| DomainError::Io(e.error))?;
        Ok(())
    }

    fn read_documents(&self) -> Result<DocumentsFile, DomainError> {
        let raw = std::fs::read(self.documents_path())?;
        let file: DocumentsFile = serde_json::from_slice(&raw)
            .map_err(|e| DomainError::Deserialization(format!("{DOCUMENTS_FILE}: {e}")))?;
        if file.format_version != DOCUMENTS_FORMAT_VERSION {
            return Err(DomainError::Deserialization(format!(
                "{DOCUMENTS_FILE}: unsupported format version {}",
                file.format_version
            )));
        }
        Ok(file)
    }

    fn read_index(&self) -> Result<(IndexHeader, FlatIndex), DomainError> {
        let raw = std::fs::read(self.index_path())?;
        index_codec::decode(&raw)
    }

    fn presence(&self) -> (bool, bool) {
        (self.documents_path().exists(), self.index_path().exists())
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, snapshot: &Snapshot) -> Result<(), DomainError> {
        std::fs::create_dir_all(&self.dir)?;

        let generation = Uuid::new_v4();
        let saved_at = Utc::now();

        let header = IndexHeader {
            generation,
            model_id: self.model_id.clone(),
            saved_at,
        };
        self.write_atomic(&self.index_path(), &index_codec::encode(snapshot.index(), &header)?)?;

        let documents = DocumentsFile {
            format_version: DOCUMENTS_FORMAT_VERSION,
            generation,
            model_id: self.model_id.clone(),
            saved_at,
            documents: snapshot.documents().clone(),
        };
        let json = serde_json::to_vec(&documents)
            .map_err(|e| DomainError::InvalidInput(format!("Failed to encode documents: {e}")))?;
        self.write_atomic(&self.documents_path(), &json)?;

        tracing::debug!(
            dir = %self.dir.display(),
            documents = snapshot.len(),
            %generation,
            "Snapshot saved"
        );
        Ok(())
    }

    fn load(&self) -> Result<Snapshot, DomainError> {
        match self.presence() {
            (false, false) => {
                return Err(DomainError::NotFound(format!(
                    "no snapshot in {}",
                    self.dir.display()
                )))
            }
            (true, false) => {
                return Err(DomainError::Deserialization(format!(
                    "{INDEX_FILE} is missing but {DOCUMENTS_FILE} exists"
                )))
            }
            (false, true) => {
                return Err(DomainError::Deserialization(format!(
                    "{DOCUMENTS_FILE} is missing but {INDEX_FILE} exists"
                )))
            }
            (true, true) => {}
        }

        let documents = self.read_documents()?;
        let (header, index) = self.read_index()?;

        if documents.generation != header.generation {
            return Err(DomainError::Deserialization(format!(
                "{DOCUMENTS_FILE} (saved {}) and {INDEX_FILE} (saved {}) come from different saves",
                documents.saved_at, header.saved_at
            )));
        }
        if header.model_id != self.model_id {
            return Err(DomainError::Deserialization(format!(
                "index was built with model '{}' but the current encoder is '{}'; run `reindex`",
                header.model_id, self.model_id
            )));
        }

        Snapshot::from_parts(documents.documents, index)
    }

    fn load_documents(&self) -> Result<DocumentStore, DomainError> {
        if !self.documents_path().exists() {
            return Err(DomainError::NotFound(format!(
                "no {DOCUMENTS_FILE} in {}",
                self.dir.display()
            )));
        }
        Ok(self.read_documents()?.documents)
    }

    fn clear(&self) -> Result<(), DomainError> {
        for path in [self.index_path(), self.documents_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
