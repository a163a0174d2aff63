use crate::domain::entities::document::RetrievedDocument;
use crate::domain::entities::document_store::DocumentStore;
use crate::domain::entities::flat_index::FlatIndex;
use crate::domain::error::DomainError;

/// The document store and its vector index, kept the same length.
///
/// Updates never mutate in place: they build a new snapshot that the caller
/// persists and then swaps in, so a failed update leaves the old one intact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    documents: DocumentStore,
    index: FlatIndex,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pairs a reloaded store with its index, rejecting mismatched sizes.
    pub fn from_parts(documents: DocumentStore, index: FlatIndex) -> Result<Self, DomainError> {
        if documents.len() != index.len() {
            return Err(DomainError::Deserialization(format!(
                "document store has {} entries but index has {} vectors",
                documents.len(),
                index.len()
            )));
        }
        Ok(Self { documents, index })
    }

    /// Appends texts with their vectors and rebuilds the index over the whole
    /// store.
    pub fn with_appended(
        &self,
        texts: Vec<String>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<Self, DomainError> {
        if texts.len() != vectors.len() {
            return Err(DomainError::Embedding(format!(
                "encoder returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }

        let mut all: Vec<Vec<f32>> = self.index.vectors().map(<[f32]>::to_vec).collect();
        all.extend(vectors);
        let index = FlatIndex::build(&all)?;

        let mut documents = self.documents.clone();
        for text in texts {
            documents.append(text);
        }
        Self::from_parts(documents, index)
    }

    /// Same documents, fresh vectors for every one of them.
    pub fn reindexed(&self, vectors: Vec<Vec<f32>>) -> Result<Self, DomainError> {
        if vectors.len() != self.documents.len() {
            return Err(DomainError::Embedding(format!(
                "encoder returned {} vectors for {} documents",
                vectors.len(),
                self.documents.len()
            )));
        }
        let index = FlatIndex::build(&vectors)?;
        Self::from_parts(self.documents.clone(), index)
    }

    /// Single nearest document to `query`.
    pub fn nearest(&self, query: &[f32]) -> Result<RetrievedDocument, DomainError> {
        if !self.is_ready() {
            return Err(DomainError::NotReady);
        }
        let hit = self
            .index
            .search(query, 1)?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::NoMatch("index returned no results".into()))?;

        let text = self.documents.get(hit.position).map_err(|_| {
            DomainError::NoMatch(format!(
                "index position {} has no document (store holds {})",
                hit.position,
                self.documents.len()
            ))
        })?;

        Ok(RetrievedDocument {
            position: hit.position,
            distance: hit.distance,
            text: text.to_string(),
        })
    }

    pub fn is_ready(&self) -> bool {
        !self.documents.is_empty() && !self.index.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn index(&self) -> &FlatIndex {
        &self.index
    }
}
