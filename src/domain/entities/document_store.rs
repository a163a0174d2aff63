use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// Append-only sequence of page texts. A text's position is its identity and
/// matches the position of its vector in the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentStore {
    texts: Vec<String>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_texts(texts: Vec<String>) -> Self {
        Self { texts }
    }

    /// Appends a text and returns its zero-based position.
    pub fn append(&mut self, text: String) -> usize {
        self.texts.push(text);
        self.texts.len() - 1
    }

    pub fn get(&self, position: usize) -> Result<&str, DomainError> {
        self.texts
            .get(position)
            .map(String::as_str)
            .ok_or(DomainError::OutOfRange {
                position,
                len: self.texts.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }
}
