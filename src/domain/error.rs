use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Dimension mismatch: index holds {expected}-d vectors, got {actual}-d")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No documents indexed yet; process at least one URL first")]
    NotReady,

    #[error("No matching document: {0}")]
    NoMatch(String),

    #[error("Position {position} out of range for store of {len} documents")]
    OutOfRange { position: usize, len: usize },

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}
