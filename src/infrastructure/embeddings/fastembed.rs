//! Local sentence-embedding model via `fastembed` (ONNX runtime).
//!
//! The model is loaded once in [`FastEmbedProvider::new`] and shared; calls
//! run on the blocking pool since inference is CPU-bound.

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::Arc;

pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

pub struct FastEmbedProvider {
    model: Arc<TextEmbedding>,
    model_id: String,
    dimension: usize,
}

impl FastEmbedProvider {
    pub fn new(model: Option<String>) -> Result<Self, DomainError> {
        let model_id = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let (kind, dimension) = match model_id.as_str() {
            "all-MiniLM-L6-v2" => (EmbeddingModel::AllMiniLML6V2, 384),
            "all-MiniLM-L12-v2" => (EmbeddingModel::AllMiniLML12V2, 384),
            "bge-small-en-v1.5" => (EmbeddingModel::BGESmallENV15, 384),
            "bge-base-en-v1.5" => (EmbeddingModel::BGEBaseENV15, 768),
            other => {
                return Err(DomainError::Config(format!(
                    "Unsupported fastembed model: {other}"
                )))
            }
        };

        let model = TextEmbedding::try_new(
            InitOptions::new(kind).with_show_download_progress(false),
        )
        .map_err(|e| DomainError::Embedding(format!("Failed to load {model_id}: {e}")))?;

        tracing::info!(model = %model_id, dimension, "Loaded local embedding model");
        Ok(Self {
            model: Arc::new(model),
            model_id,
            dimension,
        })
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let model = Arc::clone(&self.model);
        let batch = texts.to_vec();
        tokio::task::spawn_blocking(move || model.embed(batch, None))
            .await
            .map_err(|e| DomainError::Embedding(format!("Embedding task failed: {e}")))?
            .map_err(|e| DomainError::Embedding(e.to_string()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
