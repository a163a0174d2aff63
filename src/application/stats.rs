use crate::application::SharedSnapshot;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexState {
    Empty,
    Ready,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub state: IndexState,
    pub documents: usize,
    pub vectors: usize,
    pub dimension: usize,
    pub model_id: String,
}

pub struct StatsUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    snapshot: SharedSnapshot,
}

impl StatsUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, snapshot: SharedSnapshot) -> Self {
        Self { embedder, snapshot }
    }

    pub async fn stats(&self) -> IndexStats {
        let current = self.snapshot.read().await;
        IndexStats {
            state: if current.is_ready() {
                IndexState::Ready
            } else {
                IndexState::Empty
            },
            documents: current.documents().len(),
            vectors: current.index().len(),
            dimension: current.index().dimension(),
            model_id: self.embedder.model_id().to_string(),
        }
    }
}
