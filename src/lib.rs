pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

use crate::application::ask::{Answer, AskUseCase};
use crate::application::clear_cache::ClearCacheUseCase;
use crate::application::process_urls::{ProcessUrlsUseCase, ProcessingResult};
use crate::application::reindex::ReindexUseCase;
use crate::application::retrieve::RetrieveUseCase;
use crate::application::stats::{IndexStats, StatsUseCase};
use crate::application::SharedSnapshot;
use crate::config::{Config, EmbeddingProviderKind};
use crate::domain::entities::document::RetrievedDocument;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::answer_generator::AnswerGenerator;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::snapshot_repository::SnapshotRepository;
use crate::domain::ports::text_extractor::TextExtractor;
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::llm::gemini::GeminiGenerator;
use crate::infrastructure::persistence::file_snapshot::FileSnapshotRepository;
use crate::infrastructure::web::http_extractor::HttpTextExtractor;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Scrape, embed, index and retrieve. Built once at startup and handed to
/// whatever front end drives it.
pub struct RetrievalService {
    process_uc: ProcessUrlsUseCase,
    retrieve_uc: Arc<RetrieveUseCase>,
    ask_uc: AskUseCase,
    clear_uc: ClearCacheUseCase,
    reindex_uc: ReindexUseCase,
    stats_uc: StatsUseCase,
}

impl RetrievalService {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let embedder = build_embedder(config)?;
        let extractor: Arc<dyn TextExtractor> =
            Arc::new(HttpTextExtractor::new(config.fetch.timeout())?);
        let repo: Arc<dyn SnapshotRepository> = Arc::new(FileSnapshotRepository::new(
            config.cache_dir.clone(),
            embedder.model_id(),
        ));
        let generator: Option<Arc<dyn AnswerGenerator>> = match &config.gemini.api_key {
            Some(key) => Some(Arc::new(GeminiGenerator::new(
                key.clone(),
                config.gemini.model.clone(),
                config.gemini.base_url.clone(),
            )?)),
            None => None,
        };

        Ok(Self::with_providers(
            embedder,
            extractor,
            repo,
            generator,
            config.fetch.concurrency,
        ))
    }

    /// Wires the service from explicit adapters and reloads any cached
    /// snapshot. A missing cache starts empty; an unreadable one is logged
    /// and also starts empty.
    pub fn with_providers(
        embedder: Arc<dyn EmbeddingProvider>,
        extractor: Arc<dyn TextExtractor>,
        repo: Arc<dyn SnapshotRepository>,
        generator: Option<Arc<dyn AnswerGenerator>>,
        fetch_concurrency: usize,
    ) -> Self {
        let initial = match repo.load() {
            Ok(snapshot) => {
                tracing::debug!(documents = snapshot.len(), "Loaded cached snapshot");
                snapshot
            }
            Err(DomainError::NotFound(_)) => Snapshot::empty(),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring cached snapshot; starting empty");
                Snapshot::empty()
            }
        };

        // Vector dimension validation
        let provider_dim = embedder.dimension();
        let stored_dim = initial.index().dimension();
        if !initial.is_empty() && provider_dim > 0 && stored_dim != provider_dim {
            tracing::warn!(
                stored_dim,
                provider_dim,
                "Cached vectors do not match the encoder dimension; run `reindex`"
            );
        }

        let snapshot: SharedSnapshot = Arc::new(RwLock::new(initial));
        let retrieve_uc = Arc::new(RetrieveUseCase::new(embedder.clone(), snapshot.clone()));

        Self {
            process_uc: ProcessUrlsUseCase::new(
                extractor,
                embedder.clone(),
                repo.clone(),
                snapshot.clone(),
                fetch_concurrency,
            ),
            ask_uc: AskUseCase::new(retrieve_uc.clone(), generator),
            retrieve_uc,
            clear_uc: ClearCacheUseCase::new(repo.clone(), snapshot.clone()),
            reindex_uc: ReindexUseCase::new(embedder.clone(), repo, snapshot.clone()),
            stats_uc: StatsUseCase::new(embedder, snapshot),
        }
    }

    pub async fn process(&self, urls: &[String]) -> Result<ProcessingResult, DomainError> {
        self.process_uc.execute(urls).await
    }

    pub async fn answer(&self, question: &str) -> Result<RetrievedDocument, DomainError> {
        self.retrieve_uc.execute(question).await
    }

    pub async fn ask(&self, question: &str) -> Result<Answer, DomainError> {
        self.ask_uc.execute(question).await
    }

    pub async fn clear(&self) -> Result<usize, DomainError> {
        self.clear_uc.execute().await
    }

    pub async fn reindex(&self) -> Result<usize, DomainError> {
        self.reindex_uc.execute().await
    }

    pub async fn stats(&self) -> IndexStats {
        self.stats_uc.stats().await
    }
}

fn build_embedder(config: &Config) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    let embedding = &config.embedding;
    match embedding.provider {
        EmbeddingProviderKind::Hashing => Ok(Arc::new(HashingProvider::new(embedding.dimension))),
        EmbeddingProviderKind::OpenAi => {
            let api_key = embedding.api_key.clone().ok_or_else(|| {
                DomainError::Config("openai embeddings need SCHEMEQA_EMBEDDING_API_KEY".into())
            })?;
            Ok(Arc::new(OpenAiProvider::new(api_key, embedding.model.clone(), None)))
        }
        #[cfg(feature = "fastembed")]
        EmbeddingProviderKind::FastEmbed => Ok(Arc::new(
            crate::infrastructure::embeddings::fastembed::FastEmbedProvider::new(
                embedding.model.clone(),
            )?,
        )),
        #[cfg(not(feature = "fastembed"))]
        EmbeddingProviderKind::FastEmbed => Err(DomainError::Config(
            "built without the `fastembed` feature; set provider to \"hashing\" or \"openai\"".into(),
        )),
    }
}
