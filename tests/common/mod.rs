//! Shared test helpers.
#![allow(dead_code)]

use schemeqa::domain::entities::document_store::DocumentStore;
use schemeqa::domain::entities::snapshot::Snapshot;
use schemeqa::domain::error::DomainError;
use schemeqa::domain::ports::answer_generator::AnswerGenerator;
use schemeqa::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use schemeqa::domain::ports::snapshot_repository::SnapshotRepository;
use schemeqa::domain::ports::text_extractor::{ExtractionError, TextExtractor};
use schemeqa::infrastructure::embeddings::hashing::HashingProvider;
use schemeqa::infrastructure::persistence::file_snapshot::FileSnapshotRepository;
use schemeqa::RetrievalService;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves canned page texts by URL. Unknown URLs fail like an unresolvable
/// host.
#[derive(Default)]
pub struct StubExtractor {
    pages: HashMap<String, (Result<String, ExtractionError>, Duration)>,
    pub calls: Mutex<Vec<String>>,
}

impl StubExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, text: &str) -> Self {
        self.pages
            .insert(url.to_string(), (Ok(text.to_string()), Duration::ZERO));
        self
    }

    pub fn slow_page(mut self, url: &str, text: &str, delay: Duration) -> Self {
        self.pages.insert(url.to_string(), (Ok(text.to_string()), delay));
        self
    }

    pub fn failing(mut self, url: &str, err: ExtractionError, delay: Duration) -> Self {
        self.pages.insert(url.to_string(), (Err(err), delay));
        self
    }
}

#[async_trait::async_trait]
impl TextExtractor for StubExtractor {
    async fn extract(&self, url: &str) -> Result<String, ExtractionError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some((outcome, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                outcome.clone()
            }
            None => Err(ExtractionError::Network(format!(
                "error sending request for url ({url}): dns error: failed to lookup address"
            ))),
        }
    }
}

/// Returns `first_dim`-d vectors on the first call and `later_dim`-d after.
pub struct ShiftingProvider {
    first_dim: usize,
    later_dim: usize,
    calls: AtomicUsize,
}

impl ShiftingProvider {
    pub fn new(first_dim: usize, later_dim: usize) -> Self {
        Self {
            first_dim,
            later_dim,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for ShiftingProvider {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        let dim = if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.first_dim
        } else {
            self.later_dim
        };
        Ok(texts.iter().map(|_| vec![0.5; dim]).collect())
    }

    fn dimension(&self) -> usize {
        self.first_dim
    }

    fn model_id(&self) -> &str {
        "shifting"
    }
}

/// Records every call and replies with a fixed outcome.
pub struct RecordingGenerator {
    reply: Result<String, (u16, String)>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl RecordingGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            reply: Err((status, body.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl AnswerGenerator for RecordingGenerator {
    async fn generate(&self, context: &str, question: &str) -> Result<String, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((context.to_string(), question.to_string()));
        self.reply
            .clone()
            .map_err(|(status, body)| DomainError::Api { status, body })
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Loads nothing and refuses every save.
pub struct ReadOnlyRepository;

impl SnapshotRepository for ReadOnlyRepository {
    fn save(&self, _snapshot: &Snapshot) -> Result<(), DomainError> {
        Err(DomainError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only cache",
        )))
    }

    fn load(&self) -> Result<Snapshot, DomainError> {
        Err(DomainError::NotFound("nothing cached".into()))
    }

    fn load_documents(&self) -> Result<DocumentStore, DomainError> {
        Err(DomainError::NotFound("nothing cached".into()))
    }

    fn clear(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

pub fn service_with(
    dir: &Path,
    embedder: Arc<dyn EmbeddingProvider>,
    extractor: Arc<dyn TextExtractor>,
    generator: Option<Arc<dyn AnswerGenerator>>,
) -> RetrievalService {
    let repo = Arc::new(FileSnapshotRepository::new(dir, embedder.model_id()));
    RetrievalService::with_providers(embedder, extractor, repo, generator, 4)
}

pub fn setup(dir: &Path, extractor: StubExtractor) -> RetrievalService {
    service_with(
        dir,
        Arc::new(HashingProvider::default()),
        Arc::new(extractor),
        None,
    )
}

pub fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

/// Minimal HTTP/1.1 server answering each path (query string ignored) with
/// a canned status and body. Returns the base URL.
pub async fn serve(routes: Vec<(&str, u16, &str)>) -> String {
    let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body.to_string())))
            .collect(),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let request = read_request(&mut socket).await;
                let path = request
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("/")
                    .split('?')
                    .next()
                    .unwrap_or("/")
                    .to_string();
                let (status, body) = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, "not found".to_string()));
                let response = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// Reads headers plus a `Content-Length` body so the client never sees a
/// reset from unread request bytes.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// A local URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}
