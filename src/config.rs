//! Runtime configuration.
//!
//! Values come from an optional TOML file and are then overridden by
//! `SCHEMEQA_*` environment variables. Every field has a default: an empty
//! environment uses the local all-MiniLM-L6-v2 encoder and no LLM.

use crate::domain::error::DomainError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "schemeqa.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    Hashing,
    OpenAi,
    #[default]
    FastEmbed,
}

impl FromStr for EmbeddingProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hashing" => Ok(Self::Hashing),
            "openai" => Ok(Self::OpenAi),
            "fastembed" | "local" => Ok(Self::FastEmbed),
            _ => Err(format!(
                "Unknown embedding provider: '{s}'. Use 'hashing', 'openai' or 'fastembed'"
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    pub model: Option<String>,
    pub api_key: Option<String>,
    /// Only used by the hashing encoder.
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::FastEmbed,
            model: None,
            api_key: None,
            dimension: 384,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            concurrency: 4,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub embedding: EmbeddingConfig,
    pub gemini: GeminiConfig,
    pub fetch: FetchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".schemeqa"),
            embedding: EmbeddingConfig::default(),
            gemini: GeminiConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    /// Reads `$SCHEMEQA_CONFIG` (which must exist if set) or `./schemeqa.toml`
    /// (optional), then applies environment overrides.
    pub fn load() -> Result<Self, DomainError> {
        let mut config = match std::env::var("SCHEMEQA_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
            .map_err(|e| DomainError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, DomainError> {
        toml::from_str(raw).map_err(|e| DomainError::Config(e.to_string()))
    }

    /// Applies `SCHEMEQA_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("SCHEMEQA_CACHE_DIR") {
            self.cache_dir = PathBuf::from(dir);
        }
        if let Some(provider) = lookup("SCHEMEQA_EMBEDDING_PROVIDER") {
            self.embedding.provider = provider.parse().map_err(DomainError::Config)?;
        }
        if let Some(model) = lookup("SCHEMEQA_EMBEDDING_MODEL") {
            self.embedding.model = Some(model);
        }
        if let Some(key) = lookup("SCHEMEQA_EMBEDDING_API_KEY") {
            self.embedding.api_key = Some(key);
        }
        if let Some(key) = lookup("SCHEMEQA_GEMINI_API_KEY").or_else(|| lookup("GEMINI_API_KEY")) {
            self.gemini.api_key = Some(key);
        }
        if let Some(model) = lookup("SCHEMEQA_GEMINI_MODEL") {
            self.gemini.model = Some(model);
        }
        if let Some(secs) = lookup("SCHEMEQA_FETCH_TIMEOUT_SECS") {
            self.fetch.timeout_secs = parse_number("SCHEMEQA_FETCH_TIMEOUT_SECS", &secs)?;
        }
        if let Some(n) = lookup("SCHEMEQA_FETCH_CONCURRENCY") {
            self.fetch.concurrency = parse_number("SCHEMEQA_FETCH_CONCURRENCY", &n)?;
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, DomainError> {
    value
        .trim()
        .parse()
        .map_err(|_| DomainError::Config(format!("{key} must be a number, got '{value}'")))
}
