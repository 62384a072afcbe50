use crate::embeddings::EmbeddingMode;
use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LISTING_URL: &str = "https://list.ly/api/v4/meta?url=http://google.com";
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_DIMENSION: usize = 512;

pub const ENV_DIMENSION: &str = "CATALOG_FINDER_EMBEDDING_DIM";
pub const ENV_TOP_K: &str = "CATALOG_FINDER_TOP_K";
pub const ENV_LISTING_URL: &str = "CATALOG_FINDER_LISTING_URL";

/// Search settings. Precedence, lowest first: defaults, TOML file,
/// `CATALOG_FINDER_*` environment variables, command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Embedding provider used for titles and queries
    pub embedding_mode: EmbeddingMode,

    /// Length of every embedding vector
    pub dimension: usize,

    /// Number of results returned when a query does not ask for a count
    pub top_k: usize,

    /// Listing endpoint fetched when no local file is given
    pub listing_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            embedding_mode: EmbeddingMode::default(),
            dimension: DEFAULT_DIMENSION,
            top_k: DEFAULT_TOP_K,
            listing_url: DEFAULT_LISTING_URL.to_string(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading search config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Apply `CATALOG_FINDER_*` variables from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut next = self.clone();
        if let Some(raw) = lookup(EmbeddingMode::ENV_VAR) {
            next.embedding_mode = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_DIMENSION) {
            next.dimension = parse_count(ENV_DIMENSION, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TOP_K) {
            next.top_k = parse_count(ENV_TOP_K, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LISTING_URL) {
            next.listing_url = raw;
        }
        // Nothing is applied unless every override parses and validates.
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(SearchError::ConfigError(
                "dimension must be > 0".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(SearchError::ConfigError("top_k must be > 0".to_string()));
        }
        if self.listing_url.trim().is_empty() {
            return Err(SearchError::ConfigError(
                "listing_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_count(key: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| SearchError::ConfigError(format!("{key} must be a positive integer, got '{raw}'")))
}
