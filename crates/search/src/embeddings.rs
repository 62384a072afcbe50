use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Maps text to fixed-dimension vectors.
///
/// Implementations must be deterministic for identical input and must always
/// return vectors of [`EmbeddingProvider::dimension`] entries. Construct one
/// per process and share it by reference (or `Arc`).
pub trait EmbeddingProvider: Send + Sync {
    /// Stable identifier, e.g. for logs.
    fn id(&self) -> &str;

    fn dimension(&self) -> usize;

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text])?
            .pop()
            .ok_or_else(|| SearchError::EmbeddingError("Empty embedding result".to_string()))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingMode {
    /// Whole-text hash; identical strings collide, nothing else is related.
    Stub,
    /// Hashed bag of words; texts sharing words land close together.
    #[default]
    Tokens,
}

impl EmbeddingMode {
    pub const ENV_VAR: &'static str = "CATALOG_FINDER_EMBEDDING_MODE";

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stub => "stub",
            Self::Tokens => "tokens",
        }
    }
}

impl FromStr for EmbeddingMode {
    type Err = SearchError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "stub" => Ok(Self::Stub),
            "tokens" => Ok(Self::Tokens),
            other => Err(SearchError::ConfigError(format!(
                "Unsupported embedding mode '{other}' (expected 'stub' or 'tokens')"
            ))),
        }
    }
}

impl fmt::Display for EmbeddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the provider for `mode`.
pub fn provider_for(mode: EmbeddingMode, dimension: usize) -> Result<Arc<dyn EmbeddingProvider>> {
    if dimension == 0 {
        return Err(SearchError::ConfigError(
            "embedding dimension must be > 0".to_string(),
        ));
    }
    log::debug!("Using {mode} embeddings (dimension {dimension})");
    Ok(match mode {
        EmbeddingMode::Stub => Arc::new(StubEmbedder::new(dimension)),
        EmbeddingMode::Tokens => Arc::new(TokenHashEmbedder::new(dimension)),
    })
}

/// Deterministic pseudo-random unit vectors seeded by the whole text.
#[derive(Clone, Debug)]
pub struct StubEmbedder {
    dimension: usize,
}

impl StubEmbedder {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl EmbeddingProvider for StubEmbedder {
    fn id(&self) -> &str {
        "stub"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| stub_embed(text, self.dimension))
            .collect())
    }
}

/// Feature-hashing embedder: every whitespace-separated token adds a signed
/// unit to one bucket, then the vector is L2-normalized.
#[derive(Clone, Debug)]
pub struct TokenHashEmbedder {
    dimension: usize,
}

impl TokenHashEmbedder {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl EmbeddingProvider for TokenHashEmbedder {
    fn id(&self) -> &str {
        "tokens"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| token_embed(text, self.dimension))
            .collect())
    }
}

fn stub_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut state =
        fnv1a_64(text.as_bytes()) ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vec = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        let high = (bits >> 32) as u32;
        let mantissa = high >> 9;
        let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
        vec.push(unit.mul_add(2.0, -1.0));
    }
    normalize(&mut vec);
    vec
}

fn token_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut vec = vec![0.0f32; dimension];
    if dimension == 0 {
        return vec;
    }
    for token in text.split_whitespace() {
        let mut state = fnv1a_64(token.as_bytes());
        let bits = splitmix64(&mut state);
        let bucket = (bits % dimension as u64) as usize;
        let sign = if bits >> 63 == 0 { 1.0 } else { -1.0 };
        vec[bucket] += sign;
    }
    normalize(&mut vec);
    vec
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
