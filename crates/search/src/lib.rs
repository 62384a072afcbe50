//! # Catalog Search
//!
//! Semantic ranking of catalog titles against a free-text query.
//!
//! ```text
//! listing JSON ──> Catalog (titles, ItemId = position)
//!                    │
//!                    ├──> normalize_text ──> EmbeddingProvider ──> VectorStore
//!                    │                                               │
//! query ──> normalize_text ──> EmbeddingProvider ──> NearestNeighborIndex::search
//!                                                                    │
//!                                                     RankedItem { rank, title, distance }
//! ```
//!
//! The embedding provider is an explicit handle built once and shared; the
//! vector engine itself never sees text.

mod catalog;
mod config;
mod embeddings;
mod engine;
mod error;
mod text;

pub use catalog::{Catalog, ListingItem, ListingMeta, ListingResponse};
pub use config::{
    SearchConfig, DEFAULT_DIMENSION, DEFAULT_LISTING_URL, DEFAULT_TOP_K, ENV_DIMENSION,
    ENV_LISTING_URL, ENV_TOP_K,
};
pub use embeddings::{
    provider_for, EmbeddingMode, EmbeddingProvider, StubEmbedder, TokenHashEmbedder,
};
pub use engine::{RankedItem, SemanticCatalog};
pub use error::{Result, SearchError};
pub use text::normalize_text;

// Re-export the vector engine for convenience
pub use catalog_vector_store::{ItemId, NearestNeighborIndex, Neighbor, QueryResult, VectorStore};
