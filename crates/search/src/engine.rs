use crate::catalog::Catalog;
use crate::embeddings::EmbeddingProvider;
use crate::error::{Result, SearchError};
use crate::text::normalize_text;
use catalog_vector_store::{ItemId, NearestNeighborIndex, QueryResult, VectorStore};
use serde::Serialize;
use std::sync::Arc;

/// One ranked hit joined back to its catalog title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    /// 1-based position in the result list
    pub rank: usize,
    pub id: ItemId,
    pub title: String,
    /// Squared Euclidean distance between query and title embeddings
    pub distance: f32,
}

/// Catalog titles embedded once and indexed for repeated queries.
pub struct SemanticCatalog {
    catalog: Catalog,
    store: VectorStore,
    index: NearestNeighborIndex,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SemanticCatalog {
    /// Normalize and embed every title, then index the vectors.
    pub fn build(catalog: Catalog, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        log::info!(
            "Embedding {} titles with '{}' (dimension {})",
            catalog.len(),
            embedder.id(),
            embedder.dimension()
        );

        let normalized: Vec<String> = catalog.titles().iter().map(|t| normalize_text(t)).collect();
        let texts: Vec<&str> = normalized.iter().map(String::as_str).collect();
        let vectors = embedder.embed_batch(&texts)?;
        if vectors.len() != catalog.len() {
            return Err(SearchError::EmbeddingError(format!(
                "provider returned {} vectors for {} titles",
                vectors.len(),
                catalog.len()
            )));
        }

        let mut store = VectorStore::with_capacity(vectors.len(), embedder.dimension());
        store.insert_batch(&vectors)?;
        let index = NearestNeighborIndex::build(&store);

        Ok(Self {
            catalog,
            store,
            index,
            embedder,
        })
    }

    /// The `k` titles closest to `query`, best first.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<RankedItem>> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        log::debug!("Catalog search: query='{query}', k={k}");

        let vector = self.embedder.embed(&normalize_text(query))?;
        let hits = self.index.search(&vector, k)?;
        self.rank(hits)
    }

    /// Answer several queries at once; output order follows `queries`.
    pub fn search_many(&self, queries: &[&str], k: usize) -> Result<Vec<Vec<RankedItem>>> {
        if queries.iter().any(|q| q.trim().is_empty()) {
            return Err(SearchError::EmptyQuery);
        }

        let normalized: Vec<String> = queries.iter().map(|q| normalize_text(q)).collect();
        let texts: Vec<&str> = normalized.iter().map(String::as_str).collect();
        let vectors = self.embedder.embed_batch(&texts)?;
        let results = self.index.search_batch(&vectors, k)?;
        results.into_iter().map(|hits| self.rank(hits)).collect()
    }

    /// `build` indexes exactly one vector per catalog title, so every hit id
    /// names a title; a miss means the two have drifted apart.
    fn rank(&self, hits: QueryResult) -> Result<Vec<RankedItem>> {
        hits.into_iter()
            .enumerate()
            .map(|(pos, hit)| {
                let title = self.catalog.title(hit.id).ok_or_else(|| {
                    SearchError::CatalogError(format!(
                        "index item {} has no title in a catalog of {}",
                        hit.id,
                        self.catalog.len()
                    ))
                })?;
                Ok(RankedItem {
                    rank: pos + 1,
                    id: hit.id,
                    title: title.to_string(),
                    distance: hit.distance,
                })
            })
            .collect()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn store(&self) -> &VectorStore {
        &self.store
    }

    #[must_use]
    pub const fn index(&self) -> &NearestNeighborIndex {
        &self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{provider_for, EmbeddingMode, StubEmbedder};
    use catalog_vector_store::VectorStoreError;
    use pretty_assertions::assert_eq;

    fn titles() -> Catalog {
        Catalog::from_titles([
            "Best Rust web frameworks",
            "Chocolate cake recipes",
            "Top 10 search engines",
            "Learning Rust in 2024",
        ])
    }

    /// Provider that breaks the fixed-dimension contract.
    struct RaggedEmbedder;

    impl EmbeddingProvider for RaggedEmbedder {
        fn id(&self) -> &str {
            "ragged"
        }

        fn dimension(&self) -> usize {
            4
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| vec![1.0; t.len() % 3 + 1]).collect())
        }
    }

    #[test]
    fn exact_title_ranks_first_with_zero_distance() {
        let engine = SemanticCatalog::build(titles(), Arc::new(StubEmbedder::new(32))).unwrap();
        let hits = engine.search("top search engines!!", 2).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].rank, 1);
        assert_eq!(hits[0].title, "Top 10 search engines");
        assert_eq!(hits[0].id, ItemId::new(2));
        assert_eq!(hits[0].distance, 0.0);
        assert_eq!(hits[1].rank, 2);
    }

    #[test]
    fn token_embeddings_rank_overlapping_titles_higher() {
        let provider = provider_for(EmbeddingMode::Tokens, 256).unwrap();
        let engine = SemanticCatalog::build(titles(), provider).unwrap();
        let hits = engine.search("rust web frameworks", 4).unwrap();
        assert_eq!(hits[0].title, "Best Rust web frameworks");
    }

    #[test]
    fn k_above_catalog_size_returns_every_title() {
        let engine = SemanticCatalog::build(titles(), Arc::new(StubEmbedder::new(8))).unwrap();
        let hits = engine.search("anything", 10).unwrap();
        let mut ids: Vec<usize> = hits.iter().map(|h| h.id.index()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_catalog_yields_empty_results() {
        let engine =
            SemanticCatalog::build(Catalog::default(), Arc::new(StubEmbedder::new(8))).unwrap();
        assert!(engine.is_empty());
        assert!(engine.search("query", 10).unwrap().is_empty());
    }

    #[test]
    fn blank_query_is_rejected() {
        let engine = SemanticCatalog::build(titles(), Arc::new(StubEmbedder::new(8))).unwrap();
        assert!(matches!(
            engine.search("   ", 3),
            Err(SearchError::EmptyQuery)
        ));
    }

    #[test]
    fn zero_k_surfaces_store_error() {
        let engine = SemanticCatalog::build(titles(), Arc::new(StubEmbedder::new(8))).unwrap();
        assert!(matches!(
            engine.search("rust", 0),
            Err(SearchError::VectorStoreError(VectorStoreError::InvalidK { k: 0 }))
        ));
    }

    #[test]
    fn ragged_provider_fails_fast() {
        let catalog = Catalog::from_titles(["ab", "abc"]);
        assert!(matches!(
            SemanticCatalog::build(catalog, Arc::new(RaggedEmbedder)),
            Err(SearchError::VectorStoreError(
                VectorStoreError::DimensionMismatch { .. }
            ))
        ));
    }

    #[test]
    fn hit_without_a_title_is_an_error() {
        let mut engine =
            SemanticCatalog::build(titles(), Arc::new(StubEmbedder::new(8))).unwrap();
        engine.catalog = Catalog::from_titles(["Best Rust web frameworks"]);

        let err = engine.search("rust", 4).unwrap_err();
        assert!(matches!(err, SearchError::CatalogError(_)), "{err}");
    }

    #[test]
    fn search_many_matches_individual_searches() {
        let engine = SemanticCatalog::build(titles(), provider_for(EmbeddingMode::Tokens, 64).unwrap())
            .unwrap();
        let queries = ["rust", "cake", "search engines"];
        let batch = engine.search_many(&queries, 2).unwrap();
        for (query, hits) in queries.iter().zip(&batch) {
            assert_eq!(hits, &engine.search(query, 2).unwrap());
        }
    }
}
