use crate::distance::{compare_distance, squared_euclidean_row};
use crate::error::{Result, VectorStoreError};
use crate::store::VectorStore;
use crate::types::{ItemId, Neighbor, QueryResult};
use ndarray::Array2;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Exact k-nearest-neighbor index over a point-in-time copy of a [`VectorStore`].
///
/// The index owns its own copy of the vectors, so it never observes later
/// insertions into the source store; rebuild it to pick them up. It holds no
/// mutable state and can be shared across threads for concurrent queries.
#[derive(Debug, Clone)]
pub struct NearestNeighborIndex {
    vectors: Array2<f32>,
}

impl NearestNeighborIndex {
    /// Snapshot `store`. An empty store yields a valid, always-empty index.
    #[must_use]
    pub fn build(store: &VectorStore) -> Self {
        // The store holds exactly `len * dimension` values, row-major.
        let data = store.as_slice();
        let dimension = store.dimension();
        let vectors = Array2::from_shape_fn((store.len(), dimension), |(row, col)| {
            data[row * dimension + col]
        });
        log::info!(
            "Built nearest-neighbor index over {} vectors (dimension {})",
            vectors.nrows(),
            vectors.ncols()
        );
        Self { vectors }
    }

    /// Number of indexed vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension captured at build time; 0 for an empty index.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.vectors.ncols()
    }

    /// The `k` stored vectors closest to `query` by squared Euclidean distance.
    ///
    /// Returns fewer than `k` hits when the index holds fewer than `k` vectors.
    /// Distances in the result are squared.
    pub fn search(&self, query: &[f32], k: usize) -> Result<QueryResult> {
        self.validate_query(query, k)?;
        let result = self.select_top_k(query, k);
        log::debug!(
            "Search (k={k}) returned {} of {} vectors",
            result.len(),
            self.len()
        );
        Ok(result)
    }

    /// Answer several queries in parallel, one query per worker.
    ///
    /// All queries are validated before any is run; results keep input order.
    pub fn search_batch<Q>(&self, queries: &[Q], k: usize) -> Result<Vec<QueryResult>>
    where
        Q: AsRef<[f32]> + Sync,
    {
        for query in queries {
            self.validate_query(query.as_ref(), k)?;
        }
        let results = queries
            .par_iter()
            .map(|query| self.select_top_k(query.as_ref(), k))
            .collect();
        log::debug!("Batch search (k={k}) answered {} queries", queries.len());
        Ok(results)
    }

    fn validate_query(&self, query: &[f32], k: usize) -> Result<()> {
        if k == 0 {
            return Err(VectorStoreError::InvalidK { k });
        }
        // An empty index has no fixed dimension; every query simply misses.
        if !self.is_empty() && query.len() != self.dimension() {
            return Err(VectorStoreError::DimensionMismatch {
                expected: self.dimension(),
                actual: query.len(),
            });
        }
        Ok(())
    }

    fn select_top_k(&self, query: &[f32], k: usize) -> QueryResult {
        let capacity = k.min(self.len());
        if capacity == 0 {
            return QueryResult::default();
        }

        // Max-heap of the best `capacity` candidates seen so far; the root is the worst.
        let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(capacity + 1);
        for (idx, row) in self.vectors.outer_iter().enumerate() {
            let candidate = Candidate {
                distance: squared_euclidean_row(row, query),
                id: ItemId::new(idx),
            };

            if heap.len() < capacity {
                heap.push(candidate);
            } else if let Some(mut worst) = heap.peek_mut() {
                if candidate < *worst {
                    *worst = candidate;
                }
            }
        }

        let neighbors = heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor::new(c.id, c.distance))
            .collect();
        QueryResult::from_sorted(neighbors)
    }
}

/// Heap entry ordered by distance, then by id, so ties never depend on scan order.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f32,
    id: ItemId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_distance(self.distance, other.distance).then_with(|| self.id.cmp(&other.id))
    }
}
