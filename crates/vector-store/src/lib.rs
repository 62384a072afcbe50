//! # Catalog Vector Store
//!
//! Exact k-nearest-neighbor search over fixed-dimension `f32` embeddings.
//!
//! ## Architecture
//!
//! ```text
//! embedding vectors
//!     │
//!     ├──> VectorStore            (append-only, row-major, ids 0..n)
//!     │
//!     └──> NearestNeighborIndex   (immutable snapshot, full scan)
//!            └─> top-k by squared Euclidean distance, ties by id
//! ```
//!
//! The store is single-writer; indexes are immutable snapshots and can be
//! queried from any number of threads.
//!
//! ## Example
//!
//! ```
//! use catalog_vector_store::{ItemId, NearestNeighborIndex, VectorStore};
//!
//! let mut store = VectorStore::new();
//! store.insert(&[0.0, 0.0])?;
//! store.insert(&[10.0, 0.0])?;
//! store.insert(&[0.0, 10.0])?;
//!
//! let index = NearestNeighborIndex::build(&store);
//! let hits = index.search(&[1.0, 0.0], 2)?;
//!
//! assert_eq!(hits.ids(), vec![ItemId::new(0), ItemId::new(1)]);
//! assert_eq!(hits.as_slice()[1].distance, 81.0);
//! # Ok::<(), catalog_vector_store::VectorStoreError>(())
//! ```

mod distance;
mod error;
mod index;
mod store;
mod types;

pub use distance::squared_euclidean;
pub use error::{Result, VectorStoreError};
pub use index::NearestNeighborIndex;
pub use store::VectorStore;
pub use types::{ItemId, Neighbor, QueryResult};
