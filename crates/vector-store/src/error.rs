use thiserror::Error;

use crate::types::ItemId;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

/// Contract violations reported by the store and the index.
///
/// Every variant is an input error detected at the offending call; nothing
/// here is transient, so callers should not retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorStoreError {
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty vector: the first insertion must fix a non-zero dimension")]
    EmptyVector,

    #[error("Item {id} out of range (store holds {len} items)")]
    OutOfRange { id: ItemId, len: usize },

    #[error("Invalid k: {k} (expected k >= 1)")]
    InvalidK { k: usize },
}
