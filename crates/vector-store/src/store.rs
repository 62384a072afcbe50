use crate::error::{Result, VectorStoreError};
use crate::types::ItemId;

/// Append-only, row-major storage of fixed-dimension vectors.
///
/// The dimension is fixed by the first insertion. Ids are the dense range
/// `[0, len)` and never move. Insertion takes `&mut self`, so this is a
/// single-writer structure; share it across threads behind a lock if several
/// producers need to append.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    dimension: usize,
    data: Vec<f32>,
}

impl VectorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `items` vectors of `dimension_hint` entries.
    ///
    /// The hint only sizes the allocation; the dimension is still fixed by the
    /// first insertion.
    #[must_use]
    pub fn with_capacity(items: usize, dimension_hint: usize) -> Self {
        Self {
            dimension: 0,
            data: Vec::with_capacity(items.saturating_mul(dimension_hint)),
        }
    }

    /// Append a vector and return its id.
    pub fn insert(&mut self, vector: &[f32]) -> Result<ItemId> {
        self.check_row(self.expected_dimension(vector.len()), vector)?;
        Ok(self.push_unchecked(vector))
    }

    /// Append several vectors at once.
    ///
    /// Every row is validated before anything is appended, so a failing batch
    /// leaves the store untouched.
    pub fn insert_batch<V: AsRef<[f32]>>(&mut self, rows: &[V]) -> Result<Vec<ItemId>> {
        let Some(first) = rows.first() else {
            return Ok(Vec::new());
        };
        let expected = self.expected_dimension(first.as_ref().len());
        for row in rows {
            self.check_row(expected, row.as_ref())?;
        }

        self.data.reserve(rows.len() * expected);
        let ids = rows
            .iter()
            .map(|row| self.push_unchecked(row.as_ref()))
            .collect();
        log::debug!(
            "Inserted batch of {} vectors (dimension {}, total {})",
            rows.len(),
            self.dimension,
            self.len()
        );
        Ok(ids)
    }

    /// Borrow a stored vector.
    pub fn get(&self, id: ItemId) -> Result<&[f32]> {
        if id.index() >= self.len() {
            return Err(VectorStoreError::OutOfRange {
                id,
                len: self.len(),
            });
        }
        let start = id.index() * self.dimension;
        Ok(&self.data[start..start + self.dimension])
    }

    /// Number of stored vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Fixed vector length, or 0 while the store is empty.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Contiguous row-major data, `len() * dimension()` entries.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (ItemId, &[f32])> + '_ {
        // `chunks_exact` panics on 0, which only happens while `data` is empty.
        self.data
            .chunks_exact(self.dimension.max(1))
            .enumerate()
            .map(|(idx, row)| (ItemId::new(idx), row))
    }

    const fn expected_dimension(&self, proposed: usize) -> usize {
        if self.dimension == 0 {
            proposed
        } else {
            self.dimension
        }
    }

    const fn check_row(&self, expected: usize, row: &[f32]) -> Result<()> {
        if expected == 0 {
            return Err(VectorStoreError::EmptyVector);
        }
        if row.len() != expected {
            return Err(VectorStoreError::DimensionMismatch {
                expected,
                actual: row.len(),
            });
        }
        Ok(())
    }

    fn push_unchecked(&mut self, row: &[f32]) -> ItemId {
        let id = ItemId::new(self.len());
        self.dimension = row.len();
        self.data.extend_from_slice(row);
        id
    }
}
