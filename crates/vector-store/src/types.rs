use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense, 0-based handle of a stored vector, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(usize);

impl ItemId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ItemId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<ItemId> for usize {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single hit: which item, and its squared Euclidean distance to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: ItemId,
    pub distance: f32,
}

impl Neighbor {
    #[must_use]
    pub const fn new(id: ItemId, distance: f32) -> Self {
        Self { id, distance }
    }
}

/// Hits of one query, ascending by distance, ties by ascending id.
///
/// Distances are squared; take `sqrt` if the true Euclidean distance is needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryResult {
    neighbors: Vec<Neighbor>,
}

impl QueryResult {
    pub(crate) const fn from_sorted(neighbors: Vec<Neighbor>) -> Self {
        Self { neighbors }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Neighbor> {
        self.neighbors.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Neighbor] {
        &self.neighbors
    }

    /// Item ids in rank order.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.neighbors.iter().map(|n| n.id).collect()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Neighbor> {
        self.neighbors
    }
}

impl IntoIterator for QueryResult {
    type Item = Neighbor;
    type IntoIter = std::vec::IntoIter<Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbors.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a Neighbor;
    type IntoIter = std::slice::Iter<'a, Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbors.iter()
    }
}
