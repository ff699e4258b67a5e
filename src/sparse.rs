//! Sparse non-negative weighted vectors.
//!
//! A [`SparseVector`] maps dimension indices to strictly positive weights. Zero
//! entries are never stored, and indices are kept in ascending order so that
//! every consumer (signing, scoring) iterates dimensions in the same,
//! reproducible order.

use crate::error::{Result, RetrieveError};

/// Sparse weighted vector: ascending `indices` with matching `values`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Build from parallel index/weight arrays.
    ///
    /// Indices must be strictly ascending; weights must be finite and `>= 0`.
    /// Zero weights are accepted and dropped.
    pub fn new(indices: Vec<u32>, values: Vec<f32>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(RetrieveError::InvalidSparseVector(format!(
                "{} indices but {} values",
                indices.len(),
                values.len()
            )));
        }
        if let Some(pos) = indices.windows(2).position(|w| w[0] >= w[1]) {
            return Err(RetrieveError::InvalidSparseVector(format!(
                "indices must be strictly ascending (position {})",
                pos + 1
            )));
        }
        if let Some(&w) = values.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(RetrieveError::InvalidSparseVector(format!(
                "weights must be finite and non-negative, got {w}"
            )));
        }

        if values.iter().all(|&w| w > 0.0) {
            return Ok(Self { indices, values });
        }
        let (indices, values) = indices
            .into_iter()
            .zip(values)
            .filter(|&(_, w)| w > 0.0)
            .unzip();
        Ok(Self { indices, values })
    }

    /// Build from `(index, weight)` pairs in any order. Duplicate indices are rejected.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, f32)>,
    {
        let mut pairs: Vec<(u32, f32)> = pairs.into_iter().collect();
        pairs.sort_unstable_by_key(|&(i, _)| i);
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(RetrieveError::InvalidSparseVector(format!(
                "duplicate index {}",
                w[0].0
            )));
        }
        let (indices, values) = pairs.into_iter().unzip();
        Self::new(indices, values)
    }

    /// The all-zero vector.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Iterate `(index, weight)` in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Non-zero indices, strictly ascending.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Weights aligned with [`indices`](Self::indices).
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// True when the vector has no non-zero entry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Weight at `index` (0.0 when absent).
    pub fn get(&self, index: u32) -> f32 {
        self.indices
            .binary_search(&index)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Largest stored index, if any.
    pub fn max_index(&self) -> Option<u32> {
        self.indices.last().copied()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Euclidean norm of the weights.
    pub fn l2_norm(&self) -> f32 {
        self.values.iter().map(|w| w * w).sum::<f32>().sqrt()
    }

    /// Check every index is below `dimension`.
    pub fn check_dimension(&self, dimension: usize) -> Result<()> {
        match self.max_index() {
            Some(max) if max as usize >= dimension => Err(RetrieveError::InvalidSparseVector(
                format!("index {max} out of range for dimension {dimension}"),
            )),
            _ => Ok(()),
        }
    }

    /// Approximate heap footprint in bytes.
    pub fn size_bytes(&self) -> usize {
        self.indices.len() * std::mem::size_of::<u32>()
            + self.values.len() * std::mem::size_of::<f32>()
    }
}
