//! Weighted MinHash signatures for sparse vectors.
//!
//! Classic MinHash takes `min_{x ∈ S} h(x)` per hash function, so that two sets
//! agree at a position with probability equal to their Jaccard coefficient.
//! Here the elements carry weights, and the minimum is taken over a
//! weight-scaled key instead:
//!
//! ```text
//! key(i) = h(i) / (w_i + ε)
//! ```
//!
//! Heavier dimensions get smaller keys and are selected more often, so
//! signature agreement tracks weighted overlap. The stored value is `h(i)` of
//! the selected dimension, not the index itself.
//!
//! ## Degenerate vectors
//!
//! A vector without non-zero entries signs to all zeros. Such signatures
//! collide with each other in every band; the exact re-ranking step scores
//! them `0.0` against everything.
//!
//! ## References
//!
//! - Broder (1997). "On the resemblance and containment of documents"
//! - Ioffe (2010). "Improved consistent sampling, weighted minhash and L1 sketching"

use crate::config::EPSILON;
use crate::hash::family::HashFamily;
use crate::sparse::SparseVector;

/// Fixed-length signature, one value per hash function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Selected hash value for each function of the family.
    pub values: Vec<u64>,
}

impl Signature {
    /// Fraction of positions where both signatures agree.
    ///
    /// Returns `0.0` for signatures of different length.
    pub fn estimated_similarity(&self, other: &Signature) -> f64 {
        if self.values.len() != other.values.len() || self.values.is_empty() {
            return 0.0;
        }
        let matches = self
            .values
            .iter()
            .zip(&other.values)
            .filter(|(a, b)| a == b)
            .count();
        matches as f64 / self.values.len() as f64
    }

    /// Number of positions where the values differ.
    pub fn hamming_distance(&self, other: &Signature) -> usize {
        self.values
            .iter()
            .zip(&other.values)
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Band `band` of width `rows`; `None` when out of range.
    pub fn band(&self, band: usize, rows: usize) -> Option<&[u64]> {
        let start = band.checked_mul(rows)?;
        self.values.get(start..start.checked_add(rows)?)
    }

    /// Number of values (one per hash function).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true for a zero-length signature.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sign `vector` with every function of `family`, in order.
pub fn sign(vector: &SparseVector, family: &HashFamily) -> Signature {
    if vector.is_empty() {
        return Signature {
            values: vec![0; family.num_hashes()],
        };
    }

    let values = family
        .functions()
        .iter()
        .map(|h| {
            let mut best_key = f64::INFINITY;
            let mut best_hash = 0;
            // Ascending index order; strict `<` keeps the first minimum.
            for (index, weight) in vector.iter() {
                let hv = h.apply(index);
                let key = hv as f64 / (f64::from(weight) + EPSILON);
                if key < best_key {
                    best_key = key;
                    best_hash = hv;
                }
            }
            best_hash
        })
        .collect();

    Signature { values }
}

impl HashFamily {
    /// Convenience for [`sign`].
    pub fn sign(&self, vector: &SparseVector) -> Signature {
        sign(vector, self)
    }
}
