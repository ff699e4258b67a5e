//! Exact weighted-overlap similarity for sparse vectors.
//!
//! The weighted Jaccard coefficient
//!
//! ```text
//! J_w(a, b) = Σ min(a_i, b_i) / Σ max(a_i, b_i)
//! ```
//!
//! generalises set Jaccard to non-negative weights. It is the final ranking
//! signal: banded LSH only narrows the candidate set, every candidate is then
//! re-scored with this function.
//!
//! ## Zero-denominator policy
//!
//! When both vectors are all-zero the denominator vanishes. The score is then
//! defined as `0.0`, never NaN and never an error.

use crate::sparse::SparseVector;

/// Weighted Jaccard similarity in `[0, 1]`.
///
/// Walks both index lists in ascending order (a merge join), so dimensions
/// absent from both vectors are never visited. Accumulates in `f64` and the
/// summation order depends only on the union of indices, which makes the score
/// exactly symmetric.
#[must_use]
pub fn weighted_jaccard(a: &SparseVector, b: &SparseVector) -> f32 {
    let (ai, av) = (a.indices(), a.values());
    let (bi, bv) = (b.indices(), b.values());

    let mut num = 0.0_f64;
    let mut den = 0.0_f64;
    let (mut x, mut y) = (0, 0);

    while x < ai.len() && y < bi.len() {
        match ai[x].cmp(&bi[y]) {
            std::cmp::Ordering::Equal => {
                let (wa, wb) = (f64::from(av[x]), f64::from(bv[y]));
                num += wa.min(wb);
                den += wa.max(wb);
                x += 1;
                y += 1;
            }
            std::cmp::Ordering::Less => {
                den += f64::from(av[x]);
                x += 1;
            }
            std::cmp::Ordering::Greater => {
                den += f64::from(bv[y]);
                y += 1;
            }
        }
    }
    den += av[x..].iter().map(|&w| f64::from(w)).sum::<f64>();
    den += bv[y..].iter().map(|&w| f64::from(w)).sum::<f64>();

    if den == 0.0 {
        return 0.0;
    }
    ((num / den) as f32).clamp(0.0, 1.0)
}

/// Dense reference implementation, used to cross-check the merge join.
#[cfg(test)]
fn weighted_jaccard_dense(a: &[f32], b: &[f32]) -> f32 {
    let num: f64 = a.iter().zip(b).map(|(&x, &y)| f64::from(x.min(y))).sum();
    let den: f64 = a.iter().zip(b).map(|(&x, &y)| f64::from(x.max(y))).sum();
    if den == 0.0 {
        0.0
    } else {
        (num / den) as f32
    }
}
