//! Hash-based candidate generation.
//!
//! LSH inverts the usual goal of hashing: similar items *should* collide.
//! Instead of comparing a query against every item, only items sharing a
//! bucket with it are compared.
//!
//! ## Weighted MinHash
//!
//! For a family of hash functions standing in for random permutations, plain
//! MinHash keeps the minimum hash of a set per function, and
//!
//! ```text
//! P[min h(A) = min h(B)] = |A ∩ B| / |A ∪ B|
//! ```
//!
//! For weighted vectors the minimum is taken over `h(i) / (w_i + ε)`, biasing
//! selection toward heavy dimensions so agreement tracks weighted overlap.
//!
//! ## Banding
//!
//! The signature is split into `b` bands of `r` rows; items sharing one full
//! band land in the same bucket. See [`banding`] for the precision/recall
//! trade-off.
//!
//! ```rust
//! use wlsh::hash::{BandIndex, HashFamily};
//! use wlsh::SparseVector;
//!
//! let family = HashFamily::with_seed(42, 20, 5).unwrap();
//! let mut index = BandIndex::new(20, 5).unwrap();
//!
//! let doc = SparseVector::from_pairs([(0, 0.7), (3, 0.3)]).unwrap();
//! let sig = family.sign(&doc);
//! index.add(0, &sig).unwrap();
//!
//! assert!(index.candidates(&sig).unwrap().contains(&0));
//! ```

pub mod banding;
pub mod family;
pub mod minhash;

pub use banding::{band_digest, BandIndex};
pub use family::{AffineHash, HashFamily};
pub use minhash::{sign, Signature};
