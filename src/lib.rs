//! wlsh: approximate top-k retrieval over weighted sparse vectors.
//!
//! Documents are turned into non-negative weighted vectors (TF-IDF by default),
//! signed with weighted MinHash, and filed into banded LSH buckets. A query only
//! scores the documents it shares a bucket with, using the exact weighted
//! Jaccard coefficient; if it shares none, it scores the whole corpus.
//!
//! ```rust
//! use wlsh::{EngineConfig, SimilarityEngine};
//!
//! let docs = vec![
//!     "chest pain radiating to the left arm".to_string(),
//!     "fractured wrist after a fall".to_string(),
//!     "seasonal allergies and nasal congestion".to_string(),
//! ];
//!
//! let mut engine = SimilarityEngine::new(EngineConfig::default());
//! engine.build(docs).unwrap();
//!
//! let hits = engine.query("chest pain radiating to the left arm", 2).unwrap();
//! assert_eq!(hits[0].id, 0);
//! ```
//!
//! # Critical Nuances
//!
//! ## Approximate candidates, exact ranking
//!
//! The LSH stage can miss relevant documents (a similar document may agree on
//! no full band) and can admit irrelevant ones (digest collisions). Misses only
//! reduce recall; false admissions never reach the top unless their exact
//! score earns it.
//!
//! ## Choosing bands and rows
//!
//! Collision probability for per-position agreement `s` is `1 - (1 - s^r)^b`,
//! an S-curve whose midpoint sits near `(1/b)^(1/r)`. 20 bands × 5 rows puts it
//! around 0.55. Raise `rows` for precision, `bands` for recall.
//!
//! ## Degenerate vectors
//!
//! A text with no in-vocabulary terms vectorizes to the all-zero vector. It
//! signs to all zeros, scores `0.0` against everything, and normally falls back
//! to a full scan.

pub mod config;
pub mod engine;
pub mod error;
pub mod hash;
pub mod index;
pub mod query;
pub mod records;
pub mod similarity;
pub mod sparse;
pub mod vectorize;

// Re-exports
pub use config::EngineConfig;
pub use engine::SimilarityEngine;
pub use error::{Result, RetrieveError};
pub use hash::{BandIndex, HashFamily, Signature};
pub use index::{CorpusItem, IndexStats, LshIndex};
pub use query::{QueryRequest, SearchHit};
pub use records::{Document, Record};
pub use similarity::weighted_jaccard;
pub use sparse::SparseVector;
pub use vectorize::{TfIdfVectorizer, Vectorizer, Vocabulary};
