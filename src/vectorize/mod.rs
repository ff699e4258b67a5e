//! Turning text into sparse weighted vectors.
//!
//! The engine only relies on the [`Vectorizer`] capability: fit once on the
//! corpus, then map any text into the fitted index space. [`TfIdfVectorizer`]
//! is the bundled implementation; any other non-negative term weighting can be
//! plugged in without touching the hashing or ranking code.

mod tfidf;
pub mod tokenizer;
mod vocabulary;

pub use tfidf::TfIdfVectorizer;
pub use vocabulary::Vocabulary;

use crate::error::Result;
use crate::sparse::SparseVector;

/// Fit-then-transform term weighting.
pub trait Vectorizer {
    /// Learn the vocabulary (and term weights) from the whole corpus.
    ///
    /// Calling `fit` again replaces the previous vocabulary.
    fn fit(&mut self, corpus: &[&str]) -> Result<&Vocabulary>;

    /// Map text into the fitted index space.
    ///
    /// Fails with [`RetrieveError::NotBuilt`](crate::RetrieveError::NotBuilt)
    /// before `fit`. Weights must be non-negative.
    fn transform(&self, text: &str) -> Result<SparseVector>;

    /// Map several texts.
    fn transform_batch(&self, texts: &[&str]) -> Result<Vec<SparseVector>> {
        texts.iter().map(|t| self.transform(t)).collect()
    }

    /// The fitted vocabulary, if any.
    fn vocabulary(&self) -> Option<&Vocabulary>;
}
