//! Fixed term vocabulary shared by corpus and query vectors.

use std::collections::HashMap;

use crate::error::{Result, RetrieveError};

/// Term → (stable index, non-negative weight). Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    weights: Vec<f32>,
    index: HashMap<String, u32>,
}

impl Vocabulary {
    /// Build from `(term, weight)` entries; a term's index is its position.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, f32)>,
    {
        let mut vocab = Self::default();
        for (term, weight) in entries {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RetrieveError::InvalidParameter(format!(
                    "term weight for {term:?} must be finite and non-negative, got {weight}"
                )));
            }
            let idx = u32::try_from(vocab.terms.len()).map_err(|_| {
                RetrieveError::InvalidParameter("vocabulary exceeds u32::MAX terms".into())
            })?;
            if vocab.index.insert(term.clone(), idx).is_some() {
                return Err(RetrieveError::InvalidParameter(format!(
                    "duplicate term {term:?}"
                )));
            }
            vocab.terms.push(term);
            vocab.weights.push(weight);
        }
        Ok(vocab)
    }

    /// Dimensionality `D`.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the vocabulary has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Index of `term`, if it was seen during fitting.
    pub fn index_of(&self, term: &str) -> Option<u32> {
        self.index.get(term).copied()
    }

    /// Term stored at `index`.
    pub fn term(&self, index: u32) -> Option<&str> {
        self.terms.get(index as usize).map(String::as_str)
    }

    /// Term weight (idf for TF-IDF) at `index`.
    pub fn weight(&self, index: u32) -> Option<f32> {
        self.weights.get(index as usize).copied()
    }

    /// Iterate `(index, term, weight)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str, f32)> + '_ {
        self.terms
            .iter()
            .zip(&self.weights)
            .enumerate()
            .map(|(i, (t, &w))| (i as u32, t.as_str(), w))
    }
}
