//! TF-IDF term weighting.
//!
//! - vocabulary: every token seen in the fitted corpus, indexed in
//!   lexicographic order (so the index space does not depend on document order)
//! - idf: `ln((1 + n) / (1 + df)) + 1` (smoothed, never zero)
//! - weight: raw term count × idf, then L2-normalised per document
//!
//! Out-of-vocabulary query terms are ignored.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::error::{Result, RetrieveError};
use crate::sparse::SparseVector;
use crate::vectorize::tokenizer::tokenize;
use crate::vectorize::{Vectorizer, Vocabulary};

#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    vocabulary: Option<Vocabulary>,
}

impl TfIdfVectorizer {
    /// Unfitted vectorizer; call [`Vectorizer::fit`] before transforming.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn fit(&mut self, corpus: &[&str]) -> Result<&Vocabulary> {
        let n = corpus.len() as f64;
        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for text in corpus {
            let tokens = tokenize(text);
            let unique: BTreeSet<&str> = tokens.iter().collect();
            for term in unique {
                *df.entry(term.to_string()).or_insert(0) += 1;
            }
        }
        if df.is_empty() {
            warn!(documents = corpus.len(), "corpus produced an empty vocabulary");
        }

        let entries = df.into_iter().map(|(term, count)| {
            let idf = ((1.0 + n) / (1.0 + count as f64)).ln() + 1.0;
            (term, idf as f32)
        });
        let vocabulary = Vocabulary::new(entries)?;
        debug!(terms = vocabulary.len(), "fitted tf-idf vocabulary");
        let fitted: &Vocabulary = self.vocabulary.insert(vocabulary);
        Ok(fitted)
    }

    fn transform(&self, text: &str) -> Result<SparseVector> {
        let vocab = self.vocabulary.as_ref().ok_or(RetrieveError::NotBuilt)?;

        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for term in tokenize(text).iter() {
            if let Some(idx) = vocab.index_of(term) {
                *counts.entry(idx).or_insert(0) += 1;
            }
        }

        let mut weights: Vec<f32> = counts
            .iter()
            .map(|(&idx, &tf)| tf as f32 * vocab.weight(idx).unwrap_or(0.0))
            .collect();
        let norm = weights.iter().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for w in &mut weights {
                *w /= norm;
            }
        }

        SparseVector::new(counts.into_keys().collect(), weights)
    }

    fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_before_fit_fails() {
        let v = TfIdfVectorizer::new();
        assert!(matches!(v.transform("text"), Err(RetrieveError::NotBuilt)));
    }

    #[test]
    fn vocabulary_is_lexicographic() {
        let mut v = TfIdfVectorizer::new();
        let vocab = v.fit(&["zeta alpha", "mid alpha"]).unwrap();
        assert_eq!(vocab.index_of("alpha"), Some(0));
        assert_eq!(vocab.index_of("mid"), Some(1));
        assert_eq!(vocab.index_of("zeta"), Some(2));
    }

    #[test]
    fn smoothed_idf() {
        let mut v = TfIdfVectorizer::new();
        let vocab = v.fit(&["common rare", "common"]).unwrap();
        let common = vocab.weight(vocab.index_of("common").unwrap()).unwrap();
        let rare = vocab.weight(vocab.index_of("rare").unwrap()).unwrap();
        assert!((common - 1.0).abs() < 1e-6);
        assert!((rare - ((3.0_f32 / 2.0).ln() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn vectors_are_unit_length() {
        let mut v = TfIdfVectorizer::new();
        v.fit(&["heart attack chest pain", "broken arm cast"]).unwrap();
        let x = v.transform("chest pain pain").unwrap();
        assert_eq!(x.nnz(), 2);
        assert!((x.l2_norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn out_of_vocabulary_terms_vanish() {
        let mut v = TfIdfVectorizer::new();
        v.fit(&["heart attack"]).unwrap();
        assert!(v.transform("completely unrelated words").unwrap().is_empty());
        assert!(v.transform("").unwrap().is_empty());
    }

    #[test]
    fn batch_transform_matches_single() {
        let mut v = TfIdfVectorizer::new();
        v.fit(&["one two", "two three"]).unwrap();
        let batch = v.transform_batch(&["one", "three two"]).unwrap();
        assert_eq!(batch[0], v.transform("one").unwrap());
        assert_eq!(batch[1], v.transform("three two").unwrap());
    }
}
