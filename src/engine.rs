//! Text-in, ranked-documents-out similarity engine.
//!
//! [`SimilarityEngine`] glues a [`Vectorizer`] to an [`LshIndex`]:
//!
//! - build: fit the vectorizer on the corpus, vectorize every document, sign
//!   and bucket the vectors
//! - query: vectorize the text with the fitted vocabulary, then rank through
//!   the index (with full-corpus fallback)
//!
//! Build is one-shot and blocking. After it returns, every query method takes
//! `&self` and touches no shared mutable state, so a built engine can be shared
//! across threads as-is.

use tracing::info;

use crate::config::EngineConfig;
use crate::error::{Result, RetrieveError};
use crate::index::{IndexStats, LshIndex};
use crate::query::{check_topk, QueryRequest, SearchHit};
use crate::records::Document;
use crate::sparse::SparseVector;
use crate::vectorize::{TfIdfVectorizer, Vectorizer, Vocabulary};

pub struct SimilarityEngine<D, V = TfIdfVectorizer> {
    config: EngineConfig,
    vectorizer: V,
    index: Option<LshIndex<D>>,
}

impl<D: Document> SimilarityEngine<D, TfIdfVectorizer> {
    /// Engine with TF-IDF weighting.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_vectorizer(config, TfIdfVectorizer::new())
    }
}

impl<D: Document, V: Vectorizer> SimilarityEngine<D, V> {
    /// Engine with a custom term-weighting strategy.
    pub fn with_vectorizer(config: EngineConfig, vectorizer: V) -> Self {
        Self {
            config,
            vectorizer,
            index: None,
        }
    }

    /// Build the index over `documents`, keeping at most `corpus_limit` of them.
    ///
    /// Any previously built index is discarded first; on error the engine is
    /// left unbuilt rather than half-built.
    pub fn build<I>(&mut self, documents: I) -> Result<IndexStats>
    where
        I: IntoIterator<Item = D>,
    {
        self.index = None;
        self.config.validate()?;

        let limit = self.config.corpus_limit().unwrap_or(usize::MAX);
        let documents: Vec<D> = documents.into_iter().take(limit).collect();
        if documents.is_empty() {
            return Err(RetrieveError::EmptyCorpus);
        }

        let texts: Vec<_> = documents.iter().map(|d| d.text()).collect();
        let texts: Vec<&str> = texts.iter().map(|t| &**t).collect();
        let dimension = self.vectorizer.fit(&texts)?.len();
        let vectors = self.vectorizer.transform_batch(&texts)?;

        let index = LshIndex::build(&self.config, dimension, vectors.into_iter().zip(documents))?;
        let stats = index.stats();
        info!(
            documents = stats.num_documents,
            dimension = stats.dimension,
            bands = stats.bands,
            rows = stats.rows,
            "similarity engine ready"
        );
        self.index = Some(index);
        Ok(stats)
    }

    fn built(&self) -> Result<&LshIndex<D>> {
        self.index.as_ref().ok_or(RetrieveError::NotBuilt)
    }

    /// Top `topk` documents for `text`, most similar first.
    ///
    /// Blank text is accepted and vectorizes to the all-zero vector; use
    /// [`search`](Self::search) for boundary validation.
    pub fn query(&self, text: &str, topk: usize) -> Result<Vec<SearchHit<'_, D>>> {
        let index = self.built()?;
        check_topk(topk)?;
        let vector = self.vectorizer.transform(text)?;
        index.query_vector(&vector, topk)
    }

    /// Validate `request` at the boundary, then [`query`](Self::query).
    pub fn search(&self, request: &QueryRequest) -> Result<Vec<SearchHit<'_, D>>> {
        request.validate()?;
        self.query(&request.text, request.topk)
    }

    /// Rank against a pre-computed vector in the fitted index space.
    pub fn query_vector(&self, vector: &SparseVector, topk: usize) -> Result<Vec<SearchHit<'_, D>>> {
        self.built()?.query_vector(vector, topk)
    }

    /// Vectorize `text` with the fitted vocabulary.
    pub fn vectorize(&self, text: &str) -> Result<SparseVector> {
        self.built()?;
        self.vectorizer.transform(text)
    }

    /// Returns true once [`build`](Self::build) has succeeded.
    pub fn is_built(&self) -> bool {
        self.index.is_some()
    }

    /// Stats of the built index.
    pub fn stats(&self) -> Result<IndexStats> {
        Ok(self.built()?.stats())
    }

    /// The built index, or [`RetrieveError::NotBuilt`].
    pub fn index(&self) -> Result<&LshIndex<D>> {
        self.built()
    }

    /// Fitted vocabulary, if any.
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vectorizer.vocabulary()
    }

    /// Build configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "chest pain radiating to the left arm with sweating".into(),
            "fractured left arm after a fall, cast applied".into(),
            "routine dental cleaning and fluoride treatment".into(),
            "shortness of breath and chest tightness on exertion".into(),
        ]
    }

    #[test]
    fn query_before_build_fails() {
        let engine: SimilarityEngine<String> = SimilarityEngine::new(EngineConfig::default());
        assert!(matches!(engine.query("chest", 3), Err(RetrieveError::NotBuilt)));
        assert!(matches!(engine.stats(), Err(RetrieveError::NotBuilt)));
        assert!(!engine.is_built());
    }

    #[test]
    fn build_and_query() {
        let mut engine = SimilarityEngine::new(EngineConfig::default());
        let stats = engine.build(corpus()).unwrap();
        assert_eq!(stats.num_documents, 4);

        // identical text -> identical signature, so document 0 is always a candidate
        let hits = engine.query(&corpus()[0], 2).unwrap();
        assert!(!hits.is_empty() && hits.len() <= 2);
        assert_eq!(hits[0].id, 0);
        assert!((hits[0].similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn corpus_limit_applies() {
        let config = EngineConfig::default().with_corpus_limit(Some(2)).unwrap();
        let mut engine = SimilarityEngine::new(config);
        let stats = engine.build(corpus()).unwrap();
        assert_eq!(stats.num_documents, 2);
        assert_eq!(engine.query("dental", 10).unwrap().len(), 2);
    }

    #[test]
    fn empty_corpus_leaves_engine_unbuilt() {
        let mut engine = SimilarityEngine::<String>::new(EngineConfig::default());
        engine.build(corpus()).unwrap();
        assert!(matches!(engine.build(Vec::new()), Err(RetrieveError::EmptyCorpus)));
        assert!(!engine.is_built());
    }

    #[test]
    fn search_validates_boundary() {
        let mut engine = SimilarityEngine::new(EngineConfig::default());
        engine.build(corpus()).unwrap();
        assert!(matches!(
            engine.search(&QueryRequest::new("   ", 3)),
            Err(RetrieveError::EmptyQuery)
        ));
        // the core itself tolerates blank text
        assert_eq!(engine.query("   ", 3).unwrap().len(), 3);
    }
}
