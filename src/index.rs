//! Built weighted-MinHash LSH index over pre-vectorized items.
//!
//! Build flows one way (vectors → signatures → buckets); afterwards the index
//! is read-only. A query signs its vector with the same hash family, collects
//! the items sharing at least one bucket, and re-ranks them exactly.
//!
//! ## Fallback
//!
//! If no bucket matches, every item becomes a candidate. The query then costs a
//! full scan, but a non-empty index never answers with nothing just because the
//! probabilistic filter missed.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{Result, RetrieveError};
use crate::hash::{BandIndex, HashFamily, Signature};
use crate::query::{check_topk, SearchHit};
use crate::similarity::weighted_jaccard;
use crate::sparse::SparseVector;

/// One indexed item.
#[derive(Debug, Clone)]
pub struct CorpusItem<D> {
    /// Position in build order.
    pub id: u32,
    pub vector: SparseVector,
    pub signature: Signature,
    /// Pass-through payload, never interpreted by the index.
    pub document: D,
}

/// Index statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub num_documents: usize,
    pub dimension: usize,
    pub num_hashes: usize,
    pub bands: usize,
    pub rows: usize,
    pub num_buckets: usize,
    pub largest_bucket: usize,
    pub threshold: f64,
    pub size_bytes: usize,
}

/// Immutable weighted-MinHash LSH index.
#[derive(Debug, Clone)]
pub struct LshIndex<D> {
    family: HashFamily,
    bands: BandIndex,
    items: Vec<CorpusItem<D>>,
    dimension: usize,
}

impl<D> LshIndex<D> {
    /// Sign every vector and file it into the band buckets.
    ///
    /// Ids are assigned in iteration order starting at 0. Every vector index
    /// must be below `dimension`.
    pub fn build<I>(config: &EngineConfig, dimension: usize, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SparseVector, D)>,
    {
        config.validate()?;
        let family = HashFamily::from_config(config)?;
        let mut bands = BandIndex::new(config.bands(), config.rows())?;
        let mut stored = Vec::new();

        for (pos, (vector, document)) in items.into_iter().enumerate() {
            let id = u32::try_from(pos).map_err(|_| {
                RetrieveError::InvalidParameter("corpus exceeds u32::MAX items".into())
            })?;
            vector.check_dimension(dimension)?;
            let signature = family.sign(&vector);
            bands.add(id, &signature)?;
            stored.push(CorpusItem {
                id,
                vector,
                signature,
                document,
            });
        }
        if stored.is_empty() {
            return Err(RetrieveError::EmptyCorpus);
        }

        let index = Self {
            family,
            bands,
            items: stored,
            dimension,
        };
        info!(
            documents = index.items.len(),
            dimension,
            buckets = index.bands.num_buckets(),
            "built lsh index"
        );
        Ok(index)
    }

    /// Signature of `vector` under this index's hash family.
    pub fn signature(&self, vector: &SparseVector) -> Signature {
        self.family.sign(vector)
    }

    /// Item ids sharing at least one bucket with `signature`.
    pub fn candidates(&self, signature: &Signature) -> Result<BTreeSet<u32>> {
        self.bands.candidates(signature)
    }

    /// Rank the top `topk` items for `query` by exact weighted Jaccard.
    ///
    /// Ties are broken by ascending id, so identical queries give identical
    /// output.
    pub fn query_vector(&self, query: &SparseVector, topk: usize) -> Result<Vec<SearchHit<'_, D>>> {
        check_topk(topk)?;
        query.check_dimension(self.dimension)?;

        let signature = self.family.sign(query);
        let candidates = self.bands.candidates(&signature)?;
        let candidate_ids: Vec<u32> = if candidates.is_empty() {
            debug!(documents = self.items.len(), "no bucket matched, scanning full corpus");
            self.items.iter().map(|item| item.id).collect()
        } else {
            debug!(candidates = candidates.len(), "lsh candidates");
            candidates.into_iter().collect()
        };

        let mut scored: Vec<(u32, f32)> = candidate_ids
            .into_iter()
            .map(|id| (id, weighted_jaccard(query, &self.items[id as usize].vector)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(topk);

        Ok(scored
            .into_iter()
            .map(|(id, similarity)| SearchHit {
                id,
                similarity,
                document: &self.items[id as usize].document,
            })
            .collect())
    }

    /// Indexed items in id order.
    pub fn items(&self) -> &[CorpusItem<D>] {
        &self.items
    }

    /// Item with the given id.
    pub fn get(&self, id: u32) -> Option<&CorpusItem<D>> {
        self.items.get(id as usize)
    }

    /// Hash family used for every signature in this index.
    pub fn family(&self) -> &HashFamily {
        &self.family
    }

    /// Underlying bucket table.
    pub fn band_index(&self) -> &BandIndex {
        &self.bands
    }

    /// Size of the vector index space.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Size and layout summary.
    pub fn stats(&self) -> IndexStats {
        let vectors: usize = self.items.iter().map(|i| i.vector.size_bytes()).sum();
        let signatures = self.items.len() * self.family.num_hashes() * std::mem::size_of::<u64>();
        IndexStats {
            num_documents: self.items.len(),
            dimension: self.dimension,
            num_hashes: self.family.num_hashes(),
            bands: self.bands.bands(),
            rows: self.bands.rows(),
            num_buckets: self.bands.num_buckets(),
            largest_bucket: self.bands.largest_bucket(),
            threshold: self.bands.threshold(),
            size_bytes: vectors + signatures + self.bands.size_bytes(),
        }
    }
}
