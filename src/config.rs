//! Build configuration and global constants.
//!
//! Compile-time constants fix the hashing arithmetic; [`EngineConfig`] carries the
//! runtime knobs (corpus limit, band/row layout, seed) and validates them at
//! construction time.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrieveError};

/// Prime modulus for the affine hash functions `h(i) = (a·i + b) mod P`.
///
/// Larger than `u32::MAX`, so every dimension index of a `u32` vocabulary maps
/// into a distinct residue before hashing.
pub const PRIME: u64 = 4_294_967_311;

/// Added to weights before division when computing the weighted selection key.
pub const EPSILON: f64 = 1e-9;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of LSH bands.
pub const DEFAULT_BANDS: usize = 20;

/// Default number of signature rows per band.
pub const DEFAULT_ROWS: usize = 5;

/// Default number of documents read into the corpus.
pub const DEFAULT_CORPUS_LIMIT: usize = 1000;

/// Default number of results per query.
pub const DEFAULT_TOPK: usize = 5;

/// Validated build configuration.
///
/// `num_hashes` is kept explicitly (rather than derived) so that a caller who
/// asks for a signature length that does not factor into `bands * rows` gets an
/// error instead of a silently truncated signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig", into = "RawConfig")]
pub struct EngineConfig {
    corpus_limit: Option<usize>,
    num_hashes: usize,
    bands: usize,
    rows: usize,
    seed: u64,
}

impl EngineConfig {
    /// Create a configuration, rejecting `num_hashes != bands * rows`.
    pub fn new(num_hashes: usize, bands: usize, rows: usize) -> Result<Self> {
        let config = Self {
            corpus_limit: Some(DEFAULT_CORPUS_LIMIT),
            num_hashes,
            bands,
            rows,
            seed: DEFAULT_SEED,
        };
        config.validate()?;
        Ok(config)
    }

    /// Pick the `(bands, rows)` factorisation of `num_hashes` whose LSH
    /// threshold `(1/b)^(1/r)` is closest to `threshold`.
    pub fn with_threshold(num_hashes: usize, threshold: f64) -> Result<Self> {
        if num_hashes == 0 {
            return Err(RetrieveError::InvalidConfiguration(
                "num_hashes must be greater than zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RetrieveError::InvalidConfiguration(format!(
                "threshold must be in [0, 1], got {threshold}"
            )));
        }

        let mut best_bands = 1;
        let mut best_error = f64::MAX;
        for b in (1..=num_hashes).filter(|b| num_hashes % b == 0) {
            let r = num_hashes / b;
            let t = (1.0 / b as f64).powf(1.0 / r as f64);
            let error = (t - threshold).abs();
            if error < best_error {
                best_error = error;
                best_bands = b;
            }
        }
        Self::new(num_hashes, best_bands, num_hashes / best_bands)
    }

    /// Check the structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.bands == 0 {
            return Err(RetrieveError::InvalidConfiguration(
                "bands must be greater than zero".into(),
            ));
        }
        if self.rows == 0 {
            return Err(RetrieveError::InvalidConfiguration(
                "rows must be greater than zero".into(),
            ));
        }
        match self.bands.checked_mul(self.rows) {
            Some(product) if product == self.num_hashes => {}
            _ => {
                return Err(RetrieveError::InvalidConfiguration(format!(
                    "num_hashes ({}) must equal bands ({}) * rows ({})",
                    self.num_hashes, self.bands, self.rows
                )))
            }
        }
        if self.corpus_limit == Some(0) {
            return Err(RetrieveError::InvalidConfiguration(
                "corpus_limit must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }

    /// Cap on the number of documents indexed; `None` indexes everything.
    pub fn with_corpus_limit(mut self, limit: Option<usize>) -> Result<Self> {
        self.corpus_limit = limit;
        self.validate()?;
        Ok(self)
    }

    /// Replace the hash family seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Maximum documents indexed by a build; `None` for no limit.
    pub fn corpus_limit(&self) -> Option<usize> {
        self.corpus_limit
    }

    /// Signature length.
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Number of LSH bands.
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Signature values per band.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Seed for the hash family.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Approximate similarity at which the collision probability crosses 1/2.
    pub fn threshold(&self) -> f64 {
        (1.0 / self.bands as f64).powf(1.0 / self.rows as f64)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corpus_limit: Some(DEFAULT_CORPUS_LIMIT),
            num_hashes: DEFAULT_BANDS * DEFAULT_ROWS,
            bands: DEFAULT_BANDS,
            rows: DEFAULT_ROWS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Unvalidated wire form of [`EngineConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawConfig {
    corpus_limit: Option<usize>,
    num_hashes: usize,
    bands: usize,
    rows: usize,
    seed: u64,
}

impl Default for RawConfig {
    fn default() -> Self {
        EngineConfig::default().into()
    }
}

impl From<EngineConfig> for RawConfig {
    fn from(c: EngineConfig) -> Self {
        Self {
            corpus_limit: c.corpus_limit,
            num_hashes: c.num_hashes,
            bands: c.bands,
            rows: c.rows,
            seed: c.seed,
        }
    }
}

impl TryFrom<RawConfig> for EngineConfig {
    type Error = RetrieveError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let config = Self {
            corpus_limit: raw.corpus_limit,
            num_hashes: raw.num_hashes,
            bands: raw.bands,
            rows: raw.rows,
            seed: raw.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
