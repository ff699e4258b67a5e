//! Seeded family of affine hash functions.
//!
//! Each function is `h(i) = (a·i + b) mod P` with `1 <= a < P`, `0 <= b < P`
//! and `P` = [`PRIME`]. The family plays the role of the random permutations in
//! MinHash. It is drawn from an explicit generator, so the same seed always
//! yields the same functions and, for an unchanged corpus, the same buckets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EngineConfig, PRIME};
use crate::error::{Result, RetrieveError};

/// One affine hash function `(a·i + b) mod P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffineHash {
    a: u64,
    b: u64,
}

impl AffineHash {
    /// Create from explicit coefficients.
    pub fn new(a: u64, b: u64) -> Result<Self> {
        if !(1..PRIME).contains(&a) {
            return Err(RetrieveError::InvalidParameter(format!(
                "coefficient a must be in [1, {}), got {a}",
                PRIME
            )));
        }
        if b >= PRIME {
            return Err(RetrieveError::InvalidParameter(format!(
                "coefficient b must be in [0, {}), got {b}",
                PRIME
            )));
        }
        Ok(Self { a, b })
    }

    /// Draw `a` uniformly from `[1, P-1]` and `b` from `[0, P-1]`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let a = rng.random_range(1..PRIME);
        let b = rng.random_range(0..PRIME);
        Self { a, b }
    }

    /// Evaluate at dimension `index`.
    ///
    /// `a` and `b` are below 2^33, so `a·i + b` needs up to 65 bits; the
    /// product is formed in `u128` and cannot wrap.
    #[inline]
    pub fn apply(&self, index: u32) -> u64 {
        let v = u128::from(self.a) * u128::from(index) + u128::from(self.b);
        (v % u128::from(PRIME)) as u64
    }

    /// Multiplier, in `[1, P)`.
    pub fn a(&self) -> u64 {
        self.a
    }

    /// Offset, in `[0, P)`.
    pub fn b(&self) -> u64 {
        self.b
    }
}

/// Ordered set of exactly `bands * rows` hash functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashFamily {
    functions: Vec<AffineHash>,
    bands: usize,
    rows: usize,
}

impl HashFamily {
    /// Draw `bands * rows` functions from `rng`.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R, bands: usize, rows: usize) -> Result<Self> {
        let num_hashes = Self::checked_len(bands, rows)?;
        let functions = (0..num_hashes).map(|_| AffineHash::sample(rng)).collect();
        Ok(Self {
            functions,
            bands,
            rows,
        })
    }

    /// Deterministic family from a seed.
    pub fn with_seed(seed: u64, bands: usize, rows: usize) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_rng(&mut rng, bands, rows)
    }

    /// Family described by a validated [`EngineConfig`].
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::with_seed(config.seed(), config.bands(), config.rows())
    }

    /// Wrap explicit functions; their count must equal `bands * rows`.
    pub fn from_functions(functions: Vec<AffineHash>, bands: usize, rows: usize) -> Result<Self> {
        let num_hashes = Self::checked_len(bands, rows)?;
        if functions.len() != num_hashes {
            return Err(RetrieveError::InvalidConfiguration(format!(
                "expected {num_hashes} hash functions for {bands} bands x {rows} rows, got {}",
                functions.len()
            )));
        }
        Ok(Self {
            functions,
            bands,
            rows,
        })
    }

    fn checked_len(bands: usize, rows: usize) -> Result<usize> {
        if bands == 0 || rows == 0 {
            return Err(RetrieveError::InvalidConfiguration(format!(
                "bands and rows must be positive, got {bands} x {rows}"
            )));
        }
        bands.checked_mul(rows).ok_or_else(|| {
            RetrieveError::InvalidConfiguration(format!("{bands} x {rows} overflows"))
        })
    }

    /// Hash functions in signature order.
    pub fn functions(&self) -> &[AffineHash] {
        &self.functions
    }

    /// Signature length.
    pub fn num_hashes(&self) -> usize {
        self.functions.len()
    }

    /// Number of bands the family is laid out for.
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Functions per band.
    pub fn rows(&self) -> usize {
        self.rows
    }
}
