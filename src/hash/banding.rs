//! Banded LSH index over weighted MinHash signatures.
//!
//! A signature of `bands * rows` values is cut into `bands` contiguous bands of
//! `rows` values. Each band is reduced to a stable 64-bit digest, and the item
//! id is filed under `(band, digest)`. Two items become candidates for each
//! other when they agree on every value of at least one band.
//!
//! For per-position agreement probability `s`, the chance of sharing at least
//! one bucket is `1 - (1 - s^r)^b`:
//!
//! - more rows per band: rarer, more precise matches (fewer false positives)
//! - more bands: more chances to collide (higher recall)
//!
//! Digest collisions between different band tuples only enlarge the candidate
//! set; final ranking is exact, so they never change results.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Result, RetrieveError};
use crate::hash::minhash::Signature;

const DIGEST_SEED: u64 = 0xA076_1D64_78BD_642F;

/// SplitMix64 finaliser.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Stable digest of an ordered band.
///
/// Independent of `std`'s hasher, so bucket keys are identical across
/// processes, platforms and toolchain versions.
pub fn band_digest(values: &[u64]) -> u64 {
    values
        .iter()
        .fold(splitmix64(DIGEST_SEED ^ values.len() as u64), |acc, &v| {
            splitmix64(acc ^ v)
        })
}

/// Bucket address: band position plus band digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BucketKey {
    band: usize,
    digest: u64,
}

/// Bucket table built once and read many times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandIndex {
    bands: usize,
    rows: usize,
    buckets: HashMap<BucketKey, BTreeSet<u32>>,
    num_items: usize,
}

impl BandIndex {
    /// Empty index for signatures of `bands * rows` values.
    pub fn new(bands: usize, rows: usize) -> Result<Self> {
        if bands == 0 || rows == 0 {
            return Err(RetrieveError::InvalidConfiguration(format!(
                "bands and rows must be positive, got {bands} x {rows}"
            )));
        }
        Ok(Self {
            bands,
            rows,
            buckets: HashMap::new(),
            num_items: 0,
        })
    }

    fn check_len(&self, signature: &Signature) -> Result<()> {
        let expected = self.bands * self.rows;
        if signature.len() != expected {
            return Err(RetrieveError::InvalidParameter(format!(
                "signature has {} values, index expects {expected}",
                signature.len()
            )));
        }
        Ok(())
    }

    fn keys<'a>(&'a self, signature: &'a Signature) -> impl Iterator<Item = BucketKey> + 'a {
        (0..self.bands).filter_map(move |band| {
            let values = signature.band(band, self.rows)?;
            Some(BucketKey {
                band,
                digest: band_digest(values),
            })
        })
    }

    /// File `item_id` under every band of `signature`.
    pub fn add(&mut self, item_id: u32, signature: &Signature) -> Result<()> {
        self.check_len(signature)?;
        let keys: Vec<BucketKey> = self.keys(signature).collect();
        let mut inserted = false;
        for key in keys {
            inserted |= self.buckets.entry(key).or_default().insert(item_id);
        }
        if inserted {
            self.num_items += 1;
        }
        Ok(())
    }

    /// Union of all buckets the query signature falls into. May be empty.
    pub fn candidates(&self, signature: &Signature) -> Result<BTreeSet<u32>> {
        self.check_len(signature)?;
        let mut out = BTreeSet::new();
        for key in self.keys(signature) {
            if let Some(ids) = self.buckets.get(&key) {
                out.extend(ids.iter().copied());
            }
        }
        Ok(out)
    }

    /// Number of bands.
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Signature values per band.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Distinct item ids added.
    pub fn len(&self) -> usize {
        self.num_items
    }

    /// Returns true if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.num_items == 0
    }

    /// Number of non-empty buckets across all bands.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Size of the most populated bucket.
    pub fn largest_bucket(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).max().unwrap_or(0)
    }

    /// Approximate similarity at which collision probability crosses 1/2.
    pub fn threshold(&self) -> f64 {
        (1.0 / self.bands as f64).powf(1.0 / self.rows as f64)
    }

    /// Probability that two items with per-position agreement `s` share a bucket.
    pub fn collision_probability(&self, s: f64) -> f64 {
        1.0 - (1.0 - s.powi(self.rows as i32)).powi(self.bands as i32)
    }

    /// Approximate heap footprint in bytes.
    pub fn size_bytes(&self) -> usize {
        self.buckets
            .values()
            .map(|ids| std::mem::size_of::<BucketKey>() + ids.len() * std::mem::size_of::<u32>())
            .sum()
    }
}
