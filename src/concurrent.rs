//! Thread-safe façade over one [`TDigest`].
//!
//! Composition, not inheritance: a [`SharedTDigest`] owns the digest behind a
//! single reader/writer lock and exposes the same operation set. Pure
//! configuration reads take the shared lock; everything that can trigger a
//! compression pass — including rank queries — takes the exclusive lock,
//! because compression mutates centroid and buffer storage. Queries are
//! therefore serialized with writers even though they are conceptually
//! reads.
//!
//! Lock acquisition is blocking and unbounded; there is no cancellation or
//! timeout. [`merge`](SharedTDigest::merge) clones the source under its read
//! lock before touching the target's write lock, so the two guards never
//! overlap. A source that other threads keep mutating is merged as whatever
//! snapshot the clone observed; callers needing a precise cut point must
//! synchronize externally.

use parking_lot::RwLock;

use crate::digest::{Centroid, TDigest};
use crate::TdResult;

pub struct SharedTDigest {
    inner: RwLock<TDigest>,
}

impl SharedTDigest {
    /// Create an empty shared digest with the given compression factor.
    pub fn new(compression: u32) -> TdResult<Self> {
        Ok(Self::from_digest(TDigest::new(compression)?))
    }

    /// Wrap an existing digest.
    pub fn from_digest(digest: TDigest) -> Self {
        SharedTDigest {
            inner: RwLock::new(digest),
        }
    }

    /// Unwrap, dropping the lock.
    pub fn into_inner(self) -> TDigest {
        self.inner.into_inner()
    }

    /// Clone of the current state, taken under the read lock.
    pub fn snapshot(&self) -> TDigest {
        self.inner.read().clone()
    }

    /* ===========================
     * Shared-lock accessors (never compress)
     * =========================== */

    pub fn compression(&self) -> u32 {
        self.inner.read().compression()
    }

    pub fn buffer_threshold(&self) -> usize {
        self.inner.read().buffer_threshold()
    }

    pub fn max_centroids(&self) -> usize {
        self.inner.read().max_centroids()
    }

    pub fn compression_count(&self) -> u64 {
        self.inner.read().compression_count()
    }

    pub fn min(&self) -> Option<f64> {
        self.inner.read().min()
    }

    pub fn max(&self) -> Option<f64> {
        self.inner.read().max()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /* ===========================
     * Exclusive-lock operations (may compress)
     * =========================== */

    pub fn insert(&self, value: f64) -> TdResult<()> {
        self.inner.write().insert(value)
    }

    pub fn insert_weighted(&self, value: f64, weight: u64) -> TdResult<()> {
        self.inner.write().insert_weighted(value, weight)
    }

    pub fn compress(&self) {
        self.inner.write().compress()
    }

    pub fn total_weight(&self) -> u64 {
        self.inner.write().total_weight()
    }

    pub fn centroid_count(&self) -> usize {
        self.inner.write().centroid_count()
    }

    /// Owned snapshot of the compressed centroid list, ascending by mean.
    pub fn centroids(&self) -> Vec<Centroid> {
        self.inner.write().centroids().to_vec()
    }

    pub fn quantile(&self, q: f64) -> TdResult<f64> {
        self.inner.write().quantile(q)
    }

    pub fn percentile(&self, p: f64) -> TdResult<f64> {
        self.inner.write().percentile(p)
    }

    pub fn cdf(&self, value: f64) -> TdResult<f64> {
        self.inner.write().cdf(value)
    }

    pub fn cdf_many(&self, values: &[f64]) -> TdResult<Vec<f64>> {
        self.inner.write().cdf_many(values)
    }

    /// Merge a snapshot of `other` into this digest. `other` is unmodified.
    pub fn merge(&self, other: &SharedTDigest) {
        // Two statements: the read guard on `other` drops before the write
        // lock on `self` is taken, so no lock ordering issue can arise even
        // when callers pass the same object on both sides.
        let snapshot = other.snapshot();
        self.inner.write().merge(&snapshot);
    }

    /// Merge an unwrapped digest into this one.
    pub fn merge_digest(&self, other: &TDigest) {
        self.inner.write().merge(other);
    }
}

impl Default for SharedTDigest {
    fn default() -> Self {
        Self::from_digest(TDigest::default())
    }
}

impl From<TDigest> for SharedTDigest {
    fn from(digest: TDigest) -> Self {
        Self::from_digest(digest)
    }
}
