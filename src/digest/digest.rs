// src/digest/digest.rs
use ordered_float::OrderedFloat;

use crate::digest::buffer::PointBuffer;
use crate::digest::centroid::Centroid;
use crate::digest::compress;
use crate::digest::scale;
use crate::{TdError, TdResult};

/// Compression factor used by [`TDigest::default`].
pub const DEFAULT_COMPRESSION: u32 = 400;

/// A buffered merging t-digest.
///
/// Insertions land in a pending buffer and update the running totals in
/// O(1); the buffer is folded into the bounded centroid list when it crosses
/// [`buffer_threshold`](TDigest::buffer_threshold), and any operation that
/// reads centroid state forces the fold first. Memory is bounded by the
/// compression factor δ regardless of stream length.
///
/// The struct is single-threaded and non-reentrant; wrap it in
/// [`SharedTDigest`](crate::SharedTDigest) for cross-thread use.
#[derive(Debug, Clone, PartialEq)]
pub struct TDigest {
    pub(crate) compression: u32,
    pub(crate) buffer_threshold: usize,
    pub(crate) max_centroids: usize,
    pub(crate) total_weight: u64,
    pub(crate) min: OrderedFloat<f64>,
    pub(crate) max: OrderedFloat<f64>,
    pub(crate) buffer: PointBuffer,
    pub(crate) centroids: Vec<Centroid>,
    pub(crate) compression_count: u64,
}

impl Default for TDigest {
    fn default() -> Self {
        Self::with_compression(DEFAULT_COMPRESSION)
    }
}

impl TDigest {
    /// Create an empty digest with the given compression factor δ.
    ///
    /// Larger δ means more centroids, lower error, more memory. Fails with
    /// [`TdError::InvalidCompression`] when δ is zero.
    pub fn new(compression: u32) -> TdResult<Self> {
        if compression == 0 {
            return Err(TdError::InvalidCompression);
        }
        Ok(Self::with_compression(compression))
    }

    fn with_compression(compression: u32) -> Self {
        TDigest {
            compression,
            buffer_threshold: scale::buffer_threshold(compression),
            max_centroids: scale::centroid_capacity(compression),
            total_weight: 0,
            min: OrderedFloat::from(f64::INFINITY),
            max: OrderedFloat::from(f64::NEG_INFINITY),
            buffer: PointBuffer::default(),
            centroids: Vec::new(),
            compression_count: 0,
        }
    }

    /// Insert one observation with weight 1.
    #[inline]
    pub fn insert(&mut self, value: f64) -> TdResult<()> {
        self.insert_weighted(value, 1)
    }

    /// Insert `weight` units of mass at `value`.
    ///
    /// O(1) apart from the compression pass that runs once the pending
    /// buffer crosses its threshold. Rejects non-finite values and zero
    /// weight before any state changes.
    pub fn insert_weighted(&mut self, value: f64, weight: u64) -> TdResult<()> {
        if !value.is_finite() {
            return Err(TdError::NonFiniteValue {
                context: "sample value",
            });
        }
        if weight == 0 {
            return Err(TdError::ZeroWeight);
        }

        self.buffer.push(value, weight);
        self.total_weight += weight;
        self.min = self.min.min(OrderedFloat::from(value));
        self.max = self.max.max(OrderedFloat::from(value));

        if self.buffer.len() > self.buffer_threshold {
            compress::run(self);
        }
        Ok(())
    }

    /// Fold all pending points into the centroid list now.
    ///
    /// Idempotent: with nothing pending this is a no-op and the centroid
    /// list is left byte-for-byte unchanged.
    #[inline]
    pub fn compress(&mut self) {
        compress::run(self);
    }

    /* ===========================
     * Compression-forcing accessors
     * =========================== */

    /// Total inserted weight. Forces a compression pass so the answer and
    /// the centroid state agree.
    pub fn total_weight(&mut self) -> u64 {
        self.compress();
        self.total_weight
    }

    /// Number of centroids after folding pending points.
    pub fn centroid_count(&mut self) -> usize {
        self.compress();
        self.centroids.len()
    }

    /// The compressed centroid list, ascending by mean.
    ///
    /// Snapshot-consistent as of this call; re-iterate the slice freely.
    pub fn centroids(&mut self) -> &[Centroid] {
        self.compress();
        &self.centroids
    }

    /* ===========================
     * Cheap accessors
     * =========================== */

    /// The configured compression factor δ.
    #[inline]
    pub fn compression(&self) -> u32 {
        self.compression
    }

    /// Pending-point count that triggers an automatic compression pass.
    #[inline]
    pub fn buffer_threshold(&self) -> usize {
        self.buffer_threshold
    }

    /// Upper bound on the post-compression centroid count.
    #[inline]
    pub fn max_centroids(&self) -> usize {
        self.max_centroids
    }

    /// How many times the compression engine has run. Diagnostic only.
    #[inline]
    pub fn compression_count(&self) -> u64 {
        self.compression_count
    }

    /// Smallest value ever inserted, or `None` while empty.
    #[inline]
    pub fn min(&self) -> Option<f64> {
        (self.total_weight > 0).then(|| self.min.into_inner())
    }

    /// Largest value ever inserted, or `None` while empty.
    #[inline]
    pub fn max(&self) -> Option<f64> {
        (self.total_weight > 0).then(|| self.max.into_inner())
    }

    /// True when no observations have been inserted or merged in.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }
}
