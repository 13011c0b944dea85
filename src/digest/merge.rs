//! Merge plumbing: a k-way merge over sorted centroid runs, and the
//! digest-level pairwise merge built on top of it.
//!
//! The compression engine consumes runs through [`RunMerge`] so that folding
//! the pending buffer (two runs) and combining two digests (three runs) share
//! one ordered-stream producer.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::digest::centroid::Centroid;
use crate::digest::compress;
use crate::digest::digest::TDigest;

/// k-way merge of centroid runs by increasing mean.
///
/// Each run must already be sorted by mean. Ties across runs are resolved by
/// run index (earlier run wins) so the stream order is deterministic; equal
/// means need no coalescing here because the k-limit pass folds them anyway.
pub(crate) struct RunMerge<'a> {
    runs: Vec<&'a [Centroid]>,
    pos: Vec<usize>,
    heap: BinaryHeap<(Reverse<OrderedFloat<f64>>, Reverse<usize>)>,
}

impl<'a> RunMerge<'a> {
    pub(crate) fn new(runs: Vec<&'a [Centroid]>) -> Self {
        let mut heap = BinaryHeap::with_capacity(runs.len());
        let pos = vec![0; runs.len()];
        for (i, r) in runs.iter().enumerate() {
            if let Some(c) = r.first() {
                heap.push((Reverse(OrderedFloat::from(c.mean())), Reverse(i)));
            }
        }
        Self { runs, pos, heap }
    }
}

impl<'a> Iterator for RunMerge<'a> {
    type Item = Centroid;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, Reverse(run_idx)) = self.heap.pop()?;

        let p = &mut self.pos[run_idx];
        let out = self.runs[run_idx][*p];
        *p += 1;

        if let Some(c) = self.runs[run_idx].get(*p) {
            self.heap
                .push((Reverse(OrderedFloat::from(c.mean())), Reverse(run_idx)));
        }
        Some(out)
    }
}

impl TDigest {
    /// Combine `other` into `self`, leaving `other` untouched.
    ///
    /// Both sides' pending state participates: `self`'s buffer is folded
    /// first, and `other`'s centroids and still-buffered points are read as a
    /// snapshot and sent through a single compression pass against the
    /// combined total weight. `self`'s configuration (compression factor,
    /// thresholds) is retained. Total weight and extrema combine exactly;
    /// quantile shape combines up to the documented approximation error.
    pub fn merge(&mut self, other: &TDigest) {
        if other.total_weight == 0 {
            return;
        }
        self.compress();

        // Snapshot of the read-only participant: its pending points become a
        // third sorted run next to the two centroid lists.
        let mut pending: Vec<Centroid> = other
            .buffer
            .peek()
            .iter()
            .map(|p| Centroid::new(p.value, p.weight))
            .collect();
        pending.sort();

        let new_total = self.total_weight + other.total_weight;
        let stream = RunMerge::new(vec![&self.centroids, &other.centroids, &pending]);
        let merged = compress::k_limit_pass(stream, self.compression, new_total, self.max_centroids);

        self.centroids = merged;
        self.total_weight = new_total;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.compression_count += 1;
    }
}
