//! The compression engine.
//!
//! A pass drains the pending buffer, interleaves the fresh (sorted) points
//! with the existing centroid list, and walks the union left to right
//! accumulating items into clusters. A cluster is closed as soon as admitting
//! the next item would stretch it across more than one unit of the k-scale at
//! its rank position; the arcsine scale makes that unit narrow at the tails
//! and wide at the median, so edge centroids stay near weight 1 while the
//! middle absorbs heavy mass.
//!
//! Weight bookkeeping is exact (integer); only means move in float space.

// ---------- tracing helper ----------
#[allow(unused_macros)]
macro_rules! dtrace {
    ($($arg:tt)*) => {
        if std::env::var("TDIGEST_TRACE").is_ok() {
            eprintln!($($arg)*);
        }
    }
}

use crate::digest::centroid::{is_sorted_by_mean, Centroid};
use crate::digest::digest::TDigest;
use crate::digest::merge::RunMerge;
use crate::digest::scale::k_location;

/// Fold all pending points into the centroid list. No-op when nothing is
/// pending, so back-to-back passes never re-cluster an already-compressed
/// digest.
pub(crate) fn run(digest: &mut TDigest) {
    if digest.buffer.is_empty() {
        return;
    }

    let points = digest.buffer.drain();
    let mut fresh: Vec<Centroid> = points
        .iter()
        .map(|p| Centroid::new(p.value, p.weight))
        .collect();
    // Stable sort: equal values keep insertion order.
    fresh.sort();

    dtrace!(
        "compress: {} pending points into {} centroids, total_weight={}",
        fresh.len(),
        digest.centroids.len(),
        digest.total_weight
    );

    let existing = std::mem::take(&mut digest.centroids);
    let stream = RunMerge::new(vec![&existing, &fresh]);
    digest.centroids = k_limit_pass(
        stream,
        digest.compression,
        digest.total_weight,
        digest.max_centroids,
    );
    digest.compression_count += 1;

    dtrace!(
        "compress: done, {} centroids (cap {}), pass #{}",
        digest.centroids.len(),
        digest.max_centroids,
        digest.compression_count
    );
}

/// Walk an ascending-mean stream of weighted items and emit the clustered
/// centroid list.
///
/// `total_weight` must be the exact weight of the whole stream; rank
/// positions `q = weight_so_far / total_weight` are measured against it. A
/// cluster closes when the k-location of its would-be right edge is more than
/// one unit past the k-location of its left edge.
pub(crate) fn k_limit_pass<I>(
    items: I,
    compression: u32,
    total_weight: u64,
    capacity: usize,
) -> Vec<Centroid>
where
    I: IntoIterator<Item = Centroid>,
{
    let delta = compression as f64;
    let total = total_weight as f64;

    let mut out: Vec<Centroid> = Vec::with_capacity(capacity);
    let mut open: Option<Centroid> = None;
    let mut weight_so_far: u64 = 0;
    let mut k_left = 0.0_f64;

    for item in items {
        weight_so_far += item.weight();
        let k_right = k_location(delta, weight_so_far as f64 / total);

        match open.as_mut() {
            None => open = Some(item),
            Some(cluster) => {
                if k_right - k_left > 1.0 {
                    out.push(*cluster);
                    k_left = k_location(delta, (weight_so_far - item.weight()) as f64 / total);
                    open = Some(item);
                } else {
                    cluster.absorb(item.mean(), item.weight());
                }
            }
        }
    }
    if let Some(cluster) = open {
        out.push(cluster);
    }

    debug_assert!(is_sorted_by_mean(&out));
    debug_assert_eq!(
        out.iter().map(|c| c.weight()).sum::<u64>(),
        weight_so_far,
        "compression must conserve weight"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(m: f64, w: u64) -> Centroid {
        Centroid::new(m, w)
    }

    fn pass(items: Vec<Centroid>, compression: u32) -> Vec<Centroid> {
        let total: u64 = items.iter().map(|c| c.weight()).sum();
        k_limit_pass(items, compression, total, 64)
    }

    #[test]
    fn conserves_weight_and_order() {
        let items: Vec<_> = (0..500).map(|i| c(i as f64, 1 + (i % 3) as u64)).collect();
        let total: u64 = items.iter().map(|x| x.weight()).sum();

        let out = pass(items, 20);
        assert_eq!(out.iter().map(|x| x.weight()).sum::<u64>(), total);
        assert!(is_sorted_by_mean(&out));
    }

    #[test]
    fn output_is_bounded_by_compression_not_input_size() {
        for n in [100usize, 10_000] {
            let items: Vec<_> = (0..n).map(|i| c(i as f64, 1)).collect();
            let out = pass(items, 50);
            assert!(
                out.len() <= crate::digest::scale::centroid_capacity(50),
                "n={} gave {} centroids",
                n,
                out.len()
            );
        }
    }

    #[test]
    fn tail_clusters_stay_light() {
        let items: Vec<_> = (0..10_000).map(|i| c(i as f64, 1)).collect();
        let out = pass(items, 100);

        // The defining property over uniform histogramming: the first and
        // last clusters hold almost no mass, the median cluster holds a lot.
        let mid = out.len() / 2;
        assert!(out[0].weight() <= 2);
        assert!(out[out.len() - 1].weight() <= 2);
        assert!(out[mid].weight() > 20 * out[0].weight());
    }

    #[test]
    fn single_item_passes_through() {
        let out = pass(vec![c(42.0, 7)], 400);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].weight(), 7);
        assert!((out[0].mean() - 42.0).abs() < 1e-12);
    }

    #[test]
    fn empty_stream_yields_empty_list() {
        let out = k_limit_pass(Vec::new(), 400, 0, 8);
        assert!(out.is_empty());
    }

    #[test]
    fn cluster_means_stay_inside_their_value_range() {
        let items: Vec<_> = (0..1000).map(|i| c((i as f64).sqrt(), 1)).collect();
        let lo = items.first().map(|x| x.mean()).expect("non-empty");
        let hi = items.last().map(|x| x.mean()).expect("non-empty");
        let out = pass(items, 30);
        for cl in &out {
            assert!(cl.mean() >= lo && cl.mean() <= hi);
        }
    }
}
