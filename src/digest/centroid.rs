use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A centroid summarizes a cluster of observations by its weighted mean.
///
/// `weight` is the (exact, integer) number of observation units absorbed;
/// `mean` drifts as mass is absorbed but always stays inside the cluster's
/// value range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Centroid {
    mean: OrderedFloat<f64>,
    weight: u64,
}

impl PartialOrd for Centroid {
    fn partial_cmp(&self, other: &Centroid) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Centroid {
    fn cmp(&self, other: &Centroid) -> Ordering {
        // The compressed list is ordered by mean; ties keep creation order
        // via stable sorting, so mean alone decides here.
        self.mean.cmp(&other.mean)
    }
}

impl Centroid {
    #[inline]
    pub(crate) fn new(mean: f64, weight: u64) -> Self {
        debug_assert!(weight >= 1);
        Centroid {
            mean: OrderedFloat::from(mean),
            weight,
        }
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean.into_inner()
    }

    #[inline]
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Fold `weight` units at `mean` into this cluster, shifting the stored
    /// mean by the weighted delta. Weight arithmetic stays exact.
    #[inline]
    pub(crate) fn absorb(&mut self, mean: f64, weight: u64) {
        let w_new = self.weight + weight;
        let m = self.mean.into_inner();
        self.mean = OrderedFloat::from(m + (mean - m) * weight as f64 / w_new as f64);
        self.weight = w_new;
    }
}

/* ===========================
 * Helpers used by the compression engine
 * =========================== */

/// Non-decreasing by mean (equal means are legal after a merge of piles).
#[inline]
pub(crate) fn is_sorted_by_mean(cs: &[Centroid]) -> bool {
    cs.windows(2).all(|w| w[0].mean() <= w[1].mean())
}
