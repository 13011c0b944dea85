//! Quantile and percentile evaluation.
//!
//! The walk treats each centroid as mass centered on its mean, with span
//! boundaries at the weight-weighted midpoints between adjacent means; the
//! outermost boundaries are pinned to the tracked `min`/`max`, which is what
//! makes `quantile(0.0)` and `quantile(1.0)` exact.
//!
//! # Guarantees
//! - Monotone in `q`.
//! - `quantile(0.0) == min`, `quantile(1.0) == max`.
//!
//! # Edge cases
//! - Empty digest → [`TdError::Empty`].
//! - `q` outside `[0, 1]` (NaN included) → [`TdError::QuantileOutOfRange`],
//!   checked before any compression runs.

use crate::digest::digest::TDigest;
use crate::{TdError, TdResult};

impl TDigest {
    /// Estimate the value at quantile `q ∈ [0.0, 1.0]`.
    ///
    /// Forces a compression pass first so pending points are never excluded
    /// from the answer.
    pub fn quantile(&mut self, q: f64) -> TdResult<f64> {
        if !(0.0..=1.0).contains(&q) {
            return Err(TdError::QuantileOutOfRange { got: q });
        }
        self.compress();
        if self.total_weight == 0 {
            return Err(TdError::Empty);
        }
        Ok(self.quantile_of(q))
    }

    /// `percentile(p)` for `p ∈ [0.0, 100.0]` is `quantile(p / 100)`.
    pub fn percentile(&mut self, p: f64) -> TdResult<f64> {
        if !(0.0..=100.0).contains(&p) {
            return Err(TdError::PercentileOutOfRange { got: p });
        }
        self.quantile(p / 100.0)
    }

    /// Walk kernel. Assumes a compressed, non-empty digest.
    fn quantile_of(&self, q: f64) -> f64 {
        let cents = &self.centroids;
        let min = self.min.into_inner();
        let max = self.max.into_inner();

        if cents.len() == 1 {
            return cents[0].mean();
        }
        if q == 0.0 {
            return min;
        }
        if q == 1.0 {
            return max;
        }

        let index = q * self.total_weight as f64;

        // Virtual zero-weight centroid at `min` seeds the walk so the first
        // real span interpolates down to the true minimum.
        let mut a_mean = min;
        let mut a_weight = 0.0_f64;
        let mut left = min;
        let mut weight_so_far = 0.0_f64;

        for c in cents {
            let b_mean = c.mean();
            let b_weight = c.weight() as f64;
            let right = (b_weight * a_mean + a_weight * b_mean) / (a_weight + b_weight);

            if index < weight_so_far + a_weight {
                let p = (index - weight_so_far) / a_weight;
                return left * (1.0 - p) + right * p;
            }
            weight_so_far += a_weight;
            left = right;
            a_mean = b_mean;
            a_weight = b_weight;
        }

        // Last centroid's span runs out to the true maximum.
        if index < weight_so_far + a_weight {
            let p = (index - weight_so_far) / a_weight;
            return left * (1.0 - p) + max * p;
        }
        max
    }
}

#[cfg(test)]
mod tests {
    use crate::digest::test_helpers::{assert_monotone_chain, assert_rel_close};
    use crate::{TdError, TDigest};

    #[test]
    fn endpoints_are_exact() {
        let mut t = TDigest::new(100).expect("positive compression");
        for v in [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0] {
            t.insert(v).expect("finite");
        }
        assert_eq!(t.quantile(0.0), Ok(1.0));
        assert_eq!(t.quantile(1.0), Ok(9.0));
        assert_eq!(t.percentile(0.0), Ok(1.0));
        assert_eq!(t.percentile(100.0), Ok(9.0));
    }

    #[test]
    fn grid_is_monotone() {
        let mut t = TDigest::new(50).expect("positive compression");
        for i in 0..5_000 {
            t.insert(((i * 37) % 5_000) as f64).expect("finite");
        }
        let grid: Vec<f64> = (0..=20)
            .map(|i| t.quantile(i as f64 / 20.0).expect("non-empty"))
            .collect();
        assert_monotone_chain("quantile grid", &grid);
    }

    #[test]
    fn single_observation_dominates_every_quantile() {
        let mut t = TDigest::default();
        t.insert(42.5).expect("finite");
        for q in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(t.quantile(q), Ok(42.5));
        }
    }

    #[test]
    fn median_of_uniform_run_is_close() {
        let mut t = TDigest::default();
        for i in 1..=1_000 {
            t.insert(i as f64).expect("finite");
        }
        assert_rel_close("median", 500.0, t.quantile(0.5).expect("non-empty"), 0.01);
        assert_rel_close(
            "p99",
            990.0,
            t.percentile(99.0).expect("non-empty"),
            0.01,
        );
    }

    #[test]
    fn probe_domain_is_enforced_before_compression() {
        let mut t = TDigest::default();
        t.insert(1.0).expect("finite");
        assert_eq!(
            t.quantile(1.0000001),
            Err(TdError::QuantileOutOfRange { got: 1.0000001 })
        );
        assert_eq!(
            t.quantile(-0.0000001),
            Err(TdError::QuantileOutOfRange { got: -0.0000001 })
        );
        assert!(matches!(
            t.quantile(f64::NAN),
            Err(TdError::QuantileOutOfRange { .. })
        ));
        assert_eq!(
            t.percentile(100.0000001),
            Err(TdError::PercentileOutOfRange { got: 100.0000001 })
        );
        assert_eq!(
            t.percentile(-0.0000001),
            Err(TdError::PercentileOutOfRange { got: -0.0000001 })
        );
    }

    #[test]
    fn empty_digest_is_an_explicit_error() {
        let mut t = TDigest::default();
        assert_eq!(t.quantile(0.5), Err(TdError::Empty));
        assert_eq!(t.percentile(50.0), Err(TdError::Empty));
    }
}
