//! CDF (cumulative distribution function) evaluation.
//!
//! The inverse of the quantile walk: locate the probe value inside the
//! centroid spans and report the fraction of total weight at or below it.
//!
//! # Semantics
//! - **Outside support**: `value < min → 0`, `value > max → 1`, exactly, by
//!   definition of min/max tracking.
//! - **Single centroid**: degenerate support collapses to a 0.5 step;
//!   otherwise a linear ramp between `min` and `max`.
//! - **Interior**: linear interpolation of the enclosing centroid's weight
//!   across its span.
//!
//! # Guarantees
//! - Output is in **[0, 1]** and non-decreasing in the probe value.
//!
//! # Performance
//! - Per probe is O(centroid_count), and the centroid count is bounded by
//!   the compression factor, not the stream length.
//! - [`TDigest::cdf_many`] compresses once, then evaluates every probe;
//!   large batches go through Rayon.

use rayon::prelude::*;

use crate::digest::digest::TDigest;
use crate::{TdError, TdResult};

/// Crossover for parallel batch evaluation with Rayon.
///
/// Keep this conservative: Rayon setup has a fixed cost, and a single probe
/// walk is cheap. Below this size a scalar loop is typically faster.
const PAR_MIN: usize = 32_768;

/// Reference float equality from the original engine: means within one
/// single-precision epsilon are the same support point.
const FLOAT_EQ_EPS: f64 = f32::EPSILON as f64;

#[inline]
fn interpolate(x: f64, x0: f64, x1: f64) -> f64 {
    (x - x0) / (x1 - x0)
}

impl TDigest {
    /// Fraction of total weight at or below `value`.
    ///
    /// Forces a compression pass first. Any finite probe is accepted.
    pub fn cdf(&mut self, value: f64) -> TdResult<f64> {
        if !value.is_finite() {
            return Err(TdError::NonFiniteValue {
                context: "cdf probe",
            });
        }
        self.compress();
        if self.total_weight == 0 {
            return Err(TdError::Empty);
        }
        Ok(self.cdf_of(value))
    }

    /// Batch CDF: validate every probe, compress once, evaluate all.
    ///
    /// Validation happens before any state change, so a bad probe in the
    /// middle of the batch leaves the digest untouched.
    pub fn cdf_many(&mut self, values: &[f64]) -> TdResult<Vec<f64>> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(TdError::NonFiniteValue {
                context: "cdf probe",
            });
        }
        self.compress();
        if self.total_weight == 0 {
            return Err(TdError::Empty);
        }

        let this: &TDigest = self;
        if values.len() >= PAR_MIN {
            Ok(values
                .par_iter()
                .with_min_len(4096)
                .map(|&v| this.cdf_of(v))
                .collect())
        } else {
            Ok(values.iter().map(|&v| this.cdf_of(v)).collect())
        }
    }

    /// Walk kernel. Assumes a compressed, non-empty digest.
    fn cdf_of(&self, value: f64) -> f64 {
        let cents = &self.centroids;
        let min = self.min.into_inner();
        let max = self.max.into_inner();
        let total = self.total_weight as f64;

        if value < min {
            return 0.0;
        }
        if value > max {
            return 1.0;
        }

        if cents.len() == 1 {
            if (max - min).abs() <= FLOAT_EQ_EPS {
                return 0.5;
            }
            return interpolate(value, min, max);
        }

        // Two virtual zero-weight centroids at `min` seed the walk; `left`
        // and `right` are each span's half-widths around the current mean.
        let mut a_mean = min;
        let mut a_weight = 0.0_f64;
        let mut b_mean = min;
        let mut b_weight = 0.0_f64;
        let mut right = 0.0_f64;
        let mut weight_so_far = 0.0_f64;

        for c in cents {
            let left = b_mean - (a_mean + right);
            a_mean = b_mean;
            a_weight = b_weight;
            b_mean = c.mean();
            b_weight = c.weight() as f64;
            right = (b_mean - a_mean) * a_weight / (a_weight + b_weight);

            if value < a_mean + right {
                let cdf = (weight_so_far
                    + a_weight * interpolate(value, a_mean - left, a_mean + right))
                    / total;
                return cdf.max(0.0);
            }
            weight_so_far += a_weight;
        }

        // Last centroid's span runs out to the true maximum.
        let left = b_mean - (a_mean + right);
        a_mean = b_mean;
        a_weight = b_weight;
        right = max - a_mean;

        if value < a_mean + right {
            return (weight_so_far + a_weight * interpolate(value, a_mean - left, a_mean + right))
                / total;
        }
        1.0
    }
}
