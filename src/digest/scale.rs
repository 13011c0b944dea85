//! The arcsine scale function and the digest sizing formulas derived from
//! the compression factor δ.
//!
//! `k_location` maps a normalized rank `q` to a position on the k-scale whose
//! slope is steep near the tails and shallow near the median. The compression
//! engine closes a cluster once it would span more than one unit of k, which
//! is what concentrates resolution at q ≈ 0 and q ≈ 1.

use std::f64::consts::{FRAC_PI_2, PI};

/// Family-defining `q → k` mapping: `k(q) = δ·(asin(2q−1) + π/2)/π`.
///
/// Monotone from `k(0) = 0` to `k(1) = δ`. The asin argument is clamped so
/// cumulative-weight rounding at q ≈ 1 cannot wander out of domain.
#[inline]
pub(crate) fn k_location(delta: f64, q: f64) -> f64 {
    delta * ((2.0 * q - 1.0).clamp(-1.0, 1.0).asin() + FRAC_PI_2) / PI
}

/// Post-compression bound on the centroid count: `ceil(δ·π/2) + 1`.
///
/// Independent of how many observations were ever inserted; used to
/// preallocate the output list and exposed for observability.
#[inline]
pub(crate) fn centroid_capacity(compression: u32) -> usize {
    (compression as f64 * FRAC_PI_2).ceil() as usize + 1
}

/// Buffered-point count that triggers an automatic compression pass:
/// `trunc(7.5 + 0.37·δ − 2·10⁻⁴·δ²)`, never below 1.
///
/// The quadratic term caps buffer growth for large δ; past δ ≈ 1900 the raw
/// formula goes negative, so the floor keeps batching meaningful there.
#[inline]
pub(crate) fn buffer_threshold(compression: u32) -> usize {
    let c = compression as f64;
    let raw = 7.5 + 0.37 * c - 2e-4 * c * c;
    if raw < 1.0 {
        1
    } else {
        raw as usize
    }
}
