//! # merging-tdigest
//!
//! A buffered merging t-digest: bounded-memory approximation of the
//! distribution of a numeric stream, answering quantile, percentile and CDF
//! queries with small, rank-dependent error. Accuracy concentrates at the
//! distribution tails, which is what latency and telemetry pipelines care
//! about.
//!
//! Insertions are O(1) into a pending buffer; a compression pass folds the
//! buffer into a sorted list of weighted centroids whose size is bounded by
//! the compression factor δ, independent of stream length. Two digests built
//! independently can be merged pairwise.
//!
//! ```rust
//! use merging_tdigest::TDigest;
//!
//! # fn main() -> merging_tdigest::TdResult<()> {
//! let mut latencies = TDigest::new(400)?;
//! for ms in [12.0, 8.5, 310.0, 9.1, 11.7, 42.0] {
//!     latencies.insert(ms)?;
//! }
//! let p99 = latencies.percentile(99.0)?;
//! assert!(p99 <= 310.0);
//! assert_eq!(latencies.cdf(1_000.0)?, 1.0);
//! # Ok(())
//! # }
//! ```
//!
//! For cross-thread use, [`SharedTDigest`] wraps one digest behind a
//! reader/writer lock; note that rank queries take the *write* lock because
//! they may fold pending points first.

pub mod digest;

mod concurrent;
mod error;

pub use concurrent::SharedTDigest;
pub use digest::{Centroid, TDigest, DEFAULT_COMPRESSION};
pub use error::{TdError, TdResult};
