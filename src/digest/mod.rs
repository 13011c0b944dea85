//! The clustering/summarization engine: pending-point buffer, compression
//! pass, quantile/CDF walks, and pairwise merge, all hanging off the
//! [`TDigest`] aggregate root.

pub mod test_helpers;

// Internal building blocks
mod buffer;
mod cdf;
mod centroid;
mod compress;
mod digest;
mod merge;
mod quantile;
mod scale;

// Public surface
pub use centroid::Centroid;
pub use digest::{TDigest, DEFAULT_COMPRESSION};
