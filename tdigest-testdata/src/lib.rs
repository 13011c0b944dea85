//! tdigest-testdata
//! Synthetic observation streams shared by benches and integration tests.
//! Shapes are latency-flavored (milliseconds) so tail behavior is visible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal, Normal};

/// Available synthetic stream profiles.
#[derive(Clone, Copy, Debug)]
pub enum Profile {
    /// Uniform in [0, 1)
    Uniform,
    /// Gaussian around 50ms, clipped at zero
    Gaussian,
    /// Log-normal service latencies (heavy right tail)
    LogNormalMs,
    /// Two modes (cache hit / cache miss) plus a slow-path tail
    Bimodal,
}

/// Generate `n` observations for the chosen profile, deterministically from `seed`.
pub fn samples(profile: Profile, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n);

    match profile {
        Profile::Uniform => {
            for _ in 0..n {
                out.push(rng.random::<f64>());
            }
        }
        Profile::Gaussian => {
            let normal = Normal::new(50.0, 12.0).expect("valid sigma");
            for _ in 0..n {
                let x: f64 = normal.sample(&mut rng);
                out.push(x.max(0.0));
            }
        }
        Profile::LogNormalMs => {
            // Median ~= e^3 ms ~= 20ms with a long right tail.
            let lognorm = LogNormal::new(3.0, 0.8).expect("valid sigma");
            for _ in 0..n {
                out.push(lognorm.sample(&mut rng));
            }
        }
        Profile::Bimodal => {
            for _ in 0..n {
                let bucket: u32 = rng.random_range(0..100);
                let v = match bucket {
                    // Fast path: ~2ms with jitter
                    0..=69 => 2.0 + rng.random::<f64>() * 0.5,
                    // Slow path: ~80ms with jitter
                    70..=96 => 80.0 + rng.random::<f64>() * 10.0,
                    // Timeouts and retries, way out in the tail
                    _ => 1_000.0 + rng.random::<f64>() * 4_000.0,
                };
                out.push(v);
            }
        }
    }
    out
}

/// Sorted copy of [`samples`], handy for exact-rank comparisons in tests.
pub fn sorted_samples(profile: Profile, n: usize, seed: u64) -> Vec<f64> {
    let mut v = samples(profile, n, seed);
    v.sort_by(|a, b| a.total_cmp(b));
    v
}
