//! Cross-thread behavior of the reader/writer façade.

use std::sync::Arc;
use std::thread;

use merging_tdigest::{SharedTDigest, TDigest};

#[test]
fn concurrent_inserts_conserve_weight() {
    let shared = Arc::new(SharedTDigest::new(200).expect("positive compression"));
    let writers = 8;
    let per_writer = 5_000u64;

    let handles: Vec<_> = (0..writers)
        .map(|w| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..per_writer {
                    let v = (w * 1_000) as f64 + (i % 997) as f64;
                    shared.insert(v).expect("finite");
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("writer thread");
    }

    assert_eq!(shared.total_weight(), writers as u64 * per_writer);
    assert!(shared.centroid_count() <= shared.max_centroids());
}

#[test]
fn queries_interleaved_with_writers_stay_sane() {
    let shared = Arc::new(SharedTDigest::default());
    for i in 0..1_000 {
        shared.insert(i as f64).expect("finite");
    }

    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for i in 1_000..6_000 {
                shared.insert((i % 1_000) as f64).expect("finite");
            }
        })
    };
    let reader = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for _ in 0..200 {
                let p50 = shared.quantile(0.5).expect("non-empty");
                assert!((0.0..1_000.0).contains(&p50));
                let c = shared.cdf(500.0).expect("non-empty");
                assert!((0.0..=1.0).contains(&c));
            }
        })
    };
    writer.join().expect("writer thread");
    reader.join().expect("reader thread");

    assert_eq!(shared.total_weight(), 6_000);
}

#[test]
fn fan_in_merge_from_worker_digests() {
    // Each worker summarizes its own partition; the collector merges the
    // unwrapped results, which is the intended distributed pattern.
    let collector = SharedTDigest::default();

    let workers: Vec<_> = (0..4)
        .map(|w| {
            thread::spawn(move || {
                let mut local = TDigest::default();
                for i in 0..10_000 {
                    local.insert(((w * 10_000) + i) as f64).expect("finite");
                }
                local
            })
        })
        .collect();

    for worker in workers {
        let local = worker.join().expect("worker thread");
        collector.merge_digest(&local);
    }

    assert_eq!(collector.total_weight(), 40_000);
    assert_eq!(collector.min(), Some(0.0));
    assert_eq!(collector.max(), Some(39_999.0));

    let p50 = collector.quantile(0.5).expect("non-empty");
    assert!((19_000.0..21_000.0).contains(&p50), "p50 = {p50}");
}

#[test]
fn configuration_reads_do_not_need_write_access() {
    let shared = SharedTDigest::new(123).expect("positive compression");
    // Shared-lock accessors answer from configuration alone, pending or not.
    shared.insert(1.0).expect("finite");
    assert_eq!(shared.compression(), 123);
    assert!(shared.buffer_threshold() > 0);
    assert!(shared.max_centroids() > shared.buffer_threshold());
    assert_eq!(shared.compression_count(), 0, "nothing has forced a fold");
    assert_eq!(shared.min(), Some(1.0));
    assert_eq!(shared.max(), Some(1.0));
    assert!(!shared.is_empty());
}
