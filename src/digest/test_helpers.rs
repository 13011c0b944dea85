//! Assertion helpers shared by unit and integration tests.

pub fn assert_exact(label: &str, expected: f64, got: f64) {
    assert!(
        expected == got,
        "{}: expected exactly {:.9}, got {:.9}",
        label,
        expected,
        got
    );
}

pub fn assert_rel_close(label: &str, expected: f64, got: f64, rtol: f64) {
    let denom = expected.abs().max(1e-300);
    let rel = ((expected - got).abs()) / denom;
    assert!(
        rel < rtol,
        "{}: expected ~= {:.9}, got {:.9}, rel_err={:.6e}, rtol={:.6e}",
        label,
        expected,
        got,
        rel,
        rtol
    );
}

pub fn assert_monotone_chain(label: &str, values: &[f64]) {
    for i in 1..values.len() {
        assert!(
            values[i] >= values[i - 1],
            "{}: non-monotone at i={}: {} < {}",
            label,
            i,
            values[i],
            values[i - 1]
        );
    }
}

/// Mean relative error of `got` against `expected`, pairwise.
pub fn mean_rel_error(expected: &[f64], got: &[f64]) -> f64 {
    assert_eq!(expected.len(), got.len());
    assert!(!expected.is_empty());
    let sum: f64 = expected
        .iter()
        .zip(got)
        .map(|(e, g)| (e - g).abs() / e.abs().max(1e-300))
        .sum();
    sum / expected.len() as f64
}

/// Mean absolute error of `got` against `expected`, pairwise.
pub fn mean_abs_error(expected: &[f64], got: &[f64]) -> f64 {
    assert_eq!(expected.len(), got.len());
    assert!(!expected.is_empty());
    let sum: f64 = expected.iter().zip(got).map(|(e, g)| (e - g).abs()).sum();
    sum / expected.len() as f64
}
