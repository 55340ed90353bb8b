/// Generate a random `f64` in the range `[low, high)`.
#[inline]
pub(crate) fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Sample a value from the standard normal distribution using the Box-Muller transform.
pub(crate) fn standard_normal(rng: &mut fastrand::Rng) -> f64 {
    // 1 - [0, 1) keeps u1 away from zero
    let u1 = 1.0 - rng.f64();
    let u2 = f64_range(rng, 0.0, core::f64::consts::TAU);
    (-2.0 * u1.ln()).sqrt() * u2.cos()
}

/// Draw one child seed per slot from `rng`.
///
/// The i-th seed only depends on the master state and `i`, so work keyed by
/// slot index is reproducible whatever order it runs in.
pub(crate) fn derive_seeds(rng: &mut fastrand::Rng, n: usize) -> Vec<u64> {
    (0..n).map(|_| rng.u64(..)).collect()
}

/// Create the master generator, seeded when reproducibility is requested.
pub(crate) fn make_rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}
