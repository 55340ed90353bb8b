//! Monte-Carlo approximation of the least hypervolume contributor.
//!
//! Every candidate's exclusive region is enclosed in an axis-aligned box
//! spanned by the candidate and the closest neighbours that cut it off.
//! Samples are drawn from these boxes in rounds; a sample is a hit if no other
//! member of the front dominates it. After each round Hoeffding confidence
//! intervals are formed around the contribution estimates and every candidate
//! whose lower bound lies above the smallest upper bound is dropped. The race
//! ends when one candidate remains or the sample budget is spent.

use parking_lot::Mutex;

use super::{Indicator, ReferencePoint, argmin, check_prunable};
use crate::error::{Error, Result};
use crate::{pareto, rng_util};

/// Randomized least-hypervolume-contributor.
///
/// # Probabilistic relaxation
///
/// The returned index is, with probability at least `1 - error_probability`,
/// a point whose exact contribution is among the smallest of the front. It is
/// **not** guaranteed to be the smallest: when two contributions are closer
/// than the sampling resolution either may be reported. This is the intended
/// trade-off, since the cost does not grow with the number of objectives the
/// way exact contributions do.
///
/// Dominated and duplicated points contribute exactly zero and are reported
/// without sampling. [`value`](Indicator::value) is the exact hypervolume.
///
/// # Examples
///
/// ```
/// use mocma::indicator::{Indicator, LeastContributorApproximator};
///
/// let approximator = LeastContributorApproximator::builder()
///     .reference(vec![2.0, 2.0, 2.0])
///     .seed(7)
///     .build()
///     .unwrap();
///
/// let front = vec![
///     vec![0.0, 1.0, 1.0],
///     vec![1.0, 0.0, 1.0],
///     vec![1.0, 1.0, 0.0],
///     vec![0.95, 0.95, 0.95],
/// ];
/// assert_eq!(approximator.least_contributor(&front).unwrap(), 3);
/// ```
#[derive(Debug)]
pub struct LeastContributorApproximator {
    reference: ReferencePoint,
    error_probability: f64,
    samples_per_round: usize,
    max_samples: usize,
    rng: Mutex<fastrand::Rng>,
}

impl Clone for LeastContributorApproximator {
    fn clone(&self) -> Self {
        Self {
            reference: self.reference.clone(),
            error_probability: self.error_probability,
            samples_per_round: self.samples_per_round,
            max_samples: self.max_samples,
            rng: Mutex::new(self.rng.lock().clone()),
        }
    }
}

impl Default for LeastContributorApproximator {
    fn default() -> Self {
        Self {
            reference: ReferencePoint::default(),
            error_probability: DEFAULT_ERROR_PROBABILITY,
            samples_per_round: DEFAULT_SAMPLES_PER_ROUND,
            max_samples: DEFAULT_MAX_SAMPLES,
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }
}

const DEFAULT_ERROR_PROBABILITY: f64 = 1e-2;
const DEFAULT_SAMPLES_PER_ROUND: usize = 100;
const DEFAULT_MAX_SAMPLES: usize = 100_000;

impl LeastContributorApproximator {
    /// Approximator with default settings and an adaptive reference point.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for [`LeastContributorApproximator`].
    #[must_use]
    pub fn builder() -> LeastContributorApproximatorBuilder {
        LeastContributorApproximatorBuilder::default()
    }

    /// The reference point policy.
    #[must_use]
    pub fn reference(&self) -> &ReferencePoint {
        &self.reference
    }

    /// Probability that the race eliminates a true least contributor.
    #[must_use]
    pub fn error_probability(&self) -> f64 {
        self.error_probability
    }

    /// Samples drawn per remaining candidate and round.
    #[must_use]
    pub fn samples_per_round(&self) -> usize {
        self.samples_per_round
    }

    /// Upper bound on the samples drawn for a single candidate.
    #[must_use]
    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    fn race(&self, front: &[Vec<f64>], reference: &[f64]) -> usize {
        let n = front.len();

        // Zero contributors need no sampling.
        for (i, p) in front.iter().enumerate() {
            let outside = p.iter().zip(reference).any(|(&v, &r)| v >= r);
            let covered = front
                .iter()
                .enumerate()
                .any(|(k, q)| k != i && weakly_dominates(q, p));
            if outside || covered {
                return i;
            }
        }

        let boxes: Vec<Vec<f64>> = (0..n).map(|i| bounding_box(front, i, reference)).collect();
        let volumes: Vec<f64> = front
            .iter()
            .zip(&boxes)
            .map(|(p, upper)| p.iter().zip(upper).map(|(&lo, &hi)| hi - lo).product())
            .collect();
        if let Some(i) = volumes.iter().position(|&v| v <= 0.0) {
            return i;
        }

        let max_rounds = self.max_samples.div_ceil(self.samples_per_round);
        #[allow(clippy::cast_precision_loss)]
        let log_term = (2.0 * n as f64 * max_rounds as f64 / self.error_probability).ln();

        let mut hits = vec![0_u64; n];
        let mut drawn = vec![0_u64; n];
        let mut estimates = vec![0.0; n];
        let mut active: Vec<usize> = (0..n).collect();
        let mut rng = self.rng.lock();
        let mut sample = vec![0.0; reference.len()];

        for _ in 0..max_rounds {
            if active.len() <= 1 {
                break;
            }

            for &i in &active {
                for _ in 0..self.samples_per_round {
                    for ((s, &lo), &hi) in sample.iter_mut().zip(&front[i]).zip(&boxes[i]) {
                        *s = rng_util::f64_range(&mut rng, lo, hi);
                    }
                    let dominated = front
                        .iter()
                        .enumerate()
                        .any(|(k, q)| k != i && weakly_dominates(q, &sample));
                    if !dominated {
                        hits[i] += 1;
                    }
                }
                drawn[i] += self.samples_per_round as u64;
            }

            #[allow(clippy::cast_precision_loss)]
            let radius = |i: usize| volumes[i] * (log_term / (2.0 * drawn[i] as f64)).sqrt();
            for &i in &active {
                #[allow(clippy::cast_precision_loss)]
                let rate = hits[i] as f64 / drawn[i] as f64;
                estimates[i] = volumes[i] * rate;
            }
            let min_upper = active
                .iter()
                .map(|&i| estimates[i] + radius(i))
                .fold(f64::INFINITY, f64::min);
            active.retain(|&i| estimates[i] - radius(i) <= min_upper);
        }

        let remaining: Vec<f64> = active.iter().map(|&i| estimates[i]).collect();
        active[argmin(&remaining)]
    }
}

/// `a <= b` in every objective.
fn weakly_dominates(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(&x, &y)| x <= y)
}

/// Upper corner of a box containing the exclusive region of `front[i]`.
///
/// A neighbour that is no worse than the candidate in all objectives but one
/// dominates everything beyond its value in that objective, so the box is
/// cut there.
fn bounding_box(front: &[Vec<f64>], i: usize, reference: &[f64]) -> Vec<f64> {
    let p = &front[i];
    let mut upper = reference.to_vec();
    for (k, q) in front.iter().enumerate() {
        if k == i {
            continue;
        }
        let mut worse = q.iter().zip(p).enumerate().filter(|(_, (qv, pv))| qv > pv);
        if let (Some((m, (&qm, _))), None) = (worse.next(), worse.next()) {
            upper[m] = upper[m].min(qm);
        }
    }
    upper
}

impl Indicator for LeastContributorApproximator {
    fn name(&self) -> &'static str {
        "approximate-hypervolume"
    }

    fn optimizer_name(&self) -> &'static str {
        "ApproximatedVolumeMOCMA"
    }

    fn value(&self, front: &[Vec<f64>]) -> Result<f64> {
        if front.is_empty() {
            return Ok(0.0);
        }
        let reference = self.reference.resolve(front)?;
        Ok(pareto::hypervolume(front, &reference))
    }

    fn least_contributor(&self, front: &[Vec<f64>]) -> Result<usize> {
        check_prunable(front)?;
        let reference = self.reference.resolve(front)?;
        Ok(self.race(front, &reference))
    }

    fn validate(&self, points: &[Vec<f64>]) -> Result<()> {
        self.reference.resolve(points).map(|_| ())
    }

    fn rng_state(&self) -> Option<u64> {
        Some(self.rng.lock().get_seed())
    }

    fn set_rng_state(&self, state: u64) {
        *self.rng.lock() = fastrand::Rng::with_seed(state);
    }
}

/// Builder for [`LeastContributorApproximator`].
#[derive(Clone, Debug, Default)]
pub struct LeastContributorApproximatorBuilder {
    reference: Option<ReferencePoint>,
    error_probability: Option<f64>,
    samples_per_round: Option<usize>,
    max_samples: Option<usize>,
    seed: Option<u64>,
}

impl LeastContributorApproximatorBuilder {
    /// Use a fixed reference point.
    #[must_use]
    pub fn reference(mut self, reference: Vec<f64>) -> Self {
        self.reference = Some(ReferencePoint::Fixed(reference));
        self
    }

    /// Use an explicit reference point policy.
    #[must_use]
    pub fn reference_point(mut self, reference: ReferencePoint) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Probability of eliminating a true least contributor. Default: `0.01`.
    #[must_use]
    pub fn error_probability(mut self, delta: f64) -> Self {
        self.error_probability = Some(delta);
        self
    }

    /// Samples per candidate and round. Default: `100`.
    #[must_use]
    pub fn samples_per_round(mut self, samples: usize) -> Self {
        self.samples_per_round = Some(samples);
        self
    }

    /// Sample budget per candidate. Default: `100_000`.
    #[must_use]
    pub fn max_samples(mut self, samples: usize) -> Self {
        self.max_samples = Some(samples);
        self
    }

    /// Seed the sampler for reproducible races.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the approximator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidErrorProbability`] unless the error probability
    /// lies in `(0, 1)`, [`Error::InvalidSampleBudget`] if a budget is zero or
    /// smaller than one round, and the reference point configuration errors.
    pub fn build(self) -> Result<LeastContributorApproximator> {
        let reference = self.reference.unwrap_or_default();
        reference.check()?;

        let error_probability = self.error_probability.unwrap_or(DEFAULT_ERROR_PROBABILITY);
        if !(error_probability > 0.0 && error_probability < 1.0) {
            return Err(Error::InvalidErrorProbability(error_probability));
        }

        let samples_per_round = self.samples_per_round.unwrap_or(DEFAULT_SAMPLES_PER_ROUND);
        let max_samples = self.max_samples.unwrap_or(DEFAULT_MAX_SAMPLES);
        if samples_per_round == 0 || max_samples < samples_per_round {
            return Err(Error::InvalidSampleBudget {
                samples_per_round,
                max_samples,
            });
        }

        Ok(LeastContributorApproximator {
            reference,
            error_probability,
            samples_per_round,
            max_samples,
            rng: Mutex::new(rng_util::make_rng(self.seed)),
        })
    }
}
