//! One member of the population together with its search strategy.
//!
//! Each [`Individual`] carries its own step size `σ`, a smoothed success
//! probability, and a covariance matrix `C` with lower Cholesky factor `A`.
//! Mutation draws `z ~ N(0, I)` and moves the search point by `σ A z`.
//! After selection, [`Individual::update`] adapts `σ` with a success rule:
//!
//! ```text
//! p_succ ← (1 − c_p) p_succ + c_p λ_succ        c_p = p_t / (2 + p_t)
//! σ      ← σ exp((p_succ − p_t) / (d (1 − p_t)))  d   = 1 + n / 2
//! ```
//!
//! and, after a success while `p_succ < p_t`, performs a rank-one update of
//! `C` along the last mutation direction.

use nalgebra::{DMatrix, DVector};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rng_util;

/// Upper bound on the step size.
pub const MAX_STEP_SIZE: f64 = 1e10;

/// Parameters of [`Individual::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdaptationParams {
    /// Target success probability `p_t`.
    pub target_success: f64,
    /// Floor for the step size.
    pub min_step_size: f64,
    /// Whether successful steps shape the covariance matrix.
    pub covariance_adaptation: bool,
}

impl Default for AdaptationParams {
    fn default() -> Self {
        Self {
            target_success: 0.44,
            min_step_size: 1e-20,
            covariance_adaptation: true,
        }
    }
}

/// A candidate solution and its self-adaptive mutation state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Individual {
    search_point: Vec<f64>,
    step_size: f64,
    penalized_fitness: Vec<f64>,
    unpenalized_fitness: Vec<f64>,
    rank: usize,
    selected: bool,
    age: u64,
    success_count: f64,
    success_probability: f64,
    covariance: DMatrix<f64>,
    cholesky_factor: DMatrix<f64>,
    last_step: Vec<f64>,
}

impl Individual {
    /// An unevaluated individual at the origin with isotropic covariance.
    #[must_use]
    pub fn new(
        n_variables: usize,
        n_objectives: usize,
        step_size: f64,
        target_success: f64,
    ) -> Self {
        Self {
            search_point: vec![0.0; n_variables],
            step_size,
            penalized_fitness: Vec::with_capacity(n_objectives),
            unpenalized_fitness: Vec::with_capacity(n_objectives),
            rank: 0,
            selected: false,
            age: 0,
            success_count: 0.0,
            success_probability: target_success,
            covariance: DMatrix::identity(n_variables, n_variables),
            cholesky_factor: DMatrix::identity(n_variables, n_variables),
            last_step: Vec::new(),
        }
    }

    /// Decision vector.
    #[must_use]
    pub fn search_point(&self) -> &[f64] {
        &self.search_point
    }

    /// Current step size `σ`.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Fitness including the constraint penalty; used for selection.
    #[must_use]
    pub fn penalized_fitness(&self) -> &[f64] {
        &self.penalized_fitness
    }

    /// Fitness at the closest feasible point; reported to callers.
    #[must_use]
    pub fn unpenalized_fitness(&self) -> &[f64] {
        &self.unpenalized_fitness
    }

    /// Non-domination front index from the last selection (0 = best).
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Whether the last selection kept this individual.
    #[must_use]
    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Generations survived since creation.
    #[must_use]
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Successes credited since the last [`update`](Self::update).
    #[must_use]
    pub fn success_count(&self) -> f64 {
        self.success_count
    }

    /// Smoothed success probability.
    #[must_use]
    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    /// Covariance matrix of the mutation distribution.
    #[must_use]
    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.covariance
    }

    /// Whether both fitness vectors have been assigned.
    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        !self.penalized_fitness.is_empty() && !self.unpenalized_fitness.is_empty()
    }

    /// Move the search point by `σ A z` with `z ~ N(0, I)`.
    ///
    /// Consumes exactly `n` normal draws from `rng`, so a seeded generator
    /// reproduces the step.
    pub fn mutate(&mut self, rng: &mut fastrand::Rng) {
        let n = self.search_point.len();
        let z = DVector::from_fn(n, |_, _| rng_util::standard_normal(rng));
        let step = &self.cholesky_factor * z;
        for (x, s) in self.search_point.iter_mut().zip(step.iter()) {
            *x += self.step_size * s;
        }
        self.last_step.clear();
        self.last_step.extend(step.iter());
    }

    /// Adapt the step size (and covariance) from the credited successes,
    /// then clear the success count.
    #[allow(clippy::cast_precision_loss)]
    pub fn update(&mut self, params: &AdaptationParams) {
        let target = params.target_success;
        let successful = self.success_count > 0.0;
        let lambda = self.success_count.clamp(0.0, 1.0);

        let c_p = target / (2.0 + target);
        self.success_probability = (1.0 - c_p) * self.success_probability + c_p * lambda;

        let n = self.search_point.len() as f64;
        let damping = 1.0 + n / 2.0;
        let sigma =
            self.step_size * ((self.success_probability - target) / (damping * (1.0 - target))).exp();
        self.step_size = if sigma.is_nan() {
            params.min_step_size
        } else {
            sigma.max(params.min_step_size).min(MAX_STEP_SIZE)
        };

        if params.covariance_adaptation
            && successful
            && self.success_probability < target
            && self.last_step.len() == self.search_point.len()
        {
            self.rank_one_update(n);
        }

        self.success_count = 0.0;
    }

    fn rank_one_update(&mut self, n: f64) {
        let c_cov = 2.0 / (n * n + 6.0);
        let step = DVector::from_column_slice(&self.last_step);
        let updated = (1.0 - c_cov) * &self.covariance + c_cov * (&step * step.transpose());
        // Keep the previous shape if the update lost positive definiteness.
        if let Some(cholesky) = updated.clone().cholesky() {
            self.cholesky_factor = cholesky.l();
            self.covariance = updated;
        }
    }

    pub(crate) fn set_search_point(&mut self, point: Vec<f64>) {
        self.search_point = point;
    }

    pub(crate) fn set_fitness(&mut self, penalized: Vec<f64>, unpenalized: Vec<f64>) {
        self.penalized_fitness = penalized;
        self.unpenalized_fitness = unpenalized;
    }

    pub(crate) fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn reset_age(&mut self) {
        self.age = 0;
    }

    pub(crate) fn grow_older(&mut self) {
        self.age += 1;
    }

    pub(crate) fn record_success(&mut self) {
        self.success_count += 1.0;
    }

    #[cfg(test)]
    pub(crate) fn last_step(&self) -> &[f64] {
        &self.last_step
    }
}
