#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::individual::{AdaptationParams, MAX_STEP_SIZE};
use crate::types::NotionOfSuccess;

/// Configuration of a [`Mocma`](super::Mocma) run.
///
/// # Defaults
///
/// | Field | Default |
/// |---|---|
/// | `mu` | `100` |
/// | `penalty_factor` | `1e-6` |
/// | `success_threshold` | `0.44` |
/// | `notion_of_success` | [`IndividualBased`](NotionOfSuccess::IndividualBased) |
/// | `initial_sigma` | `1.0` |
/// | `min_step_size` | `1e-20` |
/// | `covariance_adaptation` | `true` |
/// | `seed` | `None` (entropy-seeded) |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MocmaConfig {
    /// Number of parents; the population holds `2 * mu` individuals.
    pub mu: usize,
    /// Weight of the squared repair distance added to infeasible fitness.
    pub penalty_factor: f64,
    /// Target success probability of the step-size rule.
    pub success_threshold: f64,
    /// How offspring success is judged.
    pub notion_of_success: NotionOfSuccess,
    /// Step size of every initial individual.
    pub initial_sigma: f64,
    /// Floor for adapted step sizes.
    pub min_step_size: f64,
    /// Whether successful steps shape each individual's covariance.
    pub covariance_adaptation: bool,
    /// Seed of the master random generator.
    pub seed: Option<u64>,
}

impl Default for MocmaConfig {
    fn default() -> Self {
        Self {
            mu: 100,
            penalty_factor: 1e-6,
            success_threshold: 0.44,
            notion_of_success: NotionOfSuccess::IndividualBased,
            initial_sigma: 1.0,
            min_step_size: 1e-20,
            covariance_adaptation: true,
            seed: None,
        }
    }
}

impl MocmaConfig {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the `Invalid*` error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.mu == 0 {
            return Err(Error::InvalidMu {
                mu: self.mu,
                population: 0,
            });
        }
        if !(self.penalty_factor.is_finite() && self.penalty_factor >= 0.0) {
            return Err(Error::InvalidPenaltyFactor(self.penalty_factor));
        }
        if !(self.success_threshold > 0.0 && self.success_threshold < 1.0) {
            return Err(Error::InvalidSuccessThreshold(self.success_threshold));
        }
        if !(self.initial_sigma > 0.0 && self.initial_sigma <= MAX_STEP_SIZE) {
            return Err(Error::InvalidInitialSigma(self.initial_sigma));
        }
        if !(self.min_step_size > 0.0 && self.min_step_size <= self.initial_sigma) {
            return Err(Error::InvalidMinStepSize(self.min_step_size));
        }
        Ok(())
    }

    pub(crate) fn adaptation(&self) -> AdaptationParams {
        AdaptationParams {
            target_success: self.success_threshold,
            min_step_size: self.min_step_size,
            covariance_adaptation: self.covariance_adaptation,
        }
    }
}
