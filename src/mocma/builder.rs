use crate::error::Result;
use crate::indicator::{HypervolumeIndicator, Indicator};
use crate::types::NotionOfSuccess;

use super::{Mocma, MocmaConfig};

/// A builder for [`Mocma`] with a fluent API.
///
/// Created via [`Mocma::builder()`]. Unset options fall back to
/// [`MocmaConfig::default`]; the indicator defaults to exact hypervolume
/// with an adaptive reference point.
///
/// # Examples
///
/// ```
/// use mocma::indicator::AdditiveEpsilonIndicator;
/// use mocma::{Mocma, NotionOfSuccess};
///
/// let optimizer = Mocma::builder()
///     .mu(20)
///     .notion_of_success(NotionOfSuccess::PopulationBased)
///     .indicator(AdditiveEpsilonIndicator::new())
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(optimizer.mu(), 20);
/// assert_eq!(optimizer.name(), "EpsilonMOCMA");
///
/// assert!(Mocma::builder().mu(0).build().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct MocmaBuilder<I = HypervolumeIndicator> {
    indicator: I,
    mu: Option<usize>,
    penalty_factor: Option<f64>,
    success_threshold: Option<f64>,
    notion_of_success: Option<NotionOfSuccess>,
    initial_sigma: Option<f64>,
    min_step_size: Option<f64>,
    covariance_adaptation: Option<bool>,
    seed: Option<u64>,
}

impl MocmaBuilder<HypervolumeIndicator> {
    /// Create a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            indicator: HypervolumeIndicator::default(),
            mu: None,
            penalty_factor: None,
            success_threshold: None,
            notion_of_success: None,
            initial_sigma: None,
            min_step_size: None,
            covariance_adaptation: None,
            seed: None,
        }
    }
}

impl Default for MocmaBuilder<HypervolumeIndicator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Indicator> MocmaBuilder<I> {
    /// Select with a different indicator.
    #[must_use]
    pub fn indicator<J: Indicator>(self, indicator: J) -> MocmaBuilder<J> {
        MocmaBuilder {
            indicator,
            mu: self.mu,
            penalty_factor: self.penalty_factor,
            success_threshold: self.success_threshold,
            notion_of_success: self.notion_of_success,
            initial_sigma: self.initial_sigma,
            min_step_size: self.min_step_size,
            covariance_adaptation: self.covariance_adaptation,
            seed: self.seed,
        }
    }

    /// Take every option from `config`.
    #[must_use]
    pub fn config(mut self, config: MocmaConfig) -> Self {
        self.mu = Some(config.mu);
        self.penalty_factor = Some(config.penalty_factor);
        self.success_threshold = Some(config.success_threshold);
        self.notion_of_success = Some(config.notion_of_success);
        self.initial_sigma = Some(config.initial_sigma);
        self.min_step_size = Some(config.min_step_size);
        self.covariance_adaptation = Some(config.covariance_adaptation);
        self.seed = config.seed;
        self
    }

    /// Number of parents.
    #[must_use]
    pub fn mu(mut self, mu: usize) -> Self {
        self.mu = Some(mu);
        self
    }

    /// Penalty weight for infeasible candidates.
    #[must_use]
    pub fn penalty_factor(mut self, penalty_factor: f64) -> Self {
        self.penalty_factor = Some(penalty_factor);
        self
    }

    /// Target success probability.
    #[must_use]
    pub fn success_threshold(mut self, threshold: f64) -> Self {
        self.success_threshold = Some(threshold);
        self
    }

    /// How offspring success is judged.
    #[must_use]
    pub fn notion_of_success(mut self, notion: NotionOfSuccess) -> Self {
        self.notion_of_success = Some(notion);
        self
    }

    /// Initial step size.
    #[must_use]
    pub fn initial_sigma(mut self, sigma: f64) -> Self {
        self.initial_sigma = Some(sigma);
        self
    }

    /// Floor for adapted step sizes.
    #[must_use]
    pub fn min_step_size(mut self, min_step_size: f64) -> Self {
        self.min_step_size = Some(min_step_size);
        self
    }

    /// Enable or disable covariance adaptation.
    #[must_use]
    pub fn covariance_adaptation(mut self, enabled: bool) -> Self {
        self.covariance_adaptation = Some(enabled);
        self
    }

    /// Seed the master random generator.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the optimizer.
    ///
    /// # Errors
    ///
    /// Returns the error of [`MocmaConfig::validate`].
    pub fn build(self) -> Result<Mocma<I>> {
        let defaults = MocmaConfig::default();
        let config = MocmaConfig {
            mu: self.mu.unwrap_or(defaults.mu),
            penalty_factor: self.penalty_factor.unwrap_or(defaults.penalty_factor),
            success_threshold: self.success_threshold.unwrap_or(defaults.success_threshold),
            notion_of_success: self.notion_of_success.unwrap_or(defaults.notion_of_success),
            initial_sigma: self.initial_sigma.unwrap_or(defaults.initial_sigma),
            min_step_size: self.min_step_size.unwrap_or(defaults.min_step_size),
            covariance_adaptation: self
                .covariance_adaptation
                .unwrap_or(defaults.covariance_adaptation),
            seed: self.seed,
        };
        Mocma::new(config, self.indicator)
    }
}
