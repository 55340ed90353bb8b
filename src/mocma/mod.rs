//! The MO-CMA-ES optimizer.
//!
//! [`Mocma`] keeps a population of `2 * mu` individuals: parents in
//! `[0, mu)`, offspring in `[mu, 2 * mu)`. Every [`step`](Mocma::step)
//!
//! 1. copies each parent into its offspring slot, mutates and evaluates it,
//! 2. ranks all `2 * mu` individuals and selects `mu` of them,
//! 3. credits successful offspring and their parents,
//! 4. moves the survivors to the front (keeping their relative order),
//! 5. adapts the survivors' step sizes and reports them.

mod builder;
mod config;
#[cfg(feature = "serde")]
mod persistence;

pub use builder::MocmaBuilder;
pub use config::MocmaConfig;
#[cfg(feature = "serde")]
pub use persistence::MocmaSnapshot;

use crate::error::{Error, Result};
use crate::evaluator::PenalizingEvaluator;
use crate::indicator::{
    AdditiveEpsilonIndicator, HypervolumeIndicator, Indicator, LeastContributorApproximator,
};
use crate::individual::Individual;
use crate::objective::MultiObjectiveFunction;
use crate::rng_util;
use crate::selection::IndicatorBasedSelection;
use crate::types::{NotionOfSuccess, Solution};

/// MO-CMA-ES with indicator-based selection.
///
/// The indicator decides which member of the critical front is dropped:
/// exact hypervolume by default, see [`EpsilonMocma`] and
/// [`ApproximatedVolumeMocma`] for the other variants.
///
/// # Examples
///
/// ```
/// use core::convert::Infallible;
///
/// use mocma::objective::MultiObjectiveFunction;
/// use mocma::Mocma;
///
/// struct SpherePair;
///
/// impl MultiObjectiveFunction for SpherePair {
///     type Error = Infallible;
///
///     fn number_of_variables(&self) -> usize {
///         3
///     }
///
///     fn number_of_objectives(&self) -> usize {
///         2
///     }
///
///     fn propose_starting_point(&self, rng: &mut fastrand::Rng) -> Vec<f64> {
///         (0..3).map(|_| rng.f64()).collect()
///     }
///
///     fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>, Infallible> {
///         let rest: f64 = x[1..].iter().map(|v| v * v).sum();
///         Ok(vec![x[0] * x[0] + rest, (x[0] - 1.0).powi(2) + rest])
///     }
/// }
///
/// let mut optimizer = Mocma::builder().mu(10).initial_sigma(0.3).seed(42).build().unwrap();
/// optimizer.init(&SpherePair, None).unwrap();
///
/// for _ in 0..20 {
///     let front = optimizer.step(&SpherePair).unwrap();
///     assert_eq!(front.len(), 10);
/// }
/// assert_eq!(optimizer.generation(), 20);
/// assert_eq!(optimizer.evaluations(), 20 + 20 * 10);
/// ```
#[derive(Debug)]
pub struct Mocma<I = HypervolumeIndicator> {
    config: MocmaConfig,
    selection: IndicatorBasedSelection<I>,
    evaluator: PenalizingEvaluator,
    population: Vec<Individual>,
    rng: fastrand::Rng,
    generation: u64,
}

/// MO-CMA-ES pruning with the additive epsilon indicator.
pub type EpsilonMocma = Mocma<AdditiveEpsilonIndicator>;

/// MO-CMA-ES pruning with the Monte-Carlo least-contributor approximation.
pub type ApproximatedVolumeMocma = Mocma<LeastContributorApproximator>;

impl Mocma<HypervolumeIndicator> {
    /// Creates a builder for a hypervolume-based optimizer.
    ///
    /// Call [`MocmaBuilder::indicator`] to switch indicators.
    #[must_use]
    pub fn builder() -> MocmaBuilder<HypervolumeIndicator> {
        MocmaBuilder::new()
    }
}

impl<I: Indicator + Default> Default for Mocma<I> {
    fn default() -> Self {
        let config = MocmaConfig::default();
        Self::from_parts(config, I::default())
    }
}

impl<I: Indicator> Mocma<I> {
    /// Create an optimizer from a configuration and an indicator.
    ///
    /// # Errors
    ///
    /// Returns the error of [`MocmaConfig::validate`].
    pub fn new(config: MocmaConfig, indicator: I) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, indicator))
    }

    fn from_parts(config: MocmaConfig, indicator: I) -> Self {
        Self {
            evaluator: PenalizingEvaluator::new(config.penalty_factor),
            rng: rng_util::make_rng(config.seed),
            selection: IndicatorBasedSelection::new(indicator),
            population: Vec::new(),
            generation: 0,
            config,
        }
    }

    /// Create and evaluate the initial population, discarding any previous run.
    ///
    /// With `starting_point` every individual starts there; otherwise each
    /// asks `f` for a starting point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] for starting points of the wrong
    /// length, objective evaluation errors, and the indicator's precondition
    /// errors for the initial fitness vectors (e.g. a fixed reference point
    /// that is not dominated).
    pub fn init<F>(&mut self, f: &F, starting_point: Option<&[f64]>) -> Result<()>
    where
        F: MultiObjectiveFunction + ?Sized,
    {
        let n = f.number_of_variables();
        let m = f.number_of_objectives();
        let size = 2 * self.config.mu;

        self.population.clear();
        self.generation = 0;
        self.evaluator.set_evaluations(0);
        self.rng = rng_util::make_rng(self.config.seed);

        let mut population = Vec::with_capacity(size);
        for _ in 0..size {
            let point = match starting_point {
                Some(point) => point.to_vec(),
                None => f.propose_starting_point(&mut self.rng),
            };
            if point.len() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    got: point.len(),
                });
            }

            let mut individual = Individual::new(
                n,
                m,
                self.config.initial_sigma,
                self.config.success_threshold,
            );
            individual.set_search_point(point);
            let evaluation = self.evaluator.evaluate(f, individual.search_point())?;
            individual.set_fitness(evaluation.penalized, evaluation.unpenalized);
            population.push(individual);
        }

        let fitness: Vec<Vec<f64>> = population
            .iter()
            .map(|ind| ind.penalized_fitness().to_vec())
            .collect();
        self.selection.indicator().validate(&fitness)?;
        self.population = population;

        trace_info!(
            mu = self.config.mu,
            variables = n,
            objectives = m,
            indicator = self.selection.indicator().name(),
            "optimizer initialized"
        );
        Ok(())
    }

    /// Run one generation and return the new Pareto-front approximation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before [`init`](Self::init), the
    /// objective's error unmodified (as [`Error::Objective`]) if an
    /// evaluation fails, and indicator errors from selection. A failed step
    /// leaves the parents untouched.
    pub fn step<F>(&mut self, f: &F) -> Result<Vec<Solution>>
    where
        F: MultiObjectiveFunction + ?Sized,
    {
        if self.population.is_empty() {
            return Err(Error::NotInitialized);
        }
        let mu = self.config.mu;

        let seeds = rng_util::derive_seeds(&mut self.rng, mu);
        let bred = self.breed(f, &seeds);
        if bred.is_err() {
            trace_debug!(generation = self.generation, "offspring evaluation failed");
        }
        bred?;

        self.selection.select(&mut self.population, mu)?;
        self.credit_successes();

        let (mut next, rejected): (Vec<Individual>, Vec<Individual>) =
            core::mem::take(&mut self.population)
                .into_iter()
                .partition(Individual::selected);
        next.extend(rejected);
        self.population = next;

        let params = self.config.adaptation();
        let mut solutions = Vec::with_capacity(mu);
        for individual in &mut self.population[..mu] {
            individual.grow_older();
            individual.update(&params);
            solutions.push(Solution {
                point: individual.search_point().to_vec(),
                value: individual.unpenalized_fitness().to_vec(),
            });
        }
        self.generation += 1;

        trace_info!(
            generation = self.generation,
            front_size = self.population[..mu]
                .iter()
                .filter(|ind| ind.rank() == 0)
                .count(),
            evaluations = self.evaluator.evaluations(),
            "generation completed"
        );
        Ok(solutions)
    }

    /// Fill every offspring slot from its parent, one seed per slot.
    fn breed<F>(&mut self, f: &F, seeds: &[u64]) -> Result<()>
    where
        F: MultiObjectiveFunction + ?Sized,
    {
        let (parents, offspring) = self.population.split_at_mut(self.config.mu);
        let evaluator = &self.evaluator;

        #[cfg(feature = "parallel")]
        let bred = {
            use rayon::prelude::*;

            parents
                .par_iter()
                .zip(offspring.par_iter_mut())
                .zip(seeds.par_iter())
                .try_for_each(|((parent, child), &seed)| {
                    breed_one(evaluator, f, parent, child, seed)
                })
        };

        #[cfg(not(feature = "parallel"))]
        let bred = parents
            .iter()
            .zip(offspring.iter_mut())
            .zip(seeds)
            .try_for_each(|((parent, child), &seed)| breed_one(evaluator, f, parent, child, seed));

        bred
    }

    /// Credit each successful offspring and its parent.
    fn credit_successes(&mut self) {
        let notion = self.config.notion_of_success;
        let (parents, offspring) = self.population.split_at_mut(self.config.mu);
        for (parent, child) in parents.iter_mut().zip(offspring.iter_mut()) {
            let successful = match notion {
                NotionOfSuccess::IndividualBased => {
                    child.selected() && child.rank() <= parent.rank()
                }
                NotionOfSuccess::PopulationBased => child.selected(),
            };
            if successful {
                child.record_success();
                parent.record_success();
            }
        }
    }

    /// Number of parents.
    #[must_use]
    pub fn mu(&self) -> usize {
        self.config.mu
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &MocmaConfig {
        &self.config
    }

    /// The pruning indicator.
    #[must_use]
    pub fn indicator(&self) -> &I {
        self.selection.indicator()
    }

    /// The current parents, empty before [`init`](Self::init).
    #[must_use]
    pub fn population(&self) -> &[Individual] {
        let mu = self.config.mu.min(self.population.len());
        &self.population[..mu]
    }

    /// Completed generations since [`init`](Self::init).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Objective evaluations since [`init`](Self::init).
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluator.evaluations()
    }

    /// Whether [`init`](Self::init) has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.population.is_empty()
    }

    /// The parents as `(point, unpenalized fitness)` pairs.
    #[must_use]
    pub fn solutions(&self) -> Vec<Solution> {
        self.population()
            .iter()
            .map(|ind| Solution {
                point: ind.search_point().to_vec(),
                value: ind.unpenalized_fitness().to_vec(),
            })
            .collect()
    }

    /// Name of the algorithm variant, e.g. `"MOCMA"` or `"EpsilonMOCMA"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.selection.indicator().optimizer_name()
    }
}

fn breed_one<F>(
    evaluator: &PenalizingEvaluator,
    f: &F,
    parent: &Individual,
    child: &mut Individual,
    seed: u64,
) -> Result<()>
where
    F: MultiObjectiveFunction + ?Sized,
{
    child.clone_from(parent);
    child.mutate(&mut fastrand::Rng::with_seed(seed));
    child.reset_age();
    let evaluation = evaluator.evaluate(f, child.search_point())?;
    child.set_fitness(evaluation.penalized, evaluation.unpenalized);
    Ok(())
}
