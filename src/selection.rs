//! Environmental selection: non-dominated sorting plus indicator pruning.

use crate::error::{Error, Result};
use crate::indicator::Indicator;
use crate::individual::Individual;
use crate::pareto;

/// Keeps the best `mu` individuals of a population.
///
/// Individuals are sorted into non-domination fronts on their penalized
/// fitness. Whole fronts are accepted while they fit; the first front that
/// does not fit (the critical front) is thinned by repeatedly removing the
/// indicator's least contributor. Fronts and candidates are kept in
/// population order, so ties go to the lower index.
#[derive(Clone, Debug, Default)]
pub struct IndicatorBasedSelection<I> {
    indicator: I,
}

impl<I: Indicator> IndicatorBasedSelection<I> {
    /// Select with `indicator`.
    #[must_use]
    pub fn new(indicator: I) -> Self {
        Self { indicator }
    }

    /// The pruning indicator.
    #[must_use]
    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Set `rank` on every individual and `selected` on exactly `mu` of them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMu`] if `mu` is zero or larger than the
    /// population, and any error of the indicator while pruning.
    pub fn select(&self, population: &mut [Individual], mu: usize) -> Result<()> {
        if mu == 0 || mu > population.len() {
            return Err(Error::InvalidMu {
                mu,
                population: population.len(),
            });
        }

        let fitness: Vec<Vec<f64>> = population
            .iter()
            .map(|ind| ind.penalized_fitness().to_vec())
            .collect();
        let fronts = pareto::non_dominated_sort(&fitness);

        // Nothing is written until pruning has succeeded.
        let mut ranks = vec![0; population.len()];
        let mut keep = vec![false; population.len()];
        let mut remaining = mu;
        for (rank, front) in fronts.iter().enumerate() {
            for &i in front {
                ranks[i] = rank;
            }
            if remaining == 0 {
                continue;
            }
            if front.len() <= remaining {
                for &i in front {
                    keep[i] = true;
                }
                remaining -= front.len();
            } else {
                for i in self.prune(&fitness, front, remaining)? {
                    keep[i] = true;
                }
                remaining = 0;
            }
        }

        for ((individual, rank), selected) in population.iter_mut().zip(ranks).zip(keep) {
            individual.set_rank(rank);
            individual.set_selected(selected);
        }
        Ok(())
    }

    /// Drop least contributors from `front` until `keep` remain.
    fn prune(&self, fitness: &[Vec<f64>], front: &[usize], keep: usize) -> Result<Vec<usize>> {
        trace_debug!(
            indicator = self.indicator.name(),
            front_size = front.len(),
            keep,
            "pruning critical front"
        );

        let mut candidates = front.to_vec();
        let mut points: Vec<Vec<f64>> = front.iter().map(|&i| fitness[i].clone()).collect();
        while candidates.len() > keep {
            let worst = self.indicator.least_contributor(&points)?;
            candidates.remove(worst);
            points.remove(worst);
        }
        Ok(candidates)
    }
}
