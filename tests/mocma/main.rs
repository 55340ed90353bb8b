#![allow(clippy::cast_precision_loss)]

#[path = "../../benches/test_functions.rs"]
#[allow(dead_code)]
mod test_functions;

mod configuration;
mod convergence;
mod determinism;
mod errors;
mod variants;

use mocma::indicator::{HypervolumeIndicator, Indicator};
use mocma::{Mocma, Solution};

/// Exact hypervolume of the reported front against a fixed reference.
pub(crate) fn front_hypervolume(solutions: &[Solution], reference: &[f64]) -> f64 {
    let values: Vec<Vec<f64>> = solutions.iter().map(|s| s.value.clone()).collect();
    HypervolumeIndicator::with_reference(reference.to_vec())
        .value(&values)
        .unwrap()
}

/// Hypervolume of the parents' penalized fitness, i.e. what selection sees.
pub(crate) fn selection_hypervolume<I: Indicator>(mocma: &Mocma<I>, reference: &[f64]) -> f64 {
    let values: Vec<Vec<f64>> = mocma
        .population()
        .iter()
        .map(|ind| ind.penalized_fitness().to_vec())
        .collect();
    mocma::pareto::hypervolume(&values, reference)
}
