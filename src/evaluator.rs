//! Constraint handling by penalization.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::objective::MultiObjectiveFunction;

/// Fitness of a single evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Fitness plus `penalty_factor * ‖x − feasible(x)‖²` in every objective.
    pub penalized: Vec<f64>,
    /// Fitness at the closest feasible point.
    pub unpenalized: Vec<f64>,
}

/// Evaluates candidates, repairing infeasible ones and penalizing the repair.
///
/// An infeasible point `x` is evaluated at `f.closest_feasible(x)`; the
/// squared distance to that point, scaled by the penalty factor, is added to
/// every objective of the penalized fitness. Feasible points get identical
/// penalized and unpenalized fitness.
#[derive(Debug)]
pub struct PenalizingEvaluator {
    penalty_factor: f64,
    evaluations: AtomicU64,
}

impl PenalizingEvaluator {
    /// Create an evaluator. The factor is validated by the optimizer config.
    #[must_use]
    pub fn new(penalty_factor: f64) -> Self {
        Self {
            penalty_factor,
            evaluations: AtomicU64::new(0),
        }
    }

    /// The penalty factor.
    #[must_use]
    pub fn penalty_factor(&self) -> f64 {
        self.penalty_factor
    }

    /// Number of objective evaluations performed so far.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub(crate) fn set_evaluations(&self, count: u64) {
        self.evaluations.store(count, Ordering::Relaxed);
    }

    /// Evaluate `point`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Objective`] wrapping the objective's own error, and
    /// [`Error::ObjectiveDimensionMismatch`] if it returns the wrong number of
    /// values.
    pub fn evaluate<F>(&self, f: &F, point: &[f64]) -> Result<Evaluation>
    where
        F: MultiObjectiveFunction + ?Sized,
    {
        self.evaluations.fetch_add(1, Ordering::Relaxed);

        let (unpenalized, penalty) = if f.is_feasible(point) {
            (f.evaluate(point).map_err(Error::objective)?, 0.0)
        } else {
            let feasible = f.closest_feasible(point);
            let distance: f64 = point
                .iter()
                .zip(&feasible)
                .map(|(x, y)| (x - y) * (x - y))
                .sum();
            (
                f.evaluate(&feasible).map_err(Error::objective)?,
                self.penalty_factor * distance,
            )
        };

        let expected = f.number_of_objectives();
        if unpenalized.len() != expected {
            return Err(Error::ObjectiveDimensionMismatch {
                expected,
                got: unpenalized.len(),
            });
        }

        let penalized = unpenalized.iter().map(|v| v + penalty).collect();
        Ok(Evaluation {
            penalized,
            unpenalized,
        })
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::objective::BoxConstraints;

    struct Boxed {
        bounds: BoxConstraints,
    }

    impl MultiObjectiveFunction for Boxed {
        type Error = Infallible;

        fn number_of_variables(&self) -> usize {
            2
        }

        fn number_of_objectives(&self) -> usize {
            2
        }

        fn propose_starting_point(&self, rng: &mut fastrand::Rng) -> Vec<f64> {
            self.bounds.propose_starting_point(rng)
        }

        fn evaluate(&self, x: &[f64]) -> core::result::Result<Vec<f64>, Infallible> {
            Ok(vec![x[0] + x[1], x[0] - x[1]])
        }

        fn is_feasible(&self, x: &[f64]) -> bool {
            self.bounds.is_feasible(x)
        }

        fn closest_feasible(&self, x: &[f64]) -> Vec<f64> {
            self.bounds.closest_feasible(x)
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("bad point")]
    struct BadPoint;

    struct Failing;

    impl MultiObjectiveFunction for Failing {
        type Error = BadPoint;

        fn number_of_variables(&self) -> usize {
            1
        }

        fn number_of_objectives(&self) -> usize {
            2
        }

        fn propose_starting_point(&self, _rng: &mut fastrand::Rng) -> Vec<f64> {
            vec![0.0]
        }

        fn evaluate(&self, _x: &[f64]) -> core::result::Result<Vec<f64>, BadPoint> {
            Err(BadPoint)
        }
    }

    fn boxed() -> Boxed {
        Boxed {
            bounds: BoxConstraints::uniform(2, 0.0, 1.0).unwrap(),
        }
    }

    #[test]
    fn feasible_points_are_not_penalized() {
        let evaluator = PenalizingEvaluator::new(10.0);
        let e = evaluator.evaluate(&boxed(), &[0.5, 0.25]).unwrap();
        assert_eq!(e.penalized, e.unpenalized);
        assert_eq!(e.unpenalized, vec![0.75, 0.25]);
    }

    #[test]
    fn infeasible_points_are_repaired_and_penalized() {
        let evaluator = PenalizingEvaluator::new(2.0);
        let e = evaluator.evaluate(&boxed(), &[2.0, -1.0]).unwrap();
        // Repaired to (1, 0), squared distance 1 + 1
        assert_eq!(e.unpenalized, vec![1.0, 1.0]);
        assert_eq!(e.penalized, vec![5.0, 5.0]);
    }

    #[test]
    fn zero_penalty_gives_identical_fitness() {
        let evaluator = PenalizingEvaluator::new(0.0);
        let e = evaluator.evaluate(&boxed(), &[3.0, 3.0]).unwrap();
        assert_eq!(e.penalized, e.unpenalized);
    }

    #[test]
    fn counts_evaluations() {
        let evaluator = PenalizingEvaluator::new(1e-6);
        let f = boxed();
        for _ in 0..7 {
            evaluator.evaluate(&f, &[0.1, 0.2]).unwrap();
        }
        assert_eq!(evaluator.evaluations(), 7);
    }

    #[test]
    fn objective_errors_keep_their_source() {
        let evaluator = PenalizingEvaluator::new(1e-6);
        let err = evaluator.evaluate(&Failing, &[0.0]).unwrap_err();
        match err {
            Error::Objective(source) => assert!(source.downcast_ref::<BadPoint>().is_some()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
