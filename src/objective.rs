//! The [`MultiObjectiveFunction`] trait defines what gets optimized.
//!
//! The optimizer never assumes differentiability: it only proposes starting
//! points, evaluates candidates, and (for constrained problems) asks whether a
//! candidate is feasible and what its closest feasible neighbour is.
//!
//! Box-constrained problems can delegate the constraint handling to
//! [`BoxConstraints`]:
//!
//! ```
//! use core::convert::Infallible;
//!
//! use mocma::objective::{BoxConstraints, MultiObjectiveFunction};
//!
//! struct Schaffer {
//!     bounds: BoxConstraints,
//! }
//!
//! impl MultiObjectiveFunction for Schaffer {
//!     type Error = Infallible;
//!
//!     fn number_of_variables(&self) -> usize {
//!         1
//!     }
//!
//!     fn number_of_objectives(&self) -> usize {
//!         2
//!     }
//!
//!     fn propose_starting_point(&self, rng: &mut fastrand::Rng) -> Vec<f64> {
//!         self.bounds.propose_starting_point(rng)
//!     }
//!
//!     fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>, Infallible> {
//!         Ok(vec![x[0] * x[0], (x[0] - 2.0).powi(2)])
//!     }
//!
//!     fn is_feasible(&self, x: &[f64]) -> bool {
//!         self.bounds.is_feasible(x)
//!     }
//!
//!     fn closest_feasible(&self, x: &[f64]) -> Vec<f64> {
//!         self.bounds.closest_feasible(x)
//!     }
//! }
//!
//! let f = Schaffer {
//!     bounds: BoxConstraints::uniform(1, -10.0, 10.0).unwrap(),
//! };
//! assert!(!f.is_feasible(&[11.0]));
//! assert_eq!(f.closest_feasible(&[11.0]), vec![10.0]);
//! ```

use crate::error::{Error, Result};
use crate::rng_util;

/// A vector-valued objective function to be minimized in every component.
///
/// # Thread safety
///
/// The trait requires `Send + Sync` so that offspring can be evaluated on
/// worker threads when the `parallel` feature is enabled.
pub trait MultiObjectiveFunction: Send + Sync {
    /// The error type returned by [`evaluate`](Self::evaluate). Use
    /// [`Infallible`](core::convert::Infallible) for functions that cannot fail.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Dimension of the decision space.
    fn number_of_variables(&self) -> usize;

    /// Number of objective values returned by [`evaluate`](Self::evaluate).
    fn number_of_objectives(&self) -> usize;

    /// Propose a starting point for one individual of the initial population.
    fn propose_starting_point(&self, rng: &mut fastrand::Rng) -> Vec<f64>;

    /// Evaluate the objective vector at `point`.
    ///
    /// # Errors
    ///
    /// Any error of type [`Self::Error`](Self::Error). It is handed back to
    /// the caller of [`Mocma::step`](crate::Mocma::step) unmodified.
    fn evaluate(&self, point: &[f64]) -> core::result::Result<Vec<f64>, Self::Error>;

    /// Whether `point` satisfies the constraints. Default: always feasible.
    fn is_feasible(&self, _point: &[f64]) -> bool {
        true
    }

    /// The feasible point closest to `point`. Default: `point` itself.
    fn closest_feasible(&self, point: &[f64]) -> Vec<f64> {
        point.to_vec()
    }
}

/// Axis-aligned box constraints `lower[i] <= x[i] <= upper[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxConstraints {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl BoxConstraints {
    /// Create box constraints from per-variable bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the bound vectors differ in
    /// length and [`Error::InvalidBounds`] if any lower bound exceeds its
    /// upper bound.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(Error::DimensionMismatch {
                expected: lower.len(),
                got: upper.len(),
            });
        }
        for (&low, &high) in lower.iter().zip(&upper) {
            if low.is_nan() || high.is_nan() || low > high {
                return Err(Error::InvalidBounds { low, high });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Create `n` identical bounds `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `low > high`.
    pub fn uniform(n: usize, low: f64, high: f64) -> Result<Self> {
        Self::new(vec![low; n], vec![high; n])
    }

    /// Number of constrained variables.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Whether every component of `point` lies inside its bounds.
    #[must_use]
    pub fn is_feasible(&self, point: &[f64]) -> bool {
        point
            .iter()
            .zip(self.lower.iter().zip(&self.upper))
            .all(|(&x, (&lo, &hi))| (lo..=hi).contains(&x))
    }

    /// Clamp `point` into the box.
    #[must_use]
    pub fn closest_feasible(&self, point: &[f64]) -> Vec<f64> {
        point
            .iter()
            .zip(self.lower.iter().zip(&self.upper))
            .map(|(&x, (&lo, &hi))| x.clamp(lo, hi))
            .collect()
    }

    /// Draw a point uniformly from the box.
    #[must_use]
    pub fn propose_starting_point(&self, rng: &mut fastrand::Rng) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| rng_util::f64_range(rng, lo, hi))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        let err = BoxConstraints::new(vec![0.0, 2.0], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidBounds { low, high } if low == 2.0 && high == 1.0));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = BoxConstraints::new(vec![0.0], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 1,
                got: 2
            }
        ));
    }

    #[test]
    fn closest_feasible_clamps_each_component() {
        let bounds = BoxConstraints::new(vec![0.0, -5.0], vec![1.0, 5.0]).unwrap();
        assert!(bounds.is_feasible(&[0.5, 5.0]));
        assert!(!bounds.is_feasible(&[1.5, 0.0]));
        assert_eq!(bounds.closest_feasible(&[1.5, -7.0]), vec![1.0, -5.0]);
    }

    #[test]
    fn starting_points_are_feasible() {
        let bounds = BoxConstraints::uniform(4, -1.0, 2.0).unwrap();
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..100 {
            let p = bounds.propose_starting_point(&mut rng);
            assert_eq!(p.len(), 4);
            assert!(bounds.is_feasible(&p));
        }
    }
}
