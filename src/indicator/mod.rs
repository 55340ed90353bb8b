//! Quality indicators used to prune the critical front.
//!
//! An [`Indicator`] scores a set of fitness vectors and, more importantly for
//! selection, names the member whose removal hurts the score least. Three
//! implementations are provided:
//!
//! | Indicator | Least contributor | Cost |
//! |---|---|---|
//! | [`HypervolumeIndicator`] | Exact smallest exclusive hypervolume | Exact HV per point; O(n log n) in 2-D |
//! | [`AdditiveEpsilonIndicator`] | Smallest additive-epsilon loss | O(n² m) |
//! | [`LeastContributorApproximator`] | Smallest hypervolume contribution **with high probability** | Monte-Carlo, independent of the number of objectives |
//!
//! All indicators minimize: smaller objective values are better.
//!
//! # Ties
//!
//! When several members share the smallest contribution the lowest index is
//! returned. On a front of identical points every index is an equally valid
//! answer; callers must not rely on which one is reported beyond that rule.

mod approximate;
mod epsilon;
mod hypervolume;

pub use approximate::{LeastContributorApproximator, LeastContributorApproximatorBuilder};
pub use epsilon::AdditiveEpsilonIndicator;
pub use hypervolume::HypervolumeIndicator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A quality indicator over a set of fitness vectors.
pub trait Indicator: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Name of the MO-CMA-ES variant that selects with this indicator.
    fn optimizer_name(&self) -> &'static str {
        "MOCMA"
    }

    /// Indicator value of `front`.
    ///
    /// # Errors
    ///
    /// Returns an error if `front` violates the indicator's preconditions,
    /// e.g. a vector that does not dominate a fixed hypervolume reference point.
    fn value(&self, front: &[Vec<f64>]) -> Result<f64>;

    /// Index of the member of `front` whose removal changes the indicator least.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrontTooSmall`] for fronts with fewer than two members,
    /// and the same precondition errors as [`value`](Self::value).
    fn least_contributor(&self, front: &[Vec<f64>]) -> Result<usize>;

    /// Check that `points` satisfy the indicator's preconditions without
    /// computing anything. Default: no preconditions.
    ///
    /// # Errors
    ///
    /// The errors [`value`](Self::value) would return for `points`.
    fn validate(&self, _points: &[Vec<f64>]) -> Result<()> {
        Ok(())
    }

    /// State of the indicator's random generator. `None` for deterministic
    /// indicators.
    fn rng_state(&self) -> Option<u64> {
        None
    }

    /// Resume the random generator from a state returned by
    /// [`rng_state`](Self::rng_state). Deterministic indicators ignore it.
    fn set_rng_state(&self, _state: u64) {}
}

/// Where the hypervolume reference point comes from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferencePoint {
    /// A fixed point that every fitness vector must dominate.
    Fixed(Vec<f64>),
    /// The per-objective worst value of the evaluated front plus `offset`,
    /// recomputed on every call.
    Nadir {
        /// Distance added to the nadir in every objective.
        offset: f64,
    },
}

impl Default for ReferencePoint {
    fn default() -> Self {
        Self::Nadir { offset: 1.0 }
    }
}

impl ReferencePoint {
    /// Check the configuration itself.
    pub(crate) fn check(&self) -> Result<()> {
        match self {
            Self::Fixed(r) if r.is_empty() || r.iter().any(|v| v.is_nan()) => {
                Err(Error::InvalidReferencePoint(r.clone()))
            }
            Self::Nadir { offset } if !(offset.is_finite() && *offset > 0.0) => {
                Err(Error::InvalidReferenceOffset(*offset))
            }
            _ => Ok(()),
        }
    }

    /// Concrete reference point for `front`.
    ///
    /// A fixed reference must be strictly dominated by every member, i.e.
    /// better in every objective; a point on the reference boundary would
    /// contribute no volume and is reported instead.
    pub(crate) fn resolve(&self, front: &[Vec<f64>]) -> Result<Vec<f64>> {
        match self {
            Self::Fixed(reference) => {
                for point in front {
                    if point.len() != reference.len() {
                        return Err(Error::ReferenceDimensionMismatch {
                            expected: reference.len(),
                            got: point.len(),
                        });
                    }
                    if !point.iter().zip(reference).all(|(p, r)| p < r) {
                        return Err(Error::ReferencePointNotDominated {
                            point: point.clone(),
                            reference: reference.clone(),
                        });
                    }
                }
                Ok(reference.clone())
            }
            Self::Nadir { offset } => {
                let m = check_dimensions(front)?;
                let mut nadir = vec![f64::NEG_INFINITY; m];
                for point in front {
                    for (n, &v) in nadir.iter_mut().zip(point) {
                        *n = n.max(v);
                    }
                }
                Ok(nadir.into_iter().map(|v| v + offset).collect())
            }
        }
    }
}

/// Common objective count of `front`.
pub(crate) fn check_dimensions(front: &[Vec<f64>]) -> Result<usize> {
    let m = front.first().map_or(0, Vec::len);
    if let Some(bad) = front.iter().find(|p| p.len() != m) {
        return Err(Error::ReferenceDimensionMismatch {
            expected: m,
            got: bad.len(),
        });
    }
    Ok(m)
}

/// Reject fronts that cannot be pruned.
pub(crate) fn check_prunable(front: &[Vec<f64>]) -> Result<()> {
    if front.len() < 2 {
        return Err(Error::FrontTooSmall(front.len()));
    }
    Ok(())
}

/// Index of the smallest value; the first one wins ties.
pub(crate) fn argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < values[best] {
            best = i;
        }
    }
    best
}
