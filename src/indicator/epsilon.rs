use super::{Indicator, argmin, check_dimensions, check_prunable};
use crate::error::{Error, Result};

/// Additive epsilon indicator.
///
/// The value of a front is the smallest `ε` such that every reference vector
/// is weakly dominated by some member shifted by `-ε`. Lower is better.
///
/// The loss of removing member `i` is how far its nearest neighbour has to be
/// shifted to cover it again:
///
/// ```text
/// loss(i) = max(0, min_{k != i} max_m (f_k[m] - f_i[m]))
/// ```
///
/// The least contributor is the member with the smallest loss. Duplicates and
/// dominated members have loss zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdditiveEpsilonIndicator {
    reference_set: Option<Vec<Vec<f64>>>,
}

impl AdditiveEpsilonIndicator {
    /// Measure every front against its own ideal point.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure fronts against a fixed reference set, e.g. a sampled true
    /// Pareto front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReferencePoint`] if the set is empty, holds an
    /// empty vector or NaN, and [`Error::ReferenceDimensionMismatch`] if its
    /// vectors differ in length.
    pub fn with_reference_set(reference_set: Vec<Vec<f64>>) -> Result<Self> {
        if reference_set.is_empty() {
            return Err(Error::InvalidReferencePoint(Vec::new()));
        }
        check_dimensions(&reference_set)?;
        if let Some(bad) = reference_set
            .iter()
            .find(|r| r.is_empty() || r.iter().any(|v| v.is_nan()))
        {
            return Err(Error::InvalidReferencePoint(bad.clone()));
        }
        Ok(Self {
            reference_set: Some(reference_set),
        })
    }

    /// The fixed reference set, if any.
    #[must_use]
    pub fn reference_set(&self) -> Option<&[Vec<f64>]> {
        self.reference_set.as_deref()
    }

    /// Loss of removing each member of `front`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReferenceDimensionMismatch`] if the vectors differ in length.
    pub fn losses(&self, front: &[Vec<f64>]) -> Result<Vec<f64>> {
        check_dimensions(front)?;
        Ok((0..front.len())
            .map(|i| {
                front
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != i)
                    .map(|(_, other)| shift(other, &front[i]))
                    .fold(f64::INFINITY, f64::min)
                    .max(0.0)
            })
            .collect())
    }
}

/// Smallest `e` with `a - e` weakly dominating `b`.
fn shift(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| x - y)
        .fold(f64::NEG_INFINITY, f64::max)
}

impl Indicator for AdditiveEpsilonIndicator {
    fn name(&self) -> &'static str {
        "additive-epsilon"
    }

    fn optimizer_name(&self) -> &'static str {
        "EpsilonMOCMA"
    }

    fn value(&self, front: &[Vec<f64>]) -> Result<f64> {
        let m = check_dimensions(front)?;
        if front.is_empty() {
            return Ok(if self.reference_set.is_some() {
                f64::INFINITY
            } else {
                0.0
            });
        }

        let ideal;
        let references: &[Vec<f64>] = if let Some(set) = &self.reference_set {
            if let Some(r) = set.first()
                && r.len() != m
            {
                return Err(Error::ReferenceDimensionMismatch {
                    expected: r.len(),
                    got: m,
                });
            }
            set
        } else {
            let mut point = vec![f64::INFINITY; m];
            for f in front {
                for (p, &v) in point.iter_mut().zip(f) {
                    *p = p.min(v);
                }
            }
            ideal = [point];
            &ideal
        };

        Ok(references
            .iter()
            .map(|r| {
                front
                    .iter()
                    .map(|f| shift(f, r))
                    .fold(f64::INFINITY, f64::min)
            })
            .fold(f64::NEG_INFINITY, f64::max))
    }

    fn least_contributor(&self, front: &[Vec<f64>]) -> Result<usize> {
        check_prunable(front)?;
        let losses = self.losses(front)?;
        Ok(argmin(&losses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_is_distance_to_nearest_cover() {
        let indicator = AdditiveEpsilonIndicator::new();
        let front = vec![vec![0.0, 4.0], vec![1.0, 3.0], vec![4.0, 0.0]];
        let losses = indicator.losses(&front).unwrap();
        // (0,4): covered by (1,3) shifted by 1
        assert!((losses[0] - 1.0).abs() < 1e-12);
        // (1,3): covered by (0,4) shifted by 1
        assert!((losses[1] - 1.0).abs() < 1e-12);
        // (4,0): nearest cover (1,3) needs 3
        assert!((losses[2] - 3.0).abs() < 1e-12);
        assert_eq!(indicator.least_contributor(&front).unwrap(), 0);
    }

    #[test]
    fn dominated_point_has_zero_loss() {
        let indicator = AdditiveEpsilonIndicator::new();
        let front = vec![vec![0.0, 4.0], vec![2.0, 2.0], vec![3.0, 3.0], vec![4.0, 0.0]];
        let losses = indicator.losses(&front).unwrap();
        assert_eq!(losses[2], 0.0);
        assert_eq!(indicator.least_contributor(&front).unwrap(), 2);
    }

    #[test]
    fn duplicates_tie_on_the_lowest_index() {
        let indicator = AdditiveEpsilonIndicator::new();
        let front = vec![vec![0.0, 4.0], vec![2.0, 2.0], vec![2.0, 2.0]];
        assert_eq!(indicator.least_contributor(&front).unwrap(), 1);
    }

    #[test]
    fn value_against_ideal_point() {
        let indicator = AdditiveEpsilonIndicator::new();
        let front = vec![vec![0.0, 4.0], vec![2.0, 2.0], vec![4.0, 0.0]];
        // ideal (0, 0): best member (2, 2) needs a shift of 2
        assert!((indicator.value(&front).unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(indicator.value(&[vec![1.0, 1.0]]).unwrap(), 0.0);
    }

    #[test]
    fn value_against_reference_set() {
        let reference = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let indicator = AdditiveEpsilonIndicator::with_reference_set(reference).unwrap();
        let front = vec![vec![0.5, 1.5], vec![1.5, 0.5]];
        assert!((indicator.value(&front).unwrap() - 0.5).abs() < 1e-12);
        // A front better than the reference gets a negative epsilon
        let better = vec![vec![-1.0, 0.0], vec![0.0, -1.0]];
        assert!((indicator.value(&better).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_malformed_reference_sets() {
        assert!(AdditiveEpsilonIndicator::with_reference_set(Vec::new()).is_err());
        assert!(AdditiveEpsilonIndicator::with_reference_set(vec![vec![f64::NAN]]).is_err());
        assert!(
            AdditiveEpsilonIndicator::with_reference_set(vec![vec![0.0], vec![0.0, 1.0]])
                .is_err()
        );
    }

    #[test]
    fn least_contributor_rejects_single_point() {
        let indicator = AdditiveEpsilonIndicator::new();
        assert!(matches!(
            indicator.least_contributor(&[vec![0.0, 0.0]]),
            Err(Error::FrontTooSmall(1))
        ));
    }
}
