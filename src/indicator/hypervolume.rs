use super::{Indicator, ReferencePoint, argmin, check_prunable};
use crate::error::Result;
use crate::pareto;

/// Exact hypervolume indicator.
///
/// The least contributor is the member with the smallest exclusive
/// hypervolume, computed exactly (neighbour formula in two objectives,
/// `HV(S) - HV(S \ {i})` above).
///
/// # Examples
///
/// ```
/// use mocma::indicator::{HypervolumeIndicator, Indicator};
///
/// let indicator = HypervolumeIndicator::with_reference(vec![4.0, 4.0]);
/// let front = vec![vec![1.0, 3.0], vec![1.5, 2.9], vec![3.0, 1.0]];
///
/// assert!((indicator.value(&front).unwrap() - 5.15).abs() < 1e-12);
/// assert_eq!(indicator.least_contributor(&front).unwrap(), 1);
///
/// // A point outside the reference box is a caller error, not a zero.
/// assert!(indicator.value(&[vec![5.0, 1.0]]).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HypervolumeIndicator {
    reference: ReferencePoint,
}

impl HypervolumeIndicator {
    /// Hypervolume with a reference point one unit beyond the front's nadir.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hypervolume with a fixed reference point.
    #[must_use]
    pub fn with_reference(reference: Vec<f64>) -> Self {
        Self {
            reference: ReferencePoint::Fixed(reference),
        }
    }

    /// Hypervolume with an explicit reference point policy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidReferencePoint`](crate::Error::InvalidReferencePoint)
    /// or [`InvalidReferenceOffset`](crate::Error::InvalidReferenceOffset) if
    /// the policy is malformed.
    pub fn with_reference_point(reference: ReferencePoint) -> Result<Self> {
        reference.check()?;
        Ok(Self { reference })
    }

    /// The reference point policy.
    #[must_use]
    pub fn reference(&self) -> &ReferencePoint {
        &self.reference
    }

    /// Exclusive hypervolume of every member of `front`.
    ///
    /// # Errors
    ///
    /// Returns the reference point precondition errors of
    /// [`Indicator::value`].
    pub fn contributions(&self, front: &[Vec<f64>]) -> Result<Vec<f64>> {
        if front.is_empty() {
            return Ok(Vec::new());
        }
        let reference = self.reference.resolve(front)?;
        Ok(pareto::hypervolume_contributions(front, &reference))
    }
}

impl Indicator for HypervolumeIndicator {
    fn name(&self) -> &'static str {
        "hypervolume"
    }

    fn value(&self, front: &[Vec<f64>]) -> Result<f64> {
        if front.is_empty() {
            return Ok(0.0);
        }
        let reference = self.reference.resolve(front)?;
        Ok(pareto::hypervolume(front, &reference))
    }

    fn least_contributor(&self, front: &[Vec<f64>]) -> Result<usize> {
        check_prunable(front)?;
        let contributions = self.contributions(front)?;
        Ok(argmin(&contributions))
    }

    fn validate(&self, points: &[Vec<f64>]) -> Result<()> {
        self.reference.resolve(points).map(|_| ())
    }
}
