#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a lower bound is greater than the upper bound.
    #[error("invalid bounds: low ({low}) must be less than or equal to high ({high})")]
    InvalidBounds {
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when the parent population size is zero or exceeds the population.
    #[error("invalid mu: {mu} must be positive and at most the population size {population}")]
    InvalidMu {
        /// The requested number of survivors.
        mu: usize,
        /// The number of individuals available.
        population: usize,
    },

    /// Returned when the penalty factor is negative or not finite.
    #[error("invalid penalty factor: {0} must be finite and non-negative")]
    InvalidPenaltyFactor(f64),

    /// Returned when the success threshold is not in the open interval (0.0, 1.0).
    #[error("invalid success threshold: {0} must be in (0.0, 1.0)")]
    InvalidSuccessThreshold(f64),

    /// Returned when the initial step size is not positive and finite.
    #[error("invalid initial sigma: {0} must be positive and finite")]
    InvalidInitialSigma(f64),

    /// Returned when the step-size floor is not positive or exceeds the initial step size.
    #[error("invalid minimum step size: {0} must be positive and at most the initial sigma")]
    InvalidMinStepSize(f64),

    /// Returned when a notion of success is not one of the recognized names.
    #[error(
        "unknown notion of success '{0}': expected 'IndividualBased' or 'PopulationBased'"
    )]
    UnknownNotionOfSuccess(String),

    /// Returned when a starting point does not match the number of variables.
    #[error("dimension mismatch: expected {expected} variables, got {got}")]
    DimensionMismatch {
        /// The number of variables declared by the objective function.
        expected: usize,
        /// The length of the supplied point.
        got: usize,
    },

    /// Returned when the objective returns the wrong number of values.
    #[error("objective dimension mismatch: expected {expected} values, got {got}")]
    ObjectiveDimensionMismatch {
        /// The number of objectives declared by the objective function.
        expected: usize,
        /// The actual number of objective values returned.
        got: usize,
    },

    /// Returned when a fitness vector does not strictly dominate the fixed
    /// hypervolume reference point.
    #[error("fitness vector {point:?} does not strictly dominate the reference point {reference:?}")]
    ReferencePointNotDominated {
        /// The offending fitness vector.
        point: Vec<f64>,
        /// The configured reference point.
        reference: Vec<f64>,
    },

    /// Returned when the reference point and the fitness vectors disagree in length.
    #[error("reference point has {expected} objectives but a fitness vector has {got}")]
    ReferenceDimensionMismatch {
        /// The length of the reference point.
        expected: usize,
        /// The length of the fitness vector.
        got: usize,
    },

    /// Returned when a fixed reference point is empty or contains NaN.
    #[error("invalid reference point {0:?}: must be non-empty and free of NaN")]
    InvalidReferencePoint(Vec<f64>),

    /// Returned when an adaptive reference point offset is not positive and finite.
    #[error("invalid reference offset: {0} must be positive and finite")]
    InvalidReferenceOffset(f64),

    /// Returned when the error probability of an approximation is not in (0.0, 1.0).
    #[error("invalid error probability: {0} must be in (0.0, 1.0)")]
    InvalidErrorProbability(f64),

    /// Returned when a sampling budget is zero or smaller than one sampling round.
    #[error(
        "invalid sample budget: {max_samples} samples must be positive and at least {samples_per_round}"
    )]
    InvalidSampleBudget {
        /// Samples drawn per candidate per round.
        samples_per_round: usize,
        /// Upper bound on samples per candidate.
        max_samples: usize,
    },

    /// Returned when asking for the least contributor of a front with fewer than two points.
    #[error("cannot determine the least contributor of a front with {0} point(s)")]
    FrontTooSmall(usize),

    /// Returned when `step` is called before `init`.
    #[error("optimizer is not initialized: call init() before step()")]
    NotInitialized,

    /// Returned when the objective function fails. The original error is kept
    /// as the source and can be recovered with `downcast_ref`.
    #[error("objective evaluation failed: {0}")]
    Objective(#[source] Box<dyn core::error::Error + Send + Sync + 'static>),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Wrap an objective function failure without altering it.
    pub(crate) fn objective(err: impl core::error::Error + Send + Sync + 'static) -> Self {
        Error::Objective(Box::new(err))
    }
}
