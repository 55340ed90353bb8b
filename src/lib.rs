#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Multi-objective covariance matrix adaptation evolution strategy
//! (MO-CMA-ES) with indicator-based selection.
//!
//! Every individual carries its own mutation strength and shape, adapted
//! from how often its offspring survive. Survival is decided by
//! non-dominated sorting; the first front that does not fit is thinned by
//! repeatedly removing the member that contributes least to a quality
//! indicator.
//!
//! # Getting Started
//!
//! ```
//! use core::convert::Infallible;
//!
//! use mocma::prelude::*;
//!
//! /// Two spheres with centres one unit apart.
//! struct SpherePair;
//!
//! impl MultiObjectiveFunction for SpherePair {
//!     type Error = Infallible;
//!
//!     fn number_of_variables(&self) -> usize {
//!         2
//!     }
//!
//!     fn number_of_objectives(&self) -> usize {
//!         2
//!     }
//!
//!     fn propose_starting_point(&self, rng: &mut mocma::fastrand::Rng) -> Vec<f64> {
//!         vec![rng.f64(), rng.f64()]
//!     }
//!
//!     fn evaluate(&self, x: &[f64]) -> core::result::Result<Vec<f64>, Infallible> {
//!         Ok(vec![
//!             x[0] * x[0] + x[1] * x[1],
//!             (x[0] - 1.0).powi(2) + x[1] * x[1],
//!         ])
//!     }
//! }
//!
//! let mut optimizer = Mocma::builder().mu(20).initial_sigma(0.2).seed(1).build().unwrap();
//! optimizer.init(&SpherePair, None).unwrap();
//!
//! for _ in 0..50 {
//!     optimizer.step(&SpherePair).unwrap();
//! }
//!
//! let front = optimizer.solutions();
//! assert_eq!(front.len(), 20);
//! // Reported points drift towards the segment between the centres
//! assert!(front.iter().all(|s| s.point[1].abs() < 0.5));
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Mocma`] | Owns the population and runs generations with [`Mocma::step`]. |
//! | [`MultiObjectiveFunction`](objective::MultiObjectiveFunction) | The vector-valued function being minimized, with optional feasibility repair. |
//! | [`Individual`] | A search point with its step size, covariance and success statistics. |
//! | [`Indicator`](indicator::Indicator) | Scores fronts and names their least contributor. |
//! | [`IndicatorBasedSelection`] | Non-dominated sorting plus indicator pruning of the critical front. |
//! | [`PenalizingEvaluator`] | Evaluates infeasible points at their repair and penalizes the distance. |
//!
//! # Indicators
//!
//! | Optimizer | Indicator | Least contributor |
//! |-----------|-----------|-------------------|
//! | [`Mocma`] | [`HypervolumeIndicator`](indicator::HypervolumeIndicator) | Exact |
//! | [`EpsilonMocma`] | [`AdditiveEpsilonIndicator`](indicator::AdditiveEpsilonIndicator) | Exact |
//! | [`ApproximatedVolumeMocma`] | [`LeastContributorApproximator`](indicator::LeastContributorApproximator) | Correct with high probability |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `parallel` | Offspring are mutated and evaluated on the rayon thread pool | off |
//! | `serde` | `Serialize`/`Deserialize` on public types, [`Mocma::save`]/[`Mocma::load`] | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key optimization points | off |
//!
//! Results do not depend on `parallel`: every offspring draws from its own
//! generator, seeded from the master generator in slot order.

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod error;
mod evaluator;
pub mod indicator;
mod individual;
mod mocma;
pub mod objective;
pub mod pareto;
mod rng_util;
mod selection;
mod types;

pub use error::{Error, Result};
pub use evaluator::{Evaluation, PenalizingEvaluator};
pub use fastrand;
pub use individual::{AdaptationParams, Individual, MAX_STEP_SIZE};
#[cfg(feature = "serde")]
pub use mocma::MocmaSnapshot;
pub use mocma::{ApproximatedVolumeMocma, EpsilonMocma, Mocma, MocmaBuilder, MocmaConfig};
pub use selection::IndicatorBasedSelection;
pub use types::{NotionOfSuccess, Solution};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use mocma::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::indicator::{
        AdditiveEpsilonIndicator, HypervolumeIndicator, Indicator, LeastContributorApproximator,
        ReferencePoint,
    };
    #[cfg(feature = "serde")]
    pub use crate::mocma::MocmaSnapshot;
    pub use crate::mocma::{
        ApproximatedVolumeMocma, EpsilonMocma, Mocma, MocmaBuilder, MocmaConfig,
    };
    pub use crate::objective::{BoxConstraints, MultiObjectiveFunction};
    pub use crate::types::{NotionOfSuccess, Solution};
}
