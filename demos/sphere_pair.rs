//! Two shifted spheres with a box constraint, optimized by all three
//! MO-CMA-ES variants.
//!
//! Each variant runs the same budget from the same seed and reports the
//! hypervolume of its final front against a fixed reference point.
//!
//! Run with: `cargo run --example sphere_pair`

use core::convert::Infallible;

use mocma::prelude::*;

const VARIABLES: usize = 5;
const REFERENCE: [f64; 2] = [4.0, 4.0];

/// `f_1 = ‖x‖²`, `f_2 = ‖x − e_1‖²` on `[-1, 2]^n`.
struct SpherePair {
    bounds: BoxConstraints,
}

impl MultiObjectiveFunction for SpherePair {
    type Error = Infallible;

    fn number_of_variables(&self) -> usize {
        self.bounds.dimension()
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn propose_starting_point(&self, rng: &mut mocma::fastrand::Rng) -> Vec<f64> {
        self.bounds.propose_starting_point(rng)
    }

    fn evaluate(&self, x: &[f64]) -> core::result::Result<Vec<f64>, Infallible> {
        let rest: f64 = x[1..].iter().map(|v| v * v).sum();
        Ok(vec![x[0] * x[0] + rest, (x[0] - 1.0).powi(2) + rest])
    }

    fn is_feasible(&self, x: &[f64]) -> bool {
        self.bounds.is_feasible(x)
    }

    fn closest_feasible(&self, x: &[f64]) -> Vec<f64> {
        self.bounds.closest_feasible(x)
    }
}

fn run<I: Indicator>(builder: MocmaBuilder<I>, f: &SpherePair) -> mocma::Result<()> {
    let mut optimizer = builder.mu(20).initial_sigma(0.5).seed(7).build()?;
    optimizer.init(f, None)?;

    for generation in 1..=200 {
        optimizer.step(f)?;
        if generation % 50 == 0 {
            println!(
                "{:>24} generation {generation:>3}: {} evaluations",
                optimizer.name(),
                optimizer.evaluations(),
            );
        }
    }

    let mut front = optimizer.solutions();
    let values: Vec<Vec<f64>> = front.iter().map(|s| s.value.clone()).collect();
    let hv = HypervolumeIndicator::with_reference(REFERENCE.to_vec()).value(&values)?;
    println!("{:>24} final hypervolume: {hv:.6}", optimizer.name());

    front.sort_by(|a, b| a.value[0].total_cmp(&b.value[0]));
    if let (Some(first), Some(last)) = (front.first(), front.last()) {
        println!(
            "{:>24} front spans f1 in [{:.4}, {:.4}]",
            "",
            first.value[0],
            last.value[0],
        );
    }
    Ok(())
}

fn main() -> mocma::Result<()> {
    let f = SpherePair {
        bounds: BoxConstraints::uniform(VARIABLES, -1.0, 2.0)?,
    };

    run(Mocma::builder(), &f)?;
    run(Mocma::builder().indicator(AdditiveEpsilonIndicator::new()), &f)?;
    run(
        Mocma::builder().indicator(LeastContributorApproximator::builder().seed(7).build()?),
        &f,
    )?;

    Ok(())
}
