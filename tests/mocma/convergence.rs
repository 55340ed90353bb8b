use mocma::indicator::HypervolumeIndicator;
use mocma::Mocma;

use crate::selection_hypervolume;
use crate::test_functions::{LinearFront, SpherePair};

#[test]
fn linear_front_is_approached() {
    let f = LinearFront::new(3);
    let mut mocma = Mocma::builder().mu(20).initial_sigma(0.3).seed(2024).build().unwrap();
    mocma.init(&f, None).unwrap();

    for _ in 0..299 {
        mocma.step(&f).unwrap();
    }
    let front = mocma.step(&f).unwrap();

    assert_eq!(front.len(), 20);
    for solution in &front {
        let distance = LinearFront::front_distance(&solution.value);
        assert!(distance < 0.05, "distance {distance} for {solution:?}");
    }

    // The front is spread, not collapsed onto one point.
    let f1: Vec<f64> = front.iter().map(|s| s.value[0]).collect();
    let spread = f1.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        - f1.iter().copied().fold(f64::INFINITY, f64::min);
    assert!(spread > 0.5, "spread {spread}");
}

#[test]
fn hypervolume_never_decreases() {
    let f = SpherePair { n: 2 };
    let reference = [10.0, 10.0];
    let mut mocma = Mocma::builder()
        .mu(5)
        .initial_sigma(0.1)
        .seed(31)
        .indicator(HypervolumeIndicator::with_reference(reference.to_vec()))
        .build()
        .unwrap();
    mocma.init(&f, None).unwrap();

    let initial = selection_hypervolume(&mocma, &reference);
    let mut last = initial;
    for generation in 0..60 {
        mocma.step(&f).unwrap();
        let hv = selection_hypervolume(&mocma, &reference);
        assert!(
            hv >= last - 1e-9 * last,
            "generation {generation}: {hv} < {last}"
        );
        last = hv;
    }
    assert!(last > initial);
}

#[test]
fn step_sizes_shrink_near_the_front() {
    let f = SpherePair { n: 4 };
    let mut mocma = Mocma::builder().mu(10).initial_sigma(0.5).seed(8).build().unwrap();
    mocma.init(&f, None).unwrap();
    for _ in 0..200 {
        mocma.step(&f).unwrap();
    }
    let largest = mocma
        .population()
        .iter()
        .map(mocma::Individual::step_size)
        .fold(0.0, f64::max);
    assert!(largest < 0.5, "largest step size {largest}");
    assert!(mocma.population().iter().all(|ind| ind.step_size() > 0.0));
}
