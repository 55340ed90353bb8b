use mocma::indicator::{AdditiveEpsilonIndicator, Indicator, LeastContributorApproximator};
use mocma::{ApproximatedVolumeMocma, EpsilonMocma, Mocma, MocmaBuilder};

use crate::front_hypervolume;
use crate::test_functions::{Dtlz2, Zdt1};

const ZDT_REFERENCE: [f64; 2] = [11.0, 11.0];

fn improves_on_zdt1<I: Indicator>(builder: MocmaBuilder<I>) {
    let f = Zdt1::new(5);
    let mut mocma = builder.mu(10).seed(17).build().unwrap();
    mocma.init(&f, None).unwrap();
    let initial = front_hypervolume(&mocma.solutions(), &ZDT_REFERENCE);

    for _ in 0..100 {
        mocma.step(&f).unwrap();
    }
    let last = front_hypervolume(&mocma.solutions(), &ZDT_REFERENCE);
    assert!(last > initial, "{}: {last} <= {initial}", mocma.name());
}

#[test]
fn exact_hypervolume_improves_on_zdt1() {
    improves_on_zdt1(Mocma::builder());
}

#[test]
fn epsilon_improves_on_zdt1() {
    improves_on_zdt1(Mocma::builder().indicator(AdditiveEpsilonIndicator::new()));
}

#[test]
fn approximated_volume_improves_on_zdt1() {
    let approximator = LeastContributorApproximator::builder()
        .seed(17)
        .max_samples(5_000)
        .build()
        .unwrap();
    improves_on_zdt1(Mocma::builder().indicator(approximator));
}

#[test]
fn three_objectives_move_towards_the_sphere() {
    let f = Dtlz2::new(6);
    let distance = |mocma: &Mocma| {
        let solutions = mocma.solutions();
        let total: f64 = solutions
            .iter()
            .map(|s| s.value.iter().map(|v| v * v).sum::<f64>().sqrt() - 1.0)
            .sum();
        total / solutions.len() as f64
    };

    let mut mocma = Mocma::builder().mu(10).seed(44).build().unwrap();
    mocma.init(&f, None).unwrap();
    let initial = distance(&mocma);
    for _ in 0..150 {
        mocma.step(&f).unwrap();
    }
    let last = distance(&mocma);
    assert!(last < initial, "{last} >= {initial}");
    assert!(mocma.solutions().iter().all(|s| s.value.len() == 3));
}

#[test]
fn variant_names() {
    let exact: Mocma = Mocma::default();
    let epsilon: EpsilonMocma = Mocma::builder()
        .indicator(AdditiveEpsilonIndicator::new())
        .build()
        .unwrap();
    let approximated: ApproximatedVolumeMocma = Mocma::builder()
        .indicator(LeastContributorApproximator::default())
        .build()
        .unwrap();

    assert_eq!(exact.name(), "MOCMA");
    assert_eq!(epsilon.name(), "EpsilonMOCMA");
    assert_eq!(approximated.name(), "ApproximatedVolumeMOCMA");
    assert_eq!(epsilon.indicator().name(), "additive-epsilon");
}
