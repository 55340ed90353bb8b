use mocma::{Individual, Mocma, MocmaConfig, NotionOfSuccess};
use nalgebra::DMatrix;

use crate::test_functions::{LinearFront, SpherePair, Zdt4};

#[test]
fn zero_penalty_on_unconstrained_problem() {
    let f = SpherePair { n: 3 };
    let mut mocma = Mocma::builder().mu(6).penalty_factor(0.0).seed(4).build().unwrap();
    mocma.init(&f, None).unwrap();
    for _ in 0..10 {
        mocma.step(&f).unwrap();
        for ind in mocma.population() {
            assert_eq!(ind.penalized_fitness(), ind.unpenalized_fitness());
        }
    }
}

#[test]
fn infeasible_parents_carry_a_penalty() {
    let f = Zdt4::new(4);
    let mut mocma = Mocma::builder()
        .mu(10)
        .initial_sigma(2.0)
        .penalty_factor(1.0)
        .seed(12)
        .build()
        .unwrap();
    mocma.init(&f, None).unwrap();
    for _ in 0..5 {
        mocma.step(&f).unwrap();
    }
    for ind in mocma.population() {
        for (p, u) in ind.penalized_fitness().iter().zip(ind.unpenalized_fitness()) {
            assert!(p >= u);
        }
    }
}

#[test]
fn reported_values_are_evaluated_at_the_repaired_point() {
    let f = LinearFront::new(2);
    let mut mocma = Mocma::builder().mu(4).seed(3).build().unwrap();
    mocma.init(&f, Some(&[1.5, 0.0])).unwrap();
    for solution in mocma.solutions() {
        assert_eq!(solution.point, vec![1.5, 0.0]);
        assert_eq!(solution.value, vec![1.0, 0.0]);
    }
}

#[test]
fn evaluations_and_generations_are_counted() {
    let f = SpherePair { n: 2 };
    let mut mocma = Mocma::builder().mu(7).seed(0).build().unwrap();
    mocma.init(&f, None).unwrap();
    assert_eq!(mocma.evaluations(), 14);
    for _ in 0..9 {
        mocma.step(&f).unwrap();
    }
    assert_eq!(mocma.generation(), 9);
    assert_eq!(mocma.evaluations(), 14 + 9 * 7);
    assert!(mocma.population().iter().all(|ind| (1..=9).contains(&ind.age())));
}

#[test]
fn step_size_respects_the_floor() {
    let f = SpherePair { n: 2 };
    let mut mocma = Mocma::builder()
        .mu(5)
        .initial_sigma(0.2)
        .min_step_size(0.1)
        .seed(21)
        .build()
        .unwrap();
    mocma.init(&f, None).unwrap();
    for _ in 0..100 {
        mocma.step(&f).unwrap();
        assert!(mocma.population().iter().all(|ind| ind.step_size() >= 0.1));
    }
}

#[test]
fn disabled_covariance_adaptation_stays_isotropic() {
    let f = SpherePair { n: 3 };
    let mut mocma = Mocma::builder()
        .mu(5)
        .covariance_adaptation(false)
        .seed(2)
        .build()
        .unwrap();
    mocma.init(&f, None).unwrap();
    for _ in 0..30 {
        mocma.step(&f).unwrap();
    }
    let identity = DMatrix::identity(3, 3);
    assert!(mocma.population().iter().all(|ind| ind.covariance() == &identity));
}

#[test]
fn both_notions_of_success_run() {
    let f = SpherePair { n: 2 };
    for notion in [NotionOfSuccess::IndividualBased, NotionOfSuccess::PopulationBased] {
        let config = MocmaConfig {
            mu: 6,
            notion_of_success: notion,
            seed: Some(10),
            ..MocmaConfig::default()
        };
        let mut mocma = Mocma::builder().config(config).build().unwrap();
        mocma.init(&f, None).unwrap();
        for _ in 0..20 {
            assert_eq!(mocma.step(&f).unwrap().len(), 6);
        }
        assert!(mocma.population().iter().all(Individual::selected));
        assert_eq!(mocma.config().notion_of_success, notion);
    }
}
