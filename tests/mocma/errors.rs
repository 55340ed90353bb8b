use core::str::FromStr;

use mocma::indicator::HypervolumeIndicator;
use mocma::{Error, Mocma, NotionOfSuccess};

use crate::test_functions::{FailingAfter, Refused, SpherePair};

#[test]
fn objective_error_propagates_unmodified() {
    let mu = 4;
    let budget = 2 * mu + 2;
    let f = FailingAfter::new(3, budget);
    let mut mocma = Mocma::builder().mu(mu).seed(1).build().unwrap();
    mocma.init(&f, None).unwrap();

    let parents = mocma.solutions();
    let source = match mocma.step(&f) {
        Err(Error::Objective(source)) => source,
        other => panic!("expected an objective error, got {other:?}"),
    };
    let refused = source
        .downcast_ref::<Refused>()
        .expect("source should be the objective's own error");
    assert!(refused.call >= budget);

    // A failed step leaves the parents as they were.
    assert_eq!(mocma.solutions(), parents);
    assert_eq!(mocma.generation(), 0);
}

#[test]
fn init_fails_when_the_objective_fails() {
    let f = FailingAfter::new(2, 3);
    let mut mocma = Mocma::builder().mu(4).seed(1).build().unwrap();
    let err = mocma.init(&f, None).unwrap_err();
    assert!(matches!(err, Error::Objective(_)));
    assert!(!mocma.is_initialized());
}

#[test]
fn step_requires_init() {
    let mut mocma = Mocma::builder().mu(4).build().unwrap();
    assert!(matches!(
        mocma.step(&SpherePair { n: 2 }),
        Err(Error::NotInitialized)
    ));
}

#[test]
fn starting_point_must_match_the_dimension() {
    let mut mocma = Mocma::builder().mu(4).build().unwrap();
    let err = mocma
        .init(&SpherePair { n: 3 }, Some(&[0.0, 0.0]))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            expected: 3,
            got: 2
        }
    ));
}

#[test]
fn fixed_reference_must_be_dominated_at_init() {
    let mut mocma = Mocma::builder()
        .mu(4)
        .seed(6)
        .indicator(HypervolumeIndicator::with_reference(vec![0.01, 0.01]))
        .build()
        .unwrap();
    let err = mocma.init(&SpherePair { n: 2 }, None).unwrap_err();
    assert!(matches!(err, Error::ReferencePointNotDominated { .. }));
}

#[test]
fn unknown_notion_of_success_is_a_configuration_error() {
    assert_eq!(
        NotionOfSuccess::from_str("PopulationBased").unwrap(),
        NotionOfSuccess::PopulationBased
    );
    let err = NotionOfSuccess::from_str("Elitist").unwrap_err();
    assert!(matches!(err, Error::UnknownNotionOfSuccess(ref s) if s == "Elitist"));
}

#[test]
fn zero_mu_is_rejected_at_build_time() {
    assert!(matches!(
        Mocma::builder().mu(0).build(),
        Err(Error::InvalidMu { mu: 0, .. })
    ));
}
