use mocma::indicator::LeastContributorApproximator;
use mocma::{Mocma, NotionOfSuccess, Solution};

use crate::test_functions::{Dtlz2, Zdt1};

fn zdt1_run(seed: u64, generations: usize) -> Vec<Solution> {
    let f = Zdt1::new(6);
    let mut mocma = Mocma::builder().mu(12).seed(seed).build().unwrap();
    mocma.init(&f, None).unwrap();
    for _ in 0..generations {
        mocma.step(&f).unwrap();
    }
    mocma.solutions()
}

#[test]
fn same_seed_reproduces_the_run() {
    assert_eq!(zdt1_run(99, 25), zdt1_run(99, 25));
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(zdt1_run(1, 5), zdt1_run(2, 5));
}

#[test]
fn step_sizes_and_ranks_are_reproducible() {
    let f = Dtlz2::new(5);
    let run = || {
        let mut mocma = Mocma::builder()
            .mu(8)
            .notion_of_success(NotionOfSuccess::PopulationBased)
            .seed(5)
            .build()
            .unwrap();
        mocma.init(&f, None).unwrap();
        for _ in 0..15 {
            mocma.step(&f).unwrap();
        }
        mocma
            .population()
            .iter()
            .map(|ind| (ind.step_size(), ind.rank(), ind.age()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn seeded_approximator_reproduces_the_run() {
    let f = Dtlz2::new(4);
    let run = || {
        let approximator = LeastContributorApproximator::builder()
            .seed(3)
            .samples_per_round(50)
            .max_samples(2_000)
            .build()
            .unwrap();
        let mut mocma = Mocma::builder()
            .mu(6)
            .seed(3)
            .indicator(approximator)
            .build()
            .unwrap();
        mocma.init(&f, None).unwrap();
        for _ in 0..10 {
            mocma.step(&f).unwrap();
        }
        mocma.solutions()
    };
    assert_eq!(run(), run());
}

#[cfg(feature = "parallel")]
#[test]
fn thread_count_does_not_change_the_run() {
    let in_pool = |threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| zdt1_run(13, 20))
    };
    let single = in_pool(1);
    assert_eq!(single, in_pool(4));
    assert_eq!(single, zdt1_run(13, 20));
}
