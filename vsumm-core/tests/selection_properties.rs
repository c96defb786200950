//! Property checks for the objectives and optimizers on seeded random instances.
//!
//! These tests verify:
//! - Monotonicity and diminishing returns over every subset of small ground sets
//! - Budgets are never exceeded
//! - Lazy and naive greedy agree, including on kernels with negative entries
//! - Objectives only claim monotonicity or diminishing returns when they hold
//! - Coverage selections are the first greedy prefix reaching the target
//! - Streaming decisions are made once, in order, and never revised

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vsumm_core::objectives::{DisparityMin, FacilityLocation, GraphCut, Mmr, SaturateCoverage};
use vsumm_core::optimizer::StreamVerdict;
use vsumm_core::*;

const TOLERANCE: f64 = 1e-9;

/// Non-negative features, so cosine similarities are non-negative too.
fn random_features(rng: &mut StdRng, n: usize, dim: usize) -> Vec<FeatureVector> {
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen_range(0.05f32..1.0)).collect())
        .collect()
}

/// Features in [-1, 1], so cosine similarities can be negative.
fn mixed_sign_features(rng: &mut StdRng, n: usize, dim: usize) -> Vec<FeatureVector> {
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen_range(-1.0f32..1.0)).collect())
        .collect()
}

fn mixed_sign_kernel(seed: u64, n: usize) -> KernelMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let features = mixed_sign_features(&mut rng, n, 4);
    build_kernel(&features, SimilarityMeasure::Cosine, false).unwrap()
}

fn random_costs(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(0.5..2.0)).collect()
}

fn random_kernel(seed: u64, n: usize) -> KernelMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let features = random_features(&mut rng, n, 4);
    build_kernel(&features, SimilarityMeasure::Cosine, false).unwrap()
}

fn subsets(n: usize) -> Vec<Vec<usize>> {
    (0u32..(1 << n))
        .map(|mask| (0..n).filter(|&i| mask & (1 << i) != 0).collect())
        .collect()
}

fn check_monotone<F: SetFunction>(f: &F) {
    let n = f.ground_set_size();
    for s in subsets(n) {
        for e in (0..n).filter(|e| !s.contains(e)) {
            let mut bigger = s.clone();
            bigger.push(e);
            assert!(
                f.evaluate(&bigger) >= f.evaluate(&s) - TOLERANCE,
                "{} decreased when adding {} to {:?}",
                f.name(),
                e,
                s
            );
        }
    }
}

fn check_diminishing_returns<F: SetFunction>(f: &F) {
    let n = f.ground_set_size();
    let all = subsets(n);
    for t in &all {
        for s in all.iter().filter(|s| s.iter().all(|i| t.contains(i))) {
            for e in (0..n).filter(|e| !t.contains(e)) {
                assert!(
                    f.marginal_gain(e, s) >= f.marginal_gain(e, t) - TOLERANCE,
                    "{}: gain of {} grew from {:?} to {:?}",
                    f.name(),
                    e,
                    s,
                    t
                );
            }
        }
    }
}

#[test]
fn monotone_objectives_never_decrease() {
    for seed in 0..3 {
        let kernel = random_kernel(seed, 6);
        check_monotone(&FacilityLocation::new(&kernel));
        check_monotone(&GraphCut::new(&kernel, 0.5));
        check_monotone(&SaturateCoverage::new(&kernel, 0.1));
        check_monotone(&SaturateCoverage::new(&kernel, 0.6));
    }
}

#[test]
fn every_objective_has_diminishing_returns() {
    for seed in 10..12 {
        let kernel = random_kernel(seed, 6);
        check_diminishing_returns(&FacilityLocation::new(&kernel));
        check_diminishing_returns(&GraphCut::new(&kernel, 0.5));
        check_diminishing_returns(&SaturateCoverage::new(&kernel, 0.2));
        check_diminishing_returns(&DisparityMin::new(&kernel));
        check_diminishing_returns(&Mmr::new(&kernel, 0.7));
    }
}

#[test]
fn budget_is_never_exceeded() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..10 {
        let kernel = random_kernel(100 + round, 12);
        let costs = random_costs(&mut rng, 12);
        let budget = rng.gen_range(0.0..8.0);
        for kind in ObjectiveKind::ALL {
            let objective = Objective::new(kind, &kernel, &ObjectiveParams::default()).unwrap();
            let seeds: &[usize] = if objective.requires_seed() { &[3] } else { &[] };
            let naive = naive_greedy_max_knapsack(&objective, &costs, budget, seeds).unwrap();
            assert!(naive.total_cost <= budget + TOLERANCE, "{} over budget", kind);
            let lazy = lazy_greedy_max_knapsack(&objective, &costs, budget, seeds).unwrap();
            assert!(lazy.total_cost <= budget + TOLERANCE, "{} over budget", kind);
        }
    }
}

#[test]
fn lazy_and_naive_greedy_agree() {
    let mut rng = StdRng::seed_from_u64(21);
    for round in 0..10 {
        let kernel = random_kernel(200 + round, 15);
        let costs = random_costs(&mut rng, 15);
        let budget = rng.gen_range(1.0..10.0);
        let fl = FacilityLocation::new(&kernel);
        let gc = GraphCut::new(&kernel, 0.5);
        let sc = SaturateCoverage::new(&kernel, 0.1);

        let naive = naive_greedy_max_knapsack(&fl, &costs, budget, &[]).unwrap();
        let lazy = lazy_greedy_max_knapsack(&fl, &costs, budget, &[]).unwrap();
        assert_eq!(naive.selected, lazy.selected);
        assert!(lazy.evaluations <= naive.evaluations);

        let naive = naive_greedy_max_knapsack(&gc, &costs, budget, &[]).unwrap();
        let lazy = lazy_greedy_max_knapsack(&gc, &costs, budget, &[]).unwrap();
        assert_eq!(naive.selected, lazy.selected);

        let naive = naive_greedy_max_knapsack(&sc, &costs, budget, &[]).unwrap();
        let lazy = lazy_greedy_max_knapsack(&sc, &costs, budget, &[]).unwrap();
        assert_eq!(naive.selected, lazy.selected);
    }
}

#[test]
fn lazy_and_naive_greedy_agree_on_mixed_sign_kernels() {
    let mut negative_kernels = 0;
    for seed in 0..100 {
        let kernel = mixed_sign_kernel(seed, 10);
        if !kernel.is_non_negative() {
            negative_kernels += 1;
        }
        for kind in ObjectiveKind::ALL {
            let objective = Objective::new(kind, &kernel, &ObjectiveParams::default()).unwrap();
            let seeds: &[usize] = if objective.requires_seed() { &[0] } else { &[] };
            let naive = naive_greedy_max_knapsack(&objective, &[1.0; 10], 4.0, seeds).unwrap();
            let lazy = lazy_greedy_max_knapsack(&objective, &[1.0; 10], 4.0, seeds).unwrap();
            assert_eq!(naive.sorted(), lazy.sorted(), "{} on kernel {}", kind, seed);
        }
    }
    assert!(negative_kernels > 90);
}

#[test]
fn reported_properties_hold_on_mixed_sign_kernels() {
    for seed in 0..6 {
        let kernel = mixed_sign_kernel(1000 + seed, 6);
        for kind in ObjectiveKind::ALL {
            let objective = Objective::new(kind, &kernel, &ObjectiveParams::default()).unwrap();
            if objective.is_monotone() {
                check_monotone(&objective);
            }
            if objective.is_submodular() {
                check_diminishing_returns(&objective);
            }
        }
        // facility location clamps at zero and never loses either property
        let fl = FacilityLocation::new(&kernel);
        assert!(fl.is_monotone() && fl.is_submodular());
    }
}

#[test]
fn coverage_rejects_objectives_broken_by_negative_similarities() {
    let kernel = mixed_sign_kernel(1, 10);
    assert!(!kernel.is_non_negative());
    let costs = [1.0; 10];

    for objective in [
        Objective::new(ObjectiveKind::GraphCut, &kernel, &ObjectiveParams::default()).unwrap(),
        Objective::new(ObjectiveKind::SaturateCoverage, &kernel, &ObjectiveParams::default()).unwrap(),
    ] {
        assert!(!objective.is_monotone());
        assert!(matches!(
            lazy_greedy_max_sc(&objective, &costs, 1.0),
            Err(CoreError::UnsupportedConstraint { .. })
        ));
    }

    let fl = FacilityLocation::new(&kernel);
    let result = lazy_greedy_max_sc(&fl, &costs, 1.0).unwrap();
    let all: Vec<usize> = (0..10).collect();
    assert!(result.value >= fl.evaluate(&all) - TOLERANCE);
}

#[test]
fn coverage_returns_first_prefix_reaching_target() {
    let kernel = random_kernel(300, 10);
    let f = FacilityLocation::new(&kernel);
    let costs = vec![1.0; 10];
    let all: Vec<usize> = (0..10).collect();
    let full = f.evaluate(&all);

    for coverage in [0.3, 0.6, 0.9, 1.0] {
        let result = lazy_greedy_max_sc(&f, &costs, coverage).unwrap();
        let target = coverage * full;
        assert!(f.evaluate(&result.selected) >= target - TOLERANCE * full);
        for len in 0..result.selected.len() {
            assert!(f.evaluate(&result.selected[..len]) < target - TOLERANCE * full);
        }

        // the coverage run is a prefix of an unconstrained greedy run
        let greedy = naive_greedy_max_knapsack(&f, &costs, 10.0, &[]).unwrap();
        assert_eq!(result.selected[..], greedy.selected[..result.selected.len()]);
    }
}

#[test]
fn streaming_decisions_are_single_pass_and_irrevocable() {
    let kernel = random_kernel(400, 12);
    let f = GraphCut::new(&kernel, 0.5);
    let mut order: Vec<usize> = (0..12).collect();
    order.reverse();

    let result = stream_greedy(&f, &[1.0; 12], 0.4, &[], &order).unwrap();

    let decided: Vec<usize> = result.decisions.iter().map(|d| d.item).collect();
    assert_eq!(decided, order);
    let accepted: Vec<usize> = result
        .decisions
        .iter()
        .filter(|d| d.verdict == StreamVerdict::Accepted)
        .map(|d| d.item)
        .collect();
    assert_eq!(accepted, result.selection.selected);
    for decision in &result.decisions {
        let gain = decision.gain.unwrap();
        match decision.verdict {
            StreamVerdict::Accepted => assert!(gain >= decision.threshold),
            StreamVerdict::Rejected => assert!(gain < decision.threshold),
            StreamVerdict::AlreadySelected => unreachable!(),
        }
    }
    // thresholds only grow as the running singleton maximum grows
    assert!(result.decisions.windows(2).all(|w| w[0].threshold <= w[1].threshold));
}

#[test]
fn similarity_is_symmetric_and_maximal_on_the_diagonal() {
    let mut rng = StdRng::seed_from_u64(500);
    let features = random_features(&mut rng, 8, 5);
    for measure in [SimilarityMeasure::Cosine, SimilarityMeasure::Gaussian { sigma: 0.7 }] {
        let kernel = build_kernel(&features, measure, true).unwrap();
        assert!(kernel.is_symmetric(1e-9));
        for i in 0..8 {
            assert!((kernel.get(i, i) - measure.max_similarity()).abs() < 1e-9);
            for j in 0..8 {
                assert!(kernel.get(i, j) <= kernel.get(i, i) + 1e-9);
            }
        }
    }
}
