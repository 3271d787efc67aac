//! End-to-end search tests

use astable_search::prelude::*;
use astable_search::search::{rank, select, Constraint, ConstraintEvaluator};

#[test]
fn test_default_design() {
    let solution = design(&DesignConfig::default(), &Catalog::standard(), Objective::DutyDeviation)
        .expect("default constants have a solution");

    assert_eq!(solution.candidate, Candidate::new(2200.0, 5000.0, 1200.0, 4.7e-9));
    assert_eq!(solution.duty_deviation, 0.001);
    assert_eq!(
        solution.candidate.to_string(),
        "R7 = 2.2k  VR2 = 5k    R6 = 1.2k  C5 = 4.7n "
    );
}

#[test]
fn test_default_search_outcome() {
    let outcome = search(&DesignConfig::default(), &Catalog::standard()).unwrap();

    assert_eq!(outcome.evaluated, 8 * 74 * 74 * 30);
    assert_eq!(outcome.evaluated, outcome.solutions.len() + outcome.rejections.total());

    let found: Vec<(f64, f64, f64, f64)> = outcome
        .solutions
        .iter()
        .map(|s| (s.candidate.r_a, s.candidate.pot, s.candidate.r_b, s.candidate.capacitance))
        .collect();
    assert_eq!(
        found,
        vec![
            (2200.0, 5000.0, 1200.0, 4.7e-9),
            (3300.0, 5000.0, 1500.0, 3.3e-9),
            (10_000.0, 20_000.0, 5600.0, 1e-9),
            (22_000.0, 50_000.0, 12_000.0, 4.7e-10),
            (33_000.0, 50_000.0, 15_000.0, 3.3e-10),
        ]
    );

    // Every recorded solution passes every predicate
    let evaluator = ConstraintEvaluator::new(&DesignConfig::default()).unwrap();
    for solution in &outcome.solutions {
        let evaluation = evaluator.evaluate(&solution.candidate);
        for constraint in Constraint::ALL {
            assert!(evaluator.satisfies(&evaluation, constraint), "{} fails {}", solution.candidate, constraint);
        }
    }
}

#[test]
fn test_tie_goes_to_first_enumerated() {
    let outcome = search(&DesignConfig::default(), &Catalog::standard()).unwrap();

    // The 22k/50k/12k/470p tuple scales the chosen one and ties on deviation
    let ranked = rank(&outcome.solutions, Objective::DutyDeviation, 2);
    assert_eq!(ranked[0].duty_deviation, ranked[1].duty_deviation);
    assert!(ranked[0].index < ranked[1].index);

    let best = select(&outcome.solutions, Objective::DutyDeviation, outcome.evaluated).unwrap();
    assert_eq!(best.index, ranked[0].index);
}

#[test]
fn test_pipeline_is_deterministic() {
    let config = DesignConfig::default();
    let first = search(&config, &Catalog::standard()).unwrap();
    let second = search(&config, &Catalog::standard()).unwrap();
    assert_eq!(first, second);

    let a = design(&config, &Catalog::standard(), Objective::DutyDeviation).unwrap();
    let b = design(&config, &Catalog::standard(), Objective::DutyDeviation).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_other_objectives() {
    let config = DesignConfig::default();
    let narrowest = design(&config, &Catalog::standard(), Objective::FrequencySpread).unwrap();
    assert_eq!(narrowest.candidate.r_a, 3300.0);

    let lowest_current = design(&config, &Catalog::standard(), Objective::DischargeCurrent).unwrap();
    assert_eq!(lowest_current.candidate.r_a, 33_000.0);
}

#[test]
fn test_unreachable_target_is_no_solution() {
    let config = DesignConfig::new().with_target_frequency(1.0);
    let result = design(&config, &Catalog::standard(), Objective::DutyDeviation);
    assert_eq!(
        result,
        Err(SearchError::NoSolution {
            evaluated: 8 * 74 * 74 * 30
        })
    );
}

#[test]
fn test_restricted_catalog() {
    let catalog = Catalog::new(vec![1000.0, 4700.0], vec![4.7e-8], vec![10_000.0]);
    let outcome = search(&DesignConfig::default(), &catalog).unwrap();
    assert!(outcome.solutions.is_empty());
    assert_eq!(outcome.rejections.design_window, 4);

    let result = design(&DesignConfig::default(), &catalog, Objective::DutyDeviation);
    assert_eq!(result, Err(SearchError::NoSolution { evaluated: 4 }));
}

#[test]
fn test_invalid_config_rejected_before_search() {
    let config = DesignConfig::new().with_tolerances(0.01, -0.1);
    match search(&config, &Catalog::standard()) {
        Err(SearchError::InvalidConfig { param, .. }) => assert_eq!(param, "capacitor_tolerance"),
        other => panic!("expected invalid config, got {:?}", other.map(|o| o.evaluated)),
    }
}
