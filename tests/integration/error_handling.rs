//! Error handling integration tests

use std::fs;

use mixrule::{load_rules, Component, ReductionConfig, ReductionSystem, RewriteError, RuleSet, TrivialOracle};

#[test]
fn test_bad_rule_file_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reductions");
    fs::write(&path, "A -> B\n\nm1 -> i1\n").unwrap();

    let err = load_rules(&path).unwrap_err();
    let root = err.downcast_ref::<RewriteError>().unwrap();
    assert!(matches!(root, RewriteError::AtLine { line: 3, .. }));
    assert!(matches!(root.root(), RewriteError::InvalidToken { .. }));
}

#[test]
fn test_cycle_is_reported_not_looped() {
    let set = RuleSet::parse("A -> B\nB -> A").unwrap();
    let system = ReductionSystem::with_config(
        set.into_rules(),
        TrivialOracle::default(),
        ReductionConfig::with_max_iterations(50),
    );
    let err = system
        .reduce_component(&Component::parse("A").unwrap())
        .unwrap_err();
    match err {
        RewriteError::DivergingReduction { rule, state, limit } => {
            assert_eq!(limit, 50);
            assert_eq!(rule, "B -> A");
            assert_eq!(state, "A");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_illegal_collector_blocks_construction() {
    let err = RuleSet::parse("(i1) + (i2) -> (o1 i1 i2)").unwrap_err();
    assert_eq!(
        err.root(),
        &RewriteError::IllegalCollectorInMixtureContext {
            collector: "o1".to_string()
        }
    );
}
