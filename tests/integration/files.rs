//! Loading rules and configuration from disk

use std::fs;

use mixrule::util::config::{load_config, save_config};
use mixrule::{load_rules, load_system, Component, EngineConfig, ReductionConfig, TagTable};

#[test]
fn test_load_rules_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reductions");
    fs::write(&path, "salty : cured\n# comment\nm1:salty i1 -> i1\n").unwrap();

    let set = load_rules(&path).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.aliases().len(), 1);
}

#[test]
fn test_load_system_uses_config_and_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let rules = dir.path().join("reductions");
    let config_path = dir.path().join("mixrule.json");
    fs::write(&rules, "salty : cured\nm1:salty i1 -> i1\n").unwrap();
    save_config(
        &config_path,
        &EngineConfig {
            reduction: ReductionConfig::with_max_iterations(5),
            ..EngineConfig::default()
        },
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let mut table = TagTable::new();
    table.add_ingredient("Onion", ["Vegetable"]);
    let system = load_system(&rules, table, &config).unwrap();

    assert_eq!(system.config().max_iterations, 5);
    assert_eq!(
        system
            .reduce_component(&Component::parse("cured Onion").unwrap())
            .unwrap(),
        Component::parse("Onion").unwrap()
    );
}

#[test]
fn test_missing_rule_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_rules(&dir.path().join("nope")).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}
