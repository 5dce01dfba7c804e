//! Tag oracle tests

use std::sync::Arc;

use crate::oracle::{TagOracle, TagTable, TrivialOracle};

#[test]
fn test_trivial_oracle_tags() {
    let oracle = TrivialOracle::new(["AnIngredient"]);
    let tags = oracle.tags_of("salty");
    assert!(tags.contains("salty"));
    assert!(tags.contains("salty_tag"));
    assert_eq!(tags.len(), 2);
    assert!(oracle.is_base("AnIngredient"));
    assert!(!oracle.is_base("salty"));
}

#[test]
fn test_tag_table_inheritance() {
    let mut table = TagTable::new();
    table
        .add_ingredient("Onion", ["Vegetable", "Food"])
        .add_ingredient("Water", Vec::<String>::new());

    assert!(table.is_base("Onion"));
    assert!(table.is_base("Water"));
    assert!(!table.is_base("Vegetable"));

    let tags = table.tags_of("Onion");
    assert!(tags.contains("Onion"));
    assert!(tags.contains("Vegetable"));
    assert!(tags.contains("Food"));
    assert!(table.has_tag("Onion", "Vegetable"));
    assert!(!table.has_tag("Water", "Vegetable"));
}

#[test]
fn test_tag_table_aliases() {
    let mut table = TagTable::new();
    table.add_alias("salty", ["brined", "cured"]);
    table.add_alias("preserved", ["cured"]);

    let aliases: Vec<&str> = table.aliases_of("cured").into_iter().collect();
    assert_eq!(aliases, vec!["preserved", "salty"]);
    assert!(table.has_tag("brined", "salty"));
    assert!(!table.has_tag("brined", "preserved"));
    // 常量总是带有自身名字作为标签
    assert!(table.has_tag("fresh", "fresh"));
}

#[test]
fn test_shared_oracle_blanket_impls() {
    let table: Arc<dyn TagOracle> = Arc::new(TrivialOracle::new(["Onion"]));
    assert!(table.is_base("Onion"));

    let boxed: Box<dyn TagOracle> = Box::new(TrivialOracle::new(["Garlic"]));
    let by_ref = &boxed;
    assert!(by_ref.is_base("Garlic"));
}
