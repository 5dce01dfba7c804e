//! Component tests


use crate::component::Component;
use crate::oracle::TrivialOracle;

pub(super) fn oracle() -> TrivialOracle {
    TrivialOracle::new(["Onion", "Water", "Garlic"])
}

pub(super) fn component(text: &str) -> Component {
    Component::parse(text).unwrap()
}

#[test]
fn test_component_parse_and_display() {
    let c = component("  soggy   salty Onion ");
    assert_eq!(c.len(), 3);
    assert_eq!(c.base(), Some("Onion"));
    assert_eq!(c.modifiers(), ["soggy".to_string(), "salty".to_string()]);
    assert_eq!(c.to_string(), "soggy salty Onion");
}

#[test]
fn test_empty_component_rejected() {
    assert!(Component::parse("   ").is_err());
}

#[test]
fn test_component_equality_is_positional() {
    assert_eq!(component("a b Onion"), component("a b Onion"));
    assert_ne!(component("a b Onion"), component("b a Onion"));
}
