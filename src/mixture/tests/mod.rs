//! Mixture tests


use crate::error::RewriteError;
use crate::mixture::{Mixture, MixturePattern};

pub(super) fn mixture(text: &str) -> Mixture {
    Mixture::parse(text).unwrap()
}

#[test]
fn test_parse_and_display() {
    let m = mixture("(salty Onion) +  (Water)");
    assert_eq!(m.len(), 2);
    assert_eq!(m.components()[0].base(), Some("Onion"));
    assert_eq!(m.to_string(), "(salty Onion) + (Water)");
}

#[test]
fn test_parse_without_parentheses() {
    let m = mixture("Onion + salty Water");
    assert_eq!(m.to_string(), "(Onion) + (salty Water)");
}

#[test]
fn test_multiset_equality() {
    assert_eq!(mixture("(Water) + (Onion)"), mixture("(Onion) + (Water)"));
    assert_ne!(
        mixture("(Water) + (Water) + (Onion)"),
        mixture("(Water) + (Onion) + (Onion)")
    );
    assert_ne!(mixture("(Water)"), mixture("(Water) + (Water)"));
    assert_ne!(mixture("(a Water)"), mixture("(Water)"));
}

#[test]
fn test_equal_mixtures_hash_equal() {
    use std::collections::HashSet;

    let mut seen = HashSet::new();
    seen.insert(mixture("(Water) + (salty Onion)"));
    assert!(seen.contains(&mixture("(salty Onion) + (Water)")));
}

#[test]
fn test_groups_need_plus_between_them() {
    assert_eq!(mixture("(Onion)+Water").to_string(), "(Onion) + (Water)");
    assert_eq!(mixture("Onion + (Water)").len(), 2);
    let err = MixturePattern::parse("(i1) (i2)").unwrap_err();
    assert!(matches!(err, RewriteError::InvalidPattern { .. }));
}

#[test]
fn test_malformed_mixtures() {
    for text in [
        "",
        "(Onion",
        "Onion)",
        "(Onion) + ",
        "+ (Onion)",
        "()",
        "(a) + + (b)",
        "(Onion) Water",
        "(Onion)(Water)",
        "(Onion) (Water) + (Garlic)",
    ] {
        let err = Mixture::parse(text).unwrap_err();
        assert!(
            matches!(err, RewriteError::InvalidPattern { .. }),
            "{:?} gave {:?}",
            text,
            err
        );
    }
}

#[test]
fn test_serde_as_list_of_token_lists() {
    let m = mixture("(salty Onion) + (Water)");
    let json = serde_json::to_string(&m).unwrap();
    assert_eq!(json, r#"[["salty","Onion"],["Water"]]"#);
    let back: Mixture = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}
