//! Token classifier tests

use crate::error::RewriteError;
use crate::oracle::TrivialOracle;
use crate::token::{classify, Category, Token, VarClass, VarKind};

fn oracle() -> TrivialOracle {
    TrivialOracle::new(["Onion", "Water"])
}

#[test]
fn test_variable_prefixes() {
    let m = Token::parse("m843").unwrap();
    assert_eq!(m.class(), Some(VarClass::Modifier));
    assert_eq!(m.kind(), VarKind::Unqualified);
    assert_eq!(m.name(), "m843");

    let i = Token::parse("i42").unwrap();
    assert_eq!(i.class(), Some(VarClass::Ingredient));

    let o = Token::parse("o1").unwrap();
    assert!(o.is_collector());
}

#[test]
fn test_qualified_variable() {
    let token = Token::parse("i93:Vegetable&!Frozen").unwrap();
    assert_eq!(token.kind(), VarKind::Qualified);
    assert_eq!(token.name(), "i93");
    assert_eq!(token.qualifier().unwrap().to_string(), "Vegetable&!Frozen");
    assert_eq!(token.to_string(), "i93:Vegetable&!Frozen");
}

#[test]
fn test_constants() {
    for text in ["Onion", "mushroom", "i", "m", "oily", "i1x"] {
        let token = Token::parse(text).unwrap();
        assert_eq!(token.kind(), VarKind::Constant, "{}", text);
        assert_eq!(token.name(), text);
    }
}

#[test]
fn test_invalid_tokens() {
    for bad in [
        "",
        "Onion:Vegetable",
        "m:x",
        "i1:",
        "i1:a&",
        "ix:Grain",
        "i1:(a",
        "i1:a:b",
        "i1:!a:b",
    ] {
        let err = Token::parse(bad).unwrap_err();
        assert!(
            matches!(err, RewriteError::InvalidToken { .. }),
            "'{}' gave {:?}",
            bad,
            err
        );
    }
}

#[test]
fn test_classify_positions() {
    let oracle = oracle();
    assert_eq!(
        classify("Onion", true, &oracle).unwrap(),
        (VarKind::Constant, Category::IngredientBase)
    );
    assert_eq!(
        classify("Onion", false, &oracle).unwrap(),
        (VarKind::Constant, Category::IngredientModifier)
    );
    assert_eq!(
        classify("salty", false, &oracle).unwrap(),
        (VarKind::Constant, Category::Modifier)
    );
    assert_eq!(
        classify("salty", true, &oracle).unwrap(),
        (VarKind::Constant, Category::Modifier)
    );
    assert_eq!(
        classify("i1", false, &oracle).unwrap(),
        (VarKind::Unqualified, Category::IngredientModifier)
    );
    assert_eq!(
        classify("i1:Water", true, &oracle).unwrap(),
        (VarKind::Qualified, Category::IngredientBase)
    );
    assert_eq!(
        classify("o2:salty", false, &oracle).unwrap(),
        (VarKind::Qualified, Category::Collector)
    );
}

#[test]
fn test_modifier_variable_cannot_be_base() {
    let oracle = oracle();
    assert!(classify("m1", true, &oracle).is_err());
    assert!(classify("m1:salty", true, &oracle).is_err());
    assert!(classify("m1", false, &oracle).is_ok());
}
