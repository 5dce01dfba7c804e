//! End-to-end reduction over a small kitchen rule file

use mixrule::{Component, Mixture, ReductionSystem, TagTable};

const RULES: &str = "\
# tags
salty : brined, cured
heat : fried, boiled

# seasoning
o1 salty salty i1 -> o1 salty i1
salty + wet = soggy
chopped +> fried = crispy

# cooking
o1 m1:heat m2:heat i1 -> o1 overcooked i1
(Water) + (o1 i1:Vegetable) -> (o1 boiled i1)
";

fn kitchen() -> ReductionSystem<TagTable> {
    let mut table = TagTable::new();
    table
        .add_ingredient("Onion", ["Vegetable"])
        .add_ingredient("Garlic", ["Vegetable"])
        .add_ingredient("Water", Vec::<String>::new());
    ReductionSystem::from_text(RULES, table).unwrap()
}

fn reduce(text: &str) -> String {
    kitchen()
        .reduce_component(&Component::parse(text).unwrap())
        .unwrap()
        .to_string()
}

fn reduce_mixture(text: &str) -> Mixture {
    kitchen()
        .reduce_mixture(&Mixture::parse(text).unwrap())
        .unwrap()
}

#[test]
fn test_ordered_concise_rule() {
    assert_eq!(reduce("chopped fried Onion"), "crispy Onion");
    assert_eq!(reduce("chopped hot fried Onion"), "crispy hot Onion");
    // 顺序不对时不匹配
    assert_eq!(reduce("fried chopped Onion"), "fried chopped Onion");
}

#[test]
fn test_symmetric_concise_rule() {
    assert_eq!(reduce("wet salty Garlic"), "soggy Garlic");
    assert_eq!(reduce("salty wet Garlic"), "soggy Garlic");
}

#[test]
fn test_alias_qualifiers() {
    // 常量按名字匹配，别名只作用于限定变量
    assert_eq!(reduce("cured brined Onion"), "cured brined Onion");
    assert_eq!(reduce("salty hot salty Onion"), "hot salty Onion");
    assert_eq!(reduce("fried boiled Onion"), "overcooked Onion");
    assert_eq!(reduce("fried Onion"), "fried Onion");
}

#[test]
fn test_mixture_rule_then_component_rule() {
    assert_eq!(
        reduce_mixture("(Water) + (fried Onion)"),
        Mixture::parse("(overcooked Onion)").unwrap()
    );
}

#[test]
fn test_qualifier_picks_the_right_reactant() {
    assert_eq!(
        reduce_mixture("(Water) + (chopped Garlic)"),
        Mixture::parse("(chopped boiled Garlic)").unwrap()
    );
}

#[test]
fn test_unrelated_mixture_is_already_normal() {
    let m = Mixture::parse("(hot Onion) + (cold Garlic)").unwrap();
    assert_eq!(kitchen().reduce_mixture(&m).unwrap(), m);
}
