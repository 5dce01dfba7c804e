//! Property tests

use proptest::prelude::*;

use mixrule::{Component, ComponentPattern, ComponentRule, Mixture, ReductionSystem, RuleSet, TrivialOracle};

const RULES: &str = "\
o1 salty salty i1 -> o1 salty i1
salty + wet = soggy
(Water) + (o1 i1) -> (o1 wet i1)
";

fn oracle() -> TrivialOracle {
    TrivialOracle::new(["Onion", "Water", "Garlic"])
}

fn component() -> impl Strategy<Value = Component> {
    (
        prop::collection::vec(prop::sample::select(vec!["salty", "wet", "hot", "chopped"]), 0..4),
        prop::sample::select(vec!["Onion", "Water", "Garlic"]),
    )
        .prop_map(|(mut tokens, base)| {
            tokens.push(base);
            Component::new(tokens)
        })
}

fn mixture() -> impl Strategy<Value = Mixture> {
    prop::collection::vec(component(), 1..4).prop_map(Mixture::new)
}

fn pattern_text() -> impl Strategy<Value = String> {
    (
        prop::sample::subsequence(vec!["o1", "o2:salty|wet", "o3:!(hot&wet)"], 0..=3),
        prop::sample::select(vec!["", "&", "&&"]),
        prop::collection::vec(prop::sample::select(vec!["salty", "m1", "m2:hot", "i2", "Garlic"]), 0..3),
        prop::sample::select(vec!["i1", "i1:Vegetable&!Frozen", "Onion"]),
        prop::option::of(prop::sample::select(vec!["burnt i1", "m9 Water"])),
    )
        .prop_map(|(collectors, marker, body, base, veto)| {
            let mut words: Vec<&str> = collectors;
            if !marker.is_empty() {
                words.push(marker);
            }
            words.extend(body);
            words.push(base);
            if let Some(veto) = veto {
                words.push("!!");
                words.push(veto);
            }
            words.join(" ")
        })
}

proptest! {
    #[test]
    fn prop_reduction_is_idempotent(m in mixture()) {
        let system = ReductionSystem::from_rule_set(RuleSet::parse(RULES).unwrap(), oracle());
        let once = system.reduce_mixture(&m).unwrap();
        let twice = system.reduce_mixture(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_rule_is_no_op_without_match(c in component()) {
        let oracle = oracle();
        let rule = ComponentRule::parse("o1 chopped i1 -> o1 diced i1").unwrap();
        if rule.try_apply(&c, &oracle).unwrap().is_none() {
            prop_assert_eq!(rule.apply(&c, &oracle).unwrap(), c);
        }
    }

    #[test]
    fn prop_pattern_roundtrip(text in pattern_text()) {
        let pattern = ComponentPattern::parse(&text).unwrap();
        prop_assert_eq!(pattern.to_string(), text);
    }

    #[test]
    fn prop_mixture_order_does_not_matter(m in mixture()) {
        let mut reversed = m.components().to_vec();
        reversed.reverse();
        prop_assert_eq!(Mixture::new(reversed), m);
    }
}
