//! Reduction tests


use crate::component::Component;
use crate::mixture::Mixture;
use crate::oracle::TrivialOracle;

pub(super) fn oracle() -> TrivialOracle {
    TrivialOracle::new(["Onion", "Water", "Garlic"])
}

pub(super) fn component(text: &str) -> Component {
    Component::parse(text).unwrap()
}

pub(super) fn mixture(text: &str) -> Mixture {
    Mixture::parse(text).unwrap()
}
