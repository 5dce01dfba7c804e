//! Mixture patterns and the mixture matcher
//!
//! Every pattern element must consume a distinct target component, and the
//! bindings of all elements must agree on shared variable names. The search
//! takes the first unplaced element, tries it against each unused component
//! and backtracks on failure, so it is exhaustive over pairings.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use super::{split_groups, write_groups, Mixture};
use crate::component::{Bindings, Component, ComponentMatcher, ComponentPattern};
use crate::error::{RewriteError, RewriteResult};
use crate::oracle::TagOracle;

/// Left-hand side of a mixture rule: one pattern per reactant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixturePattern {
    elements: Vec<ComponentPattern>,
}

impl MixturePattern {
    pub fn new(elements: Vec<ComponentPattern>) -> Self {
        Self { elements }
    }

    /// Parse `(p1) + (p2) + ...`
    pub fn parse(text: &str) -> RewriteResult<Self> {
        let elements = split_groups(text)?
            .into_iter()
            .map(ComponentPattern::parse)
            .collect::<RewriteResult<Vec<_>>>()?;
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[ComponentPattern] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether any element declares collector `name`
    pub fn declares_collector(
        &self,
        name: &str,
    ) -> bool {
        self.elements.iter().any(|p| p.declares_collector(name))
    }

    /// Union of the names bound by the elements
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.elements.iter().flat_map(ComponentPattern::bound_names) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl fmt::Display for MixturePattern {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write_groups(f, &self.elements)
    }
}

impl FromStr for MixturePattern {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MixturePattern::parse(s)
    }
}

/// Matches mixture patterns against mixtures
///
/// The search is complete over pairings of pattern elements with components,
/// but not over alternative matches of a single pair: each pair keeps only the
/// first binding the component matcher finds. `(m1 Onion) + (m1 Water)` does
/// not match `(hot cold Onion) + (cold Water)`, because the first pair binds
/// `m1 = hot`.
#[derive(Debug, Clone, Copy)]
pub struct MixtureMatcher<'o, O: ?Sized> {
    components: ComponentMatcher<'o, O>,
}

impl<'o, O: TagOracle + ?Sized> MixtureMatcher<'o, O> {
    pub fn new(oracle: &'o O) -> Self {
        Self {
            components: ComponentMatcher::new(oracle),
        }
    }

    /// Match `pattern` against `target`
    ///
    /// Returns the combined bindings and the components no element consumed,
    /// in their original order.
    pub fn match_mixture(
        &self,
        pattern: &MixturePattern,
        target: &Mixture,
    ) -> Option<(Bindings, Mixture)> {
        let mut used = vec![false; target.len()];
        let mut bindings = Bindings::new();
        if !self.assign(&pattern.elements, target.components(), &mut used, &mut bindings) {
            trace!("mixture '{}' does not match '{}'", pattern, target);
            return None;
        }

        let leftovers: Mixture = target
            .iter()
            .zip(&used)
            .filter(|(_, used)| !**used)
            .map(|(c, _)| c.clone())
            .collect();
        trace!(
            "mixture '{}' matched '{}' with {}, leftovers '{}'",
            pattern,
            target,
            bindings,
            leftovers
        );
        Some((bindings, leftovers))
    }

    fn assign(
        &self,
        elements: &[ComponentPattern],
        targets: &[Component],
        used: &mut [bool],
        bindings: &mut Bindings,
    ) -> bool {
        let Some((head, rest)) = elements.split_first() else {
            return true;
        };

        for (index, target) in targets.iter().enumerate() {
            if used[index] {
                continue;
            }
            let Some(found) = self.components.match_component(head, target) else {
                continue;
            };
            if !bindings.agrees_with(&found) {
                continue;
            }

            let added = bindings.absorb(&found);
            used[index] = true;
            if self.assign(rest, targets, used, bindings) {
                return true;
            }
            used[index] = false;
            bindings.forget(&added);
        }
        false
    }
}

/// Convenience wrapper around [`MixtureMatcher`]
pub fn match_mixture<O: TagOracle + ?Sized>(
    pattern: &MixturePattern,
    target: &Mixture,
    oracle: &O,
) -> Option<(Bindings, Mixture)> {
    MixtureMatcher::new(oracle).match_mixture(pattern, target)
}
