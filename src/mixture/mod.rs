//! Mixtures
//!
//! A mixture is an unordered multiset of components, written as
//! parenthesised components joined by `+`:
//!
//! ```text
//! (salty Onion) + (Water) + (Water)
//! ```
//!
//! Equal components are distinct elements. Equality ignores order but counts
//! duplicates.

pub mod matcher;

pub use matcher::{match_mixture, MixtureMatcher, MixturePattern};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::error::{RewriteError, RewriteResult};

/// Unordered collection of components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mixture {
    components: Vec<Component>,
}

impl Mixture {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Parse `(a b) + (c)`; the parentheses are optional around a component
    pub fn parse(text: &str) -> RewriteResult<Self> {
        let components = split_groups(text)?
            .into_iter()
            .map(Component::parse)
            .collect::<RewriteResult<Vec<_>>>()?;
        Ok(Self { components })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn into_components(self) -> Vec<Component> {
        self.components
    }

    pub fn push(
        &mut self,
        component: Component,
    ) {
        self.components.push(component);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    fn sorted(&self) -> Vec<&Component> {
        let mut sorted: Vec<&Component> = self.components.iter().collect();
        sorted.sort();
        sorted
    }
}

impl PartialEq for Mixture {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.components.len() == other.components.len() && self.sorted() == other.sorted()
    }
}

impl Eq for Mixture {}

impl Hash for Mixture {
    fn hash<H: Hasher>(
        &self,
        state: &mut H,
    ) {
        self.sorted().hash(state);
    }
}

impl From<Vec<Component>> for Mixture {
    fn from(components: Vec<Component>) -> Self {
        Self::new(components)
    }
}

impl FromIterator<Component> for Mixture {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Mixture {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl fmt::Display for Mixture {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write_groups(f, &self.components)
    }
}

impl FromStr for Mixture {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mixture::parse(s)
    }
}

/// Write `(a) + (b) + ...`
pub(crate) fn write_groups<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" + ")?;
        }
        write!(f, "({})", item)?;
    }
    Ok(())
}

/// Split `(a) + (b c) + d` into its top-level groups
///
/// Parentheses nest, so qualifiers such as `i1:!(a|b)` stay inside their
/// group. A group without parentheses runs up to the next top-level `+`.
pub(crate) fn split_groups(text: &str) -> RewriteResult<Vec<&str>> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut wrapped = false;
    // a closed `(...)` group must be followed by `+` or the end
    let mut closed = false;

    for (i, c) in text.char_indices() {
        if closed && c != '+' && !c.is_whitespace() {
            return Err(RewriteError::invalid_pattern(text, "expected '+' after ')'"));
        }
        match c {
            '(' => {
                if depth == 0 && text[start..i].trim().is_empty() {
                    start = i + 1;
                    wrapped = true;
                }
                depth += 1;
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| RewriteError::invalid_pattern(text, "unbalanced ')'"))?;
                if depth == 0 && wrapped {
                    groups.push(text[start..i].trim());
                    start = i + 1;
                    wrapped = false;
                    closed = true;
                }
            }
            '+' if depth == 0 => {
                let pending = text[start..i].trim();
                if !pending.is_empty() {
                    groups.push(pending);
                } else if groups.is_empty() || text[..i].trim_end().ends_with('+') {
                    return Err(RewriteError::invalid_pattern(text, "empty mixture element"));
                }
                start = i + 1;
                closed = false;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(RewriteError::invalid_pattern(text, "missing ')'"));
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        groups.push(tail);
    } else if text.trim_end().ends_with('+') {
        return Err(RewriteError::invalid_pattern(text, "empty mixture element"));
    }
    if groups.iter().any(|g| g.is_empty()) || groups.is_empty() {
        return Err(RewriteError::invalid_pattern(text, "empty mixture element"));
    }
    Ok(groups)
}

/// Whether `text` has a `+` outside every pair of parentheses
pub(crate) fn has_top_level_plus(text: &str) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '+' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests;
