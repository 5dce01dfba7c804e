//! Tag oracle
//!
//! The engine never decides on its own what a constant "is". It asks a
//! [`TagOracle`] two questions: can this name stand as the base of a
//! component, and which tags does this constant carry. Qualified variables
//! and collector qualifiers are evaluated against those tags.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

/// Type/tag information source consumed by the matchers
pub trait TagOracle {
    /// Tags carried by a constant token
    fn tags_of(
        &self,
        name: &str,
    ) -> HashSet<String>;

    /// Whether `name` is an ingredient (may stand as a component base)
    fn is_base(
        &self,
        name: &str,
    ) -> bool;

    /// Whether the constant carries `tag`
    fn has_tag(
        &self,
        name: &str,
        tag: &str,
    ) -> bool {
        self.tags_of(name).contains(tag)
    }
}

impl<T: TagOracle + ?Sized> TagOracle for &T {
    fn tags_of(
        &self,
        name: &str,
    ) -> HashSet<String> {
        (**self).tags_of(name)
    }

    fn is_base(
        &self,
        name: &str,
    ) -> bool {
        (**self).is_base(name)
    }
}

impl<T: TagOracle + ?Sized> TagOracle for Box<T> {
    fn tags_of(
        &self,
        name: &str,
    ) -> HashSet<String> {
        (**self).tags_of(name)
    }

    fn is_base(
        &self,
        name: &str,
    ) -> bool {
        (**self).is_base(name)
    }
}

impl<T: TagOracle + ?Sized> TagOracle for Arc<T> {
    fn tags_of(
        &self,
        name: &str,
    ) -> HashSet<String> {
        (**self).tags_of(name)
    }

    fn is_base(
        &self,
        name: &str,
    ) -> bool {
        (**self).is_base(name)
    }
}

/// Fixed oracle for tests
///
/// Every constant `x` carries the tags `x` and `x_tag`; only the listed names
/// are ingredients.
#[derive(Debug, Clone, Default)]
pub struct TrivialOracle {
    ingredients: HashSet<String>,
}

impl TrivialOracle {
    pub fn new<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

impl TagOracle for TrivialOracle {
    fn tags_of(
        &self,
        name: &str,
    ) -> HashSet<String> {
        [name.to_string(), format!("{}_tag", name)]
            .into_iter()
            .collect()
    }

    fn is_base(
        &self,
        name: &str,
    ) -> bool {
        self.ingredients.contains(name)
    }
}

/// In-memory oracle built from resolved ingredients and tag aliases
///
/// An ingredient carries its own name and the names of everything it was
/// derived from, so `i1:Vegetable` accepts `Onion` once `Onion` is registered
/// with `Vegetable` among its ancestors. Tag aliases (`salty : brined, cured`)
/// attach a tag to plain modifier constants.
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    ingredients: IndexMap<String, IndexSet<String>>,
    aliases: IndexMap<String, IndexSet<String>>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an ingredient with its already-resolved ancestors
    pub fn add_ingredient<I, S>(
        &mut self,
        name: impl Into<String>,
        ancestors: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients
            .entry(name.into())
            .or_default()
            .extend(ancestors.into_iter().map(Into::<String>::into));
        self
    }

    /// Attach `tag` to every constant in `members`
    pub fn add_alias<I, S>(
        &mut self,
        tag: impl Into<String>,
        members: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases
            .entry(tag.into())
            .or_default()
            .extend(members.into_iter().map(Into::<String>::into));
        self
    }

    /// Registered ingredient names, in registration order
    pub fn ingredients(&self) -> impl Iterator<Item = &str> {
        self.ingredients.keys().map(String::as_str)
    }

    /// Alias tags that apply to `name`, sorted
    pub fn aliases_of(
        &self,
        name: &str,
    ) -> BTreeSet<&str> {
        self.aliases
            .iter()
            .filter(|(_, members)| members.contains(name))
            .map(|(tag, _)| tag.as_str())
            .collect()
    }
}

impl TagOracle for TagTable {
    fn tags_of(
        &self,
        name: &str,
    ) -> HashSet<String> {
        let mut tags = HashSet::new();
        tags.insert(name.to_string());
        if let Some(ancestors) = self.ingredients.get(name) {
            tags.extend(ancestors.iter().cloned());
        }
        tags.extend(self.aliases_of(name).into_iter().map(str::to_string));
        tags
    }

    fn is_base(
        &self,
        name: &str,
    ) -> bool {
        self.ingredients.contains_key(name)
    }
}

#[cfg(test)]
mod tests;
