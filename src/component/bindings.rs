//! Match bindings
//!
//! Variable name → bound constant(s). Modifier and ingredient variables bind a
//! single constant, collectors bind the ordered list of leftovers they kept.

use std::fmt;

use indexmap::IndexMap;

/// Value bound to one variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    Single(String),
    Collected(Vec<String>),
}

impl fmt::Display for Binding {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Binding::Single(value) => f.write_str(value),
            Binding::Collected(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

/// Result of a successful match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    map: IndexMap<String, Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Binding> {
        self.map.get(name)
    }

    /// Constant bound to a modifier/ingredient variable
    pub fn single(
        &self,
        name: &str,
    ) -> Option<&str> {
        match self.map.get(name) {
            Some(Binding::Single(value)) => Some(value),
            _ => None,
        }
    }

    /// Leftovers bound to a collector
    pub fn collected(
        &self,
        name: &str,
    ) -> Option<&[String]> {
        match self.map.get(name) {
            Some(Binding::Collected(values)) => Some(values),
            _ => None,
        }
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn insert(
        &mut self,
        name: impl Into<String>,
        binding: Binding,
    ) {
        self.map.insert(name.into(), binding);
    }

    /// Every name bound in both maps resolves to the same value
    pub fn agrees_with(
        &self,
        other: &Bindings,
    ) -> bool {
        other
            .map
            .iter()
            .all(|(name, value)| self.map.get(name).map_or(true, |mine| mine == value))
    }

    /// Add the bindings of `other` that are new here; returns the names added
    pub(crate) fn absorb(
        &mut self,
        other: &Bindings,
    ) -> Vec<String> {
        let mut added = Vec::new();
        for (name, value) in &other.map {
            if !self.map.contains_key(name) {
                self.map.insert(name.clone(), value.clone());
                added.push(name.clone());
            }
        }
        added
    }

    /// Undo an [`absorb`](Self::absorb)
    pub(crate) fn forget(
        &mut self,
        names: &[String],
    ) {
        for name in names {
            self.map.shift_remove(name);
        }
    }
}

impl fmt::Display for Bindings {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", name, value)?;
        }
        write!(f, "}}")
    }
}
