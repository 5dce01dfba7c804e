//! Components
//!
//! A component is a base token preceded by the modifiers applied to it:
//!
//! ```text
//! soggy salty crappy Onion
//! ```
//!
//! Components are plain values. Rule application always builds new ones, a
//! failed match never touches its input.

pub mod bindings;
pub mod matcher;
pub mod pattern;
pub mod substitute;

pub use bindings::{Binding, Bindings};
pub use matcher::{match_component, ComponentMatcher};
pub use pattern::{ComponentPattern, Strictness};
pub use substitute::{substitute, Template};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RewriteError, RewriteResult};

/// Ordered modifier stack plus base
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Component {
    tokens: Vec<String>,
}

impl Component {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse whitespace-separated constants
    pub fn parse(text: &str) -> RewriteResult<Self> {
        let component = Component::new(text.split_whitespace());
        if component.is_empty() {
            return Err(RewriteError::invalid_pattern(
                text,
                "a component needs at least a base",
            ));
        }
        Ok(component)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The base token (last one)
    pub fn base(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Everything in front of the base
    pub fn modifiers(&self) -> &[String] {
        match self.tokens.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Component {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl FromStr for Component {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Component::parse(s)
    }
}

#[cfg(test)]
mod tests;
