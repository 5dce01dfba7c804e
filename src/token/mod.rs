//! Token classification
//!
//! Lexical convention:
//!
//! ```text
//! m<digits>[:cond]   modifier variable
//! i<digits>[:cond]   ingredient variable
//! o<digits>[:cond]   collector variable (pattern header / templates only)
//! anything else      constant
//! ```
//!
//! The slot category of a token also depends on its position (the last token
//! of a component is its base) and, for constants, on the [`TagOracle`].

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::condition::Condition;
use crate::error::{RewriteError, RewriteResult};
use crate::oracle::TagOracle;

static VARIABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>[mio])(?P<index>[0-9]+)(?::(?P<qualifier>.*))?$")
        .expect("variable pattern is valid")
});

/// Whether a token is a constant or a (qualified) variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Constant,
    Unqualified,
    Qualified,
}

/// Slot a token occupies in a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Modifier that is not an ingredient
    Modifier,
    /// Ingredient used as a modifier
    IngredientModifier,
    /// Ingredient in the base slot
    IngredientBase,
    /// Leftover collector
    Collector,
}

impl Category {
    pub fn is_base(self) -> bool {
        self == Category::IngredientBase
    }
}

/// Variable family given by the lexical prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarClass {
    Modifier,
    Ingredient,
    Collector,
}

impl VarClass {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "m" => Some(VarClass::Modifier),
            "i" => Some(VarClass::Ingredient),
            "o" => Some(VarClass::Collector),
            _ => None,
        }
    }
}

/// A lexically validated token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    text: String,
    name: String,
    class: Option<VarClass>,
    qualifier: Option<Condition>,
}

impl Token {
    /// Parse one whitespace-free token
    pub fn parse(text: &str) -> RewriteResult<Token> {
        if text.is_empty() {
            return Err(RewriteError::invalid_token(text, "empty token"));
        }
        if text.chars().any(char::is_whitespace) {
            return Err(RewriteError::invalid_token(text, "tokens cannot contain whitespace"));
        }

        let Some(caps) = VARIABLE_RE.captures(text) else {
            if text.contains(':') {
                return Err(RewriteError::invalid_token(
                    text,
                    "a qualifier must follow a variable such as 'i1' or 'm2'",
                ));
            }
            return Ok(Token::constant(text));
        };

        let class = VarClass::from_prefix(&caps["prefix"]);
        let name = format!("{}{}", &caps["prefix"], &caps["index"]);
        let qualifier = match caps.name("qualifier") {
            None => None,
            Some(q) if q.as_str().is_empty() => {
                return Err(RewriteError::invalid_token(text, "empty qualifier"));
            }
            Some(q) => Some(Condition::parse(q.as_str()).map_err(|e| match e {
                RewriteError::InvalidCondition { reason, .. } => {
                    RewriteError::invalid_token(text, format!("bad qualifier: {}", reason))
                }
                other => other,
            })?),
        };

        Ok(Token {
            text: text.to_string(),
            name,
            class,
            qualifier,
        })
    }

    /// Build a constant token without validation
    pub fn constant(name: impl Into<String>) -> Token {
        let name = name.into();
        Token {
            text: name.clone(),
            name,
            class: None,
            qualifier: None,
        }
    }

    /// Variable name, or the constant itself (qualifier stripped)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn qualifier(&self) -> Option<&Condition> {
        self.qualifier.as_ref()
    }

    pub fn class(&self) -> Option<VarClass> {
        self.class
    }

    pub fn kind(&self) -> VarKind {
        match (&self.class, &self.qualifier) {
            (None, _) => VarKind::Constant,
            (Some(_), None) => VarKind::Unqualified,
            (Some(_), Some(_)) => VarKind::Qualified,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.class.is_some()
    }

    pub fn is_collector(&self) -> bool {
        self.class == Some(VarClass::Collector)
    }

    /// Slot category at the given position
    pub fn category<O: TagOracle + ?Sized>(
        &self,
        is_last: bool,
        oracle: &O,
    ) -> Category {
        match self.class {
            Some(VarClass::Modifier) => Category::Modifier,
            Some(VarClass::Collector) => Category::Collector,
            Some(VarClass::Ingredient) => ingredient_category(is_last),
            None => constant_category(&self.name, is_last, oracle),
        }
    }

    /// Reject a modifier variable in the base slot
    pub(crate) fn check_slot(
        &self,
        is_last: bool,
    ) -> RewriteResult<()> {
        if is_last && self.class == Some(VarClass::Modifier) {
            return Err(RewriteError::invalid_token(
                &self.text,
                "a modifier variable cannot stand in the base slot",
            ));
        }
        Ok(())
    }
}

/// Slot category of a constant at the given position
pub fn constant_category<O: TagOracle + ?Sized>(
    name: &str,
    is_last: bool,
    oracle: &O,
) -> Category {
    if oracle.is_base(name) {
        ingredient_category(is_last)
    } else {
        Category::Modifier
    }
}

fn ingredient_category(is_last: bool) -> Category {
    if is_last {
        Category::IngredientBase
    } else {
        Category::IngredientModifier
    }
}

impl fmt::Display for Token {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Classify a token string at a position
pub fn classify<O: TagOracle + ?Sized>(
    token: &str,
    is_last: bool,
    oracle: &O,
) -> RewriteResult<(VarKind, Category)> {
    let token = Token::parse(token)?;
    token.check_slot(is_last)?;
    Ok((token.kind(), token.category(is_last, oracle)))
}

/// Parse a whitespace-separated token sequence
pub(crate) fn parse_tokens(text: &str) -> RewriteResult<Vec<Token>> {
    text.split_whitespace().map(Token::parse).collect()
}

#[cfg(test)]
mod tests;
