//! Component patterns (rule left-hand sides)
//!
//! ```text
//! [collector header] [& | &&] body [!! dont-match pattern]
//!
//! o1 o2:salty && m1 Onion !! burnt i1
//! ```
//!
//! - header: collector variables (`o1`, `o2:cond`) that receive the target
//!   tokens the body leaves unmatched
//! - strictness: none (any order), `&` (in order, gaps allowed), `&&` (in
//!   order, contiguous once the first token is placed)
//! - body: the tokens to find, ending in a base-capable token
//! - `!!`: a pattern that must *not* match for this one to match

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::condition::Condition;
use crate::error::{RewriteError, RewriteResult};
use crate::token::Token;

const DONT_MATCH: &str = "!!";

/// How strictly body tokens must follow target order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// Any order
    #[default]
    Loose,
    /// `&`: in order, skipping allowed
    Ordered,
    /// `&&`: in order, no skipping after the first match
    Contiguous,
}

impl Strictness {
    fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "&" => Some(Strictness::Ordered),
            "&&" => Some(Strictness::Contiguous),
            _ => None,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Strictness::Loose => "",
            Strictness::Ordered => "&",
            Strictness::Contiguous => "&&",
        }
    }
}

/// Parsed left-hand side over a single component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPattern {
    pub(crate) strictness: Strictness,
    pub(crate) collectors: IndexMap<String, Option<Condition>>,
    pub(crate) body: Vec<Token>,
    pub(crate) dont_match: Option<Box<ComponentPattern>>,
}

impl ComponentPattern {
    pub fn parse(text: &str) -> RewriteResult<Self> {
        let words: Vec<&str> = text.split_whitespace().collect();
        Self::parse_words(text, &words)
    }

    fn parse_words(
        text: &str,
        words: &[&str],
    ) -> RewriteResult<Self> {
        let (main, dont_match) = match words.iter().position(|w| *w == DONT_MATCH) {
            Some(split) => {
                let rest = &words[split + 1..];
                if rest.is_empty() {
                    return Err(RewriteError::invalid_pattern(
                        text,
                        "'!!' must be followed by a pattern",
                    ));
                }
                let veto = Self::parse_words(&rest.join(" "), rest)?;
                (&words[..split], Some(Box::new(veto)))
            }
            None => (words, None),
        };

        let mut rest = main;
        let mut collectors = IndexMap::new();
        while let Some((first, tail)) = rest.split_first() {
            let token = Token::parse(first)?;
            if !token.is_collector() {
                break;
            }
            let name = token.name().to_string();
            if collectors.contains_key(&name) {
                return Err(RewriteError::invalid_pattern(
                    text,
                    format!("collector '{}' declared twice", name),
                ));
            }
            collectors.insert(name, token.qualifier().cloned());
            rest = tail;
        }

        let mut strictness = Strictness::Loose;
        if let Some((first, tail)) = rest.split_first() {
            if let Some(s) = Strictness::from_marker(first) {
                strictness = s;
                rest = tail;
            }
        }

        let mut body = Vec::with_capacity(rest.len());
        for word in rest {
            if Strictness::from_marker(word).is_some() {
                return Err(RewriteError::invalid_pattern(
                    text,
                    format!("'{}' must come right after the collector header", word),
                ));
            }
            if *word == "+" {
                return Err(RewriteError::invalid_token(
                    word.to_string(),
                    "'+' only joins mixture elements",
                ));
            }
            let token = Token::parse(word)?;
            if token.is_collector() {
                return Err(RewriteError::invalid_token(
                    word.to_string(),
                    "collector variables belong in the pattern header",
                ));
            }
            body.push(token);
        }
        if let Some(last) = body.last() {
            last.check_slot(true)?;
        }

        if body.is_empty() && collectors.is_empty() {
            return Err(RewriteError::invalid_pattern(text, "empty pattern"));
        }

        Ok(Self {
            strictness,
            collectors,
            body,
            dont_match,
        })
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    pub fn body(&self) -> &[Token] {
        &self.body
    }

    pub fn dont_match(&self) -> Option<&ComponentPattern> {
        self.dont_match.as_deref()
    }

    /// Declared collectors with their optional qualifiers, in header order
    pub fn collectors(&self) -> impl Iterator<Item = (&str, Option<&Condition>)> {
        self.collectors
            .iter()
            .map(|(name, cond)| (name.as_str(), cond.as_ref()))
    }

    pub fn declares_collector(
        &self,
        name: &str,
    ) -> bool {
        self.collectors.contains_key(name)
    }

    /// Names this pattern can bind on success (body variables and collectors)
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collectors.keys().map(String::as_str).collect();
        for token in &self.body {
            if token.is_variable() && !names.contains(&token.name()) {
                names.push(token.name());
            }
        }
        names
    }
}

impl fmt::Display for ComponentPattern {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut parts: Vec<String> = self
            .collectors
            .iter()
            .map(|(name, cond)| match cond {
                Some(cond) => format!("{}:{}", name, cond),
                None => name.clone(),
            })
            .collect();
        if self.strictness != Strictness::Loose {
            parts.push(self.strictness.marker().to_string());
        }
        parts.extend(self.body.iter().map(Token::to_string));
        if let Some(veto) = &self.dont_match {
            parts.push(DONT_MATCH.to_string());
            parts.push(veto.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}

impl FromStr for ComponentPattern {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentPattern::parse(s)
    }
}
