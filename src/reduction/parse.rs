//! Rule-definition text
//!
//! One definition per line, `#` starts a comment:
//!
//! ```text
//! # component and mixture rules
//! o1 salty salty i1 -> o1 salty i1
//! (m1 i1:Water) + (i2) -> (m1 wet i2)
//!
//! # concise rules
//! salty + wet = soggy        # o1 salty wet i1 -> soggy o1 i1
//! chopped +> fried = crispy  # o1 & chopped fried i1 -> crispy o1 i1
//!
//! # tag aliases
//! salty : brined, cured
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{RewriteError, RewriteResult};
use crate::oracle::TagTable;
use crate::token::{Token, VarClass};

use super::rules::{ComponentRule, Rule};

/// `tag : member, member, ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAlias {
    tag: String,
    members: Vec<String>,
}

impl TagAlias {
    pub fn new<I, S>(
        tag: impl Into<String>,
        members: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tag: tag.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn parse(text: &str) -> RewriteResult<Self> {
        let Some((tag, members)) = text.split_once(':') else {
            return Err(RewriteError::invalid_rule(text, "missing ':'"));
        };
        let tag = tag.trim();
        if tag.is_empty() || tag.contains(char::is_whitespace) {
            return Err(RewriteError::invalid_rule(text, "alias tag must be a single word"));
        }
        let members: Vec<&str> = members.split(',').map(str::trim).collect();
        if members
            .iter()
            .any(|m| m.is_empty() || m.contains(char::is_whitespace))
        {
            return Err(RewriteError::invalid_rule(
                text,
                "alias members must be single words separated by ','",
            ));
        }
        Ok(Self::new(tag, members))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }
}

impl fmt::Display for TagAlias {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} : {}", self.tag, self.members.join(", "))
    }
}

/// Parsed rule-definition text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    aliases: Vec<TagAlias>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole definition file
    ///
    /// Errors carry the 1-based line number.
    pub fn parse(text: &str) -> RewriteResult<Self> {
        let mut set = RuleSet::new();
        for (index, raw) in text.lines().enumerate() {
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }
            set.parse_line(line).map_err(|e| e.at_line(index + 1))?;
        }
        Ok(set)
    }

    fn parse_line(
        &mut self,
        line: &str,
    ) -> RewriteResult<()> {
        if line.contains("->") {
            self.rules.push(Rule::parse(line)?);
        } else if line.contains('=') {
            self.rules.push(Rule::Component(expand_concise(line)?));
        } else if line.contains(':') {
            self.aliases.push(TagAlias::parse(line)?);
        } else {
            return Err(RewriteError::invalid_rule(
                line,
                "expected a rule ('->' or '='), or a tag alias (':')",
            ));
        }
        Ok(())
    }

    pub fn push(
        &mut self,
        rule: impl Into<Rule>,
    ) -> &mut Self {
        self.rules.push(rule.into());
        self
    }

    pub fn push_alias(
        &mut self,
        alias: TagAlias,
    ) -> &mut Self {
        self.aliases.push(alias);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn aliases(&self) -> &[TagAlias] {
        &self.aliases
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Register every alias with `table`
    pub fn seed_tags(
        &self,
        table: &mut TagTable,
    ) {
        for alias in &self.aliases {
            table.add_alias(alias.tag.as_str(), &alias.members);
        }
    }
}

impl fmt::Display for RuleSet {
    /// Aliases first, then rules in definition order
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for alias in &self.aliases {
            writeln!(f, "{}", alias)?;
        }
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl FromStr for RuleSet {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleSet::parse(s)
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(at) => &line[..at],
        None => line,
    }
}

/// Expand `a + b = r` / `a +> b = r` into a component rule
///
/// `a + b = r` becomes `oK a b iJ -> r oK iJ`, `+>` adds the `&` marker.
/// `K` and `J` are one above the highest collector and ingredient index the
/// line already uses.
fn expand_concise(line: &str) -> RewriteResult<ComponentRule> {
    let Some((lhs, rhs)) = line.split_once('=') else {
        return Err(RewriteError::invalid_rule(line, "missing '='"));
    };
    let rhs = rhs.trim();
    if rhs.is_empty() || rhs.contains('=') {
        return Err(RewriteError::invalid_rule(line, "expected exactly one '=' followed by a result"));
    }

    let (parts, marker): (Vec<&str>, &str) = if lhs.contains("+>") {
        if lhs.replace("+>", "").contains('+') {
            return Err(RewriteError::invalid_rule(line, "'+' and '+>' cannot be mixed"));
        }
        (lhs.split("+>").map(str::trim).collect(), "& ")
    } else {
        (lhs.split('+').map(str::trim).collect(), "")
    };
    if parts
        .iter()
        .any(|p| p.is_empty() || p.contains(char::is_whitespace))
    {
        return Err(RewriteError::invalid_rule(line, "each ingredient of a concise rule is one token"));
    }

    let mut next_collector = 1;
    let mut next_ingredient = 1;
    for word in parts.iter().copied().chain(rhs.split_whitespace()) {
        let token = Token::parse(word)?;
        let Some(index) = token.name().get(1..).and_then(|i| i.parse::<usize>().ok()) else {
            continue;
        };
        match token.class() {
            Some(VarClass::Collector) => next_collector = next_collector.max(index + 1),
            Some(VarClass::Ingredient) => next_ingredient = next_ingredient.max(index + 1),
            _ => {}
        }
    }

    let collector = format!("o{}", next_collector);
    let ingredient = format!("i{}", next_ingredient);
    let expanded = format!(
        "{collector} {marker}{body} {ingredient} -> {rhs} {collector} {ingredient}",
        body = parts.join(" "),
    );
    ComponentRule::parse(&expanded)
}
