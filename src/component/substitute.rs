//! Right-hand-side templates and substitution

use std::fmt;
use std::str::FromStr;

use super::bindings::Bindings;
use super::Component;
use crate::error::{RewriteError, RewriteResult};
use crate::token::{parse_tokens, Token};

/// Component-shaped rewrite target that may mention variables
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template {
    tokens: Vec<Token>,
}

impl Template {
    pub fn parse(text: &str) -> RewriteResult<Self> {
        let tokens = parse_tokens(text)?;
        match tokens.last() {
            None => Err(RewriteError::invalid_pattern(text, "empty template")),
            Some(last) => {
                last.check_slot(true)?;
                Ok(Self { tokens })
            }
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Variables mentioned, without duplicates
    pub fn variables(&self) -> Vec<&Token> {
        let mut seen: Vec<&Token> = Vec::new();
        for token in self.tokens.iter().filter(|t| t.is_variable()) {
            if !seen.iter().any(|s| s.name() == token.name()) {
                seen.push(token);
            }
        }
        seen
    }

    pub fn instantiate(
        &self,
        bindings: &Bindings,
    ) -> RewriteResult<Component> {
        substitute(self, bindings)
    }
}

impl fmt::Display for Template {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let words: Vec<&str> = self.tokens.iter().map(Token::as_str).collect();
        f.write_str(&words.join(" "))
    }
}

impl FromStr for Template {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

/// Build a fresh component from `template`
///
/// Constants are copied, variables replaced by their bound constant and
/// collectors spliced in place (an empty collector contributes nothing).
pub fn substitute(
    template: &Template,
    bindings: &Bindings,
) -> RewriteResult<Component> {
    let mut out: Vec<String> = Vec::with_capacity(template.tokens.len());
    for token in &template.tokens {
        if token.is_collector() {
            let values = bindings
                .collected(token.name())
                .ok_or_else(|| unbound(token))?;
            out.extend(values.iter().cloned());
        } else if token.is_variable() {
            let value = bindings.single(token.name()).ok_or_else(|| unbound(token))?;
            out.push(value.to_string());
        } else {
            out.push(token.name().to_string());
        }
    }
    Ok(Component::new(out))
}

fn unbound(token: &Token) -> RewriteError {
    RewriteError::UnboundTemplateVariable {
        variable: token.name().to_string(),
    }
}
