//! Error types for the rewrite engine
//!
//! A failed match is never an error: matchers return `Option`. Only parse
//! failures and rule-set contract violations travel through [`RewriteError`].

use thiserror::Error;

/// Result alias used throughout the engine
pub type RewriteResult<T> = Result<T, RewriteError>;

/// Rewrite engine errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// Malformed variable or qualifier syntax
    #[error("Invalid token '{token}': {reason}")]
    InvalidToken { token: String, reason: String },

    /// Malformed boolean qualifier
    #[error("Invalid condition '{condition}': {reason}")]
    InvalidCondition { condition: String, reason: String },

    /// Structurally invalid component pattern
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Line that is not a recognised rule form
    #[error("Invalid rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    /// Right-hand side mentions a variable the left-hand side never binds
    #[error("Template variable '{variable}' is not bound by the left-hand side")]
    UnboundTemplateVariable { variable: String },

    /// Mixture rule relies on a collector no reactant declares
    #[error("Collector '{collector}' is not declared by any reactant of the mixture rule")]
    IllegalCollectorInMixtureContext { collector: String },

    /// Iteration cap exceeded, the rule set most likely contains a cycle
    #[error("Reduction diverged after {limit} steps (rule: {rule}, state: {state})")]
    DivergingReduction {
        rule: String,
        state: String,
        limit: usize,
    },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<RewriteError>,
    },
}

impl RewriteError {
    pub(crate) fn invalid_token(
        token: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RewriteError::InvalidToken {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_pattern(
        pattern: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RewriteError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_rule(
        rule: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RewriteError::InvalidRule {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Attach a 1-based line number
    pub fn at_line(
        self,
        line: usize,
    ) -> Self {
        RewriteError::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// Strip any line wrapper
    pub fn root(&self) -> &RewriteError {
        match self {
            RewriteError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether this error signals a non-terminating rule set
    pub fn is_diverging(&self) -> bool {
        matches!(self.root(), RewriteError::DivergingReduction { .. })
    }
}
