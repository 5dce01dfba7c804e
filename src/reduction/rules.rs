//! Reduction rules
//!
//! ```text
//! o1 salty salty i1 -> o1 salty i1                 component rule
//! (m1 i1:Water) + (i2) -> (m1 wet i2) + (m1 Water)  mixture rule
//! ```
//!
//! Applying a rule whose left-hand side does not match returns the input
//! unchanged. Right-hand sides are checked against the left-hand side when
//! the rule is built, so substitution cannot meet an unbound variable.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::component::{substitute, Component, ComponentMatcher, ComponentPattern, Template};
use crate::error::{RewriteError, RewriteResult};
use crate::mixture::{
    has_top_level_plus, split_groups, write_groups, Mixture, MixtureMatcher, MixturePattern,
};
use crate::oracle::TagOracle;
use crate::token::Token;

const ARROW: &str = "->";

/// Rewrites a single component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRule {
    lhs: ComponentPattern,
    rhs: Template,
}

impl ComponentRule {
    pub fn new(
        lhs: ComponentPattern,
        rhs: Template,
    ) -> RewriteResult<Self> {
        let bound = lhs.bound_names();
        for token in rhs.variables() {
            let declared = if token.is_collector() {
                lhs.declares_collector(token.name())
            } else {
                bound.contains(&token.name())
            };
            if !declared {
                return Err(unbound(token));
            }
        }
        Ok(Self { lhs, rhs })
    }

    /// Parse `pattern -> template`
    pub fn parse(text: &str) -> RewriteResult<Self> {
        let (lhs, rhs) = split_arrow(text)?;
        Self::new(ComponentPattern::parse(lhs)?, Template::parse(rhs)?)
    }

    pub fn lhs(&self) -> &ComponentPattern {
        &self.lhs
    }

    pub fn rhs(&self) -> &Template {
        &self.rhs
    }

    /// `None` when the left-hand side does not match
    pub fn try_apply<O: TagOracle + ?Sized>(
        &self,
        component: &Component,
        oracle: &O,
    ) -> RewriteResult<Option<Component>> {
        match ComponentMatcher::new(oracle).match_component(&self.lhs, component) {
            None => Ok(None),
            Some(bindings) => substitute(&self.rhs, &bindings).map(Some),
        }
    }

    /// Rewrite `component`, or return it unchanged
    pub fn apply<O: TagOracle + ?Sized>(
        &self,
        component: &Component,
        oracle: &O,
    ) -> RewriteResult<Component> {
        match self.try_apply(component, oracle)? {
            Some(out) => {
                if &out != component {
                    debug!("rule '{}' turned '{}' into '{}'", self, component, out);
                }
                Ok(out)
            }
            None => Ok(component.clone()),
        }
    }
}

impl fmt::Display for ComponentRule {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, ARROW, self.rhs)
    }
}

impl FromStr for ComponentRule {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentRule::parse(s)
    }
}

/// Consumes one component per reactant pattern and adds the products
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixtureRule {
    lhs: MixturePattern,
    rhs: Vec<Template>,
}

impl MixtureRule {
    /// Build a mixture rule
    ///
    /// A product may only splice collectors some reactant declares;
    /// otherwise it would swallow modifiers of an unknown component.
    pub fn new(
        lhs: MixturePattern,
        rhs: Vec<Template>,
    ) -> RewriteResult<Self> {
        let bound = lhs.bound_names();
        for token in rhs.iter().flat_map(Template::variables) {
            if token.is_collector() {
                if !lhs.declares_collector(token.name()) {
                    return Err(RewriteError::IllegalCollectorInMixtureContext {
                        collector: token.name().to_string(),
                    });
                }
            } else if !bound.contains(&token.name()) {
                return Err(unbound(token));
            }
        }
        Ok(Self { lhs, rhs })
    }

    /// Parse `(p1) + (p2) -> (t1) + (t2)`
    pub fn parse(text: &str) -> RewriteResult<Self> {
        let (lhs, rhs) = split_arrow(text)?;
        let products = split_groups(rhs)?
            .into_iter()
            .map(Template::parse)
            .collect::<RewriteResult<Vec<_>>>()?;
        Self::new(MixturePattern::parse(lhs)?, products)
    }

    pub fn lhs(&self) -> &MixturePattern {
        &self.lhs
    }

    pub fn rhs(&self) -> &[Template] {
        &self.rhs
    }

    /// `None` when the reactants are not all present
    pub fn try_apply<O: TagOracle + ?Sized>(
        &self,
        mixture: &Mixture,
        oracle: &O,
    ) -> RewriteResult<Option<Mixture>> {
        let Some((bindings, leftovers)) = MixtureMatcher::new(oracle).match_mixture(&self.lhs, mixture)
        else {
            return Ok(None);
        };
        let mut out = self
            .rhs
            .iter()
            .map(|template| substitute(template, &bindings))
            .collect::<RewriteResult<Vec<_>>>()?;
        out.extend(leftovers.into_components());
        Ok(Some(Mixture::new(out)))
    }

    /// Rewrite `mixture`, or return it unchanged
    pub fn apply<O: TagOracle + ?Sized>(
        &self,
        mixture: &Mixture,
        oracle: &O,
    ) -> RewriteResult<Mixture> {
        match self.try_apply(mixture, oracle)? {
            Some(out) => {
                if &out != mixture {
                    debug!("rule '{}' turned '{}' into '{}'", self, mixture, out);
                }
                Ok(out)
            }
            None => Ok(mixture.clone()),
        }
    }
}

impl fmt::Display for MixtureRule {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} {} ", self.lhs, ARROW)?;
        write_groups(f, &self.rhs)
    }
}

impl FromStr for MixtureRule {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MixtureRule::parse(s)
    }
}

/// Either kind of rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Component(ComponentRule),
    Mixture(MixtureRule),
}

impl Rule {
    /// A left-hand side starting with `(` or holding a top-level `+` makes a
    /// mixture rule
    pub fn parse(text: &str) -> RewriteResult<Self> {
        let (lhs, _) = split_arrow(text)?;
        if lhs.starts_with('(') || has_top_level_plus(lhs) {
            MixtureRule::parse(text).map(Rule::Mixture)
        } else {
            ComponentRule::parse(text).map(Rule::Component)
        }
    }

    pub fn is_component_rule(&self) -> bool {
        matches!(self, Rule::Component(_))
    }

    /// Apply to a whole mixture
    ///
    /// Component rules act on every component independently, keeping order.
    pub fn apply_mixture<O: TagOracle + ?Sized>(
        &self,
        mixture: &Mixture,
        oracle: &O,
    ) -> RewriteResult<Mixture> {
        match self {
            Rule::Component(rule) => mixture
                .iter()
                .map(|component| rule.apply(component, oracle))
                .collect(),
            Rule::Mixture(rule) => rule.apply(mixture, oracle),
        }
    }

    /// Apply to a single component; mixture rules leave it unchanged
    pub fn apply_component<O: TagOracle + ?Sized>(
        &self,
        component: &Component,
        oracle: &O,
    ) -> RewriteResult<Component> {
        match self {
            Rule::Component(rule) => rule.apply(component, oracle),
            Rule::Mixture(_) => Ok(component.clone()),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Rule::Component(rule) => fmt::Display::fmt(rule, f),
            Rule::Mixture(rule) => fmt::Display::fmt(rule, f),
        }
    }
}

impl FromStr for Rule {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::parse(s)
    }
}

impl From<ComponentRule> for Rule {
    fn from(rule: ComponentRule) -> Self {
        Rule::Component(rule)
    }
}

impl From<MixtureRule> for Rule {
    fn from(rule: MixtureRule) -> Self {
        Rule::Mixture(rule)
    }
}

fn split_arrow(text: &str) -> RewriteResult<(&str, &str)> {
    match text.split_once(ARROW) {
        Some((lhs, rhs)) if !rhs.contains(ARROW) => Ok((lhs.trim(), rhs.trim())),
        Some(_) => Err(RewriteError::invalid_rule(text, "more than one '->'")),
        None => Err(RewriteError::invalid_rule(text, "missing '->'")),
    }
}

fn unbound(token: &Token) -> RewriteError {
    RewriteError::UnboundTemplateVariable {
        variable: token.name().to_string(),
    }
}
