//! mixrule
//!
//! A small term-rewriting engine for ingredient "components" (a base plus the
//! modifiers applied to it) and "mixtures" (unordered collections of
//! components).
//!
//! # Example
//!
//! ```
//! use mixrule::{Component, ReductionSystem, RuleSet, TrivialOracle};
//!
//! let rules = RuleSet::parse("o1 salty salty i1 -> o1 salty i1").unwrap();
//! let system = ReductionSystem::from_rule_set(rules, TrivialOracle::new(["Onion"]));
//! let out = system
//!     .reduce_component(&Component::parse("salty hot salty Onion").unwrap())
//!     .unwrap();
//! assert_eq!(out.to_string(), "hot salty Onion");
//! ```

#![warn(rust_2018_idioms)]

// Core modules
pub mod component;
pub mod condition;
pub mod error;
pub mod mixture;
pub mod oracle;
pub mod reduction;
pub mod token;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use component::{Binding, Bindings, Component, ComponentPattern, Strictness, Template};
pub use condition::Condition;
pub use error::{RewriteError, RewriteResult};
pub use mixture::{Mixture, MixturePattern};
pub use oracle::{TagOracle, TagTable, TrivialOracle};
pub use reduction::{ComponentRule, MixtureRule, ReductionConfig, ReductionSystem, Rule, RuleSet};
pub use util::config::EngineConfig;

use std::fs;
use std::path::Path;

use tracing::debug;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "mixrule";

/// Read and parse a rule-definition file
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    debug!("loading rules from {}", path.display());
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let set = RuleSet::parse(&source)
        .with_context(|| format!("Failed to parse rules: {}", path.display()))?;
    debug!("{} rule(s), {} alias(es)", set.len(), set.aliases().len());
    Ok(set)
}

/// Build a reduction system from a rule file and a configuration
///
/// Tag aliases in the file are added to `table` before the system takes it.
pub fn load_system(
    path: &Path,
    mut table: TagTable,
    config: &EngineConfig,
) -> Result<ReductionSystem<TagTable>> {
    let set = load_rules(path)?;
    set.seed_tags(&mut table);
    Ok(ReductionSystem::with_config(
        set.into_rules(),
        table,
        config.reduction,
    ))
}
