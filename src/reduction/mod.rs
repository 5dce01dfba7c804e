//! Rule-based reduction
//!
//! - [`rules`]: component and mixture rules and their application
//! - [`parse`]: rule-definition text
//! - [`system`]: fixed-point driver with cycle detection

pub mod parse;
pub mod rules;
pub mod system;

pub use parse::{RuleSet, TagAlias};
pub use rules::{ComponentRule, MixtureRule, Rule};
pub use system::ReductionSystem;

pub use crate::util::config::ReductionConfig;

#[cfg(test)]
mod tests;
