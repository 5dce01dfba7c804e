//! Backtracking component matcher
//!
//! Pattern body tokens are placed left to right onto target tokens. Each step
//! picks a target token of the same category that satisfies the pattern token
//! (equal constant, any value, or qualifier satisfied) and agrees with earlier
//! bindings, then recurses on the rest of the body. Bindings and the leftover
//! pool are kept on undo trails instead of being cloned per branch.

use tracing::trace;

use super::bindings::{Binding, Bindings};
use super::pattern::{ComponentPattern, Strictness};
use super::Component;
use crate::oracle::TagOracle;
use crate::token::{constant_category, Category, Token, VarKind};

/// Matches component patterns against components
#[derive(Debug, Clone, Copy)]
pub struct ComponentMatcher<'o, O: ?Sized> {
    oracle: &'o O,
}

impl<'o, O: TagOracle + ?Sized> ComponentMatcher<'o, O> {
    pub fn new(oracle: &'o O) -> Self {
        Self { oracle }
    }

    /// Match `pattern` against `target`; `None` when there is no match
    pub fn match_component(
        &self,
        pattern: &ComponentPattern,
        target: &Component,
    ) -> Option<Bindings> {
        if let Some(veto) = pattern.dont_match() {
            if self.match_component(veto, target).is_some() {
                trace!("'{}' vetoed by '!! {}'", target, veto);
                return None;
            }
        }

        let body_len = pattern.body.len();
        let slots: Vec<Slot<'_>> = pattern
            .body
            .iter()
            .enumerate()
            .map(|(i, token)| Slot {
                token,
                category: token.category(i + 1 == body_len, self.oracle),
            })
            .collect();

        let target_len = target.len();
        let targets: Vec<Target<'_>> = target
            .tokens()
            .iter()
            .enumerate()
            .map(|(i, name)| Target {
                name,
                category: constant_category(name, i + 1 == target_len, self.oracle),
            })
            .collect();

        let mut search = Search {
            oracle: self.oracle,
            pattern,
            targets,
            trail: Vec::new(),
            flushed: Vec::new(),
        };
        let mut remaining: Vec<usize> = (0..target_len).collect();
        let result = search.place(&slots, &mut remaining, true);
        trace!(
            "match '{}' against '{}': {}",
            pattern,
            target,
            result.as_ref().map_or_else(|| "no match".to_string(), |b| b.to_string())
        );
        result
    }
}

/// Convenience wrapper around [`ComponentMatcher`]
pub fn match_component<O: TagOracle + ?Sized>(
    pattern: &ComponentPattern,
    target: &Component,
    oracle: &O,
) -> Option<Bindings> {
    ComponentMatcher::new(oracle).match_component(pattern, target)
}

struct Slot<'p> {
    token: &'p Token,
    category: Category,
}

struct Target<'t> {
    name: &'t str,
    category: Category,
}

struct Search<'a, 'p, 't, O: ?Sized> {
    oracle: &'a O,
    pattern: &'p ComponentPattern,
    targets: Vec<Target<'t>>,
    /// Variable bindings, in binding order
    trail: Vec<(&'p str, &'t str)>,
    /// Target positions skipped over in strict modes
    flushed: Vec<usize>,
}

impl<'a, 'p, 't, O: TagOracle + ?Sized> Search<'a, 'p, 't, O> {
    fn place(
        &mut self,
        slots: &[Slot<'p>],
        remaining: &mut Vec<usize>,
        search_ahead: bool,
    ) -> Option<Bindings> {
        let Some((head, rest)) = slots.split_first() else {
            return Some(self.finish(remaining));
        };

        let candidates = if search_ahead {
            remaining.len()
        } else {
            remaining.len().min(1)
        };

        for pos in 0..candidates {
            let target = &self.targets[remaining[pos]];
            if !self.accepts(head, target) {
                continue;
            }
            let value = target.name;
            let name = head.token.name();
            let mut pushed = false;
            if head.token.is_variable() {
                match self.lookup(name) {
                    Some(bound) if bound != value => continue,
                    Some(_) => {}
                    None => {
                        self.trail.push((name, value));
                        pushed = true;
                    }
                }
            }

            let result = match self.pattern.strictness {
                Strictness::Loose => {
                    let index = remaining.remove(pos);
                    let result = self.place(rest, remaining, true);
                    remaining.insert(pos, index);
                    result
                }
                strict => {
                    let mut tail = remaining.split_off(pos + 1);
                    let mark = self.flushed.len();
                    self.flushed.extend_from_slice(&remaining[..pos]);
                    let result = self.place(rest, &mut tail, strict != Strictness::Contiguous);
                    self.flushed.truncate(mark);
                    remaining.append(&mut tail);
                    result
                }
            };

            if pushed {
                self.trail.pop();
            }
            if result.is_some() {
                return result;
            }
        }
        None
    }

    fn accepts(
        &self,
        slot: &Slot<'p>,
        target: &Target<'t>,
    ) -> bool {
        if slot.category != target.category {
            return false;
        }
        match slot.token.kind() {
            VarKind::Constant => slot.token.name() == target.name,
            VarKind::Unqualified => true,
            VarKind::Qualified => slot
                .token
                .qualifier()
                .map_or(true, |q| q.satisfied_by(&self.oracle.tags_of(target.name))),
        }
    }

    fn lookup(
        &self,
        name: &str,
    ) -> Option<&'t str> {
        self.trail
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| *value)
    }

    /// Hand every unplaced token to the collectors
    fn finish(
        &self,
        remaining: &[usize],
    ) -> Bindings {
        let mut bindings = Bindings::new();
        for (name, value) in &self.trail {
            bindings.insert(*name, Binding::Single(value.to_string()));
        }

        let mut leftovers: Vec<usize> = self.flushed.iter().chain(remaining).copied().collect();
        leftovers.sort_unstable();

        for (collector, qualifier) in self.pattern.collectors() {
            let kept = leftovers
                .iter()
                .map(|&i| self.targets[i].name)
                .filter(|name| qualifier.map_or(true, |q| q.satisfied_by(&self.oracle.tags_of(name))))
                .map(str::to_string)
                .collect();
            bindings.insert(collector, Binding::Collected(kept));
        }
        bindings
    }
}
