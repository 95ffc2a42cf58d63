//! First-match-wins dispatcher.
//!
//! This module is the operational core of the engine:
//!
//! - Select the rules that are plausible for the text (bucket gating; see
//!   `compiled_rules.rs` and `trigger.rs`).
//! - Try the active rules in grammar order against the normalized text; the
//!   first anchored pattern that matches wins and no later rule is tried.
//! - Bind the winner's named captures (`Bindings`) and run its builder.
//!
//! ```text
//! (0) trigger scan   -> buckets
//! (1) active rules   -> always-on ∪ by_bucket[present], sorted by RuleId
//! (2) first match    -> Bindings
//! (3) rule builder   -> EffectSequence | rejected
//! ```
//!
//! A winner whose builder rejects its bindings does *not* fall through to
//! later rules: the outcome is `Rejected`, which callers treat as
//! unimplemented.
//!
//! ## Debugging
//!
//! Setting `CARDGEN_DEBUG_RULES=1` prints the trigger scan, the active rule
//! count and the match or miss of every dispatch to stderr.

use super::compiled_rules::{BUCKET_SLOTS, CompiledRules, RuleId};
use super::metrics::DispatchMetrics;
use super::trigger::TriggerInfo;
use crate::effect::EffectSequence;
use crate::{Bindings, Rule};
use std::collections::BTreeSet;

/// Result of dispatching one attack's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `rule` matched and built a tree.
    Matched { rule: RuleId, name: &'static str, effects: EffectSequence },
    /// `rule` matched but its builder rejected the bindings.
    Rejected { rule: RuleId, name: &'static str },
    /// No rule matched.
    Unmatched,
}

impl Outcome {
    pub fn rule_name(&self) -> Option<&'static str> {
        match self {
            Outcome::Matched { name, .. } | Outcome::Rejected { name, .. } => Some(name),
            Outcome::Unmatched => None,
        }
    }

    pub fn effects(&self) -> Option<&EffectSequence> {
        match self {
            Outcome::Matched { effects, .. } => Some(effects),
            _ => None,
        }
    }

    pub fn into_effects(self) -> Option<EffectSequence> {
        match self {
            Outcome::Matched { effects, .. } => Some(effects),
            _ => None,
        }
    }
}

/// Dispatcher output bundled with counters.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub outcome: Outcome,
    pub metrics: DispatchMetrics,
}

/// Applies an ordered grammar to normalized attack text.
///
/// Usage: create with `Dispatcher::new(&rules)` once, then call
/// `dispatch(text, damage)` per attack.
#[derive(Debug)]
pub struct Dispatcher<'a> {
    compiled: CompiledRules<'a>,
    gating: bool,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher over `rules` using pre-compiled indexes.
    pub fn new_compiled(compiled: CompiledRules<'a>) -> Self {
        Dispatcher { compiled, gating: true }
    }

    pub fn new(rules: &'a [Rule]) -> Self {
        Self::new_compiled(CompiledRules::new(rules))
    }

    /// A dispatcher that tries every rule regardless of buckets.
    ///
    /// Produces the same outcomes as a gated one; used to check that gating
    /// is sound.
    pub fn ungated(rules: &'a [Rule]) -> Self {
        Dispatcher { compiled: CompiledRules::new(rules), gating: false }
    }

    pub fn rules(&self) -> &[&'a Rule] {
        &self.compiled.rules
    }

    /// Rule ids that survive bucket gating for `trigger`, in grammar order.
    pub fn active_rules(&self, trigger: &TriggerInfo) -> Vec<RuleId> {
        if !self.gating {
            return (0..self.compiled.len()).collect();
        }

        let mut active: BTreeSet<RuleId> = self.compiled.index.always_on.iter().copied().collect();
        for (bit, slot) in BUCKET_SLOTS {
            if trigger.buckets.contains(bit) {
                active.extend(&self.compiled.index.by_bucket[slot]);
            }
        }
        active.into_iter().collect()
    }

    /// Dispatch normalized `text` carrying base `damage`.
    pub fn dispatch(&self, text: &str, damage: Option<u32>) -> Dispatch {
        let debug = std::env::var_os("CARDGEN_DEBUG_RULES").is_some();
        let trigger = TriggerInfo::scan(text);
        let active = self.active_rules(&trigger);

        if debug {
            eprintln!("[trigger_scan] text={text:?} buckets={:?}", trigger.buckets);
            eprintln!("[active_rules] {}/{} rules active", active.len(), self.compiled.len());
        }

        let mut metrics = DispatchMetrics {
            rules_active: active.len(),
            rules_gated: self.compiled.len() - active.len(),
            ..DispatchMetrics::default()
        };

        for id in active {
            let rule = self.compiled.rules[id];
            metrics.rules_tried += 1;

            let Some(caps) = rule.pattern.captures(text) else {
                continue;
            };

            metrics.matched = Some(rule.name);
            let bindings = Bindings::from_captures(rule.pattern, &caps);
            let damage = if self.compiled.metas[id].uses_damage { damage } else { None };

            let outcome = match (rule.build)(&bindings, damage) {
                Some(effects) => {
                    if debug {
                        eprintln!("[rule:match] name=\"{}\" bindings={bindings:?} nodes={}", rule.name, effects.len());
                    }
                    Outcome::Matched { rule: id, name: rule.name, effects }
                }
                None => {
                    if debug {
                        eprintln!("[rule:rejected] name=\"{}\" bindings={bindings:?}", rule.name);
                    }
                    Outcome::Rejected { rule: id, name: rule.name }
                }
            };
            return Dispatch { outcome, metrics };
        }

        if debug {
            eprintln!("[rule:miss] tried={}", metrics.rules_tried);
        }
        Dispatch { outcome: Outcome::Unmatched, metrics }
    }
}
