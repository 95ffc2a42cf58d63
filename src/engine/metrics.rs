//! Dispatch metrics.
//!
//! Counters used to observe and debug the dispatcher:
//!
//! - `DispatchMetrics` describes a single dispatch (how many rules were gated
//!   out, how many were tried, which one won).
//! - `GrammarUsage` aggregates per-rule hit counts over a run; the coverage
//!   report reads "rules that fired" from it.
//!
//! Metrics never record timings: reports built from them must be identical
//! across runs on the same input.

use std::collections::BTreeMap;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchMetrics {
    /// Rules active after bucket gating.
    pub rules_active: usize,
    /// Rules skipped because none of their buckets were present.
    pub rules_gated: usize,
    /// Patterns actually tried before the dispatch finished.
    pub rules_tried: usize,
    /// Name of the rule whose pattern matched, if any.
    pub matched: Option<&'static str>,
}

/// Per-rule hit counts over a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GrammarUsage {
    hits: BTreeMap<&'static str, usize>,
    misses: usize,
}

impl GrammarUsage {
    pub fn record(&mut self, metrics: &DispatchMetrics) {
        match metrics.matched {
            Some(name) => *self.hits.entry(name).or_insert(0) += 1,
            None => self.misses += 1,
        }
    }

    pub fn merge(&mut self, other: &GrammarUsage) {
        for (name, count) in &other.hits {
            *self.hits.entry(name).or_insert(0) += count;
        }
        self.misses += other.misses;
    }

    /// Rules that matched at least once, with their counts, in name order.
    pub fn hits(&self) -> &BTreeMap<&'static str, usize> {
        &self.hits
    }

    pub fn rules_fired(&self) -> usize {
        self.hits.len()
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
