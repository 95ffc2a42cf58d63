//! Grammar coverage.
//!
//! Attacks the grammar cannot compile are reduced to de-identified fragment
//! sequences (numbers, types, statuses and the card's own name replaced by
//! placeholders) and grouped, so the most common unsupported phrasings show
//! up first. The report is diagnostics only; the emitter never reads it.

use crate::api::{CompiledAttack, CompiledCard, CompiledEffect, CompiledSet};
use crate::engine::GrammarUsage;
use crate::normalize::normalize;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// One group of unimplemented attacks sharing the same de-identified text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageEntry {
    pub fragments: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    total_attacks: usize,
    unimplemented: usize,
    grammar_rules: usize,
    usage: GrammarUsage,
    operation_kinds: BTreeSet<&'static str>,
    groups: BTreeMap<Vec<String>, usize>,
}

impl CoverageReport {
    pub fn new(grammar_rules: usize) -> Self {
        CoverageReport { grammar_rules, ..Default::default() }
    }

    pub fn for_set(set: &CompiledSet, grammar_rules: usize) -> Self {
        let mut report = CoverageReport::new(grammar_rules);
        for card in &set.cards {
            report.add_card(card);
        }
        report.usage.merge(&set.usage);
        report
    }

    pub fn add_card(&mut self, card: &CompiledCard) {
        for attack in &card.attacks {
            self.add_attack(attack, &card.record.name);
        }
    }

    pub fn add_attack(&mut self, attack: &CompiledAttack, owner: &str) {
        self.total_attacks += 1;
        match &attack.effect {
            CompiledEffect::Tree(effects) => {
                self.operation_kinds.extend(effects.walk().into_iter().map(|op| op.method_name()));
            }
            CompiledEffect::Unimplemented => {
                self.unimplemented += 1;
                *self.groups.entry(deidentify(&attack.text, owner)).or_insert(0) += 1;
            }
        }
    }

    /// Fold another report into this one. The grammar size is not summed.
    pub fn merge(&mut self, other: &CoverageReport) {
        self.total_attacks += other.total_attacks;
        self.unimplemented += other.unimplemented;
        self.grammar_rules = self.grammar_rules.max(other.grammar_rules);
        self.usage.merge(&other.usage);
        self.operation_kinds.extend(other.operation_kinds.iter().copied());
        for (fragments, count) in &other.groups {
            *self.groups.entry(fragments.clone()).or_insert(0) += count;
        }
    }

    /// Groups by count descending, then lexically.
    pub fn entries(&self) -> Vec<CoverageEntry> {
        let mut entries: Vec<CoverageEntry> = self
            .groups
            .iter()
            .map(|(fragments, count)| CoverageEntry { fragments: fragments.clone(), count: *count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.fragments.cmp(&b.fragments)));
        entries
    }

    pub fn total_attacks(&self) -> usize {
        self.total_attacks
    }

    pub fn unimplemented(&self) -> usize {
        self.unimplemented
    }

    pub fn implemented(&self) -> usize {
        self.total_attacks - self.unimplemented
    }

    pub fn distinct_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn grammar_rules(&self) -> usize {
        self.grammar_rules
    }

    pub fn rules_fired(&self) -> usize {
        self.usage.rules_fired()
    }

    pub fn usage(&self) -> &GrammarUsage {
        &self.usage
    }

    pub fn operation_kinds(&self) -> &BTreeSet<&'static str> {
        &self.operation_kinds
    }
}

/// Reduce attack text to placeholder fragments.
///
/// `"Flip 2 coins. Magmar does 10 damage to itself."` owned by Magmar becomes
/// `["Flip X coins", "SELF does X damage to itself"]`.
pub fn deidentify(text: &str, own_name: &str) -> Vec<String> {
    let mut text = normalize(text);

    if let Some(pattern) = own_name_pattern(&normalize(own_name)) {
        text = pattern.replace_all(&text, "SELF").into_owned();
    }
    let text = regex!(r"[0-9]+").replace_all(&text, "X");
    let text = regex!(r"\b(?:Colorless|Darkness|Dragon|Fairy|Fighting|Fire|Grass|Lightning|Metal|Psychic|Water)\b")
        .replace_all(&text, "TYPE");
    let text = regex!(r"\b(?:Asleep|Confused|Paralyzed|Poisoned)\b").replace_all(&text, "STATUS");

    regex!(r"[.;] ")
        .split(&text)
        .map(|fragment| fragment.trim_end_matches(['.', ';']).trim().to_string())
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

fn own_name_pattern(name: &str) -> Option<Regex> {
    if name.is_empty() {
        return None;
    }
    let word = |c: char| c.is_alphanumeric() || c == '_';
    let start = if name.starts_with(word) { r"\b" } else { "" };
    let end = if name.ends_with(word) { r"\b" } else { "" };
    Regex::new(&format!("{start}{}{end}", regex::escape(name))).ok()
}
