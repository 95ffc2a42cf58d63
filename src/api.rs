use crate::card::{AttackRecord, CardRecord, EnergyType, SetInfo, SetRecords, Stage, load_dataset};
use crate::coverage::CoverageReport;
use crate::effect::EffectSequence;
use crate::emit::{SetUnit, emit_set};
use crate::engine::{DispatchMetrics, Dispatcher, GrammarUsage, Outcome};
use crate::error::Error;
use crate::normalize::normalize;
use crate::rules::DEFAULT_GRAMMAR;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

static DEFAULT_DISPATCHER: Lazy<Dispatcher<'static>> = Lazy::new(|| Dispatcher::new(&DEFAULT_GRAMMAR));

/// Options that affect emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Resistance amount printed when the dataset value has no number.
    pub default_resistance: u32,
    /// Nested sequences with at most this many flat operations print on one line.
    pub inline_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { default_resistance: 30, inline_limit: 2 }
    }
}

/// Either a compiled effect tree or the marker for text the grammar does not cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledEffect {
    Tree(EffectSequence),
    Unimplemented,
}

/// One attack after compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledAttack {
    pub name: String,
    pub cost: Vec<EnergyType>,
    pub damage: Option<u32>,
    /// Dataset text as given.
    pub text: String,
    pub normalized: String,
    /// Rule whose pattern matched, even when its builder rejected the bindings.
    pub rule: Option<&'static str>,
    pub effect: CompiledEffect,
}

/// A creature card with validated metadata and compiled attacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCard {
    pub record: CardRecord,
    pub stage: Stage,
    pub hp: u32,
    pub attacks: Vec<CompiledAttack>,
}

#[derive(Debug, Clone)]
pub struct CompiledSet {
    pub set: SetInfo,
    pub cards: Vec<CompiledCard>,
    /// Rule hits and misses over every attack of the set.
    pub usage: GrammarUsage,
}

/// Everything one run produces, rendered in memory.
#[derive(Debug, Clone)]
pub struct Generation {
    pub units: Vec<SetUnit>,
    /// Per-set coverage, keyed by set display name, in unit order.
    pub reports: Vec<(String, CoverageReport)>,
    pub combined: CoverageReport,
}

/// Compile one attack with the default grammar.
///
/// # Example
/// ```
/// use cardgen::{AttackRecord, CompiledEffect, compile_attack};
///
/// let record = AttackRecord {
///     name: "Sing".to_string(),
///     cost: vec![],
///     damage: None,
///     text: "The Defending Pokémon is now Asleep.".to_string(),
/// };
/// let attack = compile_attack(&record);
/// assert!(matches!(attack.effect, CompiledEffect::Tree(_)));
/// ```
pub fn compile_attack(attack: &AttackRecord) -> CompiledAttack {
    compile_attack_with(&DEFAULT_DISPATCHER, attack).0
}

/// Compile one attack against `dispatcher`, also returning the dispatch counters.
pub fn compile_attack_with(dispatcher: &Dispatcher<'_>, attack: &AttackRecord) -> (CompiledAttack, DispatchMetrics) {
    let normalized = normalize(&attack.text);
    let dispatch = dispatcher.dispatch(&normalized, attack.damage);
    let rule = dispatch.outcome.rule_name();

    let effect = match dispatch.outcome {
        Outcome::Matched { effects, .. } => CompiledEffect::Tree(effects),
        Outcome::Rejected { .. } | Outcome::Unmatched => CompiledEffect::Unimplemented,
    };

    let compiled = CompiledAttack {
        name: attack.name.clone(),
        cost: attack.cost.clone(),
        damage: attack.damage,
        text: attack.text.clone(),
        normalized,
        rule,
        effect,
    };
    (compiled, dispatch.metrics)
}

/// Validate a card's metadata and compile its attacks with the default grammar.
pub fn compile_card(record: &CardRecord) -> Result<CompiledCard, Error> {
    compile_card_into(&DEFAULT_DISPATCHER, record, &mut GrammarUsage::default())
}

fn compile_card_into(
    dispatcher: &Dispatcher<'_>,
    record: &CardRecord,
    usage: &mut GrammarUsage,
) -> Result<CompiledCard, Error> {
    let stage = record.stage()?;
    let hp = record.hit_points()?;

    let mut attacks = Vec::with_capacity(record.attacks.len());
    for attack in &record.attacks {
        let (compiled, metrics) = compile_attack_with(dispatcher, attack);
        usage.record(&metrics);
        attacks.push(compiled);
    }

    Ok(CompiledCard { record: record.clone(), stage, hp, attacks })
}

pub fn compile_set(records: &SetRecords) -> Result<CompiledSet, Error> {
    compile_set_with(&DEFAULT_DISPATCHER, records)
}

/// Compile a set against a custom grammar.
pub fn compile_set_with(dispatcher: &Dispatcher<'_>, records: &SetRecords) -> Result<CompiledSet, Error> {
    let mut usage = GrammarUsage::default();
    let cards = records
        .cards
        .iter()
        .map(|record| compile_card_into(dispatcher, record, &mut usage))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CompiledSet { set: records.set.clone(), cards, usage })
}

/// Load, compile, emit and report one dataset document.
pub fn generate(json: &str, options: &Options) -> Result<Generation, Error> {
    generate_all([json], options)
}

/// Like [`generate`], over several documents at once.
///
/// Cards of the same set coming from different documents end up in one unit,
/// in document order. Any malformed card fails the whole run.
pub fn generate_all<'a>(documents: impl IntoIterator<Item = &'a str>, options: &Options) -> Result<Generation, Error> {
    let mut sets: Vec<SetRecords> = Vec::new();
    for json in documents {
        for group in load_dataset(json)? {
            match sets.iter_mut().find(|s| s.set.canonical_name() == group.set.canonical_name()) {
                Some(existing) => existing.cards.extend(group.cards),
                None => sets.push(group),
            }
        }
    }
    sets.sort_by_key(|s| s.set.canonical_name());

    let compiled = sets.iter().map(compile_set).collect::<Result<Vec<_>, _>>()?;

    let grammar_rules = DEFAULT_DISPATCHER.rules().len();
    let mut combined = CoverageReport::new(grammar_rules);
    let mut units = Vec::with_capacity(compiled.len());
    let mut reports = Vec::with_capacity(compiled.len());
    for set in &compiled {
        let report = CoverageReport::for_set(set, grammar_rules);
        combined.merge(&report);
        reports.push((set.set.name.clone(), report));
        units.push(emit_set(set, options));
    }

    Ok(Generation { units, reports, combined })
}

/// Write units below `out_dir`, creating set directories as needed.
///
/// Each file is written to a temporary sibling first and renamed into place.
/// Returns the written paths.
pub fn write_units(out_dir: &Path, units: &[SetUnit]) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::with_capacity(units.len());
    for unit in units {
        let path = out_dir.join(&unit.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let staging = path.with_extension("rs.tmp");
        fs::write(&staging, &unit.contents).map_err(|e| Error::io(&staging, e))?;
        fs::rename(&staging, &path).map_err(|e| Error::io(&path, e))?;
        written.push(path);
    }
    Ok(written)
}
