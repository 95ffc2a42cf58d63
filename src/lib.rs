extern crate self as cardgen;

use regex::Regex;
use std::collections::BTreeMap;

#[macro_use]
mod macros;
mod api;
pub mod builder;
pub mod card;
mod coverage;
pub mod effect;
mod emit;
pub mod engine;
mod error;
pub mod normalize;
pub mod rules;

pub use api::{
    CompiledAttack, CompiledCard, CompiledEffect, CompiledSet, Generation, Options, compile_attack,
    compile_attack_with, compile_card, compile_set, compile_set_with, generate, generate_all, write_units,
};
pub use card::{AttackRecord, CardRecord, EnergyType, SetInfo, SetRecords, Stage, load_dataset};
pub use coverage::{CoverageEntry, CoverageReport, deidentify};
pub use effect::{EffectOperation, EffectSequence};
pub use emit::{SetUnit, emit_card, emit_set};
pub use error::{Error, MalformedReason};
pub use normalize::normalize;

// --- Rule captures -----------------------------------------------------------

/// A bound named capture. Digit-only captures are coerced to numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    Number(u32),
    Text(String),
}

/// Named captures of one successful match, keyed by group name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<String, Capture>,
}

impl Bindings {
    /// Bind every named group of `pattern` that participated in `caps`.
    pub fn from_captures(pattern: &Regex, caps: &regex::Captures<'_>) -> Self {
        let mut values = BTreeMap::new();
        for name in pattern.capture_names().flatten() {
            if let Some(m) = caps.name(name) {
                let text = m.as_str();
                let value = if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
                    text.parse().map(Capture::Number).unwrap_or_else(|_| Capture::Text(text.to_string()))
                } else {
                    Capture::Text(text.to_string())
                };
                values.insert(name.to_string(), value);
            }
        }
        Bindings { values }
    }

    pub fn raw(&self, name: &str) -> Option<&Capture> {
        self.values.get(name)
    }

    /// Convert the capture `name` to the type a rule declared for it.
    pub fn get<T: FromCapture>(&self, name: &str) -> Option<T> {
        self.values.get(name).and_then(T::from_capture)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Conversion from a bound capture into a typed rule field.
pub trait FromCapture: Sized {
    fn from_capture(capture: &Capture) -> Option<Self>;
}

impl FromCapture for u32 {
    fn from_capture(capture: &Capture) -> Option<Self> {
        match capture {
            Capture::Number(n) => Some(*n),
            Capture::Text(_) => None,
        }
    }
}

impl FromCapture for String {
    fn from_capture(capture: &Capture) -> Option<Self> {
        match capture {
            Capture::Number(n) => Some(n.to_string()),
            Capture::Text(s) => Some(s.clone()),
        }
    }
}

impl FromCapture for effect::Status {
    fn from_capture(capture: &Capture) -> Option<Self> {
        match capture {
            Capture::Text(s) => s.parse().ok(),
            Capture::Number(_) => None,
        }
    }
}

impl FromCapture for card::EnergyType {
    fn from_capture(capture: &Capture) -> Option<Self> {
        match capture {
            Capture::Text(s) => s.parse().ok(),
            Capture::Number(_) => None,
        }
    }
}

// --- Rules -------------------------------------------------------------------

/// Builder callback of a rule: typed captures are extracted from the bindings
/// inside the callback (see the `rule!` macro). Returns `None` when the
/// bindings do not fit the rule's declared capture record.
pub type BuildFn = fn(&Bindings, Option<u32>) -> Option<EffectSequence>;

/// One grammar rule: an anchored pattern and the builder that describes what
/// matching text does.
///
/// Rules are tried in grammar order and the first match wins, so a rule must
/// come before any more general rule that would also match its text. Each
/// rule lists `examples` it is the intended winner for; the grammar tests
/// check them against the whole ordered grammar.
pub struct Rule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    /// Capture names the builder expects, in declaration order.
    pub captures: &'static [&'static str],
    /// Whether the builder consumes the attack's base damage.
    pub uses_damage: bool,
    /// Bucket mask (see [`engine::BucketMask`]). Zero means always active.
    pub buckets: u32,
    pub examples: &'static [&'static str],
    pub build: BuildFn,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("captures", &self.captures)
            .field("uses_damage", &self.uses_damage)
            .field("build", &"<function>")
            .field("buckets", &self.buckets)
            .finish()
    }
}
