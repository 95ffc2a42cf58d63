//! Dataset records.
//!
//! Cards arrive as pokemontcg.io JSON documents. Only creature records
//! (`supertype == "Pokémon"`) are deserialized into [`CardRecord`]; trainers
//! and energies are dropped while still untyped so that their different shape
//! never aborts a run.
//!
//! Shape violations on creature records are fatal (see [`crate::Error`]): the
//! dataset is trusted, so a bad record means an upstream regression.

use crate::error::{Error, MalformedReason};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Elemental type tokens used for card colors, costs, weaknesses and resistances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum EnergyType {
    Colorless,
    Darkness,
    Dragon,
    Fairy,
    Fighting,
    Fire,
    Grass,
    Lightning,
    Metal,
    Psychic,
    Water,
}

impl EnergyType {
    pub const ALL: [EnergyType; 11] = [
        EnergyType::Colorless,
        EnergyType::Darkness,
        EnergyType::Dragon,
        EnergyType::Fairy,
        EnergyType::Fighting,
        EnergyType::Fire,
        EnergyType::Grass,
        EnergyType::Lightning,
        EnergyType::Metal,
        EnergyType::Psychic,
        EnergyType::Water,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EnergyType::Colorless => "Colorless",
            EnergyType::Darkness => "Darkness",
            EnergyType::Dragon => "Dragon",
            EnergyType::Fairy => "Fairy",
            EnergyType::Fighting => "Fighting",
            EnergyType::Fire => "Fire",
            EnergyType::Grass => "Grass",
            EnergyType::Lightning => "Lightning",
            EnergyType::Metal => "Metal",
            EnergyType::Psychic => "Psychic",
            EnergyType::Water => "Water",
        }
    }
}

impl fmt::Display for EnergyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnergyType::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s)).ok_or(())
    }
}

/// A weakness or resistance entry: the type and the dataset's raw value (`×2`, `-30`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeModifier {
    #[serde(rename = "type")]
    pub energy: EnergyType,
    #[serde(default)]
    pub value: String,
}

impl TypeModifier {
    /// Magnitude of the value, ignoring sign and multiplier glyphs.
    pub fn amount(&self) -> Option<u32> {
        leading_number(self.value.trim_start_matches(['-', '+', '×', 'x']))
    }
}

/// Identity of the set a card belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInfo {
    pub name: String,
    #[serde(default)]
    pub ptcgo_code: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl SetInfo {
    /// Lower-cased, underscore-separated form of the display name (`"Base Set 2"` -> `"base_set_2"`).
    pub fn canonical_name(&self) -> String {
        self.name
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Short code used in card identifiers, falling back to the set id.
    pub fn short_code(&self) -> &str {
        self.ptcgo_code.as_deref().or(self.id.as_deref()).unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttackRecord {
    pub name: String,
    #[serde(default)]
    pub cost: Vec<EnergyType>,
    #[serde(default, deserialize_with = "optional_number")]
    pub damage: Option<u32>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub name: String,
    pub supertype: String,
    #[serde(default)]
    pub subtypes: Vec<String>,
    #[serde(default, deserialize_with = "optional_number")]
    pub hp: Option<u32>,
    #[serde(default)]
    pub types: Vec<EnergyType>,
    #[serde(default)]
    pub weaknesses: Vec<TypeModifier>,
    #[serde(default)]
    pub resistances: Vec<TypeModifier>,
    #[serde(default)]
    pub retreat_cost: Vec<EnergyType>,
    #[serde(default)]
    pub evolves_from: Option<String>,
    #[serde(default)]
    pub attacks: Vec<AttackRecord>,
    pub set: SetInfo,
    pub number: String,
}

/// Evolution tier derived from subtype tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Basic,
    Stage1 { from: String },
    Stage2 { from: String },
}

impl CardRecord {
    pub fn is_creature(&self) -> bool {
        is_creature_supertype(&self.supertype)
    }

    /// Derive the evolution stage. A card without a recognizable stage tag is malformed.
    pub fn stage(&self) -> Result<Stage, Error> {
        let has = |tag: &str| self.subtypes.iter().any(|s| s.eq_ignore_ascii_case(tag));
        let predecessor = || {
            self.evolves_from
                .clone()
                .filter(|from| !from.trim().is_empty())
                .ok_or_else(|| self.malformed(MalformedReason::MissingPredecessor))
        };

        if has("Basic") {
            Ok(Stage::Basic)
        } else if has("Stage 1") {
            Ok(Stage::Stage1 { from: predecessor()? })
        } else if has("Stage 2") {
            Ok(Stage::Stage2 { from: predecessor()? })
        } else {
            Err(self.malformed(MalformedReason::MissingStage { subtypes: self.subtypes.clone() }))
        }
    }

    pub fn hit_points(&self) -> Result<u32, Error> {
        self.hp.ok_or_else(|| self.malformed(MalformedReason::MissingHitPoints))
    }

    pub fn retreat(&self) -> usize {
        self.retreat_cost.len()
    }

    /// `"Clefable (JU 1)"`: display name, set code and number.
    pub fn identifier(&self) -> String {
        format!("{} ({} {})", self.name, self.set.short_code(), self.number)
    }

    pub(crate) fn malformed(&self, reason: MalformedReason) -> Error {
        Error::Malformed { card: self.identifier(), reason }
    }
}

/// All creature cards of one set, in dataset order.
#[derive(Debug, Clone)]
pub struct SetRecords {
    pub set: SetInfo,
    pub cards: Vec<CardRecord>,
}

/// Parse a dataset document and group its creature cards by set.
///
/// Accepts either `{"data": [...]}` or a bare array. Sets are ordered by
/// canonical name so the grouping never depends on hash order.
pub fn load_dataset(json: &str) -> Result<Vec<SetRecords>, Error> {
    let document: Value = serde_json::from_str(json)?;
    let records = match document {
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(records)) => records,
            _ => return Err(Error::Document("expected a `data` array".to_string())),
        },
        Value::Array(records) => records,
        _ => return Err(Error::Document("expected an object or an array of cards".to_string())),
    };

    let mut sets: Vec<SetRecords> = Vec::new();
    for record in records {
        let supertype = record.get("supertype").and_then(Value::as_str).unwrap_or_default();
        if !is_creature_supertype(supertype) {
            continue;
        }

        let name = record.get("name").and_then(Value::as_str).unwrap_or("<unnamed>").to_string();
        let card: CardRecord = serde_json::from_value(record)
            .map_err(|e| Error::Malformed { card: name, reason: MalformedReason::Shape(e.to_string()) })?;

        match sets.iter_mut().find(|s| s.set.canonical_name() == card.set.canonical_name()) {
            Some(group) => group.cards.push(card),
            None => sets.push(SetRecords { set: card.set.clone(), cards: vec![card] }),
        }
    }

    sets.sort_by_key(|s| s.set.canonical_name());
    Ok(sets)
}

fn is_creature_supertype(supertype: &str) -> bool {
    supertype == "Pokémon" || supertype.eq_ignore_ascii_case("pokemon")
}

fn leading_number(s: &str) -> Option<u32> {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Accept `"30"`, `"30+"`, `"10×"`, `""`, `null` or a bare number.
fn optional_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid number {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => {
            leading_number(&s).map(Some).ok_or_else(|| serde::de::Error::custom(format!("invalid number {s:?}")))
        }
        Some(other) => Err(serde::de::Error::custom(format!("expected a number or string, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "data": [
            {
                "name": "Alakazam", "supertype": "Pokémon", "subtypes": ["Stage 2"], "hp": "80",
                "types": ["Psychic"], "evolvesFrom": "Kadabra",
                "attacks": [{"name": "Confuse Ray", "cost": ["Psychic", "Psychic", "Psychic"], "damage": "30",
                             "text": "Flip a coin. If heads, the Defending Pokémon is now Confused."}],
                "weaknesses": [{"type": "Psychic", "value": "×2"}],
                "retreatCost": ["Colorless", "Colorless", "Colorless"],
                "set": {"id": "base1", "name": "Base", "ptcgoCode": "BS"}, "number": "1"
            },
            {
                "name": "Bill", "supertype": "Trainer", "subtypes": ["Supporter"],
                "set": {"id": "base1", "name": "Base"}, "number": "91"
            },
            {
                "name": "Clefable", "supertype": "Pokémon", "subtypes": ["Stage 1"], "hp": "70",
                "types": ["Colorless"], "evolvesFrom": "Clefairy",
                "attacks": [{"name": "Metronome", "cost": ["Colorless"], "damage": "", "text": ""}],
                "resistances": [{"type": "Psychic", "value": "-30"}],
                "set": {"id": "base2", "name": "Jungle", "ptcgoCode": "JU"}, "number": "1"
            }
        ]
    }"#;

    #[test]
    fn loads_creatures_grouped_by_set() {
        let sets = load_dataset(DOCUMENT).unwrap();
        let names: Vec<_> = sets.iter().map(|s| s.set.canonical_name()).collect();
        assert_eq!(names, vec!["base", "jungle"]);
        assert_eq!(sets[0].cards.len(), 1);

        let alakazam = &sets[0].cards[0];
        assert_eq!(alakazam.hp, Some(80));
        assert_eq!(alakazam.retreat(), 3);
        assert_eq!(alakazam.stage().unwrap(), Stage::Stage2 { from: "Kadabra".to_string() });
        assert_eq!(alakazam.attacks[0].damage, Some(30));
        assert_eq!(alakazam.identifier(), "Alakazam (BS 1)");

        let clefable = &sets[1].cards[0];
        assert_eq!(clefable.attacks[0].damage, None);
        assert_eq!(clefable.resistances[0].amount(), Some(30));
    }

    #[test]
    fn damage_modifiers_keep_the_leading_number() {
        let attack: AttackRecord =
            serde_json::from_str(r#"{"name": "Comet Punch", "cost": [], "damage": "20×", "text": ""}"#).unwrap();
        assert_eq!(attack.damage, Some(20));

        let attack: AttackRecord = serde_json::from_str(r#"{"name": "Tackle", "damage": 10}"#).unwrap();
        assert_eq!(attack.damage, Some(10));
        assert_eq!(attack.text, "");
    }

    #[test]
    fn missing_stage_tag_is_malformed() {
        let mut card = load_dataset(DOCUMENT).unwrap().remove(0).cards.remove(0);
        card.subtypes = vec!["Baby".to_string()];
        match card.stage() {
            Err(Error::Malformed { reason: MalformedReason::MissingStage { .. }, card }) => {
                assert_eq!(card, "Alakazam (BS 1)")
            }
            other => panic!("expected a malformed stage, got {other:?}"),
        }
    }

    #[test]
    fn attack_list_with_wrong_shape_aborts() {
        let json = r#"[{"name": "Onix", "supertype": "Pokémon", "subtypes": ["Basic"], "hp": "90",
                        "attacks": {"name": "Harden"}, "set": {"name": "Base"}, "number": "56"}]"#;
        assert!(matches!(
            load_dataset(json),
            Err(Error::Malformed { reason: MalformedReason::Shape(_), .. })
        ));
    }

    #[test]
    fn canonical_set_names() {
        let set = SetInfo { name: "Base Set 2".to_string(), ptcgo_code: None, id: Some("base4".to_string()) };
        assert_eq!(set.canonical_name(), "base_set_2");
        assert_eq!(set.short_code(), "base4");
    }
}
