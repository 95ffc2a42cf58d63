//! Source emission.
//!
//! Each set becomes one generated unit, `<canonical set name>/pokemon.rs`:
//! a fixed prelude, one `CardArchetype` implementation per card in dataset
//! order, and a `build()` registry listing every card. Output is a pure
//! function of the compiled set and the [`Options`], so regenerating from the
//! same dataset is byte-identical.

use crate::api::{CompiledAttack, CompiledCard, CompiledEffect, CompiledSet, Options};
use crate::card::{CardRecord, EnergyType, Stage, TypeModifier};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[path = "emit/printer.rs"]
mod printer;

const PRELUDE: &str = "use crate::*;
use crate::state::Type;
use crate::attack_builder::AttackBuilder;
use crate::carddb::Pokemon;
";

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate", "do", "dyn", "else",
    "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "macro", "match", "mod",
    "move", "mut", "override", "priv", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true",
    "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetUnit {
    pub canonical_name: String,
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub contents: String,
}

/// Render a whole set: prelude, every card, then the registry.
pub fn emit_set(set: &CompiledSet, options: &Options) -> SetUnit {
    let canonical_name = set.set.canonical_name();
    let mut contents = format!(
        "// Generated by cardgen from the {:?} dataset ({}). Do not edit by hand.\n\n{PRELUDE}",
        set.set.name,
        set.set.short_code()
    );

    let mut taken = BTreeSet::new();
    let mut structs = Vec::with_capacity(set.cards.len());
    for card in &set.cards {
        let name = unique(struct_name(&card.record), &mut taken);
        contents.push('\n');
        contents.push_str(&render_card(card, &name, options));
        structs.push(name);
    }

    contents.push('\n');
    contents.push_str(&registry(&structs));

    SetUnit { path: PathBuf::from(&canonical_name).join("pokemon.rs"), canonical_name, contents }
}

/// Render one card's struct, trait implementation and attack procedures.
pub fn emit_card(card: &CompiledCard, options: &Options) -> String {
    render_card(card, &struct_name(&card.record), options)
}

fn render_card(card: &CompiledCard, name: &str, options: &Options) -> String {
    let mut out = String::new();

    out.push_str(&format!("#[derive(Default)]\npub struct {name} {{}}\n"));
    out.push_str(&format!("impl CardArchetype for {name} {{\n"));
    for field in metadata(card, options) {
        out.push_str(&format!("    {field};\n"));
    }
    out.push_str(concat!(
        "\n",
        "    fn card_actions(&self, _player: Player, _card: &Card, _engine: &GameEngine) -> Vec<Action> {\n",
        "        vec![]\n",
        "    }\n",
        "    fn execute(&self, _player: Player, _card: &Card, engine: &GameEngine, _dm: &mut dyn DecisionMaker) -> GameEngine {\n",
        "        engine.clone()\n",
        "    }\n",
    ));

    let mut taken = BTreeSet::new();
    let procedures: Vec<(String, &CompiledAttack)> =
        card.attacks.iter().map(|attack| (unique(fn_name(&attack.name), &mut taken), attack)).collect();

    out.push_str("    fn attacks(&self) -> Vec<Attack> {\n");
    if procedures.is_empty() {
        out.push_str("        vec![]\n");
    } else {
        out.push_str("        vec![\n");
        for (procedure, attack) in &procedures {
            out.push_str(&format!(
                "            Attack::new({:?}, {}, Self::{procedure}),\n",
                attack.name,
                printer::type_list(&attack.cost)
            ));
        }
        out.push_str("        ]\n");
    }
    out.push_str("    }\n}\n");

    out.push_str(&format!("impl {name} {{\n"));
    for (procedure, attack) in &procedures {
        match &attack.effect {
            CompiledEffect::Tree(effects) => {
                out.push_str(&format!("    pub fn {procedure}(builder: AttackBuilder) -> AttackBuilder {{\n"));
                out.push_str(&printer::attack_body(&attack.cost, effects, 2, options));
                out.push('\n');
            }
            CompiledEffect::Unimplemented => {
                out.push_str(&format!("    pub fn {procedure}(_builder: AttackBuilder) -> AttackBuilder {{\n"));
                out.push_str("        unimplemented!();\n");
            }
        }
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    out
}

fn metadata(card: &CompiledCard, options: &Options) -> Vec<String> {
    let record = &card.record;
    let stage = match &card.stage {
        Stage::Basic => "basic!()".to_string(),
        Stage::Stage1 { from } => format!("stage1!({from:?})"),
        Stage::Stage2 { from } => format!("stage2!({from:?})"),
    };

    let weakness = match type_names(&record.weaknesses) {
        Some(types) => format!("weak_to!({types})"),
        None => "no_weakness!()".to_string(),
    };

    let resistance = match type_names(&record.resistances) {
        Some(types) => {
            let amount = record.resistances.iter().find_map(TypeModifier::amount).unwrap_or(options.default_resistance);
            format!("resists!({types}, {amount})")
        }
        None => "no_resistance!()".to_string(),
    };

    let color = if record.types.is_empty() {
        EnergyType::Colorless.to_string()
    } else {
        record.types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
    };

    vec![
        format!("identifier!({:?})", record.identifier()),
        format!("card_name!({:?})", record.name),
        stage,
        format!("hp!({})", card.hp),
        format!("color!({color})"),
        weakness,
        resistance,
        format!("retreat!({})", record.retreat()),
    ]
}

fn type_names(modifiers: &[TypeModifier]) -> Option<String> {
    if modifiers.is_empty() {
        return None;
    }
    Some(modifiers.iter().map(|m| m.energy.as_str()).collect::<Vec<_>>().join(", "))
}

fn registry(structs: &[String]) -> String {
    let mut out = String::from("pub fn build() -> Vec<(String, Box<dyn CardArchetype>)> {\n");
    out.push_str("    let mut entries: Vec<(String, Box<dyn CardArchetype>)> = vec![];\n");
    out.push_str("    for boxed in [\n");
    for name in structs {
        out.push_str(&format!("        Pokemon::create::<{name}>(),\n"));
    }
    out.push_str("    ] {\n");
    out.push_str("        entries.push((boxed.identifier(), boxed));\n");
    out.push_str("    }\n");
    out.push_str("    entries\n}\n");
    out
}

// --- Identifiers -------------------------------------------------------------

fn fold(c: char) -> char {
    match c {
        'é' | 'è' | 'ê' => 'e',
        'É' => 'E',
        other => other,
    }
}

/// `"Farfetch'd"` + `"27"` -> `FarfetchD27`; `"Nidoran ♂"` + `"55"` -> `NidoranM55`.
pub(crate) fn struct_name(record: &CardRecord) -> String {
    let name = record.name.replace('♂', "M").replace('♀', "F").replace("'d", "D").replace("’d", "D");
    let mut ident: String = name.chars().map(fold).filter(char::is_ascii_alphanumeric).collect();
    ident.extend(record.number.chars().filter(char::is_ascii_alphanumeric));

    if !ident.starts_with(|c: char| c.is_ascii_alphabetic()) {
        ident.insert_str(0, "Card");
    }
    ident
}

/// `"Leek Slap"` -> `leek_slap`; `"Double-edge"` -> `double_edge`.
pub(crate) fn fn_name(attack: &str) -> String {
    let name = attack.replace('♂', "m").replace('♀', "f").replace("'d", "_d").replace("’d", "_d");
    let mut ident = String::new();
    for c in name.chars().map(fold) {
        if c.is_ascii_alphanumeric() {
            ident.push(c.to_ascii_lowercase());
        } else if matches!(c, ' ' | '-' | '_') && !ident.is_empty() && !ident.ends_with('_') {
            ident.push('_');
        }
    }
    let ident = ident.trim_end_matches('_');

    if ident.is_empty() {
        "attack".to_string()
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("attack_{ident}")
    } else if KEYWORDS.contains(&ident) {
        format!("{ident}_")
    } else {
        ident.to_string()
    }
}

fn unique(ident: String, taken: &mut BTreeSet<String>) -> String {
    let mut candidate = ident.clone();
    let mut n = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{ident}_{n}");
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::compile_set;
    use crate::card::load_dataset;

    const JUNGLE: &str = r#"[
        {
            "name": "Clefable", "supertype": "Pokémon", "subtypes": ["Stage 1"], "hp": "70",
            "types": ["Colorless"], "evolvesFrom": "Clefairy",
            "weaknesses": [{"type": "Fighting", "value": "×2"}],
            "resistances": [{"type": "Psychic", "value": "-30"}],
            "retreatCost": ["Colorless", "Colorless"],
            "attacks": [
                {"name": "Metronome", "cost": ["Colorless"], "damage": "",
                 "text": "Choose 1 of the Defending Pokémon's attacks. Metronome copies that attack except for its Energy costs and anything else required in order to use that attack, such as discarding Energy cards. (No matter what type the Defending Pokémon is, Clefable's type is still Colorless.)"},
                {"name": "Minimize", "cost": ["Colorless", "Colorless"], "damage": "",
                 "text": "All damage done by attacks to Clefable during your opponent's next turn is reduced by 20 (after applying Weakness and Resistance)."}
            ],
            "set": {"id": "base2", "name": "Jungle", "ptcgoCode": "JU"}, "number": "1"
        },
        {
            "name": "Farfetch'd", "supertype": "Pokémon", "subtypes": ["Basic"], "hp": "50",
            "types": ["Colorless"],
            "attacks": [{"name": "Leek Slap", "cost": ["Colorless"], "damage": "30",
                         "text": "Flip a coin. If tails, this attack does nothing. Either way, you can't use this attack again as long as Farfetch'd stays in play (even putting Farfetch'd on the Bench won't let you use it again)."}],
            "resistances": [{"type": "Psychic", "value": "strong"}],
            "set": {"id": "base2", "name": "Jungle", "ptcgoCode": "JU"}, "number": "27"
        }
    ]"#;

    fn jungle() -> SetUnit {
        let records = load_dataset(JUNGLE).unwrap().remove(0);
        emit_set(&compile_set(&records).unwrap(), &Options::default())
    }

    #[test]
    fn unit_path_uses_canonical_set_name() {
        let unit = jungle();
        assert_eq!(unit.canonical_name, "jungle");
        assert_eq!(unit.path, PathBuf::from("jungle").join("pokemon.rs"));
        assert!(unit.contents.starts_with("// Generated by cardgen from the \"Jungle\" dataset (JU)."));
    }

    #[test]
    fn card_metadata_and_attacks() {
        let unit = jungle();
        let expected = r#"#[derive(Default)]
pub struct Clefable1 {}
impl CardArchetype for Clefable1 {
    identifier!("Clefable (JU 1)");
    card_name!("Clefable");
    stage1!("Clefairy");
    hp!(70);
    color!(Colorless);
    weak_to!(Fighting);
    resists!(Psychic, 30);
    retreat!(2);

    fn card_actions(&self, _player: Player, _card: &Card, _engine: &GameEngine) -> Vec<Action> {
        vec![]
    }
    fn execute(&self, _player: Player, _card: &Card, engine: &GameEngine, _dm: &mut dyn DecisionMaker) -> GameEngine {
        engine.clone()
    }
    fn attacks(&self) -> Vec<Attack> {
        vec![
            Attack::new("Metronome", &[Type::Colorless], Self::metronome),
            Attack::new("Minimize", &[Type::Colorless, Type::Colorless], Self::minimize),
        ]
    }
}
impl Clefable1 {
    pub fn metronome(builder: AttackBuilder) -> AttackBuilder {
        builder
            .attack_cost(&[Type::Colorless])
            .copy_defending_attack_without_costs()
    }
    pub fn minimize(_builder: AttackBuilder) -> AttackBuilder {
        unimplemented!();
    }
}
"#;
        assert!(unit.contents.contains(expected), "unexpected unit:\n{}", unit.contents);
    }

    #[test]
    fn unparseable_resistance_falls_back_to_default() {
        let unit = jungle();
        assert!(unit.contents.contains("pub struct FarfetchD27 {}"));
        assert!(unit.contents.contains("    basic!();\n    hp!(50);"));
        assert!(unit.contents.contains("    no_weakness!();\n    resists!(Psychic, 30);\n    retreat!(0);"));
        assert!(unit.contents.contains("pub fn leek_slap(_builder: AttackBuilder)"));
    }

    #[test]
    fn registry_lists_every_card_in_order() {
        let unit = jungle();
        assert!(unit.contents.ends_with(
            "    for boxed in [\n        Pokemon::create::<Clefable1>(),\n        Pokemon::create::<FarfetchD27>(),\n    ] {\n        \
             entries.push((boxed.identifier(), boxed));\n    }\n    entries\n}\n"
        ));
    }

    #[test]
    fn identifiers() {
        assert_eq!(fn_name("Leek Slap"), "leek_slap");
        assert_eq!(fn_name("Double-edge"), "double_edge");
        assert_eq!(fn_name("Farfetch'd Strike"), "farfetch_d_strike");
        assert_eq!(fn_name("Type"), "type_");
        assert_eq!(fn_name("1,000 Volts"), "attack_1000_volts");
        assert_eq!(fn_name("???"), "attack");
    }

    #[test]
    fn duplicate_identifiers_get_suffixes() {
        let mut taken = BTreeSet::new();
        assert_eq!(unique("tackle".to_string(), &mut taken), "tackle");
        assert_eq!(unique("tackle".to_string(), &mut taken), "tackle_2");
        assert_eq!(unique("tackle".to_string(), &mut taken), "tackle_3");
    }
}
