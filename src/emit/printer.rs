//! Builder-chain printing.
//!
//! Every node prints as `.method(args)` where `method` is
//! [`EffectOperation::method_name`], so generated code mirrors the effect
//! builder one-to-one. Nested sequences become `|e| ...` closures: inline when
//! they are short and flat, as an indented block otherwise.

use crate::api::Options;
use crate::card::EnergyType;
use crate::effect::{Direction, EffectOperation, EffectSequence, Guard};

const STEP: &str = "    ";

/// Print an attack body starting at `indent` levels: `builder`, the cost
/// check, then one line per top-level node.
pub(crate) fn attack_body(cost: &[EnergyType], effects: &EffectSequence, indent: usize, options: &Options) -> String {
    let pad = STEP.repeat(indent);
    let mut lines = vec![format!("{pad}builder"), format!("{pad}{STEP}.attack_cost({})", type_list(cost))];
    for op in effects.ops() {
        lines.push(format!("{pad}{STEP}{}", call(op, indent + 1, options)));
    }
    lines.join("\n")
}

/// `&[Type::Fire, Type::Colorless]`
pub(crate) fn type_list(types: &[EnergyType]) -> String {
    let items: Vec<String> = types.iter().map(|t| format!("Type::{t}")).collect();
    format!("&[{}]", items.join(", "))
}

fn call(op: &EffectOperation, indent: usize, options: &Options) -> String {
    let args = match op.children() {
        Some(nested) => closure(nested, indent, options),
        None => arguments(op),
    };
    format!(".{}({args})", op.method_name())
}

fn closure(seq: &EffectSequence, indent: usize, options: &Options) -> String {
    let flat = seq.ops().iter().all(|op| op.children().is_none());
    if flat && seq.len() <= options.inline_limit {
        let chain: String = seq.ops().iter().map(|op| call(op, indent, options)).collect();
        return format!("|e| e{chain}");
    }

    let pad = STEP.repeat(indent);
    let mut out = format!("|e| {{\n{pad}{STEP}e");
    for op in seq.ops() {
        out.push_str(&format!("\n{pad}{STEP}{STEP}{}", call(op, indent + 2, options)));
    }
    out.push_str(&format!("\n{pad}}}"));
    out
}

fn arguments(op: &EffectOperation) -> String {
    use EffectOperation::*;
    match op {
        Damage(n) | SeverePoison(n) | SelfDamage(n) | DamagePerHeads(n) | Heal(n) | Draw(n) => n.to_string(),
        FlipCoin(1) => String::new(),
        FlipCoin(n) => n.to_string(),
        CounterScalingDamage { per_counter, direction: Direction::Times, .. } => per_counter.to_string(),
        CounterScalingDamage { base, per_counter, .. } => format!("{base}, {per_counter}"),
        EnergyScalingDamage { base, per_energy, energy, cap } => format!("{base}, {per_energy}, Type::{energy}, {cap}"),
        DefendingEnergyScalingDamage { base, per_card } => format!("{base}, {per_card}"),
        DiscardEnergy { energy, count, .. } => {
            let items: Vec<String> = (0..*count).map(|_| format!("Type::{energy}")).collect();
            format!("&[{}]", items.join(", "))
        }
        GuardEffect(Guard::CapDamage(amount)) => amount.to_string(),
        ChangeOwnResistanceExcept(types) | ChangeOpponentWeaknessExcept(types) => type_list(types),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::effects;
    use crate::effect::{EffectSequence, EnergyFilter, Status};

    fn body(seq: EffectSequence) -> String {
        attack_body(&[EnergyType::Colorless], &seq, 0, &Options::default())
    }

    #[test]
    fn flat_chain() {
        let seq = effects().damage(20).asleep().build();
        assert_eq!(body(seq), "builder\n    .attack_cost(&[Type::Colorless])\n    .damage(20)\n    .asleep()");
    }

    #[test]
    fn short_branches_print_inline() {
        let seq = effects().flip_a_coin().damage(10).if_heads(effects().paralyze()).build();
        assert_eq!(
            body(seq),
            "builder\n    .attack_cost(&[Type::Colorless])\n    .flip_a_coin()\n    .damage(10)\n    .if_heads(|e| e.paralyze())"
        );
    }

    #[test]
    fn long_branches_print_as_blocks() {
        let seq = effects().if_tails(effects().damage(30).damage_self(10).confuse()).build();
        let expected = "builder\n    .attack_cost(&[Type::Colorless])\n    .if_tails(|e| {\n        e\n            \
                        .damage(30)\n            .damage_self(10)\n            .confuse()\n    })";
        assert_eq!(body(seq), expected);
    }

    #[test]
    fn discards_repeat_the_type_per_card() {
        let seq = effects().must(effects().discard_attacking_energy_cards(EnergyFilter::Any, 2)).build();
        assert!(body(seq).ends_with(".must(|e| e.discard_attacking_energy_cards(&[Type::Any, Type::Any]))"));

        let seq = effects().must(effects().discard_attacking_energy_cards(EnergyFilter::Typed(EnergyType::Fire), 1));
        assert!(body(seq.build()).ends_with("(&[Type::Fire]))"));
    }

    #[test]
    fn arguments_follow_builder_signatures() {
        let seq = effects()
            .flip_coins(3)
            .damage_per_damage_counter_on_itself(10)
            .damage_plus_per_damage_counter_on_itself(0, 10)
            .damage_minus_per_damage_counter_on_itself(50, 10)
            .damage_plus_per_extra_energy_on_attacking(40, 10, EnergyType::Water, 2)
            .prevent_damage_up_to_during_opponents_next_turn(30)
            .change_defending_weakness_except(&[EnergyType::Colorless])
            .defending_must_be(Status::Asleep)
            .build();
        let lines: Vec<String> = body(seq).lines().skip(2).map(|l| l.trim().to_string()).collect();
        assert_eq!(
            lines,
            vec![
                ".flip_coins(3)",
                ".damage_per_damage_counter_on_itself(10)",
                ".damage_plus_per_damage_counter_on_itself(0, 10)",
                ".damage_minus_per_damage_counter_on_itself(50, 10)",
                ".damage_plus_per_extra_energy_on_attacking(40, 10, Type::Water, 2)",
                ".prevent_damage_up_to_during_opponents_next_turn(30)",
                ".change_defending_weakness_except(&[Type::Colorless])",
                ".defending_must_be_asleep()",
            ]
        );
    }
}
