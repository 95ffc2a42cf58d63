use crate::effect::{Condition, EffectOperation, EffectSequence, EnergyFilter, Status};
use crate::engine::{BucketMask, Dispatcher, Outcome, TriggerInfo};
use crate::normalize::normalize;
use crate::rules::{self, DEFAULT_GRAMMAR};
use crate::{EnergyType, Rule};
use std::collections::BTreeSet;

fn compile(text: &str, damage: Option<u32>) -> Outcome {
    Dispatcher::new(&DEFAULT_GRAMMAR).dispatch(&normalize(text), damage).outcome
}

fn tree(text: &str, damage: Option<u32>) -> Vec<EffectOperation> {
    match compile(text, damage) {
        Outcome::Matched { effects, .. } => effects.0,
        other => panic!("expected {text:?} to compile, got {other:?}"),
    }
}

fn seq(ops: Vec<EffectOperation>) -> EffectSequence {
    EffectSequence(ops)
}

fn all_examples() -> Vec<(&'static str, &'static str)> {
    DEFAULT_GRAMMAR.iter().flat_map(|r| r.examples.iter().map(move |e| (r.name, *e))).collect()
}

// --- Grammar self-check ------------------------------------------------------

#[test]
fn every_example_is_won_by_its_rule() {
    let dispatcher = Dispatcher::new(&DEFAULT_GRAMMAR);
    for (rule, example) in all_examples() {
        let outcome = dispatcher.dispatch(example, Some(10)).outcome;
        assert!(
            matches!(outcome, Outcome::Matched { name, .. } if name == rule),
            "example {example:?} of rule {rule:?} dispatched to {outcome:?}"
        );
    }
}

#[test]
fn examples_are_already_normalized() {
    for (rule, example) in all_examples() {
        assert_eq!(normalize(example), example, "example of rule {rule:?} is not in normalized form");
    }
}

#[test]
fn rule_names_are_unique_and_every_rule_has_examples() {
    let mut seen = BTreeSet::new();
    for rule in DEFAULT_GRAMMAR.iter() {
        assert!(seen.insert(rule.name), "duplicate rule name {:?}", rule.name);
        assert!(!rule.examples.is_empty(), "rule {:?} has no examples", rule.name);
    }
}

#[test]
fn declared_captures_match_pattern_groups() {
    for rule in DEFAULT_GRAMMAR.iter() {
        let declared: BTreeSet<&str> = rule.captures.iter().copied().collect();
        let groups: BTreeSet<&str> = rule.pattern.capture_names().flatten().collect();
        assert_eq!(declared, groups, "capture mismatch in rule {:?}", rule.name);
        assert_eq!(declared.len(), rule.captures.len(), "duplicate capture in rule {:?}", rule.name);
    }
}

#[test]
fn patterns_are_anchored() {
    for rule in DEFAULT_GRAMMAR.iter() {
        let pattern = rule.pattern.as_str();
        assert!(pattern.starts_with('^') && pattern.ends_with('$'), "rule {:?} is not anchored", rule.name);
    }
}

#[test]
fn examples_satisfy_rule_buckets() {
    for rule in DEFAULT_GRAMMAR.iter() {
        let required = BucketMask::from_bits_truncate(rule.buckets);
        if required.is_empty() {
            continue;
        }
        for example in rule.examples {
            let found = TriggerInfo::scan(example).buckets;
            assert!(found.intersects(required), "example {example:?} misses the buckets of rule {:?}", rule.name);
        }
    }
}

#[test]
fn gating_never_changes_the_winner() {
    let gated = Dispatcher::new(&DEFAULT_GRAMMAR);
    let ungated = Dispatcher::ungated(&DEFAULT_GRAMMAR);

    let extra = [
        "Flip a coin. If heads, the Defending Pokémon is now Asleep; if tails, it is now Poisoned.",
        "Does 30 damage to each Benched Pokémon.",
        "Discard 1 Plasma Energy card attached to Zapdos in order to use this attack.",
        "Flip 3 coins. Does 10 damage times the number of tails.",
        "Draw ２ cards.",
        "Flip ３ coins. Does ２０ damage times the number of heads.",
    ];

    for text in all_examples().into_iter().map(|(_, e)| e).chain(extra) {
        let left = gated.dispatch(text, Some(20)).outcome;
        let right = ungated.dispatch(text, Some(20)).outcome;
        assert_eq!(left, right, "gating changed the outcome for {text:?}");
    }
}

#[test]
fn appending_a_rule_keeps_existing_outcomes() {
    let mut extended = rules::grammar();
    extended.push(rule! {
        name: "catch-all",
        pattern: r"^.*$",
        captures: {},
        examples: ["Anything."],
        build: |b, _| b.draw(7),
    });

    let original = Dispatcher::new(&DEFAULT_GRAMMAR);
    let appended = Dispatcher::new(&extended);

    for (_, example) in all_examples() {
        assert_eq!(original.dispatch(example, Some(10)).outcome, appended.dispatch(example, Some(10)).outcome);
    }
    assert_eq!(appended.dispatch("Anything.", None).outcome.rule_name(), Some("catch-all"));
}

#[test]
fn grammar_is_read_only_and_stable() {
    let names: Vec<&str> = rules::grammar().iter().map(|r: &Rule| r.name).collect();
    let again: Vec<&str> = DEFAULT_GRAMMAR.iter().map(|r| r.name).collect();
    assert_eq!(names, again);
}

// --- Compiled trees ------------------------------------------------------------

#[test]
fn asleep_after_damage() {
    assert_eq!(
        tree("The Defending Pokémon is now Asleep.", Some(20)),
        vec![EffectOperation::Damage(20), EffectOperation::InflictStatus(Status::Asleep)]
    );
}

#[test]
fn flip_for_paralysis() {
    assert_eq!(
        tree("Flip a coin. If heads, the Defending Pokémon is now Paralyzed.", Some(10)),
        vec![
            EffectOperation::FlipCoin(1),
            EffectOperation::Damage(10),
            EffectOperation::ConditionalBranch(
                Condition::Heads,
                seq(vec![EffectOperation::InflictStatus(Status::Paralyzed)])
            ),
        ]
    );
}

#[test]
fn empty_text_without_damage_has_no_nodes() {
    assert!(tree("", None).is_empty());
    assert!(tree("   ", None).is_empty());
    assert_eq!(tree("", Some(30)), vec![EffectOperation::Damage(30)]);
}

#[test]
fn unknown_text_is_unmatched() {
    assert_eq!(compile("Search your deck for a Basic Pokémon and put it onto your Bench.", Some(10)), Outcome::Unmatched);
}

#[test]
fn tails_status_only_accepts_sleep_confusion_or_paralysis() {
    let text = "Flip a coin. If heads, the Defending Pokémon is now Asleep. If tails, it is now Poisoned.";
    assert_eq!(compile(text, None), Outcome::Unmatched);

    let text = "Flip a coin. If heads, the Defending Pokémon is now Poisoned. If tails, it is now Confused.";
    assert_eq!(
        tree(text, None),
        vec![
            EffectOperation::FlipCoin(1),
            EffectOperation::ConditionalBranch(
                Condition::Heads,
                seq(vec![EffectOperation::InflictStatus(Status::Poisoned)])
            ),
            EffectOperation::ConditionalBranch(
                Condition::Tails,
                seq(vec![EffectOperation::InflictStatus(Status::Confused)])
            ),
        ]
    );
}

#[test]
fn reminder_text_and_long_phrasing_are_normalized_away() {
    let raw = "Flip 2 coins. This attack does 30 damage times the number of heads.  (Don't apply Weakness.)";
    assert_eq!(tree(raw, Some(30)), vec![EffectOperation::FlipCoin(2), EffectOperation::DamagePerHeads(30)]);
}

#[test]
fn severe_poison_counts_counters() {
    let text = "The Defending Pokémon is now Poisoned. It now takes 20 Poison damage instead of 10 after each \
                player's turn (even if it was already Poisoned).";
    assert_eq!(tree(text, Some(20)), vec![EffectOperation::Damage(20), EffectOperation::SeverePoison(2)]);
}

#[test]
fn heads_bonus_and_tails_recoil() {
    let text = "Flip a coin. If heads, this attack does 30 damage plus 10 more damage. If tails, this attack does \
                30 damage and Electabuzz does 10 damage to itself.";
    assert_eq!(
        tree(text, Some(30)),
        vec![
            EffectOperation::FlipCoin(1),
            EffectOperation::ConditionalBranch(Condition::Heads, seq(vec![EffectOperation::Damage(40)])),
            EffectOperation::ConditionalBranch(
                Condition::Tails,
                seq(vec![EffectOperation::Damage(30), EffectOperation::SelfDamage(10)])
            ),
        ]
    );
}

#[test]
fn self_damage_with_punctuated_name() {
    assert_eq!(
        tree("Farfetch'd does 10 damage to itself.", Some(30)),
        vec![EffectOperation::Damage(30), EffectOperation::SelfDamage(10)]
    );
}

#[test]
fn bench_sweep_before_recoil() {
    let text = "Does 20 damage to each Pokémon on each player's Bench. (Don't apply Weakness and Resistance for \
                Benched Pokémon.) Electrode does 80 damage to itself.";
    let ops = tree(text, Some(80));
    assert_eq!(ops.len(), 4);
    assert_eq!(ops[0], EffectOperation::Damage(80));
    assert_eq!(ops[3], EffectOperation::SelfDamage(80));
    let kinds: Vec<_> = ops.iter().map(EffectOperation::method_name).collect();
    assert_eq!(kinds, vec!["damage", "each_own_bench", "each_opponents_bench", "damage_self"]);
}

#[test]
fn discard_cost_wraps_the_discard() {
    let ops = tree("Discard 1 Fire Energy card attached to Charmeleon in order to use this attack.", Some(50));
    assert_eq!(
        ops,
        vec![
            EffectOperation::CostRequirement(seq(vec![EffectOperation::DiscardEnergy {
                from: crate::effect::Subject::Attacking,
                energy: EnergyFilter::Typed(EnergyType::Fire),
                count: 1,
            }])),
            EffectOperation::Damage(50),
        ]
    );
}

#[test]
fn unknown_energy_type_rejects_the_match() {
    let outcome = compile("Discard 1 Plasma Energy card attached to Zapdos in order to use this attack.", Some(10));
    assert_eq!(outcome.rule_name(), Some("discard typed energy"));
    assert!(matches!(outcome, Outcome::Rejected { .. }));
}

#[test]
fn extra_energy_requires_matching_types() {
    let text = "Does 40 damage plus 10 more damage for each Water Energy attached to Blastoise but not used to pay \
                for this attack's Energy cost. Extra Water Energy after the 2nd doesn’t count.";
    assert_eq!(
        tree(text, Some(40)),
        vec![EffectOperation::EnergyScalingDamage { base: 40, per_energy: 10, energy: EnergyType::Water, cap: 2 }]
    );

    let mismatched = text.replace("Extra Water", "Extra Fire");
    assert!(matches!(compile(&mismatched, Some(40)), Outcome::Rejected { .. }));
}

#[test]
fn did_damage_heal_converts_counters() {
    let text = "Unless all damage from this attack is prevented, you may remove 1 damage counter from Kadabra.";
    assert_eq!(
        tree(text, Some(20)),
        vec![
            EffectOperation::Damage(20),
            EffectOperation::ConditionalBranch(Condition::DidDamage, seq(vec![EffectOperation::Heal(10)])),
        ]
    );
}

#[test]
fn harden_caps_damage() {
    let text = "During your opponent's next turn, whenever 30 or less damage is done to Onix, prevent that damage. \
                (Any other effects of attacks still happen.)";
    assert_eq!(
        tree(text, None),
        vec![EffectOperation::GuardEffect(crate::effect::Guard::CapDamage(30))]
    );
}

#[test]
fn compiling_twice_is_deterministic() {
    for (_, example) in all_examples() {
        assert_eq!(compile(example, Some(10)), compile(example, Some(10)));
    }
}

#[test]
fn self_names_stop_at_clause_boundaries() {
    let compound = [
        "Flip a coin. If heads, the Defending Pokémon is now Paralyzed. Magnemite does 10 damage to itself.",
        "Does 10 damage times the number of damage counters on Rhydon. The Defending Pokémon is now Asleep.",
        "Draw a card. Kadabra does 10 damage to itself.",
        "If heads, Pikachu does 10 damage to itself.",
        "Discard 1 Fire Energy card attached to Charmander. Draw a card in order to use this attack.",
    ];
    for text in compound {
        assert_eq!(compile(text, Some(20)), Outcome::Unmatched, "{text:?} should stay unimplemented");
    }

    assert_eq!(
        tree("Mr. Mime does 10 damage to itself.", Some(10)),
        vec![EffectOperation::Damage(10), EffectOperation::SelfDamage(10)]
    );
}

#[test]
fn oversized_numbers_reject_instead_of_overflowing() {
    let heal = "Unless all damage from this attack is prevented, you may remove 500000000 damage counters from Kadabra.";
    let outcome = compile(heal, Some(20));
    assert_eq!(outcome.rule_name(), Some("heal if did damage"));
    assert!(matches!(outcome, Outcome::Rejected { .. }));

    let bonus = "Flip a coin. If heads, this attack does 4000000000 damage plus 400000000 more damage; if tails, \
                 this attack does 10 damage.";
    let outcome = compile(bonus, None);
    assert_eq!(outcome.rule_name(), Some("flip: heads bonus"));
    assert!(matches!(outcome, Outcome::Rejected { .. }));
}

#[test]
fn non_ascii_digits_never_match_number_captures() {
    let gated = Dispatcher::new(&DEFAULT_GRAMMAR);
    let ungated = Dispatcher::ungated(&DEFAULT_GRAMMAR);
    for text in ["Draw ２ cards.", "Charizard does ３０ damage to itself."] {
        assert_eq!(gated.dispatch(text, None).outcome, Outcome::Unmatched);
        assert_eq!(ungated.dispatch(text, None).outcome, Outcome::Unmatched);
    }
}
