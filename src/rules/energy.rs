//! Energy discards.
//!
//! A discard the attacker pays "in order to use this attack" is a cost: it
//! sits inside `must(...)` and the rest of the attack only happens if it
//! succeeds. Rules with a trailing clause come before the bare discard rule.

use crate::Rule;
use crate::builder::effects;
use crate::card::EnergyType;
use crate::effect::EnergyFilter;
use crate::engine::BucketMask;

pub fn rule_discard_then_heal() -> Rule {
    rule! {
        name: "discard energy: heal all",
        pattern: r"^Discard (?P<count>[0-9]+) (?P<energy>\w+) Energy cards? attached to (?:Mr\. )?\p{Lu}[^.;,]*? in order to use this attack\. Remove all damage counters from (?:Mr\. )?\p{Lu}[^.;,]*?\.$",
        buckets: BucketMask::DISCARD.bits(),
        captures: { count: u32, energy: EnergyType },
        examples: [
            "Discard 1 Psychic Energy card attached to Kadabra in order to use this attack. Remove all damage counters from Kadabra.",
        ],
        build: |b, caps| {
            b.must(effects().discard_attacking_energy_cards(EnergyFilter::Typed(caps.energy), caps.count))
                .heal_all_attacking()
        },
    }
}

pub fn rule_discard_then_retaliate() -> Rule {
    rule! {
        name: "discard energy: retaliate knock out",
        pattern: r"^Discard (?P<count>[0-9]+) (?P<energy>\w+) Energy cards? attached to (?:Mr\. )?\p{Lu}[^.;,]*? in order to use this attack\. If a Pokémon Knocks Out (?:Mr\. )?\p{Lu}[^.;,]*? during your opponent's next turn, Knock Out that Pokémon\.$",
        buckets: BucketMask::DISCARD.bits(),
        captures: { count: u32, energy: EnergyType },
        examples: [
            "Discard 1 Psychic Energy card attached to Gastly in order to use this attack. If a Pokémon Knocks Out Gastly during your opponent's next turn, Knock Out that Pokémon.",
        ],
        build: |b, caps, damage| {
            b.must(effects().discard_attacking_energy_cards(EnergyFilter::Typed(caps.energy), caps.count))
                .damage(damage)
                .knock_out_attacker_if_attacking_is_knocked_out_next_turn()
        },
    }
}

pub fn rule_discard_then_barrier() -> Rule {
    rule! {
        name: "discard energy: barrier",
        pattern: r"^Discard (?P<count>[0-9]+) (?P<energy>\w+) Energy cards? attached to (?:Mr\. )?\p{Lu}[^.;,]*? in order to use this attack\. During your opponent's next turn, prevent all effects of attacks, including damage, done to (?:Mr\. )?\p{Lu}[^.;,]*?\.$",
        buckets: BucketMask::DISCARD.bits(),
        captures: { count: u32, energy: EnergyType },
        examples: [
            "Discard 1 Psychic Energy card attached to Mewtwo in order to use this attack. During your opponent's next turn, prevent all effects of attacks, including damage, done to Mewtwo.",
        ],
        build: |b, caps, damage| {
            b.must(effects().discard_attacking_energy_cards(EnergyFilter::Typed(caps.energy), caps.count))
                .damage(damage)
                .prevent_damage_and_effects_during_opponents_next_turn()
        },
    }
}

pub fn rule_discard_typed() -> Rule {
    rule! {
        name: "discard typed energy",
        pattern: r"^Discard (?P<count>[0-9]+) (?P<energy>\w+) Energy cards? attached to (?:Mr\. )?\p{Lu}[^.;,]*? in order to use this attack\.$",
        buckets: BucketMask::DISCARD.bits(),
        captures: { count: u32, energy: EnergyType },
        examples: [
            "Discard 1 Fire Energy card attached to Charmeleon in order to use this attack.",
            "Discard 2 Water Energy cards attached to Blastoise in order to use this attack.",
        ],
        build: |b, caps, damage| {
            b.must(effects().discard_attacking_energy_cards(EnergyFilter::Typed(caps.energy), caps.count))
                .damage(damage)
        },
    }
}

pub fn rule_discard_any() -> Rule {
    rule! {
        name: "discard any energy",
        pattern: r"^Discard (?P<count>[0-9]+) Energy cards? attached to (?:Mr\. )?\p{Lu}[^.;,]*? in order to use this attack\.$",
        buckets: BucketMask::DISCARD.bits(),
        captures: { count: u32 },
        examples: ["Discard 2 Energy cards attached to Charizard in order to use this attack."],
        build: |b, caps, damage| {
            b.must(effects().discard_attacking_energy_cards(EnergyFilter::Any, caps.count)).damage(damage)
        },
    }
}

pub fn rule_discard_all() -> Rule {
    rule! {
        name: "discard all energy",
        pattern: r"^Discard all Energy cards attached to (?:Mr\. )?\p{Lu}[^.;,]*? in order to use this attack\.$",
        buckets: BucketMask::DISCARD.bits(),
        captures: {},
        examples: ["Discard all Energy cards attached to Zapdos in order to use this attack."],
        build: |b, _, damage| b.must(effects().discard_all_attacking_energy_cards()).damage(damage),
    }
}

pub fn rule_discard_defending_energy() -> Rule {
    rule! {
        name: "discard defending energy",
        pattern: r"^If the Defending Pokémon has any Energy cards attached to it, choose (?P<count>[0-9]+) of them and discard it\.$",
        buckets: BucketMask::DEFENDING.bits(),
        captures: { count: u32 },
        examples: ["If the Defending Pokémon has any Energy cards attached to it, choose 1 of them and discard it."],
        build: |b, caps, damage| b.discard_defending_energy_cards(EnergyFilter::Any, caps.count).damage(damage),
    }
}
