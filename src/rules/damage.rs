use crate::Rule;
use crate::builder::effects;
use crate::card::EnergyType;
use crate::engine::BucketMask;

pub fn rule_damage_per_own_counter() -> Rule {
    rule! {
        name: "damage per own damage counter",
        pattern: r"^Does (?P<amount>[0-9]+) damage times the number of damage counters on (?:Mr\. )?\p{Lu}[^.;,]*?\.$",
        buckets: BucketMask::HAS_DIGITS.bits(),
        captures: { amount: u32 },
        examples: ["Does 10 damage times the number of damage counters on Rhydon."],
        build: |b, caps| b.damage_per_damage_counter_on_itself(caps.amount),
    }
}

pub fn rule_damage_minus_per_own_counter() -> Rule {
    rule! {
        name: "damage minus per own damage counter",
        pattern: r"^Does (?P<base>[0-9]+) damage minus (?P<minus>[0-9]+) damage for each damage counter on (?:Mr\. )?\p{Lu}[^.;,]*?\.$",
        buckets: BucketMask::HAS_DIGITS.bits(),
        captures: { base: u32, minus: u32 },
        examples: ["Does 50 damage minus 10 damage for each damage counter on Machoke."],
        build: |b, caps| b.damage_minus_per_damage_counter_on_itself(caps.base, caps.minus),
    }
}

pub fn rule_damage_plus_per_defending_counter() -> Rule {
    rule! {
        name: "damage plus per defending damage counter",
        pattern: r"^Does (?P<base>[0-9]+) damage plus (?P<plus>[0-9]+) more damage for each damage counter on the Defending Pokémon\.$",
        buckets: BucketMask::HAS_DIGITS.bits(),
        captures: { base: u32, plus: u32 },
        examples: ["Does 20 damage plus 10 more damage for each damage counter on the Defending Pokémon."],
        build: |b, caps| b.damage_plus_per_damage_counter_on_defending(caps.base, caps.plus),
    }
}

pub fn rule_damage_plus_per_own_counter() -> Rule {
    rule! {
        name: "damage plus per own damage counter",
        pattern: r"^Does (?P<base>[0-9]+) damage plus (?P<plus>[0-9]+) more damage for each damage counter on (?:Mr\. )?\p{Lu}[^.;,]*?\.$",
        buckets: BucketMask::HAS_DIGITS.bits(),
        captures: { base: u32, plus: u32 },
        examples: ["Does 10 damage plus 10 more damage for each damage counter on Dodrio."],
        build: |b, caps| b.damage_plus_per_damage_counter_on_itself(caps.base, caps.plus),
    }
}

pub fn rule_half_remaining_hp() -> Rule {
    rule! {
        name: "half of defending remaining hp",
        pattern: r"^Does damage to the Defending Pokémon equal to half the Defending Pokémon's remaining HP\.$",
        buckets: BucketMask::DEFENDING.bits(),
        captures: {},
        examples: ["Does damage to the Defending Pokémon equal to half the Defending Pokémon's remaining HP."],
        build: |b, _| b.damage_half_defending_remaining_hp(),
    }
}

pub fn rule_damage_plus_per_defending_energy_card() -> Rule {
    rule! {
        name: "damage plus per defending energy card",
        pattern: r"^Does (?P<base>[0-9]+) damage plus (?P<plus>[0-9]+) more damage for each Energy card attached to the Defending Pokémon\.$",
        buckets: BucketMask::DEFENDING.bits(),
        captures: { base: u32, plus: u32 },
        examples: ["Does 10 damage plus 10 more damage for each Energy card attached to the Defending Pokémon."],
        build: |b, caps| b.damage_plus_per_energy_card_on_defending(caps.base, caps.plus),
    }
}

/// Both energy names must agree; a mismatch is left unimplemented.
pub fn rule_damage_plus_per_extra_energy() -> Rule {
    rule! {
        name: "damage plus per extra energy",
        pattern: r"^Does (?P<base>[0-9]+) damage plus (?P<plus>[0-9]+) more damage for each (?P<energy>\w+) Energy attached to (?:Mr\. )?\p{Lu}[^.;,]*? but not used to pay for this attack's Energy cost\. Extra (?P<again>\w+) Energy after the (?P<cap>[0-9]+)(?:st|nd|rd|th) (?:doesn't|don't) count\.$",
        buckets: BucketMask::HAS_DIGITS.bits(),
        captures: { base: u32, plus: u32, energy: EnergyType, again: EnergyType, cap: u32 },
        examples: [
            "Does 40 damage plus 10 more damage for each Water Energy attached to Blastoise but not used to pay for this attack's Energy cost. Extra Water Energy after the 2nd doesn't count.",
        ],
        build: |b, caps| {
            (caps.energy == caps.again)
                .then(|| b.damage_plus_per_extra_energy_on_attacking(caps.base, caps.plus, caps.energy, caps.cap))
        },
    }
}

/// Healing only happens if the attack's damage got through.
pub fn rule_heal_if_did_damage() -> Rule {
    rule! {
        name: "heal if did damage",
        pattern: r"^Unless all damage from this attack is prevented, you may remove (?P<counters>[0-9]+) damage counters? from (?:Mr\. )?\p{Lu}[^.;,]*?\.$",
        buckets: BucketMask::HAS_DIGITS.bits(),
        captures: { counters: u32 },
        examples: ["Unless all damage from this attack is prevented, you may remove 1 damage counter from Kadabra."],
        build: |b, caps, damage| {
            let amount = caps.counters.checked_mul(10)?;
            Some(b.damage(damage).if_did_damage(effects().heal_attacking(amount)))
        },
    }
}

/// Generic recoil. Listed late: the bench and coin rules also end in self damage.
pub fn rule_self_damage() -> Rule {
    rule! {
        name: "self damage",
        pattern: r"^(?:Mr\. )?\p{Lu}[^.;,]*? does (?P<amount>[0-9]+) damage to itself\.$",
        buckets: BucketMask::HAS_DIGITS.bits(),
        captures: { amount: u32 },
        examples: ["Charizard does 30 damage to itself.", "Mr. Mime does 10 damage to itself."],
        build: |b, caps, damage| b.damage(damage).damage_self(caps.amount),
    }
}
