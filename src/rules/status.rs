use crate::Rule;
use crate::effect::Status;
use crate::engine::BucketMask;

/// Attacks without text only deal their base damage.
pub fn rule_plain_damage() -> Rule {
    rule! {
        name: "plain damage",
        pattern: r"^$",
        captures: {},
        examples: [""],
        build: |b, _, damage| b.damage(damage),
    }
}

pub fn rule_inflict_status() -> Rule {
    rule! {
        name: "inflict status",
        pattern: r"^The Defending Pokémon is now (?P<status>Asleep|Confused|Paralyzed|Poisoned)\.$",
        buckets: BucketMask::DEFENDING.bits(),
        captures: { status: Status },
        examples: [
            "The Defending Pokémon is now Asleep.",
            "The Defending Pokémon is now Poisoned.",
        ],
        build: |b, caps, damage| b.damage(damage).inflict(caps.status),
    }
}

pub fn rule_inflict_two_statuses() -> Rule {
    rule! {
        name: "inflict two statuses",
        pattern: r"^The Defending Pokémon is now (?P<first>Asleep|Confused|Paralyzed|Poisoned) and (?P<second>Asleep|Confused|Paralyzed|Poisoned)\.$",
        buckets: BucketMask::DEFENDING.bits(),
        captures: { first: Status, second: Status },
        examples: ["The Defending Pokémon is now Confused and Poisoned."],
        build: |b, caps, damage| b.damage(damage).inflict(caps.first).inflict(caps.second),
    }
}

/// Poison that places more than one damage counter per turn.
pub fn rule_severe_poison() -> Rule {
    rule! {
        name: "severe poison",
        pattern: r"^The Defending Pokémon is now Poisoned\. It now takes (?P<amount>[0-9]+) Poison damage instead of 10 after each player's turn\.$",
        buckets: BucketMask::DEFENDING.bits(),
        captures: { amount: u32 },
        examples: ["The Defending Pokémon is now Poisoned. It now takes 20 Poison damage instead of 10 after each player's turn."],
        build: |b, caps, damage| b.damage(damage).severe_poison(caps.amount / 10),
    }
}

pub fn rule_requires_defending_status() -> Rule {
    rule! {
        name: "requires defending status",
        pattern: r"^You can't use this attack unless the Defending Pokémon is (?P<status>Asleep|Confused|Paralyzed|Poisoned)\.$",
        buckets: BucketMask::DEFENDING.bits(),
        captures: { status: Status },
        examples: ["You can't use this attack unless the Defending Pokémon is Asleep."],
        build: |b, caps, damage| b.defending_must_be(caps.status).damage(damage),
    }
}
