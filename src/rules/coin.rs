//! Coin-flip rules.
//!
//! A single flip prints as `flip_a_coin()` followed by `if_heads`/`if_tails`
//! branches. Base damage is dealt outside the branches unless the text makes
//! the damage itself depend on the flip.

use crate::Rule;
use crate::builder::effects;
use crate::effect::Status;
use crate::engine::BucketMask;

pub fn rule_flip_heads_status() -> Rule {
    rule! {
        name: "flip: heads status",
        pattern: r"^Flip a coin\. If heads, the Defending Pokémon is now (?P<status>Asleep|Confused|Paralyzed|Poisoned)\.$",
        buckets: BucketMask::COIN.bits(),
        captures: { status: Status },
        examples: [
            "Flip a coin. If heads, the Defending Pokémon is now Paralyzed.",
            "Flip a coin. If heads, the Defending Pokémon is now Confused.",
        ],
        build: |b, caps, damage| b.flip_a_coin().damage(damage).if_heads(effects().inflict(caps.status)),
    }
}

/// Heads and tails each inflict a status. Only sleep, confusion or paralysis
/// appear on tails.
pub fn rule_flip_heads_or_tails_status() -> Rule {
    rule! {
        name: "flip: heads status, tails status",
        pattern: r"^Flip a coin\. If heads, the Defending Pokémon is now (?P<heads>Asleep|Confused|Paralyzed|Poisoned); if tails, it is now (?P<tails>Asleep|Confused|Paralyzed)\.$",
        buckets: BucketMask::COIN.bits(),
        captures: { heads: Status, tails: Status },
        examples: ["Flip a coin. If heads, the Defending Pokémon is now Paralyzed; if tails, it is now Confused."],
        build: |b, caps, damage| {
            b.flip_a_coin()
                .damage(damage)
                .if_heads(effects().inflict(caps.heads))
                .if_tails(effects().inflict(caps.tails))
        },
    }
}

pub fn rule_flip_tails_self_damage() -> Rule {
    rule! {
        name: "flip: tails self damage",
        pattern: r"^Flip a coin\. If tails, (?:Mr\. )?\p{Lu}[^.;,]*? does (?P<amount>[0-9]+) damage to itself\.$",
        buckets: BucketMask::COIN.bits(),
        captures: { amount: u32 },
        examples: ["Flip a coin. If tails, Rapidash does 30 damage to itself."],
        build: |b, caps, damage| b.flip_a_coin().damage(damage).if_tails(effects().damage_self(caps.amount)),
    }
}

pub fn rule_flip_coins_per_heads() -> Rule {
    rule! {
        name: "flip coins: damage per heads",
        pattern: r"^Flip (?P<coins>[0-9]+) coins\. Does (?P<amount>[0-9]+) damage times the number of heads\.$",
        buckets: BucketMask::COIN.bits(),
        captures: { coins: u32, amount: u32 },
        examples: [
            "Flip 2 coins. Does 30 damage times the number of heads.",
            "Flip 4 coins. Does 20 damage times the number of heads.",
        ],
        build: |b, caps| b.flip_coins(caps.coins).damage_per_heads(caps.amount),
    }
}

/// Heads: base plus bonus. Tails: base, and the attacker hurts itself.
pub fn rule_flip_bonus_or_recoil() -> Rule {
    rule! {
        name: "flip: heads bonus, tails recoil",
        pattern: r"^Flip a coin\. If heads, this attack does (?P<base>[0-9]+) damage plus (?P<extra>[0-9]+) more damage; if tails, this attack does (?P<tails_base>[0-9]+) damage (?:plus|and) (?:Mr\. )?\p{Lu}[^.;,]*? does (?P<recoil>[0-9]+) damage to itself\.$",
        buckets: BucketMask::COIN.bits(),
        captures: { base: u32, extra: u32, tails_base: u32, recoil: u32 },
        examples: [
            "Flip a coin. If heads, this attack does 30 damage plus 10 more damage; if tails, this attack does 30 damage and Electabuzz does 10 damage to itself.",
        ],
        build: |b, caps| {
            let heads = caps.base.checked_add(caps.extra)?;
            Some(
                b.flip_a_coin()
                    .if_heads(effects().damage(heads))
                    .if_tails(effects().damage(caps.tails_base).damage_self(caps.recoil)),
            )
        },
    }
}

pub fn rule_flip_bonus() -> Rule {
    rule! {
        name: "flip: heads bonus",
        pattern: r"^Flip a coin\. If heads, this attack does (?P<base>[0-9]+) damage plus (?P<extra>[0-9]+) more damage; if tails, this attack does (?P<tails_base>[0-9]+) damage\.$",
        buckets: BucketMask::COIN.bits(),
        captures: { base: u32, extra: u32, tails_base: u32 },
        examples: [
            "Flip a coin. If heads, this attack does 10 damage plus 20 more damage; if tails, this attack does 10 damage.",
        ],
        build: |b, caps| {
            let heads = caps.base.checked_add(caps.extra)?;
            Some(b.flip_a_coin().if_heads(effects().damage(heads)).if_tails(effects().damage(caps.tails_base)))
        },
    }
}

pub fn rule_flip_extra_damage() -> Rule {
    rule! {
        name: "flip: heads extra damage",
        pattern: r"^Flip a coin\. If heads, this attack does (?P<extra>[0-9]+) more damage\.$",
        buckets: BucketMask::COIN.bits(),
        captures: { extra: u32 },
        examples: ["Flip a coin. If heads, this attack does 20 more damage."],
        build: |b, caps, damage| b.flip_a_coin().damage(damage).if_heads(effects().damage(caps.extra)),
    }
}

pub fn rule_flip_tails_nothing() -> Rule {
    rule! {
        name: "flip: tails does nothing",
        pattern: r"^Flip a coin\. If tails, this attack does nothing\.$",
        buckets: BucketMask::COIN.bits(),
        captures: {},
        examples: ["Flip a coin. If tails, this attack does nothing."],
        build: |b, _, damage| b.flip_a_coin().if_heads(effects().damage(damage)),
    }
}

pub fn rule_flip_heads_draw() -> Rule {
    rule! {
        name: "flip: heads draw",
        pattern: r"^Flip a coin\. If heads, draw a card\.$",
        buckets: BucketMask::COIN.bits(),
        captures: {},
        examples: ["Flip a coin. If heads, draw a card."],
        build: |b, _, damage| b.flip_a_coin().damage(damage).if_heads(effects().draw(1)),
    }
}
