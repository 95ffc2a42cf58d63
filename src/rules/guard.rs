use crate::Rule;
use crate::builder::effects;
use crate::engine::BucketMask;

pub fn rule_flip_prevent_damage() -> Rule {
    rule! {
        name: "flip: prevent damage",
        pattern: r"^Flip a coin\. If heads, prevent all damage done to (?:Mr\. )?\p{Lu}[^.;,]*? during your opponent's next turn\.$",
        buckets: BucketMask::COIN.bits(),
        captures: {},
        examples: ["Flip a coin. If heads, prevent all damage done to Squirtle during your opponent's next turn."],
        build: |b, _, damage| {
            b.flip_a_coin().damage(damage).if_heads(effects().prevent_damage_during_opponents_next_turn())
        },
    }
}

pub fn rule_flip_prevent_damage_and_effects() -> Rule {
    rule! {
        name: "flip: prevent damage and effects",
        pattern: r"^Flip a coin\. If heads, during your opponent's next turn, prevent all effects of attacks, including damage, done to (?:Mr\. )?\p{Lu}[^.;,]*?\.$",
        buckets: BucketMask::COIN.bits(),
        captures: {},
        examples: [
            "Flip a coin. If heads, during your opponent's next turn, prevent all effects of attacks, including damage, done to Raichu.",
        ],
        build: |b, _, damage| {
            b.flip_a_coin().damage(damage).if_heads(effects().prevent_damage_and_effects_during_opponents_next_turn())
        },
    }
}

/// Small hits are absorbed; anything above the threshold gets through whole.
pub fn rule_prevent_damage_up_to() -> Rule {
    rule! {
        name: "prevent damage up to",
        pattern: r"^During your opponent's next turn, whenever (?P<amount>[0-9]+) or less damage is done to (?:Mr\. )?\p{Lu}[^.;,]*?, prevent that damage\.$",
        buckets: BucketMask::NEXT_TURN.bits(),
        captures: { amount: u32 },
        examples: ["During your opponent's next turn, whenever 30 or less damage is done to Onix, prevent that damage."],
        build: |b, caps, damage| b.damage(damage).prevent_damage_up_to_during_opponents_next_turn(caps.amount),
    }
}

pub fn rule_prevent_damage_and_effects() -> Rule {
    rule! {
        name: "prevent damage and effects",
        pattern: r"^During your opponent's next turn, prevent all effects of attacks, including damage, done to (?:Mr\. )?\p{Lu}[^.;,]*?\.$",
        buckets: BucketMask::NEXT_TURN.bits(),
        captures: {},
        examples: ["During your opponent's next turn, prevent all effects of attacks, including damage, done to Mewtwo."],
        build: |b, _, damage| b.damage(damage).prevent_damage_and_effects_during_opponents_next_turn(),
    }
}

pub fn rule_smokescreen() -> Rule {
    rule! {
        name: "defending attack fails on tails",
        pattern: r"^If the Defending Pokémon tries to attack during your opponent's next turn, your opponent flips a coin\. If tails, that attack does nothing\.$",
        buckets: BucketMask::NEXT_TURN.bits(),
        captures: {},
        examples: [
            "If the Defending Pokémon tries to attack during your opponent's next turn, your opponent flips a coin. If tails, that attack does nothing.",
        ],
        build: |b, _, damage| b.damage(damage).prevent_attack_on_a_flip_during_opponents_next_turn(),
    }
}
