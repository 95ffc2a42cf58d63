use crate::Rule;
use crate::builder::effects;
use crate::engine::BucketMask;

/// Both benches take damage, then the attacker hurts itself.
pub fn rule_each_bench_and_self() -> Rule {
    rule! {
        name: "each bench and self damage",
        pattern: r"^Does (?P<bench>[0-9]+) damage to each Pokémon on each player's Bench\. (?:Mr\. )?\p{Lu}[^.;,]*? does (?P<recoil>[0-9]+) damage to itself\.$",
        buckets: BucketMask::BENCH.bits(),
        captures: { bench: u32, recoil: u32 },
        examples: ["Does 20 damage to each Pokémon on each player's Bench. Electrode does 80 damage to itself."],
        build: |b, caps, damage| {
            b.damage(damage)
                .each_own_bench(effects().damage(caps.bench))
                .each_opponents_bench(effects().damage(caps.bench))
                .damage_self(caps.recoil)
        },
    }
}

pub fn rule_own_bench() -> Rule {
    rule! {
        name: "own bench damage",
        pattern: r"^Does (?P<bench>[0-9]+) damage to each of your own Benched Pokémon\.$",
        buckets: BucketMask::BENCH.bits(),
        captures: { bench: u32 },
        examples: ["Does 10 damage to each of your own Benched Pokémon."],
        build: |b, caps, damage| b.damage(damage).each_own_bench(effects().damage(caps.bench)),
    }
}

pub fn rule_opponents_bench() -> Rule {
    rule! {
        name: "opponent's bench damage",
        pattern: r"^Does (?P<bench>[0-9]+) damage to each of your opponent's Benched Pokémon\.$",
        buckets: BucketMask::BENCH.bits(),
        captures: { bench: u32 },
        examples: ["Does 10 damage to each of your opponent's Benched Pokémon."],
        build: |b, caps, damage| b.damage(damage).each_opponents_bench(effects().damage(caps.bench)),
    }
}

pub fn rule_switch_defending() -> Rule {
    rule! {
        name: "switch defending",
        pattern: r"^If your opponent has any Benched Pokémon, he or she chooses 1 of them and switches it with the Defending Pokémon\.$",
        buckets: BucketMask::BENCH.bits(),
        captures: {},
        examples: [
            "If your opponent has any Benched Pokémon, he or she chooses 1 of them and switches it with the Defending Pokémon.",
        ],
        build: |b, _, damage| b.damage(damage).switch_defending(),
    }
}
