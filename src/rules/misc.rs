use crate::Rule;
use crate::card::EnergyType;
use crate::engine::BucketMask;

pub fn rule_once_while_in_play() -> Rule {
    rule! {
        name: "once while in play",
        pattern: r"^You can't use this attack again as long as (?:Mr\. )?\p{Lu}[^.;,]*? stays in play\.$",
        captures: {},
        examples: ["You can't use this attack again as long as Zapdos stays in play."],
        build: |b, _, damage| b.once_while_in_play().damage(damage),
    }
}

pub fn rule_disable_defending_attack() -> Rule {
    rule! {
        name: "disable defending attack",
        pattern: r"^Choose 1 of the Defending Pokémon's attacks\. That Pokémon can't use that attack during your opponent's next turn\.$",
        buckets: BucketMask::DEFENDING.bits(),
        captures: {},
        examples: [
            "Choose 1 of the Defending Pokémon's attacks. That Pokémon can't use that attack during your opponent's next turn.",
        ],
        build: |b, _, damage| b.damage(damage).disable_defending_attack(),
    }
}

pub fn rule_copy_defending_attack() -> Rule {
    rule! {
        name: "copy defending attack",
        pattern: r"^Choose 1 of the Defending Pokémon's attacks\. (?:Mr\. )?\p{Lu}[^.;,]*? copies that attack except for its Energy costs?(?: and anything else required in order to use that attack, such as discarding Energy cards)?\.$",
        buckets: BucketMask::DEFENDING.bits(),
        captures: {},
        examples: [
            "Choose 1 of the Defending Pokémon's attacks. Metronome copies that attack except for its Energy costs and anything else required in order to use that attack, such as discarding Energy cards.",
            "Choose 1 of the Defending Pokémon's attacks. Mirror Move copies that attack except for its Energy cost.",
        ],
        build: |b, _| b.copy_defending_attack_without_costs(),
    }
}

pub fn rule_change_defending_weakness() -> Rule {
    rule! {
        name: "change defending weakness",
        pattern: r"^If the Defending Pokémon has a Weakness, you may change it to a type of your choice other than (?P<excluded>\w+)\.$",
        buckets: BucketMask::DEFENDING.bits(),
        captures: { excluded: EnergyType },
        examples: [
            "If the Defending Pokémon has a Weakness, you may change it to a type of your choice other than Colorless.",
        ],
        build: |b, caps| b.change_defending_weakness_except(&[caps.excluded]),
    }
}

pub fn rule_change_own_resistance() -> Rule {
    rule! {
        name: "change own resistance",
        pattern: r"^Change (?:Mr\. )?\p{Lu}[^.;,]*?'s Resistance to a type of your choice other than (?P<excluded>\w+)\.$",
        captures: { excluded: EnergyType },
        examples: ["Change Porygon's Resistance to a type of your choice other than Colorless."],
        build: |b, caps| b.change_attacking_resistance_except(&[caps.excluded]),
    }
}

pub fn rule_draw_a_card() -> Rule {
    rule! {
        name: "draw a card",
        pattern: r"^Draw a card\.$",
        captures: {},
        examples: ["Draw a card."],
        build: |b, _, damage| b.damage(damage).draw(1),
    }
}

pub fn rule_draw_cards() -> Rule {
    rule! {
        name: "draw cards",
        pattern: r"^Draw (?P<count>[0-9]+) cards\.$",
        buckets: BucketMask::HAS_DIGITS.bits(),
        captures: { count: u32 },
        examples: ["Draw 2 cards."],
        build: |b, caps, damage| b.damage(damage).draw(caps.count),
    }
}
