//! The attack grammar.
//!
//! [`grammar`] is the single ordered list of rules. Order is significant:
//! dispatch is first-match-wins, so a rule must be listed before every more
//! general rule that could also match its text. Each rule carries example
//! texts it must win; `rules/tests.rs` checks them against the whole list.

use crate::Rule;
use once_cell::sync::Lazy;

mod bench;
mod coin;
mod damage;
mod energy;
mod guard;
mod misc;
mod status;

/// The grammar used by the default compiler entry points.
pub static DEFAULT_GRAMMAR: Lazy<Vec<Rule>> = Lazy::new(grammar);

pub fn grammar() -> Vec<Rule> {
    vec![
        status::rule_plain_damage(),
        status::rule_inflict_status(),
        status::rule_inflict_two_statuses(),
        status::rule_severe_poison(),
        status::rule_requires_defending_status(),
        coin::rule_flip_heads_status(),
        coin::rule_flip_heads_or_tails_status(),
        coin::rule_flip_tails_self_damage(),
        coin::rule_flip_coins_per_heads(),
        coin::rule_flip_bonus_or_recoil(),
        coin::rule_flip_bonus(),
        coin::rule_flip_extra_damage(),
        coin::rule_flip_tails_nothing(),
        coin::rule_flip_heads_draw(),
        guard::rule_flip_prevent_damage(),
        guard::rule_flip_prevent_damage_and_effects(),
        damage::rule_damage_per_own_counter(),
        damage::rule_damage_minus_per_own_counter(),
        damage::rule_damage_plus_per_defending_counter(),
        damage::rule_damage_plus_per_own_counter(),
        damage::rule_half_remaining_hp(),
        damage::rule_damage_plus_per_defending_energy_card(),
        damage::rule_damage_plus_per_extra_energy(),
        bench::rule_each_bench_and_self(),
        bench::rule_own_bench(),
        bench::rule_opponents_bench(),
        bench::rule_switch_defending(),
        energy::rule_discard_then_heal(),
        energy::rule_discard_then_retaliate(),
        energy::rule_discard_then_barrier(),
        energy::rule_discard_typed(),
        energy::rule_discard_any(),
        energy::rule_discard_all(),
        energy::rule_discard_defending_energy(),
        damage::rule_heal_if_did_damage(),
        guard::rule_prevent_damage_up_to(),
        guard::rule_prevent_damage_and_effects(),
        guard::rule_smokescreen(),
        misc::rule_once_while_in_play(),
        misc::rule_disable_defending_attack(),
        misc::rule_copy_defending_attack(),
        misc::rule_change_defending_weakness(),
        misc::rule_change_own_resistance(),
        misc::rule_draw_a_card(),
        misc::rule_draw_cards(),
        damage::rule_self_damage(),
    ]
}

#[cfg(test)]
mod tests;
