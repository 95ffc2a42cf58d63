//! Chainable effect-tree builder.
//!
//! Rule callbacks describe an attack as a short chain:
//!
//! ```
//! use cardgen::builder::{EffectBuilder, effects};
//!
//! let seq = EffectBuilder::new()
//!     .flip_a_coin()
//!     .damage(10)
//!     .if_heads(effects().paralyze())
//!     .build();
//! assert_eq!(seq.len(), 3);
//! ```
//!
//! Branching methods take a finished sub-sequence (anything convertible into
//! an [`EffectSequence`], typically another builder started with
//! [`effects`]). The child is built independently and stored on the parent
//! node, so every subtree can be inspected and tested on its own.
//!
//! Method names are the names the emitter prints; see
//! [`EffectOperation::method_name`].

use crate::card::EnergyType;
use crate::effect::{
    BenchSide, Condition, Direction, EffectOperation, EffectSequence, EnergyFilter, Guard, Status, Subject,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectBuilder {
    ops: Vec<EffectOperation>,
}

/// Start a nested sub-sequence.
pub fn effects() -> EffectBuilder {
    EffectBuilder::new()
}

impl From<EffectBuilder> for EffectSequence {
    fn from(builder: EffectBuilder) -> Self {
        builder.build()
    }
}

impl EffectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> EffectSequence {
        EffectSequence(self.ops)
    }

    fn push(mut self, op: EffectOperation) -> Self {
        self.ops.push(op);
        self
    }

    /// Base damage. An absent amount adds nothing.
    pub fn damage(self, amount: impl Into<Option<u32>>) -> Self {
        match amount.into() {
            Some(amount) => self.push(EffectOperation::Damage(amount)),
            None => self,
        }
    }

    pub fn inflict(self, status: Status) -> Self {
        self.push(EffectOperation::InflictStatus(status))
    }

    pub fn asleep(self) -> Self {
        self.inflict(Status::Asleep)
    }

    pub fn confuse(self) -> Self {
        self.inflict(Status::Confused)
    }

    pub fn paralyze(self) -> Self {
        self.inflict(Status::Paralyzed)
    }

    pub fn poison(self) -> Self {
        self.inflict(Status::Poisoned)
    }

    pub fn severe_poison(self, counters: u32) -> Self {
        self.push(EffectOperation::SeverePoison(counters))
    }

    pub fn flip_a_coin(self) -> Self {
        self.push(EffectOperation::FlipCoin(1))
    }

    pub fn flip_coins(self, count: u32) -> Self {
        self.push(EffectOperation::FlipCoin(count))
    }

    pub fn if_heads(self, then: impl Into<EffectSequence>) -> Self {
        self.push(EffectOperation::ConditionalBranch(Condition::Heads, then.into()))
    }

    pub fn if_tails(self, then: impl Into<EffectSequence>) -> Self {
        self.push(EffectOperation::ConditionalBranch(Condition::Tails, then.into()))
    }

    pub fn if_did_damage(self, then: impl Into<EffectSequence>) -> Self {
        self.push(EffectOperation::ConditionalBranch(Condition::DidDamage, then.into()))
    }

    pub fn damage_self(self, amount: u32) -> Self {
        self.push(EffectOperation::SelfDamage(amount))
    }

    pub fn damage_per_heads(self, amount: u32) -> Self {
        self.push(EffectOperation::DamagePerHeads(amount))
    }

    pub fn damage_per_damage_counter_on_itself(self, per_counter: u32) -> Self {
        self.push(EffectOperation::CounterScalingDamage {
            base: 0,
            per_counter,
            direction: Direction::Times,
            counters_on: Subject::Attacking,
        })
    }

    pub fn damage_plus_per_damage_counter_on_itself(self, base: u32, plus: u32) -> Self {
        self.push(EffectOperation::CounterScalingDamage {
            base,
            per_counter: plus,
            direction: Direction::Plus,
            counters_on: Subject::Attacking,
        })
    }

    pub fn damage_minus_per_damage_counter_on_itself(self, base: u32, minus: u32) -> Self {
        self.push(EffectOperation::CounterScalingDamage {
            base,
            per_counter: minus,
            direction: Direction::Minus,
            counters_on: Subject::Attacking,
        })
    }

    pub fn damage_plus_per_damage_counter_on_defending(self, base: u32, plus: u32) -> Self {
        self.push(EffectOperation::CounterScalingDamage {
            base,
            per_counter: plus,
            direction: Direction::Plus,
            counters_on: Subject::Defending,
        })
    }

    pub fn damage_minus_per_damage_counter_on_defending(self, base: u32, minus: u32) -> Self {
        self.push(EffectOperation::CounterScalingDamage {
            base,
            per_counter: minus,
            direction: Direction::Minus,
            counters_on: Subject::Defending,
        })
    }

    pub fn damage_per_damage_counter_on_defending(self, per_counter: u32) -> Self {
        self.push(EffectOperation::CounterScalingDamage {
            base: 0,
            per_counter,
            direction: Direction::Times,
            counters_on: Subject::Defending,
        })
    }

    /// Extra damage per energy of `energy` attached beyond the attack cost, counting at most `cap`.
    pub fn damage_plus_per_extra_energy_on_attacking(
        self,
        base: u32,
        per_energy: u32,
        energy: EnergyType,
        cap: u32,
    ) -> Self {
        self.push(EffectOperation::EnergyScalingDamage { base, per_energy, energy, cap })
    }

    pub fn damage_plus_per_energy_card_on_defending(self, base: u32, per_card: u32) -> Self {
        self.push(EffectOperation::DefendingEnergyScalingDamage { base, per_card })
    }

    pub fn damage_half_defending_remaining_hp(self) -> Self {
        self.push(EffectOperation::HalfRemainingHpDamage)
    }

    pub fn discard_attacking_energy_cards(self, energy: EnergyFilter, count: u32) -> Self {
        self.push(EffectOperation::DiscardEnergy { from: Subject::Attacking, energy, count })
    }

    pub fn discard_defending_energy_cards(self, energy: EnergyFilter, count: u32) -> Self {
        self.push(EffectOperation::DiscardEnergy { from: Subject::Defending, energy, count })
    }

    pub fn discard_all_attacking_energy_cards(self) -> Self {
        self.push(EffectOperation::DiscardAllEnergy)
    }

    pub fn heal_all_attacking(self) -> Self {
        self.push(EffectOperation::HealAll)
    }

    pub fn heal_attacking(self, amount: u32) -> Self {
        self.push(EffectOperation::Heal(amount))
    }

    pub fn each_own_bench(self, each: impl Into<EffectSequence>) -> Self {
        self.push(EffectOperation::BenchSweep(BenchSide::Own, each.into()))
    }

    pub fn each_opponents_bench(self, each: impl Into<EffectSequence>) -> Self {
        self.push(EffectOperation::BenchSweep(BenchSide::Opponent, each.into()))
    }

    pub fn prevent_damage_during_opponents_next_turn(self) -> Self {
        self.push(EffectOperation::GuardEffect(Guard::BlockDamage))
    }

    pub fn prevent_damage_and_effects_during_opponents_next_turn(self) -> Self {
        self.push(EffectOperation::GuardEffect(Guard::BlockDamageAndEffects))
    }

    pub fn prevent_damage_up_to_during_opponents_next_turn(self, amount: u32) -> Self {
        self.push(EffectOperation::GuardEffect(Guard::CapDamage(amount)))
    }

    pub fn prevent_attack_on_a_flip_during_opponents_next_turn(self) -> Self {
        self.push(EffectOperation::GuardEffect(Guard::FlipGatedNegate))
    }

    pub fn once_while_in_play(self) -> Self {
        self.push(EffectOperation::OnceWhileInPlayGuard)
    }

    pub fn switch_defending(self) -> Self {
        self.push(EffectOperation::SwitchOpponentActive)
    }

    pub fn disable_defending_attack(self) -> Self {
        self.push(EffectOperation::DisableOpponentAttack)
    }

    pub fn copy_defending_attack_without_costs(self) -> Self {
        self.push(EffectOperation::CopyOpponentAttackIgnoringCost)
    }

    pub fn change_attacking_resistance_except(self, except: &[EnergyType]) -> Self {
        self.push(EffectOperation::ChangeOwnResistanceExcept(except.to_vec()))
    }

    pub fn change_defending_weakness_except(self, except: &[EnergyType]) -> Self {
        self.push(EffectOperation::ChangeOpponentWeaknessExcept(except.to_vec()))
    }

    pub fn draw(self, count: u32) -> Self {
        self.push(EffectOperation::Draw(count))
    }

    /// Everything in `cost` must fully succeed or the attack fails.
    pub fn must(self, cost: impl Into<EffectSequence>) -> Self {
        self.push(EffectOperation::CostRequirement(cost.into()))
    }

    /// The attack fails unless the defending creature has `status`.
    pub fn defending_must_be(self, status: Status) -> Self {
        self.push(EffectOperation::RequireDefendingStatus(status))
    }

    pub fn defending_must_be_asleep(self) -> Self {
        self.defending_must_be(Status::Asleep)
    }

    pub fn defending_must_be_confused(self) -> Self {
        self.defending_must_be(Status::Confused)
    }

    pub fn defending_must_be_paralyzed(self) -> Self {
        self.defending_must_be(Status::Paralyzed)
    }

    pub fn defending_must_be_poisoned(self) -> Self {
        self.defending_must_be(Status::Poisoned)
    }

    pub fn knock_out_attacker_if_attacking_is_knocked_out_next_turn(self) -> Self {
        self.push(EffectOperation::RetaliateKnockOut)
    }
}
