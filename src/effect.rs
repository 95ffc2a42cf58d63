//! Effect trees.
//!
//! An attack compiles to an [`EffectSequence`]: an ordered list of
//! [`EffectOperation`] nodes. Branching nodes own their nested sequence, so a
//! tree is always finite and acyclic.

use crate::card::EnergyType;
use std::fmt;
use std::str::FromStr;

/// Special conditions an attack can inflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Asleep,
    Confused,
    Paralyzed,
    Poisoned,
}

impl Status {
    /// Builder verb that inflicts the condition.
    pub fn verb(self) -> &'static str {
        match self {
            Status::Asleep => "asleep",
            Status::Confused => "confuse",
            Status::Paralyzed => "paralyze",
            Status::Poisoned => "poison",
        }
    }

    pub fn adjective(self) -> &'static str {
        match self {
            Status::Asleep => "asleep",
            Status::Confused => "confused",
            Status::Paralyzed => "paralyzed",
            Status::Poisoned => "poisoned",
        }
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asleep" => Ok(Status::Asleep),
            "confused" => Ok(Status::Confused),
            "paralyzed" => Ok(Status::Paralyzed),
            "poisoned" => Ok(Status::Poisoned),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Heads,
    Tails,
    DidDamage,
}

/// How counters scale damage: added to or taken from a base, or multiplied
/// with no base at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Plus,
    Minus,
    Times,
}

/// Whose damage counters (or attached cards) an operation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Attacking,
    Defending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchSide {
    Own,
    Opponent,
}

/// Effects lasting through the opponent's next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    BlockDamage,
    BlockDamageAndEffects,
    /// Prevent any single damage of at most this amount.
    CapDamage(u32),
    /// The defending creature's next attack does nothing on tails.
    FlipGatedNegate,
}

/// Energy a discard may take: one specific type, or whatever is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyFilter {
    Any,
    Typed(EnergyType),
}

impl fmt::Display for EnergyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyFilter::Any => f.write_str("Any"),
            EnergyFilter::Typed(t) => write!(f, "{t}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectOperation {
    Damage(u32),
    InflictStatus(Status),
    SeverePoison(u32),
    FlipCoin(u32),
    ConditionalBranch(Condition, EffectSequence),
    SelfDamage(u32),
    DamagePerHeads(u32),
    CounterScalingDamage { base: u32, per_counter: u32, direction: Direction, counters_on: Subject },
    EnergyScalingDamage { base: u32, per_energy: u32, energy: EnergyType, cap: u32 },
    DefendingEnergyScalingDamage { base: u32, per_card: u32 },
    HalfRemainingHpDamage,
    DiscardEnergy { from: Subject, energy: EnergyFilter, count: u32 },
    DiscardAllEnergy,
    HealAll,
    Heal(u32),
    BenchSweep(BenchSide, EffectSequence),
    GuardEffect(Guard),
    OnceWhileInPlayGuard,
    SwitchOpponentActive,
    DisableOpponentAttack,
    CopyOpponentAttackIgnoringCost,
    ChangeOwnResistanceExcept(Vec<EnergyType>),
    ChangeOpponentWeaknessExcept(Vec<EnergyType>),
    Draw(u32),
    CostRequirement(EffectSequence),
    RequireDefendingStatus(Status),
    RetaliateKnockOut,
}

impl EffectOperation {
    /// Name of the builder method that produces this node.
    ///
    /// The emitter prints exactly these names, and the coverage report counts
    /// them as "operation kinds in use".
    pub fn method_name(&self) -> &'static str {
        use EffectOperation::*;
        match self {
            Damage(_) => "damage",
            InflictStatus(status) => status.verb(),
            SeverePoison(_) => "severe_poison",
            FlipCoin(1) => "flip_a_coin",
            FlipCoin(_) => "flip_coins",
            ConditionalBranch(Condition::Heads, _) => "if_heads",
            ConditionalBranch(Condition::Tails, _) => "if_tails",
            ConditionalBranch(Condition::DidDamage, _) => "if_did_damage",
            SelfDamage(_) => "damage_self",
            DamagePerHeads(_) => "damage_per_heads",
            CounterScalingDamage { direction: Direction::Times, counters_on: Subject::Attacking, .. } => {
                "damage_per_damage_counter_on_itself"
            }
            CounterScalingDamage { direction: Direction::Times, counters_on: Subject::Defending, .. } => {
                "damage_per_damage_counter_on_defending"
            }
            CounterScalingDamage { direction: Direction::Plus, counters_on: Subject::Attacking, .. } => {
                "damage_plus_per_damage_counter_on_itself"
            }
            CounterScalingDamage { direction: Direction::Minus, counters_on: Subject::Attacking, .. } => {
                "damage_minus_per_damage_counter_on_itself"
            }
            CounterScalingDamage { direction: Direction::Plus, counters_on: Subject::Defending, .. } => {
                "damage_plus_per_damage_counter_on_defending"
            }
            CounterScalingDamage { direction: Direction::Minus, counters_on: Subject::Defending, .. } => {
                "damage_minus_per_damage_counter_on_defending"
            }
            EnergyScalingDamage { .. } => "damage_plus_per_extra_energy_on_attacking",
            DefendingEnergyScalingDamage { .. } => "damage_plus_per_energy_card_on_defending",
            HalfRemainingHpDamage => "damage_half_defending_remaining_hp",
            DiscardEnergy { from: Subject::Attacking, .. } => "discard_attacking_energy_cards",
            DiscardEnergy { from: Subject::Defending, .. } => "discard_defending_energy_cards",
            DiscardAllEnergy => "discard_all_attacking_energy_cards",
            HealAll => "heal_all_attacking",
            Heal(_) => "heal_attacking",
            BenchSweep(BenchSide::Own, _) => "each_own_bench",
            BenchSweep(BenchSide::Opponent, _) => "each_opponents_bench",
            GuardEffect(Guard::BlockDamage) => "prevent_damage_during_opponents_next_turn",
            GuardEffect(Guard::BlockDamageAndEffects) => "prevent_damage_and_effects_during_opponents_next_turn",
            GuardEffect(Guard::CapDamage(_)) => "prevent_damage_up_to_during_opponents_next_turn",
            GuardEffect(Guard::FlipGatedNegate) => "prevent_attack_on_a_flip_during_opponents_next_turn",
            OnceWhileInPlayGuard => "once_while_in_play",
            SwitchOpponentActive => "switch_defending",
            DisableOpponentAttack => "disable_defending_attack",
            CopyOpponentAttackIgnoringCost => "copy_defending_attack_without_costs",
            ChangeOwnResistanceExcept(_) => "change_attacking_resistance_except",
            ChangeOpponentWeaknessExcept(_) => "change_defending_weakness_except",
            Draw(_) => "draw",
            CostRequirement(_) => "must",
            RequireDefendingStatus(Status::Asleep) => "defending_must_be_asleep",
            RequireDefendingStatus(Status::Confused) => "defending_must_be_confused",
            RequireDefendingStatus(Status::Paralyzed) => "defending_must_be_paralyzed",
            RequireDefendingStatus(Status::Poisoned) => "defending_must_be_poisoned",
            RetaliateKnockOut => "knock_out_attacker_if_attacking_is_knocked_out_next_turn",
        }
    }

    /// The nested sequence of a branching node.
    pub fn children(&self) -> Option<&EffectSequence> {
        match self {
            EffectOperation::ConditionalBranch(_, seq)
            | EffectOperation::BenchSweep(_, seq)
            | EffectOperation::CostRequirement(seq) => Some(seq),
            _ => None,
        }
    }
}

/// An ordered list of operations; the root of an effect tree or a nested branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectSequence(pub Vec<EffectOperation>);

impl EffectSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[EffectOperation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Depth-first walk over every node, nested ones included.
    pub fn walk(&self) -> Vec<&EffectOperation> {
        let mut out = Vec::new();
        for op in &self.0 {
            out.push(op);
            if let Some(children) = op.children() {
                out.extend(children.walk());
            }
        }
        out
    }
}

impl From<Vec<EffectOperation>> for EffectSequence {
    fn from(ops: Vec<EffectOperation>) -> Self {
        EffectSequence(ops)
    }
}
