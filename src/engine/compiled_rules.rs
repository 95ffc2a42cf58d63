//! Grammar compilation and indexing.
//!
//! This module holds the *static* side of the dispatcher: structures derived
//! once from the ordered grammar so that each dispatch can skip rules that
//! cannot possibly match.
//!
//! Dispatch is split into two phases:
//!
//! 1. **Compile/index rules** (this module): build `CompiledRules` from the
//!    grammar and index every rule by the coarse buckets it declares.
//! 2. **Dispatch** (see `dispatch.rs`): scan the normalized text for buckets
//!    (`trigger.rs`), activate the matching rules, then try them in grammar
//!    order.
//!
//! ## Extension points
//!
//! - Adding a new bucket:
//!   1. Add a `BucketMask` bit.
//!   2. Add a `BUCKET_*` constant and bump `BUCKET_COUNT`.
//!   3. Teach `CompiledRules::new` to index that bucket.
//!   4. Teach `TriggerInfo::scan` (in `trigger.rs`) to detect it.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `CompiledRules::rules` and `CompiledRules::metas`
//!   and equals the rule's position in the grammar. Those vectors must stay
//!   aligned, and ids must stay ordered, since the lowest active id wins.
//! - A rule is active when *any* of its buckets is present. A bucket is only a
//!   necessary condition of a rule's pattern, never a sufficient one.

use crate::Rule;

// --- Rule compilation and indexing -------------------------------------------

/// Rule identifier (index into the grammar).
pub type RuleId = usize;

bitflags::bitflags! {
    /// Coarse buckets for fast text classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS = 1 << 0;
        const COIN       = 1 << 1;
        const BENCH      = 1 << 2;
        const DISCARD    = 1 << 3;
        const NEXT_TURN  = 1 << 4;
        const DEFENDING  = 1 << 5;
    }
}

/// Metadata attached to a rule.
#[derive(Clone, Copy, Debug)]
pub struct RuleMeta {
    pub buckets: BucketMask,
    pub uses_damage: bool,
}

#[derive(Default, Debug)]
pub struct RuleIndex {
    pub always_on: Vec<RuleId>,
    pub by_bucket: [Vec<RuleId>; BUCKET_COUNT],
}

pub const BUCKET_COUNT: usize = 6;
pub const BUCKET_HAS_DIGITS: usize = 0;
pub const BUCKET_COIN: usize = 1;
pub const BUCKET_BENCH: usize = 2;
pub const BUCKET_DISCARD: usize = 3;
pub const BUCKET_NEXT_TURN: usize = 4;
pub const BUCKET_DEFENDING: usize = 5;

/// Bucket bits paired with their index slots, in slot order.
pub(crate) const BUCKET_SLOTS: [(BucketMask, usize); BUCKET_COUNT] = [
    (BucketMask::HAS_DIGITS, BUCKET_HAS_DIGITS),
    (BucketMask::COIN, BUCKET_COIN),
    (BucketMask::BENCH, BUCKET_BENCH),
    (BucketMask::DISCARD, BUCKET_DISCARD),
    (BucketMask::NEXT_TURN, BUCKET_NEXT_TURN),
    (BucketMask::DEFENDING, BUCKET_DEFENDING),
];

/// Pre-compiled grammar with metadata and indexes.
#[derive(Debug)]
pub struct CompiledRules<'a> {
    pub rules: Vec<&'a Rule>,
    pub metas: Vec<RuleMeta>,
    pub index: RuleIndex,
}

impl<'a> CompiledRules<'a> {
    /// Index an ordered grammar. Rule order is preserved as `RuleId` order.
    pub fn new(rules: &'a [Rule]) -> Self {
        let rule_refs: Vec<&Rule> = rules.iter().collect();

        let metas: Vec<RuleMeta> = rule_refs
            .iter()
            .map(|r| RuleMeta { buckets: BucketMask::from_bits_truncate(r.buckets), uses_damage: r.uses_damage })
            .collect();

        let mut index = RuleIndex::default();

        for (id, meta) in metas.iter().enumerate() {
            if meta.buckets.is_empty() {
                index.always_on.push(id);
            } else {
                for (bit, slot) in BUCKET_SLOTS {
                    if meta.buckets.contains(bit) {
                        index.by_bucket[slot].push(id);
                    }
                }
            }
        }

        CompiledRules { rules: rule_refs, metas, index }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
