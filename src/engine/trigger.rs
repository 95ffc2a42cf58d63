//! Trigger scanning (text pre-classification).
//!
//! This module inspects normalized attack text and produces coarse bucket
//! flags that let the dispatcher skip rules whose patterns cannot match.
//!
//! ## Design notes
//!
//! - This is a *heuristic* scan. False positives are fine because the
//!   dispatcher still has to match the full anchored pattern. False negatives
//!   are not: a bucket must be detected whenever any rule declaring it could
//!   match, otherwise gating would change which rule wins.
//! - Matching is ASCII case-insensitive substring search; rules spell their
//!   literals with either capitalization ("Flip a coin", "flip 2 coins").

use super::compiled_rules::BucketMask;

/// Text characteristics detected from normalized attack text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
}

impl TriggerInfo {
    /// Scan `text` for coarse buckets.
    pub fn scan(text: &str) -> Self {
        let mut buckets = BucketMask::empty();
        let lower = text.to_ascii_lowercase();

        if text.bytes().any(|b| b.is_ascii_digit()) {
            buckets |= BucketMask::HAS_DIGITS;
        }
        if lower.contains("coin") {
            buckets |= BucketMask::COIN;
        }
        if lower.contains("bench") {
            buckets |= BucketMask::BENCH;
        }
        if lower.contains("discard") {
            buckets |= BucketMask::DISCARD;
        }
        if lower.contains("next turn") {
            buckets |= BucketMask::NEXT_TURN;
        }
        if lower.contains("defending") {
            buckets |= BucketMask::DEFENDING;
        }

        TriggerInfo { buckets }
    }
}
