//! Grammar dispatch engine.
//!
//! This module is the public entry point of the pattern matcher. It is split
//! into focused submodules under `src/engine/` while keeping public paths
//! stable (for example `crate::engine::Dispatcher` and
//! `crate::engine::BucketMask`).
//!
//! ## How the parts work together
//!
//! ```text
//! grammar (ordered) ──┐
//!                     │  CompiledRules::new          (compiled_rules.rs)
//!                     └──────────────┬─────────────
//!                                    │
//! text ── TriggerInfo::scan ─────────┼─ select active rules (buckets)
//!         (trigger.rs)               │
//!                                    v
//!                        Dispatcher::dispatch (dispatch.rs)
//!                          - try active rules in grammar order
//!                          - first anchored match wins
//!                          - bind captures, run the builder
//!                                    │
//!                                    v
//!                       Outcome + DispatchMetrics (metrics.rs)
//! ```
//!
//! Unlike a saturating parser, dispatch is a single ordered scan: rule order
//! is the only tie-breaker, so a more specific rule has to be listed before
//! any general rule that would also match its text.
//!
//! ## Adding new rules
//!
//! - New rules are added under `src/rules/**` and listed in
//!   `rules::grammar()`, at the position where they must win.
//! - If a new rule needs a new coarse trigger, add a new `BucketMask` bit and
//!   teach `TriggerInfo::scan` + `CompiledRules::new` to wire it through.
//!
//! ## Debugging
//!
//! Set `CARDGEN_DEBUG_RULES=1` to print activation and match traces.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/dispatch.rs"]
mod dispatch;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/trigger.rs"]
mod trigger;

#[allow(unused_imports)]
pub use compiled_rules::{BucketMask, CompiledRules, RuleId, RuleIndex, RuleMeta};
pub use dispatch::{Dispatch, Dispatcher, Outcome};
pub use metrics::{DispatchMetrics, GrammarUsage};
pub use trigger::TriggerInfo;
