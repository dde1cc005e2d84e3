//! On-chain leaderboard module
//!
//! Client-side reconciliation against an already-deployed leaderboard
//! contract. The contract is authoritative for ordering, best scores, and
//! referral credit; this module caches its projections, gates submissions
//! locally, and degrades gracefully when the ledger is unreachable.
//!
//! Nothing here touches the simulation: a run only crosses this boundary
//! once it has ended and the host decides to submit the final score.

pub mod client;
pub mod memory;
pub mod reconciler;
pub mod referral;

pub use client::{
    Address, EffectiveScoreEntry, GameStats, LedgerClient, LedgerError, PlayerStats,
    ZERO_ADDRESS, effective_score,
};
pub use memory::MemoryLedger;
pub use reconciler::{Leaderboard, SubmitError, can_submit};
pub use referral::{parse_referral_query, referral_code};
