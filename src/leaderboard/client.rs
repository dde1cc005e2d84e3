//! Ledger client port and on-chain projections
//!
//! The leaderboard contract is an external, already-deployed collaborator.
//! Everything the reconciler needs from it goes through the `LedgerClient`
//! trait so tests and the demo binary can inject an in-memory ledger.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::consts::REFERRAL_BONUS;

/// A player identity: lowercase `0x` + 40 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

/// The null identity, used when a submission carries no referrer.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

impl Address {
    /// Parse and normalize an address. Input is lowercased; anything that is
    /// not `0x` followed by 40 hex digits is rejected.
    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        let lower = s.trim().to_lowercase();
        let hex = lower
            .strip_prefix("0x")
            .ok_or_else(|| LedgerError::InvalidAddress(s.to_string()))?;
        if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LedgerError::InvalidAddress(s.to_string()));
        }
        Ok(Self(lower))
    }

    /// The all-zeroes address standing in for "no referrer"
    pub fn zero() -> Self {
        Self(ZERO_ADDRESS.to_string())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_ADDRESS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors crossing the ledger boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Malformed identity rejected at the boundary
    InvalidAddress(String),
    /// Network/transport failure reaching the ledger
    Transport(String),
    /// The ledger accepted the call but the write reverted
    Execution(String),
    /// Identity absent from the leaderboard
    NotFound,
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidAddress(s) => write!(f, "invalid address: {s}"),
            LedgerError::Transport(msg) => write!(f, "ledger transport failure: {msg}"),
            LedgerError::Execution(msg) => write!(f, "ledger execution failure: {msg}"),
            LedgerError::NotFound => write!(f, "identity not found on leaderboard"),
        }
    }
}

impl std::error::Error for LedgerError {}

/// One ranked entry as the contract reports it.
///
/// `effective_score` is computed by the contract; the client only recomputes
/// it for display validation (see [`effective_score`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveScoreEntry {
    pub player: Address,
    pub raw_score: u64,
    pub effective_score: u64,
    pub level: u32,
    pub timestamp: u64,
    pub referral_count: u32,
}

/// Per-identity stats for the connected player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub best_score: u64,
    pub total_submissions: u32,
    pub referral_count: u32,
    pub effective_score: u64,
}

/// Aggregate stats across all submissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub high_score: u64,
    pub champion: String,
    pub total_submissions: u32,
    pub unique_players: u32,
    pub average_top_score: u64,
}

/// Display-side effective score: raw score plus the referral bonus.
///
/// Mirrors the contract's internal arithmetic; the two must agree.
pub fn effective_score(raw_score: u64, referral_count: u32) -> u64 {
    raw_score + REFERRAL_BONUS * referral_count as u64
}

/// Async port to the deployed leaderboard contract.
///
/// Read calls may fail with transport errors; the reconciler decides how to
/// degrade. `submit_score` resolves only once the write is confirmed.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Top entries in effective-score order. The order is authoritative.
    async fn top_entries(&self) -> Result<Vec<EffectiveScoreEntry>, LedgerError>;

    /// Best score, submission count, and referral count for one identity
    async fn player_stats(&self, player: &Address) -> Result<PlayerStats, LedgerError>;

    /// Contract-computed effective score for one identity
    async fn effective_score(&self, player: &Address) -> Result<u64, LedgerError>;

    /// Aggregate stats across the whole game
    async fn game_stats(&self) -> Result<GameStats, LedgerError>;

    /// 1-based rank for an identity; 0 means never submitted
    async fn player_rank(&self, player: &Address) -> Result<u32, LedgerError>;

    /// Non-mutating what-if: (would qualify, estimated 1-based rank)
    async fn would_make_leaderboard(
        &self,
        score: u64,
        player: &Address,
    ) -> Result<(bool, u32), LedgerError>;

    /// Submit a finished run for `player`. Blocks until the write confirms.
    /// The ledger performs its own authoritative best-score check.
    async fn submit_score(
        &self,
        player: &Address,
        score: u64,
        level: u32,
        referrer: &Address,
    ) -> Result<(), LedgerError>;
}
