//! Leaderboard reconciler
//!
//! Translates between the local run state and the ledger's notion of a ranked
//! entry, and gates submission. Read failures degrade to empty/zeroed views
//! and are logged; they never reach the rendering layer as errors. Write
//! failures surface to the caller with local state untouched.

use std::fmt;

use super::client::{
    Address, EffectiveScoreEntry, GameStats, LedgerClient, LedgerError, PlayerStats,
};
use super::referral::parse_referral_query;

/// Local, pre-network submission gate: only a strict improvement is worth a
/// transaction. The ledger still performs its own authoritative check.
pub fn can_submit(score: u64, best_score: u64) -> bool {
    score > best_score
}

/// Why a submission was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// No identity connected; nothing to submit as
    NotConnected,
    /// A submission is already in flight for this identity
    InProgress,
    /// Rejected locally: the score does not beat the cached best
    NotAnImprovement { score: u64, best_score: u64 },
    /// The ledger write itself failed or reverted
    Ledger(LedgerError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotConnected => write!(f, "no identity connected"),
            SubmitError::InProgress => write!(f, "a submission is already in progress"),
            SubmitError::NotAnImprovement { score, best_score } => {
                write!(f, "score {score} does not beat current best {best_score}")
            }
            SubmitError::Ledger(e) => write!(f, "ledger rejected submission: {e}"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Client-side view of the on-chain leaderboard.
///
/// Owns cached projections of the ledger plus the submission guard and the
/// pending referrer picked up from the entry URL.
pub struct Leaderboard<C: LedgerClient> {
    client: C,
    identity: Option<Address>,
    entries: Vec<EffectiveScoreEntry>,
    player_stats: PlayerStats,
    game_stats: GameStats,
    submitting: bool,
    pending_referrer: Option<Address>,
}

impl<C: LedgerClient> Leaderboard<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            identity: None,
            entries: Vec::new(),
            player_stats: PlayerStats::default(),
            game_stats: GameStats::default(),
            submitting: false,
            pending_referrer: None,
        }
    }

    /// Connect an identity and refresh its stats. Idempotent; connecting has
    /// no effect on game state.
    pub async fn connect(&mut self, identity: Address) {
        self.identity = Some(identity);
        self.load_player_stats().await;
    }

    /// Drop the identity and its cached stats.
    pub fn disconnect(&mut self) {
        self.identity = None;
        self.player_stats = PlayerStats::default();
    }

    pub fn identity(&self) -> Option<&Address> {
        self.identity.as_ref()
    }

    /// Seed the referrer for the next successful submission from the entry
    /// URL's query string. Malformed values mean no referrer.
    pub fn set_referrer_from_query(&mut self, query: &str) {
        self.pending_referrer = parse_referral_query(query);
        if let Some(referrer) = &self.pending_referrer {
            log::info!("referral code detected: {referrer}");
        }
    }

    pub fn pending_referrer(&self) -> Option<&Address> {
        self.pending_referrer.as_ref()
    }

    /// Cached top entries, in the ledger's own effective-score order.
    /// Never re-sorted locally.
    pub fn entries(&self) -> &[EffectiveScoreEntry] {
        &self.entries
    }

    /// Legacy raw-score view: the same entries re-sorted locally by raw score
    /// descending. Kept for compatibility with the old leaderboard screen;
    /// the effective-score view above stays in ledger order.
    pub fn raw_score_view(&self) -> Vec<EffectiveScoreEntry> {
        let mut view = self.entries.clone();
        view.sort_by(|a, b| b.raw_score.cmp(&a.raw_score));
        view
    }

    pub fn player_stats(&self) -> &PlayerStats {
        &self.player_stats
    }

    pub fn game_stats(&self) -> &GameStats {
        &self.game_stats
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Fetch the ledger's top entries. On failure the previous view is kept
    /// and the error is logged.
    pub async fn load_top_entries(&mut self) {
        match self.client.top_entries().await {
            Ok(entries) => self.entries = entries,
            Err(e) => log::warn!("failed to load leaderboard: {e}"),
        }
    }

    /// Fetch stats for the connected identity. Any failure (including a fresh
    /// identity the ledger has never seen) degrades to zeroed stats.
    pub async fn load_player_stats(&mut self) {
        let Some(identity) = self.identity.clone() else {
            self.player_stats = PlayerStats::default();
            return;
        };
        let stats = self.client.player_stats(&identity).await;
        let effective = self.client.effective_score(&identity).await;
        self.player_stats = match (stats, effective) {
            (Ok(mut stats), Ok(effective)) => {
                stats.effective_score = effective;
                stats
            }
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("failed to load player stats for {identity}: {e}");
                PlayerStats::default()
            }
        };
    }

    /// Fetch aggregate game stats; keeps the previous view on failure.
    pub async fn load_game_stats(&mut self) {
        match self.client.game_stats().await {
            Ok(stats) => self.game_stats = stats,
            Err(e) => log::warn!("failed to load game stats: {e}"),
        }
    }

    /// Whether a finished run's score clears the local gate.
    pub fn can_submit_score(&self, score: u64) -> bool {
        can_submit(score, self.player_stats.best_score)
    }

    /// Submit a finished run to the ledger.
    ///
    /// Rejects locally (no network call) when no identity is connected, a
    /// submission is already outstanding, or the score is not a strict
    /// improvement on the cached best. On confirmed success, reloads top
    /// entries, player stats, and game stats, and consumes the pending
    /// referrer. On failure local state is untouched and the caller surfaces
    /// the error to the user.
    pub async fn submit_score(&mut self, score: u64, level: u32) -> Result<(), SubmitError> {
        let identity = self.identity.clone().ok_or(SubmitError::NotConnected)?;
        if self.submitting {
            return Err(SubmitError::InProgress);
        }
        if !self.can_submit_score(score) {
            return Err(SubmitError::NotAnImprovement {
                score,
                best_score: self.player_stats.best_score,
            });
        }

        self.submitting = true;
        let referrer = self
            .pending_referrer
            .clone()
            .unwrap_or_else(Address::zero);
        log::info!("submitting score {score} (level {level}) for {identity}");
        let result = self
            .client
            .submit_score(&identity, score, level, &referrer)
            .await;
        self.submitting = false;

        match result {
            Ok(()) => {
                // Referral codes are single-use
                self.pending_referrer = None;
                self.load_top_entries().await;
                self.load_player_stats().await;
                self.load_game_stats().await;
                log::info!("score {score} confirmed on ledger");
                Ok(())
            }
            Err(e) => {
                log::warn!("score submission failed: {e}");
                Err(SubmitError::Ledger(e))
            }
        }
    }

    /// 1-based rank of an identity, `None` when it never submitted or the
    /// ledger is unreachable.
    pub async fn rank(&self, identity: &Address) -> Option<u32> {
        match self.client.player_rank(identity).await {
            Ok(0) => None,
            Ok(rank) => Some(rank),
            Err(e) => {
                log::warn!("failed to load rank for {identity}: {e}");
                None
            }
        }
    }

    /// Non-mutating what-if check; degrades to (false, 0) on read failure.
    pub async fn would_make_leaderboard(&self, score: u64, identity: &Address) -> (bool, u32) {
        match self.client.would_make_leaderboard(score, identity).await {
            Ok(result) => result,
            Err(e) => {
                log::warn!("failed to check leaderboard eligibility: {e}");
                (false, 0)
            }
        }
    }
}
