//! In-memory ledger
//!
//! Stands in for the deployed contract in tests and the demo binary. It keeps
//! the contract's authoritative rules: strict best-score check on write,
//! referral credit on a player's first referred submission, effective-score
//! ordering, top-20 cutoff.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{
    Address, EffectiveScoreEntry, GameStats, LedgerClient, LedgerError, PlayerStats,
    effective_score,
};
use crate::consts::LEADERBOARD_SIZE;

#[derive(Debug, Clone, Default)]
struct PlayerRecord {
    best_score: u64,
    best_level: u32,
    best_timestamp: u64,
    total_submissions: u32,
    referral_count: u32,
    referred_by: Option<Address>,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<Address, PlayerRecord>,
    /// Logical clock for submission timestamps
    clock: u64,
    /// Write attempts observed, including rejected ones
    write_calls: u32,
    /// When set, every read fails with a transport error
    fail_reads: bool,
}

/// In-memory [`LedgerClient`] implementation.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    inner: Mutex<Inner>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a network outage: all subsequent reads fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().expect("ledger lock").fail_reads = fail;
    }

    /// Number of write calls the ledger has seen (rejected ones included)
    pub fn write_calls(&self) -> u32 {
        self.inner.lock().expect("ledger lock").write_calls
    }

    /// Ranked entries, effective-score descending, ties broken by earlier
    /// submission. The top-20 cutoff is applied by `top_entries`.
    fn ranked(inner: &Inner) -> Vec<EffectiveScoreEntry> {
        let mut entries: Vec<EffectiveScoreEntry> = inner
            .records
            .iter()
            .map(|(player, rec)| EffectiveScoreEntry {
                player: player.clone(),
                raw_score: rec.best_score,
                effective_score: effective_score(rec.best_score, rec.referral_count),
                level: rec.best_level,
                timestamp: rec.best_timestamp,
                referral_count: rec.referral_count,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.effective_score
                .cmp(&a.effective_score)
                .then(a.timestamp.cmp(&b.timestamp))
        });
        entries
    }

    fn check_reads(inner: &Inner) -> Result<(), LedgerError> {
        if inner.fail_reads {
            Err(LedgerError::Transport("ledger unreachable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LedgerClient for MemoryLedger {
    async fn top_entries(&self) -> Result<Vec<EffectiveScoreEntry>, LedgerError> {
        let inner = self.inner.lock().expect("ledger lock");
        Self::check_reads(&inner)?;
        let mut entries = Self::ranked(&inner);
        entries.truncate(LEADERBOARD_SIZE);
        Ok(entries)
    }

    async fn player_stats(&self, player: &Address) -> Result<PlayerStats, LedgerError> {
        let inner = self.inner.lock().expect("ledger lock");
        Self::check_reads(&inner)?;
        let rec = inner.records.get(player).ok_or(LedgerError::NotFound)?;
        Ok(PlayerStats {
            best_score: rec.best_score,
            total_submissions: rec.total_submissions,
            referral_count: rec.referral_count,
            effective_score: effective_score(rec.best_score, rec.referral_count),
        })
    }

    async fn effective_score(&self, player: &Address) -> Result<u64, LedgerError> {
        let inner = self.inner.lock().expect("ledger lock");
        Self::check_reads(&inner)?;
        let rec = inner.records.get(player).ok_or(LedgerError::NotFound)?;
        Ok(effective_score(rec.best_score, rec.referral_count))
    }

    async fn game_stats(&self) -> Result<GameStats, LedgerError> {
        let inner = self.inner.lock().expect("ledger lock");
        Self::check_reads(&inner)?;
        let ranked = Self::ranked(&inner);
        let top: Vec<_> = ranked.iter().take(LEADERBOARD_SIZE).collect();
        let average_top_score = if top.is_empty() {
            0
        } else {
            top.iter().map(|e| e.effective_score).sum::<u64>() / top.len() as u64
        };
        Ok(GameStats {
            high_score: top.first().map(|e| e.effective_score).unwrap_or(0),
            champion: top
                .first()
                .map(|e| e.player.to_string())
                .unwrap_or_default(),
            total_submissions: inner.records.values().map(|r| r.total_submissions).sum(),
            unique_players: inner.records.len() as u32,
            average_top_score,
        })
    }

    async fn player_rank(&self, player: &Address) -> Result<u32, LedgerError> {
        let inner = self.inner.lock().expect("ledger lock");
        Self::check_reads(&inner)?;
        let rank = Self::ranked(&inner)
            .iter()
            .position(|e| &e.player == player)
            .map(|i| i as u32 + 1)
            .unwrap_or(0);
        Ok(rank)
    }

    async fn would_make_leaderboard(
        &self,
        score: u64,
        player: &Address,
    ) -> Result<(bool, u32), LedgerError> {
        let inner = self.inner.lock().expect("ledger lock");
        Self::check_reads(&inner)?;
        let referrals = inner
            .records
            .get(player)
            .map(|r| r.referral_count)
            .unwrap_or(0);
        let candidate = effective_score(score, referrals);
        // Rank against everyone else's current entries
        let better = Self::ranked(&inner)
            .iter()
            .filter(|e| &e.player != player && e.effective_score > candidate)
            .count() as u32;
        let estimated_rank = better + 1;
        Ok((estimated_rank as usize <= LEADERBOARD_SIZE, estimated_rank))
    }

    async fn submit_score(
        &self,
        player: &Address,
        score: u64,
        level: u32,
        referrer: &Address,
    ) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock().expect("ledger lock");
        inner.write_calls += 1;
        if player.is_zero() {
            return Err(LedgerError::InvalidAddress(player.to_string()));
        }

        let current_best = inner
            .records
            .get(player)
            .map(|r| r.best_score)
            .unwrap_or(0);
        if score <= current_best {
            return Err(LedgerError::Execution(
                "score not higher than current best".into(),
            ));
        }

        // Referral credit only on the player's first referred submission, and
        // never for self-referrals.
        let first_submission = !inner.records.contains_key(player);
        if first_submission && !referrer.is_zero() && referrer != player {
            inner
                .records
                .entry(referrer.clone())
                .or_default()
                .referral_count += 1;
        }

        inner.clock += 1;
        let now = inner.clock;
        let rec = inner.records.entry(player.clone()).or_default();
        rec.best_score = score;
        rec.best_level = level;
        rec.best_timestamp = now;
        rec.total_submissions += 1;
        if first_submission && !referrer.is_zero() && referrer != player {
            rec.referred_by = Some(referrer.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::parse(&format!("0x{:040x}", n)).expect("test address")
    }

    #[tokio::test]
    async fn test_submit_and_rank_ordering() {
        let ledger = MemoryLedger::new();
        ledger.submit_score(&addr(1), 300, 1, &Address::zero()).await.unwrap();
        ledger.submit_score(&addr(2), 500, 2, &Address::zero()).await.unwrap();
        ledger.submit_score(&addr(3), 400, 1, &Address::zero()).await.unwrap();

        let top = ledger.top_entries().await.unwrap();
        let order: Vec<_> = top.iter().map(|e| e.player.clone()).collect();
        assert_eq!(order, vec![addr(2), addr(3), addr(1)]);

        assert_eq!(ledger.player_rank(&addr(2)).await.unwrap(), 1);
        assert_eq!(ledger.player_rank(&addr(1)).await.unwrap(), 3);
        // Never submitted: rank sentinel 0
        assert_eq!(ledger.player_rank(&addr(9)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_submit_rejects_non_improving_score() {
        let ledger = MemoryLedger::new();
        ledger.submit_score(&addr(1), 500, 1, &Address::zero()).await.unwrap();

        let equal = ledger.submit_score(&addr(1), 500, 1, &Address::zero()).await;
        assert!(matches!(equal, Err(LedgerError::Execution(_))));
        let lower = ledger.submit_score(&addr(1), 100, 1, &Address::zero()).await;
        assert!(matches!(lower, Err(LedgerError::Execution(_))));

        let stats = ledger.player_stats(&addr(1)).await.unwrap();
        assert_eq!(stats.best_score, 500);
        assert_eq!(stats.total_submissions, 1);
    }

    #[tokio::test]
    async fn test_referral_credit_and_effective_ordering() {
        let ledger = MemoryLedger::new();
        let referrer = addr(1);
        ledger.submit_score(&referrer, 300, 1, &Address::zero()).await.unwrap();

        // Two referred newcomers credit the referrer once each
        ledger.submit_score(&addr(2), 100, 1, &referrer).await.unwrap();
        ledger.submit_score(&addr(3), 250, 1, &referrer).await.unwrap();

        let stats = ledger.player_stats(&referrer).await.unwrap();
        assert_eq!(stats.referral_count, 2);
        assert_eq!(stats.effective_score, effective_score(300, 2));

        // Resubmission does not credit again
        ledger.submit_score(&addr(2), 200, 1, &referrer).await.unwrap();
        assert_eq!(ledger.player_stats(&referrer).await.unwrap().referral_count, 2);

        // Bonus lifts the referrer over a higher raw score (300+200 > 450)
        ledger.submit_score(&addr(4), 450, 1, &Address::zero()).await.unwrap();
        let top = ledger.top_entries().await.unwrap();
        assert_eq!(top[0].player, referrer);
        assert_eq!(top[0].effective_score, 500);
        assert_eq!(top[0].raw_score, 300);
    }

    #[tokio::test]
    async fn test_self_referral_is_ignored() {
        let ledger = MemoryLedger::new();
        let player = addr(5);
        ledger.submit_score(&player, 100, 1, &player).await.unwrap();
        assert_eq!(ledger.player_stats(&player).await.unwrap().referral_count, 0);
    }

    #[tokio::test]
    async fn test_game_stats_aggregates() {
        let ledger = MemoryLedger::new();
        ledger.submit_score(&addr(1), 100, 1, &Address::zero()).await.unwrap();
        ledger.submit_score(&addr(2), 300, 2, &Address::zero()).await.unwrap();
        ledger.submit_score(&addr(2), 400, 3, &Address::zero()).await.unwrap();

        let stats = ledger.game_stats().await.unwrap();
        assert_eq!(stats.high_score, 400);
        assert_eq!(stats.champion, addr(2).to_string());
        assert_eq!(stats.total_submissions, 3);
        assert_eq!(stats.unique_players, 2);
        assert_eq!(stats.average_top_score, 250);
    }

    #[tokio::test]
    async fn test_would_make_leaderboard() {
        let ledger = MemoryLedger::new();
        for n in 1..=3u8 {
            ledger
                .submit_score(&addr(n), n as u64 * 100, 1, &Address::zero())
                .await
                .unwrap();
        }
        // 250 would slot in above 200 and 100
        let (would, rank) = ledger.would_make_leaderboard(250, &addr(9)).await.unwrap();
        assert!(would);
        assert_eq!(rank, 2);
        // Board has room, so even a low score qualifies
        let (would, rank) = ledger.would_make_leaderboard(1, &addr(9)).await.unwrap();
        assert!(would);
        assert_eq!(rank, 4);
    }

    #[tokio::test]
    async fn test_read_failure_injection() {
        let ledger = MemoryLedger::new();
        ledger.set_fail_reads(true);
        assert!(matches!(
            ledger.top_entries().await,
            Err(LedgerError::Transport(_))
        ));
        assert!(matches!(
            ledger.player_stats(&addr(1)).await,
            Err(LedgerError::Transport(_))
        ));
    }
}
