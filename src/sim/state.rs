//! Game state and lifecycle
//!
//! Owns every entity collection plus score/lives/level, and the phase state
//! machine. Score operations are pure in-memory arithmetic; the only way out
//! of GameOver is `reset_game` or `start_game`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Bullet, Enemy, Particle, Player};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// At the menu, nothing simulating
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended; score is submit-eligible
    GameOver,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Remaining lives, saturating at zero
    pub lives: u32,
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// True once a finished run's score may be submitted to the ledger
    pub submit_eligible: bool,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    /// Per-run RNG stream (spawns, enemy fire, particle jitter)
    pub rng: Pcg32,
}

impl GameState {
    /// Fresh state at the menu with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            time_ticks: 0,
            submit_eligible: false,
            player: Player::spawn(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a run: reset score state, clear every collection, reposition the
    /// player, enter Playing.
    pub fn start_game(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.time_ticks = 0;
        self.submit_eligible = false;
        self.player = Player::spawn();
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        log::info!("game started (seed {})", self.seed);
    }

    /// Toggle Playing <-> Paused. No effect at the menu or after game over.
    pub fn pause_toggle(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Back to the menu with score state zeroed. Idempotent.
    pub fn reset_game(&mut self) {
        self.phase = GamePhase::Menu;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.submit_eligible = false;
    }

    /// Add points. No upper bound.
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// Lose one life; hitting zero ends the run and marks the score
    /// submit-eligible. Extra hits in the same tick keep lives at zero.
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 && self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            self.submit_eligible = true;
            log::info!(
                "game over at tick {} - score {} level {}",
                self.time_ticks,
                self.score,
                self.level
            );
        }
    }

    /// Advance one level when the score passes the current threshold.
    /// A single call increments at most once even if the score jumped across
    /// several thresholds (source behavior, preserved).
    pub fn check_level_up(&mut self) {
        if self.score > self.level as u64 * LEVEL_SCORE_STEP {
            self.level += 1;
        }
    }
}
