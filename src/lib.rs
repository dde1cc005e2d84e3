//! Starship Troopers - a bug-blasting arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, collisions, game state)
//! - `leaderboard`: On-chain leaderboard client (reconciler, referral accounting)
//!
//! Rendering, wallet plumbing, and the contract itself live outside this crate;
//! the sim is driven by a host tick callback and the leaderboard talks to the
//! ledger through an injected async client.

pub mod leaderboard;
pub mod sim;

pub use leaderboard::{Leaderboard, LedgerClient, LedgerError, MemoryLedger};
pub use sim::{GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    /// Per-tick displacement for each held direction. Diagonal input moves
    /// diagonally without normalization (source quirk, preserved).
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Maximum player bullets in flight
    pub const MAX_PLAYER_BULLETS: usize = 5;

    /// Bullet defaults
    pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 10.0;
    pub const PLAYER_BULLET_SPEED: f32 = 8.0;
    pub const ENEMY_BULLET_WIDTH: f32 = 4.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 8.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;
    /// Bullets are culled this far past either vertical bound
    pub const BULLET_CULL_MARGIN: f32 = 20.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_SPAWN_Y: f32 = -50.0;
    /// Exclusive upper bound for spawn x; narrower than the field minus the
    /// enemy width, so spawns keep clear of the right edge
    pub const ENEMY_SPAWN_X_MAX: f32 = 760.0;
    /// Enemy fall speed is MIN + rand * SPREAD units/tick
    pub const ENEMY_MIN_SPEED: f32 = 1.0;
    pub const ENEMY_SPEED_SPREAD: f32 = 2.0;
    /// Base per-tick spawn probability; grows by SPAWN_RATE_PER_LEVEL * level
    pub const ENEMY_SPAWN_RATE: f64 = 0.02;
    pub const SPAWN_RATE_PER_LEVEL: f64 = 0.005;
    /// Ticks an enemy must wait before its shoot chance rolls
    pub const ENEMY_SHOOT_WARMUP: u32 = 60;
    /// Per-tick shoot probability once warmed up
    pub const ENEMY_SHOOT_CHANCE: f64 = 0.01;
    /// Enemies are culled this far past the bottom bound
    pub const ENEMY_CULL_MARGIN: f32 = 50.0;

    /// Particle burst defaults
    pub const PARTICLE_COUNT: usize = 5;
    pub const PARTICLE_SIZE: f32 = 2.0;
    pub const PARTICLE_LIFE: u32 = 30;
    /// Positional jitter around the impact point, per axis
    pub const PARTICLE_JITTER: f32 = 10.0;
    /// Velocity range per axis is [-PARTICLE_VEL, PARTICLE_VEL]
    pub const PARTICLE_VEL: f32 = 2.0;

    /// Scoring
    pub const KILL_SCORE: u64 = 100;
    pub const STARTING_LIVES: u32 = 3;
    /// Level increments when score exceeds level * LEVEL_SCORE_STEP
    pub const LEVEL_SCORE_STEP: u64 = 1000;

    /// Referral bonus added to raw score per referral (mirrors the contract)
    pub const REFERRAL_BONUS: u64 = 100;
    /// Entries kept on the on-chain leaderboard
    pub const LEADERBOARD_SIZE: usize = 20;
}
