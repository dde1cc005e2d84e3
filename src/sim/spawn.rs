//! Probabilistic spawning
//!
//! Enemy arrivals and enemy fire are the only stochastic inputs to the sim;
//! both draw from the per-run PCG stream so a seed reproduces a full run.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Enemy, Rect};
use crate::consts::*;

/// Per-tick enemy spawn probability for a level.
///
/// Grows linearly with level and is deliberately uncapped; the roll below
/// saturates at 1.0 on its own once the sum passes it.
pub fn enemy_spawn_chance(level: u32) -> f64 {
    ENEMY_SPAWN_RATE + level as f64 * SPAWN_RATE_PER_LEVEL
}

/// Roll the spawn chance and produce a new enemy above the field if it passes.
pub fn maybe_spawn_enemy(level: u32, rng: &mut Pcg32) -> Option<Enemy> {
    if rng.random::<f64>() < enemy_spawn_chance(level) {
        Some(spawn_enemy(rng))
    } else {
        None
    }
}

/// A fresh enemy at a random x just above the top bound.
pub fn spawn_enemy(rng: &mut Pcg32) -> Enemy {
    let x = rng.random_range(0.0..ENEMY_SPAWN_X_MAX);
    let vy = ENEMY_MIN_SPEED + rng.random::<f32>() * ENEMY_SPEED_SPREAD;
    Enemy {
        rect: Rect::new(x, ENEMY_SPAWN_Y, ENEMY_SIZE, ENEMY_SIZE),
        vel: Vec2::new(0.0, vy),
        health: 1,
        shoot_timer: 0,
    }
}

/// Whether an enemy fires this tick: warmup elapsed AND the chance roll passes.
/// The caller resets the timer on fire.
pub fn enemy_fires(shoot_timer: u32, rng: &mut Pcg32) -> bool {
    shoot_timer > ENEMY_SHOOT_WARMUP && rng.random::<f64>() < ENEMY_SHOOT_CHANCE
}
