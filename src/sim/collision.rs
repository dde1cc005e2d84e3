//! Collision detection and resolution
//!
//! One predicate rules all hit detection: strict AABB overlap. Resolution runs
//! in three phases per tick, each to completion, so multiple simultaneous hits
//! all land in the same tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{BulletKind, Particle, Rect, Tint};
use super::state::GameState;
use crate::consts::*;

/// Strict AABB overlap test.
///
/// Exact edge-touching does not count as a collision, and degenerate
/// (zero-area) rectangles never collide with anything.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    if a.size.x <= 0.0 || a.size.y <= 0.0 || b.size.x <= 0.0 || b.size.y <= 0.0 {
        return false;
    }
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

/// Spawn a burst of particles around an impact point.
///
/// Fixed count, small positional jitter, random velocity in
/// [-PARTICLE_VEL, PARTICLE_VEL] per axis, fixed lifetime.
pub fn spawn_burst(particles: &mut Vec<Particle>, at: Vec2, tint: Tint, rng: &mut Pcg32) {
    for _ in 0..PARTICLE_COUNT {
        let jitter = Vec2::new(
            rng.random_range(-PARTICLE_JITTER..PARTICLE_JITTER),
            rng.random_range(-PARTICLE_JITTER..PARTICLE_JITTER),
        );
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_VEL..PARTICLE_VEL),
            rng.random_range(-PARTICLE_VEL..PARTICLE_VEL),
        );
        particles.push(Particle {
            rect: Rect::new(at.x + jitter.x, at.y + jitter.y, PARTICLE_SIZE, PARTICLE_SIZE),
            vel,
            tint,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
        });
    }
}

/// Run the three collision phases against the current collections.
///
/// Phase order: player bullets vs enemies, enemy bullets vs player, enemies vs
/// player. No early exit: one tick can destroy several enemies and cost
/// several lives. Removal is mark-and-sweep so every overlapping pair observed
/// at phase start resolves independently.
pub fn resolve_collisions(state: &mut GameState) {
    // (a) player bullets vs enemies
    let mut dead_bullets = vec![false; state.bullets.len()];
    let mut dead_enemies = vec![false; state.enemies.len()];
    let mut score_gained = 0u64;

    for (bi, bullet) in state.bullets.iter().enumerate() {
        if bullet.kind != BulletKind::Player {
            continue;
        }
        for (ei, enemy) in state.enemies.iter().enumerate() {
            if dead_enemies[ei] {
                continue;
            }
            if rects_overlap(&bullet.rect, &enemy.rect) {
                dead_bullets[bi] = true;
                dead_enemies[ei] = true;
                spawn_burst(
                    &mut state.particles,
                    enemy.rect.center(),
                    Tint::Enemy,
                    &mut state.rng,
                );
                score_gained += KILL_SCORE;
            }
        }
    }
    state.add_score(score_gained);

    // (b) enemy bullets vs player
    let player_rect = state.player.rect;
    let mut lives_lost = 0u32;
    for (bi, bullet) in state.bullets.iter().enumerate() {
        if bullet.kind != BulletKind::Enemy || dead_bullets[bi] {
            continue;
        }
        if rects_overlap(&bullet.rect, &player_rect) {
            dead_bullets[bi] = true;
            spawn_burst(
                &mut state.particles,
                player_rect.center(),
                Tint::Player,
                &mut state.rng,
            );
            lives_lost += 1;
        }
    }

    // (c) enemies vs player (direct contact)
    for (ei, enemy) in state.enemies.iter().enumerate() {
        if dead_enemies[ei] {
            continue;
        }
        if rects_overlap(&enemy.rect, &player_rect) {
            dead_enemies[ei] = true;
            spawn_burst(
                &mut state.particles,
                enemy.rect.center(),
                Tint::Enemy,
                &mut state.rng,
            );
            spawn_burst(
                &mut state.particles,
                player_rect.center(),
                Tint::Player,
                &mut state.rng,
            );
            lives_lost += 1;
        }
    }

    // Sweep removals, then apply life loss (may flip phase to GameOver)
    let mut bi = 0;
    state.bullets.retain(|_| {
        let keep = !dead_bullets[bi];
        bi += 1;
        keep
    });
    let mut ei = 0;
    state.enemies.retain(|_| {
        let keep = !dead_enemies[ei];
        ei += 1;
        keep
    });
    for _ in 0..lives_lost {
        state.lose_life();
    }
}
