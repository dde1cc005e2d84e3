//! Per-tick simulation step
//!
//! The host requests exactly one tick per display refresh while in Playing and
//! cancels its callback on any phase exit; `tick` additionally refuses to run
//! outside Playing so a stale callback can never advance reset state.
//!
//! Ordering inside a tick is fixed for reproducibility: player movement,
//! player fire, enemy spawn, enemy update, bullet update, particle update,
//! collision resolution, level-up check. Collisions are resolved after
//! movement, against the positions the renderer just drew (one tick of visual
//! latency is expected).

use super::collision::resolve_collisions;
use super::entity::{Bullet, BulletKind};
use super::spawn::{enemy_fires, maybe_spawn_enemy};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single tick.
///
/// Populated by the host's event listener; the sim never reads key state
/// directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
}

/// Advance the simulation by one tick. No-op unless the phase is Playing.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    move_player(state, input);

    // Player fire, capped by bullets already in flight
    if input.shoot {
        let in_flight = state
            .bullets
            .iter()
            .filter(|b| b.kind == BulletKind::Player)
            .count();
        if in_flight < MAX_PLAYER_BULLETS {
            state.bullets.push(Bullet::from_player(&state.player));
        }
    }

    // Probabilistic enemy arrival, rate keyed to the current level
    if let Some(enemy) = maybe_spawn_enemy(state.level, &mut state.rng) {
        state.enemies.push(enemy);
    }

    update_enemies(state);
    update_bullets(state);
    update_particles(state);

    resolve_collisions(state);

    state.check_level_up();
}

/// Apply held directions, clamped to the field. Each direction contributes its
/// full step independently.
fn move_player(state: &mut GameState, input: &TickInput) {
    let rect = &mut state.player.rect;
    if input.left && rect.pos.x > 0.0 {
        rect.pos.x -= PLAYER_SPEED;
    }
    if input.right && rect.pos.x < FIELD_WIDTH - rect.size.x {
        rect.pos.x += PLAYER_SPEED;
    }
    if input.up && rect.pos.y > 0.0 {
        rect.pos.y -= PLAYER_SPEED;
    }
    if input.down && rect.pos.y < FIELD_HEIGHT - rect.size.y {
        rect.pos.y += PLAYER_SPEED;
    }
}

/// Advance enemies, roll their fire chance, cull the ones past the bottom.
fn update_enemies(state: &mut GameState) {
    let mut new_bullets: Vec<Bullet> = Vec::new();
    for enemy in &mut state.enemies {
        enemy.rect.pos += enemy.vel;
        enemy.shoot_timer += 1;
        if enemy_fires(enemy.shoot_timer, &mut state.rng) {
            new_bullets.push(Bullet::from_enemy(enemy));
            enemy.shoot_timer = 0;
        }
    }
    state.bullets.extend(new_bullets);
    state
        .enemies
        .retain(|e| e.rect.pos.y < FIELD_HEIGHT + ENEMY_CULL_MARGIN);
}

/// Advance bullets, cull the ones outside the field (with margin on both ends).
fn update_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.rect.pos += bullet.vel;
    }
    state.bullets.retain(|b| {
        b.rect.pos.y > -BULLET_CULL_MARGIN && b.rect.pos.y < FIELD_HEIGHT + BULLET_CULL_MARGIN
    });
}

/// Advance particles and decay their life; expired ones vanish this tick.
fn update_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.rect.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Enemy, Rect};
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42);
        state.start_game();
        state
    }

    /// Enemy parked directly on top of a position, not moving, never firing
    fn static_enemy(x: f32, y: f32) -> Enemy {
        Enemy {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            vel: Vec2::ZERO,
            health: 1,
            shoot_timer: 0,
        }
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut state = GameState::new(1);
        let before = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, before);

        state.start_game();
        state.pause_toggle();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, before);
    }

    #[test]
    fn test_player_movement_clamped_and_unnormalized() {
        let mut state = playing_state();
        let start = state.player.rect.pos;

        // Diagonal input moves the full step on both axes
        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.rect.pos.x, start.x - PLAYER_SPEED);
        assert_eq!(state.player.rect.pos.y, start.y - PLAYER_SPEED);

        // Pinned against the left edge, x stops moving
        state.player.rect.pos.x = 0.0;
        tick(&mut state, &input);
        assert_eq!(state.player.rect.pos.x, 0.0);
    }

    #[test]
    fn test_player_bullet_cap() {
        let mut state = playing_state();
        let input = TickInput {
            shoot: true,
            ..Default::default()
        };
        // Hold fire longer than the cap; bullets climb 8/tick from y=500 so
        // none can exit the field this early.
        for _ in 0..MAX_PLAYER_BULLETS + 3 {
            tick(&mut state, &input);
        }
        let in_flight = state
            .bullets
            .iter()
            .filter(|b| b.kind == BulletKind::Player)
            .count();
        assert_eq!(in_flight, MAX_PLAYER_BULLETS);
    }

    #[test]
    fn test_bullet_kills_overlapping_enemy() {
        let mut state = playing_state();
        // Three seeded enemies; the middle one sits in the bullet's path
        state.enemies = vec![
            static_enemy(100.0, 100.0),
            static_enemy(400.0, 300.0),
            static_enemy(700.0, 100.0),
        ];
        // Player bullet already overlapping enemy #2's rectangle
        state.bullets.push(Bullet {
            rect: Rect::new(410.0, 310.0, PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
            vel: Vec2::ZERO,
            kind: BulletKind::Player,
        });

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, KILL_SCORE);
        assert!(!state.bullets.iter().any(|b| b.kind == BulletKind::Player));
        // The hit enemy is gone; its two seeded neighbors survive. (A fresh
        // spawn above the field may or may not have arrived this tick.)
        assert!(!state.enemies.iter().any(|e| e.rect.pos.y == 300.0));
        assert_eq!(
            state.enemies.iter().filter(|e| e.rect.pos.y == 100.0).count(),
            2
        );
        // One burst of PARTICLE_COUNT particles at the enemy's former center
        assert_eq!(state.particles.len(), PARTICLE_COUNT);
        let center = Vec2::new(400.0 + ENEMY_SIZE / 2.0, 300.0 + ENEMY_SIZE / 2.0);
        for p in &state.particles {
            assert!((p.rect.pos - center).abs().max_element() <= PARTICLE_JITTER);
            assert_eq!(p.life, PARTICLE_LIFE);
        }
    }

    #[test]
    fn test_enemy_bullet_hit_on_last_life_ends_run() {
        let mut state = playing_state();
        state.lives = 1;
        let player_center = state.player.rect.center();
        state.bullets.push(Bullet {
            rect: Rect::new(
                player_center.x,
                player_center.y,
                ENEMY_BULLET_WIDTH,
                ENEMY_BULLET_HEIGHT,
            ),
            vel: Vec2::ZERO,
            kind: BulletKind::Enemy,
        });

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.submit_eligible);
    }

    #[test]
    fn test_enemy_contact_costs_a_life_and_removes_enemy() {
        let mut state = playing_state();
        let p = state.player.rect.pos;
        state.enemies.push(static_enemy(p.x + 5.0, p.y + 5.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.enemies.iter().any(|e| e.rect.pos.y == p.y + 5.0));
        // Bursts at both centers
        assert_eq!(state.particles.len(), 2 * PARTICLE_COUNT);
    }

    #[test]
    fn test_expired_particles_absent_after_tick() {
        let mut state = playing_state();
        crate::sim::collision::spawn_burst(
            &mut state.particles,
            Vec2::new(100.0, 100.0),
            crate::sim::entity::Tint::Enemy,
            &mut state.rng,
        );
        for p in &mut state.particles {
            p.life = 1;
        }

        tick(&mut state, &TickInput::default());
        // A particle with one tick left is gone in the same tick it expires
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_offscreen_bullets_and_enemies_culled() {
        let mut state = playing_state();
        state.bullets.push(Bullet {
            rect: Rect::new(10.0, -BULLET_CULL_MARGIN - 30.0, 4.0, 10.0),
            vel: Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            kind: BulletKind::Player,
        });
        state
            .enemies
            .push(static_enemy(10.0, FIELD_HEIGHT + ENEMY_CULL_MARGIN + 1.0));

        tick(&mut state, &TickInput::default());

        assert!(state.bullets.is_empty());
        assert!(
            state
                .enemies
                .iter()
                .all(|e| e.rect.pos.y < FIELD_HEIGHT + ENEMY_CULL_MARGIN)
        );
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let run = |seed: u64| {
            let mut state = GameState::new(seed);
            state.start_game();
            let input = TickInput {
                shoot: true,
                left: true,
                ..Default::default()
            };
            for _ in 0..600 {
                tick(&mut state, &input);
            }
            (
                state.score,
                state.lives,
                state.level,
                state.enemies.len(),
                state.bullets.len(),
            )
        };
        assert_eq!(run(1234), run(1234));
    }
}
