//! Entity records for the shooter simulation
//!
//! Plain owned data, held in `Vec`s by `GameState`. Nothing here is shared or
//! reference-counted; the tick function mutates collections in place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle: position is the top-left corner, +y points down.
///
/// Shared shape for every entity and the sole collision primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Color tag for particle bursts (render-side lookup)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Player,
    Enemy,
}

/// The player's starship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
}

impl Player {
    /// Player at the fixed start position, as on every `start_game`
    pub fn spawn() -> Self {
        Self {
            rect: Rect::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_SIZE, PLAYER_SIZE),
        }
    }
}

/// Who fired a bullet (and therefore what it can hit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletKind {
    Player,
    Enemy,
}

/// A bullet in flight; velocity is fixed at spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub vel: Vec2,
    pub kind: BulletKind,
}

impl Bullet {
    /// Player bullet centered on the player's top edge, moving up
    pub fn from_player(player: &Player) -> Self {
        Self {
            rect: Rect::new(
                player.rect.pos.x + player.rect.size.x / 2.0 - PLAYER_BULLET_WIDTH / 2.0,
                player.rect.pos.y,
                PLAYER_BULLET_WIDTH,
                PLAYER_BULLET_HEIGHT,
            ),
            vel: Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            kind: BulletKind::Player,
        }
    }

    /// Enemy bullet centered below the enemy, moving down
    pub fn from_enemy(enemy: &Enemy) -> Self {
        Self {
            rect: Rect::new(
                enemy.rect.pos.x + enemy.rect.size.x / 2.0 - ENEMY_BULLET_WIDTH / 2.0,
                enemy.rect.pos.y + enemy.rect.size.y,
                ENEMY_BULLET_WIDTH,
                ENEMY_BULLET_HEIGHT,
            ),
            vel: Vec2::new(0.0, ENEMY_BULLET_SPEED),
            kind: BulletKind::Enemy,
        }
    }
}

/// A bug descending the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub vel: Vec2,
    pub health: u32,
    /// Ticks since this enemy last fired
    pub shoot_timer: u32,
}

/// A cosmetic explosion fragment; never participates in collision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub rect: Rect,
    pub vel: Vec2,
    pub tint: Tint,
    /// Remaining ticks; removed when it reaches zero
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Render alpha, proportional to remaining life
    pub fn alpha(&self) -> f32 {
        self.life as f32 / self.max_life as f32
    }
}
