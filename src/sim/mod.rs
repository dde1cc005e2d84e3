//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick stepping only, driven by the host
//! - Seeded RNG only
//! - Owned entity collections, mutated by exactly one tick at a time
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{rects_overlap, resolve_collisions, spawn_burst};
pub use entity::{Bullet, BulletKind, Enemy, Particle, Player, Rect, Tint};
pub use spawn::{enemy_spawn_chance, spawn_enemy};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
