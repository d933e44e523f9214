//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the entity lists)
//! - No rendering, audio or file access

pub mod collision;
pub mod entities;
pub mod lane;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CONTACT_DAMAGE, apply_pickup, resolve_collisions};
pub use entities::{Body, Bullet, Enemy, EnemyKind, LaserBeam, Pickup, PickupKind};
pub use lane::LaneGrid;
pub use player::Player;
pub use spawner::{Spawner, select_weighted};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{LaneChange, TickInput, tick};
