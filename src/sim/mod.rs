//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering, audio, storage or platform dependencies

pub mod collision;
pub mod lifecycle;
pub mod noise;
pub mod spawner;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{circle_rect_overlap, projectile_hits_hazard};
pub use lifecycle::RunPhase;
pub use noise::NoiseField;
pub use spawner::{Spawner, spawn_hazard};
pub use state::{
    GameEvent, GameState, Hazard, Invincibility, Particle, Player, Projectile, Star,
};
pub use terrain::{Terrain, TerrainShape, calibrate_threshold};
pub use tick::{TickInput, click_fire, fire, tick};
