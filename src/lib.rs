//! Asteroid Smash - a single-screen planet defense arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, terrain, run life-cycle)
//! - `game`: Frame driver wiring the simulation to its collaborators
//! - `audio`: Sound effect sink (Web Audio on wasm32)
//! - `highscores`: Best-score persistence
//! - `platform`: Input normalization and the browser façade
//! - `quiz` / `facts`: Extra-life questions and game-over facts

pub mod audio;
pub mod facts;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod quiz;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::{FileStore, MemoryStore, ScoreStore};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical resolution (pixel-art friendly 16:9)
    pub const LOGICAL_WIDTH: f32 = 320.0;
    pub const LOGICAL_HEIGHT: f32 = 180.0;

    /// Height of the defended terrain strip (~9% of the logical height)
    pub const TERRAIN_HEIGHT: f32 = 16.0;
    /// Hazards whose bottom edge reaches this y have hit the planet
    pub const TERRAIN_LINE: f32 = LOGICAL_HEIGHT - TERRAIN_HEIGHT;

    /// Longest step the simulation will integrate (seconds)
    pub const MAX_DT: f32 = 0.05;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 11.0;
    pub const PLAYER_HEIGHT: f32 = 6.0;
    pub const PLAYER_SPEED: f32 = 80.0;
    pub const PLAYER_Y: f32 = TERRAIN_LINE - 10.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 2.0;
    pub const PROJECTILE_HEIGHT: f32 = 6.0;
    pub const PROJECTILE_SPEED: f32 = 180.0;
    /// Projectiles above this y are culled
    pub const PROJECTILE_CULL_Y: f32 = -4.0;
    pub const SHOOT_COOLDOWN_MS: f32 = 180.0;
    pub const MAX_PROJECTILES: usize = 5;

    /// Hazard spawning
    pub const SPAWN_INTERVAL_MIN_MS: f32 = 600.0;
    pub const SPAWN_INTERVAL_MAX_MS: f32 = 1600.0;
    pub const HAZARD_MIN_SPEED: f32 = 8.0;
    pub const HAZARD_MAX_ROT_SPEED: f32 = 0.6;

    /// Hearts
    pub const START_HEARTS: u8 = 3;
    pub const MAX_HEARTS: u8 = 5;

    /// Timed windows (ms)
    pub const INVINCIBILITY_MS: f32 = 5000.0;
    pub const QUIZ_OFFER_MS: f32 = 5000.0;

    /// Particle bursts
    pub const TERRAIN_BURST_MAX: usize = 12;
    pub const HIT_BURST_MAX: usize = 18;
    pub const PARTICLE_GRAVITY: f32 = 60.0;
    pub const TERRAIN_BURST_COLOR: u32 = 0xff8b6b;
    pub const HIT_BURST_COLOR: u32 = 0xffd166;

    /// Background stars
    pub const STAR_COUNT: usize = 60;

    /// Fraction of the visible hemisphere that should be land
    pub const TERRAIN_LAND_FRACTION: f32 = 0.30;
    /// Threshold used when calibration has nothing to sample
    pub const DEFAULT_TERRAIN_THRESHOLD: f32 = 0.3;
}

/// Convert elapsed seconds to the millisecond unit used by countdowns
#[inline]
pub fn secs_to_ms(dt: f32) -> f32 {
    dt * 1000.0
}

/// Whole seconds left on a millisecond countdown (for HUD display)
#[inline]
pub fn whole_seconds_left(remaining_ms: f32) -> u32 {
    (remaining_ms.max(0.0) / 1000.0).ceil() as u32
}
