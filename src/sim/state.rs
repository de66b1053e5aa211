//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; presentation only
//! reads it between steps.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lifecycle::RunPhase;
use super::spawner::Spawner;
use super::terrain::Terrain;
use crate::consts::*;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center of the ship
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
    /// Milliseconds until the next shot is allowed (may go negative)
    pub shoot_cooldown: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(LOGICAL_WIDTH / 2.0, PLAYER_Y),
            w: PLAYER_WIDTH,
            h: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            shoot_cooldown: 0.0,
        }
    }
}

impl Player {
    /// Spawn point for a projectile (just above the nose)
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.h / 2.0 - 1.0)
    }
}

/// A projectile fired upward by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Center of the projectile rectangle
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    /// Upward speed (pixels/s)
    pub speed: f32,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            w: PROJECTILE_WIDTH,
            h: PROJECTILE_HEIGHT,
            speed: PROJECTILE_SPEED,
        }
    }
}

/// A falling asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub radius: f32,
    /// Downward speed (pixels/s)
    pub speed: f32,
    /// Visual rotation (radians)
    pub angle: f32,
    /// Rotation speed (radians/s)
    pub rot_speed: f32,
}

impl Hazard {
    /// Lowest point of the hazard
    #[inline]
    pub fn leading_edge(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Points for shooting this hazard down (smaller is worth more)
    pub fn points(&self) -> u64 {
        let bonus = ((10.0 - self.radius) * 2.0).floor() as i64 + 5;
        bonus.max(10) as u64
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Remaining lifetime (ms)
    pub life: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub size: f32,
}

/// A background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Milliseconds until the next twinkle
    pub twinkle: f32,
}

/// Invincibility window granted by a correct quiz answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Invincibility {
    pub active: bool,
    /// Time spent invincible so far (ms)
    pub elapsed: f32,
}

impl Invincibility {
    pub fn grant(&mut self) {
        self.active = true;
        self.elapsed = 0.0;
    }

    /// Accumulate elapsed time, expiring the window after [`INVINCIBILITY_MS`]
    pub fn update(&mut self, dt_ms: f32) {
        if !self.active {
            return;
        }
        self.elapsed += dt_ms;
        if self.elapsed >= INVINCIBILITY_MS {
            self.active = false;
            self.elapsed = 0.0;
        }
    }

    /// Milliseconds left (0 when inactive)
    pub fn remaining(&self) -> f32 {
        if self.active {
            (INVINCIBILITY_MS - self.elapsed).max(0.0)
        } else {
            0.0
        }
    }
}

/// Something that happened during a step, for the audio/persistence shell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile was fired
    Shot,
    /// A projectile destroyed a hazard
    HazardDestroyed { pos: Vec2, points: u64 },
    /// A hazard reached the terrain line
    TerrainImpact { pos: Vec2, absorbed: bool },
    /// Hearts reached zero; the extra-life offer is open
    GameOver { score: u64 },
    /// Correct quiz answer restored a heart
    ExtraLife { hearts: u8 },
    /// The run is over for good
    RunEnded { score: u64 },
    /// Best score changed and should be persisted
    NewBest { score: u64 },
}

/// The world aggregate: entity stores plus run state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Current run phase
    pub phase: RunPhase,
    /// Score for the current run (never decreases within a run)
    pub score: u64,
    /// Remaining hearts (0..=MAX_HEARTS)
    pub hearts: u8,
    /// Best score across runs
    pub best_score: u64,
    pub invincibility: Invincibility,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub hazards: Vec<Hazard>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub spawner: Spawner,
    /// Background terrain (seed + calibrated threshold, fixed for the run)
    pub terrain: Terrain,
    /// Particle cap for bursts
    pub max_particles: usize,
    /// Whether the starfield is generated
    pub starfield: bool,
    /// Events produced since the shell last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    rng: Pcg32,
}

impl GameState {
    /// Create a new world in the menu with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = Terrain::calibrated(rng.random_range(0..0x7fff_ffff), TERRAIN_LAND_FRACTION);
        let mut state = Self {
            seed,
            phase: RunPhase::Menu,
            score: 0,
            hearts: START_HEARTS,
            best_score: 0,
            invincibility: Invincibility::default(),
            player: Player::default(),
            projectiles: Vec::new(),
            hazards: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            spawner: Spawner::default(),
            terrain,
            max_particles: crate::settings::QualityPreset::default().particle_cap(),
            starfield: true,
            events: Vec::new(),
            rng,
        };
        state.init_stars();
        state
    }

    /// Reset every per-run store (player, entities, score, hearts, timers, terrain)
    pub fn reset_run(&mut self) {
        self.player = Player::default();
        self.projectiles.clear();
        self.hazards.clear();
        self.particles.clear();
        self.score = 0;
        self.hearts = START_HEARTS;
        self.invincibility = Invincibility::default();
        self.spawner = Spawner::default();
        let terrain_seed = self.rng.random_range(0..0x7fff_ffff);
        self.terrain = Terrain::calibrated(terrain_seed, TERRAIN_LAND_FRACTION);
        self.init_stars();
    }

    /// Scatter the background stars
    pub fn init_stars(&mut self) {
        self.stars.clear();
        if !self.starfield {
            return;
        }
        for _ in 0..STAR_COUNT {
            let star = Star {
                pos: Vec2::new(
                    self.rng.random::<f32>() * LOGICAL_WIDTH,
                    self.rng.random::<f32>() * LOGICAL_HEIGHT,
                ),
                size: self.rng.random::<f32>() * 1.5 + 0.5,
                twinkle: self.rng.random::<f32>() * 1000.0,
            };
            self.stars.push(star);
        }
    }

    /// Advance the spawn countdown, pushing a hazard when it expires
    pub fn update_spawner(&mut self, dt_ms: f32) -> bool {
        match self.spawner.update(dt_ms, &mut self.rng) {
            Some(hazard) => {
                self.hazards.push(hazard);
                true
            }
            None => false,
        }
    }

    /// Twinkle countdowns for the background stars
    pub fn twinkle_stars(&mut self, dt_ms: f32) {
        for star in &mut self.stars {
            star.twinkle -= dt_ms;
            if star.twinkle <= 0.0 {
                star.twinkle = 500.0 + self.rng.random::<f32>() * 1000.0;
                star.size = self.rng.random::<f32>() * 1.6 + 0.4;
            }
        }
    }

    /// Simulation RNG
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Award points (score is monotonic)
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Fold the current score into the best score, emitting `NewBest` when it grows
    pub fn record_best(&mut self) -> bool {
        if self.score > self.best_score {
            self.best_score = self.score;
            self.events.push(GameEvent::NewBest { score: self.score });
            true
        } else {
            false
        }
    }

    /// True when the current score is a new high score
    pub fn is_new_best(&self) -> bool {
        self.score > 0 && self.score >= self.best_score
    }

    /// Spawn an explosion of up to `count` particles (respecting the cap)
    pub fn spawn_burst(&mut self, origin: Vec2, count: usize, color: u32) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = self.rng.random::<f32>() * 40.0 + 20.0;
            let particle = Particle {
                pos: origin,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 20.0),
                gravity: PARTICLE_GRAVITY,
                life: 400.0 + self.rng.random::<f32>() * 400.0,
                color,
                size: self.rng.random::<f32>() * 2.0 + 0.8,
            };
            self.particles.push(particle);
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
