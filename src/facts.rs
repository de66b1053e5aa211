//! "Did you know?" facts shown on the menu and the final game-over screen

use rand::Rng;
use serde::Serialize;

pub const FUN_FACTS: [&str; 15] = [
    "Asteroids are leftover rock from the solar system's formation, mostly found between Mars and Jupiter.",
    "The asteroid belt contains millions of objects, but their total mass is less than the Moon's.",
    "Ceres is the largest object in the asteroid belt and is classified as a dwarf planet (~940 km across).",
    "Some asteroids are \"rubble piles\": loose collections of rock held together by gravity.",
    "Near-Earth asteroids occasionally cross our path, so they are monitored for impact risk.",
    "Meteorites are pieces of asteroids or comets that survive passage through Earth's atmosphere.",
    "Jupiter's gravity helped shape the asteroid belt and creates gaps called Kirkwood gaps.",
    "Trojans are asteroids that share a planet's orbit near stable Lagrange points.",
    "Missions like OSIRIS-REx and Hayabusa returned samples from asteroids Bennu and Ryugu.",
    "Many asteroids have tiny moons: gravity works at every size in space.",
    "Asteroid speeds relative to Earth are typically tens of kilometers per second.",
    "Some primitive asteroids contain water-rich minerals and organic molecules.",
    "Metal-rich asteroids contain nickel and iron, potential targets for future mining.",
    "Large impacts have shaped Earth's history; one likely caused the dinosaur extinction ~66 million years ago.",
    "Space is mostly empty: asteroids are far apart, so collisions are rare on human timescales.",
];

/// Opacity gained per second while fading in
pub const FADE_IN_PER_SEC: f32 = 1.8;
/// Fading out runs at twice the fade-in speed
pub const FADE_OUT_PER_SEC: f32 = FADE_IN_PER_SEC * 2.0;

const HOLD_MIN_MS: f32 = 5000.0;
const HOLD_MAX_MS: f32 = 7000.0;

/// Fact index, hold countdown and fade state
#[derive(Debug, Clone, Default, Serialize)]
pub struct FactRotation {
    running: bool,
    index: usize,
    /// Time until the current fact starts fading out
    hold_ms: f32,
    opacity: f32,
    fading_in: bool,
}

impl FactRotation {
    /// Begin at a random fact, fully transparent
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.running = true;
        self.index = rng.random_range(0..FUN_FACTS.len());
        self.hold_ms = rng.random_range(HOLD_MIN_MS..HOLD_MAX_MS);
        self.opacity = 0.0;
        self.fading_in = true;
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt_ms: f32, rng: &mut R) {
        if !self.running {
            return;
        }
        let dt = dt_ms / 1000.0;
        self.hold_ms -= dt_ms;

        if self.hold_ms <= 0.0 {
            if self.opacity > 0.0 {
                self.fading_in = false;
                self.opacity = (self.opacity - FADE_OUT_PER_SEC * dt).max(0.0);
            } else {
                self.index = (self.index + 1) % FUN_FACTS.len();
                self.hold_ms = rng.random_range(HOLD_MIN_MS..HOLD_MAX_MS);
                self.fading_in = true;
            }
        } else if self.fading_in && self.opacity < 1.0 {
            self.opacity = (self.opacity + FADE_IN_PER_SEC * dt).min(1.0);
        }
    }

    /// Current fact text, if the rotation is running
    pub fn current(&self) -> Option<&'static str> {
        self.running.then(|| FUN_FACTS[self.index])
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}
