//! Timer-driven hazard spawning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Hazard;
use crate::consts::*;

/// Smallest hazard radius for a world of the given width
pub fn min_radius(width: f32) -> f32 {
    (width * 0.02).round().max(2.0)
}

/// Largest hazard radius for a world of the given width
pub fn max_radius(width: f32) -> f32 {
    (width * 0.045).round().max(min_radius(width) + 1.0)
}

/// Create one hazard just above the top edge
///
/// Bigger hazards fall slightly slower; every hazard falls at least
/// [`HAZARD_MIN_SPEED`].
pub fn spawn_hazard<R: Rng + ?Sized>(rng: &mut R, width: f32) -> Hazard {
    let min_r = min_radius(width) as u32;
    let max_r = max_radius(width) as u32;
    let radius = rng.random_range(min_r..=max_r) as f32;
    let x = radius + rng.random::<f32>() * (width - radius * 2.0);
    let speed = (12.0 + rng.random::<f32>() * 24.0 - radius * 0.6).max(HAZARD_MIN_SPEED);
    Hazard {
        pos: Vec2::new(x, -radius),
        radius,
        speed,
        angle: rng.random::<f32>() * std::f32::consts::TAU,
        rot_speed: (rng.random::<f32>() - 0.5) * 2.0 * HAZARD_MAX_ROT_SPEED,
    }
}

/// Countdown until the next hazard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Milliseconds until the next spawn (starts at 0: spawn immediately)
    pub timer: f32,
}

impl Spawner {
    /// Advance the countdown; returns a new hazard when it expires
    pub fn update<R: Rng + ?Sized>(&mut self, dt_ms: f32, rng: &mut R) -> Option<Hazard> {
        self.timer -= dt_ms;
        if self.timer > 0.0 {
            return None;
        }
        let hazard = spawn_hazard(rng, LOGICAL_WIDTH);
        self.timer = rng.random_range(SPAWN_INTERVAL_MIN_MS..=SPAWN_INTERVAL_MAX_MS);
        Some(hazard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_radius_range_for_default_world() {
        assert_eq!(min_radius(LOGICAL_WIDTH), 6.0);
        assert_eq!(max_radius(LOGICAL_WIDTH), 14.0);
        // Tiny worlds still get a usable range
        assert_eq!(min_radius(10.0), 2.0);
        assert_eq!(max_radius(10.0), 3.0);
    }

    #[test]
    fn test_spawned_hazards_are_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(2024);
        for _ in 0..500 {
            let h = spawn_hazard(&mut rng, LOGICAL_WIDTH);
            assert!(h.radius >= 6.0 && h.radius <= 14.0);
            assert_eq!(h.radius.fract(), 0.0);
            assert!(h.pos.x >= h.radius && h.pos.x <= LOGICAL_WIDTH - h.radius);
            assert_eq!(h.pos.y, -h.radius);
            assert!(h.speed >= HAZARD_MIN_SPEED);
            assert!(h.speed <= 36.0 - h.radius * 0.6 || h.speed == HAZARD_MIN_SPEED);
            assert!(h.rot_speed.abs() <= HAZARD_MAX_ROT_SPEED);
        }
    }

    #[test]
    fn test_spawner_waits_for_countdown() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = Spawner::default();

        assert!(spawner.update(16.0, &mut rng).is_some());
        let reset = spawner.timer;
        assert!((SPAWN_INTERVAL_MIN_MS..=SPAWN_INTERVAL_MAX_MS).contains(&reset));

        // Not yet
        assert!(spawner.update(reset - 1.0, &mut rng).is_none());
        // Now
        assert!(spawner.update(2.0, &mut rng).is_some());
    }
}
