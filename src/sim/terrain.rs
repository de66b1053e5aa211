//! Procedural planet terrain
//!
//! The planet is a wide half-disc drawn under the ship. Land vs ocean is a
//! pure function of `(seed, threshold, pixel)`; the threshold is calibrated
//! once per run so roughly the target fraction of the hemisphere is land,
//! whatever the seed.

use serde::{Deserialize, Serialize};

use super::noise::NoiseField;
use crate::consts::*;

/// Stride used when sampling the hemisphere for calibration
pub const CALIBRATION_STRIDE: usize = 2;

/// Geometry of the visible hemisphere (pixel units)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainShape {
    pub center_x: i32,
    /// Row of the hemisphere's top (the rim)
    pub top_y: i32,
    pub x_radius: i32,
    pub y_radius: i32,
}

impl Default for TerrainShape {
    fn default() -> Self {
        Self {
            center_x: (LOGICAL_WIDTH / 2.0) as i32,
            top_y: (PLAYER_Y + 10.0).round() as i32,
            x_radius: (LOGICAL_WIDTH * 0.55).round() as i32,
            y_radius: (LOGICAL_HEIGHT * 0.33).round() as i32,
        }
    }
}

impl TerrainShape {
    /// Pixel coordinates covered by the hemisphere, every `stride` pixels
    pub fn cells(&self, stride: usize) -> impl Iterator<Item = (i32, i32)> + '_ {
        let stride = stride.max(1);
        let (xr, yr) = (self.x_radius, self.y_radius);
        let rows = if xr > 0 && yr > 0 { -yr..=0 } else { 1..=0 };
        rows.step_by(stride).flat_map(move |yy| {
            let t = (yy * yy) as f32 / (yr * yr) as f32;
            let half = (xr as f32 * (1.0 - t).sqrt()).floor() as i32;
            let y = self.top_y + yr + yy;
            (-half..=half)
                .step_by(stride)
                .map(move |xx| (self.center_x + xx, y))
        })
    }
}

/// Pick the threshold so that about `target_fraction` of samples lie above it
///
/// Falls back to [`DEFAULT_TERRAIN_THRESHOLD`] when the shape covers no cells.
pub fn calibrate_threshold(
    noise: &NoiseField,
    shape: &TerrainShape,
    target_fraction: f32,
    stride: usize,
) -> f32 {
    let mut values: Vec<f32> = shape
        .cells(stride)
        .map(|(x, y)| noise.terrain_value(x as f32, y as f32))
        .collect();
    if values.is_empty() {
        return DEFAULT_TERRAIN_THRESHOLD;
    }
    values.sort_by(f32::total_cmp);
    let rank = ((1.0 - target_fraction) * values.len() as f32).floor() as isize;
    let rank = rank.clamp(0, values.len() as isize - 1) as usize;
    values[rank]
}

/// Terrain model for one run: seed and calibrated threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub noise: NoiseField,
    pub threshold: f32,
    pub shape: TerrainShape,
}

impl Terrain {
    /// Build the terrain for `seed`, calibrating the threshold once
    pub fn calibrated(seed: u32, target_fraction: f32) -> Self {
        let noise = NoiseField::new(seed);
        let shape = TerrainShape::default();
        let threshold = calibrate_threshold(&noise, &shape, target_fraction, CALIBRATION_STRIDE);
        log::debug!("Terrain seed {seed}: threshold {threshold:.4}");
        Self {
            noise,
            threshold,
            shape,
        }
    }

    pub fn seed(&self) -> u32 {
        self.noise.seed
    }

    /// Land/ocean classification of a pixel
    pub fn is_land(&self, x: i32, y: i32) -> bool {
        self.noise.terrain_value(x as f32, y as f32) > self.threshold
    }

    /// Fraction of hemisphere cells classified as land at the given stride
    pub fn land_fraction(&self, stride: usize) -> f32 {
        let (land, total) = self
            .shape
            .cells(stride)
            .fold((0usize, 0usize), |(land, total), (x, y)| {
                (land + usize::from(self.is_land(x, y)), total + 1)
            });
        if total == 0 {
            0.0
        } else {
            land as f32 / total as f32
        }
    }
}
