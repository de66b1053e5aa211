//! Seeded 2D value noise
//!
//! The terrain is never stored as a bitmap. Every query recomputes the noise
//! from `(seed, x, y)`, so identical inputs always give identical outputs and
//! the background cannot flicker between frames.

use serde::{Deserialize, Serialize};

/// Row stride used to fold a 2D lattice coordinate into one integer
const LATTICE_ROW: i32 = 57;

/// Octave frequencies and weights for terrain texture
pub const OCTAVES: [(f32, f32); 3] = [(0.06, 0.7), (0.12, 0.6), (0.28, 0.3)];
/// Sum of the octave weights, used to bring the blend back into [0, 1)
pub const OCTAVE_WEIGHT_SUM: f32 = 1.6;

/// Deterministic value-noise field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseField {
    pub seed: u32,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Hash of an integer lattice point, in [0, 1)
    pub fn sample(&self, ix: i32, iy: i32) -> f32 {
        self.hash(ix.wrapping_add(iy.wrapping_mul(LATTICE_ROW)))
    }

    /// Bilinear interpolation of the lattice hash around `(x, y)`
    pub fn noise(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (ix, iy) = (x0 as i32, y0 as i32);

        let a = self.sample(ix, iy);
        let b = self.sample(ix.wrapping_add(1), iy);
        let c = self.sample(ix, iy.wrapping_add(1));
        let d = self.sample(ix.wrapping_add(1), iy.wrapping_add(1));

        let top = lerp(a, b, fx);
        let bottom = lerp(c, d, fx);
        lerp(top, bottom, fy)
    }

    /// Three-octave blend normalized by the total weight
    pub fn terrain_value(&self, x: f32, y: f32) -> f32 {
        let v: f32 = OCTAVES
            .iter()
            .map(|&(freq, weight)| self.noise(x * freq, y * freq) * weight)
            .sum();
        v / OCTAVE_WEIGHT_SUM
    }

    /// Integer avalanche (xor with seed, add, xorshift-multiply)
    fn hash(&self, x: i32) -> f32 {
        let mut v = (x as u32) ^ self.seed;
        v = v.wrapping_add(0x6D2B_79F5);
        v = (v ^ (v >> 15)).wrapping_mul(1 | v);
        // Top 24 bits as a fixed-point fraction (exact in f32, never reaches 1.0)
        (v >> 8) as f32 / (1u32 << 24) as f32
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_in_unit_range() {
        let field = NoiseField::new(0x1234_5678);
        for iy in -50..50 {
            for ix in -50..50 {
                let v = field.sample(ix, iy);
                assert!((0.0..1.0).contains(&v), "sample({ix},{iy}) = {v}");
            }
        }
    }

    #[test]
    fn test_noise_matches_lattice_at_integers() {
        let field = NoiseField::new(99);
        for i in 0..20 {
            let v = field.noise(i as f32, 3.0);
            assert_eq!(v, field.sample(i, 3));
        }
    }

    #[test]
    fn test_noise_is_pure() {
        let field = NoiseField::new(42);
        let first: Vec<f32> = (0..100).map(|i| field.noise(i as f32 * 0.37, 7.25)).collect();
        let second: Vec<f32> = (0..100).map(|i| field.noise(i as f32 * 0.37, 7.25)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_changes_field() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = (0..32).any(|i| a.sample(i, 0) != b.sample(i, 0));
        assert!(differs);
    }

    #[test]
    fn test_terrain_value_in_unit_range() {
        let field = NoiseField::new(7);
        for y in 100..180 {
            for x in 0..320 {
                let v = field.terrain_value(x as f32, y as f32);
                assert!((0.0..1.0).contains(&v));
            }
        }
    }
}
