//! Collision detection between projectiles and hazards
//!
//! Projectiles are axis-aligned rectangles, hazards are circles. The test
//! finds the point of the rectangle closest to the circle center and compares
//! its distance against the radius.

use glam::Vec2;

use super::state::{Hazard, Projectile};

/// Closest point on an axis-aligned rectangle (given by center and size) to `p`
#[inline]
pub fn closest_point_on_rect(center: Vec2, size: Vec2, p: Vec2) -> Vec2 {
    let min = center - size / 2.0;
    let max = min + size;
    p.clamp(min, max)
}

/// Circle vs rectangle overlap; touching counts as a hit
pub fn circle_rect_overlap(circle: Vec2, radius: f32, rect_center: Vec2, rect_size: Vec2) -> bool {
    let closest = closest_point_on_rect(rect_center, rect_size, circle);
    circle.distance_squared(closest) <= radius * radius
}

/// Does this projectile hit this hazard?
#[inline]
pub fn projectile_hits_hazard(projectile: &Projectile, hazard: &Hazard) -> bool {
    circle_rect_overlap(
        hazard.pos,
        hazard.radius,
        projectile.pos,
        Vec2::new(projectile.w, projectile.h),
    )
}
