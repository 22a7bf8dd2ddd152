//! Collision tests and responses for axis-aligned boxes
//!
//! Ball and paddles are both center-anchored boxes, so every test is a
//! Minkowski sum of half-extents compared against center distance.

use glam::Vec2;

use super::state::Side;
use crate::normalize_angle;

/// Center-anchored axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Overlap test; touching edges count as a hit
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x <= reach.x && d.y <= reach.y
    }
}

/// Clamp a candidate ball Y into the playfield.
///
/// Returns the clamped Y when the ball crossed the top or bottom bound.
pub fn wall_contact(y: f32, half_ball: f32, height: f32) -> Option<f32> {
    if y < half_ball || y > height - half_ball {
        Some(y.clamp(half_ball, height - half_ball))
    } else {
        None
    }
}

/// Mirror a heading about the horizontal axis
#[inline]
pub fn reflect_vertical(angle: f32) -> f32 {
    normalize_angle(-angle)
}

/// Heading after a paddle hit.
///
/// `jitter` is a uniform sample in [-1, 1] scaled by `spread`; `impact` is
/// the hit offset from the paddle center in half-lengths (-1 top, 1 bottom)
/// scaled by `bias`.
pub fn departure_angle(side: Side, jitter: f32, spread: f32, impact: f32, bias: f32) -> f32 {
    normalize_angle(side.outward_angle() + jitter * spread + impact.clamp(-1.0, 1.0) * bias)
}

/// Ball X just outside the paddle face, so the next frame cannot re-hit
pub fn snap_outside(side: Side, paddle_center_x: f32, half_ball: f32, half_width: f32, epsilon: f32) -> f32 {
    let offset = half_ball + half_width + epsilon;
    match side {
        Side::Left => paddle_center_x + offset,
        Side::Right => paddle_center_x - offset,
    }
}
