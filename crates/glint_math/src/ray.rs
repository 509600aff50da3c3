//! Rays: an origin plus a unit direction.

use glam::DVec3;

use crate::Dir3;

/// Offset applied by [`Ray::offset`] to step a secondary ray's origin off
/// the surface it spawned from, so it cannot re-hit that surface at t ≈ 0.
pub const DELTA: f64 = 0.1;

/// A half-line through the scene.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub dir: Dir3,
}

impl Ray {
    /// Create a ray from an origin and a direction.
    pub fn new(origin: DVec3, dir: Dir3) -> Self {
        Self { origin, dir }
    }

    /// Create a secondary ray whose origin is nudged [`DELTA`] along
    /// `normal`, on whichever side of the surface `dir` points to.
    ///
    /// Shadow, reflection and refraction rays all start this way; without
    /// the nudge they would immediately re-intersect their own surface.
    pub fn offset(origin: DVec3, dir: Dir3, normal: Dir3) -> Self {
        let side = if dir.dot(normal.as_vec()) >= 0.0 {
            DELTA
        } else {
            -DELTA
        };
        Self {
            origin: origin + normal.as_vec() * side,
            dir,
        }
    }

    /// The point along the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.dir.as_vec() * t
    }
}
