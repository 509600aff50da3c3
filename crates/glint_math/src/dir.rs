//! Unit-length direction vectors.

use std::ops::{Deref, Neg};

use glam::DVec3;

use crate::EPSILON;

/// A direction in 3D space, guaranteed to be unit length.
///
/// Ray directions, surface normals, and camera basis vectors are all stored
/// as `Dir3`, so downstream shading code never has to re-normalize or worry
/// about a zero vector sneaking in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Dir3(DVec3);

impl Dir3 {
    /// Normalize `v` into a direction.
    ///
    /// Panics if `v` is degenerate (zero or near-zero length). Use this where
    /// a zero vector indicates a construction bug; use [`Dir3::try_new`] at
    /// call sites that must recover from coincident points.
    pub fn new(v: DVec3) -> Self {
        Self::try_new(v).expect("zero-length vector has no direction")
    }

    /// Normalize `v` into a direction, or `None` if `v` is degenerate.
    pub fn try_new(v: DVec3) -> Option<Self> {
        let length = v.length();
        if length < EPSILON || !length.is_finite() {
            None
        } else {
            Some(Self(v / length))
        }
    }

    /// Direction from `from` toward `to`, or `None` if the points coincide.
    pub fn between(from: DVec3, to: DVec3) -> Option<Self> {
        Self::try_new(to - from)
    }

    /// The underlying unit vector.
    #[inline]
    pub fn as_vec(&self) -> DVec3 {
        self.0
    }

    /// Mirror this direction about the unit normal `n`.
    ///
    /// Returns `d - 2 (d·n) n`, the standard reflection formula.
    #[inline]
    pub fn reflect(&self, n: Dir3) -> DVec3 {
        self.0 - 2.0 * self.0.dot(n.0) * n.0
    }
}

impl Deref for Dir3 {
    type Target = DVec3;

    fn deref(&self) -> &DVec3 {
        &self.0
    }
}

impl Neg for Dir3 {
    type Output = Dir3;

    fn neg(self) -> Dir3 {
        Dir3(-self.0)
    }
}

impl From<Dir3> for DVec3 {
    fn from(dir: Dir3) -> DVec3 {
        dir.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes() {
        let d = Dir3::new(DVec3::new(0.0, 3.0, 4.0));
        assert!((d.length() - 1.0).abs() < EPSILON);
        assert!((d.as_vec() - DVec3::new(0.0, 0.6, 0.8)).length() < EPSILON);
    }

    #[test]
    fn test_try_new_rejects_zero() {
        assert!(Dir3::try_new(DVec3::ZERO).is_none());
        assert!(Dir3::try_new(DVec3::splat(1e-12)).is_none());
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_zero() {
        Dir3::new(DVec3::ZERO);
    }

    #[test]
    fn test_between_coincident_points() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert!(Dir3::between(p, p).is_none());
        assert!(Dir3::between(p, DVec3::ZERO).is_some());
    }

    #[test]
    fn test_reflect() {
        let d = Dir3::new(DVec3::new(1.0, -1.0, 0.0));
        let n = Dir3::new(DVec3::Y);
        let r = d.reflect(n);
        // Mirrors the y component, keeps x
        assert!((r - DVec3::new(1.0, 1.0, 0.0).normalize()).length() < EPSILON);
    }

    #[test]
    fn test_neg() {
        let d = Dir3::new(DVec3::X);
        assert_eq!((-d).as_vec(), -DVec3::X);
        assert!(((-d).length() - 1.0).abs() < EPSILON);
    }
}
