//! Light colors with unbounded intensity.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An RGB radiance triple.
///
/// Channels are non-negative and have no upper bound: 0..255 covers the
/// displayable range, anything above it shows up in light sources and only
/// gets clamped at the image sink. Negative channels are rejected outright,
/// so addition and (non-negative) scaling stay closed.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// No light.
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    /// Full displayable white.
    pub const WHITE: Color = Color { r: 255.0, g: 255.0, b: 255.0 };

    /// Tolerance for [`Color::almost_eq`].
    const MATCH_TOLERANCE: f64 = 1e-4;

    /// Create a color from RGB components.
    ///
    /// Panics on a negative component.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        assert!(
            r >= 0.0 && g >= 0.0 && b >= 0.0,
            "negative color component is illegal"
        );
        Self { r, g, b }
    }

    /// Scale every channel by a non-negative factor.
    ///
    /// Panics on a negative factor.
    pub fn scale(self, k: f64) -> Self {
        assert!(k >= 0.0, "cannot scale a color by a negative factor");
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
        }
    }

    /// Scale channel-wise by a non-negative coefficient triple.
    ///
    /// Used to apply material coefficients (kD, kS, ...) per channel.
    /// Panics on a negative component.
    pub fn scale_rgb(self, k: DVec3) -> Self {
        assert!(
            k.x >= 0.0 && k.y >= 0.0 && k.z >= 0.0,
            "cannot scale a color by a negative factor"
        );
        Self {
            r: self.r * k.x,
            g: self.g * k.y,
            b: self.b * k.z,
        }
    }

    /// Divide every channel by `n`, for averaging sample bundles.
    pub fn reduce(self, n: usize) -> Self {
        assert!(n >= 1, "cannot reduce a color by less than 1");
        self.scale(1.0 / n as f64)
    }

    /// Channel-wise comparison within a fixed tolerance.
    ///
    /// This is the equality the adaptive supersampler uses to decide whether
    /// a region is uniform.
    pub fn almost_eq(&self, other: &Color) -> bool {
        (self.r - other.r).abs() < Self::MATCH_TOLERANCE
            && (self.g - other.g).abs() < Self::MATCH_TOLERANCE
            && (self.b - other.b).abs() < Self::MATCH_TOLERANCE
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
        }
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        iter.fold(Color::BLACK, Add::add)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}
