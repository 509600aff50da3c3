//! Surface reflectance coefficients.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Phong-model material coefficients.
///
/// Each coefficient is an RGB triple so a surface can, say, transmit red
/// more strongly than blue. The scalar `with_*` setters splat one value
/// across all three channels, which is what most scenes want.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Ambient reflection coefficient.
    pub ka: DVec3,
    /// Diffuse reflection coefficient.
    pub kd: DVec3,
    /// Specular reflection coefficient.
    pub ks: DVec3,
    /// Transmission coefficient (transparency).
    pub kt: DVec3,
    /// Mirror reflection coefficient.
    pub kr: DVec3,
    /// Specular highlight exponent.
    pub shininess: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: DVec3::ONE,
            kd: DVec3::ZERO,
            ks: DVec3::ZERO,
            kt: DVec3::ZERO,
            kr: DVec3::ZERO,
            shininess: 0,
        }
    }
}

impl Material {
    /// Create the default material (kA = 1, everything else off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ambient coefficient uniformly.
    pub fn with_ka(mut self, ka: f64) -> Self {
        self.ka = DVec3::splat(ka);
        self
    }

    /// Set the ambient coefficient per channel.
    pub fn with_ka_rgb(mut self, ka: DVec3) -> Self {
        self.ka = ka;
        self
    }

    /// Set the diffuse coefficient uniformly.
    pub fn with_kd(mut self, kd: f64) -> Self {
        self.kd = DVec3::splat(kd);
        self
    }

    /// Set the diffuse coefficient per channel.
    pub fn with_kd_rgb(mut self, kd: DVec3) -> Self {
        self.kd = kd;
        self
    }

    /// Set the specular coefficient uniformly.
    pub fn with_ks(mut self, ks: f64) -> Self {
        self.ks = DVec3::splat(ks);
        self
    }

    /// Set the specular coefficient per channel.
    pub fn with_ks_rgb(mut self, ks: DVec3) -> Self {
        self.ks = ks;
        self
    }

    /// Set the transmission coefficient uniformly.
    pub fn with_kt(mut self, kt: f64) -> Self {
        self.kt = DVec3::splat(kt);
        self
    }

    /// Set the transmission coefficient per channel.
    pub fn with_kt_rgb(mut self, kt: DVec3) -> Self {
        self.kt = kt;
        self
    }

    /// Set the mirror reflection coefficient uniformly.
    pub fn with_kr(mut self, kr: f64) -> Self {
        self.kr = DVec3::splat(kr);
        self
    }

    /// Set the mirror reflection coefficient per channel.
    pub fn with_kr_rgb(mut self, kr: DVec3) -> Self {
        self.kr = kr;
        self
    }

    /// Set the specular highlight exponent.
    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ambient_only() {
        let m = Material::default();
        assert_eq!(m.ka, DVec3::ONE);
        assert_eq!(m.kd, DVec3::ZERO);
        assert_eq!(m.ks, DVec3::ZERO);
        assert_eq!(m.kt, DVec3::ZERO);
        assert_eq!(m.kr, DVec3::ZERO);
        assert_eq!(m.shininess, 0);
    }

    #[test]
    fn test_fluent_setters() {
        let m = Material::new()
            .with_kd(0.5)
            .with_ks(0.3)
            .with_shininess(100)
            .with_kt_rgb(DVec3::new(0.8, 0.1, 0.1));
        assert_eq!(m.kd, DVec3::splat(0.5));
        assert_eq!(m.ks, DVec3::splat(0.3));
        assert_eq!(m.shininess, 100);
        assert_eq!(m.kt, DVec3::new(0.8, 0.1, 0.1));
    }
}
