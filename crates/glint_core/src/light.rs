//! Light sources.

use std::sync::OnceLock;

use glam::DVec3;
use glint_math::{align_zero, Color, Dir3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A light source illuminating the scene.
///
/// All queries take the shaded point; a light answers with its direction of
/// travel there, its attenuated intensity, its distance, and (for area
/// lights) a set of jittered sample positions for soft shadows.
pub trait LightSource: Send + Sync {
    /// Attenuated intensity arriving at `p`.
    fn intensity_at(&self, p: DVec3) -> Color;

    /// Unit direction the light travels at `p` (from the light toward `p`).
    ///
    /// `None` when `p` coincides with the light's position; such a light
    /// contributes nothing rather than failing.
    fn direction_at(&self, p: DVec3) -> Option<Dir3>;

    /// Distance from the light to `p`; infinite for directional lights.
    fn distance_to(&self, p: DVec3) -> f64;

    /// Jittered sample positions for soft-shadow averaging.
    ///
    /// `None` for lights without area (directional lights, point lights of
    /// zero size); shadow rays then target the light itself.
    fn sample_points(&self, p: DVec3) -> Option<&[DVec3]>;
}

/// Uniform ambient illumination, applied once at the top shading level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient light.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::BLACK,
    };

    /// Ambient light of intensity `ia` scaled by attenuation `ka`.
    pub fn new(ia: Color, ka: f64) -> Self {
        Self {
            intensity: ia.scale(ka),
        }
    }

    /// Ambient light of intensity `ia` scaled per channel.
    pub fn new_rgb(ia: Color, ka: DVec3) -> Self {
        Self {
            intensity: ia.scale_rgb(ka),
        }
    }

    /// The pre-scaled ambient term.
    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

/// A light infinitely far away: fixed direction, no attenuation, no area.
pub struct DirectionalLight {
    intensity: Color,
    direction: Dir3,
}

impl DirectionalLight {
    /// Create a directional light shining along `direction`.
    pub fn new(intensity: Color, direction: Dir3) -> Self {
        Self {
            intensity,
            direction,
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _p: DVec3) -> Color {
        self.intensity
    }

    fn direction_at(&self, _p: DVec3) -> Option<Dir3> {
        Some(self.direction)
    }

    fn distance_to(&self, _p: DVec3) -> f64 {
        f64::INFINITY
    }

    fn sample_points(&self, _p: DVec3) -> Option<&[DVec3]> {
        None
    }
}

/// A point light with distance attenuation and an optional sampling disk
/// for soft shadows.
pub struct PointLight {
    intensity: Color,
    position: DVec3,
    kc: f64,
    kl: f64,
    kq: f64,
    size: f64,
    samples: usize,
    seed: u64,
    grid: OnceLock<Vec<DVec3>>,
}

impl PointLight {
    /// Default number of soft-shadow sample positions.
    pub const DEFAULT_SAMPLES: usize = 80;

    /// Create a point light at `position`.
    pub fn new(intensity: Color, position: DVec3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            size: 0.0,
            samples: Self::DEFAULT_SAMPLES,
            seed: 0,
            grid: OnceLock::new(),
        }
    }

    /// Set the constant attenuation factor.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    /// Set the linear attenuation factor.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    /// Set the quadratic attenuation factor.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    /// Give the light an area of radius `size`, enabling soft shadows.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set how many sample positions the soft-shadow disk carries.
    ///
    /// Rounded up to a multiple of 4 (samples are mirrored per quadrant).
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the seed for the jittered sample disk, for reproducible renders.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The light's position.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Jittered positions on a disk of radius `size` facing `toward`.
    ///
    /// Each draw is mirrored into all four disk quadrants so the samples
    /// cannot all bunch up on one side of the light.
    fn generate_grid(&self, toward: DVec3) -> Vec<DVec3> {
        let to = Dir3::between(self.position, toward)
            // Orientation only matters relative to the shaded point; any
            // frame serves the degenerate query
            .unwrap_or_else(|| Dir3::new(DVec3::Z));
        let vx = Dir3::new(orthogonal(to.as_vec()));
        let vy = Dir3::new(vx.cross(to.as_vec()));

        let mut rng = StdRng::seed_from_u64(self.seed);
        let groups = self.samples.div_ceil(4).max(1);
        let mut points = Vec::with_capacity(groups * 4);
        for _ in 0..groups {
            let radius = rng.gen::<f64>() * self.size;
            let x = rng.gen::<f64>() * radius;
            let y = (radius * radius - x * x).sqrt();
            for (sx, sy) in [(1.0, -1.0), (-1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                points.push(self.position + vx.as_vec() * (x * sx) + vy.as_vec() * (y * sy));
            }
        }
        log::debug!("generated {} soft-shadow samples", points.len());
        points
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, p: DVec3) -> Color {
        let d = self.distance_to(p);
        self.intensity
            .scale(1.0 / (self.kc + self.kl * d + self.kq * d * d))
    }

    fn direction_at(&self, p: DVec3) -> Option<Dir3> {
        Dir3::between(self.position, p)
    }

    fn distance_to(&self, p: DVec3) -> f64 {
        self.position.distance(p)
    }

    fn sample_points(&self, p: DVec3) -> Option<&[DVec3]> {
        if self.size <= 0.0 {
            return None;
        }
        // The disk is laid out once, facing the first queried point, and
        // shared by every later query
        Some(self.grid.get_or_init(|| self.generate_grid(p)))
    }
}

/// A spotlight: a point light confined to a beam.
pub struct SpotLight {
    point: PointLight,
    direction: Dir3,
    beam: f64,
}

impl SpotLight {
    /// Create a spotlight at `position` shining along `direction`.
    pub fn new(intensity: Color, position: DVec3, direction: Dir3) -> Self {
        Self {
            point: PointLight::new(intensity, position),
            direction,
            beam: 1.0,
        }
    }

    /// Set the constant attenuation factor.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.point = self.point.with_kc(kc);
        self
    }

    /// Set the linear attenuation factor.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.point = self.point.with_kl(kl);
        self
    }

    /// Set the quadratic attenuation factor.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.point = self.point.with_kq(kq);
        self
    }

    /// Give the light an area of radius `size`, enabling soft shadows.
    pub fn with_size(mut self, size: f64) -> Self {
        self.point = self.point.with_size(size);
        self
    }

    /// Set how many sample positions the soft-shadow disk carries.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.point = self.point.with_samples(samples);
        self
    }

    /// Narrow the beam: higher exponents concentrate the light.
    pub fn with_beam(mut self, beam: f64) -> Self {
        self.beam = beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, p: DVec3) -> Color {
        let Some(l) = self.point.direction_at(p) else {
            return Color::BLACK;
        };
        let cos = align_zero(self.direction.dot(l.as_vec()));
        if cos <= 0.0 {
            // Behind the cone
            return Color::BLACK;
        }
        self.point.intensity_at(p).scale(cos.powf(self.beam))
    }

    fn direction_at(&self, p: DVec3) -> Option<Dir3> {
        self.point.direction_at(p)
    }

    fn distance_to(&self, p: DVec3) -> f64 {
        self.point.distance_to(p)
    }

    fn sample_points(&self, p: DVec3) -> Option<&[DVec3]> {
        self.point.sample_points(p + self.direction.as_vec())
    }
}

/// Any vector perpendicular to `v`, built by crossing with the axis `v`
/// leans on least.
fn orthogonal(v: DVec3) -> DVec3 {
    let axis = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        DVec3::X
    } else if v.y.abs() <= v.z.abs() {
        DVec3::Y
    } else {
        DVec3::Z
    };
    v.cross(axis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Color::new(100.0, 100.0, 100.0), Dir3::new(-DVec3::Y));
        let p = DVec3::new(3.0, 4.0, 5.0);
        assert_eq!(light.intensity_at(p), Color::new(100.0, 100.0, 100.0));
        assert_eq!(light.direction_at(p).unwrap().as_vec(), -DVec3::Y);
        assert_eq!(light.distance_to(p), f64::INFINITY);
        assert!(light.sample_points(p).is_none());
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = PointLight::new(Color::new(100.0, 100.0, 100.0), DVec3::ZERO)
            .with_kc(1.0)
            .with_kl(0.5)
            .with_kq(0.25);
        let p = DVec3::new(2.0, 0.0, 0.0);
        // 100 / (1 + 0.5*2 + 0.25*4) = 100 / 3
        let i = light.intensity_at(p);
        assert!((i.r - 100.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_point_light_direction_and_distance() {
        let light = PointLight::new(Color::WHITE, DVec3::new(0.0, 5.0, 0.0));
        let p = DVec3::ZERO;
        assert_eq!(light.direction_at(p).unwrap().as_vec(), -DVec3::Y);
        assert_eq!(light.distance_to(p), 5.0);
        // Query at the light's own position degenerates to None
        assert!(light.direction_at(DVec3::new(0.0, 5.0, 0.0)).is_none());
    }

    #[test]
    fn test_point_light_samples_only_when_sized() {
        let plain = PointLight::new(Color::WHITE, DVec3::ZERO);
        assert!(plain.sample_points(DVec3::X).is_none());

        let area = PointLight::new(Color::WHITE, DVec3::ZERO).with_size(2.0);
        let samples = area.sample_points(DVec3::new(10.0, 0.0, 0.0)).unwrap();
        assert_eq!(samples.len(), 80);
        // Samples stay on the disk through the light's position
        for s in samples {
            assert!(s.distance(DVec3::ZERO) <= 2.0 + 1e-9);
            assert!(s.x.abs() < 1e-9);
        }
    }

    #[test]
    fn test_sample_grid_is_cached() {
        let light = PointLight::new(Color::WHITE, DVec3::ZERO)
            .with_size(1.0)
            .with_samples(8);
        let first = light.sample_points(DVec3::new(5.0, 0.0, 0.0)).unwrap().to_vec();
        // A different query point still sees the first grid
        let second = light.sample_points(DVec3::new(0.0, 5.0, 0.0)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_count_rounds_to_quads() {
        let light = PointLight::new(Color::WHITE, DVec3::ZERO)
            .with_size(1.0)
            .with_samples(5);
        assert_eq!(light.sample_points(DVec3::X).unwrap().len(), 8);
    }

    #[test]
    fn test_spot_light_beam() {
        let spot = SpotLight::new(Color::new(100.0, 100.0, 100.0), DVec3::ZERO, Dir3::new(-DVec3::Y));

        // Straight ahead: full intensity
        let ahead = spot.intensity_at(DVec3::new(0.0, -3.0, 0.0));
        assert!((ahead.r - 100.0).abs() < 1e-10);

        // Behind the cone: nothing
        let behind = spot.intensity_at(DVec3::new(0.0, 3.0, 0.0));
        assert_eq!(behind, Color::BLACK);

        // Perpendicular: cos = 0, still nothing
        let side = spot.intensity_at(DVec3::new(3.0, 0.0, 0.0));
        assert_eq!(side, Color::BLACK);
    }

    #[test]
    fn test_spot_light_narrow_beam_falloff() {
        let wide = SpotLight::new(Color::new(100.0, 100.0, 100.0), DVec3::ZERO, Dir3::new(-DVec3::Y));
        let narrow = SpotLight::new(Color::new(100.0, 100.0, 100.0), DVec3::ZERO, Dir3::new(-DVec3::Y))
            .with_beam(8.0);
        // 45 degrees off axis
        let p = DVec3::new(1.0, -1.0, 0.0);
        assert!(narrow.intensity_at(p).r < wide.intensity_at(p).r);
    }

    #[test]
    fn test_ambient_light() {
        let ambient = AmbientLight::new(Color::new(100.0, 50.0, 20.0), 0.5);
        assert_eq!(ambient.intensity(), Color::new(50.0, 25.0, 10.0));
        assert_eq!(AmbientLight::NONE.intensity(), Color::BLACK);
    }

    #[test]
    fn test_orthogonal() {
        for v in [DVec3::X, DVec3::new(1.0, 2.0, 3.0), DVec3::new(-2.0, 0.1, 0.4)] {
            let o = orthogonal(v);
            assert!(o.length() > 0.0);
            assert!(v.dot(o).abs() < 1e-10);
        }
    }
}
