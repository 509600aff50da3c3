//! Infinite tubes (capless cylinders).

use glam::DVec3;
use glint_math::{align_zero, is_zero, Color, Dir3, Ray};

use crate::error::GeometryError;
use crate::geometry::{build_hits, Geometry, Intersection};
use crate::material::Material;

/// An infinite cylinder surface around an axis ray.
#[derive(Debug)]
pub struct Tube {
    axis: Ray,
    radius: f64,
    emission: Color,
    material: Material,
}

impl Tube {
    /// Create a tube. The radius must be strictly positive.
    pub fn new(axis: Ray, radius: f64) -> Result<Self, GeometryError> {
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius);
        }
        Ok(Self {
            axis,
            radius,
            emission: Color::BLACK,
            material: Material::default(),
        })
    }

    /// Set the emission color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// The central axis.
    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    /// The tube radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Forward ray parameters of the side-surface hits of an infinite tube.
///
/// Projects both the ray direction and the origin offset into the plane
/// perpendicular to the axis and solves the resulting quadratic there. A ray
/// parallel to the axis never meets the side surface; a tangent ray
/// (discriminant zero) counts as a miss.
pub(crate) fn tube_hit_params(axis: &Ray, radius: f64, ray: &Ray) -> Vec<f64> {
    let va = axis.dir.as_vec();
    let v = ray.dir.as_vec();

    let v_dot_va = v.dot(va);
    if is_zero(v_dot_va.abs() - 1.0) {
        return Vec::new();
    }

    let delta = ray.origin - axis.origin;
    let v_perp = v - va * v_dot_va;
    let delta_perp = delta - va * delta.dot(va);

    let a = v_perp.length_squared();
    let b = 2.0 * v_perp.dot(delta_perp);
    let c = delta_perp.length_squared() - radius * radius;
    if is_zero(a) {
        return Vec::new();
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant <= 0.0 {
        return Vec::new();
    }

    let sqrt_disc = discriminant.sqrt();
    let mut params = Vec::with_capacity(2);
    let t1 = align_zero((-b - sqrt_disc) / (2.0 * a));
    let t2 = align_zero((-b + sqrt_disc) / (2.0 * a));
    if t1 > 0.0 {
        params.push(t1);
    }
    if t2 > 0.0 {
        params.push(t2);
    }
    params
}

/// Unit normal of the tube side surface at `point`: away from the foot of
/// the perpendicular dropped onto the axis.
pub(crate) fn tube_normal_at(axis: &Ray, point: DVec3) -> Dir3 {
    let t = (point - axis.origin).dot(axis.dir.as_vec());
    let foot = axis.at(t);
    Dir3::new(point - foot)
}

impl Geometry for Tube {
    fn normal_at(&self, point: DVec3) -> Dir3 {
        tube_normal_at(&self.axis, point)
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn emission(&self) -> Color {
        self.emission
    }

    fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        build_hits(self, ray, tube_hit_params(&self.axis, self.radius, ray))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z_tube() -> Tube {
        Tube::new(Ray::new(DVec3::ZERO, Dir3::new(DVec3::Z)), 1.0).unwrap()
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let axis = Ray::new(DVec3::ZERO, Dir3::new(DVec3::Z));
        assert_eq!(
            Tube::new(axis, 0.0).unwrap_err(),
            GeometryError::NonPositiveRadius
        );
    }

    #[test]
    fn test_crossing_ray_hits_twice() {
        let tube = z_tube();
        let ray = Ray::new(DVec3::new(-2.0, 0.0, 5.0), Dir3::new(DVec3::X));
        let hits = tube.intersect(&ray);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t - 1.0).abs() < 1e-10);
        assert!((hits[1].t - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tube = z_tube();
        // Inside, outside, and on the surface: a ray along the axis
        // direction never crosses the side
        for x in [0.0, 0.5, 1.0, 2.0] {
            let ray = Ray::new(DVec3::new(x, 0.0, 0.0), Dir3::new(DVec3::Z));
            assert!(tube.intersect(&ray).is_empty(), "x = {x}");
        }
    }

    #[test]
    fn test_tangent_ray_misses() {
        let tube = z_tube();
        let ray = Ray::new(DVec3::new(-2.0, 1.0, 0.0), Dir3::new(DVec3::X));
        assert!(tube.intersect(&ray).is_empty());
    }

    #[test]
    fn test_skew_ray_hits() {
        let tube = z_tube();
        // Oblique to the axis, passing through it
        let ray = Ray::new(
            DVec3::new(-2.0, 0.0, 0.0),
            Dir3::new(DVec3::new(1.0, 0.0, 1.0)),
        );
        let hits = tube.intersect(&ray);
        assert_eq!(hits.len(), 2);
        for hit in &hits {
            // Hit points sit at unit distance from the axis
            let radial = DVec3::new(hit.point.x, hit.point.y, 0.0);
            assert!((radial.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_normal_is_radial() {
        let tube = z_tube();
        let n = tube.normal_at(DVec3::new(1.0, 0.0, 7.0));
        assert!((n.as_vec() - DVec3::X).length() < 1e-10);
    }

    #[test]
    fn test_ray_from_inside_hits_once() {
        let tube = z_tube();
        let ray = Ray::new(DVec3::ZERO, Dir3::new(DVec3::X));
        let hits = tube.intersect(&ray);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].t - 1.0).abs() < 1e-10);
    }
}
