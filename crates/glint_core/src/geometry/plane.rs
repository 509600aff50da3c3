//! Infinite planes.

use glam::DVec3;
use glint_math::{align_zero, Color, Dir3, Ray};

use crate::error::GeometryError;
use crate::geometry::{build_hits, Geometry, Intersection};
use crate::material::Material;

/// An unbounded plane through `point` with unit normal `normal`.
#[derive(Debug)]
pub struct Plane {
    point: DVec3,
    normal: Dir3,
    emission: Color,
    material: Material,
}

impl Plane {
    /// Create a plane from an anchor point and a normal vector.
    pub fn new(point: DVec3, normal: DVec3) -> Result<Self, GeometryError> {
        let normal = Dir3::try_new(normal).ok_or(GeometryError::DegenerateVector)?;
        Ok(Self {
            point,
            normal,
            emission: Color::BLACK,
            material: Material::default(),
        })
    }

    /// Create a plane through three points.
    ///
    /// Fails when the points are coincident or collinear, since those define
    /// no unique plane.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Result<Self, GeometryError> {
        let normal = (b - a).cross(c - a);
        let normal = Dir3::try_new(normal).ok_or(GeometryError::CollinearVertices)?;
        Ok(Self {
            point: a,
            normal,
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

    /// The plane's unit normal.
    pub fn normal(&self) -> Dir3 {
        self.normal
    }

    /// Forward ray parameter of the plane hit, if any.
    ///
    /// `t = N·(Q−O) / N·D`; a ray parallel to the plane (including one lying
    /// in it) misses, as does a hit at or behind the ray origin.
    pub(crate) fn hit_param(&self, ray: &Ray) -> Option<f64> {
        let n = self.normal.as_vec();
        let denom = align_zero(n.dot(ray.dir.as_vec()));
        if denom == 0.0 {
            return None;
        }
        let t = align_zero(n.dot(self.point - ray.origin) / denom);
        (t > 0.0).then_some(t)
    }
}

impl Geometry for Plane {
    fn normal_at(&self, _point: DVec3) -> Dir3 {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn emission(&self) -> Color {
        self.emission
    }

    fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        build_hits(self, ray, self.hit_param(ray).into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_plane() -> Plane {
        Plane::new(DVec3::ZERO, DVec3::Z).unwrap()
    }

    #[test]
    fn test_degenerate_normal_rejected() {
        assert_eq!(
            Plane::new(DVec3::ZERO, DVec3::ZERO).unwrap_err(),
            GeometryError::DegenerateVector
        );
    }

    #[test]
    fn test_collinear_points_rejected() {
        let err = Plane::from_points(
            DVec3::ZERO,
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(2.0, 2.0, 2.0),
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::CollinearVertices);
    }

    #[test]
    fn test_hit_in_front() {
        let plane = xy_plane();
        let ray = Ray::new(DVec3::new(0.0, 0.0, 2.0), Dir3::new(-DVec3::Z));
        let hits = plane.intersect(&ray);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].t - 2.0).abs() < 1e-10);
        assert!(hits[0].point.length() < 1e-10);
    }

    #[test]
    fn test_orthogonal_direction_misses() {
        // Ray direction orthogonal to the normal: parallel to the plane,
        // no intersection from any origin
        let plane = xy_plane();
        for origin in [DVec3::new(0.0, 0.0, 1.0), DVec3::ZERO] {
            let ray = Ray::new(origin, Dir3::new(DVec3::X));
            assert!(plane.intersect(&ray).is_empty());
        }
    }

    #[test]
    fn test_behind_origin_misses() {
        let plane = xy_plane();
        let ray = Ray::new(DVec3::new(0.0, 0.0, 2.0), Dir3::new(DVec3::Z));
        assert!(plane.intersect(&ray).is_empty());
    }

    #[test]
    fn test_origin_on_plane_misses() {
        let plane = xy_plane();
        let ray = Ray::new(DVec3::ZERO, Dir3::new(DVec3::new(1.0, 0.0, -1.0)));
        assert!(plane.intersect(&ray).is_empty());
    }
}
