//! Spheres.

use glam::DVec3;
use glint_math::{align_zero, Color, Dir3, Ray};

use crate::error::GeometryError;
use crate::geometry::{build_hits, Geometry, Intersection};
use crate::material::Material;

/// A sphere given by center and radius.
#[derive(Debug)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    emission: Color,
    material: Material,
}

impl Sphere {
    /// Create a sphere. The radius must be strictly positive.
    pub fn new(center: DVec3, radius: f64) -> Result<Self, GeometryError> {
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius);
        }
        Ok(Self {
            center,
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

    /// Forward ray parameters, nearest first.
    ///
    /// Projects the center onto the ray (`tm`), takes the perpendicular
    /// distance `d` to the center, and keeps the positive roots `tm ∓ th`.
    /// A tangent ray (`d == radius`) counts as a miss.
    fn hit_params(&self, ray: &Ray) -> Vec<f64> {
        // Degenerate: ray starting at the center exits at exactly t = radius
        let u = self.center - ray.origin;
        if u.length() < glint_math::EPSILON {
            return vec![self.radius];
        }

        let tm = align_zero(ray.dir.dot(u));
        let d_sq = u.length_squared() - tm * tm;
        let r_sq = self.radius * self.radius;
        if align_zero(d_sq - r_sq) >= 0.0 {
            return Vec::new();
        }

        let th = (r_sq - d_sq).sqrt();
        let mut params = Vec::with_capacity(2);
        let t1 = align_zero(tm - th);
        let t2 = align_zero(tm + th);
        if t1 > 0.0 {
            params.push(t1);
        }
        if t2 > 0.0 {
            params.push(t2);
        }
        params
    }
}

impl Geometry for Sphere {
    fn normal_at(&self, point: DVec3) -> Dir3 {
        Dir3::new(point - self.center)
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn emission(&self) -> Color {
        self.emission
    }

    fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        build_hits(self, ray, self.hit_params(ray))
    }
}
