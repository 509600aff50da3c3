//! Finite cylinders with caps.

use glam::DVec3;
use glint_math::{align_zero, is_zero, Color, Dir3, Ray};

use crate::error::GeometryError;
use crate::geometry::tube::{tube_hit_params, tube_normal_at};
use crate::geometry::{build_hits, Geometry, Intersection};
use crate::material::Material;

/// A finite cylinder: a tube clipped to `[0, height]` along its axis and
/// closed by two circular caps.
#[derive(Debug)]
pub struct Cylinder {
    axis: Ray,
    radius: f64,
    height: f64,
    emission: Color,
    material: Material,
}

impl Cylinder {
    /// Create a cylinder. Radius and height must be strictly positive.
    pub fn new(axis: Ray, radius: f64, height: f64) -> Result<Self, GeometryError> {
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius);
        }
        if height <= 0.0 {
            return Err(GeometryError::NonPositiveHeight);
        }
        Ok(Self {
            axis,
            radius,
            height,
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

    /// Axial coordinate of `point`: 0 at the base cap, `height` at the top.
    fn axial(&self, point: DVec3) -> f64 {
        (point - self.axis.origin).dot(self.axis.dir.as_vec())
    }

    /// Hits of a ray running parallel to the axis: 0, 1 or 2 cap hits
    /// depending on whether the origin projects before, inside, or past the
    /// finite span (and none at all outside the cap radius).
    fn axial_hit_params(&self, ray: &Ray) -> Vec<f64> {
        let delta = ray.origin - self.axis.origin;
        let va = self.axis.dir.as_vec();
        let radial = delta - va * delta.dot(va);
        if align_zero(radial.length_squared() - self.radius * self.radius) >= 0.0 {
            return Vec::new();
        }

        // Signed axial speed is ±1 here
        let v_dot_va = ray.dir.dot(va);
        let s0 = delta.dot(va);
        let mut params: Vec<f64> = [0.0, self.height]
            .into_iter()
            .map(|cap| align_zero((cap - s0) / v_dot_va))
            .filter(|&t| t > 0.0)
            .collect();
        params.sort_by(|a, b| a.total_cmp(b));
        params
    }

    /// Cap hits for a non-axial ray: plane solutions within the cap radius.
    fn cap_hit_params(&self, ray: &Ray) -> Vec<f64> {
        let va = self.axis.dir.as_vec();
        let denom = align_zero(ray.dir.dot(va));
        if denom == 0.0 {
            // Perpendicular to the axis: parallel to both cap planes
            return Vec::new();
        }

        let mut params = Vec::new();
        let base = self.axis.origin;
        let top = self.axis.at(self.height);
        for center in [base, top] {
            let t = align_zero((center - ray.origin).dot(va) / denom);
            if t <= 0.0 {
                continue;
            }
            let to_hit = ray.at(t) - center;
            if align_zero(to_hit.length_squared() - self.radius * self.radius) < 0.0 {
                params.push(t);
            }
        }
        params
    }

    fn hit_params(&self, ray: &Ray) -> Vec<f64> {
        if is_zero(ray.dir.dot(self.axis.dir.as_vec()).abs() - 1.0) {
            return self.axial_hit_params(ray);
        }

        // Side hits survive only inside the axial span; cap-rim grazes fall
        // to the caps' strict interior test instead
        let mut params: Vec<f64> = tube_hit_params(&self.axis, self.radius, ray)
            .into_iter()
            .filter(|&t| {
                let s = align_zero(self.axial(ray.at(t)));
                s > 0.0 && align_zero(s - self.height) < 0.0
            })
            .collect();
        params.extend(self.cap_hit_params(ray));
        params.sort_by(|a, b| a.total_cmp(b));
        params
    }
}

impl Geometry for Cylinder {
    /// Cap points answer with the cap plane's normal (base cap looks against
    /// the axis), everything else with the radial tube normal. The base-cap
    /// center coincides with the axis head and is resolved to the base
    /// normal before any radial projection is attempted.
    fn normal_at(&self, point: DVec3) -> Dir3 {
        let dir = self.axis.dir;
        if (point - self.axis.origin).length() < glint_math::EPSILON {
            return -dir;
        }
        let s = self.axial(point);
        if is_zero(s) {
            return -dir;
        }
        if is_zero(s - self.height) {
            return dir;
        }
        tube_normal_at(&self.axis, point)
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
