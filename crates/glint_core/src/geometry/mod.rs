//! Geometric shapes and the ray-intersection engine.
//!
//! Every shape implements [`Geometry`]: a closed-form solver behind a
//! uniform `intersect` entry point, plus the shading context (normal,
//! material, emission) the tracer needs at a hit. "No hit" is always the
//! empty vector, for every shape.

mod cylinder;
mod geometries;
mod plane;
mod polygon;
mod sphere;
mod tube;

pub use cylinder::Cylinder;
pub use geometries::Geometries;
pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use sphere::Sphere;
pub use tube::Tube;

use glam::DVec3;
use glint_math::{Color, Dir3, Ray};

use crate::material::Material;

/// A surface that rays can intersect.
///
/// Shapes are immutable once constructed; emission and material are set
/// through the fluent `with_emission` / `with_material` step before the
/// shape is added to a scene, never during a render.
pub trait Geometry: Send + Sync {
    /// The outward unit normal at a point on the surface.
    ///
    /// Callers pass points produced by `intersect`; the result for points
    /// off the surface is unspecified.
    fn normal_at(&self, point: DVec3) -> Dir3;

    /// The material governing shading at every point of this shape.
    fn material(&self) -> &Material;

    /// The shape's own glow, added before any light contribution.
    fn emission(&self) -> Color;

    /// All forward intersections of `ray` with this shape.
    ///
    /// Empty when the ray misses, grazes tangentially, or starts past the
    /// surface.
    fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>>;
}

/// One ray-surface hit with the context needed to shade it.
///
/// Created per cast and discarded after shading; never stored.
pub struct Intersection<'a> {
    /// The shape that was hit.
    pub geometry: &'a dyn Geometry,
    /// The hit point in world space.
    pub point: DVec3,
    /// Ray parameter of the hit (`ray.at(t) == point`).
    pub t: f64,
    /// The ray that produced this hit.
    pub ray: Ray,
    /// Outward unit normal at the hit point.
    pub normal: Dir3,
    /// Material at the hit point.
    pub material: &'a Material,
    /// `normal · ray.dir`, cached because every shading step branches on it.
    pub n_dot_dir: f64,
}

impl<'a> Intersection<'a> {
    /// Build the hit record for `ray` meeting `geometry` at parameter `t`.
    pub fn at(geometry: &'a dyn Geometry, ray: &Ray, t: f64) -> Self {
        let point = ray.at(t);
        let normal = geometry.normal_at(point);
        Self {
            geometry,
            point,
            t,
            ray: *ray,
            normal,
            material: geometry.material(),
            n_dot_dir: normal.dot(ray.dir.as_vec()),
        }
    }
}

/// Map solver output (forward ray parameters) into hit records.
pub(crate) fn build_hits<'a>(
    geometry: &'a dyn Geometry,
    ray: &Ray,
    params: Vec<f64>,
) -> Vec<Intersection<'a>> {
    params
        .into_iter()
        .map(|t| Intersection::at(geometry, ray, t))
        .collect()
}
