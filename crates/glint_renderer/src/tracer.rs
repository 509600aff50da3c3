//! The recursive shading core.
//!
//! One public entry point, [`RayTracer::trace`], resolves a ray to a color:
//! closest hit, local Phong effects with transparency-aware shadows, then
//! recursive reflection/refraction branches pruned by depth and accumulated
//! attenuation.

use glam::DVec3;
use glint_core::{Intersection, LightSource, Scene};
use glint_math::{align_zero, Color, Dir3, Ray};

/// Default bound on the reflection/refraction recursion.
pub const MAX_DEPTH: u32 = 10;

/// Branches whose accumulated attenuation drops below this (in every
/// channel) are skipped as invisible.
pub const MIN_ATTENUATION: f64 = 0.001;

/// A ray tracer over one immutable scene.
pub struct RayTracer<'s> {
    scene: &'s Scene,
    max_depth: u32,
}

impl<'s> RayTracer<'s> {
    /// Create a tracer for `scene` with the default recursion depth.
    pub fn new(scene: &'s Scene) -> Self {
        Self {
            scene,
            max_depth: MAX_DEPTH,
        }
    }

    /// Bound the recursion depth (minimum 1: local effects only).
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// The scene's background color.
    pub fn background(&self) -> Color {
        self.scene.background
    }

    /// Color seen along `ray`: background if nothing is hit, otherwise the
    /// shaded closest intersection plus the scene's ambient term.
    pub fn trace(&self, ray: &Ray) -> Color {
        match self.closest_hit(ray) {
            None => self.scene.background,
            Some(hit) => {
                self.calc_color(&hit, self.max_depth, DVec3::ONE) + self.scene.ambient.intensity()
            }
        }
    }

    /// Average the colors of a bundle of rays (supersampling support).
    pub fn trace_beam(&self, rays: &[Ray]) -> Color {
        if rays.is_empty() {
            return self.scene.background;
        }
        rays.iter()
            .map(|ray| self.trace(ray))
            .sum::<Color>()
            .reduce(rays.len())
    }

    /// The intersection with the smallest positive ray parameter.
    fn closest_hit(&self, ray: &Ray) -> Option<Intersection<'s>> {
        self.scene
            .geometries
            .intersect(ray)
            .into_iter()
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }

    /// Local effects, plus global effects unless this is the last level.
    fn calc_color(&self, hit: &Intersection<'s>, level: u32, k: DVec3) -> Color {
        let local = self.local_effects(hit, k);
        if level == 1 {
            local
        } else {
            local + self.global_effects(hit, level, k)
        }
    }

    /// Emission plus the diffuse and specular contribution of every light
    /// on the viewer's side of the surface, attenuated by shadowing.
    fn local_effects(&self, hit: &Intersection<'s>, k: DVec3) -> Color {
        let mut color = hit.geometry.emission();
        let v = hit.ray.dir;
        let n = hit.normal;
        let nv = align_zero(hit.n_dot_dir);
        if nv == 0.0 {
            return color;
        }

        let mat = hit.material;
        for light in &self.scene.lights {
            let Some(l) = light.direction_at(hit.point) else {
                // Shaded point sits on the light itself: no contribution
                continue;
            };
            let nl = align_zero(n.dot(l.as_vec()));
            // Light and viewer must be on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.shadow_attenuation(hit, light.as_ref(), l, n);
            if lower_than(ktr * k, MIN_ATTENUATION) {
                continue;
            }
            let li = light.intensity_at(hit.point).scale_rgb(ktr);

            // Diffuse: kD · |N·L|
            color += li.scale_rgb(mat.kd * nl.abs());

            // Specular: kS · max(0, −V·R)^shininess with R the mirrored
            // light direction
            let r = l.reflect(n);
            let vr = align_zero(-v.dot(r));
            if vr > 0.0 {
                color += li.scale_rgb(mat.ks * vr.powi(mat.shininess));
            }
        }
        color
    }

    /// Reflection and refraction branches, each weighted by its coefficient.
    fn global_effects(&self, hit: &Intersection<'s>, level: u32, k: DVec3) -> Color {
        let v = hit.ray.dir;
        let n = hit.normal;
        let mat = hit.material;
        self.global_effect(self.refracted_ray(hit, v, n), mat.kt, level, k)
            + self.global_effect(self.reflected_ray(hit, v, n), mat.kr, level, k)
    }

    /// One recursive branch. A pruned branch contributes exactly black,
    /// never the background; a branch that escapes the scene contributes
    /// the background weighted by the branch coefficient.
    fn global_effect(&self, ray: Option<Ray>, kx: DVec3, level: u32, k: DVec3) -> Color {
        let Some(ray) = ray else {
            return Color::BLACK;
        };
        let kkx = k * kx;
        if lower_than(kkx, MIN_ATTENUATION) {
            return Color::BLACK;
        }
        match self.closest_hit(&ray) {
            None => self.scene.background.scale_rgb(kx),
            Some(hit) => self.calc_color(&hit, level - 1, kkx).scale_rgb(kx),
        }
    }

    /// Mirror ray `V − 2(N·V)N`, undefined for a grazing view direction.
    fn reflected_ray(&self, hit: &Intersection<'s>, v: Dir3, n: Dir3) -> Option<Ray> {
        if align_zero(hit.n_dot_dir) == 0.0 {
            return None;
        }
        let r = Dir3::try_new(v.reflect(n))?;
        Some(Ray::offset(hit.point, r, n))
    }

    /// Transmission ray: same direction as the incoming ray. Bending by
    /// refraction indices is intentionally not modeled.
    fn refracted_ray(&self, hit: &Intersection<'s>, v: Dir3, n: Dir3) -> Option<Ray> {
        Some(Ray::offset(hit.point, v, n))
    }

    /// Shadow factor toward one light, averaged over the light's sample
    /// positions when it has area.
    ///
    /// Samples whose direction to the shaded point degenerates are skipped
    /// but still count in the average.
    fn shadow_attenuation(
        &self,
        hit: &Intersection<'s>,
        light: &dyn LightSource,
        l: Dir3,
        n: Dir3,
    ) -> DVec3 {
        let Some(samples) = light.sample_points(hit.point) else {
            return self.transparency(hit, light, l, n);
        };
        let mut total = DVec3::ZERO;
        for sample in samples {
            if let Some(dir) = Dir3::between(*sample, hit.point) {
                total += self.transparency(hit, light, dir, n);
            }
        }
        total / samples.len() as f64
    }

    /// Accumulated transmission of every occluder between the hit point and
    /// the light: 1 when unoccluded, 0 behind an opaque blocker, a colored
    /// fraction behind transparent ones.
    fn transparency(
        &self,
        hit: &Intersection<'s>,
        light: &dyn LightSource,
        l: Dir3,
        n: Dir3,
    ) -> DVec3 {
        let shadow_ray = Ray::offset(hit.point, -l, n);
        let light_distance = light.distance_to(hit.point);

        let mut ktr = DVec3::ONE;
        for occluder in self.scene.geometries.intersect(&shadow_ray) {
            if align_zero(occluder.point.distance(hit.point) - light_distance) <= 0.0 {
                ktr *= occluder.material.kt;
                if ktr == DVec3::ZERO {
                    break;
                }
            }
        }
        ktr
    }
}

/// True when every component of `v` is below `limit`.
fn lower_than(v: DVec3, limit: f64) -> bool {
    v.x < limit && v.y < limit && v.z < limit
}
