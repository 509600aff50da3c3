//! Per-pixel anti-aliasing: regular and adaptive supersampling.

use glam::DVec3;
use glint_math::{Color, Dir3, Ray};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::Camera;
use crate::renderer::RenderSettings;
use crate::tracer::RayTracer;

/// Resolve the color of pixel `(col, row)` under the configured sampling
/// mode: a single center ray, an n×n regular grid, or adaptive subdivision.
pub fn sample_pixel(
    camera: &Camera,
    tracer: &RayTracer<'_>,
    settings: &RenderSettings,
    col: u32,
    row: u32,
) -> Color {
    let n = settings.samples_per_axis.max(1);
    if settings.adaptive {
        adaptive_pixel(camera, tracer, n, col, row)
    } else if n > 1 || settings.jitter {
        regular_pixel(camera, tracer, settings, n, col, row)
    } else {
        tracer.trace(&camera.construct_ray(camera.nx(), camera.ny(), col, row))
    }
}

/// Trace through a view-plane point, answering the background for the
/// degenerate point that coincides with the camera location.
fn trace_through(camera: &Camera, tracer: &RayTracer<'_>, target: DVec3) -> Color {
    match Dir3::between(camera.location(), target) {
        Some(dir) => tracer.trace(&Ray::new(camera.location(), dir)),
        None => tracer.background(),
    }
}

/// Deterministic per-pixel RNG seed, independent of worker scheduling.
fn pixel_seed(base: u64, camera: &Camera, col: u32, row: u32) -> u64 {
    let index = row as u64 * camera.nx() as u64 + col as u64;
    base ^ index.wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Subdivide the pixel into an n×n cell grid, trace one ray per cell
/// (center, or jittered within the cell), and average.
fn regular_pixel(
    camera: &Camera,
    tracer: &RayTracer<'_>,
    settings: &RenderSettings,
    n: u32,
    col: u32,
    row: u32,
) -> Color {
    let (pw, ph) = camera.pixel_size();
    let center = camera.pixel_center(camera.nx(), camera.ny(), col, row);
    let right = camera.right().as_vec();
    let up = camera.up().as_vec();
    let cell_w = pw / n as f64;
    let cell_h = ph / n as f64;

    let mut rng = settings
        .jitter
        .then(|| StdRng::seed_from_u64(pixel_seed(settings.seed, camera, col, row)));

    let mut rays = Vec::with_capacity((n * n) as usize);
    for i in 0..n {
        for j in 0..n {
            let (fx, fy) = match rng.as_mut() {
                Some(rng) => (rng.gen::<f64>(), rng.gen::<f64>()),
                None => (0.5, 0.5),
            };
            let dx = (j as f64 + fx) * cell_w - pw / 2.0;
            let dy = (i as f64 + fy) * cell_h - ph / 2.0;
            let target = center + right * dx + up * dy;
            if let Some(dir) = Dir3::between(camera.location(), target) {
                rays.push(Ray::new(camera.location(), dir));
            }
        }
    }
    tracer.trace_beam(&rays)
}

/// Adaptive supersampling entry: trace the pixel's four corners once, then
/// subdivide only where they disagree.
fn adaptive_pixel(
    camera: &Camera,
    tracer: &RayTracer<'_>,
    n: u32,
    col: u32,
    row: u32,
) -> Color {
    let (pw, ph) = camera.pixel_size();
    let center = camera.pixel_center(camera.nx(), camera.ny(), col, row);
    let right = camera.right().as_vec();
    let up = camera.up().as_vec();

    // Region extents stop subdividing at one n-th of the pixel, the same
    // knob that sizes the regular grid
    let min_w = pw / n as f64;
    let min_h = ph / n as f64;

    // Corner order: [--, +-, -+, ++] in (right, up) signs
    let corners = CORNER_SIGNS.map(|(sx, sy)| {
        trace_through(
            camera,
            tracer,
            center + right * (sx * pw / 2.0) + up * (sy * ph / 2.0),
        )
    });

    adaptive_region(
        camera, tracer, center, pw, ph, min_w, min_h, corners,
    )
}

const CORNER_SIGNS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)];

/// Resolve one square region from its four corner colors.
///
/// Agreeing corners settle the whole region without further rays. A region
/// too small to split is stood in for by its center ray. Otherwise the
/// region splits into quadrants that share the parent corners, the four
/// edge midpoints and the center; every shared sample is traced exactly
/// once and handed down.
#[allow(clippy::too_many_arguments)]
fn adaptive_region(
    camera: &Camera,
    tracer: &RayTracer<'_>,
    center: DVec3,
    w: f64,
    h: f64,
    min_w: f64,
    min_h: f64,
    corners: [Color; 4],
) -> Color {
    let [c00, c10, c01, c11] = corners;
    if c00.almost_eq(&c10) && c00.almost_eq(&c01) && c00.almost_eq(&c11) {
        return c00;
    }
    if w < 2.0 * min_w || h < 2.0 * min_h {
        return trace_through(camera, tracer, center);
    }

    let right = camera.right().as_vec();
    let up = camera.up().as_vec();
    let half_w = w / 2.0;
    let half_h = h / 2.0;

    // Five fresh samples shared between the quadrants
    let mid_bottom = trace_through(camera, tracer, center + up * -half_h);
    let mid_top = trace_through(camera, tracer, center + up * half_h);
    let mid_left = trace_through(camera, tracer, center + right * -half_w);
    let mid_right = trace_through(camera, tracer, center + right * half_w);
    let mid_center = trace_through(camera, tracer, center);

    let quadrants = [
        // (center offset signs, corner colors in [--, +-, -+, ++] order)
        ((-1.0, -1.0), [c00, mid_bottom, mid_left, mid_center]),
        ((1.0, -1.0), [mid_bottom, c10, mid_center, mid_right]),
        ((-1.0, 1.0), [mid_left, mid_center, c01, mid_top]),
        ((1.0, 1.0), [mid_center, mid_right, mid_top, c11]),
    ];

    quadrants
        .into_iter()
        .map(|((sx, sy), sub_corners)| {
            let sub_center = center + right * (sx * w / 4.0) + up * (sy * h / 4.0);
            adaptive_region(
                camera, tracer, sub_center, half_w, half_h, min_w, min_h, sub_corners,
            )
        })
        .sum::<Color>()
        .reduce(4)
}
