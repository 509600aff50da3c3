//! Glint renderer: the recursive ray tracing core and its render loop.
//!
//! This crate provides:
//!
//! - **[`RayTracer`]**: recursive local/global shading with transparency-
//!   aware (optionally soft) shadows
//! - **[`Camera`]**: validated pinhole camera and pixel-to-ray mapping
//! - **Sampling**: regular and adaptive supersampling per pixel
//! - **[`render`]**: the concurrent render pass over a worker pool
//! - **[`ImageBuffer`]**: the unclamped render target with a PNG sink
//!
//! # Example
//!
//! ```ignore
//! let camera = Camera::builder()
//!     .location(DVec3::new(0.0, 0.0, 10.0))
//!     .look_at(DVec3::ZERO, Dir3::new(DVec3::Y))
//!     .vp_size(20.0, 20.0)
//!     .vp_distance(10.0)
//!     .resolution(800, 800)
//!     .build()?;
//! let image = render(&camera, &scene, &RenderSettings::default());
//! image.save_png("out.png")?;
//! ```

mod camera;
mod image_writer;
mod renderer;
mod sampling;
mod tracer;

pub use camera::{Camera, CameraBuilder, CameraError};
pub use image_writer::ImageBuffer;
pub use renderer::{render, RenderSettings, Threads};
pub use sampling::sample_pixel;
pub use tracer::{RayTracer, MAX_DEPTH, MIN_ATTENUATION};

/// Re-export the scene and math types callers build renders from
pub use glint_core::{
    AmbientLight, Color, Cylinder, DVec3, Dir3, DirectionalLight, Geometries, Geometry,
    GeometryError, Intersection, LightSource, Material, Plane, PointLight, Polygon, Ray, Scene,
    Sphere, SpotLight, Triangle, Tube,
};
