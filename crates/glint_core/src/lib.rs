//! Glint core: geometry, materials, lights and scenes for the ray tracer.
//!
//! This crate provides:
//!
//! - **Intersection engine**: closed-form solvers for planes, spheres,
//!   triangles/polygons, tubes and cylinders behind the [`Geometry`] trait,
//!   plus the [`Geometries`] composite
//! - **Shading inputs**: [`Material`] coefficients and the light-source
//!   variants (directional, point, spot) with soft-shadow sampling
//! - **[`Scene`]**: the immutable-during-render aggregate the tracer reads

pub mod error;
pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;

pub use error::GeometryError;
pub use geometry::{
    Cylinder, Geometries, Geometry, Intersection, Plane, Polygon, Sphere, Triangle, Tube,
};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use scene::Scene;

// Re-export the math types every consumer needs alongside the scene types
pub use glint_math::{Color, DVec3, Dir3, Ray};
