//! The renderable scene aggregate.

use glint_math::Color;

use crate::geometry::{Geometries, Geometry};
use crate::light::{AmbientLight, LightSource};

/// Everything a render pass reads: geometry, lights, ambient term, and the
/// background color returned for rays that escape.
///
/// A scene is assembled before rendering and borrowed immutably by every
/// worker for the duration of a pass; configuration and rendering never
/// overlap.
pub struct Scene {
    pub name: String,
    pub geometries: Geometries,
    pub lights: Vec<Box<dyn LightSource>>,
    pub ambient: AmbientLight,
    pub background: Color,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometries: Geometries::new(),
            lights: Vec::new(),
            ambient: AmbientLight::NONE,
            background: Color::BLACK,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the ambient light.
    pub fn with_ambient(mut self, ambient: AmbientLight) -> Self {
        self.ambient = ambient;
        self
    }

    /// Add a shape.
    pub fn add_geometry(&mut self, shape: Box<dyn Geometry>) {
        self.geometries.add(shape);
    }

    /// Add a light source.
    pub fn add_light(&mut self, light: Box<dyn LightSource>) {
        self.lights.push(light);
    }
}
