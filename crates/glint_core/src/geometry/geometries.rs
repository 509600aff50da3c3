//! A flat collection of shapes intersected together.

use glint_math::Ray;

use crate::geometry::{Geometry, Intersection};

/// A composite of shapes.
///
/// Intersection concatenates every child's hits in a straight linear scan
/// with no spatial pruning, so each cast costs O(number of children).
#[derive(Default)]
pub struct Geometries {
    shapes: Vec<Box<dyn Geometry>>,
}

impl Geometries {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape to the collection.
    pub fn add(&mut self, shape: Box<dyn Geometry>) {
        self.shapes.push(shape);
    }

    /// Number of shapes held.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the collection holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// All intersections of `ray` with every shape, unordered.
    ///
    /// An empty collection always yields no hits.
    pub fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        self.shapes
            .iter()
            .flat_map(|shape| shape.intersect(ray))
            .collect()
    }
}
