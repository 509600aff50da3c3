//! Convex planar polygons and triangles.

use glam::DVec3;
use glint_math::{align_zero, is_zero, Color, Dir3, Ray, EPSILON};

use crate::error::GeometryError;
use crate::geometry::{build_hits, Geometry, Intersection};
use crate::material::Material;

/// A convex polygon with at least three coplanar vertices, ordered along
/// the edge path.
#[derive(Debug)]
pub struct Polygon {
    vertices: Vec<DVec3>,
    plane: super::Plane,
    emission: Color,
    material: Material,
}

impl Polygon {
    /// Validate and create a polygon.
    ///
    /// Rejects: fewer than three vertices, coincident/collinear consecutive
    /// vertices, vertices off the supporting plane, and inconsistent winding
    /// (concave outlines).
    pub fn new(vertices: Vec<DVec3>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices);
        }

        // The supporting plane comes from the first three vertices; its
        // constructor already rejects coincident or collinear triples.
        let plane = super::Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        let polygon = Self {
            vertices,
            plane,
            emission: Color::BLACK,
            material: Material::default(),
        };
        if polygon.vertices.len() == 3 {
            return Ok(polygon);
        }

        let n = polygon.plane.normal().as_vec();
        let verts = &polygon.vertices;
        let last = verts.len() - 1;

        // Winding sign of the closing corner; every other corner must agree.
        let mut edge1 = verts[last] - verts[last - 1];
        let mut edge2 = verts[0] - verts[last];
        let positive = winding_sign(edge1, edge2, n)? > 0.0;

        for i in 1..verts.len() {
            if !is_zero((verts[i] - verts[0]).dot(n)) {
                return Err(GeometryError::NonCoplanarVertices);
            }
            edge1 = edge2;
            edge2 = verts[i] - verts[i - 1];
            if positive != (winding_sign(edge1, edge2, n)? > 0.0) {
                return Err(GeometryError::NonConvexPolygon);
            }
        }
        Ok(polygon)
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

    /// Forward ray parameter of the polygon hit, if any.
    ///
    /// Intersects the supporting plane first, then classifies the hit by the
    /// sign of `dir · ((vᵢ−O) × (vᵢ₊₁−O))` for every edge: all strictly one
    /// sign means inside, any zero (the hit lands exactly on an edge or
    /// vertex) or a sign change means no hit.
    fn hit_params(&self, ray: &Ray) -> Vec<f64> {
        let Some(t) = self.plane.hit_param(ray) else {
            return Vec::new();
        };

        let mut positive = None;
        for i in 0..self.vertices.len() {
            let vi = self.vertices[i] - ray.origin;
            let vj = self.vertices[(i + 1) % self.vertices.len()] - ray.origin;
            let Some(edge_normal) = Dir3::try_new(vi.cross(vj)) else {
                // Ray origin in an edge's plane through two vertices
                return Vec::new();
            };
            let s = align_zero(ray.dir.dot(edge_normal.as_vec()));
            if s == 0.0 {
                return Vec::new();
            }
            match positive {
                None => positive = Some(s > 0.0),
                Some(p) if p != (s > 0.0) => return Vec::new(),
                Some(_) => {}
            }
        }
        vec![t]
    }
}

/// Cross the two edges of a corner and orient against the polygon normal.
///
/// A zero cross product means the corner's edges are collinear (or a vertex
/// repeats), which the polygon contract forbids.
fn winding_sign(edge1: DVec3, edge2: DVec3, n: DVec3) -> Result<f64, GeometryError> {
    let cross = edge1.cross(edge2);
    if cross.length() < EPSILON {
        return Err(GeometryError::CollinearVertices);
    }
    Ok(cross.dot(n))
}

impl Geometry for Polygon {
    fn normal_at(&self, _point: DVec3) -> Dir3 {
        self.plane.normal()
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

/// A triangle: the three-vertex polygon.
pub struct Triangle(Polygon);

impl Triangle {
    /// Create a triangle from three vertices.
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Result<Self, GeometryError> {
        Ok(Self(Polygon::new(vec![a, b, c])?))
    }

    /// Set the emission color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.0 = self.0.with_emission(emission);
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.0 = self.0.with_material(material);
        self
    }
}

impl Geometry for Triangle {
    fn normal_at(&self, point: DVec3) -> Dir3 {
        self.0.normal_at(point)
    }

    fn material(&self) -> &Material {
        self.0.material()
    }

    fn emission(&self) -> Color {
        self.0.emission()
    }

    fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        build_hits(self, ray, self.0.hit_params(ray))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_vertices() {
        let err = Polygon::new(vec![DVec3::ZERO, DVec3::X]).unwrap_err();
        assert_eq!(err, GeometryError::TooFewVertices);
    }

    #[test]
    fn test_non_coplanar_rejected() {
        let err = Polygon::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 2.0, 2.0),
        ])
        .unwrap_err();
        assert_eq!(err, GeometryError::NonCoplanarVertices);
    }

    #[test]
    fn test_concave_rejected() {
        let err = Polygon::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(0.7, 0.3, 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, GeometryError::NonConvexPolygon);
    }

    #[test]
    fn test_wrong_vertex_order_rejected() {
        let err = Polygon::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, GeometryError::NonConvexPolygon);
    }

    #[test]
    fn test_duplicate_vertex_rejected() {
        let err = Polygon::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, GeometryError::CollinearVertices);
    }

    #[test]
    fn test_quad_hit_inside() {
        let quad = Polygon::new(vec![
            DVec3::new(-1.0, -1.0, 1.0),
            DVec3::new(1.0, -1.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(-1.0, 1.0, 1.0),
        ])
        .unwrap();
        let ray = Ray::new(DVec3::new(0.5, -0.5, 0.0), Dir3::new(DVec3::Z));
        let hits = quad.intersect(&ray);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point, DVec3::new(0.5, -0.5, 1.0));
    }

    #[test]
    fn test_quad_far_corner_region_misses() {
        // A point outside the quad but inside the first three vertices'
        // triangle fan would fool a three-edge test; every edge must vote
        let quad = Polygon::new(vec![
            DVec3::new(-1.0, -1.0, 1.0),
            DVec3::new(1.0, -1.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(-1.0, 1.0, 1.0),
        ])
        .unwrap();
        let ray = Ray::new(DVec3::new(1.5, 0.0, 0.0), Dir3::new(DVec3::Z));
        assert!(quad.intersect(&ray).is_empty());
    }

    #[test]
    fn test_triangle_hit() {
        let triangle = Triangle::new(
            DVec3::new(-1.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 2.0, 1.0),
        )
        .unwrap();
        let ray = Ray::new(
            DVec3::new(0.0, 2.0, 0.0),
            Dir3::new(DVec3::new(0.0, -1.0, 1.0)),
        );
        let hits = triangle.intersect(&ray);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].point - DVec3::new(0.0, 1.0, 1.0)).length() < 1e-10);
    }

    #[test]
    fn test_triangle_edge_and_vertex_miss() {
        let triangle = Triangle::new(
            DVec3::new(-1.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 2.0, 1.0),
        )
        .unwrap();

        // Exactly on the bottom edge
        let edge_ray = Ray::new(DVec3::new(0.5, 0.0, 0.0), Dir3::new(DVec3::Z));
        assert!(triangle.intersect(&edge_ray).is_empty());

        // Exactly on a vertex
        let vertex_ray = Ray::new(DVec3::new(1.0, 0.0, 0.0), Dir3::new(DVec3::Z));
        assert!(triangle.intersect(&vertex_ray).is_empty());
    }

    #[test]
    fn test_triangle_outside_misses() {
        let triangle = Triangle::new(
            DVec3::new(-1.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 2.0, 1.0),
        )
        .unwrap();
        let ray = Ray::new(DVec3::new(2.0, 1.0, 0.0), Dir3::new(DVec3::Z));
        assert!(triangle.intersect(&ray).is_empty());
    }
}
