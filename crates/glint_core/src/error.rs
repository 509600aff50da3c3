//! Construction-time validation errors.
//!
//! Every fault here is fatal at build time: a shape that fails validation is
//! never added to a scene, so nothing needs checking again during a render.

use thiserror::Error;

/// Errors raised by shape constructors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("zero-length vector cannot define a direction")]
    DegenerateVector,

    #[error("radius must be positive")]
    NonPositiveRadius,

    #[error("height must be positive")]
    NonPositiveHeight,

    #[error("a polygon needs at least 3 vertices")]
    TooFewVertices,

    #[error("consecutive polygon vertices are coincident or collinear")]
    CollinearVertices,

    #[error("all polygon vertices must lie in one plane")]
    NonCoplanarVertices,

    #[error("polygon vertices must wind consistently around a convex outline")]
    NonConvexPolygon,
}
