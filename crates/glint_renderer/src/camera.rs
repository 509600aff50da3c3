//! The virtual camera and its validated builder.

use glam::DVec3;
use glint_math::{is_zero, Dir3, Ray};
use thiserror::Error;

/// Errors raised by [`CameraBuilder::build`].
///
/// Missing configuration and invalid values are distinct kinds, so a caller
/// can tell "you forgot to set this" from "you set this to nonsense".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    #[error("missing camera parameter: {0}")]
    MissingField(&'static str),

    #[error("view-plane width and height must be positive")]
    InvalidViewport,

    #[error("view-plane distance must be positive")]
    InvalidDistance,

    #[error("image resolution must be positive in both dimensions")]
    InvalidResolution,

    #[error("camera basis vectors must be orthogonal")]
    NonOrthogonalBasis,

    #[error("look-at target coincides with the camera location")]
    DegenerateLookAt,
}

/// A validated pinhole camera: a location, an orthonormal basis, and a view
/// plane carved into `nx × ny` pixels.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    location: DVec3,
    v_to: Dir3,
    v_up: Dir3,
    v_right: Dir3,
    vp_distance: f64,
    vp_width: f64,
    vp_height: f64,
    nx: u32,
    ny: u32,
}

impl Camera {
    /// Start building a camera.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    /// The camera location.
    pub fn location(&self) -> DVec3 {
        self.location
    }

    /// The forward basis vector.
    pub fn forward(&self) -> Dir3 {
        self.v_to
    }

    /// The up basis vector.
    pub fn up(&self) -> Dir3 {
        self.v_up
    }

    /// The right basis vector.
    pub fn right(&self) -> Dir3 {
        self.v_right
    }

    /// Horizontal resolution.
    pub fn nx(&self) -> u32 {
        self.nx
    }

    /// Vertical resolution.
    pub fn ny(&self) -> u32 {
        self.ny
    }

    /// The world-space footprint of one pixel on the view plane.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.vp_width / self.nx as f64, self.vp_height / self.ny as f64)
    }

    /// Center of pixel `(col, row)` on the view plane, for an `nx × ny`
    /// grid. Row 0 is the top of the image.
    pub fn pixel_center(&self, nx: u32, ny: u32, col: u32, row: u32) -> DVec3 {
        let mut p = self.location + self.v_to.as_vec() * self.vp_distance;
        let x = (col as f64 - (nx as f64 - 1.0) / 2.0) * self.vp_width / nx as f64;
        let y = ((ny as f64 - 1.0) / 2.0 - row as f64) * self.vp_height / ny as f64;
        if !is_zero(x) {
            p += self.v_right.as_vec() * x;
        }
        if !is_zero(y) {
            p += self.v_up.as_vec() * y;
        }
        p
    }

    /// The ray from the camera through the center of pixel `(col, row)`.
    pub fn construct_ray(&self, nx: u32, ny: u32, col: u32, row: u32) -> Ray {
        self.ray_through(self.pixel_center(nx, ny, col, row))
    }

    /// The ray from the camera through an arbitrary view-plane point.
    ///
    /// The target sits at least `vp_distance > 0` in front of the location,
    /// so the direction cannot degenerate.
    pub fn ray_through(&self, target: DVec3) -> Ray {
        let dir = Dir3::new(target - self.location);
        Ray::new(self.location, dir)
    }
}

/// How the builder was told to orient the camera.
enum Orientation {
    Axes { v_to: Dir3, v_up: Dir3 },
    LookAt { target: DVec3, up: Dir3 },
}

/// Step-by-step camera configuration, checked as a whole by [`build`].
///
/// [`build`]: CameraBuilder::build
#[derive(Default)]
pub struct CameraBuilder {
    location: Option<DVec3>,
    orientation: Option<Orientation>,
    vp_width: Option<f64>,
    vp_height: Option<f64>,
    vp_distance: Option<f64>,
    nx: u32,
    ny: u32,
}

impl CameraBuilder {
    /// Set the camera location.
    pub fn location(mut self, location: DVec3) -> Self {
        self.location = Some(location);
        self
    }

    /// Orient the camera by explicit forward and up directions.
    pub fn direction(mut self, v_to: Dir3, v_up: Dir3) -> Self {
        self.orientation = Some(Orientation::Axes { v_to, v_up });
        self
    }

    /// Orient the camera toward a target point; the exact up vector is
    /// derived so the basis comes out orthonormal even for a rough `up`.
    pub fn look_at(mut self, target: DVec3, up: Dir3) -> Self {
        self.orientation = Some(Orientation::LookAt { target, up });
        self
    }

    /// Set the view-plane size.
    pub fn vp_size(mut self, width: f64, height: f64) -> Self {
        self.vp_width = Some(width);
        self.vp_height = Some(height);
        self
    }

    /// Set the view-plane distance.
    pub fn vp_distance(mut self, distance: f64) -> Self {
        self.vp_distance = Some(distance);
        self
    }

    /// Set the image resolution. Defaults to 1 × 1.
    pub fn resolution(mut self, nx: u32, ny: u32) -> Self {
        self.nx = nx;
        self.ny = ny;
        self
    }

    /// Validate the configuration into a camera.
    ///
    /// Every fault is reported here, before any rendering starts.
    pub fn build(self) -> Result<Camera, CameraError> {
        let location = self.location.ok_or(CameraError::MissingField("location"))?;
        let orientation = self
            .orientation
            .ok_or(CameraError::MissingField("direction"))?;

        let (v_to, v_up, v_right) = match orientation {
            Orientation::Axes { v_to, v_up } => {
                if !is_zero(v_to.dot(v_up.as_vec())) {
                    return Err(CameraError::NonOrthogonalBasis);
                }
                let v_right = Dir3::try_new(v_to.cross(v_up.as_vec()))
                    .ok_or(CameraError::NonOrthogonalBasis)?;
                (v_to, v_up, v_right)
            }
            Orientation::LookAt { target, up } => {
                let v_to =
                    Dir3::between(location, target).ok_or(CameraError::DegenerateLookAt)?;
                let v_right = Dir3::try_new(v_to.cross(up.as_vec()))
                    .ok_or(CameraError::NonOrthogonalBasis)?;
                let v_up = Dir3::new(v_right.cross(v_to.as_vec()));
                (v_to, v_up, v_right)
            }
        };

        // The basis must come out pairwise orthogonal no matter which path
        // produced it
        if !is_zero(v_to.dot(v_up.as_vec()))
            || !is_zero(v_to.dot(v_right.as_vec()))
            || !is_zero(v_up.dot(v_right.as_vec()))
        {
            return Err(CameraError::NonOrthogonalBasis);
        }

        let vp_width = self.vp_width.ok_or(CameraError::MissingField("vp_size"))?;
        let vp_height = self.vp_height.ok_or(CameraError::MissingField("vp_size"))?;
        if vp_width <= 0.0 || vp_height <= 0.0 {
            return Err(CameraError::InvalidViewport);
        }

        let vp_distance = self
            .vp_distance
            .ok_or(CameraError::MissingField("vp_distance"))?;
        if vp_distance <= 0.0 {
            return Err(CameraError::InvalidDistance);
        }

        // Resolution defaults to 1 × 1; an explicit zero is a configuration
        // error, not a default
        let (nx, ny) = if self.nx == 0 && self.ny == 0 {
            (1, 1)
        } else if self.nx == 0 || self.ny == 0 {
            return Err(CameraError::InvalidResolution);
        } else {
            (self.nx, self.ny)
        };

        Ok(Camera {
            location,
            v_to,
            v_up,
            v_right,
            vp_distance,
            vp_width,
            vp_height,
            nx,
            ny,
        })
    }
}
