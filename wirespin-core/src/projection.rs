/// Pinhole perspective projection
use crate::error::{Error, Result};
use crate::geometry::Point3D;

/// Focal length used by the reference scene, in world units
pub const DEFAULT_FOCAL_LENGTH: f64 = 40.0;

/// A projected point in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// World-space depth the point was projected from
    pub depth: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64, depth: f64) -> Self {
        Self { x, y, depth }
    }
}

/// Fixed focal length projector centered on a viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub focal_length: f64,
    pub width: f64,
    pub height: f64,
}

impl Projector {
    pub fn new(focal_length: f64, width: f64, height: f64) -> Self {
        Self {
            focal_length,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Project a 3D point to 2D screen space
    ///
    /// Points on the `z = 0` plane have no image and yield
    /// [`Error::DegenerateProjection`].
    pub fn project(&self, point: &Point3D) -> Result<ScreenPoint> {
        if point.z.abs() < f64::EPSILON {
            return Err(Error::DegenerateProjection { z: point.z });
        }

        let scale = self.focal_length / point.z;
        let (cx, cy) = self.center();
        let x = cx + point.x * scale;
        let y = cy + point.y * scale;

        if !x.is_finite() || !y.is_finite() {
            return Err(Error::DegenerateProjection { z: point.z });
        }

        Ok(ScreenPoint::new(x, y, point.z))
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(DEFAULT_FOCAL_LENGTH, 800.0, 600.0)
    }
}
