/// Scene defaults and solid construction
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::geometry::{Cone, Cube, Point3D, Solid, Torus, DEFAULT_SEGMENTS};
use crate::projection::DEFAULT_FOCAL_LENGTH;
use crate::transform::RotationAngles;

/// Default per-tick rotation on every axis, in radians
pub const DEFAULT_SPEED: f64 = 0.05;

/// Which solid a scene shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    #[default]
    Torus,
    Cube,
    Cone,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Torus => "torus",
            ShapeKind::Cube => "cube",
            ShapeKind::Cone => "cone",
        };
        f.write_str(name)
    }
}

impl FromStr for ShapeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "torus" => Ok(ShapeKind::Torus),
            "cube" => Ok(ShapeKind::Cube),
            "cone" => Ok(ShapeKind::Cone),
            other => Err(Error::InvalidShape(format!("unknown shape {other:?}"))),
        }
    }
}

/// Parameters of the animated scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub shape: ShapeKind,
    pub center: Point3D,
    pub major_radius: f64,
    pub minor_radius: f64,
    pub cube_size: f64,
    pub cone_height: f64,
    pub cone_radius: f64,
    /// Samples per full turn for curved solids
    pub segments: usize,
    pub focal_length: f64,
    pub speeds: RotationAngles,
}

impl SceneConfig {
    /// Check every parameter by building the configured solid once
    pub fn validate(&self) -> Result<()> {
        if !self.focal_length.is_finite() || self.focal_length == 0.0 {
            return Err(Error::InvalidShape(format!(
                "focal length must be a non-zero number, got {}",
                self.focal_length
            )));
        }
        self.build_solid().map(|_| ())
    }

    /// Construct a fresh solid of the configured kind
    pub fn build_solid(&self) -> Result<Box<dyn Solid>> {
        let solid: Box<dyn Solid> = match self.shape {
            ShapeKind::Torus => Box::new(Torus::with_segments(
                self.center,
                self.major_radius,
                self.minor_radius,
                self.segments,
            )?),
            ShapeKind::Cube => Box::new(Cube::new(self.center, self.cube_size)?),
            ShapeKind::Cone => Box::new(Cone::with_segments(
                self.center,
                self.cone_height,
                self.cone_radius,
                self.segments,
            )?),
        };
        Ok(solid)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Torus,
            center: Point3D::new(0.0, 0.0, -50.0),
            major_radius: 30.0,
            minor_radius: 10.0,
            cube_size: 30.0,
            cone_height: 30.0,
            cone_radius: 20.0,
            segments: DEFAULT_SEGMENTS,
            focal_length: DEFAULT_FOCAL_LENGTH,
            speeds: RotationAngles::new(DEFAULT_SPEED, DEFAULT_SPEED, DEFAULT_SPEED),
        }
    }
}
