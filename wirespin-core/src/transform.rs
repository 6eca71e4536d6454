/// Rotation angles and the shared rotate-about-center routine
use tracing::warn;

use crate::error::Result;
use crate::geometry::Point3D;
use crate::matrix::Matrix;

/// Rotation around three axes (in radians)
///
/// Doubles as the per-tick angular speed of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationAngles {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl Default for RotationAngles {
    fn default() -> Self {
        Self::zero()
    }
}

/// The three elementary rotations for one set of angles
#[derive(Debug, Clone)]
pub struct Rotation {
    rx: Matrix,
    ry: Matrix,
    rz: Matrix,
}

impl Rotation {
    pub fn from_angles(angles: &RotationAngles) -> Result<Self> {
        let (sx, cx) = angles.x.sin_cos();
        let (sy, cy) = angles.y.sin_cos();
        let (sz, cz) = angles.z.sin_cos();

        #[rustfmt::skip]
        let rx = Matrix::from_row_slice(3, 3, &[
            1.0, 0.0, 0.0,
            0.0, cx, -sx,
            0.0, sx, cx,
        ])?;
        #[rustfmt::skip]
        let ry = Matrix::from_row_slice(3, 3, &[
            cy, 0.0, sy,
            0.0, 1.0, 0.0,
            -sy, 0.0, cy,
        ])?;
        #[rustfmt::skip]
        let rz = Matrix::from_row_slice(3, 3, &[
            cz, -sz, 0.0,
            sz, cz, 0.0,
            0.0, 0.0, 1.0,
        ])?;

        Ok(Self { rx, ry, rz })
    }

    /// Rotate a column vector: X first, then Y, then Z
    pub fn apply(&self, v: &Matrix) -> Result<Matrix> {
        let rotated = self.rx.multiply(v)?;
        let rotated = self.ry.multiply(&rotated)?;
        self.rz.multiply(&rotated)
    }

    /// Rotate a point about the origin
    pub fn apply_to_point(&self, point: &Point3D) -> Result<Point3D> {
        self.apply(&Matrix::from_point(point))?.to_point()
    }
}

/// Rotate every point about `center`, replacing points in place
///
/// A point that fails to rotate keeps its previous position; the rest of the
/// sequence is still rotated.
pub fn rotate_about(points: &mut [Point3D], center: &Point3D, angles: &RotationAngles) -> Result<()> {
    let rotation = Rotation::from_angles(angles)?;

    for (index, point) in points.iter_mut().enumerate() {
        let offset = Point3D::from(*point - center);
        match rotation.apply_to_point(&offset) {
            Ok(rotated) => *point = rotated + center.coords,
            Err(err) => warn!(index, %err, "point left unrotated"),
        }
    }

    Ok(())
}
