/// Dense matrix algebra with checked dimensions
///
/// Only 3x3 rotation matrices and 3x1 column vectors flow through here, but
/// shapes are tracked at runtime so a mismatched operation is reported as an
/// error instead of panicking inside nalgebra.
use nalgebra::DMatrix;
use tracing::warn;

use crate::error::{Error, Result};
use crate::geometry::Point3D;

/// A `rows x cols` matrix of reals
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: DMatrix::zeros(rows, cols),
        }
    }

    /// Build a matrix from row-major values
    pub fn from_row_slice(rows: usize, cols: usize, values: &[f64]) -> Result<Self> {
        if values.len() != rows * cols {
            return Err(mismatch("from_row_slice", (rows, cols), (values.len(), 1)));
        }
        Ok(Self {
            data: DMatrix::from_row_slice(rows, cols, values),
        })
    }

    /// Build an n x 1 column vector
    pub fn column(values: &[f64]) -> Self {
        Self {
            data: DMatrix::from_column_slice(values.len(), 1, values),
        }
    }

    pub fn from_point(point: &Point3D) -> Self {
        Self::column(&[point.x, point.y, point.z])
    }

    /// Read a 3x1 column vector back as a point
    pub fn to_point(&self) -> Result<Point3D> {
        if self.shape() != (3, 1) {
            return Err(mismatch("to_point", self.shape(), (3, 1)));
        }
        Ok(Point3D::new(self.data[(0, 0)], self.data[(1, 0)], self.data[(2, 0)]))
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// Flatten in row-major order
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.transpose().as_slice().to_vec()
    }

    /// Apply `f(value, row, col)` to every element
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64, usize, usize) -> f64,
    {
        let (rows, cols) = self.shape();
        Self {
            data: DMatrix::from_fn(rows, cols, |i, j| f(self.data[(i, j)], i, j)),
        }
    }

    pub fn transpose(&self) -> Self {
        Self {
            data: self.data.transpose(),
        }
    }

    /// Matrix product `self * other`
    pub fn multiply(&self, other: &Matrix) -> Result<Self> {
        if self.cols() != other.rows() {
            return Err(mismatch("multiply", self.shape(), other.shape()));
        }
        Ok(Self {
            data: &self.data * &other.data,
        })
    }

    pub fn add(&self, other: &Matrix) -> Result<Self> {
        self.check_same_shape("add", other)?;
        Ok(Self {
            data: &self.data + &other.data,
        })
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Self> {
        self.check_same_shape("subtract", other)?;
        Ok(Self {
            data: &self.data - &other.data,
        })
    }

    /// Element-wise product
    pub fn hadamard(&self, other: &Matrix) -> Result<Self> {
        self.check_same_shape("hadamard", other)?;
        Ok(Self {
            data: self.data.component_mul(&other.data),
        })
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            data: &self.data * factor,
        }
    }

    fn check_same_shape(&self, op: &'static str, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(mismatch(op, self.shape(), other.shape()));
        }
        Ok(())
    }
}

fn mismatch(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Error {
    warn!(op, ?left, ?right, "matrix dimension mismatch");
    Error::DimensionMismatch { op, left, right }
}
