/// Error types for the wirespin pipeline
use std::fmt;

use thiserror::Error;

/// One of the three rotation axes, used to point at the offending speed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Main error type for wirespin operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{op}: a {} matrix is incompatible with a {} matrix", dims(.left), dims(.right))]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("point at depth {z} cannot be projected onto the screen")]
    DegenerateProjection { z: f64 },

    #[error("rotation speed {axis} is not a number: {value:?}")]
    InvalidControlInput { axis: Axis, value: String },

    #[error("invalid shape: {0}")]
    InvalidShape(String),
}

fn dims(shape: &(usize, usize)) -> String {
    format!("{}x{}", shape.0, shape.1)
}

/// Result type alias for wirespin operations
pub type Result<T> = std::result::Result<T, Error>;
