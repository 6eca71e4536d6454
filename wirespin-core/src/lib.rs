/// Wirespin Core Library - Shared geometry pipeline
///
/// Builds point-sampled solids, rotates them about their own center and
/// projects them through a pinhole camera onto any `DrawSurface`. Front ends
/// own the surface and the frame clock; the `Driver` owns everything else.

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod projection;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use animation::{AnimationState, ControlInputs, Driver, Status};
pub use config::{SceneConfig, ShapeKind};
pub use error::{Axis, Error, Result};
pub use geometry::{Cone, Cube, Point3D, Solid, Torus};
pub use matrix::Matrix;
pub use projection::{Projector, ScreenPoint};
pub use surface::{DrawCommand, DrawSurface, FrameRecorder};
pub use transform::{Rotation, RotationAngles};
