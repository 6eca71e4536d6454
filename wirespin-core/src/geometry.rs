/// Parametric solids sampled as point sets
use std::f64::consts::TAU;
use std::fmt;

use nalgebra::Point3;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::projection::{Projector, ScreenPoint};
use crate::surface::DrawSurface;
use crate::transform::{rotate_about, RotationAngles};

/// A point in world space
pub type Point3D = Point3<f64>;

/// Samples per full turn; a step of π/100
pub const DEFAULT_SEGMENTS: usize = 200;

/// Upper bound on samples per turn; a torus holds the square of this
pub const MAX_SEGMENTS: usize = 4096;

/// Side of the square plotted for each point, in pixels
pub const POINT_SIZE: f64 = 2.0;

/// Something that can be spun and drawn
pub trait Solid: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Pivot used by every rotation
    fn center(&self) -> Point3D;

    fn points(&self) -> &[Point3D];

    /// Rotate all owned points about the center, in place
    fn rotate(&mut self, angles: &RotationAngles) -> Result<()>;

    /// Issue draw calls for the current orientation
    fn draw(&self, projector: &Projector, surface: &mut dyn DrawSurface);
}

/// Ring torus around the z axis of its center
#[derive(Debug, Clone)]
pub struct Torus {
    center: Point3D,
    major_radius: f64,
    minor_radius: f64,
    points: Vec<Point3D>,
}

impl Torus {
    pub fn new(center: Point3D, major_radius: f64, minor_radius: f64) -> Result<Self> {
        Self::with_segments(center, major_radius, minor_radius, DEFAULT_SEGMENTS)
    }

    pub fn with_segments(
        center: Point3D,
        major_radius: f64,
        minor_radius: f64,
        segments: usize,
    ) -> Result<Self> {
        require_positive("torus major radius", major_radius)?;
        require_positive("torus minor radius", minor_radius)?;
        let step = angular_step(segments)?;

        let mut points = Vec::with_capacity(segments * segments);
        for i in 0..segments {
            let (sin_i, cos_i) = (i as f64 * step).sin_cos();
            for j in 0..segments {
                let (sin_j, cos_j) = (j as f64 * step).sin_cos();
                let ring = major_radius + minor_radius * cos_j;
                points.push(Point3D::new(
                    ring * cos_i + center.x,
                    ring * sin_i + center.y,
                    minor_radius * sin_j + center.z,
                ));
            }
        }

        debug!(points = points.len(), major_radius, minor_radius, "built torus");
        Ok(Self {
            center,
            major_radius,
            minor_radius,
            points,
        })
    }

    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }
}

impl Solid for Torus {
    fn name(&self) -> &'static str {
        "torus"
    }

    fn center(&self) -> Point3D {
        self.center
    }

    fn points(&self) -> &[Point3D] {
        &self.points
    }

    fn rotate(&mut self, angles: &RotationAngles) -> Result<()> {
        rotate_about(&mut self.points, &self.center, angles)
    }

    fn draw(&self, projector: &Projector, surface: &mut dyn DrawSurface) {
        for point in project_all(projector, &self.points).into_iter().flatten() {
            surface.fill_square(point, POINT_SIZE);
        }
    }
}

/// Vertex pairs of the cube wireframe: bottom ring, top ring, verticals
pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Axis-aligned cube drawn as 12 edges
#[derive(Debug, Clone)]
pub struct Cube {
    center: Point3D,
    size: f64,
    points: Vec<Point3D>,
}

impl Cube {
    /// Vertices 0-3 walk the bottom face (z-), 4-7 the top face (z+) in the
    /// same winding, so vertex `i` sits under vertex `i + 4`.
    pub fn new(center: Point3D, size: f64) -> Result<Self> {
        require_positive("cube size", size)?;
        let h = size / 2.0;
        let corner = |dx: f64, dy: f64, dz: f64| Point3D::new(center.x + dx, center.y + dy, center.z + dz);

        let points = vec![
            corner(-h, -h, -h),
            corner(h, -h, -h),
            corner(h, h, -h),
            corner(-h, h, -h),
            corner(-h, -h, h),
            corner(h, -h, h),
            corner(h, h, h),
            corner(-h, h, h),
        ];

        debug!(size, "built cube");
        Ok(Self {
            center,
            size,
            points,
        })
    }

    pub fn size(&self) -> f64 {
        self.size
    }
}

impl Solid for Cube {
    fn name(&self) -> &'static str {
        "cube"
    }

    fn center(&self) -> Point3D {
        self.center
    }

    fn points(&self) -> &[Point3D] {
        &self.points
    }

    fn rotate(&mut self, angles: &RotationAngles) -> Result<()> {
        rotate_about(&mut self.points, &self.center, angles)
    }

    fn draw(&self, projector: &Projector, surface: &mut dyn DrawSurface) {
        let projected = project_all(projector, &self.points);
        for (a, b) in CUBE_EDGES {
            if let (Some(from), Some(to)) = (projected[a], projected[b]) {
                surface.stroke_line(from, to);
            }
        }
    }
}

/// Cone standing on its base ring, apex along +z
#[derive(Debug, Clone)]
pub struct Cone {
    center: Point3D,
    height: f64,
    radius: f64,
    base_count: usize,
    points: Vec<Point3D>,
    apex: Point3D,
}

impl Cone {
    pub fn new(center: Point3D, height: f64, radius: f64) -> Result<Self> {
        Self::with_segments(center, height, radius, DEFAULT_SEGMENTS)
    }

    /// The base ring is followed by an equal number of samples collapsed
    /// onto the apex; the apex itself is also kept on its own.
    pub fn with_segments(center: Point3D, height: f64, radius: f64, segments: usize) -> Result<Self> {
        require_positive("cone height", height)?;
        require_positive("cone radius", radius)?;
        let step = angular_step(segments)?;
        let apex = Point3D::new(center.x, center.y, center.z + height);

        let mut points = Vec::with_capacity(segments * 2);
        for i in 0..segments {
            let (sin, cos) = (i as f64 * step).sin_cos();
            points.push(Point3D::new(radius * cos + center.x, radius * sin + center.y, center.z));
        }
        points.extend(std::iter::repeat(apex).take(segments));

        debug!(points = points.len(), height, radius, "built cone");
        Ok(Self {
            center,
            height,
            radius,
            base_count: segments,
            points,
            apex,
        })
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn apex(&self) -> Point3D {
        self.apex
    }

    pub fn base_ring(&self) -> &[Point3D] {
        &self.points[..self.base_count]
    }
}

impl Solid for Cone {
    fn name(&self) -> &'static str {
        "cone"
    }

    fn center(&self) -> Point3D {
        self.center
    }

    fn points(&self) -> &[Point3D] {
        &self.points
    }

    fn rotate(&mut self, angles: &RotationAngles) -> Result<()> {
        rotate_about(&mut self.points, &self.center, angles)?;
        rotate_about(std::slice::from_mut(&mut self.apex), &self.center, angles)
    }

    fn draw(&self, projector: &Projector, surface: &mut dyn DrawSurface) {
        let projected = project_all(projector, &self.points);
        for point in projected.iter().flatten() {
            surface.fill_square(*point, POINT_SIZE);
        }

        let Ok(apex) = projector.project(&self.apex) else {
            trace!("cone apex not projectable, skipping sides");
            return;
        };
        for point in projected.into_iter().flatten() {
            surface.stroke_line(point, apex);
        }
    }
}

/// Project every point, leaving `None` where a point has no image
fn project_all(projector: &Projector, points: &[Point3D]) -> Vec<Option<ScreenPoint>> {
    let projected: Vec<_> = points.iter().map(|p| projector.project(p).ok()).collect();
    let skipped = projected.iter().filter(|p| p.is_none()).count();
    if skipped > 0 {
        trace!(skipped, "points not drawn");
    }
    projected
}

fn angular_step(segments: usize) -> Result<f64> {
    if segments == 0 || segments > MAX_SEGMENTS {
        return Err(Error::InvalidShape(format!(
            "segment count must be between 1 and {MAX_SEGMENTS}, got {segments}"
        )));
    }
    Ok(TAU / segments as f64)
}

fn require_positive(what: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidShape(format!("{what} must be a positive number, got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FrameRecorder;
    use approx::assert_relative_eq;

    fn origin() -> Point3D {
        Point3D::new(0.0, 0.0, -50.0)
    }

    #[test]
    fn test_torus_point_count() {
        let torus = Torus::new(origin(), 30.0, 10.0).unwrap();
        assert_eq!(torus.points().len(), 40_000);
    }

    #[test]
    fn test_torus_samples_follow_parametrisation() {
        let torus = Torus::new(origin(), 30.0, 10.0).unwrap();
        // i = 0, j = 0: outermost point on the +x axis
        assert_relative_eq!(torus.points()[0], Point3D::new(40.0, 0.0, -50.0), epsilon = 1e-12);
        // i = 0, j = 50: top of the tube, j = π/2
        assert_relative_eq!(torus.points()[50], Point3D::new(30.0, 0.0, -40.0), epsilon = 1e-9);

        for p in torus.points() {
            let ring = (p.x.hypot(p.y) - 30.0).hypot(p.z + 50.0);
            assert_relative_eq!(ring, 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cube_vertices() {
        let cube = Cube::new(Point3D::new(1.0, 2.0, 3.0), 4.0).unwrap();
        let points = cube.points();
        assert_eq!(points.len(), 8);
        assert_eq!(points[0], Point3D::new(-1.0, 0.0, 1.0));
        assert_eq!(points[6], Point3D::new(3.0, 4.0, 5.0));
        for i in 0..4 {
            // Each top vertex sits straight above its bottom partner
            let (bottom, top) = (points[i], points[i + 4]);
            assert_eq!((bottom.x, bottom.y), (top.x, top.y));
            assert_eq!(top.z - bottom.z, 4.0);
        }
    }

    #[test]
    fn test_cone_counts_and_apex() {
        let cone = Cone::new(origin(), 30.0, 20.0).unwrap();
        assert_eq!(cone.base_ring().len(), 200);
        assert_eq!(cone.points().len(), 400);
        assert_eq!(cone.apex(), Point3D::new(0.0, 0.0, -20.0));
        assert!(cone.points()[200..].iter().all(|p| *p == cone.apex()));
        for p in cone.base_ring() {
            assert_eq!(p.z, -50.0);
            assert_relative_eq!(p.x.hypot(p.y), 20.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cone_apex_follows_rotation() {
        let mut cone = Cone::new(origin(), 30.0, 20.0).unwrap();
        cone.rotate(&RotationAngles::new(0.3, 0.2, 0.1)).unwrap();
        assert_relative_eq!(cone.apex(), cone.points()[399], epsilon = 1e-12);
        assert!((cone.apex() - Point3D::new(0.0, 0.0, -20.0)).norm() > 1.0);
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        assert!(matches!(Torus::new(origin(), 0.0, 10.0), Err(Error::InvalidShape(_))));
        assert!(Torus::with_segments(origin(), 30.0, 10.0, 0).is_err());
        assert!(Torus::with_segments(origin(), 30.0, 10.0, usize::MAX).is_err());
        assert!(Cone::with_segments(origin(), 30.0, 10.0, MAX_SEGMENTS + 1).is_err());
        assert!(Cube::new(origin(), f64::NAN).is_err());
        assert!(Cone::new(origin(), -1.0, 5.0).is_err());
    }

    #[test]
    fn test_draw_calls_per_solid() {
        let projector = Projector::default();
        let mut surface = FrameRecorder::new();

        Torus::new(origin(), 30.0, 10.0).unwrap().draw(&projector, &mut surface);
        assert_eq!(surface.squares(), 40_000);
        assert_eq!(surface.lines(), 0);

        surface.clear();
        Cube::new(origin(), 30.0).unwrap().draw(&projector, &mut surface);
        assert_eq!(surface.lines(), 12);

        surface.clear();
        Cone::new(origin(), 30.0, 20.0).unwrap().draw(&projector, &mut surface);
        assert_eq!(surface.squares(), 400);
        assert_eq!(surface.lines(), 400);
    }

    #[test]
    fn test_unprojectable_points_are_skipped() {
        let projector = Projector::default();
        let mut surface = FrameRecorder::new();

        // Base ring lies on z = 0
        Cone::new(Point3D::new(0.0, 0.0, 0.0), 30.0, 20.0)
            .unwrap()
            .draw(&projector, &mut surface);
        assert_eq!(surface.squares(), 200);
        assert_eq!(surface.lines(), 200);

        // Bottom face lies on z = 0, only the top ring survives
        surface.clear();
        Cube::new(Point3D::new(0.0, 0.0, 1.0), 2.0)
            .unwrap()
            .draw(&projector, &mut surface);
        assert_eq!(surface.lines(), 4);
    }
}
