/// Start/stop/reset state machine driving one solid per tick
use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::SceneConfig;
use crate::error::{Axis, Error, Result};
use crate::geometry::Solid;
use crate::projection::Projector;
use crate::surface::DrawSurface;
use crate::transform::RotationAngles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Stopped,
    Running,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Stopped => f.write_str("Stopped"),
            Status::Running => f.write_str("Running"),
        }
    }
}

/// Raw text of the three rotation speed fields (radians per tick)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlInputs {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl ControlInputs {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    pub fn field_mut(&mut self, axis: Axis) -> &mut String {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    /// Parse all three fields; any non-numeric field rejects the whole set
    pub fn parse(&self) -> Result<RotationAngles> {
        Ok(RotationAngles::new(
            parse_speed(Axis::X, &self.x)?,
            parse_speed(Axis::Y, &self.y)?,
            parse_speed(Axis::Z, &self.z)?,
        ))
    }
}

impl From<RotationAngles> for ControlInputs {
    fn from(speeds: RotationAngles) -> Self {
        Self::new(speeds.x.to_string(), speeds.y.to_string(), speeds.z.to_string())
    }
}

fn parse_speed(axis: Axis, text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::InvalidControlInput {
            axis,
            value: text.to_string(),
        }),
    }
}

/// Everything that changes while the animation runs
#[derive(Debug)]
pub struct AnimationState {
    pub status: Status,
    pub speeds: RotationAngles,
    pub solid: Box<dyn Solid>,
}

impl AnimationState {
    /// Stopped, with a fresh solid and the default speeds
    pub fn initial(config: &SceneConfig) -> Result<Self> {
        Ok(Self {
            status: Status::Stopped,
            speeds: config.speeds,
            solid: config.build_solid()?,
        })
    }
}

/// Per-tick orchestration: rotate, then draw
///
/// Timing is left to the caller, which invokes [`Driver::tick`] at its own
/// cadence and never re-enters it.
#[derive(Debug)]
pub struct Driver {
    config: SceneConfig,
    projector: Projector,
    state: AnimationState,
}

impl Driver {
    pub fn new(config: SceneConfig, width: f64, height: f64) -> Result<Self> {
        config.validate()?;
        let projector = Projector::new(config.focal_length, width, height);
        let state = AnimationState::initial(&config)?;
        debug!(shape = %config.shape, width, height, "driver ready");
        Ok(Self {
            config,
            projector,
            state,
        })
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn is_running(&self) -> bool {
        self.state.status == Status::Running
    }

    pub fn speeds(&self) -> RotationAngles {
        self.state.speeds
    }

    pub fn solid(&self) -> &dyn Solid {
        self.state.solid.as_ref()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.projector.resize(width, height);
    }

    /// Read the speed inputs and begin animating
    ///
    /// Unparseable input leaves status and speeds untouched.
    pub fn start(&mut self, inputs: &ControlInputs) -> Result<()> {
        let speeds = inputs.parse().map_err(|err| {
            warn!(%err, "start rejected");
            err
        })?;
        self.state.speeds = speeds;
        self.state.status = Status::Running;
        debug!(x = speeds.x, y = speeds.y, z = speeds.z, "started");
        Ok(())
    }

    pub fn stop(&mut self) {
        self.state.status = Status::Stopped;
        debug!("stopped");
    }

    /// Discard the current solid and return to the reference torus with
    /// the default speeds, whatever scene the driver was created with
    pub fn reset(&mut self) -> Result<()> {
        self.state = AnimationState::initial(&SceneConfig::default())?;
        debug!(solid = self.state.solid.name(), "reset");
        Ok(())
    }

    /// Advance one frame; returns whether anything happened
    pub fn tick(&mut self, surface: &mut dyn DrawSurface) -> bool {
        if self.state.status != Status::Running {
            return false;
        }

        if let Err(err) = self.state.solid.rotate(&self.state.speeds) {
            warn!(%err, "rotation skipped this tick");
        }
        self.render(surface);
        trace!(solid = self.state.solid.name(), "tick");
        true
    }

    /// Draw the current orientation without rotating
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        surface.clear();
        self.state.solid.draw(&self.projector, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShapeKind;
    use crate::geometry::{Point3D, Torus};
    use crate::surface::FrameRecorder;
    use approx::assert_relative_eq;

    fn small_config() -> SceneConfig {
        SceneConfig {
            segments: 20,
            ..SceneConfig::default()
        }
    }

    fn driver(config: SceneConfig) -> Driver {
        Driver::new(config, 800.0, 600.0).unwrap()
    }

    fn inputs(x: &str, y: &str, z: &str) -> ControlInputs {
        ControlInputs::new(x, y, z)
    }

    #[test]
    fn test_starts_stopped_and_ticks_do_nothing() {
        let mut driver = driver(small_config());
        let mut surface = FrameRecorder::new();
        let before = driver.solid().points().to_vec();

        assert_eq!(driver.status(), Status::Stopped);
        assert!(!driver.tick(&mut surface));
        assert_eq!(driver.solid().points(), before.as_slice());
        assert_eq!(surface.frames(), 0);
    }

    #[test]
    fn test_start_runs_and_ticks_rotate() {
        let mut driver = driver(small_config());
        let mut surface = FrameRecorder::new();
        let before = driver.solid().points().to_vec();

        driver.start(&inputs("0.1", "0", "-0.2")).unwrap();
        assert_eq!(driver.status(), Status::Running);
        assert_eq!(driver.speeds(), RotationAngles::new(0.1, 0.0, -0.2));

        assert!(driver.tick(&mut surface));
        assert_ne!(driver.solid().points(), before.as_slice());
        assert_eq!(surface.frames(), 1);
        assert_eq!(surface.squares(), 400);
    }

    #[test]
    fn test_stop_freezes_points() {
        let mut driver = driver(small_config());
        let mut surface = FrameRecorder::new();

        driver.start(&inputs("0.05", "0.05", "0.05")).unwrap();
        driver.tick(&mut surface);
        driver.stop();
        assert_eq!(driver.status(), Status::Stopped);

        let frozen = driver.solid().points().to_vec();
        for _ in 0..3 {
            assert!(!driver.tick(&mut surface));
        }
        assert_eq!(driver.solid().points(), frozen.as_slice());
    }

    #[test]
    fn test_invalid_input_keeps_state() {
        let mut driver = driver(small_config());

        let err = driver.start(&inputs("0.1", "spin", "0.1")).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidControlInput {
                axis: Axis::Y,
                value: "spin".to_string(),
            }
        );
        assert_eq!(driver.status(), Status::Stopped);
        assert_eq!(driver.speeds(), SceneConfig::default().speeds);

        assert!(driver.start(&inputs("", "0", "0")).is_err());
        assert!(driver.start(&inputs("NaN", "0", "0")).is_err());
        assert!(driver.start(&inputs("0", "0", "inf")).is_err());

        driver.start(&inputs("0.2", "0.2", "0.2")).unwrap();
        assert!(driver.start(&inputs("x", "0", "0")).is_err());
        assert_eq!(driver.status(), Status::Running);
        assert_eq!(driver.speeds(), RotationAngles::new(0.2, 0.2, 0.2));
    }

    #[test]
    fn test_start_while_running_refreshes_speeds() {
        let mut driver = driver(small_config());
        driver.start(&inputs("0.1", "0.1", "0.1")).unwrap();
        driver.start(&inputs(" 0.3 ", "0", "0")).unwrap();
        assert_eq!(driver.status(), Status::Running);
        assert_eq!(driver.speeds(), RotationAngles::new(0.3, 0.0, 0.0));
    }

    #[test]
    fn test_reset_restores_default_torus() {
        let mut driver = driver(SceneConfig::default());
        let mut surface = FrameRecorder::new();

        driver.start(&inputs("0.5", "0.4", "0.3")).unwrap();
        driver.tick(&mut surface);
        driver.reset().unwrap();

        assert_eq!(driver.status(), Status::Stopped);
        assert_eq!(driver.speeds(), RotationAngles::new(0.05, 0.05, 0.05));
        assert_eq!(driver.solid().name(), "torus");
        assert_eq!(driver.solid().center(), Point3D::new(0.0, 0.0, -50.0));

        let fresh = Torus::new(Point3D::new(0.0, 0.0, -50.0), 30.0, 10.0).unwrap();
        assert_eq!(driver.solid().points(), fresh.points());

        driver.reset().unwrap();
        assert_eq!(driver.status(), Status::Stopped);
    }

    #[test]
    fn test_reset_ignores_configured_scene() {
        let config = SceneConfig {
            shape: ShapeKind::Cube,
            segments: 20,
            speeds: RotationAngles::new(0.3, 0.3, 0.3),
            ..SceneConfig::default()
        };
        let mut driver = driver(config);
        let mut surface = FrameRecorder::new();
        assert_eq!(driver.solid().name(), "cube");

        driver.start(&inputs("0.1", "0.1", "0.1")).unwrap();
        driver.tick(&mut surface);
        driver.reset().unwrap();

        assert_eq!(driver.status(), Status::Stopped);
        assert_eq!(driver.solid().name(), "torus");
        assert_eq!(driver.solid().points().len(), 40_000);
        assert_eq!(driver.solid().center(), Point3D::new(0.0, 0.0, -50.0));
        assert_eq!(driver.speeds(), RotationAngles::new(0.05, 0.05, 0.05));
    }

    #[test]
    fn test_ticks_accumulate_rotation() {
        let config = SceneConfig {
            shape: ShapeKind::Cube,
            ..SceneConfig::default()
        };
        let mut stepped = driver(config.clone());
        let mut surface = FrameRecorder::new();
        stepped.start(&inputs("0.1", "0", "0")).unwrap();
        stepped.tick(&mut surface);
        stepped.tick(&mut surface);

        let mut once = config.build_solid().unwrap();
        once.rotate(&RotationAngles::new(0.2, 0.0, 0.0)).unwrap();

        for (a, b) in stepped.solid().points().iter().zip(once.points()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_render_draws_without_rotating() {
        let config = SceneConfig {
            shape: ShapeKind::Cube,
            ..SceneConfig::default()
        };
        let driver = driver(config);
        let mut surface = FrameRecorder::new();
        let before = driver.solid().points().to_vec();

        driver.render(&mut surface);
        assert_eq!(surface.lines(), 12);
        assert_eq!(driver.solid().points(), before.as_slice());
    }

    #[test]
    fn test_inputs_round_trip_from_speeds() {
        let inputs = ControlInputs::from(RotationAngles::new(0.05, -1.5, 0.0));
        assert_eq!(inputs, ControlInputs::new("0.05", "-1.5", "0"));
        assert_eq!(inputs.parse().unwrap(), RotationAngles::new(0.05, -1.5, 0.0));
        assert_eq!(Status::Running.to_string(), "Running");
    }
}
