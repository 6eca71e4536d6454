/// Drawing surface contract and an in-memory recorder
use crate::projection::ScreenPoint;

/// A 2D target accepting the draw calls issued by solids
pub trait DrawSurface {
    /// Wipe the previous frame
    fn clear(&mut self);

    /// Plot a filled square of `size` pixels with its corner at `at`
    fn fill_square(&mut self, at: ScreenPoint, size: f64);

    /// Stroke a line segment between two screen points
    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint);
}

/// A recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Square { at: ScreenPoint, size: f64 },
    Line { from: ScreenPoint, to: ScreenPoint },
}

/// Surface that keeps the draw calls of the current frame
#[derive(Debug, Default)]
pub struct FrameRecorder {
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started (calls to `clear`)
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn squares(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Square { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl DrawSurface for FrameRecorder {
    fn clear(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn fill_square(&mut self, at: ScreenPoint, size: f64) {
        self.commands.push(DrawCommand::Square { at, size });
    }

    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint) {
        self.commands.push(DrawCommand::Line { from, to });
    }
}
