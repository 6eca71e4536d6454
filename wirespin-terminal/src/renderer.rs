/// Character-cell drawing surface for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wirespin_core::{DrawSurface, ScreenPoint};

/// Terminal cells are roughly twice as tall as they are wide, so each cell
/// covers one pixel horizontally and two vertically.
const PIXELS_PER_ROW: f64 = 2.0;

const EMPTY: char = ' ';
const POINT: char = '@';
const EDGE: char = '*';

/// Surface that rasterizes squares and lines into a grid of characters
pub struct TerminalSurface {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl TerminalSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![EMPTY; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Viewport size in pixels, for the projector
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64 * PIXELS_PER_ROW)
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.width && row < self.height).then(|| self.char_buffer[row * self.width + col])
    }

    fn plot(&mut self, x: f64, y: f64, character: char) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let col = x as usize;
        let row = (y / PIXELS_PER_ROW) as usize;
        if col >= self.width || row >= self.height {
            return;
        }

        let idx = row * self.width + col;
        // Points stay visible under the edges drawn through them
        if character == EDGE && self.char_buffer[idx] == POINT {
            return;
        }
        self.char_buffer[idx] = character;
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    POINT => Color::Cyan,
                    EDGE => Color::White,
                    _ => Color::DarkGrey,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for TerminalSurface {
    fn clear(&mut self) {
        self.char_buffer.fill(EMPTY);
    }

    fn fill_square(&mut self, at: ScreenPoint, size: f64) {
        let steps = size.max(1.0).ceil() as usize;
        for dy in 0..steps {
            for dx in 0..steps {
                self.plot(at.x + dx as f64, at.y + dy as f64, POINT);
            }
        }
    }

    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint) {
        let (w, h) = self.pixel_size();
        let Some(((x0, y0), (x1, y1))) = clip_segment((from.x, from.y), (to.x, to.y), w, h) else {
            return;
        };

        // DDA: one sample per pixel along the longer axis
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let (i, n) = (i as f64, steps as f64);
            self.plot(x0 + (x1 - x0) * i / n, y0 + (y1 - y0) * i / n, EDGE);
        }
    }
}

/// Liang-Barsky clip of a segment against `[0, width] x [0, height]`
fn clip_segment(
    p0: (f64, f64),
    p1: (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, p0.0),
        (dx, width - p0.0),
        (-dy, p0.1),
        (dy, height - p0.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}
