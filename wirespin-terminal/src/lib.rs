/// Terminal front end: keyboard controls, frame clock and status line
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use wirespin_core::{Axis, ControlInputs, Driver, FrameRecorder, SceneConfig, Solid, Status};

pub mod renderer;

pub use renderer::TerminalSurface;

/// Rows reserved at the top of the screen for the status overlay
const OVERLAY_ROWS: u16 = 2;

/// Convert a core error into an I/O error for the terminal loop
pub fn to_io_error(err: wirespin_core::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
}

/// Default log filter for a `-v` count
///
/// Logging is switched off when it would be written over the live UI.
pub fn log_level(verbose: u8, over_ui: bool) -> &'static str {
    if over_ui {
        return "off";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Run the animation without a terminal, recording the final frame
///
/// The viewport is `width x height` pixels.
pub fn run_headless(
    config: SceneConfig,
    inputs: &ControlInputs,
    frames: usize,
    width: f64,
    height: f64,
) -> wirespin_core::Result<(Driver, FrameRecorder)> {
    let mut driver = Driver::new(config, width, height)?;
    let mut recorder = FrameRecorder::new();

    driver.start(inputs)?;
    for _ in 0..frames {
        driver.tick(&mut recorder);
    }
    driver.stop();

    Ok((driver, recorder))
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    driver: Driver,
    surface: TerminalSurface,
    inputs: ControlInputs,
    focus: Axis,
    message: Option<String>,
    frame_time: Duration,
    quit: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: SceneConfig, inputs: ControlInputs, target_fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let surface = TerminalSurface::new(width as usize, height.saturating_sub(OVERLAY_ROWS) as usize);
        let (pixel_width, pixel_height) = surface.pixel_size();
        let driver = Driver::new(config, pixel_width, pixel_height).map_err(to_io_error)?;

        Ok(Self {
            driver,
            inputs,
            surface,
            focus: Axis::X,
            message: None,
            frame_time: Duration::from_secs(1) / target_fps.max(1),
            quit: false,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.driver.render(&mut self.surface);

        while !self.quit {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // One tick per frame; stopped ticks leave the last frame on screen
            self.driver.tick(&mut self.surface);

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => {
                self.surface
                    .resize(width as usize, height.saturating_sub(OVERLAY_ROWS) as usize);
                let (pixel_width, pixel_height) = self.surface.pixel_size();
                self.driver.resize(pixel_width, pixel_height);
                self.driver.render(&mut self.surface);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit = true;
            }
            KeyCode::Enter => match self.driver.start(&self.inputs) {
                Ok(()) => {
                    info!("animation started");
                    self.message = None;
                }
                // Already logged by the driver; the status line shows it
                Err(err) => self.message = Some(err.to_string()),
            },
            KeyCode::Char(' ') => {
                self.driver.stop();
            }
            KeyCode::Char('r') => {
                if let Err(err) = self.driver.reset() {
                    warn!(%err, "reset failed");
                    self.message = Some(err.to_string());
                    return;
                }
                self.inputs = ControlInputs::from(self.driver.speeds());
                self.message = None;
                self.driver.render(&mut self.surface);
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Axis::X => Axis::Y,
                    Axis::Y => Axis::Z,
                    Axis::Z => Axis::X,
                };
            }
            KeyCode::Backspace => {
                self.inputs.field_mut(self.focus).pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e') => {
                self.inputs.field_mut(self.focus).push(c);
            }
            _ => {}
        }
    }

    fn field_label(&self, axis: Axis) -> String {
        let value = match axis {
            Axis::X => &self.inputs.x,
            Axis::Y => &self.inputs.y,
            Axis::Z => &self.inputs.z,
        };
        if axis == self.focus {
            format!("{axis}:[{value}]")
        } else {
            format!("{axis}: {value} ")
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, OVERLAY_ROWS))?;

        self.surface.draw(&mut stdout)?;

        // Draw UI overlay
        let status_color = match self.driver.status() {
            Status::Running => Color::Green,
            Status::Stopped => Color::Yellow,
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(status_color),
            Print(format!("Status: {}", self.driver.status())),
            ResetColor,
            Print(format!(
                " | {} {} {} | {} | FPS: {:.1}",
                self.field_label(Axis::X),
                self.field_label(Axis::Y),
                self.field_label(Axis::Z),
                self.driver.solid().name(),
                self.fps
            )),
            cursor::MoveTo(0, 1),
            terminal::Clear(ClearType::CurrentLine),
        )?;

        match &self.message {
            Some(message) => queue!(
                stdout,
                SetForegroundColor(Color::Red),
                Print(message),
                ResetColor
            )?,
            None => queue!(
                stdout,
                SetForegroundColor(Color::DarkGrey),
                Print("Enter=Start Space=Stop R=Reset Tab=Next field Q=Quit"),
                ResetColor
            )?,
        }

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirespin_core::ShapeKind;

    #[test]
    fn test_headless_cube_records_last_frame() {
        let config = SceneConfig {
            shape: ShapeKind::Cube,
            ..SceneConfig::default()
        };
        let inputs = ControlInputs::new("0.05", "0.05", "0.05");
        let (driver, recorder) = run_headless(config, &inputs, 5, 160.0, 96.0).unwrap();

        assert_eq!(driver.status(), Status::Stopped);
        assert_eq!(recorder.frames(), 5);
        assert_eq!(recorder.lines(), 12);
    }

    #[test]
    fn test_log_level_stays_off_over_the_ui() {
        assert_eq!(log_level(0, false), "warn");
        assert_eq!(log_level(2, false), "debug");
        assert_eq!(log_level(9, false), "trace");
        assert_eq!(log_level(0, true), "off");
        assert_eq!(log_level(3, true), "off");
    }

    #[test]
    fn test_headless_rejects_bad_speed() {
        let inputs = ControlInputs::new("0.05", "abc", "0.05");
        let err = run_headless(SceneConfig::default(), &inputs, 1, 160.0, 96.0).unwrap_err();
        assert!(matches!(err, wirespin_core::Error::InvalidControlInput { axis: Axis::Y, .. }));
        assert_eq!(to_io_error(err).kind(), io::ErrorKind::InvalidInput);
    }
}
