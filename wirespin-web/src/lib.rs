/// Wirespin Web - WASM canvas front end
///
/// Wraps a `<canvas>` 2D context as the drawing surface. The page owns the
/// frame clock and calls `tick()` (for example from `requestAnimationFrame`).

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wirespin_core::{
    ControlInputs, DrawSurface, Driver, RotationAngles, SceneConfig, ScreenPoint, ShapeKind,
};

/// Canvas 2D context adapter
struct CanvasSurface {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self) {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_square(&mut self, at: ScreenPoint, size: f64) {
        self.context.fill_rect(at.x, at.y, size, size);
    }

    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint) {
        self.context.begin_path();
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
    }
}

/// `NaN` for anything but 0, 1 or 2
fn axis_speed(speeds: RotationAngles, axis: u8) -> f64 {
    match axis {
        0 => speeds.x,
        1 => speeds.y,
        2 => speeds.z,
        _ => f64::NAN,
    }
}

fn to_js(err: wirespin_core::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebRenderer {
    driver: Driver,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas with the given element id
    ///
    /// `shape` is one of `torus`, `cube` or `cone`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, shape: &str) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
            .dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;
        context.set_fill_style(&JsValue::from_str("white"));
        context.set_stroke_style(&JsValue::from_str("white"));

        let (width, height) = (canvas.width() as f64, canvas.height() as f64);
        let config = SceneConfig {
            shape: shape.parse::<ShapeKind>().map_err(to_js)?,
            ..SceneConfig::default()
        };
        let driver = Driver::new(config, width, height).map_err(to_js)?;

        Ok(WebRenderer {
            driver,
            surface: CanvasSurface {
                context,
                width,
                height,
            },
        })
    }

    /// Start with the raw text of the three speed inputs
    pub fn start(&mut self, x: &str, y: &str, z: &str) -> Result<(), JsValue> {
        self.driver
            .start(&ControlInputs::new(x, y, z))
            .map_err(to_js)
    }

    pub fn stop(&mut self) {
        self.driver.stop();
    }

    /// Back to the default solid and speeds, drawn once
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.driver.reset().map_err(to_js)?;
        self.driver.render(&mut self.surface);
        Ok(())
    }

    /// Render a frame; returns false once stopped
    pub fn tick(&mut self) -> bool {
        self.driver.tick(&mut self.surface)
    }

    /// "Running" or "Stopped"
    pub fn status(&self) -> String {
        self.driver.status().to_string()
    }

    /// Current speed for axis 0, 1 or 2; after `reset` these are the defaults
    pub fn speed(&self, axis: u8) -> f64 {
        axis_speed(self.driver.speeds(), axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_speed_rejects_unknown_axis() {
        let speeds = RotationAngles::new(0.1, 0.2, 0.3);
        assert_eq!(axis_speed(speeds, 0), 0.1);
        assert_eq!(axis_speed(speeds, 1), 0.2);
        assert_eq!(axis_speed(speeds, 2), 0.3);
        assert!(axis_speed(speeds, 3).is_nan());
        assert!(axis_speed(speeds, u8::MAX).is_nan());
    }
}
