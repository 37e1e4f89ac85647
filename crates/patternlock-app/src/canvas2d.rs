//! `DrawSurface` backed by an HTML canvas 2d context.

use kurbo::{Circle, Point, Size};
use patternlock_render::{DrawSurface, SurfaceError, SurfaceResult};
use peniko::Color;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A canvas element and its 2d context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2d context of `canvas`.
    pub fn new(canvas: HtmlCanvasElement) -> SurfaceResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| SurfaceError::Unavailable("2d context not supported".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Unavailable("unexpected context type".to_string()))?;
        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn trace_circle(&self, circle: Circle) -> SurfaceResult<()> {
        self.context.begin_path();
        self.context
            .arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU)
            .map_err(draw_failed)
    }
}

fn draw_failed(e: JsValue) -> SurfaceError {
    SurfaceError::DrawFailed(format!("{:?}", e))
}

/// CSS `rgba()` string for a color.
fn css_color(color: Color) -> String {
    let [r, g, b, a] = color.components;
    format!("rgba({}, {}, {}, {})", channel(r), channel(g), channel(b), a.clamp(0.0, 1.0))
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl DrawSurface for CanvasSurface {
    fn set_size(&mut self, size: Size) -> SurfaceResult<()> {
        // Setting the backing store size also clears the canvas.
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
        Ok(())
    }

    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn clear(&mut self) -> SurfaceResult<()> {
        let size = self.size();
        self.context.clear_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) -> SurfaceResult<()> {
        self.context.set_stroke_style_str(&css_color(color));
        self.context.set_line_width(width);
        self.trace_circle(circle)?;
        self.context.stroke();
        Ok(())
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) -> SurfaceResult<()> {
        self.context.set_fill_style_str(&css_color(color));
        self.trace_circle(circle)?;
        self.context.fill();
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f64) -> SurfaceResult<()> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.context.set_stroke_style_str(&css_color(color));
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(first.x, first.y);
        for point in rest {
            self.context.line_to(point.x, point.y);
        }
        self.context.stroke();
        Ok(())
    }
}
