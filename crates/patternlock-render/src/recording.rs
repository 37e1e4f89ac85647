//! A surface that records draw calls instead of painting pixels.

use crate::surface::{DrawSurface, SurfaceResult};
use kurbo::{Circle, Point, Size};
use peniko::Color;

/// One recorded draw call.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Resize(Size),
    Clear,
    StrokeCircle {
        circle: Circle,
        color: Color,
        width: f64,
    },
    FillCircle {
        circle: Circle,
        color: Color,
    },
    StrokePolyline {
        points: Vec<Point>,
        color: Color,
        width: f64,
    },
}

/// Records the commands of the most recent frame.
///
/// [`DrawSurface::clear`] starts a new frame, so `commands()` always reflects
/// what is currently "on screen".
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingSurface {
    /// Create an empty surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Commands since the last clear (including the clear itself).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames drawn, i.e. number of clears.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Number of filled circles in the current frame.
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }

    /// Points of every polyline in the current frame.
    pub fn polylines(&self) -> Vec<Vec<Point>> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokePolyline { points, .. } => Some(points.clone()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn set_size(&mut self, size: Size) -> SurfaceResult<()> {
        self.size = size;
        self.commands.push(DrawCommand::Resize(size));
        Ok(())
    }

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) -> SurfaceResult<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
        Ok(())
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) -> SurfaceResult<()> {
        self.commands.push(DrawCommand::StrokeCircle {
            circle,
            color,
            width,
        });
        Ok(())
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) -> SurfaceResult<()> {
        self.commands.push(DrawCommand::FillCircle { circle, color });
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f64) -> SurfaceResult<()> {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            color,
            width,
        });
        Ok(())
    }
}
