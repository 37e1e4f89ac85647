//! The drawing capability the renderer needs from a platform.

use kurbo::{Circle, Point, Size};
use peniko::Color;
use thiserror::Error;

/// Errors reported by a drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface unavailable: {0}")]
    Unavailable(String),
    #[error("Draw call failed: {0}")]
    DrawFailed(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Minimal immediate-mode drawing interface.
///
/// Implemented by the browser canvas and by [`crate::RecordingSurface`].
pub trait DrawSurface {
    /// Resize the backing store. Implementations may clear on resize.
    fn set_size(&mut self, size: Size) -> SurfaceResult<()>;

    /// Current size of the surface.
    fn size(&self) -> Size;

    /// Erase the whole surface.
    fn clear(&mut self) -> SurfaceResult<()>;

    /// Stroke the outline of a circle.
    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) -> SurfaceResult<()>;

    /// Fill a circle.
    fn fill_circle(&mut self, circle: Circle, color: Color) -> SurfaceResult<()>;

    /// Stroke an open polyline through `points`.
    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f64) -> SurfaceResult<()>;
}
