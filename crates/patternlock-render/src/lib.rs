//! Pattern Lock Render Library
//!
//! Drawing surface abstraction and the renderer that paints the grid and the
//! selection path onto it. A recording surface is provided for tests and
//! headless use.

mod recording;
mod renderer;
mod surface;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{render, RenderContext, RenderResult, RenderStyle, RendererError};
pub use surface::{DrawSurface, SurfaceError, SurfaceResult};
