//! The pattern widget: one grid, one surface, one completion callback.

use kurbo::Size;
use patternlock_core::{compute_layout, GestureTracker, GridConfig, PatternCode, PointerEvent};
use patternlock_render::{render, DrawSurface, RenderContext, RenderStyle};

/// Called once per completed, non-empty gesture.
pub type CompletionCallback = Box<dyn FnMut(&PatternCode)>;

/// A mounted pattern lock.
///
/// Owns all of its state; two widgets on the same page share nothing.
pub struct PatternWidget<S: DrawSurface> {
    config: GridConfig,
    style: RenderStyle,
    tracker: GestureTracker,
    surface: S,
    on_complete: CompletionCallback,
}

impl<S: DrawSurface> PatternWidget<S> {
    /// Lay out the grid for `viewport`, size the surface and draw the idle grid.
    pub fn new<F>(config: GridConfig, viewport: Size, mut surface: S, on_complete: F) -> Self
    where
        F: FnMut(&PatternCode) + 'static,
    {
        let layout = compute_layout(&config, viewport);
        if let Err(e) = surface.set_size(layout.canvas_size) {
            log::error!("Failed to size pattern surface: {}", e);
        }

        let mut widget = Self {
            config,
            style: RenderStyle::default(),
            tracker: GestureTracker::new(layout),
            surface,
            on_complete: Box::new(on_complete),
        };
        widget.redraw();
        widget
    }

    /// Replace the drawing style and redraw.
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self.redraw();
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Apply one pointer event.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => {
                self.tracker.pointer_down(position);
                self.redraw();
            }
            PointerEvent::Move { position } => {
                if self.tracker.pointer_move(position) {
                    self.redraw();
                }
            }
            PointerEvent::Up => self.finish_gesture(),
            PointerEvent::Cancel => {
                if self.tracker.cancel() {
                    log::debug!("Gesture cancelled");
                    self.redraw();
                }
            }
        }
    }

    /// Recompute the layout for a new viewport. Discards any gesture in flight.
    pub fn resize(&mut self, viewport: Size) {
        let layout = compute_layout(&self.config, viewport);
        if let Err(e) = self.surface.set_size(layout.canvas_size) {
            log::error!("Failed to resize pattern surface: {}", e);
        }
        self.tracker.relayout(layout);
        self.redraw();
    }

    /// Draw the current state.
    pub fn redraw(&mut self) {
        let ctx = RenderContext::from_tracker(&self.tracker).with_style(self.style);
        if let Err(e) = render(&mut self.surface, &ctx) {
            log::error!("Failed to draw pattern: {}", e);
        }
    }

    fn finish_gesture(&mut self) {
        let code = self.tracker.pointer_up();
        self.redraw();
        if let Some(code) = code {
            log::debug!("Pattern completed with {} node(s)", code.len());
            (self.on_complete)(&code);
        }
    }
}
