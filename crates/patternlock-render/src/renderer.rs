//! Grid and selection path rendering.

use crate::surface::{DrawSurface, SurfaceError};
use kurbo::{Circle, Point};
use patternlock_core::{GestureTracker, Node};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
    #[error("Selection refers to unknown node {0}")]
    UnknownNode(usize),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Colors and stroke width used when drawing.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    /// Outer ring around selected nodes.
    pub highlight_color: Color,
    /// Outline of unselected markers.
    pub marker_color: Color,
    /// Fill of selected markers.
    pub marker_fill_color: Color,
    /// Path connecting the selection.
    pub path_color: Color,
    pub line_width: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            highlight_color: Color::from_rgba8(0, 255, 0, 255),
            marker_color: Color::from_rgba8(0, 0, 0, 255),
            marker_fill_color: Color::from_rgba8(255, 0, 0, 255),
            path_color: Color::from_rgba8(0, 0, 0, 255),
            line_width: 1.0,
        }
    }
}

/// Everything needed to draw one frame.
pub struct RenderContext<'a> {
    /// Grid nodes, in index order.
    pub nodes: &'a [Node],
    /// Radius of the ring drawn around selected nodes.
    pub circle_radius: f64,
    /// Radius of the marker dot.
    pub marker_radius: f64,
    /// Selected node indices in selection order.
    pub selection_order: &'a [usize],
    /// Live pointer position; only present while a gesture is active.
    pub cursor: Option<Point>,
    pub style: RenderStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a context with no selection.
    pub fn new(nodes: &'a [Node], circle_radius: f64, marker_radius: f64) -> Self {
        Self {
            nodes,
            circle_radius,
            marker_radius,
            selection_order: &[],
            cursor: None,
            style: RenderStyle::default(),
        }
    }

    /// Snapshot the current layout and gesture of a tracker.
    pub fn from_tracker(tracker: &'a GestureTracker) -> Self {
        let layout = tracker.layout();
        let state = tracker.state();
        Self::new(&layout.nodes, layout.circle_radius, layout.marker_radius)
            .with_selection(state.selection_order())
            .with_cursor(state.cursor())
    }

    /// Set the selection order.
    pub fn with_selection(mut self, selection_order: &'a [usize]) -> Self {
        self.selection_order = selection_order;
        self
    }

    /// Set the live cursor position.
    pub fn with_cursor(mut self, cursor: Option<Point>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Set the drawing style.
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }
}

/// Draw a full frame. The surface is cleared first; nothing is diffed.
pub fn render<S: DrawSurface + ?Sized>(surface: &mut S, ctx: &RenderContext) -> RenderResult<()> {
    let style = &ctx.style;
    surface.clear()?;

    for node in ctx.nodes {
        let marker = Circle::new(node.center, ctx.marker_radius);
        if node.selected {
            surface.stroke_circle(
                Circle::new(node.center, ctx.circle_radius),
                style.highlight_color,
                style.line_width,
            )?;
            surface.fill_circle(marker, style.marker_fill_color)?;
        } else {
            surface.stroke_circle(marker, style.marker_color, style.line_width)?;
        }
    }

    if ctx.selection_order.is_empty() {
        return Ok(());
    }

    let mut points = ctx
        .selection_order
        .iter()
        .map(|&index| {
            ctx.nodes
                .get(index)
                .map(|node| node.center)
                .ok_or(RendererError::UnknownNode(index))
        })
        .collect::<RenderResult<Vec<_>>>()?;
    if let Some(cursor) = ctx.cursor {
        points.push(cursor);
    }
    surface.stroke_polyline(&points, style.path_color, style.line_width)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use kurbo::Size;
    use patternlock_core::{compute_layout, GridConfig, SizeSpec, SizeUnit};

    fn nodes() -> Vec<Node> {
        vec![
            Node::new(0, Point::new(10.0, 10.0)),
            Node::new(1, Point::new(30.0, 10.0)),
            Node::new(2, Point::new(50.0, 10.0)),
        ]
    }

    fn same_color(a: Color, b: Color) -> bool {
        a.components == b.components
    }

    #[test]
    fn test_idle_grid_draws_outlined_markers() {
        let nodes = nodes();
        let mut surface = RecordingSurface::new(Size::new(60.0, 20.0));
        render(&mut surface, &RenderContext::new(&nodes, 8.0, 2.0)).unwrap();

        let frame = surface.commands();
        assert!(matches!(frame[0], DrawCommand::Clear));
        assert_eq!(frame.len(), 4);
        for (command, node) in frame[1..].iter().zip(&nodes) {
            match command {
                DrawCommand::StrokeCircle { circle, color, .. } => {
                    assert_eq!(circle.center, node.center);
                    assert!((circle.radius - 2.0).abs() < f64::EPSILON);
                    assert!(same_color(*color, RenderStyle::default().marker_color));
                }
                other => panic!("unexpected command {:?}", other),
            }
        }
    }

    #[test]
    fn test_selected_node_gets_ring_and_fill() {
        let mut nodes = nodes();
        nodes[1].selected = true;
        let mut surface = RecordingSurface::new(Size::new(60.0, 20.0));
        let ctx = RenderContext::new(&nodes, 8.0, 2.0).with_selection(&[1]);
        render(&mut surface, &ctx).unwrap();

        let style = RenderStyle::default();
        let ring = surface.commands().iter().find_map(|c| match c {
            DrawCommand::StrokeCircle { circle, color, .. } if (circle.radius - 8.0).abs() < f64::EPSILON => {
                Some((circle.center, *color))
            }
            _ => None,
        });
        let (center, color) = ring.unwrap();
        assert_eq!(center, Point::new(30.0, 10.0));
        assert!(same_color(color, style.highlight_color));

        assert_eq!(surface.fill_count(), 1);
        // A lone selected node still produces a (single point) path.
        assert_eq!(surface.polylines(), vec![vec![Point::new(30.0, 10.0)]]);
    }

    #[test]
    fn test_path_follows_selection_order_and_cursor() {
        let mut nodes = nodes();
        nodes[0].selected = true;
        nodes[2].selected = true;
        let mut surface = RecordingSurface::new(Size::new(60.0, 20.0));
        let ctx = RenderContext::new(&nodes, 8.0, 2.0)
            .with_selection(&[2, 0])
            .with_cursor(Some(Point::new(22.0, 17.0)));
        render(&mut surface, &ctx).unwrap();

        assert_eq!(
            surface.polylines(),
            vec![vec![
                Point::new(50.0, 10.0),
                Point::new(10.0, 10.0),
                Point::new(22.0, 17.0),
            ]]
        );
    }

    #[test]
    fn test_no_path_without_selection() {
        let nodes = nodes();
        let mut surface = RecordingSurface::new(Size::new(60.0, 20.0));
        let ctx = RenderContext::new(&nodes, 8.0, 2.0).with_cursor(Some(Point::new(5.0, 5.0)));
        render(&mut surface, &ctx).unwrap();
        assert!(surface.polylines().is_empty());
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let nodes = nodes();
        let mut surface = RecordingSurface::new(Size::new(60.0, 20.0));
        let ctx = RenderContext::new(&nodes, 8.0, 2.0).with_selection(&[7]);
        assert!(matches!(
            render(&mut surface, &ctx),
            Err(RendererError::UnknownNode(7))
        ));
    }

    #[test]
    fn test_from_tracker() {
        let config = GridConfig::new(3, 3, SizeSpec::new(300.0, SizeUnit::Px), 0.2, 0.25).unwrap();
        let mut tracker = GestureTracker::new(compute_layout(&config, Size::new(800.0, 600.0)));
        tracker.pointer_down(Point::new(50.0, 50.0));
        tracker.pointer_move(Point::new(120.0, 60.0));

        let ctx = RenderContext::from_tracker(&tracker);
        assert_eq!(ctx.nodes.len(), 9);
        assert_eq!(ctx.selection_order, &[0]);
        assert_eq!(ctx.cursor, Some(Point::new(120.0, 60.0)));
        assert!((ctx.circle_radius - 40.0).abs() < f64::EPSILON);
        assert!((ctx.marker_radius - 10.0).abs() < f64::EPSILON);
    }
}
