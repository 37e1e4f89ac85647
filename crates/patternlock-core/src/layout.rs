//! Grid geometry: canvas size, radii and node centers.

use crate::config::GridConfig;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// One selectable point of the pattern grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Row-major index; this is the digit the node contributes to a code.
    pub index: usize,
    /// Center in canvas pixels.
    pub center: Point,
    /// Whether the node has been captured by the current gesture.
    pub selected: bool,
}

impl Node {
    /// Create an unselected node.
    pub fn new(index: usize, center: Point) -> Self {
        Self {
            index,
            center,
            selected: false,
        }
    }

    /// Whether `point` lies within `radius` of the center (inclusive).
    pub fn contains(&self, point: Point, radius: f64) -> bool {
        self.center.distance(point) <= radius
    }
}

/// Pixel geometry computed from a [`GridConfig`] and the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
    /// Radius of the outer ring drawn around selected nodes.
    pub circle_radius: f64,
    /// Radius of the marker dot drawn for every node.
    pub marker_radius: f64,
    /// Spacing reserved around each circle.
    pub margin: f64,
    /// Nodes in row-major order; `nodes[i].index == i`.
    pub nodes: Vec<Node>,
    /// Size the drawing surface must have.
    pub canvas_size: Size,
}

impl GridLayout {
    /// Half the side of one grid cell.
    pub fn cell_radius(&self) -> f64 {
        self.circle_radius + self.margin
    }

    /// Node at the given column and row.
    pub fn node_at(&self, column: u32, row: u32) -> Option<&Node> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.nodes.get((row * self.columns + column) as usize)
    }

    /// Clear the `selected` flag on every node.
    pub fn deselect_all(&mut self) {
        for node in &mut self.nodes {
            node.selected = false;
        }
    }
}

/// Compute the grid geometry for `config` inside `viewport`.
///
/// All lengths are whole pixels so neighbouring circles never meet on a
/// sub-pixel seam. Radii are at least one pixel even for degenerate
/// viewports.
pub fn compute_layout(config: &GridConfig, viewport: Size) -> GridLayout {
    let size = config.target_size().to_pixels(viewport);
    let columns = f64::from(config.columns());
    let rows = f64::from(config.rows());

    let radius = (size / columns / 2.0)
        .min(size / rows / 2.0)
        .floor()
        .max(1.0);
    let canvas_size = Size::new(columns * radius * 2.0, rows * radius * 2.0);

    let margin = (radius * config.margin_ratio()).floor();
    let circle_radius = radius - margin;
    let marker_radius = (circle_radius * config.marker_ratio()).floor().max(1.0);

    let cell = (circle_radius + margin) * 2.0;
    let offset = circle_radius + margin;
    let mut nodes = Vec::with_capacity(config.node_count());
    for row in 0..config.rows() {
        for column in 0..config.columns() {
            let center = Point::new(
                f64::from(column) * cell + offset,
                f64::from(row) * cell + offset,
            );
            nodes.push(Node::new(nodes.len(), center));
        }
    }

    log::debug!(
        "Layout {}x{} in {}x{}: radius {}, marker {}, margin {}",
        config.columns(),
        config.rows(),
        viewport.width,
        viewport.height,
        circle_radius,
        marker_radius,
        margin
    );

    GridLayout {
        columns: config.columns(),
        rows: config.rows(),
        circle_radius,
        marker_radius,
        margin,
        nodes,
        canvas_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SizeSpec, SizeUnit, DEFAULT_MARGIN_RATIO, DEFAULT_MARKER_RATIO};

    fn px_config(columns: u32, rows: u32, pixels: f64) -> GridConfig {
        GridConfig::new(
            columns,
            rows,
            SizeSpec::new(pixels, SizeUnit::Px),
            DEFAULT_MARGIN_RATIO,
            DEFAULT_MARKER_RATIO,
        )
        .unwrap()
    }

    #[test]
    fn test_square_grid_geometry() {
        let layout = compute_layout(&px_config(3, 3, 300.0), Size::new(1024.0, 768.0));

        assert_eq!(layout.canvas_size, Size::new(300.0, 300.0));
        assert!((layout.margin - 10.0).abs() < f64::EPSILON);
        assert!((layout.circle_radius - 40.0).abs() < f64::EPSILON);
        assert!((layout.marker_radius - 10.0).abs() < f64::EPSILON);
        assert_eq!(layout.nodes.len(), 9);
        assert_eq!(layout.nodes[0].center, Point::new(50.0, 50.0));
        assert_eq!(layout.nodes[4].center, Point::new(150.0, 150.0));
        assert_eq!(layout.nodes[8].center, Point::new(250.0, 250.0));
    }

    #[test]
    fn test_row_major_indices() {
        let layout = compute_layout(&px_config(3, 3, 300.0), Size::new(1024.0, 768.0));

        let top_left = layout.node_at(0, 0).unwrap();
        let top_right = layout.node_at(2, 0).unwrap();
        let bottom_left = layout.node_at(0, 2).unwrap();
        let bottom_right = layout.node_at(2, 2).unwrap();

        assert_eq!(top_left.index, 0);
        assert_eq!(top_right.index, 2);
        assert_eq!(bottom_left.index, 6);
        assert_eq!(bottom_right.index, 8);
        assert!(top_right.center.x > top_left.center.x);
        assert!(bottom_left.center.y > top_left.center.y);
        assert!(layout.node_at(3, 0).is_none());
        assert!(layout.nodes.iter().enumerate().all(|(i, n)| n.index == i));
    }

    #[test]
    fn test_rectangular_grid_uses_smaller_radius() {
        let layout = compute_layout(&px_config(4, 2, 400.0), Size::new(1024.0, 768.0));
        assert_eq!(layout.canvas_size, Size::new(400.0, 200.0));
        assert_eq!(layout.nodes.len(), 8);
        assert_eq!(layout.nodes[7].center, Point::new(350.0, 150.0));
    }

    #[test]
    fn test_radius_is_floored() {
        // 100 / 3 / 2 = 16.67
        let layout = compute_layout(&px_config(3, 3, 100.0), Size::new(1024.0, 768.0));
        assert_eq!(layout.canvas_size, Size::new(96.0, 96.0));
        assert!((layout.margin - 3.0).abs() < f64::EPSILON);
        assert!((layout.circle_radius - 13.0).abs() < f64::EPSILON);
        assert!((layout.marker_radius - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_viewport_relative_size() {
        let config = GridConfig::default(); // 100vmin
        let layout = compute_layout(&config, Size::new(900.0, 600.0));
        assert_eq!(layout.canvas_size, Size::new(600.0, 600.0));
    }

    #[test]
    fn test_degenerate_sizes_keep_positive_radii() {
        for (columns, rows, pixels) in [(3, 3, 1.0), (9, 1, 5.0), (1, 1, 0.5)] {
            let layout = compute_layout(&px_config(columns, rows, pixels), Size::new(10.0, 10.0));
            assert!(layout.circle_radius >= 1.0);
            assert!(layout.marker_radius >= 1.0);
        }
    }

    #[test]
    fn test_radii_positive_and_centers_inside_canvas() {
        let viewports = [Size::new(320.0, 568.0), Size::new(1920.0, 1080.0), Size::new(50.0, 50.0)];
        for columns in 1..=6 {
            for rows in 1..=6 {
                for viewport in viewports {
                    let config = GridConfig::with_dimensions(columns, rows).unwrap();
                    let layout = compute_layout(&config, viewport);

                    assert!(layout.circle_radius > 0.0);
                    assert!(layout.marker_radius > 0.0);
                    assert_eq!(layout.circle_radius.fract(), 0.0);
                    assert_eq!(layout.marker_radius.fract(), 0.0);

                    let reach = layout.cell_radius();
                    for node in &layout.nodes {
                        assert!(node.center.x >= reach);
                        assert!(node.center.y >= reach);
                        assert!(node.center.x <= layout.canvas_size.width - reach);
                        assert!(node.center.y <= layout.canvas_size.height - reach);
                    }
                }
            }
        }
    }

    #[test]
    fn test_node_contains() {
        let node = Node::new(0, Point::new(10.0, 10.0));
        assert!(node.contains(Point::new(10.0, 10.0), 0.0));
        assert!(node.contains(Point::new(13.0, 14.0), 5.0));
        assert!(!node.contains(Point::new(14.0, 14.0), 5.0));
    }
}
