//! Gesture tracking: turns pointer input into an ordered node selection.

use crate::layout::GridLayout;
use kurbo::Point;
use std::fmt;

/// Hit radius as a multiple of the marker radius.
///
/// Larger than the visible marker so fingers don't have to be precise.
pub const HIT_RADIUS_FACTOR: f64 = 3.0;

/// Drag state of the gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureState {
    active: bool,
    selection_order: Vec<usize>,
    cursor: Option<Point>,
}

impl GestureState {
    /// Whether a pointer is currently down.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Captured node indices in capture order.
    pub fn selection_order(&self) -> &[usize] {
        &self.selection_order
    }

    /// Last pointer position while active.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }
}

/// The result of one completed gesture.
///
/// Displayed as the decimal indices concatenated without separator, so the
/// path 0 → 4 → 8 becomes `"048"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternCode(Vec<usize>);

impl PatternCode {
    /// Node indices in selection order.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for PatternCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in &self.0 {
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

/// Owns the grid nodes and the gesture state, and applies pointer input.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    layout: GridLayout,
    state: GestureState,
}

impl GestureTracker {
    /// Create a tracker for a freshly computed layout.
    pub fn new(mut layout: GridLayout) -> Self {
        layout.deselect_all();
        Self {
            layout,
            state: GestureState::default(),
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Capture tolerance around each node center.
    pub fn hit_radius(&self) -> f64 {
        self.layout.marker_radius * HIT_RADIUS_FACTOR
    }

    /// Start (or continue) a gesture at `point`.
    ///
    /// Returns the number of nodes newly captured; several can be captured at
    /// once when their hit areas overlap.
    pub fn pointer_down(&mut self, point: Point) -> usize {
        self.state.active = true;
        self.state.cursor = Some(point);
        self.capture(point)
    }

    /// Follow the pointer. Returns `false` when no gesture is active, in which
    /// case nothing changed and no redraw is needed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if !self.state.active {
            return false;
        }
        self.state.cursor = Some(point);
        self.capture(point);
        true
    }

    /// End the gesture and reset all selection state.
    ///
    /// Returns the composed code, or `None` when no node was captured.
    pub fn pointer_up(&mut self) -> Option<PatternCode> {
        let order = std::mem::take(&mut self.state.selection_order);
        self.clear();
        if order.is_empty() {
            None
        } else {
            Some(PatternCode(order))
        }
    }

    /// Abort the gesture without producing a code.
    ///
    /// Returns whether there was anything to discard.
    pub fn cancel(&mut self) -> bool {
        let had_state = self.state.active || !self.state.selection_order.is_empty();
        self.clear();
        had_state
    }

    /// Swap in a new layout. Any gesture in flight is discarded.
    pub fn relayout(&mut self, layout: GridLayout) {
        if self.state.active {
            log::debug!(
                "Discarding gesture with {} node(s) on relayout",
                self.state.selection_order.len()
            );
        }
        self.layout = layout;
        self.clear();
    }

    fn clear(&mut self) {
        self.state = GestureState::default();
        self.layout.deselect_all();
    }

    fn capture(&mut self, point: Point) -> usize {
        let radius = self.hit_radius();
        let mut captured = 0;
        for node in &mut self.layout.nodes {
            if !node.selected && node.contains(point, radius) {
                node.selected = true;
                self.state.selection_order.push(node.index);
                captured += 1;
            }
        }
        debug_assert_eq!(
            self.state.selection_order.len(),
            self.layout.nodes.iter().filter(|n| n.selected).count()
        );
        captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridConfig, SizeSpec, SizeUnit, DEFAULT_MARGIN_RATIO, DEFAULT_MARKER_RATIO};
    use crate::layout::compute_layout;
    use kurbo::Size;

    /// 3x3 grid, 300px: centers at 50/150/250, marker 10, hit radius 30.
    fn tracker() -> GestureTracker {
        let config = GridConfig::new(
            3,
            3,
            SizeSpec::new(300.0, SizeUnit::Px),
            DEFAULT_MARGIN_RATIO,
            DEFAULT_MARKER_RATIO,
        )
        .unwrap();
        GestureTracker::new(compute_layout(&config, Size::new(800.0, 600.0)))
    }

    fn center(tracker: &GestureTracker, index: usize) -> Point {
        tracker.layout().nodes[index].center
    }

    #[test]
    fn test_hit_radius() {
        let tracker = tracker();
        assert!((tracker.hit_radius() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_down_at_center_then_up() {
        let mut tracker = tracker();
        let point = center(&tracker, 4);

        assert_eq!(tracker.pointer_down(point), 1);
        assert!(tracker.state().is_active());
        assert_eq!(tracker.state().cursor(), Some(point));

        let code = tracker.pointer_up().unwrap();
        assert_eq!(code.indices(), &[4]);
        assert_eq!(code.to_string(), "4");
    }

    #[test]
    fn test_drag_sequence_order() {
        let mut tracker = tracker();
        tracker.pointer_down(center(&tracker, 0));
        assert!(tracker.pointer_move(Point::new(100.0, 100.0))); // between nodes
        assert!(tracker.pointer_move(center(&tracker, 4)));
        assert!(tracker.pointer_move(center(&tracker, 8)));

        assert_eq!(tracker.state().selection_order(), &[0, 4, 8]);
        assert_eq!(tracker.pointer_up().unwrap().to_string(), "048");
    }

    #[test]
    fn test_revisit_is_ignored() {
        let mut tracker = tracker();
        tracker.pointer_down(center(&tracker, 0));
        tracker.pointer_move(center(&tracker, 1));
        tracker.pointer_move(center(&tracker, 0));
        assert_eq!(tracker.pointer_down(center(&tracker, 1)), 0);

        assert_eq!(tracker.state().selection_order(), &[0, 1]);
        assert_eq!(tracker.layout().nodes.iter().filter(|n| n.selected).count(), 2);
    }

    #[test]
    fn test_hit_radius_boundary() {
        let mut tracker = tracker();
        let c = center(&tracker, 0);

        tracker.pointer_down(Point::new(c.x + 30.5, c.y));
        assert!(tracker.state().selection_order().is_empty());

        tracker.pointer_move(Point::new(c.x + 30.0, c.y));
        assert_eq!(tracker.state().selection_order(), &[0]);
    }

    #[test]
    fn test_single_down_captures_overlapping_nodes() {
        let config = GridConfig::new(
            2,
            1,
            SizeSpec::new(40.0, SizeUnit::Px),
            0.2,
            0.9,
        )
        .unwrap();
        // radius 10, margin 2, circle 8, marker 7, hit radius 21; centers 10 and 30.
        let mut tracker = GestureTracker::new(compute_layout(&config, Size::new(100.0, 100.0)));
        assert_eq!(tracker.pointer_down(Point::new(20.0, 10.0)), 2);
        assert_eq!(tracker.pointer_up().unwrap().to_string(), "01");
    }

    #[test]
    fn test_move_without_down_is_noop() {
        let mut tracker = tracker();
        assert!(!tracker.pointer_move(center(&tracker, 4)));
        assert!(tracker.state().selection_order().is_empty());
        assert_eq!(tracker.state().cursor(), None);
    }

    #[test]
    fn test_empty_gesture_yields_no_code() {
        let mut tracker = tracker();
        tracker.pointer_down(Point::new(100.0, 100.0));
        assert!(tracker.pointer_up().is_none());
        assert!(!tracker.state().is_active());
    }

    #[test]
    fn test_up_resets_everything() {
        let mut tracker = tracker();
        tracker.pointer_down(center(&tracker, 2));
        tracker.pointer_move(center(&tracker, 5));
        tracker.pointer_up();

        assert_eq!(tracker.state(), &GestureState::default());
        assert!(tracker.layout().nodes.iter().all(|n| !n.selected));
    }

    #[test]
    fn test_cancel_discards_selection() {
        let mut tracker = tracker();
        tracker.pointer_down(center(&tracker, 3));
        assert!(tracker.cancel());
        assert!(!tracker.cancel());
        assert!(tracker.pointer_up().is_none());
    }

    #[test]
    fn test_relayout_mid_gesture() {
        let mut tracker = tracker();
        tracker.pointer_down(center(&tracker, 0));
        tracker.pointer_move(center(&tracker, 1));

        let config = GridConfig::default();
        tracker.relayout(compute_layout(&config, Size::new(400.0, 400.0)));

        assert!(!tracker.state().is_active());
        assert!(tracker.state().selection_order().is_empty());
        assert!(!tracker.pointer_move(center(&tracker, 2)));
        assert!(tracker.pointer_up().is_none());
    }

    #[test]
    fn test_pattern_code_display() {
        assert_eq!(PatternCode(vec![1, 2, 5, 8, 7]).to_string(), "12587");
        assert_eq!(PatternCode(vec![10, 3]).to_string(), "103");
    }
}
