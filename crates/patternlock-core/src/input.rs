//! Pointer events for unified mouse/touch handling.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A normalized pointer event in canvas coordinates.
///
/// Mouse input and the first active touch point both map onto these; the
/// position is relative to the top-left corner of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    /// The platform aborted the gesture (e.g. `touchcancel`).
    Cancel,
}

impl PointerEvent {
    /// Shorthand for a down event at `(x, y)`.
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    /// Shorthand for a move event to `(x, y)`.
    pub fn move_to(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position } | PointerEvent::Move { position } => Some(*position),
            PointerEvent::Up | PointerEvent::Cancel => None,
        }
    }
}
