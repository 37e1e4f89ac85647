//! Mapping from page client coordinates into canvas backing-store pixels.

use kurbo::{Point, Rect, Size};

/// Convert a client-space position into canvas backing-store coordinates.
///
/// `rect` is the canvas's on-screen box (its bounding client rect) and
/// `backing` the size of its backing store. When CSS stretches the canvas the
/// two differ and the offset is scaled accordingly. An axis with no on-screen
/// extent is left unscaled.
pub fn client_to_canvas(rect: Rect, backing: Size, client: Point) -> Point {
    let scale_x = if rect.width() > 0.0 {
        backing.width / rect.width()
    } else {
        1.0
    };
    let scale_y = if rect.height() > 0.0 {
        backing.height / rect.height()
    } else {
        1.0
    };
    Point::new((client.x - rect.x0) * scale_x, (client.y - rect.y0) * scale_y)
}
