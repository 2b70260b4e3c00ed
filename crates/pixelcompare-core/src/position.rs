//! Pointer position to offset-fraction resolution.

use crate::orientation::{Axis, Orientation};
use kurbo::{Point, Rect};

/// Clamp `value` into [`min`, `max`].
pub fn min_max(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Resolve a page-space pointer position into a clamped offset fraction.
///
/// `bounds` is the layout snapshot captured at gesture start: the container
/// origin paired with the before image's rendered size. The fraction is the
/// pointer's travel from the origin along the slider axis, divided by the
/// dimension on that axis, clamped min-max so positions before the origin
/// resolve to exactly 0.0 and positions past the far edge to exactly 1.0.
pub fn slider_fraction(position: Point, bounds: Rect, orientation: Orientation) -> f64 {
    let raw = match orientation.axis() {
        Axis::X => {
            let width = bounds.width();
            if width <= 0.0 {
                return 0.0;
            }
            (position.x - bounds.x0) / width
        }
        Axis::Y => {
            let height = bounds.height();
            if height <= 0.0 {
                return 0.0;
            }
            (position.y - bounds.y0) / height
        }
    };
    min_max(raw, 0.0, 1.0)
}
