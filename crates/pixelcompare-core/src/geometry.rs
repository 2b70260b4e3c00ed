//! Clip-region geometry for the comparison slider.
//!
//! Pure functions mapping a pre-clamped offset fraction to the pixel-space
//! (or, for the diagonal wipe, percent-space) regions that stay visible on
//! each image. Callers clamp the fraction; nothing here re-validates.

use crate::orientation::{Axis, Orientation};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Pixel metrics precomputed for one offset fraction against the before
/// image's current rendered size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetMetrics {
    /// Rendered width of the before image.
    pub width: f64,
    /// Rendered height of the before image.
    pub height: f64,
    /// Offset fraction scaled to 0-100 percent space.
    pub pct_percent: f64,
    /// Divider position along the width axis, in pixels.
    pub clip_w: f64,
    /// Divider position along the height axis, in pixels.
    pub clip_h: f64,
}

impl OffsetMetrics {
    /// Compute metrics for `pct` in [0, 1] and the before image's rendered
    /// size.
    pub fn new(pct: f64, size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            pct_percent: pct * 100.0,
            clip_w: pct * size.width,
            clip_h: pct * size.height,
        }
    }
}

/// The sub-region of an image that remains visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClipRegion {
    /// Axis-aligned rectangle in pixel space.
    Rect(Rect),
    /// Polygon with vertices in 0-100 percent space. Vertices may fall
    /// outside [0, 100]; the region is intersected with the image by the
    /// host.
    Polygon(Vec<Point>),
}

impl ClipRegion {
    /// Render the CSS value the host page applies: `rect(...)` for the
    /// `clip` property, `polygon(...)` for `clip-path`.
    pub fn to_css(&self) -> String {
        match self {
            Self::Rect(r) => format!("rect({}px, {}px, {}px, {}px)", r.y0, r.x1, r.y1, r.x0),
            Self::Polygon(points) => {
                let vertices: Vec<String> = points
                    .iter()
                    .map(|p| format!("{}% {}%", p.x, p.y))
                    .collect();
                format!("polygon({})", vertices.join(", "))
            }
        }
    }
}

/// Clip regions for the before/after pair at one divider position.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPair {
    pub before: ClipRegion,
    pub after: ClipRegion,
}

/// Compute the visible region of each image.
///
/// The before image keeps the region up to the divider, the after image the
/// complement, so the reveal is continuous as the fraction varies.
pub fn clip_regions(orientation: Orientation, m: &OffsetMetrics) -> ClipPair {
    match orientation {
        Orientation::Horizontal => ClipPair {
            before: ClipRegion::Rect(Rect::new(0.0, 0.0, m.clip_w, m.height)),
            after: ClipRegion::Rect(Rect::new(m.clip_w, 0.0, m.width, m.height)),
        },
        Orientation::Vertical => ClipPair {
            before: ClipRegion::Rect(Rect::new(0.0, 0.0, m.width, m.clip_h)),
            after: ClipRegion::Rect(Rect::new(0.0, m.clip_h, m.width, m.height)),
        },
        Orientation::Sides => {
            let wp = m.pct_percent;
            ClipPair {
                before: ClipRegion::Polygon(vec![
                    Point::new(0.0, 2.0 * (50.0 - wp)),
                    Point::new(2.0 * wp, 100.0),
                    Point::new(0.0, 100.0),
                ]),
                after: ClipRegion::Polygon(vec![
                    Point::new(100.0, 2.0 * (100.0 - wp)),
                    Point::new(-2.0 * (50.0 - wp), 0.0),
                    Point::new(100.0, 0.0),
                ]),
            }
        }
    }
}

/// Handle anchor position: the divider offset along the slider axis.
///
/// Only the coordinate on the active axis is meaningful; the other stays 0.
pub fn handle_position(orientation: Orientation, m: &OffsetMetrics) -> Point {
    match orientation.axis() {
        Axis::X => Point::new(m.clip_w, 0.0),
        Axis::Y => Point::new(0.0, m.clip_h),
    }
}
