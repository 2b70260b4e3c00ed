//! Slider orientation strategy.
//!
//! Every orientation-dependent decision lives here: which clip formula the
//! geometry module selects, which arrow affordances the handle carries,
//! which axis the resolver reads, and which wrapper class the manager emits.
//! Adding an orientation means extending this one type.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Axis along which a slider reads pointer positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Direction of one of the handle's two arrow affordances.
///
/// The first arrow points toward the before image, the second toward the
/// after image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowDirection {
    /// Generated class name for the arrow span. Part of the stable styling
    /// contract.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Up => "pixelcompare-up-arrow",
            Self::Down => "pixelcompare-down-arrow",
            Self::Left => "pixelcompare-left-arrow",
            Self::Right => "pixelcompare-right-arrow",
        }
    }
}

/// How the divider splits the before/after pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left/right split along the width axis.
    #[default]
    Horizontal,
    /// Top/bottom split along the height axis.
    Vertical,
    /// Diagonal wipe from opposite corners.
    Sides,
}

impl Orientation {
    /// Parse a declarative attribute value.
    ///
    /// Returns `None` for anything unrecognized so callers can fall back to
    /// their default silently; bad values are never an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            "sides" => Some(Self::Sides),
            _ => None,
        }
    }

    /// The axis pointer positions are resolved along.
    pub fn axis(&self) -> Axis {
        match self {
            Self::Vertical => Axis::Y,
            Self::Horizontal | Self::Sides => Axis::X,
        }
    }

    /// Arrow pair for the handle: (toward before, toward after).
    pub fn arrows(&self) -> (ArrowDirection, ArrowDirection) {
        match self {
            Self::Vertical => (ArrowDirection::Down, ArrowDirection::Up),
            Self::Horizontal | Self::Sides => (ArrowDirection::Left, ArrowDirection::Right),
        }
    }

    /// Orientation class added to the generated wrapper.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Horizontal => "pixelcompare-horizontal",
            Self::Vertical => "pixelcompare-vertical",
            Self::Sides => "pixelcompare-sides",
        }
    }

    /// Whether an initial touch travel should be rejected as a page-scroll
    /// gesture rather than starting a drag.
    ///
    /// A swipe predominantly orthogonal to the slider axis belongs to the
    /// page, not the slider.
    pub fn rejects_gesture(&self, travel: Vec2) -> bool {
        match self.axis() {
            Axis::X => travel.y.abs() > travel.x.abs(),
            Axis::Y => travel.x.abs() > travel.y.abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(Orientation::parse("horizontal"), Some(Orientation::Horizontal));
        assert_eq!(Orientation::parse("vertical"), Some(Orientation::Vertical));
        assert_eq!(Orientation::parse("sides"), Some(Orientation::Sides));
    }

    #[test]
    fn test_parse_unrecognized_is_none() {
        assert_eq!(Orientation::parse("diagonal"), None);
        assert_eq!(Orientation::parse(""), None);
        assert_eq!(Orientation::parse("Vertical"), None);
    }

    #[test]
    fn test_axis() {
        assert_eq!(Orientation::Horizontal.axis(), Axis::X);
        assert_eq!(Orientation::Sides.axis(), Axis::X);
        assert_eq!(Orientation::Vertical.axis(), Axis::Y);
    }

    #[test]
    fn test_arrow_classes() {
        let (before, after) = Orientation::Vertical.arrows();
        assert_eq!(before.class_name(), "pixelcompare-down-arrow");
        assert_eq!(after.class_name(), "pixelcompare-up-arrow");

        let (before, after) = Orientation::Horizontal.arrows();
        assert_eq!(before.class_name(), "pixelcompare-left-arrow");
        assert_eq!(after.class_name(), "pixelcompare-right-arrow");
    }

    #[test]
    fn test_gesture_rejection_orthogonal_to_axis() {
        // Vertical swipe over a horizontal slider belongs to the page.
        assert!(Orientation::Horizontal.rejects_gesture(Vec2::new(2.0, -10.0)));
        assert!(!Orientation::Horizontal.rejects_gesture(Vec2::new(10.0, 2.0)));

        // Horizontal swipe over a vertical slider belongs to the page.
        assert!(Orientation::Vertical.rejects_gesture(Vec2::new(-10.0, 2.0)));
        assert!(!Orientation::Vertical.rejects_gesture(Vec2::new(2.0, 10.0)));

        // Sides behaves like horizontal.
        assert!(Orientation::Sides.rejects_gesture(Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn test_serde_lowercase() {
        let o: Orientation = serde_json::from_str("\"sides\"").unwrap();
        assert_eq!(o, Orientation::Sides);
    }
}
