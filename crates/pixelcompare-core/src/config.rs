//! Per-instance slider configuration.

use crate::orientation::Orientation;
use serde::{Deserialize, Serialize};

/// Configuration for one slider instance.
///
/// The manager builds one from the page defaults plus the root's declarative
/// attributes; each instance owns an independent copy and nothing mutates it
/// afterwards, so instances cannot leak settings into each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Initial divider position in [0, 1].
    pub default_offset_pct: f64,
    /// How the divider splits the image pair.
    pub orientation: Orientation,
    /// Create a `pixelcompare-overlay` element over the images.
    pub overlay: bool,
    /// Hover interaction: pointer enter starts, leave ends, no held button.
    pub hover: bool,
    /// Restrict drag starts to the handle rather than the whole container.
    pub move_with_handle_only: bool,
    /// A single click jumps the divider to the click position.
    pub click_to_move: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            default_offset_pct: 0.5,
            orientation: Orientation::Horizontal,
            overlay: false,
            hover: false,
            move_with_handle_only: true,
            click_to_move: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SliderConfig::default();
        assert!((config.default_offset_pct - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert!(!config.overlay);
        assert!(!config.hover);
        assert!(config.move_with_handle_only);
        assert!(!config.click_to_move);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: SliderConfig =
            serde_json::from_str(r#"{"orientation": "vertical", "hover": true}"#).unwrap();
        assert_eq!(config.orientation, Orientation::Vertical);
        assert!(config.hover);
        assert!((config.default_offset_pct - 0.5).abs() < f64::EPSILON);
        assert!(config.move_with_handle_only);
    }
}
