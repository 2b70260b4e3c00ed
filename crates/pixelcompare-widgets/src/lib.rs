//! Reusable egui widget for before/after image comparison.
//!
//! The native embodiment of the PixelCompare engine: the same clip geometry
//! and position resolution as the web widget, painted with egui textures.
//!
//! - **CompareSlider**: two textures revealed by a draggable divider, with
//!   horizontal, vertical, or diagonal "sides" orientation

pub mod compare;

pub use compare::{CompareSlider, CompareSliderStyle};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Divider line width in points.
    pub const DIVIDER_WIDTH: f32 = 2.0;
    /// Handle knob radius.
    pub const HANDLE_RADIUS: f32 = 16.0;
    /// Arrow glyph extent inside the knob.
    pub const ARROW_SIZE: f32 = 5.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Divider and handle outline.
    pub const DIVIDER: Color32 = Color32::WHITE;
    /// Handle knob fill.
    pub const HANDLE_BG: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 100);
    /// Arrow glyph color.
    pub const ARROW: Color32 = Color32::WHITE;
}
