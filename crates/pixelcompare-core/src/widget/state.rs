//! Mutable per-instance slider state.

use crate::position::min_max;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// The mutable state of one slider instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderState {
    /// Current divider position: 0 = fully before, 1 = fully after.
    pub offset_pct: f64,
    /// Whether a drag is in progress.
    pub active: bool,
    /// Layout snapshot captured at drag start: container origin with the
    /// before image's rendered size. Stale until the next drag or resize.
    pub bounds: Option<Rect>,
}

impl SliderState {
    /// Initial state at the configured default divider position.
    pub fn new(default_offset_pct: f64) -> Self {
        Self {
            offset_pct: min_max(default_offset_pct, 0.0, 1.0),
            active: false,
            bounds: None,
        }
    }
}
