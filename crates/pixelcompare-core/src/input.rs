//! Pointer and touch event vocabulary consumed by slider instances.

use crate::page::ElementId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// An input event routed to a slider instance.
///
/// Positions are absolute page-space coordinates, matching what the host
/// reports for mouse and touch input. `Release`, like the window-level
/// listener it models, carries no position and is fanned out to every
/// instance by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Mouse button pressed on `target`.
    Press { target: ElementId, position: Point },
    /// Touch started on `target`. `travel` is the initial swipe delta used
    /// to reject gestures orthogonal to the slider axis.
    TouchStart {
        target: ElementId,
        position: Point,
        travel: Vec2,
    },
    /// Pointer or touch moved over the container.
    Move { position: Point },
    /// Page-wide press release (mouse up or touch end, anywhere).
    Release,
    /// Pointer entered the container (hover mode).
    Enter { position: Point },
    /// Pointer left the container (hover mode).
    Leave,
    /// Single click on the container (click-to-move mode).
    Click { position: Point },
}
