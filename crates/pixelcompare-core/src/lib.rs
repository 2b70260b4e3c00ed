//! PixelCompare Core Library
//!
//! Platform-agnostic geometry and interaction engine for the PixelCompare
//! before/after image comparison slider: clip-region geometry, pointer
//! position resolution, the drag state machine, and the instance manager
//! that keeps every slider on a page in sync.

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod manager;
pub mod orientation;
pub mod page;
pub mod position;
pub mod widget;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::SliderConfig;
pub use error::{SliderError, SliderResult};
pub use geometry::{ClipPair, ClipRegion, OffsetMetrics};
pub use input::PointerEvent;
pub use manager::SliderManager;
pub use orientation::{ArrowDirection, Axis, Orientation};
pub use page::{Element, ElementId, ElementKind, PageModel};
pub use position::slider_fraction;
pub use widget::{SliderInstance, SliderState, ACTIVE_CLASS};
