//! Error types for slider construction and dispatch.

use crate::page::ElementId;
use thiserror::Error;

/// Slider errors.
///
/// Malformed markup is reported at mount time instead of faulting later.
/// Unrecognized configuration values are not errors; they fall back to
/// defaults silently.
#[derive(Debug, Error)]
pub enum SliderError {
    #[error("Widget root must contain two images, found {found}")]
    MissingImages { found: usize },
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("No slider instance mounted on element: {0}")]
    UnknownInstance(ElementId),
}

/// Result type for slider operations.
pub type SliderResult<T> = Result<T, SliderError>;
