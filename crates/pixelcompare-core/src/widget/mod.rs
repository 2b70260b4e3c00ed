//! Widget instances: one before/after pair with its interaction state.
//!
//! The page model stays passive data; instances wrap an element group with
//! the drag state machine and geometry application.

mod instance;
mod state;

pub use instance::{SliderInstance, ACTIVE_CLASS};
pub use state::SliderState;
