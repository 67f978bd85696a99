// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Gesture and zoom state machines, kept free of widget code so they can be
//! driven and tested with plain values and explicit timestamps.

pub mod drag;
pub mod overscroll;
pub mod pinch;
pub mod spring;
pub mod transition;
pub mod zoom;

// Re-export commonly used types for convenience
pub use drag::DragState;
pub use overscroll::{OverscrollDetector, OverscrollLatch, PagingDirection, ScrollSample};
pub use pinch::{PinchController, PinchRelease, SettleStep};
pub use transition::{MonthTransitionController, TransitionLock, TransitionOutcome};
pub use zoom::{DisplayMode, DisplaySnapshot, UnifiedHeight, ZoomModel};
