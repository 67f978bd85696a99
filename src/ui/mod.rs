// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! - [`calendar`] - Month grid screen with pinch zoom and overscroll paging
//! - [`state`] - Zoom, pinch, drag, overscroll and transition state machines
//! - [`haptics`] - Haptic feedback sink
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod calendar;
pub mod design_tokens;
pub mod haptics;
pub mod state;
pub mod theming;
