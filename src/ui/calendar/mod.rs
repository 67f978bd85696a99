// SPDX-License-Identifier: MPL-2.0
//! Calendar screen: the month grid with pinch zoom and overscroll paging.
//!
//! - [`component`] - State, messages and effects (TEA component)
//! - [`cells`] - Per-mode cell strategies and their dispatch
//! - [`gestures`] - Touch and Ctrl+wheel gesture recognition
//! - [`view`] - Iced rendering of the grid

pub mod cells;
pub mod component;
pub mod gestures;
pub mod view;

pub use component::{Effect, Message, State, SCROLLABLE_ID};
