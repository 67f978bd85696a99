// SPDX-License-Identifier: MPL-2.0
//! Desktop input mapping
//!
//! Desktop platforms deliver raw touch points and wheel ticks rather than a
//! recognized pinch. This tracker turns them into the pinch/drag lifecycle
//! the calendar component understands:
//!
//! - one finger down drags, a second finger turns the drag into a pinch
//!   whose scale is the finger distance relative to its starting distance
//! - a lost finger cancels whatever was in progress
//! - Ctrl + wheel emulates a pinch that ends when Ctrl is released

use crate::config::WHEEL_PINCH_STEP;
use iced::Point;
use std::collections::BTreeMap;

/// Distances below this are treated as fingers on top of each other.
const MIN_PINCH_DISTANCE: f32 = 1.0;

/// Recognized gesture step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    PinchStarted,
    PinchChanged(f32),
    PinchEnded,
    PinchCancelled,
    DragStarted(Point),
    DragMoved(Point),
    DragEnded,
    DragCancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Active {
    #[default]
    None,
    TouchDrag,
    TouchPinch {
        start_distance: f32,
    },
    WheelPinch {
        scale: f32,
    },
}

/// Touch and wheel gesture recognizer.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    fingers: BTreeMap<u64, Point>,
    active: Active,
}

impl GestureTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(
            self.active,
            Active::TouchPinch { .. } | Active::WheelPinch { .. }
        )
    }

    fn finger_distance(&self) -> Option<f32> {
        let mut points = self.fingers.values();
        let a = points.next()?;
        let b = points.next()?;
        Some(a.distance(*b))
    }

    pub fn finger_pressed(&mut self, id: u64, position: Point) -> Option<GestureInput> {
        self.fingers.insert(id, position);
        match (self.fingers.len(), self.active) {
            (1, Active::None) => {
                self.active = Active::TouchDrag;
                Some(GestureInput::DragStarted(position))
            }
            (2, Active::None | Active::TouchDrag) => {
                let start_distance = self.finger_distance()?;
                if start_distance < MIN_PINCH_DISTANCE {
                    return None;
                }
                // The component drops the drag when a pinch starts.
                self.active = Active::TouchPinch { start_distance };
                Some(GestureInput::PinchStarted)
            }
            _ => None,
        }
    }

    pub fn finger_moved(&mut self, id: u64, position: Point) -> Option<GestureInput> {
        let finger = self.fingers.get_mut(&id)?;
        *finger = position;
        match self.active {
            Active::TouchDrag => Some(GestureInput::DragMoved(position)),
            Active::TouchPinch { start_distance } => self
                .finger_distance()
                .map(|distance| GestureInput::PinchChanged(distance / start_distance)),
            Active::None | Active::WheelPinch { .. } => None,
        }
    }

    pub fn finger_lifted(&mut self, id: u64) -> Option<GestureInput> {
        self.fingers.remove(&id)?;
        match self.active {
            Active::TouchDrag => {
                self.active = Active::None;
                Some(GestureInput::DragEnded)
            }
            Active::TouchPinch { .. } if self.fingers.len() < 2 => {
                self.active = Active::None;
                Some(GestureInput::PinchEnded)
            }
            _ => None,
        }
    }

    pub fn finger_lost(&mut self, id: u64) -> Option<GestureInput> {
        self.fingers.remove(&id)?;
        let cancelled = match self.active {
            Active::TouchDrag => Some(GestureInput::DragCancelled),
            Active::TouchPinch { .. } => Some(GestureInput::PinchCancelled),
            Active::None | Active::WheelPinch { .. } => return None,
        };
        self.active = Active::None;
        cancelled
    }

    /// Wheel ticks with Ctrl held. Returns the steps to apply, in order.
    pub fn wheel(&mut self, steps: f32, ctrl: bool) -> Vec<GestureInput> {
        if !ctrl || steps.abs() < f32::EPSILON || !steps.is_finite() {
            return Vec::new();
        }

        let factor = (1.0 + steps * WHEEL_PINCH_STEP).max(WHEEL_PINCH_STEP);
        match self.active {
            Active::None => {
                self.active = Active::WheelPinch { scale: factor };
                vec![GestureInput::PinchStarted, GestureInput::PinchChanged(factor)]
            }
            Active::WheelPinch { scale } => {
                let scale = scale * factor;
                self.active = Active::WheelPinch { scale };
                vec![GestureInput::PinchChanged(scale)]
            }
            Active::TouchDrag | Active::TouchPinch { .. } => Vec::new(),
        }
    }

    /// Ctrl state changed; releasing it ends a wheel pinch.
    pub fn modifiers_changed(&mut self, ctrl: bool) -> Option<GestureInput> {
        if !ctrl && matches!(self.active, Active::WheelPinch { .. }) {
            self.active = Active::None;
            return Some(GestureInput::PinchEnded);
        }
        None
    }
}
