// SPDX-License-Identifier: MPL-2.0
//! Pinch controller
//!
//! Turns a pinch lifecycle (start / scale updates / end / cancel) into
//! writes on the [`ZoomModel`] and throttled display snapshots:
//!
//! - every update writes the live height (pure arithmetic, no allocation)
//! - a snapshot is forwarded to the render layer at most every 50 ms
//! - release snaps onto T1/T2 when close enough, then settles with a spring
//! - the release always forwards the target, bypassing the throttle
//!
//! All timing is driven by the `now` passed in, so the controller owns its
//! throttle timestamp and settle clock instead of free-running timers.

use super::spring::Spring;
use super::zoom::{clamp, DisplayMode, DisplaySnapshot, UnifiedHeight, ZoomModel};
use crate::config::{PINCH_FORWARD_THROTTLE, SETTLE_SPRING_STIFFNESS, SNAP_TOLERANCE};
use std::time::Instant;

/// State of one pinch, created at start and dropped at end or cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    /// Live height when the pinch began; scale factors apply to it.
    pub base_height: UnifiedHeight,
    /// When a snapshot was last forwarded during this pinch.
    pub last_emitted_at: Option<Instant>,
    /// Height of the last forwarded snapshot.
    pub last_forwarded: UnifiedHeight,
    /// Mode remembered before the pinch, for the mode-change haptic.
    pub mode_before: DisplayMode,
}

#[derive(Debug, Clone)]
struct Settle {
    spring: Spring,
    target: UnifiedHeight,
    last_tick: Instant,
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Pinching(GestureSession),
    Settling(Settle),
}

/// Result of releasing a pinch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchRelease {
    /// Committed resting height (snapped and clamped).
    pub target: UnifiedHeight,
    /// Snapshot to forward immediately.
    pub forward: DisplaySnapshot,
    /// Whether the resting mode differs from the mode before the pinch.
    pub mode_changed: bool,
    /// True when no settle animation follows (already at the target).
    pub settled: bool,
}

/// One frame of a settle animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleStep {
    Moving(DisplaySnapshot),
    Settled(DisplaySnapshot),
}

/// Drives the zoom model from pinch input.
#[derive(Debug, Clone)]
pub struct PinchController {
    phase: Phase,
    animations: bool,
}

impl Default for PinchController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PinchController {
    /// Creates a controller. With `animations` off a release lands instantly.
    #[must_use]
    pub fn new(animations: bool) -> Self {
        Self {
            phase: Phase::Idle,
            animations,
        }
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self.phase, Phase::Pinching(_))
    }

    #[must_use]
    pub fn is_settling(&self) -> bool {
        matches!(self.phase, Phase::Settling(_))
    }

    /// Current session, if a pinch is in flight.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        match &self.phase {
            Phase::Pinching(session) => Some(session),
            _ => None,
        }
    }

    /// Starts a pinch from the live height, interrupting any settle.
    pub fn begin(&mut self, model: &ZoomModel) {
        let base_height = model.height();
        self.phase = Phase::Pinching(GestureSession {
            base_height,
            last_emitted_at: None,
            last_forwarded: base_height,
            mode_before: model.mode_memory(),
        });
    }

    /// Applies a scale factor relative to the pinch start.
    ///
    /// Returns a snapshot only when the throttle window has elapsed.
    pub fn update(
        &mut self,
        model: &mut ZoomModel,
        scale: f32,
        now: Instant,
    ) -> Option<DisplaySnapshot> {
        let Phase::Pinching(session) = &mut self.phase else {
            return None;
        };
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }

        let proposed = clamp(session.base_height.value() * scale);
        model.set(proposed);

        let due = session
            .last_emitted_at
            .is_none_or(|last| now.saturating_duration_since(last) >= PINCH_FORWARD_THROTTLE);
        if !due {
            return None;
        }

        session.last_emitted_at = Some(now);
        session.last_forwarded = proposed;
        Some(DisplaySnapshot::of(proposed))
    }

    /// Releases the pinch: snap, record the resting mode, start settling.
    pub fn end(&mut self, model: &mut ZoomModel, now: Instant) -> Option<PinchRelease> {
        let Phase::Pinching(session) = std::mem::take(&mut self.phase) else {
            return None;
        };

        let live = model.height();
        let target = live.snapped(SNAP_TOLERANCE);
        let mode = target.mode();
        model.remember_mode(mode);
        let mode_changed = mode != session.mode_before;

        let spring = Spring::critically_damped(
            f64::from(live.value()),
            f64::from(target.value()),
            SETTLE_SPRING_STIFFNESS,
        );
        let settled = !self.animations || spring.is_at_rest();
        if settled {
            model.set(target);
        } else {
            self.phase = Phase::Settling(Settle {
                spring,
                target,
                last_tick: now,
            });
        }

        tracing::debug!(
            live = live.value(),
            target = target.value(),
            ?mode,
            mode_changed,
            "pinch released"
        );

        Some(PinchRelease {
            target,
            forward: DisplaySnapshot::of(target),
            mode_changed,
            settled,
        })
    }

    /// Abandons the pinch, keeping the last forwarded height.
    pub fn cancel(&mut self, model: &mut ZoomModel) -> Option<DisplaySnapshot> {
        let Phase::Pinching(session) = std::mem::take(&mut self.phase) else {
            return None;
        };
        model.set(session.last_forwarded);
        model.remember_mode(session.last_forwarded.mode());
        tracing::debug!(height = session.last_forwarded.value(), "pinch cancelled");
        Some(DisplaySnapshot::of(session.last_forwarded))
    }

    /// Stops a settle or a pinch without committing anything.
    pub fn interrupt(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Advances the settle spring to `now`.
    pub fn tick(&mut self, model: &mut ZoomModel, now: Instant) -> Option<SettleStep> {
        let Phase::Settling(settle) = &mut self.phase else {
            return None;
        };

        settle
            .spring
            .advance(now.saturating_duration_since(settle.last_tick));
        settle.last_tick = now;

        let target = settle.target;
        let mode = target.mode();
        if settle.spring.is_at_rest() {
            model.set(target);
            self.phase = Phase::Idle;
            return Some(SettleStep::Settled(DisplaySnapshot::of(target)));
        }

        // Clamping to f32 is fine: the spring never leaves [live, target].
        #[allow(clippy::cast_possible_truncation)]
        let height = clamp(settle.spring.position() as f32);
        model.set(height);
        Some(SettleStep::Moving(DisplaySnapshot::in_mode(height, mode)))
    }
}
