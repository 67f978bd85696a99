// SPDX-License-Identifier: MPL-2.0
//! Month transition state
//!
//! Applies a confirmed overscroll to the visible month, then holds a
//! re-entrancy lock for a fixed window so a second pull cannot page again
//! mid-transition. Both follow-up timers (scroll reset and lock release) are
//! deadlines stored here; starting a new transition overwrites them, so a
//! deadline from an older transition can never fire against a newer one.

use super::overscroll::PagingDirection;
use crate::config::{SCROLL_RESET_DELAY, TRANSITION_LOCK_DURATION};
use crate::domain::calendar::{CalendarMonth, CalendarState};
use std::time::Instant;

/// Re-entrancy guard around month changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionLock {
    #[default]
    Unlocked,
    Locked {
        acquired_at: Instant,
        release_at: Instant,
    },
}

impl TransitionLock {
    fn acquire(now: Instant) -> Self {
        Self::Locked {
            acquired_at: now,
            release_at: now + TRANSITION_LOCK_DURATION,
        }
    }

    /// Whether the lock still blocks transitions at `now`.
    #[must_use]
    pub fn is_held(&self, now: Instant) -> bool {
        match self {
            Self::Unlocked => false,
            Self::Locked { release_at, .. } => now < *release_at,
        }
    }
}

/// What a drag release did to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// A transition is still locked; the release was dropped.
    Ignored,
    /// Nothing latched during the drag.
    NoLatch,
    /// The visible month moved.
    Transitioned {
        direction: PagingDirection,
        month: CalendarMonth,
    },
}

/// Deadlines that came due during a [`MonthTransitionController::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DueTimers {
    /// Scroll the list back to the top now.
    pub scroll_reset: bool,
    /// The lock was released.
    pub unlocked: bool,
}

/// Pages the calendar on confirmed overscroll releases.
#[derive(Debug, Clone, Default)]
pub struct MonthTransitionController {
    lock: TransitionLock,
    scroll_reset_at: Option<Instant>,
}

impl MonthTransitionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lock(&self) -> TransitionLock {
        self.lock
    }

    #[must_use]
    pub fn is_locked(&self, now: Instant) -> bool {
        self.lock.is_held(now)
    }

    /// True while a timer is outstanding and [`poll`](Self::poll) must keep running.
    #[must_use]
    pub fn has_pending_timers(&self) -> bool {
        self.scroll_reset_at.is_some() || matches!(self.lock, TransitionLock::Locked { .. })
    }

    /// Handles the outcome of a drag release.
    pub fn on_drag_end(
        &mut self,
        direction: Option<PagingDirection>,
        calendar: &mut CalendarState,
        now: Instant,
    ) -> TransitionOutcome {
        if self.lock.is_held(now) {
            tracing::debug!(?direction, "drag release ignored while transition is locked");
            return TransitionOutcome::Ignored;
        }

        let Some(direction) = direction else {
            return TransitionOutcome::NoLatch;
        };

        self.lock = TransitionLock::acquire(now);
        match direction {
            PagingDirection::Previous => calendar.go_previous(),
            PagingDirection::Next => calendar.go_next(),
        }
        self.scroll_reset_at = Some(now + SCROLL_RESET_DELAY);

        let month = calendar.visible();
        tracing::debug!(?direction, %month, "month transition");
        TransitionOutcome::Transitioned { direction, month }
    }

    /// Fires every deadline that is due at `now`.
    pub fn poll(&mut self, now: Instant) -> DueTimers {
        let mut due = DueTimers::default();

        if self.scroll_reset_at.is_some_and(|at| now >= at) {
            self.scroll_reset_at = None;
            due.scroll_reset = true;
        }

        if let TransitionLock::Locked { release_at, .. } = self.lock {
            if now >= release_at {
                self.lock = TransitionLock::Unlocked;
                due.unlocked = true;
            }
        }

        due
    }
}
