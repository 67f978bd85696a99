// SPDX-License-Identifier: MPL-2.0
//! Overscroll detection
//!
//! Watches scroll samples while a finger (or mouse button) is down and
//! latches "the user pulled past the edge" for the rest of that drag. The
//! latch, not the offset at release, decides whether the month changes, so
//! a user may overscroll, drag back, and still page on release.
//!
//! Samples that arrive while no drag is active (inertial coasting) are
//! ignored outright.

use crate::config::{MIN_SCROLLABLE_RANGE, OVERSCROLL_THRESHOLD};

/// One scroll-position observation from the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    /// Vertical offset, negative when pulled past the top.
    pub offset_y: f32,
    pub content_height: f32,
    pub viewport_height: f32,
}

impl ScrollSample {
    #[must_use]
    pub fn new(offset_y: f32, content_height: f32, viewport_height: f32) -> Self {
        Self {
            offset_y,
            content_height,
            viewport_height,
        }
    }

    /// Largest in-range offset, never negative.
    #[must_use]
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

/// Live classification of a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overscroll {
    pub over_top: bool,
    pub over_bottom: bool,
}

/// Classifies a sample against the overscroll threshold.
///
/// Short content (nothing to scroll) treats any offset past the threshold
/// as bottom overscroll, since there is no end of content to exceed.
#[must_use]
pub fn classify(sample: &ScrollSample) -> Overscroll {
    let max_scroll = sample.max_scroll();
    let can_scroll_down = max_scroll > MIN_SCROLLABLE_RANGE;
    let over_bottom = if can_scroll_down {
        sample.offset_y > max_scroll + OVERSCROLL_THRESHOLD
    } else {
        sample.offset_y > OVERSCROLL_THRESHOLD
    };

    Overscroll {
        over_top: sample.offset_y < -OVERSCROLL_THRESHOLD,
        over_bottom,
    }
}

/// Which way a confirmed overscroll pages the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingDirection {
    /// Pulled past the top.
    Previous,
    /// Pushed past the bottom.
    Next,
}

/// Latched edges of the current drag. Only ever grows within a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverscrollLatch {
    #[default]
    Unlatched,
    LatchedTop,
    LatchedBottom,
    LatchedBoth,
}

impl OverscrollLatch {
    #[must_use]
    pub fn top(self) -> bool {
        matches!(self, Self::LatchedTop | Self::LatchedBoth)
    }

    #[must_use]
    pub fn bottom(self) -> bool {
        matches!(self, Self::LatchedBottom | Self::LatchedBoth)
    }

    /// Adds whatever edges `overscroll` crosses; never removes one.
    #[must_use]
    pub fn absorb(self, overscroll: Overscroll) -> Self {
        match (
            self.top() || overscroll.over_top,
            self.bottom() || overscroll.over_bottom,
        ) {
            (false, false) => Self::Unlatched,
            (true, false) => Self::LatchedTop,
            (false, true) => Self::LatchedBottom,
            (true, true) => Self::LatchedBoth,
        }
    }

    /// Direction to page in. Top wins when both edges latched.
    #[must_use]
    pub fn direction(self) -> Option<PagingDirection> {
        if self.top() {
            Some(PagingDirection::Previous)
        } else if self.bottom() {
            Some(PagingDirection::Next)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    Dragging {
        latch: OverscrollLatch,
        live: Overscroll,
    },
}

/// Per-drag overscroll state machine.
#[derive(Debug, Clone, Default)]
pub struct OverscrollDetector {
    phase: Phase,
}

impl OverscrollDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Latch of the drag in progress (unlatched when idle).
    #[must_use]
    pub fn latch(&self) -> OverscrollLatch {
        match self.phase {
            Phase::Dragging { latch, .. } => latch,
            Phase::Idle => OverscrollLatch::Unlatched,
        }
    }

    /// Live pull indicators for the view.
    #[must_use]
    pub fn indicators(&self) -> Overscroll {
        match self.phase {
            Phase::Dragging { live, .. } => live,
            Phase::Idle => Overscroll::default(),
        }
    }

    /// Starts a drag with fresh latches.
    pub fn drag_start(&mut self) {
        self.phase = Phase::Dragging {
            latch: OverscrollLatch::Unlatched,
            live: Overscroll::default(),
        };
    }

    /// Feeds one sample. Returns true when it was accepted (a drag is active).
    pub fn sample(&mut self, sample: &ScrollSample) -> bool {
        let Phase::Dragging { latch, live } = &mut self.phase else {
            return false;
        };

        let overscroll = classify(sample);
        let latched = latch.absorb(overscroll);
        if latched != *latch {
            tracing::debug!(?latched, offset = sample.offset_y, "overscroll latched");
        }
        *latch = latched;
        *live = overscroll;
        true
    }

    /// Ends the drag and returns the latched paging direction.
    ///
    /// Only the first call after a drag start yields anything; the latch is
    /// cleared whatever the outcome.
    pub fn drag_end(&mut self) -> Option<PagingDirection> {
        match std::mem::take(&mut self.phase) {
            Phase::Dragging { latch, .. } => latch.direction(),
            Phase::Idle => None,
        }
    }

    /// Drops the drag without paging.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Inertial scrolling finished. Nothing to decide: momentum never latches.
    pub fn momentum_end(&mut self) {
        if self.is_dragging() {
            tracing::debug!("momentum ended during an active drag");
        }
    }
}
