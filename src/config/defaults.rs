// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for the tuning values
//! used across the calendar engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Unified height bounds, mode thresholds and multiplier ranges
//! - **Pinch**: Throttle window, snapping tolerance and settle spring
//! - **Overscroll**: Paging threshold and short-content guard
//! - **Transition**: Re-entrancy lock and scroll reset delays

use std::time::Duration;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Smallest allowed unified height (row height in logical pixels).
pub const MIN_UNIFIED_HEIGHT: f32 = 40.0;

/// Largest allowed unified height.
pub const MAX_UNIFIED_HEIGHT: f32 = 160.0;

/// Lower bound of the stacked band (T1).
pub const STACKED_THRESHOLD: f32 = 64.0;

/// Lower bound of the detailed band (T2).
pub const DETAILED_THRESHOLD: f32 = 80.0;

/// Unified height used when nothing valid was persisted.
pub const DEFAULT_UNIFIED_HEIGHT: f32 = STACKED_THRESHOLD;

/// Base heights used by direct mode selection.
pub const COMPACT_BASE_HEIGHT: f32 = MIN_UNIFIED_HEIGHT;
pub const STACKED_BASE_HEIGHT: f32 = STACKED_THRESHOLD;
pub const DETAILED_BASE_HEIGHT: f32 = DETAILED_THRESHOLD;

/// Compact multiplier range (reached at MIN and at T1).
pub const COMPACT_MULTIPLIER_MIN: f32 = 1.0;
pub const COMPACT_MULTIPLIER_MAX: f32 = 1.6;

/// Stacked multiplier range (reached at T1 and at T2).
pub const STACKED_MULTIPLIER_MIN: f32 = 0.75;
pub const STACKED_MULTIPLIER_MAX: f32 = 1.25;

/// Detailed multiplier range. The curve has a knee at `DETAILED_KNEE_HEIGHT`.
pub const DETAILED_MULTIPLIER_MIN: f32 = 0.75;
pub const DETAILED_MULTIPLIER_KNEE: f32 = 1.0;
pub const DETAILED_MULTIPLIER_MAX: f32 = 2.0;
pub const DETAILED_KNEE_HEIGHT: f32 = 100.0;

// ==========================================================================
// Pinch Defaults
// ==========================================================================

/// Minimum spacing between two forwarded display updates during a pinch.
pub const PINCH_FORWARD_THROTTLE: Duration = Duration::from_millis(50);

/// Distance to a threshold under which a released pinch snaps onto it.
pub const SNAP_TOLERANCE: f32 = 8.0;

/// Settle spring stiffness. Damping is derived for critical damping.
pub const SETTLE_SPRING_STIFFNESS: f64 = 300.0;

/// Ctrl + wheel pinch emulation: scale change per wheel line.
pub const WHEEL_PINCH_STEP: f32 = 0.08;

// ==========================================================================
// Overscroll Defaults
// ==========================================================================

/// Distance past either edge that latches a month change.
pub const OVERSCROLL_THRESHOLD: f32 = 80.0;

/// Scroll range under which the list counts as not scrollable.
pub const MIN_SCROLLABLE_RANGE: f32 = 10.0;

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// How long a month transition blocks the next overscroll transition.
pub const TRANSITION_LOCK_DURATION: Duration = Duration::from_millis(600);

/// Delay between the month change and the scroll position reset.
pub const SCROLL_RESET_DELAY: Duration = Duration::from_millis(50);

/// Frame interval of the tick subscription driving springs and timers.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_UNIFIED_HEIGHT > 0.0);
    assert!(MIN_UNIFIED_HEIGHT < STACKED_THRESHOLD);
    assert!(STACKED_THRESHOLD < DETAILED_THRESHOLD);
    assert!(DETAILED_THRESHOLD < DETAILED_KNEE_HEIGHT);
    assert!(DETAILED_KNEE_HEIGHT < MAX_UNIFIED_HEIGHT);
    assert!(DEFAULT_UNIFIED_HEIGHT >= MIN_UNIFIED_HEIGHT);
    assert!(DEFAULT_UNIFIED_HEIGHT <= MAX_UNIFIED_HEIGHT);

    assert!(COMPACT_MULTIPLIER_MIN < COMPACT_MULTIPLIER_MAX);
    assert!(STACKED_MULTIPLIER_MIN < STACKED_MULTIPLIER_MAX);
    assert!(DETAILED_MULTIPLIER_MIN < DETAILED_MULTIPLIER_KNEE);
    assert!(DETAILED_MULTIPLIER_KNEE < DETAILED_MULTIPLIER_MAX);

    assert!(SNAP_TOLERANCE > 0.0);
    assert!(SNAP_TOLERANCE * 2.0 <= DETAILED_THRESHOLD - STACKED_THRESHOLD);
    assert!(OVERSCROLL_THRESHOLD > MIN_SCROLLABLE_RANGE);
};
