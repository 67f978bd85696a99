// SPDX-License-Identifier: MPL-2.0
//! Zoom state management
//!
//! A single continuous scalar, the unified height, drives both the discrete
//! display mode of the month grid and the continuous size multiplier used
//! inside a cell. Everything here is pure and allocation-free so the pinch
//! hot path can call it on every gesture frame.

pub use crate::config::{
    COMPACT_BASE_HEIGHT, DEFAULT_UNIFIED_HEIGHT, DETAILED_BASE_HEIGHT, DETAILED_THRESHOLD,
    MAX_UNIFIED_HEIGHT, MIN_UNIFIED_HEIGHT, STACKED_BASE_HEIGHT, STACKED_THRESHOLD,
};
use crate::config::{
    COMPACT_MULTIPLIER_MAX, COMPACT_MULTIPLIER_MIN, DETAILED_KNEE_HEIGHT, DETAILED_MULTIPLIER_KNEE,
    DETAILED_MULTIPLIER_MAX, DETAILED_MULTIPLIER_MIN, STACKED_MULTIPLIER_MAX,
    STACKED_MULTIPLIER_MIN,
};

/// Unified height, guaranteed to be within valid range (40–160).
///
/// This is the only zoom value that is stored; mode and multiplier are
/// always derived from it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct UnifiedHeight(f32);

impl UnifiedHeight {
    /// Creates a new unified height, clamping the value to the valid range.
    ///
    /// Non-finite input yields the default height.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(MIN_UNIFIED_HEIGHT, MAX_UNIFIED_HEIGHT))
        } else {
            Self::default()
        }
    }

    /// Accepts the value only if it is finite and already inside the range.
    #[must_use]
    pub fn try_new(value: f32) -> Option<Self> {
        (value.is_finite() && (MIN_UNIFIED_HEIGHT..=MAX_UNIFIED_HEIGHT).contains(&value))
            .then_some(Self(value))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Display mode band this height falls into.
    #[must_use]
    pub fn mode(self) -> DisplayMode {
        DisplayMode::of(self)
    }

    /// Multiplier for this height within its own mode.
    #[must_use]
    pub fn multiplier(self) -> f32 {
        size_multiplier(self, self.mode())
    }

    /// Snaps onto T1 or T2 when within `tolerance`, otherwise unchanged.
    ///
    /// A height exactly `tolerance` away from both (72 with the default
    /// tolerance) goes to T1.
    #[must_use]
    pub fn snapped(self, tolerance: f32) -> Self {
        [STACKED_THRESHOLD, DETAILED_THRESHOLD]
            .into_iter()
            .find(|threshold| (self.0 - threshold).abs() <= tolerance)
            .map_or(self, Self::new)
    }
}

impl Default for UnifiedHeight {
    fn default() -> Self {
        Self(DEFAULT_UNIFIED_HEIGHT)
    }
}

/// Clamps any proposed value into the unified height range.
#[must_use]
pub fn clamp(value: f32) -> UnifiedHeight {
    UnifiedHeight::new(value)
}

/// Density band of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DisplayMode {
    /// Day number plus item dots.
    Compact,
    /// Day number plus stacked item bars.
    #[default]
    Stacked,
    /// Day number plus titled item rows.
    Detailed,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Compact,
        DisplayMode::Stacked,
        DisplayMode::Detailed,
    ];

    /// Band of `height`: compact below T1, stacked in [T1, T2), detailed from T2.
    #[must_use]
    pub fn of(height: UnifiedHeight) -> Self {
        let h = height.value();
        if h < STACKED_THRESHOLD {
            DisplayMode::Compact
        } else if h < DETAILED_THRESHOLD {
            DisplayMode::Stacked
        } else {
            DisplayMode::Detailed
        }
    }

    /// Height a direct selection of this mode jumps to.
    #[must_use]
    pub fn base_height(self) -> UnifiedHeight {
        match self {
            DisplayMode::Compact => UnifiedHeight(COMPACT_BASE_HEIGHT),
            DisplayMode::Stacked => UnifiedHeight(STACKED_BASE_HEIGHT),
            DisplayMode::Detailed => UnifiedHeight(DETAILED_BASE_HEIGHT),
        }
    }

    /// Closed range the multiplier of this mode is clamped to.
    #[must_use]
    pub fn multiplier_range(self) -> (f32, f32) {
        match self {
            DisplayMode::Compact => (COMPACT_MULTIPLIER_MIN, COMPACT_MULTIPLIER_MAX),
            DisplayMode::Stacked => (STACKED_MULTIPLIER_MIN, STACKED_MULTIPLIER_MAX),
            DisplayMode::Detailed => (DETAILED_MULTIPLIER_MIN, DETAILED_MULTIPLIER_MAX),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Compact => "Compact",
            DisplayMode::Stacked => "Stacked",
            DisplayMode::Detailed => "Detailed",
        }
    }
}

/// Linear interpolation of `h` from `[h0, h1]` onto `[m0, m1]`, unclamped.
fn lerp(h: f32, (h0, m0): (f32, f32), (h1, m1): (f32, f32)) -> f32 {
    m0 + (h - h0) / (h1 - h0) * (m1 - m0)
}

/// Size multiplier of `height` under `mode`'s curve.
///
/// Every curve is defined over the whole height domain and clamped to the
/// mode's range, so it is continuous and non-decreasing everywhere.
#[must_use]
pub fn size_multiplier(height: UnifiedHeight, mode: DisplayMode) -> f32 {
    let h = height.value();
    let raw = match mode {
        DisplayMode::Compact => lerp(
            h,
            (MIN_UNIFIED_HEIGHT, COMPACT_MULTIPLIER_MIN),
            (STACKED_THRESHOLD, COMPACT_MULTIPLIER_MAX),
        ),
        DisplayMode::Stacked => lerp(
            h,
            (STACKED_THRESHOLD, STACKED_MULTIPLIER_MIN),
            (DETAILED_THRESHOLD, STACKED_MULTIPLIER_MAX),
        ),
        DisplayMode::Detailed if h < DETAILED_KNEE_HEIGHT => lerp(
            h,
            (DETAILED_THRESHOLD, DETAILED_MULTIPLIER_MIN),
            (DETAILED_KNEE_HEIGHT, DETAILED_MULTIPLIER_KNEE),
        ),
        DisplayMode::Detailed => lerp(
            h,
            (DETAILED_KNEE_HEIGHT, DETAILED_MULTIPLIER_KNEE),
            (MAX_UNIFIED_HEIGHT, DETAILED_MULTIPLIER_MAX),
        ),
    };
    let (lo, hi) = mode.multiplier_range();
    raw.clamp(lo, hi)
}

/// What the render layer sees: a committed height with its derived values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySnapshot {
    pub height: UnifiedHeight,
    pub mode: DisplayMode,
    pub multiplier: f32,
}

impl DisplaySnapshot {
    /// Snapshot with the mode derived from the height.
    #[must_use]
    pub fn of(height: UnifiedHeight) -> Self {
        Self::in_mode(height, height.mode())
    }

    /// Snapshot with the mode pinned (used while a release settles).
    #[must_use]
    pub fn in_mode(height: UnifiedHeight, mode: DisplayMode) -> Self {
        Self {
            height,
            mode,
            multiplier: size_multiplier(height, mode),
        }
    }
}

impl Default for DisplaySnapshot {
    fn default() -> Self {
        Self::of(UnifiedHeight::default())
    }
}

/// Live zoom scalar plus the mode remembered for haptic comparison.
#[derive(Debug, Clone, Default)]
pub struct ZoomModel {
    height: UnifiedHeight,
    mode_memory: DisplayMode,
}

impl ZoomModel {
    #[must_use]
    pub fn new(height: UnifiedHeight) -> Self {
        Self {
            height,
            mode_memory: height.mode(),
        }
    }

    /// Installs a value restored from storage.
    pub fn seed(&mut self, height: UnifiedHeight) {
        self.height = height;
        self.mode_memory = height.mode();
    }

    #[must_use]
    pub fn height(&self) -> UnifiedHeight {
        self.height
    }

    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.height.mode()
    }

    #[must_use]
    pub fn multiplier(&self) -> f32 {
        self.height.multiplier()
    }

    /// Writes the live value. Does not touch the mode memory.
    pub fn set(&mut self, height: UnifiedHeight) {
        self.height = height;
    }

    /// Mode recorded at the last commit (direct selection or settled gesture).
    #[must_use]
    pub fn mode_memory(&self) -> DisplayMode {
        self.mode_memory
    }

    /// Updates the mode memory, returning whether it changed.
    pub fn remember_mode(&mut self, mode: DisplayMode) -> bool {
        let changed = self.mode_memory != mode;
        self.mode_memory = mode;
        changed
    }

    /// Jumps straight to `mode`'s base height.
    ///
    /// Returns true if the remembered mode changed.
    pub fn set_direct(&mut self, mode: DisplayMode) -> bool {
        self.height = mode.base_height();
        self.remember_mode(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn h(value: f32) -> UnifiedHeight {
        UnifiedHeight::new(value)
    }

    #[test]
    fn new_clamps_to_valid_range() {
        assert_eq!(h(0.0).value(), MIN_UNIFIED_HEIGHT);
        assert_eq!(h(1000.0).value(), MAX_UNIFIED_HEIGHT);
        assert_eq!(h(f32::NAN), UnifiedHeight::default());
        assert_eq!(h(f32::INFINITY), UnifiedHeight::default());
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(UnifiedHeight::try_new(39.9).is_none());
        assert!(UnifiedHeight::try_new(160.1).is_none());
        assert!(UnifiedHeight::try_new(f32::NAN).is_none());
        assert_eq!(UnifiedHeight::try_new(72.5).map(UnifiedHeight::value), Some(72.5));
    }

    #[test]
    fn mode_bands_match_thresholds() {
        assert_eq!(h(40.0).mode(), DisplayMode::Compact);
        assert_eq!(h(63.99).mode(), DisplayMode::Compact);
        assert_eq!(h(64.0).mode(), DisplayMode::Stacked);
        assert_eq!(h(79.99).mode(), DisplayMode::Stacked);
        assert_eq!(h(80.0).mode(), DisplayMode::Detailed);
        assert_eq!(h(160.0).mode(), DisplayMode::Detailed);
    }

    #[test]
    fn mode_is_non_decreasing_step_function() {
        let mut previous = DisplayMode::of(h(MIN_UNIFIED_HEIGHT));
        let mut value = MIN_UNIFIED_HEIGHT;
        while value <= MAX_UNIFIED_HEIGHT {
            let mode = DisplayMode::of(h(value));
            assert!(mode >= previous, "mode went down at {value}");
            previous = mode;
            value += 0.25;
        }
    }

    #[test]
    fn multiplier_stays_in_mode_range() {
        let mut value = MIN_UNIFIED_HEIGHT;
        while value <= MAX_UNIFIED_HEIGHT {
            let height = h(value);
            let mode = height.mode();
            let (lo, hi) = mode.multiplier_range();
            let m = size_multiplier(height, mode);
            assert!((lo..=hi).contains(&m), "{m} out of {mode:?} range at {value}");
            value += 0.5;
        }
    }

    #[test]
    fn multiplier_endpoints() {
        assert_abs_diff_eq!(size_multiplier(h(40.0), DisplayMode::Compact), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(size_multiplier(h(64.0), DisplayMode::Compact), 1.6, epsilon = 1e-5);
        assert_abs_diff_eq!(size_multiplier(h(64.0), DisplayMode::Stacked), 0.75, epsilon = 1e-5);
        assert_abs_diff_eq!(size_multiplier(h(80.0), DisplayMode::Stacked), 1.25, epsilon = 1e-5);
        assert_abs_diff_eq!(size_multiplier(h(80.0), DisplayMode::Detailed), 0.75, epsilon = 1e-5);
        assert_abs_diff_eq!(size_multiplier(h(100.0), DisplayMode::Detailed), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(size_multiplier(h(160.0), DisplayMode::Detailed), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn multiplier_is_continuous_across_thresholds() {
        for mode in DisplayMode::ALL {
            for threshold in [STACKED_THRESHOLD, DETAILED_THRESHOLD, DETAILED_KNEE_HEIGHT] {
                let below = size_multiplier(h(threshold - 0.001), mode);
                let above = size_multiplier(h(threshold + 0.001), mode);
                assert!((above - below).abs() < 0.01, "{mode:?} jumps at {threshold}");
            }
        }
    }

    #[test]
    fn multiplier_is_monotonic_for_every_curve() {
        for mode in DisplayMode::ALL {
            let mut previous = size_multiplier(h(MIN_UNIFIED_HEIGHT), mode);
            let mut value = MIN_UNIFIED_HEIGHT;
            while value <= MAX_UNIFIED_HEIGHT {
                let m = size_multiplier(h(value), mode);
                assert!(m >= previous, "{mode:?} decreases at {value}");
                previous = m;
                value += 0.5;
            }
        }
    }

    #[test]
    fn snapping_pulls_onto_nearby_threshold() {
        assert_eq!(h(62.0).snapped(8.0).value(), 64.0);
        assert_eq!(h(66.0).snapped(8.0).value(), 64.0);
        assert_eq!(h(87.9).snapped(8.0).value(), 80.0);
        assert_eq!(h(55.0).snapped(8.0).value(), 55.0);
        assert_eq!(h(100.0).snapped(8.0).value(), 100.0);
    }

    #[test]
    fn snapping_tie_between_thresholds_goes_to_stacked() {
        let snapped = h(72.0).snapped(crate::config::SNAP_TOLERANCE);
        assert_eq!(snapped.value(), STACKED_THRESHOLD);
        assert_eq!(snapped.mode(), DisplayMode::Stacked);
    }

    #[test]
    fn set_direct_jumps_to_base_and_reports_change() {
        let mut model = ZoomModel::new(h(64.0));
        assert!(model.set_direct(DisplayMode::Detailed));
        assert_eq!(model.height().value(), DETAILED_BASE_HEIGHT);
        assert_eq!(model.mode_memory(), DisplayMode::Detailed);

        assert!(!model.set_direct(DisplayMode::Detailed));
        assert!(model.set_direct(DisplayMode::Compact));
        assert_eq!(model.height().value(), MIN_UNIFIED_HEIGHT);
    }

    #[test]
    fn set_keeps_mode_memory() {
        let mut model = ZoomModel::new(h(64.0));
        model.set(h(120.0));
        assert_eq!(model.mode(), DisplayMode::Detailed);
        assert_eq!(model.mode_memory(), DisplayMode::Stacked);
    }

    #[test]
    fn pinned_snapshot_uses_pinned_curve() {
        let snapshot = DisplaySnapshot::in_mode(h(70.0), DisplayMode::Detailed);
        assert_eq!(snapshot.mode, DisplayMode::Detailed);
        assert_abs_diff_eq!(snapshot.multiplier, DETAILED_MULTIPLIER_MIN, epsilon = 1e-5);
    }
}
