// SPDX-License-Identifier: MPL-2.0
//! Haptic feedback.
//!
//! Desktops have no actuator, so the default implementation logs each
//! pulse; platforms with one plug in their own [`Haptics`].

use std::sync::atomic::{AtomicUsize, Ordering};

/// Feedback sink for pinch releases and mode changes.
pub trait Haptics: Send + Sync {
    /// Short tap when a pinch or mode button is released.
    fn light_impact(&self);

    /// Tick when the display mode actually changes.
    fn selection_changed(&self);
}

/// Logs pulses at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHaptics;

impl Haptics for LogHaptics {
    fn light_impact(&self) {
        tracing::debug!("haptic: light impact");
    }

    fn selection_changed(&self) {
        tracing::debug!("haptic: selection changed");
    }
}

/// Drops every pulse (haptics disabled in settings).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn light_impact(&self) {}

    fn selection_changed(&self) {}
}

/// Counts pulses; lets tests assert on feedback.
#[derive(Debug, Default)]
pub struct CountingHaptics {
    light: AtomicUsize,
    selection: AtomicUsize,
}

impl CountingHaptics {
    #[must_use]
    pub fn light_count(&self) -> usize {
        self.light.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn selection_count(&self) -> usize {
        self.selection.load(Ordering::SeqCst)
    }
}

impl Haptics for CountingHaptics {
    fn light_impact(&self) {
        self.light.fetch_add(1, Ordering::SeqCst);
    }

    fn selection_changed(&self) {
        self.selection.fetch_add(1, Ordering::SeqCst);
    }
}
