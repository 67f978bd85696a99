// SPDX-License-Identifier: MPL-2.0
//! Damped spring used to settle a released pinch onto its target height.
//!
//! Semi-implicit Euler integration of
//! `a = -stiffness * (position - target) - damping * velocity`,
//! subdivided into small steps so a late frame cannot blow up the motion.

use std::time::Duration;

/// Largest integration step (4 ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta under which the spring counts as settled.
const REST_THRESHOLD: f64 = 0.01;

/// Velocity under which the spring counts as settled.
const VELOCITY_THRESHOLD: f64 = 0.05;

const MIN_STIFFNESS: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// Critically damped spring from `initial` toward `target`.
    #[must_use]
    pub fn critically_damped(initial: f64, target: f64, stiffness: f64) -> Self {
        let stiffness = stiffness.max(MIN_STIFFNESS);
        Self {
            position: initial,
            velocity: 0.0,
            target,
            stiffness,
            damping: 2.0 * stiffness.sqrt(),
            at_rest: (initial - target).abs() < REST_THRESHOLD,
        }
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        if self.at_rest {
            self.target
        } else {
            self.position
        }
    }

    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advances the spring by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < REST_THRESHOLD
            && self.velocity.abs() < VELOCITY_THRESHOLD
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_on_target() {
        let mut spring = Spring::critically_damped(70.0, 64.0, 300.0);
        for _ in 0..120 {
            spring.advance(Duration::from_millis(16));
        }
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 64.0);
    }

    #[test]
    fn critical_damping_never_overshoots() {
        let mut spring = Spring::critically_damped(90.0, 80.0, 300.0);
        for _ in 0..200 {
            spring.advance(Duration::from_millis(8));
            assert!(spring.position() >= 80.0 - 1e-9, "overshot to {}", spring.position());
        }
    }

    #[test]
    fn starts_at_rest_when_already_on_target() {
        let spring = Spring::critically_damped(64.0, 64.0, 300.0);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn large_frame_is_subdivided() {
        let mut spring = Spring::critically_damped(160.0, 40.0, 300.0);
        spring.advance(Duration::from_secs(2));
        assert!(spring.position().is_finite());
        assert!(spring.is_at_rest());
    }

    #[test]
    fn zero_duration_does_not_move() {
        let mut spring = Spring::critically_damped(100.0, 80.0, 300.0);
        spring.advance(Duration::ZERO);
        assert_eq!(spring.position(), 100.0);
    }
}
