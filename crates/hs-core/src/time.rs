//! Simulation time model.
//!
//! Time has two faces.  [`Step`] is the integer loop counter that schedules
//! arrivals exactly.  [`SimClock`] also keeps a floating-point timestamp that
//! advances by a caller-chosen delta each step; hop records carry that
//! timestamp.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Step ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Return the step `n` after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Step {
        Step(self.0 + n)
    }

    /// Steps elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Step) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Step counter plus a continuous timestamp.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimClock {
    current_step: Step,
    current_time: f64,
    delta_time:   f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current_step(&self) -> Step {
        self.current_step
    }

    /// Timestamp reached so far (sum of all deltas since the last reset).
    #[inline]
    pub fn time(&self) -> f64 {
        self.current_time
    }

    /// Delta passed to the most recent [`advance`](Self::advance).
    #[inline]
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Advance one step, moving the timestamp forward by `dt`.
    pub fn advance(&mut self, dt: f64) -> CoreResult<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(CoreError::InvalidTimeStep(dt));
        }
        self.delta_time = dt;
        self.current_time += dt;
        self.current_step = self.current_step + 1;
        Ok(())
    }

    /// Back to step 0, timestamp 0.  The last delta is kept.
    pub fn reset(&mut self) {
        self.current_step = Step::ZERO;
        self.current_time = 0.0;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t={:.3})", self.current_step, self.current_time)
    }
}
