//! Discrete timers
//!
//! A [`Timer`] fires every `interval` seconds of simulated time. A single
//! large `advance` catches up on every interval it covers.

use smallvec::SmallVec;

/// A discrete repeating or one-shot timer
#[derive(Clone, Debug, PartialEq)]
pub struct Timer {
    interval: f64,
    elapsed: f64,
    repeating: bool,
    fires: u64,
}

/// Slack absorbing accumulated f32 frame error when an advance lands on a
/// boundary (one microsecond)
const BOUNDARY_EPSILON: f64 = 1e-6;

impl Timer {
    /// Create a timer firing every `interval` seconds
    ///
    /// Non-finite or non-positive intervals are clamped to a tiny positive
    /// value; callers validate configuration before getting here.
    pub fn new(interval: f32, repeating: bool) -> Self {
        let interval = if interval.is_finite() && interval > 0.0 {
            interval as f64
        } else {
            1e-6
        };
        Self {
            interval,
            elapsed: 0.0,
            repeating,
            fires: 0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval as f32
    }

    /// Total number of times this timer has fired
    pub fn fires(&self) -> u64 {
        self.fires
    }

    /// A one-shot timer that already fired
    pub fn is_spent(&self) -> bool {
        !self.repeating && self.fires > 0
    }

    /// Seconds until the next fire
    pub fn remaining(&self) -> f32 {
        (self.interval - self.elapsed).max(0.0) as f32
    }

    /// Advance by `dt` seconds and return the offsets (seconds into `dt`)
    /// at which the timer fired, in order
    pub fn advance(&mut self, dt: f32) -> SmallVec<[f64; 4]> {
        let mut offsets = SmallVec::new();
        if self.is_spent() || !dt.is_finite() || dt <= 0.0 {
            return offsets;
        }

        let dt = dt as f64;
        let mut consumed = 0.0;
        loop {
            let until_fire = self.interval - self.elapsed;
            if consumed + until_fire > dt + BOUNDARY_EPSILON {
                self.elapsed += dt - consumed;
                break;
            }
            consumed += until_fire;
            self.elapsed = 0.0;
            self.fires += 1;
            offsets.push(consumed.min(dt));
            if !self.repeating {
                break;
            }
        }
        offsets
    }
}
