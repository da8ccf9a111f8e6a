//! Animation clock
//!
//! Every component instance owns one [`AnimationClock`]. The clock owns
//! the instance's discrete timers in a slot map and is advanced by the
//! host with simulated time; nothing here reads the wall clock.
//!
//! A [`TimerSlot`] is a named holder for at most one timer handle.
//! Restarting a slot cancels its previous timer before registering the new
//! one, so a parameter is never driven by two timers at once.
//!
//! ```rust
//! use soothing_animation::{AnimationClock, TimerSlot};
//!
//! let mut clock = AnimationClock::new();
//! let mut progress = TimerSlot::new("progress");
//!
//! progress.restart(&mut clock, 0.1, true);
//! progress.restart(&mut clock, 0.1, true);
//! assert_eq!(clock.active_timers(), 1);
//!
//! let fired = clock.tick(0.25);
//! assert_eq!(progress.count_in(&fired), 2);
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::trace;

use crate::timer::Timer;

new_key_type! {
    /// Handle to a timer registered with an [`AnimationClock`]
    pub struct TimerId;
}

/// Per-instance owner of discrete timers
#[derive(Debug, Default)]
pub struct AnimationClock {
    timers: SlotMap<TimerId, Timer>,
    ticks: u64,
    elapsed: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer and return its handle
    pub fn start_timer(&mut self, interval: f32, repeating: bool) -> TimerId {
        let id = self.timers.insert(Timer::new(interval, repeating));
        trace!(?id, interval, repeating, "timer started");
        id
    }

    /// Cancel a timer; returns whether it was still registered
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(id).is_some();
        if removed {
            trace!(?id, "timer cancelled");
        }
        removed
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn timer(&self, id: TimerId) -> Option<&Timer> {
        self.timers.get(id)
    }

    /// Number of registered timers
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of `tick` calls so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds accumulated across ticks
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance all timers by `dt` seconds
    ///
    /// Returns one entry per fire, ordered by when the fire happened within
    /// `dt`. A repeating timer covering several intervals appears several
    /// times. One-shot timers are removed once they fire. A negative or
    /// non-finite `dt` counts as zero.
    pub fn tick(&mut self, dt: f32) -> SmallVec<[TimerId; 4]> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.ticks += 1;
        self.elapsed += dt as f64;

        let mut fires: SmallVec<[(f64, TimerId); 4]> = SmallVec::new();
        for (id, timer) in self.timers.iter_mut() {
            fires.extend(timer.advance(dt).into_iter().map(|offset| (offset, id)));
        }
        // Stable sort keeps registration order for simultaneous fires
        fires.sort_by(|a, b| a.0.total_cmp(&b.0));

        self.timers.retain(|_, timer| !timer.is_spent());

        if !fires.is_empty() {
            trace!(dt, fired = fires.len(), "clock tick");
        }
        fires.into_iter().map(|(_, id)| id).collect()
    }
}

/// Named holder of at most one timer handle
#[derive(Debug, Clone)]
pub struct TimerSlot {
    name: &'static str,
    id: Option<TimerId>,
}

impl TimerSlot {
    pub fn new(name: &'static str) -> Self {
        Self { name, id: None }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    /// Cancel the held timer (if any), then start a fresh one
    pub fn restart(
        &mut self,
        clock: &mut AnimationClock,
        interval: f32,
        repeating: bool,
    ) -> TimerId {
        self.cancel(clock);
        let id = clock.start_timer(interval, repeating);
        trace!(slot = self.name, ?id, "timer slot restarted");
        self.id = Some(id);
        id
    }

    /// Cancel the held timer
    pub fn cancel(&mut self, clock: &mut AnimationClock) {
        if let Some(id) = self.id.take() {
            clock.cancel(id);
        }
    }

    /// Whether the held timer is still registered
    pub fn is_active(&self, clock: &AnimationClock) -> bool {
        self.id.is_some_and(|id| clock.is_active(id))
    }

    /// How many times the held timer appears in a tick's fire list
    pub fn count_in(&self, fired: &[TimerId]) -> usize {
        match self.id {
            Some(id) => fired.iter().filter(|f| **f == id).count(),
            None => 0,
        }
    }

    /// Whether the held timer fired during a tick
    pub fn fired_in(&self, fired: &[TimerId]) -> bool {
        self.count_in(fired) > 0
    }

    /// Fires of the held timer since it was (re)started
    pub fn fires(&self, clock: &AnimationClock) -> u64 {
        self.id
            .and_then(|id| clock.timer(id))
            .map_or(0, Timer::fires)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_orders_fires() {
        let mut clock = AnimationClock::new();
        let slow = clock.start_timer(0.3, true);
        let fast = clock.start_timer(0.2, true);

        let fired = clock.tick(0.5);
        // fast@0.2, slow@0.3, fast@0.4
        assert_eq!(fired.as_slice(), &[fast, slow, fast]);
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_one_shot_is_removed_after_firing() {
        let mut clock = AnimationClock::new();
        let id = clock.start_timer(0.5, false);
        assert!(clock.tick(0.4).is_empty());
        assert_eq!(clock.tick(0.2).as_slice(), &[id]);
        assert!(!clock.is_active(id));
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_restart_leaves_single_handle() {
        let mut clock = AnimationClock::new();
        let mut slot = TimerSlot::new("progress");

        let first = slot.restart(&mut clock, 0.01, true);
        for _ in 0..30 {
            clock.tick(0.01);
        }
        assert_eq!(slot.fires(&clock), 30);

        let second = slot.restart(&mut clock, 0.01, true);
        assert_ne!(first, second);
        assert!(!clock.is_active(first));
        assert_eq!(clock.active_timers(), 1);

        for _ in 0..10 {
            clock.tick(0.01);
        }
        assert_eq!(slot.fires(&clock), 10);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut clock = AnimationClock::new();
        let mut slot = TimerSlot::new("pop");
        slot.restart(&mut clock, 0.1, false);
        slot.cancel(&mut clock);

        assert!(clock.tick(1.0).is_empty());
        assert!(!slot.is_active(&clock));
    }

    #[test]
    fn test_negative_dt_counts_as_zero() {
        let mut clock = AnimationClock::new();
        clock.start_timer(0.1, true);
        assert!(clock.tick(-5.0).is_empty());
        assert!(clock.tick(f32::INFINITY).is_empty());
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.ticks(), 2);
    }
}
