//! Animation descriptors
//!
//! An [`AnimationSpec`] is the explicit, per-instance description of how a
//! value travels to a new target: a timing curve (eased or spring), an
//! optional delay, a repeat mode and a speed multiplier.
//!
//! ```rust
//! use soothing_animation::{AnimationSpec, Repeat};
//!
//! // Linear 2s loop that restarts from the beginning each time
//! let spin = AnimationSpec::linear(2.0).repeat_forever(false);
//! assert_eq!(spin.repeat, Repeat::Forever { autoreverse: false });
//! ```

use soothing_core::{ensure_positive, ConfigError};

use crate::easing::Easing;
use crate::spring::SpringConfig;

/// How many times an animation plays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    /// Play once and hold the final value
    #[default]
    Once,
    /// Loop indefinitely; with `autoreverse` every other cycle plays backwards
    Forever { autoreverse: bool },
    /// Play `times` cycles in total
    Count { times: u32, autoreverse: bool },
}

/// Timing curve of an animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// Fixed-duration eased curve
    Eased(Easing),
    /// Physics spring; runs until settled and ignores `duration`
    Spring(SpringConfig),
}

/// Explicit animation descriptor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    /// Length of one cycle in seconds
    pub duration: f32,
    /// Seconds to wait before the first cycle
    pub delay: f32,
    pub curve: Curve,
    pub repeat: Repeat,
    /// Playback rate multiplier (2.0 plays twice as fast)
    pub speed: f32,
}

/// Where an animation is at a given moment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    /// Eased fraction between the start (0.0) and end (1.0) values
    pub fraction: f32,
    /// Whether the animation has played out
    pub finished: bool,
}

impl AnimationSpec {
    /// Eased animation of `duration` seconds
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            duration,
            delay: 0.0,
            curve: Curve::Eased(easing),
            repeat: Repeat::Once,
            speed: 1.0,
        }
    }

    pub fn linear(duration: f32) -> Self {
        Self::new(duration, Easing::Linear)
    }

    pub fn ease_in(duration: f32) -> Self {
        Self::new(duration, Easing::EaseIn)
    }

    pub fn ease_out(duration: f32) -> Self {
        Self::new(duration, Easing::EaseOut)
    }

    pub fn ease_in_out(duration: f32) -> Self {
        Self::new(duration, Easing::EaseInOut)
    }

    /// Spring-driven animation
    pub fn spring(config: SpringConfig) -> Self {
        Self {
            duration: 0.0,
            delay: 0.0,
            curve: Curve::Spring(config),
            repeat: Repeat::Once,
            speed: 1.0,
        }
    }

    /// Wait `delay` seconds before starting
    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Loop indefinitely
    pub fn repeat_forever(mut self, autoreverse: bool) -> Self {
        self.repeat = Repeat::Forever { autoreverse };
        self
    }

    /// Play `times` cycles
    pub fn repeat_count(mut self, times: u32, autoreverse: bool) -> Self {
        self.repeat = Repeat::Count { times, autoreverse };
        self
    }

    /// Playback rate multiplier
    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Spring configuration, if this is a spring animation
    pub fn spring_config(&self) -> Option<SpringConfig> {
        match self.curve {
            Curve::Spring(config) => Some(config),
            Curve::Eased(_) => None,
        }
    }

    /// Reject non-finite or non-positive timing values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Curve::Eased(_) = self.curve {
            ensure_positive("duration", self.duration)?;
        }
        ensure_positive("speed", self.speed)?;
        if !self.delay.is_finite() {
            return Err(ConfigError::NonFinite { field: "delay" });
        }
        Ok(())
    }

    /// Progress of an eased animation `elapsed` seconds after it started
    ///
    /// Springs have no closed-form progress; for them this reports the
    /// start value until they are stepped by an [`AnimatedParam`](crate::AnimatedParam).
    pub fn progress_at(&self, elapsed: f32) -> Progress {
        let easing = match self.curve {
            Curve::Eased(easing) => easing,
            Curve::Spring(_) => {
                return Progress {
                    fraction: 0.0,
                    finished: false,
                }
            }
        };

        let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };
        let local = (elapsed - self.delay) * self.speed.max(0.0);
        if local < 0.0 {
            return Progress {
                fraction: 0.0,
                finished: false,
            };
        }

        if self.duration <= 0.0 {
            return Progress {
                fraction: 1.0,
                finished: true,
            };
        }

        let cycles = local / self.duration;
        let (autoreverse, total) = match self.repeat {
            Repeat::Once => (false, Some(1)),
            Repeat::Forever { autoreverse } => (autoreverse, None),
            Repeat::Count { times, autoreverse } => (autoreverse, Some(times.max(1))),
        };

        // Past the last cycle: hold the value the last cycle ended on
        if let Some(total) = total {
            if cycles >= total as f32 {
                let reversed_last = autoreverse && total % 2 == 0;
                return Progress {
                    fraction: if reversed_last { 0.0 } else { 1.0 },
                    finished: true,
                };
            }
        }

        let cycle = cycles.floor();
        let t = cycles - cycle;
        let reversed = autoreverse && (cycle as u64) % 2 == 1;
        let fraction = if reversed {
            easing.apply(1.0 - t)
        } else {
            easing.apply(t)
        };
        Progress {
            fraction,
            finished: false,
        }
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::ease_in_out(0.35)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_holds_final_value() {
        let spec = AnimationSpec::linear(1.0);
        assert!((spec.progress_at(0.25).fraction - 0.25).abs() < 1e-6);
        let end = spec.progress_at(3.0);
        assert_eq!(end.fraction, 1.0);
        assert!(end.finished);
    }

    #[test]
    fn test_delay() {
        let spec = AnimationSpec::linear(1.0).delay(0.5);
        assert_eq!(spec.progress_at(0.4).fraction, 0.0);
        assert!((spec.progress_at(1.0).fraction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_forever_without_autoreverse_restarts() {
        let spec = AnimationSpec::linear(2.0).repeat_forever(false);
        assert!((spec.progress_at(2.5).fraction - 0.25).abs() < 1e-5);
        assert!(!spec.progress_at(100.0).finished);
    }

    #[test]
    fn test_autoreverse_plays_backwards() {
        let spec = AnimationSpec::linear(1.0).repeat_forever(true);
        assert!((spec.progress_at(0.75).fraction - 0.75).abs() < 1e-5);
        assert!((spec.progress_at(1.25).fraction - 0.75).abs() < 1e-5);
        assert!((spec.progress_at(2.25).fraction - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_speed_scales_time() {
        let spec = AnimationSpec::linear(1.0).speed(2.0);
        assert!((spec.progress_at(0.25).fraction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_count_with_autoreverse_ends_at_start() {
        let spec = AnimationSpec::linear(1.0).repeat_count(2, true);
        let end = spec.progress_at(5.0);
        assert!(end.finished);
        assert_eq!(end.fraction, 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(AnimationSpec::linear(1.0).validate().is_ok());
        assert!(AnimationSpec::linear(0.0).validate().is_err());
        assert!(AnimationSpec::linear(1.0).speed(-1.0).validate().is_err());
        assert!(AnimationSpec::spring(SpringConfig::stiff()).validate().is_ok());
    }
}
