//! Animated parameters
//!
//! An [`AnimatedParam`] is one named scalar a component draws from: a
//! progress fraction, a rotation angle, a scale. It holds its current
//! value, the target it is heading to, a [`ParamDomain`] every write is
//! normalised into, and at most one active motion.
//!
//! Starting a new motion replaces the old one, so a parameter is never
//! driven by two animations at once.
//!
//! ```rust
//! use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain};
//!
//! let mut phase = AnimatedParam::new("phase", 0.0)
//!     .with_domain(ParamDomain::Wrap { min: 0.0, max: 360.0 });
//! phase.animate_to(360.0, AnimationSpec::linear(2.0).repeat_forever(false));
//!
//! phase.step(1.5);
//! assert!((phase.value() - 270.0).abs() < 1e-3);
//! ```

use tracing::trace;

use crate::redraw::RedrawScheduler;
use crate::spec::AnimationSpec;
use crate::spring::Spring;
use crate::transition::Transition;

/// Range a parameter's value is normalised into
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ParamDomain {
    /// Any finite value
    #[default]
    Unbounded,
    /// Clamped to `min..=max`
    Clamp { min: f32, max: f32 },
    /// Wrapped into `min..max` (angles, phases)
    Wrap { min: f32, max: f32 },
}

impl ParamDomain {
    /// Unit interval, for progress and opacity
    pub const UNIT: ParamDomain = ParamDomain::Clamp { min: 0.0, max: 1.0 };

    /// Full turn in degrees
    pub const DEGREES: ParamDomain = ParamDomain::Wrap {
        min: 0.0,
        max: 360.0,
    };

    /// Bring `value` into the domain; NaN becomes the domain's lower bound
    pub fn normalize(&self, value: f32) -> f32 {
        match *self {
            ParamDomain::Unbounded => {
                if value.is_nan() {
                    0.0
                } else {
                    value
                }
            }
            ParamDomain::Clamp { min, max } => {
                if value.is_nan() {
                    min
                } else {
                    value.clamp(min, max)
                }
            }
            ParamDomain::Wrap { min, max } => {
                let span = max - min;
                if !value.is_finite() || span <= 0.0 {
                    return min;
                }
                let wrapped = (value - min).rem_euclid(span) + min;
                // rem_euclid can round up to exactly `max`
                if wrapped >= max {
                    min
                } else {
                    wrapped
                }
            }
        }
    }
}

/// What is currently moving a parameter
#[derive(Clone, Debug, Default)]
pub enum Motion {
    #[default]
    None,
    Transition(Transition<f32>),
    Spring(Spring),
}

/// A named, animatable scalar
#[derive(Clone, Debug)]
pub struct AnimatedParam {
    name: &'static str,
    current: f32,
    target: f32,
    domain: ParamDomain,
    motion: Motion,
    redraw: Option<RedrawScheduler>,
}

impl AnimatedParam {
    pub fn new(name: &'static str, initial: f32) -> Self {
        let initial = ParamDomain::Unbounded.normalize(initial);
        Self {
            name,
            current: initial,
            target: initial,
            domain: ParamDomain::Unbounded,
            motion: Motion::None,
            redraw: None,
        }
    }

    /// Set the domain and renormalise the current value
    pub fn with_domain(mut self, domain: ParamDomain) -> Self {
        self.domain = domain;
        self.current = domain.normalize(self.current);
        self.target = self.current;
        self
    }

    /// Notify `scheduler` on every value change
    pub fn with_redraw(mut self, scheduler: &RedrawScheduler) -> Self {
        self.redraw = Some(scheduler.clone());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn domain(&self) -> ParamDomain {
        self.domain
    }

    /// Current (normalised) value
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Value the active motion is heading to, or the last value set
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.motion, Motion::None)
    }

    /// Jump to `value` immediately, cancelling any motion
    pub fn set(&mut self, value: f32) {
        self.motion = Motion::None;
        self.target = value;
        self.write(value);
    }

    /// Stop the active motion where it is
    pub fn stop(&mut self) {
        self.motion = Motion::None;
        self.target = self.current;
    }

    /// Start animating towards `target`, replacing any active motion
    ///
    /// Springs pick up the velocity of a spring that was already running.
    pub fn animate_to(&mut self, target: f32, spec: AnimationSpec) {
        let target = ParamDomain::Unbounded.normalize(target);
        self.target = target;

        self.motion = match spec.spring_config() {
            Some(config) => {
                let velocity = match &self.motion {
                    Motion::Spring(spring) => spring.velocity(),
                    _ => 0.0,
                };
                let scale = (target - self.current).abs().max(1.0);
                let mut spring = Spring::new(config, self.current)
                    .with_velocity(velocity)
                    .with_precision(scale * 1e-4, scale * 1e-3);
                spring.set_target(target);
                Motion::Spring(spring)
            }
            None => Motion::Transition(Transition::new(self.current, target, spec)),
        };
        trace!(param = self.name, from = self.current, to = target, "animation started");
    }

    /// Advance the active motion by `dt` seconds
    ///
    /// Returns whether the value changed.
    pub fn step(&mut self, dt: f32) -> bool {
        let (raw, finished) = match &mut self.motion {
            Motion::None => return false,
            Motion::Transition(transition) => {
                transition.advance(dt);
                (transition.sample(), transition.is_finished())
            }
            Motion::Spring(spring) => {
                spring.step(dt);
                (spring.value(), spring.is_settled())
            }
        };

        if finished {
            self.motion = Motion::None;
            trace!(param = self.name, value = raw, "animation finished");
        }
        self.write(raw)
    }

    fn write(&mut self, raw: f32) -> bool {
        let value = self.domain.normalize(raw);
        if value == self.current {
            return false;
        }
        self.current = value;
        if let Some(redraw) = &self.redraw {
            redraw.request();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringConfig;

    #[test]
    fn test_domains() {
        assert_eq!(ParamDomain::UNIT.normalize(1.7), 1.0);
        assert_eq!(ParamDomain::UNIT.normalize(f32::NAN), 0.0);
        assert_eq!(ParamDomain::DEGREES.normalize(360.0), 0.0);
        assert!((ParamDomain::DEGREES.normalize(-90.0) - 270.0).abs() < 1e-4);
        assert!((ParamDomain::DEGREES.normalize(725.0) - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_set_cancels_motion() {
        let mut p = AnimatedParam::new("scale", 1.0);
        p.animate_to(2.0, AnimationSpec::linear(1.0));
        assert!(p.is_animating());

        p.set(0.5);
        assert!(!p.is_animating());
        assert_eq!(p.value(), 0.5);
        assert!(!p.step(0.5));
    }

    #[test]
    fn test_transition_reaches_target() {
        let mut p = AnimatedParam::new("opacity", 1.0).with_domain(ParamDomain::UNIT);
        p.animate_to(0.0, AnimationSpec::ease_out(0.5));

        for _ in 0..40 {
            p.step(1.0 / 60.0);
        }
        assert_eq!(p.value(), 0.0);
        assert!(!p.is_animating());
    }

    #[test]
    fn test_animate_to_replaces_motion() {
        let mut p = AnimatedParam::new("x", 0.0);
        p.animate_to(10.0, AnimationSpec::linear(1.0));
        p.step(0.5);
        assert!((p.value() - 5.0).abs() < 1e-4);

        // New motion starts from where the old one was
        p.animate_to(0.0, AnimationSpec::linear(1.0));
        p.step(0.5);
        assert!((p.value() - 2.5).abs() < 1e-4);
        assert_eq!(p.target(), 0.0);
    }

    #[test]
    fn test_spring_settles() {
        let mut p = AnimatedParam::new("width", 100.0);
        p.animate_to(160.0, AnimationSpec::spring(SpringConfig::interpolating(0.5, 100.0, 6.0)));

        for _ in 0..600 {
            p.step(1.0 / 60.0);
        }
        assert!(!p.is_animating());
        assert!((p.value() - 160.0).abs() < 0.1);
    }

    #[test]
    fn test_writes_request_single_redraw() {
        let redraw = RedrawScheduler::new();
        let mut a = AnimatedParam::new("a", 0.0).with_redraw(&redraw);
        let mut b = AnimatedParam::new("b", 0.0).with_redraw(&redraw);

        a.set(1.0);
        b.set(2.0);
        a.set(3.0);

        assert_eq!(redraw.requests(), 3);
        assert!(redraw.take());
        assert!(!redraw.take());
    }

    #[test]
    fn test_unchanged_value_does_not_request_redraw() {
        let redraw = RedrawScheduler::new();
        let mut p = AnimatedParam::new("p", 1.0).with_redraw(&redraw);
        p.set(1.0);
        assert!(!redraw.is_pending());
    }
}
