//! Declarative eased transitions
//!
//! A [`Transition`] interpolates between two values following an
//! [`AnimationSpec`]. It owns only its own elapsed time; advancing it is
//! the caller's job.

use crate::spec::AnimationSpec;
use crate::values::Interpolate;

/// An eased transition between two values
#[derive(Clone, Debug)]
pub struct Transition<T: Interpolate> {
    from: T,
    to: T,
    spec: AnimationSpec,
    elapsed: f32,
}

impl<T: Interpolate> Transition<T> {
    pub fn new(from: T, to: T, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            spec,
            elapsed: 0.0,
        }
    }

    pub fn spec(&self) -> &AnimationSpec {
        &self.spec
    }

    /// Seconds since the transition started, including its delay
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by `dt` seconds; invalid deltas count as zero
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    /// Value at the current elapsed time
    pub fn sample(&self) -> T {
        let progress = self.spec.progress_at(self.elapsed);
        self.from.lerp(&self.to, progress.fraction)
    }

    pub fn is_finished(&self) -> bool {
        self.spec.progress_at(self.elapsed).finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::Color;

    #[test]
    fn test_float_transition() {
        let mut t = Transition::new(1.0_f32, 1.2, AnimationSpec::linear(0.5));
        assert_eq!(t.sample(), 1.0);

        t.advance(0.25);
        assert!((t.sample() - 1.1).abs() < 1e-5);
        assert!(!t.is_finished());

        t.advance(0.5);
        assert!((t.sample() - 1.2).abs() < 1e-6);
        assert!(t.is_finished());
    }

    #[test]
    fn test_color_transition() {
        let mut t = Transition::new(Color::BLACK, Color::WHITE, AnimationSpec::linear(1.0));
        t.advance(0.5);
        assert!((t.sample().r - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut t = Transition::new(0.0_f32, 1.0, AnimationSpec::linear(1.0));
        t.advance(f32::NAN);
        t.advance(-2.0);
        assert_eq!(t.elapsed(), 0.0);
    }
}
