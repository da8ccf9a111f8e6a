//! Easing curves
//!
//! The named curves are the standard CSS/UIKit timing functions expressed
//! as cubic Béziers, so `EaseInOut` here matches `ease-in-out` elsewhere.

use serde::Deserialize;

/// Timing curve applied to a normalized time value
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Slow start
    EaseIn,
    /// Slow end
    EaseOut,
    /// Slow start and end
    #[default]
    EaseInOut,
    /// Custom cubic Bézier with control points `(x1, y1)` and `(x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Control points of the underlying cubic Bézier, `None` for linear
    pub fn control_points(&self) -> Option<(f32, f32, f32, f32)> {
        match *self {
            Easing::Linear => None,
            Easing::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Easing::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Easing::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Easing::CubicBezier(x1, y1, x2, y2) => Some((x1, y1, x2, y2)),
        }
    }

    /// Apply the curve to `t` (clamped to 0.0..=1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self.control_points() {
            None => t,
            Some(_) if t == 0.0 || t == 1.0 => t,
            Some((x1, y1, x2, y2)) => {
                let s = solve_parameter(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }
}

/// One coordinate of a cubic Bézier anchored at 0 and 1
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_derivative(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate is `x`
fn solve_parameter(x: f32, x1: f32, x2: f32) -> f32 {
    // Newton-Raphson first, bisection if the slope flattens out
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < 1e-6 {
            return s;
        }
        let d = bezier_derivative(s, x1, x2);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-4);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_curve_shapes() {
        assert!(Easing::EaseIn.apply(0.3) < 0.3);
        assert!(Easing::EaseOut.apply(0.3) > 0.3);
    }

    #[test]
    fn test_monotonic() {
        let mut last = 0.0;
        for i in 0..=100 {
            let v = Easing::EaseOut.apply(i as f32 / 100.0);
            assert!(v >= last - 1e-5);
            last = v;
        }
    }
}
