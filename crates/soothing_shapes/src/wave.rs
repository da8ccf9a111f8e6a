//! Sine wave shapes
//!
//! Every liquid surface in the library is the same curve,
//! `baseline + amplitude * sin(2π x / period + phase)`, sampled at a fixed
//! horizontal step and closed into a filled region. The presets below
//! pick the parameters for each component.

use std::f32::consts::PI;

use soothing_core::Path;

/// Horizontal sampling step, in points, used by the presets
pub const DEFAULT_STEP: f32 = 1.0;

/// Parameters of a horizontal sine wave
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    /// Peak deviation from the baseline
    pub amplitude: f32,
    /// Horizontal distance of one full oscillation
    pub period: f32,
    /// Phase shift in radians
    pub phase: f32,
    /// Vertical position of the resting surface
    pub baseline: f32,
}

impl WaveParams {
    pub fn new(amplitude: f32, period: f32, phase: f32, baseline: f32) -> Self {
        Self {
            amplitude,
            period,
            phase,
            baseline,
        }
    }
}

/// Height of the wave at `x`
///
/// A non-positive period degenerates to a flat surface at the baseline.
pub fn wave_y(x: f32, params: &WaveParams) -> f32 {
    if params.period <= 0.0 || !params.period.is_finite() {
        return params.baseline;
    }
    params.baseline + params.amplitude * (2.0 * PI * x / params.period + params.phase).sin()
}

/// Sample x positions `from..to` at `step`, always including `to`
fn samples(from: f32, to: f32, step: f32) -> impl Iterator<Item = f32> {
    let step = if step.is_finite() && step > 0.0 { step } else { DEFAULT_STEP };
    let span = (to - from).max(0.0);
    let count = (span / step).ceil() as usize;
    (0..=count).map(move |i| (from + i as f32 * step).min(to))
}

/// Open polyline tracing the wave between `from` and `to`
pub fn wave_line(from: f32, to: f32, step: f32, params: &WaveParams) -> Path {
    let mut path = Path::new();
    for (i, x) in samples(from, to, step).enumerate() {
        let y = wave_y(x, params);
        path = if i == 0 {
            path.move_to(x, y)
        } else {
            path.line_to(x, y)
        };
    }
    path
}

/// Region between the wave (swept over `from..to`) and the horizontal
/// line `y = edge`
///
/// With `edge` below the surface this is the liquid under the wave; with
/// `edge` above it this is the body hanging over the wave.
pub fn wave_band(from: f32, to: f32, edge: f32, step: f32, params: &WaveParams) -> Path {
    let mut path = Path::new().move_to(from, edge);
    for x in samples(from, to, step) {
        path = path.line_to(x, wave_y(x, params));
    }
    path.line_to(to, edge).close()
}

/// Closed fill under the wave across a `width` × `height` frame
pub fn wave_fill(width: f32, height: f32, step: f32, params: &WaveParams) -> Path {
    wave_band(0.0, width, height, step, params)
}

// ─────────────────────────────────────────────────────────────────────────────
// Presets
// ─────────────────────────────────────────────────────────────────────────────

/// Liquid level inside a circular button of diameter `size`
///
/// `percent` is the fill level in 0.0..=1.0, `offset_degrees` the phase of
/// the surface. One period spans the button; the surface bobs by 1.5% of
/// the size. The result covers the square frame and is meant to be
/// clipped to the circle.
pub fn circular_fill(size: f32, percent: f32, offset_degrees: f32) -> Path {
    let amplitude = 0.015 * size;
    let percent = percent.clamp(0.0, 1.0);
    let params = WaveParams {
        amplitude,
        period: size,
        phase: offset_degrees.to_radians(),
        baseline: (1.0 - percent) * (size - amplitude),
    };
    wave_fill(size, size, DEFAULT_STEP, &params)
}

/// Fluid surface for a frame of `width` × `height` at animation `time`
///
/// Two oscillations per frame height, sweeping across three frame widths
/// so the surface can slide sideways. The fill extends one frame height
/// below the frame so it still covers the frame when raised.
pub fn fluid(width: f32, height: f32, time: f32, curve_height: f32) -> Path {
    let params = WaveParams {
        amplitude: curve_height,
        period: height / 2.0,
        phase: 4.0 * PI * time,
        baseline: height / 2.0,
    };
    wave_band(0.0, width * 3.0, height * 2.0, DEFAULT_STEP, &params)
}

/// Ghost body: everything from the top of the frame down to a wavy hem
/// at mid height
///
/// `curve_length` is the number of half oscillations per frame height.
pub fn ghost_hem(width: f32, height: f32, time: f32, curve_height: f32, curve_length: f32) -> Path {
    let params = ghost_params(height, time, curve_height, curve_length);
    wave_band(0.0, width, 0.0, DEFAULT_STEP, &params)
}

fn ghost_params(height: f32, time: f32, curve_height: f32, curve_length: f32) -> WaveParams {
    let period = if curve_length > 0.0 {
        2.0 * height / curve_length
    } else {
        0.0
    };
    WaveParams {
        amplitude: curve_height,
        period,
        phase: curve_length * PI * time,
        baseline: height / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::PathCommand;

    #[test]
    fn test_wave_is_periodic() {
        let params = WaveParams::new(12.0, 80.0, 0.7, 40.0);
        for i in 0..50 {
            let x = i as f32 * 3.7;
            let a = wave_y(x, &params);
            let b = wave_y(x + params.period, &params);
            assert!((a - b).abs() < 1e-3, "x = {x}: {a} vs {b}");
        }
    }

    #[test]
    fn test_wave_peaks() {
        let params = WaveParams::new(5.0, 100.0, 0.0, 50.0);
        assert!((wave_y(25.0, &params) - 55.0).abs() < 1e-4);
        assert!((wave_y(75.0, &params) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_period_is_flat() {
        let params = WaveParams::new(5.0, 0.0, 0.0, 10.0);
        assert_eq!(wave_y(3.0, &params), 10.0);
    }

    #[test]
    fn test_fill_is_closed_and_spans_frame() {
        let path = wave_fill(100.0, 100.0, 1.0, &WaveParams::new(2.0, 100.0, 0.0, 50.0));
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));

        let bounds = path.bounds();
        assert!((bounds.min_x() - 0.0).abs() < 1e-4);
        assert!((bounds.max_x() - 100.0).abs() < 1e-4);
        assert!((bounds.max_y() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_circular_fill_levels() {
        let empty = circular_fill(250.0, 0.0, 0.0).bounds();
        let half = circular_fill(250.0, 0.5, 0.0).bounds();
        let full = circular_fill(250.0, 1.0, 0.0).bounds();

        // Surface rises as percent grows
        assert!(empty.min_y() > half.min_y());
        assert!(half.min_y() > full.min_y());
        assert!(full.min_y() < 0.0 + 0.015 * 250.0 + 1e-3);
    }

    #[test]
    fn test_presets_are_idempotent() {
        assert_eq!(circular_fill(250.0, 0.5, 90.0), circular_fill(250.0, 0.5, 90.0));
        assert_eq!(fluid(117.0, 350.0, 0.42, 20.0), fluid(117.0, 350.0, 0.42, 20.0));
        assert_eq!(
            ghost_hem(200.0, 500.0, 0.3, 12.0, 20.0),
            ghost_hem(200.0, 500.0, 0.3, 12.0, 20.0)
        );
    }

    #[test]
    fn test_ghost_hem_period() {
        let params = ghost_params(500.0, 0.0, 12.0, 20.0);
        assert!((params.period - 50.0).abs() < 1e-4);
    }
}
