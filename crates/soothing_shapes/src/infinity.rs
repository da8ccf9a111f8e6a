//! Infinity outline and its traveling trim window

use soothing_core::{Path, Point};
use tracing::trace;

use crate::indicator::TrimRange;

/// Reference width the outline's control points are laid out in
const DESIGN_SIZE: f32 = 400.0;

/// Closed figure-eight centered on `center`
///
/// Four cubic segments mirrored about both midlines. Lobes reach
/// ±0.375·size horizontally and ±0.18·size vertically at the control
/// polygon. The outline starts at the lower-left crossing and runs
/// through the left lobe first.
pub fn infinity(center: Point, size: f32) -> Path {
    let f = size / DESIGN_SIZE;
    let (mx, my) = (center.x, center.y);
    let (near, far, h) = (100.0 * f, 200.0 * f, 72.0 * f);

    Path::new()
        .move_to(mx - near, my + h)
        .cubic_to(mx - far, my + h, mx - far, my - h, mx - near, my - h)
        .cubic_to(mx, my - h, mx, my + h, mx + near, my + h)
        .cubic_to(mx + far, my + h, mx + far, my - h, mx + near, my - h)
        .cubic_to(mx, my - h, mx, my + h, mx - near, my + h)
}

/// Traveling trim window along the infinity outline
///
/// Each [`step`](InfinityTrim::step) pushes the window's end forward by
/// [`InfinityTrim::STEP`]; the window trails `STEP + extra` behind it.
/// `extra` grows every third step so the tail lengthens over a lap. Once
/// the end passes [`InfinityTrim::CAP`] the window collapses to zero and
/// starts over.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InfinityTrim {
    start: f32,
    end: f32,
    extra: f32,
    steps: u64,
}

impl InfinityTrim {
    /// End advance per step
    pub const STEP: f32 = 0.05;
    /// Tail growth every [`InfinityTrim::GROWTH_EVERY`] steps
    pub const GROWTH: f32 = 0.015;
    pub const GROWTH_EVERY: u64 = 3;
    /// End position that triggers a reset; past 1.0 so the tail can drain
    pub const CAP: f32 = 1.205;

    pub fn new() -> Self {
        Self::default()
    }

    /// Raw window start (may be negative)
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Raw window end (may exceed 1.0)
    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn extra(&self) -> f32 {
        self.extra
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance the window by one step; returns `true` when it wrapped
    pub fn step(&mut self) -> bool {
        self.steps += 1;
        self.end += Self::STEP;
        self.start = self.end - (Self::STEP + self.extra);

        let wrapped = self.end >= Self::CAP;
        if wrapped {
            trace!(steps = self.steps, "infinity trim wrapped");
            self.start = 0.0;
            self.end = 0.0;
            self.extra = 0.0;
        }

        if self.steps % Self::GROWTH_EVERY == 0 {
            self.extra += Self::GROWTH;
        }
        wrapped
    }

    /// Window clamped into the outline
    pub fn range(&self) -> TrimRange {
        TrimRange::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::PathCommand;

    #[test]
    fn test_outline_is_symmetric() {
        let path = infinity(Point::new(0.0, 0.0), 400.0);
        let bounds = path.bounds();
        assert!((bounds.min_x() + bounds.max_x()).abs() < 1e-3);
        assert!((bounds.min_y() + bounds.max_y()).abs() < 1e-3);
        assert_eq!(path.commands().len(), 5);
    }

    #[test]
    fn test_outline_ends_where_it_starts() {
        let path = infinity(Point::new(10.0, 20.0), 250.0);
        let first = match path.commands().first() {
            Some(PathCommand::MoveTo(p)) => *p,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(path.current_point(), Some(first));
    }

    #[test]
    fn test_window_advances_and_trails() {
        let mut trim = InfinityTrim::new();
        trim.step();
        assert!((trim.end() - 0.05).abs() < 1e-6);
        assert!(trim.start().abs() < 1e-6);

        trim.step();
        trim.step();
        // Third step grew the tail for the next one
        assert!((trim.extra() - 0.015).abs() < 1e-6);
        trim.step();
        assert!((trim.end() - trim.start() - 0.065).abs() < 1e-5);
    }

    #[test]
    fn test_window_wraps_past_cap() {
        let mut trim = InfinityTrim::new();
        let mut wrapped_at = None;
        for i in 1..=30 {
            if trim.step() {
                wrapped_at = Some(i);
                break;
            }
        }
        // 0.05 * 25 = 1.25 is the first end >= 1.205
        assert_eq!(wrapped_at, Some(25));
        assert_eq!(trim.end(), 0.0);
        assert_eq!(trim.start(), 0.0);
    }

    #[test]
    fn test_trimmed_window_is_valid() {
        let path = infinity(Point::new(0.0, 0.0), 300.0);
        let mut trim = InfinityTrim::new();
        for _ in 0..40 {
            trim.step();
            let range = trim.range();
            let piece = path.trim(range.start, range.end);
            assert!(piece.length().is_finite());
        }
    }
}
