//! Ring and capsule indicators
//!
//! Progress rings, spinner arcs and the swing pendulum are all a closed
//! outline with only a fraction of it revealed. [`TrimRange`] is that
//! fraction; the functions here build the trimmed outline and rotate it
//! into place.

use soothing_core::{deg_to_rad, Affine2D, Path, Point, Rect};

/// Fractional range `[start, end]` of an outline's length
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrimRange {
    pub start: f32,
    pub end: f32,
}

impl TrimRange {
    pub const FULL: TrimRange = TrimRange {
        start: 0.0,
        end: 1.0,
    };

    pub const EMPTY: TrimRange = TrimRange {
        start: 0.0,
        end: 0.0,
    };

    /// Range with both ends clamped into `[0, 1]`
    ///
    /// NaN counts as zero. `start > end` is kept as given and reveals
    /// nothing.
    pub fn new(start: f32, end: f32) -> Self {
        let clamp = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self {
            start: clamp(start),
            end: clamp(end),
        }
    }

    /// Range from the start of the outline to `end`
    pub fn to(end: f32) -> Self {
        Self::new(0.0, end)
    }

    pub fn len(&self) -> f32 {
        (self.end - self.start).max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }
}

impl Default for TrimRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Full circle starting at 3 o'clock, running clockwise
pub fn ring(center: Point, radius: f32) -> Path {
    Path::circle(center, radius)
}

/// Part of a ring, rotated clockwise by `rotation_degrees` around its center
///
/// A rotation of 270 degrees moves the start to 12 o'clock.
pub fn ring_arc(center: Point, radius: f32, range: TrimRange, rotation_degrees: f32) -> Path {
    if range.is_empty() {
        return Path::new();
    }
    let arc = ring(center, radius).trim(range.start, range.end);
    rotate(arc, rotation_degrees, center)
}

/// Part of a capsule outline inscribed in `rect`, rotated around its center
pub fn capsule_arc(rect: Rect, range: TrimRange, rotation_degrees: f32) -> Path {
    if range.is_empty() {
        return Path::new();
    }
    let arc = Path::capsule(rect).trim(range.start, range.end);
    rotate(arc, rotation_degrees, rect.center())
}

/// Dashes of length `dash` separated by `gap`, laid along a ring
///
/// Each dash is its own subpath. The pattern starts at 3 o'clock shifted
/// clockwise by `rotation_degrees`; a dash that would straddle the start
/// is shortened so dashes never overlap.
pub fn dashed_ring(center: Point, radius: f32, dash: f32, gap: f32, rotation_degrees: f32) -> Path {
    let circumference = 2.0 * std::f32::consts::PI * radius;
    let pitch = dash + gap;
    if circumference <= 0.0 || dash <= 0.0 || gap < 0.0 || !pitch.is_finite() {
        return Path::new();
    }

    let circle = ring(center, radius);
    let count = (circumference / pitch).floor().max(1.0) as usize;
    let mut commands = Vec::new();
    for i in 0..count {
        let start = i as f32 * pitch / circumference;
        let end = (start + dash / circumference).min(1.0);
        commands.extend_from_slice(circle.trim(start, end).commands());
    }

    rotate(Path::from_commands(commands), rotation_degrees, center)
}

fn rotate(path: Path, degrees: f32, center: Point) -> Path {
    if degrees == 0.0 {
        return path;
    }
    path.transformed(&Affine2D::rotation_around(deg_to_rad(degrees), center))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::PathCommand;

    #[test]
    fn test_trim_range_clamps() {
        let r = TrimRange::new(-0.5, 1.7);
        assert_eq!(r, TrimRange::FULL);
        assert!(TrimRange::new(0.8, 0.2).is_empty());
        assert_eq!(TrimRange::new(f32::NAN, 0.5), TrimRange::to(0.5));
    }

    #[test]
    fn test_ring_arc_length_is_monotonic() {
        let center = Point::new(50.0, 50.0);
        let mut last = 0.0;
        for i in 0..=20 {
            let p = i as f32 / 20.0;
            let len = ring_arc(center, 40.0, TrimRange::to(p), 270.0).length();
            assert!(len + 1e-3 >= last, "p = {p}: {len} < {last}");
            last = len;
        }
        let full = 2.0 * std::f32::consts::PI * 40.0;
        assert!((last - full).abs() / full < 0.01);
    }

    #[test]
    fn test_empty_arc_is_valid() {
        let arc = ring_arc(Point::ZERO, 40.0, TrimRange::to(0.0), 270.0);
        assert!(arc.is_empty());
        assert_eq!(arc.length(), 0.0);
    }

    #[test]
    fn test_rotation_moves_start_to_top() {
        let center = Point::new(50.0, 50.0);
        let arc = ring_arc(center, 40.0, TrimRange::to(0.1), 270.0);
        match arc.commands().first() {
            Some(PathCommand::MoveTo(p)) => {
                assert!((p.x - 50.0).abs() < 1e-3);
                assert!((p.y - 10.0).abs() < 1e-3);
            }
            other => panic!("unexpected first command {other:?}"),
        }
    }

    #[test]
    fn test_capsule_arc_is_monotonic() {
        let rect = Rect::new(0.0, 0.0, 440.0, 220.0);
        let mut last = 0.0;
        for i in 0..=100 {
            let p = i as f32 / 100.0;
            let len = capsule_arc(rect, TrimRange::to(p), -90.0).length();
            assert!(len + 1e-3 >= last, "p = {p}: {len} < {last}");
            last = len;
        }
        let full = Path::capsule(rect).length();
        assert!((last - full).abs() / full < 0.01);
        assert!(capsule_arc(rect, TrimRange::new(0.5, 0.5), 0.0).is_empty());
    }

    #[test]
    fn test_sliding_capsule_window_keeps_length() {
        let rect = Rect::new(0.0, 0.0, 440.0, 220.0);
        let expected = 0.01 * Path::capsule(rect).length();
        for i in 0..=100 {
            let start = 0.2 + 0.6 * i as f32 / 100.0;
            let len = capsule_arc(rect, TrimRange::new(start, start + 0.01), -90.0).length();
            assert!((len - expected).abs() < 0.1, "start = {start}: {len}");
        }
    }

    #[test]
    fn test_dashed_ring_dash_count() {
        // Circumference 2π·100 ≈ 628.3, pitch 30 -> 20 dashes
        let dashes = dashed_ring(Point::ZERO, 100.0, 7.5, 22.5, 0.0);
        let moves = dashes
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count();
        assert_eq!(moves, 20);
        assert!((dashes.length() - 20.0 * 7.5).abs() < 1.0);
    }
}
