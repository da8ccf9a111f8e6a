//! Sandglass outline

use soothing_core::{deg_to_rad, Path, Point, Rect};

/// Corner radius relative to the frame height
const CORNER_RATIO: f32 = 1.0 / 15.0;

/// Half-width of the waist relative to the frame height
const WAIST_RATIO: f32 = 0.05;

/// Sweep of each rounded corner, in degrees
const CORNER_SWEEP: f32 = 135.0;

/// Closed sandglass outline filling `rect`
///
/// Two trapezoidal bulbs meet at a narrow waist of half-width
/// `0.05·height` around the center. The four outer corners are rounded
/// with radius `height/15`; each rounding sweeps 135 degrees so the
/// lower-right and upper-left corners blend into the diagonal flanks.
pub fn sandglass(rect: Rect) -> Path {
    let h = rect.height();
    let r = h * CORNER_RATIO;
    let waist = h * WAIST_RATIO;
    let mid = rect.center();

    // Inset of a corner's tangent point along the diagonal flank
    let diagonal = (2.0 * r * r).sqrt() - r;
    let corner_inset = (diagonal * diagonal / 2.0).sqrt();

    let sweep = deg_to_rad(CORNER_SWEEP);
    let top_right = Point::new(rect.max_x() - r, rect.min_y() + r);
    let bottom_right = Point::new(rect.max_x() - r, rect.max_y() - r);
    let bottom_left = Point::new(rect.min_x() + r, rect.max_y() - r);
    let top_left = Point::new(rect.min_x() + r, rect.min_y() + r);

    Path::new()
        .move_to(rect.max_x() - r, rect.min_y())
        .arc(top_right, r, deg_to_rad(270.0), sweep)
        .line_to(mid.x + waist, mid.y - waist)
        .line_to(mid.x + waist, mid.y + waist)
        .line_to(
            rect.max_x() - corner_inset,
            rect.max_y() - r - (r - corner_inset),
        )
        .arc(bottom_right, r, deg_to_rad(315.0), sweep)
        .line_to(rect.min_x() + r, rect.max_y())
        .arc(bottom_left, r, deg_to_rad(90.0), sweep)
        .line_to(mid.x - waist, mid.y + waist)
        .line_to(mid.x - waist, mid.y - waist)
        .line_to(
            rect.min_x() + corner_inset,
            rect.min_y() + r + (r - corner_inset),
        )
        .arc(top_left, r, deg_to_rad(135.0), sweep)
        .close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::PathCommand;

    #[test]
    fn test_outline_is_closed() {
        let path = sandglass(Rect::new(0.0, 0.0, 160.0, 200.0));
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
        assert!(path.length() > 0.0);
    }

    #[test]
    fn test_waist_is_narrow() {
        let rect = Rect::new(0.0, 0.0, 160.0, 200.0);
        let path = sandglass(rect).trim(0.0, 1.0);
        let near_middle: Vec<f32> = path
            .commands()
            .iter()
            .filter_map(|c| match c {
                PathCommand::LineTo(p) if (p.y - 100.0).abs() <= 10.0 + 1e-3 => Some(p.x),
                _ => None,
            })
            .collect();
        // Waist half-width is 0.05 * 200 = 10 around x = 80
        assert!(!near_middle.is_empty());
        assert!(near_middle.iter().all(|x| (x - 80.0).abs() <= 10.0 + 1e-3));
    }

    #[test]
    fn test_outline_stays_in_frame() {
        let rect = Rect::new(20.0, 30.0, 160.0, 200.0);
        let bounds = sandglass(rect).trim(0.0, 1.0).bounds();
        assert!(bounds.min_x() >= rect.min_x() - 1e-3);
        assert!(bounds.max_x() <= rect.max_x() + 1e-3);
        assert!(bounds.min_y() >= rect.min_y() - 1e-3);
        assert!(bounds.max_y() <= rect.max_y() + 1e-3);
    }

    #[test]
    fn test_is_idempotent() {
        let rect = Rect::new(0.0, 0.0, 160.0, 200.0);
        assert_eq!(sandglass(rect), sandglass(rect));
    }
}
