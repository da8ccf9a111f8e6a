//! Vector paths
//!
//! A [`Path`] is an ordered list of drawing commands built with a
//! consuming builder API. Besides construction it supports measuring
//! ([`Path::length`]) and trimming ([`Path::trim`]), which reveals only a
//! fractional `[start, end]` range of the outline measured along its arc
//! length. Trimming is how every progress ring and traveling segment in
//! the component library is drawn.

use std::f32::consts::{FRAC_PI_2, PI};

use smallvec::SmallVec;

use crate::geometry::{Affine2D, Point, Rect};

/// Magic number for cubic Bézier circle approximation
const KAPPA: f32 = 0.552_284_8;

/// Line segments used to flatten one cubic Bézier
const CUBIC_SEGMENTS: usize = 24;

/// Line segments used to flatten one quadratic Bézier
const QUAD_SEGMENTS: usize = 16;

/// A single path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Move to a point
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Quadratic Bézier curve
    QuadTo { control: Point, end: Point },
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Close the current subpath
    Close,
}

/// A flattened subpath: a polyline plus whether it was closed
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    /// Length of the polyline, including the closing edge if closed
    pub fn length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = if self.closed && self.points.len() > 1 {
            Some((self.points[self.points.len() - 1], self.points[0]))
        } else {
            None
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Create a path from a vector of commands
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Quadratic Bézier curve
    pub fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::QuadTo {
            control: Point::new(cx, cy),
            end: Point::new(x, y),
        });
        self
    }

    /// Cubic Bézier curve
    pub fn cubic_to(mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            control1: Point::new(cx1, cy1),
            control2: Point::new(cx2, cy2),
            end: Point::new(x, y),
        });
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Circular arc around `center`, starting at `start_angle` and sweeping
    /// `sweep` radians (positive is clockwise with y pointing down).
    ///
    /// If the path already has a current point a line is drawn to the arc
    /// start, otherwise the arc starts a new subpath. The arc is emitted as
    /// cubic segments of at most 90 degrees each.
    pub fn arc(mut self, center: Point, radius: f32, start_angle: f32, sweep: f32) -> Self {
        let start = Point::on_circle(center, radius, start_angle);
        self = match self.current_point() {
            Some(_) => self.line_to(start.x, start.y),
            None => self.move_to(start.x, start.y),
        };
        if sweep == 0.0 || radius <= 0.0 {
            return self;
        }

        let pieces = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / pieces as f32;
        let k = 4.0 / 3.0 * (step / 4.0).tan();

        let mut a0 = start_angle;
        for _ in 0..pieces {
            let a1 = a0 + step;
            let (s0, c0) = a0.sin_cos();
            let (s1, c1) = a1.sin_cos();
            self = self.cubic_to(
                center.x + radius * (c0 - k * s0),
                center.y + radius * (s0 + k * c0),
                center.x + radius * (c1 + k * s1),
                center.y + radius * (s1 - k * c1),
                center.x + radius * c1,
                center.y + radius * s1,
            );
            a0 = a1;
        }
        self
    }

    /// Create a rectangle path
    pub fn rect(rect: Rect) -> Self {
        Self::new()
            .move_to(rect.x(), rect.y())
            .line_to(rect.max_x(), rect.y())
            .line_to(rect.max_x(), rect.max_y())
            .line_to(rect.x(), rect.max_y())
            .close()
    }

    /// Create a circle path
    ///
    /// Starts at the 3 o'clock position and runs clockwise, so trimming
    /// `[0, t]` reveals a clockwise sweep from 3 o'clock.
    pub fn circle(center: Point, radius: f32) -> Self {
        Self::ellipse(Rect::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        ))
    }

    /// Ellipse inscribed in `rect`, same start point and winding as [`Path::circle`]
    pub fn ellipse(rect: Rect) -> Self {
        let k = KAPPA;
        let rx = rect.width() / 2.0;
        let ry = rect.height() / 2.0;
        let c = rect.center();
        let (cx, cy) = (c.x, c.y);

        Self::new()
            .move_to(cx + rx, cy)
            .cubic_to(cx + rx, cy + ry * k, cx + rx * k, cy + ry, cx, cy + ry)
            .cubic_to(cx - rx * k, cy + ry, cx - rx, cy + ry * k, cx - rx, cy)
            .cubic_to(cx - rx, cy - ry * k, cx - rx * k, cy - ry, cx, cy - ry)
            .cubic_to(cx + rx * k, cy - ry, cx + rx, cy - ry * k, cx + rx, cy)
            .close()
    }

    /// Create a line path
    pub fn line(from: Point, to: Point) -> Self {
        Self::new().move_to(from.x, from.y).line_to(to.x, to.y)
    }

    /// Create a rounded rectangle path with a uniform corner radius
    ///
    /// The radius is clamped to half the smaller side. Starts at the top
    /// edge just after the top-left corner and runs clockwise.
    pub fn rounded_rect(rect: Rect, radius: f32) -> Self {
        let r = radius.clamp(0.0, (rect.width().min(rect.height()) / 2.0).max(0.0));
        let (x, y, w, h) = (rect.x(), rect.y(), rect.width(), rect.height());
        if r <= 0.0 {
            return Self::rect(rect);
        }

        Self::new()
            .move_to(x + r, y)
            .line_to(x + w - r, y)
            .arc(Point::new(x + w - r, y + r), r, -FRAC_PI_2, FRAC_PI_2)
            .line_to(x + w, y + h - r)
            .arc(Point::new(x + w - r, y + h - r), r, 0.0, FRAC_PI_2)
            .line_to(x + r, y + h)
            .arc(Point::new(x + r, y + h - r), r, FRAC_PI_2, FRAC_PI_2)
            .line_to(x, y + r)
            .arc(Point::new(x + r, y + r), r, PI, FRAC_PI_2)
            .close()
    }

    /// Stadium shape: a rounded rect whose radius is half the smaller side
    pub fn capsule(rect: Rect) -> Self {
        Self::rounded_rect(rect, rect.width().min(rect.height()) / 2.0)
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The point the next command would continue from
    pub fn current_point(&self) -> Option<Point> {
        let mut subpath_start = None;
        let mut current = None;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    subpath_start = Some(p);
                    current = Some(p);
                }
                PathCommand::LineTo(p) => current = Some(p),
                PathCommand::QuadTo { end, .. } | PathCommand::CubicTo { end, .. } => {
                    current = Some(end)
                }
                PathCommand::Close => current = subpath_start,
            }
        }
        current
    }

    /// Calculate the bounding rectangle of this path's control polygon
    pub fn bounds(&self) -> Rect {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        let mut include = |p: &Point| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        };

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => include(p),
                PathCommand::QuadTo { control, end } => {
                    include(control);
                    include(end);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    include(control1);
                    include(control2);
                    include(end);
                }
                PathCommand::Close => {}
            }
        }

        if min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite() {
            Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
        } else {
            Rect::ZERO
        }
    }

    /// Apply an affine transform to every point of the path
    pub fn transformed(&self, transform: &Affine2D) -> Path {
        let t = |p: Point| transform.transform_point(p);
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(t(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(t(p)),
                PathCommand::QuadTo { control, end } => PathCommand::QuadTo {
                    control: t(control),
                    end: t(end),
                },
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => PathCommand::CubicTo {
                    control1: t(control1),
                    control2: t(control2),
                    end: t(end),
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Path { commands }
    }

    /// Flatten curves into polylines, one per subpath
    pub fn flatten(&self) -> SmallVec<[Polyline; 2]> {
        let mut out: SmallVec<[Polyline; 2]> = SmallVec::new();
        let mut current: Option<Polyline> = None;

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if let Some(done) = current.take() {
                        out.push(done);
                    }
                    current = Some(Polyline {
                        points: vec![p],
                        closed: false,
                    });
                }
                PathCommand::LineTo(p) => push_point(&mut current, p),
                PathCommand::QuadTo { control, end } => {
                    let p0 = last_point(&current);
                    for i in 1..=QUAD_SEGMENTS {
                        let t = i as f32 / QUAD_SEGMENTS as f32;
                        push_point(&mut current, quad_point(p0, control, end, t));
                    }
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    let p0 = last_point(&current);
                    for i in 1..=CUBIC_SEGMENTS {
                        let t = i as f32 / CUBIC_SEGMENTS as f32;
                        push_point(&mut current, cubic_point(p0, control1, control2, end, t));
                    }
                }
                PathCommand::Close => {
                    if let Some(mut done) = current.take() {
                        done.closed = true;
                        let start = done.points[0];
                        out.push(done);
                        // Drawing after a close continues from the subpath start
                        current = Some(Polyline {
                            points: vec![start],
                            closed: false,
                        });
                    }
                }
            }
        }
        if let Some(done) = current {
            out.push(done);
        }
        out.retain(|p| p.closed || p.points.len() > 1);
        out
    }

    /// Total arc length of the path
    pub fn length(&self) -> f32 {
        self.flatten().iter().map(Polyline::length).sum()
    }

    /// Reveal only the `[start, end]` fraction of the path's arc length.
    ///
    /// Both ends are clamped to `[0, 1]`. A degenerate range (`start >=
    /// end`) or a zero-length path yields an empty path, which is still a
    /// valid path to hand to a draw context. The result consists of
    /// straight segments only.
    pub fn trim(&self, start: f32, end: f32) -> Path {
        let start = sanitize_fraction(start);
        let end = sanitize_fraction(end);
        if start >= end {
            return Path::new();
        }

        let polylines = self.flatten();
        let total: f32 = polylines.iter().map(Polyline::length).sum();
        if total <= 0.0 {
            return Path::new();
        }

        let from = start * total;
        let to = end * total;
        let mut out = Path::new();
        let mut walked = 0.0;

        for polyline in &polylines {
            let mut pen_down = false;
            for (a, b) in polyline.segments() {
                let seg = a.distance(b);
                let seg_start = walked;
                let seg_end = walked + seg;
                walked = seg_end;

                if seg <= 0.0 || seg_end < from || seg_start > to {
                    continue;
                }

                let t0 = ((from - seg_start) / seg).clamp(0.0, 1.0);
                let t1 = ((to - seg_start) / seg).clamp(0.0, 1.0);
                let p0 = a.lerp(b, t0);
                let p1 = a.lerp(b, t1);
                if !pen_down {
                    out = out.move_to(p0.x, p0.y);
                    pen_down = true;
                }
                out = out.line_to(p1.x, p1.y);
            }
        }
        out
    }
}

fn sanitize_fraction(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn last_point(current: &Option<Polyline>) -> Point {
    current
        .as_ref()
        .and_then(|p| p.points.last().copied())
        .unwrap_or(Point::ZERO)
}

fn push_point(current: &mut Option<Polyline>, p: Point) {
    match current {
        Some(polyline) => polyline.points.push(p),
        // Drawing without a move_to starts at the origin
        None => {
            *current = Some(Polyline {
                points: vec![Point::ZERO, p],
                closed: false,
            })
        }
    }
}

fn quad_point(p0: Point, c: Point, p1: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * c.x + t * t * p1.x,
        mt * mt * p0.y + 2.0 * mt * t * c.y + t * t * p1.y,
    )
}

fn cubic_point(p0: Point, c1: Point, c2: Point, p1: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p1.x,
        a * p0.y + b * c1.y + c * c2.y + d * p1.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_path_builder() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 0.0)
            .quad_to(150.0, 50.0, 100.0, 100.0)
            .close();
        assert_eq!(path.commands().len(), 4);
        assert_eq!(path.current_point(), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_line_length() {
        let path = Path::line(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!(approx(path.length(), 5.0, 1e-5));
    }

    #[test]
    fn test_rect_length_includes_closing_edge() {
        let path = Path::rect(Rect::new(0.0, 0.0, 10.0, 20.0));
        assert!(approx(path.length(), 60.0, 1e-4));
    }

    #[test]
    fn test_circle_length_close_to_circumference() {
        let path = Path::circle(Point::new(50.0, 50.0), 50.0);
        let expected = 2.0 * PI * 50.0;
        assert!((path.length() - expected).abs() / expected < 0.002);
    }

    #[test]
    fn test_arc_quarter_circle() {
        let path = Path::new().arc(Point::ZERO, 10.0, 0.0, FRAC_PI_2);
        let end = path.current_point().unwrap();
        assert!(approx(end.x, 0.0, 1e-4));
        assert!(approx(end.y, 10.0, 1e-4));
        assert!(approx(path.length(), 5.0 * PI, 0.02));
    }

    #[test]
    fn test_arc_continues_with_line() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .arc(Point::new(20.0, 0.0), 10.0, PI, PI);
        assert!(matches!(path.commands()[1], PathCommand::LineTo(_)));
    }

    #[test]
    fn test_trim_half_line() {
        let path = Path::line(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let trimmed = path.trim(0.25, 0.75);
        assert!(approx(trimmed.length(), 50.0, 1e-3));
        assert_eq!(
            trimmed.commands()[0],
            PathCommand::MoveTo(Point::new(25.0, 0.0))
        );
    }

    #[test]
    fn test_trim_degenerate_is_empty() {
        let path = Path::circle(Point::ZERO, 10.0);
        assert!(path.trim(0.3, 0.3).is_empty());
        assert!(path.trim(0.8, 0.2).is_empty());
        assert_eq!(path.trim(0.0, 0.0).length(), 0.0);
    }

    #[test]
    fn test_trim_clamps_out_of_range() {
        let path = Path::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!(approx(path.trim(-0.5, 1.7).length(), 10.0, 1e-4));
        assert!(path.trim(f32::NAN, 0.5).length() > 4.9);
    }

    #[test]
    fn test_trim_spans_subpaths() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .move_to(0.0, 10.0)
            .line_to(10.0, 10.0);
        let trimmed = path.trim(0.25, 0.75);
        let moves = trimmed
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
        assert!(approx(trimmed.length(), 10.0, 1e-4));
    }

    #[test]
    fn test_transformed_rotation() {
        let path = Path::line(Point::ZERO, Point::new(10.0, 0.0));
        let rotated = path.transformed(&Affine2D::rotation(FRAC_PI_2));
        let end = rotated.current_point().unwrap();
        assert!(approx(end.x, 0.0, 1e-4));
        assert!(approx(end.y, 10.0, 1e-4));
    }

    #[test]
    fn test_capsule_bounds() {
        let rect = Rect::new(0.0, 0.0, 40.0, 10.0);
        let bounds = Path::capsule(rect).bounds();
        assert!(approx(bounds.width(), 40.0, 1e-3));
        assert!(approx(bounds.height(), 10.0, 1e-3));
    }
}
