//! Draw context
//!
//! The [`DrawContext`] trait is the rendering substrate every component
//! draws into. Components never rasterize anything themselves: they build
//! paths from their current animated parameters and submit them here.
//!
//! [`RecordingContext`] records the submitted commands, which is what the
//! demo runner and the tests render into.

use crate::color::{Brush, Color};
use crate::geometry::{Affine2D, Point, Rect, Size};
use crate::path::Path;
use tracing::trace;

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the endpoint
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint
    Round,
    /// Square cap extending past the endpoint
    Square,
}

/// Line join style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    /// Miter join (sharp corner)
    #[default]
    Miter,
    /// Round join
    Round,
    /// Bevel join (flat corner)
    Bevel,
}

/// Stroke style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Line join style
    pub join: LineJoin,
    /// Dash pattern (empty for solid line)
    pub dash: Vec<f32>,
    /// Dash offset
    pub dash_offset: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            dash: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given width
    pub fn new(width: f32) -> Self {
        Self {
            width: width.max(0.0),
            ..Default::default()
        }
    }

    /// Round caps and joins, the style every indicator in the library uses
    pub fn rounded(width: f32) -> Self {
        Self::new(width)
            .with_cap(LineCap::Round)
            .with_join(LineJoin::Round)
    }

    /// Set line cap style
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set line join style
    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    /// Set dash pattern
    pub fn with_dash(mut self, pattern: Vec<f32>, offset: f32) -> Self {
        self.dash = pattern;
        self.dash_offset = offset;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Bold,
}

/// Text style configuration
///
/// Text is positioned by its center point; the substrate is responsible
/// for shaping and measuring.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub size: f32,
    /// Font weight
    pub weight: FontWeight,
    /// Italic style
    pub italic: bool,
    /// Text color
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            weight: FontWeight::Regular,
            italic: false,
            color: Color::BLACK,
        }
    }
}

impl TextStyle {
    /// Create a new text style with font size
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Set text color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set font weight
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Use the italic face
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The rendering substrate components draw into
///
/// Transforms and opacity are stacks: every push must be matched by a pop.
/// Clips are path-based and also stacked.
pub trait DrawContext {
    fn push_transform(&mut self, transform: Affine2D);

    fn pop_transform(&mut self);

    /// Accumulated transform of the whole stack
    fn current_transform(&self) -> Affine2D;

    fn push_clip(&mut self, clip: &Path);

    fn pop_clip(&mut self);

    fn push_opacity(&mut self, opacity: f32);

    fn pop_opacity(&mut self);

    /// Accumulated opacity of the whole stack
    fn current_opacity(&self) -> f32;

    fn fill_path(&mut self, path: &Path, brush: Brush);

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush);

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush);

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, brush: Brush);

    /// Draw text centered on `center`
    fn draw_text(&mut self, text: &str, center: Point, style: &TextStyle);

    /// Draw a named icon glyph (e.g. `"heart.fill"`) fitted into `rect`
    fn draw_glyph(&mut self, name: &str, rect: Rect, color: Color);

    fn viewport_size(&self) -> Size;
}

/// Convenience methods on top of [`DrawContext`]
pub trait DrawContextExt: DrawContext {
    fn fill<B: Into<Brush>>(&mut self, path: &Path, brush: B) {
        self.fill_path(path, brush.into());
    }

    fn stroke<B: Into<Brush>>(&mut self, path: &Path, stroke: &Stroke, brush: B) {
        self.stroke_path(path, stroke, brush.into());
    }

    /// Run `f` with a transform pushed, popping it afterwards
    fn with_transform<F: FnOnce(&mut Self)>(&mut self, transform: Affine2D, f: F) {
        self.push_transform(transform);
        f(self);
        self.pop_transform();
    }

    /// Run `f` with an opacity pushed, popping it afterwards
    fn with_opacity<F: FnOnce(&mut Self)>(&mut self, opacity: f32, f: F) {
        self.push_opacity(opacity);
        f(self);
        self.pop_opacity();
    }

    /// Run `f` clipped to `clip`, popping the clip afterwards
    fn with_clip<F: FnOnce(&mut Self)>(&mut self, clip: &Path, f: F) {
        self.push_clip(clip);
        f(self);
        self.pop_clip();
    }
}

impl<T: DrawContext + ?Sized> DrawContextExt for T {}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushTransform(Affine2D),
    PopTransform,
    PushClip(Path),
    PopClip,
    PushOpacity(f32),
    PopOpacity,

    // 2D Drawing
    FillPath {
        path: Path,
        brush: Brush,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
        brush: Brush,
    },
    FillCircle {
        center: Point,
        radius: f32,
        brush: Brush,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        stroke: Stroke,
        brush: Brush,
    },
    DrawText {
        text: String,
        center: Point,
        style: TextStyle,
    },
    DrawGlyph {
        name: String,
        rect: Rect,
        color: Color,
    },
}

impl DrawCommand {
    /// Whether the command paints pixels (as opposed to changing state)
    pub fn is_paint(&self) -> bool {
        !matches!(
            self,
            DrawCommand::PushTransform(_)
                | DrawCommand::PopTransform
                | DrawCommand::PushClip(_)
                | DrawCommand::PopClip
                | DrawCommand::PushOpacity(_)
                | DrawCommand::PopOpacity
        )
    }

    /// Brush used by a paint command
    pub fn brush(&self) -> Option<&Brush> {
        match self {
            DrawCommand::FillPath { brush, .. }
            | DrawCommand::StrokePath { brush, .. }
            | DrawCommand::FillCircle { brush, .. }
            | DrawCommand::StrokeCircle { brush, .. } => Some(brush),
            _ => None,
        }
    }
}

/// A draw context that records commands for later execution
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Affine2D>,
    opacity_stack: Vec<f32>,
    clip_depth: usize,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![Affine2D::IDENTITY],
            opacity_stack: vec![1.0],
            clip_depth: 0,
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of commands that paint pixels
    pub fn paint_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_paint()).count()
    }

    /// Texts drawn so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Clear all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack = vec![Affine2D::IDENTITY];
        self.opacity_stack = vec![1.0];
        self.clip_depth = 0;
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Affine2D) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let combined = self.current_transform().then(&transform);
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
            self.commands.push(DrawCommand::PopTransform);
        } else {
            trace!("pop_transform without a matching push, ignored");
        }
    }

    fn current_transform(&self) -> Affine2D {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or(Affine2D::IDENTITY)
    }

    fn push_clip(&mut self, clip: &Path) {
        self.commands.push(DrawCommand::PushClip(clip.clone()));
        self.clip_depth += 1;
    }

    fn pop_clip(&mut self) {
        if self.clip_depth > 0 {
            self.clip_depth -= 1;
            self.commands.push(DrawCommand::PopClip);
        } else {
            trace!("pop_clip without a matching push, ignored");
        }
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.commands.push(DrawCommand::PushOpacity(opacity));
        let current = self.current_opacity();
        self.opacity_stack.push(current * opacity.clamp(0.0, 1.0));
    }

    fn pop_opacity(&mut self) {
        if self.opacity_stack.len() > 1 {
            self.opacity_stack.pop();
            self.commands.push(DrawCommand::PopOpacity);
        } else {
            trace!("pop_opacity without a matching push, ignored");
        }
    }

    fn current_opacity(&self) -> f32 {
        self.opacity_stack.last().copied().unwrap_or(1.0)
    }

    fn fill_path(&mut self, path: &Path, brush: Brush) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            brush,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            brush,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            brush,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: stroke.clone(),
            brush,
        });
    }

    fn draw_text(&mut self, text: &str, center: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            center,
            style: style.clone(),
        });
    }

    fn draw_glyph(&mut self, name: &str, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::DrawGlyph {
            name: name.to_string(),
            rect,
            color,
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_context() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        ctx.push_transform(Affine2D::translation(10.0, 20.0));
        ctx.fill_path(&Path::rect(Rect::new(0.0, 0.0, 100.0, 50.0)), Color::BLUE.into());
        ctx.draw_text("Hello", Point::new(10.0, 30.0), &TextStyle::default());
        ctx.pop_transform();

        assert_eq!(ctx.commands().len(), 4);
        assert_eq!(ctx.paint_count(), 2);
        assert_eq!(ctx.texts(), vec!["Hello"]);
    }

    #[test]
    fn test_transform_stack_accumulates() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        ctx.push_transform(Affine2D::translation(10.0, 20.0));
        ctx.push_transform(Affine2D::scale(2.0, 2.0));
        let p = ctx.current_transform().transform_point(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(12.0, 22.0));

        ctx.pop_transform();
        ctx.pop_transform();

        // Should not panic when popping past the root
        ctx.pop_transform();
        assert_eq!(ctx.current_transform(), Affine2D::IDENTITY);
    }

    #[test]
    fn test_opacity_stack() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        assert_eq!(ctx.current_opacity(), 1.0);

        ctx.push_opacity(0.5);
        assert_eq!(ctx.current_opacity(), 0.5);

        ctx.push_opacity(0.5);
        assert_eq!(ctx.current_opacity(), 0.25);

        ctx.pop_opacity();
        assert_eq!(ctx.current_opacity(), 0.5);
    }

    #[test]
    fn test_extra_pops_keep_stream_balanced() {
        let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
        let clip = Path::circle(Point::new(50.0, 50.0), 50.0);

        ctx.push_transform(Affine2D::translation(5.0, 5.0));
        ctx.push_opacity(0.5);
        ctx.push_clip(&clip);
        for _ in 0..3 {
            ctx.pop_clip();
            ctx.pop_opacity();
            ctx.pop_transform();
        }

        fn count(ctx: &RecordingContext, command: &DrawCommand) -> usize {
            ctx.commands().iter().filter(|c| *c == command).count()
        }
        assert_eq!(ctx.commands().len(), 6);
        assert_eq!(count(&ctx, &DrawCommand::PopTransform), 1);
        assert_eq!(count(&ctx, &DrawCommand::PopOpacity), 1);
        assert_eq!(count(&ctx, &DrawCommand::PopClip), 1);
        assert_eq!(ctx.current_transform(), Affine2D::IDENTITY);
        assert_eq!(ctx.current_opacity(), 1.0);

        // Recording carries on normally afterwards
        ctx.fill(&clip, Color::PINK);
        assert_eq!(ctx.paint_count(), 1);
    }

    #[test]
    fn test_scoped_helpers_balance() {
        let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
        let clip = Path::circle(Point::new(50.0, 50.0), 50.0);

        ctx.with_clip(&clip, |c| {
            c.with_opacity(0.5, |c| {
                c.fill(&clip, Color::PINK);
            });
        });

        assert_eq!(ctx.commands().len(), 5);
        assert_eq!(ctx.commands()[4], DrawCommand::PopClip);
        assert_eq!(ctx.current_opacity(), 1.0);
    }

    #[test]
    fn test_stroke_configuration() {
        let stroke = Stroke::rounded(2.0).with_dash(vec![5.0, 3.0], 0.0);

        assert_eq!(stroke.width, 2.0);
        assert_eq!(stroke.cap, LineCap::Round);
        assert_eq!(stroke.join, LineJoin::Round);
        assert_eq!(stroke.dash.len(), 2);
    }
}
