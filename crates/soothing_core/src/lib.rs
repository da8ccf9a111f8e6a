//! Soothing Core
//!
//! Foundational primitives shared by every Soothing crate:
//!
//! - **Geometry**: points, sizes, rectangles and affine transforms
//! - **Color**: colors, gradients and brushes, loadable from hex strings
//! - **Paths**: vector paths with measuring and fractional trimming
//! - **Draw Context**: the rendering substrate components draw into
//! - **Errors**: construction-time configuration validation
//!
//! # Example
//!
//! ```rust
//! use soothing_core::{Color, DrawContext, Path, Point, RecordingContext, Size, Stroke};
//!
//! let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
//! let ring = Path::circle(Point::new(50.0, 50.0), 40.0).trim(0.0, 0.25);
//! ctx.stroke_path(&ring, &Stroke::rounded(10.0), Color::PINK.into());
//! assert_eq!(ctx.paint_count(), 1);
//! ```

pub mod color;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod path;

pub use color::{Brush, Color, Gradient, GradientStop};
pub use draw::{
    DrawCommand, DrawContext, DrawContextExt, FontWeight, LineCap, LineJoin, RecordingContext,
    Stroke, TextStyle,
};
pub use error::{ensure_at_least, ensure_in_range, ensure_positive, ConfigError};
pub use geometry::{deg_to_rad, rad_to_deg, Affine2D, Point, Rect, Size, Vec2};
pub use path::{Path, PathCommand, Polyline};
