//! Soothing Shape Generators
//!
//! Pure functions from animated parameters to vector outlines. Identical
//! input always yields an identical [`Path`](soothing_core::Path), so a
//! component can rebuild its geometry on every redraw.
//!
//! - **Waves**: sine surfaces for liquid fills, fluid and ghost hems
//! - **Infinity**: figure-eight outline plus its traveling trim window
//! - **Sandglass**: hourglass outline with rounded corners
//! - **Indicators**: trimmed rings, capsule arcs and dashed rings
//!
//! # Example
//!
//! ```rust
//! use soothing_core::Point;
//! use soothing_shapes::{ring_arc, TrimRange};
//!
//! // Quarter ring starting at 12 o'clock
//! let arc = ring_arc(Point::new(50.0, 50.0), 40.0, TrimRange::to(0.25), 270.0);
//! assert!(arc.length() > 0.0);
//! ```

pub mod indicator;
pub mod infinity;
pub mod sandglass;
pub mod wave;

pub use indicator::{capsule_arc, dashed_ring, ring, ring_arc, TrimRange};
pub use infinity::{infinity, InfinityTrim};
pub use sandglass::sandglass;
pub use wave::{
    circular_fill, fluid, ghost_hem, wave_band, wave_fill, wave_line, wave_y, WaveParams,
};
