//! Soothing Animation System
//!
//! Easing curves, spring physics, discrete timers and animated parameters,
//! all driven by simulated time.
//!
//! # Features
//!
//! - **Animation Specs**: explicit per-instance descriptors with delay, repeat and speed
//! - **Transitions**: eased interpolation for any [`Interpolate`] value
//! - **Spring Physics**: RK4-integrated springs, including the response/damping-fraction form
//! - **Animation Clock**: per-instance owner of discrete timers with single-handle slots
//! - **Animated Parameters**: domain-normalised scalars with one active motion each
//! - **Redraw Scheduling**: batched redraw requests, at most one per tick

pub mod clock;
pub mod easing;
pub mod param;
pub mod redraw;
pub mod spec;
pub mod spring;
pub mod timer;
pub mod transition;
pub mod values;

pub use clock::{AnimationClock, TimerId, TimerSlot};
pub use easing::Easing;
pub use param::{AnimatedParam, Motion, ParamDomain};
pub use redraw::RedrawScheduler;
pub use spec::{AnimationSpec, Curve, Progress, Repeat};
pub use spring::{Spring, SpringConfig};
pub use timer::Timer;
pub use transition::Transition;
pub use values::Interpolate;
