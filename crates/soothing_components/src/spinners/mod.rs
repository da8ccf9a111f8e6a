//! Spinners and loaders
//!
//! Passive indicators: they start on [`Component::on_appear`] and loop
//! until dropped.
//!
//! [`Component::on_appear`]: crate::Component::on_appear

pub mod eternal;
pub mod face;
pub mod ghost;
pub mod gradient_circles;
pub mod harmony;
pub mod pulsing_capsules;
pub mod ripple;
pub mod rotating_circles;
pub mod rotating_gradient;
pub mod rotating_loader;
pub mod sandglass;
pub mod swing;

pub use eternal::{EternalLoader, EternalLoaderConfig};
pub use face::{FaceAnimation, FaceAnimationConfig};
pub use ghost::{GhostLoader, GhostLoaderConfig};
pub use gradient_circles::{AnimatedGradientCircles, GradientCirclesConfig};
pub use harmony::{HarmonySpinner, HarmonySpinnerConfig};
pub use pulsing_capsules::{PulsingCapsules, PulsingCapsulesConfig};
pub use ripple::{RippleEffect, RippleEffectConfig};
pub use rotating_circles::{RotatingCircles, RotatingCirclesConfig};
pub use rotating_gradient::{RotatingGradientConfig, RotatingGradientLoader};
pub use rotating_loader::{RotatingLoader, RotatingLoaderConfig};
pub use sandglass::{SandStage, SandglassLoader, SandglassLoaderConfig};
pub use swing::{SwingLoader, SwingLoaderConfig};
