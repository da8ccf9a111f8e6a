//! Soothing Components
//!
//! Decorative animated components built on the soothing animation system:
//! tappable buttons, a navigation bar and a family of looping spinners.
//!
//! # Features
//!
//! - **Buttons**: progress ring, rolling wave, popping bubble, filling fluid and like toggle
//! - **Navigation Bar**: spring-animated item selection with a blended background
//! - **Spinners**: twelve passive loaders that start on appear and loop forever
//! - **Lifecycle**: shared `Idle`/`Running`/`Completing`/`Resetting` state per instance
//! - **Deferred Callbacks**: actions queued during a tick and dispatched after it
//!
//! # Example
//!
//! ```rust
//! use soothing_components::{Component, ProgressButton, ProgressButtonConfig};
//! use soothing_core::RecordingContext;
//!
//! let mut button = ProgressButton::new(ProgressButtonConfig::default().duration(1.0))?;
//! button.start();
//! for _ in 0..100 {
//!     button.tick(0.01);
//! }
//! assert!((button.progress() - 1.0).abs() < 0.01);
//!
//! let mut ctx = RecordingContext::new(button.intrinsic_size());
//! button.render(&mut ctx);
//! # Ok::<(), soothing_core::ConfigError>(())
//! ```

pub mod buttons;
pub mod component;
pub mod navigation;
pub mod spinners;

pub use component::{ActionId, Callback, Component, ComponentCore, Lifecycle};

pub use buttons::{
    BubbleButton, BubbleButtonConfig, BubblePhase, FluidLoadingButton, FluidLoadingButtonConfig,
    LikeButton, LikeButtonConfig, ProgressButton, ProgressButtonConfig, WaveButton,
    WaveButtonConfig,
};
pub use navigation::{BarLayout, NavigationBar, NavigationBarConfig, NavigationItem};
pub use spinners::{
    AnimatedGradientCircles, EternalLoader, EternalLoaderConfig, FaceAnimation,
    FaceAnimationConfig, GhostLoader, GhostLoaderConfig, GradientCirclesConfig, HarmonySpinner,
    HarmonySpinnerConfig, PulsingCapsules, PulsingCapsulesConfig, RippleEffect,
    RippleEffectConfig, RotatingCircles, RotatingCirclesConfig, RotatingGradientConfig,
    RotatingGradientLoader, RotatingLoader, RotatingLoaderConfig, SandStage, SandglassLoader,
    SandglassLoaderConfig, SwingLoader, SwingLoaderConfig,
};
