//! Tappable buttons
//!
//! Each button animates in response to a tap and reports back through an
//! optional action registered with `with_action`.

pub mod bubble;
pub mod fluid;
pub mod like;
pub mod progress;
pub mod wave;

pub use bubble::{BubbleButton, BubbleButtonConfig, BubblePhase};
pub use fluid::{FluidLoadingButton, FluidLoadingButtonConfig};
pub use like::{LikeButton, LikeButtonConfig};
pub use progress::{ProgressButton, ProgressButtonConfig};
pub use wave::{WaveButton, WaveButtonConfig};
