//! Navigation elements

pub mod navigation_bar;

pub use navigation_bar::{BarLayout, NavigationBar, NavigationBarConfig, NavigationItem};
