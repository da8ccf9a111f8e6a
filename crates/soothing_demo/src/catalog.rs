//! Component catalog
//!
//! The demo menu: every component with the parameters it is showcased
//! with. Pink, blue, purple and gray come from the configured palette.

use std::cell::Cell;
use std::rc::Rc;

use soothing_components::*;
use soothing_core::{Color, ConfigError};
use tracing::info;

use crate::config::PaletteConfig;

/// Number of callbacks fired during a run
pub type ActionCounter = Rc<Cell<u32>>;

type Built = Result<Box<dyn Component>, ConfigError>;

type Builder = fn(&PaletteConfig, &ActionCounter) -> Built;

/// What a catalog entry is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Button,
    Navigation,
    Spinner,
}

impl EntryKind {
    /// Whether the runner should tap the component
    pub fn is_interactive(self) -> bool {
        !matches!(self, EntryKind::Spinner)
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Button => "button",
            EntryKind::Navigation => "navigation",
            EntryKind::Spinner => "spinner",
        }
    }
}

/// One menu item
pub struct Entry {
    pub slug: &'static str,
    pub title: &'static str,
    pub kind: EntryKind,
    build: Builder,
}

impl Entry {
    /// Build a fresh instance whose callbacks bump `actions`
    pub fn build(&self, palette: &PaletteConfig, actions: &ActionCounter) -> Built {
        (self.build)(palette, actions)
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("slug", &self.slug)
            .field("kind", &self.kind)
            .finish()
    }
}

macro_rules! entry {
    ($slug:literal, $title:literal, $kind:ident, $build:expr) => {
        Entry {
            slug: $slug,
            title: $title,
            kind: EntryKind::$kind,
            build: $build,
        }
    };
}

static CATALOG: [Entry; 18] = [
    entry!("progress-button", "Progress Button", Button, progress_button),
    entry!("wave-button", "Wave Button", Button, wave_button),
    entry!("bubble-button", "Bubble Button", Button, bubble_button),
    entry!("fluid-loading-button", "Fluid Loading Button", Button, fluid_button),
    entry!("like-button", "Like Button", Button, like_button),
    entry!("navigation-bar", "Navigation Bar", Navigation, navigation_bar),
    entry!("pulsing-capsules", "Pulsing Capsules", Spinner, pulsing_capsules),
    entry!("eternal-loader", "Eternal Loader", Spinner, eternal_loader),
    entry!("ripple-effect", "Ripple Effect", Spinner, ripple_effect),
    entry!("sandglass-loader", "Sandglass Loader", Spinner, sandglass_loader),
    entry!("gradient-circles", "Animated Gradient Circles", Spinner, gradient_circles),
    entry!("ghost-loader", "Ghost Loader", Spinner, ghost_loader),
    entry!("rotating-gradient-loader", "Rotating Gradient Loader", Spinner, rotating_gradient),
    entry!("rotating-loader", "Rotating Loader", Spinner, rotating_loader),
    entry!("swing-loader", "Swing Loader", Spinner, swing_loader),
    entry!("harmony-spinner", "Harmony Spinner", Spinner, harmony_spinner),
    entry!("face-animation", "Face Animation", Spinner, face_animation),
    entry!("rotating-circles", "Rotating Circles", Spinner, rotating_circles),
];

/// Every entry in menu order
pub fn entries() -> &'static [Entry] {
    &CATALOG
}

pub fn find(slug: &str) -> Option<&'static Entry> {
    CATALOG.iter().find(|entry| entry.slug == slug)
}

fn counting(actions: &ActionCounter, message: &'static str) -> impl FnMut() + 'static {
    let actions = Rc::clone(actions);
    move || {
        actions.set(actions.get() + 1);
        info!("{}", message);
    }
}

fn progress_button(p: &PaletteConfig, actions: &ActionCounter) -> Built {
    let button = ProgressButton::new(ProgressButtonConfig::new(3.0, 250.0, p.accent))?
        .with_action(counting(actions, "progress finished"));
    Ok(Box::new(button))
}

fn wave_button(p: &PaletteConfig, actions: &ActionCounter) -> Built {
    let button = WaveButton::new(WaveButtonConfig::new(250.0, p.accent))?
        .with_action(counting(actions, "wave button tapped"));
    Ok(Box::new(button))
}

fn bubble_button(p: &PaletteConfig, actions: &ActionCounter) -> Built {
    let button = BubbleButton::new(BubbleButtonConfig::new(200.0, p.accent))?
        .with_action(counting(actions, "bubble popped"));
    Ok(Box::new(button))
}

fn fluid_button(p: &PaletteConfig, actions: &ActionCounter) -> Built {
    let config = FluidLoadingButtonConfig::default()
        .height(350.0)
        .fluid_speed(1.5)
        .wave_height(20.0)
        .foreground(vec![p.secondary, p.accent])
        .background(p.tertiary);
    let button =
        FluidLoadingButton::new(config)?.with_action(counting(actions, "fluid loading finished"));
    Ok(Box::new(button))
}

fn like_button(p: &PaletteConfig, actions: &ActionCounter) -> Built {
    let config = LikeButtonConfig::default()
        .initial_likes(3)
        .size(170.0)
        .active_color(p.accent)
        .inactive_color(p.neutral);
    let button = LikeButton::new(config)?.with_action(counting(actions, "like toggled"));
    Ok(Box::new(button))
}

fn navigation_bar(p: &PaletteConfig, actions: &ActionCounter) -> Built {
    let config = NavigationBarConfig::default()
        .items(Vec::new())
        .item("person.fill", p.secondary)
        .item("magnifyingglass", p.tertiary)
        .item("heart.fill", p.accent)
        .item("gearshape.fill", p.neutral);
    let count = config.items.len();
    let mut bar = NavigationBar::new(config)?;
    for index in 0..count {
        bar = bar.with_action(index, counting(actions, "navigation item selected"));
    }
    Ok(Box::new(bar))
}

fn pulsing_capsules(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = PulsingCapsulesConfig::default()
        .capsule_width(10.0)
        .capsule_height(70.0)
        .color(p.accent)
        .count(12)
        .duration(2.0);
    Ok(Box::new(PulsingCapsules::new(config)?))
}

fn eternal_loader(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = EternalLoaderConfig::default()
        .size(250.0)
        .stroke_width(15.0)
        .color(p.accent)
        .duration(2.0);
    Ok(Box::new(EternalLoader::new(config)?))
}

fn ripple_effect(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = RippleEffectConfig::default()
        .color(p.accent)
        .size(250.0)
        .duration(1.5);
    Ok(Box::new(RippleEffect::new(config)?))
}

fn sandglass_loader(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = SandglassLoaderConfig::default()
        .size(200.0)
        .frame_color(Color::BLACK)
        .sand_color(p.accent)
        .duration(2.5);
    Ok(Box::new(SandglassLoader::new(config)?))
}

fn gradient_circles(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = GradientCirclesConfig::default()
        .size(250.0)
        .primary_color(p.accent)
        .secondary_color(p.secondary)
        .speed(1.8);
    Ok(Box::new(AnimatedGradientCircles::new(config)?))
}

fn ghost_loader(_: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = GhostLoaderConfig::default().size(200.0).color(Color::WHITE);
    Ok(Box::new(GhostLoader::new(config)?))
}

fn rotating_gradient(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = RotatingGradientConfig::default()
        .main_circle_size(250.0)
        .rotation_line_size(275.0)
        .capsule_width(15.0)
        .gradient_colors(vec![p.accent, p.secondary]);
    Ok(Box::new(RotatingGradientLoader::new(config)?))
}

fn rotating_loader(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = RotatingLoaderConfig::default()
        .large_circle_size(230.0)
        .small_circle_size(100.0)
        .color(p.accent)
        .duration(2.0);
    Ok(Box::new(RotatingLoader::new(config)?))
}

fn swing_loader(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = SwingLoaderConfig::default()
        .size(220.0)
        .duration(1.5)
        .loader_color(Color::BLACK)
        .background_color(p.accent);
    Ok(Box::new(SwingLoader::new(config)?))
}

fn harmony_spinner(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = HarmonySpinnerConfig::default()
        .rotation_time(2.5)
        .size(250.0)
        .colors(vec![p.secondary, p.tertiary, p.accent]);
    Ok(Box::new(HarmonySpinner::new(config)?))
}

fn face_animation(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = FaceAnimationConfig::default()
        .size(250.0)
        .face_color(p.accent.opacity(0.7));
    Ok(Box::new(FaceAnimation::new(config)?))
}

fn rotating_circles(p: &PaletteConfig, _: &ActionCounter) -> Built {
    let config = RotatingCirclesConfig::default()
        .size(170.0)
        .colors(vec![p.secondary, p.accent, p.tertiary])
        .duration(2.0);
    Ok(Box::new(RotatingCircles::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_are_unique() {
        let slugs: HashSet<_> = entries().iter().map(|e| e.slug).collect();
        assert_eq!(slugs.len(), entries().len());
    }

    #[test]
    fn test_every_entry_builds() {
        let palette = PaletteConfig::default();
        let actions = ActionCounter::default();
        for entry in entries() {
            let component = entry.build(&palette, &actions).unwrap();
            let size = component.intrinsic_size();
            assert!(size.width > 0.0 && size.height > 0.0, "{}", entry.slug);
        }
        assert_eq!(actions.get(), 0);
    }

    #[test]
    fn test_find_by_slug() {
        let entry = find("harmony-spinner").unwrap();
        assert_eq!(entry.title, "Harmony Spinner");
        assert_eq!(entry.kind, EntryKind::Spinner);
        assert!(find("missing").is_none());
    }

    #[test]
    fn test_only_buttons_and_navigation_are_tapped() {
        let interactive = entries().iter().filter(|e| e.kind.is_interactive()).count();
        assert_eq!(interactive, 6);
    }
}
