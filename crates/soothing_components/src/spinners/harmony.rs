//! Harmony spinner
//!
//! One arc per colour, spread a third of a turn apart. Together they turn
//! once while growing from a dot to a full ring, then unwind.

use serde::Deserialize;
use smallvec::SmallVec;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain};
use soothing_core::{
    ensure_at_least, ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Size,
    Stroke,
};
use soothing_shapes::{ring_arc, TrimRange};

use crate::component::{checked, Component, ComponentCore};

/// Angle the arcs start from (12 o'clock)
const START_ROTATION: f32 = 270.0;

/// Arc length at rest
const MIN_END: f32 = 0.03;

/// Angular spacing between neighbouring arcs
const SEGMENT_SPACING: f32 = 120.0;

/// Harmony spinner configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HarmonySpinnerConfig {
    /// Seconds for one turn
    pub rotation_time: f32,
    pub size: f32,
    /// One arc per colour
    pub colors: Vec<Color>,
}

impl Default for HarmonySpinnerConfig {
    fn default() -> Self {
        Self {
            rotation_time: 2.0,
            size: 100.0,
            colors: vec![Color::RED, Color::BLUE, Color::GREEN],
        }
    }
}

impl HarmonySpinnerConfig {
    pub fn rotation_time(mut self, seconds: f32) -> Self {
        self.rotation_time = seconds;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("rotation_time", self.rotation_time)?;
        ensure_positive("size", self.size)?;
        ensure_at_least("colors", &self.colors, 1)?;
        Ok(())
    }
}

/// Coloured arcs turning and growing together
pub struct HarmonySpinner {
    config: HarmonySpinnerConfig,
    core: ComponentCore,
    rotation: AnimatedParam,
    end: AnimatedParam,
}

impl HarmonySpinner {
    pub fn new(config: HarmonySpinnerConfig) -> Result<Self, ConfigError> {
        checked("harmony_spinner", config.validate())?;
        let core = ComponentCore::new("harmony_spinner");
        let rotation = AnimatedParam::new("rotation", START_ROTATION)
            .with_domain(ParamDomain::DEGREES)
            .with_redraw(core.redraw());
        let end = AnimatedParam::new("arc_end", MIN_END)
            .with_domain(ParamDomain::UNIT)
            .with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            rotation,
            end,
        })
    }

    pub fn config(&self) -> &HarmonySpinnerConfig {
        &self.config
    }

    pub fn rotation(&self) -> f32 {
        self.rotation.value()
    }

    /// Fraction of the ring each arc covers
    pub fn arc_end(&self) -> f32 {
        self.end.value()
    }

    /// Rotation of each arc, in colour order
    pub fn segment_rotations(&self) -> SmallVec<[f32; 4]> {
        (0..self.config.colors.len())
            .map(|i| ParamDomain::DEGREES.normalize(self.rotation() + SEGMENT_SPACING * i as f32))
            .collect()
    }
}

impl Component for HarmonySpinner {
    fn name(&self) -> &'static str {
        "harmony_spinner"
    }

    fn intrinsic_size(&self) -> Size {
        Size::square(self.config.size * 1.1)
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn on_appear(&mut self) {
        let spec = AnimationSpec::ease_in_out(self.config.rotation_time).repeat_forever(true);
        self.rotation.set(START_ROTATION);
        self.rotation.animate_to(START_ROTATION + 360.0, spec);
        self.end.set(MIN_END);
        self.end.animate_to(1.0, spec);
        self.core.begin_cycle();
    }

    fn tick(&mut self, dt: f32) {
        self.core.clock_mut().tick(dt);
        self.rotation.step(dt);
        self.end.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let size = self.config.size;
        let end = self.arc_end();
        let center = self.intrinsic_size().to_rect().center();
        let stroke = Stroke::rounded(size / 10.0 * end);

        for (color, rotation) in self.config.colors.iter().zip(self.segment_rotations()) {
            let arc = ring_arc(center, size / 2.0, TrimRange::to(end), rotation);
            ctx.stroke(&arc, &stroke, *color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::{Brush, RecordingContext};

    fn spinner() -> HarmonySpinner {
        HarmonySpinner::new(HarmonySpinnerConfig::default().rotation_time(2.0)).unwrap()
    }

    fn strokes_of(ctx: &RecordingContext, color: Color) -> usize {
        ctx.commands()
            .iter()
            .filter(|c| c.brush() == Some(&Brush::Solid(color)))
            .count()
    }

    #[test]
    fn test_full_turn_returns_to_start_angle() {
        let mut spinner = spinner();
        spinner.on_appear();
        for _ in 0..200 {
            spinner.tick(0.01);
        }

        // One full turn added to the starting angle
        let turned = ParamDomain::DEGREES.normalize(spinner.rotation() - START_ROTATION);
        assert!(turned < 0.1 || turned > 359.9);
        assert!((spinner.arc_end() - 1.0).abs() < 1e-3);

        let mut ctx = RecordingContext::new(spinner.intrinsic_size());
        spinner.render(&mut ctx);
        for color in spinner.config().colors.clone() {
            assert_eq!(strokes_of(&ctx, color), 1);
        }
    }

    #[test]
    fn test_each_colour_drawn_once_per_frame() {
        let mut spinner = spinner();
        spinner.on_appear();
        let mut ctx = RecordingContext::new(spinner.intrinsic_size());
        for _ in 0..20 {
            for _ in 0..10 {
                spinner.tick(0.01);
            }
            ctx.clear();
            spinner.render(&mut ctx);
            assert_eq!(ctx.paint_count(), 3);
            for color in spinner.config().colors.clone() {
                assert_eq!(strokes_of(&ctx, color), 1);
            }
        }
    }

    #[test]
    fn test_segments_spaced_by_a_third() {
        let spinner = spinner();
        let rotations = spinner.segment_rotations();
        assert_eq!(rotations.as_slice(), &[270.0, 30.0, 150.0]);
    }

    #[test]
    fn test_unwinds_after_a_turn() {
        let mut spinner = spinner();
        spinner.on_appear();
        for _ in 0..400 {
            spinner.tick(0.01);
        }
        assert!((spinner.arc_end() - MIN_END).abs() < 1e-3);
    }

    #[test]
    fn test_requires_colours() {
        let config = HarmonySpinnerConfig::default().colors(Vec::new());
        assert!(HarmonySpinner::new(config).is_err());
    }
}
