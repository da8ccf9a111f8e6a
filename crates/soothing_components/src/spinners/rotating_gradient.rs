//! Rotating gradient loader
//!
//! A gradient disc circled by a ring of turning dashes, with a row of
//! white bars breathing in its middle.

use serde::Deserialize;
use smallvec::SmallVec;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain};
use soothing_core::{
    ensure_at_least, ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Gradient,
    Path, Point, Rect, Size, Stroke,
};
use soothing_shapes::dashed_ring;

use crate::component::{checked, Component, ComponentCore};

const BARS: usize = 5;

/// Seconds per turn of the dashed ring
const TURN_DURATION: f32 = 4.0;

/// Seconds for the bars to grow or shrink
const BREATH_DURATION: f32 = 1.2;

/// Rotating gradient loader configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RotatingGradientConfig {
    /// Diameter of the filled disc
    pub main_circle_size: f32,
    /// Diameter of the dashed ring
    pub rotation_line_size: f32,
    /// Width of one bar; dashes are half as wide
    pub capsule_width: f32,
    /// Gradient from left to right
    pub gradient_colors: Vec<Color>,
}

impl Default for RotatingGradientConfig {
    fn default() -> Self {
        Self {
            main_circle_size: 200.0,
            rotation_line_size: 180.0,
            capsule_width: 5.0,
            gradient_colors: vec![Color::BLUE, Color::PURPLE],
        }
    }
}

impl RotatingGradientConfig {
    pub fn main_circle_size(mut self, size: f32) -> Self {
        self.main_circle_size = size;
        self
    }

    pub fn rotation_line_size(mut self, size: f32) -> Self {
        self.rotation_line_size = size;
        self
    }

    pub fn capsule_width(mut self, width: f32) -> Self {
        self.capsule_width = width;
        self
    }

    pub fn gradient_colors(mut self, colors: Vec<Color>) -> Self {
        self.gradient_colors = colors;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("main_circle_size", self.main_circle_size)?;
        ensure_positive("rotation_line_size", self.rotation_line_size)?;
        ensure_positive("capsule_width", self.capsule_width)?;
        ensure_at_least("gradient_colors", &self.gradient_colors, 1)?;
        Ok(())
    }

    fn dash(&self) -> f32 {
        self.capsule_width / 2.0
    }
}

/// Gradient disc with a turning dashed ring and breathing bars
pub struct RotatingGradientLoader {
    config: RotatingGradientConfig,
    core: ComponentCore,
    rotation: AnimatedParam,
    /// Bar height factor, 0.5 to 1.0
    scale: AnimatedParam,
}

impl RotatingGradientLoader {
    pub fn new(config: RotatingGradientConfig) -> Result<Self, ConfigError> {
        checked("rotating_gradient", config.validate())?;
        let core = ComponentCore::new("rotating_gradient");
        let rotation = AnimatedParam::new("rotation", 0.0)
            .with_domain(ParamDomain::DEGREES)
            .with_redraw(core.redraw());
        let scale = AnimatedParam::new("scale", 0.5).with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            rotation,
            scale,
        })
    }

    pub fn config(&self) -> &RotatingGradientConfig {
        &self.config
    }

    pub fn rotation(&self) -> f32 {
        self.rotation.value()
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    /// Heights of the bars from left to right
    pub fn bar_heights(&self) -> SmallVec<[f32; BARS]> {
        let max = self.config.main_circle_size / 3.0;
        (0..BARS)
            .map(|i| max * (self.scale() + i as f32 * 0.1))
            .collect()
    }

    fn gradient(&self, center: Point, diameter: f32) -> Gradient {
        Gradient::linear(
            center.offset(-diameter / 2.0, 0.0),
            center.offset(diameter / 2.0, 0.0),
            &self.config.gradient_colors,
        )
    }
}

impl Component for RotatingGradientLoader {
    fn name(&self) -> &'static str {
        "rotating_gradient"
    }

    fn intrinsic_size(&self) -> Size {
        let c = &self.config;
        Size::square(c.main_circle_size.max(c.rotation_line_size + c.dash()))
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn on_appear(&mut self) {
        self.rotation.set(0.0);
        self.rotation.animate_to(
            360.0,
            AnimationSpec::linear(TURN_DURATION).repeat_forever(false),
        );
        self.scale.set(0.5);
        self.scale.animate_to(
            1.0,
            AnimationSpec::ease_in_out(BREATH_DURATION).repeat_forever(true),
        );
        self.core.begin_cycle();
    }

    fn tick(&mut self, dt: f32) {
        self.core.clock_mut().tick(dt);
        self.rotation.step(dt);
        self.scale.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let c = &self.config;
        let center = self.intrinsic_size().to_rect().center();

        ctx.fill(
            &Path::circle(center, c.main_circle_size / 2.0),
            self.gradient(center, c.main_circle_size),
        );

        let dash = c.dash();
        let ring = dashed_ring(
            center,
            c.rotation_line_size / 2.0,
            dash,
            dash * 3.0,
            self.rotation(),
        );
        ctx.stroke(
            &ring,
            &Stroke::rounded(dash),
            self.gradient(center, c.rotation_line_size),
        );

        let pitch = c.capsule_width * 1.5;
        let first = center.x - pitch * (BARS - 1) as f32 / 2.0;
        for (i, height) in self.bar_heights().into_iter().enumerate() {
            let bar = Rect::centered(
                Point::new(first + pitch * i as f32, center.y),
                Size::new(c.capsule_width, height),
            );
            ctx.fill(&Path::capsule(bar), Color::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::{Brush, DrawCommand, RecordingContext};

    fn loader() -> RotatingGradientLoader {
        RotatingGradientLoader::new(RotatingGradientConfig::default()).unwrap()
    }

    #[test]
    fn test_bars_step_up_by_a_tenth() {
        let spinner = loader();
        let heights = spinner.bar_heights();
        let max = 200.0 / 3.0;
        assert_eq!(heights.len(), 5);
        assert!((heights[0] - max * 0.5).abs() < 1e-3);
        assert!((heights[4] - max * 0.9).abs() < 1e-3);
    }

    #[test]
    fn test_ring_turns_and_bars_breathe() {
        let mut spinner = loader();
        spinner.on_appear();
        for _ in 0..100 {
            spinner.tick(0.01);
        }
        assert!((spinner.rotation() - 90.0).abs() < 0.1);
        assert!(spinner.scale() > 0.5 && spinner.scale() < 1.0);

        for _ in 0..20 {
            spinner.tick(0.01);
        }
        assert!((spinner.scale() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_disc_and_ring_share_gradient() {
        let spinner = loader();
        let mut ctx = RecordingContext::new(spinner.intrinsic_size());
        spinner.render(&mut ctx);

        // Disc, ring and five bars
        assert_eq!(ctx.paint_count(), 7);
        let gradients = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c.brush(), Some(Brush::Gradient(_))))
            .count();
        assert_eq!(gradients, 2);
        assert!(matches!(
            ctx.commands().last(),
            Some(DrawCommand::FillPath { .. })
        ));
    }

    #[test]
    fn test_requires_a_color() {
        let config = RotatingGradientConfig::default().gradient_colors(Vec::new());
        assert!(matches!(
            RotatingGradientLoader::new(config),
            Err(ConfigError::Empty { .. })
        ));
    }
}
