//! Animated gradient circles
//!
//! Three pairs of gradient circles fanned out at 60 degree steps. The
//! whole flower slowly blooms: it grows, turns a quarter and each pair
//! spreads apart, then folds back.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain};
use soothing_core::{
    ensure_positive, Affine2D, Color, ConfigError, DrawContext, DrawContextExt, Gradient, Path,
    Point, Size,
};

use crate::component::{checked, rotation, Component, ComponentCore};

/// Scale of the folded flower
const FOLDED_SCALE: f32 = 0.45;

/// Quarter turn while blooming
const BLOOM_ROTATION: f32 = 90.0;

const PAIR_ANGLES: [f32; 3] = [0.0, 60.0, 120.0];

/// Animated gradient circles configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GradientCirclesConfig {
    /// Span of the open flower
    pub size: f32,
    pub primary_color: Color,
    pub secondary_color: Color,
    /// Playback rate; 20 plays the bloom at the default pace
    pub speed: f32,
}

impl Default for GradientCirclesConfig {
    fn default() -> Self {
        Self {
            size: 120.0,
            primary_color: Color::GREEN,
            secondary_color: Color::BLUE,
            speed: 0.08,
        }
    }
}

impl GradientCirclesConfig {
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn primary_color(mut self, color: Color) -> Self {
        self.primary_color = color;
        self
    }

    pub fn secondary_color(mut self, color: Color) -> Self {
        self.secondary_color = color;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("size", self.size)?;
        ensure_positive("speed", self.speed)?;
        Ok(())
    }

    /// Diameter of a single circle
    fn circle(&self) -> f32 {
        self.size / 2.0
    }
}

/// Blooming flower of gradient circles
pub struct AnimatedGradientCircles {
    config: GradientCirclesConfig,
    core: ComponentCore,
    /// 0.0 folded, 1.0 open
    bloom: AnimatedParam,
}

impl AnimatedGradientCircles {
    pub fn new(config: GradientCirclesConfig) -> Result<Self, ConfigError> {
        checked("gradient_circles", config.validate())?;
        let core = ComponentCore::new("gradient_circles");
        let bloom = AnimatedParam::new("bloom", 0.0)
            .with_domain(ParamDomain::UNIT)
            .with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            bloom,
        })
    }

    pub fn config(&self) -> &GradientCirclesConfig {
        &self.config
    }

    pub fn bloom(&self) -> f32 {
        self.bloom.value()
    }

    pub fn rotation(&self) -> f32 {
        BLOOM_ROTATION * self.bloom()
    }

    pub fn scale(&self) -> f32 {
        FOLDED_SCALE + (1.0 - FOLDED_SCALE) * self.bloom()
    }

    fn draw_pair(
        &self,
        ctx: &mut dyn DrawContext,
        center: Point,
        primary: Color,
        secondary: Color,
    ) {
        let s = self.config.circle();
        let spread = s / 2.0 * self.bloom();

        let upper = center.offset(0.0, -spread);
        let upper_fill = Gradient::linear(
            upper.offset(0.0, -s / 2.0),
            upper.offset(0.0, s / 2.0),
            &[primary, primary.opacity(0.3)],
        );
        ctx.fill(&Path::circle(upper, s / 2.0), upper_fill);

        let lower = center.offset(0.0, spread);
        let lower_fill = Gradient::linear(
            lower.offset(0.0, s / 2.0),
            lower.offset(0.0, -s / 2.0),
            &[secondary, secondary.opacity(0.3)],
        );
        ctx.fill(&Path::circle(lower, s / 2.0), lower_fill);
    }
}

impl Component for AnimatedGradientCircles {
    fn name(&self) -> &'static str {
        "gradient_circles"
    }

    fn intrinsic_size(&self) -> Size {
        Size::square(self.config.size)
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn on_appear(&mut self) {
        let spec = AnimationSpec::default()
            .repeat_forever(true)
            .speed(self.config.speed / 20.0);
        self.bloom.set(0.0);
        self.bloom.animate_to(1.0, spec);
        self.core.begin_cycle();
    }

    fn tick(&mut self, dt: f32) {
        self.core.clock_mut().tick(dt);
        self.bloom.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let center = self.intrinsic_size().to_rect().center();
        let (a, b) = (self.config.primary_color, self.config.secondary_color);
        let flower = Affine2D::scale_around(self.scale(), center)
            .then(&rotation(self.rotation(), center));

        ctx.with_transform(flower, |ctx| {
            for (i, angle) in PAIR_ANGLES.iter().enumerate() {
                let (primary, secondary) = if i == 1 { (b, a) } else { (a, b) };
                ctx.with_transform(rotation(*angle, center), |ctx| {
                    ctx.with_opacity(0.7, |ctx| self.draw_pair(ctx, center, primary, secondary));
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::{Brush, DrawCommand, RecordingContext};

    fn flower(speed: f32) -> AnimatedGradientCircles {
        AnimatedGradientCircles::new(GradientCirclesConfig::default().speed(speed)).unwrap()
    }

    #[test]
    fn test_blooms_and_folds() {
        // 20 / 20 = normal pace, 0.35 s per half cycle
        let mut spinner = flower(20.0);
        spinner.on_appear();
        assert!((spinner.scale() - FOLDED_SCALE).abs() < 1e-6);

        for _ in 0..35 {
            spinner.tick(0.01);
        }
        assert!(spinner.bloom() > 0.99);
        assert!((spinner.rotation() - 90.0).abs() < 1.0);
        assert!((spinner.scale() - 1.0).abs() < 1e-2);

        for _ in 0..35 {
            spinner.tick(0.01);
        }
        assert!(spinner.bloom() < 0.01);
    }

    #[test]
    fn test_speed_slows_bloom() {
        let mut fast = flower(20.0);
        let mut slow = flower(2.0);
        fast.on_appear();
        slow.on_appear();
        for _ in 0..10 {
            fast.tick(0.01);
            slow.tick(0.01);
        }
        assert!(fast.bloom() > slow.bloom());
    }

    #[test]
    fn test_middle_pair_swaps_colors() {
        let spinner = flower(20.0);
        let mut ctx = RecordingContext::new(spinner.intrinsic_size());
        spinner.render(&mut ctx);

        let firsts: Vec<Color> = ctx
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillPath {
                    brush: Brush::Gradient(g),
                    ..
                } => g.stops().first().map(|s| s.color),
                _ => None,
            })
            .collect();
        let (a, b) = (spinner.config().primary_color, spinner.config().secondary_color);
        assert_eq!(firsts, vec![a, b, b, a, a, b]);
    }
}
