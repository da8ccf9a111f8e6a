//! Rotating circles
//!
//! Three circles spread out from a shared center while the group turns,
//! then gather back in.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain};
use soothing_core::{
    ensure_at_least, ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Path,
    Point, Size,
};

use crate::component::{checked, rotation, Component, ComponentCore};

const CIRCLES: usize = 3;

/// Rotating circles configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RotatingCirclesConfig {
    pub size: f32,
    /// Cycled through when there are fewer than three
    pub colors: Vec<Color>,
    /// Seconds to spread out and gather back
    pub duration: f32,
}

impl Default for RotatingCirclesConfig {
    fn default() -> Self {
        Self {
            size: 100.0,
            colors: vec![Color::RED, Color::GREEN, Color::BLUE],
            duration: 2.0,
        }
    }
}

impl RotatingCirclesConfig {
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("size", self.size)?;
        ensure_positive("duration", self.duration)?;
        ensure_at_least("colors", &self.colors, 1)?;
        Ok(())
    }
}

/// Circles spreading out of a turning group
pub struct RotatingCircles {
    config: RotatingCirclesConfig,
    core: ComponentCore,
    /// 0.0 gathered, 1.0 spread out
    spread: AnimatedParam,
}

impl RotatingCircles {
    pub fn new(config: RotatingCirclesConfig) -> Result<Self, ConfigError> {
        checked("rotating_circles", config.validate())?;
        let core = ComponentCore::new("rotating_circles");
        let spread = AnimatedParam::new("spread", 0.0)
            .with_domain(ParamDomain::UNIT)
            .with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            spread,
        })
    }

    pub fn config(&self) -> &RotatingCirclesConfig {
        &self.config
    }

    pub fn spread(&self) -> f32 {
        self.spread.value()
    }

    pub fn rotation(&self) -> f32 {
        360.0 * self.spread()
    }

    /// Centers before the group rotation is applied
    pub fn circle_centers(&self) -> [Point; CIRCLES] {
        let center = self.intrinsic_size().to_rect().center();
        let distance = self.config.size / 3.0 * self.spread();
        std::array::from_fn(|i| {
            let angle = i as f32 * std::f32::consts::TAU / CIRCLES as f32;
            Point::on_circle(center, distance, angle)
        })
    }
}

impl Component for RotatingCircles {
    fn name(&self) -> &'static str {
        "rotating_circles"
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
        self.spread.set(0.0);
        self.spread.animate_to(
            1.0,
            AnimationSpec::linear(self.config.duration / 2.0).repeat_forever(true),
        );
        self.core.begin_cycle();
    }

    fn tick(&mut self, dt: f32) {
        self.core.clock_mut().tick(dt);
        self.spread.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let center = self.intrinsic_size().to_rect().center();
        let radius = self.config.size / 6.0;
        let colors = &self.config.colors;

        ctx.with_transform(rotation(self.rotation(), center), |ctx| {
            for (i, point) in self.circle_centers().into_iter().enumerate() {
                ctx.fill(&Path::circle(point, radius), colors[i % colors.len()]);
            }
        });
    }
}
