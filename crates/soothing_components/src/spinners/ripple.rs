//! Ripple effect
//!
//! Three rings grow out of the center and fade as they expand, each
//! trailing the previous one by a ninth of the duration.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain};
use soothing_core::{
    ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Path, Size, Stroke,
};

use crate::component::{checked, Component, ComponentCore};

const RINGS: usize = 3;

/// Ripple effect configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RippleEffectConfig {
    pub color: Color,
    /// Diameter of a fully grown ring
    pub size: f32,
    /// Seconds for one ring to grow out
    pub duration: f32,
}

impl Default for RippleEffectConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 50.0,
            duration: 0.5,
        }
    }
}

impl RippleEffectConfig {
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("size", self.size)?;
        ensure_positive("duration", self.duration)?;
        Ok(())
    }
}

/// Expanding, fading rings
pub struct RippleEffect {
    config: RippleEffectConfig,
    core: ComponentCore,
    /// Growth of each ring, 0.0 at the center to 1.0 fully out
    rings: [AnimatedParam; RINGS],
}

impl RippleEffect {
    pub fn new(config: RippleEffectConfig) -> Result<Self, ConfigError> {
        checked("ripple_effect", config.validate())?;
        let core = ComponentCore::new("ripple_effect");
        let rings = std::array::from_fn(|_| {
            AnimatedParam::new("growth", 0.0)
                .with_domain(ParamDomain::UNIT)
                .with_redraw(core.redraw())
        });
        Ok(Self {
            config,
            core,
            rings,
        })
    }

    pub fn config(&self) -> &RippleEffectConfig {
        &self.config
    }

    pub fn growth(&self, ring: usize) -> f32 {
        self.rings.get(ring).map_or(0.0, AnimatedParam::value)
    }
}

impl Component for RippleEffect {
    fn name(&self) -> &'static str {
        "ripple_effect"
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
        let duration = self.config.duration;
        for (i, ring) in self.rings.iter_mut().enumerate() {
            let spec = AnimationSpec::ease_out(duration)
                .delay(i as f32 * duration / 9.0)
                .repeat_forever(false);
            ring.set(0.0);
            ring.animate_to(1.0, spec);
        }
        self.core.begin_cycle();
    }

    fn tick(&mut self, dt: f32) {
        self.core.clock_mut().tick(dt);
        for ring in self.rings.iter_mut() {
            ring.step(dt);
        }
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let size = self.config.size;
        let center = self.intrinsic_size().to_rect().center();
        for ring in &self.rings {
            let t = ring.value();
            let radius = size / 2.0 * t;
            let width = size / 10.0 * (1.0 - t);
            if radius <= 0.0 || width <= 0.0 {
                continue;
            }
            ctx.stroke(
                &Path::circle(center, radius),
                &Stroke::new(width),
                self.config.color.opacity(1.0 - t),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::RecordingContext;

    fn ripple() -> RippleEffect {
        RippleEffect::new(RippleEffectConfig::default().duration(0.9)).unwrap()
    }

    #[test]
    fn test_rings_are_staggered() {
        let mut spinner = ripple();
        spinner.on_appear();
        for _ in 0..15 {
            spinner.tick(0.01);
        }
        // Delays are 0, 0.1 and 0.2 s
        assert!(spinner.growth(0) > spinner.growth(1));
        assert!(spinner.growth(1) > 0.0);
        assert_eq!(spinner.growth(2), 0.0);
    }

    #[test]
    fn test_rings_restart_from_center() {
        let mut spinner = ripple();
        spinner.on_appear();
        for _ in 0..85 {
            spinner.tick(0.01);
        }
        let late = spinner.growth(0);
        for _ in 0..10 {
            spinner.tick(0.01);
        }
        assert!(late > 0.9);
        assert!(spinner.growth(0) < 0.5);
    }

    #[test]
    fn test_center_rings_are_not_drawn() {
        let spinner = ripple();
        let mut ctx = RecordingContext::new(spinner.intrinsic_size());
        spinner.render(&mut ctx);
        assert_eq!(ctx.paint_count(), 0);
    }
}
