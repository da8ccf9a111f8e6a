//! Swing loader
//!
//! A short bead of stroke sliding along an upright capsule while the
//! capsule and the ring beneath it bob up and down, so the bead seems to
//! swing through the ring like a pendulum.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain};
use soothing_core::{
    ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Path, Point, Rect, Size,
    Stroke,
};
use soothing_shapes::{capsule_arc, TrimRange};

use crate::component::{checked, Component, ComponentCore};

/// Vertical travel of the whole loader, in points
const TRAVEL: f32 = 60.0;

/// Trim window at the start of a swing
const SWING_FROM: f32 = 0.2;

/// Trim distance covered by one swing
const SWING_SPAN: f32 = 0.6;

/// Length of the bead as a fraction of the capsule outline
const BEAD: f32 = 0.001;

/// Swing loader configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwingLoaderConfig {
    /// Half the height of the capsule track
    pub size: f32,
    /// Seconds per swing
    pub duration: f32,
    pub loader_color: Color,
    pub background_color: Color,
}

impl Default for SwingLoaderConfig {
    fn default() -> Self {
        Self {
            size: 100.0,
            duration: 1.0,
            loader_color: Color::BLUE,
            background_color: Color::GRAY.opacity(0.3),
        }
    }
}

impl SwingLoaderConfig {
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn loader_color(mut self, color: Color) -> Self {
        self.loader_color = color;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("size", self.size)?;
        ensure_positive("duration", self.duration)?;
        Ok(())
    }

    fn main_size(&self) -> f32 {
        self.size * 2.0
    }

    fn stroke_width(&self) -> f32 {
        self.main_size() * 0.065
    }
}

/// Bead swinging along a bobbing capsule
pub struct SwingLoader {
    config: SwingLoaderConfig,
    core: ComponentCore,
    /// 0.0 at the start of a swing, 1.0 at its end
    swing: AnimatedParam,
}

impl SwingLoader {
    pub fn new(config: SwingLoaderConfig) -> Result<Self, ConfigError> {
        checked("swing_loader", config.validate())?;
        let core = ComponentCore::new("swing_loader");
        let swing = AnimatedParam::new("swing", 0.0)
            .with_domain(ParamDomain::UNIT)
            .with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            swing,
        })
    }

    pub fn config(&self) -> &SwingLoaderConfig {
        &self.config
    }

    /// Portion of the capsule outline the bead covers
    pub fn trim(&self) -> TrimRange {
        let start = SWING_FROM + SWING_SPAN * self.swing.value();
        TrimRange::new(start, start + BEAD)
    }

    /// Downward offset of the capsule and ring
    pub fn vertical_offset(&self) -> f32 {
        TRAVEL * (1.0 - self.swing.value())
    }

    /// Center of the ring when the loader is at its highest
    fn anchor(&self) -> Point {
        let main = self.config.main_size();
        let stroke = self.config.stroke_width();
        Point::new((main / 2.0 + stroke) / 2.0, main * 0.75 + stroke / 2.0)
    }
}

impl Component for SwingLoader {
    fn name(&self) -> &'static str {
        "swing_loader"
    }

    fn intrinsic_size(&self) -> Size {
        let main = self.config.main_size();
        let stroke = self.config.stroke_width();
        Size::new(main / 2.0 + stroke, main + TRAVEL + stroke)
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn on_appear(&mut self) {
        self.swing.set(0.0);
        self.swing.animate_to(
            1.0,
            AnimationSpec::ease_in_out(self.config.duration).repeat_forever(true),
        );
        self.core.begin_cycle();
    }

    fn tick(&mut self, dt: f32) {
        self.core.clock_mut().tick(dt);
        self.swing.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let main = self.config.main_size();
        let stroke = self.config.stroke_width();
        let center = self.anchor().offset(0.0, self.vertical_offset());

        ctx.stroke(
            &Path::circle(center, main / 4.0),
            &Stroke::new(stroke),
            self.config.background_color,
        );

        let track = Rect::centered(center.offset(0.0, -main / 4.0), Size::new(main, main / 2.0));
        let bead = capsule_arc(track, self.trim(), -90.0);
        ctx.stroke(&bead, &Stroke::rounded(stroke), self.config.loader_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::RecordingContext;

    fn loader() -> SwingLoader {
        SwingLoader::new(SwingLoaderConfig::default()).unwrap()
    }

    #[test]
    fn test_starts_low_with_bead_at_start() {
        let spinner = loader();
        assert_eq!(spinner.vertical_offset(), TRAVEL);
        let trim = spinner.trim();
        assert!((trim.start - 0.2).abs() < 1e-6);
        assert!((trim.end - 0.201).abs() < 1e-6);
    }

    #[test]
    fn test_swings_up_and_back() {
        let mut spinner = loader();
        spinner.on_appear();
        for _ in 0..100 {
            spinner.tick(0.01);
        }
        assert!(spinner.vertical_offset().abs() < 0.1);
        assert!((spinner.trim().start - 0.8).abs() < 1e-3);

        for _ in 0..100 {
            spinner.tick(0.01);
        }
        assert!((spinner.vertical_offset() - TRAVEL).abs() < 0.1);
    }

    #[test]
    fn test_fits_intrinsic_size() {
        let spinner = loader();
        let size = spinner.intrinsic_size();
        // Ring bottom at the lowest point
        let bottom = spinner.anchor().y + TRAVEL + spinner.config().main_size() / 4.0;
        assert!(bottom <= size.height);

        let mut ctx = RecordingContext::new(size);
        spinner.render(&mut ctx);
        assert_eq!(ctx.paint_count(), 2);
    }
}
