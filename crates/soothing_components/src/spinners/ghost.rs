//! Ghost loader
//!
//! A floating ghost with a rippling hem. The hem's wave drifts sideways on
//! a slow timer while the whole ghost bobs up and down.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, TimerSlot};
use soothing_core::{
    ensure_positive, Affine2D, Color, ConfigError, DrawContext, DrawContextExt, Path, Point, Rect,
    Size,
};
use soothing_shapes::ghost_hem;

use crate::component::{checked, Component, ComponentCore};

/// Seconds between two hem steps
const STEP_INTERVAL: f32 = 0.02;

/// Wave time added per hem step
const TIME_STEP: f32 = 0.0015;

/// Body frame height relative to the ghost size
const BODY_HEIGHT: f32 = 2.5;

/// Outline scale of the dark shadow behind the body
const SHADOW_SCALE: f32 = 1.05;

/// Ghost loader configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GhostLoaderConfig {
    /// Width of the ghost
    pub size: f32,
    pub color: Color,
}

impl Default for GhostLoaderConfig {
    fn default() -> Self {
        Self {
            size: 220.0,
            color: Color::BLUE,
        }
    }
}

impl GhostLoaderConfig {
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("size", self.size)?;
        Ok(())
    }

    fn curve_height(&self) -> f32 {
        self.size * 0.06
    }

    /// Half oscillations of the hem per body height
    fn curve_length(&self) -> f32 {
        1.0 / 0.05
    }
}

/// Floating ghost with a rippling hem
pub struct GhostLoader {
    config: GhostLoaderConfig,
    core: ComponentCore,
    timer: TimerSlot,
    time: AnimatedParam,
    bob: AnimatedParam,
}

impl GhostLoader {
    pub fn new(config: GhostLoaderConfig) -> Result<Self, ConfigError> {
        checked("ghost_loader", config.validate())?;
        let core = ComponentCore::new("ghost_loader");
        let time = AnimatedParam::new("time", 0.0).with_redraw(core.redraw());
        let bob = AnimatedParam::new("bob", 0.0).with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            timer: TimerSlot::new("ghost"),
            time,
            bob,
        })
    }

    pub fn config(&self) -> &GhostLoaderConfig {
        &self.config
    }

    pub fn wave_time(&self) -> f32 {
        self.time.value()
    }

    /// Vertical float offset
    pub fn bob(&self) -> f32 {
        self.bob.value()
    }

    /// Point the face is laid out around
    fn anchor(&self) -> Point {
        let size = self.config.size;
        Point::new(size * SHADOW_SCALE / 2.0, size * 0.8)
    }

    /// Body of `width` with its frame centered `drop` below the anchor
    fn draw_body(
        &self,
        ctx: &mut dyn DrawContext,
        width: f32,
        mask_height: f32,
        drop: f32,
        color: Color,
    ) {
        let height = width * BODY_HEIGHT;
        let anchor = self.anchor();
        let frame = Rect::centered(anchor.offset(0.0, drop), Size::new(width, height));
        let mask = Path::capsule(Rect::centered(frame.center(), Size::new(width, mask_height)));
        let body = ghost_hem(
            width,
            height,
            self.wave_time(),
            self.config.curve_height(),
            self.config.curve_length(),
        );

        ctx.with_clip(&mask, |ctx| {
            ctx.with_transform(Affine2D::translation(frame.x(), frame.y()), |ctx| {
                ctx.fill(&body, color);
            });
        });
    }

    fn draw_face(&self, ctx: &mut dyn DrawContext) {
        let size = self.config.size;
        let anchor = self.anchor();
        let eye_y = -size / 3.0;

        for right in [false, true] {
            let dx = if right { size / 3.75 } else { 0.0 };
            let eye = anchor.offset(dx, eye_y);
            ctx.fill(&Path::circle(eye, size / 12.0), Color::BLACK);
            ctx.fill(&Path::circle(eye, size / 14.0), Color::WHITE);

            let pupil_dx = if right { size / 3.8 } else { size * 0.01 };
            let pupil = anchor.offset(pupil_dx, eye_y);
            ctx.fill(&Path::circle(pupil, size / 30.0), Color::BLACK);
        }

        let mouth = Rect::centered(
            anchor.offset(size / 6.0, -size / 7.5),
            Size::new(size / 7.5, size / 11.0),
        );
        ctx.fill(&Path::ellipse(mouth), Color::BLACK);
    }
}

impl Component for GhostLoader {
    fn name(&self) -> &'static str {
        "ghost_loader"
    }

    fn intrinsic_size(&self) -> Size {
        let size = self.config.size;
        Size::new(size * SHADOW_SCALE, size * 1.5)
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn on_appear(&mut self) {
        self.timer.restart(self.core.clock_mut(), STEP_INTERVAL, true);
        self.bob.set(0.0);
        self.bob.animate_to(
            self.config.size / 50.0,
            AnimationSpec::ease_in_out(2.0).repeat_forever(true),
        );
        self.core.begin_cycle();
    }

    fn tick(&mut self, dt: f32) {
        let fired = self.core.clock_mut().tick(dt);
        let steps = self.timer.count_in(&fired);
        if steps > 0 {
            let time = self.time.value() + TIME_STEP * steps as f32;
            self.time.set(time);
        }
        self.bob.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let size = self.config.size;
        let shadow = size * SHADOW_SCALE;

        ctx.with_transform(Affine2D::translation(0.0, self.bob()), |ctx| {
            self.draw_body(
                ctx,
                shadow,
                shadow * BODY_HEIGHT * 1.044 / SHADOW_SCALE,
                size / 2.0 * SHADOW_SCALE,
                Color::BLACK,
            );
            self.draw_body(ctx, size, size * BODY_HEIGHT, size / 2.0, self.config.color);
            self.draw_face(ctx);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soothing_core::RecordingContext;

    fn ghost() -> GhostLoader {
        GhostLoader::new(GhostLoaderConfig::default().size(100.0)).unwrap()
    }

    #[test]
    fn test_hem_time_advances_on_timer() {
        let mut spinner = ghost();
        spinner.on_appear();
        for _ in 0..100 {
            spinner.tick(0.01);
        }
        // Fifty steps in one second
        assert!((spinner.wave_time() - 0.075).abs() < 1e-4);
    }

    #[test]
    fn test_bobs_up_and_back() {
        let mut spinner = ghost();
        spinner.on_appear();
        for _ in 0..200 {
            spinner.tick(0.01);
        }
        assert!((spinner.bob() - 2.0).abs() < 1e-2);
        for _ in 0..200 {
            spinner.tick(0.01);
        }
        assert!(spinner.bob().abs() < 1e-2);
    }

    #[test]
    fn test_body_is_clipped_to_capsules() {
        let spinner = ghost();
        let mut ctx = RecordingContext::new(spinner.intrinsic_size());
        spinner.render(&mut ctx);

        let clips = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c, soothing_core::DrawCommand::PushClip(_)))
            .count();
        assert_eq!(clips, 2);
        // Shadow, body, two eyes of three circles, mouth
        assert_eq!(ctx.paint_count(), 9);
    }
}
