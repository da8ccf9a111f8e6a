//! Sandglass loader
//!
//! Sand pours from the upper bulb into the lower one, the glass flips
//! over, and everything resets for the next pour.
//!
//! One lap lasts `1.8 × duration` and runs through four stages, each
//! started by the same one-shot timer slot:
//!
//! | Stage   | Starts at  | What moves                                     |
//! |---------|------------|------------------------------------------------|
//! | `Pour`  | 0          | top sand drains, bottom fills, stream drops in |
//! | `Drain` | 0.95 d     | stream falls out of the waist                  |
//! | `Flip`  | 1.3 d      | glass turns 180 degrees                        |
//! | `Reset` | 1.6 d      | everything snaps back                          |

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, TimerSlot};
use soothing_core::{
    ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Path, Point, Rect, Size,
    Stroke,
};
use soothing_shapes::sandglass;
use tracing::trace;

use crate::component::{checked, rotation, Component, ComponentCore};

/// Gap between each bulb's sand and the waist, relative to the size
const WAIST_GAP: f32 = 0.03;

/// Width of the falling stream, relative to the size
const STREAM_WIDTH: f32 = 0.07;

const FRAME_STROKE: f32 = 5.0;

/// Sandglass loader configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SandglassLoaderConfig {
    /// Height of the glass; it is 0.8 times as wide
    pub size: f32,
    pub frame_color: Color,
    pub sand_color: Color,
    /// Seconds for the sand to pour through
    pub duration: f32,
}

impl Default for SandglassLoaderConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            frame_color: Color::rgb(0.6, 0.4, 0.2),
            sand_color: Color::rgb(1.0, 0.8, 0.0),
            duration: 2.0,
        }
    }
}

impl SandglassLoaderConfig {
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn frame_color(mut self, color: Color) -> Self {
        self.frame_color = color;
        self
    }

    pub fn sand_color(mut self, color: Color) -> Self {
        self.sand_color = color;
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

    fn stream_start(&self) -> f32 {
        -self.size / 4.0 - self.size * WAIST_GAP
    }
}

/// Stage of the pour-and-flip lap
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SandStage {
    #[default]
    Pour,
    Drain,
    Flip,
    Reset,
}

/// Pouring and flipping sandglass
pub struct SandglassLoader {
    config: SandglassLoaderConfig,
    core: ComponentCore,
    stage: SandStage,
    timer: TimerSlot,
    /// Downward shift of the top sand; `size/2` is empty
    top: AnimatedParam,
    /// Vertical position of the stream relative to the center
    stream: AnimatedParam,
    /// Downward shift of the bottom sand; 0 is full
    bottom: AnimatedParam,
    rotation: AnimatedParam,
    laps: u64,
}

impl SandglassLoader {
    pub fn new(config: SandglassLoaderConfig) -> Result<Self, ConfigError> {
        checked("sandglass_loader", config.validate())?;
        let core = ComponentCore::new("sandglass_loader");
        let param = |name, value| AnimatedParam::new(name, value).with_redraw(core.redraw());
        let top = param("top_sand", 0.0);
        let stream = param("stream", config.stream_start());
        let bottom = param("bottom_sand", config.size / 2.0);
        let rotation = param("rotation", 0.0);
        Ok(Self {
            config,
            core,
            stage: SandStage::Pour,
            timer: TimerSlot::new("sandglass"),
            top,
            stream,
            bottom,
            rotation,
            laps: 0,
        })
    }

    pub fn config(&self) -> &SandglassLoaderConfig {
        &self.config
    }

    pub fn stage(&self) -> SandStage {
        self.stage
    }

    pub fn rotation(&self) -> f32 {
        self.rotation.value()
    }

    /// Share of the top bulb still holding sand
    pub fn top_fill(&self) -> f32 {
        1.0 - (self.top.value() / (self.config.size / 2.0)).clamp(0.0, 1.0)
    }

    /// Share of the bottom bulb holding sand
    pub fn bottom_fill(&self) -> f32 {
        1.0 - (self.bottom.value() / (self.config.size / 2.0)).clamp(0.0, 1.0)
    }

    pub fn laps(&self) -> u64 {
        self.laps
    }

    fn enter(&mut self, stage: SandStage) {
        let d = self.config.duration;
        let size = self.config.size;
        self.stage = stage;
        trace!(?stage, "sandglass stage");

        let next_in = match stage {
            SandStage::Pour => {
                self.stream.animate_to(
                    size / 4.0 - size * WAIST_GAP,
                    AnimationSpec::linear(d * 0.15),
                );
                self.top.animate_to(size / 2.0, AnimationSpec::linear(d));
                self.bottom
                    .animate_to(0.0, AnimationSpec::linear(d).delay(d * 0.15));
                d * 0.95
            }
            SandStage::Drain => {
                let target = self.stream.target() + size / 4.0;
                self.stream
                    .animate_to(target, AnimationSpec::linear(d * 0.25));
                d * 0.35
            }
            SandStage::Flip => {
                self.rotation
                    .animate_to(180.0, AnimationSpec::ease_in_out(d * 0.3));
                d * 0.3
            }
            SandStage::Reset => {
                self.rotation.set(0.0);
                self.top.set(0.0);
                self.bottom.set(size / 2.0);
                self.stream.set(self.config.stream_start());
                d * 0.2
            }
        };
        self.timer.restart(self.core.clock_mut(), next_in, false);
    }

    fn on_timer(&mut self) {
        let next = match self.stage {
            SandStage::Pour => SandStage::Drain,
            SandStage::Drain => SandStage::Flip,
            SandStage::Flip => SandStage::Reset,
            SandStage::Reset => {
                self.laps += 1;
                self.core.cycle();
                SandStage::Pour
            }
        };
        self.enter(next);
    }

    fn draw_sand(&self, ctx: &mut dyn DrawContext, center: Point) {
        let size = self.config.size;
        let color = self.config.sand_color;
        let bulb = Size::new(size, size / 2.0);
        let gap = size * WAIST_GAP;

        let top_mask = Rect::centered(center.offset(0.0, -size / 4.0 - gap), bulb);
        let top_sand = top_mask.offset(0.0, self.top.value());
        if let Some(rect) = intersect(top_sand, top_mask) {
            ctx.fill(&Path::rect(rect), color);
        }

        let stream = Rect::centered(
            center.offset(0.0, self.stream.value()),
            Size::new(size * STREAM_WIDTH, size / 2.0),
        );
        ctx.fill(&Path::rect(stream), color);

        let bottom_mask = Rect::centered(center.offset(0.0, size / 4.0 + gap), bulb);
        let bottom_sand = bottom_mask.offset(0.0, self.bottom.value());
        if let Some(rect) = intersect(bottom_sand, bottom_mask) {
            ctx.fill(&Path::rect(rect), color);
        }
    }
}

/// Overlap of two rectangles, if they overlap with a positive area
fn intersect(a: Rect, b: Rect) -> Option<Rect> {
    let x0 = a.min_x().max(b.min_x());
    let y0 = a.min_y().max(b.min_y());
    let x1 = a.max_x().min(b.max_x());
    let y1 = a.max_y().min(b.max_y());
    (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
}

impl Component for SandglassLoader {
    fn name(&self) -> &'static str {
        "sandglass_loader"
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
        self.core.begin_cycle();
        self.enter(SandStage::Pour);
    }

    fn tick(&mut self, dt: f32) {
        let fired = self.core.clock_mut().tick(dt);
        if self.timer.fired_in(&fired) {
            self.on_timer();
        }
        for param in [
            &mut self.top,
            &mut self.stream,
            &mut self.bottom,
            &mut self.rotation,
        ] {
            param.step(dt);
        }
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let size = self.config.size;
        let center = self.intrinsic_size().to_rect().center();
        let glass = sandglass(Rect::centered(center, Size::new(size * 0.8, size)));

        ctx.with_transform(rotation(self.rotation(), center), |ctx| {
            ctx.with_clip(&glass, |ctx| self.draw_sand(ctx, center));
            ctx.stroke(&glass, &Stroke::rounded(FRAME_STROKE), self.config.frame_color);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lifecycle;
    use soothing_core::RecordingContext;

    fn loader() -> SandglassLoader {
        SandglassLoader::new(SandglassLoaderConfig::default().duration(1.0)).unwrap()
    }

    fn run(loader: &mut SandglassLoader, seconds: f32) {
        for _ in 0..(seconds / 0.01).round() as usize {
            loader.tick(0.01);
        }
    }

    #[test]
    fn test_sand_pours_down() {
        let mut spinner = loader();
        spinner.on_appear();
        assert_eq!(spinner.top_fill(), 1.0);
        assert_eq!(spinner.bottom_fill(), 0.0);

        run(&mut spinner, 0.5);
        assert!((spinner.top_fill() - 0.5).abs() < 0.02);
        assert!(spinner.bottom_fill() > 0.3 && spinner.bottom_fill() < 0.4);

        run(&mut spinner, 0.7);
        assert_eq!(spinner.top_fill(), 0.0);
        assert_eq!(spinner.bottom_fill(), 1.0);
    }

    #[test]
    fn test_stages_follow_schedule() {
        let mut spinner = loader();
        spinner.on_appear();
        run(&mut spinner, 0.9);
        assert_eq!(spinner.stage(), SandStage::Pour);
        run(&mut spinner, 0.1);
        assert_eq!(spinner.stage(), SandStage::Drain);
        run(&mut spinner, 0.35);
        assert_eq!(spinner.stage(), SandStage::Flip);
        run(&mut spinner, 0.1);
        assert!(spinner.rotation() > 0.0 && spinner.rotation() < 180.0);
        run(&mut spinner, 0.2);
        assert_eq!(spinner.stage(), SandStage::Reset);
        assert_eq!(spinner.rotation(), 0.0);
        assert_eq!(spinner.top_fill(), 1.0);

        run(&mut spinner, 0.2);
        assert_eq!(spinner.stage(), SandStage::Pour);
        assert_eq!(spinner.laps(), 1);
        assert_eq!(spinner.lifecycle(), Lifecycle::Running);
    }

    #[test]
    fn test_single_timer_throughout() {
        let mut spinner = loader();
        spinner.on_appear();
        for _ in 0..500 {
            spinner.tick(0.01);
            assert_eq!(spinner.core().clock().active_timers(), 1);
        }
    }

    #[test]
    fn test_sand_is_clipped_to_glass() {
        let mut spinner = loader();
        spinner.on_appear();
        let mut ctx = RecordingContext::new(spinner.intrinsic_size());
        spinner.render(&mut ctx);
        // Top sand, stream and frame; the bottom bulb is empty
        assert_eq!(ctx.paint_count(), 3);
        assert!(ctx
            .commands()
            .iter()
            .any(|c| matches!(c, soothing_core::DrawCommand::PushClip(_))));
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(intersect(a, a.offset(5.0, 5.0)), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(intersect(a, a.offset(0.0, 10.0)), None);
    }
}
