//! Eternal loader
//!
//! A segment chasing itself around an infinity sign. The segment's head
//! advances in fixed steps while its tail lengthens, until the whole
//! outline has been traced and the segment starts over.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, TimerSlot};
use soothing_core::{
    ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Point, Size, Stroke,
};
use soothing_shapes::{infinity, InfinityTrim, TrimRange};

use crate::component::{checked, Component, ComponentCore};

/// Outline scale relative to the configured size
const SIZE_SCALE: f32 = 1.25;

/// Eternal loader configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EternalLoaderConfig {
    pub size: f32,
    pub stroke_width: f32,
    pub color: Color,
    /// Seconds for ten steps of the segment
    pub duration: f32,
}

impl Default for EternalLoaderConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            stroke_width: 20.0,
            color: Color::PINK,
            duration: 2.0,
        }
    }
}

impl EternalLoaderConfig {
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("size", self.size)?;
        ensure_positive("stroke_width", self.stroke_width)?;
        ensure_positive("duration", self.duration)?;
        Ok(())
    }

    fn outline_size(&self) -> f32 {
        self.size * SIZE_SCALE
    }

    fn interval(&self) -> f32 {
        self.duration / 10.0
    }
}

/// Segment travelling an infinity sign
pub struct EternalLoader {
    config: EternalLoaderConfig,
    core: ComponentCore,
    timer: TimerSlot,
    trim: InfinityTrim,
    start: AnimatedParam,
    end: AnimatedParam,
    laps: u64,
}

impl EternalLoader {
    pub fn new(config: EternalLoaderConfig) -> Result<Self, ConfigError> {
        checked("eternal_loader", config.validate())?;
        let core = ComponentCore::new("eternal_loader");
        let start = AnimatedParam::new("trim_start", 0.0).with_redraw(core.redraw());
        let end = AnimatedParam::new("trim_end", 0.0).with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            timer: TimerSlot::new("eternal"),
            trim: InfinityTrim::new(),
            start,
            end,
            laps: 0,
        })
    }

    pub fn config(&self) -> &EternalLoaderConfig {
        &self.config
    }

    /// Logical window, without easing
    pub fn trim(&self) -> &InfinityTrim {
        &self.trim
    }

    /// Window currently drawn
    pub fn visible_range(&self) -> TrimRange {
        TrimRange::new(self.start.value(), self.end.value())
    }

    /// Completed passes over the outline
    pub fn laps(&self) -> u64 {
        self.laps
    }

    fn advance(&mut self) {
        if self.trim.step() {
            // A reset snaps back instead of sweeping the segment backwards
            self.start.set(0.0);
            self.end.set(0.0);
            self.laps += 1;
            self.core.cycle();
            return;
        }
        let spec = AnimationSpec::linear(self.config.interval());
        self.start.animate_to(self.trim.start(), spec);
        self.end.animate_to(self.trim.end(), spec);
    }

    fn center(&self) -> Point {
        self.intrinsic_size().to_rect().center()
    }
}

impl Component for EternalLoader {
    fn name(&self) -> &'static str {
        "eternal_loader"
    }

    fn intrinsic_size(&self) -> Size {
        // Lobes reach 0.4375 of the outline size sideways, 0.18 up and down
        let outline = self.config.outline_size();
        let stroke = self.config.stroke_width;
        Size::new(outline * 0.875 + stroke, outline * 0.36 + stroke)
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn on_appear(&mut self) {
        let interval = self.config.interval();
        self.timer.restart(self.core.clock_mut(), interval, true);
        self.core.begin_cycle();
    }

    fn tick(&mut self, dt: f32) {
        let fired = self.core.clock_mut().tick(dt);
        for _ in 0..self.timer.count_in(&fired) {
            self.advance();
        }
        self.start.step(dt);
        self.end.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let color = self.config.color;
        let width = self.config.stroke_width;
        let outline = infinity(self.center(), self.config.outline_size());

        ctx.stroke(&outline, &Stroke::rounded(width), color.opacity(0.5));

        let range = self.visible_range();
        if !range.is_empty() {
            let segment = outline.trim(range.start, range.end);
            ctx.stroke(&segment, &Stroke::rounded(width - 0.5), color);
        }
    }
}
