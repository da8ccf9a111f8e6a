//! Fluid loading button
//!
//! A capsule that fills with two layers of rolling liquid after a tap. The
//! liquid rises a fixed distance per timer step until its surface clears
//! the top of the capsule, then the button shows "100%".

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, TimerSlot};
use soothing_core::{
    ensure_at_least, ensure_positive, Affine2D, Color, ConfigError, DrawContext, DrawContextExt,
    FontWeight, Gradient, Path, Point, Rect, Size, TextStyle,
};
use soothing_shapes::fluid;
use tracing::debug;

use crate::component::{checked, ActionId, Component, ComponentCore};

/// Seconds between two fill steps
const STEP_INTERVAL: f32 = 0.03;

/// Wave time added per step
const TIME_STEP: f32 = 0.01;

/// Fluid loading button configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FluidLoadingButtonConfig {
    /// Height of the capsule; its width is a third of this
    pub height: f32,
    /// Points the liquid rises per step
    pub fluid_speed: f32,
    /// Amplitude of the liquid surface
    pub wave_height: f32,
    /// Front liquid gradient, top to bottom
    pub foreground: Vec<Color>,
    /// Back liquid and label color
    pub background: Color,
}

impl Default for FluidLoadingButtonConfig {
    fn default() -> Self {
        Self {
            height: 350.0,
            fluid_speed: 1.5,
            wave_height: 20.0,
            foreground: vec![Color::BLUE, Color::PINK],
            background: Color::PURPLE,
        }
    }
}

impl FluidLoadingButtonConfig {
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn fluid_speed(mut self, speed: f32) -> Self {
        self.fluid_speed = speed;
        self
    }

    pub fn wave_height(mut self, wave_height: f32) -> Self {
        self.wave_height = wave_height;
        self
    }

    pub fn foreground(mut self, colors: Vec<Color>) -> Self {
        self.foreground = colors;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("height", self.height)?;
        ensure_positive("fluid_speed", self.fluid_speed)?;
        ensure_positive("wave_height", self.wave_height)?;
        ensure_at_least("foreground", &self.foreground, 1)?;
        Ok(())
    }

    fn capsule_width(&self) -> f32 {
        self.height / 3.0
    }

    /// Liquid offset before the first step: surface just below the capsule
    fn empty_offset(&self) -> f32 {
        self.height / 2.0 + self.wave_height
    }

    /// Liquid offset once the surface has cleared the top
    fn full_offset(&self) -> f32 {
        -self.height / 2.0 - self.wave_height
    }
}

/// Capsule that fills with liquid after a tap
pub struct FluidLoadingButton {
    config: FluidLoadingButtonConfig,
    core: ComponentCore,
    timer: TimerSlot,
    time: AnimatedParam,
    offset: AnimatedParam,
    /// Logical offset; `offset` eases towards it
    level: f32,
    filled: bool,
    loading: bool,
    action: Option<ActionId>,
}

impl FluidLoadingButton {
    pub fn new(config: FluidLoadingButtonConfig) -> Result<Self, ConfigError> {
        checked("fluid_loading_button", config.validate())?;
        let core = ComponentCore::new("fluid_loading_button");
        let time = AnimatedParam::new("time", 0.0).with_redraw(core.redraw());
        let offset = AnimatedParam::new("offset", 0.0).with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            timer: TimerSlot::new("fluid"),
            time,
            offset,
            level: 0.0,
            filled: false,
            loading: false,
            action: None,
        })
    }

    /// Run `action` when the capsule is full
    pub fn with_action(mut self, action: impl FnMut() + 'static) -> Self {
        self.action = Some(self.core.add_action(Box::new(action)));
        self
    }

    pub fn config(&self) -> &FluidLoadingButtonConfig {
        &self.config
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Whether the "Loading..." caption is showing
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Vertical offset of the liquid, positive downwards
    pub fn fluid_offset(&self) -> f32 {
        self.offset.value()
    }

    pub fn wave_time(&self) -> f32 {
        self.time.value()
    }

    /// Start filling from empty; a fill in progress starts over
    pub fn start(&mut self) {
        self.filled = false;
        self.loading = true;
        self.level = self.config.empty_offset();
        self.offset.set(self.level);
        self.timer
            .restart(self.core.clock_mut(), STEP_INTERVAL, true);
        self.core.begin_cycle();
        debug!(offset = self.level, "fluid fill started");
    }

    fn advance(&mut self) {
        if self.filled {
            return;
        }
        let step = AnimationSpec::linear(STEP_INTERVAL);
        self.time.animate_to(self.time.target() + TIME_STEP, step);

        self.level -= self.config.fluid_speed;
        let full = self.config.full_offset();
        if self.level <= full {
            self.level = full;
            self.filled = true;
            self.loading = false;
            self.timer.cancel(self.core.clock_mut());
            if self.core.complete() {
                if let Some(action) = self.action {
                    self.core.queue(action);
                }
            }
            debug!("fluid fill complete");
        }
        self.offset.animate_to(self.level, step);
    }

    fn capsule(&self) -> Rect {
        Rect::new(0.0, 0.0, self.config.capsule_width(), self.config.height)
    }
}

impl Component for FluidLoadingButton {
    fn name(&self) -> &'static str {
        "fluid_loading_button"
    }

    fn intrinsic_size(&self) -> Size {
        let h = self.config.height;
        // Capsule, spacing, caption
        Size::new(self.config.capsule_width(), h + h / 30.0 + h / 15.0)
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn tap(&mut self, point: Point) -> bool {
        if !self.intrinsic_size().to_rect().contains(point) {
            return false;
        }
        self.start();
        true
    }

    fn tick(&mut self, dt: f32) {
        let fired = self.core.clock_mut().tick(dt);
        for _ in 0..self.timer.count_in(&fired) {
            self.advance();
        }
        self.time.step(dt);
        self.offset.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let h = self.config.height;
        let w = self.config.capsule_width();
        let capsule = Path::capsule(self.capsule());
        let background = self.config.background;

        ctx.fill(&capsule, Color::WHITE);

        let time = self.wave_time();
        let back = fluid(w, h, time * 1.2, self.config.wave_height);
        let front = fluid(w, h, time, self.config.wave_height);
        let front_brush = Gradient::linear(
            Point::new(w / 2.0, 0.0),
            Point::new(w / 2.0, h),
            &self.config.foreground,
        );

        ctx.with_clip(&capsule, |ctx| {
            ctx.with_transform(Affine2D::translation(0.0, self.fluid_offset()), |ctx| {
                ctx.with_opacity(0.4, |ctx| ctx.fill(&back, background));
                ctx.with_opacity(0.2, |ctx| ctx.fill(&front, front_brush));
            });
        });

        if self.filled {
            let style = TextStyle::new(h / 10.0)
                .with_weight(FontWeight::Bold)
                .with_color(background);
            ctx.draw_text("100%", Point::new(w / 2.0, h / 2.0), &style);
        }

        if self.loading {
            let style = TextStyle::new(h / 15.0)
                .with_weight(FontWeight::Bold)
                .with_color(background)
                .italic();
            let caption = Point::new(w / 2.0, h + h / 30.0 + h / 30.0);
            ctx.draw_text("Loading...", caption, &style);
        }
    }
}
