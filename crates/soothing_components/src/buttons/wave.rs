//! Wave button
//!
//! A circle filled with liquid up to a percentage. Each tap raises the
//! level by ten percent, wrapping to empty after full, and sets the
//! surface rolling.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain};
use soothing_core::{
    ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Path, Point, Size, Stroke,
    TextStyle,
};
use soothing_shapes::circular_fill;
use tracing::debug;

use crate::component::{checked, ActionId, Component, ComponentCore};

/// Fill level before the first tap
const INITIAL_PERCENT: u32 = 50;

/// Level added per tap
const PERCENT_STEP: u32 = 10;

/// Seconds for the surface to roll one full period
const ROLL_DURATION: f32 = 2.0;

/// Wave button configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveButtonConfig {
    /// Diameter of the button
    pub size: f32,
    /// Liquid and border color
    pub wave_color: Color,
}

impl Default for WaveButtonConfig {
    fn default() -> Self {
        Self {
            size: 100.0,
            wave_color: Color::BLUE,
        }
    }
}

impl WaveButtonConfig {
    pub fn new(size: f32, wave_color: Color) -> Self {
        Self { size, wave_color }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn wave_color(mut self, color: Color) -> Self {
        self.wave_color = color;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("size", self.size)?;
        Ok(())
    }
}

/// Circular button with a rolling liquid fill
pub struct WaveButton {
    config: WaveButtonConfig,
    core: ComponentCore,
    percent: u32,
    offset: AnimatedParam,
    action: Option<ActionId>,
}

impl WaveButton {
    pub fn new(config: WaveButtonConfig) -> Result<Self, ConfigError> {
        checked("wave_button", config.validate())?;
        let core = ComponentCore::new("wave_button");
        let offset = AnimatedParam::new("wave_offset", 0.0)
            .with_domain(ParamDomain::DEGREES)
            .with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            percent: INITIAL_PERCENT,
            offset,
            action: None,
        })
    }

    /// Run `action` on every tap
    pub fn with_action(mut self, action: impl FnMut() + 'static) -> Self {
        self.action = Some(self.core.add_action(Box::new(action)));
        self
    }

    pub fn config(&self) -> &WaveButtonConfig {
        &self.config
    }

    /// Fill level in percent, 0..=100
    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// Phase of the surface in degrees
    pub fn wave_offset(&self) -> f32 {
        self.offset.value()
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }

    fn press(&mut self) {
        if let Some(action) = self.action {
            self.core.queue(action);
        }

        // The roll starts on the first press and never stops
        if !self.offset.is_animating() {
            self.offset.animate_to(
                360.0,
                AnimationSpec::linear(ROLL_DURATION).repeat_forever(false),
            );
            self.core.transition(crate::Lifecycle::Running);
        }

        self.percent = if self.percent >= 100 {
            0
        } else {
            self.percent + PERCENT_STEP
        };
        debug!(percent = self.percent, "wave level changed");
        self.core.request_redraw();
    }
}

impl Component for WaveButton {
    fn name(&self) -> &'static str {
        "wave_button"
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

    fn tap(&mut self, point: Point) -> bool {
        if !self.intrinsic_size().to_rect().contains(point) {
            return false;
        }
        self.press();
        true
    }

    fn tick(&mut self, dt: f32) {
        self.core.clock_mut().tick(dt);
        self.offset.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let size = self.config.size;
        let color = self.config.wave_color;
        let center = Point::new(size / 2.0, size / 2.0);
        let circle = Path::circle(center, size / 2.0);

        let fill = circular_fill(size, self.percent as f32 / 100.0, self.wave_offset());
        ctx.with_clip(&circle, |ctx| ctx.fill(&fill, color.opacity(0.5)));

        // Stroke border: the line sits inside the frame
        ctx.stroke(&Path::circle(center, size / 2.0 - 1.0), &Stroke::new(2.0), color);

        ctx.draw_text(
            &self.label(),
            center,
            &TextStyle::new(size * 0.4).with_color(Color::WHITE),
        );
    }
}
