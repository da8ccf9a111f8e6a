//! Bubble button
//!
//! A translucent bubble that pops when tapped: it swells and fades out,
//! disappears, runs the action, and floats back a moment later.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain, TimerSlot};
use soothing_core::{
    ensure_positive, Affine2D, Color, ConfigError, DrawContext, DrawContextExt, Gradient, Path,
    Point, Rect, Size, Stroke,
};
use tracing::debug;

use crate::component::{checked, rotation, ActionId, Component, ComponentCore};

/// Length of the pop animation
const POP_DURATION: f32 = 0.5;

/// Time the bubble stays hidden after popping
const HIDDEN_DURATION: f32 = 0.2;

const POPPED_SCALE: f32 = 1.2;

/// Bubble button configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BubbleButtonConfig {
    /// Diameter of the bubble
    pub size: f32,
    pub color: Color,
}

impl Default for BubbleButtonConfig {
    fn default() -> Self {
        Self {
            size: 100.0,
            color: Color::BLUE,
        }
    }
}

impl BubbleButtonConfig {
    pub fn new(size: f32, color: Color) -> Self {
        Self { size, color }
    }

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
}

/// Where the bubble is in its pop cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BubblePhase {
    #[default]
    Resting,
    Popping,
    Hidden,
}

/// Bubble that pops on tap and reappears
pub struct BubbleButton {
    config: BubbleButtonConfig,
    core: ComponentCore,
    phase: BubblePhase,
    timer: TimerSlot,
    scale: AnimatedParam,
    opacity: AnimatedParam,
    action: Option<ActionId>,
}

impl BubbleButton {
    pub fn new(config: BubbleButtonConfig) -> Result<Self, ConfigError> {
        checked("bubble_button", config.validate())?;
        let core = ComponentCore::new("bubble_button");
        let scale = AnimatedParam::new("scale", 1.0).with_redraw(core.redraw());
        let opacity = AnimatedParam::new("opacity", 1.0)
            .with_domain(ParamDomain::UNIT)
            .with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            phase: BubblePhase::Resting,
            timer: TimerSlot::new("bubble"),
            scale,
            opacity,
            action: None,
        })
    }

    /// Run `action` once the bubble has popped
    pub fn with_action(mut self, action: impl FnMut() + 'static) -> Self {
        self.action = Some(self.core.add_action(Box::new(action)));
        self
    }

    pub fn config(&self) -> &BubbleButtonConfig {
        &self.config
    }

    pub fn phase(&self) -> BubblePhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase != BubblePhase::Hidden
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    fn pop(&mut self) {
        let spec = AnimationSpec::ease_out(POP_DURATION);
        self.scale.animate_to(POPPED_SCALE, spec);
        self.opacity.animate_to(0.0, spec);
        self.timer.restart(self.core.clock_mut(), POP_DURATION, false);
        self.phase = BubblePhase::Popping;
        self.core.begin_cycle();
        debug!("bubble popping");
    }

    fn on_timer(&mut self) {
        match self.phase {
            BubblePhase::Popping => {
                self.phase = BubblePhase::Hidden;
                if self.core.complete() {
                    if let Some(action) = self.action {
                        self.core.queue(action);
                    }
                }
                self.timer
                    .restart(self.core.clock_mut(), HIDDEN_DURATION, false);
                self.core.request_redraw();
            }
            BubblePhase::Hidden => {
                self.phase = BubblePhase::Resting;
                self.scale.set(1.0);
                self.opacity.set(1.0);
                self.core.settle();
                debug!("bubble restored");
            }
            BubblePhase::Resting => {}
        }
    }

    fn draw_bubble(&self, ctx: &mut dyn DrawContext) {
        let size = self.config.size;
        let color = self.config.color;
        let center = Point::new(size / 2.0, size / 2.0);
        let radius = size / 2.0;

        let body = Gradient::radial(center, radius, &[color.opacity(0.6), color.opacity(0.3)]);
        ctx.fill(&Path::circle(center, radius), body);
        ctx.stroke(&Path::circle(center, radius), &Stroke::new(4.0), color);

        // Highlights
        let glint = center.offset(-size / 3.0, -size / 5.0);
        ctx.fill(&Path::circle(glint, size / 28.0), Color::WHITE.opacity(0.5));

        let sheen = Rect::centered(
            center.offset(-size / 2.5, -size / 10.0),
            Size::new(size / 10.0, size / 5.0),
        );
        ctx.with_transform(rotation(40.0, center), |ctx| {
            ctx.fill(&Path::ellipse(sheen), Color::WHITE.opacity(0.8));
        });
    }
}

impl Component for BubbleButton {
    fn name(&self) -> &'static str {
        "bubble_button"
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
        // Taps while the bubble is already popping are swallowed
        if self.phase == BubblePhase::Resting {
            self.pop();
        }
        true
    }

    fn tick(&mut self, dt: f32) {
        let fired = self.core.clock_mut().tick(dt);
        self.scale.step(dt);
        self.opacity.step(dt);
        if self.timer.fired_in(&fired) {
            self.on_timer();
        }
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        if !self.is_visible() {
            return;
        }
        let center = self.intrinsic_size().to_rect().center();
        ctx.with_opacity(self.opacity(), |ctx| {
            ctx.with_transform(Affine2D::scale_around(self.scale(), center), |ctx| {
                self.draw_bubble(ctx)
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lifecycle;
    use soothing_core::RecordingContext;
    use std::cell::Cell;
    use std::rc::Rc;

    fn bubble() -> (BubbleButton, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let button = BubbleButton::new(BubbleButtonConfig::new(100.0, Color::BLUE))
            .unwrap()
            .with_action(move || counter.set(counter.get() + 1));
        (button, hits)
    }

    fn run(button: &mut BubbleButton, seconds: f32) {
        let frames = (seconds / 0.01).round() as usize;
        for _ in 0..frames {
            button.tick(0.01);
        }
    }

    #[test]
    fn test_pop_cycle() {
        let (mut button, hits) = bubble();
        assert!(button.tap(Point::new(50.0, 50.0)));
        assert_eq!(button.phase(), BubblePhase::Popping);

        run(&mut button, 0.25);
        assert!(button.scale() > 1.0 && button.scale() < POPPED_SCALE);
        assert!(button.opacity() < 1.0);
        assert_eq!(hits.get(), 0);

        run(&mut button, 0.25);
        assert_eq!(button.phase(), BubblePhase::Hidden);
        assert_eq!(button.lifecycle(), Lifecycle::Completing);
        assert_eq!(hits.get(), 1);

        run(&mut button, 0.2);
        assert_eq!(button.phase(), BubblePhase::Resting);
        assert_eq!(button.lifecycle(), Lifecycle::Idle);
        assert_eq!(button.scale(), 1.0);
        assert_eq!(button.opacity(), 1.0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_taps_during_pop_are_ignored() {
        let (mut button, hits) = bubble();
        button.tap(Point::new(50.0, 50.0));
        run(&mut button, 0.1);
        button.tap(Point::new(50.0, 50.0));
        run(&mut button, 0.5);
        button.tap(Point::new(50.0, 50.0));
        run(&mut button, 0.5);

        assert_eq!(hits.get(), 1);
        assert_eq!(button.core().clock().active_timers(), 0);
    }

    #[test]
    fn test_hidden_bubble_draws_nothing() {
        let (mut button, _) = bubble();
        button.tap(Point::new(50.0, 50.0));
        run(&mut button, 0.55);

        let mut ctx = RecordingContext::new(button.intrinsic_size());
        button.render(&mut ctx);
        assert_eq!(ctx.paint_count(), 0);
    }

    #[test]
    fn test_resting_bubble_draws_body_and_highlights() {
        let (button, _) = bubble();
        let mut ctx = RecordingContext::new(button.intrinsic_size());
        button.render(&mut ctx);
        assert_eq!(ctx.paint_count(), 4);
    }
}
