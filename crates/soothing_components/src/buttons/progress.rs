//! Progress button
//!
//! A ring that fills in a hundred discrete steps after a tap. The label
//! counts up in percent and turns into a checkmark when the ring closes,
//! at which point the action fires once.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, ParamDomain, TimerSlot};
use soothing_core::{
    ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Point, Rect, Size, Stroke,
    TextStyle,
};
use soothing_shapes::{ring, ring_arc, TrimRange};
use tracing::debug;

use crate::component::{checked, ActionId, Component, ComponentCore};

/// Number of timer steps in one fill
const STEPS: u32 = 100;

/// Progress button configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProgressButtonConfig {
    /// Seconds from tap to full ring
    pub duration: f32,
    /// Diameter of the ring
    pub size: f32,
    /// Ring and label color
    pub color: Color,
}

impl Default for ProgressButtonConfig {
    fn default() -> Self {
        Self {
            duration: 3.0,
            size: 250.0,
            color: Color::PINK,
        }
    }
}

impl ProgressButtonConfig {
    pub fn new(duration: f32, size: f32, color: Color) -> Self {
        Self {
            duration,
            size,
            color,
        }
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
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
        ensure_positive("duration", self.duration)?;
        ensure_positive("size", self.size)?;
        Ok(())
    }
}

/// Ring that fills after a tap
pub struct ProgressButton {
    config: ProgressButtonConfig,
    core: ComponentCore,
    timer: TimerSlot,
    steps: u32,
    progress: AnimatedParam,
    action: Option<ActionId>,
}

impl ProgressButton {
    pub fn new(config: ProgressButtonConfig) -> Result<Self, ConfigError> {
        checked("progress_button", config.validate())?;
        let core = ComponentCore::new("progress_button");
        let progress = AnimatedParam::new("progress", 0.0)
            .with_domain(ParamDomain::UNIT)
            .with_redraw(core.redraw());
        Ok(Self {
            config,
            core,
            timer: TimerSlot::new("progress"),
            steps: 0,
            progress,
            action: None,
        })
    }

    /// Run `action` when the ring closes
    pub fn with_action(mut self, action: impl FnMut() + 'static) -> Self {
        self.action = Some(self.core.add_action(Box::new(action)));
        self
    }

    pub fn config(&self) -> &ProgressButtonConfig {
        &self.config
    }

    /// Seconds between two steps
    pub fn interval(&self) -> f32 {
        self.config.duration / STEPS as f32
    }

    /// Logical progress in 0.0..=1.0, one hundredth per step
    pub fn progress(&self) -> f32 {
        self.steps as f32 / STEPS as f32
    }

    /// Trim currently drawn, eased between steps
    pub fn displayed_progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn is_complete(&self) -> bool {
        self.steps >= STEPS
    }

    /// Text shown in the middle, `None` once the checkmark is showing
    pub fn label(&self) -> Option<String> {
        if self.is_complete() {
            None
        } else {
            Some(format!("{}%", self.steps))
        }
    }

    /// Reset to zero and start filling; cancels a fill in progress
    pub fn start(&mut self) {
        let interval = self.interval();
        self.timer.restart(self.core.clock_mut(), interval, true);
        self.steps = 0;
        self.progress.set(0.0);
        self.core.begin_cycle();
        debug!(interval, "progress fill started");
    }

    fn advance(&mut self) {
        if self.is_complete() {
            return;
        }
        self.steps += 1;
        self.progress
            .animate_to(self.progress(), AnimationSpec::linear(self.interval()));

        if self.is_complete() {
            self.timer.cancel(self.core.clock_mut());
            if self.core.complete() {
                if let Some(action) = self.action {
                    self.core.queue(action);
                }
            }
        }
        self.core.request_redraw();
    }
}

impl Component for ProgressButton {
    fn name(&self) -> &'static str {
        "progress_button"
    }

    fn intrinsic_size(&self) -> Size {
        let stroke = self.config.size / 10.0;
        Size::square(self.config.size + stroke)
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
        self.progress.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let size = self.config.size;
        let color = self.config.color;
        let center = self.intrinsic_size().to_rect().center();
        let stroke = Stroke::rounded(size / 10.0);

        ctx.stroke(&ring(center, size / 2.0), &Stroke::new(size / 10.0), color.opacity(0.3));
        ctx.stroke(
            &ring_arc(center, size / 2.0, TrimRange::to(self.displayed_progress()), 270.0),
            &stroke,
            color,
        );

        match self.label() {
            Some(label) => {
                ctx.draw_text(&label, center, &TextStyle::new(size / 5.0).with_color(color));
            }
            None => {
                let side = size / 4.0;
                ctx.draw_glyph("checkmark", Rect::centered(center, Size::square(side)), color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lifecycle;
    use soothing_core::{DrawCommand, RecordingContext};
    use std::cell::Cell;
    use std::rc::Rc;

    fn counted(config: ProgressButtonConfig) -> (ProgressButton, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let button = ProgressButton::new(config)
            .unwrap()
            .with_action(move || counter.set(counter.get() + 1));
        (button, hits)
    }

    fn center_of(button: &ProgressButton) -> Point {
        button.intrinsic_size().to_rect().center()
    }

    #[test]
    fn test_hundred_ticks_complete_once() {
        let (mut button, hits) = counted(ProgressButtonConfig::new(1.0, 100.0, Color::PINK));
        assert!((button.interval() - 0.01).abs() < 1e-6);
        button.tap(center_of(&button));
        assert_eq!(button.lifecycle(), Lifecycle::Running);

        for _ in 0..100 {
            button.tick(0.01);
        }

        assert!((button.progress() - 1.0).abs() <= 0.01);
        assert!(button.is_complete());
        assert_eq!(button.lifecycle(), Lifecycle::Completing);
        assert_eq!(button.label(), None);
        assert_eq!(hits.get(), 1);

        // Nothing else fires afterwards
        for _ in 0..50 {
            button.tick(0.01);
        }
        assert_eq!(hits.get(), 1);
        assert_eq!(button.core().clock().active_timers(), 0);
    }

    #[test]
    fn test_duration_of_frame_ticks_completes() {
        let (mut button, hits) = counted(ProgressButtonConfig::new(2.0, 250.0, Color::BLUE));
        button.tap(center_of(&button));

        // 2 seconds at 60 fps
        for _ in 0..121 {
            button.tick(1.0 / 60.0);
        }
        assert!((button.progress() - 1.0).abs() <= 0.01);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_label_counts_percent() {
        let (mut button, _) = counted(ProgressButtonConfig::new(1.0, 100.0, Color::PINK));
        assert_eq!(button.label().as_deref(), Some("0%"));
        button.start();
        for _ in 0..29 {
            button.tick(0.01);
        }
        assert_eq!(button.label().as_deref(), Some("29%"));
    }

    #[test]
    fn test_restart_keeps_single_timer() {
        let (mut button, hits) = counted(ProgressButtonConfig::new(1.0, 100.0, Color::PINK));
        button.start();
        for _ in 0..40 {
            button.tick(0.01);
        }
        button.start();
        button.start();

        assert_eq!(button.core().clock().active_timers(), 1);
        for _ in 0..10 {
            button.tick(0.01);
        }
        assert_eq!(button.label().as_deref(), Some("10%"));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_restart_after_completion() {
        let (mut button, hits) = counted(ProgressButtonConfig::new(0.5, 100.0, Color::PINK));
        button.start();
        for _ in 0..60 {
            button.tick(0.01);
        }
        assert_eq!(hits.get(), 1);

        button.start();
        assert_eq!(button.lifecycle(), Lifecycle::Running);
        assert_eq!(button.progress(), 0.0);
        for _ in 0..60 {
            button.tick(0.01);
        }
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_tap_outside_is_ignored() {
        let (mut button, _) = counted(ProgressButtonConfig::default());
        assert!(!button.tap(Point::new(-5.0, 10.0)));
        assert_eq!(button.lifecycle(), Lifecycle::Idle);
    }

    #[test]
    fn test_render_shows_checkmark_when_done() {
        let (mut button, _) = counted(ProgressButtonConfig::new(0.1, 100.0, Color::PINK));
        button.start();
        button.tick(0.2);

        let mut ctx = RecordingContext::new(button.intrinsic_size());
        button.render(&mut ctx);
        assert!(ctx
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::DrawGlyph { name, .. } if name == "checkmark")));
        assert!(ctx.texts().is_empty());
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(ProgressButton::new(ProgressButtonConfig::new(0.0, 100.0, Color::PINK)).is_err());
        assert!(ProgressButton::new(ProgressButtonConfig::new(1.0, -1.0, Color::PINK)).is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let config: ProgressButtonConfig =
            toml::from_str("duration = 1.5\ncolor = \"#007aff\"").unwrap();
        assert_eq!(config.duration, 1.5);
        assert_eq!(config.size, 250.0);
    }
}
