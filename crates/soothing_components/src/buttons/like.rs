//! Like button
//!
//! A heart with a like counter. Liking pops the heart with a spring and
//! settles it back to its natural size; unliking shrinks it.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, SpringConfig, TimerSlot};
use soothing_core::{
    ensure_positive, Affine2D, Color, ConfigError, DrawContext, DrawContextExt, FontWeight, Point,
    Rect, Size, TextStyle,
};
use tracing::debug;

use crate::component::{checked, ActionId, Component, ComponentCore};

const RESTING_SCALE: f32 = 0.7;
const POP_SCALE: f32 = 1.1;
const LIKED_SCALE: f32 = 1.0;

/// Delay between the pop and settling to the liked size
const SETTLE_DELAY: f32 = 0.3;

/// Like button configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LikeButtonConfig {
    /// Count shown while not liked
    pub initial_likes: u32,
    /// Side of the heart
    pub size: f32,
    pub active_color: Color,
    pub inactive_color: Color,
}

impl Default for LikeButtonConfig {
    fn default() -> Self {
        Self {
            initial_likes: 0,
            size: 50.0,
            active_color: Color::PINK,
            inactive_color: Color::GRAY,
        }
    }
}

impl LikeButtonConfig {
    pub fn initial_likes(mut self, likes: u32) -> Self {
        self.initial_likes = likes;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn active_color(mut self, color: Color) -> Self {
        self.active_color = color;
        self
    }

    pub fn inactive_color(mut self, color: Color) -> Self {
        self.inactive_color = color;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("size", self.size)?;
        Ok(())
    }

    fn spacing(&self) -> f32 {
        self.size * 0.2
    }
}

/// Heart toggle with a like counter
pub struct LikeButton {
    config: LikeButtonConfig,
    core: ComponentCore,
    liked: bool,
    likes: u32,
    scale: AnimatedParam,
    settle: TimerSlot,
    action: Option<ActionId>,
}

impl LikeButton {
    pub fn new(config: LikeButtonConfig) -> Result<Self, ConfigError> {
        checked("like_button", config.validate())?;
        let core = ComponentCore::new("like_button");
        let scale = AnimatedParam::new("scale", RESTING_SCALE).with_redraw(core.redraw());
        Ok(Self {
            likes: config.initial_likes,
            config,
            core,
            liked: false,
            scale,
            settle: TimerSlot::new("like_settle"),
            action: None,
        })
    }

    /// Run `action` on every toggle
    pub fn with_action(mut self, action: impl FnMut() + 'static) -> Self {
        self.action = Some(self.core.add_action(Box::new(action)));
        self
    }

    pub fn config(&self) -> &LikeButtonConfig {
        &self.config
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    pub fn likes(&self) -> u32 {
        self.likes
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    fn heart_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.config.size, self.config.size)
    }

    fn pop_spring() -> AnimationSpec {
        AnimationSpec::spring(SpringConfig::response(0.3, 0.6))
    }

    /// Flip the liked state
    pub fn toggle(&mut self) {
        self.liked = !self.liked;
        if self.liked {
            self.scale.animate_to(POP_SCALE, Self::pop_spring());
            self.likes = self.config.initial_likes.saturating_add(1);
        } else {
            self.scale
                .animate_to(RESTING_SCALE, AnimationSpec::ease_in_out(0.2));
            self.likes = self.config.initial_likes;
        }
        self.settle
            .restart(self.core.clock_mut(), SETTLE_DELAY, false);
        self.core.begin_cycle();

        if let Some(action) = self.action {
            self.core.queue(action);
        }
        debug!(liked = self.liked, likes = self.likes, "like toggled");
    }

    fn on_settle(&mut self) {
        if self.liked {
            self.scale.animate_to(LIKED_SCALE, Self::pop_spring());
        }
        self.core.complete();
        self.core.settle();
    }
}

impl Component for LikeButton {
    fn name(&self) -> &'static str {
        "like_button"
    }

    fn intrinsic_size(&self) -> Size {
        let size = self.config.size;
        // Heart, spacing, and room for the counter
        Size::new(size + self.config.spacing() + size, size)
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn tap(&mut self, point: Point) -> bool {
        if !self.heart_rect().contains(point) {
            return false;
        }
        self.toggle();
        true
    }

    fn tick(&mut self, dt: f32) {
        let fired = self.core.clock_mut().tick(dt);
        if self.settle.fired_in(&fired) {
            self.on_settle();
        }
        self.scale.step(dt);
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let size = self.config.size;
        let heart = self.heart_rect();
        let color = if self.liked {
            self.config.active_color
        } else {
            self.config.inactive_color
        };

        ctx.with_transform(Affine2D::scale_around(self.scale(), heart.center()), |ctx| {
            ctx.draw_glyph("heart.fill", heart, color);
        });

        let counter = Point::new(size + self.config.spacing() + size / 2.0, size / 2.0);
        let style = TextStyle::new(size / 2.0)
            .with_weight(FontWeight::Light)
            .with_color(self.config.inactive_color);
        ctx.draw_text(&self.likes.to_string(), counter, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lifecycle;
    use soothing_core::{DrawCommand, RecordingContext};
    use std::cell::Cell;
    use std::rc::Rc;

    fn button(likes: u32) -> LikeButton {
        LikeButton::new(LikeButtonConfig::default().initial_likes(likes)).unwrap()
    }

    fn run(button: &mut LikeButton, seconds: f32) {
        for _ in 0..(seconds / 0.01).round() as usize {
            button.tick(0.01);
        }
    }

    #[test]
    fn test_count_follows_toggle() {
        let mut like = button(3);
        like.tap(Point::new(25.0, 25.0));
        assert!(like.is_liked());
        assert_eq!(like.likes(), 4);

        like.tap(Point::new(25.0, 25.0));
        assert!(!like.is_liked());
        assert_eq!(like.likes(), 3);
    }

    #[test]
    fn test_pop_then_settle() {
        let mut like = button(0);
        assert_eq!(like.scale(), RESTING_SCALE);
        like.toggle();

        let mut peak: f32 = 0.0;
        for _ in 0..30 {
            like.tick(0.01);
            peak = peak.max(like.scale());
        }
        assert!(peak > 1.0);

        run(&mut like, 2.0);
        assert!((like.scale() - LIKED_SCALE).abs() < 1e-2);
        assert_eq!(like.lifecycle(), Lifecycle::Idle);
    }

    #[test]
    fn test_unlike_shrinks() {
        let mut like = button(0);
        like.toggle();
        run(&mut like, 1.0);
        like.toggle();
        run(&mut like, 0.5);
        assert!((like.scale() - RESTING_SCALE).abs() < 1e-3);
    }

    #[test]
    fn test_action_runs_per_toggle() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut like = button(0).with_action(move || counter.set(counter.get() + 1));
        like.toggle();
        like.toggle();
        like.tick(0.01);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_tap_on_counter_is_ignored() {
        let mut like = button(0);
        assert!(!like.tap(Point::new(80.0, 25.0)));
        assert!(!like.is_liked());
    }

    #[test]
    fn test_render_uses_state_color() {
        let mut like = button(7);
        like.toggle();
        let mut ctx = RecordingContext::new(like.intrinsic_size());
        like.render(&mut ctx);

        let glyph = ctx.commands().iter().find_map(|c| match c {
            DrawCommand::DrawGlyph { color, .. } => Some(*color),
            _ => None,
        });
        assert_eq!(glyph, Some(Color::PINK));
        assert_eq!(ctx.texts(), vec!["8"]);
    }
}
