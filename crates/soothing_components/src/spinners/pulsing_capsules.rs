//! Pulsing capsules
//!
//! A row of capsules with a swell that sweeps back and forth across them.
//! The active capsule is four times its resting height and its neighbours
//! step down by one resting height per position.

use serde::Deserialize;
use smallvec::SmallVec;
use soothing_animation::{AnimatedParam, AnimationSpec, TimerSlot};
use soothing_core::{
    ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Path, Rect, Size,
};
use tracing::trace;

use crate::component::{checked, Component, ComponentCore};

/// Pulsing capsules configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PulsingCapsulesConfig {
    pub capsule_width: f32,
    /// Resting height; the active capsule is four times this
    pub capsule_height: f32,
    pub color: Color,
    pub count: usize,
    /// Seconds for the swell to cross the row twice
    pub duration: f32,
}

impl Default for PulsingCapsulesConfig {
    fn default() -> Self {
        Self {
            capsule_width: 10.0,
            capsule_height: 50.0,
            color: Color::PINK,
            count: 5,
            duration: 0.5,
        }
    }
}

impl PulsingCapsulesConfig {
    pub fn capsule_width(mut self, width: f32) -> Self {
        self.capsule_width = width;
        self
    }

    pub fn capsule_height(mut self, height: f32) -> Self {
        self.capsule_height = height;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("capsule_width", self.capsule_width)?;
        ensure_positive("capsule_height", self.capsule_height)?;
        ensure_positive("duration", self.duration)?;
        if self.count < 2 {
            return Err(ConfigError::TooFew {
                field: "count",
                min: 2,
                actual: self.count,
            });
        }
        Ok(())
    }

    /// Length of one swell
    fn swell(&self) -> f32 {
        self.duration / 2.0
    }

    /// Seconds between two moves of the swell
    fn interval(&self) -> f32 {
        self.swell() / (self.count - 1) as f32
    }

    fn height_at(&self, active: usize, index: usize) -> f32 {
        let factor = match active.abs_diff(index) {
            0 => 4.0,
            1 => 3.0,
            2 => 2.0,
            _ => 1.0,
        };
        self.capsule_height * factor
    }
}

/// Row of capsules with a travelling swell
pub struct PulsingCapsules {
    config: PulsingCapsulesConfig,
    core: ComponentCore,
    timer: TimerSlot,
    active: usize,
    decreasing: bool,
    heights: SmallVec<[AnimatedParam; 8]>,
}

impl PulsingCapsules {
    pub fn new(config: PulsingCapsulesConfig) -> Result<Self, ConfigError> {
        checked("pulsing_capsules", config.validate())?;
        let core = ComponentCore::new("pulsing_capsules");
        let heights = (0..config.count)
            .map(|i| {
                AnimatedParam::new("height", config.height_at(0, i)).with_redraw(core.redraw())
            })
            .collect();
        Ok(Self {
            config,
            core,
            timer: TimerSlot::new("pulse"),
            active: 0,
            decreasing: false,
            heights,
        })
    }

    pub fn config(&self) -> &PulsingCapsulesConfig {
        &self.config
    }

    /// Index of the capsule at the top of the swell
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn height(&self, index: usize) -> f32 {
        self.heights.get(index).map_or(0.0, AnimatedParam::value)
    }

    fn advance(&mut self) {
        let last = self.config.count - 1;
        if self.active == last {
            self.decreasing = true;
        } else if self.active == 0 {
            self.decreasing = false;
        }
        self.active = if self.decreasing {
            self.active - 1
        } else {
            self.active + 1
        };
        trace!(active = self.active, "swell moved");

        let spec = AnimationSpec::ease_out(self.config.swell());
        for (i, height) in self.heights.iter_mut().enumerate() {
            height.animate_to(self.config.height_at(self.active, i), spec);
        }

        // Back at the first capsule: one lap done
        if self.active == 0 {
            self.core.cycle();
        }
    }
}

impl Component for PulsingCapsules {
    fn name(&self) -> &'static str {
        "pulsing_capsules"
    }

    fn intrinsic_size(&self) -> Size {
        let n = self.config.count as f32;
        let w = self.config.capsule_width;
        Size::new(n * w + (n - 1.0) * w, self.config.capsule_height * 4.0)
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
        for height in self.heights.iter_mut() {
            height.step(dt);
        }
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let w = self.config.capsule_width;
        let mid = self.intrinsic_size().height / 2.0;
        for i in 0..self.config.count {
            let h = self.height(i);
            let x = i as f32 * 2.0 * w;
            let capsule = Path::capsule(Rect::new(x, mid - h / 2.0, w, h));
            ctx.fill(&capsule, self.config.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lifecycle;
    use soothing_core::RecordingContext;

    fn capsules() -> PulsingCapsules {
        PulsingCapsules::new(PulsingCapsulesConfig::default().duration(0.8)).unwrap()
    }

    #[test]
    fn test_swell_ping_pongs() {
        let mut spinner = capsules();
        spinner.on_appear();
        // Half of 0.8 over four gaps
        assert!((spinner.config().interval() - 0.1).abs() < 1e-6);

        let mut path = vec![spinner.active()];
        for _ in 0..8 {
            for _ in 0..10 {
                spinner.tick(0.01);
            }
            path.push(spinner.active());
        }
        assert_eq!(path, vec![0, 1, 2, 3, 4, 3, 2, 1, 0]);
        assert_eq!(spinner.lifecycle(), Lifecycle::Running);
    }

    #[test]
    fn test_heights_settle_on_profile() {
        let mut spinner = capsules();
        spinner.on_appear();
        for _ in 0..20 {
            spinner.tick(0.01);
        }
        assert_eq!(spinner.active(), 2);

        // Freeze the swell and let the heights land
        spinner.timer.cancel(spinner.core.clock_mut());
        for _ in 0..50 {
            spinner.tick(0.01);
        }
        let heights: Vec<f32> = (0..5).map(|i| spinner.height(i).round()).collect();
        assert_eq!(heights, vec![100.0, 150.0, 200.0, 150.0, 100.0]);
    }

    #[test]
    fn test_idle_until_appear() {
        let mut spinner = capsules();
        for _ in 0..50 {
            spinner.tick(0.01);
        }
        assert_eq!(spinner.active(), 0);
        assert_eq!(spinner.lifecycle(), Lifecycle::Idle);
    }

    #[test]
    fn test_draws_one_capsule_each() {
        let spinner = capsules();
        let mut ctx = RecordingContext::new(spinner.intrinsic_size());
        spinner.render(&mut ctx);
        assert_eq!(ctx.paint_count(), 5);
    }

    #[test]
    fn test_rejects_single_capsule() {
        let config = PulsingCapsulesConfig::default().count(1);
        assert!(matches!(
            PulsingCapsules::new(config),
            Err(ConfigError::TooFew { .. })
        ));
    }
}
