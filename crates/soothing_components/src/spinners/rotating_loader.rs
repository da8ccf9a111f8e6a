//! Rotating loader
//!
//! Two concentric arcs winding in and out of each other. The large arc
//! grows while the small one shrinks, both spin, then they trade places.
//! The whole sequence repeats every 1.98 durations.

use serde::Deserialize;
use soothing_animation::{AnimatedParam, AnimationSpec, TimerSlot};
use soothing_core::{
    ensure_positive, Color, ConfigError, DrawContext, DrawContextExt, Point, Size, Stroke,
};
use soothing_shapes::{ring_arc, TrimRange};
use tracing::debug;

use crate::component::{checked, Component, ComponentCore};

/// Pause between appearing and the first sequence
const START_DELAY: f32 = 0.1;

/// Period of the whole sequence, in durations
const CYCLE: f32 = 1.98;

/// Arc length standing in for an empty arc, so the cap stays visible
const MIN_PROGRESS: f32 = 0.001;

const LARGE_REST: f32 = -90.0;
const SMALL_REST: f32 = -30.0;

/// Rotating loader configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RotatingLoaderConfig {
    pub large_circle_size: f32,
    pub small_circle_size: f32,
    pub color: Color,
    pub duration: f32,
}

impl Default for RotatingLoaderConfig {
    fn default() -> Self {
        Self {
            large_circle_size: 100.0,
            small_circle_size: 50.0,
            color: Color::BLUE,
            duration: 2.0,
        }
    }
}

impl RotatingLoaderConfig {
    pub fn large_circle_size(mut self, size: f32) -> Self {
        self.large_circle_size = size;
        self
    }

    pub fn small_circle_size(mut self, size: f32) -> Self {
        self.small_circle_size = size;
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
        ensure_positive("large_circle_size", self.large_circle_size)?;
        ensure_positive("small_circle_size", self.small_circle_size)?;
        ensure_positive("duration", self.duration)?;
        Ok(())
    }

    fn large_stroke(&self) -> f32 {
        self.large_circle_size / 9.5
    }

    fn small_stroke(&self) -> f32 {
        self.small_circle_size / 5.5
    }
}

/// Length and angle of one arc
struct Arc {
    progress: AnimatedParam,
    rotation: AnimatedParam,
}

/// Two arcs winding around each other
pub struct RotatingLoader {
    config: RotatingLoaderConfig,
    core: ComponentCore,
    large: Arc,
    small: Arc,
    start: TimerSlot,
    cycle: TimerSlot,
    turn: TimerSlot,
    unwind: TimerSlot,
    cycles: u64,
}

impl RotatingLoader {
    pub fn new(config: RotatingLoaderConfig) -> Result<Self, ConfigError> {
        checked("rotating_loader", config.validate())?;
        let core = ComponentCore::new("rotating_loader");
        let param = |name, initial| AnimatedParam::new(name, initial).with_redraw(core.redraw());
        let large = Arc {
            progress: param("large_progress", MIN_PROGRESS),
            rotation: param("large_rotation", LARGE_REST),
        };
        let small = Arc {
            progress: param("small_progress", 1.0),
            rotation: param("small_rotation", SMALL_REST),
        };
        Ok(Self {
            config,
            core,
            large,
            small,
            start: TimerSlot::new("start"),
            cycle: TimerSlot::new("cycle"),
            turn: TimerSlot::new("turn"),
            unwind: TimerSlot::new("unwind"),
            cycles: 0,
        })
    }

    pub fn config(&self) -> &RotatingLoaderConfig {
        &self.config
    }

    pub fn large_progress(&self) -> f32 {
        self.large.progress.value()
    }

    pub fn large_rotation(&self) -> f32 {
        self.large.rotation.value()
    }

    pub fn small_progress(&self) -> f32 {
        self.small.progress.value()
    }

    pub fn small_rotation(&self) -> f32 {
        self.small.rotation.value()
    }

    /// Completed sequences
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Grow the large arc and shrink the small one, then queue the turn
    /// and the unwind
    fn animate(&mut self) {
        let d = self.config.duration;
        self.large
            .progress
            .animate_to(1.0, AnimationSpec::ease_out(d));
        self.large
            .rotation
            .animate_to(365.0, AnimationSpec::ease_out(d * 1.1));
        let shrink = AnimationSpec::ease_out(d * 0.85);
        self.small.progress.animate_to(MIN_PROGRESS, shrink);
        self.small.rotation.animate_to(679.0, shrink);

        let clock = self.core.clock_mut();
        self.turn.restart(clock, d * 0.7, false);
        self.unwind.restart(clock, d, false);
    }

    fn turn(&mut self) {
        let spec = AnimationSpec::ease_in(self.config.duration * 0.4);
        self.small.rotation.animate_to(825.0, spec);
        self.large.rotation.animate_to(375.0, spec);
    }

    fn unwind(&mut self) {
        let d = self.config.duration;
        let ease = AnimationSpec::ease_out(d);
        self.large.rotation.animate_to(990.0, ease);
        self.large.progress.animate_to(MIN_PROGRESS, ease);

        let linear = AnimationSpec::linear(d * 0.8);
        self.small.progress.animate_to(1.0, linear);
        self.small.rotation.animate_to(990.0, linear);
    }

    fn restart_sequence(&mut self) {
        self.large.rotation.set(LARGE_REST);
        self.small.rotation.set(SMALL_REST);
        self.cycles += 1;
        debug!(cycles = self.cycles, "rotating loader sequence restarted");
        self.core.cycle();
        self.animate();
    }

    fn center(&self) -> Point {
        self.intrinsic_size().to_rect().center()
    }
}

impl Component for RotatingLoader {
    fn name(&self) -> &'static str {
        "rotating_loader"
    }

    fn intrinsic_size(&self) -> Size {
        let c = &self.config;
        let large = c.large_circle_size + c.large_stroke();
        let small = c.small_circle_size + c.small_stroke();
        Size::square(large.max(small))
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn on_appear(&mut self) {
        self.start
            .restart(self.core.clock_mut(), START_DELAY, false);
        self.core.begin_cycle();
    }

    fn tick(&mut self, dt: f32) {
        let fired = self.core.clock_mut().tick(dt);

        if self.start.fired_in(&fired) {
            self.animate();
            let period = self.config.duration * CYCLE;
            self.cycle.restart(self.core.clock_mut(), period, true);
        }
        if self.turn.fired_in(&fired) {
            self.turn();
        }
        if self.unwind.fired_in(&fired) {
            self.unwind();
        }
        if self.cycle.fired_in(&fired) {
            self.restart_sequence();
        }

        for arc in [&mut self.large, &mut self.small] {
            arc.progress.step(dt);
            arc.rotation.step(dt);
        }
        self.core.dispatch();
    }

    fn render(&self, ctx: &mut dyn DrawContext) {
        let c = &self.config;
        let center = self.center();

        let large = ring_arc(
            center,
            c.large_circle_size / 2.0,
            TrimRange::to(self.large_progress()),
            self.large_rotation(),
        );
        ctx.stroke(&large, &Stroke::rounded(c.large_stroke()), c.color);

        let small = ring_arc(
            center,
            c.small_circle_size / 2.0,
            TrimRange::to(self.small_progress()),
            self.small_rotation(),
        );
        ctx.stroke(&small, &Stroke::rounded(c.small_stroke()), c.color.opacity(0.8));
    }
}
