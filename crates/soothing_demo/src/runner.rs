//! Headless runner
//!
//! Drives one component at a fixed frame rate, renders into a
//! [`RecordingContext`] whenever the component asks for a redraw and
//! collects statistics about what was drawn.

use smallvec::SmallVec;
use soothing_components::{Component, Lifecycle};
use soothing_core::{DrawCommand, RecordingContext};
use tracing::{debug, trace};

/// How long and how fast to simulate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunOptions {
    pub seconds: f32,
    pub fps: u32,
    /// Tap the component's center once this many seconds in
    pub tap_at: Option<f32>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seconds: 4.0,
            fps: 60,
            tap_at: None,
        }
    }
}

impl RunOptions {
    pub fn dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    pub fn ticks(&self) -> u64 {
        (self.seconds * self.fps as f32).round().max(0.0) as u64
    }
}

/// What happened during a run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    pub ticks: u64,
    /// Renders, including the first frame
    pub frames: u64,
    /// Draw commands over all frames
    pub commands: usize,
    /// Paint commands in the busiest frame
    pub peak_paints: usize,
    /// Whether the tap landed on the component
    pub tap_hit: Option<bool>,
    /// Lifecycle changes as (seconds, new state)
    pub transitions: Vec<(f32, Lifecycle)>,
    pub final_lifecycle: Lifecycle,
    /// Labels drawn in the last frame
    pub last_texts: Vec<String>,
}

impl RunReport {
    /// Lifecycle states entered, in order
    pub fn states(&self) -> SmallVec<[Lifecycle; 8]> {
        self.transitions.iter().map(|(_, state)| *state).collect()
    }

    /// Laps closed by looping components
    pub fn laps(&self) -> usize {
        self.transitions
            .windows(2)
            .filter(|pair| pair[0].1 == Lifecycle::Resetting && pair[1].1 == Lifecycle::Running)
            .count()
    }
}

/// Simulate `component` for `options.seconds`
pub fn run(component: &mut dyn Component, options: &RunOptions) -> RunReport {
    let mut ctx = RecordingContext::new(component.intrinsic_size());
    let mut report = RunReport::default();
    let dt = options.dt();

    component.on_appear();
    component.take_redraw();
    render_frame(component, &mut ctx, &mut report);
    observe(component, 0.0, &mut report);

    for tick in 0..options.ticks() {
        let now = tick as f32 * dt;
        if let Some(tap_at) = options.tap_at {
            if report.tap_hit.is_none() && now >= tap_at {
                let center = component.intrinsic_size().to_rect().center();
                let hit = component.tap(center);
                debug!(component = component.name(), at = now, hit, "tap");
                report.tap_hit = Some(hit);
            }
        }

        component.tick(dt);
        report.ticks += 1;
        observe(component, now + dt, &mut report);

        if component.take_redraw() {
            render_frame(component, &mut ctx, &mut report);
        }
    }

    report.final_lifecycle = component.lifecycle();
    report.last_texts = ctx.texts().into_iter().map(str::to_owned).collect();
    report
}

fn render_frame(component: &dyn Component, ctx: &mut RecordingContext, report: &mut RunReport) {
    ctx.clear();
    component.render(ctx);
    report.frames += 1;
    report.commands += ctx.commands().len();
    report.peak_paints = report.peak_paints.max(ctx.paint_count());
    trace!(
        component = component.name(),
        commands = ctx.commands().len(),
        clips = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::PushClip(_)))
            .count(),
        "frame"
    );
}

/// Record every state entered during the last tick, including the ones a
/// lap passes through before the tick returns
fn observe(component: &mut dyn Component, at: f32, report: &mut RunReport) {
    for state in component.take_transitions() {
        report.transitions.push((at, state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, ActionCounter};
    use crate::config::PaletteConfig;

    fn run_entry(slug: &str, options: RunOptions) -> (RunReport, u32) {
        let actions = ActionCounter::default();
        let entry = catalog::find(slug).unwrap();
        let mut component = entry.build(&PaletteConfig::default(), &actions).unwrap();
        let report = run(component.as_mut(), &options);
        (report, actions.get())
    }

    #[test]
    fn test_options_tick_count() {
        let options = RunOptions {
            seconds: 2.0,
            fps: 30,
            tap_at: None,
        };
        assert_eq!(options.ticks(), 60);
        assert!((options.dt() - 1.0 / 30.0).abs() < 1e-7);
    }

    #[test]
    fn test_progress_button_completes_once() {
        let (report, actions) = run_entry(
            "progress-button",
            RunOptions {
                seconds: 4.0,
                fps: 100,
                tap_at: Some(0.0),
            },
        );
        assert_eq!(report.tap_hit, Some(true));
        assert_eq!(actions, 1);
        assert!(report.states().contains(&Lifecycle::Completing));
        assert!(report.last_texts.is_empty());
    }

    #[test]
    fn test_spinner_runs_without_taps() {
        let (report, actions) = run_entry("harmony-spinner", RunOptions::default());
        assert_eq!(report.tap_hit, None);
        assert_eq!(actions, 0);
        assert_eq!(report.final_lifecycle, Lifecycle::Running);
        // Redraws at most once per tick
        assert!(report.frames <= report.ticks + 1);
        assert!(report.frames > 100);
        assert_eq!(report.peak_paints, 3);
    }

    #[test]
    fn test_looping_spinner_reports_laps() {
        let (report, _) = run_entry(
            "pulsing-capsules",
            RunOptions {
                seconds: 3.0,
                ..RunOptions::default()
            },
        );
        // One 2s lap closes inside a single tick
        assert_eq!(
            report.states().as_slice(),
            &[
                Lifecycle::Running,
                Lifecycle::Completing,
                Lifecycle::Resetting,
                Lifecycle::Running
            ]
        );
        assert_eq!(report.laps(), 1);
        let lap_end = &report.transitions[1..];
        assert!(lap_end.iter().all(|(at, _)| (*at - lap_end[0].0).abs() < 1e-6));
        assert!((lap_end[0].0 - 2.0).abs() < 0.05);
        assert_eq!(report.final_lifecycle, Lifecycle::Running);
    }

    #[test]
    fn test_every_entry_survives_a_short_run() {
        let options = RunOptions {
            seconds: 0.5,
            fps: 60,
            tap_at: Some(0.1),
        };
        for entry in catalog::entries() {
            let actions = ActionCounter::default();
            let mut component = entry.build(&PaletteConfig::default(), &actions).unwrap();
            let report = run(component.as_mut(), &options);
            assert_eq!(report.ticks, 30, "{}", entry.slug);
            assert!(report.frames >= 1, "{}", entry.slug);
        }
    }
}
