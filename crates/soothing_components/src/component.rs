//! Component archetype
//!
//! Every component follows the same shape: a validated configuration, a
//! handful of [`AnimatedParam`](soothing_animation::AnimatedParam)s, an
//! [`AnimationClock`] driving discrete timers, and a `render` method that
//! rebuilds geometry from the current parameter values.
//!
//! [`ComponentCore`] bundles the parts every instance owns: the clock, the
//! redraw scheduler, the lifecycle state and the user callbacks.
//! Callbacks are never run in the middle of a tick. They are queued while
//! parameters update and dispatched once the tick is done.

use smallvec::SmallVec;
use soothing_animation::{AnimationClock, RedrawScheduler};
use soothing_core::{deg_to_rad, Affine2D, ConfigError, DrawContext, Point, Size};
use tracing::{debug, trace, warn};

/// User callback invoked by a component
pub type Callback = Box<dyn FnMut()>;

/// Instance lifecycle
///
/// ```text
/// Idle ──▶ Running ──▶ Completing ──▶ Resetting ──▶ Idle
///            ▲  │            │             │
///            └──┘ restart    └──▶ Idle     └──▶ Running
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    #[default]
    Idle,
    Running,
    Completing,
    Resetting,
}

impl Lifecycle {
    /// Whether moving from `self` to `next` is allowed
    pub fn can_transition_to(self, next: Lifecycle) -> bool {
        use Lifecycle::*;
        matches!(
            (self, next),
            (Idle, Running)
                | (Running, Running)
                | (Running, Completing)
                | (Completing, Resetting)
                | (Completing, Idle)
                | (Resetting, Idle)
                | (Resetting, Running)
        )
    }
}

/// Handle to a callback registered with a [`ComponentCore`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActionId(usize);

/// Lifecycle changes kept until the host drains them
const HISTORY_LIMIT: usize = 16;

/// State shared by every component instance
pub struct ComponentCore {
    name: &'static str,
    clock: AnimationClock,
    redraw: RedrawScheduler,
    lifecycle: Lifecycle,
    actions: Vec<Callback>,
    queued: SmallVec<[ActionId; 2]>,
    completed: bool,
    history: SmallVec<[Lifecycle; 4]>,
}

impl ComponentCore {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            clock: AnimationClock::new(),
            redraw: RedrawScheduler::new(),
            lifecycle: Lifecycle::Idle,
            actions: Vec::new(),
            queued: SmallVec::new(),
            completed: false,
            history: SmallVec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut AnimationClock {
        &mut self.clock
    }

    pub fn redraw(&self) -> &RedrawScheduler {
        &self.redraw
    }

    pub fn request_redraw(&self) {
        self.redraw.request();
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Move to `next` if the transition is allowed; returns whether it moved
    pub fn transition(&mut self, next: Lifecycle) -> bool {
        if !self.lifecycle.can_transition_to(next) {
            trace!(
                component = self.name,
                from = ?self.lifecycle,
                to = ?next,
                "lifecycle transition ignored"
            );
            return false;
        }
        if self.lifecycle != next {
            debug!(component = self.name, from = ?self.lifecycle, to = ?next, "lifecycle");
            if self.history.len() == HISTORY_LIMIT {
                self.history.remove(0);
            }
            self.history.push(next);
        }
        self.lifecycle = next;
        self.redraw.request();
        true
    }

    /// Enter `Running` for a fresh cycle from whatever state the instance is in
    ///
    /// A completed instance passes through `Resetting` first. Clears the
    /// completion latch.
    pub fn begin_cycle(&mut self) {
        if self.lifecycle == Lifecycle::Completing {
            self.transition(Lifecycle::Resetting);
        }
        self.transition(Lifecycle::Running);
        self.completed = false;
    }

    /// Enter `Completing` once per cycle
    ///
    /// Returns `true` only the first time it is called in a cycle, so the
    /// caller can fire completion side effects exactly once.
    pub fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.transition(Lifecycle::Completing);
        true
    }

    /// Close the current cycle and open the next one
    ///
    /// Looping components call this at the end of every lap:
    /// Running → Completing → Resetting → Running.
    pub fn cycle(&mut self) {
        self.complete();
        self.begin_cycle();
    }

    /// Leave `Completing` through `Resetting` back to `Idle`
    pub fn settle(&mut self) {
        if self.lifecycle == Lifecycle::Completing {
            self.transition(Lifecycle::Resetting);
        }
        self.transition(Lifecycle::Idle);
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Drain the states entered since the last call, oldest first
    ///
    /// A lap closed by [`cycle`](Self::cycle) shows up as
    /// `Completing, Resetting, Running` even though it happens inside one
    /// tick. Only the latest changes are kept between drains.
    pub fn take_transitions(&mut self) -> SmallVec<[Lifecycle; 4]> {
        std::mem::take(&mut self.history)
    }

    /// Register a callback
    pub fn add_action(&mut self, action: Callback) -> ActionId {
        self.actions.push(action);
        ActionId(self.actions.len() - 1)
    }

    /// Queue a callback for dispatch at the end of the current tick
    pub fn queue(&mut self, id: ActionId) {
        if id.0 < self.actions.len() {
            self.queued.push(id);
        }
    }

    /// Number of callbacks waiting for dispatch
    pub fn queued(&self) -> usize {
        self.queued.len()
    }

    /// Run every queued callback in order
    pub fn dispatch(&mut self) {
        if self.queued.is_empty() {
            return;
        }
        let queued = std::mem::take(&mut self.queued);
        for id in queued {
            trace!(component = self.name, action = id.0, "dispatching callback");
            if let Some(action) = self.actions.get_mut(id.0) {
                action();
            }
        }
    }
}

impl std::fmt::Debug for ComponentCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentCore")
            .field("name", &self.name)
            .field("lifecycle", &self.lifecycle)
            .field("actions", &self.actions.len())
            .field("queued", &self.queued.len())
            .field("active_timers", &self.clock.active_timers())
            .finish()
    }
}

/// An animated component instance
///
/// Components draw in local coordinates: the origin is the top-left corner
/// of a frame of [`Component::intrinsic_size`]. Taps are given in the same
/// coordinates.
pub trait Component {
    fn name(&self) -> &'static str;

    fn intrinsic_size(&self) -> Size;

    fn core(&self) -> &ComponentCore;

    fn core_mut(&mut self) -> &mut ComponentCore;

    fn lifecycle(&self) -> Lifecycle {
        self.core().lifecycle()
    }

    /// Called once when the component becomes visible
    fn on_appear(&mut self) {}

    /// Handle a tap; returns whether the tap hit the component
    fn tap(&mut self, _point: Point) -> bool {
        false
    }

    /// Advance by `dt` seconds of simulated time
    fn tick(&mut self, dt: f32);

    fn render(&self, ctx: &mut dyn DrawContext);

    /// Consume the pending redraw request, if any
    fn take_redraw(&mut self) -> bool {
        self.core().redraw().take()
    }

    /// Drain the lifecycle states entered since the last call
    fn take_transitions(&mut self) -> SmallVec<[Lifecycle; 4]> {
        self.core_mut().take_transitions()
    }
}

/// Log a rejected configuration before handing the error back
pub(crate) fn checked<T>(
    component: &'static str,
    result: Result<T, ConfigError>,
) -> Result<T, ConfigError> {
    if let Err(err) = &result {
        warn!(component, %err, "rejected configuration");
    }
    result
}

/// Clockwise rotation in degrees around `center`
pub(crate) fn rotation(degrees: f32, center: Point) -> Affine2D {
    Affine2D::rotation_around(deg_to_rad(degrees), center)
}
