//! Redraw scheduling
//!
//! Animated parameters notify a shared [`RedrawScheduler`] whenever their
//! value changes. The host polls it once per frame with
//! [`RedrawScheduler::take`], so any number of writes within one tick
//! produce at most one redraw.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct RedrawState {
    dirty: Cell<bool>,
    requests: Cell<u64>,
    redraws: Cell<u64>,
}

/// Shared, single-threaded redraw flag
///
/// Cloning yields another handle to the same flag.
#[derive(Clone, Debug, Default)]
pub struct RedrawScheduler {
    state: Rc<RedrawState>,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owner as needing a redraw
    pub fn request(&self) {
        self.state.dirty.set(true);
        self.state.requests.set(self.state.requests.get() + 1);
    }

    /// Whether a redraw is pending, without clearing it
    pub fn is_pending(&self) -> bool {
        self.state.dirty.get()
    }

    /// Consume the pending redraw, if any
    pub fn take(&self) -> bool {
        let dirty = self.state.dirty.replace(false);
        if dirty {
            self.state.redraws.set(self.state.redraws.get() + 1);
        }
        dirty
    }

    /// Total number of `request` calls
    pub fn requests(&self) -> u64 {
        self.state.requests.get()
    }

    /// Total number of redraws handed out by `take`
    pub fn redraws(&self) -> u64 {
        self.state.redraws.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_requests() {
        let scheduler = RedrawScheduler::new();
        let handle = scheduler.clone();

        handle.request();
        handle.request();
        scheduler.request();

        assert!(scheduler.take());
        assert!(!scheduler.take());
        assert_eq!(scheduler.requests(), 3);
        assert_eq!(scheduler.redraws(), 1);
    }
}
