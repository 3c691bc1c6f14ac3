//! Trailing-edge debounce.

use super::{Scheduler, Task};

/// Keeps at most one pending task: each [`Debouncer::call`] cancels the previous
/// one and schedules anew, so only the last call of a burst runs.
///
/// # Examples
///
/// ```
/// use blogfront::schedule::{Debouncer, VirtualScheduler};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let clock = VirtualScheduler::new();
/// let mut debouncer = Debouncer::new(&clock, 250);
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// for query in ["r", "ru", "rus"] {
///     let seen = Rc::clone(&seen);
///     debouncer.call(move || seen.borrow_mut().push(query));
///     clock.advance(100);
/// }
/// clock.advance(250);
///
/// assert_eq!(*seen.borrow(), vec!["rus"]);
/// ```
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> Debouncer<S> {
    pub const fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Replaces any pending task with `task`.
    pub fn call(&mut self, task: impl FnOnce() + 'static) {
        self.cancel();
        let task: Task = Box::new(task);
        self.pending = Some(self.scheduler.schedule(self.delay_ms, task));
    }

    /// Drops the pending task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Scheduler> std::fmt::Debug for Debouncer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay_ms", &self.delay_ms)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::VirtualScheduler;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn fires_once_after_the_quiet_period() {
        let clock = VirtualScheduler::new();
        let mut debouncer = Debouncer::new(&clock, 250);
        let runs = Rc::new(Cell::new(0));

        let counter = Rc::clone(&runs);
        debouncer.call(move || counter.set(counter.get() + 1));

        clock.advance(249);
        assert_eq!(runs.get(), 0);
        clock.advance(1);
        assert_eq!(runs.get(), 1);
        clock.advance(1_000);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn each_call_restarts_the_window() {
        let clock = VirtualScheduler::new();
        let mut debouncer = Debouncer::new(&clock, 250);
        let last = Rc::new(Cell::new(0));

        for value in 1..=4 {
            let last = Rc::clone(&last);
            debouncer.call(move || last.set(value));
            clock.advance(200);
        }
        assert_eq!(last.get(), 0);

        clock.advance(50);
        assert_eq!(last.get(), 4);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn cancel_drops_the_pending_task() {
        let clock = VirtualScheduler::new();
        let mut debouncer = Debouncer::new(&clock, 10);
        let ran = Rc::new(Cell::new(false));

        let flag = Rc::clone(&ran);
        debouncer.call(move || flag.set(true));
        debouncer.cancel();
        clock.advance(100);

        assert!(!ran.get());
    }
}
