//! Manually advanced scheduler.

use super::{Scheduler, Task};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Handle returned by [`VirtualScheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// A [`Scheduler`] whose clock only moves when [`VirtualScheduler::advance`] is
/// called. Due tasks run in deadline order, ties in scheduling order.
#[derive(Default)]
pub struct VirtualScheduler {
    now: Cell<u64>,
    next_id: Cell<u64>,
    queue: RefCell<BTreeMap<(u64, TaskId), Task>>,
}

impl VirtualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since creation.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Moves the clock forward by `ms`, running every task that falls due.
    ///
    /// Tasks may schedule further tasks; those run too if they fall due within
    /// the same window.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get().saturating_add(ms);

        loop {
            // The queue borrow must end before the task runs: tasks reschedule.
            let next = {
                let mut queue = self.queue.borrow_mut();
                match queue.keys().next().copied() {
                    Some(key) if key.0 <= target => queue.remove(&key).map(|task| (key.0, task)),
                    _ => None,
                }
            };

            let Some((due, task)) = next else {
                break;
            };
            self.now.set(due);
            task();
        }

        self.now.set(target);
    }
}

impl Scheduler for VirtualScheduler {
    type Handle = TaskId;

    fn schedule(&self, delay_ms: u32, task: Task) -> TaskId {
        let id = TaskId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let due = self.now.get().saturating_add(u64::from(delay_ms));
        self.queue.borrow_mut().insert((due, id), task);
        id
    }

    fn cancel(&self, handle: TaskId) {
        self.queue.borrow_mut().retain(|(_, id), _| *id != handle);
    }
}

impl std::fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualScheduler")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}
