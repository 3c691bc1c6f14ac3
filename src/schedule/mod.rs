//! Timers.
//!
//! [`Scheduler`] is the port for one-shot callbacks; [`Debouncer`] builds the
//! search-box cancel-and-reschedule behaviour on top of it. [`VirtualScheduler`]
//! runs callbacks against a manual clock so tests can step time explicitly.

pub mod debounce;
pub mod virtual_clock;

pub use debounce::Debouncer;
pub use virtual_clock::{TaskId, VirtualScheduler};

/// A deferred callback.
pub type Task = Box<dyn FnOnce()>;

/// Port for one-shot timers.
pub trait Scheduler {
    /// Identifies a scheduled task for cancellation.
    type Handle;

    /// Runs `task` once, no earlier than `delay_ms` from now.
    fn schedule(&self, delay_ms: u32, task: Task) -> Self::Handle;

    /// Prevents a pending task from running. Cancelling a task that already ran
    /// is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

impl<T: Scheduler + ?Sized> Scheduler for &T {
    type Handle = T::Handle;

    fn schedule(&self, delay_ms: u32, task: Task) -> Self::Handle {
        (**self).schedule(delay_ms, task)
    }

    fn cancel(&self, handle: Self::Handle) {
        (**self).cancel(handle);
    }
}

impl<T: Scheduler + ?Sized> Scheduler for std::rc::Rc<T> {
    type Handle = T::Handle;

    fn schedule(&self, delay_ms: u32, task: Task) -> Self::Handle {
        (**self).schedule(delay_ms, task)
    }

    fn cancel(&self, handle: Self::Handle) {
        (**self).cancel(handle);
    }
}
