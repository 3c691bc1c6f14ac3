//! Browser timers for the [`Sleeper`] and [`Scheduler`] ports.

use crate::fetch::Sleeper;
use crate::schedule::{Scheduler, Task};
use futures_util::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSleeper;

impl Sleeper for BrowserSleeper {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        Box::pin(TimeoutFuture::new(ms))
    }
}

/// `setTimeout`-backed scheduler. Dropping a [`Timeout`] clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Task) -> Timeout {
        Timeout::new(delay_ms, task)
    }

    fn cancel(&self, handle: Timeout) {
        drop(handle);
    }
}
