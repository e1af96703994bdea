//! A real-time [`Delay`], on tokio's timer.

use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};

use super::Delay;

/// A [`Delay`] that actually waits, in real time.
///
/// The waits are tokio sleeps, so they have to be polled inside a tokio runtime with the time driver enabled, e.g. a
/// current-thread runtime running a [`LocalSet`](tokio::task::LocalSet). The sleep only starts on the first poll.
#[derive(Clone, Copy, Default, Debug)]
pub struct TimerDelay;

impl TimerDelay {
    pub fn new() -> Self {
        Self
    }
}

impl Delay for TimerDelay {
    fn wait(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        async move { tokio::time::sleep(duration).await }.boxed_local()
    }
}
