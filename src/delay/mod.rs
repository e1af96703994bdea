//! Waiting. The performer never sleeps on its own; it asks a [`Delay`] for a future that completes later.
//!
//! - [`TimerDelay`] really waits, on tokio's timer.
//! - [`InstantDelay`] doesn't wait at all, for headless runs and benchmarks.
//! - [`ManualDelay`] waits until you tell it to stop, for tests and stepping through a performance by hand.

use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::Rc,
    time::Duration,
};

use futures::{
    channel::oneshot,
    future::{self, FutureExt, LocalBoxFuture},
};

mod timer;
pub use timer::TimerDelay;

/// Something that can produce a future which completes after a given amount of time.
pub trait Delay {
    /// Get a future that completes after `duration`.
    ///
    /// This can't fail. Nothing should start counting until the future is first polled.
    fn wait(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// A [`Delay`] which completes every wait immediately.
#[derive(Clone, Copy, Default, Debug)]
pub struct InstantDelay;

impl Delay for InstantDelay {
    fn wait(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        future::ready(()).boxed_local()
    }
}

/// A [`Delay`] which only completes waits when told to, oldest first.
///
/// Every requested duration is recorded, so you can check the pacing of a performance without actually sitting
/// through it.
#[derive(Default, Debug)]
pub struct ManualDelay {
    pending: RefCell<VecDeque<(Duration, oneshot::Sender<()>)>>,
    requested: RefCell<Vec<Duration>>,
}

impl ManualDelay {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// How many waits haven't been released yet.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Every duration that's been waited on, released or not, in the order they were asked for.
    pub fn requested(&self) -> Vec<Duration> {
        self.requested.borrow().clone()
    }

    /// Complete the oldest outstanding wait, returning how long it was supposed to take.
    ///
    /// Nothing actually runs until whatever's driving the futures gets polled again.
    pub fn release(&self) -> Option<Duration> {
        let (duration, done) = self.pending.borrow_mut().pop_front()?;
        // if the waiter is gone, that's fine; there's no one left to wake
        let _ = done.send(());
        Some(duration)
    }
}

impl Delay for ManualDelay {
    fn wait(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let (done_s, done_r) = oneshot::channel();
        self.requested.borrow_mut().push(duration);
        self.pending.borrow_mut().push_back((duration, done_s));
        done_r.map(|_| ()).boxed_local()
    }
}

#[cfg(test)]
mod delay_test {
    use std::time::Duration;

    use futures::FutureExt;

    use super::{Delay, InstantDelay, ManualDelay};

    #[test]
    fn instant_is_ready_immediately() {
        assert_eq!(InstantDelay.wait(Duration::from_secs(60)).now_or_never(), Some(()));
    }

    #[test]
    fn manual_waits_until_released() {
        let delay = ManualDelay::new();
        let mut first = delay.wait(Duration::from_millis(10));
        let mut second = delay.wait(Duration::from_millis(20));
        assert_eq!((&mut first).now_or_never(), None);
        assert_eq!(delay.pending(), 2);

        assert_eq!(delay.release(), Some(Duration::from_millis(10)));
        assert_eq!(first.now_or_never(), Some(()));
        assert_eq!((&mut second).now_or_never(), None);

        assert_eq!(delay.release(), Some(Duration::from_millis(20)));
        assert_eq!(second.now_or_never(), Some(()));
        assert_eq!(delay.release(), None);
        assert_eq!(delay.requested(), vec![Duration::from_millis(10), Duration::from_millis(20)]);
    }

    #[test]
    fn manual_release_tolerates_dropped_waiters() {
        let delay = ManualDelay::new();
        drop(delay.wait(Duration::from_millis(5)));
        assert_eq!(delay.release(), Some(Duration::from_millis(5)));
        assert_eq!(delay.pending(), 0);
    }
}
