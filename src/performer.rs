//! The performer: owns the queue of tasks and plays them out, one letter at a time, one task at a time.
//!
//! Everything here is single-threaded and cooperative. Drive the futures on one thread (e.g. with a
//! [`LocalPool`](futures::executor::LocalPool)); the state is only ever touched between `.await`s, so overlapping calls
//! can't observe each other halfway through a step.

use core::fmt;
use std::{cell::RefCell, collections::VecDeque, future::Future, rc::Rc};

use tracing::{debug, trace, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    delay::{Delay, TimerDelay},
    error::{Error, Result},
    render,
    task::{Action, Task, TaskId},
};

/// Where a paused task left off: the index of the next letter it would have rendered.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cursor {
    /// The task that was paused.
    pub task: TaskId,
    /// The next letter to render, counted in grapheme clusters.
    pub letter: usize,
}

#[derive(Default)]
struct State {
    queue: VecDeque<(TaskId, Rc<Task>)>,
    paused: bool,
    cursor: Option<Cursor>,
    /// Whether a drain loop is currently in progress.
    running: bool,
    next_id: u64,
}

impl State {
    fn enqueue(&mut self, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.push_back((id, Rc::new(task)));
        debug!(task = %id, queued = self.queue.len(), "enqueued");
        id
    }

    /// Whether some task already owns the head of the queue, either rendering it or parked on it while paused.
    fn busy(&self) -> bool {
        self.running || (self.paused && self.cursor.is_some())
    }

    fn dequeue(&mut self, id: TaskId) {
        self.queue.retain(|(qid, _)| *qid != id);
        if matches!(self.cursor, Some(c) if c.task == id) {
            self.cursor = None;
        }
    }
}

struct Inner {
    delay: Rc<dyn Delay>,
    state: RefCell<State>,
}

/// Marks a drain loop as in progress for as long as it's alive, so dropping one halfway doesn't wedge the queue.
struct Running(Rc<Inner>);

impl Drop for Running {
    fn drop(&mut self) {
        self.0.state.borrow_mut().running = false;
    }
}

enum Outcome {
    Finished,
    Paused,
}

/// Plays [`Task`]s, strictly in the order they were submitted, letter by letter.
///
/// This is a cheap handle: clones share the same queue and pause state. Separate `Performer::new`s don't share
/// anything.
///
/// Submitting work is synchronous: by the time [`perform`](Self::perform) or [`batch`](Self::batch) returns, the
/// tasks are queued, even if the returned future is never polled. The future is what actually plays the queue, if
/// nothing else already is.
#[derive(Clone)]
pub struct Performer {
    inner: Rc<Inner>,
}

impl fmt::Debug for Performer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Performer")
            .field("queued", &state.queue.len())
            .field("paused", &state.paused)
            .field("cursor", &state.cursor)
            .field("running", &state.running)
            .finish()
    }
}

impl Performer {
    /// Create a performer which paces everything through `delay`.
    pub fn new(delay: Rc<dyn Delay>) -> Self {
        Self {
            inner: Rc::new(Inner {
                delay,
                state: RefCell::new(State::default()),
            }),
        }
    }

    /// Create a performer which waits in real time, with a [`TimerDelay`].
    ///
    /// Its futures then need a tokio runtime to be polled in.
    pub fn timed() -> Self {
        Self::new(Rc::new(TimerDelay::new()))
    }

    /// Submit a task, or with `None`, keep playing what's already queued.
    ///
    /// With a task: it's queued right away. If the queue was idle, the returned future plays it, and everything
    /// queued behind it, until the queue is empty or [paused](Self::pause). If something else is already playing the
    /// queue (or it's paused partway through a task), the future completes immediately and the task waits its turn.
    ///
    /// With `None`: fails with [`Error::InvalidUse`] if nothing is queued. Otherwise, plays the queue as above.
    ///
    /// If a blocking action fails, the future returns that error and the failed task is dropped from the queue;
    /// anything behind it stays queued for the next call to pick up.
    pub fn perform(&self, task: Option<Task>) -> impl Future<Output = Result<()>> + 'static {
        let invalid = {
            let mut state = self.inner.state.borrow_mut();
            match task {
                Some(task) => {
                    state.enqueue(task);
                    false
                }
                None => state.queue.is_empty(),
            }
        };
        let this = self.clone();
        async move {
            if invalid {
                return Err(Error::InvalidUse);
            }
            this.drain().await
        }
    }

    /// Submit several tasks at once, then behave like `perform(None)`.
    ///
    /// The tasks are queued in order, back to back, in one step: nothing submitted concurrently can land between
    /// them. An empty batch on an empty queue is an [`Error::InvalidUse`], just like `perform(None)`.
    pub fn batch(&self, tasks: impl IntoIterator<Item = Task>) -> impl Future<Output = Result<()>> + 'static {
        let tasks: Vec<_> = tasks.into_iter().collect();
        let invalid = {
            let mut state = self.inner.state.borrow_mut();
            for task in tasks {
                state.enqueue(task);
            }
            state.queue.is_empty()
        };
        let this = self.clone();
        async move {
            if invalid {
                return Err(Error::InvalidUse);
            }
            this.drain().await
        }
    }

    /// Stop at the next letter boundary.
    ///
    /// Doesn't interrupt anything already in flight: the current letter's wait finishes first, and so does a
    /// completion action if the active task is already on it. The next task to reach a letter stops there instead.
    pub fn pause(&self) {
        let mut state = self.inner.state.borrow_mut();
        if !state.paused {
            debug!("pausing");
        }
        state.paused = true;
    }

    /// Undo [`pause`](Self::pause).
    ///
    /// If a task actually stopped partway through, the returned future picks it back up at the letter it stopped on,
    /// and keeps playing the queue after it. Otherwise there's nothing to resume and the future completes immediately.
    pub fn unpause(&self) -> impl Future<Output = Result<()>> + 'static {
        let resume = {
            let mut state = self.inner.state.borrow_mut();
            state.paused = false;
            state.cursor.is_some()
        };
        let this = self.clone();
        async move {
            if !resume {
                return Ok(());
            }
            debug!("resuming");
            this.drain().await
        }
    }

    /// Everything still queued, oldest (i.e. active) first.
    pub fn active_tasks(&self) -> Vec<(TaskId, Rc<Task>)> {
        self.inner.state.borrow().queue.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.state.borrow().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().queue.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.inner.state.borrow().paused
    }

    /// Whether some future is currently playing the queue.
    pub fn is_running(&self) -> bool {
        self.inner.state.borrow().running
    }

    /// Where the active task stopped, if it's stopped partway through.
    pub fn pause_cursor(&self) -> Option<Cursor> {
        self.inner.state.borrow().cursor
    }

    /// Play the head of the queue, then the next, until it's empty or a task pauses.
    async fn drain(self) -> Result<()> {
        let _running = {
            let mut state = self.inner.state.borrow_mut();
            if state.busy() || state.queue.is_empty() {
                return Ok(());
            }
            state.running = true;
            Running(self.inner.clone())
        };
        loop {
            let next = self.inner.state.borrow().queue.front().cloned();
            let (id, task) = match next {
                Some(next) => next,
                None => return Ok(()),
            };
            match self.run_task(id, &task).await {
                Ok(Outcome::Paused) => return Ok(()),
                Ok(Outcome::Finished) => {
                    let mut state = self.inner.state.borrow_mut();
                    state.dequeue(id);
                    debug!(task = %id, remaining = state.queue.len(), "finished");
                }
                Err(e) => {
                    let mut state = self.inner.state.borrow_mut();
                    state.dequeue(id);
                    warn!(task = %id, remaining = state.queue.len(), "dropping task: {}", e);
                    return Err(e);
                }
            }
        }
    }

    async fn run_task(&self, id: TaskId, task: &Task) -> Result<Outcome> {
        let opts = task.effective_options();
        let resume_at = {
            let mut state = self.inner.state.borrow_mut();
            match state.cursor.take() {
                Some(c) if c.task == id => Some(c.letter),
                Some(stale) => {
                    warn!(task = %id, "ignoring pause cursor left by {}", stale.task);
                    None
                }
                None => None,
            }
        };

        // resuming means this already happened, and clearing again would lose the letters already shown
        if resume_at.is_none() {
            debug!(task = %id, "starting");
            if let Some(action) = &opts.blocking_prepare_action {
                self.run_action(action).await?;
            }
            if opts.should_clear_existing_text {
                task.target.clear();
            }
        }

        if let Some(text) = &task.text {
            let letters: Vec<&str> = text.graphemes(true).collect();
            let start = resume_at.unwrap_or(0);
            if start >= letters.len() {
                self.inner.delay.wait(opts.wait_after_letter).await;
            } else {
                for (i, letter) in letters.iter().enumerate().skip(start) {
                    {
                        let mut state = self.inner.state.borrow_mut();
                        if state.paused {
                            state.cursor = Some(Cursor { task: id, letter: i });
                            debug!(task = %id, letter = i, "paused");
                            return Ok(Outcome::Paused);
                        }
                    }
                    trace!(task = %id, letter = i, "{:?}", letter);
                    render::animate_letter(&*task.target, letter, opts.duration_per_letter, opts.animation_kind);
                    self.inner.delay.wait(opts.wait_after_letter).await;
                }
            }
        }

        if let Some(action) = &opts.blocking_completion_action {
            self.run_action(action).await?;
        }
        Ok(Outcome::Finished)
    }

    async fn run_action(&self, action: &Action) -> Result<()> {
        match action {
            Action::Wait(duration) => {
                self.inner.delay.wait(*duration).await;
                Ok(())
            }
            Action::Run(f) => f().await.map_err(Error::Action),
        }
    }
}
