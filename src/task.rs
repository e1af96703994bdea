//! The units of work a [`Performer`](crate::Performer) queues up, and how each one should look.

use core::fmt;
use std::{borrow::Cow, rc::Rc, time::Duration};

use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};

use crate::{
    error::ActionError,
    surface::Surface,
    util::{abbrev_debug, setters},
};

/// Uniquely identifies a task within one [`Performer`](crate::Performer)'s lifetime.
///
/// Ids are handed out in submission order, so comparing them compares when they were queued.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TaskId(pub(crate) u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// How each letter shows up on its surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationKind {
    /// Append the letter directly, no decoration.
    #[default]
    None,
    /// Insert the letter with a fade-in transition.
    FadeIn,
    /// Insert the letter with a fade-in transition, sliding down from above.
    FadeInTop,
}

/// The closure type behind [`Action::Run`]. Performers are single-threaded, so it doesn't need to be `Send`.
pub type ActionFn = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<(), ActionError>>>;

/// Something a task blocks on, either before it starts rendering or before it's considered finished.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Wait for some duration, using the performer's own [`Delay`](crate::Delay).
    Wait(#[serde(with = "millis")] Duration),
    /// Run an arbitrary asynchronous callback to completion.
    #[serde(skip)]
    Run(ActionFn),
}

impl Action {
    /// Wrap a closure as an [`Action::Run`].
    pub fn run<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: std::future::Future<Output = Result<(), ActionError>> + 'static,
    {
        Self::Run(Rc::new(move || f().boxed_local()))
    }

    /// Wait for the given number of milliseconds.
    pub const fn wait_ms(ms: u64) -> Self {
        Self::Wait(Duration::from_millis(ms))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wait(d) => f.debug_tuple("Wait").field(d).finish(),
            Self::Run(_) => write!(f, "Run(..)"),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Wait(a), Self::Wait(b)) => a == b,
            (Self::Run(a), Self::Run(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Presentation policy for one [`Task`].
///
/// Durations are (de)serialized as integer milliseconds. Any field left out of a serialized set of options takes its
/// value from [`DEFAULT_OPTIONS`].
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskOptions {
    /// Whether to erase the surface's existing text before this task renders anything.
    pub should_clear_existing_text: bool,
    /// How long each letter's own transition should be perceived to take. Passed along to the surface; the
    /// performer doesn't wait on it.
    #[serde(with = "millis")]
    pub duration_per_letter: Duration,
    /// How long to wait after rendering each letter, before the next one.
    #[serde(with = "millis")]
    pub wait_after_letter: Duration,
    /// How each letter shows up.
    pub animation_kind: AnimationKind,
    /// Awaited before the task clears or renders anything.
    pub blocking_prepare_action: Option<Action>,
    /// Awaited after the last letter, before the task is dequeued.
    pub blocking_completion_action: Option<Action>,
}

/// The options used by any task which doesn't bring its own.
///
/// Clears existing text, appends letters undecorated at 25ms apart, then lingers for 200ms before the next task.
pub const DEFAULT_OPTIONS: TaskOptions = TaskOptions {
    should_clear_existing_text: true,
    duration_per_letter: Duration::from_millis(50),
    wait_after_letter: Duration::from_millis(25),
    animation_kind: AnimationKind::None,
    blocking_prepare_action: None,
    blocking_completion_action: Some(Action::wait_ms(200)),
};

impl Default for TaskOptions {
    fn default() -> Self {
        DEFAULT_OPTIONS
    }
}

impl TaskOptions {
    setters! {
        /// Set whether existing text gets cleared first.
        clear_existing_text(clear: bool) => should_clear_existing_text = clear,
        /// Set the per-letter transition length, in milliseconds.
        duration_per_letter(ms: u64) => duration_per_letter = Duration::from_millis(ms),
        /// Set the pause after each letter, in milliseconds.
        wait_after_letter(ms: u64) => wait_after_letter = Duration::from_millis(ms),
        /// Set the animation kind.
        animation(kind: AnimationKind) => animation_kind = kind,
        /// Block on this action before starting.
        before(action: Action) => blocking_prepare_action = Some(action),
        /// Block on this action before finishing.
        after(action: Action) => blocking_completion_action = Some(action),
        /// Finish as soon as the last letter's wait is over.
        no_completion_action => blocking_completion_action = None,
    }
}

/// One request to render (or just clear) text in one surface.
#[derive(Clone)]
pub struct Task {
    /// Where the text goes.
    pub target: Rc<dyn Surface>,
    /// The complete text to render. If `None`, the task only clears (per its options) and runs its actions.
    pub text: Option<String>,
    /// How to present it. If `None`, [`DEFAULT_OPTIONS`] is used.
    pub options: Option<TaskOptions>,
}

abbrev_debug! {
    Task;
    write text,
    ignore target,
    if options != None,
}

impl Task {
    /// A task rendering `text` into `target` with the default options.
    pub fn new(target: Rc<dyn Surface>, text: impl Into<String>) -> Self {
        Self {
            target,
            text: Some(text.into()),
            options: None,
        }
    }

    /// A task with no text, which only clears `target` (with the default options) and runs its actions.
    pub fn clear(target: Rc<dyn Surface>) -> Self {
        Self {
            target,
            text: None,
            options: None,
        }
    }

    setters! {
        /// Use these options instead of the defaults.
        options(options: TaskOptions) => options = Some(options),
    }

    /// The options this task will actually run with.
    pub fn effective_options(&self) -> Cow<'_, TaskOptions> {
        match &self.options {
            Some(options) => Cow::Borrowed(options),
            None => Cow::Owned(DEFAULT_OPTIONS),
        }
    }
}

/// `Duration` as integer milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
