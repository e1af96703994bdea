use std::borrow::Cow;

/// Whatever a caller-supplied [`Action`](crate::Action) fails with.
pub type ActionError = Box<dyn std::error::Error + 'static>;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// [`Performer::perform`](crate::Performer::perform) was asked to resume with no task given, and nothing is
    /// queued. This is a bug in the caller, not something to retry.
    #[error("asked to perform with no task given, and no tasks queued")]
    InvalidUse,
    /// A blocking prepare or completion action failed. The task it belonged to has been dropped from the queue.
    #[error("blocking action failed: {0}")]
    Action(ActionError),
    /// An `io::Error` occurred, e.g. while reading a script or talking to the terminal.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A cutscene script didn't parse.
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    /// Just directly contains an error message.
    #[error("{0}")]
    Bare(Cow<'static, str>),
}

impl From<&'static str> for Error {
    fn from(value: &'static str) -> Self {
        Self::Bare(Cow::Borrowed(value))
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self::Bare(Cow::Owned(value))
    }
}

pub type Result<T> = core::result::Result<T, Error>;
