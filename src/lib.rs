//! Typewriter-style cutscenes: text typed into surfaces one letter at a time, one task after another.
//!
//! There are three pieces to know about.
//!
//! The first is [`Performer`]. You hand it [`Task`]s, either one at a time with [`Performer::perform`] or several at
//! once with [`Performer::batch`], and it plays them strictly in order, pausing and resuming at letter granularity
//! with [`Performer::pause`] and [`Performer::unpause`].
//!
//! The second is [`Surface`], where the text actually goes. [`TextSurface`] just keeps it in memory; with the
//! `sys_cli` feature, `surface::term::TermSurface` draws into a region of the terminal.
//!
//! The third is [`Delay`], which decides how waiting works. [`TimerDelay`] waits in real time, [`InstantDelay`]
//! doesn't wait at all, and [`ManualDelay`] waits until you say so.
//!
//! Everything is single-threaded: drive the futures on one thread, e.g. with `futures::executor::LocalPool`, or a
//! tokio `LocalSet` on a current-thread runtime when waiting with [`TimerDelay`].
//!
//! # Features
//!
//! - `sys_cli`: crossterm terminal surfaces, and the `cutscene-demo` binary.

mod error;
mod util;

pub mod delay;
pub mod performer;
pub mod render;
pub mod script;
pub mod surface;
pub mod task;

pub use crate::{
    delay::{Delay, InstantDelay, ManualDelay, TimerDelay},
    error::{ActionError, Error, Result},
    performer::{Cursor, Performer},
    script::Script,
    surface::{Surface, TextSurface},
    task::{Action, AnimationKind, Task, TaskId, TaskOptions, DEFAULT_OPTIONS},
};
