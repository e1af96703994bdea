//! Plays a cutscene script in the terminal. Pass a script path, or get the built-in one.
//!
//! `p`/space pauses and resumes, `q`/escape quits.

use std::{collections::HashMap, future::Future, process, rc::Rc};

use crossterm::event::KeyCode;
use cutscene::{
    surface::term::{TermSurface, Terminal},
    Performer, Result, Script, Surface,
};
use futures::{
    channel::mpsc,
    future::{self, Either, FutureExt},
    StreamExt,
};
use tokio::task::{self, LocalSet};

const BUILTIN: &str = include_str!("../../demos/intro.json");

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = LocalSet::new().run_until(run()).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Run a future that plays the queue, reporting back once it errors or leaves nothing queued.
fn drive(
    perf: &Performer,
    fut: impl Future<Output = Result<()>> + 'static,
    done: &mpsc::UnboundedSender<Result<()>>,
) {
    let (perf, done) = (perf.clone(), done.clone());
    task::spawn_local(async move {
        let res = fut.await;
        if res.is_err() || perf.is_empty() {
            let _ = done.unbounded_send(res);
        }
    });
}

async fn run() -> Result<()> {
    let script = match std::env::args().nth(1) {
        Some(path) => Script::load(path)?,
        None => Script::from_json(BUILTIN)?,
    };

    let term = Terminal::enter()?;
    let surfaces: HashMap<String, Rc<dyn Surface>> = script
        .surfaces
        .iter()
        .map(|(name, r)| {
            let surface: Rc<dyn Surface> = Rc::new(TermSurface::new((r.x, r.y), r.width));
            (name.clone(), surface)
        })
        .collect();
    let perf = Performer::timed();

    let (done_s, mut done_r) = mpsc::unbounded();
    drive(&perf, perf.batch(script.tasks(&surfaces)?), &done_s);

    let mut keys = term.keys();
    let controls = async {
        while let Some(key) = keys.next().await {
            match key {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('p') | KeyCode::Char(' ') => {
                    if perf.is_paused() {
                        drive(&perf, perf.unpause(), &done_s);
                    } else {
                        perf.pause();
                    }
                }
                _ => (),
            }
        }
    };

    let res = match future::select(controls.boxed_local(), done_r.next()).await {
        Either::Left(((), _)) => Ok(()),
        Either::Right((finished, _)) => finished.unwrap_or(Ok(())),
    };
    drop(term);
    res
}
