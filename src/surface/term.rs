//! A [`Surface`] drawing straight into a terminal region, via crossterm.

use std::{
    cell::Cell,
    io::{self, Write},
    thread,
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self as ct, KeyCode},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::channel::mpsc;

use super::{Surface, Wrap};
use crate::task::AnimationKind;

fn init_term() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, DisableLineWrap, Hide, Clear(ClearType::All))?;
    Ok(())
}

fn clean_term() -> io::Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), Show, EnableLineWrap, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Holds the terminal in raw mode on the alternate screen for as long as it's alive.
pub struct Terminal(());

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        init_term()?;
        std::panic::set_hook(Box::new(|i| {
            let _ = clean_term();
            println!("{}", i);
        }));
        Ok(Self(()))
    }

    /// The terminal's size, in columns and rows.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size().map_err(Into::into)
    }

    /// Start forwarding key presses from a background thread.
    ///
    /// The thread stops on its own shortly after the receiver is dropped.
    pub fn keys(&self) -> mpsc::UnboundedReceiver<KeyCode> {
        let (send, recv) = mpsc::unbounded();
        thread::spawn(move || {
            while !send.is_closed() {
                match ct::poll(Duration::from_millis(100)) {
                    Ok(false) => continue,
                    Ok(true) => (),
                    Err(e) => {
                        tracing::warn!("polling terminal input: {}", e);
                        return;
                    }
                }
                match ct::read() {
                    Ok(ct::Event::Key(ct::KeyEvent { code, .. })) => {
                        if send.unbounded_send(code).is_err() {
                            return;
                        }
                    }
                    Ok(_) => (),
                    Err(e) => {
                        tracing::warn!("reading terminal input: {}", e);
                        return;
                    }
                }
            }
        });
        recv
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = std::panic::take_hook();
        if let Err(e) = clean_term() {
            tracing::warn!("failed to clean up terminal: {}", e);
        }
    }
}

/// A rectangular region of the terminal, `width` columns wide, that letters fill left to right and then wrap.
///
/// See [`Wrap`] for how wide letters are placed.
pub struct TermSurface {
    origin: (u16, u16),
    width: u16,
    wrap: Cell<Wrap>,
}

impl TermSurface {
    pub fn new(origin: (u16, u16), width: u16) -> Self {
        Self {
            origin,
            width: width.max(1),
            wrap: Cell::new(Wrap::new(width)),
        }
    }

    fn emit(&self, what: &str, f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) {
        let mut out = vec![];
        let res = f(&mut out).and_then(|_| {
            let mut stdout = io::stdout();
            stdout.write_all(&out)?;
            stdout.flush()
        });
        if let Err(e) = res {
            tracing::warn!("failed to {} at {:?}: {}", what, self.origin, e);
        }
    }

    /// Put the next letter on screen with whatever styling, then reset it.
    fn put(&self, letter: &str, color: Color, attr: Attribute) {
        let mut wrap = self.wrap.get();
        let (col, row) = wrap.place(letter);
        self.wrap.set(wrap);
        let (x, y) = (self.origin.0 + col, self.origin.1 + row);
        self.emit("write letter", |out| {
            queue!(out, MoveTo(x, y), SetForegroundColor(color), SetAttribute(attr), Print(letter))?;
            queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
            Ok(())
        });
    }
}

impl Surface for TermSurface {
    fn clear(&self) {
        let blank = " ".repeat(self.width as usize);
        let mut wrap = self.wrap.get();
        let rows = wrap.rows();
        wrap.reset();
        self.wrap.set(wrap);
        self.emit("clear", |out| {
            for row in 0..rows {
                queue!(out, MoveTo(self.origin.0, self.origin.1 + row), Print(&blank))?;
            }
            Ok(())
        });
    }

    fn append(&self, letter: &str) {
        self.put(letter, Color::Reset, Attribute::NormalIntensity);
    }

    fn decorate(&self, letter: &str, kind: AnimationKind, _duration: Duration) {
        // terminals can't tween, so each kind just gets a distinct look that sticks
        match kind {
            AnimationKind::None => self.append(letter),
            AnimationKind::FadeIn => self.put(letter, Color::Grey, Attribute::Dim),
            AnimationKind::FadeInTop => self.put(letter, Color::Grey, Attribute::Italic),
        }
    }
}
