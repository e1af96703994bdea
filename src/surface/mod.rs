//! Where text ends up. Each backend is controlled by a feature named similarly and exports a struct implementing
//! [`Surface`]; [`TextSurface`] is always available and just keeps the text in memory.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use crate::task::AnimationKind;

#[cfg(feature = "sys_cli")]
pub mod term;
mod wrap;
pub use wrap::Wrap;

/// A place a task can render text into.
///
/// Surfaces are shared by handle (`Rc<dyn Surface>`) between the caller and every task targeting them, so all of
/// these take `&self`. They're also assumed to be infallible: a backend that can fail should log and carry on, since
/// there's nothing the performer could do about it anyway.
pub trait Surface {
    /// Erase all of the rendered text.
    fn clear(&self);

    /// Add one letter to the end of the rendered text, as-is.
    fn append(&self, letter: &str);

    /// Add one letter to the end of the rendered text, decorated with the given transition.
    ///
    /// `duration` is how long the transition should be perceived to take. It's advisory: nobody waits for it, and a
    /// surface that can't animate is free to just style the letter or even [`append`](Self::append) it.
    fn decorate(&self, letter: &str, kind: AnimationKind, duration: Duration);
}

/// A letter that went through [`Surface::decorate`] on a [`TextSurface`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Decorated {
    /// The letter itself.
    pub letter: String,
    /// The transition it was asked for.
    pub kind: AnimationKind,
    /// How long that transition was supposed to take.
    pub duration: Duration,
    /// Where in the text (in bytes) it was inserted.
    pub at: usize,
}

/// A [`Surface`] that just remembers what's been written to it.
///
/// Useful headless, and for checking what a performance did.
#[derive(Default, Debug)]
pub struct TextSurface {
    text: RefCell<String>,
    decorated: RefCell<Vec<Decorated>>,
    mutations: Cell<usize>,
}

impl TextSurface {
    /// An empty surface, ready to hand to tasks.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// A surface that already has some text in it.
    pub fn with_text(text: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            text: RefCell::new(text.into()),
            ..Default::default()
        })
    }

    /// The currently rendered text, decorated letters included.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Every decorated letter still on the surface, in the order they were inserted.
    pub fn decorated(&self) -> Vec<Decorated> {
        self.decorated.borrow().clone()
    }

    /// How many times the surface has been cleared or written to, ever.
    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    fn touch(&self) {
        self.mutations.set(self.mutations.get() + 1);
    }
}

impl Surface for TextSurface {
    fn clear(&self) {
        self.touch();
        self.text.borrow_mut().clear();
        self.decorated.borrow_mut().clear();
    }

    fn append(&self, letter: &str) {
        self.touch();
        self.text.borrow_mut().push_str(letter);
    }

    fn decorate(&self, letter: &str, kind: AnimationKind, duration: Duration) {
        self.touch();
        let mut text = self.text.borrow_mut();
        self.decorated.borrow_mut().push(Decorated {
            letter: letter.into(),
            kind,
            duration,
            at: text.len(),
        });
        text.push_str(letter);
    }
}
