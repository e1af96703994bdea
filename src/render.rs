//! Getting one letter onto a surface.

use std::time::Duration;

use crate::{surface::Surface, task::AnimationKind};

/// Apply a single letter to `surface`: appended as-is for [`AnimationKind::None`], decorated otherwise.
///
/// Never waits on the decoration's transition; `duration` is only passed along.
pub fn animate_letter(surface: &dyn Surface, letter: &str, duration: Duration, kind: AnimationKind) {
    match kind {
        AnimationKind::None => surface.append(letter),
        kind => surface.decorate(letter, kind, duration),
    }
}

#[cfg(test)]
mod render_test {
    use std::time::Duration;

    use super::animate_letter;
    use crate::{surface::TextSurface, task::AnimationKind};

    #[test]
    fn none_appends_plainly() {
        let s = TextSurface::new();
        animate_letter(&*s, "x", Duration::from_millis(50), AnimationKind::None);
        assert_eq!(s.text(), "x");
        assert!(s.decorated().is_empty());
    }

    #[test]
    fn others_decorate() {
        let s = TextSurface::new();
        animate_letter(&*s, "x", Duration::from_millis(80), AnimationKind::FadeInTop);
        assert_eq!(s.text(), "x");
        let deco = s.decorated();
        assert_eq!(deco.len(), 1);
        assert_eq!(deco[0].kind, AnimationKind::FadeInTop);
        assert_eq!(deco[0].duration, Duration::from_millis(80));
    }
}
