use unicode_width::UnicodeWidthStr;

/// Lays letters out left to right in a region `width` columns wide, wrapping onto the next row when one doesn't fit.
///
/// Letters take as many columns as they display as: two for most CJK and emoji, one for everything else. A letter
/// is never split across rows; if it doesn't fit in what's left of the row, the rest of the row is skipped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Wrap {
    width: usize,
    /// Cells consumed so far, counting skipped ones, as `row * width + column`.
    used: usize,
}

impl Wrap {
    pub fn new(width: u16) -> Self {
        Self {
            width: (width as usize).max(1),
            used: 0,
        }
    }

    /// Place the next letter, returning its `(column, row)` relative to the region's top-left corner.
    pub fn place(&mut self, letter: &str) -> (u16, u16) {
        // zero-width clusters still get a cell, and nothing can be wider than the region
        let cols = letter.width().clamp(1, self.width);
        let col = self.used % self.width;
        if col + cols > self.width {
            self.used += self.width - col;
        }
        let at = self.used;
        self.used += cols;
        ((at % self.width) as u16, (at / self.width) as u16)
    }

    /// How many rows have been written into, even partially.
    pub fn rows(&self) -> u16 {
        self.used.div_ceil(self.width) as u16
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}

#[cfg(test)]
mod wrap_test {
    use super::Wrap;

    fn place_all(wrap: &mut Wrap, letters: &[&str]) -> Vec<(u16, u16)> {
        letters.iter().map(|l| wrap.place(l)).collect()
    }

    #[test]
    fn narrow_letters_wrap_at_the_width() {
        let mut wrap = Wrap::new(3);
        assert_eq!(wrap.rows(), 0);
        assert_eq!(
            place_all(&mut wrap, &["a", "b", "c", "d"]),
            vec![(0, 0), (1, 0), (2, 0), (0, 1)]
        );
        assert_eq!(wrap.rows(), 2);
    }

    #[test]
    fn wide_letters_take_two_columns() {
        let mut wrap = Wrap::new(4);
        assert_eq!(
            place_all(&mut wrap, &["a", "漢", "b", "c"]),
            vec![(0, 0), (1, 0), (3, 0), (0, 1)]
        );
        assert_eq!(place_all(&mut wrap, &["👍", "d"]), vec![(1, 1), (3, 1)]);
    }

    #[test]
    fn wide_letters_never_straddle_rows() {
        let mut wrap = Wrap::new(3);
        assert_eq!(
            place_all(&mut wrap, &["a", "b", "漢", "c"]),
            vec![(0, 0), (1, 0), (0, 1), (2, 1)]
        );
        assert_eq!(wrap.rows(), 2);
    }

    #[test]
    fn letters_wider_than_the_region_are_squeezed() {
        let mut wrap = Wrap::new(1);
        assert_eq!(place_all(&mut wrap, &["漢", "a"]), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn combining_marks_stay_one_letter() {
        let mut wrap = Wrap::new(5);
        assert_eq!(place_all(&mut wrap, &["e\u{301}", "x"]), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn reset_starts_over() {
        let mut wrap = Wrap::new(2);
        place_all(&mut wrap, &["a", "b", "c"]);
        assert_eq!(wrap.rows(), 2);
        wrap.reset();
        assert_eq!(wrap.rows(), 0);
        assert_eq!(wrap.place("z"), (0, 0));
    }

    #[test]
    fn zero_width_regions_hold_one_column() {
        let mut wrap = Wrap::new(0);
        assert_eq!(place_all(&mut wrap, &["a", "b"]), vec![(0, 0), (0, 1)]);
    }
}
