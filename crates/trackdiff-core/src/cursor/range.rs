use crate::cursor::position::Cursor;
use crate::model::Text;

/// Half-open span `[from, to)` of one text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<'a> {
    pub from: Cursor<'a>,
    pub to: Cursor<'a>,
}

impl<'a> Range<'a> {
    pub fn new(from: Cursor<'a>, to: Cursor<'a>) -> Self {
        Self { from, to }
    }

    /// The whole of `text`.
    pub fn whole(text: &'a Text) -> Self {
        Self::new(Cursor::begin(text), Cursor::end(text))
    }

    pub fn text(&self) -> &'a Text {
        self.from.text()
    }

    pub fn is_empty(&self) -> bool {
        self.to <= self.from
    }

    /// Number of atomic units covered, paragraph breaks included.
    pub fn length(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let paragraphs = self.text().paragraphs();
        let crossed: usize = paragraphs[self.from.par()..self.to.par()]
            .iter()
            .map(|paragraph| paragraph.size() + 1)
            .sum();
        crossed + self.to.pos() - self.from.pos()
    }

    /// Every position in the range, in order.
    pub fn positions(&self) -> Vec<Cursor<'a>> {
        let mut out = Vec::with_capacity(self.length());
        let mut cursor = self.from;
        while cursor < self.to {
            out.push(cursor);
            cursor.step_forward();
        }
        out
    }
}

/// An old-side and a new-side cursor moved in lock step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocPair<'a> {
    pub old: Cursor<'a>,
    pub new: Cursor<'a>,
}

impl<'a> DocPair<'a> {
    pub fn new(old: Cursor<'a>, new: Cursor<'a>) -> Self {
        Self { old, new }
    }

    pub fn step_forward(&mut self) {
        self.old.step_forward();
        self.new.step_forward();
    }

    pub fn step_backward(&mut self) {
        self.old.step_backward();
        self.new.step_backward();
    }
}

/// Parallel old and new ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePair<'a> {
    pub old: Range<'a>,
    pub new: Range<'a>,
}

impl<'a> RangePair<'a> {
    pub fn new(old: Range<'a>, new: Range<'a>) -> Self {
        Self { old, new }
    }

    /// The pair of ranges spanning `from` to `to` on both sides.
    pub fn between(from: DocPair<'a>, to: DocPair<'a>) -> Self {
        Self {
            old: Range::new(from.old, to.old),
            new: Range::new(from.new, to.new),
        }
    }

    /// Both texts in full.
    pub fn whole(old: &'a Text, new: &'a Text) -> Self {
        Self::new(Range::whole(old), Range::whole(new))
    }

    pub fn from(&self) -> DocPair<'a> {
        DocPair::new(self.old.from, self.new.from)
    }

    pub fn to(&self) -> DocPair<'a> {
        DocPair::new(self.old.to, self.new.to)
    }

    pub fn is_empty(&self) -> bool {
        self.old.is_empty() && self.new.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_breaks_but_not_the_final_one() {
        let text = Text::from_plain("abcde\nfgh\nij");
        assert_eq!(Range::whole(&text).length(), 12);

        let range = Range::new(Cursor::new(&text, 0, 2), Cursor::new(&text, 1, 3));
        // "cde", break, "fgh"
        assert_eq!(range.length(), 7);
        assert_eq!(range.positions().len(), 7);
    }

    #[test]
    fn test_empty_when_to_not_after_from() {
        let text = Text::from_plain("abc");
        let a = Cursor::new(&text, 0, 2);
        let b = Cursor::new(&text, 0, 1);
        assert!(Range::new(a, a).is_empty());
        assert!(Range::new(a, b).is_empty());
        assert_eq!(Range::new(a, b).length(), 0);
    }

    #[test]
    fn test_doc_pair_steps_both_sides() {
        let old = Text::from_plain("ab");
        let new = Text::from_plain("x\ny");
        let mut pair = RangePair::whole(&old, &new).from();
        pair.step_forward();
        pair.step_forward();

        assert_eq!((pair.old.par(), pair.old.pos()), (0, 2));
        assert_eq!((pair.new.par(), pair.new.pos()), (1, 0));
    }
}
