use crate::model::{Font, Inset, Paragraph, Text, Unit};
use std::cmp::Ordering;
use std::fmt;

/// What a cursor points at
#[derive(Debug, Clone, Copy)]
pub enum Atom<'a> {
    Char(char, &'a Font),
    Inset(&'a Inset),
    Break,
}

/// A position inside one [`Text`]
///
/// `pos` ranges over `0..=size` of paragraph `par`; `pos == size` is the
/// paragraph break. The break of the last paragraph is the end of the text
/// and is never dereferenced.
///
/// Cursors order by `(par, pos)`. Comparing cursors of different texts is
/// meaningless.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    text: &'a Text,
    par: usize,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a Text, par: usize, pos: usize) -> Self {
        debug_assert!(par < text.len(), "paragraph {par} outside text of {}", text.len());
        debug_assert!(pos <= text.paragraphs()[par].size());
        Self { text, par, pos }
    }

    /// The first position of `text`.
    pub fn begin(text: &'a Text) -> Self {
        Self::new(text, 0, 0)
    }

    /// The end of `text`: the break position of its last paragraph.
    pub fn end(text: &'a Text) -> Self {
        let par = text.len().saturating_sub(1);
        let pos = text.paragraph(par).map_or(0, Paragraph::size);
        Self { text, par, pos }
    }

    pub fn text(&self) -> &'a Text {
        self.text
    }

    pub fn par(&self) -> usize {
        self.par
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn paragraph(&self) -> &'a Paragraph {
        &self.text.paragraphs()[self.par]
    }

    pub fn is_break(&self) -> bool {
        self.pos == self.paragraph().size()
    }

    pub fn is_end(&self) -> bool {
        self.par + 1 == self.text.len() && self.is_break()
    }

    /// The unit under the cursor.
    pub fn atom(&self) -> Atom<'a> {
        debug_assert!(!self.is_end(), "dereferencing the end of a text");
        match self.paragraph().unit_at(self.pos) {
            Some(Unit::Char { ch, font }) => Atom::Char(*ch, font),
            Some(Unit::Inset(inset)) => Atom::Inset(inset),
            None => Atom::Break,
        }
    }

    pub fn inset(&self) -> Option<&'a Inset> {
        self.paragraph().inset_at(self.pos)
    }

    /// Advance by one unit, crossing a paragraph break into the next paragraph.
    pub fn step_forward(&mut self) {
        debug_assert!(!self.is_end(), "stepping past the end of a text");
        if self.is_break() {
            self.par += 1;
            self.pos = 0;
        } else {
            self.pos += 1;
        }
    }

    /// Move back by one unit, landing on the previous paragraph's break when
    /// leaving the start of a paragraph.
    pub fn step_backward(&mut self) {
        debug_assert!(self.par > 0 || self.pos > 0, "stepping before the start of a text");
        if self.pos > 0 {
            self.pos -= 1;
        } else {
            self.par -= 1;
            self.pos = self.paragraph().size();
        }
    }

    pub fn forward(mut self) -> Self {
        self.step_forward();
        self
    }

    pub fn backward(mut self) -> Self {
        self.step_backward();
        self
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(std::ptr::eq(self.text, other.text));
        self.par == other.par && self.pos == other.pos
    }
}

impl Eq for Cursor<'_> {}

impl PartialOrd for Cursor<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert!(std::ptr::eq(self.text, other.text));
        (self.par, self.pos).cmp(&(other.par, other.pos))
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({}:{})", self.par, self.pos)
    }
}
