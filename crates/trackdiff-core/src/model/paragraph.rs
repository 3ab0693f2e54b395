use crate::errors::CompareError;
use crate::model::change::Change;
use crate::model::changes::Changes;
use crate::model::font::Font;
use crate::model::inset::Inset;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LAYOUT: &str = "Standard";

/// One unit of paragraph content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Unit {
    Char {
        ch: char,
        #[serde(default)]
        font: Font,
    },
    Inset(Box<Inset>),
}

impl Unit {
    pub fn char(ch: char, font: Font) -> Self {
        Unit::Char { ch, font }
    }

    pub fn inset(inset: Inset) -> Self {
        Unit::Inset(Box::new(inset))
    }
}

/// A paragraph: a layout name, its units, and the change map covering every
/// unit plus the end marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParagraphData")]
pub struct Paragraph {
    layout: String,
    units: Vec<Unit>,
    changes: Changes,
}

#[derive(Deserialize)]
struct ParagraphData {
    #[serde(default = "default_layout")]
    layout: String,
    #[serde(default)]
    units: Vec<Unit>,
    #[serde(default)]
    changes: Option<Changes>,
}

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

impl TryFrom<ParagraphData> for Paragraph {
    type Error = CompareError;

    fn try_from(data: ParagraphData) -> Result<Self, Self::Error> {
        let expected = data.units.len() + 1;
        let changes = match data.changes {
            Some(changes) if changes.len() == expected => changes,
            Some(changes) => {
                return Err(CompareError::InvalidDocument {
                    reason: format!(
                        "paragraph of {} units needs {} tracked positions, found {}",
                        data.units.len(),
                        expected,
                        changes.len()
                    ),
                })
            }
            None => Changes::with_len(expected, Change::unchanged()),
        };
        Ok(Self {
            layout: data.layout,
            units: data.units,
            changes,
        })
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT)
    }
}

impl Paragraph {
    pub fn new(layout: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
            units: Vec::new(),
            changes: Changes::with_len(1, Change::unchanged()),
        }
    }

    /// A paragraph holding `s` in a single font.
    pub fn from_str_with_font(layout: impl Into<String>, s: &str, font: Font) -> Self {
        let mut paragraph = Self::new(layout);
        paragraph.push_str(s, font);
        paragraph
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: impl Into<String>) {
        self.layout = layout.into();
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Number of units, excluding the end marker
    pub fn size(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit_at(&self, pos: usize) -> Option<&Unit> {
        self.units.get(pos)
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        match self.units.get(pos) {
            Some(Unit::Char { ch, .. }) => Some(*ch),
            _ => None,
        }
    }

    pub fn font_at(&self, pos: usize) -> Option<&Font> {
        match self.units.get(pos) {
            Some(Unit::Char { font, .. }) => Some(font),
            _ => None,
        }
    }

    pub fn inset_at(&self, pos: usize) -> Option<&Inset> {
        match self.units.get(pos) {
            Some(Unit::Inset(inset)) => Some(inset),
            _ => None,
        }
    }

    pub fn inset_at_mut(&mut self, pos: usize) -> Option<&mut Inset> {
        match self.units.get_mut(pos) {
            Some(Unit::Inset(inset)) => Some(inset),
            _ => None,
        }
    }

    /// Positions holding insets, in order.
    pub fn inset_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, unit)| matches!(unit, Unit::Inset(_)))
            .map(|(pos, _)| pos)
    }

    pub fn changes(&self) -> &Changes {
        &self.changes
    }

    /// Insert `unit` at `pos`, tracked as `change`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > size()`.
    pub fn insert_unit(&mut self, pos: usize, unit: Unit, change: Change) {
        assert!(pos <= self.size(), "insert at {pos} past paragraph end");
        self.units.insert(pos, unit);
        self.changes.insert(change, pos);
    }

    pub fn insert_char(&mut self, pos: usize, ch: char, font: Font) {
        self.insert_unit(pos, Unit::char(ch, font), Change::unchanged());
    }

    pub fn insert_inset(&mut self, pos: usize, inset: Inset) {
        self.insert_unit(pos, Unit::inset(inset), Change::unchanged());
    }

    /// Append `s` one character at a time in `font`.
    pub fn push_str(&mut self, s: &str, font: Font) {
        for ch in s.chars() {
            let pos = self.size();
            self.insert_char(pos, ch, font);
        }
    }

    pub fn push_inset(&mut self, inset: Inset) {
        let pos = self.size();
        self.insert_inset(pos, inset);
    }

    /// Remove the unit at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= size()`.
    pub fn erase(&mut self, pos: usize) {
        assert!(pos < self.size(), "erase at {pos} past paragraph end");
        self.units.remove(pos);
        self.changes.erase(pos);
    }

    /// Remove the units in `[start, end)`; the end marker is never removed.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > size()`.
    pub fn erase_chars(&mut self, start: usize, end: usize) {
        assert!(
            start <= end && end <= self.size(),
            "erase [{start}, {end}) outside paragraph of size {}",
            self.size()
        );
        self.units.drain(start..end);
        self.changes.erase_range(start, end);
    }

    /// Track `change` at `pos` (`pos == size()` is the end marker).
    pub fn set_change(&mut self, pos: usize, change: Change) {
        self.changes.set(change, pos);
    }

    pub fn set_change_range(&mut self, change: Change, start: usize, end: usize) {
        self.changes.set_range(change, start, end);
    }

    /// Track `change` on every unit and the end marker.
    pub fn set_change_all(&mut self, change: Change) {
        let len = self.changes.len();
        self.changes.set_range(change, 0, len);
    }

    pub fn lookup_change(&self, pos: usize) -> &Change {
        self.changes.lookup(pos)
    }

    pub fn is_changed(&self) -> bool {
        self.changes.is_changed()
    }

    /// Join `next` onto the end of this paragraph.
    ///
    /// This paragraph's end marker is dropped; `next`'s end marker becomes the
    /// end marker of the result. The layout of `self` is kept.
    pub fn merge(&mut self, next: Paragraph) {
        let marker = self.size();
        self.changes.erase(marker);
        self.changes.append(&next.changes);
        self.units.extend(next.units);
    }

    /// The characters of this paragraph, without insets.
    pub fn plain_text(&self) -> String {
        self.units
            .iter()
            .filter_map(|unit| match unit {
                Unit::Char { ch, .. } => Some(*ch),
                Unit::Inset(_) => None,
            })
            .collect()
    }
}
