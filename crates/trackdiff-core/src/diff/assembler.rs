//! Output assembly: copying ranges of the old or new text into the
//! destination with their tracking state.

use crate::cursor::{Range, RangePair};
use crate::diff::driver::Engine;
use crate::errors::Result;
use crate::model::{Change, ChangeKind, Paragraph, Text};

/// Clone the paragraphs spanned by `range`, trimmed to the range.
///
/// The last clone keeps its end marker even when the range stops before the
/// paragraph break; that marker is a placeholder dropped by the next merge.
pub fn collect(range: &Range<'_>) -> Vec<Paragraph> {
    let (from, to) = (range.from, range.to);
    let mut paragraphs = range.text().paragraphs()[from.par()..=to.par()].to_vec();
    if let Some(last) = paragraphs.last_mut() {
        let size = last.size();
        last.erase_chars(to.pos(), size);
    }
    if let Some(first) = paragraphs.first_mut() {
        first.erase_chars(0, from.pos());
    }
    paragraphs
}

/// Track `change` on every position of `paragraph`.
///
/// Inserted and deleted content is stamped through inset interiors as well.
fn stamp(paragraph: &mut Paragraph, change: Change) {
    paragraph.set_change_all(change);
    if change.is_unchanged() {
        return;
    }
    for pos in paragraph.inset_positions().collect::<Vec<_>>() {
        if let Some(inset) = paragraph.inset_at_mut(pos) {
            stamp_text(inset.text_mut(), change);
        }
    }
}

fn stamp_text(text: &mut Text, change: Change) {
    for paragraph in text.paragraphs_mut() {
        stamp(paragraph, change);
    }
    if let Some(last) = text.last_paragraph_mut() {
        let end = last.size();
        last.set_change(
            end,
            Change {
                kind: ChangeKind::Unchanged,
                ..change
            },
        );
    }
}

/// Append `paragraphs` to `dest`, joining the first onto dest's last paragraph.
fn append(dest: &mut Text, paragraphs: Vec<Paragraph>) {
    let old_len = dest.len();
    dest.append(paragraphs);
    if old_len > 0 && dest.len() > old_len {
        dest.merge_paragraph(old_len - 1);
    }
}

impl Engine {
    /// Copy `range` into `dest` with every unit tracked as `kind`.
    pub(crate) fn write(&mut self, range: &Range<'_>, kind: ChangeKind, dest: &mut Text) -> Result<()> {
        if range.is_empty() {
            return Ok(());
        }
        let change = self.change(kind);
        let mut paragraphs = collect(range);
        for paragraph in &mut paragraphs {
            stamp(paragraph, change);
        }
        let units = range.length();
        tracing::trace!(
            inset_level = self.inset_level(),
            units,
            kind = kind.as_str(),
            "write"
        );
        append(dest, paragraphs);
        self.advance(units);
        Ok(())
    }

    /// Copy a snake (pairwise-equal ranges) into `dest` as unchanged,
    /// diffing the interiors of recursively comparable insets on the way.
    pub(crate) fn process_snake(&mut self, pair: &RangePair<'_>, dest: &mut Text) -> Result<()> {
        self.check_cancel()?;
        if pair.old.is_empty() {
            return Ok(());
        }

        let from = pair.old.from;
        let mut paragraphs = collect(&pair.old);
        let mut cursor = pair.from();
        while cursor.old < pair.old.to {
            if let Some(old_inset) = cursor.old.inset() {
                if old_inset.kind().is_recursively_comparable() {
                    let new_inset = match cursor.new.inset() {
                        Some(inset) if inset.kind() == old_inset.kind() => inset,
                        _ => panic!(
                            "snake pairs inset at {:?} with a different unit at {:?}",
                            cursor.old, cursor.new
                        ),
                    };
                    let pit = cursor.old.par() - from.par();
                    let pos = if pit == 0 {
                        cursor.old.pos() - from.pos()
                    } else {
                        cursor.old.pos()
                    };
                    let Some(target) = paragraphs
                        .get_mut(pit)
                        .and_then(|paragraph| paragraph.inset_at_mut(pos))
                    else {
                        panic!("cloned snake has no inset at paragraph {pit}, position {pos}");
                    };
                    self.diff_texts(old_inset.text(), new_inset.text(), target.text_mut())?;
                }
            }
            cursor.step_forward();
        }

        let change = self.change(ChangeKind::Unchanged);
        for paragraph in &mut paragraphs {
            stamp(paragraph, change);
        }
        append(dest, paragraphs);
        self.advance(pair.old.length());
        Ok(())
    }
}
