//! Human-readable rendering of a tracked comparison result.

use crate::model::{ChangeKind, Document, Text, Unit};
use serde::Serialize;

/// Unit counts per tracking state, inset interiors included
///
/// Paragraph breaks count as units; the end of each text does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChangeStats {
    pub unchanged: usize,
    pub inserted: usize,
    pub deleted: usize,
}

impl ChangeStats {
    pub fn collect(document: &Document) -> Self {
        Self::collect_text(&document.text)
    }

    pub fn collect_text(text: &Text) -> Self {
        let mut stats = Self::default();
        stats.add_text(text);
        stats
    }

    fn add_text(&mut self, text: &Text) {
        for (pit, paragraph) in text.paragraphs().iter().enumerate() {
            let tracked = if pit + 1 == text.len() {
                paragraph.size()
            } else {
                paragraph.size() + 1
            };
            for pos in 0..tracked {
                match paragraph.lookup_change(pos).kind {
                    ChangeKind::Unchanged => self.unchanged += 1,
                    ChangeKind::Inserted => self.inserted += 1,
                    ChangeKind::Deleted => self.deleted += 1,
                }
                if let Some(inset) = paragraph.inset_at(pos) {
                    self.add_text(inset.text());
                }
            }
        }
    }

    pub fn total(&self) -> usize {
        self.unchanged + self.inserted + self.deleted
    }

    pub fn is_identical(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

/// Render `document` with inline change markers.
///
/// Inserted runs are wrapped as `{+...+}` and deleted runs as `[-...-]`.
/// Unchanged paragraph breaks become newlines; tracked ones are shown as `¶`.
/// Insets render as `\kind{...}` around their own rendered text.
pub fn render_tracked(document: &Document) -> String {
    let mut out = String::new();
    render_text(&document.text, &mut out);
    out
}

fn open(kind: ChangeKind, out: &mut String) {
    match kind {
        ChangeKind::Unchanged => {}
        ChangeKind::Inserted => out.push_str("{+"),
        ChangeKind::Deleted => out.push_str("[-"),
    }
}

fn close(kind: ChangeKind, out: &mut String) {
    match kind {
        ChangeKind::Unchanged => {}
        ChangeKind::Inserted => out.push_str("+}"),
        ChangeKind::Deleted => out.push_str("-]"),
    }
}

fn render_text(text: &Text, out: &mut String) {
    let mut current = ChangeKind::Unchanged;
    for (pit, paragraph) in text.paragraphs().iter().enumerate() {
        let last = pit + 1 == text.len();
        for pos in 0..=paragraph.size() {
            if last && pos == paragraph.size() {
                break;
            }
            let kind = paragraph.lookup_change(pos).kind;
            if kind != current {
                close(current, out);
                open(kind, out);
                current = kind;
            }
            match paragraph.unit_at(pos) {
                Some(Unit::Char { ch, .. }) => out.push(*ch),
                Some(Unit::Inset(inset)) => {
                    out.push('\\');
                    out.push_str(inset.kind().name());
                    out.push('{');
                    render_text(inset.text(), out);
                    out.push('}');
                }
                None if kind.is_unchanged() => out.push('\n'),
                None => out.push('¶'),
            }
        }
    }
    close(current, out);
}

/// One-line summary of `stats`.
pub fn render_stats(stats: &ChangeStats) -> String {
    if stats.is_identical() {
        return format!("identical ({} units)", stats.unchanged);
    }
    format!(
        "{} unchanged, {} inserted, {} deleted",
        stats.unchanged, stats.inserted, stats.deleted
    )
}
