use std::sync::Arc;
use trackdiff_core::model::{ChangeKind, Document, Font, Inset, InsetKind, Paragraph, Text, Unit};
use trackdiff_core::{AuthorId, Compare, CompareOptions};

/// Which input a tracked text is projected back onto
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

/// Build an untracked document from plain text, one paragraph per line
#[allow(dead_code)]
pub fn doc(s: &str) -> Document {
    Document::from_plain(s)
}

/// Single-paragraph document: `before`, then `inset`, then `after`
#[allow(dead_code)]
pub fn with_inset(before: &str, inset: Inset, after: &str) -> Document {
    let mut paragraph = Paragraph::default();
    paragraph.push_str(before, Font::default());
    paragraph.push_inset(inset);
    paragraph.push_str(after, Font::default());
    Document::new(Default::default(), Text::from(vec![paragraph]))
}

#[allow(dead_code)]
pub fn footnote(interior: &str) -> Inset {
    Inset::with_text(InsetKind::Footnote, Text::from_plain(interior))
}

/// Run a comparison on the calling thread and return the destination
#[allow(dead_code)]
pub fn compare(old: Document, new: Document) -> Document {
    let options = CompareOptions::default().with_author(AuthorId(1));
    let mut run = Compare::documents(Arc::new(old), Arc::new(new), options);
    assert!(run.run(), "comparison should succeed");
    run.into_dest().expect("successful run keeps its destination")
}

#[allow(dead_code)]
pub fn compare_plain(old: &str, new: &str) -> Document {
    compare(doc(old), doc(new))
}

/// Encode an untracked text: characters (with non-default fonts marked),
/// insets as `\kind{args}{interior}`, breaks as newlines.
#[allow(dead_code)]
pub fn shape(text: &Text) -> String {
    let mut out = String::new();
    for (pit, paragraph) in text.paragraphs().iter().enumerate() {
        if pit > 0 {
            out.push('\n');
        }
        for unit in paragraph.units() {
            push_unit(&mut out, unit, |inset| shape(inset.text()));
        }
    }
    out
}

/// Rebuild one side of a tracked text: old keeps unchanged and deleted units,
/// new keeps unchanged and inserted ones. Inset interiors are projected too.
#[allow(dead_code)]
pub fn project(text: &Text, side: Side) -> String {
    let dropped = match side {
        Side::Old => ChangeKind::Inserted,
        Side::New => ChangeKind::Deleted,
    };
    let mut out = String::new();
    for (pit, paragraph) in text.paragraphs().iter().enumerate() {
        for (pos, unit) in paragraph.units().iter().enumerate() {
            if paragraph.lookup_change(pos).kind != dropped {
                push_unit(&mut out, unit, |inset| project(inset.text(), side));
            }
        }
        let is_last = pit + 1 == text.len();
        if !is_last && paragraph.lookup_change(paragraph.size()).kind != dropped {
            out.push('\n');
        }
    }
    out
}

fn push_unit(out: &mut String, unit: &Unit, interior: impl Fn(&Inset) -> String) {
    match unit {
        Unit::Char { ch, font } => {
            if *font != Font::default() {
                out.push_str(&format!("<{}>", font));
            }
            out.push(*ch);
        }
        Unit::Inset(inset) => {
            out.push_str(&format!(
                "\\{}{:?}{{{}}}",
                inset.kind().name(),
                inset.args,
                interior(inset)
            ));
        }
    }
}

/// Kinds of every tracked position of a single paragraph, end marker included
#[allow(dead_code)]
pub fn kinds(paragraph: &Paragraph) -> Vec<ChangeKind> {
    (0..=paragraph.size())
        .map(|pos| paragraph.lookup_change(pos).kind)
        .collect()
}
