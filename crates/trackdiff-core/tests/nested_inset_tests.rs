//! Comparison of documents with embedded insets

mod common;

use common::{compare, doc, footnote, kinds, project, shape, with_inset, Side};
use trackdiff_core::diff::render_tracked;
use trackdiff_core::model::ChangeKind::{Deleted as D, Inserted as I, Unchanged as U};
use trackdiff_core::model::{Inset, InsetKind, Paragraph, Text};

#[test]
fn test_footnote_interior_is_diffed_in_place() {
    // GIVEN a footnote reading "foo" that becomes "food"
    let old = with_inset("see", footnote("foo"), "");
    let new = with_inset("see", footnote("food"), "");

    // WHEN compared
    let dest = compare(old, new);

    // THEN the footnote appears once and is itself unchanged
    let paragraph = dest.text.paragraph(0).unwrap();
    assert_eq!(paragraph.inset_positions().count(), 1);
    assert_eq!(kinds(paragraph), vec![U, U, U, U, U]);

    // AND its interior tracks the appended "d"
    let interior = paragraph.inset_at(3).unwrap().text();
    assert_eq!(interior.plain_text(), "food");
    assert_eq!(kinds(interior.paragraph(0).unwrap()), vec![U, U, U, I, U]);
    assert_eq!(render_tracked(&dest), "see\\footnote{foo{+d+}}");
}

#[test]
fn test_identical_footnotes_stay_untracked() {
    let old = with_inset("a", footnote("same\ntext"), "b");
    let dest = compare(old.clone(), old.clone());

    assert!(!dest.text.is_changed());
    let interior = dest.text.paragraph(0).unwrap().inset_at(1).unwrap().text();
    assert!(!interior.is_changed());
    assert_eq!(shape(&dest.text), shape(&old.text));
}

#[test]
fn test_opaque_inset_change_replaces_whole_inset() {
    // GIVEN a math inset whose content changes
    let math = |formula: &str| Inset::with_text(InsetKind::Math, Text::from_plain(formula));
    let old = with_inset("x", math("a+b"), "y");
    let new = with_inset("x", math("a-b"), "y");

    // WHEN compared
    let dest = compare(old.clone(), new.clone());

    // THEN the old inset is deleted and the new one inserted
    let paragraph = dest.text.paragraph(0).unwrap();
    assert_eq!(paragraph.inset_positions().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(kinds(paragraph), vec![U, D, I, U, U]);

    // AND their interiors carry the same state as the inset
    let deleted = paragraph.inset_at(1).unwrap().text().paragraph(0).unwrap();
    assert_eq!(kinds(deleted), vec![D, D, D, U]);
    let inserted = paragraph.inset_at(2).unwrap().text().paragraph(0).unwrap();
    assert_eq!(kinds(inserted), vec![I, I, I, U]);

    assert_eq!(project(&dest.text, Side::Old), shape(&old.text));
    assert_eq!(project(&dest.text, Side::New), shape(&new.text));
}

#[test]
fn test_inset_kind_change_is_not_recursed() {
    let old = with_inset("", footnote("body"), "");
    let new = with_inset("", Inset::with_text(InsetKind::Note, Text::from_plain("body")), "");

    let dest = compare(old, new);

    let paragraph = dest.text.paragraph(0).unwrap();
    assert_eq!(paragraph.inset_at(0).unwrap().kind(), InsetKind::Footnote);
    assert_eq!(paragraph.inset_at(1).unwrap().kind(), InsetKind::Note);
    assert_eq!(kinds(paragraph), vec![D, I, U]);
}

#[test]
fn test_inserted_footnote_is_tracked_deeply() {
    // GIVEN a footnote added at the end of a paragraph
    let old = doc("text");
    let new = with_inset("text", footnote("note one\nnote two"), "");

    // WHEN compared
    let dest = compare(old, new);

    // THEN the footnote and everything in it is inserted
    assert_eq!(
        render_tracked(&dest),
        "text{+\\footnote{{+note one¶note two+}}+}"
    );
    let interior = dest.text.paragraph(0).unwrap().inset_at(4).unwrap().text();
    assert_eq!(kinds(interior.paragraph(0).unwrap()).last(), Some(&I));
    assert_eq!(kinds(interior.paragraph(1).unwrap()).last(), Some(&U));
}

#[test]
fn test_nested_footnote_in_note_is_diffed() {
    // GIVEN a note holding a footnote, where only the inner footnote changes
    let outer = |inner: &str| {
        let mut paragraph = Paragraph::default();
        paragraph.push_str("n:", Default::default());
        paragraph.push_inset(footnote(inner));
        Inset::with_text(InsetKind::Note, Text::from(vec![paragraph]))
    };
    let old = with_inset("start ", outer("deep"), " end");
    let new = with_inset("start ", outer("deeper"), " end");

    // WHEN compared
    let dest = compare(old.clone(), new.clone());

    // THEN the change surfaces two levels down
    assert_eq!(render_tracked(&dest), "start \\note{n:\\footnote{deep{+er+}}} end");
    let top = dest.text.paragraph(0).unwrap();
    assert!(!top.is_changed());
    assert_eq!(project(&dest.text, Side::Old), shape(&old.text));
    assert_eq!(project(&dest.text, Side::New), shape(&new.text));
}

#[test]
fn test_footnote_with_new_paragraph() {
    let old = with_inset("", footnote("one"), "");
    let new = with_inset("", footnote("one\ntwo"), "");

    let dest = compare(old, new);

    let interior = dest.text.paragraph(0).unwrap().inset_at(0).unwrap().text();
    assert_eq!(interior.len(), 2);
    assert_eq!(interior.paragraph(0).unwrap().lookup_change(3).kind, I);
    assert_eq!(kinds(interior.paragraph(1).unwrap()), vec![I, I, I, U]);
}
