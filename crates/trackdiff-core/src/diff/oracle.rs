use crate::cursor::{Atom, Cursor};

/// Whether the units under `old` and `new` count as equal.
///
/// Both cursors must be dereferenceable. Insets of a recursively comparable
/// kind match whenever their kinds match; their interiors are compared later
/// by descending into them. Other insets must serialize identically.
pub fn units_equal(old: &Cursor<'_>, new: &Cursor<'_>) -> bool {
    match (old.atom(), new.atom()) {
        (Atom::Break, Atom::Break) => true,
        (Atom::Char(a, font_a), Atom::Char(b, font_b)) => a == b && font_a == font_b,
        (Atom::Inset(a), Atom::Inset(b)) => {
            a.kind() == b.kind()
                && (a.kind().is_recursively_comparable() || a.serialize() == b.serialize())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Font, Inset, InsetKind, Paragraph, Text};

    fn text_of(units: impl FnOnce(&mut Paragraph)) -> Text {
        let mut paragraph = Paragraph::default();
        units(&mut paragraph);
        Text::from(vec![paragraph, Paragraph::default()])
    }

    #[test]
    fn test_chars_compare_code_point_and_font() {
        let a = text_of(|p| p.push_str("x", Font::default()));
        let b = text_of(|p| p.push_str("x", Font::default()));
        let c = text_of(|p| p.push_str("x", Font::bold()));
        let d = text_of(|p| p.push_str("y", Font::default()));

        assert!(units_equal(&Cursor::begin(&a), &Cursor::begin(&b)));
        assert!(!units_equal(&Cursor::begin(&a), &Cursor::begin(&c)));
        assert!(!units_equal(&Cursor::begin(&a), &Cursor::begin(&d)));
    }

    #[test]
    fn test_breaks_are_equal_and_never_match_content() {
        let a = text_of(|_| {});
        let b = text_of(|p| p.push_str("x", Font::default()));

        let brk = Cursor::begin(&a);
        assert!(units_equal(&brk, &brk));
        assert!(!units_equal(&brk, &Cursor::begin(&b)));
    }

    #[test]
    fn test_recursive_insets_match_optimistically() {
        let a = text_of(|p| p.push_inset(Inset::with_text(InsetKind::Footnote, Text::from_plain("one"))));
        let b = text_of(|p| p.push_inset(Inset::with_text(InsetKind::Footnote, Text::from_plain("two"))));
        let c = text_of(|p| p.push_inset(Inset::with_text(InsetKind::Note, Text::from_plain("one"))));

        assert!(units_equal(&Cursor::begin(&a), &Cursor::begin(&b)));
        assert!(!units_equal(&Cursor::begin(&a), &Cursor::begin(&c)));
    }

    #[test]
    fn test_opaque_insets_compare_serialized_form() {
        let a = text_of(|p| p.push_inset(Inset::with_text(InsetKind::Math, Text::from_plain("a+b"))));
        let b = text_of(|p| p.push_inset(Inset::with_text(InsetKind::Math, Text::from_plain("a+b"))));
        let c = text_of(|p| p.push_inset(Inset::with_text(InsetKind::Math, Text::from_plain("a-b"))));

        assert!(units_equal(&Cursor::begin(&a), &Cursor::begin(&b)));
        assert!(!units_equal(&Cursor::begin(&a), &Cursor::begin(&c)));
    }
}
