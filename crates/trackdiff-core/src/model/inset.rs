use crate::model::font::Font;
use crate::model::paragraph::Unit;
use crate::model::text::Text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Closed set of embedded sub-document kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsetKind {
    Footnote,
    Marginal,
    Note,
    Branch,
    Float,
    Caption,
    Ert,
    Math,
    Graphics,
    Label,
    Reference,
    Citation,
    Hyperlink,
}

impl InsetKind {
    /// Whether the differ descends into the interior of this kind.
    ///
    /// Other kinds are compared as a whole through [`Inset::serialize`].
    pub fn is_recursively_comparable(self) -> bool {
        match self {
            InsetKind::Footnote
            | InsetKind::Marginal
            | InsetKind::Note
            | InsetKind::Branch
            | InsetKind::Float
            | InsetKind::Caption
            | InsetKind::Ert => true,
            InsetKind::Math
            | InsetKind::Graphics
            | InsetKind::Label
            | InsetKind::Reference
            | InsetKind::Citation
            | InsetKind::Hyperlink => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InsetKind::Footnote => "footnote",
            InsetKind::Marginal => "marginal",
            InsetKind::Note => "note",
            InsetKind::Branch => "branch",
            InsetKind::Float => "float",
            InsetKind::Caption => "caption",
            InsetKind::Ert => "ert",
            InsetKind::Math => "math",
            InsetKind::Graphics => "graphics",
            InsetKind::Label => "label",
            InsetKind::Reference => "reference",
            InsetKind::Citation => "citation",
            InsetKind::Hyperlink => "hyperlink",
        }
    }
}

/// An embedded sub-document: a kind, its parameters and its own text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inset {
    pub kind: InsetKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub args: BTreeMap<String, String>,
    #[serde(default)]
    pub text: Text,
}

impl Inset {
    pub fn new(kind: InsetKind) -> Self {
        Self {
            kind,
            args: BTreeMap::new(),
            text: Text::default(),
        }
    }

    pub fn with_text(kind: InsetKind, text: Text) -> Self {
        Self {
            kind,
            args: BTreeMap::new(),
            text,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> InsetKind {
        self.kind
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut Text {
        &mut self.text
    }

    /// Canonical textual form of the inset's content.
    ///
    /// Kind, arguments, layouts, characters, fonts and nested insets are
    /// written; change tracking is not. Equal content yields byte-identical
    /// output.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        let _ = writeln!(out, "\\begin_inset {}", self.kind.name());
        for (key, value) in &self.args {
            let _ = writeln!(out, "{} {:?}", key, value);
        }
        for paragraph in self.text.paragraphs() {
            let _ = writeln!(out, "\\begin_layout {}", paragraph.layout());
            let mut current: Option<Font> = None;
            for unit in paragraph.units() {
                match unit {
                    Unit::Char { ch, font } => {
                        if current != Some(*font) {
                            let _ = write!(out, "\n\\font {}\n", font);
                            current = Some(*font);
                        }
                        out.push(*ch);
                    }
                    Unit::Inset(inset) => {
                        out.push('\n');
                        inset.write_to(out);
                        current = None;
                    }
                }
            }
            out.push_str("\n\\end_layout\n");
        }
        out.push_str("\\end_inset\n");
    }
}
