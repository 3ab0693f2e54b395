use crate::errors::CompareError;
use crate::model::font::Font;
use crate::model::paragraph::{Paragraph, DEFAULT_LAYOUT};
use serde::{Deserialize, Serialize};

/// An ordered list of paragraphs
///
/// Loaded and constructed texts always hold at least one paragraph. A text
/// may be transiently empty between [`Text::clear`] and the next append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TextData")]
pub struct Text {
    paragraphs: Vec<Paragraph>,
}

#[derive(Deserialize)]
struct TextData {
    paragraphs: Vec<Paragraph>,
}

impl TryFrom<TextData> for Text {
    type Error = CompareError;

    fn try_from(data: TextData) -> Result<Self, Self::Error> {
        if data.paragraphs.is_empty() {
            return Err(CompareError::InvalidDocument {
                reason: "a text needs at least one paragraph".to_string(),
            });
        }
        Ok(Self {
            paragraphs: data.paragraphs,
        })
    }
}

impl Default for Text {
    fn default() -> Self {
        Self {
            paragraphs: vec![Paragraph::default()],
        }
    }
}

impl From<Vec<Paragraph>> for Text {
    fn from(paragraphs: Vec<Paragraph>) -> Self {
        if paragraphs.is_empty() {
            return Self::default();
        }
        Self { paragraphs }
    }
}

impl Text {
    /// One paragraph per line of `s`, in the default layout and font.
    pub fn from_plain(s: &str) -> Self {
        let paragraphs = s
            .split('\n')
            .map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                Paragraph::from_str_with_font(DEFAULT_LAYOUT, line, Font::default())
            })
            .collect::<Vec<_>>();
        Self::from(paragraphs)
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn paragraph(&self, pit: usize) -> Option<&Paragraph> {
        self.paragraphs.get(pit)
    }

    pub fn paragraph_mut(&mut self, pit: usize) -> Option<&mut Paragraph> {
        self.paragraphs.get_mut(pit)
    }

    pub fn last_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        self.paragraphs.last_mut()
    }

    /// Remove every paragraph.
    pub fn clear(&mut self) {
        self.paragraphs.clear();
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn append(&mut self, paragraphs: Vec<Paragraph>) {
        self.paragraphs.extend(paragraphs);
    }

    /// Merge paragraph `pit + 1` into paragraph `pit`.
    ///
    /// # Panics
    ///
    /// Panics if `pit + 1` is not a paragraph index.
    pub fn merge_paragraph(&mut self, pit: usize) {
        assert!(
            pit + 1 < self.paragraphs.len(),
            "cannot merge paragraph {pit} of {}",
            self.paragraphs.len()
        );
        let next = self.paragraphs.remove(pit + 1);
        self.paragraphs[pit].merge(next);
    }

    /// Lines of characters, insets omitted.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of atomic units: all units plus one break between paragraphs.
    pub fn unit_count(&self) -> usize {
        let units: usize = self.paragraphs.iter().map(Paragraph::size).sum();
        units + self.paragraphs.len().saturating_sub(1)
    }

    pub fn is_changed(&self) -> bool {
        self.paragraphs.iter().any(Paragraph::is_changed)
    }
}
