//! Document model: texts, paragraphs, insets, fonts and change tracking.

pub mod change;
pub mod changes;
pub mod document;
pub mod font;
pub mod inset;
pub mod paragraph;
pub mod settings;
pub mod text;

pub use change::{AuthorId, Change, ChangeKind};
pub use changes::{ChangeSpan, Changes};
pub use document::Document;
pub use font::{Font, FontFamily, FontSeries, FontShape, FontSize};
pub use inset::{Inset, InsetKind};
pub use paragraph::{Paragraph, Unit, DEFAULT_LAYOUT};
pub use settings::Settings;
pub use text::Text;
