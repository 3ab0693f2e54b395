use crate::model::AuthorId;
use serde::{Deserialize, Serialize};

/// Options of one comparison run
///
/// Deserializable from a configuration file; missing keys take their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Copy document settings from the new document (`true`) or the old one.
    pub settings_from_new: bool,
    /// Author recorded on inserted and deleted units.
    pub author: AuthorId,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            settings_from_new: true,
            author: AuthorId::default(),
        }
    }
}

impl CompareOptions {
    pub fn with_author(mut self, author: AuthorId) -> Self {
        self.author = author;
        self
    }

    pub fn with_settings_from_new(mut self, from_new: bool) -> Self {
        self.settings_from_new = from_new;
        self
    }
}
