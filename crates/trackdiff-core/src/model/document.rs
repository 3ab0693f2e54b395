use crate::errors::{CompareError, Result};
use crate::model::settings::Settings;
use crate::model::text::Text;
use serde::{Deserialize, Serialize};

/// A document: settings plus its top-level text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub settings: Settings,
    pub text: Text,
}

impl Document {
    pub fn new(settings: Settings, text: Text) -> Self {
        Self { settings, text }
    }

    /// A document with default settings and one paragraph per line of `s`.
    pub fn from_plain(s: &str) -> Self {
        Self::new(Settings::default(), Text::from_plain(s))
    }

    /// Parse and validate the JSON representation.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::Serialization` for malformed JSON and
    /// `CompareError::InvalidDocument` when the structure violates the model
    /// invariants (empty text, change maps not covering their paragraph).
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| {
            if e.is_data() {
                CompareError::InvalidDocument {
                    reason: e.to_string(),
                }
            } else {
                CompareError::from(e)
            }
        })
    }

    /// # Errors
    ///
    /// Returns `CompareError::Serialization` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
