use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    #[default]
    Roman,
    Sans,
    Typewriter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSeries {
    #[default]
    Medium,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontShape {
    #[default]
    Upright,
    Italic,
    Slanted,
    SmallCaps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
    Huge,
}

/// Fully resolved font of one character
///
/// Two characters compare equal only when every attribute matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Font {
    #[serde(default)]
    pub family: FontFamily,
    #[serde(default)]
    pub series: FontSeries,
    #[serde(default)]
    pub shape: FontShape,
    #[serde(default)]
    pub size: FontSize,
}

impl Font {
    pub fn bold() -> Self {
        Self {
            series: FontSeries::Bold,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            shape: FontShape::Italic,
            ..Self::default()
        }
    }

    pub fn typewriter() -> Self {
        Self {
            family: FontFamily::Typewriter,
            ..Self::default()
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} {:?} {:?}",
            self.family, self.series, self.shape, self.size
        )
    }
}
