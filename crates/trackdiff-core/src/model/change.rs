use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the author a change is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub u32);

impl AuthorId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracking state of a unit of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    #[default]
    Unchanged,
    Inserted,
    Deleted,
}

impl ChangeKind {
    pub fn is_unchanged(self) -> bool {
        self == ChangeKind::Unchanged
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Unchanged => "unchanged",
            ChangeKind::Inserted => "inserted",
            ChangeKind::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change record: what happened to a span of units, who did it and when
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    #[serde(default)]
    pub author: AuthorId,
    #[serde(default)]
    pub timestamp: DateTime<Utc>,
}

impl Change {
    pub fn new(kind: ChangeKind, author: AuthorId, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            author,
            timestamp,
        }
    }

    /// The neutral record carried by untouched content.
    pub fn unchanged() -> Self {
        Self::new(ChangeKind::Unchanged, AuthorId::default(), DateTime::default())
    }

    /// Two changes can share one span when kind and author agree.
    ///
    /// The timestamp is ignored.
    pub fn is_similar_to(&self, other: &Change) -> bool {
        self.kind == other.kind && self.author == other.author
    }

    pub fn is_unchanged(&self) -> bool {
        self.kind.is_unchanged()
    }
}

impl Default for Change {
    fn default() -> Self {
        Self::unchanged()
    }
}
