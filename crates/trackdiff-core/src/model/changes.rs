//! Per-paragraph change-tracking map.
//!
//! A [`Changes`] map stores one [`Change`] for every position of a paragraph
//! as a sorted list of half-open spans. Two invariants hold after every
//! mutation:
//!
//! - the spans partition `[0, len)` exactly (no gaps, no overlaps, no empty spans)
//! - no two adjacent spans carry similar changes
//!
//! Positions are paragraph offsets; a paragraph of `n` units is tracked by a
//! map of length `n + 1`, the last position being its end marker.
//!
//! Out-of-range positions are programming errors and panic.

use crate::errors::CompareError;
use crate::model::change::{Change, ChangeKind};
use serde::{Deserialize, Serialize};

/// One tracked span `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSpan {
    pub start: usize,
    pub end: usize,
    pub change: Change,
}

impl ChangeSpan {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChangeSpan>", into = "Vec<ChangeSpan>")]
pub struct Changes {
    spans: Vec<ChangeSpan>,
}

impl Changes {
    /// An empty map (length 0).
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// A map of `len` positions all carrying `change`.
    pub fn with_len(len: usize, change: Change) -> Self {
        let mut changes = Self::new();
        if len > 0 {
            changes.spans.push(ChangeSpan {
                start: 0,
                end: len,
                change,
            });
        }
        changes
    }

    /// Number of tracked positions
    pub fn len(&self) -> usize {
        self.spans.last().map_or(0, |span| span.end)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[ChangeSpan] {
        &self.spans
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeSpan> {
        self.spans.iter()
    }

    fn span_index(&self, pos: usize) -> usize {
        self.spans.partition_point(|span| span.end <= pos)
    }

    /// The change tracked at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn lookup(&self, pos: usize) -> &Change {
        let len = self.len();
        assert!(pos < len, "change lookup at {pos} outside map of length {len}");
        &self.spans[self.span_index(pos)].change
    }

    /// Track `change` at the single position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn set(&mut self, change: Change, pos: usize) {
        self.set_range(change, pos, pos + 1);
    }

    /// Track `change` over `[start, end)`, splitting the spans it overlaps.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len()`.
    pub fn set_range(&mut self, change: Change, start: usize, end: usize) {
        let len = self.len();
        assert!(
            start <= end && end <= len,
            "change range [{start}, {end}) outside map of length {len}"
        );
        if start == end {
            return;
        }

        let mut spans = Vec::with_capacity(self.spans.len() + 2);
        let mut placed = false;
        for span in &self.spans {
            if span.end <= start {
                spans.push(*span);
                continue;
            }
            if span.start < start {
                spans.push(ChangeSpan {
                    end: start,
                    ..*span
                });
            }
            if !placed {
                spans.push(ChangeSpan { start, end, change });
                placed = true;
            }
            if span.end > end {
                spans.push(ChangeSpan {
                    start: span.start.max(end),
                    ..*span
                });
            }
        }
        self.spans = spans;
        self.coalesce();
    }

    /// Remove the unit at `pos`; every later position shifts down by one.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn erase(&mut self, pos: usize) {
        let len = self.len();
        assert!(pos < len, "change erase at {pos} outside map of length {len}");

        let idx = self.span_index(pos);
        self.spans[idx].end -= 1;
        for span in &mut self.spans[idx + 1..] {
            span.start -= 1;
            span.end -= 1;
        }
        if self.spans[idx].len() == 0 {
            self.spans.remove(idx);
            if idx > 0 && idx < self.spans.len() {
                self.merge_pair(idx - 1);
            }
        }
    }

    /// Remove `[start, end)`; every later position shifts down by `end - start`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len()`.
    pub fn erase_range(&mut self, start: usize, end: usize) {
        let len = self.len();
        assert!(
            start <= end && end <= len,
            "change erase [{start}, {end}) outside map of length {len}"
        );
        let removed = end - start;
        if removed == 0 {
            return;
        }

        let shift = |pos: usize| {
            if pos <= start {
                pos
            } else if pos >= end {
                pos - removed
            } else {
                start
            }
        };
        self.spans = self
            .spans
            .iter()
            .map(|span| ChangeSpan {
                start: shift(span.start),
                end: shift(span.end),
                change: span.change,
            })
            .filter(|span| span.len() > 0)
            .collect();
        self.coalesce();
    }

    /// Insert one unit tracked as `change` at `pos` (`pos <= len()`).
    ///
    /// A similar neighbouring span absorbs the new unit and keeps its own
    /// record, so inserting and then erasing the same position restores the
    /// map exactly.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`.
    pub fn insert(&mut self, change: Change, pos: usize) {
        let len = self.len();
        assert!(pos <= len, "change insert at {pos} outside map of length {len}");

        let idx = self.span_index(pos);
        let inside = idx < self.spans.len() && self.spans[idx].start < pos;
        let target = if inside && self.spans[idx].change.is_similar_to(&change) {
            idx
        } else if inside {
            let tail = ChangeSpan {
                start: pos,
                ..self.spans[idx]
            };
            self.spans[idx].end = pos;
            self.spans.insert(idx + 1, tail);
            self.spans.insert(
                idx + 1,
                ChangeSpan {
                    start: pos,
                    end: pos,
                    change,
                },
            );
            idx + 1
        } else if idx > 0 && self.spans[idx - 1].change.is_similar_to(&change) {
            idx - 1
        } else if idx < self.spans.len() && self.spans[idx].change.is_similar_to(&change) {
            idx
        } else {
            self.spans.insert(
                idx,
                ChangeSpan {
                    start: pos,
                    end: pos,
                    change,
                },
            );
            idx
        };

        self.spans[target].end += 1;
        for span in &mut self.spans[target + 1..] {
            span.start += 1;
            span.end += 1;
        }
    }

    /// Concatenate `other` after this map.
    pub fn append(&mut self, other: &Changes) {
        let offset = self.len();
        let seam = self.spans.len();
        self.spans.extend(other.spans.iter().map(|span| ChangeSpan {
            start: span.start + offset,
            end: span.end + offset,
            change: span.change,
        }));
        if seam > 0 && seam < self.spans.len() {
            self.merge_pair(seam - 1);
        }
    }

    /// Whether any position carries an insertion or deletion.
    pub fn is_changed(&self) -> bool {
        self.spans.iter().any(|span| !span.change.is_unchanged())
    }

    /// Whether any position in `[start, end)` carries an insertion or deletion.
    pub fn is_changed_in(&self, start: usize, end: usize) -> bool {
        self.spans
            .iter()
            .any(|span| span.start < end && start < span.end && !span.change.is_unchanged())
    }

    /// Whether every position in the non-empty range `[start, end)` is deleted.
    pub fn is_deleted(&self, start: usize, end: usize) -> bool {
        if start >= end || end > self.len() {
            return false;
        }
        self.spans
            .iter()
            .filter(|span| span.start < end && start < span.end)
            .all(|span| span.change.kind == ChangeKind::Deleted)
    }

    /// Merge `spans[idx]` and `spans[idx + 1]` if similar, keeping the later timestamp.
    fn merge_pair(&mut self, idx: usize) {
        if !self.spans[idx].change.is_similar_to(&self.spans[idx + 1].change) {
            return;
        }
        let next = self.spans.remove(idx + 1);
        let span = &mut self.spans[idx];
        span.end = next.end;
        if next.change.timestamp > span.change.timestamp {
            span.change = next.change;
        }
    }

    fn coalesce(&mut self) {
        let mut idx = 0;
        while idx + 1 < self.spans.len() {
            if self.spans[idx].change.is_similar_to(&self.spans[idx + 1].change) {
                self.merge_pair(idx);
            } else {
                idx += 1;
            }
        }
    }
}

impl TryFrom<Vec<ChangeSpan>> for Changes {
    type Error = CompareError;

    fn try_from(spans: Vec<ChangeSpan>) -> Result<Self, Self::Error> {
        let mut expected = 0;
        for span in &spans {
            if span.start != expected {
                return Err(CompareError::InvalidDocument {
                    reason: format!(
                        "change spans must be contiguous: expected start {}, found {}",
                        expected, span.start
                    ),
                });
            }
            if span.end <= span.start {
                return Err(CompareError::InvalidDocument {
                    reason: format!("empty change span at {}", span.start),
                });
            }
            expected = span.end;
        }
        let mut changes = Changes { spans };
        changes.coalesce();
        Ok(changes)
    }
}

impl From<Changes> for Vec<ChangeSpan> {
    fn from(changes: Changes) -> Self {
        changes.spans
    }
}
