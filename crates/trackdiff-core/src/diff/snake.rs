//! Runs of pairwise-equal units ("snakes") along a diagonal of the edit graph.

use crate::cursor::{DocPair, RangePair};
use crate::diff::oracle::units_equal;

/// Advance `start` while both sides are inside `bounds` and their units
/// match. Returns the first pair that differs or touches a range end.
pub fn extend_forward<'a>(mut start: DocPair<'a>, bounds: &RangePair<'a>) -> DocPair<'a> {
    while start.old < bounds.old.to
        && start.new < bounds.new.to
        && units_equal(&start.old, &start.new)
    {
        start.step_forward();
    }
    start
}

/// Move `end` backward while the units just before it match, never crossing
/// `bounds.from()`.
pub fn extend_backward<'a>(mut end: DocPair<'a>, bounds: &RangePair<'a>) -> DocPair<'a> {
    while end.old > bounds.old.from && end.new > bounds.new.from {
        let prev = DocPair::new(end.old.backward(), end.new.backward());
        if !units_equal(&prev.old, &prev.new) {
            break;
        }
        end = prev;
    }
    end
}
