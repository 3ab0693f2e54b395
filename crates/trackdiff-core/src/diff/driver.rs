//! Divide-and-conquer diff driver.
//!
//! [`Engine::diff_texts`] walks two texts with the bisector, writing every
//! unit of both into a destination text with its tracking state. Inset
//! interiors found inside matching snakes are compared by re-entering
//! `diff_texts` on the inset texts, with the cloned destination inset as the
//! target.
//!
//! ## Logging Ownership
//!
//! The driver only emits `debug`/`trace` events. Start, end and error events
//! of a run belong to [`Compare::run`](crate::compare::Compare::run).

use crate::cursor::RangePair;
use crate::diff::bisect::{bisect, Bisection, MiddleSnake};
use crate::diff::snake::{extend_backward, extend_forward};
use crate::errors::{CompareError, Result};
use crate::model::{AuthorId, Change, ChangeKind, Paragraph, Text, DEFAULT_LAYOUT};
use crate::progress::{CancelToken, CompareEvent, EventSink};
use chrono::{DateTime, Utc};

/// State of one comparison run
pub struct Engine {
    cancel: CancelToken,
    events: EventSink,
    author: AuthorId,
    timestamp: DateTime<Utc>,
    /// Nesting of bisection splits, across inset boundaries
    depth: usize,
    /// 1 while writing the top-level text, +1 per inset entered
    inset_level: usize,
    edit_len: usize,
    units_written: usize,
}

impl Engine {
    /// A new engine stamping changes with `author` and the current time.
    pub fn new(cancel: CancelToken, events: EventSink, author: AuthorId) -> Self {
        Self::with_timestamp(cancel, events, author, Utc::now())
    }

    pub fn with_timestamp(
        cancel: CancelToken,
        events: EventSink,
        author: AuthorId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            cancel,
            events,
            author,
            timestamp,
            depth: 0,
            inset_level: 0,
            edit_len: 0,
            units_written: 0,
        }
    }

    /// Edit-script length of the top-level texts (0 if they were identical).
    pub fn edit_len(&self) -> usize {
        self.edit_len
    }

    /// Units written into the top-level destination text.
    pub fn units_written(&self) -> usize {
        self.units_written
    }

    /// Compare `old` with `new`, replacing the content of `dest` with the
    /// tracked result.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::Aborted` if the cancel token was set during the
    /// run. `dest` is then only partially written.
    pub fn diff_texts(&mut self, old: &Text, new: &Text, dest: &mut Text) -> Result<()> {
        self.inset_level += 1;
        let result = self.diff_texts_at_level(old, new, dest);
        self.inset_level -= 1;
        result
    }

    fn diff_texts_at_level(&mut self, old: &Text, new: &Text, dest: &mut Text) -> Result<()> {
        tracing::debug!(
            inset_level = self.inset_level,
            old_paragraphs = old.len(),
            new_paragraphs = new.len(),
            "diffing texts"
        );
        self.check_cancel()?;
        dest.clear();

        // Common head and tail are written as snakes so that every range
        // handed to the bisector starts and ends on a difference.
        let whole = RangePair::whole(old, new);
        let head_end = extend_forward(whole.from(), &whole);
        let rest = RangePair::between(head_end, whole.to());
        let tail_start = extend_backward(whole.to(), &rest);

        let core = RangePair::between(head_end, tail_start);
        let bisection = (!core.old.is_empty() && !core.new.is_empty()).then(|| bisect(&core));
        if self.inset_level == 1 {
            let trivial = core.old.length() + core.new.length();
            self.edit_len = bisection.map_or(trivial, |b| b.edit_len);
            self.events.send(CompareEvent::ProgressMax(self.edit_len));
        }

        self.process_snake(&RangePair::between(whole.from(), head_end), dest)?;
        match bisection {
            Some(bisection) => self.diff_bisected(&core, bisection, dest)?,
            None => self.diff_part(&core, dest)?,
        }
        self.process_snake(&RangePair::between(tail_start, whole.to()), dest)?;

        if dest.is_empty() {
            let layout = old.paragraph(0).map_or(DEFAULT_LAYOUT, Paragraph::layout);
            dest.push(Paragraph::new(layout));
        }
        if let Some(last) = dest.last_paragraph_mut() {
            let end = last.size();
            last.set_change(end, self.change(ChangeKind::Unchanged));
        }
        Ok(())
    }

    pub(crate) fn check_cancel(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(CompareError::Aborted);
        }
        Ok(())
    }

    fn diff_i(&mut self, pair: &RangePair<'_>, dest: &mut Text) -> Result<()> {
        let bisection = bisect(pair);
        self.diff_bisected(pair, bisection, dest)
    }

    fn diff_bisected(
        &mut self,
        pair: &RangePair<'_>,
        bisection: Bisection<'_>,
        dest: &mut Text,
    ) -> Result<()> {
        self.check_cancel()?;
        self.depth += 1;
        tracing::trace!(
            depth = self.depth,
            inset_level = self.inset_level,
            edit_len = bisection.edit_len,
            "bisected"
        );
        let result = self.split(pair, bisection, dest);
        self.depth -= 1;
        result
    }

    fn split(
        &mut self,
        pair: &RangePair<'_>,
        bisection: Bisection<'_>,
        dest: &mut Text,
    ) -> Result<()> {
        match bisection.snake {
            MiddleSnake::Identical => self.process_snake(pair, dest),
            MiddleSnake::Disjoint => {
                self.write(&pair.old, ChangeKind::Deleted, dest)?;
                self.write(&pair.new, ChangeKind::Inserted, dest)
            }
            MiddleSnake::Split(point) => {
                let snake_start = extend_backward(point, pair);
                let snake_end = extend_forward(point, pair);
                let first = RangePair::between(pair.from(), snake_start);
                let snake = RangePair::between(snake_start, snake_end);
                let second = RangePair::between(snake_end, pair.to());
                debug_assert!(first != *pair && second != *pair, "split made no progress");

                self.diff_part(&first, dest)?;
                self.process_snake(&snake, dest)?;
                self.diff_part(&second, dest)
            }
        }
    }

    fn diff_part(&mut self, pair: &RangePair<'_>, dest: &mut Text) -> Result<()> {
        self.check_cancel()?;
        match (pair.old.is_empty(), pair.new.is_empty()) {
            (false, false) => self.diff_i(pair, dest),
            (false, true) => self.write(&pair.old, ChangeKind::Deleted, dest),
            (true, false) => self.write(&pair.new, ChangeKind::Inserted, dest),
            (true, true) => Ok(()),
        }
    }

    /// The record stamped on written units of `kind`.
    pub(crate) fn change(&self, kind: ChangeKind) -> Change {
        Change::new(kind, self.author, self.timestamp)
    }

    pub(crate) fn inset_level(&self) -> usize {
        self.inset_level
    }

    /// Account for `units` written; only the top-level text reports progress.
    pub(crate) fn advance(&mut self, units: usize) {
        if self.inset_level == 1 && units > 0 {
            self.units_written += units;
            self.events.send(CompareEvent::Progress(units));
        }
    }
}
