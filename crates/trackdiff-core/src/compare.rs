//! Comparison runs.
//!
//! A [`Compare`] owns the inputs of one comparison: shared read-only old and
//! new documents, the destination document it fills, and its options. It can
//! run on the calling thread ([`Compare::run`]) or on a dedicated worker
//! thread ([`Compare::spawn`]), in which case the returned [`CompareHandle`]
//! can abort the run and collects the destination when it completes.
//!
//! ## Logging Ownership
//!
//! `run` emits exactly one start event and one end (or end_error) event per
//! run, tagged with the run's `run_id`.

use crate::diff::driver::Engine;
use crate::errors::{CompareError, DocumentRole, Result};
use crate::model::Document;
use crate::options::CompareOptions;
use crate::progress::{CancelToken, CompareEvent, EventSink};
use crate::{log_op_end, log_op_error, log_op_start};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;
use trackdiff_core_types::RunId;

const OP_COMPARE: &str = "compare";
const WORKER_NAME: &str = "compare";

/// Counters of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub edit_len: usize,
    pub units_written: usize,
}

pub struct Compare {
    old: Option<Arc<Document>>,
    new: Option<Arc<Document>>,
    dest: Option<Document>,
    options: CompareOptions,
    cancel: CancelToken,
    events: EventSink,
    receiver: Option<Receiver<CompareEvent>>,
    run_id: RunId,
    aborted: bool,
    summary: Option<RunSummary>,
}

impl Compare {
    pub fn new(
        old: Option<Arc<Document>>,
        new: Option<Arc<Document>>,
        dest: Option<Document>,
        options: CompareOptions,
    ) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            old,
            new,
            dest,
            options,
            cancel: CancelToken::new(),
            events: EventSink::new(sender),
            receiver: Some(receiver),
            run_id: RunId::new(),
            aborted: false,
            summary: None,
        }
    }

    /// Compare `old` and `new` into a fresh destination document.
    pub fn documents(old: Arc<Document>, new: Arc<Document>, options: CompareOptions) -> Self {
        Self::new(Some(old), Some(new), Some(Document::default()), options)
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Token that cancels this comparison when set.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Receiver of this comparison's events; `None` once taken.
    pub fn take_events(&mut self) -> Option<Receiver<CompareEvent>> {
        self.receiver.take()
    }

    pub fn dest(&self) -> Option<&Document> {
        self.dest.as_ref()
    }

    pub fn into_dest(self) -> Option<Document> {
        self.dest
    }

    /// Whether the last run stopped on its cancel token.
    pub fn was_aborted(&self) -> bool {
        self.aborted
    }

    /// Counters of the last successful run.
    pub fn summary(&self) -> Option<RunSummary> {
        self.summary
    }

    /// Check that all three documents are present.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::MissingDocument` naming the first absent one.
    pub fn validate(&self) -> Result<()> {
        if self.old.is_none() {
            return Err(CompareError::MissingDocument {
                role: DocumentRole::Old,
            });
        }
        if self.new.is_none() {
            return Err(CompareError::MissingDocument {
                role: DocumentRole::New,
            });
        }
        if self.dest.is_none() {
            return Err(CompareError::MissingDocument {
                role: DocumentRole::Dest,
            });
        }
        Ok(())
    }

    /// Run the comparison on the calling thread.
    ///
    /// Returns `true` iff all documents were present and the run was not
    /// aborted. A run that starts sends exactly one
    /// [`CompareEvent::Finished`] when it is over. An aborted run drops the
    /// partially written destination.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();
        log_op_start!(
            OP_COMPARE,
            run_id = self.run_id.as_str(),
            author = self.options.author.get(),
            settings_from_new = self.options.settings_from_new
        );

        self.aborted = false;
        self.summary = None;
        match self.execute() {
            Ok(summary) => {
                self.summary = Some(summary);
                log_op_end!(
                    OP_COMPARE,
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = self.run_id.as_str(),
                    edit_len = summary.edit_len,
                    units = summary.units_written,
                    aborted = false
                );
                self.events.send(CompareEvent::Finished { aborted: false });
                true
            }
            Err(CompareError::Aborted) => {
                self.aborted = true;
                self.dest = None;
                log_op_end!(
                    OP_COMPARE,
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = self.run_id.as_str(),
                    aborted = true
                );
                self.events.send(CompareEvent::Finished { aborted: true });
                false
            }
            Err(err) => {
                log_op_error!(
                    OP_COMPARE,
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = self.run_id.as_str()
                );
                false
            }
        }
    }

    fn execute(&mut self) -> Result<RunSummary> {
        let missing = |role| CompareError::MissingDocument { role };
        let old = self.old.as_ref().ok_or(missing(DocumentRole::Old))?;
        let new = self.new.as_ref().ok_or(missing(DocumentRole::New))?;
        let dest = self.dest.as_mut().ok_or(missing(DocumentRole::Dest))?;

        dest.settings = if self.options.settings_from_new {
            new.settings.clone()
        } else {
            old.settings.clone()
        };

        let mut engine = Engine::new(self.cancel.clone(), self.events.clone(), self.options.author);
        engine.diff_texts(&old.text, &new.text, &mut dest.text)?;
        Ok(RunSummary {
            edit_len: engine.edit_len(),
            units_written: engine.units_written(),
        })
    }

    /// Run the comparison on a dedicated worker thread.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::MissingDocument` without starting a thread if a
    /// document is absent, and `CompareError::WorkerSpawn` if the thread could
    /// not be created.
    pub fn spawn(mut self) -> Result<CompareHandle> {
        self.validate()?;
        let cancel = self.cancel.clone();
        let events = self.receiver.take();
        let run_id = self.run_id.clone();

        let thread = std::thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || {
                let succeeded = self.run();
                CompareOutcome {
                    succeeded,
                    aborted: self.was_aborted(),
                    summary: self.summary(),
                    dest: self.into_dest(),
                }
            })
            .map_err(|e| CompareError::WorkerSpawn {
                message: e.to_string(),
            })?;

        Ok(CompareHandle {
            cancel,
            thread,
            events,
            run_id,
        })
    }
}

/// Result of a worker run
#[derive(Debug)]
pub struct CompareOutcome {
    pub succeeded: bool,
    pub aborted: bool,
    pub summary: Option<RunSummary>,
    /// The destination document; `None` after an abort
    pub dest: Option<Document>,
}

/// Owner side of a comparison running on a worker thread
pub struct CompareHandle {
    cancel: CancelToken,
    thread: JoinHandle<CompareOutcome>,
    events: Option<Receiver<CompareEvent>>,
    run_id: RunId,
}

impl CompareHandle {
    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn events(&self) -> Option<&Receiver<CompareEvent>> {
        self.events.as_ref()
    }

    pub fn take_events(&mut self) -> Option<Receiver<CompareEvent>> {
        self.events.take()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Cancel the run and wait for the worker to unwind.
    ///
    /// No event is sent after this returns.
    pub fn abort(self) -> CompareOutcome {
        self.cancel.cancel();
        self.join()
    }

    /// Wait for the worker to finish.
    ///
    /// A panic on the worker is resumed on the calling thread.
    pub fn join(self) -> CompareOutcome {
        match self.thread.join() {
            Ok(outcome) => outcome,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}
