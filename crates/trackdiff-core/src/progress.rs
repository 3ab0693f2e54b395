//! Cross-thread signalling between a comparison and its owner.
//!
//! The owner writes a [`CancelToken`]; the worker reads it. The worker writes
//! [`CompareEvent`]s to a channel; the owner reads them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Notifications sent by a running comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareEvent {
    /// Total work expected for the top-level text (its edit-script length)
    ProgressMax(usize),
    /// Units just written to the top-level text
    Progress(usize),
    /// Sent exactly once, after the run has unwound
    Finished { aborted: bool },
}

/// Optional event channel; sends to a dropped receiver are ignored
#[derive(Debug, Clone, Default)]
pub struct EventSink(Option<Sender<CompareEvent>>);

impl EventSink {
    pub fn new(sender: Sender<CompareEvent>) -> Self {
        Self(Some(sender))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn send(&self, event: CompareEvent) {
        if let Some(sender) = &self.0 {
            sender.send(event).ok();
        }
    }
}
