//! trackdiff core - document comparison with change tracking
//!
//! This crate provides:
//! - A document model of paragraphs, fonts and embedded insets, with a
//!   per-paragraph change-tracking interval map
//! - Cursors and ranges over atomic units (characters, insets, paragraph breaks)
//! - A divide-and-conquer diff engine that recurses into inset interiors
//! - Comparison runs on a worker thread with cancellation and progress events
//! - The canonical error and logging facilities

pub mod compare;
pub mod cursor;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod options;
pub mod progress;

// Used by the logging macros
pub use trackdiff_core_types;

// Re-export commonly used types
pub use compare::{Compare, CompareHandle, CompareOutcome, RunSummary};
pub use errors::{CompareError, DocumentRole, ExError, ExErrorKind, Result};
pub use model::{AuthorId, Change, ChangeKind, Changes, Document, Inset, InsetKind, Paragraph, Text};
pub use options::CompareOptions;
pub use progress::{CancelToken, CompareEvent};
