//! Document diff engine.
//!
//! Compares two texts unit by unit and writes a third text in which every
//! unit of both inputs appears once, tracked as unchanged, inserted or
//! deleted. Embedded insets of a recursively comparable kind are diffed
//! internally rather than replaced wholesale.
//!
//! ## Entry point
//!
//! ```
//! use trackdiff_core::diff::driver::Engine;
//! use trackdiff_core::model::{AuthorId, Text};
//! use trackdiff_core::progress::{CancelToken, EventSink};
//! use trackdiff_core::diff::summary::{render_tracked, ChangeStats};
//! use trackdiff_core::model::Document;
//!
//! let old = Text::from_plain("the cat sat");
//! let new = Text::from_plain("the dog sat");
//! let mut dest = Text::default();
//!
//! let mut engine = Engine::new(CancelToken::new(), EventSink::none(), AuthorId(1));
//! engine.diff_texts(&old, &new, &mut dest).unwrap();
//!
//! let doc = Document::new(Default::default(), dest);
//! assert_eq!(render_tracked(&doc), "the [-cat-]{+dog+} sat");
//! assert_eq!(ChangeStats::collect(&doc).inserted, 3);
//! ```
//!
//! ## Guarantees
//!
//! - **Totality**: every unit of old appears exactly once as unchanged or
//!   deleted, every unit of new exactly once as unchanged or inserted.
//! - **Identity**: comparing a text with itself yields no tracked change.
//! - **Termination**: every recursive sub-problem is strictly smaller than
//!   its parent.

pub mod assembler;
pub mod bisect;
pub mod driver;
pub mod oracle;
pub mod snake;
pub mod summary;

pub use bisect::{bisect, Bisection, MiddleSnake};
pub use driver::Engine;
pub use oracle::units_equal;
pub use summary::{render_stats, render_tracked, ChangeStats};
