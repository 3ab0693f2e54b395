//! Positions and spans over a [`Text`](crate::model::Text).
//!
//! A cursor addresses atomic units: characters, insets (one unit each) and
//! paragraph breaks. Ranges and pairs of ranges are cheap `Copy` values built
//! per recursive diff call.

pub mod position;
pub mod range;

pub use position::{Atom, Cursor};
pub use range::{DocPair, Range, RangePair};
