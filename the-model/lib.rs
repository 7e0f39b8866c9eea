//! Selection and undo-history state for a text editing surface.
//!
//! - [`range::Range`] - a single directional interval (anchor/focus)
//! - [`range_list::RangeList`] - one or more non-touching ranges with a
//!   focused one
//! - [`history::History`] - a linear undo/redo stack over any snapshot type
//!
//! All of them are plain values: every operation returns a new value and
//! leaves the receiver alone.

pub mod config;
pub mod direction;
pub mod history;
pub mod range;
pub mod range_list;

pub use direction::Direction;
pub use history::History;
pub use range::Range;
pub use range_list::RangeList;
