//! A single directional interval over text offsets.
//!
//! A [`Range`] has two offsets: `anchor_offset` and `focus_offset`. The focus
//! is the end that moves when a selection is extended, the anchor is the end
//! that stays put. When both are equal the range is collapsed (a plain
//! cursor).
//!
//! ```text
//! anchor=2, focus=7: "he[llo w]orld"  (forwards)
//! anchor=7, focus=2: "he]llo w[orld"  (backwards)
//! anchor=5, focus=5: "hello|world"    (collapsed)
//! ```
//!
//! [`Range::first_offset`] and [`Range::last_offset`] return the bounds
//! regardless of direction, [`Range::direction`] tells which way the range
//! extends. Two ranges covering the same span in opposite directions are not
//! equal.
//!
//! Every operation returns a new `Range`; `Range` is `Copy` and never mutated
//! through a shared reference.
//!
//! # Error Handling
//!
//! - **InvalidDirection** - [`Range::set_direction`] got an unknown literal
//! - **OffsetOutOfBounds** - a `move_*` call would leave the `usize` domain
//! - **DisjointRanges** - [`Range::merge_with_range`] on ranges that do not
//!   touch

use std::cmp;

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::direction::Direction;

pub type Result<T> = std::result::Result<T, RangeError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RangeError {
  #[error("direction {0:?} is neither \"forwards\" nor \"backwards\"")]
  InvalidDirection(String),
  #[error("moving offset {offset} by {delta} is out of bounds")]
  OffsetOutOfBounds { offset: usize, delta: isize },
  #[error("ranges {this:?} and {other:?} do not touch and cannot be merged")]
  DisjointRanges { this: Range, other: Range },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
  pub anchor_offset: usize,
  pub focus_offset:  usize,
}

impl Range {
  pub const fn new(anchor_offset: usize, focus_offset: usize) -> Self {
    Self {
      anchor_offset,
      focus_offset,
    }
  }

  /// A collapsed range at `offset`.
  #[inline]
  pub const fn point(offset: usize) -> Self {
    Self::new(offset, offset)
  }

  #[inline]
  #[must_use]
  pub fn is_collapsed(&self) -> bool {
    self.anchor_offset == self.focus_offset
  }

  #[inline]
  #[must_use]
  pub fn is_expanded(&self) -> bool {
    !self.is_collapsed()
  }

  #[inline]
  #[must_use]
  pub fn is_backwards(&self) -> bool {
    self.anchor_offset > self.focus_offset
  }

  /// Collapsed ranges count as forwards.
  #[inline]
  #[must_use]
  pub fn is_forwards(&self) -> bool {
    !self.is_backwards()
  }

  /// Start of the range
  #[inline]
  #[must_use]
  pub fn first_offset(&self) -> usize {
    cmp::min(self.anchor_offset, self.focus_offset)
  }

  /// End of the range
  #[inline]
  #[must_use]
  pub fn last_offset(&self) -> usize {
    cmp::max(self.anchor_offset, self.focus_offset)
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.last_offset() - self.first_offset()
  }

  #[inline]
  #[must_use]
  pub fn direction(&self) -> Direction {
    if self.is_backwards() {
      Direction::Backwards
    } else {
      Direction::Forwards
    }
  }

  /// True if `other` lies entirely within this range, bounds included.
  #[inline]
  pub fn contains(&self, other: &Self) -> bool {
    other.first_offset() >= self.first_offset() && other.last_offset() <= self.last_offset()
  }

  /// True if the closed intervals share at least one offset, so `(2, 4)`
  /// touches `(4, 6)`.
  #[inline]
  pub fn touches(&self, other: &Self) -> bool {
    self.first_offset() <= other.last_offset() && other.first_offset() <= self.last_offset()
  }

  /// Returns a range spanning both `self` and `other`.
  ///
  /// If either range contains the other, the containing one is returned as
  /// is. Otherwise the union keeps the direction of `self`.
  pub fn merge_with_range(&self, other: &Self) -> Result<Self> {
    if self.contains(other) {
      return Ok(*self);
    }
    if other.contains(self) {
      return Ok(*other);
    }
    if !self.touches(other) {
      return Err(RangeError::DisjointRanges {
        this:  *self,
        other: *other,
      });
    }

    let first = self.first_offset().min(other.first_offset());
    let last = self.last_offset().max(other.last_offset());
    Ok(match self.direction() {
      Direction::Forwards => Self::new(first, last),
      Direction::Backwards => Self::new(last, first),
    })
  }

  // Setters.
  //

  #[must_use]
  pub fn set_anchor_offset(&self, offset: usize) -> Self {
    Self::new(offset, self.focus_offset)
  }

  #[must_use]
  pub fn set_focus_offset(&self, offset: usize) -> Self {
    Self::new(self.anchor_offset, offset)
  }

  /// Rebinds whichever end currently holds [`Range::first_offset`]. A
  /// collapsed range moves its focus.
  #[must_use]
  pub fn set_first_offset(&self, offset: usize) -> Self {
    if self.anchor_offset < self.focus_offset {
      self.set_anchor_offset(offset)
    } else {
      self.set_focus_offset(offset)
    }
  }

  /// Rebinds whichever end currently holds [`Range::last_offset`]. A
  /// collapsed range moves its focus.
  #[must_use]
  pub fn set_last_offset(&self, offset: usize) -> Self {
    if self.anchor_offset > self.focus_offset {
      self.set_anchor_offset(offset)
    } else {
      self.set_focus_offset(offset)
    }
  }

  // Relative moves.
  //

  pub fn move_anchor_offset(&self, delta: isize) -> Result<Self> {
    Ok(self.set_anchor_offset(shift(self.anchor_offset, delta)?))
  }

  pub fn move_focus_offset(&self, delta: isize) -> Result<Self> {
    Ok(self.set_focus_offset(shift(self.focus_offset, delta)?))
  }

  pub fn move_first_offset(&self, delta: isize) -> Result<Self> {
    Ok(self.set_first_offset(shift(self.first_offset(), delta)?))
  }

  pub fn move_last_offset(&self, delta: isize) -> Result<Self> {
    Ok(self.set_last_offset(shift(self.last_offset(), delta)?))
  }

  // Direction.
  //

  /// Swaps anchor and focus, keeping the covered span.
  #[inline]
  #[must_use]
  pub fn flip(&self) -> Self {
    Self::new(self.focus_offset, self.anchor_offset)
  }

  /// Returns the range if it already goes `direction`, else flips it.
  #[inline]
  #[must_use]
  pub fn with_direction(&self, direction: Direction) -> Self {
    if self.direction() == direction {
      *self
    } else {
      self.flip()
    }
  }

  #[must_use]
  pub fn set_forwards(&self) -> Self {
    self.with_direction(Direction::Forwards)
  }

  #[must_use]
  pub fn set_backwards(&self) -> Self {
    self.with_direction(Direction::Backwards)
  }

  /// Like [`Range::with_direction`], taking `"forwards"` or `"backwards"`.
  pub fn set_direction(&self, direction: &str) -> Result<Self> {
    Ok(self.with_direction(direction.parse()?))
  }

  // Collapsing.
  //

  #[must_use]
  pub fn collapse_anchor(&self) -> Self {
    self.set_focus_offset(self.anchor_offset)
  }

  #[must_use]
  pub fn collapse_focus(&self) -> Self {
    self.set_anchor_offset(self.focus_offset)
  }

  /// Collapses onto [`Range::first_offset`].
  #[must_use]
  pub fn collapse_backwards(&self) -> Self {
    self.set_backwards().collapse_focus()
  }

  /// Collapses onto [`Range::last_offset`].
  #[must_use]
  pub fn collapse_forwards(&self) -> Self {
    self.set_forwards().collapse_focus()
  }
}

impl From<(usize, usize)> for Range {
  fn from((anchor_offset, focus_offset): (usize, usize)) -> Self {
    Self::new(anchor_offset, focus_offset)
  }
}

fn shift(offset: usize, delta: isize) -> Result<usize> {
  offset
    .checked_add_signed(delta)
    .ok_or(RangeError::OffsetOutOfBounds { offset, delta })
}
