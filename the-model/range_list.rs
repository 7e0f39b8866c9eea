//! Multi-cursor selections.
//!
//! A [`RangeList`] holds one or more [`Range`]s plus the index of the focused
//! one (the primary cursor). Ranges are kept simplified:
//!
//! - No two ranges overlap or touch (touching ranges are merged)
//! - Always at least one range
//!
//! ```
//! use the_model::{
//!   range::Range,
//!   range_list::RangeList,
//! };
//!
//! let list = RangeList::new(vec![Range::new(4, 8), Range::new(9, 4)], 1)?;
//! assert_eq!(list.ranges(), &[Range::new(9, 4)]);
//! # Ok::<(), the_model::range_list::RangeListError>(())
//! ```
//!
//! # Simplify
//!
//! Every mutation that may introduce an overlap (adding, replacing or
//! setting ranges) runs [`RangeList::simplify`]. Ranges are sorted by their
//! first offset and scanned left to right; an overlapping or touching pair is
//! folded into the left range, which extends its last offset. The merged
//! range that contains the previously focused range takes over its direction
//! and becomes the focused range. Other merged groups keep the direction of
//! their first-sorted member.
//!
//! Removing ranges never needs a simplify.
//!
//! # Error Handling
//!
//! Operations return [`Result<T, RangeListError>`]:
//!
//! - **EmptyRanges** - A range list must have at least one range
//! - **IndexOutOfBounds** - Accessed range index doesn't exist
//! - **SoleRange** - Cannot remove the only range
//! - **NotFound** - The given range is not part of the list
//! - **FocusLost** - Simplify lost track of the focused range (a bug)

use serde::{
  Deserialize,
  Serialize,
};
use smallvec::{
  SmallVec,
  smallvec,
};
use thiserror::Error;

use crate::range::{
  Range,
  RangeError,
};

pub type Result<T> = std::result::Result<T, RangeListError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RangeListError {
  #[error("range list must contain at least one range")]
  EmptyRanges,
  #[error("range index {index} out of bounds for range list of length {len}")]
  IndexOutOfBounds { index: usize, len: usize },
  #[error("cannot remove the only range of a range list")]
  SoleRange,
  #[error("range {0:?} is not part of the range list")]
  NotFound(Range),
  #[error("no simplified range contains the focused range {focused:?}")]
  FocusLost { focused: Range },
  #[error(transparent)]
  Range(#[from] RangeError),
}

/// One or more ranges and the index of the focused one.
/// INVARIANT: never empty, and `focused_index < ranges.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRangeList", into = "RawRangeList")]
pub struct RangeList {
  ranges:        SmallVec<[Range; 1]>,
  focused_index: usize,
}

impl Default for RangeList {
  fn default() -> Self {
    Self::single(Range::default())
  }
}

impl RangeList {
  /// Builds a simplified range list focused on `ranges[focused_index]`.
  pub fn new(ranges: impl IntoIterator<Item = Range>, focused_index: usize) -> Result<Self> {
    Self::new_unsimplified(ranges.into_iter().collect(), focused_index)?.simplify()
  }

  pub fn from_ranges(ranges: impl IntoIterator<Item = Range>) -> Result<Self> {
    Self::new(ranges, 0)
  }

  pub fn single(range: Range) -> Self {
    Self {
      ranges:        smallvec![range],
      focused_index: 0,
    }
  }

  /// Validates size and focus bounds but skips simplification. Only used as a
  /// staging step before [`RangeList::simplify`].
  pub(crate) fn new_unsimplified(
    ranges: SmallVec<[Range; 1]>,
    focused_index: usize,
  ) -> Result<Self> {
    if ranges.is_empty() {
      return Err(RangeListError::EmptyRanges);
    }
    if focused_index >= ranges.len() {
      return Err(RangeListError::IndexOutOfBounds {
        index: focused_index,
        len:   ranges.len(),
      });
    }
    Ok(Self {
      ranges,
      focused_index,
    })
  }

  // Accessors.
  //

  pub fn ranges(&self) -> &[Range] {
    &self.ranges
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Range> {
    self.ranges.iter()
  }

  /// Number of ranges; always at least one.
  #[inline]
  pub fn len(&self) -> usize {
    self.ranges.len()
  }

  /// Always false, a range list holds at least one range.
  #[inline]
  pub fn is_empty(&self) -> bool {
    false
  }

  #[inline]
  pub fn focused_index(&self) -> usize {
    self.focused_index
  }

  #[inline]
  pub fn focused_range(&self) -> Range {
    self.ranges[self.focused_index]
  }

  pub fn range_at(&self, index: usize) -> Result<Range> {
    self
      .ranges
      .get(index)
      .copied()
      .ok_or(RangeListError::IndexOutOfBounds {
        index,
        len: self.ranges.len(),
      })
  }

  /// Index of the first range structurally equal to `range`.
  pub fn index_of(&self, range: &Range) -> Option<usize> {
    self.ranges.iter().position(|other| other == range)
  }

  /// True if no two ranges overlap or touch.
  pub fn is_simplified(&self) -> bool {
    let mut sorted: SmallVec<[Range; 4]> = self.ranges.iter().copied().collect();
    sorted.sort_by_key(Range::first_offset);
    sorted
      .windows(2)
      .all(|pair| pair[0].last_offset() < pair[1].first_offset())
  }

  // Transformations.
  //

  pub fn set_focused_index(&self, index: usize) -> Result<Self> {
    self.check_index(index)?;
    Ok(Self {
      ranges:        self.ranges.clone(),
      focused_index: index,
    })
  }

  /// Replaces all ranges. The focused index is clamped to the new length.
  pub fn set_ranges(&self, ranges: impl IntoIterator<Item = Range>) -> Result<Self> {
    let ranges: SmallVec<[Range; 1]> = ranges.into_iter().collect();
    if ranges.is_empty() {
      return Err(RangeListError::EmptyRanges);
    }
    let focused_index = self.focused_index.min(ranges.len() - 1);
    Self::new_unsimplified(ranges, focused_index)?.simplify()
  }

  /// Appends `range` and focuses it.
  pub fn add_range(&self, range: Range) -> Result<Self> {
    let mut ranges = self.ranges.clone();
    ranges.push(range);
    let focused_index = ranges.len() - 1;
    Self::new_unsimplified(ranges, focused_index)?.simplify()
  }

  pub fn remove_range_at(&self, index: usize) -> Result<Self> {
    self.check_index(index)?;
    if self.ranges.len() == 1 {
      return Err(RangeListError::SoleRange);
    }

    let mut ranges = self.ranges.clone();
    ranges.remove(index);
    let focused_index = match index.cmp(&self.focused_index) {
      std::cmp::Ordering::Equal => 0,
      std::cmp::Ordering::Less => self.focused_index - 1,
      std::cmp::Ordering::Greater => self.focused_index,
    };
    Ok(Self {
      ranges,
      focused_index,
    })
  }

  pub fn remove_range(&self, range: &Range) -> Result<Self> {
    if self.ranges.len() == 1 {
      return Err(RangeListError::SoleRange);
    }
    let index = self
      .index_of(range)
      .ok_or(RangeListError::NotFound(*range))?;
    self.remove_range_at(index)
  }

  pub fn replace_range_at(&self, index: usize, range: Range) -> Result<Self> {
    self.check_index(index)?;
    let mut ranges = self.ranges.clone();
    ranges[index] = range;
    self.set_ranges(ranges)
  }

  pub fn replace_range(&self, old: &Range, new: Range) -> Result<Self> {
    let index = self.index_of(old).ok_or(RangeListError::NotFound(*old))?;
    self.replace_range_at(index, new)
  }

  /// Merges overlapping and touching ranges.
  ///
  /// Returns `self` untouched (order included) when nothing overlaps. The
  /// merged range holding the old focused range inherits its direction and
  /// becomes focused.
  pub fn simplify(self) -> Result<Self> {
    let mut result = self.ranges.clone();
    // Stable, so ties keep their insertion order.
    result.sort_by_key(Range::first_offset);

    let mut i = 0;
    while i + 1 < result.len() {
      let (current, next) = (result[i], result[i + 1]);
      if current.last_offset() >= next.first_offset() {
        result[i] = current.set_last_offset(current.last_offset().max(next.last_offset()));
        result.remove(i + 1);
      } else {
        i += 1;
      }
    }

    if result.len() == self.ranges.len() {
      return Ok(self);
    }

    let focused = self.focused_range();
    let focused_index = result
      .iter()
      .position(|range| range.contains(&focused))
      .ok_or(RangeListError::FocusLost { focused })?;
    result[focused_index] = result[focused_index].with_direction(focused.direction());

    tracing::trace!(
      before = self.ranges.len(),
      after = result.len(),
      focused_index,
      "simplified range list"
    );

    Ok(Self {
      ranges: result,
      focused_index,
    })
  }

  fn check_index(&self, index: usize) -> Result<()> {
    if index >= self.ranges.len() {
      return Err(RangeListError::IndexOutOfBounds {
        index,
        len: self.ranges.len(),
      });
    }
    Ok(())
  }
}

impl From<Range> for RangeList {
  fn from(range: Range) -> Self {
    Self::single(range)
  }
}

impl<'a> IntoIterator for &'a RangeList {
  type IntoIter = std::slice::Iter<'a, Range>;
  type Item = &'a Range;

  fn into_iter(self) -> std::slice::Iter<'a, Range> {
    self.iter()
  }
}

/// Serialized form of a [`RangeList`]. Deserializing goes back through
/// [`RangeList::new`], so snapshots are validated and simplified.
#[derive(Serialize, Deserialize)]
struct RawRangeList {
  ranges:        Vec<Range>,
  focused_index: usize,
}

impl TryFrom<RawRangeList> for RangeList {
  type Error = RangeListError;

  fn try_from(raw: RawRangeList) -> Result<Self> {
    RangeList::new(raw.ranges, raw.focused_index)
  }
}

impl From<RangeList> for RawRangeList {
  fn from(list: RangeList) -> Self {
    Self {
      ranges:        list.ranges.into_vec(),
      focused_index: list.focused_index,
    }
  }
}
