//! Direction of a selection range.
//!
//! A [`Range`](crate::range::Range) whose anchor sits at or before its focus
//! is [`Direction::Forwards`]; otherwise it is [`Direction::Backwards`].
//!
//! # Usage
//!
//! ```
//! use the_model::{
//!   direction::Direction,
//!   range::Range,
//! };
//!
//! let range = Range::new(5, 10);
//! assert_eq!(range.direction(), Direction::Forwards);
//!
//! let backwards = range.with_direction("backwards".parse().unwrap());
//! assert_eq!(backwards.anchor_offset, 10);
//! assert_eq!(backwards.focus_offset, 5);
//! ```

use std::{
  fmt,
  str::FromStr,
};

use serde::{
  Deserialize,
  Serialize,
};

use crate::range::RangeError;

/// The direction a range extends in, from anchor to focus.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
  /// Anchor at or before focus (increasing positions).
  #[default]
  Forwards,
  /// Anchor after focus (decreasing positions).
  Backwards,
}

impl Direction {
  pub const fn as_str(self) -> &'static str {
    match self {
      Direction::Forwards => "forwards",
      Direction::Backwards => "backwards",
    }
  }

  #[must_use]
  pub const fn reverse(self) -> Self {
    match self {
      Direction::Forwards => Direction::Backwards,
      Direction::Backwards => Direction::Forwards,
    }
  }
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Direction {
  type Err = RangeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "forwards" => Ok(Direction::Forwards),
      "backwards" => Ok(Direction::Backwards),
      other => Err(RangeError::InvalidDirection(other.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_literals() {
    assert_eq!("forwards".parse::<Direction>(), Ok(Direction::Forwards));
    assert_eq!("backwards".parse::<Direction>(), Ok(Direction::Backwards));
  }

  #[test]
  fn rejects_other_literals() {
    for input in ["", "forward", "Backwards", "sideways"] {
      assert_eq!(
        input.parse::<Direction>(),
        Err(RangeError::InvalidDirection(input.to_string()))
      );
    }
  }

  #[test]
  fn display_round_trips() {
    for direction in [Direction::Forwards, Direction::Backwards] {
      assert_eq!(direction.to_string().parse::<Direction>(), Ok(direction));
    }
  }

  #[test]
  fn reverse() {
    assert_eq!(Direction::Forwards.reverse(), Direction::Backwards);
    assert_eq!(Direction::Backwards.reverse(), Direction::Forwards);
  }
}
