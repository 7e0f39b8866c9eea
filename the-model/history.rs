//! Linear undo/redo history over arbitrary snapshots.
//!
//! A [`History`] is a list of states plus the index of the current one. Undo
//! ([`History::pop`]) steps back without forgetting anything, so the states
//! after the current index can be redone. Pushing a new state while stepped
//! back discards those redo states first:
//!
//! ```
//! use the_model::history::History;
//!
//! let history = History::new([1, 2, 3]).pop().push(9);
//! assert_eq!(history.states().copied().collect::<Vec<_>>(), [1, 2, 9]);
//! assert_eq!(history.current_state(), Some(&9));
//! ```
//!
//! States are stored behind [`Arc`], so cloning a history or deriving a new
//! one never copies the snapshots themselves.
//!
//! INVARIANT: `state_index` is `None` iff there are no states, otherwise it
//! points at one of them.

use std::{
  num::NonZeroUsize,
  sync::Arc,
};

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::config::HistoryConfig;

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors that can occur when building or repositioning a history.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryError {
  #[error("state index {index} is out of bounds (len: {len})")]
  StateIndexOutOfBounds { index: usize, len: usize },
  #[error("state index {index} given for a history without states")]
  IndexOnEmptyStates { index: usize },
  #[error("a history with {len} states needs a state index")]
  MissingStateIndex { len: usize },
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
  try_from = "RawHistory<T>",
  into = "RawHistory<T>",
  bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>")
)]
pub struct History<T> {
  states:      Vec<Arc<T>>,
  state_index: Option<usize>,
  limit:       Option<NonZeroUsize>,
}

impl<T> Clone for History<T> {
  fn clone(&self) -> Self {
    Self {
      states:      self.states.clone(),
      state_index: self.state_index,
      limit:       self.limit,
    }
  }
}

impl<T> Default for History<T> {
  fn default() -> Self {
    Self {
      states:      Vec::new(),
      state_index: None,
      limit:       None,
    }
  }
}

impl<T> History<T> {
  /// Creates a history positioned at its last state, or an empty one.
  pub fn new(states: impl IntoIterator<Item = T>) -> Self {
    let states: Vec<Arc<T>> = states.into_iter().map(Arc::new).collect();
    let state_index = states.len().checked_sub(1);
    Self {
      states,
      state_index,
      limit: None,
    }
  }

  /// Creates a history positioned at `state_index`.
  pub fn with_state_index(
    states: impl IntoIterator<Item = T>,
    state_index: Option<usize>,
  ) -> Result<Self> {
    let states: Vec<Arc<T>> = states.into_iter().map(Arc::new).collect();
    check_state_index(states.len(), state_index)?;
    Ok(Self {
      states,
      state_index,
      limit: None,
    })
  }

  /// Applies the limits from `config`, evicting the oldest states if there
  /// are already too many.
  #[must_use]
  pub fn with_config(&self, config: &HistoryConfig) -> Self {
    let mut history = self.clone();
    history.limit = config.max_states;
    history.enforce_limit();
    history
  }

  // Accessors.
  //

  /// The state at the current position, `None` when there are no states.
  pub fn current_state(&self) -> Option<&T> {
    self
      .state_index
      .and_then(|index| self.states.get(index))
      .map(Arc::as_ref)
  }

  #[inline]
  pub fn state_index(&self) -> Option<usize> {
    self.state_index
  }

  pub fn state_at(&self, index: usize) -> Option<&T> {
    self.states.get(index).map(Arc::as_ref)
  }

  pub fn states(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
    self.states.iter().map(Arc::as_ref)
  }

  /// Number of states.
  #[inline]
  pub fn len(&self) -> usize {
    self.states.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.states.is_empty()
  }

  #[inline]
  pub fn has_no_states(&self) -> bool {
    self.is_empty()
  }

  #[inline]
  pub fn limit(&self) -> Option<NonZeroUsize> {
    self.limit
  }

  /// True when empty or positioned at the first state (nothing to undo).
  pub fn is_at_first_state(&self) -> bool {
    matches!(self.state_index, None | Some(0))
  }

  /// True when empty or positioned at the last state (nothing to redo).
  pub fn is_at_last_state(&self) -> bool {
    match self.state_index {
      None => true,
      Some(index) => index + 1 == self.states.len(),
    }
  }

  // Transformations.
  //

  /// Appends `state` after the current one and moves onto it. Any states
  /// past the current position are discarded first.
  #[must_use]
  pub fn push(&self, state: T) -> Self {
    let keep = self.state_index.map_or(0, |index| index + 1);
    if keep < self.states.len() {
      tracing::debug!(
        discarded = self.states.len() - keep,
        "discarding redo states"
      );
    }

    let mut states = Vec::with_capacity(keep + 1);
    states.extend_from_slice(&self.states[..keep]);
    states.push(Arc::new(state));

    let mut history = Self {
      state_index: Some(states.len() - 1),
      states,
      limit: self.limit,
    };
    history.enforce_limit();
    history
  }

  /// Steps back one state (undo). Unchanged at the first state.
  #[must_use]
  pub fn pop(&self) -> Self {
    match self.state_index {
      Some(index) if index > 0 => self.moved_to(index - 1),
      _ => self.clone(),
    }
  }

  /// Steps forward one state (redo). Unchanged at the last state.
  #[must_use]
  pub fn redo(&self) -> Self {
    match self.state_index {
      Some(index) if index + 1 < self.states.len() => self.moved_to(index + 1),
      _ => self.clone(),
    }
  }

  pub fn set_state_index(&self, state_index: Option<usize>) -> Result<Self> {
    check_state_index(self.states.len(), state_index)?;
    Ok(Self {
      states: self.states.clone(),
      state_index,
      limit: self.limit,
    })
  }

  /// Replaces every state. The current index is clamped to the new states,
  /// and becomes `None` when there are none.
  #[must_use]
  pub fn set_states(&self, states: impl IntoIterator<Item = T>) -> Self {
    let states: Vec<Arc<T>> = states.into_iter().map(Arc::new).collect();
    let state_index = states
      .len()
      .checked_sub(1)
      .map(|last| self.state_index.unwrap_or(0).min(last));

    let mut history = Self {
      states,
      state_index,
      limit: self.limit,
    };
    history.enforce_limit();
    history
  }

  fn moved_to(&self, index: usize) -> Self {
    Self {
      states:      self.states.clone(),
      state_index: Some(index),
      limit:       self.limit,
    }
  }

  fn enforce_limit(&mut self) {
    let Some(limit) = self.limit else {
      return;
    };
    let excess = self.states.len().saturating_sub(limit.get());
    if excess == 0 {
      return;
    }

    tracing::debug!(evicted = excess, limit = limit.get(), "evicting oldest history states");
    self.states.drain(..excess);
    self.state_index = self.state_index.map(|index| index.saturating_sub(excess));
  }
}

fn check_state_index(len: usize, state_index: Option<usize>) -> Result<()> {
  match state_index {
    Some(index) if len == 0 => Err(HistoryError::IndexOnEmptyStates { index }),
    Some(index) if index >= len => Err(HistoryError::StateIndexOutOfBounds { index, len }),
    None if len > 0 => Err(HistoryError::MissingStateIndex { len }),
    _ => Ok(()),
  }
}

/// Serialized form of a [`History`]. Deserializing goes through the same
/// validation as [`History::with_state_index`].
#[derive(Serialize, Deserialize)]
struct RawHistory<T> {
  states:      Vec<Arc<T>>,
  state_index: Option<usize>,
  #[serde(default)]
  limit:       Option<NonZeroUsize>,
}

impl<T> TryFrom<RawHistory<T>> for History<T> {
  type Error = HistoryError;

  fn try_from(raw: RawHistory<T>) -> Result<Self> {
    check_state_index(raw.states.len(), raw.state_index)?;
    let mut history = Self {
      states:      raw.states,
      state_index: raw.state_index,
      limit:       raw.limit,
    };
    history.enforce_limit();
    Ok(history)
  }
}

impl<T> From<History<T>> for RawHistory<T> {
  fn from(history: History<T>) -> Self {
    Self {
      states:      history.states,
      state_index: history.state_index,
      limit:       history.limit,
    }
  }
}
