//! Configuration for the undo history.
//!
//! Host editors embed a `[history]` style table in their own TOML config and
//! hand the parsed [`HistoryConfig`] to [`History::with_config`].
//!
//! ```toml
//! max_states = 256
//! ```
//!
//! [`History::with_config`]: crate::history::History::with_config

use std::num::NonZeroUsize;

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

pub const DEFAULT_MAX_STATES: Option<NonZeroUsize> = None;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to parse history config: {0}")]
  Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
  /// Oldest states are evicted once the history grows past this many.
  /// Unbounded when unset.
  pub max_states: Option<NonZeroUsize>,
}

impl Default for HistoryConfig {
  fn default() -> Self {
    Self {
      max_states: DEFAULT_MAX_STATES,
    }
  }
}

impl HistoryConfig {
  pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(source)?)
  }

  #[must_use]
  pub fn with_max_states(mut self, max_states: usize) -> Self {
    self.max_states = NonZeroUsize::new(max_states);
    self
  }
}
