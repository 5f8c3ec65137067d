//! Controller tuning.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_STOP_TIMEOUT_MS: u64 = 5_000;

/// Settings for a [`ContactStateController`](crate::ContactStateController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
  /// How long the storage subscription is kept alive after the last
  /// consumer detaches.
  pub stop_timeout_ms: u64,
}

impl ControllerConfig {
  pub fn stop_timeout(&self) -> Duration {
    Duration::from_millis(self.stop_timeout_ms)
  }

  pub fn with_stop_timeout(stop_timeout: Duration) -> Self {
    Self {
      stop_timeout_ms: u64::try_from(stop_timeout.as_millis()).unwrap_or(u64::MAX),
    }
  }
}

impl Default for ControllerConfig {
  fn default() -> Self {
    Self {
      stop_timeout_ms: DEFAULT_STOP_TIMEOUT_MS,
    }
  }
}
