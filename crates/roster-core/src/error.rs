//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown sort type: {0:?}")]
  InvalidSortType(String),

  /// The contact has never been persisted, so there is nothing to address.
  #[error("contact has no id")]
  MissingId,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
