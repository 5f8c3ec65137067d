//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] roster_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
