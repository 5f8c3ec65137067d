//! SQLite backend for the roster contact screen.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Live queries re-run after every write.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteContactDao;
