//! Core types and trait definitions for the roster contact screen.
//!
//! This crate is deliberately free of runtime and database dependencies. The
//! controller crate and every storage backend depend on it.

pub mod contact;
pub mod dao;
pub mod error;
pub mod event;
pub mod state;

pub use contact::{Contact, ContactId, SortType};
pub use dao::{ContactDao, ContactFeed};
pub use error::{Error, Result};
pub use event::ContactEvent;
pub use state::UiState;
