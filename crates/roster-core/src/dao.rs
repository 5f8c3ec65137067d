//! The `ContactDao` trait: what the controller needs from storage.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). The
//! controller depends on this abstraction, never on a concrete backend.

use std::future::Future;

use futures::stream::BoxStream;

use crate::contact::{Contact, SortType};

/// A live query: yields the full ordered list on subscribe and again every
/// time the persisted set changes, for as long as it is polled.
pub type ContactFeed = BoxStream<'static, Vec<Contact>>;

/// Abstraction over persisted contacts.
///
/// All methods return `Send` futures so the trait can be driven from tasks
/// on a multi-threaded runtime.
pub trait ContactDao: Send + Sync + 'static {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Live queries ──────────────────────────────────────────────────────

  /// All contacts, ascending by first name.
  fn contacts_ordered_by_first_name(&self) -> ContactFeed;

  /// All contacts, ascending by last name.
  fn contacts_ordered_by_last_name(&self) -> ContactFeed;

  /// All contacts, ascending by phone number.
  fn contacts_ordered_by_phone_number(&self) -> ContactFeed;

  /// The live query backing `sort_type`.
  fn contacts_ordered_by(&self, sort_type: SortType) -> ContactFeed {
    match sort_type {
      SortType::FirstName => self.contacts_ordered_by_first_name(),
      SortType::LastName => self.contacts_ordered_by_last_name(),
      SortType::PhoneNumber => self.contacts_ordered_by_phone_number(),
    }
  }

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert `contact`, or replace the row with the same id. Returns the
  /// stored contact with its id filled in.
  fn upsert_contact(
    &self,
    contact: Contact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Remove the row with `contact`'s id. Removing an absent row succeeds.
  fn delete_contact(
    &self,
    contact: Contact,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
