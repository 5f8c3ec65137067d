//! User intents accepted by the contact screen controller.

use crate::contact::{Contact, SortType};

/// Everything the UI can ask the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEvent {
  SetFirstName(String),
  SetLastName(String),
  SetPhoneNumber(String),
  ShowDialog,
  HideDialog,
  SortContact(SortType),
  /// Persist the current draft if none of its fields are blank.
  SaveContact,
  /// Remove a previously persisted contact.
  DeleteContact(Contact),
}
