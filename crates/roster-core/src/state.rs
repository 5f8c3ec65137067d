//! The snapshot handed to the UI.

use serde::Serialize;

use crate::contact::{Contact, SortType};

/// One immutable view of the contact screen.
///
/// `contacts` and `sort_type` are always overwritten from the live inputs;
/// the remaining fields are the draft form carried over unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UiState {
  pub contacts:          Vec<Contact>,
  pub first_name:        String,
  pub last_name:         String,
  pub phone_number:      String,
  pub is_adding_contact: bool,
  pub sort_type:         SortType,
}

impl UiState {
  /// True when every draft field holds something other than whitespace.
  pub fn draft_is_complete(&self) -> bool {
    [&self.first_name, &self.last_name, &self.phone_number]
      .iter()
      .all(|field| !field.trim().is_empty())
  }

  /// The draft as an unsaved contact.
  pub fn draft(&self) -> Contact {
    Contact::draft(
      self.first_name.clone(),
      self.last_name.clone(),
      self.phone_number.clone(),
    )
  }

  /// Copy of `self` with the live inputs swapped in.
  pub fn combine(&self, sort_type: SortType, contacts: &[Contact]) -> Self {
    Self {
      contacts: contacts.to_vec(),
      sort_type,
      ..self.clone()
    }
  }
}
