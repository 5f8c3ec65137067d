//! Plain-text rendering of a [`UiState`].

use std::fmt::Write as _;

use roster_core::UiState;

/// Render the contact list followed by the draft form.
pub fn screen(state: &UiState) -> String {
  let mut out = String::new();
  let _ = writeln!(
    out,
    "── Contacts ({}, by {}) ──",
    state.contacts.len(),
    state.sort_type
  );

  if state.contacts.is_empty() {
    out.push_str("  (none)\n");
  }
  for contact in &state.contacts {
    let id = contact
      .id
      .map(|id| id.to_string())
      .unwrap_or_else(|| "-".into());
    let _ = writeln!(
      out,
      "  [{id:>3}] {} {}  {}",
      contact.first_name, contact.last_name, contact.phone_number
    );
  }

  if state.is_adding_contact {
    let _ = writeln!(
      out,
      "── New contact ──\n  first: {:?}\n  last:  {:?}\n  phone: {:?}",
      state.first_name, state.last_name, state.phone_number
    );
  }
  out
}
