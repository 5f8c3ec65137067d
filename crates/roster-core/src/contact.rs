//! The contact entity and the orderings a contact list can be shown in.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Identity ────────────────────────────────────────────────────────────────

/// Row identity assigned by the storage backend on first save.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A single address-book entry.
///
/// No field validation happens here; the controller checks for blank fields
/// at save time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
  /// `None` until the contact has been upserted.
  pub id:           Option<ContactId>,
  pub first_name:   String,
  pub last_name:    String,
  pub phone_number: String,
}

impl Contact {
  /// Build an unsaved contact.
  pub fn draft(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    phone_number: impl Into<String>,
  ) -> Self {
    Self {
      id:           None,
      first_name:   first_name.into(),
      last_name:    last_name.into(),
      phone_number: phone_number.into(),
    }
  }

  pub fn is_persisted(&self) -> bool { self.id.is_some() }
}

// ─── Sort order ──────────────────────────────────────────────────────────────

/// Which ordered query backs the visible contact list.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
  #[default]
  FirstName,
  LastName,
  PhoneNumber,
}

impl SortType {
  pub const ALL: [SortType; 3] =
    [SortType::FirstName, SortType::LastName, SortType::PhoneNumber];

  pub fn as_str(self) -> &'static str {
    match self {
      SortType::FirstName => "first_name",
      SortType::LastName => "last_name",
      SortType::PhoneNumber => "phone_number",
    }
  }
}

impl fmt::Display for SortType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for SortType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "first" | "first_name" => Ok(SortType::FirstName),
      "last" | "last_name" => Ok(SortType::LastName),
      "phone" | "phone_number" => Ok(SortType::PhoneNumber),
      _ => Err(Error::InvalidSortType(s.to_owned())),
    }
  }
}
