//! [`SqliteContactDao`]: the SQLite implementation of [`ContactDao`].

use std::{path::Path, sync::Arc};

use futures::StreamExt as _;
use roster_core::{Contact, ContactDao, ContactFeed, ContactId, SortType};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Contacts backed by a single SQLite file.
///
/// Cloning is cheap; the connection and the change counter are shared.
#[derive(Clone)]
pub struct SqliteContactDao {
  conn:    tokio_rusqlite::Connection,
  /// Bumped after every write that touched a row. Live queries re-run on
  /// each bump.
  version: Arc<watch::Sender<u64>>,
}

impl SqliteContactDao {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open a private in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(Self {
      conn,
      version: Arc::new(watch::Sender::new(0)),
    })
  }

  /// Every contact, ordered for `sort_type`. Ties fall back to row id.
  pub async fn list(&self, sort_type: SortType) -> Result<Vec<Contact>> {
    let sql = format!(
      "SELECT id, first_name, last_name, phone_number FROM contacts
       ORDER BY {} ASC, id ASC",
      order_column(sort_type)
    );

    let contacts = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Contact {
              id:           Some(ContactId(row.get(0)?)),
              first_name:   row.get(1)?,
              last_name:    row.get(2)?,
              phone_number: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(contacts)
  }

  fn notify_changed(&self) { self.version.send_modify(|v| *v += 1); }

  /// A feed that runs `list(sort_type)` now and after every later write.
  /// Writes landing while a query runs are folded into one re-run.
  fn live(&self, sort_type: SortType) -> ContactFeed {
    let store = self.clone();
    let version = self.version.subscribe();

    futures::stream::unfold(
      (store, version, true),
      move |(store, mut version, first)| async move {
        if !first && version.changed().await.is_err() {
          return None;
        }
        let _ = version.borrow_and_update();

        match store.list(sort_type).await {
          Ok(contacts) => {
            debug!(%sort_type, count = contacts.len(), "contact query delivered");
            Some((contacts, (store, version, false)))
          }
          Err(e) => {
            warn!(%sort_type, error = %e, "contact query failed, closing feed");
            None
          }
        }
      },
    )
    .boxed()
  }
}

fn order_column(sort_type: SortType) -> &'static str {
  match sort_type {
    SortType::FirstName => "first_name",
    SortType::LastName => "last_name",
    SortType::PhoneNumber => "phone_number",
  }
}

// ─── ContactDao impl ─────────────────────────────────────────────────────────

impl ContactDao for SqliteContactDao {
  type Error = crate::Error;

  fn contacts_ordered_by_first_name(&self) -> ContactFeed { self.live(SortType::FirstName) }

  fn contacts_ordered_by_last_name(&self) -> ContactFeed { self.live(SortType::LastName) }

  fn contacts_ordered_by_phone_number(&self) -> ContactFeed {
    self.live(SortType::PhoneNumber)
  }

  async fn upsert_contact(&self, contact: Contact) -> Result<Contact> {
    let id           = contact.id.map(|ContactId(id)| id);
    let first_name   = contact.first_name.clone();
    let last_name    = contact.last_name.clone();
    let phone_number = contact.phone_number.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (id, first_name, last_name, phone_number)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(id) DO UPDATE SET
             first_name   = excluded.first_name,
             last_name    = excluded.last_name,
             phone_number = excluded.phone_number",
          rusqlite::params![id, first_name, last_name, phone_number],
        )?;
        Ok(id.unwrap_or_else(|| conn.last_insert_rowid()))
      })
      .await?;

    self.notify_changed();
    Ok(Contact {
      id: Some(ContactId(id)),
      ..contact
    })
  }

  async fn delete_contact(&self, contact: Contact) -> Result<()> {
    let ContactId(id) = contact.id.ok_or(roster_core::Error::MissingId)?;

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if removed > 0 {
      self.notify_changed();
    }
    Ok(())
  }
}
