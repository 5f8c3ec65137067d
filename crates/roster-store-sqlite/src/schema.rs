//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name    TEXT NOT NULL,
    last_name     TEXT NOT NULL,
    phone_number  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_first_name_idx   ON contacts(first_name);
CREATE INDEX IF NOT EXISTS contacts_last_name_idx    ON contacts(last_name);
CREATE INDEX IF NOT EXISTS contacts_phone_number_idx ON contacts(phone_number);

PRAGMA user_version = 1;
";
