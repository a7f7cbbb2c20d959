//! SQL schema for the person SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids of deleted rows from being handed out again.
CREATE TABLE IF NOT EXISTS persons (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name       TEXT NOT NULL,
    last_name        TEXT NOT NULL,
    date_of_birth    TEXT NOT NULL,   -- YYYY-MM-DD
    city_of_birth    TEXT NOT NULL,
    country_of_birth TEXT NOT NULL,
    nationality      TEXT NOT NULL,
    avatar           TEXT             -- base64 image; server-managed
);

-- Authoritative duplicate guard; the service pre-check alone races.
CREATE UNIQUE INDEX IF NOT EXISTS persons_name_pair_idx
    ON persons(first_name, last_name);

PRAGMA user_version = 1;
";
