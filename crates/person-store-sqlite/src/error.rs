//! Error type for `person-store-sqlite`.

use person_core::{PersonId, store::StoreError};
use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// The `(first_name, last_name)` unique index rejected a write.
  #[error("a person named {first_name} {last_name} already exists")]
  DuplicateName {
    first_name: String,
    last_name:  String,
  },

  /// An update targeted an id with no row.
  #[error("no person row with id {0}")]
  MissingRow(PersonId),
}

impl StoreError for Error {
  fn is_duplicate_name(&self) -> bool { matches!(self, Self::DuplicateName { .. }) }
}

/// True if `e` is a `UNIQUE` constraint violation.
pub(crate) fn is_unique_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
