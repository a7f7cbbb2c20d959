//! The `PersonStore` trait.
//!
//! Implemented by storage backends (e.g. `person-store-sqlite`). The service
//! layer depends on this abstraction only. Stores enforce no business rules;
//! they provide single-row atomicity and nothing more.

use std::future::Future;

use crate::person::{Person, PersonId};

/// Error contract for store backends.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// True when a write was rejected by a uniqueness constraint on the
  /// `(first_name, last_name)` pair.
  fn is_duplicate_name(&self) -> bool { false }
}

/// Abstraction over a person store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: StoreError;

  /// All records. Order is backend-defined but stable within a single read.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// All records whose first and last name match exactly (case-sensitive).
  fn find_by_name_pair<'a>(
    &'a self,
    first_name: &'a str,
    last_name: &'a str,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Insert when `person.id` is `None` (the returned record carries the
  /// assigned id), otherwise replace the full row with that id.
  fn save(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  fn exists_by_id(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete a record. Succeeds silently when `id` is absent; callers that
  /// need to report not-found must check [`PersonStore::exists_by_id`] first.
  fn delete_by_id(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Number of stored records.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
