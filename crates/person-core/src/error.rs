//! Error types for `person-core`.

use thiserror::Error;

use crate::person::PersonId;

#[derive(Debug, Error)]
pub enum Error {
  /// A person with the same first and last name is already stored.
  #[error("person {first_name} {last_name} already exists")]
  DuplicatePerson {
    first_name: String,
    last_name:  String,
  },

  #[error("person not found: {0}")]
  NotFound(PersonId),

  /// Raised by avatar transports. [`AvatarProvisioner`] absorbs it, so it
  /// never reaches service callers.
  ///
  /// [`AvatarProvisioner`]: crate::avatar::AvatarProvisioner
  #[error("avatar fetch from {url} failed: {reason}")]
  AvatarFetchFailed { url: String, reason: String },

  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
