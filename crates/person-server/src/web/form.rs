//! Form input and post-redirect notices for the HTML surface.

use chrono::NaiveDate;
use person_core::{Person, PersonId};
use serde::Deserialize;
use thiserror::Error;

/// Fields posted by the person form. All values arrive as text; an empty
/// `id` means "create".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonForm {
  #[serde(default)]
  pub id:               String,
  pub first_name:       String,
  pub last_name:        String,
  pub date_of_birth:    String,
  pub city_of_birth:    String,
  pub country_of_birth: String,
  pub nationality:      String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
  #[error("invalid id {0:?}")]
  BadId(String),
  #[error("invalid date of birth {0:?}, expected YYYY-MM-DD")]
  BadDate(String),
}

impl PersonForm {
  /// Split the form into the target id (if editing) and the person fields.
  pub fn into_person(self) -> Result<(Option<PersonId>, Person), FormError> {
    let id = match self.id.trim() {
      "" => None,
      raw => Some(raw.parse().map_err(|_| FormError::BadId(raw.to_owned()))?),
    };
    let date_of_birth = NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d")
      .map_err(|_| FormError::BadDate(self.date_of_birth.clone()))?;

    Ok((id, Person {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      date_of_birth,
      city_of_birth: self.city_of_birth,
      country_of_birth: self.country_of_birth,
      nationality: self.nationality,
      avatar: None,
    }))
  }
}

/// Outcome banner shown after a redirect back to `/persons`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
  Created,
  Updated,
  Deleted,
  NotFound,
  Duplicate,
  Invalid,
  Error,
}

impl Notice {
  const ALL: [Notice; 7] = [
    Notice::Created,
    Notice::Updated,
    Notice::Deleted,
    Notice::NotFound,
    Notice::Duplicate,
    Notice::Invalid,
    Notice::Error,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Notice::Created => "created",
      Notice::Updated => "updated",
      Notice::Deleted => "deleted",
      Notice::NotFound => "not-found",
      Notice::Duplicate => "duplicate",
      Notice::Invalid => "invalid",
      Notice::Error => "error",
    }
  }

  /// Unknown values are ignored rather than rejected.
  pub fn parse(s: &str) -> Option<Self> { Self::ALL.into_iter().find(|n| n.as_str() == s) }

  pub fn message(self) -> &'static str {
    match self {
      Notice::Created => "Person created successfully.",
      Notice::Updated => "Person updated successfully.",
      Notice::Deleted => "Person deleted successfully.",
      Notice::NotFound => "Person not found.",
      Notice::Duplicate => "A person with the same first name and last name already exists.",
      Notice::Invalid => "The submitted form could not be read.",
      Notice::Error => "The operation failed. Please try again.",
    }
  }

  pub fn is_error(self) -> bool {
    !matches!(self, Notice::Created | Notice::Updated | Notice::Deleted)
  }

  pub fn redirect_target(self) -> String { format!("/persons?notice={}", self.as_str()) }
}
