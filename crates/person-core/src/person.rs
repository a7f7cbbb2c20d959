//! Person — the single entity managed by the service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier. Stable for the lifetime of a record and never
/// reused after deletion.
pub type PersonId = i64;

/// A person's biographical record plus a server-managed avatar.
///
/// `id` is absent until the record is first saved. `avatar` holds a
/// base64-encoded image; clients may send it but the service discards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  #[serde(default)]
  pub id:               Option<PersonId>,
  pub first_name:       String,
  pub last_name:        String,
  pub date_of_birth:    NaiveDate,
  pub city_of_birth:    String,
  pub country_of_birth: String,
  pub nationality:      String,
  #[serde(default)]
  pub avatar:           Option<String>,
}

impl Person {
  /// `"{first_name} {last_name}"`, the input to avatar key derivation.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// True when no usable avatar has been attached yet.
  pub fn lacks_avatar(&self) -> bool {
    self.avatar.as_deref().is_none_or(|a| a.trim().is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn john() -> Person {
    Person {
      id:               Some(7),
      first_name:       "John".into(),
      last_name:        "Doe".into(),
      date_of_birth:    NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
      city_of_birth:    "New York".into(),
      country_of_birth: "USA".into(),
      nationality:      "American".into(),
      avatar:           None,
    }
  }

  #[test]
  fn serializes_with_camel_case_fields() {
    let json = serde_json::to_value(john()).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["firstName"], "John");
    assert_eq!(json["dateOfBirth"], "1990-01-15");
    assert_eq!(json["countryOfBirth"], "USA");
    assert!(json["avatar"].is_null());
  }

  #[test]
  fn id_and_avatar_are_optional_on_input() {
    let person: Person = serde_json::from_str(
      r#"{"firstName":"John","lastName":"Doe","dateOfBirth":"1990-01-15",
          "cityOfBirth":"New York","countryOfBirth":"USA","nationality":"American"}"#,
    )
    .unwrap();
    assert_eq!(person.id, None);
    assert_eq!(person.avatar, None);
    assert_eq!(person.full_name(), "John Doe");
  }

  #[test]
  fn blank_avatar_counts_as_missing() {
    let mut p = john();
    assert!(p.lacks_avatar());
    p.avatar = Some("  ".into());
    assert!(p.lacks_avatar());
    p.avatar = Some("aGk=".into());
    assert!(!p.lacks_avatar());
  }
}
