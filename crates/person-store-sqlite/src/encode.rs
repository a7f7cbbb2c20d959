//! Conversions between [`Person`] and the plain-text column representation.
//!
//! Dates are stored as `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use person_core::{Person, PersonId};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column list shared by every `SELECT`, in [`RawPerson::from_row`] order.
pub const COLUMNS: &str = "id, first_name, last_name, date_of_birth, \
                           city_of_birth, country_of_birth, nationality, avatar";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// A `persons` row exactly as read from SQLite.
pub struct RawPerson {
  pub id:               PersonId,
  pub first_name:       String,
  pub last_name:        String,
  pub date_of_birth:    String,
  pub city_of_birth:    String,
  pub country_of_birth: String,
  pub nationality:      String,
  pub avatar:           Option<String>,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      first_name:       row.get(1)?,
      last_name:        row.get(2)?,
      date_of_birth:    row.get(3)?,
      city_of_birth:    row.get(4)?,
      country_of_birth: row.get(5)?,
      nationality:      row.get(6)?,
      avatar:           row.get(7)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:               Some(self.id),
      first_name:       self.first_name,
      last_name:        self.last_name,
      date_of_birth:    decode_date(&self.date_of_birth)?,
      city_of_birth:    self.city_of_birth,
      country_of_birth: self.country_of_birth,
      nationality:      self.nationality,
      avatar:           self.avatar,
    })
  }
}
