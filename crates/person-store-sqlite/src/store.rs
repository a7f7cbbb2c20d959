//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::path::Path;

use person_core::{Person, PersonId, store::PersonStore};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{COLUMNS, RawPerson, encode_date},
  error::is_unique_violation,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert(&self, person: Person) -> Result<Person> {
    let first_name       = person.first_name.clone();
    let last_name        = person.last_name.clone();
    let date_of_birth    = encode_date(person.date_of_birth);
    let city_of_birth    = person.city_of_birth.clone();
    let country_of_birth = person.country_of_birth.clone();
    let nationality      = person.nationality.clone();
    let avatar           = person.avatar.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             first_name, last_name, date_of_birth,
             city_of_birth, country_of_birth, nationality, avatar
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            first_name,
            last_name,
            date_of_birth,
            city_of_birth,
            country_of_birth,
            nationality,
            avatar,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| write_error(e, &person))?;

    tracing::debug!(id, "inserted person row");
    Ok(Person { id: Some(id), ..person })
  }

  async fn replace(&self, id: PersonId, person: Person) -> Result<Person> {
    let first_name       = person.first_name.clone();
    let last_name        = person.last_name.clone();
    let date_of_birth    = encode_date(person.date_of_birth);
    let city_of_birth    = person.city_of_birth.clone();
    let country_of_birth = person.country_of_birth.clone();
    let nationality      = person.nationality.clone();
    let avatar           = person.avatar.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE persons SET
             first_name = ?2, last_name = ?3, date_of_birth = ?4,
             city_of_birth = ?5, country_of_birth = ?6, nationality = ?7,
             avatar = ?8
           WHERE id = ?1",
          rusqlite::params![
            id,
            first_name,
            last_name,
            date_of_birth,
            city_of_birth,
            country_of_birth,
            nationality,
            avatar,
          ],
        )?)
      })
      .await
      .map_err(|e| write_error(e, &person))?;

    if changed == 0 {
      return Err(Error::MissingRow(id));
    }
    Ok(person)
  }
}

fn write_error(e: tokio_rusqlite::Error, person: &Person) -> Error {
  if is_unique_violation(&e) {
    Error::DuplicateName {
      first_name: person.first_name.clone(),
      last_name:  person.last_name.clone(),
    }
  } else {
    Error::Database(e)
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn find_all(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {COLUMNS} FROM persons ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM persons WHERE id = ?1"),
              rusqlite::params![id],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn find_by_name_pair(
    &self,
    first_name: &str,
    last_name: &str,
  ) -> Result<Vec<Person>> {
    let first_name = first_name.to_owned();
    let last_name  = last_name.to_owned();

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM persons
           WHERE first_name = ?1 AND last_name = ?2
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![first_name, last_name], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn save(&self, person: Person) -> Result<Person> {
    match person.id {
      None     => self.insert(person).await,
      Some(id) => self.replace(id, person).await,
    }
  }

  async fn exists_by_id(&self, id: PersonId) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM persons WHERE id = ?1",
              rusqlite::params![id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  async fn delete_by_id(&self, id: PersonId) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM persons WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM persons", [], |r| r.get(0))?))
      .await?;
    Ok(u64::try_from(n).unwrap_or_default())
  }
}
