//! [`PersonService`] — orchestrates CRUD against a [`PersonStore`] and an
//! [`AvatarProvisioner`].
//!
//! Two invariants live here rather than in the store:
//!
//! - **Duplicate guard**: create refuses a `(first_name, last_name)` pair that
//!   is already stored. The check-then-insert is backed up by the store's
//!   uniqueness constraint; a constraint violation is reported the same way.
//! - **Avatar preservation**: update always keeps the stored avatar, whatever
//!   the caller sent.

use crate::{
  Error, Result,
  avatar::{AvatarFetcher, AvatarProvisioner},
  person::{Person, PersonId},
  store::{PersonStore, StoreError},
};

pub struct PersonService<S, F> {
  store:   S,
  avatars: AvatarProvisioner<F>,
}

fn unavailable<E: StoreError>(e: E) -> Error { Error::StoreUnavailable(Box::new(e)) }

/// Map a failed write, recognising uniqueness violations on the name pair.
fn write_failed<E: StoreError>(e: E, person: &Person) -> Error {
  if e.is_duplicate_name() {
    Error::DuplicatePerson {
      first_name: person.first_name.clone(),
      last_name:  person.last_name.clone(),
    }
  } else {
    unavailable(e)
  }
}

impl<S, F> PersonService<S, F>
where
  S: PersonStore,
  F: AvatarFetcher,
{
  pub fn new(store: S, avatars: AvatarProvisioner<F>) -> Self {
    Self { store, avatars }
  }

  pub fn store(&self) -> &S { &self.store }

  /// All stored persons, unfiltered.
  pub async fn list(&self) -> Result<Vec<Person>> {
    let persons = self.store.find_all().await.map_err(unavailable)?;
    tracing::debug!(count = persons.len(), "listed persons");
    Ok(persons)
  }

  pub async fn get(&self, id: PersonId) -> Result<Person> {
    self
      .store
      .find_by_id(id)
      .await
      .map_err(unavailable)?
      .ok_or(Error::NotFound(id))
  }

  /// Persist a new person and attach an avatar derived from the full name.
  ///
  /// Any `id` or `avatar` on `input` is ignored. The avatar is provisioned
  /// before the single insert, so a failed write stores nothing. The returned
  /// record always carries `Some` avatar; it is `""` when the provider could
  /// not be reached.
  pub async fn create(&self, input: Person) -> Result<Person> {
    let existing = self
      .store
      .find_by_name_pair(&input.first_name, &input.last_name)
      .await
      .map_err(unavailable)?;
    if !existing.is_empty() {
      tracing::warn!(
        first_name = %input.first_name,
        last_name = %input.last_name,
        "rejected duplicate person"
      );
      return Err(Error::DuplicatePerson {
        first_name: input.first_name,
        last_name:  input.last_name,
      });
    }

    let avatar = self.avatars.provision(None, &input.full_name()).await;
    let draft = Person { id: None, avatar: Some(avatar), ..input };
    let saved = self
      .store
      .save(draft.clone())
      .await
      .map_err(|e| write_failed(e, &draft))?;
    tracing::info!(id = ?saved.id, "created person");
    Ok(saved)
  }

  /// Replace every field of `id` except the id itself and the avatar.
  pub async fn update(&self, id: PersonId, input: Person) -> Result<Person> {
    let existing = self.get(id).await?;
    let replacement = Person {
      id: Some(id),
      avatar: existing.avatar,
      ..input
    };
    tracing::debug!(
      id,
      first_name = %replacement.first_name,
      last_name = %replacement.last_name,
      date_of_birth = %replacement.date_of_birth,
      "updating person"
    );
    let saved = self
      .store
      .save(replacement.clone())
      .await
      .map_err(|e| write_failed(e, &replacement))?;
    tracing::info!(id, "updated person");
    Ok(saved)
  }

  pub async fn delete(&self, id: PersonId) -> Result<()> {
    if !self.store.exists_by_id(id).await.map_err(unavailable)? {
      return Err(Error::NotFound(id));
    }
    self.store.delete_by_id(id).await.map_err(unavailable)?;
    tracing::info!(id, "deleted person");
    Ok(())
  }

  /// Attach an avatar to a stored person that has none (or a blank one).
  /// Records that already carry an avatar are returned untouched.
  pub async fn backfill_avatar(&self, mut person: Person) -> Result<Person> {
    if !person.lacks_avatar() || person.id.is_none() {
      return Ok(person);
    }
    person.avatar = Some(self.avatars.provision(None, &person.full_name()).await);
    self.store.save(person).await.map_err(unavailable)
  }

  /// Create each of `people` when the store is empty. Returns how many
  /// records were created.
  pub async fn seed_if_empty(&self, people: Vec<Person>) -> Result<usize> {
    if self.store.count().await.map_err(unavailable)? > 0 {
      tracing::info!("store already contains data, skipping seed");
      return Ok(0);
    }
    tracing::info!(count = people.len(), "seeding store");
    let mut created = 0;
    for person in people {
      self.create(person).await?;
      created += 1;
    }
    Ok(created)
  }
}
